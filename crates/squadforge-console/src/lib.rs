//! Colorful console output for squad solves.
//!
//! Provides a custom `tracing` layer that formats solver events with colors,
//! plus plain-text renderers for rosters, diagnostics and pool statistics.
//!
//! ## Log Levels
//!
//! - **INFO**: Solve start/end
//! - **DEBUG**: Incumbent improvements and subtree progress
//! - **WARN**: Solves ending without a verified optimum

mod report;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use report::{render_diagnostics, render_pool_stats, render_roster};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "squadforge_solver=info";

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the SquadForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();
        install(true);
    });
}

/// Initializes tracing without the banner.
///
/// For machine-readable output where stdout must stay clean: events go to
/// stderr instead.
pub fn init_quiet() {
    INIT.get_or_init(|| install(false));
}

fn install(to_stdout: bool) {
    let filter = match DEFAULT_DIRECTIVE.parse::<Directive>() {
        Ok(directive) => EnvFilter::builder()
            .with_default_directive(directive)
            .from_env_lossy(),
        Err(_) => EnvFilter::from_default_env(),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(SquadConsoleLayer { to_stdout })
        .try_init();
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____                        _ _____
/ ___|  __ _ _   _  __ _  __| |  ___|__  _ __ __ _  ___
\___ \ / _` | | | |/ _` |/ _` | |_ / _ \| '__/ _` |/ _ \
 ___) | (_| | |_| | (_| | (_| |  _| (_) | | | (_| |  __/
|____/ \__, |\__,_|\__,_|\__,_|_|  \___/|_|  \__, |\___|
          |_|                                |___/
"#;

    let version_line = format!("                  v{} - Exact Squad Optimizer\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SquadConsoleLayer {
    to_stdout: bool,
}

impl<S: Subscriber> Layer<S> for SquadConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        // Accept events from solver modules
        if !target.starts_with("squadforge_solver") && !target.starts_with("squadforge::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if output.is_empty() {
            return;
        }
        if self.to_stdout {
            let _ = writeln!(io::stdout(), "{}", output);
        } else {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    violated: Option<String>,
    candidate_count: Option<u64>,
    squad_size: Option<u64>,
    threads: Option<u64>,
    time_limit_ms: Option<u64>,
    nodes: Option<u64>,
    elapsed_ms: Option<u64>,
    subtrees: Option<u64>,
    subtree: Option<u64>,
    total_impact: Option<f64>,
    total_cost: Option<f64>,
    objective: Option<f64>,
    best_unverified_impact: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "status" => self.status = Some(s),
            "reason" => self.reason = Some(s),
            "violated" => self.violated = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "candidate_count" => self.candidate_count = Some(value),
            "squad_size" => self.squad_size = Some(value),
            "threads" => self.threads = Some(value),
            "time_limit_ms" => self.time_limit_ms = Some(value),
            "nodes" => self.nodes = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "subtrees" => self.subtrees = Some(value),
            "subtree" => self.subtree = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "total_impact" => self.total_impact = Some(value),
            "total_cost" => self.total_cost = Some(value),
            "objective" => self.objective = Some(value),
            "best_unverified_impact" => self.best_unverified_impact = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            "violated" => self.violated = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "incumbent" => format_incumbent(v),
        "split" => format_split(v),
        "subtree_done" => format_subtree(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let candidates = v.candidate_count.unwrap_or(0);
    let squad = v.squad_size.unwrap_or(0);
    let threads = v.threads.unwrap_or(1);

    let mut output = format!(
        "{} {} Solving │ {} candidates │ squad of {} │ {} squads │ {} thread{}",
        format_elapsed(),
        "▶".bright_green().bold(),
        candidates.to_formatted_string(&Locale::en).bright_yellow(),
        squad.to_formatted_string(&Locale::en).bright_yellow(),
        calculate_search_scale(candidates, squad).bright_magenta(),
        threads.to_formatted_string(&Locale::en).bright_yellow(),
        if threads == 1 { "" } else { "s" },
    );

    if let Some(limit) = v.time_limit_ms {
        output.push_str(&format!(" │ {} limit", format_duration_ms(limit).bright_yellow()));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let nodes = v.nodes.unwrap_or(0);
    let duration = v.elapsed_ms.unwrap_or(0);

    let (label, detail) = match status {
        "optimal" => (
            "OPTIMAL".bright_green().bold().to_string(),
            format!(
                "impact {} │ cost {}",
                format_number(v.total_impact.unwrap_or(0.0)).bright_green(),
                format!("{:.2}", v.total_cost.unwrap_or(0.0)).white(),
            ),
        ),
        "infeasible" => (
            "INFEASIBLE".bright_red().bold().to_string(),
            v.violated.as_deref().unwrap_or("").bright_red().to_string(),
        ),
        _ => (
            "NO VERIFIED OPTIMUM".yellow().bold().to_string(),
            format!(
                "{} │ best unverified {}",
                v.reason.as_deref().unwrap_or("stopped"),
                v.best_unverified_impact
                    .map(format_number)
                    .unwrap_or_else(|| "none".to_string())
            )
            .yellow()
            .to_string(),
        ),
    };

    format!(
        "{} {} Solving complete │ {} │ {} │ {} nodes │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        label,
        detail,
        nodes.to_formatted_string(&Locale::en).white(),
        format_duration_ms(duration).yellow(),
    )
}

fn format_incumbent(v: &EventVisitor) -> String {
    format!(
        "{} {} Incumbent {} │ after {} nodes",
        format_elapsed(),
        "★".bright_yellow(),
        format_number(v.objective.unwrap_or(0.0)).bright_green(),
        v.nodes
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_black(),
    )
}

fn format_split(v: &EventVisitor) -> String {
    format!(
        "{} {} Split into {} subtrees on {} threads",
        format_elapsed(),
        "⑂".bright_blue(),
        v.subtrees
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        v.threads.unwrap_or(0).to_formatted_string(&Locale::en).white(),
    )
}

fn format_subtree(v: &EventVisitor) -> String {
    format!(
        "{} {} Subtree {:>4} │ {} nodes",
        format_elapsed(),
        "◀".bright_blue(),
        v.subtree.unwrap_or(0),
        v.nodes
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_black(),
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Integral values with thousands separators, others with two decimals.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        (value as i64).to_formatted_string(&Locale::en)
    } else {
        format!("{:.2}", value)
    }
}

/// Number of candidate squads, `C(n, k)`, in scientific notation.
fn calculate_search_scale(candidates: u64, squad: u64) -> String {
    if squad > candidates {
        return "0".to_string();
    }
    let k = squad.min(candidates - squad);
    let log_scale: f64 = (0..k)
        .map(|i| ((candidates - i) as f64).log10() - ((i + 1) as f64).log10())
        .sum();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_scale() {
        assert_eq!(calculate_search_scale(3, 5), "0");
        assert_eq!(calculate_search_scale(10, 0), "1.000 x 10^0");
        // C(10, 3) = 120
        assert_eq!(calculate_search_scale(10, 3), "1.200 x 10^2");
    }

    #[test]
    fn test_duration_format() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_number_format() {
        assert_eq!(format_number(12345.0), "12,345");
        assert_eq!(format_number(80.5), "80.50");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("something_else".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor).is_empty());
    }

    #[test]
    fn test_solve_end_mentions_violations() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("infeasible".to_string()),
            violated: Some("Violated constraints: Budget".to_string()),
            nodes: Some(3),
            ..Default::default()
        };
        let output = format_event(&visitor);
        assert!(output.contains("INFEASIBLE"));
        assert!(output.contains("Violated constraints: Budget"));
    }

    #[test]
    fn test_unverified_solve_end() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("unverified".to_string()),
            reason: Some("TimeLimit".to_string()),
            best_unverified_impact: Some(1200.0),
            ..Default::default()
        };
        let output = format_event(&visitor);
        assert!(output.contains("NO VERIFIED OPTIMUM"));
        assert!(output.contains("TimeLimit"));
        assert!(output.contains("1,200"));
    }
}
