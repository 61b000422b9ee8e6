//! Eight well-known players with last-season numbers.

use squadforge_core::{Candidate, CandidatePool, Role};

/// The star-player sample pool.
pub fn star_players() -> CandidatePool {
    let candidates = vec![
        Candidate::new("virat-kohli", "Virat Kohli", Role::Batter, 15.0).with_batting(741, 154.69),
        Candidate::new("ab-de-villiers", "AB de Villiers", Role::Batter, 11.0)
            .with_batting(454, 151.68)
            .overseas(true),
        Candidate::new("ms-dhoni", "MS Dhoni", Role::WicketKeeper, 12.0).with_batting(200, 116.28),
        Candidate::new("jasprit-bumrah", "Jasprit Bumrah", Role::Bowler, 13.0)
            .with_batting(10, 100.0)
            .with_bowling(27, 6.73),
        Candidate::new("kagiso-rabada", "Kagiso Rabada", Role::Bowler, 9.25)
            .with_batting(15, 120.0)
            .with_bowling(30, 8.34)
            .overseas(true),
        Candidate::new("andre-russell", "Andre Russell", Role::AllRounder, 12.0)
            .with_batting(348, 204.81)
            .with_bowling(6, 9.52)
            .overseas(true),
        Candidate::new("ravindra-jadeja", "Ravindra Jadeja", Role::AllRounder, 16.0)
            .with_batting(131, 127.18)
            .with_bowling(13, 7.01),
        Candidate::new("kl-rahul", "KL Rahul", Role::WicketKeeper, 17.0).with_batting(626, 135.38),
    ];
    match CandidatePool::new(candidates) {
        Ok(pool) => pool,
        Err(e) => panic!("star pool is valid: {e}"),
    }
}
