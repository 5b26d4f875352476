//! Uniform selection from the pool of not-yet-drawn numbers

use rand::Rng;
use rand_pcg::Pcg32;

use crate::ledger::Ledger;

/// Why a draw produced no number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    /// Every number has been drawn; terminal for this game, not a failure
    PoolExhausted,
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::PoolExhausted => write!(f, "all numbers have been drawn"),
        }
    }
}

impl std::error::Error for DrawError {}

/// Numbers still eligible for a draw, in ascending order
pub fn available_numbers(total: u8, ledger: &Ledger) -> Vec<u8> {
    (1..=total).filter(|&n| !ledger.contains(n)).collect()
}

/// Pick one unused number uniformly at random
///
/// Never mutates the ledger; the caller records the result when the ball is
/// revealed.
pub fn draw_number(total: u8, ledger: &Ledger, rng: &mut Pcg32) -> Result<u8, DrawError> {
    let pool = available_numbers(total, ledger);
    if pool.is_empty() {
        return Err(DrawError::PoolExhausted);
    }
    Ok(pool[rng.random_range(0..pool.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_draw_never_returns_ledger_member() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ledger = Ledger::new();
        ledger.record(3);
        ledger.record(9);
        for _ in 0..200 {
            let n = draw_number(10, &ledger, &mut rng).unwrap();
            assert!(!ledger.contains(n));
            assert!((1..=10).contains(&n));
        }
    }

    #[test]
    fn test_exhaustion_visits_every_number_once() {
        let mut rng = Pcg32::seed_from_u64(77);
        let mut ledger = Ledger::new();
        let mut seen = Vec::new();
        for _ in 0..75 {
            let n = draw_number(75, &ledger, &mut rng).unwrap();
            assert!(!seen.contains(&n));
            seen.push(n);
            ledger.record(n);
        }
        seen.sort_unstable();
        assert_eq!(seen, (1..=75).collect::<Vec<_>>());
        assert_eq!(
            draw_number(75, &ledger, &mut rng),
            Err(DrawError::PoolExhausted)
        );
    }

    #[test]
    fn test_available_numbers_is_the_complement() {
        let mut ledger = Ledger::new();
        ledger.record(1);
        ledger.record(4);
        assert_eq!(available_numbers(5, &ledger), vec![2, 3, 5]);
    }
}
