//! Globe state and core simulation types
//!
//! Entities are recreated per session; only the ledger (and volume settings)
//! survive a reload, through the persistence layer.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use crate::consts::*;
use crate::ledger::Ledger;
use crate::{bingo_letter, globe_center};

/// Phase of the draw choreography
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    /// Waiting for a spin request
    Idle,
    /// Globe whirring at full speed before the number is committed
    Spinning { ticks_left: u32 },
    /// Selected ball dropping through the exit tube
    Falling { number: u8, ticks_left: u32 },
    /// Number revealed; explosion/big-ball window
    Revealed { number: u8, ticks_left: u32 },
}

impl DrawPhase {
    /// A second spin request is a no-op while this returns true
    pub fn in_progress(&self) -> bool {
        matches!(self, DrawPhase::Spinning { .. } | DrawPhase::Falling { .. })
    }
}

/// Transient notifications for the shell (audio, DOM effects).
///
/// Draining the queue only changes what the shell observes, never the
/// simulation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobeEvent {
    SpinStarted,
    BallSelected(u8),
    Revealed(u8),
    PoolExhausted,
    LedgerCleared,
}

/// A numbered ball inside the globe
#[derive(Debug, Clone)]
pub struct Ball {
    /// Unique 1-based number, immutable after creation
    pub number: u8,
    /// BINGO column letter derived from the number
    pub letter: char,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Scripted circular trajectory around the vertical axis
    pub orbital_angle: f32,
    /// May invert sign (damped) on wall hits
    pub orbital_speed: f32,
    pub orbital_radius: f32,
    /// Independent sinusoidal vertical bob
    pub vertical_oscillation: f32,
    pub vertical_speed: f32,
}

impl Ball {
    /// Spawn a ball near the globe center with randomized motion parameters
    fn spawn(number: u8, rng: &mut Pcg32) -> Self {
        let center = globe_center();
        let spread = INIT_POSITION_SPREAD;
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            number,
            letter: bingo_letter(number),
            pos: Vec3::new(
                center.x + rng.random_range(-spread..spread),
                center.y + rng.random_range(-spread..spread),
                rng.random_range(-spread..spread),
            ),
            vel: Vec3::new(
                rng.random_range(-INIT_SPEED_SPREAD..INIT_SPEED_SPREAD),
                rng.random_range(-INIT_SPEED_SPREAD..INIT_SPEED_SPREAD),
                rng.random_range(-INIT_SPEED_SPREAD..INIT_SPEED_SPREAD),
            ),
            orbital_angle: rng.random_range(0.0..TAU),
            orbital_speed: rng.random_range(ORBITAL_SPEED_MIN..ORBITAL_SPEED_MAX) * sign,
            orbital_radius: rng.random_range(ORBITAL_RADIUS_MIN..ORBITAL_RADIUS_MAX),
            vertical_oscillation: rng.random_range(0.0..TAU),
            vertical_speed: rng.random_range(VERTICAL_SPEED_MIN..VERTICAL_SPEED_MAX),
        }
    }
}

/// Complete globe state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GlobeState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// How many numbers are in play (75 for standard bingo)
    pub total_numbers: u8,
    /// Balls in ascending numeric order
    pub balls: Vec<Ball>,
    /// Ordered record of drawn numbers, most recent first
    pub ledger: Ledger,
    pub draw_phase: DrawPhase,
    pub last_drawn: Option<u8>,
    /// Externally visible motion scale; raised while a draw runs
    pub speed_multiplier: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending events for the shell
    pub events: Vec<GlobeEvent>,
    pub(crate) rng: Pcg32,
}

impl GlobeState {
    /// Fresh session with the standard 75-ball globe and an empty ledger
    pub fn new(seed: u64) -> Self {
        Self::restore(seed, Ledger::new())
    }

    /// Fresh session resuming a previously persisted ledger
    pub fn restore(seed: u64, ledger: Ledger) -> Self {
        Self::with_total(seed, BALL_COUNT, ledger)
    }

    /// Session over a custom number range (smaller pools in tests)
    pub fn with_total(seed: u64, total: u8, ledger: Ledger) -> Self {
        let mut state = Self {
            seed,
            total_numbers: total,
            balls: Vec::with_capacity(total as usize),
            ledger,
            draw_phase: DrawPhase::Idle,
            last_drawn: None,
            speed_multiplier: IDLE_SPEED_MULTIPLIER,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_balls();
        state
    }

    /// Replace the full ball set, in increasing numeric order 1..=total
    pub fn spawn_balls(&mut self) {
        self.balls.clear();
        for number in 1..=self.total_numbers {
            let ball = Ball::spawn(number, &mut self.rng);
            self.balls.push(ball);
        }
    }

    /// Full reset: empty ledger, fresh balls, choreography abandoned
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.last_drawn = None;
        self.draw_phase = DrawPhase::Idle;
        self.speed_multiplier = IDLE_SPEED_MULTIPLIER;
        self.spawn_balls();
        self.events.push(GlobeEvent::LedgerCleared);
    }

    /// True while a spin request would be ignored
    pub fn draw_in_progress(&self) -> bool {
        self.draw_phase.in_progress()
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GlobeEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_creates_unique_ascending_numbers() {
        let state = GlobeState::new(42);
        assert_eq!(state.balls.len(), BALL_COUNT as usize);
        for (i, ball) in state.balls.iter().enumerate() {
            assert_eq!(ball.number as usize, i + 1);
            assert_eq!(ball.letter, bingo_letter(ball.number));
        }
    }

    #[test]
    fn test_spawn_parameters_within_bands() {
        let state = GlobeState::new(7);
        let center = globe_center();
        for ball in &state.balls {
            assert!((ball.pos - center).abs().max_element() <= INIT_POSITION_SPREAD);
            let mag = ball.orbital_speed.abs();
            assert!((ORBITAL_SPEED_MIN..ORBITAL_SPEED_MAX).contains(&mag));
            assert!(
                (ORBITAL_RADIUS_MIN..ORBITAL_RADIUS_MAX).contains(&ball.orbital_radius)
            );
            assert!(
                (VERTICAL_SPEED_MIN..VERTICAL_SPEED_MAX).contains(&ball.vertical_speed)
            );
        }
    }

    #[test]
    fn test_spawn_is_deterministic_for_seed() {
        let a = GlobeState::new(99);
        let b = GlobeState::new(99);
        for (x, y) in a.balls.iter().zip(&b.balls) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.orbital_speed, y.orbital_speed);
        }
    }

    #[test]
    fn test_reset_clears_ledger_and_respawns() {
        let mut state = GlobeState::new(3);
        state.ledger.record(12);
        state.last_drawn = Some(12);
        state.reset();
        assert!(state.ledger.is_empty());
        assert_eq!(state.last_drawn, None);
        assert_eq!(state.draw_phase, DrawPhase::Idle);
        assert_eq!(state.balls.len(), BALL_COUNT as usize);
        assert!(state.events.contains(&GlobeEvent::LedgerCleared));
    }
}
