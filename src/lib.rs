//! Bingo Globe - a number-drawing machine with a physics-animated ball globe
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball motion, draw choreography)
//! - `ledger`: Ordered record of drawn numbers, persisted to LocalStorage
//! - `settings`: Volume preference, persisted separately
//! - `audio`: Procedural Web Audio sound effects (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod ledger;
pub mod settings;
pub mod sim;

pub use ledger::Ledger;
pub use settings::Settings;

use glam::Vec3;

/// Globe configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the display cadence)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Render the ball layer only every Nth tick (DOM writes are expensive)
    pub const RENDER_EVERY: u64 = 3;

    /// How many numbered balls live in the globe
    pub const BALL_COUNT: u8 = 75;

    /// Globe geometry (visual coordinate space, pixels)
    pub const GLOBE_CENTER_X: f32 = 200.0;
    pub const GLOBE_CENTER_Y: f32 = 200.0;
    pub const SPHERE_RADIUS: f32 = 185.0;
    pub const BALL_RADIUS: f32 = 18.0;
    /// Minimum center-to-center distance between balls
    pub const MIN_SEPARATION: f32 = 38.0;

    /// Per-tick physics constants
    pub const GRAVITY: f32 = 0.25;
    pub const FRICTION: f32 = 0.97;
    pub const BOUNCE: f32 = 0.75;
    /// Blend between physics displacement and the scripted orbital target
    pub const PHYSICS_WEIGHT: f32 = 0.6;
    pub const ORBITAL_WEIGHT: f32 = 1.0 - PHYSICS_WEIGHT;
    /// Scale applied to velocity when blending into position
    pub const PHYSICS_SCALE: f32 = 7.0;
    /// Amplitude of the vertical bob
    pub const VERTICAL_AMPLITUDE: f32 = 80.0;
    /// Damped inversion of orbital direction on wall hits
    pub const ORBITAL_WALL_DAMPING: f32 = -0.8;
    /// Jitter injected on ball-ball contact to break up linear clusters
    pub const COLLISION_JITTER: f32 = 0.1;

    /// Initializer bands
    pub const INIT_POSITION_SPREAD: f32 = 50.0;
    pub const INIT_SPEED_SPREAD: f32 = 5.0;
    pub const ORBITAL_RADIUS_MIN: f32 = 150.0;
    pub const ORBITAL_RADIUS_MAX: f32 = 200.0;
    pub const ORBITAL_SPEED_MIN: f32 = 0.02;
    pub const ORBITAL_SPEED_MAX: f32 = 0.06;
    pub const VERTICAL_SPEED_MIN: f32 = 0.01;
    pub const VERTICAL_SPEED_MAX: f32 = 0.04;

    /// Draw choreography (ticks at 60 Hz)
    pub const SPIN_TICKS: u32 = 90;
    pub const FALL_TICKS: u32 = 48;
    pub const REVEAL_TICKS: u32 = 48;

    /// Speed multiplier while the draw choreography runs
    pub const SPIN_SPEED_MULTIPLIER: f32 = 8.0;
    /// Speed multiplier the globe settles to after a reveal
    pub const POST_DRAW_SPEED_MULTIPLIER: f32 = 3.0;
    /// Speed multiplier before the first spin
    pub const IDLE_SPEED_MULTIPLIER: f32 = 1.0;
}

/// Center of the globe in the visual coordinate space
#[inline]
pub fn globe_center() -> Vec3 {
    Vec3::new(consts::GLOBE_CENTER_X, consts::GLOBE_CENTER_Y, 0.0)
}

/// BINGO column letter for a number (B: 1-15, I: 16-30, N: 31-45, G: 46-60, O: 61-75)
#[inline]
pub fn bingo_letter(number: u8) -> char {
    match number {
        1..=15 => 'B',
        16..=30 => 'I',
        31..=45 => 'N',
        46..=60 => 'G',
        _ => 'O',
    }
}

/// Zero-padded two-digit display form ("07", "42")
#[inline]
pub fn format_number(number: u8) -> String {
    format!("{:02}", number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bingo_letters_at_column_boundaries() {
        assert_eq!(bingo_letter(1), 'B');
        assert_eq!(bingo_letter(15), 'B');
        assert_eq!(bingo_letter(16), 'I');
        assert_eq!(bingo_letter(30), 'I');
        assert_eq!(bingo_letter(31), 'N');
        assert_eq!(bingo_letter(45), 'N');
        assert_eq!(bingo_letter(46), 'G');
        assert_eq!(bingo_letter(60), 'G');
        assert_eq!(bingo_letter(61), 'O');
        assert_eq!(bingo_letter(75), 'O');
    }

    #[test]
    fn test_format_number_pads_to_two_digits() {
        assert_eq!(format_number(7), "07");
        assert_eq!(format_number(42), "42");
    }
}
