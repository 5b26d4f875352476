//! Deterministic globe simulation
//!
//! All ball motion and draw logic lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (balls kept in numeric order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod draw;
pub mod state;
pub mod tick;

pub use collision::{Contact, ball_overlap, reflect_velocity, shell_contact};
pub use draw::{DrawError, available_numbers, draw_number};
pub use state::{Ball, DrawPhase, GlobeEvent, GlobeState};
pub use tick::{TickInput, tick};
