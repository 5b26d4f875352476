//! Fixed timestep globe tick
//!
//! One tick advances the draw choreography and the ball motion. Motion is the
//! original machine's recipe: each ball follows a scripted orbit blended with
//! a velocity displacement, then a pairwise separation pass and a boundary
//! clamp keep the set inside the globe shell.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{ball_overlap, reflect_velocity, shell_contact};
use super::draw::{available_numbers, draw_number};
use super::state::{Ball, DrawPhase, GlobeEvent, GlobeState};
use crate::consts::*;
use crate::globe_center;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Spin request; a no-op while a draw is already in progress
    pub spin: bool,
    /// Full reset: clear the ledger and respawn the balls
    pub reset: bool,
}

/// Advance the globe by one fixed timestep
pub fn tick(state: &mut GlobeState, input: &TickInput) {
    if input.reset {
        state.reset();
    }
    if input.spin {
        begin_spin(state);
    }

    state.time_ticks += 1;
    advance_draw_phase(state);
    step_motion(state);
}

/// Start the draw choreography unless one is running or the pool is empty
fn begin_spin(state: &mut GlobeState) {
    if state.draw_phase.in_progress() {
        return;
    }
    if available_numbers(state.total_numbers, &state.ledger).is_empty() {
        state.events.push(GlobeEvent::PoolExhausted);
        return;
    }
    state.draw_phase = DrawPhase::Spinning {
        ticks_left: SPIN_TICKS,
    };
    state.speed_multiplier = SPIN_SPEED_MULTIPLIER;
    state.events.push(GlobeEvent::SpinStarted);
}

fn advance_draw_phase(state: &mut GlobeState) {
    match state.draw_phase {
        DrawPhase::Idle => {}

        DrawPhase::Spinning { ticks_left } => {
            if ticks_left > 1 {
                state.draw_phase = DrawPhase::Spinning {
                    ticks_left: ticks_left - 1,
                };
            } else {
                // Commit the number only now, once the spin has run its course
                match draw_number(state.total_numbers, &state.ledger, &mut state.rng) {
                    Ok(number) => {
                        state.draw_phase = DrawPhase::Falling {
                            number,
                            ticks_left: FALL_TICKS,
                        };
                        state.events.push(GlobeEvent::BallSelected(number));
                    }
                    Err(_) => {
                        state.draw_phase = DrawPhase::Idle;
                        state.speed_multiplier = IDLE_SPEED_MULTIPLIER;
                        state.events.push(GlobeEvent::PoolExhausted);
                    }
                }
            }
        }

        DrawPhase::Falling { number, ticks_left } => {
            if ticks_left > 1 {
                state.draw_phase = DrawPhase::Falling {
                    number,
                    ticks_left: ticks_left - 1,
                };
            } else {
                // The ledger is appended exactly once per draw, at reveal
                state.ledger.record(number);
                state.last_drawn = Some(number);
                state.speed_multiplier = POST_DRAW_SPEED_MULTIPLIER;
                state.draw_phase = DrawPhase::Revealed {
                    number,
                    ticks_left: REVEAL_TICKS,
                };
                state.events.push(GlobeEvent::Revealed(number));
            }
        }

        DrawPhase::Revealed { number, ticks_left } => {
            if ticks_left > 1 {
                state.draw_phase = DrawPhase::Revealed {
                    number,
                    ticks_left: ticks_left - 1,
                };
            } else {
                state.draw_phase = DrawPhase::Idle;
            }
        }
    }
}

/// Advance every ball: scripted orbit + physics blend, then contact resolution
fn step_motion(state: &mut GlobeState) {
    let mult = state.speed_multiplier;
    let center = globe_center();

    for ball in &mut state.balls {
        ball.orbital_angle += ball.orbital_speed * mult;
        ball.vertical_oscillation += ball.vertical_speed * mult;

        let orbital = Vec3::new(
            center.x + ball.orbital_angle.cos() * ball.orbital_radius,
            center.y + ball.vertical_oscillation.sin() * VERTICAL_AMPLITUDE,
            ball.orbital_angle.sin() * ball.orbital_radius,
        );

        ball.vel.y += GRAVITY * mult;
        ball.pos = orbital * ORBITAL_WEIGHT + ball.vel * (PHYSICS_SCALE * mult * PHYSICS_WEIGHT);
        ball.vel *= FRICTION;
    }

    resolve_ball_collisions(&mut state.balls, &mut state.rng);

    for ball in &mut state.balls {
        resolve_boundary(ball);
    }
}

/// Separate overlapping balls pairwise
///
/// Each ball of a contacting pair moves half the overlap along the connecting
/// normal; both velocities reflect with restitution, plus a small random
/// jitter so near-collinear clusters break up. Best effort: resolving one
/// pair can re-violate another in the same pass.
pub fn resolve_ball_collisions(balls: &mut [Ball], rng: &mut Pcg32) {
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            let (head, tail) = balls.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            let Some(contact) = ball_overlap(a.pos, b.pos, MIN_SEPARATION) else {
                continue;
            };

            let half = contact.normal * (contact.depth * 0.5);
            a.pos += half;
            b.pos -= half;

            // The reflection is symmetric in the normal's sign, so one
            // normal serves both balls
            a.vel = reflect_velocity(a.vel, contact.normal, BOUNCE) + jitter(rng);
            b.vel = reflect_velocity(b.vel, contact.normal, BOUNCE) + jitter(rng);
        }
    }
}

/// Clamp a ball inside the globe shell
///
/// Position snaps onto the shell along the radial normal; velocity reflects
/// only when moving outward, so a ball resting on the boundary is left alone.
pub fn resolve_boundary(ball: &mut Ball) {
    let limit = SPHERE_RADIUS - BALL_RADIUS;
    let Some(contact) = shell_contact(ball.pos, limit) else {
        return;
    };

    ball.pos = globe_center() + contact.normal * limit;
    if ball.vel.dot(contact.normal) > 0.0 {
        ball.vel = reflect_velocity(ball.vel, contact.normal, BOUNCE);
        ball.orbital_speed *= ORBITAL_WALL_DAMPING;
    }
}

fn jitter(rng: &mut Pcg32) -> Vec3 {
    Vec3::new(
        rng.random_range(-0.5..0.5),
        rng.random_range(-0.5..0.5),
        rng.random_range(-0.5..0.5),
    ) * COLLISION_JITTER
}
