//! Collision detection and response inside the bounding sphere
//!
//! Two cases: ball-ball overlap (centers closer than one diameter) and the
//! globe shell (a ball's center straying past `SPHERE_RADIUS - BALL_RADIUS`).
//! Distance tests use squared distances; normalization of a near-zero delta
//! falls back to a fixed axis.

use glam::Vec3;

use crate::globe_center;

/// Shortest distance treated as nonzero when normalizing
const MIN_NORMAL_LENGTH: f32 = 1e-3;

/// A detected contact: separating normal plus penetration depth
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit normal pointing out of the contact (from `b` toward `a`, or
    /// radially outward for shell contacts)
    pub normal: Vec3,
    /// How far past the allowed distance the centers sit
    pub depth: f32,
}

/// Reflect velocity off a surface with restitution
///
/// The normal component reverses sign and shrinks by `bounce`; the
/// tangential component is preserved: `v' = v - (1 + bounce)(v·n)n`
#[inline]
pub fn reflect_velocity(velocity: Vec3, normal: Vec3, bounce: f32) -> Vec3 {
    velocity - (1.0 + bounce) * velocity.dot(normal) * normal
}

/// Check two ball centers against the minimum separation distance
///
/// Returns the contact if they are too close. An exact center overlap
/// yields an arbitrary fixed normal rather than a NaN.
pub fn ball_overlap(a: Vec3, b: Vec3, min_separation: f32) -> Option<Contact> {
    let delta = a - b;
    let dist_sq = delta.length_squared();
    if dist_sq >= min_separation * min_separation {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist > MIN_NORMAL_LENGTH {
        delta / dist
    } else {
        Vec3::X
    };
    Some(Contact {
        normal,
        depth: min_separation - dist,
    })
}

/// Check a ball center against the inside of the globe shell
///
/// `limit` is `SPHERE_RADIUS - BALL_RADIUS`. A ball sitting exactly on the
/// shell counts as contact with zero depth, so an outward-moving ball at the
/// boundary still reflects.
pub fn shell_contact(pos: Vec3, limit: f32) -> Option<Contact> {
    let delta = pos - globe_center();
    let dist_sq = delta.length_squared();
    if dist_sq < limit * limit {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist > MIN_NORMAL_LENGTH {
        delta / dist
    } else {
        Vec3::X
    };
    Some(Contact {
        normal,
        depth: dist - limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BALL_RADIUS, MIN_SEPARATION, SPHERE_RADIUS};

    #[test]
    fn test_reflect_radial_velocity_shrinks_by_bounce() {
        let v = Vec3::new(4.0, 0.0, 0.0);
        let n = Vec3::X;
        let reflected = reflect_velocity(v, n, 0.75);
        assert!((reflected.x - (-3.0)).abs() < 1e-5);
        assert!(reflected.y.abs() < 1e-6);
        assert!(reflected.z.abs() < 1e-6);
    }

    #[test]
    fn test_reflect_preserves_tangential_component() {
        let v = Vec3::new(2.0, 5.0, -1.0);
        let n = Vec3::X;
        let reflected = reflect_velocity(v, n, 0.75);
        assert!((reflected.x - (-1.5)).abs() < 1e-5);
        assert_eq!(reflected.y, 5.0);
        assert_eq!(reflected.z, -1.0);
    }

    #[test]
    fn test_reflect_is_invariant_under_normal_negation() {
        let v = Vec3::new(2.0, 5.0, -1.0);
        let n = Vec3::new(0.6, 0.0, 0.8);
        assert_eq!(
            reflect_velocity(v, n, 0.75),
            reflect_velocity(v, -n, 0.75)
        );
    }

    #[test]
    fn test_ball_overlap_detects_close_pair() {
        let a = Vec3::new(10.0, 0.0, 0.0);
        let b = Vec3::ZERO;
        let contact = ball_overlap(a, b, MIN_SEPARATION).expect("should overlap");
        assert_eq!(contact.normal, Vec3::X);
        assert!((contact.depth - (MIN_SEPARATION - 10.0)).abs() < 1e-5);
    }

    #[test]
    fn test_ball_overlap_misses_separated_pair() {
        let a = Vec3::new(MIN_SEPARATION + 0.1, 0.0, 0.0);
        assert!(ball_overlap(a, Vec3::ZERO, MIN_SEPARATION).is_none());
    }

    #[test]
    fn test_ball_overlap_exact_center_uses_fallback_normal() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let contact = ball_overlap(p, p, MIN_SEPARATION).expect("should overlap");
        assert_eq!(contact.normal, Vec3::X);
        assert!(contact.normal.is_finite());
        assert!((contact.depth - MIN_SEPARATION).abs() < 1e-5);
    }

    #[test]
    fn test_shell_contact_inside_is_none() {
        let limit = SPHERE_RADIUS - BALL_RADIUS;
        assert!(shell_contact(crate::globe_center(), limit).is_none());
    }

    #[test]
    fn test_shell_contact_outside_reports_outward_normal() {
        let limit = SPHERE_RADIUS - BALL_RADIUS;
        let pos = crate::globe_center() + Vec3::new(limit + 5.0, 0.0, 0.0);
        let contact = shell_contact(pos, limit).expect("should contact");
        assert_eq!(contact.normal, Vec3::X);
        assert!((contact.depth - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_shell_contact_exactly_on_boundary() {
        let limit = SPHERE_RADIUS - BALL_RADIUS;
        let pos = crate::globe_center() + Vec3::new(0.0, limit, 0.0);
        let contact = shell_contact(pos, limit).expect("boundary counts as contact");
        assert!(contact.depth.abs() < 1e-3);
        assert!((contact.normal - Vec3::Y).length() < 1e-5);
    }
}
