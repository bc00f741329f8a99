//! Small math helpers shared by the simulation systems.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics; if the range is inverted (an arena smaller than the
/// entity being clamped), `min` wins.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Circle-circle overlap test on squared distances.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) <= reach * reach
}

/// Wraps an angle into `[-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = (angle + PI) % TAU;
    if wrapped < 0.0 {
        wrapped += TAU;
    }
    wrapped - PI
}

/// The signed rotation that takes `from` to `to` the short way round, in `[-PI, PI]`.
#[inline]
pub fn shortest_angle_diff(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Unit vector along `v`, treating a zero-length vector as having length 1 (so the result is zero).
#[inline]
pub fn direction_or_zero(v: Vec2) -> Vec2 {
    let length = v.length();
    if length > 0.0 {
        v / length
    } else {
        v
    }
}

/// Uniform sample in `[min, max)`. Degenerate or inverted ranges return `min` instead of panicking.
pub fn random_in<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min).max(0.0)
}

/// Picks an entry in proportion to its weight.
///
/// `roll` is a uniform sample in `[0, 1)`. Weights below zero count as zero. The remainder is
/// walked down entry by entry until it reaches zero; floating-point leftovers fall back to the
/// last entry that can be picked, and a zero total falls back to the last entry outright.
/// Returns `None` only for an empty slice.
pub fn pick_weighted<T: Copy>(entries: &[(T, f32)], roll: f32) -> Option<T> {
    let (last, _) = *entries.last()?;
    let total: f32 = entries.iter().map(|(_, weight)| weight.max(0.0)).sum();
    if total <= 0.0 {
        return Some(last);
    }

    let fallback = entries
        .iter()
        .rev()
        .find(|(_, weight)| *weight > 0.0)
        .map_or(last, |&(value, _)| value);

    let mut remainder = roll * total;
    for &(value, weight) in entries {
        let weight = weight.max(0.0);
        if weight == 0.0 {
            continue;
        }
        remainder -= weight;
        if remainder <= 0.0 {
            return Some(value);
        }
    }
    Some(fallback)
}
