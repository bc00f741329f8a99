use std::f32::consts::PI;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;
use taser_arena::helpers::{
    circles_overlap, clamp, direction_or_zero, pick_weighted, random_in, shortest_angle_diff, wrap_angle,
};

#[test]
fn test_clamp_prefers_min_on_inverted_range() {
    assert_that(&clamp(5.0, 0.0, 10.0)).is_equal_to(5.0);
    assert_that(&clamp(-5.0, 0.0, 10.0)).is_equal_to(0.0);
    assert_that(&clamp(15.0, 0.0, 10.0)).is_equal_to(10.0);
    assert_that(&clamp(5.0, 10.0, 0.0)).is_equal_to(10.0);
}

#[test]
fn test_circles_overlap_includes_touching() {
    assert_that(&circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0)).is_true();
    assert_that(&circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.5, 0.0), 5.0)).is_false();
}

#[test]
fn test_wrap_angle_stays_in_range() {
    for raw in [-10.0, -PI, -1.0, 0.0, 1.0, PI, 4.0, 25.0] {
        let wrapped = wrap_angle(raw);
        assert_that(&wrapped).is_greater_than_or_equal_to(-PI);
        assert_that(&wrapped).is_less_than_or_equal_to(PI);
        assert_that(&(wrapped.sin() - f32::sin(raw)).abs()).is_less_than(1e-4);
    }
}

#[test]
fn test_shortest_angle_diff_goes_the_short_way() {
    let diff = shortest_angle_diff(PI - 0.1, -PI + 0.1);
    assert_that(&(diff - 0.2).abs()).is_less_than(1e-4);
}

#[test]
fn test_direction_or_zero() {
    assert_that(&direction_or_zero(Vec2::ZERO)).is_equal_to(Vec2::ZERO);
    assert_that(&direction_or_zero(Vec2::new(0.0, -4.0))).is_equal_to(Vec2::new(0.0, -1.0));
}

#[test]
fn test_random_in_respects_range() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..500 {
        let value = random_in(&mut rng, 2.0, 3.0);
        assert_that(&value).is_greater_than_or_equal_to(2.0);
        assert_that(&value).is_less_than_or_equal_to(3.0);
    }
    assert_that(&random_in(&mut rng, 5.0, 1.0)).is_equal_to(5.0);
}

#[test]
fn test_pick_weighted_walks_weights_in_order() {
    let entries = [('a', 1.0), ('b', 2.0), ('c', 1.0)];

    assert_that(&pick_weighted(&entries, 0.0)).is_equal_to(Some('a'));
    assert_that(&pick_weighted(&entries, 0.2)).is_equal_to(Some('a'));
    assert_that(&pick_weighted(&entries, 0.5)).is_equal_to(Some('b'));
    assert_that(&pick_weighted(&entries, 0.9)).is_equal_to(Some('c'));
}

#[test]
fn test_pick_weighted_skips_non_positive_weights() {
    let entries = [('a', 0.0), ('b', -3.0), ('c', 1.0), ('d', 0.0)];

    assert_that(&pick_weighted(&entries, 0.0)).is_equal_to(Some('c'));
    assert_that(&pick_weighted(&entries, 0.999_999)).is_equal_to(Some('c'));
}

#[test]
fn test_pick_weighted_degenerate_inputs() {
    let empty: [(char, f32); 0] = [];
    assert_that(&pick_weighted(&empty, 0.5)).is_none();
    assert_that(&pick_weighted(&[('a', 0.0), ('z', 0.0)], 0.5)).is_equal_to(Some('z'));
}
