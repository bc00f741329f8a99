//! Taser Arena game library crate.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg_attr(coverage_nightly, coverage(off))]
pub mod app;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod error;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod events;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod formatter;

pub mod cli;
pub mod config;
pub mod constants;
pub mod game;
pub mod helpers;
pub mod render;
pub mod store;
pub mod systems;
