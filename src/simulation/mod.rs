//! Random group and expense generation for benches and stress testing.

pub mod generator;
