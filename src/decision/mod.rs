//! Execution decision engine

pub mod engine;

pub use engine::*;
