//! Ready-made domains.
//!
//! Small reference domains for tests, benches, and trying the environment
//! out without writing a transition model first.

pub mod line;

pub use line::LineWorld;
