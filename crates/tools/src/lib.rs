//! Built-in tool implementations for Parley.
//!
//! The tools are mocks: a constrained calculator, a word-count summarizer,
//! and a keyword planner. The [`ToolRegistry`] is the only way the engine
//! reaches them.

pub mod calculator;
pub mod planner;
pub mod registry;
pub mod summarizer;

pub use registry::{ToolKind, ToolRegistry};
