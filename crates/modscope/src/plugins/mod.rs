//! Diagram generator plugins
//!
//! One sub-module per diagram family, each implementing
//! [`DiagramGenerator`](crate::core::DiagramGenerator), plus the orchestrator
//! that picks the right generator for a [`DiagramKind`](crate::core::DiagramKind).

pub mod class;
pub mod orchestrator;
pub mod package;

pub use class::*;
pub use orchestrator::*;
pub use package::*;
