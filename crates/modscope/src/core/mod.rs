//! Core abstractions for diagram generation
//!
//! Everything here is diagram-family agnostic: the text builder and PlantUML
//! DSL, the metadata model and its dependency index, configuration, errors,
//! and the generator/renderer traits the plugins implement.

pub mod creole;
mod config;
mod diagnostics;
mod dsl;
mod error;
mod generator;
pub mod logging;
mod metadata;
mod renderer;
mod resolver;
mod text;
mod types;

pub use config::*;
pub use diagnostics::*;
pub use dsl::*;
pub use error::*;
pub use generator::*;
pub use logging::*;
pub use metadata::*;
pub use renderer::*;
pub use resolver::*;
pub use text::*;
pub use types::*;
