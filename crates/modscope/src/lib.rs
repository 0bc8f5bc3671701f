//! Modscope - PlantUML diagrams from module metadata
//!
//! Turns a snapshot of an application's modules (their dependencies and the
//! data models they declare) into PlantUML text: a class diagram of one
//! module's models, and a package diagram of its dependencies in either
//! direction.
//!
//! # Quick Start
//!
//! ```rust
//! use modscope::prelude::*;
//!
//! let snapshot = Snapshot::new()
//!     .with_module(Module::new("base"))
//!     .with_module(Module::new("sale").with_dependency("base"));
//!
//! let uml = modscope::package_diagram(&snapshot, "sale").unwrap();
//! assert!(uml.contains("sale ..> base"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, drive a generator directly:
//!
//! ```rust
//! use modscope::prelude::*;
//!
//! let snapshot = Snapshot::new()
//!     .with_module(Module::new("sale"))
//!     .with_model(Model::new("sale.order").with_module("sale"));
//! let config = DiagramConfig {
//!     show_model_methods: false,
//!     ..DiagramConfig::default()
//! };
//!
//! let subject = snapshot.module("sale").unwrap();
//! let mut generator = ClassDiagramGenerator::new(&snapshot, subject, &config);
//! let uml = generator.generate();
//! assert!(uml.contains("class \"SaleOrder\" as sale_sale_order"));
//! assert!(generator.diagnostics().is_empty());
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        DiagramConfig, DiagramError, DiagramFrame, DiagramGenerator, DiagramKind, Diagnostic,
        DiagnosticKind, Field, FieldType, ImageFormat, ImageRenderer, MetadataSource, Method,
        Model, Module, ModuleState, PlantUmlRenderer, Snapshot,
    };
    pub use crate::plugins::class::ClassDiagramGenerator;
    pub use crate::plugins::orchestrator::{GeneratedDiagram, Orchestrator, RenderedDiagram};
    pub use crate::plugins::package::{InversePackageDiagramGenerator, PackageDiagramGenerator};
}

/// Generate one framed diagram of `kind` with the default configuration
///
/// # Example
/// ```rust
/// use modscope::{generate, DiagramKind, Module, Snapshot};
///
/// let snapshot = Snapshot::new().with_module(Module::new("base"));
/// let uml = generate(&snapshot, DiagramKind::InversePackage, "base").unwrap();
/// assert!(uml.starts_with("@startuml"));
/// assert!(uml.ends_with("@enduml"));
/// ```
pub fn generate<S: MetadataSource>(
    source: &S,
    kind: DiagramKind,
    module: &str,
) -> Result<String, DiagramError> {
    use crate::plugins::orchestrator::Orchestrator;

    let config = DiagramConfig::default();
    let orchestrator = Orchestrator::new(source, &config);
    Ok(orchestrator.generate(kind, module)?.source)
}

/// Class diagram of the models `module` declares
pub fn class_diagram<S: MetadataSource>(source: &S, module: &str) -> Result<String, DiagramError> {
    generate(source, DiagramKind::Class, module)
}

/// Package diagram of `module` and its transitive dependencies
pub fn package_diagram<S: MetadataSource>(source: &S, module: &str) -> Result<String, DiagramError> {
    generate(source, DiagramKind::Package, module)
}

/// Package diagram of `module` and every module that transitively depends on it
pub fn inverse_package_diagram<S: MetadataSource>(
    source: &S,
    module: &str,
) -> Result<String, DiagramError> {
    generate(source, DiagramKind::InversePackage, module)
}
