//! Package diagrams: module dependencies and inverse dependencies

mod generator;
mod inverse;
mod label;
mod tree;

pub use generator::PackageDiagramGenerator;
pub use inverse::InversePackageDiagramGenerator;
pub use label::{description_note, package_color, package_label, package_stereotype};
pub use tree::Direction;
