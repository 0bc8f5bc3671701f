//! Module dependency diagram

use crate::core::{
    DiagramConfig, DiagramFrame, DiagramGenerator, DiagramKind, Diagnostics, MetadataSource, Module,
};

use super::tree::{Direction, PackageTree};

/// Packages for a module and everything it transitively depends on
pub struct PackageDiagramGenerator<'a, S: MetadataSource> {
    tree: PackageTree<'a, S>,
}

impl<'a, S: MetadataSource> PackageDiagramGenerator<'a, S> {
    pub fn new(source: &'a S, subject: &'a Module, config: &'a DiagramConfig) -> Self {
        Self {
            tree: PackageTree::new(source, subject, config, Direction::Forward),
        }
    }

    pub fn with_frame(mut self, frame: DiagramFrame) -> Self {
        self.tree.frame = frame;
        self
    }

    pub fn subject(&self) -> &'a Module {
        self.tree.subject()
    }
}

impl<'a, S: MetadataSource> DiagramGenerator for PackageDiagramGenerator<'a, S> {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Package
    }

    fn generate(&mut self) -> &str {
        self.tree.generate()
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.tree.diagnostics
    }
}
