//! Diagram generator trait and document framing
//!
//! Every diagram family implements [`DiagramGenerator`]. A generator is
//! created for exactly one build: it owns its [`PlantUml`] document, its marks
//! and its dependency index, and caches the finished text so repeated calls
//! to [`DiagramGenerator::generate`] are free and return the same output.

use super::{DiagramKind, Diagnostics, Module, PlantUml};

/// Footer appended to every framed document
pub const FOOTER: &str = "//Powered by **modscope** with **PlantUML**//";

/// A diagram family producing PlantUML text for one subject module
pub trait DiagramGenerator {
    /// Which diagram family this generator builds
    fn kind(&self) -> DiagramKind;

    /// Build the whole document on first call, then return the cached text
    fn generate(&mut self) -> &str;

    /// Anomalies recorded while building; empty until [`generate`](Self::generate) ran
    fn diagnostics(&self) -> &Diagnostics;
}

/// Title, header and footer wrapped around a diagram body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramFrame {
    pub title: Option<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl DiagramFrame {
    /// No title, header or footer
    pub fn bare() -> Self {
        Self::default()
    }

    /// Default title of `kind`, module summary table as header, tool footer
    pub fn standard(kind: DiagramKind, module: &Module) -> Self {
        Self {
            title: Some(kind.title().to_string()),
            header: Some(module_table(module)),
            footer: Some(FOOTER.to_string()),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Fresh document carrying this frame
    pub fn document(&self) -> PlantUml {
        let mut uml = PlantUml::new();
        if let Some(title) = &self.title {
            uml = uml.with_title(title.clone());
        }
        if let Some(header) = &self.header {
            uml = uml.with_header(header.clone());
        }
        if let Some(footer) = &self.footer {
            uml = uml.with_footer(footer.clone());
        }
        uml
    }
}

/// Creole table with the module name, summary and author
pub fn module_table(module: &Module) -> String {
    format!(
        "\n\n| **Module**: | {} |\n| **Description**: | {} |\n| **Author**: | {} |\n",
        module.name, module.summary, module.author
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_frame() {
        let mut uml = DiagramFrame::bare().document();
        uml.begin_uml().end_uml();
        assert_eq!(uml.output(), "@startuml\nhide empty members\n@enduml");
    }

    #[test]
    fn test_standard_frame() {
        let module = Module::new("sale").with_description("Sales", "Quotations", "Acme");
        let frame = DiagramFrame::standard(DiagramKind::Package, &module);
        assert_eq!(frame.title.as_deref(), Some("Module Dependency Diagram"));
        let header = frame.header.clone().unwrap();
        assert!(header.contains("| **Module**: | sale |"));
        assert!(header.contains("| **Description**: | Quotations |"));
        assert!(header.contains("| **Author**: | Acme |"));

        let mut uml = frame.document();
        uml.begin_uml().end_uml();
        let output = uml.output();
        assert!(output.starts_with("@startuml\ntitle Module Dependency Diagram\n\nright header\n"));
        assert!(output.contains("left footer\n//Powered by **modscope** with **PlantUML**//\nendfooter\n"));
    }

    #[test]
    fn test_frame_overrides() {
        let frame = DiagramFrame::bare().with_title("T").with_footer("F");
        assert_eq!(frame.title.as_deref(), Some("T"));
        assert!(frame.header.is_none());
        assert_eq!(frame.footer.as_deref(), Some("F"));
    }
}
