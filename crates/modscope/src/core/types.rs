//! Core type definitions shared by the DSL, generators and renderer

use std::fmt;
use std::str::FromStr;

use super::DiagramError;

/// The diagram families this crate can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DiagramKind {
    /// Models of one module as classes with their relations
    #[default]
    Class,
    /// Forward dependency tree rooted at a module
    Package,
    /// Reverse dependency tree: every module depending on the subject
    InversePackage,
}

impl DiagramKind {
    /// Every kind, in the order [`Orchestrator::generate_all`](crate::plugins::Orchestrator::generate_all) builds them
    pub fn all() -> [DiagramKind; 3] {
        [
            DiagramKind::Class,
            DiagramKind::Package,
            DiagramKind::InversePackage,
        ]
    }

    /// Default diagram title
    pub fn title(&self) -> &'static str {
        match self {
            DiagramKind::Class => "Models Class Diagram",
            DiagramKind::Package => "Module Dependency Diagram",
            DiagramKind::InversePackage => "Module Inverse Dependency Diagram",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DiagramKind::Class => "Models declared by a module, their members and relations",
            DiagramKind::Package => "Modules the subject depends on, transitively",
            DiagramKind::InversePackage => "Modules depending on the subject, transitively",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramKind::Class => write!(f, "class"),
            DiagramKind::Package => write!(f, "package"),
            DiagramKind::InversePackage => write!(f, "inverse"),
        }
    }
}

impl FromStr for DiagramKind {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "class" => Ok(DiagramKind::Class),
            "package" | "dependency" => Ok(DiagramKind::Package),
            "inverse" | "inverse-package" | "inverse-dependency" => {
                Ok(DiagramKind::InversePackage)
            }
            _ => Err(DiagramError::UnknownDiagramKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// Visibility marker for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
    Package,   // ~
}

impl Visibility {
    /// Derive visibility from the underscore naming convention
    pub fn from_name(name: &str) -> Self {
        if name.starts_with("__") {
            Visibility::Private
        } else if name.starts_with('_') {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Image formats the external renderer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// File extension of the rendered image
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    /// PlantUML command line switch selecting this format
    pub fn flag(&self) -> &'static str {
        match self {
            ImageFormat::Png => "-tpng",
            ImageFormat::Svg => "-tsvg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}
