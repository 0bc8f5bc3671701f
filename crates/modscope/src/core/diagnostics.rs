//! Recoverable anomalies found while walking metadata
//!
//! A build never fails on data-shape problems. The offending relation or
//! package is skipped (or rendered best-effort) and a [`Diagnostic`] is
//! recorded so callers can report it.

use std::fmt;

/// Category of a recorded anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A model or module name could not be found in the dependency index
    UnresolvedReference,
    /// The metadata is resolvable but inconsistent, e.g. a join table naming collision
    StructuralAnomaly,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnresolvedReference => write!(f, "unresolved reference"),
            DiagnosticKind::StructuralAnomaly => write!(f, "structural anomaly"),
        }
    }
}

/// One anomaly, with the model/field it was found on when known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub model: Option<String>,
    pub field: Option<String>,
}

impl Diagnostic {
    pub fn unresolved(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedReference,
            message: message.into(),
            model: None,
            field: None,
        }
    }

    pub fn anomaly(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::StructuralAnomaly,
            message: message.into(),
            model: None,
            field: None,
        }
    }

    pub fn on_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        match (&self.model, &self.field) {
            (Some(model), Some(field)) => write!(f, " ({}.{})", model, field),
            (Some(model), None) => write!(f, " ({})", model),
            _ => Ok(()),
        }
    }
}

/// Ordered collection of the anomalies of one build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let d = Diagnostic::unresolved("target res.partner not found")
            .on_model("sale.order")
            .on_field("partner_id");
        assert_eq!(
            d.to_string(),
            "unresolved reference: target res.partner not found (sale.order.partner_id)"
        );
        let d = Diagnostic::anomaly("join name collision").on_model("a.b");
        assert_eq!(d.to_string(), "structural anomaly: join name collision (a.b)");
    }

    #[test]
    fn test_collection_counts() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        diagnostics.push(Diagnostic::unresolved("x"));
        diagnostics.push(Diagnostic::unresolved("y"));
        diagnostics.push(Diagnostic::anomaly("z"));
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::UnresolvedReference), 2);
        assert_eq!(diagnostics.count(DiagnosticKind::StructuralAnomaly), 1);
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["x", "y", "z"]);
    }
}
