//! Orchestrator for the generate → render pipeline
//!
//! The orchestrator looks the subject module up, builds a fresh generator of
//! the requested [`DiagramKind`] with the standard frame, and optionally hands
//! the finished text to an [`ImageRenderer`]. Nothing is shared between calls.

use tracing::{debug, info, span, warn, Level};

use crate::core::{
    Diagnostic, DiagramConfig, DiagramError, DiagramFrame, DiagramGenerator, DiagramKind,
    ImageFormat, ImageRenderer, MetadataSource, Module, RenderedImage,
};
use crate::plugins::class::ClassDiagramGenerator;
use crate::plugins::package::{InversePackageDiagramGenerator, PackageDiagramGenerator};

/// PlantUML text for one subject plus the anomalies met while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDiagram {
    pub kind: DiagramKind,
    pub module: String,
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// A generated diagram and its rendered image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub diagram: GeneratedDiagram,
    pub image: RenderedImage,
}

/// Runs the diagram generators against one metadata source
pub struct Orchestrator<'a, S: MetadataSource> {
    source: &'a S,
    config: &'a DiagramConfig,
}

impl<'a, S: MetadataSource> Orchestrator<'a, S> {
    pub fn new(source: &'a S, config: &'a DiagramConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &'a DiagramConfig {
        self.config
    }

    fn subject(&self, module: &str) -> Result<&'a Module, DiagramError> {
        let source = self.source;
        source.module(module).ok_or_else(|| {
            warn!(module, "Requested module is unknown");
            DiagramError::unknown_module(module)
        })
    }

    /// Build one diagram of `kind` for `module`
    pub fn generate(&self, kind: DiagramKind, module: &str) -> Result<GeneratedDiagram, DiagramError> {
        let generate_span = span!(Level::INFO, "generate", kind = %kind, module);
        let _enter = generate_span.enter();

        let subject = self.subject(module)?;
        let frame = DiagramFrame::standard(kind, subject);
        let (source, diagnostics) = match kind {
            DiagramKind::Class => {
                let generator =
                    ClassDiagramGenerator::new(self.source, subject, self.config).with_frame(frame);
                run(generator)
            }
            DiagramKind::Package => {
                let generator =
                    PackageDiagramGenerator::new(self.source, subject, self.config).with_frame(frame);
                run(generator)
            }
            DiagramKind::InversePackage => {
                let generator = InversePackageDiagramGenerator::new(self.source, subject, self.config)
                    .with_frame(frame);
                run(generator)
            }
        };

        debug!(
            source_len = source.len(),
            diagnostics = diagnostics.len(),
            "Diagram built"
        );
        Ok(GeneratedDiagram {
            kind,
            module: subject.name.clone(),
            source,
            diagnostics,
        })
    }

    /// Build the class, package and inverse package diagrams, in that order
    pub fn generate_all(&self, module: &str) -> Result<Vec<GeneratedDiagram>, DiagramError> {
        DiagramKind::all()
            .iter()
            .map(|kind| self.generate(*kind, module))
            .collect()
    }

    /// Build one diagram and render it once
    pub fn render(
        &self,
        kind: DiagramKind,
        module: &str,
        renderer: &dyn ImageRenderer,
        format: ImageFormat,
    ) -> Result<RenderedDiagram, DiagramError> {
        let diagram = self.generate(kind, module)?;

        let render_span = span!(Level::DEBUG, "pipeline_render", format = %format);
        let _render_enter = render_span.enter();
        let image = renderer.render(&diagram.source, format)?;
        info!(bytes = image.bytes.len(), "Diagram rendered");

        Ok(RenderedDiagram { diagram, image })
    }
}

fn run<G: DiagramGenerator>(mut generator: G) -> (String, Vec<Diagnostic>) {
    let source = generator.generate().to_string();
    (source, generator.diagnostics().as_slice().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Field, FieldType, Model, Snapshot};
    use std::cell::Cell;

    struct FakeRenderer {
        calls: Cell<usize>,
        fail: bool,
    }

    impl FakeRenderer {
        fn new(fail: bool) -> Self {
            Self {
                calls: Cell::new(0),
                fail,
            }
        }
    }

    impl ImageRenderer for FakeRenderer {
        fn render(&self, source: &str, format: ImageFormat) -> Result<RenderedImage, DiagramError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(DiagramError::render_error(
                    "syntax error".to_string(),
                    "line 3".to_string(),
                ));
            }
            Ok(RenderedImage::new(
                format!("{}:{}", format.extension(), source.len()).into_bytes(),
                "ok",
            ))
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot::new()
            .with_module(Module::new("base"))
            .with_module(Module::new("sale").with_dependency("base"))
            .with_model(Model::new("res.partner").with_module("base"))
            .with_model(
                Model::new("sale.order")
                    .with_module("sale")
                    .with_field(Field::new("partner_id", FieldType::Many2one).with_relation("res.partner")),
            )
    }

    #[test]
    fn test_generate_each_kind() {
        let snapshot = snapshot();
        let config = DiagramConfig::default();
        let orchestrator = Orchestrator::new(&snapshot, &config);

        let class = orchestrator.generate(DiagramKind::Class, "sale").unwrap();
        assert_eq!(class.kind, DiagramKind::Class);
        assert_eq!(class.module, "sale");
        assert!(class.source.contains("title Models Class Diagram"));
        assert!(class.source.contains("as sale_sale_order"));

        let package = orchestrator.generate(DiagramKind::Package, "sale").unwrap();
        assert!(package.source.contains("title Module Dependency Diagram"));
        assert!(package.source.contains("sale ..> base"));

        let inverse = orchestrator.generate(DiagramKind::InversePackage, "base").unwrap();
        assert!(inverse.source.contains("title Module Inverse Dependency Diagram"));
        assert!(inverse.source.contains("sale ..> base"));
    }

    #[test]
    fn test_unknown_module() {
        let snapshot = snapshot();
        let config = DiagramConfig::default();
        let orchestrator = Orchestrator::new(&snapshot, &config);
        let err = orchestrator.generate(DiagramKind::Class, "ghost").unwrap_err();
        assert!(matches!(err, DiagramError::UnknownModule { ref name } if name == "ghost"));
    }

    #[test]
    fn test_generate_all_order() {
        let snapshot = snapshot();
        let config = DiagramConfig::default();
        let orchestrator = Orchestrator::new(&snapshot, &config);
        let kinds: Vec<_> = orchestrator
            .generate_all("sale")
            .unwrap()
            .iter()
            .map(|d| d.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![DiagramKind::Class, DiagramKind::Package, DiagramKind::InversePackage]
        );
    }

    #[test]
    fn test_generation_is_repeatable() {
        let snapshot = snapshot();
        let config = DiagramConfig::default();
        let orchestrator = Orchestrator::new(&snapshot, &config);
        let first = orchestrator.generate(DiagramKind::Class, "sale").unwrap();
        let second = orchestrator.generate(DiagramKind::Class, "sale").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_calls_renderer_once() {
        let snapshot = snapshot();
        let config = DiagramConfig::default();
        let orchestrator = Orchestrator::new(&snapshot, &config);
        let renderer = FakeRenderer::new(false);

        let rendered = orchestrator
            .render(DiagramKind::Package, "sale", &renderer, ImageFormat::Svg)
            .unwrap();
        assert_eq!(renderer.calls.get(), 1);
        let expected = format!("svg:{}", rendered.diagram.source.len());
        assert_eq!(rendered.image.bytes, expected.into_bytes());
        assert_eq!(rendered.image.log, "ok");
    }

    #[test]
    fn test_render_failure_carries_log() {
        let snapshot = snapshot();
        let config = DiagramConfig::default();
        let orchestrator = Orchestrator::new(&snapshot, &config);
        let renderer = FakeRenderer::new(true);

        let err = orchestrator
            .render(DiagramKind::Class, "sale", &renderer, ImageFormat::Png)
            .unwrap_err();
        assert_eq!(renderer.calls.get(), 1);
        assert_eq!(err.log(), Some("line 3"));
    }

    #[test]
    fn test_unknown_module_skips_renderer() {
        let snapshot = snapshot();
        let config = DiagramConfig::default();
        let orchestrator = Orchestrator::new(&snapshot, &config);
        let renderer = FakeRenderer::new(false);
        assert!(orchestrator
            .render(DiagramKind::Class, "ghost", &renderer, ImageFormat::Png)
            .is_err());
        assert_eq!(renderer.calls.get(), 0);
    }
}
