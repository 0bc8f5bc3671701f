//! Image rendering through an external PlantUML process
//!
//! The generators stop at PlantUML text. Turning that text into an image is
//! the job of an [`ImageRenderer`]; [`PlantUmlRenderer`] shells out to
//! `java -jar plantuml.jar` inside a throw-away temporary directory.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, info, span, warn, Level};

use super::{DiagramError, ImageFormat};

/// Image bytes plus everything the renderer printed while producing them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub log: String,
}

impl RenderedImage {
    pub fn new(bytes: Vec<u8>, log: impl Into<String>) -> Self {
        Self {
            bytes,
            log: log.into(),
        }
    }

    /// Standard base64 encoding of the image bytes
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Converts diagram text into an image
pub trait ImageRenderer {
    /// Render `source` once; failures carry the log collected so far
    fn render(&self, source: &str, format: ImageFormat) -> Result<RenderedImage, DiagramError>;
}

/// Base name of the source file written into the temporary directory
const SOURCE_STEM: &str = "diagram";

/// Renders by running the PlantUML jar as a subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantUmlRenderer {
    /// Java launcher, `java` unless overridden
    pub java: PathBuf,
    pub jar: PathBuf,
    /// Extra arguments passed to PlantUML before the source file
    pub extra_args: Vec<String>,
}

impl PlantUmlRenderer {
    pub fn new(jar: impl Into<PathBuf>) -> Self {
        Self {
            java: PathBuf::from("java"),
            jar: jar.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_java(mut self, java: impl Into<PathBuf>) -> Self {
        self.java = java.into();
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }
}

impl ImageRenderer for PlantUmlRenderer {
    fn render(&self, source: &str, format: ImageFormat) -> Result<RenderedImage, DiagramError> {
        let render_span = span!(Level::INFO, "render", format = %format, source_len = source.len());
        let _enter = render_span.enter();

        let workdir = tempfile::Builder::new().prefix("modscope-").tempdir()?;
        let source_path = workdir.path().join(format!("{}.puml", SOURCE_STEM));
        fs::write(&source_path, source)?;

        let mut command = Command::new(&self.java);
        command
            .arg("-jar")
            .arg(&self.jar)
            .arg(format.flag())
            .arg("-v")
            .args(&self.extra_args)
            .arg(&source_path)
            .arg("-o")
            .arg(workdir.path());
        info!(java = %self.java.display(), jar = %self.jar.display(), "Running PlantUML");

        let output = command.output().map_err(|e| {
            warn!(error = %e, "Failed to start renderer");
            DiagramError::render_error(
                format!("failed to start {}: {}", self.java.display(), e),
                String::new(),
            )
        })?;

        let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
        log.push_str(&String::from_utf8_lossy(&output.stderr));
        debug!(log_len = log.len(), status = %output.status, "Renderer finished");

        if !output.status.success() {
            warn!(status = %output.status, "Renderer failed");
            return Err(DiagramError::render_error(
                format!("renderer exited with {}", output.status),
                log,
            ));
        }

        let image_path = workdir
            .path()
            .join(format!("{}.{}", SOURCE_STEM, format.extension()));
        let bytes = fs::read(&image_path).map_err(|e| {
            DiagramError::render_error(
                format!("missing output {}: {}", image_path.display(), e),
                log.clone(),
            )
        })?;

        info!(bytes = bytes.len(), "Image rendered");
        Ok(RenderedImage::new(bytes, log))
    }
}
