//! Command-line interface for the modscope utility
//!
//! Provides a CLI to turn a metadata snapshot into PlantUML diagrams and,
//! through a local PlantUML jar, into images.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use modscope::core::logging::init_logging;
use modscope::plugins::{GeneratedDiagram, Orchestrator};
use modscope::{
    DiagramConfig, DiagramKind, ImageFormat, MetadataSource, PlantUmlRenderer, Snapshot,
};

/// Modscope - PlantUML diagrams from module metadata
#[derive(Parser)]
#[command(name = "modscope")]
#[command(about = "A Rust utility to generate PlantUML module and class diagrams from metadata snapshots")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate PlantUML source for one module
    Generate {
        /// Metadata snapshot in JSON (use - for stdin)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Subject module name
        #[arg(short, long)]
        module: String,

        /// Diagram kind to generate
        #[arg(short, long, value_enum, default_value_t = KindChoice::Class)]
        kind: KindChoice,

        /// Diagram configuration in JSON; omitted keys keep their defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file for the PlantUML source (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a diagram and render it with PlantUML
    Render {
        /// Metadata snapshot in JSON (use - for stdin)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Subject module name
        #[arg(short, long)]
        module: String,

        /// Diagram kind to render
        #[arg(short, long, value_enum, default_value_t = KindChoice::Class)]
        kind: KindChoice,

        /// Diagram configuration in JSON; omitted keys keep their defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path to plantuml.jar
        #[arg(long)]
        jar: PathBuf,

        /// Java launcher
        #[arg(long, default_value = "java")]
        java: PathBuf,

        /// Image format
        #[arg(short, long, value_enum, default_value_t = FormatChoice::Png)]
        format: FormatChoice,

        /// Output file for the image (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Write the image as base64 text instead of raw bytes
        #[arg(long)]
        base64: bool,
    },

    /// List the modules of a snapshot
    Modules {
        /// Metadata snapshot in JSON (use - for stdin)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show supported diagram kinds
    Kinds {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Diagram kinds selectable on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum KindChoice {
    /// Models of the module
    #[default]
    Class,
    /// Modules the subject depends on
    Package,
    /// Modules depending on the subject
    Inverse,
}

impl From<KindChoice> for DiagramKind {
    fn from(value: KindChoice) -> Self {
        match value {
            KindChoice::Class => DiagramKind::Class,
            KindChoice::Package => DiagramKind::Package,
            KindChoice::Inverse => DiagramKind::InversePackage,
        }
    }
}

/// Image formats PlantUML can produce
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum FormatChoice {
    #[default]
    Png,
    Svg,
}

impl From<FormatChoice> for ImageFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => ImageFormat::Png,
            FormatChoice::Svg => ImageFormat::Svg,
        }
    }
}

/// Main CLI application
pub struct ModscopeApp {
    config: DiagramConfig,
}

impl ModscopeApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(DiagramConfig::default())
    }

    /// Create a new application instance with a diagram config
    pub fn with_config(config: DiagramConfig) -> Self {
        Self { config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var("MODSCOPE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("MODSCOPE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Modscope v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                snapshot,
                module,
                kind,
                config,
                output,
            } => self.generate_command(snapshot, &module, kind, config, output, cli.verbose),
            Commands::Render {
                snapshot,
                module,
                kind,
                config,
                jar,
                java,
                format,
                output,
                base64,
            } => {
                let renderer = PlantUmlRenderer::new(jar).with_java(java);
                let request = RenderRequest {
                    kind,
                    format,
                    output,
                    base64,
                };
                self.render_command(snapshot, &module, config, &renderer, request, cli.verbose)
            }
            Commands::Modules { snapshot, json } => {
                self.modules_command(snapshot, json, cli.verbose)
            }
            Commands::Kinds { json } => self.kinds_command(json, cli.verbose),
        }
    }

    /// Handle the generate command
    fn generate_command(
        &mut self,
        snapshot: PathBuf,
        module: &str,
        kind: KindChoice,
        config: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let snapshot = self.load_snapshot(snapshot, verbose)?;
        self.load_config(config)?;

        let orchestrator = Orchestrator::new(&snapshot, &self.config);
        let diagram = orchestrator.generate(kind.into(), module)?;
        if verbose {
            report_diagnostics(&diagram);
        }
        self.write_output(output, &diagram.source)
    }

    /// Handle the render command
    fn render_command(
        &mut self,
        snapshot: PathBuf,
        module: &str,
        config: Option<PathBuf>,
        renderer: &PlantUmlRenderer,
        request: RenderRequest,
        verbose: bool,
    ) -> Result<()> {
        let snapshot = self.load_snapshot(snapshot, verbose)?;
        self.load_config(config)?;

        let orchestrator = Orchestrator::new(&snapshot, &self.config);
        let rendered = orchestrator
            .render(request.kind.into(), module, renderer, request.format.into())
            .map_err(|e| {
                if let Some(log) = e.log() {
                    if !log.is_empty() {
                        eprintln!("{}", log);
                    }
                }
                anyhow!(e)
            })?;

        if verbose {
            report_diagnostics(&rendered.diagram);
            eprint!("{}", rendered.image.log);
            eprintln!("Rendered {} bytes", rendered.image.bytes.len());
        }

        if request.base64 {
            self.write_output(Some(request.output), &rendered.image.to_base64())
        } else {
            self.write_bytes(request.output, &rendered.image.bytes)
        }
    }

    /// Handle the modules command
    fn modules_command(&self, snapshot: PathBuf, json: bool, verbose: bool) -> Result<()> {
        let snapshot = self.load_snapshot(snapshot, verbose)?;
        let modules = snapshot.modules();

        if json {
            let entries: Vec<ModuleEntry> = modules
                .iter()
                .map(|m| ModuleEntry {
                    name: &m.name,
                    state: m.state.to_string(),
                    application: m.application,
                    dependencies: m.dependencies.len(),
                    dependents: snapshot.dependents(&m.name).len(),
                    models: snapshot.models_of(&m.name).len(),
                })
                .collect();
            let listing = serde_json::json!({
                "modules": entries,
                "total": modules.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Modules:");
            for module in &modules {
                println!(
                    "  {:<24} {} dependencies, {} models",
                    module.name,
                    module.dependencies.len(),
                    snapshot.models_of(&module.name).len()
                );
            }
            println!();
            println!("Total: {} modules", modules.len());
        }
        Ok(())
    }

    /// Handle the kinds command
    fn kinds_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported diagram kinds");
        }

        let kinds = DiagramKind::all();
        if json {
            let entries: Vec<_> = kinds
                .iter()
                .map(|k| {
                    serde_json::json!({
                        "name": k.to_string(),
                        "title": k.title(),
                        "description": k.description(),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "supported_kinds": entries,
                "total": kinds.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported diagram kinds:");
            for kind in &kinds {
                println!("  {:<8} - {}", kind.to_string(), kind.description());
            }
            println!();
            println!("Total: {} diagram kinds supported", kinds.len());
        }
        Ok(())
    }

    fn load_snapshot(&self, path: PathBuf, verbose: bool) -> Result<Snapshot> {
        let content = self.read_input(Some(path))?;
        if verbose {
            eprintln!("Read {} bytes of snapshot", content.len());
        }
        let snapshot = Snapshot::from_json(&content)?;
        debug!(
            modules = snapshot.modules.len(),
            models = snapshot.models.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Replace the app config with the document at `path`, if any
    pub fn load_config(&mut self, path: Option<PathBuf>) -> Result<()> {
        if let Some(path) = path {
            let content = fs::read_to_string(&path).map_err(|e| {
                anyhow!("Failed to read config file '{}': {}", path.display(), e)
            })?;
            self.config = DiagramConfig::from_json(&content)?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) => {
                if path.to_string_lossy() == "-" {
                    let mut content = String::new();
                    io::stdin().read_to_string(&mut content)?;
                    Ok(content)
                } else {
                    fs::read_to_string(&path).map_err(|e| {
                        anyhow!("Failed to read input file '{}': {}", path.display(), e)
                    })
                }
            }
            None => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }

    /// Write raw image bytes to file or stdout
    pub fn write_bytes(&self, output: PathBuf, bytes: &[u8]) -> Result<()> {
        if output.to_string_lossy() == "-" {
            let mut stdout = io::stdout();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        } else {
            fs::write(&output, bytes).map_err(|e| {
                anyhow!("Failed to write output file '{}': {}", output.display(), e)
            })?;
        }
        Ok(())
    }
}

impl Default for ModscopeApp {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of `modules --json`
#[derive(Serialize)]
struct ModuleEntry<'a> {
    name: &'a str,
    state: String,
    application: bool,
    dependencies: usize,
    dependents: usize,
    models: usize,
}

/// Where and how a rendered image is written
pub struct RenderRequest {
    pub kind: KindChoice,
    pub format: FormatChoice,
    pub output: PathBuf,
    pub base64: bool,
}

fn report_diagnostics(diagram: &GeneratedDiagram) {
    for diagnostic in &diagram.diagnostics {
        eprintln!("{}", diagnostic);
    }
    eprintln!(
        "Generated {} diagram for '{}' ({} diagnostics)",
        diagram.kind,
        diagram.module,
        diagram.diagnostics.len()
    );
}
