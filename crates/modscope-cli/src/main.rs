//! Modscope CLI - PlantUML diagrams from module metadata

mod cli;

use clap::Parser;

fn main() {
    // Logging is initialised inside run() once the CLI flags are known
    let cli_args = cli::Cli::parse();

    let mut app = cli::ModscopeApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
