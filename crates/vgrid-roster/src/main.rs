mod app;
mod config;
mod msg;
mod theme;

use std::fs::File;
use std::sync::Arc;

use vgrid_runtime::{Program, ProgramConfig};

fn main() -> std::io::Result<()> {
    init_tracing();
    tracing::debug!(state_file = config::STATE_FILE, "roster starting");

    let roster = app::RosterApp::new();
    let program = Program::with_config(roster, ProgramConfig::default())?;
    program.run()
}

/// Send logs to a file when RUST_LOG asks for them; the terminal owns
/// stdout while the program runs.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let Ok(file) = File::create("vgrid-roster.log") else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}
