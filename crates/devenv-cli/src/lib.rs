pub mod cli;
pub mod diagnostics;
pub mod dispatch;

use anyhow::Result;
use clap::Parser;
use devenv_core::command_runner::SystemCommandRunner;

use crate::cli::Cli;
use crate::diagnostics::DiagnosticsSession;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let session = DiagnosticsSession::initialize(cli.diagnostics)?;
    if let Some(path) = session.path() {
        eprintln!("Diagnostics enabled: {}", path.display());
    }

    let command_runner = SystemCommandRunner::new();
    dispatch::run_with_deps(cli, &command_runner, &session)
}
