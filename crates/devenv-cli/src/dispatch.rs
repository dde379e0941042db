use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table};
use devenv_app::App;
use devenv_core::command_runner::CommandRunner;
use devenv_core::config::{DevenvConfig, load_config_or_default};
use devenv_core::doctor::{CheckState, DoctorReport};

use crate::cli::{Cli, Command};
use crate::diagnostics::DiagnosticsSession;

pub fn run_with_deps(
    cli: Cli,
    runner: &dyn CommandRunner,
    session: &DiagnosticsSession,
) -> Result<()> {
    match cli.command {
        Some(Command::Doctor) => {
            session.record("running doctor checks");
            let app = App::new(runner, DevenvConfig::default());
            run_doctor_command(&app)
        }
        None => {
            let config = load_config_or_default()?;
            session.record("starting interactive form");
            let app = App::new(runner, config);
            run_root_command(&app)
        }
    }
}

fn run_root_command(app: &App<'_>) -> Result<()> {
    let _ = devenv_tui::run_root(app)?;
    Ok(())
}

fn run_doctor_command(app: &App<'_>) -> Result<()> {
    let report = app.doctor()?;
    print_doctor_report(&report);
    Ok(())
}

fn print_doctor_report(report: &DoctorReport) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Check", "Status", "Details"]);

    for check in &report.checks {
        let status = match check.state {
            CheckState::Pass => "PASS",
            CheckState::Fail => "FAIL",
        };

        table.add_row(vec![
            Cell::new(check.name.as_str()),
            Cell::new(status),
            Cell::new(check.details.as_str()),
        ]);
    }

    println!("{table}");
    println!("{}", report.summary());
}
