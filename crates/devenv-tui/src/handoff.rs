use std::io::{BufRead, Write, stdin, stdout};

use anyhow::Result;
use devenv_app::{App, SetupOutcome, SetupRequest};

/// Suspend/resume protocol around a blocking foreground body.
///
/// `teardown` hands the terminal to the foreground process and `resume`
/// takes it back. The resume step runs on every exit path: normally after
/// the body returns (with errors propagated), and through a drop guard if
/// the body unwinds.
pub(crate) fn with_suspended<T, Resume>(
    teardown: impl FnOnce() -> Result<()>,
    mut resume: Resume,
    body: impl FnOnce() -> T,
) -> Result<T>
where
    Resume: FnMut() -> Result<()>,
{
    teardown()?;

    let value = {
        let mut guard = ResumeOnUnwind {
            resume: Some(&mut resume),
        };
        let value = body();
        guard.resume = None;
        value
    };

    resume()?;
    Ok(value)
}

struct ResumeOnUnwind<'a, Resume>
where
    Resume: FnMut() -> Result<()>,
{
    resume: Option<&'a mut Resume>,
}

impl<'a, Resume> Drop for ResumeOnUnwind<'a, Resume>
where
    Resume: FnMut() -> Result<()>,
{
    fn drop(&mut self) {
        if let Some(resume) = self.resume.take() {
            let _ = resume();
        }
    }
}

/// Runs the provisioning script while the TUI is suspended: banner, the
/// blocking foreground run, result summary, then an explicit pause so the
/// script's output is not clobbered by the redraw.
pub(crate) fn run_setup_in_foreground(
    app: &App<'_>,
    request: &SetupRequest,
) -> Result<SetupOutcome> {
    print_banner(request);
    let result = app.run_setup(request);
    print_outcome(&result);
    wait_for_acknowledge();
    result
}

fn print_banner(request: &SetupRequest) {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!(
        "Setting up {} with Odoo {}",
        request.project_name, request.platform_version
    );
    println!("Target: {}", request.target_dir.display());
    if let Some(repo) = request
        .clone_repo
        .as_deref()
        .filter(|value| !value.is_empty())
    {
        println!("Clone repo: {repo}");
    }
    println!("{rule}\n");
}

fn print_outcome(result: &Result<SetupOutcome>) {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    match result {
        Ok(outcome) if outcome.succeeded() => println!("Setup completed successfully!"),
        Ok(outcome) => println!("Setup failed with exit code {}", outcome.exit_code),
        Err(error) => println!("Setup could not run: {error:#}"),
    }
}

fn wait_for_acknowledge() {
    print!("Press Enter to return to devenv...");
    let _ = stdout().flush();

    let mut line = String::new();
    let _ = stdin().lock().read_line(&mut line);
}
