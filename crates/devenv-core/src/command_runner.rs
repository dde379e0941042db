use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> anyhow::Result<CommandOutput>;

    /// Runs a command in the foreground with inherited stdio, blocking
    /// until it exits. Environment overrides win over inherited values
    /// on key collision. Returns the raw exit status.
    fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        envs: &[(String, String)],
    ) -> anyhow::Result<i32>;
}

#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> anyhow::Result<CommandOutput> {
        let mut command = Command::new(program);
        command.args(args);

        if let Some(working_directory) = cwd {
            command.current_dir(working_directory);
        }

        let output = command.output()?;

        Ok(CommandOutput {
            status_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
        envs: &[(String, String)],
    ) -> anyhow::Result<i32> {
        let mut command = Command::new(program);
        command.args(args);

        if let Some(working_directory) = cwd {
            command.current_dir(working_directory);
        }

        for (key, value) in envs {
            command.env(key, value);
        }

        let status = command.status()?;
        Ok(status.code().unwrap_or(-1))
    }
}
