use std::env;
use std::fmt;
use std::path::Path;

use crate::command_runner::{CommandRunner, SystemCommandRunner};
use crate::config::{DevenvConfig, load_config, resolve_config_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Pass,
    Fail,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub name: String,
    pub state: CheckState,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    pub fn has_failures(&self) -> bool {
        self.checks
            .iter()
            .any(|check| check.state == CheckState::Fail)
    }

    pub fn summary(&self) -> String {
        let passed = self
            .checks
            .iter()
            .filter(|check| check.state == CheckState::Pass)
            .count();
        let failed = self.checks.len().saturating_sub(passed);
        format!("{passed} passed, {failed} failed")
    }
}

pub fn run_doctor() -> DoctorReport {
    let runner = SystemCommandRunner::new();
    run_doctor_with_runner(&runner)
}

pub fn run_doctor_with_runner(runner: &dyn CommandRunner) -> DoctorReport {
    let mut checks = Vec::new();

    checks.push(match env::consts::OS {
        "macos" => pass_check("os is supported", "detected macOS"),
        "linux" => pass_check("os is supported", "detected Linux"),
        detected => fail_check(
            "os is supported",
            format!("detected {detected}, expected macOS or Linux"),
        ),
    });

    checks.push(if is_executable_in_path("bash") {
        pass_check("bash is installed", "bash executable found in PATH")
    } else {
        fail_check("bash is installed", "bash executable not found in PATH")
    });

    checks.push(check_gh_callable(runner));
    checks.push(check_gh_authenticated(runner));

    match resolve_config_path() {
        Ok(config_path) => {
            if config_path.exists() {
                checks.push(pass_check(
                    "config file exists",
                    format!("found at {}", config_path.display()),
                ));
                match load_config(&config_path) {
                    Ok(config) => {
                        checks.push(pass_check("config parses and validates", "config is valid"));
                        checks.push(check_script_present(&config));
                    }
                    Err(error) => {
                        checks.push(fail_check("config parses and validates", error.to_string()));
                        checks.push(skipped_check(
                            "provisioning script exists",
                            "config is invalid",
                        ));
                    }
                }
            } else {
                checks.push(pass_check(
                    "config file exists",
                    format!(
                        "not present at {}, using built-in defaults",
                        config_path.display()
                    ),
                ));
                checks.push(pass_check(
                    "config parses and validates",
                    "built-in defaults are valid",
                ));
                checks.push(check_script_present(&DevenvConfig::default()));
            }
        }
        Err(error) => {
            checks.push(fail_check("config path resolves", error.to_string()));
            push_skipped_checks(
                &mut checks,
                &[
                    "config file exists",
                    "config parses and validates",
                    "provisioning script exists",
                ],
                "config path could not be resolved",
            );
        }
    }

    DoctorReport { checks }
}

fn check_gh_callable(runner: &dyn CommandRunner) -> DoctorCheck {
    match runner.run("gh", &["--version"], None) {
        Ok(output) if output.status_code == 0 => {
            let version = output.stdout.lines().next().unwrap_or("").trim().to_string();
            pass_check("gh is installed", version)
        }
        Ok(output) => fail_check(
            "gh is installed",
            format!(
                "gh returned exit code {} with output: {}",
                output.status_code,
                output.stderr.trim()
            ),
        ),
        Err(error) => fail_check(
            "gh is installed",
            format!("failed to execute gh (install it from https://cli.github.com): {error}"),
        ),
    }
}

fn check_gh_authenticated(runner: &dyn CommandRunner) -> DoctorCheck {
    match runner.run("gh", &["auth", "status"], None) {
        Ok(output) if output.status_code == 0 => {
            pass_check("gh is authenticated", "gh auth status succeeded")
        }
        Ok(output) => fail_check(
            "gh is authenticated",
            format!("gh auth status failed: {}", output.stderr.trim()),
        ),
        Err(error) => fail_check(
            "gh is authenticated",
            format!("failed to execute gh auth status: {error}"),
        ),
    }
}

fn check_script_present(config: &DevenvConfig) -> DoctorCheck {
    match config.resolved_script_path() {
        Ok(script_path) => {
            if script_path.is_file() {
                pass_check(
                    "provisioning script exists",
                    format!("found at {}", script_path.display()),
                )
            } else {
                fail_check(
                    "provisioning script exists",
                    format!("expected at {}", script_path.display()),
                )
            }
        }
        Err(error) => fail_check("provisioning script exists", error.to_string()),
    }
}

fn pass_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Pass,
        details: details.into(),
    }
}

fn fail_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Fail,
        details: details.into(),
    }
}

fn skipped_check(name: &str, reason: &str) -> DoctorCheck {
    fail_check(name, format!("skipped because {reason}"))
}

fn push_skipped_checks(checks: &mut Vec<DoctorCheck>, names: &[&str], reason: &str) {
    checks.extend(
        names
            .iter()
            .copied()
            .map(|name| skipped_check(name, reason)),
    );
}

pub fn is_executable_in_path(program: &str) -> bool {
    let program_path = Path::new(program);

    if program_path.is_absolute() || program.contains('/') {
        return is_executable_file(program_path);
    }

    let path_value = match env::var_os("PATH") {
        Some(value) => value,
        None => return false,
    };

    env::split_paths(&path_value)
        .map(|directory| directory.join(program))
        .any(|candidate| is_executable_file(&candidate))
}

fn is_executable_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match path.metadata() {
            Ok(metadata) => metadata.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    {
        true
    }
}
