mod repos;
mod setup;

use std::cell::RefCell;

use anyhow::Result;
use devenv_core::command_runner::CommandRunner;
use devenv_core::config::DevenvConfig;
use devenv_core::doctor::{DoctorReport, run_doctor_with_runner};
use devenv_core::github::RepoCandidate;

pub use setup::{SetupError, SetupOutcome, SetupRequest, setup_environment};

pub struct App<'a> {
    pub runner: &'a dyn CommandRunner,
    pub config: DevenvConfig,
    /// Process-lifetime repository candidate cache. Owned by the single
    /// event thread, hence RefCell rather than a lock.
    repo_cache: RefCell<Option<Vec<RepoCandidate>>>,
}

impl<'a> App<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: DevenvConfig) -> Self {
        Self {
            runner,
            config,
            repo_cache: RefCell::new(None),
        }
    }

    pub fn doctor(&self) -> Result<DoctorReport> {
        Ok(run_doctor_with_runner(self.runner))
    }
}
