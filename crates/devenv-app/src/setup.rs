use std::path::PathBuf;

use anyhow::{Result, anyhow};
use thiserror::Error;

use crate::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupRequest {
    pub project_name: String,
    pub platform_version: String,
    pub target_dir: PathBuf,
    pub db_name: Option<String>,
    pub install_precommit: bool,
    pub clone_repo: Option<String>,
}

/// Exit status of the provisioning script, captured verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupOutcome {
    pub exit_code: i32,
}

impl SetupOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("provisioning script not found at {path}")]
    ScriptMissing { path: PathBuf },
    #[error("failed to start provisioning script: {0}")]
    Launch(String),
}

/// Environment overrides for the provisioning script. `BASE_PATH` is always
/// set; the optional parameters are only exported when they carry a value.
pub fn setup_environment(request: &SetupRequest) -> Vec<(String, String)> {
    let mut envs = vec![(
        "BASE_PATH".to_string(),
        request.target_dir.to_string_lossy().to_string(),
    )];

    if let Some(db_name) = request.db_name.as_deref().filter(|value| !value.is_empty()) {
        envs.push(("DB_NAME".to_string(), db_name.to_string()));
    }

    if request.install_precommit {
        envs.push(("INSTALL_PRECOMMIT".to_string(), "1".to_string()));
    }

    if let Some(repo) = request
        .clone_repo
        .as_deref()
        .filter(|value| !value.is_empty())
    {
        envs.push(("CLONE_REPO".to_string(), repo.to_string()));
    }

    envs
}

impl<'a> App<'a> {
    /// Runs `bash <script> <project_name> <platform_version>` in the
    /// foreground. The caller is responsible for suspending the interactive
    /// display around this call; the script owns the terminal until it
    /// exits. A missing script fails pre-flight without spawning anything.
    pub fn run_setup(&self, request: &SetupRequest) -> Result<SetupOutcome> {
        let script_path = self.config.resolved_script_path()?;
        if !script_path.is_file() {
            return Err(SetupError::ScriptMissing { path: script_path }.into());
        }

        let script_dir = self.config.resolved_script_dir()?;
        let script_value = script_path
            .to_str()
            .ok_or_else(|| anyhow!("script path is not valid UTF-8"))?
            .to_string();

        let envs = setup_environment(request);
        let args = [
            script_value.as_str(),
            request.project_name.as_str(),
            request.platform_version.as_str(),
        ];

        let exit_code = self
            .runner
            .run_interactive("bash", &args, Some(&script_dir), &envs)
            .map_err(|error| SetupError::Launch(error.to_string()))?;

        Ok(SetupOutcome { exit_code })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{SetupRequest, setup_environment};

    fn request() -> SetupRequest {
        SetupRequest {
            project_name: "houtland-18".to_string(),
            platform_version: "18.0".to_string(),
            target_dir: PathBuf::from("/home/dev/odoo_projects"),
            db_name: None,
            install_precommit: false,
            clone_repo: None,
        }
    }

    fn env_value<'a>(envs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        envs.iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn minimal_request_exports_only_base_path() {
        let envs = setup_environment(&request());

        assert_eq!(
            env_value(&envs, "BASE_PATH"),
            Some("/home/dev/odoo_projects")
        );
        assert_eq!(env_value(&envs, "DB_NAME"), None);
        assert_eq!(env_value(&envs, "INSTALL_PRECOMMIT"), None);
        assert_eq!(env_value(&envs, "CLONE_REPO"), None);
    }

    #[test]
    fn full_request_exports_all_overrides() {
        let mut full = request();
        full.db_name = Some("houtland".to_string());
        full.install_precommit = true;
        full.clone_repo = Some("https://github.com/me/app".to_string());

        let envs = setup_environment(&full);
        assert_eq!(env_value(&envs, "DB_NAME"), Some("houtland"));
        assert_eq!(env_value(&envs, "INSTALL_PRECOMMIT"), Some("1"));
        assert_eq!(
            env_value(&envs, "CLONE_REPO"),
            Some("https://github.com/me/app")
        );
    }

    #[test]
    fn empty_optional_strings_are_not_exported() {
        let mut sparse = request();
        sparse.db_name = Some(String::new());
        sparse.clone_repo = Some(String::new());

        let envs = setup_environment(&sparse);
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].0, "BASE_PATH");
    }
}
