mod support;

use std::fs;
use std::path::PathBuf;

use devenv_app::{App, SetupError, SetupRequest};

use support::{RecordingRunner, config_with_script_dir};

fn request() -> SetupRequest {
    SetupRequest {
        project_name: "houtland-18".to_string(),
        platform_version: "18.0".to_string(),
        target_dir: PathBuf::from("/home/dev/odoo_projects"),
        db_name: Some("houtland".to_string()),
        install_precommit: true,
        clone_repo: Some("https://github.com/me/app".to_string()),
    }
}

#[test]
fn run_setup_invokes_bash_with_script_project_and_version() {
    let temp = tempfile::tempdir().expect("temp dir");
    let script_path = temp.path().join("create.sh");
    fs::write(&script_path, "#!/bin/bash\n").expect("script");

    let runner = RecordingRunner::new(Vec::new(), vec![Ok(0)]);
    let app = App::new(&runner, config_with_script_dir(temp.path()));

    let outcome = app.run_setup(&request()).expect("setup outcome");
    assert!(outcome.succeeded());

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].interactive);
    assert_eq!(calls[0].program, "bash");
    assert_eq!(
        calls[0].args,
        vec![
            script_path.to_string_lossy().to_string(),
            "houtland-18".to_string(),
            "18.0".to_string(),
        ]
    );
    assert_eq!(calls[0].cwd.as_deref(), Some(temp.path()));
}

#[test]
fn run_setup_passes_environment_overrides() {
    let temp = tempfile::tempdir().expect("temp dir");
    fs::write(temp.path().join("create.sh"), "#!/bin/bash\n").expect("script");

    let runner = RecordingRunner::new(Vec::new(), vec![Ok(0)]);
    let app = App::new(&runner, config_with_script_dir(temp.path()));

    app.run_setup(&request()).expect("setup outcome");

    let calls = runner.calls();
    let envs = &calls[0].envs;
    assert!(envs.contains(&("BASE_PATH".to_string(), "/home/dev/odoo_projects".to_string())));
    assert!(envs.contains(&("DB_NAME".to_string(), "houtland".to_string())));
    assert!(envs.contains(&("INSTALL_PRECOMMIT".to_string(), "1".to_string())));
    assert!(envs.contains(&(
        "CLONE_REPO".to_string(),
        "https://github.com/me/app".to_string()
    )));
}

#[test]
fn run_setup_returns_nonzero_exit_code_verbatim() {
    let temp = tempfile::tempdir().expect("temp dir");
    fs::write(temp.path().join("create.sh"), "#!/bin/bash\n").expect("script");

    let runner = RecordingRunner::new(Vec::new(), vec![Ok(3)]);
    let app = App::new(&runner, config_with_script_dir(temp.path()));

    let outcome = app.run_setup(&request()).expect("setup outcome");
    assert_eq!(outcome.exit_code, 3);
    assert!(!outcome.succeeded());
}

#[test]
fn missing_script_fails_preflight_without_spawning() {
    let temp = tempfile::tempdir().expect("temp dir");

    let runner = RecordingRunner::new(Vec::new(), vec![Ok(0)]);
    let app = App::new(&runner, config_with_script_dir(temp.path()));

    let error = app.run_setup(&request()).expect_err("preflight error");
    assert!(matches!(
        error.downcast_ref::<SetupError>(),
        Some(SetupError::ScriptMissing { .. })
    ));
    assert!(runner.calls().is_empty());
}

#[test]
fn launch_failure_is_distinct_from_nonzero_exit() {
    let temp = tempfile::tempdir().expect("temp dir");
    fs::write(temp.path().join("create.sh"), "#!/bin/bash\n").expect("script");

    let runner = RecordingRunner::new(
        Vec::new(),
        vec![Err(anyhow::anyhow!("No such file or directory"))],
    );
    let app = App::new(&runner, config_with_script_dir(temp.path()));

    let error = app.run_setup(&request()).expect_err("launch error");
    assert!(matches!(
        error.downcast_ref::<SetupError>(),
        Some(SetupError::Launch(_))
    ));
}
