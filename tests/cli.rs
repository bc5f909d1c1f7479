use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tf() -> Command {
    let mut cmd = Command::cargo_bin("tf").unwrap();
    cmd.env_remove("TF_COMPONENTS_TERRAFORM")
        .env_remove("TF_COMPONENTS_MAX_FILES")
        .env_remove("RUST_LOG");
    cmd
}

fn component(root: &Path, name: &str, state: Option<&str>) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("main.tf"), "").unwrap();
    if let Some(body) = state {
        fs::write(dir.join("terraform.tfstate"), body).unwrap();
    }
}

/// Writes a stand-in terraform that records its working directory and
/// arguments, then exits with `$FAKE_TF_EXIT`.
#[cfg(unix)]
fn fake_terraform(dir: &Path) -> (PathBuf, PathBuf) {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-terraform");
    let log = dir.join("invocation.log");
    fs::write(
        &script,
        "#!/bin/sh\npwd -P > \"$FAKE_TF_LOG\"\necho \"$@\" >> \"$FAKE_TF_LOG\"\nexit ${FAKE_TF_EXIT:-0}\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    (script, log)
}

#[test]
fn test_no_args_prints_usage_and_exits_one() {
    tf().assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_command_exits_one() {
    tf().arg("import").assert().code(1);
}

#[test]
fn test_missing_component_argument_exits_one() {
    tf().arg("plan").assert().code(1);
}

#[test]
fn test_help_exits_zero() {
    tf().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("destroy"));
}

#[test]
fn test_status_lists_components() {
    let root = TempDir::new().unwrap();
    component(root.path(), "a", None);
    component(root.path(), "b/c", Some(r#"{"resources": [{"type": "x"}]}"#));

    let output = tf()
        .current_dir(root.path())
        .arg("status")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text, "a\tdestroyed\nb/c\tapplied\n");
    for line in text.lines() {
        let fields: Vec<&str> = line.split('\t').filter(|f| !f.is_empty()).collect();
        assert_eq!(fields.len(), 2, "{line:?}");
    }
}

#[test]
fn test_status_table_format() {
    let root = TempDir::new().unwrap();
    component(root.path(), "net", Some(r#"{"resources": [{"type": "x"}]}"#));

    tf().current_dir(root.path())
        .args(["status", "--format", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COMPONENT"))
        .stdout(predicate::str::contains("applied"));
}

#[test]
fn test_status_json_format() {
    let root = TempDir::new().unwrap();
    component(root.path(), "net", Some(r#"{"resources": [{"type": "x"}]}"#));

    let output = tf()
        .arg("status")
        .arg("--dir")
        .arg(root.path())
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"component": "net", "status": "applied", "resources": 1}])
    );
}

#[test]
fn test_status_too_many_files_exits_one() {
    let root = TempDir::new().unwrap();
    for i in 0..20 {
        fs::write(root.path().join(format!("f{i}")), "").unwrap();
    }

    tf().current_dir(root.path())
        .args(["status", "--max-files", "10"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Error: We found more than 10 files"));
}

#[test]
fn test_status_corrupt_state_exits_two() {
    let root = TempDir::new().unwrap();
    component(root.path(), "a", Some("{ not json"));

    tf().current_dir(root.path())
        .arg("status")
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Internal error:"))
        .stdout(predicate::str::contains("'a'"));
}

#[test]
fn test_plan_missing_component_never_runs_terraform() {
    let root = TempDir::new().unwrap();

    tf().current_dir(root.path())
        .args(["plan", "nope", "--terraform", "tf-components-no-such-terraform"])
        .assert()
        .code(1)
        .stdout("Error: Component 'nope' not found\n");
}

#[test]
fn test_apply_on_file_is_not_a_folder() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("main.tf"), "").unwrap();

    tf().current_dir(root.path())
        .args(["apply", "main.tf", "-yes"])
        .assert()
        .code(1)
        .stdout("Error: Component 'main.tf' is not a folder\n");
}

#[test]
fn test_missing_terraform_executable_exits_one() {
    let root = TempDir::new().unwrap();
    component(root.path(), "a", None);

    tf().current_dir(root.path())
        .env("TF_COMPONENTS_TERRAFORM", "tf-components-no-such-terraform")
        .args(["plan", "a"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("executable not found"));
}

#[cfg(unix)]
mod passthrough {
    use super::*;

    fn invocation(log: &Path) -> (String, String) {
        let text = fs::read_to_string(log).unwrap();
        let mut lines = text.lines();
        let dir = lines.next().unwrap_or_default().to_string();
        let args = lines.next().unwrap_or_default().to_string();
        (dir, args)
    }

    #[test]
    fn test_apply_yes_adds_auto_approve() {
        let root = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        component(root.path(), "a", None);
        let (script, log) = fake_terraform(bin.path());

        tf().current_dir(root.path())
            .env("TF_COMPONENTS_TERRAFORM", &script)
            .env("FAKE_TF_LOG", &log)
            .args(["apply", "a", "-yes"])
            .assert()
            .success();

        let (dir, args) = invocation(&log);
        assert!(dir.ends_with("/a"), "ran in {dir}");
        assert_eq!(args, "apply -auto-approve");
    }

    #[test]
    fn test_apply_without_yes_has_no_extra_flag() {
        let root = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        component(root.path(), "a", None);
        let (script, log) = fake_terraform(bin.path());

        tf().current_dir(root.path())
            .env("TF_COMPONENTS_TERRAFORM", &script)
            .env("FAKE_TF_LOG", &log)
            .args(["apply", "a"])
            .assert()
            .success();

        let (_, args) = invocation(&log);
        assert_eq!(args, "apply");
    }

    #[test]
    fn test_destroy_forwards_extra_args() {
        let root = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        component(root.path(), "b/c", None);
        let (script, log) = fake_terraform(bin.path());

        tf().current_dir(root.path())
            .env("TF_COMPONENTS_TERRAFORM", &script)
            .env("FAKE_TF_LOG", &log)
            .args(["destroy", "b/c", "-yes", "--", "-target=null_resource.x"])
            .assert()
            .success();

        let (dir, args) = invocation(&log);
        assert!(dir.ends_with("/b/c"), "ran in {dir}");
        assert_eq!(args, "destroy -auto-approve -target=null_resource.x");
    }

    #[test]
    fn test_output_and_plan_subcommands() {
        let root = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        component(root.path(), "a", None);
        let (script, log) = fake_terraform(bin.path());

        for subcommand in ["output", "plan"] {
            tf().current_dir(root.path())
                .env("TF_COMPONENTS_TERRAFORM", &script)
                .env("FAKE_TF_LOG", &log)
                .args([subcommand, "a"])
                .assert()
                .success();

            let (_, args) = invocation(&log);
            assert_eq!(args, subcommand);
        }
    }

    #[test]
    fn test_terraform_exit_code_propagates() {
        let root = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        component(root.path(), "a", None);
        let (script, log) = fake_terraform(bin.path());

        tf().current_dir(root.path())
            .env("TF_COMPONENTS_TERRAFORM", &script)
            .env("FAKE_TF_LOG", &log)
            .env("FAKE_TF_EXIT", "3")
            .args(["plan", "a"])
            .assert()
            .code(3);
    }
}
