//! Integration tests for i18n-map

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const INSTALLED_JSON: &str = r#"{
    "packages": [
        {
            "name": "automattic/jetpack-assets",
            "version": "v2.0.0",
            "version_normalized": "2.0.0.0",
            "type": "jetpack-library",
            "extra": {"textdomain": "jetpack-assets"}
        },
        {
            "name": "automattic/jetpack-constants",
            "version": "dev-trunk",
            "version_normalized": "dev-trunk",
            "type": "jetpack-library",
            "extra": {"textdomain": "jetpack-constants"}
        },
        {
            "name": "automattic/jetpack-autoloader",
            "version": "v3.0.0",
            "version_normalized": "3.0.0.0",
            "type": "composer-plugin",
            "extra": {"textdomain": "ignored"}
        },
        {
            "name": "automattic/jetpack-status",
            "version": "v1.0.0",
            "version_normalized": "1.0.0.0",
            "type": "jetpack-library",
            "extra": {}
        }
    ],
    "dev": true,
    "dev-package-names": []
}"#;

struct Project {
    dir: TempDir,
}

impl Project {
    fn new(extra: &str) -> io::Result<Self> {
        let dir = TempDir::new()?;
        fs::write(
            dir.path().join("composer.json"),
            format!(r#"{{"name": "acme/site", "extra": {extra}}}"#),
        )?;
        let composer_dir = dir.path().join("vendor").join("composer");
        fs::create_dir_all(&composer_dir)?;
        fs::write(composer_dir.join("installed.json"), INSTALLED_JSON)?;
        Ok(Project { dir })
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn map_path(&self) -> PathBuf {
        self.path().join("jetpack_vendor").join("i18n-map.php")
    }

    fn read_map(&self) -> String {
        fs::read_to_string(self.map_path()).unwrap_or_default()
    }

    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("i18n-map");
        cmd.env("I18N_MAP_CONFIG", self.path().join("i18n-map.toml"));
        cmd.env_remove("I18N_MAP_LOG_FILE");
        cmd.arg("--project-dir").arg(self.path());
        cmd
    }
}

#[test]
fn test_version() {
    cargo_bin_cmd!("i18n-map")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("i18n-map"));
}

#[test]
fn test_help() {
    cargo_bin_cmd!("i18n-map")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("i18n-map scans the installed Composer packages"));
}

#[test]
fn test_invalid_command() {
    cargo_bin_cmd!("i18n-map").arg("invalid").assert().failure();
}

#[test]
fn test_generate_plugin_map() {
    let Ok(project) = Project::new(r#"{"wp-plugin-slug": "jetpack"}"#) else {
        return;
    };
    project.command().arg("generate").assert().success();

    let expected = "<?php
// i18n-map.php @generated by i18n-map
return array(
  'domain' => 'jetpack',
  'type' => 'plugins',
  'packages' => array(
    'jetpack-assets' => '2.0.0.0',
    'jetpack-constants' => 'dev-trunk',
  ),
);
";
    assert_eq!(project.read_map(), expected);
}

#[test]
fn test_verbose_reports_each_package() {
    let Ok(project) = Project::new(r#"{"wp-theme-slug": "my-theme"}"#) else {
        return;
    };
    project
        .command()
        .args(["-v", "generate"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "automattic/jetpack-assets (2.0.0.0): textdomain is jetpack-assets",
        ))
        .stderr(predicate::str::contains(
            "automattic/jetpack-status (1.0.0.0): no textdomain set",
        ))
        .stderr(predicate::str::contains("jetpack-autoloader").not());
    assert!(project.read_map().contains("'type' => 'themes',"));
}

#[test]
fn test_root_branch_alias_applies() {
    let Ok(project) = Project::new(
        r#"{"wp-plugin-slug": "jetpack", "branch-alias": {"dev-trunk": "13.1.x-dev"}}"#,
    ) else {
        return;
    };
    project.command().arg("generate").assert().success();
    assert!(project
        .read_map()
        .contains("'jetpack-constants' => '13.1.x-dev',"));
}

#[test]
fn test_hook_events_generate() {
    let Ok(project) = Project::new(r#"{"wp-plugin-slug": "jetpack"}"#) else {
        return;
    };
    project
        .command()
        .args(["hook", "post-install-cmd"])
        .assert()
        .success();
    let after_install = project.read_map();
    assert!(after_install.contains("'domain' => 'jetpack',"));

    project
        .command()
        .args(["hook", "post-update-cmd"])
        .assert()
        .success();
    assert_eq!(project.read_map(), after_install);
}

#[test]
fn test_hook_unknown_event_fails() {
    let Ok(project) = Project::new(r#"{"wp-plugin-slug": "jetpack"}"#) else {
        return;
    };
    project
        .command()
        .args(["hook", "pre-autoload-dump"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown lifecycle event"));
    assert!(!project.map_path().exists());
}

#[test]
fn test_second_run_leaves_file_untouched() {
    let Ok(project) = Project::new(r#"{"wp-plugin-slug": "jetpack"}"#) else {
        return;
    };
    project.command().arg("generate").assert().success();

    let past = SystemTime::now() - Duration::from_secs(3600);
    let Ok(file) = fs::File::options().write(true).open(project.map_path()) else {
        return;
    };
    assert!(file.set_modified(past).is_ok());
    drop(file);
    let before = fs::metadata(project.map_path())
        .and_then(|m| m.modified())
        .ok();

    project.command().arg("generate").assert().success();
    let after = fs::metadata(project.map_path())
        .and_then(|m| m.modified())
        .ok();
    assert_eq!(before, after);
}

#[test]
fn test_missing_slug_removes_map_and_warns() {
    let Ok(project) = Project::new(r#"{}"#) else {
        return;
    };
    let Some(parent) = project.map_path().parent().map(Path::to_path_buf) else {
        return;
    };
    assert!(fs::create_dir_all(parent).is_ok());
    assert!(fs::write(project.map_path(), "<?php return array();").is_ok());

    project
        .command()
        .arg("generate")
        .assert()
        .success()
        .stderr(predicate::str::contains("wp-plugin-slug"));
    assert!(!project.map_path().exists());

    // Still fine when there is nothing to remove
    project.command().arg("generate").assert().success();
}

#[test]
fn test_quiet_silences_warnings_but_not_errors() {
    let Ok(project) = Project::new(r#"{}"#) else {
        return;
    };
    project
        .command()
        .args(["-q", "generate"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    assert!(fs::remove_file(project.path().join("composer.json")).is_ok());
    project
        .command()
        .args(["-q", "generate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No composer.json"));
}

#[test]
fn test_config_show_lists_set_values_and_defaults() {
    let Ok(project) = Project::new(r#"{}"#) else {
        return;
    };
    project
        .command()
        .args(["config", "set", "vendor-dir", "lib"])
        .assert()
        .success();
    project
        .command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(": lib"))
        .stdout(predicate::str::contains("jetpack-library (default)"));
}

#[test]
fn test_missing_composer_json_fails() {
    let Ok(dir) = TempDir::new() else {
        return;
    };
    cargo_bin_cmd!("i18n-map")
        .env("I18N_MAP_CONFIG", dir.path().join("i18n-map.toml"))
        .arg("-d")
        .arg(dir.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No composer.json"));
}

#[test]
fn test_check_detects_stale_map() {
    let Ok(project) = Project::new(r#"{"wp-plugin-slug": "jetpack"}"#) else {
        return;
    };
    project
        .command()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is missing"));

    project.command().arg("generate").assert().success();
    project.command().arg("check").assert().success();

    assert!(fs::write(project.map_path(), "<?php return array();").is_ok());
    project
        .command()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of date"));
}

#[test]
fn test_show_json() {
    let Ok(project) = Project::new(r#"{"wp-plugin-slug": "jetpack"}"#) else {
        return;
    };
    project.command().arg("generate").assert().success();
    project
        .command()
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "plugins""#))
        .stdout(predicate::str::contains(r#""jetpack-assets": "2.0.0.0""#));
}

#[test]
fn test_clean() {
    let Ok(project) = Project::new(r#"{"wp-plugin-slug": "jetpack"}"#) else {
        return;
    };
    project.command().arg("generate").assert().success();
    assert!(project.map_path().exists());
    project.command().arg("clean").assert().success();
    assert!(!project.map_path().exists());
    project.command().arg("clean").assert().success();
}

#[test]
fn test_settings_change_package_type_and_output() {
    let Ok(project) = Project::new(r#"{"wp-plugin-slug": "jetpack"}"#) else {
        return;
    };
    project
        .command()
        .args(["config", "set", "package-type", "composer-plugin"])
        .assert()
        .success();
    project
        .command()
        .args(["config", "set", "output-path", "build/i18n.php"])
        .assert()
        .success();
    project
        .command()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"))
        .stdout(predicate::str::contains("composer-plugin"));

    project.command().arg("generate").assert().success();
    let map = fs::read_to_string(project.path().join("build").join("i18n.php")).unwrap_or_default();
    assert!(map.contains("'ignored' => '3.0.0.0',"));
    assert!(!map.contains("jetpack-assets"));
}

#[test]
fn test_config_unknown_key_fails() {
    let Ok(project) = Project::new(r#"{}"#) else {
        return;
    };
    project
        .command()
        .args(["config", "set", "textdomain", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_path() {
    let Ok(project) = Project::new(r#"{}"#) else {
        return;
    };
    project
        .command()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("i18n-map.toml"));
}
