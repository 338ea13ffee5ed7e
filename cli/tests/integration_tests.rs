use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn pathscan(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pathscan"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run pathscan")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Small tree: `src/{lib.rs,main.rs}`, `docs/guide.md`, `target/out.bin`,
/// `.git/HEAD` and `README.md`.
fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let root = dir.path();
    for sub in ["src", "docs", "target", ".git"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    for file in [
        "src/lib.rs",
        "src/main.rs",
        "docs/guide.md",
        "target/out.bin",
        ".git/HEAD",
        "README.md",
    ] {
        fs::write(root.join(file), "").unwrap();
    }
    dir
}

fn root_arg(dir: &Path) -> &str {
    dir.to_str().expect("temp dir path should be UTF-8")
}

#[test]
fn list_prints_all_visible_entries() {
    let dir = fixture();
    let out = pathscan(&["list", root_arg(dir.path())]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "README.md\ndocs\nsrc\ntarget\ndocs/guide.md\nsrc/lib.rs\nsrc/main.rs\ntarget/out.bin\n"
    );
}

#[test]
fn list_applies_include_exclude_and_name_filters() {
    let dir = fixture();
    let out = pathscan(&[
        "list",
        "--include=src",
        "--include",
        "docs",
        "--exclude",
        "docs",
        "--name",
        r".*\.rs",
        root_arg(dir.path()),
    ]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "src/lib.rs\nsrc/main.rs\n");
}

#[test]
fn list_hidden_flag_shows_hidden_entries() {
    let dir = fixture();
    let out = pathscan(&["list", "--hidden", "--include", ".git", root_arg(dir.path())]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), ".git\n.git/HEAD\n");
}

#[test]
fn list_takes_defaults_from_json_config() {
    let dir = fixture();
    let json = serde_json::json!({ "exclude": ["target", "docs"] }).to_string();
    let out = pathscan(&["--json", json.as_str(), "list", root_arg(dir.path())]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "README.md\nsrc\nsrc/lib.rs\nsrc/main.rs\n");
}

#[test]
fn list_takes_defaults_from_yaml_config_file() {
    let dir = fixture();
    let config_dir = tempfile::tempdir().unwrap();
    let config = config_dir.path().join("pathscan.yaml");
    fs::write(&config, "include:\n  - docs\nhidden: false\n").unwrap();

    let out = pathscan(&[
        "--config",
        config.to_str().unwrap(),
        "list",
        root_arg(dir.path()),
    ]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "docs\ndocs/guide.md\n");
}

#[test]
fn list_flags_override_config_defaults() {
    let dir = fixture();
    let out = pathscan(&[
        "--json",
        r#"{"include":["docs"]}"#,
        "list",
        "--include",
        "target",
        root_arg(dir.path()),
    ]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "target\ntarget/out.bin\n");
}

#[test]
fn list_rejects_missing_directory() {
    let dir = fixture();
    let missing = dir.path().join("nope");
    let out = pathscan(&["list", missing.to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(!stderr(&out).is_empty());
}

#[test]
fn match_reports_each_path() {
    let out = pathscan(&[
        "match",
        "--glob",
        "foo/*/bar",
        "foo/x/bar/baz.txt",
        "foo/x/y/bar",
        "/foo/x/bar",
    ]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "foo/x/bar/baz.txt: true\nfoo/x/y/bar: false\n/foo/x/bar: false\n"
    );
}

#[test]
fn match_requires_paths() {
    let out = pathscan(&["match", "--glob", "*"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("paths"), "stderr: {}", stderr(&out));
}

#[test]
fn invalid_pattern_is_reported() {
    let out = pathscan(&["match", "--name", "(", "a"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("invalid name pattern"), "stderr: {}", stderr(&out));
}

#[test]
fn unknown_flag_is_reported() {
    let out = pathscan(&["match", "--nope", "a"]);

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out), "Unknown flag --nope\n");
}

#[test]
fn help_and_version_exit_zero() {
    let help = pathscan(&["--help"]);
    assert!(help.status.success());
    assert!(stdout(&help).contains("COMMANDS:"));
    assert!(stdout(&help).contains("list, ls"));

    let version = pathscan(&["--version"]);
    assert!(version.status.success());
    assert_eq!(
        stdout(&version),
        format!("pathscan version {}\n", env!("CARGO_PKG_VERSION"))
    );
}
