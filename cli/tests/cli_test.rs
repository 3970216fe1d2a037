use std::path::Path;
use std::process::{Command, Output};

fn pipegeo(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pipegeo"))
        .arg("--store")
        .arg(store)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run pipegeo")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn generate_list_and_measure() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.db");

    let out = pipegeo(&store, &["generate", "60", "--seed", "4"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Total pipes in store: 60"));

    let out = pipegeo(&store, &["list", "--limit", "5", "--json"]);
    assert!(out.status.success());
    let pipes: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let pipes = pipes.as_array().unwrap();
    assert_eq!(pipes.len(), 5);
    assert_eq!(pipes[0]["id"], 1);
    assert!(pipes[0].get("startPoint").is_some());

    let out = pipegeo(&store, &["measure", "1", "2", "3"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Selected: 3 pipes"));
    assert!(text.contains("Connected route:"));
}

#[test]
fn add_then_filter_by_tag() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.db");

    let out = pipegeo(
        &store,
        &[
            "add", "--name", "Harbor Main", "--start", "32.10,34.77", "--end", "32.11,34.78",
            "--tag", "water", "--tag", "main",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).starts_with("Created pipe 1 'Harbor Main'"));

    let out = pipegeo(&store, &["tags"]);
    assert_eq!(stdout(&out), "main\nwater\n");

    let out = pipegeo(&store, &["list", "--tag", "gas"]);
    assert_eq!(stdout(&out).trim(), "No pipes.");
}

#[test]
fn add_rejects_blank_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.db");
    let out = pipegeo(
        &store,
        &["add", "--name", " ", "--start", "0,0", "--end", "0,1"],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Missing required fields"));
}

#[test]
fn bad_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("pipegeo.toml");
    std::fs::write(&config, "[generator]\njump_probability = 7.0\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_pipegeo"))
        .arg("--config")
        .arg(&config)
        .arg("tags")
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("jump_probability"));
}
