//! Black-box tests of the `toolbelt` binary.
//!
//! Every run gets its own config, log and state file through environment
//! variables on the child process, so nothing touches the user's files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join("toolbelt_cli_tests").join(name);
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        let config = format!(
            "log_file_path = {:?}\n\n[converter]\nscreens = [\"1440x900\", \"390x844\"]\n",
            root.join("toolbelt.log")
        );
        fs::write(root.join("config.toml"), config).unwrap();
        Self { root }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_toolbelt"))
            .args(args)
            .current_dir(&self.root)
            .env("TOOLBELT_CONFIG", self.path("config.toml"))
            .env("TOOLBELT_STATE_FILE", self.path("state.json"))
            .env_remove("TOOLBELT_SCREEN")
            .env_remove("TOOLBELT_PRECISION")
            .env_remove("TOOLBELT_BASE_FONT_SIZE")
            .env_remove("TOOLBELT_ENV_FILE")
            .output()
            .expect("Failed to execute binary")
    }
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn workspace_arg(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn env_switch_rewrites_the_file() {
    let sandbox = Sandbox::new("env_switch");
    fs::write(
        sandbox.path(".env.local"),
        "# Local\nAPI_URL=http://local\n# Staging\n# API_URL=http://staging\n",
    )
    .unwrap();
    let workspace = workspace_arg(&sandbox.root);

    let status = stdout(&sandbox.run(&["env", "status", "--workspace", &workspace]));
    assert!(status.starts_with("Local\n"), "got: {status}");

    let switched = stdout(&sandbox.run(&["env", "switch", "Staging", "--workspace", &workspace]));
    assert_eq!(switched.trim(), "Environment switched to Staging");
    assert_eq!(
        fs::read_to_string(sandbox.path(".env.local")).unwrap(),
        "# Local\n# API_URL=http://local\n# Staging\nAPI_URL=http://staging\n"
    );

    let again = stdout(&sandbox.run(&["env", "switch", "Staging", "--workspace", &workspace]));
    assert_eq!(again.trim(), "Environment 'Staging' is already active.");
}

#[test]
fn env_switch_to_missing_block_fails() {
    let sandbox = Sandbox::new("env_missing");
    fs::write(sandbox.path(".env.local"), "# Local\nA=1\n").unwrap();
    let output = sandbox.run(&[
        "env",
        "switch",
        "Prod",
        "--workspace",
        &workspace_arg(&sandbox.root),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("BlockDisappeared"));
}

#[test]
fn env_list_json() {
    let sandbox = Sandbox::new("env_list_json");
    fs::write(sandbox.path("custom.env"), "# Dev\nA=1\n# Prod\n# A=2\n").unwrap();
    let out = stdout(&sandbox.run(&[
        "env",
        "list",
        "--json",
        "--file",
        "custom.env",
        "--workspace",
        &workspace_arg(&sandbox.root),
    ]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["blocks"], serde_json::json!(["Dev", "Prod"]));
    assert_eq!(value["active"], "Dev");
}

#[test]
fn convert_at_cursor_prints_the_new_line() {
    let sandbox = Sandbox::new("convert_cursor");
    let out = stdout(&sandbox.run(&[
        "convert",
        "to-viewport",
        "--line",
        "height: 90px;",
        "--column",
        "9",
    ]));
    assert_eq!(out.trim_end(), "height: 10vh;");
}

#[test]
fn screen_next_is_remembered_between_runs() {
    let sandbox = Sandbox::new("screen_next");
    assert_eq!(
        stdout(&sandbox.run(&["screen", "next"])).trim(),
        "1440×900 | 16px | p4"
    );
    assert_eq!(
        stdout(&sandbox.run(&["screen", "next"])).trim(),
        "390×844 | 16px | p4"
    );

    let out = stdout(&sandbox.run(&[
        "convert",
        "to-viewport",
        "--selection",
        "39px",
        "--axis",
        "vw",
    ]));
    assert_eq!(out.trim_end(), "10vw");
}

#[test]
fn scripts_lists_run_commands() {
    let sandbox = Sandbox::new("scripts");
    fs::write(
        sandbox.path("package.json"),
        r#"{"scripts":{"lint":"eslint .","dev":"vite"},"packageManager":"pnpm@9.0.0"}"#,
    )
    .unwrap();
    let out = stdout(&sandbox.run(&["scripts", "--workspace", &workspace_arg(&sandbox.root)]));
    assert_eq!(out, "dev\tpnpm run dev\nlint\tpnpm run lint\n");
}

#[test]
fn scripts_pick_mode_merges_folders() {
    let sandbox = Sandbox::new("scripts_pick");
    let web = sandbox.path("web");
    let api = sandbox.path("api");
    fs::create_dir_all(&web).unwrap();
    fs::create_dir_all(&api).unwrap();
    fs::write(web.join("package.json"), r#"{"scripts":{"dev":"vite"}}"#).unwrap();
    fs::write(api.join("package.json"), r#"{"scripts":{"dev":"nodemon","seed":"node s"}}"#)
        .unwrap();
    fs::write(api.join("yarn.lock"), "").unwrap();

    let out = stdout(&sandbox.run(&[
        "scripts",
        "--json",
        "--mode",
        "pick",
        "--workspace",
        &workspace_arg(&web),
        "--workspace",
        &workspace_arg(&api),
    ]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["mode"], "pick");
    assert_eq!(value["folders"], 2);
    let dev = &value["visible"][0];
    assert_eq!(dev["name"], "dev");
    assert_eq!(dev["variants"][0]["run"], "npm run dev");
    assert_eq!(dev["variants"][1]["run"], "yarn dev");
    assert_eq!(dev["variants"][1]["package_manager"], "yarn");
    assert_eq!(value["visible"][1]["name"], "seed");
}

#[test]
fn unknown_screen_override_is_an_error() {
    let sandbox = Sandbox::new("unknown_screen");
    let output = sandbox.run(&["screen", "status", "--screen", "800x600"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("800x600"));
}
