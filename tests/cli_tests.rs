//! CLI integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration as StdDuration, Instant};

use assert_cmd::Command;
use chrono::{Duration, Local};
use predicates::prelude::*;
use tempfile::TempDir;

/// Isolated home and plugin root for one invocation
struct Sandbox {
    home: TempDir,
    plugin_root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
            plugin_root: TempDir::new().unwrap(),
        }
    }

    fn claude_dir(&self) -> PathBuf {
        self.home.path().join(".claude")
    }

    fn config_file(&self) -> PathBuf {
        self.claude_dir().join("ccbell.config.json")
    }

    fn state_file(&self) -> PathBuf {
        self.claude_dir().join("ccbell.state")
    }

    fn write_config(&self, json: &str) {
        fs::create_dir_all(self.claude_dir()).unwrap();
        fs::write(self.config_file(), json).unwrap();
    }

    fn add_bundled_sound(&self, root: &Path, name: &str) -> PathBuf {
        let sounds = root.join("sounds");
        fs::create_dir_all(&sounds).unwrap();
        let file = sounds.join(format!("{name}.aiff"));
        fs::write(&file, b"FORM").unwrap();
        file
    }

    /// Put an `mpv` on PATH that records its arguments and then hangs.
    /// Returns the file the arguments are written to.
    #[cfg(unix)]
    fn install_fake_mpv(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.home.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let args_file = self.home.path().join("mpv.args");
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{0}.tmp'\nmv '{0}.tmp' '{0}'\nexec sleep 30\n",
            args_file.display()
        );
        let mpv = bin.join("mpv");
        fs::write(&mpv, script).unwrap();
        fs::set_permissions(&mpv, fs::Permissions::from_mode(0o755)).unwrap();
        args_file
    }

    fn path_with_fake_bin(&self) -> String {
        format!("{}:/usr/bin:/bin", self.home.path().join("bin").display())
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ccbell"));
        cmd.env("HOME", self.home.path())
            .env("CLAUDE_PLUGIN_ROOT", self.plugin_root.path())
            .env_remove("CCBELL_LOG");
        cmd
    }
}

fn hh_mm(offset: Duration) -> String {
    (Local::now() + offset).format("%H:%M").to_string()
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

#[test]
fn help_output() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("permission_prompt"))
        .stdout(predicate::str::contains("idle_prompt"))
        .stdout(predicate::str::contains("ccbell.config.json"))
        .stdout(predicate::str::contains("CLAUDE_PLUGIN_ROOT"));
}

#[test]
fn short_help_output() {
    Sandbox::new()
        .cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("EVENT_TYPE"));
}

#[test]
fn version_output() {
    for flag in ["--version", "-v"] {
        Sandbox::new()
            .cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("ccbell "))
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn help_and_version_write_nothing() {
    let sandbox = Sandbox::new();
    sandbox.cmd().arg("--help").assert().success();
    sandbox.cmd().arg("--version").assert().success();
    assert!(!exists(&sandbox.claude_dir()));
}

#[test]
fn first_run_creates_default_config() {
    let sandbox = Sandbox::new();
    sandbox.cmd().arg("stop").assert();

    let content = fs::read_to_string(sandbox.config_file()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["enabled"], true);
    assert_eq!(value["activeProfile"], "default");
    assert_eq!(value["events"]["stop"]["sound"], "bundled:stop");
    assert_eq!(value["events"]["permission_prompt"]["volume"], 0.7);
}

#[test]
fn existing_config_is_not_overwritten() {
    let sandbox = Sandbox::new();
    let json = r#"{"enabled": false}"#;
    sandbox.write_config(json);

    sandbox.cmd().arg("stop").assert().success();
    assert_eq!(fs::read_to_string(sandbox.config_file()).unwrap(), json);
}

#[test]
fn globally_disabled_exits_cleanly() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"enabled": false}"#);

    // No bundled sounds exist, so success means the run was suppressed.
    sandbox.cmd().arg("stop").assert().success();
    assert!(!exists(&sandbox.state_file()));
}

#[test]
fn disabled_event_exits_cleanly() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"events": {"idle_prompt": {"enabled": false}}}"#);

    sandbox.cmd().arg("idle_prompt").assert().success();
}

#[test]
fn disabled_by_active_profile_exits_cleanly() {
    let sandbox = Sandbox::new();
    sandbox.write_config(
        r#"{
            "activeProfile": "silent",
            "profiles": {"silent": {"events": {"subagent": {"enabled": false}}}}
        }"#,
    );

    sandbox.cmd().arg("subagent").assert().success();
}

#[test]
fn quiet_hours_suppress_notification() {
    let sandbox = Sandbox::new();
    sandbox.write_config(&format!(
        r#"{{"quietHours": {{"start": "{}", "end": "{}"}}}}"#,
        hh_mm(Duration::hours(-1)),
        hh_mm(Duration::hours(2)),
    ));

    sandbox.cmd().arg("stop").assert().success();
    assert!(!exists(&sandbox.state_file()));
}

#[test]
fn cooldown_suppresses_second_run() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"events": {"stop": {"cooldown": 3600}}}"#);

    // First run records the trigger, then fails for lack of a sound file.
    sandbox.cmd().arg("stop").assert().failure();
    let state = fs::read_to_string(sandbox.state_file()).unwrap();
    assert!(state.contains("lastTrigger"));
    assert!(state.contains("\"stop\""));

    sandbox.cmd().arg("stop").assert().success();

    // Cooldowns are tracked per event.
    sandbox.cmd().arg("subagent").assert().failure();
}

#[test]
fn zero_cooldown_never_suppresses() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"events": {"stop": {"cooldown": 0}}}"#);

    sandbox.cmd().arg("stop").assert().failure();
    sandbox.cmd().arg("stop").assert().failure();
}

#[test]
fn piped_stdin_is_accepted() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"enabled": false}"#);

    sandbox
        .cmd()
        .arg("stop")
        .write_stdin(r#"{"session_id": "abc", "hook_event_name": "Stop"}"#)
        .assert()
        .success();
}

#[test]
fn debug_config_writes_log_file() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"debug": true, "enabled": false}"#);

    sandbox.cmd().arg("stop").assert().success();

    let log = fs::read_to_string(sandbox.claude_dir().join("ccbell.log")).unwrap();
    assert!(log.contains("ccbell triggered"));
    assert!(log.contains("plugin disabled globally"));
}

#[test]
fn no_log_file_without_debug() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"enabled": false}"#);

    sandbox.cmd().arg("stop").assert().success();
    assert!(!exists(&sandbox.claude_dir().join("ccbell.log")));
}

fn wait_for_file(path: &Path, timeout: StdDuration) -> Option<String> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Ok(content) = fs::read_to_string(path) {
            return Some(content);
        }
        thread::sleep(StdDuration::from_millis(20));
    }
    None
}

#[cfg(target_os = "linux")]
#[test]
fn plays_bundled_sound_without_waiting_for_player() {
    let sandbox = Sandbox::new();
    let sound = sandbox.add_bundled_sound(sandbox.plugin_root.path(), "stop");
    let args_file = sandbox.install_fake_mpv();

    let started = Instant::now();
    sandbox
        .cmd()
        .env("PATH", sandbox.path_with_fake_bin())
        .arg("stop")
        .timeout(StdDuration::from_secs(20))
        .assert()
        .success();
    assert!(started.elapsed() < StdDuration::from_secs(10));

    let args = wait_for_file(&args_file, StdDuration::from_secs(5)).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(
        args,
        [
            "--really-quiet",
            "--volume=50",
            sound.to_str().unwrap(),
        ]
    );
}

#[cfg(target_os = "linux")]
#[test]
fn relative_plugin_root_is_ignored() {
    let sandbox = Sandbox::new();
    sandbox.add_bundled_sound(&sandbox.home.path().join("plugin"), "stop");
    let args_file = sandbox.install_fake_mpv();

    sandbox
        .cmd()
        .current_dir(sandbox.home.path())
        .env("CLAUDE_PLUGIN_ROOT", "plugin")
        .env("PATH", sandbox.path_with_fake_bin())
        .arg("stop")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no playable sound"));

    assert!(wait_for_file(&args_file, StdDuration::from_millis(300)).is_none());
}
