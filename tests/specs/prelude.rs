//! Shared black-box test harness for the `tmuxd` CLI binary.
//!
//! Every spec gets an isolated `Workspace`: a fresh temp directory used as
//! `TMUXD_SESSIONS_ROOT`, with its own user template/asset directories so
//! specs never see each other's state. Sessions are named uniquely per test
//! (via `Workspace::unique_name`) so that parallel `cargo test` runs never
//! collide inside the real, shared tmux server.

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tempfile::TempDir;

static COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp workspace");
        std::fs::create_dir_all(dir.path().join("sessions")).expect("create sessions dir");
        std::fs::create_dir_all(dir.path().join("templates")).expect("create templates dir");
        std::fs::create_dir_all(dir.path().join("assets")).expect("create assets dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn sessions_root(&self) -> PathBuf {
        self.dir.path().join("sessions")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.dir.path().join("templates")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.dir.path().join("assets")
    }

    /// A name unique to this process run, so concurrent tests never collide
    /// on the shared tmux server namespace.
    pub fn unique_name(&self, prefix: &str) -> String {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{}-{n}", std::process::id())
    }

    /// Write a file under the workspace root, creating parent directories.
    pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }

    /// Build a `tmuxd` invocation rooted at this workspace's directories.
    pub fn tmuxd(&self) -> Cmd {
        let mut cmd = Command::cargo_bin("tmuxd").expect("find tmuxd binary");
        cmd.env("TMUXD_SESSIONS_ROOT", self.sessions_root());
        cmd.env("TMUXD_TEMPLATE_DIR_USER", self.dir.path().join("templates"));
        cmd.env("TMUXD_ASSET_DIR_USER", self.dir.path().join("assets"));
        cmd.env_remove("TMUXD_PUBLIC_BASE_URL");
        Cmd { cmd }
    }

    /// Best-effort teardown of any tmux session this test created, in case
    /// an assertion panicked before the test's own `kill` ran.
    pub fn kill_if_alive(&self, name: &str) {
        let _ = std::process::Command::new("tmux")
            .args(["kill-session", "-t", name])
            .output();
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Thin wrapper over `assert_cmd::Command` with the project's assertion
/// vocabulary layered on top.
pub struct Cmd {
    cmd: Command,
}

impl Cmd {
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn arg(mut self, arg: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.arg(arg);
        self
    }

    /// Run and assert a zero exit code; returns the captured output.
    pub fn passes(mut self) -> Output {
        let output = self.cmd.output().expect("spawn tmuxd");
        assert!(
            output.status.success(),
            "expected success, got {:?}\nstdout: {}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        Output::from(output)
    }

    /// Run and assert a non-zero exit code; returns the captured output.
    pub fn fails(mut self) -> Output {
        let output = self.cmd.output().expect("spawn tmuxd");
        assert!(
            !output.status.success(),
            "expected failure, got success\nstdout: {}",
            String::from_utf8_lossy(&output.stdout),
        );
        Output::from(output)
    }

    /// Run and assert the exact exit code.
    pub fn fails_with(mut self, code: i32) -> Output {
        let output = self.cmd.output().expect("spawn tmuxd");
        assert_eq!(
            output.status.code(),
            Some(code),
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        Output::from(output)
    }
}

pub struct Output {
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stdout),
            "expected stdout to contain `{needle}`, got: {}",
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stderr),
            "expected stderr to contain `{needle}`, got: {}",
            self.stderr
        );
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout was not valid JSON ({e}): {}", self.stdout))
    }
}

/// True when a `tmux` binary is reachable on `PATH`. Session-lifecycle
/// specs that need a live multiplexer skip (rather than fail) when it
/// isn't, so the suite stays portable to minimal CI images.
pub fn tmux_available() -> bool {
    std::process::Command::new("tmux")
        .arg("-V")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
