//! Shared `bf` command builder for the integration tests.
//!
//! Every command runs with a fresh, empty config home and without the
//! memory-size and log-level variables, so a developer's own `bf.toml` or
//! exported `BF_MEMORY_SIZE` never leaks into the results.

#![allow(dead_code)]

use assert_cmd::Command;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Bf {
    cmd: Command,
    home: TempDir,
}

impl Bf {
    /// The directory `bf` treats as the user's config home.
    pub fn config_home(&self) -> PathBuf {
        self.home.path().join(".config")
    }

    /// Write `bf.toml` into the isolated config home.
    pub fn with_user_config(self, content: &str) -> Self {
        let dir = self.config_home();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("bf.toml"), content).unwrap();
        self
    }
}

impl Deref for Bf {
    type Target = Command;

    fn deref(&self) -> &Command {
        &self.cmd
    }
}

impl DerefMut for Bf {
    fn deref_mut(&mut self) -> &mut Command {
        &mut self.cmd
    }
}

pub fn cargo_bin() -> Bf {
    let home = tempfile::tempdir().expect("tempdir");
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("BF_MEMORY_SIZE")
        .env_remove("RUST_LOG");
    Bf { cmd, home }
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/programs")
        .join(name)
}
