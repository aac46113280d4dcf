//! Isolated user directories for running the binary
//!
//! Config, data and cache directories all live in one temporary home, so
//! sessions, favorites and notes carry over between commands of one test and
//! never leak between tests.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub struct Sandbox {
    pub home: TempDir,
    pub api_url: String,
}

impl Sandbox {
    pub fn new(api_url: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            home: TempDir::new()?,
            api_url: api_url.into(),
        })
    }

    pub fn path(&self) -> &Path {
        self.home.path()
    }

    /// `catalog-explorer --api-url <server> <args...>` inside the sandbox
    pub fn cmd(&self, args: &[&str]) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("catalog-explorer")?;
        let home = self.home.path();
        cmd.env("HOME", home)
            .env("XDG_CONFIG_HOME", home.join("config"))
            .env("XDG_DATA_HOME", home.join("data"))
            .env("XDG_CACHE_HOME", home.join("cache"))
            .env("NO_COLOR", "1")
            .env("CLICOLOR", "0")
            .env_remove("CATALOG_EXPLORER_API_URL")
            .arg("--api-url")
            .arg(&self.api_url)
            .args(args);
        Ok(cmd)
    }

    /// `catalog-explorer interactive` fed with `input` on stdin
    pub fn interactive(&self, input: &str) -> anyhow::Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::from_std(self.cmd(&["interactive"])?);
        cmd.write_stdin(input.to_string());
        Ok(cmd)
    }

    /// Raw store file contents, if anything was saved
    pub fn store_contents(&self) -> Option<String> {
        std::fs::read_to_string(
            self.home
                .path()
                .join("data")
                .join("catalog-explorer")
                .join("store.json"),
        )
        .ok()
    }
}
