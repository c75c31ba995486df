#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        Self { _tmp: tmp, home }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.home.join(".config/poststudio")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.home.join(".local/share/poststudio")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("poststudio");
        cmd.env("HOME", &self.home)
            .env_remove("RUST_LOG")
            .env_remove("POSTSTUDIO_GENAI_KEY")
            .env_remove("POSTSTUDIO_PASSWORD");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_err(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }

    pub fn write_config(&self, toml: &str) {
        fs::create_dir_all(self.config_dir()).expect("create config dir");
        fs::write(self.config_dir().join("config.toml"), toml).expect("write config");
    }

    /// Owner (primary, admin) and Writer (editor) accounts.
    pub fn write_accounts(&self) {
        fs::create_dir_all(self.config_dir()).expect("create config dir");
        let accounts = format!(
            r#"[[accounts]]
email = "owner@studio.test"
display_name = "Owner"
password_sha256 = "{}"
primary = true

[[accounts]]
email = "writer@studio.test"
display_name = "Writer"
password_sha256 = "{}"
"#,
            sha256_hex("owner-pass"),
            sha256_hex("writer-pass")
        );
        fs::write(self.config_dir().join("accounts.toml"), accounts).expect("write accounts");
    }

    pub fn create_draft(&self, caption: &str) -> String {
        let out = self.run_json(&[
            "draft",
            "create",
            "--title",
            "Spring set",
            "--caption",
            caption,
            "--hashtag",
            "nails",
            "--hashtag",
            "#spring",
            "--hashtag",
            "manicure",
            "--cta",
            "Book now",
            "--platform",
            "instagram",
            "--media",
            "image:https://cdn.example.com/nails.jpg",
        ]);
        assert_eq!(out["ok"], true);
        out["data"]["id"].as_str().expect("post id").to_string()
    }
}

pub fn sha256_hex(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
