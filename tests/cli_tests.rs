// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod common;

use agora::actors::{Deployable, user};
use agora::address::Address;
use agora::cli_shared::cli::{CONFIG_PATH_ENV, Config};
use tempfile::TempDir;

use crate::common::cli;

const SCENARIO: &str = r#"
[[step]]
action = "deploy-master"
admin = "admin"
price_for_like = "0.05"
price_for_comment = "0.15"

[[step]]
action = "top-up"
from = "admin"
value = "10"

[[step]]
action = "init-user"
owner = "alice"
name = "Alice"

[[step]]
action = "init-user"
owner = "bob"
name = "Bob"

[[step]]
action = "create-post"
owner = "alice"
title = "hello"
text = "world"

[[step]]
action = "like-post"
owner = "bob"
author = "alice"
post_id = 0

[[step]]
action = "claim-payment"
author = "alice"
post_id = 0
"#;

#[test]
fn config_dump_produces_a_valid_configuration() {
    let cmd = cli()
        .env_remove(CONFIG_PATH_ENV)
        .arg("config")
        .arg("dump")
        .assert()
        .success();

    let output = &cmd.get_output().stdout;
    let config: Config = toml::from_str(std::str::from_utf8(output).unwrap()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_file_is_read_from_flag_and_env() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agora.toml");
    std::fs::write(&path, "[ledger]\ngenesis_time = 1234\n").unwrap();

    for by_env in [false, true] {
        let mut cmd = cli();
        if by_env {
            cmd.env(CONFIG_PATH_ENV, &path);
        } else {
            cmd.env_remove(CONFIG_PATH_ENV).arg("--config").arg(&path);
        }
        let out = cmd.arg("config").arg("dump").assert().success();
        let config: Config =
            toml::from_str(std::str::from_utf8(&out.get_output().stdout).unwrap()).unwrap();
        assert_eq!(config.ledger.genesis_time, Some(1234));
    }
}

#[test]
fn broken_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("agora.toml");
    std::fs::write(&path, "[ledger\n").unwrap();
    cli()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("dump")
        .assert()
        .failure();
}

#[test]
fn address_commands_derive_addresses() {
    let out = cli().args(["address", "wallet", "alice"]).assert().success();
    assert_eq!(
        std::str::from_utf8(&out.get_output().stdout).unwrap().trim(),
        Address::new_wallet("alice").to_string()
    );

    let master = Address::new_wallet("master");
    let owner = Address::new_wallet("alice");
    let out = cli()
        .arg("address")
        .arg("user")
        .arg(master.to_string())
        .arg(owner.to_string())
        .assert()
        .success();
    let expected = user::ConstructorParams { master, owner }.address().unwrap();
    assert_eq!(
        std::str::from_utf8(&out.get_output().stdout).unwrap().trim(),
        expected.to_string()
    );

    cli()
        .args(["address", "user", "not-an-address", "0:00"])
        .assert()
        .failure();
}

#[test]
fn scenario_prints_json_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenario.toml");
    std::fs::write(&path, SCENARIO).unwrap();

    let out = cli()
        .env_remove(CONFIG_PATH_ENV)
        .arg("scenario")
        .arg(&path)
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    let steps: Vec<_> = lines.iter().filter(|l| l.get("step").is_some()).collect();
    assert_eq!(steps.len(), 7);
    assert_eq!(steps[0]["action"], "deploy-master");
    let claim = steps[6];
    assert_eq!(claim["action"], "claim-payment");
    assert_eq!(claim["transactions"].as_array().unwrap().len(), 3);
    assert_eq!(claim["transactions"][2]["value"], "0.05");

    let post = lines.iter().find(|l| l["kind"] == "post").unwrap();
    assert_eq!(post["state"]["likes_paid"], 1);
}

#[test]
fn scenario_failure_names_the_step() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenario.toml");
    std::fs::write(
        &path,
        "[[step]]\naction = \"top-up\"\nfrom = \"admin\"\nvalue = 1\n",
    )
    .unwrap();
    let out = cli().arg("scenario").arg(&path).assert().failure();
    let stderr = std::str::from_utf8(&out.get_output().stderr).unwrap();
    assert!(stderr.contains("top-up"), "{stderr}");
}
