//! CLI 集成测试

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn profile_store(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("profile-store").unwrap();
    cmd.env("PROFILE_STORE_DIR", data_dir.path())
        .env_remove("PROFILE_DEMO_MODE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_fields_lists_schema() {
    let temp = TempDir::new().unwrap();
    profile_store(&temp)
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("dateOfBirth"))
        .stdout(predicate::str::contains("apprenticeshipLevel"))
        .stdout(predicate::str::contains("24 fields"));
}

#[test]
fn test_empty_profile_without_demo_mode() {
    let temp = TempDir::new().unwrap();
    profile_store(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("No profile data yet"));

    // 没有写入任何文件
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_set_then_show_persists() {
    let temp = TempDir::new().unwrap();
    profile_store(&temp)
        .args(["set", "name=A", "phone=555"])
        .assert()
        .success();

    profile_store(&temp)
        .args(["set", "postal_code=V5K 0A1"])
        .assert()
        .success();

    profile_store(&temp)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "A""#))
        .stdout(predicate::str::contains(r#""phone": "555""#))
        .stdout(predicate::str::contains(r#""postalCode": "V5K 0A1""#))
        .stdout(predicate::str::contains(r#""email": """#));
}

#[test]
fn test_unknown_field_is_rejected() {
    let temp = TempDir::new().unwrap();
    profile_store(&temp)
        .args(["set", "nickname=x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown profile field"));
}

#[test]
fn test_demo_mode_seeds_first_run() {
    let temp = TempDir::new().unwrap();
    profile_store(&temp)
        .env("PROFILE_DEMO_MODE", "1")
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jisoo Jang"));

    // 演示数据已持久化，关闭演示模式后仍然存在
    profile_store(&temp)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jisoo Jang"));
}

#[test]
fn test_demo_mode_requires_exact_value() {
    let temp = TempDir::new().unwrap();
    profile_store(&temp)
        .env("PROFILE_DEMO_MODE", "true")
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jisoo Jang").not());
}

#[test]
fn test_demo_command_then_reset() {
    let temp = TempDir::new().unwrap();
    profile_store(&temp)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("/(tabs)"));

    profile_store(&temp)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""trade": "Electrician""#));

    profile_store(&temp).arg("reset").assert().success();

    profile_store(&temp)
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": """#));
}
