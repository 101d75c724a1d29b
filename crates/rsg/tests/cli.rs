use assert_cmd::Command;
use predicates::prelude::*;

fn rsg() -> Command {
    Command::cargo_bin("rsg").unwrap()
}

#[test]
fn test_prints_model_for_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("a.rb"),
        "module A\n  def helper; end\nend\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("b.rb"),
        "class B < StandardError\n  include A\nend\n",
    )
    .unwrap();

    rsg()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("module <root>"))
        .stdout(predicate::str::contains("module ::A"))
        .stdout(predicate::str::contains("class ::B"))
        .stdout(predicate::str::contains("include ::A"))
        .stdout(predicate::str::contains("def helper"));
}

#[test]
fn test_no_properties_hides_methods() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.rb"), "module A\n  def helper; end\nend\n").unwrap();

    rsg()
        .arg("--no-properties")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("module ::A"))
        .stdout(predicate::str::contains("def helper").not());
}

#[test]
fn test_stats_prints_json_totals() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("a.rb"),
        "module A; end\nclass B\n  def f; end\nend\n",
    )
    .unwrap();

    rsg()
        .arg("--stats")
        .arg("--no-defs")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"modules\": 1"))
        .stdout(predicate::str::contains("\"classes\": 1"))
        .stdout(predicate::str::contains("\"methods\": 1"));
}

#[test]
fn test_broken_file_does_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ok.rb"), "module A; end\n").unwrap();
    std::fs::write(dir.path().join("bad.rb"), "class Oops <\n").unwrap();

    rsg()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("module ::A"))
        .stderr(predicate::str::contains("bad.rb"));
}

#[test]
fn test_requires_at_least_one_path() {
    rsg().assert().failure();
}
