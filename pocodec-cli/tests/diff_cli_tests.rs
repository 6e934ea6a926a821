use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn pocodec() -> Command {
    Command::cargo_bin("pocodec").unwrap()
}

#[test]
fn test_diff_reports_added_entry() {
    let temp_dir = TempDir::new().unwrap();
    let old = temp_dir.path().join("old.po");
    let new = temp_dir.path().join("new.po");
    fs::write(&old, "msgid \"hello\"\nmsgstr \"你好\"\n").unwrap();
    fs::write(
        &new,
        "msgid \"hello\"\nmsgstr \"你好\"\n\nmsgid \"world\"\nmsgstr \"世界\"\n",
    )
    .unwrap();

    let out = pocodec()
        .args([
            "diff",
            "--old",
            old.to_str().unwrap(),
            "--new",
            new.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Added: 1, Changed: 0, Deleted: 0"));
    assert!(stdout.contains("world"));
}

#[test]
fn test_diff_json_reports_stats_and_review_entries() {
    let temp_dir = TempDir::new().unwrap();
    let old = temp_dir.path().join("old.po");
    let new = temp_dir.path().join("new.po");
    fs::write(
        &old,
        "msgid \"a\"\nmsgstr \"1\"\n\nmsgid \"b\"\nmsgstr \"2\"\n",
    )
    .unwrap();
    fs::write(&new, "msgid \"a\"\nmsgstr \"one\"\n").unwrap();

    let out = pocodec()
        .args([
            "diff",
            "--old",
            old.to_str().unwrap(),
            "--new",
            new.to_str().unwrap(),
            "--json",
        ])
        .output()
        .unwrap();

    assert!(out.status.success());
    let report: Value = serde_json::from_str(&String::from_utf8_lossy(&out.stdout)).unwrap();
    assert_eq!(report["stats"]["added"], 0);
    assert_eq!(report["stats"]["changed"], 1);
    assert_eq!(report["stats"]["deleted"], 1);
    let review = report["review_entries"].as_array().unwrap();
    assert_eq!(review.len(), 1);
    assert_eq!(review[0]["msgid"], "a");
    assert_eq!(review[0]["msgstr"], "one");
}

#[test]
fn test_diff_ignores_obsolete_in_old() {
    let temp_dir = TempDir::new().unwrap();
    let old = temp_dir.path().join("old.po");
    let new = temp_dir.path().join("new.po");
    fs::write(&old, "#~ msgid \"x\"\n#~ msgstr \"X\"\n").unwrap();
    fs::write(&new, "msgid \"x\"\nmsgstr \"X\"\n").unwrap();

    let out = pocodec()
        .args([
            "diff",
            "--old",
            old.to_str().unwrap(),
            "--new",
            new.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Added: 1, Changed: 0, Deleted: 0"));
}
