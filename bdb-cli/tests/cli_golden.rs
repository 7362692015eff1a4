use std::{path::Path, process::Command};

fn bdb() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bdb"))
}

fn build_tree(root: &Path) {
    std::fs::create_dir_all(root.join("a/inner")).unwrap();
    std::fs::create_dir_all(root.join("b")).unwrap();
    std::fs::write(root.join("a/inner/f.bin"), vec![0u8; 64 * 1024]).unwrap();
    std::fs::write(root.join("b/g.bin"), vec![0u8; 4096]).unwrap();
}

#[test]
fn prints_path_and_gib_lines() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("r");
    build_tree(&root);

    let out = bdb()
        .arg("--size")
        .arg("0")
        .arg("--threads")
        .arg("2")
        .arg(&root)
        .output()
        .unwrap();
    assert!(out.status.success(), "status={:?}", out.status);
    let s = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines.len(), 3, "{s}");
    assert_eq!(lines[0], format!("{} 0.0", root.display()));
    // a is larger than b, so it comes first
    assert_eq!(lines[1], format!("{} 0.0", root.join("a").display()));
    assert_eq!(lines[2], format!("{} 0.0", root.join("b").display()));
}

#[test]
fn small_tree_reports_nothing_by_default() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("r");
    build_tree(&root);

    let out = bdb().arg(&root).output().unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_root_fails_with_one_line() {
    let tmp = tempfile::tempdir().unwrap();
    let out = bdb().arg(tmp.path().join("nope")).output().unwrap();
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let err = String::from_utf8_lossy(&out.stderr);
    assert_eq!(err.trim_end().lines().count(), 1, "{err}");
    assert!(err.contains("cannot stat directory"), "{err}");
    assert_eq!(err.matches("os error").count(), 1, "{err}");
}

#[test]
fn file_root_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let f = tmp.path().join("f.txt");
    std::fs::write(&f, b"x").unwrap();
    let out = bdb().arg(&f).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("is not a directory"));
}

#[test]
fn zero_threads_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let out = bdb().arg("-t").arg("0").arg(tmp.path()).output().unwrap();
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("threads"));
}

#[test]
fn json_export_matches_stdout() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("r");
    build_tree(&root);
    let json = tmp.path().join("report.json");

    let out = bdb()
        .args(["--size", "0", "--json"])
        .arg(&json)
        .arg(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    let printed = String::from_utf8_lossy(&out.stdout).lines().count();
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(v.as_array().map(Vec::len), Some(printed));
    assert_eq!(v[0]["path"], root.display().to_string());
}

#[test]
fn config_file_supplies_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("r");
    build_tree(&root);
    let cfg = tmp.path().join("cfg.json");
    std::fs::write(&cfg, r#"{ "size": 0, "threads": 1 }"#).unwrap();

    let out = bdb().arg("--config").arg(&cfg).arg(&root).output().unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 3);

    // flags win over the file
    let out = bdb()
        .arg("--config")
        .arg(&cfg)
        .args(["--size", "1"])
        .arg(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn growth_lists_grown_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let old = tmp.path().join("old.txt");
    let new = tmp.path().join("new.txt");
    std::fs::write(&old, "/srv 10.0\n/srv/db 6.0\n/srv/logs 3.0\n").unwrap();
    std::fs::write(&new, "/srv 12.5\n/srv/db 6.0\n/srv/logs 2.0\n/srv/cache 1.2\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_bdb-growth"))
        .arg(&old)
        .arg(&new)
        .output()
        .unwrap();
    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    assert_eq!(s.lines().collect::<Vec<_>>(), vec!["/srv 2.50", "/srv/cache 1.20"]);
}

#[test]
fn growth_rejects_malformed_report() {
    let tmp = tempfile::tempdir().unwrap();
    let old = tmp.path().join("old.txt");
    let new = tmp.path().join("new.txt");
    std::fs::write(&old, "/srv 10.0\n").unwrap();
    std::fs::write(&new, "/srv ten\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_bdb-growth"))
        .arg(&old)
        .arg(&new)
        .output()
        .unwrap();
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("new.txt:1"), "{err}");
}

#[test]
fn unparsable_option_fails_with_one_line() {
    let tmp = tempfile::tempdir().unwrap();
    let out = bdb().args(["--size", "big"]).arg(tmp.path()).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = String::from_utf8_lossy(&out.stderr);
    assert_eq!(err.trim_end().lines().count(), 1, "{err}");
    assert!(err.starts_with("bdb: "), "{err}");
    assert!(err.contains("--size"), "{err}");
}

#[test]
fn help_still_prints_usage() {
    let out = bdb().arg("--help").output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("--no-elision"));
}

#[test]
fn growth_missing_file_fails_with_one_line() {
    let tmp = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_bdb-growth"))
        .arg(tmp.path().join("a.txt"))
        .arg(tmp.path().join("b.txt"))
        .output()
        .unwrap();
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert_eq!(err.trim_end().lines().count(), 1, "{err}");
    assert!(err.contains("a.txt"), "{err}");
    assert_eq!(err.matches("os error").count(), 1, "{err}");
}

#[test]
fn growth_missing_argument_fails_with_one_line() {
    let out = Command::new(env!("CARGO_BIN_EXE_bdb-growth"))
        .arg("only-one.txt")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8_lossy(&out.stderr);
    assert_eq!(err.trim_end().lines().count(), 1, "{err}");
    assert!(err.starts_with("bdb-growth: "), "{err}");
}
