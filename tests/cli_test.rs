//! CLIの統合テスト
//!
//! ビルド済みバイナリを一時ディレクトリに対して実行し、標準出力を検証

use serde_json::Value;
use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_showroom-media"))
        .args(args)
        .env("HOME", home)
        .env_remove("SHOWROOM_IMAGES_ROOT")
        .env_remove("SHOWROOM_CATALOG")
        .env_remove("SHOWROOM_PORT")
        .output()
        .expect("バイナリの実行に失敗")
}

/// --explain の候補表は標準エラーに出し、標準出力はJSONのみ
#[test]
fn test_lookup_explain_keeps_stdout_json() {
    let home = tempdir().expect("Failed to create temp dir");
    let images = tempdir().expect("Failed to create temp dir");
    let folder = images.path().join("bmw-x6-m");
    fs::create_dir_all(&folder).unwrap();
    File::create(folder.join("destaque.jpg")).unwrap();
    fs::create_dir_all(images.path().join("audi-rs6")).unwrap();

    let root = images.path().to_string_lossy().to_string();
    let output = run_cli(
        home.path(),
        &["--root", &root, "lookup", "BMW X6 M", "--explain"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let body: Value = serde_json::from_str(&stdout).expect("標準出力がJSONではない");
    assert_eq!(body["folder"], "bmw-x6-m");
    assert_eq!(body["images"][0], "/images/bmw-x6-m/destaque.jpg");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("候補フォルダ"));
    assert!(stderr.contains("audi-rs6"));
}

/// フォルダ一覧はJSON配列
#[test]
fn test_folders_prints_json() {
    let home = tempdir().expect("Failed to create temp dir");
    let images = tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(images.path().join("porsche-911")).unwrap();

    let root = images.path().to_string_lossy().to_string();
    let output = run_cli(home.path(), &["--root", &root, "folders"]);
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).expect("標準出力がJSONではない");
    assert_eq!(body[0]["name"], "porsche-911");
    assert_eq!(body[0]["imageCount"], 0);
}
