//! End-to-end logger construction from configuration.

use std::fs;
use std::path::Path;

use svc_bootstrap::config::schema::AppConfig;
use svc_bootstrap::observability::{HandlerKind, HandlerOptions, Logger, Severity, LOG_FILE_NAME};

mod common;

fn file_config(dir: &Path, extra: &str) -> AppConfig {
    let source = format!(
        "[logger]\nout = \"file\"\nout_path = {:?}\nset_default = false\n{}",
        dir.to_string_lossy(),
        extra
    );
    toml::from_str(&source).unwrap()
}

fn read_log(dir: &Path) -> String {
    fs::read_to_string(dir.join(LOG_FILE_NAME)).unwrap()
}

#[test]
fn test_warn_plain_text_end_to_end() {
    let scratch = tempfile::tempdir().unwrap();
    let dir = scratch.path().join("logs");
    let config = file_config(&dir, "level = \"warn\"\nis_json = false\ntype = \"default\"\n");

    let logger = Logger::new(&config.logger);
    logger.in_scope(|| tracing::info!("routine detail"));
    assert_eq!(read_log(&dir), "");

    logger.in_scope(|| tracing::warn!("disk nearly full"));
    let out = read_log(&dir);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("disk nearly full"));
    assert!(!lines[0].starts_with('{'));
}

#[test]
fn test_json_file_records_in_call_order() {
    let scratch = tempfile::tempdir().unwrap();
    let dir = scratch.path().join("json");
    let config = file_config(&dir, "level = \"debug\"\n");

    let logger = Logger::new(&config.logger);
    logger.in_scope(|| {
        tracing::trace!("dropped");
        tracing::debug!(step = 1, "first");
        tracing::info!(step = 2, "second");
        tracing::error!(step = 3, "third");
    });

    let records: Vec<serde_json::Value> = read_log(&dir)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let messages: Vec<_> = records
        .iter()
        .map(|r| r["fields"]["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, ["first", "second", "third"]);
    assert_eq!(records[0]["level"], "DEBUG");
    assert_eq!(records[2]["level"], "ERROR");
    // add_source defaults on
    assert!(records[1]["filename"]
        .as_str()
        .unwrap()
        .ends_with("logger_pipeline.rs"));
    assert!(records[1]["line_number"].is_u64());
}

#[test]
fn test_discard_leaves_file_empty() {
    let scratch = tempfile::tempdir().unwrap();
    let dir = scratch.path().join("quiet");
    let config = file_config(&dir, "level = \"debug\"\ntype = \"discard\"\n");

    let logger = Logger::new(&config.logger);
    logger.in_scope(|| {
        for i in 0..50 {
            tracing::error!(i, "never written");
        }
    });

    assert_eq!(logger.kind(), HandlerKind::Discard);
    assert!(dir.join(LOG_FILE_NAME).is_file());
    assert_eq!(read_log(&dir), "");
}

#[test]
fn test_restart_discards_previous_run() {
    let scratch = tempfile::tempdir().unwrap();
    let dir = scratch.path().join("restart");
    let config = file_config(&dir, "is_json = false\n");

    let first = Logger::new(&config.logger);
    first.in_scope(|| tracing::info!("from the first run"));
    drop(first);
    fs::write(dir.join("stray.txt"), b"left behind").unwrap();

    let second = Logger::new(&config.logger);
    second.in_scope(|| tracing::info!("from the second run"));

    let out = read_log(&dir);
    assert!(!out.contains("first run"));
    assert!(out.contains("second run"));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
}

#[test]
fn test_unknown_type_falls_back_to_default_handler() {
    let scratch = tempfile::tempdir().unwrap();
    let dir = scratch.path().join("fallback");
    let config = file_config(&dir, "type = \"rainbow\"\nis_json = false\nlevel = \"verbose\"\n");

    let logger = Logger::new(&config.logger);
    assert_eq!(logger.kind(), HandlerKind::Default { json: false });
    assert_eq!(logger.severity(), Severity::INFO);

    logger.in_scope(|| {
        tracing::debug!("below info");
        tracing::info!("at info");
    });
    let out = read_log(&dir);
    assert!(!out.contains("below info"));
    assert!(out.contains("at info"));
}

#[test]
fn test_pretty_handler_over_custom_writer() {
    let buffer = common::Buffer::default();
    let logger = Logger::with_writer(
        HandlerKind::Pretty,
        buffer.clone(),
        HandlerOptions::new(Severity::INFO, false),
    );

    logger.in_scope(|| tracing::info!(request_id = "abc", "handled"));

    let out = buffer.contents();
    assert!(out.contains("handled"));
    assert!(out.contains("abc"));
    assert!(!out.contains("logger_pipeline.rs"));
}
