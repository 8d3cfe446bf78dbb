use recap_logger::{LevelFilter, Logger, LoggerError};
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
#[serial]
fn file_layer_writes_and_second_install_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let dir = tmp.path().join("logs");

    let logger = Logger::builder()
        .name("recap-file-logging")
        .console(false)
        .level(LevelFilter::INFO)
        .directory(&dir)
        .init()?;
    assert!(logger.writes_files());

    tracing::info!(report = "weekly", "report generated");

    let second = Logger::builder().name("recap-second").init();
    assert!(matches!(second, Err(LoggerError::Subscriber { .. })));

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("a log file is created");
    let contents = fs::read_to_string(log_file)?;
    assert!(contents.contains("report generated"));

    Ok(())
}
