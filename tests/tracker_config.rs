use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::NamedTempFile;

use balltrack::TrackerConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in ["BALLTRACK_CONFIG", "BALLTRACK_CSV_PATH", "BALLTRACK_FOURCC"] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_defaults_without_config() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = TrackerConfig::load().expect("load config");
    assert_eq!(cfg.csv_path, PathBuf::from("ball_positions.csv"));
    assert_eq!(cfg.fourcc, "XVID");
    assert_eq!(cfg.output_suffix, "_TrackNet");
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "csv_path": "/data/positions.csv",
        "fourcc": "MJPG",
        "output_suffix": "_tracked"
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("BALLTRACK_CONFIG", file.path());
    std::env::set_var("BALLTRACK_FOURCC", "DIVX");

    let cfg = TrackerConfig::load().expect("load config");

    assert_eq!(cfg.csv_path, PathBuf::from("/data/positions.csv"));
    // Env override beats the file value.
    assert_eq!(cfg.fourcc, "DIVX");
    assert_eq!(cfg.output_suffix, "_tracked");

    clear_env();
}

#[test]
fn rejects_invalid_fourcc_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("BALLTRACK_FOURCC", "NOPE!");
    let result = TrackerConfig::load();
    assert!(result.is_err());

    clear_env();
}
