use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn write_track(path: &Path) {
    let mut text = String::from("timestamp,speed,behaviour\n");
    for i in 0..256 {
        let (speed, label) = if (60..110).contains(&i) || (170..220).contains(&i) {
            (8.0 + (i as f64 * 0.7).sin(), "flight")
        } else {
            (0.3 + 0.1 * (i as f64 * 1.3).cos(), "rest")
        };
        text.push_str(&format!("2024-05-01T00:{:02}:{:02}Z,{speed},{label}\n", i / 60, i % 60));
    }
    fs::write(path, text).unwrap();
}

fn write_config(dir: &Path, extra: &str) -> std::path::PathBuf {
    let config = dir.join("migra.toml");
    let text = format!(
        r#"
[io]
input = "{input}"
output_dir = "{out}"
timestamp_column = "timestamp"

[wavelet]
filter = "haar"
levels = 4

[peaks]
level = 4
min_height = 2.0
min_distance = 30

[changepoints]
level = 1
threshold = 0.5
min_segment_length = 10
{extra}
"#,
        input = dir.join("track.csv").display(),
        out = dir.join("out").display(),
    );
    fs::write(&config, text).unwrap();
    config
}

fn migra() -> Command {
    Command::new(env!("CARGO_BIN_EXE_migra"))
}

#[test]
fn segment_writes_table_and_report() {
    let dir = TempDir::new().unwrap();
    write_track(&dir.path().join("track.csv"));
    let config = write_config(dir.path(), "[compare]\ncolumn = \"behaviour\"\ntolerance = 5\n");

    let status = migra()
        .args(["segment", "--config"])
        .arg(&config)
        .status()
        .unwrap();
    assert!(status.success());

    let table = fs::read_to_string(dir.path().join("out/segments.csv")).unwrap();
    let mut lines = table.lines();
    assert_eq!(
        lines.next().unwrap(),
        "index,timestamp,value,approx_4,detail_1,peak_segment,change_segment,stitched_segment"
    );
    assert_eq!(lines.count(), 256);

    let report = fs::read_to_string(dir.path().join("out/report.json")).unwrap();
    assert!(report.contains("\"filter\": \"haar\""));
    assert!(report.contains("\"stitched_segment\""));
    assert!(report.contains("\"reference\": \"behaviour\""));
}

#[test]
fn comparison_reads_labels_with_track_delimiter() {
    let dir = TempDir::new().unwrap();
    let track = dir.path().join("track.csv");
    write_track(&track);
    let text = fs::read_to_string(&track).unwrap().replace(',', ";");
    fs::write(&track, text).unwrap();

    let config = write_config(dir.path(), "[compare]\ncolumn = \"behaviour\"\n");
    let text = fs::read_to_string(&config).unwrap().replace(
        "timestamp_column = \"timestamp\"",
        "timestamp_column = \"timestamp\"\ndelimiter = \";\"",
    );
    fs::write(&config, text).unwrap();

    let output = migra()
        .args(["segment", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report = fs::read_to_string(dir.path().join("out/report.json")).unwrap();
    assert!(report.contains("\"reference\": \"behaviour\""));
}

#[test]
fn decompose_writes_bands_to_requested_path() {
    let dir = TempDir::new().unwrap();
    write_track(&dir.path().join("track.csv"));
    let config = write_config(dir.path(), "");
    let output = dir.path().join("bands.csv");

    let status = migra()
        .args(["decompose", "--config"])
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let bands = fs::read_to_string(&output).unwrap();
    assert!(bands.starts_with("index,approx_1,approx_2,approx_3,approx_4,detail_1,"));
    assert_eq!(bands.lines().count(), 257);
}

#[test]
fn input_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let other = dir.path().join("other.csv");
    write_track(&other);
    // track.csv named in the config does not exist
    let config = write_config(dir.path(), "");

    let status = migra()
        .args(["segment", "--config"])
        .arg(&config)
        .arg("--input")
        .arg(&other)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(dir.path().join("out/segments.csv").exists());
}

#[test]
fn missing_config_fails_with_message() {
    let dir = TempDir::new().unwrap();
    let output = migra()
        .args(["segment", "--config"])
        .arg(dir.path().join("absent.toml"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: failed to read config file"));
}

#[test]
fn level_above_decomposition_fails() {
    let dir = TempDir::new().unwrap();
    write_track(&dir.path().join("track.csv"));
    let config = write_config(dir.path(), "");
    let text = fs::read_to_string(&config)
        .unwrap()
        .replace("levels = 4", "levels = 3");
    fs::write(&config, text).unwrap();

    let output = migra()
        .args(["segment", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!dir.path().join("out").exists());
}
