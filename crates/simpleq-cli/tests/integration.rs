//! Integration tests for simpleq-cli.
//!
//! Run the built binary end to end: listing, file processing, response
//! printing, and state blobs.

use std::f32::consts::TAU;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn simpleq_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_simpleq"))
}

fn write_stereo_tones(path: &Path, sample_rate: u32, freq: f32, frames: usize) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let s = (TAU * freq * i as f32 / sample_rate as f32).sin() * 0.5;
        writer.write_sample(s).unwrap();
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
}

fn read_channels(path: &Path) -> (hound::WavSpec, Vec<f32>, Vec<f32>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples: Vec<f32> = reader.samples::<f32>().map(Result::unwrap).collect();
    let left = samples.iter().step_by(2).copied().collect();
    let right = samples.iter().skip(1).step_by(2).copied().collect();
    (spec, left, right)
}

fn rms(samples: &[f32]) -> f32 {
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

// ---------------------------------------------------------------------------
// `simpleq params`
// ---------------------------------------------------------------------------

#[test]
fn cli_params_lists_every_parameter() {
    let output = simpleq_bin().arg("params").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in [
        "low_cut_freq",
        "high_cut_freq",
        "peak_freq",
        "peak_gain",
        "peak_quality",
        "low_cut_slope",
        "high_cut_slope",
    ] {
        assert!(stdout.contains(key), "params listing should contain '{key}'");
    }
    assert!(stdout.contains("12/24/36/48"));
}

// ---------------------------------------------------------------------------
// `simpleq process`
// ---------------------------------------------------------------------------

#[test]
fn cli_process_stereo_low_cut() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_stereo_tones(&input, 48000, 50.0, 48000);

    let output = simpleq_bin()
        .arg("process")
        .arg(&input)
        .arg(&output_path)
        .args(["--low-cut", "200", "--low-cut-slope", "48"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let (spec, left, right) = read_channels(&output_path);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(left.len(), 48000);
    assert_eq!(left, right);

    // Skip the transient, then compare against the 0.5-amplitude input.
    let input_rms = 0.5 / 2.0f32.sqrt();
    let out_rms = rms(&left[24000..]);
    let attenuation_db = 20.0 * (out_rms / input_rms).log10();
    assert!(
        attenuation_db < -40.0,
        "50 Hz should be cut hard, got {attenuation_db:.1} dB"
    );
}

#[test]
fn cli_process_with_factory_preset_writes_16_bit() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_stereo_tones(&input, 44100, 1000.0, 4410);

    let output = simpleq_bin()
        .arg("process")
        .arg(&input)
        .arg(&output_path)
        .args(["--preset", "vocal_presence", "--bit-depth", "16"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reader = hound::WavReader::open(&output_path).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert_eq!(reader.spec().sample_format, hound::SampleFormat::Int);
}

#[test]
fn cli_process_rejects_out_of_range_value() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_stereo_tones(&input, 48000, 440.0, 480);

    let output = simpleq_bin()
        .arg("process")
        .arg(&input)
        .arg(dir.path().join("out.wav"))
        .args(["--high-cut", "25000"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("high_cut_freq"));
    assert!(!dir.path().join("out.wav").exists());
}

#[test]
fn cli_process_rejects_bad_slope() {
    let dir = TempDir::new().unwrap();
    let output = simpleq_bin()
        .arg("process")
        .arg(dir.path().join("in.wav"))
        .arg(dir.path().join("out.wav"))
        .args(["--low-cut-slope", "18"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `simpleq response`
// ---------------------------------------------------------------------------

#[test]
fn cli_response_shows_peak_boost() {
    let output = simpleq_bin()
        .args([
            "response",
            "--peak-freq",
            "1000",
            "--peak-gain",
            "-6",
            "--freq",
            "1000",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .find(|l| l.trim_start().starts_with("1000.0"))
        .expect("1 kHz row");
    let db: f64 = line.split_whitespace().nth(1).unwrap().parse().unwrap();
    assert!((db + 6.0).abs() < 0.1, "expected -6 dB at 1 kHz, got {db}");
}

#[test]
fn cli_response_default_grid() {
    let output = simpleq_bin().arg("response").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FREQ"));
    assert!(stdout.lines().count() > 30);
}

// ---------------------------------------------------------------------------
// `simpleq state`
// ---------------------------------------------------------------------------

#[test]
fn cli_state_save_and_show() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("session").join("state.json");

    let saved = simpleq_bin()
        .args(["state", "save"])
        .arg(&blob)
        .args(["--peak-freq", "2500", "--high-cut-slope", "36"])
        .output()
        .unwrap();
    assert!(saved.status.success());
    assert!(blob.is_file());

    let shown = simpleq_bin()
        .args(["state", "show"])
        .arg(&blob)
        .output()
        .unwrap();
    assert!(shown.status.success());
    let stdout = String::from_utf8_lossy(&shown.stdout);
    assert!(stdout.contains("2500"));
    assert!(stdout.contains("36 dB/Oct"));
}

#[test]
fn cli_state_show_rejects_corrupt_blob() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("state.json");
    std::fs::write(&blob, b"not a state blob").unwrap();

    let output = simpleq_bin()
        .args(["state", "show"])
        .arg(&blob)
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn cli_state_feeds_process() {
    let dir = TempDir::new().unwrap();
    let blob = dir.path().join("state.json");
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_stereo_tones(&input, 48000, 50.0, 24000);

    assert!(
        simpleq_bin()
            .args(["state", "save"])
            .arg(&blob)
            .args(["--low-cut", "300", "--low-cut-slope", "48"])
            .status()
            .unwrap()
            .success()
    );

    let status = simpleq_bin()
        .arg("process")
        .arg(&input)
        .arg(&output_path)
        .arg("--state")
        .arg(&blob)
        .status()
        .unwrap();
    assert!(status.success());

    let (_, left, _) = read_channels(&output_path);
    assert!(rms(&left[12000..]) < 0.01);
}

// ---------------------------------------------------------------------------
// `simpleq presets`
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_list_factory() {
    let output = simpleq_bin()
        .args(["presets", "list", "--factory"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Telephone"));
    assert!(stdout.contains("Rumble Filter"));
}

#[test]
fn cli_presets_show_factory() {
    let output = simpleq_bin()
        .args(["presets", "show", "telephone"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("300 Hz @ 48 dB/Oct"));
}

#[test]
fn cli_presets_show_unknown_fails() {
    let output = simpleq_bin()
        .args(["presets", "show", "no_such_preset_98765"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
