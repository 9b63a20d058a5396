use approx::assert_abs_diff_eq;
use staffline::stabilizer::{PitchReading, PitchStabilizer, StabilizerConfig, StreamState};

fn stabilizer(window: usize, smoothing: f32) -> PitchStabilizer {
    PitchStabilizer::new(
        StabilizerConfig::new()
            .with_median_window(window)
            .with_smoothing(smoothing),
    )
    .unwrap()
}

#[test]
fn stabilizer_settles_on_steady_a4() {
    let mut s = stabilizer(3, 0.7);
    let outputs: Vec<f32> = [440.0, 440.0, 441.0, 439.0, 440.0]
        .iter()
        .map(|&f| s.ingest(f, 0.5).frequency())
        .collect();
    assert!((outputs[3] - 440.0).abs() < 0.5);
    assert!((outputs[4] - 440.0).abs() < 0.5);
}

#[test]
fn stabilizer_quiet_input_is_silent() {
    let mut s = stabilizer(5, 0.7);
    let out = s.ingest(0.0, 0.0);
    assert_eq!(out.reading, PitchReading::Silent);
    assert_eq!(out.frequency(), 0.0);
}

#[test]
fn stabilizer_rejects_single_spike() {
    let mut s = stabilizer(5, 0.0);
    for f in [220.0, 220.0, 220.0] {
        s.ingest(f, 1.0);
    }
    // an octave error in the detector
    let out = s.ingest(440.0, 1.0);
    assert_eq!(out.frequency(), 220.0);
    assert_eq!(out.note().unwrap().to_string(), "A3");
}

#[test]
fn stabilizer_decays_to_silence() {
    let mut s = stabilizer(3, 0.5);
    s.ingest(100.0, 1.0);
    let mut quiet = 0;
    while !s.ingest(100.0, 0.0).is_silent() {
        quiet += 1;
        assert!(quiet < 20, "never went silent");
    }
    // 100 * 0.8^n drops under 30 Hz on the sixth quiet sample
    assert_eq!(quiet, 5);
    assert!(s.smoothed_frequency().is_none());
}

#[test]
fn stabilizer_flushes_early_outliers() {
    // octave errors while the window is still filling
    let mut s = stabilizer(5, 0.7);
    s.ingest(880.0, 1.0);
    s.ingest(110.0, 1.0);
    let mut out = 0.0;
    for _ in 0..5 {
        out = s.ingest(440.0, 1.0).frequency();
    }
    assert_abs_diff_eq!(out, 440.0);
}

#[test]
fn stabilizer_low_pitch_decays_before_silence() {
    let mut s = stabilizer(5, 0.7);
    s.ingest(35.0, 1.0);
    let first = s.ingest(35.0, 0.0);
    assert!(!first.is_silent());
    assert_abs_diff_eq!(first.frequency(), 28.0, epsilon = 1e-4);
    assert!(s.ingest(35.0, 0.0).is_silent());
}

#[test]
fn stabilizer_stop_start_cycle() {
    let mut s = stabilizer(3, 0.9);
    s.start();
    assert_eq!(s.state(), StreamState::Active);
    s.ingest(300.0, 1.0);
    s.stop();
    assert_eq!(s.state(), StreamState::Idle);
    let out = s.ingest(500.0, 1.0);
    assert_abs_diff_eq!(out.frequency(), 500.0);
}

#[test]
fn stabilizer_rejects_bad_config() {
    for config in [
        StabilizerConfig::new().with_median_window(0),
        StabilizerConfig::new().with_smoothing(1.0),
        StabilizerConfig::new().with_amplitude_threshold(-1.0),
    ] {
        assert!(PitchStabilizer::new(config).is_err());
    }
}
