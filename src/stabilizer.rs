//! Streaming stabilization of raw pitch-detector output.
//!
//! Raw `(frequency, amplitude)` pairs from a pitch detector jitter and drop
//! out. [`PitchStabilizer`] runs each voiced sample through a sliding median
//! (rejects single-sample outliers such as octave errors) and then an
//! exponential smoother. Quiet samples do not cut the pitch off at once: the
//! smoothed frequency decays until it falls below a floor, then the output
//! turns [`PitchReading::Silent`].
//!
//! While the window warms up (until it has filled and turned over once) the
//! median passes straight through the smoother. Outliers that arrive before
//! the window fills are therefore gone as soon as the window holds only the
//! new pitch, instead of lingering in the exponential stage.

use log::{debug, trace};

use crate::convert::{self, NoteName, A4_HZ};
use crate::utils::{median_in_place, RingBuffer};
use crate::{Error, Result};

/// Largest supported median window.
pub const MAX_MEDIAN_WINDOW: usize = 15;

/// Largest supported smoothing factor.
pub const MAX_SMOOTHING: f32 = 0.95;

/// Configuration for [`PitchStabilizer`].
///
/// # Example
/// ```
/// use staffline::stabilizer::StabilizerConfig;
///
/// let config = StabilizerConfig::new()
///     .with_median_window(3)
///     .with_smoothing(0.7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StabilizerConfig {
    /// Samples in the median window, 1-15. Odd sizes avoid ties.
    pub median_window: usize,
    /// Weight of the previous smoothed value, 0.0-0.95.
    pub smoothing: f32,
    /// Samples quieter than this count as silence. Must be > 0.
    pub amplitude_threshold: f32,
    /// Multiplier applied to the smoothed frequency per quiet sample, in (0, 1).
    pub silence_decay: f32,
    /// Once decay takes the frequency below this (Hz), the output is silent.
    pub silence_floor_hz: f32,
    /// Tuning reference used for the derived note name.
    pub reference_hz: f32,
}

impl StabilizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_median_window(mut self, median_window: usize) -> Self {
        self.median_window = median_window;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_amplitude_threshold(mut self, amplitude_threshold: f32) -> Self {
        self.amplitude_threshold = amplitude_threshold;
        self
    }

    pub fn with_silence_decay(mut self, silence_decay: f32) -> Self {
        self.silence_decay = silence_decay;
        self
    }

    pub fn with_silence_floor_hz(mut self, silence_floor_hz: f32) -> Self {
        self.silence_floor_hz = silence_floor_hz;
        self
    }

    pub fn with_reference_hz(mut self, reference_hz: f32) -> Self {
        self.reference_hz = reference_hz;
        self
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        if self.median_window == 0 || self.median_window > MAX_MEDIAN_WINDOW {
            return Err(Error::parameter(
                "median_window",
                self.median_window,
                "must be in 1..=15",
            ));
        }
        if !(0.0..=MAX_SMOOTHING).contains(&self.smoothing) {
            return Err(Error::parameter(
                "smoothing",
                self.smoothing,
                "must be in [0.0, 0.95]",
            ));
        }
        if !is_positive_finite(self.amplitude_threshold) {
            return Err(Error::parameter(
                "amplitude_threshold",
                self.amplitude_threshold,
                "must be a finite value > 0",
            ));
        }
        if !(self.silence_decay > 0.0 && self.silence_decay < 1.0) {
            return Err(Error::parameter(
                "silence_decay",
                self.silence_decay,
                "must be in (0.0, 1.0)",
            ));
        }
        if !is_positive_finite(self.silence_floor_hz) {
            return Err(Error::parameter(
                "silence_floor_hz",
                self.silence_floor_hz,
                "must be a finite value > 0",
            ));
        }
        if !is_positive_finite(self.reference_hz) {
            return Err(Error::parameter(
                "reference_hz",
                self.reference_hz,
                "must be a finite value > 0",
            ));
        }
        Ok(())
    }
}

fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            median_window: 5,
            smoothing: 0.7,
            amplitude_threshold: 0.01,
            silence_decay: 0.8,
            silence_floor_hz: 30.0,
            reference_hz: A4_HZ,
        }
    }
}

/// Lifecycle of a stabilizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No samples since construction or the last `stop`; buffers empty.
    Idle,
    /// Receiving samples.
    Active,
}

/// Stabilized pitch, or the absence of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PitchReading {
    Silent,
    Pitched {
        frequency: f32,
        pitch_number: f32,
        note: NoteName,
    },
}

/// One output of [`PitchStabilizer::ingest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilizedSample {
    /// Raw amplitude of the input sample.
    pub amplitude: f32,
    pub reading: PitchReading,
}

impl StabilizedSample {
    fn silent(amplitude: f32) -> Self {
        Self {
            amplitude,
            reading: PitchReading::Silent,
        }
    }

    /// Stabilized frequency, or `0.0` when silent.
    pub fn frequency(&self) -> f32 {
        match self.reading {
            PitchReading::Silent => 0.0,
            PitchReading::Pitched { frequency, .. } => frequency,
        }
    }

    /// Nearest note, if any pitch is present.
    pub fn note(&self) -> Option<NoteName> {
        match self.reading {
            PitchReading::Silent => None,
            PitchReading::Pitched { note, .. } => Some(note),
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self.reading, PitchReading::Silent)
    }
}

/// Per-stream filter memory.
#[derive(Debug, Clone)]
struct FilterState {
    window: RingBuffer<f32>,
    /// `None` until the first voiced sample, and again after silence.
    smoothed: Option<f32>,
    last_median: Option<f32>,
    /// Voiced samples since the last clear, saturating at the warm-up length.
    voiced: usize,
    /// Consecutive quiet samples since the last voiced one.
    quiet_run: u32,
}

impl FilterState {
    fn new(window: usize) -> Self {
        Self {
            window: RingBuffer::new(window),
            smoothed: None,
            last_median: None,
            voiced: 0,
            quiet_run: 0,
        }
    }

    fn clear(&mut self) {
        self.window.clear();
        self.smoothed = None;
        self.last_median = None;
        self.voiced = 0;
        self.quiet_run = 0;
    }

    /// Samples for which the median bypasses the smoother: one full window
    /// plus enough to replace every sample that filled it.
    fn warm_up(&self) -> usize {
        2 * self.window.capacity() - 1
    }

    /// Median of the window without allocating.
    fn median(&self) -> Option<f32> {
        let mut scratch = [0.0f32; MAX_MEDIAN_WINDOW];
        let mut len = 0;
        for (slot, &value) in scratch.iter_mut().zip(self.window.iter()) {
            *slot = value;
            len += 1;
        }
        median_in_place(&mut scratch[..len])
    }
}

/// Median + exponential smoother with silence gating.
///
/// One instance per stream. Calls must be serialized by the caller.
///
/// # Example
/// ```
/// use staffline::stabilizer::{PitchStabilizer, StabilizerConfig};
///
/// let config = StabilizerConfig::new().with_median_window(3).with_smoothing(0.7);
/// let mut stabilizer = PitchStabilizer::new(config).unwrap();
///
/// let mut last = 0.0;
/// for f in [440.0, 440.0, 441.0, 439.0, 440.0] {
///     last = stabilizer.ingest(f, 0.5).frequency();
/// }
/// assert!((last - 440.0).abs() < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct PitchStabilizer {
    config: StabilizerConfig,
    state: StreamState,
    filter: FilterState,
}

impl PitchStabilizer {
    /// # Errors
    /// Returns `Error::InvalidParameter` if `config` fails validation.
    pub fn new(config: StabilizerConfig) -> Result<Self> {
        config.validate()?;
        let filter = FilterState::new(config.median_window);
        Ok(Self {
            config,
            state: StreamState::Idle,
            filter,
        })
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Current smoothed frequency, if the stream is pitched.
    pub fn smoothed_frequency(&self) -> Option<f32> {
        self.filter.smoothed
    }

    /// Median computed for the most recent voiced sample.
    pub fn last_median(&self) -> Option<f32> {
        self.filter.last_median
    }

    /// Begin a stream with empty buffers.
    pub fn start(&mut self) {
        self.filter.clear();
        self.state = StreamState::Active;
        debug!("pitch stabilizer started (window {})", self.config.median_window);
    }

    /// End the stream and discard all history.
    pub fn stop(&mut self) {
        self.filter.clear();
        if self.state == StreamState::Active {
            debug!("pitch stabilizer stopped");
        }
        self.state = StreamState::Idle;
    }

    /// Feed one raw sample. Starts the stream if it is idle.
    ///
    /// Quiet, non-positive or non-finite samples never fail; they decay the
    /// current pitch toward [`PitchReading::Silent`].
    pub fn ingest(&mut self, frequency: f32, amplitude: f32) -> StabilizedSample {
        if self.state == StreamState::Idle {
            self.start();
        }

        let voiced = amplitude.is_finite()
            && amplitude >= self.config.amplitude_threshold
            && frequency.is_finite()
            && frequency > 0.0;
        if !voiced {
            return self.decay(amplitude);
        }

        self.filter.window.push(frequency);
        self.filter.quiet_run = 0;
        let med = self.filter.median().unwrap_or(frequency);
        self.filter.last_median = Some(med);

        let warming_up = self.filter.voiced < self.filter.warm_up();
        if warming_up {
            self.filter.voiced += 1;
        }
        let alpha = self.config.smoothing;
        let smoothed = match self.filter.smoothed {
            Some(prev) if !warming_up => prev * alpha + med * (1.0 - alpha),
            _ => med,
        };
        self.filter.smoothed = Some(smoothed);
        trace!("raw {frequency:.2} Hz, median {med:.2} Hz, smoothed {smoothed:.2} Hz");

        self.pitched(smoothed, amplitude)
    }

    fn decay(&mut self, amplitude: f32) -> StabilizedSample {
        let Some(prev) = self.filter.smoothed else {
            return StabilizedSample::silent(amplitude);
        };

        self.filter.quiet_run = self.filter.quiet_run.saturating_add(1);
        let next = prev * self.config.silence_decay;
        // The first quiet sample always decays, even for pitches near the floor.
        if self.filter.quiet_run > 1 && next < self.config.silence_floor_hz {
            debug!("pitch decayed below {} Hz, silent", self.config.silence_floor_hz);
            self.filter.clear();
            return StabilizedSample::silent(amplitude);
        }

        self.filter.smoothed = Some(next);
        trace!("quiet sample, decayed to {next:.2} Hz");
        self.pitched(next, amplitude)
    }

    fn pitched(&self, frequency: f32, amplitude: f32) -> StabilizedSample {
        match convert::frequency_to_pitch_number(frequency, self.config.reference_hz) {
            Ok(pitch_number) => StabilizedSample {
                amplitude,
                reading: PitchReading::Pitched {
                    frequency,
                    pitch_number,
                    note: convert::pitch_number_to_note_name(pitch_number),
                },
            },
            Err(_) => StabilizedSample::silent(amplitude),
        }
    }
}
