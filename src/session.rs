//! Live tracking pipeline for one input stream.
//!
//! A [`TrackingSession`] wires the pieces together in the order a tuner
//! display needs them: raw detector output goes through the
//! [`PitchStabilizer`], the stabilized frequency is placed by the
//! [`CursorInterpolator`], and the resulting Y is recorded in the
//! [`TrailHistory`]. Each session owns its own state; run one per stream.

use log::debug;

use crate::context::MusicContext;
use crate::cursor::{CursorInterpolator, StaffGeometry};
use crate::stabilizer::{
    PitchReading, PitchStabilizer, StabilizedSample, StabilizerConfig, StreamState,
};
use crate::staff::StaffPositionMapper;
use crate::trail::{TrailConfig, TrailHistory, TrailPoint};
use crate::Result;

/// Output of one [`TrackingSession::process`] tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Stabilized sample, its note spelled for the session's key.
    pub sample: StabilizedSample,
    /// Cursor Y, `None` while silent.
    pub cursor_y: Option<f32>,
    /// Trail after this tick, oldest first.
    pub trail: Vec<TrailPoint>,
}

/// Stabilizer, cursor and trail for a single stream.
///
/// # Example
/// ```
/// use staffline::context::MusicContext;
/// use staffline::cursor::LinearStaffGeometry;
/// use staffline::session::TrackingSession;
/// use staffline::stabilizer::StabilizerConfig;
/// use staffline::trail::TrailConfig;
///
/// let mut session = TrackingSession::new(
///     MusicContext::default(),
///     StabilizerConfig::default(),
///     TrailConfig::default(),
///     LinearStaffGeometry::new(100.0, 10.0),
/// )
/// .unwrap();
///
/// let frame = session.process(392.0, 0.5, 1.0);
/// assert_eq!(frame.sample.note().unwrap().to_string(), "G4");
/// assert!((frame.cursor_y.unwrap() - 110.0).abs() < 1e-3);
/// assert_eq!(frame.trail.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TrackingSession<G> {
    context: MusicContext,
    mapper: StaffPositionMapper,
    stabilizer: PitchStabilizer,
    cursor: CursorInterpolator,
    trail: TrailHistory,
    geometry: G,
}

impl<G: StaffGeometry> TrackingSession<G> {
    /// The stabilizer is tuned to `context`'s reference frequency, whatever
    /// `stabilizer` says.
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` if either config fails validation.
    pub fn new(
        context: MusicContext,
        stabilizer: StabilizerConfig,
        trail: TrailConfig,
        geometry: G,
    ) -> Result<Self> {
        let stabilizer =
            PitchStabilizer::new(stabilizer.with_reference_hz(context.reference_hz()))?;
        let trail = TrailHistory::new(trail)?;
        Ok(Self {
            mapper: StaffPositionMapper::new(&context),
            context,
            stabilizer,
            cursor: CursorInterpolator::new(),
            trail,
            geometry,
        })
    }

    pub fn with_cursor(self, cursor: CursorInterpolator) -> Self {
        Self { cursor, ..self }
    }

    pub fn context(&self) -> &MusicContext {
        &self.context
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn stabilizer(&self) -> &PitchStabilizer {
        &self.stabilizer
    }

    pub fn trail(&self) -> &TrailHistory {
        &self.trail
    }

    pub fn state(&self) -> StreamState {
        self.stabilizer.state()
    }

    /// Begin a fresh stream.
    pub fn start(&mut self) {
        self.trail.reset();
        self.stabilizer.start();
    }

    /// End the stream. Nothing from this stream survives into the next one.
    pub fn stop(&mut self) {
        self.stabilizer.stop();
        self.trail.reset();
        debug!("tracking session stopped");
    }

    /// Run one raw detector sample through the pipeline.
    ///
    /// `scroll_delta` is how far the page moved since the previous tick.
    /// Silent ticks scroll the trail without adding to it.
    pub fn process(&mut self, frequency: f32, amplitude: f32, scroll_delta: f32) -> Frame {
        let mut sample = self.stabilizer.ingest(frequency, amplitude);
        let cursor_y = match &mut sample.reading {
            PitchReading::Pitched {
                frequency,
                pitch_number,
                note,
            } => {
                // Same spelling the cursor and static placement use.
                *note = self.mapper.spell(pitch_number.round() as i32);
                self.cursor
                    .locate(*frequency, &self.mapper, &self.geometry)
                    .map(|placement| placement.y)
            }
            PitchReading::Silent => None,
        };

        let trail = match cursor_y {
            Some(y) => self.trail.update(scroll_delta, y),
            None => self.trail.scroll(scroll_delta),
        }
        .to_vec();

        Frame {
            sample,
            cursor_y,
            trail,
        }
    }
}
