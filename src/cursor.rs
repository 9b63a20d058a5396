//! Smooth screen placement of a live pitch cursor.
//!
//! A detected pitch rarely lands exactly on a note. Rather than snapping the
//! cursor to the nearest line or space, [`CursorInterpolator`] anchors it at
//! the nearest note and slides it toward the neighbouring line or space in
//! proportion to how far the frequency has moved past the current one.

use log::trace;

use crate::context::MusicContext;
use crate::convert::{self, NoteName};
use crate::staff::StaffPositionMapper;
use crate::{Error, Result};

/// Frequencies closer than this to an exact note snap onto it.
pub const DEFAULT_SNAP_TOLERANCE_HZ: f32 = 0.5;

/// Neighbour search stops after one octave.
const MAX_NEIGHBOR_SEARCH: i32 = 12;

/// Converts staff positions to screen Y. Owned by the renderer.
pub trait StaffGeometry {
    fn y_for_position(&self, staff_position: f32) -> f32;
}

impl<F> StaffGeometry for F
where
    F: Fn(f32) -> f32,
{
    fn y_for_position(&self, staff_position: f32) -> f32 {
        self(staff_position)
    }
}

/// Evenly spaced staff: `y = middle_line_y + staff_position * line_spacing / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearStaffGeometry {
    /// Screen Y of the middle line.
    pub middle_line_y: f32,
    /// Pixels between two adjacent staff lines.
    pub line_spacing: f32,
}

impl LinearStaffGeometry {
    pub fn new(middle_line_y: f32, line_spacing: f32) -> Self {
        Self {
            middle_line_y,
            line_spacing,
        }
    }
}

impl StaffGeometry for LinearStaffGeometry {
    fn y_for_position(&self, staff_position: f32) -> f32 {
        self.middle_line_y + staff_position * self.line_spacing / 2.0
    }
}

/// Where the cursor ended up and why.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorPlacement {
    /// Interpolated screen Y.
    pub y: f32,
    /// Screen Y of the nearest note.
    pub anchor_y: f32,
    /// Screen Y of the neighbour the cursor leans toward (equals `anchor_y`
    /// when snapped).
    pub next_y: f32,
    /// Fraction of the way from anchor to neighbour, in `[0, 1]`.
    pub ratio: f32,
    /// Nearest note, spelled for the key.
    pub nearest: NoteName,
    /// Neighbour note, `None` when the cursor snapped.
    pub next: Option<NoteName>,
}

/// Turns a stabilized frequency into a continuously moving screen Y.
///
/// # Example
/// ```
/// use staffline::context::MusicContext;
/// use staffline::cursor::{CursorInterpolator, LinearStaffGeometry};
///
/// let ctx = MusicContext::default();
/// let geometry = LinearStaffGeometry::new(100.0, 10.0);
/// let cursor = CursorInterpolator::new();
///
/// // G4 sits on the second line from the bottom: two steps below the middle
/// let y = cursor.position(392.0, &ctx, &geometry).unwrap();
/// assert!((y - 110.0).abs() < 1e-3);
///
/// // Nothing detected, nothing drawn
/// assert!(cursor.position(0.0, &ctx, &geometry).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorInterpolator {
    snap_tolerance_hz: f32,
}

impl CursorInterpolator {
    pub fn new() -> Self {
        Self {
            snap_tolerance_hz: DEFAULT_SNAP_TOLERANCE_HZ,
        }
    }

    /// # Errors
    /// Returns `Error::InvalidParameter` if `hz` is negative or not finite.
    pub fn with_snap_tolerance_hz(self, hz: f32) -> Result<Self> {
        if !hz.is_finite() || hz < 0.0 {
            return Err(Error::parameter(
                "snap_tolerance_hz",
                hz,
                "must be a finite value >= 0",
            ));
        }
        Ok(Self {
            snap_tolerance_hz: hz,
        })
    }

    pub fn snap_tolerance_hz(&self) -> f32 {
        self.snap_tolerance_hz
    }

    /// Screen Y for `frequency`, or `None` when there is no pitch (`<= 0`).
    pub fn position<G: StaffGeometry + ?Sized>(
        &self,
        frequency: f32,
        context: &MusicContext,
        geometry: &G,
    ) -> Option<f32> {
        let mapper = StaffPositionMapper::new(context);
        self.locate(frequency, &mapper, geometry).map(|p| p.y)
    }

    /// Continuous staff position for `frequency` (geometry-free form).
    pub fn staff_position(&self, frequency: f32, mapper: &StaffPositionMapper) -> Option<f32> {
        self.locate(frequency, mapper, &|p: f32| p).map(|p| p.y)
    }

    /// Full placement for `frequency` against a prepared mapper.
    pub fn locate<G: StaffGeometry + ?Sized>(
        &self,
        frequency: f32,
        mapper: &StaffPositionMapper,
        geometry: &G,
    ) -> Option<CursorPlacement> {
        let reference = mapper.reference_hz();
        let pitch = convert::frequency_to_pitch_number(frequency, reference).ok()?;

        let nearest = pitch.round() as i32;
        let anchor_position = mapper.pitch_position(nearest);
        let anchor_y = geometry.y_for_position(anchor_position);
        let nearest_name = mapper.spell(nearest);

        let true_freq = convert::pitch_number_to_frequency(nearest as f32, reference);
        if (frequency - true_freq).abs() < self.snap_tolerance_hz {
            return Some(CursorPlacement {
                y: anchor_y,
                anchor_y,
                next_y: anchor_y,
                ratio: 0.0,
                nearest: nearest_name,
                next: None,
            });
        }

        let direction = if frequency > true_freq { 1 } else { -1 };

        // First pitch in `direction` that leaves the anchor's line or space.
        let next = (1..=MAX_NEIGHBOR_SEARCH)
            .map(|k| nearest + direction * k)
            .find(|&p| mapper.pitch_position(p) != anchor_position)
            .unwrap_or(nearest + direction);
        // Last pitch still sharing the anchor's position.
        let top = next - direction;

        let freq_top = convert::pitch_number_to_frequency(top as f32, reference);
        let freq_next = convert::pitch_number_to_frequency(next as f32, reference);
        let span = (freq_next - freq_top).abs();
        // Measured past the boundary, so a pitch still inside the shared
        // position (e.g. between C and C#) stays on the anchor.
        let ratio = if span > 0.0 {
            ((frequency - freq_top) * direction as f32 / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let next_y = geometry.y_for_position(mapper.pitch_position(next));
        let y = anchor_y + ratio * (next_y - anchor_y);
        trace!("cursor {frequency:.2} Hz: {nearest_name} -> pitch {next}, ratio {ratio:.3}");

        Some(CursorPlacement {
            y,
            anchor_y,
            next_y,
            ratio,
            nearest: nearest_name,
            next: Some(mapper.spell(next)),
        })
    }
}

impl Default for CursorInterpolator {
    fn default() -> Self {
        Self::new()
    }
}
