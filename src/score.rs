//! Static placement of scored notes.

use log::debug;

use crate::context::{MusicContext, Note};
use crate::convert::DurationClass;
use crate::staff::{NotePlacement, StaffPositionMapper};
use crate::Result;

/// A note ready to draw: where it sits and when it sounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNote {
    pub note: Note,
    pub placement: NotePlacement,
    /// Start time relative to the first note.
    pub onset_seconds: f32,
    pub duration_seconds: f32,
}

/// An ordered run of notes read under one [`MusicContext`].
///
/// # Example
/// ```
/// use staffline::context::MusicContext;
/// use staffline::convert::DurationClass;
/// use staffline::score::Score;
///
/// let score = Score::parse(
///     MusicContext::default(),
///     &[("E4", DurationClass::Quarter), ("G4", DurationClass::Half)],
/// )
/// .unwrap();
///
/// let placed = score.place();
/// assert_eq!(placed[1].placement.staff_position, 2.0);
/// assert_eq!(placed[1].onset_seconds, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    context: MusicContext,
    notes: Vec<Note>,
}

impl Score {
    pub fn new(context: MusicContext) -> Self {
        Self {
            context,
            notes: Vec::new(),
        }
    }

    /// Build a score from `(name, duration)` pairs.
    ///
    /// # Errors
    /// Fails on the first unparseable note name.
    pub fn parse(context: MusicContext, entries: &[(&str, DurationClass)]) -> Result<Self> {
        let label = context.key().label();
        let notes = entries
            .iter()
            .map(|&(name, duration)| {
                Ok(Note::parse(name, duration)?
                    .with_reference_hz(context.reference_hz())?
                    .with_key_label(label.as_str()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { context, notes })
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn context(&self) -> &MusicContext {
        &self.context
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total length in seconds at the context's tempo.
    pub fn total_seconds(&self) -> f32 {
        self.notes
            .iter()
            .map(|n| n.duration_seconds(&self.context))
            .sum()
    }

    /// Place every note on the staff, in order.
    pub fn place(&self) -> Vec<PlacedNote> {
        let mapper = StaffPositionMapper::new(&self.context);
        let mut onset = 0.0;
        let placed: Vec<PlacedNote> = self
            .notes
            .iter()
            .map(|note| {
                let duration_seconds = note.duration_seconds(&self.context);
                let placed = PlacedNote {
                    note: note.clone(),
                    placement: mapper.place(&note.name()),
                    onset_seconds: onset,
                    duration_seconds,
                };
                onset += duration_seconds;
                placed
            })
            .collect();
        debug!(
            "placed {} notes in {} {} clef",
            placed.len(),
            self.context.key(),
            self.context.clef()
        );
        placed
    }
}
