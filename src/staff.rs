//! Mapping pitches and note names to staff positions.
//!
//! Placement is table driven. Every pitch class is first spelled with a
//! letter (canonically, or through the key), and the letter decides the line
//! or space. Sharps and flats therefore share their natural's position, and
//! the distance between two adjacent letters is always exactly one step.
//! A straight semitone-to-position ratio would put E and F half a step apart
//! and drift off the lines, so it is never used for named notes.

use crate::clef::{self, Clef};
use crate::context::MusicContext;
use crate::convert::{self, Accidental, NoteName};
use crate::key::KeySignature;

/// Diatonic step above C for each pitch class under sharp spelling.
const SHARP_STEPS: [i32; 12] = [0, 0, 1, 1, 2, 3, 3, 4, 4, 5, 5, 6];

/// Result of placing a live frequency.
///
/// `Silent` means nothing was detected; it is not the same thing as a pitch
/// that happens to sit on the middle line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaffReading {
    Silent,
    Position(f32),
}

impl StaffReading {
    /// The staff position, or the middle line (`0.0`) when silent.
    pub fn value(&self) -> f32 {
        match self {
            StaffReading::Silent => 0.0,
            StaffReading::Position(p) => *p,
        }
    }

    pub fn position(&self) -> Option<f32> {
        match self {
            StaffReading::Silent => None,
            StaffReading::Position(p) => Some(*p),
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, StaffReading::Silent)
    }
}

/// Accidental glyph to draw next to a note head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayAccidental {
    None,
    Sharp,
    Flat,
    Natural,
}

/// Staff position of an integer pitch number under canonical sharp spelling.
///
/// # Example
/// ```
/// use staffline::staff::pitch_number_to_staff_position;
/// use staffline::clef::Clef;
///
/// assert_eq!(pitch_number_to_staff_position(71, Clef::Treble), 0.0); // B4
/// assert_eq!(pitch_number_to_staff_position(67, Clef::Treble), 2.0); // G4
/// assert_eq!(pitch_number_to_staff_position(60, Clef::Treble), 6.0); // C4
/// ```
pub fn pitch_number_to_staff_position(pitch: i32, clef: Clef) -> f32 {
    let step = 7 * (pitch.div_euclid(12) - 1) + SHARP_STEPS[pitch.rem_euclid(12) as usize];
    -((step - clef.middle_line_note().diatonic_number()) as f32)
}

/// Staff position of a spelled note under `context`'s clef.
///
/// The note's own letter decides the line: `Db4` sits on the D line. This is
/// not the same as going through the pitch number
/// (`pitch_number_to_staff_position(name.pitch_number(), clef)`), which would
/// respell pitch 61 as `C#4` and put it on the C line. The two routes agree
/// whenever the name is spelled the way the key (or, for the free function,
/// sharp-preferring spelling) would spell it.
///
/// # Example
/// ```
/// use staffline::clef::Clef;
/// use staffline::context::MusicContext;
/// use staffline::convert::NoteName;
/// use staffline::staff::{note_name_to_staff_position, pitch_number_to_staff_position};
///
/// let ctx = MusicContext::default();
/// let db4: NoteName = "Db4".parse().unwrap();
/// assert_eq!(note_name_to_staff_position(&db4, &ctx), 5.0); // D line
/// assert_eq!(pitch_number_to_staff_position(61, Clef::Treble), 6.0); // C#4
/// ```
pub fn note_name_to_staff_position(name: &NoteName, context: &MusicContext) -> f32 {
    StaffPositionMapper::new(context).note_position(name)
}

/// Staff position of a live frequency, rounded to the nearest semitone and
/// spelled for `context`'s key.
///
/// Non-positive or non-finite input yields [`StaffReading::Silent`].
pub fn frequency_to_staff_position(freq: f32, context: &MusicContext) -> StaffReading {
    StaffPositionMapper::new(context).frequency_position(freq)
}

/// Accidental to draw for `name`.
///
/// This only echoes the note's stored spelling. It does not work out which
/// accidentals the key signature already implies, so an `F#` in G major still
/// reports `Sharp`.
pub fn accidental_for_display(name: &NoteName, _key: &KeySignature) -> DisplayAccidental {
    match name.accidental {
        None => DisplayAccidental::None,
        Some(Accidental::Sharp) => DisplayAccidental::Sharp,
        Some(Accidental::Flat) => DisplayAccidental::Flat,
        Some(Accidental::Natural) => DisplayAccidental::Natural,
    }
}

/// Everything a renderer needs to draw one note head.
#[derive(Debug, Clone, PartialEq)]
pub struct NotePlacement {
    pub name: NoteName,
    pub staff_position: f32,
    pub ledger_lines: Vec<f32>,
    pub accidental: DisplayAccidental,
}

/// Key- and clef-aware placement table built from a [`MusicContext`].
#[derive(Debug, Clone)]
pub struct StaffPositionMapper {
    clef: Clef,
    key: KeySignature,
    reference_hz: f32,
    middle_step: i32,
    /// Diatonic step of each pitch class relative to C of the pitch's own
    /// octave. Key spellings like Cb or B# push this to 7 or -1.
    steps: [i32; 12],
}

impl StaffPositionMapper {
    pub fn new(context: &MusicContext) -> Self {
        let key = *context.key();
        let steps = std::array::from_fn(|pc| {
            let pitch = 60 + pc as i32;
            key.spell(pitch).diatonic_number() - 7 * 4
        });
        Self {
            clef: context.clef(),
            key,
            reference_hz: context.reference_hz(),
            middle_step: context.clef().middle_line_note().diatonic_number(),
            steps,
        }
    }

    pub fn clef(&self) -> Clef {
        self.clef
    }

    pub fn key(&self) -> &KeySignature {
        &self.key
    }

    pub fn reference_hz(&self) -> f32 {
        self.reference_hz
    }

    /// Key spelling of `pitch`.
    pub fn spell(&self, pitch: i32) -> NoteName {
        self.key.spell(pitch)
    }

    /// Staff position of an integer pitch, spelled for the key.
    pub fn pitch_position(&self, pitch: i32) -> f32 {
        let step = 7 * (pitch.div_euclid(12) - 1) + self.steps[pitch.rem_euclid(12) as usize];
        -((step - self.middle_step) as f32)
    }

    /// Staff position of a spelled note.
    pub fn note_position(&self, name: &NoteName) -> f32 {
        -((name.diatonic_number() - self.middle_step) as f32)
    }

    /// Staff position of a frequency, rounded to the nearest semitone.
    pub fn frequency_position(&self, freq: f32) -> StaffReading {
        match convert::nearest_pitch_number(freq, self.reference_hz) {
            Ok(pitch) => StaffReading::Position(self.pitch_position(pitch)),
            Err(_) => StaffReading::Silent,
        }
    }

    pub fn accidental_for_display(&self, name: &NoteName) -> DisplayAccidental {
        accidental_for_display(name, &self.key)
    }

    pub fn ledger_line_count(&self, name: &NoteName) -> u32 {
        clef::ledger_line_count(self.note_position(name))
    }

    pub fn ledger_line_positions(&self, name: &NoteName) -> Vec<f32> {
        clef::ledger_line_positions(self.note_position(name))
    }

    /// Position, ledger lines and accidental for one note.
    pub fn place(&self, name: &NoteName) -> NotePlacement {
        let staff_position = self.note_position(name);
        NotePlacement {
            name: *name,
            staff_position,
            ledger_lines: clef::ledger_line_positions(staff_position),
            accidental: self.accidental_for_display(name),
        }
    }
}
