//! Clefs, staff lines and ledger lines.
//!
//! Staff positions count diatonic steps from the clef's middle line: 0 is the
//! middle line, negative values are higher on the page, and the five lines
//! sit at -4, -2, 0, 2 and 4. Anything beyond ±4 needs ledger lines.

use std::fmt;
use std::str::FromStr;

use crate::convert::{Letter, NoteName};
use crate::key::KeySignature;
use crate::{Error, Result};

/// Distance from the middle line to either outer staff line.
pub const STAFF_HALF_HEIGHT: f32 = 4.0;

/// Distance between consecutive ledger lines.
pub const LEDGER_SPACING: f32 = 2.0;

/// Upper bound on ledger lines for one note. Every parseable note name in
/// every clef needs fewer; larger counts are clamped.
pub const MAX_LEDGER_LINES: u32 = 128;

/// A clef, identified by the note that sits on the middle staff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Clef {
    #[default]
    Treble,
    Bass,
    Alto,
    Tenor,
}

impl Clef {
    pub const ALL: [Clef; 4] = [Clef::Treble, Clef::Bass, Clef::Alto, Clef::Tenor];

    /// Note on the middle line.
    pub const fn middle_line_note(self) -> NoteName {
        match self {
            Clef::Treble => NoteName::natural(Letter::B, 4),
            Clef::Bass => NoteName::natural(Letter::D, 3),
            Clef::Alto => NoteName::natural(Letter::C, 4),
            Clef::Tenor => NoteName::natural(Letter::A, 3),
        }
    }

    /// Pitch number of the middle line.
    pub const fn middle_line_pitch_number(self) -> i32 {
        match self {
            Clef::Treble => 71,
            Clef::Bass => 50,
            Clef::Alto => 60,
            Clef::Tenor => 57,
        }
    }

    /// Pitch numbers of the five staff lines, bottom to top, with the key's
    /// accidentals applied (treble in D major has F#5 on the top line).
    pub fn staff_line_pitches(self, key: &KeySignature) -> [i32; 5] {
        let middle = self.middle_line_note().diatonic_number();
        std::array::from_fn(|i| {
            let step = middle - 4 + 2 * i as i32;
            let letter = Letter::from_diatonic_index(step);
            NoteName::from_diatonic_number(step, key.accidental_for(letter)).pitch_number()
        })
    }

    fn name(self) -> &'static str {
        match self {
            Clef::Treble => "treble",
            Clef::Bass => "bass",
            Clef::Alto => "alto",
            Clef::Tenor => "tenor",
        }
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Clef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "treble" | "g" | "violin" => Ok(Clef::Treble),
            "bass" | "f" => Ok(Clef::Bass),
            "alto" | "c" | "viola" => Ok(Clef::Alto),
            "tenor" => Ok(Clef::Tenor),
            other => Err(Error::parameter(
                "clef",
                other,
                "expected treble, bass, alto or tenor",
            )),
        }
    }
}

/// Number of ledger lines needed at `staff_position`.
///
/// Zero while `|staff_position| <= 4`, then one more every two steps:
/// `ceil((|staff_position| - 4) / 2)`, capped at [`MAX_LEDGER_LINES`].
/// Non-finite positions need none.
///
/// # Example
/// ```
/// use staffline::clef::ledger_line_count;
///
/// assert_eq!(ledger_line_count(4.0), 0);
/// assert_eq!(ledger_line_count(5.0), 1);
/// assert_eq!(ledger_line_count(-7.0), 2);
/// ```
pub fn ledger_line_count(staff_position: f32) -> u32 {
    if !staff_position.is_finite() {
        return 0;
    }
    let beyond = staff_position.abs() - STAFF_HALF_HEIGHT;
    if beyond <= 0.0 {
        return 0;
    }
    let count = (beyond / LEDGER_SPACING).ceil();
    if count >= MAX_LEDGER_LINES as f32 {
        MAX_LEDGER_LINES
    } else {
        count as u32
    }
}

/// Ledger-line positions for `staff_position`, from the staff edge outward.
///
/// Always returns exactly [`ledger_line_count`] entries, on the same side of
/// the staff as the note.
pub fn ledger_line_positions(staff_position: f32) -> Vec<f32> {
    let sign = staff_position.signum();
    (1..=ledger_line_count(staff_position))
        .map(|i| sign * (STAFF_HALF_HEIGHT + LEDGER_SPACING * i as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_lines() {
        for clef in Clef::ALL {
            assert_eq!(
                clef.middle_line_note().pitch_number(),
                clef.middle_line_pitch_number()
            );
        }
    }

    #[test]
    fn test_staff_lines_c_major() {
        let key = KeySignature::default();
        // E4 G4 B4 D5 F5
        assert_eq!(Clef::Treble.staff_line_pitches(&key), [64, 67, 71, 74, 77]);
        // G2 B2 D3 F3 A3
        assert_eq!(Clef::Bass.staff_line_pitches(&key), [43, 47, 50, 53, 57]);
        // F3 A3 C4 E4 G4
        assert_eq!(Clef::Alto.staff_line_pitches(&key), [53, 57, 60, 64, 67]);
        // D3 F3 A3 C4 E4
        assert_eq!(Clef::Tenor.staff_line_pitches(&key), [50, 53, 57, 60, 64]);
    }

    #[test]
    fn test_staff_lines_follow_key() {
        let d_major = KeySignature::parse("D").unwrap();
        assert_eq!(Clef::Treble.staff_line_pitches(&d_major), [64, 67, 71, 74, 78]);
        let bb_major = KeySignature::parse("Bb").unwrap();
        assert_eq!(Clef::Treble.staff_line_pitches(&bb_major), [63, 67, 70, 74, 77]);
    }

    #[test]
    fn test_ledger_counts() {
        assert_eq!(ledger_line_count(0.0), 0);
        assert_eq!(ledger_line_count(4.0), 0);
        assert_eq!(ledger_line_count(5.0), 1);
        assert_eq!(ledger_line_count(6.0), 1);
        assert_eq!(ledger_line_count(7.0), 2);
        assert_eq!(ledger_line_count(-4.0), 0);
        assert_eq!(ledger_line_count(-5.0), 1);
        assert_eq!(ledger_line_count(-6.0), 1);
        assert_eq!(ledger_line_count(-7.0), 2);
        assert_eq!(ledger_line_count(f32::NAN), 0);
    }

    #[test]
    fn test_ledger_extremes_are_bounded() {
        assert_eq!(ledger_line_count(f32::INFINITY), 0);
        assert_eq!(ledger_line_count(f32::NEG_INFINITY), 0);
        assert!(ledger_line_positions(f32::INFINITY).is_empty());
        assert_eq!(ledger_line_count(1e12), MAX_LEDGER_LINES);
        assert_eq!(ledger_line_count(-1e12), MAX_LEDGER_LINES);
        let far = ledger_line_positions(1e12);
        assert_eq!(far.len(), MAX_LEDGER_LINES as usize);
        assert_eq!(far[0], 6.0);
        // just under the cap is exact
        assert_eq!(ledger_line_count(4.0 + 2.0 * 127.0), 127);
    }

    #[test]
    fn test_ledger_positions() {
        assert!(ledger_line_positions(3.0).is_empty());
        assert_eq!(ledger_line_positions(6.0), vec![6.0]);
        assert_eq!(ledger_line_positions(8.0), vec![6.0, 8.0]);
        assert_eq!(ledger_line_positions(-8.0), vec![-6.0, -8.0]);
        assert_eq!(ledger_line_positions(-7.0).len(), 2);
    }

    #[test]
    fn test_parse_clef() {
        assert_eq!("Treble".parse::<Clef>().unwrap(), Clef::Treble);
        assert_eq!("bass".parse::<Clef>().unwrap(), Clef::Bass);
        assert!("soprano".parse::<Clef>().is_err());
        assert_eq!(Clef::Tenor.to_string(), "tenor");
    }
}
