//! Key signatures and key-aware spelling.
//!
//! A key is a tonic plus a mode. It decides which letters carry a sharp or
//! flat, and how a bare pitch number is spelled when it has to be written on
//! a staff (which letter, and therefore which line or space, it lands on).

use std::fmt;
use std::str::FromStr;

use crate::convert::{Accidental, Letter, NoteName};
use crate::{Error, Result};

/// Diatonic mode of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
}

impl Mode {
    /// Semitone offsets of the seven degrees from the tonic.
    pub const fn pattern(self) -> [i32; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
            Mode::Dorian => [0, 2, 3, 5, 7, 9, 10],
            Mode::Phrygian => [0, 1, 3, 5, 7, 8, 10],
            Mode::Lydian => [0, 2, 4, 6, 7, 9, 11],
            Mode::Mixolydian => [0, 2, 4, 5, 7, 9, 10],
            Mode::Locrian => [0, 1, 3, 5, 6, 8, 10],
        }
    }

    /// Distance of the mode's tonic from the major tonic sharing its
    /// signature, counted in fifths.
    const fn fifths_from_major(self) -> i32 {
        match self {
            Mode::Lydian => -1,
            Mode::Major => 0,
            Mode::Mixolydian => 1,
            Mode::Dorian => 2,
            Mode::Minor => 3,
            Mode::Phrygian => 4,
            Mode::Locrian => 5,
        }
    }

    fn parse(s: &str) -> Option<Mode> {
        match s.to_lowercase().as_str() {
            "" | "maj" | "major" | "ion" | "ionian" => Some(Mode::Major),
            "m" | "min" | "minor" | "aeo" | "aeolian" => Some(Mode::Minor),
            "dor" | "dorian" => Some(Mode::Dorian),
            "phr" | "phryg" | "phrygian" => Some(Mode::Phrygian),
            "lyd" | "lydian" => Some(Mode::Lydian),
            "mix" | "mixolyd" | "mixolydian" => Some(Mode::Mixolydian),
            "loc" | "locr" | "locrian" => Some(Mode::Locrian),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Locrian => "locrian",
        }
    }
}

/// A key signature: tonic, mode and the per-letter alterations they imply.
///
/// # Example
/// ```
/// use staffline::key::KeySignature;
/// use staffline::convert::Letter;
///
/// let d_major: KeySignature = "D major".parse().unwrap();
/// assert_eq!(d_major.fifths(), 2);
/// assert!(d_major.accidental_for(Letter::F).is_some());
/// assert_eq!(d_major.spell(66).to_string(), "F#4");
///
/// let f_major: KeySignature = "F:maj".parse().unwrap();
/// assert_eq!(f_major.spell(70).to_string(), "Bb4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySignature {
    tonic: Letter,
    tonic_accidental: Option<Accidental>,
    mode: Mode,
    /// Alteration in semitones for each letter, indexed by diatonic index.
    alterations: [i32; 7],
}

impl KeySignature {
    /// Build a key from its tonic and mode.
    ///
    /// # Errors
    /// Returns `Error::UnknownKeySignature` when the scale would need double
    /// sharps or flats (e.g. G# major).
    pub fn new(tonic: Letter, tonic_accidental: Option<Accidental>, mode: Mode) -> Result<Self> {
        let tonic_accidental = tonic_accidental.filter(|a| *a != Accidental::Natural);
        let tonic_pc = tonic.natural_pitch_class() + tonic_accidental.map_or(0, Accidental::semitones);

        let mut alterations = [0; 7];
        for (degree, offset) in mode.pattern().iter().enumerate() {
            let letter = Letter::from_diatonic_index(tonic.diatonic_index() + degree as i32);
            let target = (tonic_pc + offset).rem_euclid(12);
            let mut delta = target - letter.natural_pitch_class();
            if delta > 6 {
                delta -= 12;
            } else if delta < -6 {
                delta += 12;
            }
            if delta.abs() > 1 {
                return Err(Error::UnknownKeySignature {
                    input: format!("{}", KeyLabel(tonic, tonic_accidental, mode)),
                    reason: "scale needs double accidentals",
                });
            }
            alterations[letter.diatonic_index() as usize] = delta;
        }

        Ok(Self {
            tonic,
            tonic_accidental,
            mode,
            alterations,
        })
    }

    /// Build a key from its signature (sharps positive, flats negative) and mode.
    ///
    /// # Errors
    /// Returns `Error::UnknownKeySignature` if `fifths` is outside `-7..=7`.
    pub fn from_fifths(fifths: i32, mode: Mode) -> Result<Self> {
        if !(-7..=7).contains(&fifths) {
            return Err(Error::UnknownKeySignature {
                input: fifths.to_string(),
                reason: "signature must have at most 7 sharps or flats",
            });
        }
        let position = fifths + mode.fifths_from_major();
        let letter = Letter::from_diatonic_index(4 * position);
        let tonic = NoteName::spell_with_letter(7 * position, letter).ok_or_else(|| {
            Error::UnknownKeySignature {
                input: fifths.to_string(),
                reason: "tonic needs a double accidental",
            }
        })?;
        Self::new(tonic.letter, tonic.accidental, mode)
    }

    /// Parse a key label.
    ///
    /// Accepts `"C:maj"`, `"A:min"`, `"D:dor"`, `"G major"`, `"F# minor"`,
    /// a bare tonic (`"Bb"`, major) and the `m` suffix (`"Am"`, `"C#m"`).
    pub fn parse(label: &str) -> Result<Self> {
        let unknown = |reason| Error::UnknownKeySignature {
            input: label.to_string(),
            reason,
        };

        let s = label.trim();
        let mut chars = s.chars();
        let tonic = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| unknown("unknown tonic"))?;

        let mut rest = chars.as_str();
        let tonic_accidental = rest
            .chars()
            .next()
            .and_then(Accidental::from_char)
            .filter(|a| *a != Accidental::Natural);
        if tonic_accidental.is_some() {
            let width = rest.chars().next().map_or(0, char::len_utf8);
            rest = &rest[width..];
        }

        let mode_str = rest.trim_start_matches([':', ' ', '\t']).trim();
        let mode = Mode::parse(mode_str).ok_or_else(|| unknown("unknown mode"))?;

        Self::new(tonic, tonic_accidental, mode).map_err(|_| unknown("scale needs double accidentals"))
    }

    pub fn tonic(&self) -> (Letter, Option<Accidental>) {
        (self.tonic, self.tonic_accidental)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of sharps (positive) or flats (negative) in the signature.
    pub fn fifths(&self) -> i32 {
        self.alterations.iter().sum()
    }

    /// True for flat keys; chromatic pitches are then spelled with flats.
    pub fn prefers_flats(&self) -> bool {
        self.fifths() < 0
    }

    /// Accidental the signature applies to `letter`, if any.
    pub fn accidental_for(&self, letter: Letter) -> Option<Accidental> {
        match self.alterations[letter.diatonic_index() as usize] {
            1 => Some(Accidental::Sharp),
            -1 => Some(Accidental::Flat),
            _ => None,
        }
    }

    /// Pitch class of `letter` inside this key.
    pub fn pitch_class_of(&self, letter: Letter) -> i32 {
        (letter.natural_pitch_class() + self.alterations[letter.diatonic_index() as usize])
            .rem_euclid(12)
    }

    /// The seven scale degrees, tonic first, as (letter, accidental) pairs.
    pub fn scale(&self) -> [(Letter, Option<Accidental>); 7] {
        std::array::from_fn(|degree| {
            let letter = Letter::from_diatonic_index(self.tonic.diatonic_index() + degree as i32);
            (letter, self.accidental_for(letter))
        })
    }

    /// True if `pitch_class` (any integer, reduced mod 12) belongs to the scale.
    pub fn contains(&self, pitch_class: i32) -> bool {
        let pc = pitch_class.rem_euclid(12);
        Letter::ALL.iter().any(|&l| self.pitch_class_of(l) == pc)
    }

    /// Spell a pitch number for this key.
    ///
    /// In-key pitches take the key's own spelling. Other pitches use the
    /// unaltered letter when one matches, otherwise a sharp (sharp and
    /// neutral keys) or a flat (flat keys).
    pub fn spell(&self, pitch: i32) -> NoteName {
        let pc = pitch.rem_euclid(12);

        let in_key = Letter::ALL.iter().find(|&&l| self.pitch_class_of(l) == pc);
        let natural = Letter::ALL.iter().find(|&&l| l.natural_pitch_class() == pc);
        let letter = match (in_key, natural) {
            (Some(&l), _) | (None, Some(&l)) => l,
            (None, None) if self.prefers_flats() => Letter::ALL
                .iter()
                .copied()
                .find(|l| l.natural_pitch_class() == (pc + 1) % 12)
                .unwrap_or(Letter::C),
            (None, None) => Letter::ALL
                .iter()
                .copied()
                .find(|l| l.natural_pitch_class() == (pc + 11) % 12)
                .unwrap_or(Letter::C),
        };

        NoteName::spell_with_letter(pitch, letter).unwrap_or_else(|| NoteName::from_pitch_number(pitch))
    }

    /// Label in `"Tonic mode"` form, e.g. `"Eb major"`.
    pub fn label(&self) -> String {
        KeyLabel(self.tonic, self.tonic_accidental, self.mode).to_string()
    }
}

impl Default for KeySignature {
    fn default() -> Self {
        Self {
            tonic: Letter::C,
            tonic_accidental: None,
            mode: Mode::Major,
            alterations: [0; 7],
        }
    }
}

impl FromStr for KeySignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        KeyLabel(self.tonic, self.tonic_accidental, self.mode).fmt(f)
    }
}

struct KeyLabel(Letter, Option<Accidental>, Mode);

impl fmt::Display for KeyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_char())?;
        if let Some(acc) = self.1 {
            write!(f, "{}", acc.symbol())?;
        }
        write!(f, " {}", self.2.name())
    }
}
