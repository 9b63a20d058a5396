use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A natural note letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Letters in diatonic order starting at C.
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Pitch class (0-11) of the unaltered letter.
    pub const fn natural_pitch_class(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position within the octave counted in letters, C = 0 ... B = 6.
    pub const fn diatonic_index(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Letter for a diatonic index; wraps modulo 7.
    pub fn from_diatonic_index(index: i32) -> Letter {
        Letter::ALL[index.rem_euclid(7) as usize]
    }

    pub(crate) fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub(crate) fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// A written accidental.
///
/// `Natural` is an explicit natural sign; an unmarked note carries no
/// accidental at all (`None` on [`NoteName::accidental`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Sharp,
    Flat,
    Natural,
}

impl Accidental {
    /// Chromatic alteration in semitones.
    pub const fn semitones(self) -> i32 {
        match self {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
        }
    }

    pub(crate) fn from_char(c: char) -> Option<Accidental> {
        match c {
            '#' | '♯' => Some(Accidental::Sharp),
            'b' | '♭' => Some(Accidental::Flat),
            'n' | '♮' => Some(Accidental::Natural),
            _ => None,
        }
    }

    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
            Accidental::Natural => "♮",
        }
    }
}

/// Canonical sharp-preferring spelling of each pitch class.
const SHARP_SPELLING: [(Letter, Option<Accidental>); 12] = [
    (Letter::C, None),
    (Letter::C, Some(Accidental::Sharp)),
    (Letter::D, None),
    (Letter::D, Some(Accidental::Sharp)),
    (Letter::E, None),
    (Letter::F, None),
    (Letter::F, Some(Accidental::Sharp)),
    (Letter::G, None),
    (Letter::G, Some(Accidental::Sharp)),
    (Letter::A, None),
    (Letter::A, Some(Accidental::Sharp)),
    (Letter::B, None),
];

/// Octaves accepted by the parser. Keeps pitch arithmetic far from overflow.
const OCTAVE_RANGE: std::ops::RangeInclusive<i32> = -10..=20;

/// A spelled note: letter, optional accidental and octave (scientific pitch
/// notation, C4 = middle C = pitch 60).
///
/// Name to pitch is exact. Pitch to name is lossy: enharmonic spellings
/// (`C#4`, `Db4`) share one pitch number and the reverse direction always
/// picks the canonical sharp spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteName {
    pub letter: Letter,
    pub accidental: Option<Accidental>,
    pub octave: i32,
}

impl NoteName {
    pub const fn new(letter: Letter, accidental: Option<Accidental>, octave: i32) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// An unmarked note.
    pub const fn natural(letter: Letter, octave: i32) -> Self {
        Self::new(letter, None, octave)
    }

    /// Semitones above C of the same octave. May be -1 (Cb) or 12 (B#).
    pub fn chromatic_index(&self) -> i32 {
        let alteration = self.accidental.map_or(0, Accidental::semitones);
        self.letter.natural_pitch_class() + alteration
    }

    /// `12 * (octave + 1) + chromatic_index`.
    pub fn pitch_number(&self) -> i32 {
        12 * (self.octave + 1) + self.chromatic_index()
    }

    /// Height in letter steps: `7 * octave + letter index`.
    ///
    /// Two names on the same staff line or space share this number regardless
    /// of accidentals.
    pub fn diatonic_number(&self) -> i32 {
        7 * self.octave + self.letter.diatonic_index()
    }

    /// Build the name sitting on a diatonic number with the given accidental.
    pub fn from_diatonic_number(number: i32, accidental: Option<Accidental>) -> Self {
        Self::new(
            Letter::from_diatonic_index(number),
            accidental,
            number.div_euclid(7),
        )
    }

    /// Canonical sharp-preferring spelling of an integer pitch number.
    pub fn from_pitch_number(pitch: i32) -> Self {
        let (letter, accidental) = SHARP_SPELLING[pitch.rem_euclid(12) as usize];
        Self::new(letter, accidental, pitch.div_euclid(12) - 1)
    }

    /// Spell `pitch` using `letter`, choosing the accidental and octave that
    /// make it exact. Returns `None` when more than one semitone of
    /// alteration would be needed.
    pub fn spell_with_letter(pitch: i32, letter: Letter) -> Option<Self> {
        let pc = pitch.rem_euclid(12);
        let mut delta = pc - letter.natural_pitch_class();
        if delta > 6 {
            delta -= 12;
        } else if delta < -6 {
            delta += 12;
        }
        let accidental = match delta {
            0 => None,
            1 => Some(Accidental::Sharp),
            -1 => Some(Accidental::Flat),
            _ => return None,
        };
        let chromatic = letter.natural_pitch_class() + delta;
        let octave = (pitch - chromatic).div_euclid(12) - 1;
        Some(Self::new(letter, accidental, octave))
    }

    /// True when both names sound the same pitch.
    pub fn is_enharmonic(&self, other: &NoteName) -> bool {
        self.pitch_number() == other.pitch_number()
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        if let Some(acc) = self.accidental {
            write!(f, "{}", acc.symbol())?;
        }
        write!(f, "{}", self.octave)
    }
}

impl FromStr for NoteName {
    type Err = Error;

    /// Parse names such as `"C4"`, `"F#3"`, `"Bb5"`, `"e♭2"`, `"C-1"`.
    fn from_str(input: &str) -> Result<Self> {
        let s = input.trim();
        let mut chars = s.chars();
        let first = chars
            .next()
            .ok_or_else(|| Error::note(input, "empty note name"))?;
        let letter = Letter::from_char(first).ok_or_else(|| Error::note(input, "unknown letter"))?;

        let rest = chars.as_str();
        let (accidental, octave_str) = match rest.chars().next().and_then(Accidental::from_char) {
            Some(acc) => {
                let width = rest.chars().next().map_or(0, char::len_utf8);
                (Some(acc), &rest[width..])
            }
            None => (None, rest),
        };

        if octave_str.is_empty() {
            return Err(Error::note(input, "missing octave"));
        }
        let octave: i32 = octave_str
            .parse()
            .map_err(|_| Error::note(input, "unknown accidental or malformed octave"))?;
        if !OCTAVE_RANGE.contains(&octave) {
            return Err(Error::note(input, "octave out of range"));
        }

        Ok(NoteName::new(letter, accidental, octave))
    }
}

/// Parse a note name and return its exact pitch number.
///
/// # Errors
/// Returns `Error::UnparseableNoteName` for malformed input. There is no
/// fallback note; callers decide what to do.
///
/// # Example
/// ```
/// use staffline::convert::note_name_to_pitch_number;
///
/// assert_eq!(note_name_to_pitch_number("A4").unwrap(), 69);
/// assert_eq!(note_name_to_pitch_number("Db4").unwrap(), 61);
/// assert!(note_name_to_pitch_number("H4").is_err());
/// assert!(note_name_to_pitch_number("C").is_err());
/// ```
pub fn note_name_to_pitch_number(name: &str) -> Result<i32> {
    Ok(name.parse::<NoteName>()?.pitch_number())
}

/// Round a continuous pitch number and return its canonical name.
///
/// Lossy: `Db4` goes in as 61 and comes back as `C#4`.
pub fn pitch_number_to_note_name(pitch: f32) -> NoteName {
    NoteName::from_pitch_number(pitch.round() as i32)
}
