//! Edge case tests for boundary conditions and unusual inputs.
//!
//! Tests cover:
//! - Silence and invalid frequencies
//! - Malformed note names and key labels
//! - Extreme registers and unusual spellings

use staffline::clef::{self, Clef};
use staffline::context::{MusicContext, Note};
use staffline::convert::{self, DurationClass, NoteName};
use staffline::key::KeySignature;
use staffline::staff::{self, StaffPositionMapper};
use staffline::Error;

// Invalid Frequencies

#[test]
fn zero_frequency_is_invalid_input() {
    assert!(matches!(
        convert::frequency_to_pitch_number(0.0, 440.0),
        Err(Error::InvalidInput { .. })
    ));
    assert!(convert::frequency_to_pitch_number(-440.0, 440.0).is_err());
    assert!(convert::frequency_to_pitch_number(f32::INFINITY, 440.0).is_err());
    assert!(convert::frequency_to_pitch_number(440.0, 0.0).is_err());
}

#[test]
fn nan_frequency_reads_silent() {
    let ctx = MusicContext::default();
    assert!(staff::frequency_to_staff_position(f32::NAN, &ctx).is_silent());
}

// Malformed Names

#[test]
fn malformed_note_names_fail() {
    for bad in ["", "H4", "C", "C#", "4C", "C##4", "Cx4", "C4.5"] {
        assert!(
            matches!(bad.parse::<NoteName>(), Err(Error::UnparseableNoteName { .. })),
            "{bad:?} parsed"
        );
    }
}

#[test]
fn note_without_fallback() {
    assert!(Note::parse("Q9", DurationClass::Half).is_err());
}

#[test]
fn unknown_key_labels_fail() {
    for bad in ["", "H major", "C:foo", "C##"] {
        assert!(KeySignature::parse(bad).is_err(), "{bad:?} parsed");
    }
}

// Extreme Registers

#[test]
fn very_low_and_high_notes() {
    let mapper = StaffPositionMapper::new(&MusicContext::default());
    let c0: NoteName = "C0".parse().unwrap();
    let c8: NoteName = "C8".parse().unwrap();
    assert_eq!(mapper.note_position(&c0), 34.0);
    assert_eq!(mapper.ledger_line_count(&c0), 15);
    assert_eq!(mapper.note_position(&c8), -22.0);
    assert_eq!(mapper.ledger_line_positions(&c8).len(), 9);
}

#[test]
fn absurd_positions_have_bounded_ledgers() {
    assert_eq!(clef::ledger_line_count(1e12), clef::MAX_LEDGER_LINES);
    assert_eq!(clef::ledger_line_positions(-1e12).len(), clef::MAX_LEDGER_LINES as usize);
    assert_eq!(clef::ledger_line_count(f32::NAN), 0);
    assert!(clef::ledger_line_positions(f32::INFINITY).is_empty());
}

#[test]
fn negative_pitch_numbers_place_consistently() {
    let a = staff::pitch_number_to_staff_position(-1, Clef::Bass);
    let b = staff::pitch_number_to_staff_position(0, Clef::Bass);
    assert_eq!(a - b, 1.0);
}

// Unusual Spellings

#[test]
fn cb_and_b_sharp_cross_octaves() {
    let cb5: NoteName = "Cb5".parse().unwrap();
    let bs3: NoteName = "B#3".parse().unwrap();
    assert_eq!(cb5.pitch_number(), 71);
    assert_eq!(bs3.pitch_number(), 60);

    let ctx = MusicContext::default();
    assert_eq!(staff::note_name_to_staff_position(&cb5, &ctx), -1.0);
    assert_eq!(staff::note_name_to_staff_position(&bs3, &ctx), 7.0);
}

#[test]
fn explicit_natural_round_trips() {
    let n: NoteName = "Fn4".parse().unwrap();
    assert_eq!(n.pitch_number(), 65);
    assert_eq!(n.to_string(), "F♮4");
}
