use super::*;

#[test]
fn test_pitch_number_conversions() {
    assert_eq!(note_name_to_pitch_number("A4").unwrap(), 69);
    assert_eq!(note_name_to_pitch_number("C4").unwrap(), 60);
    assert_eq!(pitch_number_to_note_name(69.0).to_string(), "A4");
    assert_eq!(pitch_number_to_note_name(60.0).to_string(), "C4");
}

#[test]
fn test_hz_conversions() {
    let p = frequency_to_pitch_number(440.0, A4_HZ).unwrap();
    assert!((p - 69.0).abs() < 1e-4);

    let back = pitch_number_to_frequency(p, A4_HZ);
    assert!((back - 440.0).abs() < 1e-3);

    let octave_up = frequency_to_pitch_number(880.0, A4_HZ).unwrap();
    assert!((octave_up - 81.0).abs() < 1e-4);
}

#[test]
fn test_alternate_reference() {
    // Baroque pitch: A4 = 415 Hz still sits at 69
    let p = frequency_to_pitch_number(415.0, 415.0).unwrap();
    assert!((p - 69.0).abs() < 1e-4);
    let c4 = pitch_number_to_frequency(60.0, 415.0);
    assert!((c4 - 246.76).abs() < 0.05);
}

#[test]
fn test_non_positive_frequency_rejected() {
    assert!(matches!(
        frequency_to_pitch_number(0.0, A4_HZ),
        Err(crate::Error::InvalidInput { name: "freq", .. })
    ));
    assert!(frequency_to_pitch_number(-10.0, A4_HZ).is_err());
    assert!(frequency_to_pitch_number(f32::NAN, A4_HZ).is_err());
    assert!(matches!(
        frequency_to_pitch_number(440.0, 0.0),
        Err(crate::Error::InvalidInput {
            name: "reference_hz",
            ..
        })
    ));
}

#[test]
fn test_batch_conversions() {
    let pitches = hz_to_pitch_numbers(&[440.0, 0.0, 220.0], A4_HZ);
    assert!((pitches[0] - 69.0).abs() < 1e-4);
    assert_eq!(pitches[1], 0.0);
    assert!((pitches[2] - 57.0).abs() < 1e-4);

    let hz = pitch_numbers_to_hz(&[57.0, 69.0], A4_HZ);
    assert!((hz[0] - 220.0).abs() < 1e-2);
    assert!((hz[1] - 440.0).abs() < 1e-2);
}

#[test]
fn test_parse_note_names() {
    let n: NoteName = "F#3".parse().unwrap();
    assert_eq!(n.letter, Letter::F);
    assert_eq!(n.accidental, Some(Accidental::Sharp));
    assert_eq!(n.octave, 3);

    let n: NoteName = "bb2".parse().unwrap();
    assert_eq!(n.letter, Letter::B);
    assert_eq!(n.accidental, Some(Accidental::Flat));

    let n: NoteName = "E♭5".parse().unwrap();
    assert_eq!(n.pitch_number(), 75);

    let n: NoteName = "C-1".parse().unwrap();
    assert_eq!(n.pitch_number(), 0);

    let n: NoteName = " G4 ".parse().unwrap();
    assert_eq!(n, NoteName::natural(Letter::G, 4));

    let n: NoteName = "C♮4".parse().unwrap();
    assert_eq!(n.accidental, Some(Accidental::Natural));
    assert_eq!(n.pitch_number(), 60);
}

#[test]
fn test_parse_note_name_errors() {
    for bad in ["", "C", "H4", "C##4", "Cx4", "4C", "C4.5", "C99"] {
        let err = bad.parse::<NoteName>();
        assert!(
            matches!(err, Err(crate::Error::UnparseableNoteName { .. })),
            "{bad:?} should not parse"
        );
    }
}

#[test]
fn test_enharmonic_spellings() {
    let cs: NoteName = "C#4".parse().unwrap();
    let db: NoteName = "Db4".parse().unwrap();
    assert!(cs.is_enharmonic(&db));
    assert_ne!(cs, db);

    // Pitch to name is canonical and sharp-preferring
    assert_eq!(NoteName::from_pitch_number(db.pitch_number()), cs);
}

#[test]
fn test_octave_boundary_spellings() {
    let cb: NoteName = "Cb5".parse().unwrap();
    assert_eq!(cb.pitch_number(), 71);
    let bs: NoteName = "B#3".parse().unwrap();
    assert_eq!(bs.pitch_number(), 60);

    assert_eq!(NoteName::spell_with_letter(71, Letter::C), Some(cb));
    assert_eq!(NoteName::spell_with_letter(60, Letter::B), Some(bs));
    assert_eq!(NoteName::spell_with_letter(62, Letter::C), None);
}

#[test]
fn test_diatonic_numbers() {
    let c4: NoteName = "C4".parse().unwrap();
    let b3: NoteName = "B3".parse().unwrap();
    let cs4: NoteName = "C#4".parse().unwrap();
    assert_eq!(c4.diatonic_number() - b3.diatonic_number(), 1);
    assert_eq!(c4.diatonic_number(), cs4.diatonic_number());
    assert_eq!(NoteName::from_diatonic_number(c4.diatonic_number(), None), c4);
    assert_eq!(NoteName::from_diatonic_number(-1, None).to_string(), "B-1");
}

#[test]
fn test_negative_pitch_numbers() {
    assert_eq!(NoteName::from_pitch_number(-1).to_string(), "B-2");
    assert_eq!(NoteName::from_pitch_number(-12).to_string(), "C-2");
}

#[test]
fn test_note_to_hz() {
    let c4 = note_to_hz("C4", A4_HZ).unwrap();
    assert!((c4 - 261.63).abs() < 0.01);
    assert!(note_to_hz("nope", A4_HZ).is_err());
}

#[test]
fn test_hz_to_note() {
    assert_eq!(hz_to_note(392.0, A4_HZ).unwrap().to_string(), "G4");
    assert_eq!(hz_to_note(277.18, A4_HZ).unwrap().to_string(), "C#4");
    assert!(hz_to_note(0.0, A4_HZ).is_err());
}

#[test]
fn test_cents_deviation() {
    assert!(cents_deviation(440.0, A4_HZ).unwrap().abs() < 0.01);
    // A quarter tone above A4
    let quarter = pitch_number_to_frequency(69.25, A4_HZ);
    assert!((cents_deviation(quarter, A4_HZ).unwrap() - 25.0).abs() < 0.1);
    let flat = pitch_number_to_frequency(68.9, A4_HZ);
    assert!((cents_deviation(flat, A4_HZ).unwrap() + 10.0).abs() < 0.1);
}

#[test]
fn test_durations() {
    assert_eq!(DurationClass::Quarter.seconds(60.0).unwrap(), 1.0);
    assert_eq!(DurationClass::Whole.seconds(120.0).unwrap(), 2.0);
    assert_eq!(DurationClass::DottedQuarter.beats(), 1.5);
    assert!(duration_to_seconds(1.0, 0.0).is_err());
    assert!(duration_to_seconds(1.0, f32::INFINITY).is_err());
}
