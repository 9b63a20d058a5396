//! Score Layout Example
//!
//! This example places a short melody on the staff in several clefs and keys
//! and prints positions, ledger lines and timing.

use log::{error, info};
use staffline::clef::Clef;
use staffline::context::MusicContext;
use staffline::convert::DurationClass;
use staffline::key::KeySignature;
use staffline::score::Score;

fn main() {
    env_logger::init();
    info!("Score Layout Example");

    let melody = [
        ("D4", DurationClass::Quarter),
        ("F#4", DurationClass::Eighth),
        ("A4", DurationClass::Eighth),
        ("D5", DurationClass::DottedHalf),
        ("C#5", DurationClass::Quarter),
        ("A4", DurationClass::Half),
        ("Bb4", DurationClass::Quarter),
        ("A4", DurationClass::Whole),
    ];

    let settings = [
        ("D major", Clef::Treble),
        ("D minor", Clef::Alto),
        ("D:dor", Clef::Bass),
    ];
    for (key_label, clef) in settings {
        let key = match KeySignature::parse(key_label) {
            Ok(key) => key,
            Err(e) => {
                error!("Bad key {}: {}", key_label, e);
                continue;
            }
        };
        let ctx = match MusicContext::default()
            .with_key(key)
            .with_clef(clef)
            .with_tempo(96.0)
        {
            Ok(ctx) => ctx,
            Err(e) => {
                error!("Bad context: {}", e);
                continue;
            }
        };

        let score = match Score::parse(ctx, &melody) {
            Ok(score) => score,
            Err(e) => {
                error!("Failed to read melody: {}", e);
                continue;
            }
        };

        info!("\n{} in {} clef ({:.2} s)", key, clef, score.total_seconds());
        info!("  staff lines: {:?}", clef.staff_line_pitches(&key));
        for placed in score.place() {
            info!(
                "  {:4} pos {:5.1} ledgers {:?} accidental {:?} at {:.3} s",
                placed.note.name().to_string(),
                placed.placement.staff_position,
                placed.placement.ledger_lines,
                placed.placement.accidental,
                placed.onset_seconds
            );
        }
    }
}
