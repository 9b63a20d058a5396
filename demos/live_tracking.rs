//! Live Tracking Example
//!
//! This example feeds a synthetic singer through a tracking session: a
//! glissando from G4 up to D5 with detector jitter and an octave error,
//! followed by a rest.

use log::{error, info};
use staffline::context::MusicContext;
use staffline::convert;
use staffline::cursor::LinearStaffGeometry;
use staffline::session::TrackingSession;
use staffline::stabilizer::StabilizerConfig;
use staffline::trail::TrailConfig;

fn main() {
    env_logger::init();
    info!("Live Tracking Example");

    let geometry = LinearStaffGeometry::new(120.0, 12.0);
    let mut session = match TrackingSession::new(
        MusicContext::default(),
        StabilizerConfig::default(),
        TrailConfig::new().with_cursor_x(320.0),
        geometry,
    ) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to build session: {}", e);
            return;
        }
    };

    // 60 ticks of glissando, 20 ticks of rest
    let ticks = 80;
    for tick in 0..ticks {
        let (freq, amp) = if tick < 60 {
            let pitch = 67.0 + 7.0 * tick as f32 / 59.0;
            let jitter = if tick % 3 == 0 { 1.5 } else { -0.8 };
            let mut f = convert::pitch_number_to_frequency(pitch, 440.0) + jitter;
            if tick == 31 {
                // detector octave error
                f *= 2.0;
            }
            (f, 0.4)
        } else {
            (0.0, 0.0)
        };

        let frame = session.process(freq, amp, 4.0);
        match (frame.sample.note(), frame.cursor_y) {
            (Some(note), Some(y)) => info!(
                "tick {:2}: raw {:7.2} Hz -> {:7.2} Hz {:4} y = {:6.2} ({} trail points)",
                tick,
                freq,
                frame.sample.frequency(),
                note.to_string(),
                y,
                frame.trail.len()
            ),
            _ => info!("tick {:2}: silent ({} trail points)", tick, frame.trail.len()),
        }
    }

    session.stop();
    info!("Session stopped, trail empty: {}", session.trail().is_empty());
}
