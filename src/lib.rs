//! Pitch-to-staff positioning and real-time pitch tracking for Rust.
//!
//! Staffline is the engine behind a notation display that draws live or
//! scripted pitch against a musical staff. It converts between frequency,
//! pitch number and note name, places pitches on a staff for any clef and
//! key signature, steadies a jittery pitch-detector stream, and turns that
//! stream into a cursor that glides smoothly between lines and spaces.
//!
//! Audio capture, pitch estimation and drawing are left to the caller. The
//! engine consumes `(frequency, amplitude)` pairs and hands back staff
//! positions and screen coordinates.
//!
//! # Features
//!
//! - **Conversions**: Hz/pitch number/note name at any reference tuning,
//!   cents deviation, beat durations
//! - **Notation**: treble/bass/alto/tenor clefs, major, minor and modal key
//!   signatures, ledger lines, accidental display
//! - **Tracking**: median + exponential pitch stabilizer with silence gating,
//!   interpolated cursor, scroll-synchronized trail
//!
//! # Quick Start
//!
//! ```rust
//! use staffline::context::MusicContext;
//! use staffline::convert;
//! use staffline::staff;
//!
//! let ctx = MusicContext::default(); // treble clef, C major, A4 = 440 Hz
//!
//! let note = convert::hz_to_note(392.0, ctx.reference_hz()).unwrap();
//! assert_eq!(note.to_string(), "G4");
//!
//! let reading = staff::frequency_to_staff_position(392.0, &ctx);
//! assert_eq!(reading.position(), Some(2.0)); // second line from the bottom
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`convert`] | Frequency/pitch number/note name conversions, durations |
//! | [`key`] | Key signatures, modes and key-aware spelling |
//! | [`clef`] | Clefs, staff lines and ledger lines |
//! | [`context`] | Immutable musical context and score notes |
//! | [`staff`] | Staff-position mapping and accidental display |
//! | [`score`] | Static placement and timing of scored notes |
//! | [`stabilizer`] | Streaming median/exponential pitch stabilizer |
//! | [`cursor`] | Interpolated cursor placement and staff geometry |
//! | [`trail`] | Bounded, scroll-synchronized cursor history |
//! | [`session`] | Stabilizer, cursor and trail wired per stream |
//! | [`utils`] | Ring buffer and median helpers |
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Bad configuration is rejected when a
//! component is built. Streaming calls never fail: quiet or invalid samples
//! simply read as silence.
//!
//! # Logging
//!
//! State changes (stream start/stop, silence, trail reset) are reported at
//! `debug` level and per-sample filter values at `trace` level through the
//! [`log`](https://docs.rs/log) facade. Install any logger to see them.
//!
//! # Safety
//!
//! This crate uses `#![forbid(unsafe_code)]`.

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, Result};

pub mod clef;
pub mod context;
pub mod convert;
pub mod cursor;
pub mod key;
pub mod score;
pub mod session;
pub mod stabilizer;
pub mod staff;
pub mod trail;
pub mod utils;
