// Fixed-capacity sliding window
mod ring_buffer;

// Order statistics
mod stats;

pub use ring_buffer::RingBuffer;
pub use stats::{median, median_in_place};
