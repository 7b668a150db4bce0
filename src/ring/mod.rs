mod circular_buffer;
mod observer;

pub use circular_buffer::*;
pub use observer::*;
