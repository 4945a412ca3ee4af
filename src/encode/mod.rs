//! Frame sinks: where rendered export frames go.

pub mod gif;
pub mod sink;

pub use self::gif::{GifSink, GifSinkOpts};
pub use self::sink::{FrameSink, InMemorySink, SinkConfig};
