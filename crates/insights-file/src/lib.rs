//! insights-file - Filesystem result sink.

mod sink;

pub use sink::FileSink;
