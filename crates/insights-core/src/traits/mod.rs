//! Core traits for the transport and result sink seams.

mod sink;
mod transport;

pub use sink::ResultSink;
pub use transport::Transport;
