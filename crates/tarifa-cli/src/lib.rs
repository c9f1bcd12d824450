//! Library side of the `tarifa` CLI: logging setup, session files and the
//! submission sink.

pub mod logging;
pub mod session;
pub mod sink;
