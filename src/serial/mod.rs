// Serial communication with the monitor

pub mod comm;
pub mod protocol;

#[cfg(test)]
pub mod mock;

pub use comm::{available_port_names, SerialConfig, SerialError, SerialPort};
pub use protocol::{DumpPort, DumpProtocol, ProgressCallback};
