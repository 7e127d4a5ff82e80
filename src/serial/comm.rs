// Serial link to the monitor
// The device speaks a fixed 19200 8N1 line with no flow control; the only
// tunable is how long a quiet line is tolerated

use std::io::{self, Read, Write};
use std::time::Duration;
use thiserror::Error;

use crate::core::constants::MONITOR_BAUD_RATE;

#[derive(Error, Debug)]
pub enum SerialError {
    #[error("monitor link error: {0}")]
    Port(String),

    #[error("I/O error on the monitor link: {0}")]
    Io(#[from] io::Error),

    #[error("monitor stayed silent for {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, SerialError>;

/// How often the OS buffer is polled while waiting on the monitor
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Settings for the monitor link.
///
/// The line parameters are fixed by the device, so the timeout is the only
/// knob; it doubles as the silence threshold that marks the end of a dump.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
        }
    }
}

impl SerialConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Open serial line to the monitor
pub struct SerialPort {
    port: Box<dyn serialport::SerialPort>,
    timeout: Duration,
}

impl SerialPort {
    /// Open @port_name with the monitor's fixed line parameters
    pub fn open(port_name: &str, config: SerialConfig) -> Result<Self> {
        let port = serialport::new(port_name, MONITOR_BAUD_RATE)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .flow_control(serialport::FlowControl::None)
            .timeout(config.timeout)
            .open()
            .map_err(|e| SerialError::Port(e.to_string()))?;

        Ok(Self {
            port,
            timeout: config.timeout,
        })
    }

    /// Pull whatever bytes are waiting, up to buf.len().
    ///
    /// The monitor gets the full timeout to produce the first byte; once
    /// the deadline passes without data the line counts as silent.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let deadline = tokio::time::Instant::now() + self.timeout;

        loop {
            match self.port.read(buf) {
                Ok(n) => return Ok(n),
                Err(err) if err.kind() == io::ErrorKind::TimedOut => {
                    if tokio::time::Instant::now() >= deadline {
                        return Err(SerialError::Timeout(self.timeout));
                    }
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                Err(err) => return Err(SerialError::Io(err)),
            }
        }
    }

    /// Push a command to the monitor
    pub async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.port.write_all(buf)?;
        Ok(())
    }

    /// Drain the OS transmit buffer
    pub async fn flush(&mut self) -> Result<()> {
        self.port.flush()?;
        Ok(())
    }

    /// Drop bytes buffered in either direction, so a dump never starts
    /// with leftovers from an earlier session
    pub fn discard_stale(&mut self) -> Result<()> {
        self.port
            .clear(serialport::ClearBuffer::All)
            .map_err(|e| SerialError::Port(e.to_string()))
    }
}

/// Names of the serial ports present on this machine, for usage hints.
/// Empty when enumeration is unavailable.
pub fn available_port_names() -> Vec<String> {
    serialport::available_ports()
        .map(|ports| ports.into_iter().map(|p| p.port_name).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_matches_the_monitor() {
        assert_eq!(SerialConfig::default().timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_with_timeout() {
        let config = SerialConfig::with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_available_port_names_never_fails() {
        // May well be empty on a machine without serial hardware
        let names = available_port_names();
        assert!(names.iter().all(|name| !name.is_empty()));
    }
}
