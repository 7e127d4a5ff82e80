// Mock serial port for exercising the dump protocol without hardware

use std::collections::VecDeque;
use std::time::Duration;

use super::comm::{Result, SerialError};
use super::protocol::DumpPort;

/// In-memory stand-in for the monitor's serial link
#[derive(Debug, Default)]
pub struct MockSerialPort {
    /// Data the fake monitor will answer with
    read_buffer: VecDeque<u8>,

    /// Everything written towards the fake monitor
    write_buffer: Vec<u8>,
}

impl MockSerialPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue response bytes
    pub fn push_read_data(&mut self, data: &[u8]) {
        self.read_buffer.extend(data.iter().copied());
    }

    /// Bytes written so far
    pub fn written(&self) -> &[u8] {
        &self.write_buffer
    }

    /// Whether a specific byte sequence was written
    pub fn was_written(&self, expected: &[u8]) -> bool {
        self.write_buffer
            .windows(expected.len())
            .any(|window| window == expected)
    }
}

impl DumpPort for MockSerialPort {
    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.write_buffer.extend_from_slice(buf);
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.read_buffer.is_empty() {
            return Err(SerialError::Timeout(Duration::from_secs(1)));
        }

        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.read_buffer.pop_front() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }

        Ok(count)
    }

    async fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_drains_queued_data() {
        let mut port = MockSerialPort::new();
        port.push_read_data(b"Hello");

        let mut buf = [0u8; 3];
        assert_eq!(port.read(&mut buf).await.unwrap(), 3);
        assert_eq!(&buf, b"Hel");

        let mut buf = [0u8; 8];
        assert_eq!(port.read(&mut buf).await.unwrap(), 2);
        assert_eq!(&buf[..2], b"lo");
    }

    #[tokio::test]
    async fn test_empty_read_times_out() {
        let mut port = MockSerialPort::new();
        let mut buf = [0u8; 4];
        assert!(matches!(
            port.read(&mut buf).await,
            Err(SerialError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_written_data_is_recorded() {
        let mut port = MockSerialPort::new();
        port.write_all(b"COMMAND123").await.unwrap();

        assert_eq!(port.written(), b"COMMAND123");
        assert!(port.was_written(b"COMMAND"));
        assert!(!port.was_written(b"NOTFOUND"));
    }
}
