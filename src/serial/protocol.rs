// Dump acquisition: one command, then chunked reads until a short chunk

use std::sync::Arc;

use super::comm::{Result, SerialError, SerialPort};
use crate::core::constants::{DUMP_CHUNK_SIZE, DUMP_COMMAND};

/// Progress callback
/// Arguments: (bytes_received, status_message)
pub type ProgressCallback = Arc<dyn Fn(usize, &str) + Send + Sync>;

/// Byte-level port operations the acquisition protocol needs; implemented
/// by the real serial port and by the test mock
pub trait DumpPort {
    async fn write_all(&mut self, buf: &[u8]) -> Result<()>;
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
    async fn flush(&mut self) -> Result<()>;
}

impl DumpPort for SerialPort {
    async fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        SerialPort::write_all(self, buf).await
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        SerialPort::read(self, buf).await
    }

    async fn flush(&mut self) -> Result<()> {
        SerialPort::flush(self).await
    }
}

/// The monitor streams its whole measurement memory after a single command,
/// in fixed-size chunks; a chunk shorter than the chunk size marks the end
/// of the dump.
pub struct DumpProtocol {
    chunk_size: usize,
}

impl DumpProtocol {
    pub fn new() -> Self {
        Self {
            chunk_size: DUMP_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Request and collect a full dump from the monitor
    pub async fn download<P: DumpPort>(
        &self,
        port: &mut P,
        progress: Option<ProgressCallback>,
    ) -> Result<Vec<u8>> {
        port.write_all(&DUMP_COMMAND).await?;
        port.flush().await?;

        let mut data = Vec::new();
        let mut chunk = vec![0u8; self.chunk_size];

        loop {
            let n = match port.read(&mut chunk).await {
                Ok(n) => n,
                // The monitor goes quiet once its memory is exhausted
                Err(SerialError::Timeout(_)) if !data.is_empty() => break,
                Err(err) => return Err(err),
            };

            data.extend_from_slice(&chunk[..n]);

            if let Some(ref callback) = progress {
                let msg = format!("Received {} bytes", data.len());
                callback(data.len(), &msg);
            }

            if n < self.chunk_size {
                break;
            }
        }

        Ok(data)
    }
}

impl Default for DumpProtocol {
    fn default() -> Self {
        Self::new()
    }
}
