//! # Raw Device Transport
//!
//! Writes command buffers verbatim to a printer device node, such as the
//! USB printer class device `/dev/usb/lp0` or a serial port.
//!
//! ## USB Setup (Linux)
//!
//! ```bash
//! # The usblp driver exposes the printer once it is plugged in
//! $ ls -l /dev/usb/lp*
//! crw-rw---- 1 root lp 180, 0 ... /dev/usb/lp0
//!
//! # Let your user write to it
//! $ sudo usermod -aG lp $USER
//! ```
//!
//! ## TTY Configuration
//!
//! When the path is a terminal (serial adapters such as `/dev/ttyUSB0`) it is
//! switched to raw mode so the bytes reach the printer untouched:
//!
//! - **No output processing**: OPOST off, so `\n` is not expanded to `\r\n`
//! - **No XON/XOFF**: feed step counts of 0x11 and 0x13 are valid data
//! - **8-bit characters**: CS8, no parity
//! - **Non-canonical, no echo**
//!
//! Printer class devices and regular files are written as-is.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::encoder::CommandBuffer;
use crate::error::LabelError;

use super::PrintSink;

/// Default USB printer device path
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 1024;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Device Transport
///
/// ## Example
///
/// ```no_run
/// use osilabel::encoder::CommandEncoder;
/// use osilabel::transport::{DeviceTransport, PrintSink};
///
/// let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
///
/// let mut encoder = CommandEncoder::new();
/// encoder.feed_forward_mm(0.5);
/// let (_, buffer) = encoder.finish();
/// transport.send(&buffer)?;
///
/// # Ok::<(), osilabel::error::LabelError>(())
/// ```
pub struct DeviceTransport {
    file: File,
    path: PathBuf,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open a printer device. Paths outside `/dev` are created if needed
    /// and appended to.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need the `lp` or `dialout` group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, LabelError> {
        let path = device.as_ref();

        let file = OpenOptions::new()
            .append(true)
            .create(!path.starts_with("/dev"))
            .open(path)
            .map_err(|e| {
                LabelError::Transport(format!("Failed to open {}: {}", path.display(), e))
            })?;

        let fd = file.as_raw_fd();
        if unsafe { libc::isatty(fd) } == 1 {
            tracing::debug!(device = %path.display(), "configuring tty raw mode");
            configure_tty_raw(fd)?;
        }

        Ok(Self {
            file,
            path: path.to_path_buf(),
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set the chunk size for large writes. Values below 1 are raised to 1.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    /// Write raw bytes, chunked, then flush.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), LabelError> {
        if data.len() <= self.chunk_size {
            self.file
                .write_all(data)
                .map_err(|e| LabelError::Transport(format!("Write failed: {}", e)))?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                self.file
                    .write_all(chunk)
                    .map_err(|e| LabelError::Transport(format!("Write failed: {}", e)))?;

                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        self.file
            .flush()
            .map_err(|e| LabelError::Transport(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}

impl PrintSink for DeviceTransport {
    fn send(&mut self, buffer: &CommandBuffer) -> Result<(), LabelError> {
        tracing::debug!(
            device = %self.path.display(),
            bytes = buffer.len(),
            "sending buffer"
        );
        self.write_all(buffer.as_bytes())
    }
}

/// Configure a file descriptor for raw TTY mode.
///
/// ## What Gets Disabled
///
/// - **Input flags**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL, IXON, IXOFF, IXANY
/// - **Output flags**: OPOST
/// - **Local flags**: ECHO, ECHONL, ICANON, ISIG, IEXTEN
/// - **Control flags**: CSIZE, PARENB (then CS8 is set)
fn configure_tty_raw(fd: i32) -> Result<(), LabelError> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(LabelError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(LabelError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::CommandEncoder;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("osilabel-{}-{}.bin", std::process::id(), name))
    }

    #[test]
    fn test_default_device_path() {
        assert_eq!(DEFAULT_DEVICE, "/dev/usb/lp0");
    }

    #[test]
    fn test_send_writes_bytes_verbatim() {
        let path = scratch_path("verbatim");
        let _ = std::fs::remove_file(&path);

        let mut encoder = CommandEncoder::new();
        encoder.reset();
        encoder.emit_text("A\n");
        encoder.feed_forward_mm(1.375); // 11 steps, 0x0B
        let (_, buffer) = encoder.finish();

        {
            let mut transport = DeviceTransport::open(&path).unwrap();
            transport.send(&buffer).unwrap();
        }

        let written = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(written, buffer.into_vec());
    }

    #[test]
    fn test_chunked_write() {
        let path = scratch_path("chunked");
        let _ = std::fs::remove_file(&path);

        let data: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
        {
            let mut transport = DeviceTransport::open(&path).unwrap();
            transport.set_chunk_size(64);
            transport.set_chunk_delay(Duration::ZERO);
            transport.write_all(&data).unwrap();
        }

        let written = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(written, data);
    }

    #[test]
    fn test_missing_device() {
        let result = DeviceTransport::open("/dev/osilabel-does-not-exist");
        assert!(matches!(result, Err(LabelError::Transport(_))));
    }
}
