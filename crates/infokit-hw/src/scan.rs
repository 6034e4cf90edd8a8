//! Sequential webcam-port scanner.
//!
//! Probes device indices from 0 upward and sorts each into one of three
//! buckets: opened and read a frame (`working`), opened but could not read
//! (`available`), or could not be opened (`non_working`). Probing stops once
//! the [`StopRule`] is satisfied.

use crate::camera::{Camera, CameraError};
use crate::frame::Frame;
use serde::Serialize;

/// Open side of a video capture library, indexed by integer device handle.
pub trait CaptureBackend {
    type Device: CaptureDevice;

    /// Open device `index`.
    ///
    /// `Ok(None)` means the device could not be opened and counts as
    /// non-working. `Err` aborts the scan.
    fn open(&mut self, index: u32) -> Result<Option<Self::Device>, CameraError>;
}

/// An opened capture device.
pub trait CaptureDevice {
    fn read_frame(&mut self) -> Result<Frame, CameraError>;

    /// Current (width, height).
    fn resolution(&self) -> (u32, u32);
}

/// When to stop probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRule {
    /// Stop after this many unopenable indices in a row.
    Consecutive(u32),
    /// Stop once this many unopenable indices have been seen overall.
    Total(u32),
}

impl Default for StopRule {
    fn default() -> Self {
        Self::Consecutive(6)
    }
}

/// Result of a port scan. The three lists never share an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortScan {
    /// Opened, but no frame could be read.
    pub available: Vec<u32>,
    /// Opened and produced a frame.
    pub working: Vec<u32>,
    /// Could not be opened.
    pub non_working: Vec<u32>,
}

/// Probe device indices from 0 upward until `rule` says stop.
///
/// Any read failure on an opened device, including a busy one, files the
/// index under `available`. Only an `Err` from [`CaptureBackend::open`]
/// ends the scan early.
pub fn scan_ports<B: CaptureBackend>(
    backend: &mut B,
    rule: StopRule,
) -> Result<PortScan, CameraError> {
    let mut scan = PortScan::default();
    let mut streak = 0u32;
    let mut index = 0u32;

    loop {
        let done = match rule {
            StopRule::Consecutive(n) => streak >= n,
            StopRule::Total(n) => scan.non_working.len() as u32 >= n,
        };
        if done {
            break;
        }

        match backend.open(index)? {
            None => {
                tracing::debug!(port = index, "port is not working");
                scan.non_working.push(index);
                streak += 1;
            }
            Some(mut device) => {
                streak = 0;
                let (width, height) = device.resolution();
                match device.read_frame() {
                    Ok(frame) if !frame.is_blank() => {
                        tracing::debug!(
                            port = index,
                            width,
                            height,
                            fourcc = %frame.fourcc_str(),
                            "port is working and reads images"
                        );
                        scan.working.push(index);
                    }
                    Ok(_) => {
                        tracing::debug!(port = index, width, height, "port is present but does not read");
                        scan.available.push(index);
                    }
                    Err(e) => {
                        if matches!(e, CameraError::DeviceBusy(_)) {
                            tracing::warn!(port = index, error = %e, "port is present but busy");
                        } else {
                            tracing::debug!(port = index, width, height, error = %e, "port is present but does not read");
                        }
                        scan.available.push(index);
                    }
                }
            }
        }

        index += 1;
    }

    tracing::info!(
        working = ?scan.working,
        available = ?scan.available,
        non_working = ?scan.non_working,
        "port scan finished"
    );
    Ok(scan)
}

/// Backend over V4L2 device nodes `<prefix><index>`.
#[derive(Debug, Clone)]
pub struct V4l2Backend {
    pub prefix: String,
}

impl Default for V4l2Backend {
    fn default() -> Self {
        Self {
            prefix: "/dev/video".to_string(),
        }
    }
}

impl V4l2Backend {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl CaptureBackend for V4l2Backend {
    type Device = Camera;

    fn open(&mut self, index: u32) -> Result<Option<Camera>, CameraError> {
        let path = format!("{}{index}", self.prefix);
        Ok(opened_or_skipped(&path, Camera::open(&path)))
    }
}

/// Every open failure, a busy device included, makes the port unopenable.
fn opened_or_skipped<D>(path: &str, result: Result<D, CameraError>) -> Option<D> {
    match result {
        Ok(device) => Some(device),
        Err(e @ CameraError::DeviceBusy(_)) => {
            tracing::warn!(device = %path, error = %e, "device busy, treating as not working");
            None
        }
        Err(e) => {
            tracing::trace!(device = %path, error = %e, "cannot open");
            None
        }
    }
}

impl CaptureDevice for Camera {
    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        self.capture_frame()
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
