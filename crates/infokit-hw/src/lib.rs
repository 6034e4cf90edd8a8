//! infokit-hw — Camera and video library helpers.
//!
//! V4L2 device access, a sequential webcam-port scanner, and inspection of
//! a video library's build-information dump.

pub mod build_info;
pub mod camera;
pub mod frame;
pub mod scan;

pub use build_info::{has_enabled_feature, BuildInfo, BuildInfoError};
pub use camera::{Camera, CameraError, DeviceInfo};
pub use frame::Frame;
pub use scan::{scan_ports, CaptureBackend, CaptureDevice, PortScan, StopRule, V4l2Backend};
