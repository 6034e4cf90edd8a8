//! Captured frame type.

/// One raw buffer dequeued from a capture stream.
#[derive(Clone)]
pub struct Frame {
    /// Bytes the driver reported as used; format depends on `fourcc`.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp: std::time::Instant,
    pub sequence: u32,
    pub fourcc: [u8; 4],
}

impl Frame {
    /// True when the driver handed back no image data.
    pub fn is_blank(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel format as text, e.g. "YUYV".
    pub fn fourcc_str(&self) -> String {
        String::from_utf8_lossy(&self.fourcc)
            .trim_end_matches(['\0', ' '])
            .to_string()
    }
}
