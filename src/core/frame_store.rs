//! Painted frames waiting to be fetched by the webview's asset handler.

use std::sync::RwLock;

struct PaintedFrame {
    version: u64,
    rgba: Vec<u8>,
}

/// The newest frame plus the one before it. The canvas may still be fetching
/// the previous version when the next one is published.
struct FrameSlots {
    last_version: u64,
    current: Option<PaintedFrame>,
    previous: Option<PaintedFrame>,
}

impl FrameSlots {
    const fn new() -> Self {
        Self {
            last_version: 0,
            current: None,
            previous: None,
        }
    }

    /// Versions start at 1 and never come back to 0.
    fn publish(&mut self, rgba: Vec<u8>) -> u64 {
        let version = self.last_version.checked_add(1).unwrap_or(1);
        self.last_version = version;
        self.previous = self.current.replace(PaintedFrame { version, rgba });
        version
    }

    /// Exact match when still held, otherwise the newest frame.
    fn lookup(&self, version: Option<u64>) -> Option<&PaintedFrame> {
        let exact = version.and_then(|wanted| {
            [&self.current, &self.previous]
                .into_iter()
                .flatten()
                .find(|frame| frame.version == wanted)
        });
        exact.or(self.current.as_ref())
    }
}

static FRAMES: RwLock<FrameSlots> = RwLock::new(FrameSlots::new());

/// Publishes an RGBA frame and returns its version. `None` when the buffer is
/// empty or does not match `width` x `height`.
pub fn publish_frame(width: u32, height: u32, rgba: Vec<u8>) -> Option<u64> {
    if width == 0 || height == 0 {
        return None;
    }
    if rgba.len() != width as usize * height as usize * 4 {
        tracing::warn!(width, height, len = rgba.len(), "frame buffer size mismatch");
        return None;
    }
    Some(FRAMES.write().ok()?.publish(rgba))
}

/// Bytes for `version`, or the newest frame when that version is gone or
/// none was asked for.
pub fn frame_for(version: Option<u64>) -> Option<Vec<u8>> {
    let frames = FRAMES.read().ok()?;
    frames.lookup(version).map(|frame| frame.rgba.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_of(slots: &FrameSlots, version: Option<u64>) -> Option<Vec<u8>> {
        slots.lookup(version).map(|frame| frame.rgba.clone())
    }

    #[test]
    fn test_keeps_current_and_previous() {
        let mut slots = FrameSlots::new();
        assert!(slots.lookup(None).is_none());

        let first = slots.publish(vec![1]);
        let second = slots.publish(vec![2]);
        let third = slots.publish(vec![3]);
        assert!(first < second && second < third);

        assert_eq!(bytes_of(&slots, Some(second)), Some(vec![2]));
        assert_eq!(bytes_of(&slots, Some(third)), Some(vec![3]));
        // Dropped versions resolve to the newest frame.
        assert_eq!(bytes_of(&slots, Some(first)), Some(vec![3]));
        assert_eq!(bytes_of(&slots, None), Some(vec![3]));
    }

    #[test]
    fn test_version_skips_zero_after_overflow() {
        let mut slots = FrameSlots::new();
        slots.last_version = u64::MAX;
        assert_eq!(slots.publish(vec![0]), 1);
    }

    #[test]
    fn test_publish_rejects_mismatched_buffers() {
        assert!(publish_frame(0, 4, vec![0; 16]).is_none());
        assert!(publish_frame(2, 2, vec![0; 15]).is_none());
        let version = publish_frame(2, 2, vec![7; 16]).unwrap();
        assert_eq!(frame_for(Some(version)).map(|bytes| bytes.len()), Some(16));
        assert!(frame_for(None).is_some());
    }
}
