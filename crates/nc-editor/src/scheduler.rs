//! Repaint coalescing.
//!
//! Any number of changes between two frames schedule one repaint.

#[derive(Debug, Clone, Default)]
pub struct RepaintScheduler {
    pending: bool,
    frames: u64,
}

impl RepaintScheduler {
    /// Ask for a repaint. True only for the first request since the last
    /// frame; the host schedules an animation frame exactly then.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    pub fn frame_rendered(&mut self) {
        self.pending = false;
        self.frames += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_coalesce_into_one_frame() {
        let mut s = RepaintScheduler::default();
        assert!(s.request());
        assert!(!s.request());
        assert!(!s.request());
        assert!(s.is_pending());
        s.frame_rendered();
        assert!(!s.is_pending());
        assert!(s.request());
        assert_eq!(s.frames(), 1);
    }
}
