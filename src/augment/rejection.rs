//! Rejection message surface shown when an install is declined.
//!
//! The text may carry inline formatting codes (`\C[n]`, `\I[n]`, ...). They
//! are passed through untouched; rendering them is the host's job.

/// Display surface for rejection messages.
pub trait RejectionDisplay {
    fn show(&mut self, text: &str);
    fn hide(&mut self);
}

/// Rejection window state: visible text and an optional auto-hide countdown
/// driven by [`RejectionWindow::update`], one call per frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionWindow {
    text: String,
    visible: bool,
    duration_frames: u32,
    frames_left: u32,
}

impl RejectionWindow {
    /// `duration_frames == 0` keeps the window open until `hide` is called.
    pub fn new(duration_frames: u32) -> Self {
        Self {
            duration_frames,
            ..Self::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Advance one frame. Returns true if the window closed on this frame.
    pub fn update(&mut self) -> bool {
        if !self.visible || self.duration_frames == 0 {
            return false;
        }
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            self.hide();
            return true;
        }
        false
    }
}

impl RejectionDisplay for RejectionWindow {
    fn show(&mut self, text: &str) {
        self.text = text.to_string();
        self.visible = true;
        self.frames_left = self.duration_frames;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.frames_left = 0;
    }
}
