//! Scroll position over the rendered page, with smooth jumps and derived indicators.
//!
//! Offsets and heights are in terminal lines. The reading progress and the scroll-to-top
//! button are both pure functions of the scroll state.

use std::time::Duration;

/// Interval between smooth-scroll frames.
pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Vertical scroll state of the content pane.
pub struct Viewport {
    offset: usize,
    target: Option<usize>,
    content_height: usize,
    height: usize,
}

impl Viewport {
    /// Updates the page and pane heights, clamping the offset to the new range.
    pub fn resize(&mut self, content_height: usize, height: usize) {
        self.content_height = content_height;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
        self.target = self.target.map(|t| t.min(self.max_offset()));
    }

    #[must_use]
    /// First visible line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    /// Pane height in lines.
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    /// Largest offset that still fills the pane.
    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.height)
    }

    /// Scrolls by `delta` lines immediately, cancelling any animation.
    pub fn scroll_by(&mut self, delta: isize) {
        self.target = None;
        self.offset = self
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
    }

    /// Moves so that `line` is at the top, animated when `smooth` is set.
    pub fn scroll_to(&mut self, line: usize, smooth: bool) {
        let line = line.min(self.max_offset());
        if smooth {
            self.target = Some(line);
        } else {
            self.target = None;
            self.offset = line;
        }
    }

    #[must_use]
    /// Whether a smooth scroll is in progress.
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Advances a smooth scroll by one frame, covering a third of the remaining distance.
    ///
    /// Returns whether the offset changed.
    pub fn step(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let distance = target.abs_diff(self.offset);
        let stride = (distance / 3).max(1);
        if target > self.offset {
            self.offset += stride;
        } else if target < self.offset {
            self.offset -= stride;
        }

        if self.offset == target {
            self.target = None;
        }
        distance > 0
    }

    #[must_use]
    /// How far through the page the reader is, in percent.
    ///
    /// A page that fits the pane reports 0.
    pub fn progress(&self) -> f64 {
        let range = self.max_offset();
        if range == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let percent = self.offset as f64 / range as f64 * 100.0;
        percent.clamp(0.0, 100.0)
    }

    #[must_use]
    /// Whether the scroll-to-top button should show.
    pub fn shows_scroll_top(&self, after: usize) -> bool {
        self.offset > after
    }
}

#[cfg(test)]
#[path = "tests/viewport.rs"]
mod tests;
