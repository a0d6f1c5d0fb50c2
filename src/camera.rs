//! The camera offsetting everything that's not locked to the screen.

use glam::Vec2;

/// Camera for offsetting objects, with smooth scrolling towards a target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Camera {
    /// Current offset, subtracted from object positions.
    offset: Vec2,
    /// Offset to scroll towards.
    target: Vec2,
    /// Seconds left before the scroll must reach the target.
    time_left: f32,
    /// Whether a scroll is pending.
    scrolling: bool,
}

impl Camera {
    /// Scroll smoothly towards a target offset.
    ///
    /// Every update tick moves the offset by the fraction of the remaining time that passed, so the movement slows down the closer it gets.
    ///
    /// # Arguments
    ///
    /// * `target` - Offset to scroll to.
    /// * `seconds` - Time it should take, `0.0` moves there on the next update.
    #[inline]
    pub fn scroll_to(&mut self, target: impl Into<Vec2>, seconds: f32) {
        self.target = target.into();
        self.time_left = seconds;
        self.scrolling = true;
    }

    /// Move the camera immediately, cancelling any scroll.
    #[inline]
    pub fn set_offset(&mut self, offset: impl Into<Vec2>) {
        self.offset = offset.into();
        self.target = self.offset;
        self.time_left = 0.0;
        self.scrolling = false;
    }

    /// Move back to `(0, 0)` and stop scrolling.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the scroll.
    ///
    /// Must be done in the update tick.
    ///
    /// # Arguments
    ///
    /// * `dt` - Seconds passed since the last update.
    pub fn update(&mut self, dt: f32) {
        if !self.scrolling {
            return;
        }

        // A scroll without time left jumps to the target
        let fraction = if self.time_left > 0.0 {
            (dt / self.time_left).min(1.0)
        } else {
            1.0
        };

        if fraction > 0.0 {
            self.offset = self.offset.lerp(self.target, fraction);
        }

        self.time_left -= dt;
        if self.time_left <= 0.0 {
            // The offset stays wherever the last tick left it
            self.scrolling = false;
        }
    }

    /// Current offset.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Offset the camera is scrolling towards.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Seconds left for the current scroll.
    #[inline]
    #[must_use]
    pub const fn time_left(&self) -> f32 {
        self.time_left
    }

    /// Whether a scroll is still pending.
    #[inline]
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.scrolling
    }
}
