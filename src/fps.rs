//! Frames per second counter.

use glam::Vec2;
use rgb::RGBA8;

use crate::{
    backend::{Flip, FontRef, Renderer, TextDraw},
    config::BatchConfig,
};

/// Counts the frames drawn every second.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FpsCounter {
    /// Frames drawn in the current window.
    frames: u32,
    /// Milliseconds passed in the current window.
    elapsed_ms: f32,
    /// Frames drawn in the last full window.
    fps: u32,
}

impl FpsCounter {
    /// Let time pass, publishing the frame count every second.
    ///
    /// Must be done in the update tick.
    pub fn update(&mut self, dt: f32) {
        self.elapsed_ms += dt * 1000.0;

        if self.elapsed_ms >= 1000.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.elapsed_ms = 0.0;
        }
    }

    /// Count a drawn frame.
    #[inline]
    pub fn frame_drawn(&mut self) {
        self.frames += 1;
    }

    /// Frames drawn during the last full second.
    #[inline]
    #[must_use]
    pub const fn fps(&self) -> u32 {
        self.fps
    }

    /// Draw the counter in the top left corner.
    pub fn draw(&self, font: FontRef, renderer: &mut dyn Renderer) {
        let text = self.fps.to_string();

        renderer.begin(&BatchConfig::default());
        renderer.draw_text(&TextDraw {
            font,
            text: &text,
            position: Vec2::ZERO,
            tint: RGBA8::new(255, 255, 255, 255),
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: 1.0,
            flip: Flip::NONE,
        });
        renderer.end();
    }
}
