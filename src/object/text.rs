//! Text that can be placed in the draw list like a sprite.

use glam::Vec2;
use rgb::RGBA8;
use smol_str::SmolStr;

use super::{DisplayObject, DrawContext, ObjectBase};
use crate::{
    backend::{Flip, Renderer, TextDraw},
    error::{Error, Result},
};

/// Text drawn with the default font.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Shared state.
    pub base: ObjectBase,
    /// Text to display.
    pub text: String,
    /// Color of the glyphs.
    pub tint: RGBA8,
    /// Keep the text at the same place on the screen when the camera moves.
    ///
    /// Defaults to `true`, can be overruled for all text with [`crate::Config::unlock_text_positions`].
    pub position_locked: bool,
}

impl Text {
    /// Create white text at `(0, 0)`, locked to the screen.
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ObjectBase::default(),
            text: text.into(),
            tint: RGBA8::new(255, 255, 255, 255),
            position_locked: true,
        }
    }
}

impl DisplayObject for Text {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn draw(&self, ctx: &DrawContext, renderer: &mut dyn Renderer) -> Result<()> {
        let font = ctx.font.ok_or_else(|| Error::MissingFont {
            text: SmolStr::new(&self.text),
        })?;

        let camera = if ctx.unlock_text_positions || !self.position_locked {
            -ctx.camera
        } else {
            Vec2::ZERO
        };
        let position = (self.base.position + camera) * Vec2::new(ctx.scaling.x, ctx.scaling.y);

        renderer.draw_text(&TextDraw {
            font,
            text: &self.text,
            position,
            tint: self.tint,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: self.base.scale * ctx.scaling.no_stretch,
            flip: Flip::NONE,
        });

        Ok(())
    }

    fn update(&mut self, _dt: f32) {}

    fn free(&mut self) {}

    fn position_locked(&self) -> bool {
        self.position_locked
    }
}
