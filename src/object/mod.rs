//! Everything that can be put in the draw list of the engine.

pub mod layered;
pub mod sprite;
pub mod text;

use std::cmp::Ordering;

use downcast_rs::Downcast;
use glam::Vec2;
use smol_str::SmolStr;

use crate::{
    backend::{FontRef, Renderer},
    error::Result,
    math::Scaling,
};

/// State shared by every displayable object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectBase {
    /// Position in the designed resolution.
    pub position: Vec2,
    /// Draw priority, higher values are drawn behind lower values.
    pub depth: f32,
    /// Size multiplier.
    pub scale: f32,
    /// When `false` the object is neither drawn nor updated.
    pub enabled: bool,
    /// Not used by the engine, helps identifying objects.
    pub name: SmolStr,
}

impl ObjectBase {
    /// Create with a name at `(0, 0)`.
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            depth: 0.0,
            scale: 1.0,
            enabled: true,
            name: SmolStr::new_inline("unnamed object"),
        }
    }
}

/// Frame state needed for drawing an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawContext {
    /// Camera offset, subtracted from positions of objects not locked to the screen.
    pub camera: Vec2,
    /// Designed resolution to back buffer scaling.
    pub scaling: Scaling,
    /// Font for drawing text, `None` if not loaded.
    pub font: Option<FontRef>,
    /// Let text follow the camera even when it's locked.
    pub unlock_text_positions: bool,
}

impl Default for DrawContext {
    fn default() -> Self {
        Self {
            camera: Vec2::ZERO,
            scaling: Scaling::default(),
            font: None,
            unlock_text_positions: false,
        }
    }
}

/// Object that can be drawn and updated by the engine.
///
/// Implemented by [`sprite::Sprite`], [`layered::LayeredSprite`] and [`text::Text`].
/// Use [`crate::Engine::object`] to get the concrete type back from the engine.
pub trait DisplayObject: Downcast {
    /// Shared state.
    fn base(&self) -> &ObjectBase;

    /// Shared state, mutable.
    fn base_mut(&mut self) -> &mut ObjectBase;

    /// Queue the draw calls for this object.
    ///
    /// # Errors
    ///
    /// - When there's nothing to draw with, such as a sprite without images.
    fn draw(&self, ctx: &DrawContext, renderer: &mut dyn Renderer) -> Result<()>;

    /// Let time pass.
    ///
    /// # Arguments
    ///
    /// * `dt` - Seconds since the last update.
    fn update(&mut self, dt: f32);

    /// Release all references to images.
    fn free(&mut self);

    /// Set the horizontal position.
    fn set_x(&mut self, x: f32) {
        self.base_mut().position.x = x;
    }

    /// Set the vertical position.
    fn set_y(&mut self, y: f32) {
        self.base_mut().position.y = y;
    }

    /// Set the position.
    fn set_position(&mut self, position: Vec2) {
        self.set_x(position.x);
        self.set_y(position.y);
    }

    /// Whether the object stays at the same place on the screen regardless of the camera.
    fn position_locked(&self) -> bool {
        false
    }
}
downcast_rs::impl_downcast!(DisplayObject);

/// Order objects so the deepest comes first.
///
/// Objects with a higher depth are drawn behind objects with a lower depth, so they must be drawn first.
#[inline]
#[must_use]
pub fn depth_order(a: &dyn DisplayObject, b: &dyn DisplayObject) -> Ordering {
    b.base().depth.total_cmp(&a.base().depth)
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{depth_order, text::Text, DisplayObject};

    #[test]
    fn deeper_sorts_first() {
        let mut back = Text::new("back");
        back.base_mut().depth = 10.0;
        let mut front = Text::new("front");
        front.base_mut().depth = -10.0;

        assert_eq!(depth_order(&back, &front), Ordering::Less);
        assert_eq!(depth_order(&front, &back), Ordering::Greater);
        assert_eq!(depth_order(&front, &front), Ordering::Equal);
    }
}
