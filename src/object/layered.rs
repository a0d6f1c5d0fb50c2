//! Sprites composed of multiple overlaid sprites.
//!
//! For example a base body with armor and a weapon on top, where the weapon can be swapped by replacing its layer.

use glam::Vec2;
use smol_str::SmolStr;

use super::{
    sprite::{Animation, Sprite},
    DisplayObject, DrawContext, ObjectBase,
};
use crate::{
    backend::{Renderer, Texture},
    error::{Error, Result},
};

/// Named sprite inside a [`LayeredSprite`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Unique name of the layer, such as `"weapon"`.
    pub name: SmolStr,
    /// Sprite shown for this layer.
    pub sprite: Sprite,
    /// Position relative to the layered sprite.
    pub offset: Vec2,
}

impl Layer {
    /// Create a layer without an offset.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<SmolStr>, sprite: Sprite) -> Self {
        Self {
            name: name.into(),
            sprite,
            offset: Vec2::ZERO,
        }
    }
}

/// Sprite made of layers drawn on top of each other in the order they were added.
///
/// Frame and animation changes are applied to every layer, so all layers should share the same frame names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayeredSprite {
    /// Shared state.
    pub base: ObjectBase,
    /// Layers, the first is drawn at the bottom.
    layers: Vec<Layer>,
    /// Keep all layers at the same place on the screen when the camera moves.
    position_locked: bool,
}

impl LayeredSprite {
    /// Create without any layers.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sprite as a layer.
    ///
    /// If a layer with the same name exists its sprite is replaced, keeping its place and offset.
    /// The sprite takes over the position lock of the layered sprite.
    #[inline]
    pub fn add_layer(&mut self, name: impl Into<SmolStr>, mut sprite: Sprite) {
        let name = name.into();
        sprite.position_locked = self.position_locked;

        if let Some(layer) = self.layer_mut(&name) {
            layer.sprite = sprite;
        } else {
            self.layers.push(Layer::new(name, sprite));
        }
    }

    /// Add a texture as a layer, positioned at the layered sprite.
    ///
    /// If a layer with the same name exists its sprite is replaced, keeping its place and offset.
    #[inline]
    pub fn add_layer_texture(&mut self, name: impl Into<SmolStr>, texture: Texture) {
        let name = name.into();

        let mut sprite = Sprite::new(texture);
        sprite.base.name = name.clone();
        let offset = self.layer(&name).map_or(Vec2::ZERO, |layer| layer.offset);
        sprite.set_position(self.base.position + offset);

        self.add_layer(name, sprite);
    }

    /// Add a fully defined layer.
    ///
    /// If a layer with the same name exists it's replaced entirely, keeping its place.
    /// The sprite takes over the position lock of the layered sprite.
    #[inline]
    pub fn insert_layer(&mut self, mut layer: Layer) {
        layer.sprite.position_locked = self.position_locked;
        if let Some(existing) = self.layer_mut(&layer.name) {
            *existing = layer;
        } else {
            self.layers.push(layer);
        }
    }

    /// Remove the layer with the name, if it exists.
    ///
    /// # Returns
    ///
    /// - The removed layer, `None` if it didn't exist.
    #[inline]
    pub fn remove_layer(&mut self, name: &str) -> Option<Layer> {
        let index = self.layers.iter().position(|layer| layer.name == name)?;

        Some(self.layers.remove(index))
    }

    /// Get the layer with the name.
    #[inline]
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Get the layer with the name, mutable.
    #[inline]
    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.name == name)
    }

    /// All layers from bottom to top.
    #[inline]
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Set the offset of a layer and move it accordingly.
    ///
    /// # Returns
    ///
    /// - `false` when the layer doesn't exist.
    pub fn set_layer_offset(&mut self, name: &str, offset: impl Into<Vec2>) -> bool {
        let position = self.base.position;
        let Some(layer) = self.layer_mut(name) else {
            return false;
        };

        layer.offset = offset.into();
        layer.sprite.set_position(position + layer.offset);

        true
    }

    /// Image of the bottom layer.
    #[inline]
    #[must_use]
    pub fn image(&self) -> Option<&Texture> {
        self.layers.first().and_then(|layer| layer.sprite.image())
    }

    /// Show the image at the index on every layer.
    ///
    /// # Errors
    ///
    /// - When a layer doesn't have that many images, that layer is not changed but all others are.
    pub fn change_frame(&mut self, index: usize) -> Result<()> {
        let mut result = Ok(());
        for layer in &mut self.layers {
            if let Err(err) = layer.sprite.change_frame(index) {
                log::error!("Layer '{}': {err}", layer.name);
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }

        result
    }

    /// Show the frame with the name on every layer.
    ///
    /// # Errors
    ///
    /// - When some layers don't know the frame, those layers are not changed but all others are.
    pub fn change_frame_by_name(&mut self, name: &str) -> Result<()> {
        let failed = self
            .layers
            .iter_mut()
            .filter_map(|layer| {
                layer.sprite.change_frame_by_name(name).err().map(|err| {
                    log::error!("Layer '{}': {err}", layer.name);

                    layer.name.clone()
                })
            })
            .collect::<Vec<_>>();

        if failed.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingLayerFrames {
                frame: SmolStr::new(name),
                layers: failed,
            })
        }
    }

    /// Register an animation on every layer.
    pub fn add_animation(&mut self, name: impl Into<SmolStr>, animation: &Animation) {
        let name = name.into();
        for layer in &mut self.layers {
            layer.sprite.add_animation(name.clone(), animation.clone());
        }
    }

    /// Play an animation on every layer, an empty name stops them.
    pub fn change_animation(&mut self, name: impl Into<SmolStr>) {
        let name = name.into();
        for layer in &mut self.layers {
            layer.sprite.change_animation(name.clone());
        }
    }

    /// Stop the animation on every layer.
    pub fn stop_animation(&mut self) {
        for layer in &mut self.layers {
            layer.sprite.stop_animation();
        }
    }

    /// Keep all layers at the same place on the screen when the camera moves.
    pub fn set_position_locked(&mut self, position_locked: bool) {
        self.position_locked = position_locked;
        for layer in &mut self.layers {
            layer.sprite.position_locked = position_locked;
        }
    }
}

impl DisplayObject for LayeredSprite {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn draw(&self, ctx: &DrawContext, renderer: &mut dyn Renderer) -> Result<()> {
        // Keep drawing the other layers when one fails
        let mut result = Ok(());
        for layer in &self.layers {
            if let Err(err) = layer.sprite.draw(ctx, renderer) {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }

        result
    }

    fn update(&mut self, dt: f32) {
        for layer in &mut self.layers {
            layer.sprite.update(dt);
        }
    }

    fn free(&mut self) {
        for layer in &mut self.layers {
            layer.sprite.free();
        }
    }

    fn set_x(&mut self, x: f32) {
        for layer in &mut self.layers {
            layer.sprite.set_x(x + layer.offset.x);
        }
        self.base.position.x = x;
    }

    fn set_y(&mut self, y: f32) {
        for layer in &mut self.layers {
            layer.sprite.set_y(y + layer.offset.y);
        }
        self.base.position.y = y;
    }

    fn position_locked(&self) -> bool {
        self.position_locked
    }
}
