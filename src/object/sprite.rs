//! Sprites with one or more images and simple frame animations.

use glam::Vec2;
use hashbrown::HashMap;
use rgb::RGBA8;
use smol_str::SmolStr;

use super::{DisplayObject, DrawContext, ObjectBase};
use crate::{
    backend::{Flip, ImageDraw, Rect, Renderer, Texture},
    error::{Error, Result},
};

/// Looping animation through consecutive frames of a sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Identifies the animation.
    pub name: SmolStr,
    /// Name of the frame where the animation starts, must be known by the sprite.
    pub starting_frame: SmolStr,
    /// Amount of frames, counted from the starting frame.
    pub frame_count: u32,
    /// How long each frame is shown.
    pub ms_per_frame: f32,
    /// Current time position in the animation.
    pub position_ms: f32,
}

impl Animation {
    /// Define an animation starting at the beginning.
    #[inline]
    #[must_use]
    pub fn new(
        name: impl Into<SmolStr>,
        starting_frame: impl Into<SmolStr>,
        frame_count: u32,
        ms_per_frame: f32,
    ) -> Self {
        Self {
            name: name.into(),
            starting_frame: starting_frame.into(),
            frame_count,
            ms_per_frame,
            position_ms: 0.0,
        }
    }

    /// Total length of a single loop.
    #[inline]
    #[must_use]
    pub fn duration_ms(&self) -> f32 {
        self.frame_count as f32 * self.ms_per_frame
    }

    /// Advance the time position, wrapping around at the end.
    ///
    /// Animations without a duration don't move.
    pub fn advance(&mut self, ms: f32) {
        let duration = self.duration_ms();
        if duration <= 0.0 {
            return;
        }

        self.position_ms = (self.position_ms + ms).rem_euclid(duration);
    }

    /// Frame relative to the starting frame at the current time position.
    #[inline]
    #[must_use]
    pub fn frame_offset(&self) -> usize {
        if self.ms_per_frame <= 0.0 {
            return 0;
        }

        // Floating point wrapping could land exactly on the end
        ((self.position_ms / self.ms_per_frame).floor() as usize)
            .min(self.frame_count.saturating_sub(1) as usize)
    }
}

/// Drawable object showing one of its images.
///
/// Create them with [`crate::Engine::create_sprite`] and related functions to put them in the draw list, or with the constructors here to build layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Shared state.
    pub base: ObjectBase,
    /// Images that can be shown.
    images: Vec<Texture>,
    /// Index of the image being shown.
    current_image: usize,
    /// Image indices by frame name.
    frames: HashMap<SmolStr, usize>,
    /// Animations by name.
    animations: HashMap<SmolStr, Animation>,
    /// Animation being played.
    current_animation: Option<SmolStr>,
    /// Keep the sprite at the same place on the screen when the camera moves.
    pub position_locked: bool,
    /// Rotation in radians.
    pub rotation: f32,
    /// Multiplier for the position when drawing.
    ///
    /// A sprite at `(15, 30)` with a position scale of `2.0` is drawn at `(30, 60)`.
    pub position_scale: f32,
    /// Point of the image that's placed at the position, defaults to the top left.
    pub anchor_point: Vec2,
    /// Color multiplied with the image.
    pub tint: RGBA8,
    /// Mirroring.
    pub flip: Flip,
}

impl Sprite {
    /// Create a sprite with a single image.
    ///
    /// The image can be selected by the texture name as frame.
    #[inline]
    #[must_use]
    pub fn new(texture: Texture) -> Self {
        let name = texture.name.clone();
        let mut frames = HashMap::new();
        frames.insert(name.clone(), 0);

        Self {
            base: ObjectBase::named(name),
            images: vec![texture],
            frames,
            ..Self::empty()
        }
    }

    /// Create a sprite with multiple images, each selectable by its texture name as frame.
    ///
    /// The sprite is named after the first texture.
    ///
    /// # Errors
    ///
    /// - When no textures are passed.
    pub fn with_frames(textures: Vec<Texture>) -> Result<Self> {
        let name = textures.first().ok_or(Error::NoImages)?.name.clone();
        let frames = textures
            .iter()
            .enumerate()
            .map(|(index, texture)| (texture.name.clone(), index))
            .collect();

        Ok(Self {
            base: ObjectBase::named(name),
            images: textures,
            frames,
            ..Self::empty()
        })
    }

    /// Sprite without any images.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            base: ObjectBase::default(),
            images: Vec::new(),
            current_image: 0,
            frames: HashMap::new(),
            animations: HashMap::new(),
            current_animation: None,
            position_locked: false,
            rotation: 0.0,
            position_scale: 1.0,
            anchor_point: Vec2::ZERO,
            tint: RGBA8::new(255, 255, 255, 255),
            flip: Flip::NONE,
        }
    }

    /// Image being shown, `None` when the sprite has no images.
    #[inline]
    #[must_use]
    pub fn image(&self) -> Option<&Texture> {
        self.images.get(self.current_image)
    }

    /// All images.
    #[inline]
    #[must_use]
    pub fn images(&self) -> &[Texture] {
        &self.images
    }

    /// Index of the image being shown.
    #[inline]
    #[must_use]
    pub const fn current_image(&self) -> usize {
        self.current_image
    }

    /// Give an image index a frame name, used by [`Self::change_frame_by_name`] and animations.
    #[inline]
    pub fn set_frame_name(&mut self, name: impl Into<SmolStr>, index: usize) {
        self.frames.insert(name.into(), index);
    }

    /// Image index of a frame name.
    #[inline]
    #[must_use]
    pub fn frame_index(&self, name: &str) -> Option<usize> {
        self.frames.get(name).copied()
    }

    /// Show the image at the index.
    ///
    /// # Errors
    ///
    /// - When the index is outside of the images, the frame is not changed.
    pub fn change_frame(&mut self, index: usize) -> Result<()> {
        if index >= self.images.len() {
            return Err(Error::FrameOutOfRange {
                index,
                len: self.images.len(),
            });
        }

        self.current_image = index;

        Ok(())
    }

    /// Show the image with the frame name.
    ///
    /// # Errors
    ///
    /// - When the frame name is unknown, the frame is not changed.
    pub fn change_frame_by_name(&mut self, name: &str) -> Result<()> {
        let index = self.frame_index(name).ok_or_else(|| Error::MissingFrame {
            frame: SmolStr::new(name),
        })?;

        self.change_frame(index)
    }

    /// Register an animation, replacing any with the same name.
    #[inline]
    pub fn add_animation(&mut self, name: impl Into<SmolStr>, animation: Animation) {
        self.animations.insert(name.into(), animation);
    }

    /// Animation by name.
    #[inline]
    #[must_use]
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    /// Play an animation.
    ///
    /// An empty name stops playing.
    /// Names that aren't registered are accepted and simply don't animate.
    #[inline]
    pub fn change_animation(&mut self, name: impl Into<SmolStr>) {
        let name = name.into();
        self.current_animation = (!name.is_empty()).then_some(name);
    }

    /// Stop playing, keeping the current frame.
    #[inline]
    pub fn stop_animation(&mut self) {
        self.current_animation = None;
    }

    /// Name of the animation being played.
    #[inline]
    #[must_use]
    pub fn current_animation(&self) -> Option<&str> {
        self.current_animation.as_deref()
    }

    /// Calculate where on the back buffer the image lands.
    fn image_draw(&self, image: &Texture, ctx: &DrawContext) -> ImageDraw {
        let offset = if self.position_locked {
            Vec2::ZERO
        } else {
            -ctx.camera
        };
        let scaling = ctx.scaling;
        let position = self.base.position + offset;

        let width = image.width as f32;
        let height = image.height as f32;
        let size = Vec2::new(
            width * self.base.scale * scaling.x,
            height * self.base.scale * scaling.y,
        );

        #[allow(clippy::float_cmp)]
        let (x, y, origin) = if self.rotation == 0.0 {
            (
                (position.x * scaling.x).round() * self.position_scale,
                (position.y * scaling.y).round() * self.position_scale,
                self.anchor_point,
            )
        } else {
            // Rotate around the center
            (
                (position.x * scaling.x + width / self.position_scale / 2.0).round()
                    * self.position_scale,
                (position.y * scaling.y + height / self.position_scale / 2.0).round()
                    * self.position_scale,
                size / 2.0,
            )
        };

        ImageDraw {
            texture: image.reference,
            destination: Rect::new(
                x as i32,
                y as i32,
                size.x.round() as i32,
                size.y.round() as i32,
            ),
            source: None,
            tint: self.tint,
            rotation: self.rotation,
            origin,
            flip: self.flip,
        }
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::empty()
    }
}

impl DisplayObject for Sprite {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn draw(&self, ctx: &DrawContext, renderer: &mut dyn Renderer) -> Result<()> {
        let image = self.image().ok_or_else(|| Error::MissingImage {
            object: self.base.name.clone(),
        })?;

        renderer.draw_image(&self.image_draw(image, ctx));

        Ok(())
    }

    fn update(&mut self, dt: f32) {
        let Some(name) = &self.current_animation else {
            return;
        };

        // Unknown animations are silently ignored
        let Some(animation) = self.animations.get_mut(name) else {
            return;
        };
        animation.advance(dt * 1000.0);

        let Some(start) = self.frames.get(&animation.starting_frame).copied() else {
            return;
        };
        let frame = start + animation.frame_offset();

        if frame < self.images.len() {
            self.current_image = frame;
        } else {
            log::warn!(
                "Animation '{name}' of '{}' reached frame {frame} but there are only {} images",
                self.base.name,
                self.images.len()
            );
        }
    }

    fn free(&mut self) {
        self.images.clear();
        self.current_image = 0;
    }

    fn position_locked(&self) -> bool {
        self.position_locked
    }
}
