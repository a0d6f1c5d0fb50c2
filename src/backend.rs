//! Boundary with the host sprite-batch renderer.
//!
//! The engine never rasterizes anything itself, every pixel is drawn by an implementation of [`Renderer`].

use glam::Vec2;
use rgb::RGBA8;
use smol_str::SmolStr;

use crate::config::BatchConfig;

/// Opaque reference to a texture uploaded to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureRef(pub u32);

/// Opaque reference to a font loaded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontRef(pub u32);

/// Texture with its intrinsic size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Reference of the texture on the host.
    pub reference: TextureRef,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Name the texture is registered with.
    pub name: SmolStr,
}

impl Texture {
    /// Create a texture reference.
    #[inline]
    #[must_use]
    pub fn new(reference: TextureRef, width: u32, height: u32, name: impl Into<SmolStr>) -> Self {
        Self {
            reference,
            width,
            height,
            name: name.into(),
        }
    }
}

/// Mirror a sprite when drawing it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    /// Mirror along the vertical axis.
    pub horizontal: bool,
    /// Mirror along the horizontal axis.
    pub vertical: bool,
}

impl Flip {
    /// Don't mirror.
    pub const NONE: Self = Self {
        horizontal: false,
        vertical: false,
    };
    /// Mirror along the vertical axis.
    pub const HORIZONTAL: Self = Self {
        horizontal: true,
        vertical: false,
    };
    /// Mirror along the horizontal axis.
    pub const VERTICAL: Self = Self {
        horizontal: false,
        vertical: true,
    };
}

/// Integer rectangle on the back buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left.
    pub x: i32,
    /// Top.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// Construct from the position and size.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A single image draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDraw {
    /// Texture to draw.
    pub texture: TextureRef,
    /// Where on the back buffer the texture is stretched to.
    pub destination: Rect,
    /// Part of the texture to draw, `None` for all of it.
    pub source: Option<Rect>,
    /// Color multiplied with the texture.
    pub tint: RGBA8,
    /// Rotation in radians around the origin.
    pub rotation: f32,
    /// Point the texture rotates around and is positioned with.
    pub origin: Vec2,
    /// Mirroring.
    pub flip: Flip,
}

/// A single text draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw<'a> {
    /// Font to draw with.
    pub font: FontRef,
    /// Text to draw.
    pub text: &'a str,
    /// Top left position on the back buffer.
    pub position: Vec2,
    /// Color of the glyphs.
    pub tint: RGBA8,
    /// Rotation in radians around the origin.
    pub rotation: f32,
    /// Point the text rotates around.
    pub origin: Vec2,
    /// Uniform scale of the glyphs.
    pub scale: f32,
    /// Mirroring.
    pub flip: Flip,
}

/// Host sprite batch, texture storage and window.
///
/// Implement this for the framework the game runs on.
pub trait Renderer {
    /// Start a batch of draw calls.
    fn begin(&mut self, batch: &BatchConfig);

    /// Submit all draw calls since [`Self::begin`].
    fn end(&mut self);

    /// Queue an image.
    fn draw_image(&mut self, draw: &ImageDraw);

    /// Queue text.
    fn draw_text(&mut self, draw: &TextDraw<'_>);

    /// Upload RGBA pixels as a new texture.
    fn upload_texture(&mut self, width: u32, height: u32, pixels: &[RGBA8]) -> TextureRef;

    /// Load a font by name, `None` when it doesn't exist.
    fn load_font(&mut self, name: &str) -> Option<FontRef>;

    /// Resize the back buffer and switch between windowed and fullscreen.
    fn apply_resolution(&mut self, width: u32, height: u32, fullscreen: bool);

    /// Height of the drawable part of the window in pixels.
    fn viewport_height(&self) -> f32;
}
