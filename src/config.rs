//! Engine configuration.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::{Error, Result};

/// Initial engine configuration passed to [`crate::Engine::new`].
///
/// There's three ways to initialize the config:
///
/// # Example
///
/// ```rust
/// # use sprig::Config;
/// Config {
///   stretch: true,
///   ..Default::default()
/// };
/// ```
///
/// # Example
///
/// ```rust
/// # use sprig::Config;
/// Config::default().with_back_buffer_size(1280, 720);
/// ```
///
/// # Example
///
/// ```rust
/// # use sprig::Config;
/// let config = Config::from_toml_str("show_fps = true").unwrap();
/// assert!(config.show_fps);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Config {
    /// Horizontal resolution the game is designed for.
    ///
    /// When the back buffer is bigger or smaller everything is scaled from this resolution.
    ///
    /// Defaults to `1024`.
    pub design_width: u32,
    /// Vertical resolution the game is designed for.
    ///
    /// Defaults to `768`.
    pub design_height: u32,
    /// Horizontal resolution of the back buffer.
    ///
    /// Defaults to `1024`.
    pub back_buffer_width: u32,
    /// Vertical resolution of the back buffer.
    ///
    /// Defaults to `768`.
    pub back_buffer_height: u32,
    /// Scale each axis independently to fill the back buffer instead of keeping the aspect ratio.
    ///
    /// Defaults to `false`.
    pub stretch: bool,
    /// Request a fullscreen window.
    ///
    /// Defaults to `false`.
    pub fullscreen: bool,
    /// Whether [`crate::Engine::log`] records and shows anything.
    ///
    /// Defaults to `true`.
    pub log_enabled: bool,
    /// Also append all log lines to this file, prefixed with the UTC time as `[HH:MM:SS]`.
    ///
    /// Defaults to `None`.
    pub log_file: Option<PathBuf>,
    /// Amount of lines in the log overlay.
    ///
    /// Defaults to `10`.
    pub log_lines: usize,
    /// Show the frames per second in the top left corner.
    ///
    /// Defaults to `false`.
    pub show_fps: bool,
    /// Let text objects follow the camera, even when they are locked.
    ///
    /// Defaults to `false`.
    pub unlock_text_positions: bool,
    /// Only draw objects whose position is on the screen or within the bleed.
    ///
    /// Defaults to `false`.
    pub draw_only_on_screen: bool,
    /// Margin around the screen in which objects are still drawn when [`Self::draw_only_on_screen`] is set.
    ///
    /// Defaults to `(0.0, 0.0)`.
    pub on_screen_bleed: Vec2,
    /// Sprite batch options for drawing the objects.
    pub batch: BatchConfig,
    /// Root directory of all content.
    ///
    /// Defaults to `"Content"`.
    pub asset_dir: PathBuf,
    /// Directory inside the [`Self::asset_dir`] that's searched recursively for textures.
    ///
    /// Defaults to `"Graphics"`.
    pub graphics_dir: PathBuf,
    /// Name of the font used for text objects and overlays.
    ///
    /// Defaults to `"Default"`.
    pub default_font: SmolStr,
}

impl Config {
    /// Parse a configuration from a TOML string.
    ///
    /// Missing fields are set to their defaults.
    ///
    /// # Errors
    ///
    /// - When the TOML is invalid or a field has the wrong type.
    #[inline]
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    /// Read and parse a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// - When the file can't be read.
    /// - When the TOML is invalid or a field has the wrong type.
    #[inline]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&toml)
    }

    /// Set the resolution the game is designed for.
    ///
    /// Also sets the back buffer to the same size, call [`Self::with_back_buffer_size`] afterwards to change it.
    #[inline]
    #[must_use]
    pub fn with_design_size(mut self, width: u32, height: u32) -> Self {
        self.design_width = width;
        self.design_height = height;
        self.back_buffer_width = width;
        self.back_buffer_height = height;

        self
    }

    /// Set the resolution of the back buffer.
    #[inline]
    #[must_use]
    pub fn with_back_buffer_size(mut self, width: u32, height: u32) -> Self {
        self.back_buffer_width = width;
        self.back_buffer_height = height;

        self
    }

    /// Set whether to stretch the image to the back buffer instead of keeping the aspect ratio.
    #[inline]
    #[must_use]
    pub fn with_stretch(mut self, stretch: bool) -> Self {
        self.stretch = stretch;

        self
    }

    /// Set whether a fullscreen window is requested.
    #[inline]
    #[must_use]
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;

        self
    }

    /// Set whether the log overlay is enabled.
    #[inline]
    #[must_use]
    pub fn with_log_enabled(mut self, log_enabled: bool) -> Self {
        self.log_enabled = log_enabled;

        self
    }

    /// Also write log lines to a file, prefixed with the UTC time.
    #[inline]
    #[must_use]
    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = Some(log_file.into());

        self
    }

    /// Set the amount of lines shown in the log overlay.
    #[inline]
    #[must_use]
    pub fn with_log_lines(mut self, log_lines: usize) -> Self {
        self.log_lines = log_lines;

        self
    }

    /// Show the frames per second in the top left corner.
    #[inline]
    #[must_use]
    pub fn with_show_fps(mut self, show_fps: bool) -> Self {
        self.show_fps = show_fps;

        self
    }

    /// Let text objects follow the camera.
    #[inline]
    #[must_use]
    pub fn with_unlock_text_positions(mut self, unlock_text_positions: bool) -> Self {
        self.unlock_text_positions = unlock_text_positions;

        self
    }

    /// Only draw objects on the screen, with an extra margin around it.
    #[inline]
    #[must_use]
    pub fn with_draw_only_on_screen(mut self, bleed: impl Into<Vec2>) -> Self {
        self.draw_only_on_screen = true;
        self.on_screen_bleed = bleed.into();

        self
    }

    /// Set the sprite batch options.
    #[inline]
    #[must_use]
    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;

        self
    }

    /// Set the root content directory.
    #[inline]
    #[must_use]
    pub fn with_asset_dir(mut self, asset_dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = asset_dir.into();

        self
    }

    /// Set the name of the default font.
    #[inline]
    #[must_use]
    pub fn with_default_font(mut self, default_font: impl Into<SmolStr>) -> Self {
        self.default_font = default_font.into();

        self
    }

    /// Directory that's searched for textures.
    #[inline]
    #[must_use]
    pub fn graphics_path(&self) -> PathBuf {
        self.asset_dir.join(&self.graphics_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            design_width: 1024,
            design_height: 768,
            back_buffer_width: 1024,
            back_buffer_height: 768,
            stretch: false,
            fullscreen: false,
            log_enabled: true,
            log_file: None,
            log_lines: 10,
            show_fps: false,
            unlock_text_positions: false,
            draw_only_on_screen: false,
            on_screen_bleed: Vec2::ZERO,
            batch: BatchConfig::default(),
            asset_dir: PathBuf::from("Content"),
            graphics_dir: PathBuf::from("Graphics"),
            default_font: SmolStr::new_inline("Default"),
        }
    }
}

/// Options passed to [`crate::backend::Renderer::begin`] when drawing the objects.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Order in which the batch submits its draws.
    pub sort_mode: SortMode,
    /// How colors are blended.
    pub blend: BlendMode,
    /// How textures are sampled.
    pub sampler: SamplerMode,
    /// Depth & stencil buffer usage.
    pub depth_stencil: DepthStencilMode,
    /// Which triangles are culled.
    pub rasterizer: RasterizerMode,
}

/// Order in which a batch submits its draws.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SortMode {
    /// Draw in the order the calls were made, when the batch ends.
    #[default]
    Deferred,
    /// Draw every call immediately.
    Immediate,
    /// Group draws by texture.
    Texture,
    /// Sort back to front by layer depth.
    BackToFront,
    /// Sort front to back by layer depth.
    FrontToBack,
}

/// How colors are blended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum BlendMode {
    /// Premultiplied alpha blending.
    #[default]
    AlphaBlend,
    /// Add the colors.
    Additive,
    /// Ignore the alpha channel.
    Opaque,
    /// Straight alpha blending.
    NonPremultiplied,
}

/// How textures are sampled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SamplerMode {
    /// Linear filtering, clamped at the edges.
    #[default]
    LinearClamp,
    /// Linear filtering, wrapping around the edges.
    LinearWrap,
    /// Nearest neighbor filtering, clamped at the edges.
    PointClamp,
    /// Nearest neighbor filtering, wrapping around the edges.
    PointWrap,
}

/// Depth & stencil buffer usage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DepthStencilMode {
    /// Don't use the depth buffer.
    #[default]
    None,
    /// Read and write the depth buffer.
    Default,
    /// Only read the depth buffer.
    DepthRead,
}

/// Which triangles are culled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum RasterizerMode {
    /// Cull triangles with counter-clockwise winding.
    #[default]
    CullCounterClockwise,
    /// Cull triangles with clockwise winding.
    CullClockwise,
    /// Don't cull anything.
    CullNone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = Config::from_toml_str(
            r#"
            design_width = 800
            stretch = true
            on_screen_bleed = [16.0, 8.0]

            [batch]
            blend = "additive"
            "#,
        )
        .unwrap();

        assert_eq!(config.design_width, 800);
        assert_eq!(config.design_height, 768);
        assert!(config.stretch);
        assert_eq!(config.on_screen_bleed, Vec2::new(16.0, 8.0));
        assert_eq!(config.batch.blend, BlendMode::Additive);
        assert_eq!(config.batch.sampler, SamplerMode::LinearClamp);
        assert_eq!(config.log_lines, 10);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml_str("log_lines = \"ten\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn design_size_resets_back_buffer() {
        let config = Config::default()
            .with_back_buffer_size(1280, 720)
            .with_design_size(640, 480);

        assert_eq!((config.back_buffer_width, config.back_buffer_height), (640, 480));
    }
}
