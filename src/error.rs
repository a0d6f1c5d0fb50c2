//! Errors that can occur while loading assets or manipulating sprites.

use std::path::PathBuf;

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

/// Shorthand result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong.
///
/// Frame and animation misses are cosmetic and are only reported, asset misses are returned to the caller.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum Error {
    /// A texture was requested that's not in the texture table.
    #[error("texture '{name}' is not loaded")]
    #[diagnostic(
        code(sprig::missing_texture),
        help("textures are registered by file stem, make sure the PNG exists in the graphics directory")
    )]
    MissingTexture {
        /// Name the texture was requested with.
        name: SmolStr,
    },
    /// A named frame doesn't exist on the sprite.
    #[error("could not find frame '{frame}'")]
    #[diagnostic(code(sprig::missing_frame))]
    MissingFrame {
        /// Name of the frame.
        frame: SmolStr,
    },
    /// A named frame doesn't exist on some of the layers of a layered sprite.
    ///
    /// All other layers did change.
    #[error("could not find frame '{frame}' on layers {layers:?}")]
    #[diagnostic(code(sprig::missing_layer_frames))]
    MissingLayerFrames {
        /// Name of the frame.
        frame: SmolStr,
        /// Layers that were left unchanged.
        layers: Vec<SmolStr>,
    },
    /// A frame index is not inside the images of a sprite.
    #[error("frame {index} is out of range for a sprite with {len} images")]
    #[diagnostic(code(sprig::frame_out_of_range))]
    FrameOutOfRange {
        /// Requested frame.
        index: usize,
        /// Amount of images in the sprite.
        len: usize,
    },
    /// An object was drawn without an image to show.
    #[error("object '{object}' has no image to draw")]
    #[diagnostic(code(sprig::missing_image))]
    MissingImage {
        /// Name of the object.
        object: SmolStr,
    },
    /// Text was drawn but no font is loaded.
    #[error("no font loaded to draw text '{text}'")]
    #[diagnostic(code(sprig::missing_font), help("call `Engine::load_content` first"))]
    MissingFont {
        /// Text that couldn't be drawn.
        text: SmolStr,
    },
    /// A sprite was created from an empty list of images.
    #[error("a sprite needs at least one image")]
    #[diagnostic(code(sprig::no_images))]
    NoImages,
    /// Reading a file or directory failed.
    #[error("error reading '{path}'")]
    #[diagnostic(code(sprig::io))]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Decoding a PNG failed.
    #[error("error decoding PNG '{path}'")]
    #[diagnostic(code(sprig::png_decode))]
    PngDecode {
        /// Path of the PNG.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: png::DecodingError,
    },
    /// The PNG has a pixel format that can't be converted to 8 bit RGBA.
    #[error("PNG '{path}' is not 8 bit RGB with an alpha channel")]
    #[diagnostic(code(sprig::unsupported_png))]
    UnsupportedPng {
        /// Path of the PNG.
        path: PathBuf,
    },
    /// Parsing the configuration failed.
    #[error("invalid configuration")]
    #[diagnostic(code(sprig::config))]
    Config(#[from] toml::de::Error),
}
