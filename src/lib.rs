#![forbid(unsafe_code)]

//! Small 2D sprite engine for games drawn with a sprite batch.
//!
//! # Features
//!
//! - Depth sorted draw list, deeper objects are drawn behind shallower ones.
//! - Sprites with multiple named frames and time-based animations.
//! - Layered sprites, for characters composed of a body, armor, a weapon, etc.
//! - Camera with smooth eased scrolling, objects can be locked to the screen.
//! - Designed resolution independent from the back buffer, stretched or letterboxed.
//! - Separate loading screen that can be toggled from another thread.
//! - Debug log overlay mirrored to a file and an FPS counter.
//!
//! # Goals
//!
//! - Small API that can be put on top of any renderer with a sprite batch, implement [`Renderer`] for it.
//! - Mistakes in content, such as a missing animation frame, should be reported on screen instead of crashing the game.
//!
//! # Non-Goals
//!
//! - Windowing, input and audio, these are left to the host.
//! - Physics or collision detection.
//!
//! # Usage
//!
//! Create an [`Engine`], load the content through a [`Renderer`] and call [`Engine::update`] and [`Engine::draw`] every frame.
//!
//! ```
//! use sprig::{
//!     backend::{ImageDraw, Renderer, TextDraw, TextureRef, FontRef},
//!     config::BatchConfig,
//!     Config, Engine, RGBA8,
//! };
//!
//! /// Renderer that draws nothing.
//! struct Headless;
//!
//! impl Renderer for Headless {
//!     fn begin(&mut self, _batch: &BatchConfig) {}
//!     fn end(&mut self) {}
//!     fn draw_image(&mut self, _draw: &ImageDraw) {}
//!     fn draw_text(&mut self, _draw: &TextDraw) {}
//!     fn upload_texture(&mut self, _width: u32, _height: u32, _pixels: &[RGBA8]) -> TextureRef {
//!         TextureRef(0)
//!     }
//!     fn load_font(&mut self, _name: &str) -> Option<FontRef> {
//!         Some(FontRef(0))
//!     }
//!     fn apply_resolution(&mut self, _width: u32, _height: u32, _fullscreen: bool) {}
//!     fn viewport_height(&self) -> f32 {
//!         768.0
//!     }
//! }
//!
//! let mut renderer = Headless;
//! let mut engine = Engine::new(Config::default().with_asset_dir("does-not-exist"));
//! engine.load_content(&mut renderer).ok();
//!
//! let score = engine.create_text("Score: 0", (10.0, 10.0));
//!
//! // Every frame
//! engine.update(1.0 / 60.0);
//! engine.draw(&mut renderer);
//! # assert!(engine.get(score).is_some());
//! ```
//!
//! # Configuration
//!
//! The [`Config`] can be built in code with its `with_*` methods, or read from a TOML file:
//!
//! ```toml
//! design_width = 320
//! design_height = 240
//! back_buffer_width = 1280
//! back_buffer_height = 960
//! show_fps = true
//! log_file = "log.txt"
//! ```

pub mod assets;
pub mod backend;
pub mod camera;
pub mod config;
mod engine;
pub mod error;
pub mod fps;
pub mod math;
pub mod object;
pub mod overlay;

pub use backend::Renderer;
pub use config::Config;
pub use engine::{Engine, LoadingFlag, ObjectId};
pub use error::{Error, Result};
pub use glam::Vec2;
pub use object::{
    layered::{Layer, LayeredSprite},
    sprite::{Animation, Sprite},
    text::Text,
    DisplayObject,
};
pub use rgb::RGBA8;
