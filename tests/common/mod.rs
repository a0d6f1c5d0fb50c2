//! Renderer for running tests which records draw calls instead of showing them.

#![allow(dead_code)]

use sprig::{
    backend::{FontRef, ImageDraw, Renderer, TextDraw, TextureRef},
    config::BatchConfig,
    Vec2, RGBA8,
};

/// Show the engine logs when a test fails.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Everything the engine asked the renderer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Begin,
    End,
    Image(ImageDraw),
    Text {
        text: String,
        position: Vec2,
        scale: f32,
    },
    Upload {
        width: u32,
        height: u32,
    },
    Resolution {
        width: u32,
        height: u32,
        fullscreen: bool,
    },
}

/// Test renderer.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Calls in the order they were made.
    pub calls: Vec<Call>,
    /// Whether a font can be loaded.
    pub without_font: bool,
    /// Textures uploaded so far.
    pub uploaded: u32,
}

impl RecordingRenderer {
    /// Textures drawn, in order.
    pub fn images(&self) -> Vec<TextureRef> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Image(draw) => Some(draw.texture),
                _ => None,
            })
            .collect()
    }

    /// Texts drawn, in order.
    pub fn texts(&self) -> Vec<(String, Vec2, f32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Text {
                    text,
                    position,
                    scale,
                } => Some((text.clone(), *position, *scale)),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self, _batch: &BatchConfig) {
        self.calls.push(Call::Begin);
    }

    fn end(&mut self) {
        self.calls.push(Call::End);
    }

    fn draw_image(&mut self, draw: &ImageDraw) {
        self.calls.push(Call::Image(draw.clone()));
    }

    fn draw_text(&mut self, draw: &TextDraw) {
        self.calls.push(Call::Text {
            text: draw.text.to_owned(),
            position: draw.position,
            scale: draw.scale,
        });
    }

    fn upload_texture(&mut self, width: u32, height: u32, pixels: &[RGBA8]) -> TextureRef {
        assert_eq!(pixels.len(), (width * height) as usize);
        self.calls.push(Call::Upload { width, height });
        self.uploaded += 1;

        TextureRef(self.uploaded)
    }

    fn load_font(&mut self, _name: &str) -> Option<FontRef> {
        (!self.without_font).then_some(FontRef(0))
    }

    fn apply_resolution(&mut self, width: u32, height: u32, fullscreen: bool) {
        self.calls.push(Call::Resolution {
            width,
            height,
            fullscreen,
        });
    }

    fn viewport_height(&self) -> f32 {
        768.0
    }
}
