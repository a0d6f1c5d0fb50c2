//! Engine owning all objects and driving the update and draw passes.

use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use glam::Vec2;
use hashbrown::HashMap;
use rgb::RGBA8;
use smol_str::SmolStr;

use crate::{
    assets::Textures,
    backend::{Flip, FontRef, Renderer, TextDraw, Texture},
    camera::Camera,
    config::Config,
    error::{Error, Result},
    fps::FpsCounter,
    math::Scaling,
    object::{
        depth_order, layered::LayeredSprite, sprite::Sprite, text::Text, DisplayObject,
        DrawContext,
    },
    overlay::DebugLog,
};

/// Depth given to text objects created with [`Engine::create_text`], in front of most sprites.
const TEXT_DEPTH: f32 = -100.0;

/// Handle to an object owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

/// Shared switch between the loading screen and the normal scene.
///
/// Can be cloned and toggled from another thread, such as a background loader.
/// Nothing is synchronized beyond the flag itself: the last write wins.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    /// Show or hide the loading screen.
    #[inline]
    pub fn set(&self, loading: bool) {
        self.0.store(loading, Ordering::Relaxed);
    }

    /// Whether the loading screen is shown.
    #[inline]
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Owner of every displayable object, the camera, the textures and the debug overlays.
///
/// Create a single one for the game and pass it to whatever drives the frame loop.
/// Call [`Self::update`] and then [`Self::draw`] once every frame.
///
/// The engine is not meant to be shared between threads, only the [`LoadingFlag`] is.
///
/// # Example
///
/// ```
/// use sprig::{backend::{Texture, TextureRef}, Config, Engine};
///
/// let mut engine = Engine::new(Config::default());
/// engine.insert_texture(Texture::new(TextureRef(0), 32, 32, "player"));
///
/// let player = engine.create_sprite("player", (100.0, 200.0), 1.0).unwrap();
/// engine.scroll_to((50.0, 0.0), 0.5);
///
/// // In the game loop
/// engine.update(1.0 / 60.0);
/// # assert!(engine.get(player).is_some());
/// ```
pub struct Engine {
    /// User supplied configuration.
    config: Config,
    /// Every object by handle.
    objects: HashMap<ObjectId, Box<dyn DisplayObject>>,
    /// Handle given to the next object.
    next_id: u64,
    /// Objects of the normal scene, sorted every draw.
    draw_list: Vec<ObjectId>,
    /// Objects shown instead of the normal scene while loading.
    loading_list: Vec<ObjectId>,
    /// Whether the loading screen is shown.
    loading: LoadingFlag,
    /// Whether the last object pass drew the loading screen.
    loading_frame_presented: bool,
    /// Offset for everything not locked to the screen.
    camera: Camera,
    /// Textures by name.
    textures: Textures,
    /// Font for text objects and overlays.
    font: Option<FontRef>,
    /// Log overlay.
    debug_log: DebugLog,
    /// Frames per second counter.
    fps: FpsCounter,
}

/// Setup.
impl Engine {
    /// Create an engine without any objects or textures.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let debug_log = DebugLog::new(
            config.log_lines,
            config.log_enabled,
            config.log_file.as_deref(),
        );

        log::debug!(
            "Creating engine with a designed resolution of {}x{}",
            config.design_width,
            config.design_height
        );

        Self {
            config,
            objects: HashMap::new(),
            next_id: 0,
            draw_list: Vec::new(),
            loading_list: Vec::new(),
            loading: LoadingFlag::default(),
            loading_frame_presented: false,
            camera: Camera::default(),
            textures: Textures::default(),
            font: None,
            debug_log,
            fps: FpsCounter::default(),
        }
    }

    /// Apply the configured resolution, load every texture in the graphics directory and the default font.
    ///
    /// Must be called once the renderer is ready and before creating sprites from texture names.
    ///
    /// # Returns
    ///
    /// - Amount of textures loaded.
    ///
    /// # Errors
    ///
    /// - When a texture could not be read or decoded.
    pub fn load_content(&mut self, renderer: &mut dyn Renderer) -> Result<usize> {
        renderer.apply_resolution(
            self.config.back_buffer_width,
            self.config.back_buffer_height,
            self.config.fullscreen,
        );

        let loaded = self
            .textures
            .load_dir(&self.config.graphics_path(), renderer)?;
        log::debug!("Loaded {loaded} textures");

        self.font = renderer.load_font(&self.config.default_font);
        if self.font.is_none() {
            log::warn!(
                "Default font '{}' could not be loaded, text won't be drawn",
                self.config.default_font
            );
        }

        Ok(loaded)
    }

    /// Register a texture manually.
    ///
    /// # Returns
    ///
    /// - The texture with the same name that was replaced, if any.
    #[inline]
    pub fn insert_texture(&mut self, texture: Texture) -> Option<Texture> {
        self.textures.insert(texture)
    }

    /// Get a texture by name.
    ///
    /// # Errors
    ///
    /// - When no texture with the name is loaded.
    #[inline]
    pub fn texture(&self, name: &str) -> Result<&Texture> {
        self.textures.get(name)
    }

    /// All loaded textures.
    #[inline]
    #[must_use]
    pub const fn textures(&self) -> &Textures {
        &self.textures
    }

    /// Set the font used for text objects and the overlays.
    #[inline]
    pub fn set_font(&mut self, font: Option<FontRef>) {
        self.font = font;
    }

    /// Font used for text objects and the overlays.
    #[inline]
    #[must_use]
    pub const fn font(&self) -> Option<FontRef> {
        self.font
    }

    /// Configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Configuration, mutable.
    ///
    /// Changing the resolution here doesn't resize the back buffer, use [`Self::change_resolution`] for that.
    #[inline]
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

/// Creating and removing objects.
impl Engine {
    /// Put an object in the draw list.
    pub fn add(&mut self, object: impl DisplayObject) -> ObjectId {
        let id = self.insert(Box::new(object));
        self.draw_list.push(id);

        id
    }

    /// Put an object in the list drawn while loading.
    pub fn add_loading(&mut self, object: impl DisplayObject) -> ObjectId {
        let id = self.insert(Box::new(object));
        self.loading_list.push(id);

        id
    }

    /// Create a sprite from a texture name without adding it to the draw list.
    ///
    /// Useful for building layers of a [`LayeredSprite`].
    ///
    /// # Errors
    ///
    /// - When the texture is not loaded.
    pub fn sprite(&self, texture: &str) -> Result<Sprite> {
        Ok(Sprite::new(self.textures.get(texture)?.clone()))
    }

    /// Create a sprite from a texture name and put it in the draw list.
    ///
    /// # Arguments
    ///
    /// * `texture` - Name of the texture, also used as name for the sprite.
    /// * `position` - Position in the designed resolution.
    /// * `scale` - Size multiplier.
    ///
    /// # Errors
    ///
    /// - When the texture is not loaded.
    pub fn create_sprite(
        &mut self,
        texture: &str,
        position: impl Into<Vec2>,
        scale: f32,
    ) -> Result<ObjectId> {
        let mut sprite = self.sprite(texture)?;
        sprite.base.scale = scale;
        sprite.set_position(position.into());

        Ok(self.add(sprite))
    }

    /// Create a sprite from a texture that's not in the texture table and put it in the draw list.
    pub fn create_sprite_from_texture(
        &mut self,
        texture: Texture,
        position: impl Into<Vec2>,
    ) -> ObjectId {
        let mut sprite = Sprite::new(texture);
        sprite.set_position(position.into());

        self.add(sprite)
    }

    /// Create a sprite with multiple images and put it in the draw list.
    ///
    /// Every texture name becomes a frame name, which can be used for animations.
    ///
    /// # Errors
    ///
    /// - When one of the textures is not loaded.
    /// - When no textures are passed.
    pub fn create_multi_sprite(
        &mut self,
        textures: &[&str],
        position: impl Into<Vec2>,
        scale: f32,
    ) -> Result<ObjectId> {
        let textures = textures
            .iter()
            .map(|name| self.textures.get(name).cloned())
            .collect::<Result<Vec<_>>>()?;

        let mut sprite = Sprite::with_frames(textures)?;
        sprite.base.scale = scale;
        sprite.set_position(position.into());

        Ok(self.add(sprite))
    }

    /// Create a sprite composed of other sprites and put it in the draw list.
    ///
    /// # Arguments
    ///
    /// * `layers` - Layer names with their sprites, bottom first. Sprites are moved into the layered sprite, don't add them to the draw list separately.
    /// * `position` - Position in the designed resolution.
    pub fn create_layered_sprite<N>(
        &mut self,
        layers: impl IntoIterator<Item = (N, Sprite)>,
        position: impl Into<Vec2>,
    ) -> ObjectId
    where
        N: Into<SmolStr>,
    {
        let mut layered = LayeredSprite::new();
        for (name, sprite) in layers {
            layered.add_layer(name, sprite);
        }
        layered.set_position(position.into());

        self.add(layered)
    }

    /// Create text and put it in the draw list.
    ///
    /// The text is locked to the screen and drawn in front of most sprites.
    pub fn create_text(&mut self, text: impl Into<String>, position: impl Into<Vec2>) -> ObjectId {
        let mut text = Text::new(text);
        text.base.name = SmolStr::new(&text.text);
        text.base.depth = TEXT_DEPTH;
        text.set_position(position.into());

        self.add(text)
    }

    /// Remove an object from the engine, releasing its images.
    ///
    /// # Returns
    ///
    /// - The freed object, `None` when the handle is unknown.
    pub fn erase(&mut self, id: ObjectId) -> Option<Box<dyn DisplayObject>> {
        self.draw_list.retain(|other| *other != id);
        self.loading_list.retain(|other| *other != id);

        let mut object = self.objects.remove(&id)?;
        object.free();

        Some(object)
    }

    /// Free and remove every object in the normal draw list and reset the camera.
    ///
    /// The loading screen objects are kept.
    pub fn nuke(&mut self) {
        for id in self.draw_list.drain(..) {
            if let Some(mut object) = self.objects.remove(&id) {
                object.free();
            }
        }

        self.camera.reset();
    }

    /// Insert an object without putting it in a list.
    fn insert(&mut self, object: Box<dyn DisplayObject>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, object);

        id
    }
}

/// Accessing objects.
impl Engine {
    /// Get an object.
    #[inline]
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&dyn DisplayObject> {
        self.objects.get(&id).map(|object| &**object)
    }

    /// Get an object, mutable.
    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn DisplayObject> {
        match self.objects.get_mut(&id) {
            Some(object) => Some(&mut **object),
            None => None,
        }
    }

    /// Get an object as its concrete type.
    ///
    /// # Returns
    ///
    /// - `None` when the handle is unknown or the object is of another type.
    #[inline]
    #[must_use]
    pub fn object<T>(&self, id: ObjectId) -> Option<&T>
    where
        T: DisplayObject,
    {
        self.objects.get(&id)?.downcast_ref::<T>()
    }

    /// Get an object as its concrete type, mutable.
    ///
    /// # Returns
    ///
    /// - `None` when the handle is unknown or the object is of another type.
    #[inline]
    pub fn object_mut<T>(&mut self, id: ObjectId) -> Option<&mut T>
    where
        T: DisplayObject,
    {
        self.objects.get_mut(&id)?.downcast_mut::<T>()
    }

    /// Show a named frame on a sprite or on every layer of a layered sprite.
    ///
    /// Missing frames are reported to the log, the other layers still change.
    pub fn change_frame_by_name(&mut self, id: ObjectId, name: &str) {
        let result = match self.objects.get_mut(&id) {
            Some(object) => {
                if let Some(sprite) = object.downcast_mut::<Sprite>() {
                    sprite.change_frame_by_name(name)
                } else if let Some(layered) = object.downcast_mut::<LayeredSprite>() {
                    layered.change_frame_by_name(name)
                } else {
                    Ok(())
                }
            }
            None => Ok(()),
        };

        if let Err(err) = result {
            self.report(&err);
        }
    }

    /// Amount of objects in the normal draw list.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_list.len()
    }

    /// Whether the normal draw list is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draw_list.is_empty()
    }
}

/// Loading screen.
impl Engine {
    /// Draw and update the loading screen objects instead of the normal ones.
    #[inline]
    pub fn show_load_screen(&mut self) {
        self.loading.set(true);
        self.loading_frame_presented = false;
    }

    /// Go back to drawing and updating the normal objects.
    #[inline]
    pub fn hide_load_screen(&mut self) {
        self.loading.set(false);
    }

    /// Whether the loading screen is shown.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Handle for toggling the loading screen from elsewhere.
    #[inline]
    #[must_use]
    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    /// Whether the last object pass drew the loading screen.
    ///
    /// Can be used to make sure the loading screen is visible before starting heavy work.
    #[inline]
    #[must_use]
    pub const fn loading_frame_presented(&self) -> bool {
        self.loading_frame_presented
    }
}

/// Camera & resolution.
impl Engine {
    /// Camera.
    #[inline]
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera, mutable.
    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Scroll the camera smoothly, see [`Camera::scroll_to`].
    #[inline]
    pub fn scroll_to(&mut self, target: impl Into<Vec2>, seconds: f32) {
        self.camera.scroll_to(target, seconds);
    }

    /// Scaling from the designed resolution to the back buffer.
    #[inline]
    #[must_use]
    pub fn scaling(&self) -> Scaling {
        Scaling::new(
            (self.config.design_width, self.config.design_height),
            (
                self.config.back_buffer_width,
                self.config.back_buffer_height,
            ),
            self.config.stretch,
        )
    }

    /// Resize the back buffer.
    pub fn change_resolution(&mut self, renderer: &mut dyn Renderer, width: u32, height: u32) {
        self.config.back_buffer_width = width;
        self.config.back_buffer_height = height;

        renderer.apply_resolution(width, height, self.config.fullscreen);
    }

    /// Switch between windowed and fullscreen.
    pub fn set_fullscreen(&mut self, renderer: &mut dyn Renderer, fullscreen: bool) {
        self.config.fullscreen = fullscreen;

        renderer.apply_resolution(
            self.config.back_buffer_width,
            self.config.back_buffer_height,
            fullscreen,
        );
    }

    /// Switch from fullscreen to windowed or vice versa.
    #[inline]
    pub fn toggle_fullscreen(&mut self, renderer: &mut dyn Renderer) {
        self.set_fullscreen(renderer, !self.config.fullscreen);
    }
}

/// Debug output.
impl Engine {
    /// Write a line to the log overlay, and the log file if configured.
    ///
    /// Ignored when the log is disabled.
    #[inline]
    pub fn log(&mut self, message: impl Display) {
        self.debug_log.log(message);
    }

    /// Report a recoverable error on the log overlay.
    pub fn report(&mut self, err: &Error) {
        log::error!("{err}");

        self.debug_log.log(format_args!("ERROR: {err}"));
    }

    /// Report an error from the draw pass, skipping it on the overlay when it's already the newest line.
    fn report_draw_error(&mut self, err: &Error) {
        log::error!("{err}");

        let message = format!("ERROR: {err}");
        if self.debug_log.lines().last() != Some(message.as_str()) {
            self.debug_log.log(message);
        }
    }

    /// Log overlay.
    #[inline]
    #[must_use]
    pub const fn debug_log(&self) -> &DebugLog {
        &self.debug_log
    }

    /// Log overlay, mutable.
    #[inline]
    pub fn debug_log_mut(&mut self) -> &mut DebugLog {
        &mut self.debug_log
    }

    /// Frames drawn during the last full second.
    ///
    /// Only counted when [`Config::show_fps`] is enabled.
    #[inline]
    #[must_use]
    pub const fn frames_per_second(&self) -> u32 {
        self.fps.fps()
    }
}

/// Frame loop.
impl Engine {
    /// Let time pass for the camera and every enabled object in the active list.
    ///
    /// Must be called once every frame, before [`Self::draw`].
    ///
    /// # Arguments
    ///
    /// * `dt` - Seconds passed since the last update.
    pub fn update(&mut self, dt: f32) {
        profiling::scope!("Update objects");

        let list = if self.loading.get() {
            &self.loading_list
        } else {
            &self.draw_list
        };

        for id in list {
            let Some(object) = self.objects.get_mut(id) else {
                continue;
            };

            if object.base().enabled {
                object.update(dt);
            }
        }

        self.camera.update(dt);

        if self.config.show_fps {
            self.fps.update(dt);
        }
    }

    /// Draw all objects, the log overlay and the FPS counter.
    ///
    /// Must be called once every frame, after [`Self::update`].
    pub fn draw(&mut self, renderer: &mut dyn Renderer) {
        self.draw_objects(renderer, f32::NEG_INFINITY, f32::INFINITY);
        self.draw_log(renderer);
        self.draw_fps(renderer);
    }

    /// Draw the objects of the active list in a single batch, from the deepest to the most shallow.
    ///
    /// # Arguments
    ///
    /// * `min_depth` - Objects below this depth are not drawn.
    /// * `max_depth` - Objects at or above this depth are not drawn.
    pub fn draw_objects(&mut self, renderer: &mut dyn Renderer, min_depth: f32, max_depth: f32) {
        profiling::scope!("Draw objects");

        let ctx = self.draw_context();
        let loading = self.loading.get();
        let objects = &self.objects;
        let list = if loading {
            &mut self.loading_list
        } else {
            &mut self.draw_list
        };

        // Deepest first, so they end up behind the rest
        list.retain(|id| objects.contains_key(id));
        list.sort_by(|a, b| depth_order(objects[a].as_ref(), objects[b].as_ref()));

        renderer.begin(&self.config.batch);

        let mut errors = Vec::new();
        for id in list.iter() {
            let Some(object) = objects.get(id) else {
                continue;
            };
            let base = object.base();

            // Sorted, so nothing after this can be drawn
            if base.depth < min_depth {
                break;
            }

            if base.depth >= max_depth || !base.enabled {
                continue;
            }

            if self.config.draw_only_on_screen
                && !locked_to_screen(&self.config, object.as_ref())
                && !on_screen(&self.config, base.position, ctx.camera)
            {
                continue;
            }

            if let Err(err) = object.draw(&ctx, renderer) {
                errors.push(err);
            }
        }

        renderer.end();

        self.loading_frame_presented = loading;

        for err in errors {
            self.report_draw_error(&err);
        }
    }

    /// Draw the log overlay, if enabled and a font is loaded.
    pub fn draw_log(&self, renderer: &mut dyn Renderer) {
        if let Some(font) = self.font {
            self.debug_log.draw(font, renderer);
        }
    }

    /// Count the frame and draw the FPS counter, if enabled and a font is loaded.
    pub fn draw_fps(&mut self, renderer: &mut dyn Renderer) {
        if !self.config.show_fps {
            return;
        }

        self.fps.frame_drawn();
        if let Some(font) = self.font {
            self.fps.draw(font, renderer);
        }
    }

    /// Draw text outside of the object lists, scaled to the resolution.
    ///
    /// Must be called between [`Renderer::begin`] and [`Renderer::end`].
    #[allow(clippy::too_many_arguments)]
    pub fn draw_string(
        &self,
        renderer: &mut dyn Renderer,
        font: FontRef,
        text: &str,
        position: impl Into<Vec2>,
        tint: RGBA8,
        rotation: f32,
        scale: f32,
        flip: Flip,
    ) {
        let scaling = self.scaling();

        renderer.draw_text(&TextDraw {
            font,
            text,
            position: position.into() * Vec2::new(scaling.x, scaling.y),
            tint,
            rotation,
            origin: Vec2::ZERO,
            scale: scale * scaling.no_stretch,
            flip,
        });
    }

    /// State needed by objects to draw themselves.
    #[must_use]
    pub fn draw_context(&self) -> DrawContext {
        DrawContext {
            camera: self.camera.offset(),
            scaling: self.scaling(),
            font: self.font,
            unlock_text_positions: self.config.unlock_text_positions,
        }
    }
}

/// Whether an object ignores the camera.
fn locked_to_screen(config: &Config, object: &dyn DisplayObject) -> bool {
    // Text follows the camera when unlocked globally
    object.position_locked() && !(config.unlock_text_positions && object.is::<Text>())
}

/// Whether a position is on the screen or within the bleed around it.
fn on_screen(config: &Config, position: Vec2, camera: Vec2) -> bool {
    let bleed = config.on_screen_bleed;
    let min = camera - bleed;
    let max = camera
        + Vec2::new(config.design_width as f32, config.design_height as f32)
        + bleed;

    position.cmpge(min).all() && position.cmple(max).all()
}
