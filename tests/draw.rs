//! Draw pass over the object lists.

mod common;

use common::{init_logger, Call, RecordingRenderer};
use proptest::prelude::*;
use sprig::{
    backend::{Texture, TextureRef},
    Config, Engine, LayeredSprite, ObjectId, Sprite, Vec2,
};

/// Put a 16x16 sprite in the draw list with its texture reference as identifier.
fn sprite_at_depth(engine: &mut Engine, reference: u32, depth: f32) -> ObjectId {
    let id = engine.create_sprite_from_texture(
        Texture::new(TextureRef(reference), 16, 16, format!("sprite{reference}")),
        (0.0, 0.0),
    );
    engine.get_mut(id).unwrap().base_mut().depth = depth;

    id
}

#[test]
fn deepest_is_drawn_first() {
    let mut engine = Engine::new(Config::default());
    sprite_at_depth(&mut engine, 1, 1.0);
    sprite_at_depth(&mut engine, 5, 5.0);
    sprite_at_depth(&mut engine, 3, 3.0);

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

    assert_eq!(
        renderer.images(),
        [TextureRef(5), TextureRef(3), TextureRef(1)]
    );
    assert_eq!(renderer.calls.first(), Some(&Call::Begin));
    assert_eq!(renderer.calls.last(), Some(&Call::End));
}

#[test]
fn equal_depths_keep_insertion_order() {
    let mut engine = Engine::new(Config::default());
    for reference in 0..8 {
        sprite_at_depth(&mut engine, reference, 0.0);
    }

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

    let expected = (0..8).map(TextureRef).collect::<Vec<_>>();
    let drawn = renderer.images();
    assert_eq!(drawn[..8], expected);
    assert_eq!(drawn[8..], expected);
}

#[test]
fn depth_range_is_half_open() {
    let mut engine = Engine::new(Config::default());
    sprite_at_depth(&mut engine, 1, 1.0);
    sprite_at_depth(&mut engine, 2, 2.0);
    sprite_at_depth(&mut engine, 3, 3.0);
    sprite_at_depth(&mut engine, 5, 5.0);

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, 2.0, 5.0);

    assert_eq!(renderer.images(), [TextureRef(3), TextureRef(2)]);
}

#[test]
fn disabled_objects_are_skipped() {
    let mut engine = Engine::new(Config::default());
    sprite_at_depth(&mut engine, 1, 0.0);
    let hidden = sprite_at_depth(&mut engine, 2, 0.0);
    engine.get_mut(hidden).unwrap().base_mut().enabled = false;

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

    assert_eq!(renderer.images(), [TextureRef(1)]);
}

#[test]
fn off_screen_objects_are_culled() {
    let mut engine = Engine::new(Config::default().with_draw_only_on_screen((0.0, 0.0)));
    let far = sprite_at_depth(&mut engine, 1, 0.0);
    engine.get_mut(far).unwrap().set_position(Vec2::new(2000.0, 0.0));
    let locked = sprite_at_depth(&mut engine, 2, 0.0);
    engine.object_mut::<Sprite>(locked).unwrap().position_locked = true;
    engine
        .get_mut(locked)
        .unwrap()
        .set_position(Vec2::new(2000.0, 0.0));
    sprite_at_depth(&mut engine, 3, 0.0);

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);
    assert_eq!(renderer.images(), [TextureRef(2), TextureRef(3)]);

    // Scrolling the camera brings it into view
    engine.scroll_to((1500.0, 0.0), 0.0);
    engine.update(0.016);
    renderer.clear();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);
    assert_eq!(renderer.images(), [TextureRef(1), TextureRef(2)]);
}

#[test]
fn camera_moves_unlocked_sprites() {
    let mut engine = Engine::new(Config::default());
    let id = sprite_at_depth(&mut engine, 1, 0.0);
    engine.get_mut(id).unwrap().set_position(Vec2::new(100.0, 40.0));
    engine.scroll_to((50.0, 0.0), 0.0);
    engine.update(0.016);

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

    let Some(Call::Image(draw)) = renderer.calls.get(1) else {
        panic!("expected an image draw, got {:?}", renderer.calls);
    };
    assert_eq!((draw.destination.x, draw.destination.y), (50, 40));
    assert_eq!((draw.destination.width, draw.destination.height), (16, 16));
}

#[test]
fn failing_object_does_not_stop_the_pass() {
    init_logger();

    let mut engine = Engine::new(Config::default());
    let broken = engine.add(Sprite::empty());
    engine.get_mut(broken).unwrap().base_mut().depth = 10.0;
    sprite_at_depth(&mut engine, 1, 0.0);

    // Drawn every frame, but shown once on the overlay
    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

    assert_eq!(renderer.images(), [TextureRef(1), TextureRef(1)]);
    assert_eq!(engine.debug_log().lines().count(), 1);
    assert!(engine
        .debug_log()
        .lines()
        .all(|line| line.starts_with("ERROR:")));
}

#[test]
fn text_is_scaled_to_the_back_buffer() {
    let mut engine = Engine::new(
        Config::default()
            .with_design_size(320, 240)
            .with_back_buffer_size(640, 480),
    );
    let mut renderer = RecordingRenderer::default();
    engine.load_content(&mut renderer).ok();
    engine.set_font(Some(sprig::backend::FontRef(0)));

    engine.scroll_to((100.0, 100.0), 0.0);
    engine.update(0.016);
    engine.create_text("Score", (10.0, 10.0));

    renderer.clear();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

    // Locked to the screen, so the camera is ignored
    assert_eq!(
        renderer.texts(),
        [("Score".to_owned(), Vec2::new(20.0, 20.0), 2.0)]
    );
}

#[test]
fn unlocked_text_follows_the_camera() {
    let mut engine = Engine::new(Config::default().with_unlock_text_positions(true));
    engine.set_font(Some(sprig::backend::FontRef(0)));
    engine.scroll_to((5.0, 0.0), 0.0);
    engine.update(0.016);
    engine.create_text("Hi", (10.0, 10.0));

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

    assert_eq!(renderer.texts(), [("Hi".to_owned(), Vec2::new(5.0, 10.0), 1.0)]);
}

#[test]
fn unlocked_text_is_culled_like_sprites() {
    let mut engine = Engine::new(
        Config::default()
            .with_draw_only_on_screen((0.0, 0.0))
            .with_unlock_text_positions(true),
    );
    engine.set_font(Some(sprig::backend::FontRef(0)));
    engine.create_text("Far away", (2000.0, 10.0));
    engine.create_text("Nearby", (10.0, 10.0));

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);
    assert_eq!(
        renderer.texts(),
        [("Nearby".to_owned(), Vec2::new(10.0, 10.0), 1.0)]
    );

    // Following the camera brings it into view
    engine.scroll_to((1500.0, 0.0), 0.0);
    engine.update(0.016);
    renderer.clear();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);
    assert_eq!(
        renderer.texts(),
        [("Far away".to_owned(), Vec2::new(500.0, 10.0), 1.0)]
    );
}

#[test]
fn locked_text_is_never_culled() {
    let mut engine = Engine::new(Config::default().with_draw_only_on_screen((0.0, 0.0)));
    engine.set_font(Some(sprig::backend::FontRef(0)));
    engine.create_text("Far away", (2000.0, 10.0));

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

    assert_eq!(
        renderer.texts(),
        [("Far away".to_owned(), Vec2::new(2000.0, 10.0), 1.0)]
    );
}

#[test]
fn missing_layer_frame_is_reported() {
    let mut engine = Engine::new(Config::default());
    let layers = [
        ("body", ["idle", "walk"].as_slice()),
        ("weapon", ["idle"].as_slice()),
    ]
    .into_iter()
    .enumerate()
    .map(|(layer, (name, frames))| {
        let textures = frames
            .iter()
            .enumerate()
            .map(|(frame, frame_name)| {
                Texture::new(
                    TextureRef((layer * 10 + frame) as u32),
                    8,
                    8,
                    *frame_name,
                )
            })
            .collect();

        (name, Sprite::with_frames(textures).unwrap())
    })
    .collect::<Vec<_>>();
    let knight = engine.create_layered_sprite(layers, (0.0, 0.0));

    engine.change_frame_by_name(knight, "walk");

    let lines = engine.debug_log().lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("'walk'") && lines[0].contains("weapon"));

    // The body still changed
    let knight = engine.object::<LayeredSprite>(knight).unwrap();
    assert_eq!(knight.layer("body").unwrap().sprite.current_image(), 1);
    assert_eq!(knight.layer("weapon").unwrap().sprite.current_image(), 0);
}

#[test]
fn layers_are_drawn_bottom_first() {
    let mut engine = Engine::new(Config::default());
    for (reference, name) in [(1, "body"), (2, "armor"), (3, "weapon")] {
        engine.insert_texture(Texture::new(TextureRef(reference), 8, 8, name));
    }

    let layers = ["body", "armor", "weapon"]
        .into_iter()
        .map(|name| (name, engine.sprite(name).unwrap()))
        .collect::<Vec<_>>();
    let knight = engine.create_layered_sprite(layers, (30.0, 30.0));
    engine
        .object_mut::<LayeredSprite>(knight)
        .unwrap()
        .set_layer_offset("weapon", (4.0, 0.0));

    let mut renderer = RecordingRenderer::default();
    engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

    assert_eq!(
        renderer.images(),
        [TextureRef(1), TextureRef(2), TextureRef(3)]
    );
    let Some(Call::Image(weapon)) = renderer.calls.get(3) else {
        panic!("expected the weapon layer, got {:?}", renderer.calls);
    };
    assert_eq!(weapon.destination.x, 34);
}

#[test]
fn overlays_are_drawn_in_their_own_batches() {
    let mut engine = Engine::new(Config::default().with_show_fps(true));
    engine.set_font(Some(sprig::backend::FontRef(0)));
    engine.log("hello");

    let mut renderer = RecordingRenderer::default();
    engine.draw(&mut renderer);

    assert_eq!(
        renderer.calls,
        [
            Call::Begin,
            Call::End,
            Call::Begin,
            Call::Text {
                text: "hello".to_owned(),
                position: Vec2::new(0.0, 568.0),
                scale: 1.0,
            },
            Call::End,
            Call::Begin,
            Call::Text {
                text: "0".to_owned(),
                position: Vec2::ZERO,
                scale: 1.0,
            },
            Call::End,
        ]
    );
}

proptest! {
    #[test]
    fn every_enabled_object_is_drawn_once(
        objects in prop::collection::vec((-100.0_f32..100.0, any::<bool>()), 0..40)
    ) {
        let mut engine = Engine::new(Config::default());
        for (reference, (depth, enabled)) in objects.iter().enumerate() {
            let id = sprite_at_depth(&mut engine, reference as u32, *depth);
            engine.get_mut(id).unwrap().base_mut().enabled = *enabled;
        }

        let mut renderer = RecordingRenderer::default();
        engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);
        let drawn = renderer.images();

        let mut expected = objects
            .iter()
            .enumerate()
            .filter(|(_, (_, enabled))| *enabled)
            .map(|(reference, _)| TextureRef(reference as u32))
            .collect::<Vec<_>>();
        let mut sorted = drawn.clone();
        sorted.sort_by_key(|reference| reference.0);
        expected.sort_by_key(|reference| reference.0);
        prop_assert_eq!(sorted, expected);

        // Never a shallower object before a deeper one
        let depths = drawn
            .iter()
            .map(|reference| objects[reference.0 as usize].0)
            .collect::<Vec<_>>();
        prop_assert!(depths.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn repeated_sorts_keep_the_order(depths in prop::collection::vec(-5_i8..5, 0..40)) {
        let mut engine = Engine::new(Config::default());
        for (reference, depth) in depths.iter().enumerate() {
            sprite_at_depth(&mut engine, reference as u32, f32::from(*depth));
        }

        let mut renderer = RecordingRenderer::default();
        engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);
        let first = renderer.images();
        renderer.clear();
        engine.draw_objects(&mut renderer, f32::NEG_INFINITY, f32::INFINITY);

        prop_assert_eq!(renderer.images(), first);
    }
}
