//! Demo scene: a player walking into a wall while a turret fires pellets.

use anyhow::{Context, Result};
use tracing::info;

use sprig_graphics::{Renderer, ResourceCache, ResourceProvider, Sprite, Texture};
use sprig_math::{Collider, Transform2D, Vec4, Velocity};
use sprig_registry::EntityRegistry;
use sprig_system::Scheduler;

use crate::systems::{
    CollisionSystem, LifetimeSystem, MovementSystem, RenderSystem, Spawner, SpawnerSystem,
};

/// Texture descriptors shipped with the demo: `(name, "<w>x<h>")`.
pub const TEXTURES: &[(&str, &str)] = &[
    ("textures/player", "16x16"),
    ("textures/wall", "32x32"),
    ("textures/pellet", "4x4"),
];

/// Colour multiplier for turret pellets.
pub const PELLET_TINT: Vec4 = Vec4::new(1.0, 0.8, 0.2, 1.0);

/// Register the demo's file data with `cache`.
pub fn load_bundle(cache: &mut ResourceCache) {
    for (name, descriptor) in TEXTURES {
        cache.add_file_data(*name, descriptor.as_bytes());
    }
}

/// Release every demo texture loaded through `provider`.
pub fn unload_bundle(provider: &mut impl ResourceProvider) -> usize {
    TEXTURES
        .iter()
        .filter(|(name, _)| provider.unload::<Texture>(name))
        .count()
}

/// Create the demo entities.
///
/// # Errors
///
/// Fails if a texture cannot be loaded.
pub fn populate(registry: &mut EntityRegistry, provider: &mut impl ResourceProvider) -> Result<()> {
    let player_tex = provider
        .load::<Texture>("textures/player")
        .context("loading player texture")?;
    let wall_tex = provider
        .load::<Texture>("textures/wall")
        .context("loading wall texture")?;
    let pellet_tex = provider
        .load::<Texture>("textures/pellet")
        .context("loading pellet texture")?;

    let player = registry.create_entity("player");
    let _ = registry.emplace_component(player, Transform2D::from_xy(0.0, 100.0));
    let _ = registry.emplace_component(player, Velocity::new(60.0, 0.0));
    let _ = registry.emplace_component(player, Collider::from_size(16.0, 16.0));
    let _ = registry.emplace_component(player, Sprite::new(player_tex));

    let wall = registry.create_entity("wall");
    let _ = registry.emplace_component(wall, Transform2D::from_xy(200.0, 100.0));
    let _ = registry.emplace_component(wall, Collider::from_size(32.0, 32.0));
    let _ = registry.emplace_component(wall, Sprite::new(wall_tex));

    let turret = registry.create_entity("turret");
    let _ = registry.emplace_component(turret, Transform2D::from_xy(100.0, 0.0));
    let _ = registry.emplace_component(
        turret,
        Spawner::new(
            0.25,
            Velocity::new(0.0, 120.0),
            1.0,
            Sprite::new(pellet_tex).with_tint(PELLET_TINT),
        ),
    );

    info!(entities = registry.len(), "scene populated");
    Ok(())
}

/// Build the demo schedule. Systems run in the order added.
pub fn build_scheduler<R: Renderer + 'static>(renderer: R) -> Scheduler {
    let mut scheduler = Scheduler::new();
    scheduler
        .add_system(SpawnerSystem::default())
        .add_system(MovementSystem)
        .add_system(CollisionSystem)
        .add_system(LifetimeSystem)
        .add_system(RenderSystem::new(renderer));
    scheduler
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use sprig_graphics::Handle;

    use super::*;

    #[derive(Clone, Default)]
    struct CountingRenderer {
        draws: Rc<RefCell<Vec<String>>>,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, sprite: &Sprite, _transform: &Transform2D) {
            self.draws.borrow_mut().push(sprite.texture.name().to_string());
        }
    }

    fn scene() -> (EntityRegistry, ResourceCache) {
        let mut cache = ResourceCache::new();
        load_bundle(&mut cache);
        let mut registry = EntityRegistry::new();
        populate(&mut registry, &mut cache).unwrap();
        (registry, cache)
    }

    #[test]
    fn test_populate_creates_scene() {
        let (registry, cache) = scene();
        assert_eq!(registry.len(), 3);
        assert!(registry.get_entity("player").is_some());
        assert!(registry.get_entity("wall").is_some());
        assert!(registry.get_entity("turret").is_some());
        assert_eq!(cache.loaded_count(), 3);
    }

    #[test]
    fn test_populate_shares_loaded_textures() {
        let mut cache = ResourceCache::new();
        load_bundle(&mut cache);
        let expected = cache.load::<Texture>("textures/player").unwrap();
        let mut registry = EntityRegistry::new();
        populate(&mut registry, &mut cache).unwrap();

        let player = registry.get_entity("player").unwrap();
        let sprite = registry.get_component::<Sprite>(player).unwrap();
        assert!(Handle::ptr_eq(&sprite.texture, &expected));

        let by_id = cache.get_by_id::<Texture>(sprite.texture.id()).unwrap();
        assert_eq!(by_id.name(), "textures/player");
    }

    #[test]
    fn test_populate_without_bundle_fails() {
        let mut cache = ResourceCache::new();
        let mut registry = EntityRegistry::new();
        let err = populate(&mut registry, &mut cache).unwrap_err();
        assert!(format!("{err:#}").contains("textures/player"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_schedule_order() {
        let scheduler = build_scheduler(CountingRenderer::default());
        assert_eq!(
            scheduler.system_names(),
            vec!["spawner", "movement", "collision", "lifetime", "render"]
        );
    }

    #[test]
    fn test_first_frame_draws_player_and_wall() {
        let (mut registry, _cache) = scene();
        let renderer = CountingRenderer::default();
        let draws = Rc::clone(&renderer.draws);
        let mut scheduler = build_scheduler(renderer);
        scheduler.update(&mut registry, 0.1).unwrap();
        assert_eq!(*draws.borrow(), vec!["textures/player", "textures/wall"]);
    }

    #[test]
    fn test_pellets_spawn_and_expire() {
        let (mut registry, _cache) = scene();
        let mut scheduler = build_scheduler(CountingRenderer::default());

        // Interval 0.25s: the first pellet is queued on frame 3 at dt 0.1.
        for _ in 0..3 {
            scheduler.update(&mut registry, 0.1).unwrap();
        }
        assert_eq!(registry.len(), 4);
        let pellet = registry.get_entity("projectile-1").unwrap();
        assert_eq!(registry.get_component::<Sprite>(pellet).unwrap().tint, PELLET_TINT);

        // Lifetime 1.0s has run out ten frames later.
        for _ in 0..10 {
            scheduler.update(&mut registry, 0.1).unwrap();
        }
        assert!(!registry.contains(pellet));
    }

    #[test]
    fn test_player_stops_at_wall() {
        let (mut registry, _cache) = scene();
        let mut scheduler = build_scheduler(CountingRenderer::default());
        for _ in 0..120 {
            scheduler.update(&mut registry, 1.0 / 30.0).unwrap();
        }
        let player = registry.get_entity("player").unwrap();
        let x = registry.get_component::<Transform2D>(player).unwrap().position.x;
        assert!(registry.get_component::<Velocity>(player).unwrap().is_zero());
        assert!(x < 200.0 - 24.0 + 1e-3, "player at {x} overlaps the wall");
    }

    #[test]
    fn test_unload_bundle_releases_textures() {
        let (_registry, mut cache) = scene();
        assert_eq!(unload_bundle(&mut cache), 3);
        assert_eq!(cache.loaded_count(), 0);
        assert_eq!(unload_bundle(&mut cache), 0);
    }
}
