//! Gameplay and rendering systems for the demo.
//!
//! All systems use the per-entity dispatch convention: the scheduler calls
//! `update` once per matching entity, in creation order.

use anyhow::Result;
use tracing::{debug, trace};

use sprig_component::{Entity, Query};
use sprig_graphics::{Renderer, Sprite};
use sprig_math::{Collider, Transform2D, Velocity};
use sprig_system::{System, SystemContext};

/// Seconds an entity has left before it is destroyed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    /// Remaining time in seconds.
    pub remaining: f32,
}

/// Periodically spawns short-lived projectiles at its own position.
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Seconds between spawns.
    pub interval: f32,
    /// Time accumulated towards the next spawn.
    pub elapsed: f32,
    /// Velocity given to each projectile.
    pub velocity: Velocity,
    /// Lifetime given to each projectile, in seconds.
    pub lifetime: f32,
    /// Sprite given to each projectile.
    pub sprite: Sprite,
}

impl Spawner {
    /// A spawner firing every `interval` seconds.
    #[must_use]
    pub fn new(interval: f32, velocity: Velocity, lifetime: f32, sprite: Sprite) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            velocity,
            lifetime,
            sprite,
        }
    }
}

/// Integrates velocity into position.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn query(&self) -> Query {
        Query::all().with::<Transform2D>().with::<Velocity>()
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entity: Entity) -> Result<()> {
        let dt = ctx.dt();
        let Some(step) = ctx.get_component::<Velocity>(entity).map(|v| v.step(dt)) else {
            return Ok(());
        };
        if let Some(transform) = ctx.get_component_mut::<Transform2D>(entity) {
            transform.position += step;
        }
        Ok(())
    }
}

/// Stops moving entities that run into a static collider.
///
/// A collider is static when its entity has no [`Velocity`]. On contact the
/// mover is pushed back by the step it just took and its velocity cleared.
#[derive(Debug, Default)]
pub struct CollisionSystem;

impl System for CollisionSystem {
    fn name(&self) -> &str {
        "collision"
    }

    fn query(&self) -> Query {
        Query::all()
            .with::<Transform2D>()
            .with::<Velocity>()
            .with::<Collider>()
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entity: Entity) -> Result<()> {
        let (Some(&transform), Some(&collider), Some(&velocity)) = (
            ctx.get_component::<Transform2D>(entity),
            ctx.get_component::<Collider>(entity),
            ctx.get_component::<Velocity>(entity),
        ) else {
            return Ok(());
        };

        let hit = ctx.entities().iter().copied().find(|&other| {
            other != entity
                && !ctx.has_component::<Velocity>(other)
                && match (
                    ctx.get_component::<Collider>(other),
                    ctx.get_component::<Transform2D>(other),
                ) {
                    (Some(c), Some(t)) => collider.overlaps(transform.position, c, t.position),
                    _ => false,
                }
        });

        if let Some(other) = hit {
            debug!(
                frame = ctx.frame(),
                entity = entity.id(),
                name = ctx.name(entity),
                obstacle = ctx.name(other),
                "collision"
            );
            let step = velocity.step(ctx.dt());
            if let Some(t) = ctx.get_component_mut::<Transform2D>(entity) {
                t.position -= step;
            }
            if let Some(v) = ctx.get_component_mut::<Velocity>(entity) {
                *v = Velocity::ZERO;
            }
        }
        Ok(())
    }
}

/// Emits projectiles from every [`Spawner`].
#[derive(Debug, Default)]
pub struct SpawnerSystem {
    spawned: u64,
}

impl System for SpawnerSystem {
    fn name(&self) -> &str {
        "spawner"
    }

    fn query(&self) -> Query {
        Query::all().with::<Spawner>().with::<Transform2D>()
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entity: Entity) -> Result<()> {
        let dt = ctx.dt();
        let Some(&origin) = ctx.get_component::<Transform2D>(entity) else {
            return Ok(());
        };
        let Some(spawner) = ctx.get_component_mut::<Spawner>(entity) else {
            return Ok(());
        };

        spawner.elapsed += dt;
        if spawner.elapsed < spawner.interval {
            return Ok(());
        }
        spawner.elapsed -= spawner.interval;
        let (velocity, lifetime, sprite) =
            (spawner.velocity, spawner.lifetime, spawner.sprite.clone());

        self.spawned += 1;
        let projectile = ctx
            .spawn(format!("projectile-{}", self.spawned))
            .with(Transform2D::from_position(origin.position))
            .with(velocity)
            .with(Lifetime {
                remaining: lifetime,
            })
            .with(sprite)
            .id();
        trace!(spawner = entity.id(), projectile = projectile.id(), "queued projectile");
        Ok(())
    }
}

/// Destroys entities whose [`Lifetime`] has run out.
#[derive(Debug, Default)]
pub struct LifetimeSystem;

impl System for LifetimeSystem {
    fn name(&self) -> &str {
        "lifetime"
    }

    fn query(&self) -> Query {
        Query::all().with::<Lifetime>()
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entity: Entity) -> Result<()> {
        let dt = ctx.dt();
        let expired = match ctx.get_component_mut::<Lifetime>(entity) {
            Some(lifetime) => {
                lifetime.remaining -= dt;
                lifetime.remaining <= 0.0
            }
            None => false,
        };
        if expired {
            ctx.destroy(entity);
        }
        Ok(())
    }
}

/// Hands every visible sprite to a [`Renderer`].
#[derive(Debug)]
pub struct RenderSystem<R> {
    renderer: R,
}

impl<R: Renderer> RenderSystem<R> {
    /// Render through `renderer`.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }
}

impl<R: Renderer> System for RenderSystem<R> {
    fn name(&self) -> &str {
        "render"
    }

    fn query(&self) -> Query {
        Query::all().with::<Sprite>().with::<Transform2D>()
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entity: Entity) -> Result<()> {
        if let (Some(sprite), Some(transform)) = (
            ctx.get_component::<Sprite>(entity),
            ctx.get_component::<Transform2D>(entity),
        ) {
            self.renderer.draw(sprite, transform);
        }
        Ok(())
    }
}
