//! The [`System`] trait and the closure-backed [`FnSystem`].

use sprig_component::{Entity, Query};

use crate::context::SystemContext;

/// A unit of per-frame logic.
///
/// The scheduler calls [`System::update`] once for every live entity matching
/// [`System::query`], in creation order. Returning an error aborts the rest of
/// the frame.
pub trait System {
    /// Human-readable system name, used in logs and errors.
    fn name(&self) -> &str;

    /// Which entities this system wants to visit. Defaults to all of them.
    fn query(&self) -> Query {
        Query::all()
    }

    /// Process one entity.
    ///
    /// # Errors
    ///
    /// Any error is propagated by the scheduler and ends the frame.
    fn update(&mut self, ctx: &mut SystemContext<'_>, entity: Entity) -> anyhow::Result<()>;
}

impl<S: System + ?Sized> System for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn query(&self) -> Query {
        (**self).query()
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entity: Entity) -> anyhow::Result<()> {
        (**self).update(ctx, entity)
    }
}

/// A [`System`] backed by a closure.
///
/// Useful for small gameplay rules that do not need their own type.
pub struct FnSystem<F> {
    name: String,
    query: Query,
    f: F,
}

impl<F> FnSystem<F>
where
    F: FnMut(&mut SystemContext<'_>, Entity) -> anyhow::Result<()>,
{
    /// Wrap `f` as a system named `name` that visits entities matching `query`.
    pub fn new(name: impl Into<String>, query: Query, f: F) -> Self {
        Self {
            name: name.into(),
            query,
            f,
        }
    }
}

impl<F> System for FnSystem<F>
where
    F: FnMut(&mut SystemContext<'_>, Entity) -> anyhow::Result<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self) -> Query {
        self.query.clone()
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, entity: Entity) -> anyhow::Result<()> {
        (self.f)(ctx, entity)
    }
}

impl<F> std::fmt::Debug for FnSystem<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSystem")
            .field("name", &self.name)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
