//! Query filters for system entity selection.
//!
//! A [`Query`] declares which component kinds an entity must (or must not)
//! carry for a system to be interested in it. The scheduler evaluates the
//! query against each entity's [`ComponentStore`] before dispatching.

use crate::component::{Component, ComponentTypeId};
use crate::store::ComponentStore;

/// A filter that narrows the set of entities matched by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFilter {
    /// Only match entities that have this component.
    With(ComponentTypeId),
    /// Only match entities that do NOT have this component.
    Without(ComponentTypeId),
}

impl QueryFilter {
    fn accepts(self, store: &ComponentStore) -> bool {
        match self {
            Self::With(ty) => store.contains_id(ty),
            Self::Without(ty) => !store.contains_id(ty),
        }
    }
}

/// Describes which entities a system wants to visit.
///
/// An empty query matches every entity.
///
/// ```rust
/// use sprig_component::{ComponentStore, Query};
///
/// struct Position(f32, f32);
/// struct Frozen;
///
/// let query = Query::all().with::<Position>().without::<Frozen>();
///
/// let mut store = ComponentStore::new();
/// assert!(!query.matches(&store));
/// let _ = store.emplace(Position(0.0, 0.0));
/// assert!(query.matches(&store));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<QueryFilter>,
}

impl Query {
    /// A query that matches every entity.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Require component kind `C`.
    #[must_use]
    pub fn with<C: Component>(self) -> Self {
        self.filter(QueryFilter::With(C::component_type_id()))
    }

    /// Exclude entities carrying component kind `C`.
    #[must_use]
    pub fn without<C: Component>(self) -> Self {
        self.filter(QueryFilter::Without(C::component_type_id()))
    }

    /// Add a raw filter.
    #[must_use]
    pub fn filter(mut self, f: QueryFilter) -> Self {
        self.filters.push(f);
        self
    }

    /// Returns the filters in declaration order.
    #[must_use]
    pub fn filters(&self) -> &[QueryFilter] {
        &self.filters
    }

    /// Returns `true` if this query has no filters and so matches everything.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.filters.is_empty()
    }

    /// Evaluate the query against one entity's components.
    #[must_use]
    pub fn matches(&self, store: &ComponentStore) -> bool {
        self.filters.iter().all(|f| f.accepts(store))
    }
}
