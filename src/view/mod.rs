//! # View State
//!
//! Selection, hover and per-unit roots, driven by one transition function.
//!
//! Every field is tied to the snapshot it was built for. A source switch
//! replaces the snapshot and the view together, so an id from the old
//! source can never resolve against the new entity set.
//!
//! ```text
//! ViewEvent ──► ViewState::apply(snapshot, event) ──► Transition
//! Session::switch_source(name)  (snapshot + fresh view, one write)
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::Config;
use crate::model::*;
use crate::present::{self, Formatter, Presentation};
use crate::render::{self, LayoutEngine, UnitRender};
use crate::source::{Snapshot, SourceCatalog};
use crate::{Error, Result};

// ============================================================================
// Events
// ============================================================================

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Node activation: open the detail panel for this id.
    Select(EntityId),
    ClearSelection,
    /// Pointer over a related id in the detail panel.
    Hover(EntityId),
    ClearHover,
    /// Sub-node activation: re-root only the unit containing this id.
    Reroot(EntityId),
    /// Restore one unit's default root.
    ResetUnit(usize),
    /// Restore every unit's default root.
    ResetAll,
}

/// Outcome of applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// The event named an id or unit the current snapshot does not have,
    /// or changed nothing.
    Ignored,
}

// ============================================================================
// ViewState
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    source: String,
    selected: Option<EntityId>,
    hovered: Option<EntityId>,
    /// Current root per family unit, same order as `Snapshot::units`.
    roots: Vec<EntityId>,
    defaults: Vec<EntityId>,
}

impl ViewState {
    /// Fresh view: nothing selected, every unit at its default root.
    pub fn for_snapshot(snapshot: &Snapshot) -> Self {
        let defaults: Vec<EntityId> = snapshot.units().iter().map(|u| u.root().clone()).collect();
        Self {
            source: snapshot.name().to_owned(),
            selected: None,
            hovered: None,
            roots: defaults.clone(),
            defaults,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn selected(&self) -> Option<&EntityId> {
        self.selected.as_ref()
    }

    pub fn hovered(&self) -> Option<&EntityId> {
        self.hovered.as_ref()
    }

    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    pub fn root_of(&self, unit: usize) -> Option<&EntityId> {
        self.roots.get(unit)
    }

    pub fn is_root(&self, id: &str) -> bool {
        self.roots.iter().any(|r| r.as_str() == id)
    }

    pub fn is_unit_rerooted(&self, unit: usize) -> bool {
        self.roots.get(unit) != self.defaults.get(unit)
    }

    /// Whether any unit sits on a non-default root. Drives the Reset control.
    pub fn is_rerooted(&self) -> bool {
        self.roots != self.defaults
    }

    pub fn selected_entity<'s>(&self, snapshot: &'s Snapshot) -> Option<&'s Entity> {
        self.selected.as_ref().and_then(|id| snapshot.entity(id.as_str()))
    }

    /// Apply one event against the snapshot this view belongs to.
    pub fn apply(&mut self, snapshot: &Snapshot, event: ViewEvent) -> Transition {
        if snapshot.name() != self.source {
            tracing::warn!(view = %self.source, snapshot = snapshot.name(), "event against foreign snapshot");
            return Transition::Ignored;
        }

        match event {
            ViewEvent::Select(id) => {
                if !snapshot.contains(id.as_str()) {
                    tracing::debug!(%id, "select of unknown id ignored");
                    return Transition::Ignored;
                }
                replace(&mut self.selected, Some(id))
            }
            ViewEvent::ClearSelection => replace(&mut self.selected, None),
            ViewEvent::Hover(id) => {
                if !snapshot.contains(id.as_str()) {
                    return Transition::Ignored;
                }
                replace(&mut self.hovered, Some(id))
            }
            ViewEvent::ClearHover => replace(&mut self.hovered, None),
            ViewEvent::Reroot(id) => {
                let Some(unit) = snapshot.unit_index_of(id.as_str()) else {
                    tracing::debug!(%id, "re-root of unknown id ignored");
                    return Transition::Ignored;
                };
                match self.roots.get_mut(unit) {
                    Some(root) if *root != id => {
                        *root = id;
                        Transition::Applied
                    }
                    _ => Transition::Ignored,
                }
            }
            ViewEvent::ResetUnit(unit) => {
                match (self.roots.get_mut(unit), self.defaults.get(unit)) {
                    (Some(root), Some(default)) if root != default => {
                        *root = default.clone();
                        Transition::Applied
                    }
                    _ => Transition::Ignored,
                }
            }
            ViewEvent::ResetAll => {
                if !self.is_rerooted() {
                    return Transition::Ignored;
                }
                self.roots.clone_from(&self.defaults);
                Transition::Applied
            }
        }
    }
}

fn replace(slot: &mut Option<EntityId>, value: Option<EntityId>) -> Transition {
    if *slot == value {
        Transition::Ignored
    } else {
        *slot = value;
        Transition::Applied
    }
}

// ============================================================================
// Session
// ============================================================================

struct Current {
    snapshot: Arc<Snapshot>,
    view: ViewState,
}

/// Shared handle over a catalog and the active source.
///
/// Readers always see a snapshot and the view built for it, never a mix.
pub struct Session {
    catalog: SourceCatalog,
    current: RwLock<Current>,
}

impl Session {
    /// Opens the catalog's default (first registered) source.
    pub fn new(catalog: SourceCatalog) -> Result<Self> {
        let snapshot = catalog.default_source().ok_or(Error::EmptyCatalog)?;
        let view = ViewState::for_snapshot(&snapshot);
        Ok(Self { catalog, current: RwLock::new(Current { snapshot, view }) })
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// Replace the entity set and reset all view state in one step.
    /// On an unknown name nothing changes.
    pub fn switch_source(&self, name: &str) -> Result<()> {
        let snapshot = self.catalog.get(name)?;
        let view = ViewState::for_snapshot(&snapshot);

        let mut current = self.current.write();
        tracing::info!(from = current.snapshot.name(), to = name, "source switched");
        *current = Current { snapshot, view };
        Ok(())
    }

    pub fn dispatch(&self, event: ViewEvent) -> Transition {
        let mut current = self.current.write();
        let Current { snapshot, view } = &mut *current;
        view.apply(snapshot, event)
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read().snapshot)
    }

    pub fn view(&self) -> ViewState {
        self.current.read().view.clone()
    }

    /// The active snapshot and its view, read together.
    pub fn current(&self) -> (Arc<Snapshot>, ViewState) {
        let current = self.current.read();
        (Arc::clone(&current.snapshot), current.view.clone())
    }

    /// Detail panel content for the current selection.
    pub fn selected_presentation(&self, fmt: &Formatter) -> Option<Presentation> {
        let current = self.current.read();
        current
            .view
            .selected_entity(&current.snapshot)
            .map(|entity| present::present(entity, fmt))
    }

    /// Resolve `id` against the active source and present it.
    pub fn present(&self, id: &str, fmt: &Formatter) -> Result<Presentation> {
        let current = self.current.read();
        current.snapshot.require(id).map(|entity| present::present(entity, fmt))
    }

    /// Lay out every unit of the active source.
    pub fn render(&self, engine: &dyn LayoutEngine, config: &Config) -> Result<Vec<UnitRender>> {
        let current = self.current.read();
        render::render_units(&current.snapshot, &current.view, engine, config)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current.read();
        f.debug_struct("Session")
            .field("sources", &self.catalog.len())
            .field("active", &current.snapshot.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Unit 0: Alice - Bob - Carol; unit 1: Dave.
    fn snapshot(name: &str) -> Snapshot {
        Snapshot::from_entities(name, vec![
            Entity::person("Alice").with_relation(RelationKind::Spouse, "Bob"),
            Entity::person("Bob").with_relation(RelationKind::Child, "Carol"),
            Entity::person("Carol"),
            Entity::person("Dave"),
        ])
    }

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    #[test]
    fn test_fresh_view_uses_default_roots() {
        let snap = snapshot("Family");
        let view = ViewState::for_snapshot(&snap);

        assert_eq!(view.roots(), &[id("Alice"), id("Dave")]);
        assert!(!view.is_rerooted());
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn test_select_and_hover() {
        let snap = snapshot("Family");
        let mut view = ViewState::for_snapshot(&snap);

        assert_eq!(view.apply(&snap, ViewEvent::Select(id("Bob"))), Transition::Applied);
        assert_eq!(view.apply(&snap, ViewEvent::Select(id("Bob"))), Transition::Ignored);
        assert_eq!(view.apply(&snap, ViewEvent::Select(id("Zed"))), Transition::Ignored);
        assert_eq!(view.selected_entity(&snap).map(|e| e.id.as_str()), Some("Bob"));

        view.apply(&snap, ViewEvent::Hover(id("Carol")));
        assert_eq!(view.hovered(), Some(&id("Carol")));
        view.apply(&snap, ViewEvent::ClearHover);
        assert_eq!(view.hovered(), None);
    }

    #[test]
    fn test_reroot_touches_one_unit() {
        let snap = snapshot("Family");
        let mut view = ViewState::for_snapshot(&snap);

        assert_eq!(view.apply(&snap, ViewEvent::Reroot(id("Carol"))), Transition::Applied);

        assert_eq!(view.root_of(0), Some(&id("Carol")));
        assert_eq!(view.root_of(1), Some(&id("Dave")));
        assert!(view.is_rerooted());
        assert!(view.is_unit_rerooted(0));
        assert!(!view.is_unit_rerooted(1));
        assert!(view.is_root("Carol"));
        assert!(!view.is_root("Alice"));
    }

    #[test]
    fn test_reset_unit_and_all() {
        let snap = snapshot("Family");
        let mut view = ViewState::for_snapshot(&snap);
        view.apply(&snap, ViewEvent::Reroot(id("Bob")));

        assert_eq!(view.apply(&snap, ViewEvent::ResetUnit(1)), Transition::Ignored);
        assert_eq!(view.apply(&snap, ViewEvent::ResetUnit(7)), Transition::Ignored);
        assert_eq!(view.apply(&snap, ViewEvent::ResetUnit(0)), Transition::Applied);
        assert!(!view.is_rerooted());

        view.apply(&snap, ViewEvent::Reroot(id("Carol")));
        assert_eq!(view.apply(&snap, ViewEvent::ResetAll), Transition::Applied);
        assert_eq!(view.roots(), &[id("Alice"), id("Dave")]);
        assert_eq!(view.apply(&snap, ViewEvent::ResetAll), Transition::Ignored);
    }

    #[test]
    fn test_events_against_other_snapshot_are_ignored() {
        let family = snapshot("Family");
        let wealth = snapshot("Wealth");
        let mut view = ViewState::for_snapshot(&family);

        assert_eq!(view.apply(&wealth, ViewEvent::Select(id("Alice"))), Transition::Ignored);
    }

    #[test]
    fn test_session_switch_resets_view() {
        let catalog = SourceCatalog::new()
            .with_source(snapshot("Family"))
            .with_source(Snapshot::from_entities("Wealth", vec![Entity::person("Erin")]));
        let session = Session::new(catalog).unwrap();

        session.dispatch(ViewEvent::Select(id("Bob")));
        session.dispatch(ViewEvent::Reroot(id("Carol")));
        assert!(session.selected_presentation(&Formatter::default()).is_some());

        session.switch_source("Wealth").unwrap();

        let view = session.view();
        assert_eq!(view.source(), "Wealth");
        assert_eq!(view.selected(), None);
        assert_eq!(view.roots(), &[id("Erin")]);
        assert!(session.selected_presentation(&Formatter::default()).is_none());
        assert!(matches!(session.present("Bob", &Formatter::default()), Err(Error::NotFound(_))));
        assert_eq!(session.present("Erin", &Formatter::default()).unwrap().title, "Erin");
        assert_eq!(session.dispatch(ViewEvent::Select(id("Bob"))), Transition::Ignored);
    }

    #[test]
    fn test_session_unknown_source_keeps_state() {
        let session = Session::new(SourceCatalog::new().with_source(snapshot("Family"))).unwrap();
        session.dispatch(ViewEvent::Select(id("Alice")));

        assert!(matches!(session.switch_source("Nope"), Err(Error::UnknownSource(_))));
        assert_eq!(session.view().selected(), Some(&id("Alice")));
        assert_eq!(session.snapshot().name(), "Family");
    }

    #[test]
    fn test_session_requires_a_source() {
        assert!(matches!(Session::new(SourceCatalog::new()), Err(Error::EmptyCatalog)));
    }
}
