//! # family-graph: Family and Ownership Graph Explorer
//!
//! Splits a mixed graph of people, companies, trusts and financial accounts
//! into independently laid-out family units, and renders category-specific
//! financial detail for whichever entity is selected.
//!
//! ## Design Principles
//!
//! 1. **Immutable snapshots**: a loaded source never changes; switching
//!    sources swaps the whole snapshot and view state together
//! 2. **Linear traversal**: the relation index is built once in O(E) and
//!    partitioning walks it, never the raw entity list
//! 3. **Tagged detail**: each account category has its own payload variant
//! 4. **Graceful degradation**: bad records, amounts and references become
//!    data-quality issues, not failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use family_graph::{SourceCatalog, Session, ViewEvent, Formatter};
//!
//! # fn example(json: &str) -> family_graph::Result<()> {
//! let mut catalog = SourceCatalog::new();
//! catalog.load_json("Family Structure", json)?;
//!
//! let session = Session::new(catalog)?;
//! for unit in session.snapshot().units() {
//!     println!("{} ({} members)", unit.root(), unit.len());
//! }
//!
//! session.dispatch(ViewEvent::Select("Alice".into()));
//! if let Some(panel) = session.selected_presentation(&Formatter::default()) {
//!     print!("{}", family_graph::present::text::to_text(&panel)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Components
//!
//! | Component | Module | Description |
//! |-----------|--------|-------------|
//! | Entity Model | `model`, `source` | Normalized entities from raw records |
//! | Relation Graph Index | `index` | Symmetric adjacency over four relation kinds |
//! | Component Partitioner | `partition` | Connected components as family units |
//! | Detail Presenter | `present` | Formatted sections for one entity |
//! | View state | `view` | Selection, hover, per-unit roots |
//! | Render seams | `render` | Layout engine and gesture surface contracts |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod source;
pub mod index;
pub mod partition;
pub mod present;
pub mod view;
pub mod render;
pub mod config;
pub mod quality;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Entity, EntityId, EntityKind, Relation, RelationKind, Relations,
    Money, MonetaryField, CategoryCode, Detail, AccountDetail,
};

// ============================================================================
// Re-exports: Loading and partitioning
// ============================================================================

pub use source::{Snapshot, SourceCatalog};
pub use index::RelationIndex;
pub use partition::{partition, FamilyUnit};
pub use quality::DataQualityIssue;

// ============================================================================
// Re-exports: Presentation, view, rendering
// ============================================================================

pub use present::{present, Formatter, Presentation, Section, Field, NodeCard};
pub use view::{Session, Transition, ViewEvent, ViewState};
pub use render::{GestureSurface, LayoutEngine, LayoutRequest, TreeLayout, UnitRender};
pub use config::Config;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown data source: {0}")]
    UnknownSource(String),

    #[error("No data sources registered")]
    EmptyCatalog,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Gesture surface error: {0}")]
    Surface(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
