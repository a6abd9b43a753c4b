//! # Render Surface seams
//!
//! The tree-layout algorithm and the pan/zoom surface live outside this
//! crate. This module defines their contracts and drives them: one layout
//! call per family unit, each with that unit's own root.
//!
//! | Seam | Kind | Supplied by |
//! |------|------|-------------|
//! | `LayoutEngine` | sync | embedding program |
//! | `GestureSurface` | async | embedding program |

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{CellSize, Config, ZoomBounds};
use crate::model::*;
use crate::present::{Formatter, NodeCard};
use crate::source::Snapshot;
use crate::view::ViewState;
use crate::{Error, Result};

// ============================================================================
// Layout contract
// ============================================================================

/// One unit's nodes plus the root the layout should hang them from.
#[derive(Debug, Clone)]
pub struct LayoutRequest<'a> {
    pub unit_index: usize,
    pub nodes: Vec<&'a Entity>,
    pub root_id: &'a EntityId,
    pub cell: CellSize,
}

/// A node placed on the layout grid. Coordinates are in half-cell units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: EntityId,
    pub left: f64,
    pub top: f64,
    /// The node has hidden descendants; activating it re-roots its unit.
    pub has_sub_tree: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub nodes: Vec<PositionedNode>,
    /// Edge segments as `[x1, y1, x2, y2]`.
    pub connectors: Vec<[f64; 4]>,
}

/// Converts a flat node list and a root into positions and edges.
pub trait LayoutEngine {
    fn layout(&self, request: &LayoutRequest<'_>) -> Result<TreeLayout>;
}

// ============================================================================
// Rendered output
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeFlags {
    pub is_root: bool,
    pub is_hover: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedNode {
    pub node: PositionedNode,
    /// Pixel offset of the tile: half-cell coordinates scaled by the cell size.
    pub x: f64,
    pub y: f64,
    pub flags: NodeFlags,
    pub card: NodeCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitRender {
    pub unit_index: usize,
    pub root: EntityId,
    pub rerooted: bool,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub nodes: Vec<RenderedNode>,
    pub connectors: Vec<[f64; 4]>,
}

/// Lay out every unit of `snapshot` under `view`.
///
/// Fails on the first layout error; nodes the engine returns that are not
/// members of the requested unit are dropped.
pub fn render_units(
    snapshot: &Snapshot,
    view: &ViewState,
    engine: &dyn LayoutEngine,
    config: &Config,
) -> Result<Vec<UnitRender>> {
    let fmt = Formatter::new(config.format.clone());
    let mut out = Vec::with_capacity(snapshot.units().len());

    for (unit_index, unit) in snapshot.units().iter().enumerate() {
        let root_id = view.root_of(unit_index).unwrap_or_else(|| unit.root());
        let request = LayoutRequest {
            unit_index,
            nodes: snapshot.unit_entities(unit_index),
            root_id,
            cell: config.cell,
        };
        let layout = engine.layout(&request)?;

        let mut nodes = Vec::with_capacity(layout.nodes.len());
        for node in layout.nodes {
            let Some(entity) = snapshot.entity(node.id.as_str()).filter(|_| unit.contains(node.id.as_str())) else {
                tracing::warn!(id = %node.id, unit = unit_index, "layout returned a node outside its unit");
                continue;
            };
            let id = node.id.as_str();
            let flags = NodeFlags {
                is_root: id == root_id.as_str(),
                is_hover: view.hovered().is_some_and(|h| h.as_str() == id),
                is_selected: view.selected().is_some_and(|s| s.as_str() == id),
            };
            nodes.push(RenderedNode {
                x: node.left * (config.cell.width as f64 / 2.0),
                y: node.top * (config.cell.height as f64 / 2.0),
                card: NodeCard::build(entity, &fmt),
                flags,
                node,
            });
        }

        out.push(UnitRender {
            unit_index,
            root: root_id.clone(),
            rerooted: view.is_unit_rerooted(unit_index),
            canvas_width: layout.canvas_width,
            canvas_height: layout.canvas_height,
            nodes,
            connectors: layout.connectors,
        });
    }

    tracing::debug!(units = out.len(), source = snapshot.name(), "rendered");
    Ok(out)
}

// ============================================================================
// Gesture surface
// ============================================================================

/// Pan/zoom surface wrapping the rendered trees.
#[async_trait]
pub trait GestureSurface: Send + Sync {
    /// Start handling gestures between `min_zoom` and `max_zoom`.
    async fn attach(&self, min_zoom: f64, max_zoom: f64, capture_wheel: bool) -> Result<()>;

    async fn detach(&self) -> Result<()>;
}

/// Validate the bounds, fill in fallbacks and attach the surface.
pub async fn mount_surface(surface: &dyn GestureSurface, bounds: &ZoomBounds) -> Result<()> {
    bounds.validate()?;
    let (min, max) = bounds.resolved();
    surface
        .attach(min, max, bounds.capture_wheel)
        .await
        .map_err(|e| match e {
            Error::Surface(_) => e,
            other => Error::Surface(other.to_string()),
        })
}
