//! Targeting: which entities does a shape touch.
//!
//! Two shape kinds exist: circles and axis-aligned rectangles. Rectangles
//! ignore rotation; an area authored with a rotated box is queried as if it
//! were unrotated.
//!
//! Results are sets without ordering. In particular
//! [`find_targets_capped`] returns the first `max` hits the spatial provider
//! reports, not the nearest ones.

use glam::Vec2;

use crate::env::{OverlapQuery, SpatialQuery};
use crate::state::EntityId;

bitflags::bitflags! {
    /// Layer filter applied to overlap queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct LayerMask: u32 {
        /// Creeps walking the lane.
        const ENEMY = 1 << 0;
        /// Towers and the player's own units.
        const ALLY = 1 << 1;
        /// Destructible scenery.
        const STRUCTURE = 1 << 2;
        /// Everything else that can be hit.
        const NEUTRAL = 1 << 3;
    }
}

/// Area an action queries.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetShape {
    Circle { radius: f32 },
    /// Axis-aligned box centred on the origin.
    Rect { half_extents: Vec2 },
}

impl TargetShape {
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    pub fn rect(half_width: f32, half_height: f32) -> Self {
        Self::Rect {
            half_extents: Vec2::new(half_width, half_height),
        }
    }

    /// True when a body of radius `pad` at `point` overlaps the shape at `origin`.
    pub fn overlaps(&self, origin: Vec2, point: Vec2, pad: f32) -> bool {
        let delta = point - origin;
        match *self {
            Self::Circle { radius } => delta.length_squared() <= (radius + pad).powi(2),
            Self::Rect { half_extents } => {
                delta.x.abs() <= half_extents.x + pad && delta.y.abs() <= half_extents.y + pad
            }
        }
    }

    /// True when the shape has a non-degenerate area.
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Circle { radius } => radius > 0.0,
            Self::Rect { half_extents } => half_extents.x > 0.0 && half_extents.y > 0.0,
        }
    }
}

/// Every entity on `layers` overlapping `shape` at `origin`.
pub fn find_targets(
    space: &(impl SpatialQuery + ?Sized),
    origin: Vec2,
    shape: TargetShape,
    layers: LayerMask,
) -> Vec<EntityId> {
    let mut hits = space.overlap(&OverlapQuery {
        origin,
        shape,
        layers,
        limit: None,
    });
    dedup_preserving_order(&mut hits);
    hits
}

/// At most `max` entities on `layers` within `radius` of `origin`.
///
/// No ordering guarantee: callers must not assume nearest-first.
pub fn find_targets_capped(
    space: &(impl SpatialQuery + ?Sized),
    origin: Vec2,
    radius: f32,
    layers: LayerMask,
    max: usize,
) -> Vec<EntityId> {
    if max == 0 {
        return Vec::new();
    }
    let mut hits = space.overlap(&OverlapQuery {
        origin,
        shape: TargetShape::circle(radius),
        layers,
        limit: Some(max),
    });
    dedup_preserving_order(&mut hits);
    hits.truncate(max);
    hits
}

fn dedup_preserving_order(hits: &mut Vec<EntityId>) {
    let mut seen = std::collections::HashSet::with_capacity(hits.len());
    hits.retain(|id| seen.insert(*id));
}
