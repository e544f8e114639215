use std::sync::Arc;

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::config::CombatConfig;
use crate::env::CombatWorld;
use crate::state::EntityId;

/// Input packet handed to every action of a cast.
///
/// Immutable once built: the `with_*` helpers return a new packet so a
/// scheduled copy never observes later edits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionArgs {
    caster: Option<EntityId>,
    target: Option<EntityId>,
    points: ArrayVec<Vec2, { CombatConfig::MAX_INPUT_POINTS }>,
    hits: Option<Arc<[EntityId]>>,
}

impl ActionArgs {
    pub fn new(caster: Option<EntityId>) -> Self {
        Self {
            caster,
            ..Self::default()
        }
    }

    pub fn from_caster(caster: EntityId) -> Self {
        Self::new(Some(caster))
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn without_target(mut self) -> Self {
        self.target = None;
        self
    }

    /// Appends an input point. Points past the capacity are dropped.
    #[must_use]
    pub fn with_point(mut self, point: Vec2) -> Self {
        if self.points.try_push(point).is_err() {
            tracing::debug!(%point, "input point dropped, packet full");
        }
        self
    }

    /// Replaces every input point with `point`.
    #[must_use]
    pub fn aimed_at(mut self, point: Vec2) -> Self {
        self.points.clear();
        self.points.push(point);
        self
    }

    #[must_use]
    pub fn with_hits(mut self, hits: impl Into<Arc<[EntityId]>>) -> Self {
        self.hits = Some(hits.into());
        self
    }

    pub fn caster(&self) -> Option<EntityId> {
        self.caster
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn first_point(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    /// Entities an earlier gather step already found.
    pub fn hits(&self) -> &[EntityId] {
        self.hits.as_deref().unwrap_or(&[])
    }

    /// Where an area resolves: the first input point, else the target's
    /// position, else the caster's position.
    pub fn origin(&self, world: &(impl CombatWorld + ?Sized)) -> Option<Vec2> {
        self.first_point()
            .or_else(|| self.target.and_then(|id| world.position_of(id)))
            .or_else(|| self.caster.and_then(|id| world.position_of(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_capped() {
        let mut args = ActionArgs::from_caster(EntityId(1));
        for i in 0..(CombatConfig::MAX_INPUT_POINTS + 2) {
            args = args.with_point(Vec2::splat(i as f32));
        }
        assert_eq!(args.points().len(), CombatConfig::MAX_INPUT_POINTS);
        assert_eq!(args.first_point(), Some(Vec2::ZERO));
    }

    #[test]
    fn aimed_at_replaces_points_and_keeps_entities() {
        let args = ActionArgs::from_caster(EntityId(1))
            .with_target(EntityId(2))
            .with_point(Vec2::ONE)
            .with_point(Vec2::X)
            .aimed_at(Vec2::Y);
        assert_eq!(args.points(), &[Vec2::Y]);
        assert_eq!(args.caster(), Some(EntityId(1)));
        assert_eq!(args.target(), Some(EntityId(2)));
    }

    #[test]
    fn copies_are_independent() {
        let base = ActionArgs::from_caster(EntityId(1));
        let hit = base.clone().with_hits(vec![EntityId(5)]);
        assert!(base.hits().is_empty());
        assert_eq!(hit.hits(), &[EntityId(5)]);
    }
}
