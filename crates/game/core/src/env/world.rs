use glam::Vec2;

use crate::combat::DamageAction;
use crate::effect::AppliedEffect;
use crate::state::EntityId;
use crate::targeting::{LayerMask, TargetShape};

/// Capability implemented by every entity the combat core can hurt.
///
/// The core calls into these hooks; presentation, animation and removal from
/// the scene stay with the implementer.
pub trait Destructable {
    fn id(&self) -> EntityId;

    fn position(&self) -> Vec2;

    fn is_alive(&self) -> bool;

    /// Raw damage, already mitigated.
    fn take_damage(&mut self, amount: f32);

    /// Typed damage; implementers apply their own resistances here.
    fn take_damage_action(&mut self, damage: &DamageAction) {
        self.take_damage(damage.amount);
    }

    /// Notification that `effect` was attached to (or refreshed on) this entity.
    fn apply_effect(&mut self, _effect: &AppliedEffect) {}

    fn knock_back(
        &mut self,
        direction: Vec2,
        strength: f32,
        knock_back_time: f32,
        move_lock_time: f32,
    );

    /// Called once when health reaches zero.
    fn die(&mut self) {}
}

/// Overlap request handed to the spatial provider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlapQuery {
    pub origin: Vec2,
    pub shape: TargetShape,
    pub layers: LayerMask,
    /// Stop after this many hits. `None` returns every overlap.
    pub limit: Option<usize>,
}

/// Opaque spatial service: which entities overlap a shape.
///
/// Results are unordered; a limited query returns whichever hits the provider
/// found first.
pub trait SpatialQuery {
    fn overlap(&self, query: &OverlapQuery) -> Vec<EntityId>;
}

/// Entity registry the action graph mutates during resolution.
pub trait CombatWorld: SpatialQuery {
    fn destructable(&self, id: EntityId) -> Option<&dyn Destructable>;

    fn destructable_mut(&mut self, id: EntityId) -> Option<&mut dyn Destructable>;

    fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.destructable(id).map(|entity| entity.position())
    }

    fn is_alive(&self, id: EntityId) -> bool {
        self.destructable(id).is_some_and(|entity| entity.is_alive())
    }
}
