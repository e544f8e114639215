//! Units living on the board.

use std::collections::VecDeque;

use combat_content::{CreepTemplate, Resistance};
use combat_core::{
    AppliedEffect, DamageAction, Destructable, EntityId, LayerMask, TemplateId, Tile,
};
use glam::Vec2;

/// What a unit is on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitRole {
    /// Walks toward its zone's goal.
    Creep { template: TemplateId },
    /// Stationary caster.
    Tower,
}

/// Displacement left over from a knock-back.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Push {
    velocity: Vec2,
    remaining: f32,
}

#[derive(Clone, Debug)]
pub struct Unit {
    id: EntityId,
    role: UnitRole,
    position: Vec2,
    health: f32,
    max_health: f32,
    radius: f32,
    layer: LayerMask,
    speed: f32,
    bounty: u32,
    resistances: Vec<Resistance>,
    route: VecDeque<Tile>,
    push: Option<Push>,
    move_lock: f32,
    effects_received: u32,
}

impl Unit {
    pub const TOWER_RADIUS: f32 = 0.5;

    pub fn creep(id: EntityId, template: &CreepTemplate, tile: Tile) -> Self {
        Self {
            id,
            role: UnitRole::Creep {
                template: template.id,
            },
            position: tile.center(),
            health: template.health,
            max_health: template.health,
            radius: template.radius,
            layer: template.layer,
            speed: template.speed,
            bounty: template.bounty,
            resistances: template.resistances.clone(),
            route: VecDeque::new(),
            push: None,
            move_lock: 0.0,
            effects_received: 0,
        }
    }

    pub fn tower(id: EntityId, tile: Tile) -> Self {
        Self {
            id,
            role: UnitRole::Tower,
            position: tile.center(),
            health: f32::INFINITY,
            max_health: f32::INFINITY,
            radius: Self::TOWER_RADIUS,
            layer: LayerMask::ALLY,
            speed: 0.0,
            bounty: 0,
            resistances: Vec::new(),
            route: VecDeque::new(),
            push: None,
            move_lock: 0.0,
            effects_received: 0,
        }
    }

    pub fn role(&self) -> UnitRole {
        self.role
    }

    pub fn is_creep(&self) -> bool {
        matches!(self.role, UnitRole::Creep { .. })
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn layer(&self) -> LayerMask {
        self.layer
    }

    pub fn bounty(&self) -> u32 {
        self.bounty
    }

    pub fn tile(&self) -> Tile {
        Tile::containing(self.position)
    }

    /// Number of effect applications or refreshes this unit was notified of.
    pub fn effects_received(&self) -> u32 {
        self.effects_received
    }

    pub fn route(&self) -> impl Iterator<Item = Tile> + '_ {
        self.route.iter().copied()
    }

    pub(crate) fn set_route(&mut self, route: Vec<Tile>) {
        self.route = route.into();
    }

    fn resistance(&self, damage: &DamageAction) -> f32 {
        self.resistances
            .iter()
            .find(|entry| entry.damage_type == damage.damage_type)
            .map_or(0.0, |entry| entry.value)
    }

    /// Moves the unit for `dt` seconds at `speed_scale` of its base speed.
    ///
    /// Knock-back displacement always applies; walking is suppressed while a
    /// move lock is running. Returns true when this step consumed the last
    /// tile of the route.
    pub(crate) fn walk(&mut self, dt: f32, speed_scale: f32) -> bool {
        if let Some(push) = &mut self.push {
            let slice = dt.min(push.remaining);
            self.position += push.velocity * slice;
            push.remaining -= slice;
            if push.remaining <= 0.0 {
                self.push = None;
            }
        }

        if self.move_lock > 0.0 {
            self.move_lock = (self.move_lock - dt).max(0.0);
            return false;
        }
        if self.route.is_empty() {
            return false;
        }

        let mut budget = self.speed * speed_scale.max(0.0) * dt;
        while budget > 0.0 {
            let Some(next) = self.route.front() else {
                break;
            };
            let to_next = next.center() - self.position;
            let distance = to_next.length();
            if distance <= budget {
                self.position = next.center();
                budget -= distance;
                self.route.pop_front();
            } else {
                self.position += to_next / distance * budget;
                budget = 0.0;
            }
        }
        self.route.is_empty()
    }
}

impl Destructable for Unit {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    fn take_damage(&mut self, amount: f32) {
        let was_alive = self.is_alive();
        self.health -= amount.max(0.0);
        if was_alive && !self.is_alive() {
            self.die();
        }
    }

    fn take_damage_action(&mut self, damage: &DamageAction) {
        let amount = damage.mitigated(self.resistance(damage));
        tracing::trace!(
            unit = %self.id,
            amount,
            kind = damage.damage_type.as_ref(),
            crit = damage.is_crit,
            "damage taken"
        );
        self.take_damage(amount);
    }

    fn apply_effect(&mut self, effect: &AppliedEffect) {
        self.effects_received += 1;
        tracing::trace!(unit = %self.id, effect = %effect.id(), "effect applied");
    }

    fn knock_back(
        &mut self,
        direction: Vec2,
        strength: f32,
        knock_back_time: f32,
        move_lock_time: f32,
    ) {
        if matches!(self.role, UnitRole::Tower) {
            return;
        }
        if knock_back_time > 0.0 {
            self.push = Some(Push {
                velocity: direction * (strength / knock_back_time),
                remaining: knock_back_time,
            });
        } else {
            self.position += direction * strength;
        }
        self.move_lock = self.move_lock.max(move_lock_time);
    }

    fn die(&mut self) {
        tracing::debug!(unit = %self.id, "unit died");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::DamageType;

    fn grunt() -> CreepTemplate {
        let mut template = CreepTemplate::new(TemplateId(1), "grunt", 30.0, 2.0);
        template.resistances.push(Resistance {
            damage_type: DamageType::Physical,
            value: 0.5,
        });
        template
    }

    #[test]
    fn resistances_mitigate_typed_damage() {
        let mut unit = Unit::creep(EntityId(1), &grunt(), Tile::new(0, 0));
        unit.take_damage_action(&DamageAction::flat(10.0, DamageType::Physical));
        unit.take_damage_action(&DamageAction::flat(10.0, DamageType::Magic));
        assert_eq!(unit.health(), 15.0);
    }

    #[test]
    fn walks_the_route_and_reports_arrival() {
        let mut unit = Unit::creep(EntityId(1), &grunt(), Tile::new(0, 0));
        unit.set_route(vec![Tile::new(0, 0), Tile::new(1, 0), Tile::new(2, 0)]);

        assert!(!unit.walk(0.5, 1.0));
        assert_eq!(unit.tile(), Tile::new(1, 0));
        assert!(unit.walk(0.5, 1.0));
        assert_eq!(unit.position(), Tile::new(2, 0).center());
    }

    #[test]
    fn slowed_units_cover_less_ground() {
        let mut unit = Unit::creep(EntityId(1), &grunt(), Tile::new(0, 0));
        unit.set_route(vec![Tile::new(4, 0)]);
        unit.walk(1.0, 0.5);
        assert!((unit.position().x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn move_lock_holds_position_but_push_still_applies() {
        let mut unit = Unit::creep(EntityId(1), &grunt(), Tile::new(0, 0));
        unit.set_route(vec![Tile::new(5, 0)]);
        unit.knock_back(Vec2::NEG_X, 1.0, 0.5, 1.0);

        unit.walk(0.5, 1.0);
        assert!((unit.position().x - (0.5 - 1.0)).abs() < 1e-5);
        unit.walk(0.5, 1.0);
        assert!((unit.position().x + 0.5).abs() < 1e-5);
        unit.walk(0.5, 1.0);
        assert!(unit.position().x > -0.5);
    }

    #[test]
    fn towers_ignore_knock_back() {
        let mut tower = Unit::tower(EntityId(2), Tile::new(3, 3));
        tower.knock_back(Vec2::X, 5.0, 0.0, 1.0);
        assert_eq!(tower.position(), Tile::new(3, 3).center());
        assert!(tower.is_alive());
    }
}
