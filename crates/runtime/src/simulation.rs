//! Fixed-step driver tying the combat rules to a board.
//!
//! One [`Simulation::step`] runs, in order:
//! 1. advance the clock
//! 2. tick applied effects
//! 3. resolve scheduled actions that came due
//! 4. fly projectiles and resolve their on-hit actions
//! 5. tick damage zones
//! 6. let ready towers cast from the hand
//! 7. retire defeated units (effects cleared, spawn slots freed, bounty paid)
//! 8. walk creeps; those reaching the goal leave the board
//! 9. tick spawn zones and route the new creeps
//! 10. publish deck changes

use std::collections::HashMap;
use std::sync::Arc;

use combat_content::{CreepTemplate, LevelSetup};
use combat_core::{
    ActionArgs, ActionCache, Codex, CombatConfig, CombatContext, Destructable, Dice, EffectExpiry,
    EffectStore, EntityId, GameError, Inventory, LayerMask, Scheduler, SimTime, SpawnZone, Spell,
    SpellDeck, SpellId, TargetShape, TemplateId, Tile, find_targets,
};
use serde::Serialize;

use crate::error::{Result, RuntimeError};
use crate::events::{CombatEvent, DeckChange, Event, EventBus, SpawnEvent};
use crate::oracle::BoardMap;
use crate::projectiles::ProjectileSystem;
use crate::purse::{Currency, Purse};
use crate::world::World;
use crate::zones::DamageZoneSystem;

/// Dice stream offset for spawn zones; zone `i` rolls on `SPAWN_STREAM + i`.
const SPAWN_STREAM: u32 = 100;

/// State borrowed by a [`CombatContext`].
struct Battlefield {
    now: SimTime,
    codex: Codex,
    world: World,
    effects: EffectStore,
    scheduler: Scheduler,
    projectiles: ProjectileSystem,
    zones: DamageZoneSystem,
    dice: Dice,
}

impl Battlefield {
    fn ctx(&mut self) -> CombatContext<'_> {
        CombatContext {
            now: self.now,
            codex: &self.codex,
            world: &mut self.world,
            effects: &mut self.effects,
            scheduler: &mut self.scheduler,
            projectiles: &mut self.projectiles,
            zones: &mut self.zones,
            dice: &mut self.dice,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Tower {
    unit: EntityId,
    cooldown: f32,
    range: f32,
    ready_in: f32,
}

/// Running totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    pub steps: u64,
    pub casts: u64,
    pub refused_casts: u64,
    pub spawned: u64,
    pub defeated: u64,
    pub leaked: u64,
}

/// Snapshot of a simulation for reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimSummary {
    pub time: SimTime,
    pub stats: SimStats,
    pub gold: u32,
    pub live_creeps: usize,
    pub live_effects: usize,
    pub live_projectiles: usize,
    pub live_zones: usize,
    pub scheduled_actions: usize,
    pub hand: Vec<Option<SpellId>>,
}

pub struct Simulation {
    field: Battlefield,
    board: BoardMap,
    fixed_step: f32,
    on_hit: ActionCache,
    spells: HashMap<SpellId, Spell>,
    deck: SpellDeck,
    spawn_zones: Vec<SpawnZone>,
    towers: Vec<Tower>,
    purse: Purse,
    events: EventBus,
    stats: SimStats,
}

impl Simulation {
    /// Assembles a level.
    ///
    /// Fails when a spawn zone names an unknown creep, the deck names an
    /// unknown spell, or the resulting deck is outside its size bounds.
    pub fn new(
        codex: Codex,
        creeps: HashMap<TemplateId, CreepTemplate>,
        board: BoardMap,
        setup: &LevelSetup,
    ) -> Result<Self> {
        let config: &CombatConfig = &setup.combat;
        for zone in &setup.spawn_zones {
            if !creeps.contains_key(&zone.template) {
                return Err(RuntimeError::UnknownCreep {
                    zone: zone.name.clone(),
                    template: zone.template,
                });
            }
        }

        let mut deck = SpellDeck::from_config(config);
        let mut spells = HashMap::new();
        for &id in &setup.deck.spells {
            let template = codex.spell(id).ok_or(RuntimeError::UnknownSpell(id))?;
            if !deck.add(id) {
                tracing::warn!(spell = %id, "card not added to the deck");
                continue;
            }
            spells.insert(id, Spell::new(Arc::clone(template)));
        }
        if !deck.is_valid() {
            return Err(RuntimeError::InvalidDeck {
                included: deck.included_count(),
                min: config.min_deck_size,
                max: config.max_deck_size,
            });
        }

        let dice = Dice::new(config.game_seed);
        let spawn_zones = setup
            .spawn_zones
            .iter()
            .enumerate()
            .map(|(index, zone)| {
                let stream = SPAWN_STREAM + index as u32;
                SpawnZone::new(zone.clone(), &board, dice.fork(stream))
            })
            .collect();

        let mut world = World::new(creeps);
        let towers = setup
            .towers
            .iter()
            .map(|tower| Tower {
                unit: world.spawn_tower(tower.tile),
                cooldown: tower.cooldown,
                range: tower.range,
                ready_in: 0.0,
            })
            .collect();

        tracing::info!(
            spells = spells.len(),
            zones = setup.spawn_zones.len(),
            towers = setup.towers.len(),
            seed = config.game_seed,
            "simulation assembled"
        );

        Ok(Self {
            field: Battlefield {
                now: SimTime::ZERO,
                codex,
                world,
                effects: EffectStore::new(),
                scheduler: Scheduler::new(),
                projectiles: ProjectileSystem::new(config.max_projectiles),
                zones: DamageZoneSystem::new(setup.zone_prefabs.iter().cloned()),
                dice,
            },
            board,
            fixed_step: config.fixed_step,
            on_hit: ActionCache::new(),
            spells,
            deck,
            spawn_zones,
            towers,
            purse: Purse::default(),
            events: EventBus::new(),
            stats: SimStats::default(),
        })
    }

    pub fn now(&self) -> SimTime {
        self.field.now
    }

    pub fn fixed_step(&self) -> f32 {
        self.fixed_step
    }

    pub fn world(&self) -> &World {
        &self.field.world
    }

    pub fn effects(&self) -> &EffectStore {
        &self.field.effects
    }

    pub fn board(&self) -> &BoardMap {
        &self.board
    }

    pub fn deck(&self) -> &SpellDeck {
        &self.deck
    }

    pub fn purse(&self) -> &Purse {
        &self.purse
    }

    pub fn spawn_zones(&self) -> &[SpawnZone] {
        &self.spawn_zones
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn tower_units(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.towers.iter().map(|tower| tower.unit)
    }

    pub fn summary(&self) -> SimSummary {
        SimSummary {
            time: self.field.now,
            stats: self.stats,
            gold: self.purse.count(Currency::Gold),
            live_creeps: self.field.world.creep_count(),
            live_effects: self.field.effects.len(),
            live_projectiles: self.field.projectiles.len(),
            live_zones: self.field.zones.len(),
            scheduled_actions: self.field.scheduler.len(),
            hand: self.deck.hand().to_vec(),
        }
    }

    /// Puts a creep on `tile` outside any spawn zone. It has no route and
    /// holds its ground until something pushes it.
    pub fn place_creep(&mut self, template: TemplateId, tile: Tile) -> Option<EntityId> {
        self.field.world.spawn_creep(template, tile)
    }

    /// Runs `steps` fixed steps.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step(self.fixed_step);
        }
    }

    /// Casts the card in hand `slot`. On success the card cycles to the back
    /// of the queue and the number of action steps is returned; a refused
    /// cast leaves the hand untouched.
    pub fn cast(&mut self, slot: usize, args: &ActionArgs) -> Result<usize> {
        let spell_id = self.deck.card(slot).ok_or(RuntimeError::EmptySlot(slot))?;
        let spell = self
            .spells
            .get_mut(&spell_id)
            .ok_or(RuntimeError::UnknownSpell(spell_id))?;
        let caster = args.caster();
        let at = self.field.now;

        let outcome = spell.try_cast(args, &mut self.field.ctx());
        match outcome {
            Ok(steps) => {
                self.deck.return_card(slot);
                self.stats.casts += 1;
                self.events.publish(Event::Combat(CombatEvent::SpellCast {
                    caster,
                    spell: spell_id,
                    slot,
                    steps,
                    at,
                }));
                Ok(steps)
            }
            Err(err) => {
                self.stats.refused_casts += 1;
                self.events.publish(Event::Combat(CombatEvent::CastRefused {
                    caster,
                    spell: spell_id,
                    code: err.error_code(),
                    at,
                }));
                Err(err.into())
            }
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.field.now.advance(dt);
        let now = self.field.now;

        let expiries = self.field.ctx().tick_effects(dt);
        self.publish_expiries(expiries);

        self.field.ctx().drain_ready();

        let impacts = self.field.projectiles.advance(dt, &self.field.world);
        for impact in impacts {
            self.events.publish(Event::Combat(CombatEvent::ProjectileHit {
                target: impact.target,
                at: now,
            }));
            let mut ctx = self.field.ctx();
            for step in &impact.on_hit {
                if let Some(action) = self.on_hit.get_or_build(step.action, ctx.codex) {
                    ctx.run_or_schedule(action, impact.args.clone(), step.delay);
                }
            }
        }

        let field = &mut self.field;
        field.zones.tick(dt, &mut field.world, &mut field.dice);

        self.run_towers(dt);
        self.retire_defeated();
        self.walk_creeps(dt);
        self.tick_spawn_zones(dt);

        for event in self.deck.take_events() {
            self.events.publish(Event::Deck(DeckChange { event, at: now }));
        }
        self.stats.steps += 1;
    }

    /// Each ready tower targets the nearest creep in range and casts the
    /// first hand card that accepts the aim.
    fn run_towers(&mut self, dt: f32) {
        for index in 0..self.towers.len() {
            let tower = &mut self.towers[index];
            tower.ready_in -= dt;
            if tower.ready_in > 0.0 {
                continue;
            }
            let tower = *tower;
            let Some(origin) = self.field.world.unit(tower.unit).map(|unit| unit.position()) else {
                continue;
            };

            let nearest = find_targets(
                &self.field.world,
                origin,
                TargetShape::circle(tower.range),
                LayerMask::ENEMY,
            )
            .into_iter()
            .filter_map(|id| {
                let position = self.field.world.unit(id)?.position();
                Some((id, position, origin.distance_squared(position)))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2).then(a.0.cmp(&b.0)));
            let Some((target, aim, _)) = nearest else {
                continue;
            };

            let args = ActionArgs::from_caster(tower.unit)
                .with_target(target)
                .with_point(aim);
            for slot in 0..self.deck.hand().len() {
                if self.deck.card(slot).is_none() {
                    continue;
                }
                if self.cast(slot, &args).is_ok() {
                    self.towers[index].ready_in = tower.cooldown;
                    break;
                }
            }
        }
    }

    fn retire_defeated(&mut self) {
        let now = self.field.now;
        for unit in self.field.world.take_defeated() {
            let id = unit.id();
            let cleared = self.field.ctx().clear_effects_on(id);
            self.publish_expiries(cleared);
            for zone in &mut self.spawn_zones {
                zone.on_defeated(id);
            }
            self.purse.add(Currency::Gold, unit.bounty());
            self.stats.defeated += 1;
            self.events.publish(Event::Combat(CombatEvent::UnitDefeated {
                unit: id,
                bounty: unit.bounty(),
                at: now,
            }));
        }
    }

    fn walk_creeps(&mut self, dt: f32) {
        let now = self.field.now;
        let arrived = self.field.world.advance(dt, &self.field.effects);
        for id in arrived {
            self.field.world.remove(id);
            let cleared = self.field.ctx().clear_effects_on(id);
            self.publish_expiries(cleared);
            for zone in &mut self.spawn_zones {
                zone.on_defeated(id);
            }
            self.stats.leaked += 1;
            tracing::debug!(unit = %id, "creep reached the goal");
            self.events
                .publish(Event::Spawn(SpawnEvent::ReachedGoal { unit: id, at: now }));
        }
    }

    fn tick_spawn_zones(&mut self, dt: f32) {
        let now = self.field.now;
        for zone in &mut self.spawn_zones {
            for id in zone.tick(dt, &mut self.field.world) {
                let Some(tile) = self.field.world.unit(id).map(|unit| unit.tile()) else {
                    continue;
                };
                self.field.world.set_route(id, zone.path_to_goal(tile));
                self.stats.spawned += 1;
                self.events.publish(Event::Spawn(SpawnEvent::Spawned {
                    zone: zone.name().to_string(),
                    unit: id,
                    tile,
                    at: now,
                }));
            }
        }
    }

    fn publish_expiries(&mut self, expiries: Vec<EffectExpiry>) {
        let at = self.field.now;
        for expiry in expiries {
            self.events
                .publish(Event::Combat(CombatEvent::EffectEnded { expiry, at }));
        }
    }
}
