//! End-to-end combat scenarios driven through the public API.

use std::sync::Arc;

use combat_core::{
    Action, ActionArgs, ActionId, ActionKind, ActionObject, AppliedEffect, AppliedEffectObject,
    AreaStrike, CollaboratorError, CombatContext, CombatWorld, Codex, DamageAction, DamageArgs,
    DamageType, DamageZoneFactory, DamageZoneSpawn, Destructable, Dice, EffectId, EffectKind,
    EffectSchool, EffectStore, EntityId, LayerMask, MapDimensions, MapOracle, OverlapQuery,
    ProjectileLaunch, ProjectilePool, Scheduler, SimTime, SpatialQuery, Spawner, Spell,
    SpellAction, SpellDeck, SpellDelivery, SpellId, SpellObject, SpawnZone, SpawnZoneConfig,
    StaticTile, TargetShape, TemplateId, TerrainKind, Tile, TileRect,
};
use glam::Vec2;

// ============================================================================
// Collaborator doubles
// ============================================================================

struct Creep {
    id: EntityId,
    position: Vec2,
    health: f32,
    hits: Vec<DamageAction>,
}

impl Destructable for Creep {
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
        self.health -= amount;
    }

    fn take_damage_action(&mut self, damage: &DamageAction) {
        self.hits.push(*damage);
        self.take_damage(damage.amount);
    }

    fn knock_back(&mut self, _: Vec2, _: f32, _: f32, _: f32) {}
}

#[derive(Default)]
struct Lane {
    creeps: Vec<Creep>,
}

impl Lane {
    fn add(&mut self, id: u32, x: f32, health: f32) {
        self.creeps.push(Creep {
            id: EntityId(id),
            position: Vec2::new(x, 0.0),
            health,
            hits: Vec::new(),
        });
    }

    fn hits(&self, id: u32) -> Vec<f32> {
        self.creeps
            .iter()
            .find(|creep| creep.id == EntityId(id))
            .map(|creep| creep.hits.iter().map(|hit| hit.amount).collect())
            .unwrap_or_default()
    }
}

impl SpatialQuery for Lane {
    fn overlap(&self, query: &OverlapQuery) -> Vec<EntityId> {
        self.creeps
            .iter()
            .filter(|creep| creep.is_alive())
            .filter(|creep| query.shape.overlaps(query.origin, creep.position, 0.0))
            .map(|creep| creep.id)
            .collect()
    }
}

impl CombatWorld for Lane {
    fn destructable(&self, id: EntityId) -> Option<&dyn Destructable> {
        self.creeps
            .iter()
            .find(|creep| creep.id == id)
            .map(|creep| creep as &dyn Destructable)
    }

    fn destructable_mut(&mut self, id: EntityId) -> Option<&mut dyn Destructable> {
        self.creeps
            .iter_mut()
            .find(|creep| creep.id == id)
            .map(|creep| creep as &mut dyn Destructable)
    }
}

struct NoProjectiles;

impl ProjectilePool for NoProjectiles {
    fn launch(&mut self, _: ProjectileLaunch) -> Result<(), CollaboratorError> {
        Err(CollaboratorError::PoolExhausted { capacity: 0 })
    }
}

struct NoZones;

impl DamageZoneFactory for NoZones {
    fn create(&mut self, spawn: DamageZoneSpawn) -> Result<(), CollaboratorError> {
        Err(CollaboratorError::PrefabMissing(spawn.builder.prefab))
    }
}

struct Sim {
    lane: Lane,
    codex: Codex,
    effects: EffectStore,
    scheduler: Scheduler,
    dice: Dice,
    now: SimTime,
}

impl Sim {
    fn new(codex: Codex) -> Self {
        Self {
            lane: Lane::default(),
            codex,
            effects: EffectStore::new(),
            scheduler: Scheduler::new(),
            dice: Dice::new(11),
            now: SimTime::ZERO,
        }
    }

    fn with_ctx<R>(&mut self, f: impl FnOnce(&mut CombatContext<'_>) -> R) -> R {
        let mut projectiles = NoProjectiles;
        let mut zones = NoZones;
        let mut ctx = CombatContext {
            now: self.now,
            codex: &self.codex,
            world: &mut self.lane,
            effects: &mut self.effects,
            scheduler: &mut self.scheduler,
            projectiles: &mut projectiles,
            zones: &mut zones,
            dice: &mut self.dice,
        };
        f(&mut ctx)
    }

    fn step(&mut self, dt: f32) {
        self.now.advance(dt);
        self.with_ctx(|ctx| {
            ctx.tick_effects(dt);
            ctx.drain_ready();
        });
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn dot_delivers_five_even_ticks_then_expires() {
    let mut codex = Codex::new();
    let poison = codex
        .insert_effect(AppliedEffectObject::dot(
            EffectId(1),
            EffectSchool::Poison,
            100.0,
            5.0,
            1.0,
        ))
        .unwrap();
    let mut sim = Sim::new(codex);
    sim.lane.add(1, 0.0, 500.0);

    let handle = sim
        .with_ctx(|ctx| ctx.attach_effect(&poison, None, EntityId(1)))
        .unwrap();

    for _ in 0..5 {
        assert!(sim.effects.get(handle).is_some());
        sim.step(1.0);
    }

    assert_eq!(sim.lane.hits(1), vec![20.0; 5]);
    assert_eq!(sim.lane.hits(1).iter().sum::<f32>(), 100.0);
    assert!(sim.effects.get(handle).is_none());

    sim.step(1.0);
    assert_eq!(sim.lane.hits(1).len(), 5);
}

#[test]
fn poison_hits_carry_the_poison_damage_type() {
    let mut codex = Codex::new();
    let poison = codex
        .insert_effect(AppliedEffectObject::dot(
            EffectId(1),
            EffectSchool::Poison,
            10.0,
            1.0,
            1.0,
        ))
        .unwrap();
    let mut sim = Sim::new(codex);
    sim.lane.add(1, 0.0, 50.0);
    sim.with_ctx(|ctx| ctx.attach_effect(&poison, Some(EntityId(99)), EntityId(1)));
    sim.step(1.0);

    let hit = sim.lane.creeps[0].hits[0];
    assert_eq!(hit.damage_type, DamageType::Poison);
    assert_eq!(hit.source, Some(EntityId(99)));
}

#[test]
fn eight_card_deck_is_valid_with_four_queued() {
    let mut deck = SpellDeck::new(8, 12, 4);
    for id in 0..8 {
        assert!(deck.add(SpellId(id)));
    }
    assert!(deck.is_valid());
    assert_eq!(deck.deck_size(), 4);
    assert_eq!(deck.hand().iter().flatten().count(), 4);
}

struct Field;

impl MapOracle for Field {
    fn dimensions(&self) -> MapDimensions {
        MapDimensions::new(6, 6)
    }

    fn tile(&self, tile: Tile) -> Option<StaticTile> {
        self.dimensions()
            .contains(tile)
            .then(|| StaticTile::new(TerrainKind::Floor))
    }
}

#[derive(Default)]
struct Gate {
    issued: u32,
    limit: Option<u32>,
}

impl Spawner for Gate {
    fn is_occupied(&self, _: Tile) -> bool {
        false
    }

    fn spawn(&mut self, _: TemplateId, _: Tile) -> Option<EntityId> {
        if self.limit.is_some_and(|limit| self.issued >= limit) {
            return None;
        }
        self.issued += 1;
        Some(EntityId(self.issued))
    }
}

#[test]
fn spawn_batch_is_clamped_at_the_cap() {
    let config = SpawnZoneConfig {
        name: "gate".into(),
        area: TileRect::new(Tile::new(0, 0), Tile::new(5, 5)),
        template: TemplateId(1),
        max_active_spawns: 10,
        spawn_amount: (3, 6),
        spawn_interval: (1.0, 1.0),
        goal: None,
    };

    for seed in 0..16 {
        let mut zone = SpawnZone::new(config.clone(), &Field, Dice::new(seed));
        let mut gate = Gate {
            limit: Some(8),
            ..Gate::default()
        };
        while zone.active_spawns() < 8 {
            zone.spawn(&mut gate);
        }
        gate.limit = None;

        let added = zone.spawn(&mut gate);
        assert!(added.len() <= 2, "seed {seed} added {}", added.len());
        assert!(zone.active_spawns() <= 10);
    }
}

fn gate_zone(max_active_spawns: usize, spawn_amount: (u32, u32)) -> SpawnZoneConfig {
    SpawnZoneConfig {
        name: "gate".into(),
        area: TileRect::new(Tile::new(0, 0), Tile::new(5, 5)),
        template: TemplateId(1),
        max_active_spawns,
        spawn_amount,
        spawn_interval: (1.0, 1.0),
        goal: None,
    }
}

#[test]
fn full_width_spawn_amount_fills_to_the_cap() {
    for seed in 0..8 {
        let mut zone = SpawnZone::new(gate_zone(10, (0, u32::MAX)), &Field, Dice::new(seed));
        let mut gate = Gate::default();

        for _ in 0..4 {
            zone.spawn(&mut gate);
            assert!(zone.active_spawns() <= 10);
        }
    }

    let mut zone = SpawnZone::new(gate_zone(10, (u32::MAX, u32::MAX)), &Field, Dice::new(1));
    assert_eq!(zone.spawn(&mut Gate::default()).len(), 10);
}

#[test]
fn batch_floor_above_remaining_room_is_clamped() {
    for seed in 0..16 {
        let mut zone = SpawnZone::new(gate_zone(10, (7, 9)), &Field, Dice::new(seed));
        let mut gate = Gate::default();
        let first = zone.spawn(&mut gate).len();
        assert!((7..=9).contains(&first));

        // Every roll is at least 7 but only 1 to 3 slots remain.
        let second = zone.spawn(&mut gate).len();
        assert_eq!(first + second, 10, "seed {seed}");
        assert_eq!(zone.active_spawns(), 10);
    }
}

#[test]
fn reversed_spawn_amount_is_read_as_a_range() {
    for seed in 0..16 {
        let mut zone = SpawnZone::new(gate_zone(10, (6, 3)), &Field, Dice::new(seed));
        let added = zone.spawn(&mut Gate::default()).len();
        assert!((3..=6).contains(&added), "seed {seed} added {added}");
    }
}

#[test]
fn unknown_tag_produces_no_action_and_nothing_resolves() {
    let mut codex = Codex::new();
    let unknown = codex
        .insert_action(ActionObject::new(ActionId(1), ActionKind::Custom(0xbeef)))
        .unwrap();
    codex
        .insert_spell(
            SpellObject::new(SpellId(1), SpellDelivery::Area { max_range: None })
                .with_action(SpellAction::immediate(ActionId(1)))
                .with_action(SpellAction::delayed(ActionId(1), 1.0)),
        )
        .unwrap();

    assert!(Action::from_template(&unknown, &codex).is_none());

    let spell_template = Arc::clone(codex.spell(SpellId(1)).unwrap());
    let mut sim = Sim::new(codex);
    sim.lane.add(1, 0.0, 50.0);

    let mut spell = Spell::new(spell_template);
    let args = ActionArgs::new(None).with_point(Vec2::ZERO);
    assert!(sim.with_ctx(|ctx| spell.cast(&args, ctx)));
    assert!(sim.scheduler.is_empty());

    sim.step(2.0);
    assert!(sim.lane.hits(1).is_empty());
}

#[test]
fn delayed_steps_resolve_in_delay_order() {
    let mut codex = Codex::new();
    let strike = |amount: f32| {
        ActionKind::FindTargetsArea(
            AreaStrike::new(TargetShape::circle(0.5), LayerMask::all())
                .with_damage(DamageArgs::new(amount, DamageType::True)),
        )
    };
    codex.insert_action(ActionObject::new(ActionId(1), strike(1.0))).unwrap();
    codex.insert_action(ActionObject::new(ActionId(2), strike(2.0))).unwrap();
    codex.insert_action(ActionObject::new(ActionId(3), strike(3.0))).unwrap();
    let template = codex
        .insert_spell(
            SpellObject::new(SpellId(1), SpellDelivery::Area { max_range: None })
                .with_action(SpellAction::delayed(ActionId(3), 0.75))
                .with_action(SpellAction::delayed(ActionId(1), 0.25))
                .with_action(SpellAction::delayed(ActionId(2), 0.5)),
        )
        .unwrap();

    let mut sim = Sim::new(codex);
    sim.lane.add(1, 0.0, 50.0);
    let mut spell = Spell::new(template);
    let args = ActionArgs::new(None).with_point(Vec2::ZERO);
    assert!(sim.with_ctx(|ctx| spell.cast(&args, ctx)));

    sim.step(0.2);
    assert!(sim.lane.hits(1).is_empty());
    sim.step(1.0);
    assert_eq!(sim.lane.hits(1), vec![1.0, 2.0, 3.0]);
}

#[test]
fn stun_reapplied_refreshes_a_single_instance() {
    let mut codex = Codex::new();
    let stun = codex
        .insert_effect(AppliedEffectObject::status(EffectId(4), EffectKind::Stun, 2.0, 0.0))
        .unwrap();
    let mut sim = Sim::new(codex);
    sim.lane.add(1, 0.0, 50.0);

    let first = sim.with_ctx(|ctx| ctx.attach_effect(&stun, None, EntityId(1)));
    sim.step(1.5);
    let second = sim.with_ctx(|ctx| ctx.attach_effect(&stun, None, EntityId(1)));
    assert_eq!(first, second);
    assert_eq!(sim.effects.active_on(EntityId(1)).count(), 1);

    let (_, live) = sim.effects.active_on(EntityId(1)).next().unwrap();
    let AppliedEffect::Status(status) = live else {
        panic!("stun is a status effect");
    };
    assert_eq!(status.time_left(), 2.0);

    sim.step(1.5);
    assert!(sim.effects.is_stunned(EntityId(1)));
    sim.step(0.5);
    assert!(!sim.effects.is_stunned(EntityId(1)));
}

#[test]
fn stacked_dots_double_the_damage_per_tick() {
    let mut codex = Codex::new();
    let bleed = codex
        .insert_effect(AppliedEffectObject::dot(
            EffectId(2),
            EffectSchool::Bleed,
            30.0,
            3.0,
            1.0,
        ))
        .unwrap();
    let mut sim = Sim::new(codex);
    sim.lane.add(1, 0.0, 500.0);

    sim.with_ctx(|ctx| {
        ctx.attach_effect(&bleed, None, EntityId(1));
        ctx.attach_effect(&bleed, None, EntityId(1));
    });
    sim.step(1.0);
    assert_eq!(sim.lane.hits(1), vec![10.0, 10.0]);
}
