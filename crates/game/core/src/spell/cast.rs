use std::sync::Arc;

use glam::Vec2;

use crate::action::{Action, ActionArgs, ActionCache, CombatContext};
use crate::env::CombatWorld;
use crate::error::{ErrorSeverity, GameError};
use crate::spell::{SpellDelivery, SpellObject};
use crate::state::{EntityId, SpellId};
use crate::targeting::{LayerMask, TargetShape, find_targets};

/// Reasons a cast is refused before any action runs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("caster {0} is stunned")]
    Stunned(EntityId),

    #[error("caster missing")]
    CasterMissing,

    #[error("nothing to aim at")]
    NoAim,

    #[error("no valid target in range")]
    NoTarget,
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use CastError::*;
        match self {
            Stunned(_) => "CAST_STUNNED",
            CasterMissing => "CAST_CASTER_MISSING",
            NoAim => "CAST_NO_AIM",
            NoTarget => "CAST_NO_TARGET",
        }
    }
}

/// Runtime spell: a template plus the actions built for it so far.
#[derive(Clone, Debug)]
pub struct Spell {
    template: Arc<SpellObject>,
    cache: ActionCache,
}

impl Spell {
    pub fn new(template: Arc<SpellObject>) -> Self {
        Self {
            template,
            cache: ActionCache::new(),
        }
    }

    pub fn id(&self) -> SpellId {
        self.template.id
    }

    pub fn template(&self) -> &Arc<SpellObject> {
        &self.template
    }

    /// Casts the spell. Returns false when input gathering fails, in which
    /// case no action of the list has run or been scheduled.
    pub fn cast(&mut self, args: &ActionArgs, ctx: &mut CombatContext<'_>) -> bool {
        match self.try_cast(args, ctx) {
            Ok(steps) => {
                tracing::debug!(spell = %self.template.id, steps, "spell cast");
                true
            }
            Err(err) => {
                tracing::debug!(spell = %self.template.id, code = err.error_code(), "cast refused: {err}");
                false
            }
        }
    }

    /// Like [`cast`](Self::cast) but reports why a cast was refused.
    /// On success returns the number of steps run or scheduled.
    pub fn try_cast(&mut self, args: &ActionArgs, ctx: &mut CombatContext<'_>) -> Result<usize, CastError> {
        if let Some(caster) = args.caster()
            && ctx.effects.is_stunned(caster)
        {
            return Err(CastError::Stunned(caster));
        }

        let args = gather(self.template.delivery, args, &*ctx.world)?;

        let template = Arc::clone(&self.template);
        let plan: Vec<(Arc<Action>, f32)> = template
            .actions
            .iter()
            .filter_map(|step| {
                self.cache
                    .get_or_build(step.action, ctx.codex)
                    .map(|action| (action, step.delay))
            })
            .collect();

        let steps = plan.len();
        for (action, delay) in plan {
            ctx.run_or_schedule(action, args.clone(), delay);
        }
        Ok(steps)
    }
}

fn gather(
    delivery: SpellDelivery,
    args: &ActionArgs,
    world: &dyn CombatWorld,
) -> Result<ActionArgs, CastError> {
    match delivery {
        SpellDelivery::Area { max_range } => gather_area(args, max_range, world),
        SpellDelivery::Projectile => gather_projectile(args, world),
        SpellDelivery::Targeted { lock_radius, layers } => {
            gather_targeted(args, lock_radius, layers, world)
        }
    }
}

fn gather_area(
    args: &ActionArgs,
    max_range: Option<f32>,
    world: &dyn CombatWorld,
) -> Result<ActionArgs, CastError> {
    let center = args.origin(world).ok_or(CastError::NoAim)?;
    let caster_at = args.caster().and_then(|id| world.position_of(id));

    let center = match (max_range, caster_at) {
        (Some(range), Some(from)) if from.distance(center) > range => {
            from + (center - from).normalize_or_zero() * range
        }
        _ => center,
    };
    Ok(args.clone().aimed_at(center))
}

fn gather_projectile(args: &ActionArgs, world: &dyn CombatWorld) -> Result<ActionArgs, CastError> {
    let caster = args.caster().ok_or(CastError::CasterMissing)?;
    if !world.is_alive(caster) {
        return Err(CastError::CasterMissing);
    }
    let aim = args
        .first_point()
        .or_else(|| args.target().and_then(|id| world.position_of(id)))
        .ok_or(CastError::NoAim)?;
    Ok(args.clone().aimed_at(aim))
}

fn gather_targeted(
    args: &ActionArgs,
    lock_radius: f32,
    layers: LayerMask,
    world: &dyn CombatWorld,
) -> Result<ActionArgs, CastError> {
    if let Some(target) = args.target()
        && let Some(at) = world.position_of(target)
        && world.is_alive(target)
    {
        return Ok(args.clone().aimed_at(at));
    }

    let around = args
        .first_point()
        .or_else(|| args.caster().and_then(|id| world.position_of(id)))
        .ok_or(CastError::NoAim)?;

    let nearest = find_targets(world, around, TargetShape::circle(lock_radius), layers)
        .into_iter()
        .filter(|id| Some(*id) != args.caster() && world.is_alive(*id))
        .filter_map(|id| world.position_of(id).map(|at| (id, at)))
        .min_by(|(_, a), (_, b)| a.distance_squared(around).total_cmp(&b.distance_squared(around)));

    let (target, at): (EntityId, Vec2) = nearest.ok_or(CastError::NoTarget)?;
    Ok(args.clone().with_target(target).aimed_at(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionObject, AreaStrike, ProjectileDescriptor, SpellAction};
    use crate::combat::{DamageArgs, DamageType, EffectKind};
    use crate::effect::{AppliedEffect, AppliedEffectObject};
    use crate::state::{ActionId, EffectId, SimTime};
    use crate::testing::Harness;

    const BOLT: ActionId = ActionId(1);
    const BLAST: ActionId = ActionId(2);
    const UNKNOWN: ActionId = ActionId(3);

    fn harness() -> Harness {
        let mut harness = Harness::new();
        harness.arena.spawn(EntityId(1), Vec2::ZERO, 100.0, LayerMask::ALLY);
        harness.arena.spawn(EntityId(10), Vec2::new(3.0, 0.0), 100.0, LayerMask::ENEMY);
        harness.arena.spawn(EntityId(11), Vec2::new(6.0, 0.0), 100.0, LayerMask::ENEMY);

        harness
            .codex
            .insert_action(ActionObject::new(
                BOLT,
                ActionKind::FireProjectile(ProjectileDescriptor {
                    speed: 12.0,
                    radius: 0.25,
                    max_range: 20.0,
                    layers: LayerMask::ENEMY,
                    on_hit: Vec::new(),
                }),
            ))
            .unwrap();
        harness
            .codex
            .insert_action(ActionObject::new(
                BLAST,
                ActionKind::FindTargetsArea(
                    AreaStrike::new(TargetShape::circle(1.0), LayerMask::ENEMY)
                        .with_damage(DamageArgs::new(25.0, DamageType::Magic)),
                ),
            ))
            .unwrap();
        harness
            .codex
            .insert_action(ActionObject::new(UNKNOWN, ActionKind::Custom(9)))
            .unwrap();
        harness
    }

    fn spell(delivery: SpellDelivery, steps: &[SpellAction]) -> Spell {
        let mut template = SpellObject::new(SpellId(1), delivery);
        template.actions.extend_from_slice(steps);
        Spell::new(Arc::new(template))
    }

    #[test]
    fn targeted_without_candidates_fails_and_runs_nothing() {
        let mut harness = harness();
        let mut spell = spell(
            SpellDelivery::Targeted {
                lock_radius: 1.0,
                layers: LayerMask::ENEMY,
            },
            &[SpellAction::immediate(BLAST), SpellAction::delayed(BLAST, 1.0)],
        );
        let args = ActionArgs::from_caster(EntityId(1)).with_point(Vec2::new(-10.0, 0.0));

        assert!(!spell.cast(&args, &mut harness.ctx()));
        assert!(harness.scheduler.is_empty());
        assert!(harness.arena.damage_log(EntityId(10)).is_empty());
    }

    #[test]
    fn targeted_locks_the_nearest_enemy() {
        let mut harness = harness();
        let mut spell = spell(
            SpellDelivery::Targeted {
                lock_radius: 10.0,
                layers: LayerMask::ENEMY,
            },
            &[SpellAction::immediate(BLAST)],
        );
        let args = ActionArgs::from_caster(EntityId(1));

        assert!(spell.cast(&args, &mut harness.ctx()));
        assert_eq!(harness.arena.damage_log(EntityId(10)), vec![25.0]);
        assert!(harness.arena.damage_log(EntityId(11)).is_empty());
    }

    #[test]
    fn delayed_steps_wait_for_the_scheduler() {
        let mut harness = harness();
        let mut spell = spell(
            SpellDelivery::Area { max_range: None },
            &[SpellAction::delayed(BLAST, 0.5)],
        );
        let args = ActionArgs::from_caster(EntityId(1)).with_point(Vec2::new(6.0, 0.0));

        assert!(spell.cast(&args, &mut harness.ctx()));
        assert!(harness.arena.damage_log(EntityId(11)).is_empty());

        harness.now = SimTime(0.4);
        harness.ctx().drain_ready();
        assert!(harness.arena.damage_log(EntityId(11)).is_empty());

        harness.now = SimTime(0.5);
        assert_eq!(harness.ctx().drain_ready(), 1);
        assert_eq!(harness.arena.damage_log(EntityId(11)), vec![25.0]);
    }

    #[test]
    fn area_point_is_clamped_to_range() {
        let mut harness = harness();
        let mut spell = spell(
            SpellDelivery::Area {
                max_range: Some(3.0),
            },
            &[SpellAction::immediate(BLAST)],
        );
        let args = ActionArgs::from_caster(EntityId(1)).with_point(Vec2::new(6.0, 0.0));

        assert!(spell.cast(&args, &mut harness.ctx()));
        assert_eq!(harness.arena.damage_log(EntityId(10)), vec![25.0]);
        assert!(harness.arena.damage_log(EntityId(11)).is_empty());
    }

    #[test]
    fn unknown_steps_are_skipped_and_the_rest_still_run() {
        let mut harness = harness();
        let mut spell = spell(
            SpellDelivery::Projectile,
            &[SpellAction::immediate(UNKNOWN), SpellAction::immediate(BOLT)],
        );
        let args = ActionArgs::from_caster(EntityId(1)).with_target(EntityId(11));

        assert_eq!(spell.try_cast(&args, &mut harness.ctx()), Ok(1));
        assert_eq!(harness.pool.launches.len(), 1);
        assert_eq!(harness.pool.launches[0].direction, Vec2::X);
    }

    #[test]
    fn projectile_failure_does_not_abort_the_cast() {
        let mut harness = harness();
        harness.pool.capacity = Some(0);
        let mut spell = spell(
            SpellDelivery::Projectile,
            &[SpellAction::immediate(BOLT), SpellAction::immediate(BLAST)],
        );
        let args = ActionArgs::from_caster(EntityId(1)).with_point(Vec2::new(6.0, 0.0));

        assert!(spell.cast(&args, &mut harness.ctx()));
        assert!(harness.pool.launches.is_empty());
        assert_eq!(harness.arena.damage_log(EntityId(11)), vec![25.0]);
    }

    #[test]
    fn stunned_casters_cannot_cast() {
        let mut harness = harness();
        let stun = Arc::new(AppliedEffectObject::status(EffectId(1), EffectKind::Stun, 2.0, 0.0));
        harness
            .effects
            .attach(AppliedEffect::new(stun, None, EntityId(1)), &mut harness.arena);

        let mut spell = spell(SpellDelivery::Projectile, &[SpellAction::immediate(BOLT)]);
        let args = ActionArgs::from_caster(EntityId(1)).with_point(Vec2::X);
        assert_eq!(
            spell.try_cast(&args, &mut harness.ctx()),
            Err(CastError::Stunned(EntityId(1)))
        );
    }
}
