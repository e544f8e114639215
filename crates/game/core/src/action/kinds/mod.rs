//! Runtime actions.
//!
//! Each template kind maps to one struct with a `resolve` method; [`Action`]
//! dispatches between them. Templates whose tag has no runtime counterpart
//! produce no action.

mod apply;
mod area;
mod projectile;
mod zone;

pub use apply::ApplyEffectAction;
pub use area::FindTargetsAreaAction;
pub use projectile::FireProjectileAction;
pub use zone::CreateDamageZoneAction;

use std::sync::Arc;

use crate::action::{ActionArgs, ActionError, ActionKind, ActionObject, CombatContext};
use crate::codex::Codex;
use crate::state::ActionId;

/// A buildable, resolvable action.
#[derive(Clone, Debug, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    FindTargetsArea(FindTargetsAreaAction),
    FireProjectile(FireProjectileAction),
    CreateDamageZone(CreateDamageZoneAction),
    ApplyEffect(ApplyEffectAction),
}

impl Action {
    /// Builds the runtime action for `template`.
    ///
    /// Returns `None` (after a warning) for unknown tags and for templates
    /// that reference effects the codex does not hold.
    pub fn from_template(template: &ActionObject, codex: &Codex) -> Option<Self> {
        let id = template.id;
        match &template.kind {
            ActionKind::FindTargetsArea(strike) => {
                FindTargetsAreaAction::build(id, strike, codex).map(Self::FindTargetsArea)
            }
            ActionKind::FireProjectile(descriptor) => Some(Self::FireProjectile(
                FireProjectileAction::new(id, descriptor.clone()),
            )),
            ActionKind::CreateDamageZone(builder) => Some(Self::CreateDamageZone(
                CreateDamageZoneAction::new(id, builder.clone()),
            )),
            ActionKind::ApplyEffect { effect } => {
                let Some(template) = codex.effect(*effect) else {
                    tracing::warn!(action = %id, %effect, "apply action references a missing effect");
                    return None;
                };
                Some(Self::ApplyEffect(ApplyEffectAction::new(
                    id,
                    Arc::clone(template),
                )))
            }
            ActionKind::Custom(tag) => {
                tracing::warn!(
                    action = %id,
                    kind = template.kind.as_ref(),
                    tag,
                    "no runtime action for tag"
                );
                None
            }
        }
    }

    pub fn id(&self) -> ActionId {
        match self {
            Self::FindTargetsArea(action) => action.id(),
            Self::FireProjectile(action) => action.id(),
            Self::CreateDamageZone(action) => action.id(),
            Self::ApplyEffect(action) => action.id(),
        }
    }

    pub fn resolve(
        &self,
        args: &ActionArgs,
        ctx: &mut CombatContext<'_>,
    ) -> Result<usize, ActionError> {
        match self {
            Self::FindTargetsArea(action) => action.resolve(args, ctx),
            Self::FireProjectile(action) => action.resolve(args, ctx),
            Self::CreateDamageZone(action) => action.resolve(args, ctx),
            Self::ApplyEffect(action) => action.resolve(args, ctx),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        self.into()
    }
}
