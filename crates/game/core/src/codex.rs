//! Template registry.
//!
//! The codex owns every authored template (actions, applied effects, spells)
//! and hands out shared `Arc` handles. Runtime objects look templates up by id
//! through it; nothing in the core keeps a global registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::action::{ActionKind, ActionObject, SpellAction};
use crate::effect::AppliedEffectObject;
use crate::error::{ErrorSeverity, GameError};
use crate::spell::SpellObject;
use crate::state::{ActionId, EffectId, SpellId};

/// Problems found while registering or validating templates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodexError {
    #[error("duplicate {kind} template {id}")]
    Duplicate { kind: &'static str, id: u32 },

    #[error("{owner} references missing {action}")]
    DanglingAction { owner: String, action: ActionId },

    #[error("{owner} references missing {effect}")]
    DanglingEffect { owner: String, effect: EffectId },

    #[error("{action} has unknown tag {tag}")]
    UnknownTag { action: ActionId, tag: u16 },

    #[error("{0} has a degenerate target shape")]
    DegenerateShape(ActionId),
}

impl GameError for CodexError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use CodexError::*;
        match self {
            Duplicate { .. } => "CODEX_DUPLICATE",
            DanglingAction { .. } => "CODEX_DANGLING_ACTION",
            DanglingEffect { .. } => "CODEX_DANGLING_EFFECT",
            UnknownTag { .. } => "CODEX_UNKNOWN_TAG",
            DegenerateShape(_) => "CODEX_DEGENERATE_SHAPE",
        }
    }
}

/// Registry of shared, immutable templates.
#[derive(Clone, Debug, Default)]
pub struct Codex {
    actions: HashMap<ActionId, Arc<ActionObject>>,
    effects: HashMap<EffectId, Arc<AppliedEffectObject>>,
    spells: HashMap<SpellId, Arc<SpellObject>>,
}

impl Codex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_action(&mut self, action: ActionObject) -> Result<Arc<ActionObject>, CodexError> {
        insert(&mut self.actions, action.id, action, "action", |id| id.0)
    }

    pub fn insert_effect(
        &mut self,
        effect: AppliedEffectObject,
    ) -> Result<Arc<AppliedEffectObject>, CodexError> {
        insert(&mut self.effects, effect.id, effect, "effect", |id| id.0)
    }

    pub fn insert_spell(&mut self, spell: SpellObject) -> Result<Arc<SpellObject>, CodexError> {
        insert(&mut self.spells, spell.id, spell, "spell", |id| id.0)
    }

    pub fn action(&self, id: ActionId) -> Option<&Arc<ActionObject>> {
        self.actions.get(&id)
    }

    pub fn effect(&self, id: EffectId) -> Option<&Arc<AppliedEffectObject>> {
        self.effects.get(&id)
    }

    pub fn spell(&self, id: SpellId) -> Option<&Arc<SpellObject>> {
        self.spells.get(&id)
    }

    pub fn spell_ids(&self) -> impl Iterator<Item = SpellId> + '_ {
        self.spells.keys().copied()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn spell_count(&self) -> usize {
        self.spells.len()
    }

    /// Cross-checks every reference between templates.
    ///
    /// The codex stays usable when this reports problems: runtime factories
    /// skip whatever they cannot build and log a warning.
    pub fn validate(&self) -> Vec<CodexError> {
        let mut issues = Vec::new();

        for action in self.actions.values() {
            let owner = action.id.to_string();
            match &action.kind {
                ActionKind::FindTargetsArea(area) => {
                    if !area.shape.is_valid() {
                        issues.push(CodexError::DegenerateShape(action.id));
                    }
                    for effect in &area.effects {
                        self.check_effect(&owner, *effect, &mut issues);
                    }
                }
                ActionKind::FireProjectile(projectile) => {
                    self.check_actions(&owner, &projectile.on_hit, &mut issues);
                }
                ActionKind::CreateDamageZone(zone) => {
                    if !zone.shape.is_valid() {
                        issues.push(CodexError::DegenerateShape(action.id));
                    }
                }
                ActionKind::ApplyEffect { effect } => {
                    self.check_effect(&owner, *effect, &mut issues);
                }
                ActionKind::Custom(tag) => issues.push(CodexError::UnknownTag {
                    action: action.id,
                    tag: *tag,
                }),
            }
        }

        for effect in self.effects.values() {
            let owner = effect.id.to_string();
            self.check_actions(&owner, &effect.on_tick, &mut issues);
            self.check_actions(&owner, &effect.on_expire, &mut issues);
        }

        for spell in self.spells.values() {
            self.check_actions(&spell.id.to_string(), &spell.actions, &mut issues);
        }

        issues
    }

    fn check_actions(&self, owner: &str, actions: &[SpellAction], issues: &mut Vec<CodexError>) {
        for step in actions {
            if !self.actions.contains_key(&step.action) {
                issues.push(CodexError::DanglingAction {
                    owner: owner.to_owned(),
                    action: step.action,
                });
            }
        }
    }

    fn check_effect(&self, owner: &str, effect: EffectId, issues: &mut Vec<CodexError>) {
        if !self.effects.contains_key(&effect) {
            issues.push(CodexError::DanglingEffect {
                owner: owner.to_owned(),
                effect,
            });
        }
    }
}

fn insert<K, T>(
    map: &mut HashMap<K, Arc<T>>,
    id: K,
    value: T,
    kind: &'static str,
    raw: impl Fn(K) -> u32,
) -> Result<Arc<T>, CodexError>
where
    K: std::hash::Hash + Eq + Copy,
{
    if map.contains_key(&id) {
        return Err(CodexError::Duplicate { kind, id: raw(id) });
    }
    let value = Arc::new(value);
    map.insert(id, Arc::clone(&value));
    Ok(value)
}
