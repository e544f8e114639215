use std::collections::HashMap;
use std::sync::Arc;

use crate::action::Action;
use crate::codex::Codex;
use crate::state::ActionId;

/// Per-owner memo of runtime actions built from templates.
///
/// A template that cannot be built is remembered as `None`, so the warning is
/// logged once per owner rather than on every cast or tick.
#[derive(Clone, Debug, Default)]
pub struct ActionCache {
    built: HashMap<ActionId, Option<Arc<Action>>>,
}

impl ActionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, id: ActionId, codex: &Codex) -> Option<Arc<Action>> {
        self.built
            .entry(id)
            .or_insert_with(|| {
                let Some(template) = codex.action(id) else {
                    tracing::warn!(action = %id, "action template missing");
                    return None;
                };
                Action::from_template(template, codex).map(Arc::new)
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.built.len()
    }

    pub fn is_empty(&self) -> bool {
        self.built.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionObject};

    #[test]
    fn builds_once_and_shares() {
        let mut codex = Codex::new();
        codex
            .insert_action(ActionObject::new(
                ActionId(3),
                ActionKind::FireProjectile(crate::action::ProjectileDescriptor {
                    speed: 10.0,
                    radius: 0.2,
                    max_range: 8.0,
                    layers: crate::targeting::LayerMask::ENEMY,
                    on_hit: Vec::new(),
                }),
            ))
            .unwrap();

        let mut cache = ActionCache::new();
        let first = cache.get_or_build(ActionId(3), &codex).unwrap();
        let second = cache.get_or_build(ActionId(3), &codex).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unbuildable_templates_are_memoized_as_none() {
        let mut codex = Codex::new();
        codex
            .insert_action(ActionObject::new(ActionId(1), ActionKind::Custom(42)))
            .unwrap();

        let mut cache = ActionCache::new();
        assert!(cache.get_or_build(ActionId(1), &codex).is_none());
        assert!(cache.get_or_build(ActionId(2), &codex).is_none());
        assert_eq!(cache.len(), 2);
    }
}
