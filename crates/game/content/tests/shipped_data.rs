use std::path::PathBuf;

use combat_content::ContentFactory;
use combat_core::{
    Action, ActionCache, ActionId, DamageType, EffectId, SpellId, SpellDeck, TemplateId, Tile,
};

fn shipped() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[test]
fn shipped_codex_loads_and_validates_clean() {
    let codex = shipped().load_codex().expect("codex should load");

    assert!(codex.validate().is_empty(), "{:?}", codex.validate());
    assert!(codex.spell(SpellId(1)).is_some());
    assert!(codex.effect(EffectId(4)).is_some());

    // Every authored action builds into a runtime action.
    let mut cache = ActionCache::new();
    for raw in 1..=codex.action_count() as u32 {
        let built: Option<std::sync::Arc<Action>> = cache.get_or_build(ActionId(raw), &codex);
        assert!(built.is_some(), "action {} did not build", raw);
    }
}

#[test]
fn shipped_setup_references_loaded_content() {
    let factory = shipped();
    let setup = factory.load_config().expect("config should load");
    let codex = factory.load_codex().expect("codex should load");
    let creeps = factory.load_creeps().expect("creeps should load");
    let (dims, tiles) = factory.load_map("meadow").expect("map should load");

    for spell in &setup.deck.spells {
        assert!(codex.spell(*spell).is_some(), "deck names unknown {}", spell);
    }
    for zone in &setup.spawn_zones {
        assert!(creeps.contains_key(&zone.template), "zone '{}' spawns unknown template", zone.name);
        let goal = zone.goal.expect("shipped zones have goals");
        assert!(dims.contains(goal));
        assert!(tiles[&goal].is_passable());
    }

    let mut deck = SpellDeck::from_config(&setup.combat);
    for spell in &setup.deck.spells {
        deck.add(*spell);
    }
    assert!(deck.is_valid());

    let brute = &creeps[&TemplateId(2)];
    assert_eq!(brute.resistance(DamageType::Physical), 0.3);
    assert_eq!(tiles.len(), (dims.width * dims.height) as usize);
    assert!(!tiles[&Tile::new(5, 1)].is_passable());
}

#[test]
fn duplicate_template_ids_abort_the_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("effects.ron"), "[]").unwrap();
    std::fs::write(dir.path().join("spells.ron"), "[]").unwrap();
    std::fs::write(
        dir.path().join("actions.ron"),
        "[(id: 1, kind: Custom(3)), (id: 1, kind: Custom(4))]",
    )
    .unwrap();

    let err = ContentFactory::new(dir.path()).load_codex().unwrap_err();
    assert!(format!("{:#}", err).contains("actions.ron"));
}

#[test]
fn dangling_references_still_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("effects.ron"), "[]").unwrap();
    std::fs::write(
        dir.path().join("actions.ron"),
        "[(id: 1, kind: ApplyEffect(effect: 9))]",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("spells.ron"),
        "[(id: 1, delivery: Projectile, actions: [(action: 1), (action: 2)])]",
    )
    .unwrap();

    let codex = ContentFactory::new(dir.path()).load_codex().unwrap();
    assert_eq!(codex.validate().len(), 2);

    let mut cache = ActionCache::new();
    assert!(cache.get_or_build(ActionId(1), &codex).is_none());
}

#[test]
fn duplicate_creeps_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("creeps.ron"),
        r#"[(id: 1, name: "a", health: 1.0, speed: 1.0), (id: 1, name: "b", health: 1.0, speed: 1.0)]"#,
    )
    .unwrap();

    assert!(ContentFactory::new(dir.path()).load_creeps().is_err());
}
