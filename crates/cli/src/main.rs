//! Headless simulation entry point.
//!
//! Loads a level from the data directory, lets the towers defend it for a
//! fixed number of steps and prints a JSON summary on stdout.
mod config;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_runtime::{BoardMap, Simulation, Topic, drain};
use config::CliConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        map = %config.map,
        steps = config.steps,
        "starting run"
    );

    let factory = ContentFactory::new(&config.data_dir);
    let mut setup = factory.load_config().context("loading level setup")?;
    if let Some(seed) = config.seed {
        setup.combat.game_seed = seed;
    }
    let codex = factory.load_codex().context("loading templates")?;
    let creeps = factory.load_creeps().context("loading creeps")?;
    let (dimensions, tiles) = factory
        .load_map(&config.map)
        .with_context(|| format!("loading map '{}'", config.map))?;

    let mut sim = Simulation::new(codex, creeps, BoardMap::new(dimensions, tiles), &setup)
        .context("assembling simulation")?;
    let topics = [Topic::Combat, Topic::Spawn, Topic::Deck];
    let mut events = sim.events_mut().subscribe_multiple(&topics);

    for _ in 0..config.steps {
        sim.step(sim.fixed_step());
        for topic in &topics {
            let Some(rx) = events.get_mut(topic) else {
                continue;
            };
            for event in drain(rx) {
                if config.trace_events {
                    println!("{}", serde_json::to_string(&event)?);
                }
            }
        }
    }

    let summary = sim.summary();
    tracing::info!(
        casts = summary.stats.casts,
        defeated = summary.stats.defeated,
        leaked = summary.stats.leaked,
        gold = summary.gold,
        "run finished"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
