//! Headless run configuration.
use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding `config.toml`, the template lists and `maps/`.
    pub data_dir: PathBuf,
    /// Map file stem under `maps/`.
    pub map: String,
    /// Fixed steps to simulate.
    pub steps: u64,
    /// Overrides `combat.game_seed` from the level setup.
    pub seed: Option<u64>,
    /// Print every published event as a JSON line on stdout.
    pub trace_events: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data")),
            map: "meadow".to_string(),
            steps: 1200,
            seed: None,
            trace_events: false,
        }
    }
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - content directory (default: the shipped data)
    /// - `COMBAT_MAP` - map name (default: `meadow`)
    /// - `COMBAT_STEPS` - number of fixed steps (default: 1200)
    /// - `COMBAT_SEED` - game seed override
    /// - `COMBAT_TRACE_EVENTS` - `1`/`true` to print events
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("COMBAT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(map) = env::var("COMBAT_MAP") {
            config.map = map;
        }
        if let Some(steps) = read_env::<u64>("COMBAT_STEPS") {
            config.steps = steps;
        }
        config.seed = read_env::<u64>("COMBAT_SEED");
        if let Ok(flag) = env::var("COMBAT_TRACE_EVENTS") {
            config.trace_events = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
