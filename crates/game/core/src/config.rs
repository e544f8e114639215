/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Seed mixed into every dice roll (crits, spawn batches, spawn tiles).
    pub game_seed: u64,
    /// Minimum number of included cards before a deck counts as valid.
    pub min_deck_size: usize,
    /// Maximum number of included cards a deck accepts.
    pub max_deck_size: usize,
    /// Number of hand slots per deck.
    pub hand_size: usize,
    /// Capacity of the projectile pool before acquisition fails.
    pub max_projectiles: usize,
    /// Fixed simulation step in seconds used by headless drivers.
    pub fixed_step: f32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of world-space input points carried by one cast.
    pub const MAX_INPUT_POINTS: usize = 4;
    /// Upper bound accepted for `hand_size`.
    pub const MAX_HAND_SIZE: usize = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GAME_SEED: u64 = 0x5eed;
    pub const DEFAULT_MIN_DECK_SIZE: usize = 8;
    pub const DEFAULT_MAX_DECK_SIZE: usize = 12;
    pub const DEFAULT_HAND_SIZE: usize = 4;
    pub const DEFAULT_MAX_PROJECTILES: usize = 64;
    pub const DEFAULT_FIXED_STEP: f32 = 0.05;

    pub fn new() -> Self {
        Self {
            game_seed: Self::DEFAULT_GAME_SEED,
            min_deck_size: Self::DEFAULT_MIN_DECK_SIZE,
            max_deck_size: Self::DEFAULT_MAX_DECK_SIZE,
            hand_size: Self::DEFAULT_HAND_SIZE,
            max_projectiles: Self::DEFAULT_MAX_PROJECTILES,
            fixed_step: Self::DEFAULT_FIXED_STEP,
        }
    }

    pub fn with_game_seed(mut self, game_seed: u64) -> Self {
        self.game_seed = game_seed;
        self
    }

    pub fn with_deck_sizes(mut self, min: usize, max: usize, hand: usize) -> Self {
        self.min_deck_size = min;
        self.max_deck_size = max;
        self.hand_size = hand.min(Self::MAX_HAND_SIZE);
        self
    }

    pub fn with_max_projectiles(mut self, max_projectiles: usize) -> Self {
        self.max_projectiles = max_projectiles;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
