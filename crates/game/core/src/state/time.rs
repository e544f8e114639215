use std::cmp::Ordering;
use std::fmt;

/// Absolute simulation time in seconds.
///
/// Time only advances through externally supplied frame deltas, so two runs fed
/// the same deltas observe identical timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: Self = Self(0.0);

    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Time `delay` seconds after `self`. Negative delays clamp to zero.
    pub fn after(self, delay: f32) -> Self {
        Self(self.0 + f64::from(delay.max(0.0)))
    }

    pub fn advance(&mut self, dt: f32) {
        *self = self.after(dt);
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
