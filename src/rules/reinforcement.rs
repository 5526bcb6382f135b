//! Turn-start reinforcements.

use crate::core::GameConfig;

/// Reinforcements for a player owning `owned` territories:
/// `max(floor, owned / divisor)`.
///
/// ```
/// use conquest_engine::rules::reinforcements;
///
/// assert_eq!(reinforcements(8), 3);
/// assert_eq!(reinforcements(12), 4);
/// ```
#[must_use]
pub fn reinforcements(owned: usize) -> u32 {
    reinforcements_with(&GameConfig::default(), owned)
}

/// Reinforcements under a custom config.
#[must_use]
pub fn reinforcements_with(config: &GameConfig, owned: usize) -> u32 {
    let divisor = config.reinforcement_divisor.max(1);
    let earned = u32::try_from(owned).unwrap_or(u32::MAX) / divisor;
    earned.max(config.min_reinforcements)
}
