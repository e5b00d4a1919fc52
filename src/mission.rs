//! Mission prompts and the rotator that picks the next one.
//!
//! The rotator only answers explicit rerolls; it never looks at the roster
//! and its state is not persisted.

use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// The fixed mission pool. The first prompt is shown on startup.
pub const MISSION_PROMPTS: [&str; 8] = [
    "Craft a haiku about their most iconic outfit.",
    "Queue up a playlist that feels like their vibe and send it with zero context.",
    "Recreate their favorite snack and share a photo of the chaos.",
    "Schedule a reminder to drop an unprompted compliment in the next 6 hours.",
    "Design a custom emoji that captures their entire aura.",
    "Upgrade your background with a shrine-worthy wallpaper refresh.",
    "Study their latest post and leave a comment that's 30% wholesome, 70% unhinged.",
    "Translate your devotion score into a meme they would actually repost.",
];

/// Mantras shown alongside the mission.
pub const AFFIRMATIONS: [&str; 5] = [
    "Simping respectfully is still simping brilliantly.",
    "Your devotion energy is immaculate today.",
    "No crumbs? No problem. You brought the whole bakery.",
    "Hydrate, stretch, then double-text with confidence.",
    "You're the main character in their unseen fan club.",
];

/// Picks a random mission that differs from the one currently shown.
#[derive(Debug, Clone)]
pub struct MissionRotator {
    pool: &'static [&'static str],
    current: &'static str,
    rng: Pcg32,
}

impl MissionRotator {
    /// Rotator over [`MISSION_PROMPTS`] seeded from the OS.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Rotator over [`MISSION_PROMPTS`] with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_pool(&MISSION_PROMPTS, seed)
    }

    /// Rotator over a custom pool.
    ///
    /// An empty pool yields an empty mission string forever.
    pub fn with_pool(pool: &'static [&'static str], seed: u64) -> Self {
        Self {
            pool,
            current: pool.first().copied().unwrap_or_default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn current(&self) -> &'static str {
        self.current
    }

    /// Replace the current mission with a different one from the pool.
    ///
    /// Falls back to the first prompt when every candidate equals the
    /// current mission (a one-prompt pool).
    pub fn reroll(&mut self) -> &'static str {
        let candidates: Vec<&'static str> = self
            .pool
            .iter()
            .copied()
            .filter(|prompt| *prompt != self.current)
            .collect();

        self.current = candidates
            .choose(&mut self.rng)
            .copied()
            .or_else(|| self.pool.first().copied())
            .unwrap_or_default();

        tracing::debug!(mission = self.current, "Mission rerolled");
        self.current
    }
}

impl Default for MissionRotator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_first_prompt() {
        let rotator = MissionRotator::with_seed(7);
        assert_eq!(rotator.current(), MISSION_PROMPTS[0]);
    }

    #[test]
    fn test_reroll_never_repeats() {
        for seed in 0..50 {
            let mut rotator = MissionRotator::with_seed(seed);
            let mut previous = rotator.current();
            for _ in 0..40 {
                let next = rotator.reroll();
                assert_ne!(next, previous);
                assert!(MISSION_PROMPTS.contains(&next));
                previous = next;
            }
        }
    }

    #[test]
    fn test_two_prompt_pool_alternates() {
        static POOL: [&str; 2] = ["left", "right"];
        let mut rotator = MissionRotator::with_pool(&POOL, 3);
        assert_eq!(rotator.reroll(), "right");
        assert_eq!(rotator.reroll(), "left");
        assert_eq!(rotator.reroll(), "right");
    }

    #[test]
    fn test_single_prompt_pool_falls_back_to_first() {
        static POOL: [&str; 1] = ["only"];
        let mut rotator = MissionRotator::with_pool(&POOL, 3);
        assert_eq!(rotator.reroll(), "only");
    }

    #[test]
    fn test_empty_pool() {
        static POOL: [&str; 0] = [];
        let mut rotator = MissionRotator::with_pool(&POOL, 3);
        assert_eq!(rotator.current(), "");
        assert_eq!(rotator.reroll(), "");
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = MissionRotator::with_seed(42);
        let mut b = MissionRotator::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.reroll(), b.reroll());
        }
    }
}
