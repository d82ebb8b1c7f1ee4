use std::collections::VecDeque;

use rand::rngs::ThreadRng;
use rand::Rng;

/// Glyphs a challenge may contain: A-Z and 2-9 with the lookalike
/// characters I, L, O, 0 and 1 removed.
pub const GLYPHS: &str = "ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Strategy for producing the character sequence shown in a trial
pub trait ChallengeSource {
    /// Produce a challenge of exactly `len` glyphs.
    fn challenge(&mut self, len: usize) -> String;
}

/// Uniform draw with replacement from [`GLYPHS`]
pub struct RandomChallenge<R: Rng> {
    rng: R,
}

impl RandomChallenge<ThreadRng> {
    /// Challenge source backed by the thread RNG, which is seeded from OS
    /// entropy once and reused for the whole process.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomChallenge<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomChallenge<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ChallengeSource for RandomChallenge<R> {
    fn challenge(&mut self, len: usize) -> String {
        let glyphs = GLYPHS.as_bytes();
        (0..len)
            .map(|_| glyphs[self.rng.gen_range(0..glyphs.len())] as char)
            .collect()
    }
}

/// Scripted source for tests: hands out queued challenges in order
pub struct ScriptedChallenge {
    queue: VecDeque<String>,
}

impl ScriptedChallenge {
    pub fn new<I, S>(challenges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: challenges.into_iter().map(Into::into).collect(),
        }
    }
}

impl ChallengeSource for ScriptedChallenge {
    fn challenge(&mut self, len: usize) -> String {
        self.queue.pop_front().unwrap_or_else(|| "A".repeat(len))
    }
}
