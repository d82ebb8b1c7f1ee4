/// Number of positions where `attempt` matches `challenge`,
/// case-insensitively. Positions the attempt does not cover count as
/// misses; characters beyond the challenge length are ignored.
pub fn matches(challenge: &str, attempt: &str) -> usize {
    let attempt: Vec<char> = attempt.chars().collect();
    challenge
        .chars()
        .enumerate()
        .filter(|(i, expected)| {
            attempt
                .get(*i)
                .is_some_and(|typed| typed.eq_ignore_ascii_case(expected))
        })
        .count()
}

/// Integer recall percentage in [0, 100]: floor(matches * 100 / len).
pub fn score(challenge: &str, attempt: &str) -> u32 {
    let len = challenge.chars().count();
    if len == 0 {
        // Unreachable via the difficulty ladder; nothing to recall.
        return 100;
    }
    (matches(challenge, attempt) * 100 / len) as u32
}
