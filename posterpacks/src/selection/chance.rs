//! Poster chance rebalancing.

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    a + (b - a) * t
}

/// Move a level's poster chance toward the value that keeps the expected
/// poster count unchanged after its candidate list grew or shrank.
///
/// Returns `None` when the original list was empty, since there is no ratio
/// to preserve.
pub fn rebalanced_chance(
    chance: f32,
    original_count: usize,
    final_count: usize,
    multiplier: f32,
) -> Option<f32> {
    if original_count == 0 {
        return None;
    }
    let target = chance * final_count as f32 / original_count as f32;
    Some(lerp(chance, target, multiplier))
}
