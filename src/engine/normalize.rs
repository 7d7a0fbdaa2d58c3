use crate::engine::rules::MAX_RAW_SCORE;
use crate::types::report::{NormalizedScore, RawScore};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const MAX_NORMALIZED_SCORE: NormalizedScore = 100;

/// Rounds to the nearest integer, halves away from zero (2.5 -> 3).
pub fn round_half_away(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub fn normalize(raw: RawScore) -> NormalizedScore {
    let raw = raw.min(MAX_RAW_SCORE);
    let scaled = Decimal::from(raw) * Decimal::from(MAX_NORMALIZED_SCORE)
        / Decimal::from(MAX_RAW_SCORE);
    round_half_away(scaled)
        .to_u32()
        .unwrap_or(0)
        .min(MAX_NORMALIZED_SCORE)
}
