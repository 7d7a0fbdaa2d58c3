use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Missing or non-numeric metric cells count as zero.
pub fn parse_metric_field(raw: &str) -> Decimal {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

/// Whole, non-negative quantity; fractions truncate, negatives and garbage become zero.
pub fn parse_count_field(raw: &str) -> u64 {
    parse_decimal(raw)
        .filter(|value| !value.is_sign_negative())
        .and_then(|value| value.trunc().to_u64())
        .unwrap_or(0)
}

pub fn parse_id_field(raw: &str) -> u32 {
    u32::try_from(parse_count_field(raw)).unwrap_or(0)
}

pub fn parse_month_field(raw: &str) -> u8 {
    u8::try_from(parse_count_field(raw)).unwrap_or(0)
}

pub fn parse_year_field(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub fn is_malformed(raw: &str) -> bool {
    !raw.trim().is_empty() && parse_decimal(raw).is_none()
}
