pub mod draw;
pub mod numbering;
pub mod validation;

use anchor_lang::prelude::*;
use crate::errors::RifasError;

pub fn validate_text(input: &str, max_len: usize) -> Result<()> {
    require!(!input.trim().is_empty(), RifasError::EmptyText);
    require!(input.len() <= max_len, RifasError::TextTooLong);
    require!(
        input.chars().all(|c| !c.is_control()),
        RifasError::InvalidCharacters
    );
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    validate_text(slug, crate::constants::MAX_SLUG_LEN)?;
    require!(
        slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
        RifasError::InvalidSlug
    );
    Ok(())
}

pub fn safe_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(RifasError::MathOverflow.into())
}

pub fn safe_mul(a: u64, b: u64) -> Result<u64> {
    a.checked_mul(b).ok_or(RifasError::MathOverflow.into())
}

/// Basis-point share of `amount`, rounded down.
pub fn calculate_fee(amount: u64, fee_bps: u16) -> Result<u64> {
    let fee = safe_mul(amount, fee_bps as u64)?;
    fee.checked_div(10_000).ok_or(RifasError::MathOverflow.into())
}
