use anchor_lang::prelude::*;
use crate::errors::RifasError;
use crate::constants::*;
use crate::state::DrawType;
use crate::utils::numbering::ticket_width;

pub fn validate_price_bounds(price: u64) -> Result<()> {
    require!(
        (MIN_TICKET_PRICE..=MAX_TICKET_PRICE).contains(&price),
        RifasError::InvalidPrice
    );
    Ok(())
}

pub fn validate_capacity(capacity: u32) -> Result<()> {
    require!(
        capacity > 0 && capacity <= MAX_TICKETS,
        RifasError::InvalidCapacity
    );
    Ok(())
}

/// The ticket count decides the digit width; the declared draw type must agree.
pub fn validate_draw_type(draw_type: DrawType, total_tickets: u32) -> Result<()> {
    validate_capacity(total_tickets)?;
    require!(
        ticket_width(total_tickets)? == draw_type.width(),
        RifasError::DrawTypeMismatch
    );
    Ok(())
}

pub fn validate_commission(commission_bps: u16) -> Result<()> {
    require!(
        commission_bps <= MAX_COMMISSION_BPS,
        RifasError::CommissionTooHigh
    );
    Ok(())
}

pub fn validate_order_numbers(numbers: &[u32], total_tickets: u32) -> Result<()> {
    require!(!numbers.is_empty(), RifasError::EmptyOrder);
    require!(
        numbers.len() <= MAX_NUMBERS_PER_ORDER,
        RifasError::TooManyNumbers
    );
    for (i, n) in numbers.iter().enumerate() {
        require!(*n < total_tickets, RifasError::TicketIndexOutOfRange);
        require!(!numbers[..i].contains(n), RifasError::DuplicateNumber);
    }
    Ok(())
}

pub fn validate_draw_value(draw_value: &str) -> Result<()> {
    require!(
        draw_value.trim().len() <= MAX_DRAW_VALUE_LEN,
        RifasError::TextTooLong
    );
    Ok(())
}
