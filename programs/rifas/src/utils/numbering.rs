//! Ticket numbers are fixed-width, zero-padded decimal strings whose width
//! follows the size of the raffle's ticket space. Leading zeros are part of
//! the number: `"086"` and `"86"` are different tickets.

use anchor_lang::prelude::*;
use crate::errors::RifasError;

/// Digit width of the ticket space for a raffle of `total_tickets`.
pub fn ticket_width(total_tickets: u32) -> Result<u8> {
    match total_tickets {
        0 => err!(RifasError::InvalidCapacity),
        1..=100 => Ok(2),
        101..=1_000 => Ok(3),
        _ => Ok(4),
    }
}

/// Largest index representable in `width` digits, plus one.
pub fn width_capacity(width: u8) -> u32 {
    10u32.pow(width as u32)
}

pub fn format_ticket_number(index: u32, total_tickets: u32) -> Result<String> {
    let width = ticket_width(total_tickets)?;
    require!(
        index < total_tickets && index < width_capacity(width),
        RifasError::TicketIndexOutOfRange
    );
    Ok(format!("{:0>width$}", index, width = width as usize))
}

pub fn parse_ticket_number(number: &str, width: u8) -> Result<u32> {
    require!(
        number.len() == width as usize && number.bytes().all(|b| b.is_ascii_digit()),
        RifasError::InvalidTicketNumber
    );
    number
        .parse::<u32>()
        .map_err(|_| error!(RifasError::InvalidTicketNumber))
}

/// Reinterprets an external draw result in a `width`-digit ticket space by
/// keeping its last `width` digits.
pub fn extract_winning_number(draw_result: &str, width: u8) -> Result<String> {
    let digits = draw_result.trim();
    require!(
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        RifasError::MalformedDrawResult
    );
    require!(
        digits.len() >= width as usize,
        RifasError::DrawResultTooShort
    );
    Ok(digits[digits.len() - width as usize..].to_string())
}
