use std::collections::HashSet;
use super::assert_rifas_err;
use crate::errors::RifasError;
use crate::utils::numbering::*;

#[test]
fn test_width_boundaries() {
    assert_rifas_err(ticket_width(0), RifasError::InvalidCapacity);
    assert_eq!(ticket_width(1).unwrap(), 2);
    assert_eq!(ticket_width(100).unwrap(), 2);
    assert_eq!(ticket_width(101).unwrap(), 3);
    assert_eq!(ticket_width(1_000).unwrap(), 3);
    assert_eq!(ticket_width(1_001).unwrap(), 4);
    assert_eq!(ticket_width(10_000).unwrap(), 4);
}

#[test]
fn test_format_has_fixed_width_per_space() {
    for total in 1..=100 {
        for i in 0..total {
            assert_eq!(format_ticket_number(i, total).unwrap().len(), 2);
        }
    }
    for total in [101, 500, 999, 1_000] {
        for i in 0..total {
            assert_eq!(format_ticket_number(i, total).unwrap().len(), 3);
        }
    }
    for i in 0..10_000 {
        assert_eq!(format_ticket_number(i, 10_000).unwrap().len(), 4);
    }
}

#[test]
fn test_format_pads_with_zeros() {
    assert_eq!(format_ticket_number(0, 100).unwrap(), "00");
    assert_eq!(format_ticket_number(7, 100).unwrap(), "07");
    assert_eq!(format_ticket_number(86, 1_000).unwrap(), "086");
    assert_eq!(format_ticket_number(586, 1_000).unwrap(), "586");
    assert_eq!(format_ticket_number(42, 10_000).unwrap(), "0042");
}

#[test]
fn test_format_is_injective_and_round_trips() {
    for total in [100, 1_000, 10_000] {
        let width = ticket_width(total).unwrap();
        let mut seen = HashSet::new();
        for i in 0..total {
            let number = format_ticket_number(i, total).unwrap();
            assert_eq!(parse_ticket_number(&number, width).unwrap(), i);
            assert!(seen.insert(number), "duplicate number for index {}", i);
        }
    }
}

#[test]
fn test_format_rejects_out_of_range_index() {
    assert_rifas_err(format_ticket_number(100, 100), RifasError::TicketIndexOutOfRange);
    assert_rifas_err(format_ticket_number(50, 50), RifasError::TicketIndexOutOfRange);
    assert_rifas_err(format_ticket_number(1_000, 1_000), RifasError::TicketIndexOutOfRange);
    // Beyond 10^4 the 4-digit space cannot represent the index.
    assert_rifas_err(format_ticket_number(10_000, 20_000), RifasError::TicketIndexOutOfRange);
    assert_rifas_err(format_ticket_number(0, 0), RifasError::InvalidCapacity);
}

#[test]
fn test_parse_is_strict_about_width() {
    assert_eq!(parse_ticket_number("086", 3).unwrap(), 86);
    assert_rifas_err(parse_ticket_number("86", 3), RifasError::InvalidTicketNumber);
    assert_rifas_err(parse_ticket_number("0086", 3), RifasError::InvalidTicketNumber);
    assert_rifas_err(parse_ticket_number("+86", 3), RifasError::InvalidTicketNumber);
}

#[test]
fn test_extract_takes_trailing_digits() {
    assert_eq!(extract_winning_number("2586", 2).unwrap(), "86");
    assert_eq!(extract_winning_number("2586", 3).unwrap(), "586");
    assert_eq!(extract_winning_number("2586", 4).unwrap(), "2586");
    assert_eq!(extract_winning_number("032586", 3).unwrap(), "586");
    assert_eq!(extract_winning_number("  32586\n", 2).unwrap(), "86");
}

#[test]
fn test_extract_output_length_is_width() {
    let draw = "9081726354";
    for width in 2..=4u8 {
        for end in width as usize..=draw.len() {
            let extracted = extract_winning_number(&draw[..end], width).unwrap();
            assert_eq!(extracted.len(), width as usize);
            assert!(draw[..end].ends_with(&extracted));
        }
    }
}

#[test]
fn test_extract_rejects_bad_input() {
    assert_rifas_err(extract_winning_number("7", 2), RifasError::DrawResultTooShort);
    assert_rifas_err(extract_winning_number("586", 4), RifasError::DrawResultTooShort);
    assert_rifas_err(extract_winning_number("", 2), RifasError::MalformedDrawResult);
    assert_rifas_err(extract_winning_number("   ", 2), RifasError::MalformedDrawResult);
    assert_rifas_err(extract_winning_number("32a86", 2), RifasError::MalformedDrawResult);
    assert_rifas_err(extract_winning_number("32.586", 3), RifasError::MalformedDrawResult);
}
