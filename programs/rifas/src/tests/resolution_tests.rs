use anchor_lang::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use super::assert_rifas_err;
use crate::constants::DRAW_SLOT_DELAY;
use crate::errors::RifasError;
use crate::state::*;
use crate::utils::draw::*;
use crate::utils::numbering::{extract_winning_number, format_ticket_number, parse_ticket_number};

const SOLD: [u32; 3] = [86, 123, 586];

fn hundreds_book(sold: &[u32]) -> TicketBook {
    let mut book = TicketBook::new(Pubkey::new_unique(), 1_000, 255);
    book.reserve(sold).unwrap();
    book.confirm(sold).unwrap();
    book
}

fn hundreds_raffle() -> Raffle {
    Raffle {
        admin: Pubkey::new_unique(),
        raffle_id: 3,
        title: "Pix de R$ 1.000".to_string(),
        ticket_price: 1_000,
        total_tickets: 1_000,
        draw_type: DrawType::Hundreds,
        status: RaffleStatus::Drawing,
        stage: ResolutionStage::AwaitingResult,
        tickets_reserved: 0,
        tickets_sold: SOLD.len() as u32,
        order_count: 3,
        draw_value: String::new(),
        candidate: None,
        draw_seed: [0u8; 32],
        draw_slot: 0,
        winner: None,
        created_at: 1_000,
        finished_at: None,
        bump: 255,
    }
}

fn holder_of(index: u32) -> (Pubkey, Order) {
    let order = Order {
        raffle: Pubkey::new_unique(),
        order_id: index as u64,
        buyer: Pubkey::new_unique(),
        buyer_name: format!("Comprador {}", index),
        buyer_contact: "11988887777".to_string(),
        numbers: vec![index],
        total_price: 1_000,
        partner: None,
        commission: 0,
        status: OrderStatus::Paid,
        created_at: 1_000,
        processed_at: Some(1_050),
        bump: 250,
    };
    (Pubkey::new_unique(), order)
}

const CHECK_SLOT: u64 = 1_000;

fn check(raffle: &mut Raffle, book: &TicketBook, draw_value: &str) -> Result<CheckOutcome> {
    check_as(raffle, book, draw_value, WinnerProvenance::FederalDraw)
}

/// Same steps the submit_draw_result instruction takes.
fn check_as(
    raffle: &mut Raffle,
    book: &TicketBook,
    draw_value: &str,
    provenance: WinnerProvenance,
) -> Result<CheckOutcome> {
    raffle.ensure_checkable()?;
    let number = extract_winning_number(draw_value, raffle.width())?;
    let candidate = parse_ticket_number(&number, raffle.width())?;
    let outcome = check_winner(book, candidate);
    match outcome {
        CheckOutcome::Match(index) => {
            let (key, order) = holder_of(index);
            let winner = Winner::from_order(
                key,
                &order,
                index,
                raffle.total_tickets,
                draw_value,
                provenance,
                [0u8; 32],
                5_000,
            )?;
            raffle.resolve(winner)?;
        }
        CheckOutcome::Accumulated => {
            raffle.record_accumulation(draw_value, candidate, CHECK_SLOT + DRAW_SLOT_DELAY)?
        }
    }
    Ok(outcome)
}

#[test]
fn test_federal_draw_match_resolves_holder() {
    let book = hundreds_book(&SOLD);
    let mut raffle = hundreds_raffle();

    let outcome = check(&mut raffle, &book, "32586").unwrap();
    assert_eq!(outcome, CheckOutcome::Match(586));
    assert_eq!(raffle.stage, ResolutionStage::Resolved);

    let winner = raffle.winner.clone().unwrap();
    assert_eq!(winner.ticket_number, "586");
    assert_eq!(winner.buyer_name, "Comprador 586");
    assert_eq!(winner.provenance, WinnerProvenance::FederalDraw);
    assert_eq!(winner.draw_value, "32586");

    raffle.finalize(6_000).unwrap();
    assert_eq!(raffle.status, RaffleStatus::Finished);
    assert_rifas_err(raffle.finalize(7_000), RifasError::AlreadyFinalized);
    assert_eq!(raffle.winner.unwrap(), winner);
}

#[test]
fn test_leading_zero_is_significant() {
    let book = hundreds_book(&SOLD);
    let mut raffle = hundreds_raffle();

    // "086" is sold; the draw ending in 086 matches it.
    assert_eq!(check(&mut raffle, &book, "41086").unwrap(), CheckOutcome::Match(86));
    assert_eq!(raffle.winner.unwrap().ticket_number, "086");
}

#[test]
fn test_check_is_deterministic() {
    let book = hundreds_book(&SOLD);
    for draw in ["32586", "32999", "00123", "77777"] {
        let first = check(&mut hundreds_raffle(), &book, draw).unwrap();
        for _ in 0..5 {
            assert_eq!(check(&mut hundreds_raffle(), &book, draw).unwrap(), first);
        }
    }
}

#[test]
fn test_unsold_candidate_accumulates_without_winner() {
    let book = hundreds_book(&SOLD);
    let mut raffle = hundreds_raffle();

    assert_eq!(check(&mut raffle, &book, "32999").unwrap(), CheckOutcome::Accumulated);
    assert_eq!(raffle.stage, ResolutionStage::Accumulated);
    assert_eq!(raffle.candidate, Some(999));
    assert!(raffle.winner.is_none());
    assert_rifas_err(raffle.finalize(6_000), RifasError::NotResolved);
}

#[test]
fn test_reserved_ticket_is_not_a_match() {
    let mut book = hundreds_book(&SOLD);
    book.reserve(&[999]).unwrap();
    assert_eq!(check_winner(&book, 999), CheckOutcome::Accumulated);
}

#[test]
fn test_candidate_outside_small_raffle_accumulates() {
    // 50 tickets still use the 2-digit space; "86" can never be sold.
    let mut book = TicketBook::new(Pubkey::new_unique(), 50, 255);
    book.reserve(&[6]).unwrap();
    book.confirm(&[6]).unwrap();
    assert_eq!(check_winner(&book, 86), CheckOutcome::Accumulated);
    assert_eq!(check_winner(&book, 6), CheckOutcome::Match(6));
}

#[test]
fn test_accumulation_then_random_draw() {
    let book = hundreds_book(&SOLD);
    let mut raffle = hundreds_raffle();
    let raffle_key = Pubkey::new_unique();

    check(&mut raffle, &book, "32999").unwrap();
    raffle.ensure_draw_slot_passed(raffle.draw_slot + 1).unwrap();

    let seed = derive_draw_seed(
        &raffle_key,
        &raffle.draw_value,
        book.sold_count(),
        raffle.draw_slot,
        &[42u8; 32],
    );
    let index = pick_sold_ticket(&book, &seed).unwrap();
    assert!(SOLD.contains(&index));

    raffle.record_random_pick(seed, index).unwrap();
    assert_eq!(raffle.pending_pick().unwrap(), index);

    let (key, order) = holder_of(index);
    let winner = Winner::from_order(
        key,
        &order,
        index,
        raffle.total_tickets,
        &raffle.draw_value,
        WinnerProvenance::RandomDraw,
        raffle.draw_seed,
        9_500,
    )
    .unwrap();
    raffle.resolve(winner).unwrap();

    let recorded = raffle.winner.clone().unwrap();
    assert_eq!(recorded.provenance, WinnerProvenance::RandomDraw);
    assert_eq!(recorded.seed, seed);
    assert_eq!(recorded.ticket_number, format_ticket_number(index, 1_000).unwrap());
    raffle.finalize(10_000).unwrap();
}

#[test]
fn test_random_draw_with_nothing_sold_is_rejected() {
    let book = TicketBook::new(Pubkey::new_unique(), 1_000, 255);
    assert_rifas_err(pick_sold_ticket(&book, &[7u8; 32]), RifasError::NothingSold);

    // Reservations alone are not sales.
    let mut reserved = TicketBook::new(Pubkey::new_unique(), 1_000, 255);
    reserved.reserve(&[1, 2, 3]).unwrap();
    assert_rifas_err(pick_sold_ticket(&reserved, &[7u8; 32]), RifasError::NothingSold);
}

#[test]
fn test_seed_is_reproducible_and_input_sensitive() {
    let raffle = Pubkey::new_unique();
    let hash = [5u8; 32];
    let a = derive_draw_seed(&raffle, "32999", 3, 10, &hash);
    assert_eq!(a, derive_draw_seed(&raffle, "32999", 3, 10, &hash));
    assert_ne!(a, derive_draw_seed(&raffle, "32999", 3, 11, &hash));
    assert_ne!(a, derive_draw_seed(&raffle, "32999", 3, 10, &[6u8; 32]));
    assert_ne!(a, derive_draw_seed(&raffle, "32998", 3, 10, &hash));
    assert_ne!(a, derive_draw_seed(&raffle, "32999", 4, 10, &hash));
    assert_ne!(a, derive_draw_seed(&Pubkey::new_unique(), "32999", 3, 10, &hash));
}

/// Raw SlotHashes layout: entry count, then (slot, hash) newest first.
fn slot_hashes(slots: &[u64]) -> Vec<u8> {
    let mut data = (slots.len() as u64).to_le_bytes().to_vec();
    for slot in slots {
        data.extend_from_slice(&slot.to_le_bytes());
        data.extend_from_slice(&[(*slot % 251) as u8; 32]);
    }
    data
}

#[test]
fn test_slot_hash_lookup() {
    let data = slot_hashes(&[105, 104, 102, 101, 100]);

    assert_eq!(lookup_slot_hash(&data, 104), SlotHashLookup::Found(104, [104u8; 32]));
    // 103 was skipped; the next produced slot stands in for it.
    assert_eq!(lookup_slot_hash(&data, 103), SlotHashLookup::Found(104, [104u8; 32]));
    assert_eq!(lookup_slot_hash(&data, 106), SlotHashLookup::Pending);
    // Oldest entry is the target itself.
    assert_eq!(lookup_slot_hash(&data, 100), SlotHashLookup::Found(100, [100u8; 32]));
    // Target older than the window: the first slot after it is unknown.
    assert_eq!(lookup_slot_hash(&data, 99), SlotHashLookup::Expired);
    assert_eq!(lookup_slot_hash(&[], 99), SlotHashLookup::Pending);
}

#[test]
fn test_accumulated_check_freezes_random_draw_inputs() {
    let book = hundreds_book(&SOLD);
    let mut raffle = hundreds_raffle();
    check(&mut raffle, &book, "32999").unwrap();
    let frozen = (raffle.draw_value.clone(), raffle.draw_slot, raffle.candidate);

    // Trying other unsold endings does not move any seed input.
    for attempt in ["10999", "11999", "12998", "00997"] {
        assert_rifas_err(check(&mut raffle, &book, attempt), RifasError::AlreadyChecked);
    }
    assert_eq!((raffle.draw_value.clone(), raffle.draw_slot, raffle.candidate), frozen);
    assert_eq!(raffle.draw_slot, CHECK_SLOT + DRAW_SLOT_DELAY);
}

#[test]
fn test_sale_confirmed_after_accumulation_cannot_turn_into_match() {
    let mut book = hundreds_book(&SOLD);
    let mut raffle = hundreds_raffle();
    book.reserve(&[999]).unwrap();

    assert_eq!(check(&mut raffle, &book, "32999").unwrap(), CheckOutcome::Accumulated);
    assert_rifas_err(raffle.ensure_sales_settleable(), RifasError::ResolutionStarted);

    // Even if the book changed, the same draw cannot be checked again.
    book.confirm(&[999]).unwrap();
    assert_rifas_err(check(&mut raffle, &book, "32999"), RifasError::AlreadyChecked);
    assert!(raffle.winner.is_none());
}

#[test]
fn test_typed_draw_value_is_recorded_as_manual_entry() {
    let book = hundreds_book(&SOLD);
    let mut raffle = hundreds_raffle();

    let outcome = check_as(&mut raffle, &book, "123", WinnerProvenance::ManualEntry).unwrap();
    assert_eq!(outcome, CheckOutcome::Match(123));

    let winner = raffle.winner.clone().unwrap();
    assert_eq!(winner.provenance, WinnerProvenance::ManualEntry);
    assert_ne!(winner.provenance, WinnerProvenance::FederalDraw);
    assert_eq!(winner.draw_value, "123");
    assert_eq!(raffle.draw_value, "123");
}

#[test]
fn test_random_draw_is_uniform_over_sold_tickets() {
    let book = hundreds_book(&SOLD);
    let mut rng = StdRng::seed_from_u64(2024);
    let trials = 30_000;
    let mut counts = [0u32; 3];

    for _ in 0..trials {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        let index = pick_sold_ticket(&book, &seed).unwrap();
        let slot = SOLD.iter().position(|n| *n == index).unwrap();
        counts[slot] += 1;
    }

    let expected = trials as f64 / SOLD.len() as f64;
    for count in counts {
        let deviation = (count as f64 - expected).abs() / expected;
        assert!(deviation < 0.05, "count {} too far from {}", count, expected);
    }
}

#[test]
fn test_random_draw_hits_every_sold_ticket_via_derived_seeds() {
    let book = hundreds_book(&SOLD);
    let raffle = Pubkey::new_unique();
    let mut hit = [false; 3];

    for slot in 0..200u64 {
        let seed = derive_draw_seed(&raffle, "32999", 3, slot, &[slot as u8; 32]);
        let index = pick_sold_ticket(&book, &seed).unwrap();
        hit[SOLD.iter().position(|n| *n == index).unwrap()] = true;
    }

    assert!(hit.iter().all(|h| *h));
}
