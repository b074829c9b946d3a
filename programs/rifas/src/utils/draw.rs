//! Winner resolution over a raffle's sold tickets.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;
use crate::errors::RifasError;
use crate::state::TicketBook;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Match(u32),
    Accumulated,
}

/// Looks the candidate up among sold tickets. A candidate outside the book
/// (a 2-digit draw on a 50 ticket raffle, say) simply matches nothing.
pub fn check_winner(book: &TicketBook, candidate: u32) -> CheckOutcome {
    if book.is_sold(candidate) {
        CheckOutcome::Match(candidate)
    } else {
        CheckOutcome::Accumulated
    }
}

/// Seed for the fallback draw. The raffle inputs are frozen at the
/// accumulated check; `slot_hash` only exists after that check, so nobody
/// can compute the seed while they can still influence it.
pub fn derive_draw_seed(
    raffle: &Pubkey,
    draw_value: &str,
    sold_count: u32,
    slot: u64,
    slot_hash: &[u8; 32],
) -> [u8; 32] {
    keccak::hashv(&[
        b"rifas-draw",
        raffle.as_ref(),
        draw_value.as_bytes(),
        &sold_count.to_le_bytes(),
        &slot.to_le_bytes(),
        slot_hash,
    ])
    .to_bytes()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotHashLookup {
    /// First recorded slot at or after the target, with its hash.
    Found(u64, [u8; 32]),
    /// No recorded slot has reached the target yet.
    Pending,
    /// The target aged out of the window; the first slot after it is unknown.
    Expired,
}

const SLOT_HASH_ENTRY_LEN: usize = 8 + 32;

/// Looks `target` up in raw `SlotHashes` sysvar data: a u64 entry count
/// followed by `(slot, hash)` pairs, newest first. Skipped slots have no
/// entry, so the first slot at or after `target` is used. It is only
/// trusted while an older entry is still in the window.
pub fn lookup_slot_hash(data: &[u8], target: u64) -> SlotHashLookup {
    let count = match data.get(..8) {
        Some(raw) => {
            let mut len = [0u8; 8];
            len.copy_from_slice(raw);
            u64::from_le_bytes(len) as usize
        }
        None => return SlotHashLookup::Pending,
    };

    let mut first_after: Option<(u64, [u8; 32])> = None;
    let mut saw_older = false;
    for entry in data[8..].chunks_exact(SLOT_HASH_ENTRY_LEN).take(count) {
        let mut raw_slot = [0u8; 8];
        raw_slot.copy_from_slice(&entry[..8]);
        let slot = u64::from_le_bytes(raw_slot);
        if slot < target {
            saw_older = true;
            break;
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&entry[8..]);
        first_after = Some((slot, hash));
    }

    match first_after {
        Some((slot, hash)) if slot == target || saw_older => SlotHashLookup::Found(slot, hash),
        Some(_) => SlotHashLookup::Expired,
        None => SlotHashLookup::Pending,
    }
}

/// Uniform pick among sold tickets, in ascending index order.
pub fn pick_sold_ticket(book: &TicketBook, seed: &[u8; 32]) -> Result<u32> {
    let sold = book.sold_count();
    require!(sold > 0, RifasError::NothingSold);

    let mut head = [0u8; 16];
    head.copy_from_slice(&seed[..16]);
    let position = (u128::from_le_bytes(head) % sold as u128) as usize;

    book.sold_indices()
        .nth(position)
        .ok_or(RifasError::NothingSold.into())
}
