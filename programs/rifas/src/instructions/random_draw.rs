use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;
use crate::state::{Raffle, TicketBook};
use crate::errors::RifasError;
use crate::constants::*;
use crate::utils::draw::{derive_draw_seed, lookup_slot_hash, pick_sold_ticket, SlotHashLookup};
use crate::utils::numbering::format_ticket_number;

#[derive(Accounts)]
pub struct RandomDraw<'info> {
    /// Anyone may trigger the draw once the draw slot has passed.
    pub caller: Signer<'info>,

    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    #[account(
        seeds = [BOOK_SEED, raffle.key().as_ref()],
        bump = ticket_book.bump,
    )]
    pub ticket_book: Account<'info, TicketBook>,

    /// CHECK: address is pinned to the SlotHashes sysvar; read as raw bytes.
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,
}

/// Fallback after an accumulated check: picks one sold ticket uniformly,
/// seeded by the hash of the slot fixed at that check. If that hash has
/// already left the sysvar window the draw slot is moved forward instead.
pub fn random_draw(ctx: Context<RandomDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let book = &ctx.accounts.ticket_book;
    let raffle = &mut ctx.accounts.raffle;
    raffle.ensure_draw_slot_passed(clock.slot)?;

    let sold = book.sold_count();
    require!(sold > 0, RifasError::NothingSold);

    let lookup = {
        let data = ctx.accounts.slot_hashes.try_borrow_data()?;
        lookup_slot_hash(&data[..], raffle.draw_slot)
    };

    let (slot, slot_hash) = match lookup {
        SlotHashLookup::Found(slot, hash) => (slot, hash),
        SlotHashLookup::Pending => return err!(RifasError::DrawSlotNotReached),
        SlotHashLookup::Expired => {
            let expired = raffle.draw_slot;
            raffle.rearm_draw_slot(clock.slot)?;

            emit!(DrawSlotRearmed {
                raffle: raffle.key(),
                expired_slot: expired,
                draw_slot: raffle.draw_slot,
                timestamp: clock.unix_timestamp,
            });

            msg!("Draw slot {} expired, new draw slot {}", expired, raffle.draw_slot);
            return Ok(());
        }
    };

    let seed = derive_draw_seed(&raffle.key(), &raffle.draw_value, sold, slot, &slot_hash);
    let index = pick_sold_ticket(book, &seed)?;
    raffle.record_random_pick(seed, index)?;

    let ticket_number = format_ticket_number(index, raffle.total_tickets)?;

    emit!(RandomDrawPerformed {
        raffle: raffle.key(),
        ticket_number: ticket_number.clone(),
        seed,
        slot,
        slot_hash,
        sold_count: sold,
        timestamp: clock.unix_timestamp,
    });

    msg!("Random draw over {} sold tickets picked {}", sold, ticket_number);

    Ok(())
}

#[event]
pub struct RandomDrawPerformed {
    pub raffle: Pubkey,
    pub ticket_number: String,
    pub seed: [u8; 32],
    pub slot: u64,
    pub slot_hash: [u8; 32],
    pub sold_count: u32,
    pub timestamp: i64,
}

#[event]
pub struct DrawSlotRearmed {
    pub raffle: Pubkey,
    pub expired_slot: u64,
    pub draw_slot: u64,
    pub timestamp: i64,
}
