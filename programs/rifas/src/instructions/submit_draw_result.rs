use anchor_lang::prelude::*;
use crate::state::{Raffle, TicketBook, Order, Winner, WinnerProvenance};
use crate::errors::RifasError;
use crate::constants::*;
use crate::utils::draw::{check_winner, CheckOutcome};
use crate::utils::numbering::{extract_winning_number, parse_ticket_number};
use crate::utils::validation::validate_draw_value;

#[derive(Accounts)]
pub struct SubmitDrawResult<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = raffle.admin == admin.key() @ RifasError::Unauthorized,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        seeds = [BOOK_SEED, raffle.key().as_ref()],
        bump = ticket_book.bump,
    )]
    pub ticket_book: Account<'info, TicketBook>,

    /// Paid order holding the extracted number. Required only on a match.
    #[account(
        constraint = winning_order.raffle == raffle.key() @ RifasError::OrderRaffleMismatch,
    )]
    pub winning_order: Option<Account<'info, Order>>,
}

/// Checks the external draw result against the sold tickets. The operator may
/// also type a value by hand (`manual`); a value exactly as wide as the ticket
/// space then selects that ticket directly, so the winner is recorded as a
/// manual entry rather than a federal draw.
pub fn submit_draw_result(
    ctx: Context<SubmitDrawResult>,
    draw_value: String,
    manual: bool,
) -> Result<()> {
    let clock = Clock::get()?;
    let current_time = clock.unix_timestamp;
    validate_draw_value(&draw_value)?;
    let draw_value = draw_value.trim().to_string();

    let raffle = &mut ctx.accounts.raffle;
    raffle.ensure_checkable()?;

    let width = raffle.width();
    let number = extract_winning_number(&draw_value, width)?;
    let candidate = parse_ticket_number(&number, width)?;

    let provenance = if manual {
        WinnerProvenance::ManualEntry
    } else {
        WinnerProvenance::FederalDraw
    };

    match check_winner(&ctx.accounts.ticket_book, candidate) {
        CheckOutcome::Match(index) => {
            let order = ctx
                .accounts
                .winning_order
                .as_ref()
                .ok_or(RifasError::MissingWinningOrder)?;
            let winner = Winner::from_order(
                order.key(),
                order,
                index,
                raffle.total_tickets,
                &draw_value,
                provenance,
                [0u8; 32],
                current_time,
            )?;
            raffle.resolve(winner.clone())?;

            emit!(WinnerResolved {
                raffle: raffle.key(),
                order: winner.order,
                ticket_number: winner.ticket_number.clone(),
                buyer_name: winner.buyer_name.clone(),
                draw_value: draw_value.clone(),
                provenance,
                seed: [0u8; 32],
                timestamp: current_time,
            });

            msg!("Draw {} -> {}: sold, winner is {}", draw_value, number, winner.buyer_name);
        }
        CheckOutcome::Accumulated => {
            let draw_slot = clock
                .slot
                .checked_add(DRAW_SLOT_DELAY)
                .ok_or(RifasError::MathOverflow)?;
            raffle.record_accumulation(&draw_value, candidate, draw_slot)?;

            emit!(DrawAccumulated {
                raffle: raffle.key(),
                draw_value: draw_value.clone(),
                candidate: number.clone(),
                manual,
                tickets_sold: raffle.tickets_sold,
                draw_slot,
                timestamp: current_time,
            });

            msg!("Draw {} -> {}: not sold, accumulated; random draw after slot {}", draw_value, number, draw_slot);
        }
    }

    Ok(())
}

#[event]
pub struct WinnerResolved {
    pub raffle: Pubkey,
    pub order: Pubkey,
    pub ticket_number: String,
    pub buyer_name: String,
    pub draw_value: String,
    pub provenance: WinnerProvenance,
    pub seed: [u8; 32],
    pub timestamp: i64,
}

#[event]
pub struct DrawAccumulated {
    pub raffle: Pubkey,
    pub draw_value: String,
    pub candidate: String,
    pub manual: bool,
    pub tickets_sold: u32,
    pub draw_slot: u64,
    pub timestamp: i64,
}
