use anchor_lang::prelude::*;
use crate::state::{Platform, Raffle, TicketBook, Order};
use crate::errors::RifasError;
use crate::constants::*;

#[derive(Accounts)]
pub struct CancelOrder<'info> {
    /// Either the platform admin or the buyer who placed the order.
    pub authority: Signer<'info>,

    #[account(
        seeds = [PLATFORM_SEED],
        bump = platform.bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [BOOK_SEED, raffle.key().as_ref()],
        bump = ticket_book.bump,
    )]
    pub ticket_book: Account<'info, TicketBook>,

    #[account(
        mut,
        constraint = order.raffle == raffle.key() @ RifasError::OrderRaffleMismatch,
        constraint = order.buyer == authority.key()
            || platform.is_admin(&authority.key()) @ RifasError::Unauthorized,
    )]
    pub order: Account<'info, Order>,
}

pub fn cancel_order(ctx: Context<CancelOrder>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    let order = &mut ctx.accounts.order;
    order.mark_canceled(current_time)?;
    ctx.accounts.ticket_book.release(&order.numbers)?;

    let quantity = order.numbers.len() as u32;
    let raffle = &mut ctx.accounts.raffle;
    raffle.tickets_reserved = raffle
        .tickets_reserved
        .checked_sub(quantity)
        .ok_or(RifasError::MathOverflow)?;

    emit!(OrderCanceled {
        raffle: raffle.key(),
        order: order.key(),
        order_id: order.order_id,
        canceled_by: ctx.accounts.authority.key(),
        timestamp: current_time,
    });

    msg!("Order {} canceled, {} numbers released", order.order_id, quantity);

    Ok(())
}

#[event]
pub struct OrderCanceled {
    pub raffle: Pubkey,
    pub order: Pubkey,
    pub order_id: u64,
    pub canceled_by: Pubkey,
    pub timestamp: i64,
}
