use anchor_lang::prelude::*;
use crate::state::{Platform, Raffle, TicketBook, Order, Partner};
use crate::errors::RifasError;
use crate::constants::*;
use crate::utils::safe_add;

#[derive(Accounts)]
pub struct ApproveOrder<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED],
        bump = platform.bump,
        constraint = platform.is_admin(&admin.key()) @ RifasError::Unauthorized,
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
    )]
    pub order: Account<'info, Order>,

    #[account(
        mut,
        constraint = Some(partner.key()) == order.partner @ RifasError::Unauthorized,
    )]
    pub partner: Option<Account<'info, Partner>>,
}

/// Confirms a manual PIX payment. Every reserved number of the order becomes
/// sold in the same instruction, so a failure leaves no partial allocation.
pub fn approve_order(ctx: Context<ApproveOrder>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    let raffle = &mut ctx.accounts.raffle;
    raffle.ensure_sales_settleable()?;

    let order = &mut ctx.accounts.order;
    order.mark_paid(current_time)?;
    ctx.accounts.ticket_book.confirm(&order.numbers)?;

    let quantity = order.numbers.len() as u32;
    raffle.tickets_reserved = raffle
        .tickets_reserved
        .checked_sub(quantity)
        .ok_or(RifasError::MathOverflow)?;
    raffle.tickets_sold = raffle
        .tickets_sold
        .checked_add(quantity)
        .ok_or(RifasError::MathOverflow)?;

    let platform = &mut ctx.accounts.platform;
    platform.total_tickets_sold = safe_add(platform.total_tickets_sold, quantity as u64)?;
    platform.total_revenue = safe_add(platform.total_revenue, order.total_price)?;

    if order.partner.is_some() {
        let partner = ctx
            .accounts
            .partner
            .as_mut()
            .ok_or(RifasError::Unauthorized)?;
        partner.record_sale(order.total_price, order.commission)?;
    }

    emit!(OrderApproved {
        raffle: raffle.key(),
        order: order.key(),
        order_id: order.order_id,
        quantity,
        total_price: order.total_price,
        commission: order.commission,
        timestamp: current_time,
    });

    msg!("Order {} approved, {} tickets sold", order.order_id, quantity);

    Ok(())
}

#[event]
pub struct OrderApproved {
    pub raffle: Pubkey,
    pub order: Pubkey,
    pub order_id: u64,
    pub quantity: u32,
    pub total_price: u64,
    pub commission: u64,
    pub timestamp: i64,
}
