use anchor_lang::prelude::*;
use crate::state::{Raffle, Order, Winner, WinnerProvenance};
use crate::errors::RifasError;
use crate::instructions::submit_draw_result::WinnerResolved;

#[derive(Accounts)]
pub struct ResolveRandomWinner<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = raffle.admin == admin.key() @ RifasError::Unauthorized,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        constraint = winning_order.raffle == raffle.key() @ RifasError::OrderRaffleMismatch,
    )]
    pub winning_order: Account<'info, Order>,
}

pub fn resolve_random_winner(ctx: Context<ResolveRandomWinner>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let order = &ctx.accounts.winning_order;
    let raffle = &mut ctx.accounts.raffle;

    let index = raffle.pending_pick()?;
    let winner = Winner::from_order(
        order.key(),
        order,
        index,
        raffle.total_tickets,
        &raffle.draw_value,
        WinnerProvenance::RandomDraw,
        raffle.draw_seed,
        current_time,
    )?;
    raffle.resolve(winner.clone())?;

    emit!(WinnerResolved {
        raffle: raffle.key(),
        order: winner.order,
        ticket_number: winner.ticket_number.clone(),
        buyer_name: winner.buyer_name.clone(),
        draw_value: winner.draw_value.clone(),
        provenance: WinnerProvenance::RandomDraw,
        seed: winner.seed,
        timestamp: current_time,
    });

    msg!("Random winner {} holds ticket {}", winner.buyer_name, winner.ticket_number);

    Ok(())
}
