use anchor_lang::prelude::*;
use crate::state::Raffle;
use crate::errors::RifasError;

#[derive(Accounts)]
pub struct CancelRaffle<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = raffle.admin == admin.key() @ RifasError::Unauthorized,
    )]
    pub raffle: Account<'info, Raffle>,
}

pub fn cancel_raffle(ctx: Context<CancelRaffle>) -> Result<()> {
    let raffle = &mut ctx.accounts.raffle;
    raffle.cancel()?;

    emit!(RaffleCanceled {
        raffle: raffle.key(),
        tickets_sold: raffle.tickets_sold,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Raffle {} canceled", raffle.raffle_id);

    Ok(())
}

#[event]
pub struct RaffleCanceled {
    pub raffle: Pubkey,
    pub tickets_sold: u32,
    pub timestamp: i64,
}
