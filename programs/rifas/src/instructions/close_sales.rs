use anchor_lang::prelude::*;
use crate::state::Raffle;
use crate::errors::RifasError;

#[derive(Accounts)]
pub struct CloseSales<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = raffle.admin == admin.key() @ RifasError::Unauthorized,
    )]
    pub raffle: Account<'info, Raffle>,
}

pub fn close_sales(ctx: Context<CloseSales>) -> Result<()> {
    let raffle = &mut ctx.accounts.raffle;
    raffle.close_sales()?;

    emit!(SalesClosed {
        raffle: raffle.key(),
        tickets_sold: raffle.tickets_sold,
        tickets_reserved: raffle.tickets_reserved,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Raffle {} closed for sales, now drawing", raffle.raffle_id);

    Ok(())
}

#[event]
pub struct SalesClosed {
    pub raffle: Pubkey,
    pub tickets_sold: u32,
    pub tickets_reserved: u32,
    pub timestamp: i64,
}
