use anchor_lang::prelude::*;
use crate::state::{Raffle, WinnerProvenance};
use crate::errors::RifasError;

#[derive(Accounts)]
pub struct FinalizeRaffle<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = raffle.admin == admin.key() @ RifasError::Unauthorized,
    )]
    pub raffle: Account<'info, Raffle>,
}

/// Makes the resolved winner permanent. A finished raffle rejects every
/// further write, including a second finalize.
pub fn finalize_raffle(ctx: Context<FinalizeRaffle>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let raffle = &mut ctx.accounts.raffle;
    raffle.finalize(current_time)?;

    let winner = raffle.winner.as_ref().ok_or(RifasError::NotResolved)?;

    emit!(RaffleFinalized {
        raffle: raffle.key(),
        raffle_id: raffle.raffle_id,
        ticket_number: winner.ticket_number.clone(),
        buyer_name: winner.buyer_name.clone(),
        provenance: winner.provenance,
        timestamp: current_time,
    });

    msg!("Raffle {} finished, winning ticket {}", raffle.raffle_id, winner.ticket_number);

    Ok(())
}

#[event]
pub struct RaffleFinalized {
    pub raffle: Pubkey,
    pub raffle_id: u64,
    pub ticket_number: String,
    pub buyer_name: String,
    pub provenance: WinnerProvenance,
    pub timestamp: i64,
}
