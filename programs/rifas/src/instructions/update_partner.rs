use anchor_lang::prelude::*;
use crate::state::{Platform, Partner};
use crate::errors::RifasError;
use crate::constants::*;
use crate::utils::validation::validate_commission;

#[derive(Accounts)]
pub struct UpdatePartner<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [PLATFORM_SEED],
        bump = platform.bump,
        constraint = platform.is_admin(&admin.key()) @ RifasError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [PARTNER_SEED, partner.slug.as_bytes()],
        bump = partner.bump,
    )]
    pub partner: Account<'info, Partner>,
}

/// Rate changes apply to new orders only; pending orders keep their commission.
pub fn update_partner(
    ctx: Context<UpdatePartner>,
    commission_bps: Option<u16>,
    active: Option<bool>,
) -> Result<()> {
    let partner = &mut ctx.accounts.partner;

    if let Some(commission_bps) = commission_bps {
        validate_commission(commission_bps)?;
        partner.commission_bps = commission_bps;
    }
    if let Some(active) = active {
        partner.active = active;
    }

    emit!(PartnerUpdated {
        partner: partner.key(),
        commission_bps: partner.commission_bps,
        active: partner.active,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Partner '{}' updated", partner.slug);

    Ok(())
}

#[event]
pub struct PartnerUpdated {
    pub partner: Pubkey,
    pub commission_bps: u16,
    pub active: bool,
    pub timestamp: i64,
}
