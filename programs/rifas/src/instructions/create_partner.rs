use anchor_lang::prelude::*;
use crate::state::{Platform, Partner};
use crate::errors::RifasError;
use crate::constants::*;
use crate::utils::{validate_slug, validate_text};
use crate::utils::validation::validate_commission;

#[derive(Accounts)]
#[instruction(slug: String)]
pub struct CreatePartner<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [PLATFORM_SEED],
        bump = platform.bump,
        constraint = platform.is_admin(&admin.key()) @ RifasError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        init,
        payer = admin,
        seeds = [PARTNER_SEED, slug.as_bytes()],
        bump,
        space = 8 + Partner::SIZE,
    )]
    pub partner: Account<'info, Partner>,

    pub system_program: Program<'info, System>,
}

pub fn create_partner(
    ctx: Context<CreatePartner>,
    slug: String,
    name: String,
    commission_bps: u16,
) -> Result<()> {
    validate_slug(&slug)?;
    validate_text(&name, MAX_PARTNER_NAME_LEN)?;
    validate_commission(commission_bps)?;

    let partner = &mut ctx.accounts.partner;
    partner.slug = slug;
    partner.name = name;
    partner.commission_bps = commission_bps;
    partner.active = true;
    partner.total_orders = 0;
    partner.total_revenue = 0;
    partner.commission_accrued = 0;
    partner.bump = ctx.bumps.partner;

    emit!(PartnerCreated {
        partner: partner.key(),
        slug: partner.slug.clone(),
        commission_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Partner '{}' created at {}bps", partner.slug, commission_bps);

    Ok(())
}

#[event]
pub struct PartnerCreated {
    pub partner: Pubkey,
    pub slug: String,
    pub commission_bps: u16,
    pub timestamp: i64,
}
