use anchor_lang::prelude::*;
use crate::state::Platform;
use crate::errors::RifasError;
use crate::constants::*;
use crate::utils::validate_text;

#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + Platform::SIZE,
        seeds = [PLATFORM_SEED],
        bump
    )]
    pub platform: Account<'info, Platform>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_platform(ctx: Context<InitializePlatform>, pix_key: String) -> Result<()> {
    validate_text(&pix_key, MAX_PIX_KEY_LEN)?;

    let platform = &mut ctx.accounts.platform;
    platform.admin = ctx.accounts.admin.key();
    platform.pix_key = pix_key;
    platform.paused = false;
    platform.total_raffles = 0;
    platform.total_orders = 0;
    platform.total_tickets_sold = 0;
    platform.total_revenue = 0;
    platform.bump = ctx.bumps.platform;

    emit!(PlatformInitialized {
        admin: platform.admin,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Platform initialized by {}", platform.admin);

    Ok(())
}

#[derive(Accounts)]
pub struct UpdatePlatform<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED],
        bump = platform.bump,
        constraint = platform.is_admin(&admin.key()) @ RifasError::Unauthorized
    )]
    pub platform: Account<'info, Platform>,
}

pub fn update_platform(
    ctx: Context<UpdatePlatform>,
    pix_key: Option<String>,
    paused: Option<bool>,
) -> Result<()> {
    let platform = &mut ctx.accounts.platform;

    if let Some(pix_key) = pix_key {
        validate_text(&pix_key, MAX_PIX_KEY_LEN)?;
        platform.pix_key = pix_key;
    }
    if let Some(paused) = paused {
        platform.paused = paused;
    }

    emit!(PlatformUpdated {
        admin: platform.admin,
        paused: platform.paused,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Platform updated, paused: {}", platform.paused);

    Ok(())
}

#[event]
pub struct PlatformInitialized {
    pub admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PlatformUpdated {
    pub admin: Pubkey,
    pub paused: bool,
    pub timestamp: i64,
}
