use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::{CreateRaffleParams, PlaceOrderArgs};

declare_id!("EaT1g3dugi5831W952KBKLa56KuL4xFjM8xqjwrCSJbc");

#[program]
pub mod rifas {
    use super::*;

    pub fn initialize_platform(ctx: Context<InitializePlatform>, pix_key: String) -> Result<()> {
        instructions::initialize_platform::initialize_platform(ctx, pix_key)
    }

    pub fn update_platform(
        ctx: Context<UpdatePlatform>,
        pix_key: Option<String>,
        paused: Option<bool>,
    ) -> Result<()> {
        instructions::initialize_platform::update_platform(ctx, pix_key, paused)
    }

    pub fn create_raffle(ctx: Context<CreateRaffle>, params: CreateRaffleParams) -> Result<()> {
        instructions::create_raffle::create_raffle(ctx, params)
    }

    pub fn close_sales(ctx: Context<CloseSales>) -> Result<()> {
        instructions::close_sales::close_sales(ctx)
    }

    pub fn cancel_raffle(ctx: Context<CancelRaffle>) -> Result<()> {
        instructions::cancel_raffle::cancel_raffle(ctx)
    }

    pub fn create_partner(
        ctx: Context<CreatePartner>,
        slug: String,
        name: String,
        commission_bps: u16,
    ) -> Result<()> {
        instructions::create_partner::create_partner(ctx, slug, name, commission_bps)
    }

    pub fn update_partner(
        ctx: Context<UpdatePartner>,
        commission_bps: Option<u16>,
        active: Option<bool>,
    ) -> Result<()> {
        instructions::update_partner::update_partner(ctx, commission_bps, active)
    }

    pub fn place_order(ctx: Context<PlaceOrder>, args: PlaceOrderArgs) -> Result<()> {
        instructions::place_order::place_order(ctx, args)
    }

    pub fn approve_order(ctx: Context<ApproveOrder>) -> Result<()> {
        instructions::approve_order::approve_order(ctx)
    }

    pub fn cancel_order(ctx: Context<CancelOrder>) -> Result<()> {
        instructions::cancel_order::cancel_order(ctx)
    }

    pub fn submit_draw_result(
        ctx: Context<SubmitDrawResult>,
        draw_value: String,
        manual: bool,
    ) -> Result<()> {
        instructions::submit_draw_result::submit_draw_result(ctx, draw_value, manual)
    }

    pub fn random_draw(ctx: Context<RandomDraw>) -> Result<()> {
        instructions::random_draw::random_draw(ctx)
    }

    pub fn resolve_random_winner(ctx: Context<ResolveRandomWinner>) -> Result<()> {
        instructions::resolve_random_winner::resolve_random_winner(ctx)
    }

    pub fn finalize_raffle(ctx: Context<FinalizeRaffle>) -> Result<()> {
        instructions::finalize_raffle::finalize_raffle(ctx)
    }
}

#[cfg(test)]
mod tests;
