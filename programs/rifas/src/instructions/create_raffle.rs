use anchor_lang::prelude::*;
use crate::state::{Platform, Raffle, TicketBook, CreateRaffleParams, RaffleStatus, ResolutionStage};
use crate::errors::RifasError;
use crate::constants::*;
use crate::utils::validate_text;
use crate::utils::validation::*;

#[derive(Accounts)]
#[instruction(params: CreateRaffleParams)]
pub struct CreateRaffle<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED],
        bump = platform.bump,
        constraint = platform.is_admin(&admin.key()) @ RifasError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        init,
        payer = admin,
        seeds = [
            RAFFLE_SEED,
            platform.total_raffles.to_le_bytes().as_ref()
        ],
        bump,
        space = 8 + Raffle::SIZE,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        init,
        payer = admin,
        seeds = [
            BOOK_SEED,
            raffle.key().as_ref()
        ],
        bump,
        space = 8 + TicketBook::size(params.total_tickets),
    )]
    pub ticket_book: Account<'info, TicketBook>,

    pub system_program: Program<'info, System>,
}

pub fn create_raffle(ctx: Context<CreateRaffle>, params: CreateRaffleParams) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    validate_text(&params.title, MAX_TITLE_LEN)?;
    validate_price_bounds(params.ticket_price)?;
    validate_draw_type(params.draw_type, params.total_tickets)?;

    let raffle_key = ctx.accounts.raffle.key();
    let platform = &mut ctx.accounts.platform;
    let raffle_id = platform.total_raffles;

    let raffle = &mut ctx.accounts.raffle;
    raffle.admin = ctx.accounts.admin.key();
    raffle.raffle_id = raffle_id;
    raffle.title = params.title;
    raffle.ticket_price = params.ticket_price;
    raffle.total_tickets = params.total_tickets;
    raffle.draw_type = params.draw_type;
    raffle.status = RaffleStatus::Open;
    raffle.stage = ResolutionStage::AwaitingResult;
    raffle.tickets_reserved = 0;
    raffle.tickets_sold = 0;
    raffle.order_count = 0;
    raffle.draw_value = String::new();
    raffle.candidate = None;
    raffle.draw_seed = [0u8; 32];
    raffle.draw_slot = 0;
    raffle.winner = None;
    raffle.created_at = current_time;
    raffle.finished_at = None;
    raffle.bump = ctx.bumps.raffle;

    let book = TicketBook::new(raffle_key, params.total_tickets, ctx.bumps.ticket_book);
    ctx.accounts.ticket_book.set_inner(book);

    platform.total_raffles = platform
        .total_raffles
        .checked_add(1)
        .ok_or(RifasError::MathOverflow)?;

    emit!(RaffleCreated {
        raffle: raffle_key,
        raffle_id,
        total_tickets: params.total_tickets,
        ticket_price: params.ticket_price,
        timestamp: current_time,
    });

    msg!(
        "Raffle {} created with {} tickets of {} digits",
        raffle_id,
        params.total_tickets,
        params.draw_type.width()
    );

    Ok(())
}

#[event]
pub struct RaffleCreated {
    pub raffle: Pubkey,
    pub raffle_id: u64,
    pub total_tickets: u32,
    pub ticket_price: u64,
    pub timestamp: i64,
}
