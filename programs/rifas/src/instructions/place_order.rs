use anchor_lang::prelude::*;
use crate::state::{Platform, Raffle, TicketBook, Order, OrderStatus, Partner, PlaceOrderArgs};
use crate::errors::RifasError;
use crate::constants::*;
use crate::utils::{safe_add, safe_mul, validate_text};
use crate::utils::numbering::format_ticket_number;
use crate::utils::validation::validate_order_numbers;

#[derive(Accounts)]
pub struct PlaceOrder<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED],
        bump = platform.bump,
        constraint = !platform.paused @ RifasError::PlatformPaused,
    )]
    pub platform: Account<'info, Platform>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, raffle.raffle_id.to_le_bytes().as_ref()],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [BOOK_SEED, raffle.key().as_ref()],
        bump = ticket_book.bump,
    )]
    pub ticket_book: Account<'info, TicketBook>,

    #[account(
        init,
        payer = buyer,
        seeds = [
            ORDER_SEED,
            raffle.key().as_ref(),
            raffle.order_count.to_le_bytes().as_ref()
        ],
        bump,
        space = 8 + Order::SIZE,
    )]
    pub order: Account<'info, Order>,

    /// Referral partner, when the buyer arrived through a partner link.
    #[account(
        seeds = [PARTNER_SEED, partner.slug.as_bytes()],
        bump = partner.bump,
    )]
    pub partner: Option<Account<'info, Partner>>,

    pub system_program: Program<'info, System>,
}

pub fn place_order(ctx: Context<PlaceOrder>, args: PlaceOrderArgs) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    let raffle = &ctx.accounts.raffle;
    require!(raffle.accepts_orders(), RifasError::RaffleNotOpen);
    validate_text(&args.buyer_name, MAX_BUYER_NAME_LEN)?;
    validate_text(&args.buyer_contact, MAX_CONTACT_LEN)?;
    validate_order_numbers(&args.numbers, raffle.total_tickets)?;

    let quantity = args.numbers.len() as u64;
    let total_price = safe_mul(raffle.ticket_price, quantity)?;

    let (partner_key, commission) = match &ctx.accounts.partner {
        Some(partner) => {
            require!(partner.active, RifasError::PartnerInactive);
            (Some(partner.key()), partner.commission_for(total_price)?)
        }
        None => (None, 0),
    };

    ctx.accounts.ticket_book.reserve(&args.numbers)?;

    let display: Vec<String> = args
        .numbers
        .iter()
        .map(|n| format_ticket_number(*n, raffle.total_tickets))
        .collect::<Result<_>>()?;

    let raffle_key = raffle.key();
    let order_id = raffle.order_count;

    let order = &mut ctx.accounts.order;
    order.raffle = raffle_key;
    order.order_id = order_id;
    order.buyer = ctx.accounts.buyer.key();
    order.buyer_name = args.buyer_name;
    order.buyer_contact = args.buyer_contact;
    order.numbers = args.numbers;
    order.total_price = total_price;
    order.partner = partner_key;
    order.commission = commission;
    order.status = OrderStatus::Pending;
    order.created_at = current_time;
    order.processed_at = None;
    order.bump = ctx.bumps.order;

    let raffle = &mut ctx.accounts.raffle;
    raffle.tickets_reserved = raffle
        .tickets_reserved
        .checked_add(quantity as u32)
        .ok_or(RifasError::MathOverflow)?;
    raffle.order_count = safe_add(raffle.order_count, 1)?;

    let platform = &mut ctx.accounts.platform;
    platform.total_orders = safe_add(platform.total_orders, 1)?;

    emit!(OrderPlaced {
        raffle: raffle_key,
        order: ctx.accounts.order.key(),
        order_id,
        buyer: ctx.accounts.buyer.key(),
        numbers: display.clone(),
        total_price,
        partner: partner_key,
        timestamp: current_time,
    });

    msg!("Order {} reserved numbers {}", order_id, display.join(", "));

    Ok(())
}

#[event]
pub struct OrderPlaced {
    pub raffle: Pubkey,
    pub order: Pubkey,
    pub order_id: u64,
    pub buyer: Pubkey,
    pub numbers: Vec<String>,
    pub total_price: u64,
    pub partner: Option<Pubkey>,
    pub timestamp: i64,
}
