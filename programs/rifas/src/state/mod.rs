use anchor_lang::prelude::*;
pub mod platform;
pub mod raffle;
pub mod ticket_book;
pub mod order;
pub mod partner;


pub use platform::*;
pub use raffle::*;
pub use ticket_book::*;
pub use order::*;
pub use partner::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct CreateRaffleParams {
    pub title: String,
    pub ticket_price: u64,
    pub total_tickets: u32,
    pub draw_type: DrawType,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct PlaceOrderArgs {
    pub numbers: Vec<u32>,
    pub buyer_name: String,
    pub buyer_contact: String,
}
