use anchor_lang::prelude::*;
use crate::constants::MAX_PIX_KEY_LEN;

#[account]
#[derive(Default)]
pub struct Platform {
    pub admin: Pubkey,             // 32 bytes
    pub pix_key: String,           // 4 + 77 bytes - shown to buyers for manual payment
    pub paused: bool,              // 1 byte
    pub total_raffles: u64,        // 8 bytes - also the next raffle id
    pub total_orders: u64,         // 8 bytes
    pub total_tickets_sold: u64,   // 8 bytes
    pub total_revenue: u64,        // 8 bytes - centavos from approved orders
    pub bump: u8,                  // 1 byte
}

impl Platform {
    pub const SIZE: usize = 32 + (4 + MAX_PIX_KEY_LEN) + 1 + 8 + 8 + 8 + 8 + 1;

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.admin == *key
    }
}
