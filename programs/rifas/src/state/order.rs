use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::RifasError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Canceled,
}

#[account]
pub struct Order {
    pub raffle: Pubkey,               // 32 bytes
    pub order_id: u64,                // 8 bytes
    pub buyer: Pubkey,                // 32 bytes - wallet that placed the order
    pub buyer_name: String,           // 4 + 48 bytes
    pub buyer_contact: String,        // 4 + 32 bytes
    pub numbers: Vec<u32>,            // 4 + 50 * 4 bytes - ticket indices
    pub total_price: u64,             // 8 bytes - centavos
    pub partner: Option<Pubkey>,      // 1 + 32 bytes - reseller credited
    pub commission: u64,              // 8 bytes - partner share, fixed at order time
    pub status: OrderStatus,          // 1 byte
    pub created_at: i64,              // 8 bytes
    pub processed_at: Option<i64>,    // 1 + 8 bytes
    pub bump: u8,                     // 1 byte
}

impl Order {
    pub const SIZE: usize = 32 + 8 + 32 + (4 + MAX_BUYER_NAME_LEN) + (4 + MAX_CONTACT_LEN)
        + (4 + MAX_NUMBERS_PER_ORDER * 4) + 8 + (1 + 32) + 8 + 1 + 8 + (1 + 8) + 1;

    pub fn holds(&self, index: u32) -> bool {
        self.numbers.contains(&index)
    }

    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }

    pub fn mark_paid(&mut self, now: i64) -> Result<()> {
        require!(self.status == OrderStatus::Pending, RifasError::OrderAlreadyProcessed);
        self.status = OrderStatus::Paid;
        self.processed_at = Some(now);
        Ok(())
    }

    pub fn mark_canceled(&mut self, now: i64) -> Result<()> {
        require!(self.status == OrderStatus::Pending, RifasError::OrderAlreadyProcessed);
        self.status = OrderStatus::Canceled;
        self.processed_at = Some(now);
        Ok(())
    }
}
