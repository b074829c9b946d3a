use anchor_lang::prelude::*;
use crate::constants::*;
use crate::utils::{calculate_fee, safe_add};

/// Reseller credited with orders placed through its referral slug.
#[account]
pub struct Partner {
    pub slug: String,                 // 4 + 32 bytes
    pub name: String,                 // 4 + 48 bytes
    pub commission_bps: u16,          // 2 bytes
    pub active: bool,                 // 1 byte
    pub total_orders: u64,            // 8 bytes - approved orders only
    pub total_revenue: u64,           // 8 bytes
    pub commission_accrued: u64,      // 8 bytes
    pub bump: u8,                     // 1 byte
}

impl Partner {
    pub const SIZE: usize = (4 + MAX_SLUG_LEN) + (4 + MAX_PARTNER_NAME_LEN) + 2 + 1 + 8 + 8 + 8 + 1;

    pub fn commission_for(&self, amount: u64) -> Result<u64> {
        calculate_fee(amount, self.commission_bps)
    }

    pub fn record_sale(&mut self, amount: u64, commission: u64) -> Result<()> {
        self.total_orders = safe_add(self.total_orders, 1)?;
        self.total_revenue = safe_add(self.total_revenue, amount)?;
        self.commission_accrued = safe_add(self.commission_accrued, commission)?;
        Ok(())
    }
}
