use anchor_lang::prelude::*;
use crate::errors::RifasError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SlotState {
    Available = 0,
    Reserved = 1,
    Sold = 2,
}

impl SlotState {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(SlotState::Available),
            1 => Some(SlotState::Reserved),
            2 => Some(SlotState::Sold),
            _ => None,
        }
    }
}

/// Per-raffle ticket allocation, one status byte per ticket index.
///
/// Every mutation validates the whole batch before touching any slot, so a
/// rejected batch leaves the book exactly as it was.
#[account]
pub struct TicketBook {
    pub raffle: Pubkey,     // 32 bytes
    pub slots: Vec<u8>,     // 4 + total_tickets bytes
    pub bump: u8,           // 1 byte
}

impl TicketBook {
    pub fn size(total_tickets: u32) -> usize {
        32 + 4 + total_tickets as usize + 1
    }

    pub fn new(raffle: Pubkey, total_tickets: u32, bump: u8) -> Self {
        Self {
            raffle,
            slots: vec![SlotState::Available as u8; total_tickets as usize],
            bump,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    pub fn state(&self, index: u32) -> Option<SlotState> {
        self.slots
            .get(index as usize)
            .and_then(|b| SlotState::from_byte(*b))
    }

    pub fn is_sold(&self, index: u32) -> bool {
        self.state(index) == Some(SlotState::Sold)
    }

    pub fn sold_count(&self) -> u32 {
        self.slots
            .iter()
            .filter(|b| **b == SlotState::Sold as u8)
            .count() as u32
    }

    /// Sold ticket indices in ascending order.
    pub fn sold_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == SlotState::Sold as u8)
            .map(|(i, _)| i as u32)
    }

    pub fn reserve(&mut self, numbers: &[u32]) -> Result<()> {
        self.transition(numbers, SlotState::Available, SlotState::Reserved, RifasError::TicketUnavailable)
    }

    pub fn confirm(&mut self, numbers: &[u32]) -> Result<()> {
        self.transition(numbers, SlotState::Reserved, SlotState::Sold, RifasError::TicketNotReserved)
    }

    pub fn release(&mut self, numbers: &[u32]) -> Result<()> {
        self.transition(numbers, SlotState::Reserved, SlotState::Available, RifasError::TicketNotReserved)
    }

    fn transition(
        &mut self,
        numbers: &[u32],
        from: SlotState,
        to: SlotState,
        conflict: RifasError,
    ) -> Result<()> {
        for &n in numbers {
            require!(n < self.capacity(), RifasError::TicketIndexOutOfRange);
            if self.state(n) != Some(from) {
                return Err(conflict.into());
            }
        }
        for &n in numbers {
            self.slots[n as usize] = to as u8;
        }
        Ok(())
    }
}
