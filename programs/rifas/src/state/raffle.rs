use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::RifasError;
use crate::state::Order;
use crate::utils::numbering::format_ticket_number;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawType {
    Tens,       // dezena, 2 digits
    Hundreds,   // centena, 3 digits
    Thousands,  // milhar, 4 digits
}

impl DrawType {
    pub fn width(&self) -> u8 {
        match self {
            DrawType::Tens => 2,
            DrawType::Hundreds => 3,
            DrawType::Thousands => 4,
        }
    }

}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleStatus {
    Open,
    Drawing,
    Finished,
    Canceled,
}

/// Progress of winner resolution while the raffle is `Drawing`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionStage {
    AwaitingResult,
    Accumulated,
    RandomDrawPending,
    Resolved,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinnerProvenance {
    FederalDraw,
    ManualEntry,    // draw value typed by the operator
    RandomDraw,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct Winner {
    pub ticket_index: u32,              // 4 bytes
    pub ticket_number: String,          // 4 + 4 bytes - zero-padded display form
    pub buyer_name: String,             // 4 + 48 bytes
    pub buyer_contact: String,          // 4 + 32 bytes
    pub order: Pubkey,                  // 32 bytes
    pub draw_value: String,             // 4 + 16 bytes - external result checked
    pub provenance: WinnerProvenance,   // 1 byte
    pub seed: [u8; 32],                 // 32 bytes - zero for federal draws
    pub resolved_at: i64,               // 8 bytes
}

impl Winner {
    pub const SIZE: usize = 4 + (4 + 4) + (4 + MAX_BUYER_NAME_LEN) + (4 + MAX_CONTACT_LEN)
        + 32 + (4 + MAX_DRAW_VALUE_LEN) + 1 + 32 + 8;

    /// Builds the winner record from the order holding `ticket_index`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_order(
        order_key: Pubkey,
        order: &Order,
        ticket_index: u32,
        total_tickets: u32,
        draw_value: &str,
        provenance: WinnerProvenance,
        seed: [u8; 32],
        resolved_at: i64,
    ) -> Result<Self> {
        require!(order.is_paid(), RifasError::WrongWinningOrder);
        require!(order.holds(ticket_index), RifasError::WrongWinningOrder);
        Ok(Self {
            ticket_index,
            ticket_number: format_ticket_number(ticket_index, total_tickets)?,
            buyer_name: order.buyer_name.clone(),
            buyer_contact: order.buyer_contact.clone(),
            order: order_key,
            draw_value: draw_value.to_string(),
            provenance,
            seed,
            resolved_at,
        })
    }
}

#[account]
pub struct Raffle {
    pub admin: Pubkey,                  // 32 bytes
    pub raffle_id: u64,                 // 8 bytes
    pub title: String,                  // 4 + 64 bytes
    pub ticket_price: u64,              // 8 bytes - centavos
    pub total_tickets: u32,             // 4 bytes
    pub draw_type: DrawType,            // 1 byte
    pub status: RaffleStatus,           // 1 byte
    pub stage: ResolutionStage,         // 1 byte
    pub tickets_reserved: u32,          // 4 bytes - pending orders
    pub tickets_sold: u32,              // 4 bytes - approved orders
    pub order_count: u64,               // 8 bytes - also the next order id
    pub draw_value: String,             // 4 + 16 bytes - last external result checked
    pub candidate: Option<u32>,         // 1 + 4 bytes - last extracted or picked index
    pub draw_seed: [u8; 32],            // 32 bytes - published random-draw seed
    pub draw_slot: u64,                 // 8 bytes - slot whose hash seeds the random draw
    pub winner: Option<Winner>,         // 1 + Winner::SIZE
    pub created_at: i64,                // 8 bytes
    pub finished_at: Option<i64>,       // 1 + 8 bytes
    pub bump: u8,                       // 1 byte
}

impl Raffle {
    pub const SIZE: usize = 32 + 8 + (4 + MAX_TITLE_LEN) + 8 + 4 + 1 + 1 + 1 + 4 + 4 + 8
        + (4 + MAX_DRAW_VALUE_LEN) + (1 + 4) + 32 + 8 + (1 + Winner::SIZE) + 8 + (1 + 8) + 1;

    pub fn width(&self) -> u8 {
        self.draw_type.width()
    }

    pub fn accepts_orders(&self) -> bool {
        self.status == RaffleStatus::Open
    }

    pub fn close_sales(&mut self) -> Result<()> {
        self.ensure_active()?;
        require!(self.status == RaffleStatus::Open, RifasError::RaffleNotOpen);
        self.status = RaffleStatus::Drawing;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_active()?;
        require!(self.winner.is_none(), RifasError::AlreadyResolved);
        self.status = RaffleStatus::Canceled;
        Ok(())
    }

    pub fn ensure_drawing(&self) -> Result<()> {
        self.ensure_active()?;
        require!(self.status == RaffleStatus::Drawing, RifasError::RaffleNotDrawing);
        Ok(())
    }

    /// Exactly one draw result is checked per raffle.
    pub fn ensure_checkable(&self) -> Result<()> {
        self.ensure_drawing()?;
        match self.stage {
            ResolutionStage::AwaitingResult => Ok(()),
            ResolutionStage::Accumulated => err!(RifasError::AlreadyChecked),
            ResolutionStage::RandomDrawPending => err!(RifasError::RandomDrawInProgress),
            ResolutionStage::Resolved => err!(RifasError::AlreadyResolved),
        }
    }

    /// Freezes every random-draw input except the hash of `draw_slot`,
    /// which does not exist yet.
    pub fn record_accumulation(&mut self, draw_value: &str, candidate: u32, draw_slot: u64) -> Result<()> {
        self.ensure_checkable()?;
        self.draw_value = draw_value.to_string();
        self.candidate = Some(candidate);
        self.draw_slot = draw_slot;
        self.stage = ResolutionStage::Accumulated;
        Ok(())
    }

    pub fn ensure_draw_slot_passed(&self, current_slot: u64) -> Result<()> {
        self.ensure_drawing()?;
        require!(self.stage == ResolutionStage::Accumulated, RifasError::NotAccumulated);
        require!(current_slot > self.draw_slot, RifasError::DrawSlotNotReached);
        Ok(())
    }

    /// Moves the draw slot forward once its hash has left the sysvar window.
    pub fn rearm_draw_slot(&mut self, current_slot: u64) -> Result<()> {
        self.ensure_draw_slot_passed(current_slot)?;
        self.draw_slot = current_slot
            .checked_add(DRAW_SLOT_DELAY)
            .ok_or(RifasError::MathOverflow)?;
        Ok(())
    }

    /// Payments may only be confirmed before the sold set is read.
    pub fn ensure_sales_settleable(&self) -> Result<()> {
        self.ensure_active()?;
        require!(self.stage == ResolutionStage::AwaitingResult, RifasError::ResolutionStarted);
        Ok(())
    }

    pub fn record_random_pick(&mut self, seed: [u8; 32], index: u32) -> Result<()> {
        self.ensure_drawing()?;
        require!(self.stage == ResolutionStage::Accumulated, RifasError::NotAccumulated);
        self.draw_seed = seed;
        self.candidate = Some(index);
        self.stage = ResolutionStage::RandomDrawPending;
        Ok(())
    }

    pub fn pending_pick(&self) -> Result<u32> {
        require!(self.stage == ResolutionStage::RandomDrawPending, RifasError::NoPendingPick);
        self.candidate.ok_or(RifasError::NoPendingPick.into())
    }

    pub fn resolve(&mut self, winner: Winner) -> Result<()> {
        self.ensure_drawing()?;
        require!(
            self.stage != ResolutionStage::Resolved && self.winner.is_none(),
            RifasError::AlreadyResolved
        );
        if winner.provenance != WinnerProvenance::RandomDraw {
            self.draw_value = winner.draw_value.clone();
        }
        self.candidate = Some(winner.ticket_index);
        self.winner = Some(winner);
        self.stage = ResolutionStage::Resolved;
        Ok(())
    }

    pub fn finalize(&mut self, now: i64) -> Result<()> {
        self.ensure_drawing()?;
        require!(
            self.stage == ResolutionStage::Resolved && self.winner.is_some(),
            RifasError::NotResolved
        );
        self.status = RaffleStatus::Finished;
        self.finished_at = Some(now);
        Ok(())
    }

    /// Rejects writes on a finished or canceled raffle.
    pub fn ensure_active(&self) -> Result<()> {
        match self.status {
            RaffleStatus::Finished => err!(RifasError::AlreadyFinalized),
            RaffleStatus::Canceled => err!(RifasError::RaffleCanceled),
            _ => Ok(()),
        }
    }
}
