//! Program-derived addresses and account decoding for the raffle program.

use anchor_lang::{AccountDeserialize, Discriminator};
use solana_sdk::pubkey::Pubkey;

use rifas::constants::{BOOK_SEED, RAFFLE_SEED};
use rifas::state::{Order, Raffle, TicketBook};

use crate::error::{OperatorError, Result};
use crate::rpc::{Memcmp, RpcClient};

pub fn raffle_address(program_id: &Pubkey, raffle_id: u64) -> Pubkey {
    Pubkey::find_program_address(&[RAFFLE_SEED, &raffle_id.to_le_bytes()], program_id).0
}

pub fn book_address(program_id: &Pubkey, raffle: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[BOOK_SEED, raffle.as_ref()], program_id).0
}

/// Decodes an anchor account, checking its discriminator.
pub fn decode<T: AccountDeserialize>(data: &[u8], what: &str) -> Result<T> {
    let mut slice = data;
    T::try_deserialize(&mut slice).map_err(|e| OperatorError::AccountDecode(format!("{what}: {e}")))
}

pub async fn fetch_raffle(rpc: &RpcClient, program_id: &Pubkey, raffle_id: u64) -> Result<(Pubkey, Raffle)> {
    let address = raffle_address(program_id, raffle_id);
    let data = rpc.get_account_data(&address).await?;
    Ok((address, decode(&data, "raffle")?))
}

pub async fn fetch_ticket_book(rpc: &RpcClient, program_id: &Pubkey, raffle: &Pubkey) -> Result<TicketBook> {
    let data = rpc.get_account_data(&book_address(program_id, raffle)).await?;
    decode(&data, "ticket book")
}

/// Orders belonging to `raffle`. `Order.raffle` sits right after the
/// 8-byte discriminator.
pub async fn fetch_orders(rpc: &RpcClient, program_id: &Pubkey, raffle: &Pubkey) -> Result<Vec<(Pubkey, Order)>> {
    let filters = [
        Memcmp {
            offset: 0,
            bytes: Order::DISCRIMINATOR.to_vec(),
        },
        Memcmp {
            offset: 8,
            bytes: raffle.to_bytes().to_vec(),
        },
    ];
    rpc.get_program_accounts(program_id, &filters)
        .await?
        .into_iter()
        .map(|(key, data)| Ok((key, decode::<Order>(&data, "order")?)))
        .collect()
}

/// The paid order holding ticket `index`, if any.
pub fn find_paid_holder(orders: &[(Pubkey, Order)], index: u32) -> Option<(Pubkey, &Order)> {
    orders
        .iter()
        .find(|(_, order)| order.is_paid() && order.holds(index))
        .map(|(key, order)| (*key, order))
}
