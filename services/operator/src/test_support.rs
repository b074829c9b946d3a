use solana_sdk::pubkey::Pubkey;

use rifas::state::{
    DrawType, Order, OrderStatus, Raffle, RaffleStatus, ResolutionStage, TicketBook,
};

pub fn raffle(total_tickets: u32, draw_type: DrawType) -> Raffle {
    Raffle {
        admin: Pubkey::new_unique(),
        raffle_id: 0,
        title: "Rifa da moto".into(),
        ticket_price: 500,
        total_tickets,
        draw_type,
        status: RaffleStatus::Drawing,
        stage: ResolutionStage::AwaitingResult,
        tickets_reserved: 0,
        tickets_sold: 0,
        order_count: 0,
        draw_value: String::new(),
        candidate: None,
        draw_seed: [0u8; 32],
        draw_slot: 0,
        winner: None,
        created_at: 1_700_000_000,
        finished_at: None,
        bump: 254,
    }
}

pub fn paid_order(raffle: Pubkey, order_id: u64, numbers: Vec<u32>) -> Order {
    Order {
        raffle,
        order_id,
        buyer: Pubkey::new_unique(),
        buyer_name: format!("Comprador {order_id}"),
        buyer_contact: "11999990000".into(),
        numbers,
        total_price: 500,
        partner: None,
        commission: 0,
        status: OrderStatus::Paid,
        created_at: 1_700_000_100,
        processed_at: Some(1_700_000_200),
        bump: 253,
    }
}

/// Book with `orders` confirmed.
pub fn book_with(raffle: Pubkey, total_tickets: u32, orders: &[(Pubkey, Order)]) -> TicketBook {
    let mut book = TicketBook::new(raffle, total_tickets, 252);
    for (_, order) in orders {
        book.reserve(&order.numbers).unwrap();
        book.confirm(&order.numbers).unwrap();
    }
    book
}
