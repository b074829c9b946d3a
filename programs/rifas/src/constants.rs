// Ticket space
pub const MAX_TICKETS: u32 = 10_000;          // 4-digit space
pub const MAX_NUMBERS_PER_ORDER: usize = 50;

// String bounds
pub const MAX_TITLE_LEN: usize = 64;
pub const MAX_BUYER_NAME_LEN: usize = 48;
pub const MAX_CONTACT_LEN: usize = 32;        // phone / e-mail
pub const MAX_PIX_KEY_LEN: usize = 77;        // longest PIX key is a random EVP / e-mail
pub const MAX_SLUG_LEN: usize = 32;
pub const MAX_PARTNER_NAME_LEN: usize = 48;
pub const MAX_DRAW_VALUE_LEN: usize = 16;

// Seeds
pub const PLATFORM_SEED: &[u8] = b"platform";
pub const RAFFLE_SEED: &[u8] = b"raffle";
pub const BOOK_SEED: &[u8] = b"book";
pub const ORDER_SEED: &[u8] = b"order";
pub const PARTNER_SEED: &[u8] = b"partner";

// Random fallback: the seed comes from the hash of a slot fixed at the
// accumulated check, at least this many slots in the future (~13 s).
pub const DRAW_SLOT_DELAY: u64 = 32;

// Financial constants (prices are in centavos)
pub const MIN_TICKET_PRICE: u64 = 1;
pub const MAX_TICKET_PRICE: u64 = 100_000_000;    // R$ 1.000.000,00
pub const MAX_COMMISSION_BPS: u16 = 5_000;        // 50% max
