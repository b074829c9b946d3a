pub mod initialize_platform;
pub mod create_raffle;
pub mod close_sales;
pub mod cancel_raffle;
pub mod create_partner;
pub mod update_partner;
pub mod place_order;
pub mod approve_order;
pub mod cancel_order;
pub mod submit_draw_result;
pub mod random_draw;
pub mod resolve_random_winner;
pub mod finalize_raffle;

pub use initialize_platform::*;
pub use create_raffle::*;
pub use close_sales::*;
pub use cancel_raffle::*;
pub use create_partner::*;
pub use update_partner::*;
pub use place_order::*;
pub use approve_order::*;
pub use cancel_order::*;
pub use submit_draw_result::*;
pub use random_draw::*;
pub use resolve_random_winner::*;
pub use finalize_raffle::*;
