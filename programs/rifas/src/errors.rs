use anchor_lang::prelude::*;

#[error_code]
pub enum RifasError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Platform is paused")]
    PlatformPaused,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Invalid characters")]
    InvalidCharacters,
    #[msg("Text too long")]
    TextTooLong,
    #[msg("Text must not be empty")]
    EmptyText,
    #[msg("Ticket price out of bounds")]
    InvalidPrice,
    #[msg("Ticket count must be between 1 and 10000")]
    InvalidCapacity,
    #[msg("Draw type does not match the ticket count's digit width")]
    DrawTypeMismatch,
    #[msg("Commission above the allowed maximum")]
    CommissionTooHigh,
    #[msg("Partner slug must be lowercase letters, digits or '-'")]
    InvalidSlug,
    #[msg("Partner is inactive")]
    PartnerInactive,

    #[msg("Ticket index outside the raffle's number space")]
    TicketIndexOutOfRange,
    #[msg("Ticket number must be exactly the raffle's digit width")]
    InvalidTicketNumber,
    #[msg("Draw result must contain only digits")]
    MalformedDrawResult,
    #[msg("Draw result has fewer digits than the raffle's ticket width")]
    DrawResultTooShort,

    #[msg("Order must contain at least one number")]
    EmptyOrder,
    #[msg("Too many numbers in one order")]
    TooManyNumbers,
    #[msg("Number repeated in order")]
    DuplicateNumber,
    #[msg("Ticket is not available")]
    TicketUnavailable,
    #[msg("Ticket is not reserved")]
    TicketNotReserved,
    #[msg("Order was already processed")]
    OrderAlreadyProcessed,
    #[msg("Order does not belong to this raffle")]
    OrderRaffleMismatch,

    #[msg("Raffle is not open for sales")]
    RaffleNotOpen,
    #[msg("Raffle is not in the drawing phase")]
    RaffleNotDrawing,
    #[msg("Raffle was already finalized")]
    AlreadyFinalized,
    #[msg("Raffle is canceled")]
    RaffleCanceled,
    #[msg("Raffle already has a resolved winner")]
    AlreadyResolved,
    #[msg("Raffle has no resolved winner")]
    NotResolved,
    #[msg("Random draw is only allowed after an accumulated check")]
    NotAccumulated,
    #[msg("Draw result was already checked; the accumulated value is final")]
    AlreadyChecked,
    #[msg("Orders can no longer be settled once winner resolution started")]
    ResolutionStarted,
    #[msg("Draw slot has not been reached yet")]
    DrawSlotNotReached,
    #[msg("A random draw was already performed for this raffle")]
    RandomDrawInProgress,
    #[msg("No random pick awaiting its winner")]
    NoPendingPick,
    #[msg("Cannot draw a winner when nothing was sold")]
    NothingSold,
    #[msg("Winning ticket is sold but its order was not supplied")]
    MissingWinningOrder,
    #[msg("Supplied order does not hold the winning ticket")]
    WrongWinningOrder,
}
