use std::fmt;

use crate::lottery::LotteryError;

#[derive(Debug)]
pub enum OperatorError {
    /// Missing, unreadable or invalid operator configuration.
    Config(String),
    /// Draw-result source failed; retry or enter the number by hand.
    Lottery(LotteryError),
    /// JSON-RPC transport or node error.
    Rpc(String),
    /// Account data did not decode as the expected program account.
    AccountDecode(String),
    /// Rejected by the raffle rules before anything was sent.
    Rejected(String),
    /// The extracted number is sold but no paid order holding it was found.
    NoHolder(String),
    /// Transaction was sent but failed or never confirmed.
    Transaction(String),
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorError::Config(msg) => write!(f, "config: {msg}"),
            OperatorError::Lottery(e) => write!(f, "draw result unavailable ({e}); retry or pass the number manually"),
            OperatorError::Rpc(msg) => write!(f, "rpc: {msg}"),
            OperatorError::AccountDecode(msg) => write!(f, "account decode: {msg}"),
            OperatorError::Rejected(msg) => write!(f, "rejected: {msg}"),
            OperatorError::NoHolder(number) => {
                write!(f, "ticket {number} is sold but no paid order holds it")
            }
            OperatorError::Transaction(msg) => write!(f, "transaction: {msg}"),
        }
    }
}

impl std::error::Error for OperatorError {}

impl From<LotteryError> for OperatorError {
    fn from(e: LotteryError) -> Self {
        OperatorError::Lottery(e)
    }
}

impl From<anchor_lang::error::Error> for OperatorError {
    fn from(e: anchor_lang::error::Error) -> Self {
        OperatorError::Rejected(e.to_string())
    }
}

impl From<reqwest::Error> for OperatorError {
    fn from(e: reqwest::Error) -> Self {
        OperatorError::Rpc(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OperatorError>;
