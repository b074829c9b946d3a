//! Federal lottery result source.
//!
//! API endpoint: `GET <lottery_api_url>`
//! Response: `{ "numero": 5812, "dataApuracao": "18/10/2026", "listaDezenas": ["032586", ...] }`
//! The first entry of `listaDezenas` is the first-prize ticket.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use rifas::utils::numbering::extract_winning_number;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LotteryError {
    Network(String),
    Status(u16),
    Malformed(String),
    MissingPrize,
}

impl fmt::Display for LotteryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotteryError::Network(msg) => write!(f, "network error: {msg}"),
            LotteryError::Status(code) => write!(f, "unexpected HTTP status {code}"),
            LotteryError::Malformed(msg) => write!(f, "malformed response: {msg}"),
            LotteryError::MissingPrize => write!(f, "response has no first-prize number"),
        }
    }
}

impl std::error::Error for LotteryError {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FederalResponse {
    numero: u32,
    data_apuracao: Option<String>,
    #[serde(default)]
    lista_dezenas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawResult {
    pub contest: u32,
    pub date: Option<String>,
    pub primary_prize: String,
}

impl DrawResult {
    /// Candidate ticket number for a raffle whose numbers are `width` digits.
    pub fn candidate_for(&self, width: u8) -> Result<String> {
        Ok(extract_winning_number(&self.primary_prize, width)?)
    }
}

pub fn parse_draw_result(body: &str) -> std::result::Result<DrawResult, LotteryError> {
    let response: FederalResponse =
        serde_json::from_str(body).map_err(|e| LotteryError::Malformed(e.to_string()))?;

    let prize = response
        .lista_dezenas
        .first()
        .map(|p| p.trim().to_string())
        .ok_or(LotteryError::MissingPrize)?;
    if prize.is_empty() {
        return Err(LotteryError::MissingPrize);
    }
    if !prize.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LotteryError::Malformed(format!("prize '{prize}' is not numeric")));
    }

    Ok(DrawResult {
        contest: response.numero,
        date: response.data_apuracao,
        primary_prize: prize,
    })
}

pub fn http_client(timeout_secs: u64) -> std::result::Result<reqwest::Client, LotteryError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| LotteryError::Network(e.to_string()))
}

/// Single GET against the draw-result source. Any failure is returned to the
/// operator; no stale or partial value is ever produced.
pub async fn fetch_draw_result(
    client: &reqwest::Client,
    url: &str,
) -> std::result::Result<DrawResult, LotteryError> {
    let resp = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| LotteryError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        warn!("Lottery API returned {}", status);
        return Err(LotteryError::Status(status.as_u16()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| LotteryError::Network(e.to_string()))?;
    let result = parse_draw_result(&body)?;
    info!(
        "Federal contest {} ({}): first prize {}",
        result.contest,
        result.date.as_deref().unwrap_or("no date"),
        result.primary_prize
    );
    Ok(result)
}
