use std::str::FromStr;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::{debug, warn};

use crate::error::{OperatorError, Result};

#[derive(Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<serde_json::Value>,
}

/// `memcmp` filter for `getProgramAccounts`.
pub struct Memcmp {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl Memcmp {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "memcmp": {
                "offset": self.offset,
                "bytes": BASE64.encode(&self.bytes),
                "encoding": "base64"
            }
        })
    }
}

/// Exponential backoff: `base * 2^attempt`, saturating.
pub fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let shift = attempt.min(16);
    let factor = 1u64.checked_shl(shift).unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(factor))
}

fn decode_account_data(value: &serde_json::Value) -> Result<Vec<u8>> {
    let b64_data = value["data"]
        .as_array()
        .and_then(|parts| parts.first())
        .and_then(|v| v.as_str())
        .ok_or_else(|| OperatorError::Rpc("expected base64 account data".into()))?;
    BASE64
        .decode(b64_data)
        .map_err(|e| OperatorError::Rpc(format!("base64: {e}")))
}

impl RpcClient {
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    async fn call(&self, method: &'static str, params: serde_json::Value) -> Result<serde_json::Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let resp: RpcResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = resp.error {
            return Err(OperatorError::Rpc(format!("{method}: {err}")));
        }
        Ok(resp.result.unwrap_or_default())
    }

    pub async fn get_account_data(&self, pubkey: &Pubkey) -> Result<Vec<u8>> {
        let result = self
            .call(
                "getAccountInfo",
                serde_json::json!([pubkey.to_string(), { "encoding": "base64", "commitment": "confirmed" }]),
            )
            .await?;

        let value = &result["value"];
        if value.is_null() {
            return Err(OperatorError::Rpc(format!("account {pubkey} not found")));
        }
        decode_account_data(value)
    }

    pub async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: &[Memcmp],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>> {
        let filters: Vec<serde_json::Value> = filters.iter().map(Memcmp::to_json).collect();
        let result = self
            .call(
                "getProgramAccounts",
                serde_json::json!([
                    program_id.to_string(),
                    { "encoding": "base64", "commitment": "confirmed", "filters": filters }
                ]),
            )
            .await?;

        let arr = result
            .as_array()
            .ok_or_else(|| OperatorError::Rpc("expected account array".into()))?;

        let mut accounts = Vec::with_capacity(arr.len());
        for item in arr {
            let key = item["pubkey"].as_str().unwrap_or_default();
            let pubkey = match Pubkey::from_str(key) {
                Ok(pk) => pk,
                Err(e) => {
                    warn!("Skipping account with invalid pubkey {}: {}", key, e);
                    continue;
                }
            };
            accounts.push((pubkey, decode_account_data(&item["account"])?));
        }
        Ok(accounts)
    }

    pub async fn get_slot(&self) -> Result<u64> {
        let result = self
            .call("getSlot", serde_json::json!([{ "commitment": "confirmed" }]))
            .await?;
        result
            .as_u64()
            .ok_or_else(|| OperatorError::Rpc("expected slot number".into()))
    }

    pub async fn get_latest_blockhash(&self) -> Result<Hash> {
        let result = self
            .call("getLatestBlockhash", serde_json::json!([{ "commitment": "confirmed" }]))
            .await?;
        let bh = result["value"]["blockhash"]
            .as_str()
            .ok_or_else(|| OperatorError::Rpc("missing blockhash".into()))?;
        Hash::from_str(bh).map_err(|e| OperatorError::Rpc(format!("blockhash: {e}")))
    }

    pub async fn send_transaction(&self, tx: &Transaction) -> Result<Signature> {
        let tx_bytes = bincode::serialize(tx)
            .map_err(|e| OperatorError::Transaction(format!("serialize: {e}")))?;
        let result = self
            .call(
                "sendTransaction",
                serde_json::json!([
                    BASE64.encode(tx_bytes),
                    { "encoding": "base64", "skipPreflight": false, "preflightCommitment": "confirmed" }
                ]),
            )
            .await?;
        let sig = result
            .as_str()
            .ok_or_else(|| OperatorError::Rpc("expected signature string".into()))?;
        Signature::from_str(sig).map_err(|e| OperatorError::Rpc(format!("signature: {e}")))
    }

    pub async fn wait_for_confirmation(&self, sig: &Signature, timeout: Duration) -> Result<()> {
        let start = std::time::Instant::now();
        loop {
            let result = self
                .call(
                    "getSignatureStatuses",
                    serde_json::json!([[sig.to_string()], { "searchTransactionHistory": true }]),
                )
                .await?;

            let status = &result["value"][0];
            if !status.is_null() {
                if !status["err"].is_null() {
                    return Err(OperatorError::Transaction(format!("{sig} failed: {}", status["err"])));
                }
                if let Some(level) = status["confirmationStatus"].as_str() {
                    if level == "confirmed" || level == "finalized" {
                        return Ok(());
                    }
                }
            }

            if start.elapsed() > timeout {
                return Err(OperatorError::Transaction(format!("timeout waiting for {sig}")));
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }

    /// Signs, sends and confirms `ix`, retrying with exponential backoff.
    /// Program errors (preflight rejections) are returned without retrying.
    pub async fn send_with_retries(
        &self,
        ix: Instruction,
        signer: &Keypair,
        max_retries: u32,
        backoff_ms: u64,
    ) -> Result<Signature> {
        let attempts = max_retries.max(1);
        let mut last_err = OperatorError::Transaction("no attempt made".into());

        for attempt in 0..attempts {
            let blockhash = self.get_latest_blockhash().await?;
            let tx = Transaction::new_signed_with_payer(
                std::slice::from_ref(&ix),
                Some(&signer.pubkey()),
                &[signer],
                blockhash,
            );

            let outcome = match self.send_transaction(&tx).await {
                Ok(sig) => self
                    .wait_for_confirmation(&sig, Duration::from_secs(30))
                    .await
                    .map(|()| sig),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(sig) => return Ok(sig),
                Err(OperatorError::Rpc(msg)) if msg.contains("custom program error") => {
                    return Err(OperatorError::Rejected(msg));
                }
                Err(e) => {
                    warn!("send attempt {} failed: {}", attempt + 1, e);
                    last_err = e;
                    if attempt + 1 < attempts {
                        let delay = backoff_delay(backoff_ms, attempt);
                        debug!("retrying in {:?}", delay);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_err)
    }
}
