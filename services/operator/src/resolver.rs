//! Drives winner resolution for a raffle.
//!
//! Every step is checked locally against the fetched accounts before a
//! transaction is built, so rule violations surface without paying fees.
//! The program re-checks everything on-chain.

use std::time::Duration;

use anchor_lang::{InstructionData, ToAccountMetas};
use anchor_lang::solana_program::sysvar::slot_hashes;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature, Signer},
};
use tracing::{info, warn};

use rifas::state::{Order, Raffle, ResolutionStage, TicketBook};
use rifas::utils::draw::{check_winner, CheckOutcome};
use rifas::utils::numbering::{extract_winning_number, format_ticket_number, parse_ticket_number};
use rifas::utils::validation::validate_draw_value;

use crate::accounts::{book_address, fetch_orders, fetch_raffle, fetch_ticket_book, find_paid_holder};
use crate::config::{expand_tilde, OperatorConfig};
use crate::error::{OperatorError, Result};
use crate::lottery::{fetch_draw_result, http_client, DrawResult};
use crate::rpc::RpcClient;
use crate::watch::{watch_raffle, RaffleSnapshot};

/// What a check submission is expected to do, decided from local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckPlan {
    Winner {
        ticket_number: String,
        order: Pubkey,
        buyer_name: String,
    },
    Accumulate {
        ticket_number: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckReport {
    Winner {
        ticket_number: String,
        buyer_name: String,
        signature: Signature,
    },
    Accumulated {
        ticket_number: String,
        signature: Signature,
    },
}

/// Mirrors the on-chain check: extract, then look for a paid holder.
pub fn plan_check(
    raffle: &Raffle,
    book: &TicketBook,
    orders: &[(Pubkey, Order)],
    draw_value: &str,
) -> Result<CheckPlan> {
    validate_draw_value(draw_value)?;
    raffle.ensure_checkable()?;

    let width = raffle.width();
    let ticket_number = extract_winning_number(draw_value.trim(), width)?;
    let index = parse_ticket_number(&ticket_number, width)?;

    match check_winner(book, index) {
        CheckOutcome::Match(index) => {
            let (order, holder) = find_paid_holder(orders, index)
                .ok_or_else(|| OperatorError::NoHolder(ticket_number.clone()))?;
            Ok(CheckPlan::Winner {
                ticket_number,
                order,
                buyer_name: holder.buyer_name.clone(),
            })
        }
        CheckOutcome::Accumulated => Ok(CheckPlan::Accumulate { ticket_number }),
    }
}

/// Order holding the ticket picked by a performed random draw.
pub fn plan_random_resolution(raffle: &Raffle, orders: &[(Pubkey, Order)]) -> Result<(String, Pubkey)> {
    let index = raffle.pending_pick()?;
    let ticket_number = format_ticket_number(index, raffle.total_tickets)?;
    let (order, _) = find_paid_holder(orders, index)
        .ok_or_else(|| OperatorError::NoHolder(ticket_number.clone()))?;
    Ok((ticket_number, order))
}

pub fn submit_draw_result_ix(
    program_id: &Pubkey,
    admin: &Pubkey,
    raffle: &Pubkey,
    plan: &CheckPlan,
    draw_value: &str,
    manual: bool,
) -> Instruction {
    let winning_order = match plan {
        CheckPlan::Winner { order, .. } => Some(*order),
        CheckPlan::Accumulate { .. } => None,
    };
    Instruction {
        program_id: *program_id,
        accounts: rifas::accounts::SubmitDrawResult {
            admin: *admin,
            raffle: *raffle,
            ticket_book: book_address(program_id, raffle),
            winning_order,
        }
        .to_account_metas(None),
        data: rifas::instruction::SubmitDrawResult {
            draw_value: draw_value.to_string(),
            manual,
        }
        .data(),
    }
}

/// Random-draw attempts before giving up on a draw slot that keeps expiring.
const MAX_DRAW_ATTEMPTS: u32 = 3;

pub struct Operator {
    config: OperatorConfig,
    program_id: Pubkey,
    rpc: RpcClient,
    http: reqwest::Client,
    admin: Keypair,
}

impl Operator {
    pub fn new(config: OperatorConfig) -> Result<Self> {
        let program_id = config.program_id()?;
        let http = http_client(config.http_timeout_secs)?;
        let rpc = RpcClient::new(http.clone(), &config.rpc_url);

        let keypair_path = expand_tilde(&config.keypair_path);
        let admin = read_keypair_file(&keypair_path).map_err(|e| {
            OperatorError::Config(format!("failed to read keypair {}: {}", keypair_path.display(), e))
        })?;

        Ok(Self {
            config,
            program_id,
            rpc,
            http,
            admin,
        })
    }

    pub async fn fetch(&self) -> Result<DrawResult> {
        Ok(fetch_draw_result(&self.http, &self.config.lottery_api_url).await?)
    }

    pub async fn status(&self, raffle_id: u64) -> Result<RaffleSnapshot> {
        let (_, raffle) = fetch_raffle(&self.rpc, &self.program_id, raffle_id).await?;
        Ok(RaffleSnapshot::from_raffle(&raffle))
    }

    pub fn watch(&self, raffle_id: u64) -> tokio::sync::mpsc::Receiver<RaffleSnapshot> {
        watch_raffle(
            self.rpc.clone(),
            self.program_id,
            raffle_id,
            Duration::from_secs(self.config.poll_interval_secs),
        )
    }

    /// Checks `manual` if given, otherwise the latest federal result. A
    /// typed value is flagged so its winner is recorded as a manual entry.
    pub async fn check(&self, raffle_id: u64, manual: Option<String>) -> Result<CheckReport> {
        let is_manual = manual.is_some();
        let draw_value = match manual {
            Some(value) => value.trim().to_string(),
            None => {
                let result = self.fetch().await?;
                info!("Using contest {} first prize {}", result.contest, result.primary_prize);
                result.primary_prize
            }
        };

        let (raffle_key, raffle) = fetch_raffle(&self.rpc, &self.program_id, raffle_id).await?;
        let book = fetch_ticket_book(&self.rpc, &self.program_id, &raffle_key).await?;
        let orders = fetch_orders(&self.rpc, &self.program_id, &raffle_key).await?;

        let plan = plan_check(&raffle, &book, &orders, &draw_value)?;
        let ix = submit_draw_result_ix(
            &self.program_id,
            &self.admin.pubkey(),
            &raffle_key,
            &plan,
            &draw_value,
            is_manual,
        );
        let signature = self.send(ix).await?;

        match plan {
            CheckPlan::Winner { ticket_number, buyer_name, .. } => {
                info!("Raffle {}: ticket {} wins ({})", raffle_id, ticket_number, buyer_name);
                Ok(CheckReport::Winner {
                    ticket_number,
                    buyer_name,
                    signature,
                })
            }
            CheckPlan::Accumulate { ticket_number } => {
                info!("Raffle {}: ticket {} not sold, prize accumulates", raffle_id, ticket_number);
                Ok(CheckReport::Accumulated {
                    ticket_number,
                    signature,
                })
            }
        }
    }

    /// Performs the random fallback draw and resolves its holder. Waits for
    /// the draw slot fixed at the accumulated check. A pick left pending by
    /// an earlier run is resolved without drawing again.
    pub async fn random(&self, raffle_id: u64) -> Result<RaffleSnapshot> {
        let (raffle_key, mut raffle) = fetch_raffle(&self.rpc, &self.program_id, raffle_id).await?;

        if raffle.pending_pick().is_ok() {
            warn!("Raffle {} already has a pending pick, resolving it", raffle_id);
        } else {
            raffle.ensure_drawing()?;
            if raffle.stage != ResolutionStage::Accumulated {
                return Err(OperatorError::Rejected(format!(
                    "raffle {raffle_id} is {:?}, a random draw needs an accumulated check",
                    raffle.stage
                )));
            }

            for attempt in 1..=MAX_DRAW_ATTEMPTS {
                self.wait_for_slot_after(raffle.draw_slot).await?;
                let ix = Instruction {
                    program_id: self.program_id,
                    accounts: rifas::accounts::RandomDraw {
                        caller: self.admin.pubkey(),
                        raffle: raffle_key,
                        ticket_book: book_address(&self.program_id, &raffle_key),
                        slot_hashes: slot_hashes::ID,
                    }
                    .to_account_metas(None),
                    data: rifas::instruction::RandomDraw {}.data(),
                };
                self.send(ix).await?;

                raffle = fetch_raffle(&self.rpc, &self.program_id, raffle_id).await?.1;
                if raffle.pending_pick().is_ok() {
                    break;
                }
                warn!(
                    "Raffle {}: draw slot expired, rearmed to {} (attempt {})",
                    raffle_id, raffle.draw_slot, attempt
                );
            }
        }

        let orders = fetch_orders(&self.rpc, &self.program_id, &raffle_key).await?;
        let (ticket_number, order) = plan_random_resolution(&raffle, &orders)?;
        info!("Raffle {}: random draw picked ticket {}", raffle_id, ticket_number);

        let ix = Instruction {
            program_id: self.program_id,
            accounts: rifas::accounts::ResolveRandomWinner {
                admin: self.admin.pubkey(),
                raffle: raffle_key,
                winning_order: order,
            }
            .to_account_metas(None),
            data: rifas::instruction::ResolveRandomWinner {}.data(),
        };
        self.send(ix).await?;

        self.status(raffle_id).await
    }

    async fn wait_for_slot_after(&self, target: u64) -> Result<()> {
        loop {
            let slot = self.rpc.get_slot().await?;
            if slot > target {
                return Ok(());
            }
            info!("Waiting for draw slot {} (current {})", target, slot);
            tokio::time::sleep(Duration::from_millis(400 * (target + 1 - slot).min(10))).await;
        }
    }

    pub async fn finalize(&self, raffle_id: u64) -> Result<RaffleSnapshot> {
        let (raffle_key, mut raffle) = fetch_raffle(&self.rpc, &self.program_id, raffle_id).await?;
        // Dry run against the fetched copy.
        raffle.finalize(0)?;

        let ix = Instruction {
            program_id: self.program_id,
            accounts: rifas::accounts::FinalizeRaffle {
                admin: self.admin.pubkey(),
                raffle: raffle_key,
            }
            .to_account_metas(None),
            data: rifas::instruction::FinalizeRaffle {}.data(),
        };
        let signature = self.send(ix).await?;
        info!("Raffle {} finalized: {}", raffle_id, signature);

        self.status(raffle_id).await
    }

    async fn send(&self, ix: Instruction) -> Result<Signature> {
        self.rpc
            .send_with_retries(
                ix,
                &self.admin,
                self.config.max_send_retries,
                self.config.retry_backoff_ms,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book_with, paid_order, raffle};
    use rifas::state::{DrawType, RaffleStatus};

    fn fixture() -> (Raffle, TicketBook, Vec<(Pubkey, Order)>) {
        let raffle_key = Pubkey::new_unique();
        let orders = vec![
            (Pubkey::new_unique(), paid_order(raffle_key, 0, vec![86, 123])),
            (Pubkey::new_unique(), paid_order(raffle_key, 1, vec![586])),
        ];
        let book = book_with(raffle_key, 1000, &orders);
        (raffle(1000, DrawType::Hundreds), book, orders)
    }

    #[test]
    fn test_plan_check_finds_holder() {
        let (raffle, book, orders) = fixture();
        let plan = plan_check(&raffle, &book, &orders, "32586").unwrap();
        assert_eq!(
            plan,
            CheckPlan::Winner {
                ticket_number: "586".into(),
                order: orders[1].0,
                buyer_name: "Comprador 1".into(),
            }
        );
    }

    #[test]
    fn test_plan_check_keeps_leading_zero() {
        let (raffle, book, orders) = fixture();
        let plan = plan_check(&raffle, &book, &orders, " 41086 ").unwrap();
        assert_eq!(
            plan,
            CheckPlan::Winner {
                ticket_number: "086".into(),
                order: orders[0].0,
                buyer_name: "Comprador 0".into(),
            }
        );
    }

    #[test]
    fn test_plan_check_accumulates_unsold() {
        let (raffle, book, orders) = fixture();
        let plan = plan_check(&raffle, &book, &orders, "32999").unwrap();
        assert_eq!(plan, CheckPlan::Accumulate { ticket_number: "999".into() });
    }

    #[test]
    fn test_plan_check_sold_without_holder() {
        let (raffle, book, orders) = fixture();
        let result = plan_check(&raffle, &book, &orders[..1], "32586");
        assert!(matches!(result, Err(OperatorError::NoHolder(n)) if n == "586"));
    }

    #[test]
    fn test_plan_check_rejects_bad_input_and_state() {
        let (mut raffle, book, orders) = fixture();
        assert!(matches!(
            plan_check(&raffle, &book, &orders, "12"),
            Err(OperatorError::Rejected(_))
        ));
        assert!(matches!(
            plan_check(&raffle, &book, &orders, "32a86"),
            Err(OperatorError::Rejected(_))
        ));

        raffle.status = RaffleStatus::Open;
        assert!(matches!(
            plan_check(&raffle, &book, &orders, "32586"),
            Err(OperatorError::Rejected(_))
        ));
    }

    #[test]
    fn test_plan_check_after_accumulation_is_rejected() {
        let (mut raffle, book, orders) = fixture();
        raffle.record_accumulation("32999", 999, 500).unwrap();
        // 586 is sold, but the accumulated result is final.
        assert!(matches!(
            plan_check(&raffle, &book, &orders, "32586"),
            Err(OperatorError::Rejected(_))
        ));
    }

    #[test]
    fn test_submit_draw_result_ix_flags_typed_values() {
        let (raffle, book, orders) = fixture();
        let program = rifas::ID;
        let admin = Pubkey::new_unique();
        let raffle_key = Pubkey::new_unique();
        let plan = plan_check(&raffle, &book, &orders, "586").unwrap();

        let typed = submit_draw_result_ix(&program, &admin, &raffle_key, &plan, "586", true);
        let fetched = submit_draw_result_ix(&program, &admin, &raffle_key, &plan, "586", false);

        // Args are borsh-encoded after the discriminator: draw_value, then manual.
        assert_eq!(typed.data.last(), Some(&1));
        assert_eq!(fetched.data.last(), Some(&0));
        assert_eq!(typed.data[..typed.data.len() - 1], fetched.data[..fetched.data.len() - 1]);

        assert_eq!(typed.accounts[0].pubkey, admin);
        assert!(typed.accounts[0].is_signer);
        assert_eq!(typed.accounts[1].pubkey, raffle_key);
        assert_eq!(typed.accounts[3].pubkey, orders[1].0);

        let accumulate = CheckPlan::Accumulate { ticket_number: "999".into() };
        let ix = submit_draw_result_ix(&program, &admin, &raffle_key, &accumulate, "32999", false);
        // Absent optional accounts are passed as the program id.
        assert_eq!(ix.accounts[3].pubkey, program);
    }

    #[test]
    fn test_plan_random_resolution() {
        let (mut raffle, _, orders) = fixture();
        assert!(plan_random_resolution(&raffle, &orders).is_err());

        raffle.record_accumulation("32999", 999, 500).unwrap();
        raffle.record_random_pick([7u8; 32], 123).unwrap();
        let (number, order) = plan_random_resolution(&raffle, &orders).unwrap();
        assert_eq!(number, "123");
        assert_eq!(order, orders[0].0);
    }
}
