use std::future::Future;
use std::time::Duration;

use solana_sdk::pubkey::Pubkey;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use rifas::state::{Raffle, RaffleStatus, ResolutionStage, WinnerProvenance};
use rifas::utils::numbering::format_ticket_number;

use crate::accounts::fetch_raffle;
use crate::error::{OperatorError, Result};
use crate::rpc::RpcClient;

/// Point-in-time view of a raffle's resolution state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaffleSnapshot {
    pub raffle_id: u64,
    pub title: String,
    pub status: RaffleStatus,
    pub stage: ResolutionStage,
    pub tickets_sold: u32,
    pub tickets_reserved: u32,
    pub total_tickets: u32,
    pub draw_value: String,
    pub candidate: Option<String>,
    pub winner: Option<WinnerSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerSummary {
    pub ticket_number: String,
    pub buyer_name: String,
    pub provenance: WinnerProvenance,
}

impl RaffleSnapshot {
    pub fn from_raffle(raffle: &Raffle) -> Self {
        Self {
            raffle_id: raffle.raffle_id,
            title: raffle.title.clone(),
            status: raffle.status,
            stage: raffle.stage,
            tickets_sold: raffle.tickets_sold,
            tickets_reserved: raffle.tickets_reserved,
            total_tickets: raffle.total_tickets,
            draw_value: raffle.draw_value.clone(),
            candidate: raffle
                .candidate
                .and_then(|index| format_ticket_number(index, raffle.total_tickets).ok()),
            winner: raffle.winner.as_ref().map(|w| WinnerSummary {
                ticket_number: w.ticket_number.clone(),
                buyer_name: w.buyer_name.clone(),
                provenance: w.provenance,
            }),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, RaffleStatus::Finished | RaffleStatus::Canceled)
    }
}

/// Polls the raffle account and yields a snapshot whenever it changes. The
/// first successful read is always yielded. Polling stops when the receiver
/// is dropped; fetch errors are logged and retried on the next tick.
pub fn watch_raffle(
    rpc: RpcClient,
    program_id: Pubkey,
    raffle_id: u64,
    poll_interval: Duration,
) -> mpsc::Receiver<RaffleSnapshot> {
    let (rx, _task) = spawn_poller(poll_interval, move || {
        let rpc = rpc.clone();
        async move {
            let (_, raffle) = fetch_raffle(&rpc, &program_id, raffle_id).await?;
            Ok::<_, OperatorError>(RaffleSnapshot::from_raffle(&raffle))
        }
    });
    rx
}

fn spawn_poller<F, Fut>(
    poll_interval: Duration,
    mut fetch: F,
) -> (mpsc::Receiver<RaffleSnapshot>, JoinHandle<()>)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<RaffleSnapshot>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(poll_interval);
        let mut last: Option<RaffleSnapshot> = None;

        loop {
            interval.tick().await;
            if tx.is_closed() {
                break;
            }

            let snapshot = match fetch().await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("watch poll failed: {}", e);
                    continue;
                }
            };

            if last.as_ref() == Some(&snapshot) {
                continue;
            }
            debug!("raffle {} changed: {:?}", snapshot.raffle_id, snapshot.stage);
            last = Some(snapshot.clone());
            if tx.send(snapshot).await.is_err() {
                break;
            }
        }
        debug!("watch stopped");
    });

    (rx, task)
}
