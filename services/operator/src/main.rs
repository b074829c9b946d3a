mod accounts;
mod config;
mod error;
mod lottery;
mod resolver;
mod rpc;
mod watch;

#[cfg(test)]
mod test_support;

use tracing::{error, info};

use crate::config::{load_config, OperatorConfig};
use crate::error::{OperatorError, Result};
use crate::lottery::{fetch_draw_result, http_client};
use crate::resolver::{CheckReport, Operator};
use crate::watch::RaffleSnapshot;

const USAGE: &str = "usage: rifas-operator <command>
  fetch                         show the latest federal draw result
  check <raffle-id> [number]    check the raffle against the latest result or a typed number
  random <raffle-id>            random fallback draw after an accumulated check
  finalize <raffle-id>          make the resolved winner permanent
  status <raffle-id>            show the raffle resolution state
  watch <raffle-id>             follow the raffle until it finishes";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Fetch,
    Check { raffle_id: u64, draw_value: Option<String> },
    Random { raffle_id: u64 },
    Finalize { raffle_id: u64 },
    Status { raffle_id: u64 },
    Watch { raffle_id: u64 },
}

fn parse_raffle_id(arg: Option<&String>) -> Result<u64> {
    let raw = arg.ok_or_else(|| OperatorError::Config(format!("missing raffle id\n{USAGE}")))?;
    raw.parse()
        .map_err(|_| OperatorError::Config(format!("invalid raffle id: {raw}")))
}

fn parse_args(args: &[String]) -> Result<Command> {
    let name = args.first().map(String::as_str).unwrap_or_default();
    let command = match name {
        "fetch" => Command::Fetch,
        "check" => Command::Check {
            raffle_id: parse_raffle_id(args.get(1))?,
            draw_value: args.get(2).cloned(),
        },
        "random" => Command::Random { raffle_id: parse_raffle_id(args.get(1))? },
        "finalize" => Command::Finalize { raffle_id: parse_raffle_id(args.get(1))? },
        "status" => Command::Status { raffle_id: parse_raffle_id(args.get(1))? },
        "watch" => Command::Watch { raffle_id: parse_raffle_id(args.get(1))? },
        _ => return Err(OperatorError::Config(USAGE.to_string())),
    };
    Ok(command)
}

fn log_snapshot(snapshot: &RaffleSnapshot) {
    info!(
        "Raffle {} \"{}\": {:?}/{:?}, sold {}/{} (reserved {})",
        snapshot.raffle_id,
        snapshot.title,
        snapshot.status,
        snapshot.stage,
        snapshot.tickets_sold,
        snapshot.total_tickets,
        snapshot.tickets_reserved,
    );
    if let Some(candidate) = &snapshot.candidate {
        info!("  last number: {} (draw value {:?})", candidate, snapshot.draw_value);
    }
    if let Some(winner) = &snapshot.winner {
        info!(
            "  winner: ticket {} - {} ({:?})",
            winner.ticket_number, winner.buyer_name, winner.provenance
        );
    }
}

async fn show_draw_result(config: &OperatorConfig) -> Result<()> {
    let client = http_client(config.http_timeout_secs)?;
    let result = fetch_draw_result(&client, &config.lottery_api_url).await?;
    for width in 2..=4u8 {
        info!("  {}-digit number: {}", width, result.candidate_for(width)?);
    }
    Ok(())
}

async fn run(config: OperatorConfig, command: Command) -> Result<()> {
    match command {
        Command::Fetch => show_draw_result(&config).await?,
        Command::Check { raffle_id, draw_value } => {
            match Operator::new(config)?.check(raffle_id, draw_value).await? {
                CheckReport::Winner { ticket_number, buyer_name, signature } => {
                    info!("Winner: ticket {} ({}) tx {}", ticket_number, buyer_name, signature);
                }
                CheckReport::Accumulated { ticket_number, signature } => {
                    info!("Accumulated: ticket {} unsold, tx {}", ticket_number, signature);
                    info!("Run `random {}` to draw among sold tickets", raffle_id);
                }
            }
        }
        Command::Random { raffle_id } => log_snapshot(&Operator::new(config)?.random(raffle_id).await?),
        Command::Finalize { raffle_id } => log_snapshot(&Operator::new(config)?.finalize(raffle_id).await?),
        Command::Status { raffle_id } => log_snapshot(&Operator::new(config)?.status(raffle_id).await?),
        Command::Watch { raffle_id } => {
            let mut updates = Operator::new(config)?.watch(raffle_id);
            while let Some(snapshot) = updates.recv().await {
                log_snapshot(&snapshot);
                if snapshot.is_terminal() {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("RPC={}, program={}", config.rpc_url, config.program_id);

    if let Err(e) = run(config, command).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
