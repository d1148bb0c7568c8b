//! Interactive console
//!
//! Reads commands such as `buy 1.5` or `sell 0.25` line by line, runs each
//! through the execution service and prints the resulting fills.

use hermes_core::{Direction, ExecutionPlan, Quantity};
use log::debug;
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::rest::VenueExecutionService;
use crate::application::ExecuteCommand;
use crate::infrastructure::AssetLabels;

const HELP: &str = "Commands:
  buy <amount>    buy the base asset at the lowest available prices
  sell <amount>   sell the base asset at the highest available prices
  venues          list venues with balances and resting orders
  help            show this message
  exit            quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Execute(ExecuteCommand),
    Venues,
    Help,
    Exit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error("Usage: {0} <amount>")]
    MissingAmount(Direction),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
}

impl ConsoleCommand {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Option<Result<Self, CommandError>> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();

        let command = match verb.as_str() {
            "exit" | "quit" => Ok(ConsoleCommand::Exit),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "venues" => Ok(ConsoleCommand::Venues),
            other => match Direction::try_from(other) {
                Ok(direction) => parse_amount(direction, words.next()).map(|quantity| {
                    ConsoleCommand::Execute(ExecuteCommand {
                        quantity,
                        direction,
                    })
                }),
                Err(_) => Err(CommandError::Unknown(other.to_string())),
            },
        };
        Some(command)
    }
}

fn parse_amount(direction: Direction, word: Option<&str>) -> Result<Quantity, CommandError> {
    let word = word.ok_or(CommandError::MissingAmount(direction))?;
    word.parse::<Decimal>()
        .map_err(|_| CommandError::InvalidAmount(word.to_string()))
}

/// Format a plan the way the console prints it
pub fn render_plan(plan: &ExecutionPlan, labels: &AssetLabels) -> String {
    let mut out = String::new();
    for line in &plan.lines {
        let _ = writeln!(
            out,
            "{}: order {} - {:.8} {} @ {:.2} {}",
            line.venue_name, line.order_id, line.size, labels.base, line.price, labels.quote
        );
    }

    let caption = if plan.direction.is_acquire() {
        "Total Cost"
    } else {
        "Total Revenue"
    };
    let _ = write!(out, "{}: {:.2} {}", caption, plan.total(), labels.quote);
    out
}

/// Line-oriented console bound to an execution service
pub struct Console {
    service: Arc<VenueExecutionService>,
    labels: AssetLabels,
}

impl Console {
    pub fn new(service: Arc<VenueExecutionService>, labels: AssetLabels) -> Self {
        Self { service, labels }
    }

    /// Run against stdin and stdout until `exit` or end of input
    pub async fn run(&self) -> std::io::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.run_with(stdin, tokio::io::stdout()).await
    }

    pub async fn run_with<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(b"Type 'help' for commands.\n> ").await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let reply = match ConsoleCommand::parse(&line) {
                None => None,
                Some(Ok(ConsoleCommand::Exit)) => break,
                Some(Ok(command)) => Some(self.dispatch(command).await),
                Some(Err(e)) => Some(e.to_string()),
            };

            if let Some(reply) = reply {
                output.write_all(reply.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            output.write_all(b"> ").await?;
            output.flush().await?;
        }

        output.write_all(b"\n").await?;
        output.flush().await
    }

    async fn dispatch(&self, command: ConsoleCommand) -> String {
        debug!("Console command: {:?}", command);
        match command {
            ConsoleCommand::Execute(request) => match self.service.execute(request).await {
                Ok(plan) => render_plan(&plan, &self.labels),
                Err(e) => format!("Error: {}", e),
            },
            ConsoleCommand::Venues => match self.service.venues().await {
                Ok(venues) => {
                    let mut out = String::new();
                    for venue in &venues {
                        let _ = writeln!(
                            out,
                            "{}: {:.2} {}, {:.8} {}, {} asks, {} bids",
                            venue.name,
                            venue.quote_balance,
                            self.labels.quote,
                            venue.base_balance,
                            self.labels.base,
                            venue.asks.len(),
                            venue.bids.len()
                        );
                    }
                    let _ = write!(out, "{} venues", venues.len());
                    out
                }
                Err(e) => format!("Error: {}", e),
            },
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Exit => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ExecutionService;
    use crate::infrastructure::InMemoryVenueStore;
    use hermes_core::{ExecutionLine, RestingOrder, Venue};
    use hermes_ports::VenueSnapshotProvider;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ConsoleCommand::parse("buy 1.5"),
            Some(Ok(ConsoleCommand::Execute(ExecuteCommand::acquire(dec!(1.5)))))
        );
        assert_eq!(
            ConsoleCommand::parse("  SELL   0.25 "),
            Some(Ok(ConsoleCommand::Execute(ExecuteCommand::dispose(dec!(0.25)))))
        );
        assert_eq!(ConsoleCommand::parse("exit"), Some(Ok(ConsoleCommand::Exit)));
        assert_eq!(ConsoleCommand::parse("venues"), Some(Ok(ConsoleCommand::Venues)));
        assert_eq!(ConsoleCommand::parse("   "), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ConsoleCommand::parse("buy"),
            Some(Err(CommandError::MissingAmount(Direction::Acquire)))
        );
        assert_eq!(
            ConsoleCommand::parse("sell lots"),
            Some(Err(CommandError::InvalidAmount("lots".to_string())))
        );
        assert_eq!(
            ConsoleCommand::parse("hold 1"),
            Some(Err(CommandError::Unknown("hold".to_string())))
        );
        // non-positive amounts parse; the service rejects them
        assert!(matches!(
            ConsoleCommand::parse("buy -1"),
            Some(Ok(ConsoleCommand::Execute(_)))
        ));
    }

    #[test]
    fn test_render_plan() {
        let mut plan = ExecutionPlan::new(Direction::Acquire);
        plan.record(ExecutionLine {
            order_id: 7,
            venue_id: Uuid::nil(),
            venue_name: "Exchange1".to_string(),
            size: dec!(1.5),
            price: dec!(50000),
        })
        .unwrap();

        let text = render_plan(&plan, &AssetLabels::default());
        assert_eq!(
            text,
            "Exchange1: order 7 - 1.50000000 BTC @ 50000.00 EUR\nTotal Cost: 75000.00 EUR"
        );

        let revenue = render_plan(&ExecutionPlan::new(Direction::Dispose), &AssetLabels::default());
        assert_eq!(revenue, "Total Revenue: 0.00 EUR");
    }

    #[tokio::test]
    async fn test_session_executes_and_exits() {
        let store = Arc::new(InMemoryVenueStore::with_venues(vec![
            Venue::new("Exchange1", dec!(100000), dec!(0))
                .with_ask(RestingOrder::sell(1, dec!(50000), dec!(2))),
        ]));
        let service = ExecutionService::new(Arc::clone(&store), Arc::clone(&store), 0);
        let console = Console::new(Arc::new(service), AssetLabels::default());

        let input: &[u8] = b"buy 1\nbogus\nexit\nbuy 1\n";
        let mut output = Vec::new();
        console.run_with(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Total Cost: 50000.00 EUR"));
        assert!(text.contains("Unknown command 'bogus'"));
        // input after exit is ignored
        assert_eq!(text.matches("Total Cost").count(), 1);
        assert_eq!(store.fetch_all_venues().await.unwrap()[0].quote_balance, dec!(50000));
    }
}
