//! Interactive watchlist loop

use crate::commands::{Command, CommandError, is_yes};
use std::io::{BufRead, Write};
use tickerwatch::client::display::{render_analysis, render_quote, render_watchlist};
use tickerwatch::client::{RefreshOutcome, WatchlistClient};

pub fn print_banner(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        r"
╔══════════════════════════════════════════════════╗
║                  tickerwatch                     ║
║                                                  ║
║  /add <symbol>      Track a stock                ║
║  /remove <symbol>   Stop tracking                ║
║  /refresh           Refresh all quotes           ║
║  /analyze <symbol>  News and AI summary          ║
║  /help              All commands                 ║
║  /exit              Quit                         ║
╚══════════════════════════════════════════════════╝
"
    )
}

/// Drives a [`WatchlistClient`] from line-oriented input
pub struct Repl<'a, R, W> {
    client: &'a WatchlistClient,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(client: &'a WatchlistClient, input: R, out: W) -> Self {
        Self { client, input, out }
    }

    /// Next trimmed line, or `None` at end of input
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> std::io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Run until `/exit` or end of input
    pub async fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "{}\n", render_watchlist(&self.client.quotes()))?;

        loop {
            self.prompt("tickerwatch> ")?;
            let Some(line) = self.read_line()? else {
                writeln!(self.out, "\nGoodbye!")?;
                break;
            };

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(e) => {
                    writeln!(self.out, "{e}\n")?;
                    continue;
                }
            };

            if command == Command::Exit {
                writeln!(self.out, "Goodbye!")?;
                break;
            }

            self.execute(command).await?;
            writeln!(self.out)?;
        }

        Ok(())
    }

    async fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Search { symbol } => self.search(&symbol).await?,
            Command::Remove { symbol } => match self.client.remove(&symbol) {
                Ok(true) => writeln!(self.out, "Removed {symbol} from your watchlist.")?,
                Ok(false) => writeln!(self.out, "{symbol} is not in your watchlist.")?,
                Err(e) => writeln!(self.out, "Error: {e}")?,
            },
            Command::Refresh => match self.client.refresh_all().await {
                Ok(RefreshOutcome::Skipped) => writeln!(self.out, "Nothing to refresh.")?,
                Ok(RefreshOutcome::Completed(summary)) => {
                    writeln!(self.out, "Refreshed {} quotes.", summary.replaced)?;
                    if !summary.stale.is_empty() {
                        writeln!(
                            self.out,
                            "Could not refresh {}; showing previous data.",
                            summary.stale.join(", ")
                        )?;
                    }
                    writeln!(self.out, "{}", render_watchlist(&self.client.quotes()))?;
                }
                Err(e) => writeln!(self.out, "Error: {e}")?,
            },
            Command::List => writeln!(self.out, "{}", render_watchlist(&self.client.quotes()))?,
            Command::Analyze { symbol } => {
                writeln!(self.out, "Analyzing {symbol}...")?;
                match self.client.analyze(&symbol).await {
                    Ok(report) => writeln!(self.out, "{}", render_analysis(&report))?,
                    Err(e) => writeln!(self.out, "Error: {e}")?,
                }
            }
            Command::Help => writeln!(self.out, "{}", Command::help_text())?,
            Command::Exit => {}
        }
        Ok(())
    }

    async fn search(&mut self, symbol: &str) -> anyhow::Result<()> {
        let quote = match self.client.search(symbol).await {
            Ok(quote) => quote,
            Err(e) => {
                writeln!(self.out, "Error: {e}")?;
                return Ok(());
            }
        };

        writeln!(self.out, "{}", render_quote(&quote))?;
        self.prompt(&format!("Add {} to your watchlist? [y/N] ", quote.symbol))?;

        let answer = self.read_line()?.unwrap_or_default();
        if !is_yes(&answer) {
            self.client.cancel_add();
            writeln!(self.out, "Cancelled.")?;
            return Ok(());
        }

        match self.client.confirm_add() {
            Ok(Some(added)) => writeln!(self.out, "Added {} to your watchlist.", added.symbol)?,
            Ok(None) => writeln!(self.out, "Nothing to add.")?,
            Err(e) => writeln!(self.out, "Error: {e}")?,
        }
        Ok(())
    }
}
