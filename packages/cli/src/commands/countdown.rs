use super::Workspace;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Args;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use weddingsite_editor::{Clock, CountdownReading, CountdownTicker, FixedClock, SystemClock};

#[derive(Debug, Args)]
pub struct CountdownArgs {
    /// Owner the site belongs to
    #[arg(short, long)]
    pub owner: String,

    /// Number of readings to print before exiting
    #[arg(short, long, default_value_t = 1)]
    pub ticks: usize,

    /// Refresh period in milliseconds (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: Option<u64>,

    /// Preview the countdown as of this local time (YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub at: Option<String>,
}

fn clock_for(at: Option<&str>) -> Result<Arc<dyn Clock>> {
    match at {
        Some(at) => {
            let now = NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M:%S")
                .with_context(|| format!("Invalid --at time {at:?}"))?;
            Ok(Arc::new(FixedClock::new(now)))
        }
        None => Ok(Arc::new(SystemClock)),
    }
}

pub async fn countdown(args: CountdownArgs, workspace: &Workspace) -> Result<()> {
    let (_persister, _notices, doc) = workspace.load(&args.owner).await?;

    let period = args
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| workspace.config.tick_interval());
    let clock = clock_for(args.at.as_deref())?;
    let (tx, mut readings) = mpsc::unbounded_channel();

    let ticker = CountdownTicker::for_document(
        &doc,
        workspace.config.ceremony_time()?,
        clock,
        period,
        move |reading| {
            let _ = tx.send(reading);
        },
    );
    let Some(mut ticker) = ticker else {
        println!("{}", "No valid wedding date set; nothing to count down to".yellow());
        return Ok(());
    };

    let mut printed = 0;
    while printed < args.ticks {
        let Some(reading) = readings.recv().await else {
            break;
        };
        printed += 1;

        match reading {
            CountdownReading::Remaining(left) => println!(
                "{} {} days {:02}:{:02}:{:02}",
                "⏳".bright_blue(),
                left.days.to_string().bright_white().bold(),
                left.hours,
                left.minutes,
                left.seconds
            ),
            CountdownReading::Elapsed => {
                println!("{}", "💍 The big day is here!".green().bold());
                break;
            }
        }
    }

    ticker.stop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use weddingsite_editor::countdown_between;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CountdownArgs,
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let parsed = Harness::try_parse_from(["countdown", "--owner", "o", "--interval-ms", "0"]);
        assert!(parsed.is_err());

        let parsed =
            Harness::try_parse_from(["countdown", "--owner", "o", "--interval-ms", "250"]).unwrap();
        assert_eq!(parsed.args.interval_ms, Some(250));
    }

    #[test]
    fn test_at_pins_the_clock() {
        let clock = clock_for(Some("2025-06-10T15:00:00")).unwrap();
        let target = NaiveDateTime::parse_from_str("2025-06-15T15:00:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();

        assert_eq!(countdown_between(target, clock.now()).countdown().days, 5);
        assert!(clock_for(Some("next tuesday")).is_err());
    }
}
