mod sink;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{ensure, Context};
use clap::{Parser, ValueEnum};
use engine::{run, RunConfigBuilder, SpinPolicy};

/// Race a shuffled deck onto the pile in ascending order
#[derive(Parser)]
#[command(name = "spit", version, about = "Multi-threaded spit race over a shuffled deck")]
struct Cli {
    /// Deck size as a power of two: 1 << N cards (floored at 256)
    #[arg(short = 'z', long = "size-shift", default_value_t = 20)]
    size_shift: u32,

    /// Shuffle seed (defaults to the current time)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Worker thread count (clamped to 4..=30)
    #[arg(short = 't', long = "threads", default_value_t = 4)]
    threads: usize,

    /// What a worker does between failed polls
    #[arg(long = "spin-policy", value_enum, default_value_t = PolicyArg::Busy)]
    spin_policy: PolicyArg,

    /// Suppress per-play lines; log the summary only
    #[arg(long)]
    quiet: bool,

    /// Emit each play as one JSON object per line
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Busy-wait between polls
    Busy,
    /// Yield to the scheduler after each failed poll
    Yield,
    /// Spin with growing pauses, then yield
    Backoff,
}

impl From<PolicyArg> for SpinPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Busy => SpinPolicy::Spin,
            PolicyArg::Yield => SpinPolicy::Yield,
            PolicyArg::Backoff => SpinPolicy::Backoff,
        }
    }
}

impl Cli {
    fn deck_len(&self) -> anyhow::Result<u32> {
        ensure!(
            self.size_shift < 32,
            "size shift {} does not fit a 32-bit deck",
            self.size_shift
        );
        // The deck never goes below 256 cards.
        Ok(1u32 << self.size_shift.max(8))
    }

    fn workers(&self) -> usize {
        self.threads.clamp(4, 30)
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let deck_len = cli.deck_len()?;
    let seed = cli.seed.unwrap_or_else(seed_from_clock);
    let threads = cli.workers();

    log::info!("deck of {deck_len} cards, seed {seed}, {threads} workers");

    let mut deck = rng::permutation(deck_len, seed);

    let config = RunConfigBuilder::default()
        .workers(threads)
        .spin_policy(cli.spin_policy.into())
        .build()
        .context("assembling run configuration")?;

    let (summary, sink) = run(&mut deck, &config, sink::StdoutSink::new(cli.json, cli.quiet))
        .context("running the race")?;
    sink.finish().context("flushing play output")?;

    log::info!(
        "played {} cards across {} workers in {:?}",
        summary.cards,
        summary.workers,
        summary.elapsed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_shifts_floor_at_256() {
        let cli = Cli::parse_from(["spit", "-z", "3"]);
        assert_eq!(cli.deck_len().unwrap(), 256);
    }

    #[test]
    fn test_shift_sets_deck_size() {
        let cli = Cli::parse_from(["spit", "-z", "10"]);
        assert_eq!(cli.deck_len().unwrap(), 1024);
    }

    #[test]
    fn test_oversized_shift_is_an_error() {
        let cli = Cli::parse_from(["spit", "-z", "32"]);
        assert!(cli.deck_len().is_err());
    }

    #[test]
    fn test_thread_clamp_bounds() {
        assert_eq!(Cli::parse_from(["spit", "-t", "1"]).workers(), 4);
        assert_eq!(Cli::parse_from(["spit", "-t", "64"]).workers(), 30);
        assert_eq!(Cli::parse_from(["spit", "-t", "12"]).workers(), 12);
    }

    #[test]
    fn test_policy_mapping() {
        assert_eq!(SpinPolicy::from(PolicyArg::Busy), SpinPolicy::Spin);
        assert_eq!(SpinPolicy::from(PolicyArg::Yield), SpinPolicy::Yield);
        assert_eq!(SpinPolicy::from(PolicyArg::Backoff), SpinPolicy::Backoff);
    }
}
