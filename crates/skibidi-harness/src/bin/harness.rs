//! CLI entrypoint for the skibidi harness.

use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use skibidi_core::{Context, MAX_PHRASE_LEN, MIN_BUFFER_SIZE};
use skibidi_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use skibidi_harness::{HarnessError, Stream, distribution, parse_seed, parse_tier};
use tracing_subscriber::EnvFilter;

/// Conformance and diagnostic tooling for the skibidi phrase engine.
#[derive(Debug, Parser)]
#[command(name = "skibidi-harness")]
#[command(about = "Conformance and diagnostic harness for the skibidi phrase engine")]
struct Cli {
    /// Write a JSONL structured log of this run.
    #[arg(long, global = true)]
    log: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print seeded phrases, one per line.
    Generate {
        /// Seed (decimal or 0x...).
        #[arg(long, default_value = "42")]
        seed: String,
        #[arg(long, default_value_t = 10)]
        count: u64,
        /// Never take the canonical fast path.
        #[arg(long)]
        variant: bool,
        /// Run on this tier instead of the active one (clamped to the host).
        #[arg(long)]
        tier: Option<String>,
    },
    /// Fill one batch buffer and print it.
    Batch {
        #[arg(long, default_value = "42")]
        seed: String,
        #[arg(long, default_value_t = 16)]
        count: usize,
        /// Buffer size in bytes (defaults to room for every phrase).
        #[arg(long)]
        capacity: Option<usize>,
    },
    /// Sample decision rates and compare them with the expected rates.
    Distribution {
        #[arg(long, default_value = "12345")]
        seed: String,
        #[arg(long, default_value_t = 1_000_000)]
        samples: u64,
        /// Output JSON path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// SHA-256 of a seeded phrase stream.
    Fingerprint {
        #[arg(long, default_value = "42")]
        seed: String,
        #[arg(long, default_value_t = 10_000)]
        count: u64,
        /// Fingerprint one tier only (default: every tier the host runs).
        #[arg(long)]
        tier: Option<String>,
        /// Entry point: `generate`, `variant` or `batch`.
        #[arg(long, default_value = "generate")]
        stream: String,
    },
    /// Print version, tier, capabilities and layout sizes as JSON.
    Info,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_stream(text: &str) -> Result<Stream, String> {
    match text {
        "generate" => Ok(Stream::Generate),
        "variant" => Ok(Stream::Variant),
        "batch" => Ok(Stream::Batch),
        other => Err(format!("unknown stream: '{other}'")),
    }
}

/// Log sink that is either a JSONL file or nothing.
struct RunLog(Option<LogEmitter<BufWriter<std::fs::File>>>);

impl RunLog {
    fn open(path: Option<&PathBuf>) -> Result<Self, HarnessError> {
        let run_id = format!("harness-{}", std::process::id());
        Ok(Self(match path {
            Some(p) => Some(LogEmitter::to_file(p, &run_id)?),
            None => None,
        }))
    }

    fn record(&mut self, entry: LogEntry) -> Result<(), HarnessError> {
        if let Some(emitter) = self.0.as_mut() {
            emitter.emit_entry(entry)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), HarnessError> {
        if let Some(emitter) = self.0.as_mut() {
            emitter.flush()?;
        }
        Ok(())
    }
}

fn run(cli: Cli) -> Result<bool, HarnessError> {
    let mut log = RunLog::open(cli.log.as_ref())?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let started = Instant::now();
    let mut ok = true;

    match cli.command {
        Command::Generate {
            seed,
            count,
            variant,
            tier,
        } => {
            let seed = parse_seed(&seed)?;
            let tier = match tier {
                Some(name) => parse_tier(&name)?,
                None => skibidi_runtime::active_tier(),
            };
            let mut ctx = Context::new(seed);
            let mut buf = [0u8; MIN_BUFFER_SIZE];
            for _ in 0..count {
                let len = if variant {
                    ctx.generate_variant_on(tier, &mut buf)?
                } else {
                    ctx.generate_on(tier, &mut buf)?
                };
                out.write_all(&buf[..len])?;
                out.write_all(b"\n")?;
            }
            log.record(
                LogEntry::new("", LogLevel::Info, "generate")
                    .with_seed(seed)
                    .with_tier(tier.clamp_to(skibidi_runtime::host_ceiling()).name())
                    .with_outcome(Outcome::Pass)
                    .with_latency_ns(started.elapsed().as_nanos() as u64)
                    .with_details(serde_json::json!({ "count": count, "variant": variant })),
            )?;
        }
        Command::Batch {
            seed,
            count,
            capacity,
        } => {
            let seed = parse_seed(&seed)?;
            let capacity = capacity.unwrap_or(count.saturating_mul(MAX_PHRASE_LEN + 1).max(MIN_BUFFER_SIZE));
            let mut ctx = Context::new(seed);
            let mut buf = vec![0u8; capacity];
            let mut lengths = vec![0u32; count];
            let produced = ctx.generate_batch(&mut buf, count, Some(&mut lengths[..]));
            let used: usize = lengths[..produced].iter().map(|&l| l as usize + 1).sum();
            out.write_all(&buf[..used])?;
            if produced < count {
                tracing::warn!(produced, count, capacity, "batch stopped early");
            }
            log.record(
                LogEntry::new("", LogLevel::Info, "batch")
                    .with_seed(seed)
                    .with_tier(skibidi_runtime::active_tier().name())
                    .with_outcome(Outcome::Pass)
                    .with_latency_ns(started.elapsed().as_nanos() as u64)
                    .with_details(serde_json::json!({
                        "requested": count,
                        "produced": produced,
                        "capacity": capacity,
                        "bytes": used,
                    })),
            )?;
        }
        Command::Distribution {
            seed,
            samples,
            output,
        } => {
            let seed = parse_seed(&seed)?;
            let report = distribution::sample(seed, samples);
            let json = report.to_json()?;
            match output {
                Some(path) => std::fs::write(path, json)?,
                None => writeln!(out, "{json}")?,
            }
            for metric in report.metrics.iter().filter(|m| !m.pass) {
                tracing::warn!(
                    metric = %metric.name,
                    observed = metric.observed,
                    expected = metric.expected,
                    sigma = metric.sigma,
                    "rate outside tolerance"
                );
            }
            ok = report.all_pass();
            log.record(
                LogEntry::new(
                    "",
                    if ok { LogLevel::Info } else { LogLevel::Error },
                    "distribution",
                )
                .with_seed(seed)
                .with_outcome(if ok { Outcome::Pass } else { Outcome::Fail })
                .with_latency_ns(started.elapsed().as_nanos() as u64)
                .with_details(serde_json::to_value(&report)?),
            )?;
        }
        Command::Fingerprint {
            seed,
            count,
            tier,
            stream,
        } => {
            let seed = parse_seed(&seed)?;
            let stream = parse_stream(&stream).map_err(std::io::Error::other)?;
            let prints = match tier {
                Some(name) => vec![skibidi_harness::fingerprint(seed, count, parse_tier(&name)?, stream)?],
                None => skibidi_harness::fingerprint_all_tiers(seed, count, stream)?,
            };
            ok = prints.windows(2).all(|w| w[0].sha256 == w[1].sha256);
            writeln!(out, "{}", serde_json::to_string_pretty(&prints)?)?;
            if !ok {
                tracing::error!(seed, count, "tiers disagree on the phrase stream");
            }
            for fp in &prints {
                log.record(
                    LogEntry::new("", LogLevel::Info, "fingerprint")
                        .with_seed(seed)
                        .with_tier(fp.tier.clone())
                        .with_outcome(if ok { Outcome::Pass } else { Outcome::Fail })
                        .with_details(serde_json::to_value(fp)?),
                )?;
            }
        }
        Command::Info => {
            let snapshot = skibidi_runtime::snapshot();
            let effective = snapshot.effective();
            let info = serde_json::json!({
                "version": skibidi_core::version(),
                "tier": snapshot.tier.name(),
                "host_ceiling": skibidi_runtime::host_ceiling().name(),
                "capabilities": snapshot.capabilities.bits(),
                "has_vector256": snapshot.capabilities.has_vector256(),
                "has_vector512": snapshot.capabilities.has_vector512(),
                "config": {
                    "allow_512": effective.allow_512,
                    "allow_vectorized_rng": effective.allow_vectorized_rng,
                },
                "context_size": skibidi_core::context_size(),
                "context_alignment": skibidi_core::context_alignment(),
                "rng_state_size": skibidi_core::rng_state_size(),
                "min_buffer_size": MIN_BUFFER_SIZE,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
            log.record(
                LogEntry::new("", LogLevel::Info, "info")
                    .with_tier(snapshot.tier.name())
                    .with_outcome(Outcome::Pass)
                    .with_details(info),
            )?;
        }
    }

    out.flush()?;
    log.finish()?;
    Ok(ok)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!(%err, "harness failed");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
