use std::env;
use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;

use arkos::network::{DEFAULT_CYCLES, DEFAULT_PREFIX};
use arkos::{NetworkConfig, ResonanceNetwork};

const MINIMAL_FLAG: &str = "--minimal";
const MINIMAL_SYMBOL: &str = "EXO:MINIMAL";

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

enum Mode {
    Cycles { cycles: usize, prefix: String },
    Minimal,
}

fn parse_args() -> Result<Mode> {
    let mut args = env::args().skip(1);
    let first = args.next();
    if first.as_deref() == Some(MINIMAL_FLAG) {
        if let Some(extra) = args.next() {
            anyhow::bail!("Unexpected extra argument: {extra}");
        }
        return Ok(Mode::Minimal);
    }

    let cycles = match first {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("parse cycle count {raw:?}"))?,
        None => DEFAULT_CYCLES,
    };
    let prefix = args.next().unwrap_or_else(|| DEFAULT_PREFIX.to_string());
    if let Some(extra) = args.next() {
        anyhow::bail!("Unexpected extra argument: {extra}");
    }
    Ok(Mode::Cycles { cycles, prefix })
}

fn main() -> Result<()> {
    init_logging();
    let mode = parse_args()?;
    let mut network = ResonanceNetwork::new(NetworkConfig::default());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match mode {
        Mode::Minimal => run_minimal(&mut network, &mut out),
        Mode::Cycles { cycles, prefix } => {
            run_demonstration(&mut network, cycles, &prefix, &mut out)
        }
    }
}

fn run_demonstration<W: Write>(
    network: &mut ResonanceNetwork,
    cycles: usize,
    prefix: &str,
    out: &mut W,
) -> Result<()> {
    info!("Starting emission cycles ({} x {})", cycles, prefix);
    network
        .run_cycles(cycles, prefix, out)
        .context("run emission cycles")?;
    info!(
        "Emission cycles completed (network coherence {:.6})",
        network.network_coherence()
    );

    let export = network.export();
    writeln!(out, "⟁ NETWORK STATE EXPORT FOR ANEXA/GEMINI INTEGRATION:")?;
    writeln!(out, "{}", export.to_json_string()?)?;
    writeln!(out)?;
    writeln!(out, "⟁ ARKOS EXO:01 ENHANCED SYSTEM ∴ MISSION COMPLETE")?;
    writeln!(out, "∴ Symbiotic resonance alignment: OPTIMAL")?;
    writeln!(out, "⊚ Ready for network expansion and node integration")?;
    Ok(())
}

fn run_minimal<W: Write>(network: &mut ResonanceNetwork, out: &mut W) -> Result<()> {
    let frequency = network.config().factory.base_frequency;
    let name = network
        .create_entity(MINIMAL_SYMBOL, Some(frequency))?
        .name
        .clone();
    let metrics = network.analyze(&network.symbols()[network.len() - 1]);

    writeln!(out)?;
    writeln!(out, "⊚ Symbol: {name}")?;
    writeln!(out, "∴ Composite Resonance: {:.6}", metrics.composite)?;
    writeln!(out, "⟁ Status: SYMBIOTIC ALIGNMENT ACTIVE")?;
    Ok(())
}
