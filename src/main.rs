use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use hostpulse::{Monitor, MonitorConfig, MonitorPhase, PublishedState};
use hostpulse::format::{format_gb, format_percent};

/// Plain-text readout of the published monitor state. This binary is the
/// stand-in presentation layer: it only reads the watch channel and prints.
#[derive(Parser)]
#[command(name = "hostpulse", about = "Background host resource monitor")]
struct Cli {
    /// Emit each published state as one JSON line.
    #[arg(long)]
    json: bool,

    /// Exit after printing the first completed sample.
    #[arg(long)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let monitor = Monitor::spawn(MonitorConfig::default());
    let mut state = monitor.state();

    // Wait out initialization, then print each published sample.
    while state.borrow().phase != MonitorPhase::Running {
        state.changed().await?;
    }

    loop {
        state.changed().await?;
        let snapshot = state.borrow().clone();
        if cli.json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            print_readout(&snapshot);
        }
        if cli.once {
            break;
        }
    }

    Ok(())
}

fn print_readout(state: &PublishedState) {
    println!(
        "cpu {} ({} cores{})  mem {} / {}",
        format_percent(state.cpu_load_percent),
        state.core_count,
        if state.is_aarch64 { ", aarch64" } else { "" },
        format_gb(state.memory_used_gb),
        format_gb(state.memory_total_gb),
    );
    for volume in &state.volumes {
        println!(
            "  {}  {} used of {} ({})",
            volume.path,
            format_gb(volume.used_space_gb()),
            format_gb(volume.capacity_gb),
            format_percent(volume.percent_used),
        );
    }
}
