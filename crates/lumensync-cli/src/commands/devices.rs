//! Lighting device discovery command.
//!
//! Scans the network with each wire-protocol backend and reports what it
//! finds, indexed the same way a capture-device listing would be.

use clap::{Args, Subcommand, ValueEnum};
use lumensync_devices::{DiscoveredDevice, HueHttp, KasaTcp, LightingBackend, MagicHomeTcp};
use std::time::Duration;

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// Scan the network for lighting devices
    List {
        /// Restrict the scan to one backend
        #[arg(long, value_enum)]
        backend: Option<BackendKind>,

        /// Discovery timeout in seconds
        #[arg(long, default_value_t = 5)]
        timeout: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendKind {
    Hue,
    Kasa,
    Magichome,
}

impl BackendKind {
    fn label(self) -> &'static str {
        match self {
            BackendKind::Hue => "hue",
            BackendKind::Kasa => "kasa",
            BackendKind::Magichome => "magichome",
        }
    }

    fn backend(self) -> Box<dyn LightingBackend> {
        match self {
            BackendKind::Hue => Box::new(HueHttp::new("1")),
            BackendKind::Kasa => Box::new(KasaTcp::new()),
            BackendKind::Magichome => Box::new(MagicHomeTcp::new()),
        }
    }
}

const ALL_BACKENDS: [BackendKind; 3] = [BackendKind::Hue, BackendKind::Kasa, BackendKind::Magichome];

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List { backend: None, timeout: 5 }) {
        DevicesCommand::List { backend, timeout } => list_devices(backend, timeout),
    }
}

fn list_devices(backend: Option<BackendKind>, timeout_secs: u64) -> anyhow::Result<()> {
    let timeout = Duration::from_secs(timeout_secs);
    let kinds: &[BackendKind] = backend.as_ref().map_or(&ALL_BACKENDS[..], std::slice::from_ref);

    println!("Scanning for lighting devices ({}s timeout)...", timeout_secs);
    println!();

    let mut total = 0usize;
    for kind in kinds {
        let backend = kind.backend();
        match backend.discover(timeout) {
            Ok(found) if found.is_empty() => {
                println!("{}: no devices found", kind.label());
            }
            Ok(found) => {
                println!("{} ({} found):", kind.label(), found.len());
                print_found(&found);
                total += found.len();
            }
            Err(e) => {
                println!("{}: scan failed ({})", kind.label(), e);
            }
        }
        println!();
    }

    println!("Total: {} device(s) found", total);
    if total == 0 {
        println!();
        println!("Tip: Hue bridges require a button press on the bridge within ~30s of the first pairing attempt.");
    }

    Ok(())
}

fn print_found(devices: &[DiscoveredDevice]) {
    for (idx, device) in devices.iter().enumerate() {
        let label = device.label.as_deref().unwrap_or("(unnamed)");
        println!("  [{}] {} @ {}", idx, label, device.address);
    }
}
