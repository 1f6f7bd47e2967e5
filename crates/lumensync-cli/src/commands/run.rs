//! Drives the Pipeline Supervisor: load config/preset, discover or address
//! devices, run until Ctrl-C, then shut down within the documented deadlines.

use crate::pipeline::{DeviceHandle, Pipeline, PipelineEvent};
use clap::Args;
use lumensync_config::PipelineConfig;
use lumensync_core::{DeviceId, DeviceKind};
use lumensync_devices::{HueHttp, KasaTcp, MagicHomeTcp};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args)]
pub struct RunArgs {
    /// Preset name or path to run
    preset: String,

    /// Path to a `lumensync.toml` config file (defaults are used if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// `kind:address` pairs, e.g. `hue:192.168.1.20` or `kasa:192.168.1.21`
    #[arg(long = "device", value_parser = parse_device)]
    devices: Vec<(DeviceKind, String)>,
}

fn parse_device(s: &str) -> Result<(DeviceKind, String), String> {
    let (kind, address) = s.split_once(':').ok_or_else(|| format!("invalid device spec '{s}' (expected kind:address)"))?;
    let kind = match kind.to_lowercase().as_str() {
        "hue" => DeviceKind::Hue,
        "kasa" => DeviceKind::Kasa,
        "magichome" => DeviceKind::MagicHome,
        other => return Err(format!("unknown device kind '{other}' (expected hue, kasa, or magichome)")),
    };
    Ok((kind, address.to_string()))
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let preset_file = super::common::load_preset(&args.preset)?;
    let preset = preset_file.to_preset();

    let mut handles = Vec::new();
    for (idx, (kind, address)) in args.devices.iter().enumerate() {
        let id = DeviceId::new(format!("{}-{idx}", kind.as_str()));
        let (mut backend, rate_cps, burst) = build_backend(*kind, &config);
        backend.connect(address).map_err(|e| anyhow::anyhow!("failed to connect to {id}: {e}"))?;
        handles.push(DeviceHandle { id, backend, rate_cps, burst });
    }

    if handles.is_empty() {
        anyhow::bail!("no devices specified; pass one or more --device kind:address");
    }

    let mut pipeline = Pipeline::new(config);
    let events = pipeline.events().expect("events receiver not yet taken");
    pipeline.start(preset, handles)?;

    println!("Running '{}'. Press Ctrl-C to stop.", args.preset);

    let running = Arc::new(AtomicBool::new(true));
    let ctrlc_running = Arc::clone(&running);
    ctrlc::set_handler(move || ctrlc_running.store(false, Ordering::SeqCst))?;

    while running.load(Ordering::SeqCst) {
        match events.recv_timeout(Duration::from_millis(200)) {
            Ok(PipelineEvent::DeviceError { id, detail }) => {
                tracing::warn!(device_id = %id, %detail, "device error");
            }
            Ok(PipelineEvent::DeviceStateChange { id, from, to }) => {
                tracing::info!(device_id = %id, ?from, ?to, "device state changed");
            }
            Ok(PipelineEvent::CaptureError) => {
                tracing::warn!("capture error");
            }
            Ok(PipelineEvent::AnalysisFrame { .. }) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    println!("Stopping...");
    pipeline.stop();
    Ok(())
}

fn build_backend(kind: DeviceKind, config: &PipelineConfig) -> (Box<dyn lumensync_devices::LightingBackend>, f32, u32) {
    match kind {
        DeviceKind::Hue => (Box::new(HueHttp::new("1")), config.device.hue.rate_cps, config.device.hue.burst),
        DeviceKind::Kasa => (Box::new(KasaTcp::new()), config.device.kasa.rate_cps, config.device.kasa.burst),
        DeviceKind::MagicHome => (Box::new(MagicHomeTcp::new()), config.device.magichome.rate_cps, config.device.magichome.burst),
    }
}
