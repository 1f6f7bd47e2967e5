//! The Pipeline Supervisor: wires Capture, Analyser, Effect Engine, and
//! Scheduler into one running session, and exposes the small event stream
//! an embedder (this CLI, a future GUI, or a test harness) watches.
//!
//! Lifecycle mirrors a typical realtime processing run loop, but the
//! work is split across the dedicated threads each stage already owns
//! (`lumensync_io::Capture`, `lumensync_scheduler::Scheduler`) plus one more
//! thread here that pumps Analyser -> Effect Engine -> Scheduler.

use lumensync_analysis::{Analyser, AnalyserConfig};
use lumensync_config::PipelineConfig;
use lumensync_core::{AudioFeatures, DeviceId, DeviceState, Preset};
use lumensync_devices::LightingBackend;
use lumensync_effects::EffectEngine;
use lumensync_io::{Capture, CaptureConfig, CpalCaptureBackend};
use lumensync_scheduler::{DeviceSpec, Scheduler, SchedulerConfig, SchedulerEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// One lighting device the supervisor should target, as supplied by the embedder.
pub struct DeviceHandle {
    pub id: DeviceId,
    pub backend: Box<dyn LightingBackend>,
    pub rate_cps: f32,
    pub burst: u32,
}

/// Events the supervisor surfaces to whatever embeds it.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    CaptureError,
    AnalysisFrame { features: AudioFeatures },
    DeviceError { id: DeviceId, detail: String },
    DeviceStateChange { id: DeviceId, from: DeviceState, to: DeviceState },
}

/// A running audio-to-light session: owns the capture/scheduler threads
/// indirectly through one supervising pump thread, and the active preset
/// through a shared [`EffectEngine`].
pub struct Pipeline {
    config: PipelineConfig,
    running: Arc<AtomicBool>,
    pump: Option<JoinHandle<()>>,
    engine: Arc<Mutex<EffectEngine>>,
    device_specs: Vec<(DeviceId, f32, u32)>,
    events_tx: SyncSender<PipelineEvent>,
    events_rx: Option<Receiver<PipelineEvent>>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let (events_tx, events_rx) = sync_channel(256);
        let engine = EffectEngine::new(config.effect.dead_band_rgb, config.effect.dead_band_brightness);
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            pump: None,
            engine: Arc::new(Mutex::new(engine)),
            device_specs: Vec::new(),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Take the event receiver. Only the first caller gets it.
    pub fn events(&mut self) -> Option<Receiver<PipelineEvent>> {
        self.events_rx.take()
    }

    /// Construct queues, spawn Capture/Analyser/Effect Engine/Scheduler, wire them, and return.
    pub fn start(&mut self, preset: Preset, devices: Vec<DeviceHandle>) -> anyhow::Result<()> {
        if self.pump.is_some() {
            anyhow::bail!("pipeline is already running");
        }

        self.engine.lock().unwrap().replace_preset(preset);
        self.device_specs = devices.iter().map(|d| (d.id.clone(), d.rate_cps, d.burst)).collect();
        let device_ids: Vec<DeviceId> = self.device_specs.iter().map(|(id, ..)| id.clone()).collect();

        let specs: Vec<DeviceSpec> = devices
            .into_iter()
            .map(|d| DeviceSpec { id: d.id, backend: d.backend, rate_cps: d.rate_cps, burst: d.burst })
            .collect();

        let (scheduler_events_tx, scheduler_events_rx) = sync_channel(256);
        let scheduler = Scheduler::start(
            specs,
            SchedulerConfig { outbox_capacity: self.config.scheduler.outbox_size },
            scheduler_events_tx,
        );

        let capture_config = CaptureConfig {
            sample_rate: self.config.audio.sample_rate,
            channels: 2,
            frame_size: self.config.audio.frame_size,
            hop_size: self.config.audio.hop_size,
            drop_policy: self.config.audio.drop_policy.clone().into(),
        };
        let capture = Capture::start(CpalCaptureBackend::new(), capture_config, 64);

        let analyser_config = AnalyserConfig {
            frame_size: self.config.audio.frame_size,
            beat_history_window: self.config.beat.history_window,
            beat_sensitivity: self.config.beat.sensitivity,
            beat_min_interval_ms: u64::from(self.config.beat.min_interval_ms),
            tempo_history_window: self.config.tempo.history_window,
        };

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let engine = Arc::clone(&self.engine);
        let events_tx = self.events_tx.clone();

        self.pump = Some(std::thread::spawn(move || {
            run_pump_loop(capture, scheduler, scheduler_events_rx, analyser_config, engine, device_ids, running, events_tx);
        }));

        Ok(())
    }

    /// Atomic swap of the active preset; no queue flush.
    pub fn replace_preset(&mut self, preset: Preset) {
        self.engine.lock().unwrap().replace_preset(preset);
    }

    /// Dynamic device-set growth isn't supported by the Scheduler's current
    /// API (it takes its device list once, at `start`); the caller must
    /// `stop()` and `start()` again with the new device list.
    pub fn add_device(&self, device: &DeviceHandle) -> anyhow::Result<()> {
        anyhow::bail!("adding device {} requires stopping and restarting the pipeline with the new device list", device.id)
    }

    pub fn remove_device(&self, id: &DeviceId) -> anyhow::Result<()> {
        anyhow::bail!("removing device {id} requires stopping and restarting the pipeline with the remaining device list")
    }

    /// Signal Capture to stop producing, drain the Analyser/Scheduler within
    /// their deadlines, then join everything.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(pump) = self.pump.take() {
            let _ = pump.join();
        }
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Deadline the pump loop allows itself to drain in-flight scheduler events
/// after `running` flips false, before dropping Capture/Scheduler outright.
const DRAIN_DEADLINE: Duration = Duration::from_millis(500);

#[allow(clippy::too_many_arguments)]
fn run_pump_loop(
    capture: Capture,
    scheduler: Scheduler,
    scheduler_events: Receiver<SchedulerEvent>,
    analyser_config: AnalyserConfig,
    engine: Arc<Mutex<EffectEngine>>,
    device_ids: Vec<DeviceId>,
    running: Arc<AtomicBool>,
    events_tx: SyncSender<PipelineEvent>,
) {
    let mut analyser = Analyser::new(analyser_config);
    let mut device_states: std::collections::HashMap<DeviceId, DeviceState> =
        device_ids.iter().map(|id| (id.clone(), DeviceState::Connected)).collect();

    while running.load(Ordering::SeqCst) {
        if let Some(block) = capture.recv(Duration::from_millis(100)) {
            let features = analyser.process(&block);
            let _ = events_tx.try_send(PipelineEvent::AnalysisFrame { features: features.clone() });

            let commands = engine.lock().unwrap().evaluate(&features, &device_ids);
            for command in commands {
                scheduler.submit(command);
            }
        }

        drain_scheduler_events(&scheduler_events, &engine, &mut device_states, &events_tx);
    }

    let deadline = std::time::Instant::now() + DRAIN_DEADLINE;
    while std::time::Instant::now() < deadline {
        if scheduler_events.recv_timeout(Duration::from_millis(20)).is_err() {
            break;
        }
    }

    drop(capture);
    drop(scheduler);
}

fn drain_scheduler_events(
    scheduler_events: &Receiver<SchedulerEvent>,
    engine: &Arc<Mutex<EffectEngine>>,
    device_states: &mut std::collections::HashMap<DeviceId, DeviceState>,
    events_tx: &SyncSender<PipelineEvent>,
) {
    while let Ok(event) = scheduler_events.try_recv() {
        match event {
            SchedulerEvent::Dispatched { device_id, snapshot } => {
                engine.lock().unwrap().confirm_dispatch(&device_id, snapshot);
            }
            SchedulerEvent::DeviceDegraded { device_id } => {
                let from = device_states.get(&device_id).copied().unwrap_or(DeviceState::Connected);
                device_states.insert(device_id.clone(), DeviceState::Degraded);
                let _ = events_tx.try_send(PipelineEvent::DeviceStateChange { id: device_id, from, to: DeviceState::Degraded });
            }
            SchedulerEvent::DeviceError { device_id, detail } => {
                let _ = events_tx.try_send(PipelineEvent::DeviceError { id: device_id, detail });
            }
        }
    }
}
