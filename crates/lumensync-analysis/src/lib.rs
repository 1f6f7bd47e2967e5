//! Streaming DSP analyser: turns `AudioBlock`s into `AudioFeatures`.
//!
//! - [`fft`] - windowed FFT front-end (4-term Blackman-Harris, power-of-two sizes)
//! - [`bands`] - 12-band energy accumulator with peak normalisation
//! - [`spectrum`] - centroid/rolloff/flux descriptors over raw FFT magnitudes
//! - [`beat`] - adaptive-threshold beat detector
//! - [`tempo`] - median-interval tempo estimator
//! - [`analyser`] - orchestrates the above into one [`Analyser::process`] call per block
//!
//! ## Example
//!
//! ```rust,ignore
//! use lumensync_analysis::{Analyser, AnalyserConfig};
//!
//! let mut analyser = Analyser::new(AnalyserConfig::default());
//! let features = analyser.process(&block);
//! ```

pub mod analyser;
pub mod bands;
pub mod beat;
pub mod fft;
pub mod spectrum;
pub mod tempo;

pub use analyser::{Analyser, AnalyserConfig};
pub use bands::BandAccumulator;
pub use beat::{BeatDetector, BeatResult};
pub use tempo::TempoEstimator;
