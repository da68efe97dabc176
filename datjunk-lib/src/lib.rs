//! File handling around the reconciliation core: user settings, parallel
//! loading of input DATs and writing of output catalogs.

pub mod emit;
pub mod error;
pub mod loader;
pub mod progress;
pub mod settings;
pub mod worker_pool;

pub use emit::{EmitFailure, EmitReport, Written, emit_outputs};
pub use error::LibError;
pub use loader::{
    AdmissionCounts, InputFile, LoadFailure, LoadOptions, LoadReport, LoadedInput, expand_inputs,
    load_inputs,
};
pub use progress::{LoadProgress, LogProgress, SilentProgress};
pub use settings::{Settings, settings_path};
pub use worker_pool::WorkerPool;
