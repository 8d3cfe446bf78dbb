//! # Runtime
//!
//! Tokio runtime presets shared by the recap binaries.
//!
//! * [`RuntimeConfig::service`] backs the long-running HTTP server.
//! * [`RuntimeConfig::batch`] backs one-shot command line runs, which mostly
//!   wait on upstream HTTP calls and need few threads.
//!
//! ```rust,ignore
//! #[recap_runtime::main(batch)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use recap_derive::main;

use anyhow::Context;
use std::num::NonZero;
use std::thread::available_parallelism;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

const FALLBACK_WORKERS: usize = 4;
const MAX_WORKERS: usize = 512;
const MIN_STACK_SIZE: usize = 1024 * 1024;
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;
const BATCH_WORKERS: usize = 2;

/// Detected worker count, honoring `TOKIO_WORKER_THREADS` when it is a sane number.
fn detected_workers() -> usize {
    std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&n| (1..=MAX_WORKERS).contains(&n))
        .unwrap_or_else(|| available_parallelism().map_or(FALLBACK_WORKERS, NonZero::get))
}

/// Runtime settings. Values are clamped when the runtime is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: detected_workers(),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: "recap-worker".to_owned(),
            thread_keep_alive: Duration::from_secs(60),
        }
    }
}

impl RuntimeConfig {
    /// Preset for the HTTP server: every core, longer-lived idle threads.
    #[must_use]
    pub fn service() -> Self {
        Self {
            thread_name: "recap-service".to_owned(),
            thread_keep_alive: Duration::from_secs(300),
            ..Self::default()
        }
    }

    /// Preset for a single report run.
    #[must_use]
    pub fn batch() -> Self {
        Self {
            worker_threads: detected_workers().min(BATCH_WORKERS),
            thread_name: "recap-batch".to_owned(),
            thread_keep_alive: Duration::from_secs(10),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKERS);
        self
    }

    #[must_use]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.thread_name = name;
        }
        self
    }
}

/// Builds a multi-threaded runtime with I/O and timers enabled.
///
/// # Errors
/// Fails when the OS refuses to spawn the worker threads.
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let workers = config.worker_threads.clamp(1, MAX_WORKERS);
    let stack = config.stack_size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
    debug!(workers, stack, name = %config.thread_name, "Building tokio runtime");

    Builder::new_multi_thread()
        .worker_threads(workers)
        .thread_stack_size(stack)
        .thread_name(config.thread_name.clone())
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all()
        .build()
        .context("Failed to initialize the tokio runtime")
}
