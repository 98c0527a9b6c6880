//! Graceful shutdown handling for the application.
//!
//! Provides signal handling and the cleanup run once the game has stopped.

use anyhow::{Context, Result};
use savanna_core::WorldSnapshot;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Manages graceful shutdown of the application.
pub struct ShutdownManager {
    shutdown_requested: Arc<AtomicBool>,
    snapshot_path: Option<PathBuf>,
    exit_code: i32,
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown_requested: Arc::new(AtomicBool::new(false)),
            snapshot_path: None,
            exit_code: 0,
        }
    }

    /// Where the final world snapshot is written on exit. `None` skips it.
    pub fn set_snapshot_path(&mut self, path: Option<PathBuf>) {
        self.snapshot_path = path;
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        tracing::info!("Shutdown requested");
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    /// Sets the shutdown flag on Ctrl+C. Must be called inside a tokio runtime.
    pub fn listen_for_ctrl_c(&self) {
        let flag = Arc::clone(&self.shutdown_requested);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Ctrl+C received, initiating graceful shutdown...");
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    pub fn set_exit_code(&mut self, code: i32) {
        self.exit_code = code;
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Writes the final snapshot, if one was asked for and there is a world to save.
    pub fn cleanup(&self, snapshot: Option<&WorldSnapshot>) -> Result<()> {
        tracing::info!("Performing shutdown cleanup...");

        if let (Some(path), Some(snapshot)) = (&self.snapshot_path, snapshot) {
            std::fs::write(path, snapshot.to_json()?)
                .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
            tracing::info!(path = %path.display(), tick = snapshot.tick, "Snapshot saved");
        }

        tracing::info!("Cleanup complete");
        Ok(())
    }
}
