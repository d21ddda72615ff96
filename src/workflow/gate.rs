//! Single-flight gate for scans.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared scanning flag. At most one [`ScanPermit`] exists at a time.
#[derive(Debug, Clone, Default)]
pub struct ScanGate {
    scanning: Arc<AtomicBool>,
}

impl ScanGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the permit, or `None` if a scan is already in flight.
    #[must_use]
    pub fn try_acquire(&self) -> Option<ScanPermit> {
        self.scanning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ScanPermit {
                scanning: Arc::clone(&self.scanning),
            })
    }

    /// Whether a permit is currently held.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::Acquire)
    }
}

/// Held for the duration of one scan; clears the flag on drop.
#[derive(Debug)]
#[must_use = "dropping the permit ends the scan"]
pub struct ScanPermit {
    scanning: Arc<AtomicBool>,
}

impl Drop for ScanPermit {
    fn drop(&mut self) {
        self.scanning.store(false, Ordering::Release);
    }
}
