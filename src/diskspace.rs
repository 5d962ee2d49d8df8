//! Advisory free-space preflight for the output directory.
//!
//! The check races with the writes that follow it; write failures are still
//! reported by the split loop itself.

use std::io;
use std::path::Path;

use sysinfo::Disks;

use crate::error::{ErrorKind, Result, SplitError};

pub trait FreeSpaceProbe {
    /// Bytes available to the caller on the filesystem holding `dir`.
    fn available_bytes(&self, dir: &Path) -> io::Result<u64>;
}

/// Probe backed by the mounted disks the OS reports.
#[derive(Default)]
pub struct SystemProbe;

impl FreeSpaceProbe for SystemProbe {
    fn available_bytes(&self, dir: &Path) -> io::Result<u64> {
        let dir = dir.canonicalize()?;
        let disks = Disks::new_with_refreshed_list();
        let best = disks
            .list()
            .iter()
            .filter(|d| dir.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().components().count());
        // no known mount point: nothing to compare against
        Ok(best.map(|d| d.available_space()).unwrap_or(u64::MAX))
    }
}

/// Probe reporting a fixed budget regardless of directory.
#[derive(Clone, Copy, Debug)]
pub struct FixedProbe(pub u64);

impl FreeSpaceProbe for FixedProbe {
    fn available_bytes(&self, _dir: &Path) -> io::Result<u64> {
        Ok(self.0)
    }
}

pub struct DiskSpaceGuard {
    probe: Box<dyn FreeSpaceProbe>,
}

impl DiskSpaceGuard {
    pub fn new(probe: Box<dyn FreeSpaceProbe>) -> Self {
        Self { probe }
    }

    pub fn check(&self, out_dir: &Path, required: u64) -> Result<()> {
        let available = self
            .probe
            .available_bytes(out_dir)
            .map_err(|e| SplitError::io("query free space of", out_dir, e))?;
        if required > available {
            return Err(SplitError::new(
                ErrorKind::InsufficientSpace,
                format!(
                    "no free space available: {} needs {} bytes, {} available",
                    out_dir.display(),
                    required,
                    available
                ),
            ));
        }
        Ok(())
    }
}

impl Default for DiskSpaceGuard {
    fn default() -> Self {
        Self::new(Box::new(SystemProbe))
    }
}
