//! Compare phase: decide which manifest patches must be fetched again
//!
//! The cheap directory pass settles most of `data/win32` at once; whatever it
//! leaves pending is checked file by file on a worker pool.

use crate::config::{CompareOptions, InstallLayout};
use crate::error::Result;
use crate::events::CompareProgressEvent;
use crate::file_time::FileTime;
use crate::freshness::{compare_file_time, preprocess_patches, DATA_WIN32_PREFIX, PATCH_SUFFIX};
use crate::record::{PatchRecord, PatchRecordSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use tracing::{debug, info};

/// One entry of the patch manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchInfo {
    /// Manifest name, e.g. `data/win32/0a1b2c.pat`
    pub name: String,
    pub hash: String,
}

/// What the cache remembers about a previously verified patch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchCacheEntry {
    pub name: String,
    pub hash: String,
    pub last_write_time: FileTime,
}

/// Cache contents keyed by manifest name
pub type PatchCache = HashMap<String, PatchCacheEntry>;

pub struct ComparePhase {
    layout: InstallLayout,
    options: CompareOptions,
    progress: Option<Sender<CompareProgressEvent>>,
}

impl ComparePhase {
    pub fn new(layout: InstallLayout, options: CompareOptions) -> Self {
        Self {
            layout,
            options,
            progress: None,
        }
    }

    pub fn with_progress(mut self, sender: Sender<CompareProgressEvent>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Return the patches that are stale, in manifest order
    pub fn run(&self, patches: &[PatchInfo], cache: &PatchCache) -> Result<Vec<PatchInfo>> {
        info!("Building patch records");
        // The directory pass only sees timestamps, so a patch whose hash moved
        // on must not get a record it could be satisfied through
        let mut records: PatchRecordSet = patches
            .iter()
            .filter_map(|patch| {
                cache
                    .get(&patch.name)
                    .filter(|entry| entry.hash == patch.hash)
                    .map(|entry| (patch.name.clone(), PatchRecord::pending(entry.last_write_time)))
            })
            .collect();

        info!("Pre-processing patches");
        let summary = preprocess_patches(&mut records, &self.layout.bin_directory)?;
        debug!(
            "{} of {} cached records already up to date",
            summary.records_satisfied,
            records.len()
        );

        // Uncached patches have no record and always go through the full check
        let working: Vec<&PatchInfo> = patches
            .iter()
            .filter(|patch| {
                records
                    .get(&patch.name)
                    .map(PatchRecord::needs_update)
                    .unwrap_or(true)
            })
            .collect();
        let total = working.len();

        info!("Comparing files");
        self.emit(CompareProgressEvent::Started { total });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.threads)
            .thread_name(|i| format!("compare-{}", i))
            .build()?;

        let completed = AtomicUsize::new(0);
        let stale_flags: Vec<bool> = pool.install(|| {
            working
                .par_iter()
                .map(|patch| {
                    let stale = self.is_stale(patch, cache);
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    self.emit(CompareProgressEvent::Progress {
                        completed: done,
                        total,
                    });
                    stale
                })
                .collect()
        });

        let stale: Vec<PatchInfo> = working
            .into_iter()
            .zip(stale_flags)
            .filter(|(_, stale)| *stale)
            .map(|(patch, _)| patch.clone())
            .collect();

        info!("{} of {} patches need updating", stale.len(), patches.len());
        self.emit(CompareProgressEvent::Finished { stale: stale.len() });

        Ok(stale)
    }

    fn is_stale(&self, patch: &PatchInfo, cache: &PatchCache) -> bool {
        let relative = local_relative_path(&patch.name);

        if self.options.mod_files_enabled && self.is_shadowed_by_mod(&relative) {
            debug!("Skipping {}, overridden by mods directory", patch.name);
            return false;
        }

        let Some(entry) = cache.get(&patch.name) else {
            return true;
        };

        if entry.hash != patch.hash {
            return true;
        }

        !compare_file_time(self.local_path(&relative), entry.last_write_time)
    }

    /// A file directly in `data/win32` with a same-named copy under mods
    fn is_shadowed_by_mod(&self, relative: &str) -> bool {
        match relative.strip_prefix(DATA_WIN32_PREFIX) {
            Some(file_name) if !file_name.is_empty() && !file_name.contains('/') => {
                self.layout.mods_directory.join(file_name).exists()
            }
            _ => false,
        }
    }

    fn local_path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.layout.bin_directory.clone(), |path, part| path.join(part))
    }

    fn emit(&self, event: CompareProgressEvent) {
        if let Some(sender) = &self.progress {
            // Receiver may have gone away; progress is best-effort
            let _ = sender.send(event);
        }
    }
}

/// Manifest name to the lowercase, `/`-separated path of the file on disk
fn local_relative_path(name: &str) -> String {
    name.strip_suffix(PATCH_SUFFIX).unwrap_or(name).to_lowercase()
}
