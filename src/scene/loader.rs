//! Background asset loading with integer-percent progress.
//!
//! Reading happens on a worker thread in small chunks so the UI can show
//! a moving percentage on multi-megabyte `.glb` files; the parsed asset
//! comes back over a channel and is polled from the frame loop.

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::scene::asset::ParkAsset;

/// Chunk size for progress-reporting reads.
const READ_CHUNK: usize = 64 * 1024;

/// Handle to a load running on a background thread. Dropping it abandons
/// the load; the worker's final send fails silently and its result is
/// discarded.
pub struct AssetLoad {
    path: PathBuf,
    percent: Arc<AtomicU8>,
    receiver: Receiver<Result<ParkAsset>>,
}

/// Start loading `path` on a worker thread.
pub fn begin_load(path: &Path) -> AssetLoad {
    let (sender, receiver) = mpsc::channel();
    let percent = Arc::new(AtomicU8::new(0));

    let worker_percent = Arc::clone(&percent);
    let worker_path = path.to_path_buf();
    thread::spawn(move || {
        let result = read_and_parse(&worker_path, &worker_percent);
        match &result {
            Ok(asset) => log::info!(
                "loaded {}: {} nodes, {} meshes, {} triangles",
                asset.label(),
                asset.node_count(),
                asset.mesh_count(),
                asset.triangle_count()
            ),
            Err(err) => log::error!("asset load failed: {err:#}"),
        }
        let _ = sender.send(result);
    });

    AssetLoad {
        path: path.to_path_buf(),
        percent,
        receiver,
    }
}

impl AssetLoad {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Integer percent of the file read so far; 100 only once parsing has
    /// also finished.
    pub fn percent(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }

    /// Non-blocking poll. Returns the load result once the worker is
    /// done, None while it is still running.
    pub fn try_finish(&self) -> Option<Result<ParkAsset>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(anyhow!("loader thread exited without a result")))
            }
        }
    }
}

fn read_and_parse(path: &Path, percent: &AtomicU8) -> Result<ParkAsset> {
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let file =
        File::open(path).with_context(|| format!("failed to open asset {}", path.display()))?;
    let total = file
        .metadata()
        .with_context(|| format!("failed to stat asset {}", path.display()))?
        .len();

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::with_capacity(total as usize);
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let read = reader
            .read(&mut chunk)
            .with_context(|| format!("failed to read asset {}", path.display()))?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read]);
        if total > 0 {
            // Hold at 99 until the parse below also succeeds.
            let pct = (bytes.len() as u64 * 100 / total).min(99) as u8;
            percent.store(pct, Ordering::Relaxed);
        }
    }

    let asset = ParkAsset::from_slice(label, &bytes)?;
    percent.store(100, Ordering::Relaxed);
    Ok(asset)
}
