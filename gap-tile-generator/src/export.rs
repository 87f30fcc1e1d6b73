use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use ndarray_npy::write_npy;
use rayon::prelude::*;

use crate::error::{Result, TileError};
use crate::provider::BatchSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub batches_written: usize,
    pub tiles_written: usize,
}

pub fn images_file_name(batch_index: usize) -> String {
    format!("images_B{}.npy", batch_index)
}

pub fn masks_file_name(batch_index: usize) -> String {
    format!("masks_B{}.npy", batch_index)
}

/// Fetches every batch of `source` and writes `images_B{i}.npy` (n, T, T, 5)
/// and `masks_B{i}.npy` (n, T, T) into `out_dir`. Batches are fetched and
/// written in parallel; empty batches produce no files.
pub fn export_batches<S>(source: &S, out_dir: &Path, show_progress: bool) -> Result<ExportSummary>
where
    S: BatchSource + Sync,
{
    fs::create_dir_all(out_dir).map_err(|source| TileError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let n_batches = source.len();
    let pb = if show_progress {
        ProgressBar::new(n_batches as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}/{len:3} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    info!("Exporting {} batches to {:?}", n_batches, out_dir);
    let results: Vec<Result<usize>> = (0..n_batches)
        .into_par_iter()
        .map(|i| {
            let written = write_batch(source, out_dir, i);
            pb.inc(1);
            if let Err(e) = &written {
                error!("Batch #{} failed: {}", i, e);
            }
            written
        })
        .collect();

    let mut summary = ExportSummary {
        output_dir: out_dir.to_path_buf(),
        batches_written: 0,
        tiles_written: 0,
    };
    for r in results {
        let n = r?;
        if n > 0 {
            summary.batches_written += 1;
            summary.tiles_written += n;
        }
    }
    pb.finish_with_message("done");
    info!(
        "Wrote {} batches / {} tiles to {:?}",
        summary.batches_written, summary.tiles_written, out_dir
    );
    Ok(summary)
}

fn write_batch<S: BatchSource>(source: &S, out_dir: &Path, i: usize) -> Result<usize> {
    let batch = source.get(i)?;
    if batch.is_empty() {
        info!("Batch #{} has no tiles => skip", i);
        return Ok(0);
    }

    let images_path = out_dir.join(images_file_name(i));
    write_npy(&images_path, &batch.images).map_err(|source| TileError::WriteNpy {
        path: images_path.clone(),
        source,
    })?;
    let masks_path = out_dir.join(masks_file_name(i));
    write_npy(&masks_path, &batch.masks).map_err(|source| TileError::WriteNpy {
        path: masks_path.clone(),
        source,
    })?;

    Ok(batch.len())
}
