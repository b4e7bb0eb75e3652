use crate::cli::ExportFormat;
use crate::error::{MicroBioError, Result};
use microbiobase_common::export::{excel_core, favorites_json};
use microbiobase_common::CanonicalItem;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used when the output is a directory or omitted
pub const DEFAULT_FILE_STEM: &str = "microbiobase-favorites";

fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_FILE_STEM, extension))
    } else {
        output.to_path_buf()
    }
}

/// Write the favorited items to `output`
///
/// The whole file is built in memory first, so a failed export leaves
/// nothing on disk.
pub fn export_favorites(
    items: &[&CanonicalItem],
    format: &ExportFormat,
    output: &Path,
    title: &str,
    generated_at: &str,
) -> Result<PathBuf> {
    if items.is_empty() {
        return Err(MicroBioError::NoFavorites);
    }

    let output_path = output_path_for_format(output, format.extension());

    let bytes = match format {
        ExportFormat::Xlsx => excel_core::generate_favorites_workbook(items, title, generated_at)
            .map_err(|e| MicroBioError::Export(e.to_string()))?,
        ExportFormat::Json => favorites_json(items)
            .map_err(|e| MicroBioError::Export(e.to_string()))?
            .into_bytes(),
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output_path, bytes)
        .map_err(|e| MicroBioError::Export(format!("{}: {}", output_path.display(), e)))?;

    info!(path = %output_path.display(), count = items.len(), "favorites exported");
    Ok(output_path)
}
