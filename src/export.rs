use anyhow::Context;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: usize,
}

/// Writes an export artifact into `out_dir`, creating the directory if
/// needed. An existing file with the same name is overwritten.
pub fn write_export(
    out_dir: &Path,
    file_name: &str,
    contents: &[u8],
) -> anyhow::Result<ExportedFile> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create directory {}", out_dir.to_string_lossy()))?;

    let path = out_dir.join(file_name);
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write export file {}", path.to_string_lossy()))?;

    let bytes = contents.len();
    info!("exported {} ({bytes} bytes)", path.to_string_lossy());
    Ok(ExportedFile {
        path,
        file_name: file_name.to_string(),
        bytes,
    })
}
