use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

const OUTPUT_TAG: &str = "PortfolioIQ";

/// Output path next to `input`: `<stem>_PortfolioIQ_<YYYYMMDD_HHMMSS>.<ext>`.
/// Inputs without an extension get `.xlsx`.
pub fn timestamped_path(input: &Path, now: NaiveDateTime) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "xlsx".to_string());
    let filename = format!(
        "{}_{}_{}.{}",
        stem,
        OUTPUT_TAG,
        now.format("%Y%m%d_%H%M%S"),
        ext
    );
    input.with_file_name(filename)
}
