//! Storage file naming.
//!
//! Input and output files are keyed by the job ID so that concurrent
//! uploads of identically named videos never collide:
//! `{base}_{job_id}{ext}` for inputs, `{base}_processed_{job_id}.mp4` for
//! outputs and `preview_{job_id}.jpg` for selection previews.

use crate::job::JobId;

/// Upload extensions accepted by the service.
pub const ALLOWED_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

/// Check whether a user-supplied file name carries an allowed extension.
pub fn allowed_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

/// Split a file name into `(base, extension-with-dot)`.
///
/// `"clip.final.MP4"` becomes `("clip.final", ".mp4")`; a name without a
/// dot yields an empty extension.
pub fn split_file_name(file_name: &str) -> (&str, String) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{}", ext.to_ascii_lowercase())),
        _ => (file_name, String::new()),
    }
}

/// Sanitize a user-supplied base name for filesystem use.
///
/// Keeps ASCII alphanumerics, `-`, `_` and `.`; everything else (including
/// path separators) becomes `_`. An all-stripped name falls back to "video".
pub fn sanitize_base_name(base: &str) -> String {
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        "video".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build the stored input file name for a job.
pub fn input_file_name(original_name: &str, job_id: &JobId) -> String {
    let (base, ext) = split_file_name(original_name);
    format!("{}_{}{}", sanitize_base_name(base), job_id, ext)
}

/// Build the processed output file name for a job. Always `.mp4`: the
/// encoder writes an mp4v stream regardless of the input container.
pub fn output_file_name(original_name: &str, job_id: &JobId) -> String {
    let (base, _) = split_file_name(original_name);
    format!("{}_processed_{}.mp4", sanitize_base_name(base), job_id)
}

/// Build the preview JPEG file name for a job.
pub fn preview_file_name(job_id: &JobId) -> String {
    format!("preview_{}.jpg", job_id)
}
