//! # File I/O Module
//!
//! Job file and report artifact operations:
//! - **Atomic writes**: Write to a sibling `.tmp`, sync, rename into place
//! - **Version validation**: Reject job files from an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use insul_core::calculations::EstimateInput;
//! use insul_core::file_io::{load_job, save_job};
//! use insul_core::job::EstimateJob;
//! use std::path::Path;
//!
//! let job = EstimateJob::new("Sam", "26-001", "Client", EstimateInput::sample());
//! let path = Path::new("job.json");
//!
//! save_job(&job, path).unwrap();
//! let loaded = load_job(path).unwrap();
//! assert_eq!(loaded.meta.job_id, "26-001");
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{EstimateError, EstimateResult};
use crate::job::{EstimateJob, SCHEMA_VERSION};

/// Temp path next to the target: `name.ext` -> `name.ext.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write bytes to `path` with atomic write semantics.
///
/// 1. Write to a temporary file (`.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
///
/// An interrupted write never leaves a truncated artifact behind.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> EstimateResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EstimateError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        EstimateError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        EstimateError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote artifact");
    Ok(())
}

/// Save a job file (pretty JSON, atomic write)
pub fn save_job(job: &EstimateJob, path: &Path) -> EstimateResult<()> {
    let json = serde_json::to_string_pretty(job).map_err(|e| EstimateError::serialization(e.to_string()))?;
    write_artifact(path, json.as_bytes())
}

/// Load a job file.
///
/// # Returns
///
/// * `Ok(EstimateJob)` - Successfully loaded job
/// * `Err(EstimateError::VersionMismatch)` - File version is incompatible
/// * `Err(EstimateError::SerializationError)` - Invalid JSON
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_job(path: &Path) -> EstimateResult<EstimateJob> {
    let mut file = File::open(path).map_err(|e| {
        EstimateError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        EstimateError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let job: EstimateJob = serde_json::from_str(&contents).map_err(|e| {
        EstimateError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&job.meta.version)?;

    tracing::debug!(path = %path.display(), job_id = %job.meta.job_id, "loaded job");
    Ok(job)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> EstimateResult<()> {
    let mismatch = || EstimateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // In 0.x a newer minor may carry breaking changes we don't understand
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::EstimateInput;
    use tempfile::TempDir;

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/path/to/estimate_output.pdf"));
        assert_eq!(tmp, Path::new("/path/to/estimate_output.pdf.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.json");

        let job = EstimateJob::new("Test Estimator", "TEST-001", "Test Client", EstimateInput::sample());
        save_job(&job, &path).unwrap();

        let loaded = load_job(&path).unwrap();
        assert_eq!(loaded.meta.estimator, "Test Estimator");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.input.wall.stud_spacing_in, 16);
        assert_eq!(loaded.input.cathedral.sections, job.input.cathedral.sections);
    }

    #[test]
    fn test_atomic_write_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("estimate_output.pdf");

        write_artifact(&path, b"%PDF-1.7 test").unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7 test");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_job(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_job(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("future.json");
        let mut job = EstimateJob::new("Sam", "26-001", "Client", EstimateInput::sample());
        job.meta.version = "0.9.0".to_string();
        save_job(&job, &path).unwrap();
        assert_eq!(load_job(&path).unwrap_err().error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("banana").is_err());
    }
}
