use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Whether the file extension (without dot) is in the accepted list
    pub fn has_accepted_extension<P: AsRef<Path>>(path: P, accepted: &[String]) -> bool {
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| accepted.iter().any(|a| a.trim_start_matches('.') == ext))
    }

    /// List the regular files directly inside `dir` with an accepted extension.
    ///
    /// With `only` set, the listing is restricted to that file name. Results
    /// are sorted by file name so scans are deterministic.
    pub fn find_accepted_files<P: AsRef<Path>>(
        dir: P,
        accepted: &[String],
        only: Option<&str>,
    ) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() || !Self::has_accepted_extension(path, accepted) {
                continue;
            }
            if let Some(name) = only {
                if entry.file_name().to_string_lossy() != name {
                    continue;
                }
            }
            result.push(path.to_path_buf());
        }

        Ok(result)
    }

    // @generates: Output path for a translated file
    // @params: input_file, output_dir, target_language
    //
    // The last `_segment` of the stem is replaced by `_<target_language>`;
    // a stem without `_` gets the suffix appended. The extension is kept.
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        target_language: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy().to_string();

        let base = match stem.rsplit_once('_') {
            Some((base, _)) => base.to_string(),
            None => stem,
        };

        let mut output_filename = format!("{}_{}", base, target_language);
        if let Some(ext) = input_file.extension() {
            output_filename.push('.');
            output_filename.push_str(&ext.to_string_lossy());
        }

        output_dir.as_ref().join(output_filename)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a file if it exists
    pub fn read_if_exists<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
        if Self::file_exists(&path) {
            Self::read_to_string(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Replace a file's content atomically.
    ///
    /// The content is written to a temporary file next to `path` and then
    /// renamed over it, so an interruption never leaves a half-written file.
    pub fn replace_atomically<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .context("Failed to write temporary file")?;
        temp.flush().context("Failed to flush temporary file")?;
        temp.persist(path)
            .with_context(|| format!("Failed to replace file: {:?}", path))?;

        Ok(())
    }

    /// Delete a file
    pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<()> {
        fs::remove_file(&path)
            .with_context(|| format!("Failed to delete file: {:?}", path.as_ref()))
    }
}
