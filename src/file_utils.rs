use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File and directory utilities for the command-line driver

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
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: Output path for a merged subtitle
    // @params: upper_file, suffix
    /// `movie.en.srt` with suffix `merged` becomes `movie.en.merged.srt`,
    /// next to the upper input.
    pub fn generate_output_path<P: AsRef<Path>>(upper_file: P, suffix: &str) -> PathBuf {
        let upper_file = upper_file.as_ref();

        let stem = upper_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(suffix);
        output_filename.push_str(".srt");

        match upper_file.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        }
    }

    /// Read a UTF-8 subtitle file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(anyhow!("Subtitle file does not exist: {}", path.display()));
        }
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file as UTF-8: {}", path.display()))
    }

    /// Write a string to a file, refusing to replace an existing one unless
    /// `force_overwrite` is set
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str, force_overwrite: bool) -> Result<()> {
        let path = path.as_ref();
        if path.exists() && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {}. Use -f to force overwrite.",
                path.display()
            ));
        }

        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write to file: {}", path.display()))?;

        Ok(())
    }
}
