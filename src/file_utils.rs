use anyhow::{Context, Result};
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use chrono::Local;

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
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: Output path for the assembled scene plan
    // @params: takes_file, extension
    pub fn generate_plan_path<P: AsRef<Path>>(takes_file: P, extension: &str) -> PathBuf {
        let takes_file = takes_file.as_ref();

        let stem = takes_file.file_stem().unwrap_or_default();

        let mut plan_filename = stem.to_string_lossy().to_string();
        plan_filename.push_str(".plan.");
        plan_filename.push_str(extension);

        takes_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(plan_filename)
    }

    // @appends: Timestamped line to the assembly report
    pub fn append_to_report<P: AsRef<Path>>(path: P, message: &str) -> Result<()> {
        let path = path.as_ref();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open report file: {}", path.display()))?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{}] {}", timestamp, message)?;

        Ok(())
    }
}
