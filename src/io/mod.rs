pub mod destinations;

pub use destinations::{FileDestination, MemoryDestination, OutputDestination};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
