use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Best score, kept as a single base-10 integer in a plain text file.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored score, creating the file with `0` if it is absent.
    pub fn load_or_create(&self) -> io::Result<u32> {
        if !self.path.exists() {
            fs::write(&self.path, "0")?;
            return Ok(0);
        }
        let text = fs::read_to_string(&self.path)?;
        text.trim().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid high score in {}: {e}", self.path.display()),
            )
        })
    }

    /// Overwrites the file with `score`.
    pub fn save(&self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())
    }
}
