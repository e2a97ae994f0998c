use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "arcade-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Failures reading or writing the persisted high score.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read/write access to the single persisted high score.
///
/// The session treats every error as "no high score available" or "save
/// skipped"; implementations only need to report what went wrong.
pub trait HighScoreStore: fmt::Debug {
    fn read_high_score(&self) -> Result<u32, ScoreError>;

    fn write_high_score(&mut self, score: u32) -> Result<(), ScoreError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// High score persisted as a small JSON document.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user data location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    /// Returns `Ok(0)` when the score file does not exist yet.
    fn read_high_score(&self) -> Result<u32, ScoreError> {
        load_high_score_from_path(&self.path)
    }

    fn write_high_score(&mut self, score: u32) -> Result<(), ScoreError> {
        save_high_score_to_path(&self.path, score)
    }
}

fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let file = serde_json::from_str::<ScoreFile>(&raw)?;
    Ok(file.high_score)
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)?;

    fs::write(path, json)?;
    Ok(())
}

/// In-memory store. Clones share the same value and write log.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    inner: Rc<RefCell<MemoryScores>>,
}

#[derive(Debug, Default)]
struct MemoryScores {
    high_score: u32,
    writes: Vec<u32>,
}

impl MemoryHighScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `high_score`.
    #[must_use]
    pub fn with_high_score(high_score: u32) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().high_score = high_score;
        store
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.inner.borrow().high_score
    }

    /// Every value written so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<u32> {
        self.inner.borrow().writes.clone()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn read_high_score(&self) -> Result<u32, ScoreError> {
        Ok(self.high_score())
    }

    fn write_high_score(&mut self, score: u32) -> Result<(), ScoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.high_score = score;
        inner.writes.push(score);
        Ok(())
    }
}
