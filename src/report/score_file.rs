// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/report/score_file.rs
//
// This file implements the JSON score report file. The summary of a completed
// run (peak score, uncertainty, tuner profile) is written atomically so a
// half-written report is never observed by tooling that polls it.
//
// Tree Location:
// - src/report/score_file.rs (score report persistence)
// - Depends on: serde_json, thiserror, tokio::fs, log

use crate::core::types::RunSummary;
use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::{
    fs::{self, OpenOptions},
    io::AsyncWriteExt,
};

const LOG_TARGET: &str = "peakbench::score_file";

#[derive(Error, Debug)]
pub enum ScoreFileError {
    #[error("score report does not exist at {path:?}")]
    FileNotFound { path: PathBuf },

    #[error("failed to serialize score report")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("failed to deserialize score report: {message}")]
    DeserializationError { message: String },

    #[error("IO operation failed on {path:?}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create temporary file for atomic write")]
    AtomicWriteError {
        #[source]
        source: std::io::Error,
    },
}

/// Writes and reads score report files at a fixed path.
#[derive(Debug, Clone)]
pub struct ScoreFileManager {
    file_path: PathBuf,
}

impl ScoreFileManager {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn ensure_parent_exists(&self) -> Result<(), ScoreFileError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ScoreFileError::IoError {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
            }
        }
        Ok(())
    }

    /// Save a run summary, replacing any previous report atomically
    /// (temporary file plus rename).
    pub async fn save(&self, summary: &RunSummary) -> Result<(), ScoreFileError> {
        self.ensure_parent_exists().await?;
        debug!(target: LOG_TARGET, "Writing score report to {:?}", self.file_path);

        let contents = serde_json::to_vec_pretty(summary)?;
        let temp_path = self.file_path.with_extension("tmp");

        {
            let mut temp_file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .await
                .map_err(|e| ScoreFileError::AtomicWriteError { source: e })?;

            temp_file
                .write_all(&contents)
                .await
                .map_err(|e| ScoreFileError::AtomicWriteError { source: e })?;

            temp_file
                .flush()
                .await
                .map_err(|e| ScoreFileError::AtomicWriteError { source: e })?;
        }

        fs::rename(&temp_path, &self.file_path)
            .await
            .map_err(|e| ScoreFileError::AtomicWriteError { source: e })?;

        info!(target: LOG_TARGET, "Saved score report to {:?}", self.file_path);
        Ok(())
    }

    pub async fn load(&self) -> Result<RunSummary, ScoreFileError> {
        debug!(target: LOG_TARGET, "Loading score report from {:?}", self.file_path);

        if !self.file_path.exists() {
            return Err(ScoreFileError::FileNotFound {
                path: self.file_path.clone(),
            });
        }

        let contents =
            fs::read_to_string(&self.file_path)
                .await
                .map_err(|e| ScoreFileError::IoError {
                    path: self.file_path.clone(),
                    source: e,
                })?;

        let summary: RunSummary = serde_json::from_str(&contents).map_err(|e| {
            ScoreFileError::DeserializationError {
                message: e.to_string(),
            }
        })?;
        Ok(summary)
    }
}
