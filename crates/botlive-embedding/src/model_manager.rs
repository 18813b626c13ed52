// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model download manager for first-run ONNX embedding model setup.
//!
//! Downloads the quantized multilingual MiniLM model from HuggingFace on
//! first run and caches it in the data directory.

use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;
use tracing::info;

use botlive_core::error::BotliveError;

use crate::embedder::MODEL_NAME;

/// URLs for model files on HuggingFace.
const MODEL_URL: &str = "https://huggingface.co/Xenova/paraphrase-multilingual-MiniLM-L12-v2/resolve/main/onnx/model_quantized.onnx";
const TOKENIZER_URL: &str = "https://huggingface.co/Xenova/paraphrase-multilingual-MiniLM-L12-v2/resolve/main/tokenizer.json";

fn download_error(message: impl Into<String>) -> BotliveError {
    BotliveError::Embedding {
        message: message.into(),
        source: None,
    }
}

/// Resolve the default Botlive data directory under the XDG data dir.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("botlive")
}

/// Manages ONNX model download and path resolution.
pub struct ModelManager {
    data_dir: PathBuf,
    /// Ensures model is downloaded only once even with concurrent callers.
    _init_guard: OnceCell<()>,
}

impl ModelManager {
    /// Creates a new ModelManager with the given data directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            _init_guard: OnceCell::new(),
        }
    }

    /// Returns the directory where model files are stored.
    pub fn model_dir(&self) -> PathBuf {
        self.data_dir.join("models").join(MODEL_NAME)
    }

    /// Returns the path to the ONNX model file.
    pub fn model_path(&self) -> PathBuf {
        self.model_dir().join("model.onnx")
    }

    /// Returns the path to the tokenizer.json file.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir().join("tokenizer.json")
    }

    /// Returns true if both model and tokenizer files exist.
    pub fn is_model_available(&self) -> bool {
        self.model_path().exists() && self.tokenizer_path().exists()
    }

    /// Ensures the model is downloaded and available.
    ///
    /// Downloads from HuggingFace on first run; subsequent calls are no-ops.
    pub async fn ensure_model(&self) -> Result<PathBuf, BotliveError> {
        if self.is_model_available() {
            return Ok(self.model_path());
        }

        info!("embedding model not found, downloading from HuggingFace...");

        let model_dir = self.model_dir();
        tokio::fs::create_dir_all(&model_dir)
            .await
            .map_err(|e| download_error(format!("failed to create model directory: {e}")))?;

        let files = [("model.onnx", MODEL_URL), ("tokenizer.json", TOKENIZER_URL)];

        for (filename, url) in &files {
            let dest = model_dir.join(filename);
            if dest.exists() {
                continue;
            }

            info!("downloading {filename}...");
            match download_file(url, &dest).await {
                Ok(size) => {
                    info!("downloaded {filename} ({size} bytes)");
                }
                Err(e) => {
                    // Clean up partial download
                    let _ = tokio::fs::remove_file(&dest).await;
                    return Err(e);
                }
            }
        }

        info!("embedding model ready at: {}", model_dir.display());
        Ok(self.model_path())
    }
}

/// Download a file from a URL to a local path.
async fn download_file(url: &str, dest: &Path) -> Result<usize, BotliveError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| download_error(format!("failed to download {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(download_error(format!(
            "download failed with status {}: {url}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| download_error(format!("failed to read response body from {url}: {e}")))?;

    let size = bytes.len();
    tokio::fs::write(dest, &bytes)
        .await
        .map_err(|e| download_error(format!("failed to write {}: {e}", dest.display())))?;

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_under_data_dir() {
        let manager = ModelManager::new(PathBuf::from("/tmp/botlive-test"));
        assert!(manager
            .model_path()
            .starts_with("/tmp/botlive-test/models"));
        assert!(manager
            .model_path()
            .to_string_lossy()
            .contains(MODEL_NAME));
        assert_eq!(
            manager.tokenizer_path().file_name().unwrap(),
            "tokenizer.json"
        );
    }

    #[tokio::test]
    async fn missing_files_report_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = ModelManager::new(tmp.path().to_path_buf());
        assert!(!manager.is_model_available());
    }

    #[tokio::test]
    async fn ensure_model_short_circuits_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = ModelManager::new(tmp.path().to_path_buf());
        tokio::fs::create_dir_all(manager.model_dir()).await.unwrap();
        tokio::fs::write(manager.model_path(), b"stub").await.unwrap();
        tokio::fs::write(manager.tokenizer_path(), b"stub")
            .await
            .unwrap();

        // No network access happens when the files are already on disk.
        let path = manager.ensure_model().await.unwrap();
        assert_eq!(path, manager.model_path());
    }
}
