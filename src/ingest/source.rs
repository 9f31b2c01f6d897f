use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Falls back to Windows-1252 when the bytes are not UTF-8 (Excel exports).
pub async fn read_source(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed reading coverage file: {}", path.display()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            debug!("{} is not UTF-8, decoding as Windows-1252", path.display());
            let bytes = err.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Single-slot file reader: starting a new read aborts the one in flight.
#[derive(Debug, Default)]
pub struct SourceLoader {
    in_flight: Option<(PathBuf, JoinHandle<Result<String>>)>,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if let Some((previous, handle)) = self.in_flight.take() {
            if !handle.is_finished() {
                info!(
                    "read of {} superseded by {}",
                    previous.display(),
                    path.display()
                );
            }
            handle.abort();
        }
        let task_path = path.clone();
        let handle = tokio::spawn(async move { read_source(&task_path).await });
        self.in_flight = Some((path, handle));
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub async fn finish(&mut self) -> Result<Option<String>> {
        let Some((path, handle)) = self.in_flight.take() else {
            return Ok(None);
        };
        let text = handle
            .await
            .with_context(|| format!("read task for {} did not complete", path.display()))??;
        Ok(Some(text))
    }
}
