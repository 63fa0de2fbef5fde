//! Binary file access.
//!
//! The codec only ever sees buffers already in memory; this module is the I/O boundary.
//!
//! Behavior:
//! - `read_buffer` loads a whole file; failures carry the path (read failure).
//! - `write_buffer` replaces a file's content; failures carry the path (write failure).
//! - Both log at `debug` with the byte count, under the `padmap::files` target.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs as afs;
use tracing::debug;

/// Read a configuration file fully into memory.
pub async fn read_buffer<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = afs::read(path)
        .await
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
    debug!(target: "padmap::files", path = %path.display(), len = bytes.len(), "Read configuration file");
    Ok(bytes)
}

/// Write an encoded buffer, replacing any existing file.
pub async fn write_buffer<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    afs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write configuration file {}", path.display()))?;
    debug!(target: "padmap::files", path = %path.display(), len = bytes.len(), "Wrote configuration file");
    Ok(())
}

/// Final path component as an owned string, used as the session's file name.
pub fn file_name_of<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("padmap-{}-{tag}.bin", std::process::id()))
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let path = temp_path("rw");
        let bytes: Vec<u8> = (0..=255).collect();
        write_buffer(&path, &bytes).await.unwrap();
        assert_eq!(read_buffer(&path).await.unwrap(), bytes);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_read_missing_file_mentions_path() {
        let path = temp_path("missing");
        let err = read_buffer(&path).await.unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(
            file_name_of("/tmp/pads/gamepad_config.bin").as_deref(),
            Some("gamepad_config.bin")
        );
        assert_eq!(file_name_of("/"), None);
    }
}
