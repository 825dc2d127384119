use crate::utils::error::Result;
use std::path::Path;

/// Writes decoded image bytes, creating parent directories as needed.
pub async fn write_image(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    tokio::fs::write(path, data).await?;
    tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
