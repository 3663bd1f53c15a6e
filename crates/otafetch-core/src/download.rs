use crate::{Error, Result};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use url::Url;

/// Progress callback: (bytes written so far, total size when the server sent
/// a Content-Length).
pub type Progress<'a> = &'a mut dyn FnMut(u64, Option<u64>);

/// Derive the local file name for a download URL: its final path segment.
pub fn file_name_for(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;

    let name = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidUrl(format!("{} has no file name", url)))?;

    Ok(name.to_string())
}

/// Stream a URL to a file in `dir`, named after the URL's final path segment.
///
/// The body is written chunk by chunk as it arrives, so arbitrarily large OTA
/// images never sit in memory. On any transport or write failure the partial
/// file is removed before the error propagates.
pub async fn download_to_dir(url: &str, dir: &Path, progress: Progress<'_>) -> Result<PathBuf> {
    let name = file_name_for(url)?;
    let dest = dir.join(&name);

    tracing::info!("Downloading {} to {}", url, dest.display());

    let result = stream_to_file(url, &dest, progress).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(&dest).await;
    }
    result?;

    tracing::info!("Downloaded to {}", dest.display());

    Ok(dest)
}

async fn stream_to_file(url: &str, dest: &Path, progress: Progress<'_>) -> Result<()> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let total = response.content_length();

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        file.write_all(&bytes).await?;
        written += bytes.len() as u64;
        progress(written, total);
    }

    file.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_final_path_segment() {
        let name = file_name_for(
            "https://dl.google.com/dl/android/aosp/cheetah-ota-tq3a.230901.001-b8a3c1f0.zip",
        )
        .unwrap();
        assert_eq!(name, "cheetah-ota-tq3a.230901.001-b8a3c1f0.zip");
    }

    #[test]
    fn test_query_string_does_not_leak_into_file_name() {
        let name = file_name_for("https://example.com/path/update.zip?token=abc").unwrap();
        assert_eq!(name, "update.zip");
    }

    #[test]
    fn test_url_without_file_name_is_rejected() {
        assert!(file_name_for("https://example.com/").is_err());
        assert!(file_name_for("not a url").is_err());
    }
}
