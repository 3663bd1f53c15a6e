use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use otafetch_browser::{ChromeFinder, OtaBrowser};
use std::path::{Path, PathBuf};

pub fn execute(
    device: &str,
    debug: bool,
    download: bool,
    silent: bool,
    chrome_path: Option<PathBuf>,
    listing_url: &str,
) -> Result<()> {
    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run(device, debug, download, silent, chrome_path, listing_url));

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}

async fn run(
    device: &str,
    debug: bool,
    download: bool,
    silent: bool,
    chrome_path: Option<PathBuf>,
    listing_url: &str,
) -> Result<()> {
    if !silent {
        println!("🔍 Locating Chrome...");
    }
    let finder = ChromeFinder::new(chrome_path);
    let chrome_binary = finder.find()?;
    tracing::debug!("Using Chrome binary: {}", chrome_binary.display());
    if !silent {
        println!("✅ Found Chrome at: {}", chrome_binary.display());
    }

    let browser = OtaBrowser::launch(chrome_binary, debug).await?;

    // Every extraction failure still tears the browser down before the
    // error propagates; no branch may leak the Chrome process.
    let scraped = scrape(&browser, device, silent, listing_url).await;
    let url = match scraped {
        Ok(url) => {
            browser.close().await?;
            url
        }
        Err(e) => {
            let _ = browser.close().await;
            return Err(e.into());
        }
    };

    if download {
        if !silent {
            println!("⬇️  Downloading {} ...", url);
        }

        let bar = if silent { None } else { Some(download_bar()) };
        let mut progress = |written: u64, total: Option<u64>| {
            if let Some(bar) = &bar {
                if let Some(total) = total {
                    bar.set_length(total);
                }
                bar.set_position(written);
            }
        };

        let dest =
            otafetch_core::download::download_to_dir(&url, Path::new("."), &mut progress).await?;

        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }
        if !silent {
            println!("✅ Downloaded to {}", dest.display());
        }
    } else {
        println!("{}", url);
    }

    Ok(())
}

async fn scrape(
    browser: &OtaBrowser,
    device: &str,
    silent: bool,
    listing_url: &str,
) -> otafetch_browser::Result<String> {
    if !silent {
        println!("🌐 Loading {}", listing_url);
    }
    let page = browser.open(listing_url).await?;

    page.dismiss_consent().await;

    if !silent {
        println!("🔎 Locating the {} OTA table...", device);
    }
    page.latest_zip_url(device).await
}

fn download_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::with_template("{bytes}/{total_bytes} [{wide_bar}] {bytes_per_sec}")
    {
        bar.set_style(style);
    }
    bar
}
