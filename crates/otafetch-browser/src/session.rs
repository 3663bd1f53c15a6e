use crate::ota_page::{OtaPage, PAGE_SETTLE};
use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// A running Chrome instance scoped to one scrape.
///
/// The browser process and the CDP handler task live exactly as long as this
/// struct; callers must run [`OtaBrowser::close`] on every exit path so no
/// Chrome process outlives the run.
pub struct OtaBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl OtaBrowser {
    /// Launch Chrome at `chrome_path`, headless unless `headed` is set.
    pub async fn launch(chrome_path: PathBuf, headed: bool) -> Result<Self> {
        tracing::info!(
            "Launching Chrome at {} ({})",
            chrome_path.display(),
            if headed { "headed" } else { "headless" }
        );

        let mut builder = BrowserConfig::builder()
            .chrome_executable(&chrome_path)
            .no_sandbox()
            .arg("--disable-dev-shm-usage");
        if headed {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler task pumps CDP protocol messages; nothing on the page
        // works until it is running.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open `url` in a new tab and wait for it to settle.
    pub async fn open(&self, url: &str) -> Result<OtaPage> {
        tracing::info!("Loading {}", url);

        let page = self.browser.new_page(url).await?;
        tokio::time::sleep(PAGE_SETTLE).await;

        Ok(OtaPage::new(page))
    }

    /// Tear down the browser process and the CDP handler task.
    pub async fn close(mut self) -> Result<()> {
        tracing::info!("Closing Chrome");

        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();

        Ok(())
    }
}
