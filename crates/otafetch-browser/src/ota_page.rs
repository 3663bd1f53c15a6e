use crate::{Error, Result};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use std::time::{Duration, Instant};

/// Google's public Android OTA listing page.
pub const OTA_LISTING_URL: &str = "https://developers.google.com/android/ota";

/// Delay after initial navigation before touching the DOM.
pub(crate) const PAGE_SETTLE: Duration = Duration::from_secs(5);

/// Bounded wait for the consent dialog; absence is not an error.
const CONSENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause after clicking the consent button.
const CONSENT_CLICK_PAUSE: Duration = Duration::from_secs(1);

/// Pause after scrolling to the bottom so lazy sections render.
const SCROLL_SETTLE: Duration = Duration::from_secs(2);

/// Bounded wait for the per-device section heading.
const ANCHOR_TIMEOUT: Duration = Duration::from_secs(20);

/// Fixed interval between DOM polls.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A loaded OTA listing page.
///
/// Extraction is a linear pipeline (anchor, table, rows, link) where each
/// step maps to its own [`Error`] variant, so failures name the exact step
/// that broke instead of a generic lookup error.
pub struct OtaPage {
    page: Page,
}

impl OtaPage {
    pub(crate) fn new(page: Page) -> Self {
        Self { page }
    }

    /// Dismiss the acknowledge/consent dialog if it shows up.
    ///
    /// Best effort: waits a bounded time for a button whose text contains
    /// "acknowledge" (case-insensitive); a page without one is normal.
    pub async fn dismiss_consent(&self) {
        tracing::debug!("Checking for acknowledge button");

        let deadline = Instant::now() + CONSENT_TIMEOUT;
        loop {
            let buttons = self
                .page
                .find_elements("button")
                .await
                .unwrap_or_default();

            for button in buttons {
                let text = match button.inner_text().await {
                    Ok(Some(text)) => text,
                    _ => continue,
                };
                if text.to_lowercase().contains("acknowledge") {
                    tracing::debug!("Acknowledge button found, clicking");
                    if button.click().await.is_ok() {
                        tokio::time::sleep(CONSENT_CLICK_PAUSE).await;
                    }
                    return;
                }
            }

            if Instant::now() >= deadline {
                tracing::debug!("No acknowledge button found, continuing");
                return;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Extract the latest OTA `.zip` URL for `codename`.
    ///
    /// "Latest" means the last row of the device's table in DOM order. That
    /// is the listing page's publishing convention, not something this code
    /// can verify.
    pub async fn latest_zip_url(&self, codename: &str) -> Result<String> {
        tracing::info!("Locating the {} OTA table", codename);

        // Device sections far down the page only render once scrolled to.
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight);")
            .await?;
        tokio::time::sleep(SCROLL_SETTLE).await;

        let anchor_xpath = format!("//h2[@id=\"{}\"]", codename);
        self.wait_for_xpath(&anchor_xpath, ANCHOR_TIMEOUT)
            .await
            .map_err(|_| Error::AnchorNotFound {
                codename: codename.to_string(),
            })?;
        tracing::debug!("Found <h2 id=\"{}\"> anchor", codename);

        // The table usually sits inside a wrapper div right after the
        // heading; some sections place it as a direct sibling.
        let wrapped = format!("//h2[@id=\"{}\"]/following-sibling::div[1]/table", codename);
        let direct = format!("//h2[@id=\"{}\"]/following-sibling::table[1]", codename);
        let table = match self.page.find_xpath(&wrapped).await {
            Ok(table) => table,
            Err(_) => self
                .page
                .find_xpath(&direct)
                .await
                .map_err(|_| Error::TableNotFound {
                    codename: codename.to_string(),
                })?,
        };

        let rows = table.find_elements("tbody tr").await.unwrap_or_default();
        tracing::debug!("Found {} rows in the OTA table", rows.len());

        let Some(latest_row) = rows.last() else {
            return Err(Error::EmptyTable {
                codename: codename.to_string(),
            });
        };

        let link = latest_row
            .find_element("a[href$=\".zip\"]")
            .await
            .map_err(|_| Error::ZipLinkNotFound {
                codename: codename.to_string(),
            })?;

        let href = link
            .attribute("href")
            .await?
            .ok_or_else(|| Error::ZipLinkNotFound {
                codename: codename.to_string(),
            })?;

        tracing::info!("Latest OTA zip for {}: {}", codename, href);

        Ok(href)
    }

    /// Poll for an XPath match until `timeout` elapses.
    async fn wait_for_xpath(&self, xpath: &str, timeout: Duration) -> Result<Element> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.page.find_xpath(xpath).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout(timeout, xpath.to_string()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
