//! `SessionDriver` over a chromiumoxide page
//!
//! Every CDP call is wrapped in `with_page_timeout`, and protocol errors are
//! classified so that anything timeout-shaped surfaces as
//! `SessionError::Timeout` for the retry ladder.

use std::fmt::Display;
use std::time::{Duration, Instant};

use chromiumoxide::page::Page;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::browser::{BrowserWrapper, launch_browser};
use super::page_timeout::with_page_timeout;
use super::{SessionDriver, SessionError};
use crate::config::SessionConfig;
use crate::utils::string_utils::parse_signal_text;

/// Poll interval while waiting for an element to become interactable
const INTERACTABLE_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Classify a CDP error into transient timeout vs permanent failure
///
/// Based on chromiumoxide error text: request timeouts and navigation
/// timeouts are transient, everything else is a browser failure.
fn classify_cdp_error(error: impl Display) -> SessionError {
    let message = error.to_string();
    let lower = message.to_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        SessionError::Timeout(message)
    } else {
        SessionError::Browser(message)
    }
}

/// Quote a string as a JavaScript literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Search session driving a headless Chrome page
pub struct ChromiumSession {
    config: SessionConfig,
    wrapper: Option<BrowserWrapper>,
    page: Page,
    next_proxy: usize,
}

impl ChromiumSession {
    /// Launch a browser (behind the first configured proxy, if any) and open
    /// a blank page
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Browser` if Chrome cannot be found, downloaded
    /// or launched.
    pub async fn launch(config: SessionConfig) -> Result<Self, SessionError> {
        let proxy = config.proxies().first().cloned();
        let (wrapper, page) = Self::open(&config, proxy.as_deref(), "about:blank").await?;

        Ok(Self {
            next_proxy: usize::from(proxy.is_some()),
            config,
            wrapper: Some(wrapper),
            page,
        })
    }

    async fn open(
        config: &SessionConfig,
        proxy: Option<&str>,
        url: &str,
    ) -> Result<(BrowserWrapper, Page), SessionError> {
        let wrapper = launch_browser(config, proxy)
            .await
            .map_err(|e| SessionError::Browser(format!("{e:#}")))?;

        let page = with_page_timeout(
            async { wrapper.browser().new_page(url).await.map_err(classify_cdp_error) },
            Duration::from_secs(config.operation_timeout_secs()),
            "new page",
        )
        .await?;

        Ok((wrapper, page))
    }

    /// Close the browser and remove its profile directory
    pub async fn shutdown(mut self) {
        if let Some(wrapper) = self.wrapper.take() {
            info!("Shutting down search session browser");
            wrapper.shutdown().await;
        }
    }

    fn op_timeout(&self) -> Duration {
        Duration::from_secs(self.config.operation_timeout_secs())
    }

    async fn eval<T: DeserializeOwned>(&self, script: String, name: &str) -> Result<T, SessionError> {
        let page = &self.page;
        with_page_timeout(
            async move {
                page.evaluate(script)
                    .await
                    .map_err(classify_cdp_error)?
                    .into_value::<T>()
                    .map_err(|e| SessionError::Browser(format!("{name}: {e}")))
            },
            self.op_timeout(),
            name,
        )
        .await
    }

    async fn is_interactable(&self, locator: &str) -> Result<bool, SessionError> {
        let script = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (!el) return false; \
             const r = el.getBoundingClientRect(); \
             return !el.disabled && r.width > 0 && r.height > 0; }})()",
            sel = js_string(locator)
        );
        self.eval(script, "interactable check").await
    }
}

impl SessionDriver for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        info!("Navigating search session to {}", url);
        let page = &self.page;
        with_page_timeout(
            async move {
                page.goto(url).await.map_err(classify_cdp_error)?;
                Ok(())
            },
            self.op_timeout(),
            "navigate",
        )
        .await
    }

    async fn wait_interactable(&mut self, locator: &str) -> Result<(), SessionError> {
        let deadline = Duration::from_secs(self.config.interactable_timeout_secs());
        let start = Instant::now();

        loop {
            match self.is_interactable(locator).await {
                Ok(true) => {
                    debug!("'{}' interactable after {:?}", locator, start.elapsed());
                    return Ok(());
                }
                Ok(false) => {}
                Err(e) if e.is_timeout() => {}
                Err(e) => return Err(e),
            }

            if start.elapsed() >= deadline {
                return Err(SessionError::Timeout(format!(
                    "'{locator}' not interactable after {deadline:?}"
                )));
            }
            tokio::time::sleep(INTERACTABLE_POLL_INTERVAL).await;
        }
    }

    async fn type_and_submit(&mut self, locator: &str, text: &str) -> Result<(), SessionError> {
        let clear = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (!el) return false; el.value = ''; return true; }})()",
            sel = js_string(locator)
        );
        let cleared: bool = self.eval(clear, "clear input").await?;
        if !cleared {
            return Err(SessionError::Element(format!("'{locator}' not found")));
        }

        let page = &self.page;
        with_page_timeout(
            async move {
                let input = page
                    .find_element(locator)
                    .await
                    .map_err(|e| SessionError::Element(format!("'{locator}': {e}")))?;
                input.click().await.map_err(classify_cdp_error)?;
                input.type_str(text).await.map_err(classify_cdp_error)?;
                input.press_key("Enter").await.map_err(classify_cdp_error)?;
                Ok(())
            },
            self.op_timeout(),
            "type and submit",
        )
        .await
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), SessionError> {
        let page = &self.page;
        with_page_timeout(
            async move {
                page.evaluate("window.scrollTo(0, document.body.scrollHeight);")
                    .await
                    .map_err(classify_cdp_error)?;
                Ok(())
            },
            self.op_timeout(),
            "scroll",
        )
        .await
    }

    async fn read_signal(&mut self) -> Result<u64, SessionError> {
        let selector = self.config.signal_selector().to_string();
        let script = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             return el ? (el.innerText || el.textContent || '') : ''; }})()",
            sel = js_string(&selector)
        );
        let text: String = self.eval(script, "read signal").await?;

        parse_signal_text(&text).ok_or_else(|| {
            SessionError::Signal(format!("'{selector}' holds no number (text: {text:?})"))
        })
    }

    async fn refresh(&mut self) -> Result<(), SessionError> {
        let page = &self.page;
        with_page_timeout(
            async move {
                page.reload().await.map_err(classify_cdp_error)?;
                Ok(())
            },
            self.op_timeout(),
            "refresh",
        )
        .await
    }

    async fn dismiss_messages(&mut self) -> Result<(), SessionError> {
        if self.config.dismiss_selectors().is_empty() {
            return Ok(());
        }

        let selectors = serde_json::to_string(self.config.dismiss_selectors())
            .map_err(|e| SessionError::Browser(e.to_string()))?;
        let script = format!(
            "(() => {{ let n = 0; for (const s of {selectors}) {{ \
             const el = document.querySelector(s); if (el) {{ el.click(); n++; }} }} \
             return n; }})()"
        );
        let clicked: u32 = self.eval(script, "dismiss messages").await?;
        if clicked > 0 {
            debug!("Dismissed {} blocking message(s)", clicked);
        }
        Ok(())
    }

    async fn reassign_proxy(&mut self) -> Result<(), SessionError> {
        let proxies = self.config.proxies();
        if proxies.is_empty() {
            warn!("Proxy reassignment requested but no proxies are configured");
            return Ok(());
        }

        let proxy = proxies[self.next_proxy % proxies.len()].clone();
        self.next_proxy = self.next_proxy.wrapping_add(1);

        let url = self
            .page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| "about:blank".to_string());

        info!("Relaunching search session behind proxy {} at {}", proxy, url);

        if let Some(wrapper) = self.wrapper.take() {
            wrapper.shutdown().await;
        }

        let (wrapper, page) = Self::open(&self.config, Some(&proxy), &url).await?;
        self.wrapper = Some(wrapper);
        self.page = page;
        Ok(())
    }
}
