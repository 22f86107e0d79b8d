//! Browser-like search session
//!
//! `SessionDriver` is the seam between the campaign state machine and
//! whatever performs the UI actions. `ChromiumSession` drives a real Chrome
//! page over CDP; tests drive scripted fakes.

pub mod browser;
pub mod chromium;
pub mod page_timeout;

pub use browser::{BrowserWrapper, download_managed_browser, find_browser_executable, launch_browser};
pub use chromium::ChromiumSession;
pub use page_timeout::with_page_timeout;

use std::future::Future;
use thiserror::Error;

/// Failure of a session action
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The page or an element did not respond in time (transient)
    #[error("Session timed out: {0}")]
    Timeout(String),

    /// An element could not be found or interacted with
    #[error("Element interaction failed: {0}")]
    Element(String),

    /// The reward signal could not be read or parsed
    #[error("Could not read reward signal: {0}")]
    Signal(String),

    /// Browser process or protocol failure
    #[error("Browser error: {0}")]
    Browser(String),
}

impl SessionError {
    /// Timeouts are retried by the evaluation ladder; everything else is fatal
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, SessionError::Timeout(_))
    }
}

/// UI actions of one search session plus the reward-signal reader
///
/// All methods take `&mut self`: a session serves exactly one campaign at a
/// time and every action mutates page state.
pub trait SessionDriver: Send {
    /// Load `url` in the session
    fn navigate(&mut self, url: &str) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Wait until the element at `locator` can receive input
    fn wait_interactable(
        &mut self,
        locator: &str,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Clear the input at `locator`, type `text` and submit it
    fn type_and_submit(
        &mut self,
        locator: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    fn scroll_to_bottom(&mut self) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Current reward-signal value
    fn read_signal(&mut self) -> impl Future<Output = Result<u64, SessionError>> + Send;

    fn refresh(&mut self) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Close any banners or dialogs blocking the page
    fn dismiss_messages(&mut self) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Move the session to a different proxy
    fn reassign_proxy(&mut self) -> impl Future<Output = Result<(), SessionError>> + Send;
}
