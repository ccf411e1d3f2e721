use crate::error::Result;
use async_trait::async_trait;

/// The browser operations a download run needs.
///
/// Selectors are CSS selectors. Lookups report absence as `Ok(false)`;
/// errors are reserved for the browser itself misbehaving.
#[async_trait]
pub trait GateDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// Whether any element matches `selector`
    async fn exists(&self, selector: &str) -> Result<bool>;

    /// Whether the first element matching `selector` is present and enabled
    async fn is_enabled(&self, selector: &str) -> Result<bool>;

    async fn click(&self, selector: &str) -> Result<()>;

    async fn window_count(&self) -> Result<usize>;

    /// Switch to the most recently opened window or tab
    async fn focus_newest_window(&self) -> Result<()>;

    /// Whether [`GateDriver::transfer_started`] can ever report a transfer
    fn observes_transfers(&self) -> bool {
        false
    }

    /// Whether the browser has started writing a file since the session began
    async fn transfer_started(&self) -> Result<bool> {
        Ok(false)
    }

    /// End the browser session
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
