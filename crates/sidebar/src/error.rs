use sidenav_page::PageError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced while constructing a sidebar or its page session.
#[derive(Debug, Error)]
pub enum SidebarError {
    /// A required element is absent from the page.
    #[error("Required element '{0}' not found")]
    MissingElement(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Page(#[from] PageError),
}
