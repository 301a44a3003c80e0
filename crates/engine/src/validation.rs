//! Checks applied to page forms before their requests reach the store.

use jitpages_types::Page;
use thiserror::Error;
use url::Url;

/// Reasons a page form cannot be submitted. Messages are shown verbatim.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PageFormError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Page name must be unique.")]
    DuplicateName,
    #[error("URL is required.")]
    UrlRequired,
}

/// Validate the name for a new page, returning it trimmed.
pub fn validate_new_page_name(pages: &[Page], name: &str) -> Result<String, PageFormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PageFormError::NameRequired);
    }
    if pages.iter().any(|page| page.name.trim() == name) {
        return Err(PageFormError::DuplicateName);
    }
    Ok(name.to_string())
}

/// Validate an edit of an existing page's name and URL.
///
/// URLs that do not parse are accepted (the fetch reports them) but produce a
/// warning for the form to show.
pub fn validate_page_edit(name: &str, url: &str) -> Result<Option<String>, PageFormError> {
    if name.trim().is_empty() {
        return Err(PageFormError::NameRequired);
    }
    let url = url.trim();
    if url.is_empty() {
        return Err(PageFormError::UrlRequired);
    }
    Ok(Url::parse(url).err().map(|error| format!("URL looks invalid: {error}")))
}
