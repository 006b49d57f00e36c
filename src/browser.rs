use tracing::warn;

/// Best-effort launch of the system browser. Returns whether a launcher was
/// found; callers fall back to asking the operator to copy the URL.
pub fn open_in_browser(url: &str) -> bool {
    match open::that(url) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "failed to open browser");
            false
        }
    }
}
