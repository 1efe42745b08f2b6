/// Google Apps Script web app URL backing the guest spreadsheet.
///
/// INSTRUCTIONS: replace this with your deployed web app URL. While it is
/// left as the placeholder the page runs without a backend: the lookup is
/// skipped and submissions are logged to the console instead of sent.
pub const ENDPOINT_URL: &str = "YOUR_GOOGLE_SCRIPT_URL_HERE";

const PLACEHOLDER: &str = "YOUR_GOOGLE_SCRIPT_URL_HERE";

/// The endpoint, or `None` while it is still the placeholder.
pub fn endpoint() -> Option<&'static str> {
    is_configured(ENDPOINT_URL).then_some(ENDPOINT_URL)
}

fn is_configured(url: &str) -> bool {
    url != PLACEHOLDER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_not_configured() {
        assert!(!is_configured("YOUR_GOOGLE_SCRIPT_URL_HERE"));
        assert!(is_configured(
            "https://script.google.com/macros/s/deadbeef/exec"
        ));
    }
}
