const PAGE_STYLE: &str = "font-family: Arial, sans-serif; text-align: center; padding: 50px;";

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body style="{PAGE_STYLE}">
{body}
</body>
</html>"#
    )
}

pub fn success_page(token_preview: &str) -> String {
    page(
        "Refresh token created",
        &format!(
            r#"    <h1 style="color: #4CAF50;">&#10003; Success!</h1>
    <p>A refresh token has been created.</p>
    <p><strong>Token:</strong> {}...</p>
    <p>Check the console to copy the full token.</p>
    <p>You can close this window.</p>"#,
            escape_html(token_preview)
        ),
    )
}

pub fn missing_refresh_token_page() -> String {
    page(
        "No refresh token",
        r#"    <h1 style="color: #f44336;">&#10007; Error</h1>
    <p>No refresh token was returned. Please try again.</p>"#,
    )
}

pub fn exchange_failed_page() -> String {
    page("Token exchange failed", "    <h1>Token exchange failed</h1>")
}

pub fn missing_code_page(provider_error: Option<&str>) -> String {
    let detail = provider_error
        .map(|e| format!("\n    <p>Provider error: {}</p>", escape_html(e)))
        .unwrap_or_default();
    page(
        "Authorization code not found",
        &format!("    <h1>Authorization code not found</h1>{detail}"),
    )
}

pub fn already_processed_page() -> String {
    page(
        "Already processed",
        "    <h1>An authorization code was already processed</h1>\n    \
         <p>Check the console for the result.</p>",
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_page_shows_only_the_preview() {
        let html = success_page("1//0gPreviewOnly");
        assert!(html.contains("1//0gPreviewOnly..."));
        assert!(html.contains("Check the console"));
    }

    #[test]
    fn provider_error_is_escaped() {
        let html = missing_code_page(Some("<script>access_denied</script>"));
        assert!(html.contains("&lt;script&gt;access_denied&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
