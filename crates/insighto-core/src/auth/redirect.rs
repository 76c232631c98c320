use url::Url;

/// Landing page after sign-in when the requested target is rejected.
pub const DEFAULT_REDIRECT_PATH: &str = "/dashboard";

/// Resolve a post sign-in redirect target against the application origin.
///
/// Relative paths are joined onto `base_url`, absolute URLs are kept only when
/// they share the application's origin, and anything else falls back to the
/// dashboard.
pub fn resolve_redirect(url: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');

    if url.starts_with('/') {
        return format!("{base}{url}");
    }

    let same_origin = match (Url::parse(url), Url::parse(base)) {
        (Ok(target), Ok(app)) => target.origin() == app.origin(),
        _ => false,
    };

    if same_origin {
        url.to_string()
    } else {
        format!("{base}{DEFAULT_REDIRECT_PATH}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BASE: &str = "https://app.insighto.io";

    #[rstest]
    #[case("/insights", "https://app.insighto.io/insights")]
    #[case("/accounts?tab=1", "https://app.insighto.io/accounts?tab=1")]
    #[case("https://app.insighto.io/analytics", "https://app.insighto.io/analytics")]
    #[case("https://evil.example.com/phish", "https://app.insighto.io/dashboard")]
    #[case("http://app.insighto.io/analytics", "https://app.insighto.io/dashboard")]
    #[case("https://app.insighto.io:8443/x", "https://app.insighto.io/dashboard")]
    #[case("javascript:alert(1)", "https://app.insighto.io/dashboard")]
    #[case("not a url", "https://app.insighto.io/dashboard")]
    #[case("", "https://app.insighto.io/dashboard")]
    fn test_resolve_redirect(#[case] target: &str, #[case] expected: &str) {
        assert_eq!(resolve_redirect(target, BASE), expected);
    }

    #[test]
    fn test_trailing_slash_on_base() {
        assert_eq!(
            resolve_redirect("/dashboard", "http://localhost:3000/"),
            "http://localhost:3000/dashboard"
        );
    }
}
