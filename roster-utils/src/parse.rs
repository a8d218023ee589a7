/// Parse a boolean flag like `1`, `true`, `yes` or `on` (case-insensitive).
///
/// Returns `None` for anything that is not a recognised truthy or falsy token.
pub fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Trim a raw value and drop it entirely when nothing is left.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Normalise a base URL so paths can be appended with a leading `/`.
pub fn trim_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::{non_empty, parse_bool_flag, trim_base_url};

    #[test]
    fn parses_bool_flags() {
        assert_eq!(parse_bool_flag("true"), Some(true));
        assert_eq!(parse_bool_flag(" YES "), Some(true));
        assert_eq!(parse_bool_flag("1"), Some(true));
        assert_eq!(parse_bool_flag("off"), Some(false));
        assert_eq!(parse_bool_flag("0"), Some(false));
        assert_eq!(parse_bool_flag("maybe"), None);
        assert_eq!(parse_bool_flag(""), None);
    }

    #[test]
    fn empty_values_are_dropped() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("   ".to_owned())), None);
        assert_eq!(non_empty(Some(" 123 ".to_owned())), Some("123".to_owned()));
    }

    #[test]
    fn base_urls_lose_trailing_slashes() {
        assert_eq!(trim_base_url("https://ctf.example.org/"), "https://ctf.example.org");
        assert_eq!(trim_base_url("https://ctf.example.org//"), "https://ctf.example.org");
        assert_eq!(trim_base_url(" https://ctf.example.org "), "https://ctf.example.org");
    }
}
