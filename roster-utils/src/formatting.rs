use crate::DISCORD_CONTENT_LIMIT;

const ELLIPSIS: &str = "...";

/// Prefix a message with a Discord user mention when a recipient is configured.
pub fn with_mention(message: &str, ping_id: Option<&str>) -> String {
    match ping_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => format!("<@{}> {}", id, message),
        None => message.to_owned(),
    }
}

/// Build alert content: the message, then the error inside a code block.
///
/// The error text is shortened so the whole content fits Discord's limit.
pub fn format_alert_content(message: &str, error: &str) -> String {
    let overhead = message.chars().count() + "\n``````".len();
    let budget = DISCORD_CONTENT_LIMIT.saturating_sub(overhead);
    format!("{}\n```{}```", message, truncate_chars(error, budget))
}

/// Cut `value` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }

    if max_chars <= ELLIPSIS.len() {
        return value.chars().take(max_chars).collect();
    }

    let mut truncated: String = value.chars().take(max_chars - ELLIPSIS.len()).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
