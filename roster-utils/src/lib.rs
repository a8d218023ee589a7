/// Shared formatting helpers (alert content, mentions, truncation).
pub mod formatting;
/// Pure parser helpers for configuration values.
pub mod parse;

/// Discord rejects message content longer than this many characters.
pub const DISCORD_CONTENT_LIMIT: usize = 2000;
