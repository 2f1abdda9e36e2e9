//! Command grammar: splitting an invocation into title and spoiler text.

use crate::config::CommandConfig;

/// A structurally complete spoiler command. Both fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoilerCommand {
    pub title: String,
    pub payload: String,
}

/// Whether the message body invokes the spoiler command at all. Prefixed
/// messages that fail this check belong to other tooling and get no reply.
pub fn is_invocation(body: &str, command: &CommandConfig) -> bool {
    body.starts_with(&command.command())
}

/// Split a command body into title and spoiler text.
///
/// The keyword plus exactly one following character are dropped without
/// inspection, the remainder is split on the delimiter, and the first two
/// segments become title and payload. Segments past the second are
/// discarded. `None` means the invocation is structurally incomplete and the
/// caller should fall back to the help response.
pub fn parse(body: &str, command: &CommandConfig) -> Option<SpoilerCommand> {
    let rest = body.strip_prefix(&command.command())?;

    // Drop the separator slot, whatever character occupies it.
    let mut chars = rest.chars();
    chars.next();
    let rest = chars.as_str();

    if rest.is_empty() {
        return None;
    }

    let mut segments = rest.split(command.delimiter);
    let title = segments.next().unwrap_or_default().trim();
    let payload = segments.next()?.trim();

    if payload.is_empty() {
        return None;
    }

    Some(SpoilerCommand {
        title: title.to_string(),
        payload: payload.to_string(),
    })
}
