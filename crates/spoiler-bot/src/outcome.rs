//! Outcome classification for parsed commands.

use crate::cipher;
use crate::config::CommandConfig;
use crate::parser::SpoilerCommand;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters the decode site's query parser takes raw: ASCII alphanumerics
/// plus `- _ . ! ~ * ' ( )`. Every other character is escaped byte-wise as
/// `%XX`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Terminal classification of one incoming command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Structurally incomplete; walk the author through the syntax.
    Help,
    /// Title over the length limit.
    TitleTooLong,
    /// Decode link over the length limit.
    PayloadTooLong,
    /// Valid spoiler, ready to publish.
    Success(Spoiler),
}

impl Outcome {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Help => "help",
            Outcome::TitleTooLong => "title too long",
            Outcome::PayloadTooLong => "spoiler too long",
            Outcome::Success(_) => "spoiler",
        }
    }
}

/// Payload of a successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spoiler {
    /// Cleartext title, shown to everyone.
    pub title: String,
    /// ROT13-ciphered spoiler text.
    pub ciphered: String,
    /// Decode link carrying the ciphered text.
    pub link: String,
}

/// Decide which response a parsed command gets.
///
/// The title limit applies to the cleartext title before anything is
/// ciphered. The spoiler limit applies to the finished decode link after
/// percent-encoding, not to the raw text, so two spoilers of equal raw
/// length can classify differently.
pub fn resolve(parsed: Option<SpoilerCommand>, command: &CommandConfig) -> Outcome {
    let Some(parsed) = parsed else {
        return Outcome::Help;
    };

    if parsed.title.chars().count() > command.title_max_len {
        return Outcome::TitleTooLong;
    }

    let ciphered = cipher::rot13(&parsed.payload);
    let link = format!("{}{}", command.decode_url_base, encode_component(&ciphered));

    if link.chars().count() > command.url_max_len {
        return Outcome::PayloadTooLong;
    }

    Outcome::Success(Spoiler {
        title: parsed.title,
        ciphered,
        link,
    })
}

/// Percent-encode a decode link query value.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> CommandConfig {
        CommandConfig::default()
    }

    fn parsed(title: &str, payload: &str) -> Option<SpoilerCommand> {
        Some(SpoilerCommand {
            title: title.into(),
            payload: payload.into(),
        })
    }

    #[test]
    fn test_missing_command_resolves_to_help() {
        assert_eq!(resolve(None, &command()), Outcome::Help);
    }

    #[test]
    fn test_valid_spoiler() {
        let outcome = resolve(parsed("movie title", "plot twist"), &command());

        let Outcome::Success(spoiler) = outcome else {
            panic!("expected success, got {:?}", outcome);
        };
        assert_eq!(spoiler.title, "movie title");
        assert_eq!(spoiler.ciphered, "cybg gjvfg");
        assert_eq!(spoiler.link, "http://www.decode.org?q=cybg%20gjvfg");
    }

    #[test]
    fn test_title_boundary() {
        let at_limit = "x".repeat(256);
        assert!(matches!(
            resolve(parsed(&at_limit, "ok"), &command()),
            Outcome::Success(_)
        ));

        let over_limit = "x".repeat(257);
        assert_eq!(
            resolve(parsed(&over_limit, "ok"), &command()),
            Outcome::TitleTooLong
        );
    }

    #[test]
    fn test_title_length_counted_in_characters() {
        // 256 two-byte characters still fit the limit.
        let title = "\u{e9}".repeat(256);
        assert!(matches!(
            resolve(parsed(&title, "ok"), &command()),
            Outcome::Success(_)
        ));
    }

    #[test]
    fn test_link_boundary() {
        // The base is 24 characters, so 1976 unreserved characters land the
        // link exactly on the 2000 limit.
        let at_limit = "a".repeat(1976);
        assert!(matches!(
            resolve(parsed("t", &at_limit), &command()),
            Outcome::Success(_)
        ));

        let over_limit = "a".repeat(1977);
        assert_eq!(
            resolve(parsed("t", &over_limit), &command()),
            Outcome::PayloadTooLong
        );
    }

    #[test]
    fn test_limit_applies_to_encoded_link_not_raw_text() {
        // Equal raw length, different encoded length: spaces expand to %20.
        let letters = "a".repeat(1000);
        assert!(matches!(
            resolve(parsed("t", &letters), &command()),
            Outcome::Success(_)
        ));

        let spaced = "a ".repeat(500);
        let spaced = spaced.trim();
        assert_eq!(spaced.chars().count(), 999);
        assert_eq!(
            resolve(parsed("t", spaced), &command()),
            Outcome::PayloadTooLong
        );
    }

    #[test]
    fn test_title_checked_before_payload() {
        let outcome = resolve(
            parsed(&"x".repeat(300), &"a".repeat(5000)),
            &command(),
        );
        assert_eq!(outcome, Outcome::TitleTooLong);
    }

    #[test]
    fn test_encode_component_unreserved_set() {
        // The JavaScript-style unreserved set survives unescaped.
        assert_eq!(
            encode_component("AZaz09-_.!~*'()"),
            "AZaz09-_.!~*'()"
        );
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("a|b"), "a%7Cb");
        assert_eq!(encode_component("a/b?c=d&e"), "a%2Fb%3Fc%3Dd%26e");
        // Multi-byte characters escape every UTF-8 byte.
        assert_eq!(encode_component("\u{e9}"), "%C3%A9");
    }

    #[test]
    fn test_custom_limits() {
        let command = CommandConfig {
            title_max_len: 4,
            url_max_len: 30,
            ..CommandConfig::default()
        };

        assert_eq!(
            resolve(parsed("12345", "ok"), &command),
            Outcome::TitleTooLong
        );
        // Base (24) + 7 encoded characters = 31.
        assert_eq!(
            resolve(parsed("ok", "abcdefg"), &command),
            Outcome::PayloadTooLong
        );
        assert!(matches!(
            resolve(parsed("ok", "abcdef"), &command),
            Outcome::Success(_)
        ));
    }
}
