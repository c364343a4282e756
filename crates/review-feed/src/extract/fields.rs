use super::card::ReviewerRole;
use regex::Regex;
use std::sync::LazyLock;

// The phrase has to live in one text run; `in` must be a whole word so
// suburbs like "Kelvin Grove" are not split inside "Kelvin".
static RE_ROLE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Seller|Buyer)\s+of\s+house[^<]*?\bin\s+([^<,]+)").unwrap()
});
static RE_TIME_AGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\s+(?:days?|months?|years?)\s+ago\b").unwrap());
static RE_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});").unwrap()
});
static RE_BARE_DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+$").unwrap());

/// Named references that survive in saved review pages; anything else is dropped.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("nbsp", " "),
    ("quot", "\""),
    ("apos", "'"),
    ("lt", "<"),
    ("gt", ">"),
    ("eacute", "\u{e9}"),
    ("egrave", "\u{e8}"),
    ("aacute", "\u{e1}"),
    ("ndash", "\u{2013}"),
    ("mdash", "\u{2014}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("ldquo", "\u{201c}"),
    ("rdquo", "\u{201d}"),
    ("hellip", "\u{2026}"),
];

const READ_MORE: &str = "Read more";

pub(crate) fn match_role_location(text: &str, fallback: &str) -> Option<(ReviewerRole, String)> {
    let captures = RE_ROLE_LOCATION.captures(text)?;
    let role = ReviewerRole::from_token(captures.get(1)?.as_str())?;
    let location = captures
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback);
    Some((role, location.to_string()))
}

pub(crate) fn match_time_ago(text: &str) -> Option<String> {
    RE_TIME_AGO.find(text).map(|m| m.as_str().to_string())
}

pub(crate) fn clean_paragraph(raw: &str) -> String {
    let text = decode_residual_entities(raw.to_string());
    let text = text.replace('\u{a0}', " ").replace(['<', '>'], "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Each pass that changes the text makes it strictly shorter, so this terminates.
fn decode_residual_entities(mut text: String) -> String {
    loop {
        let decoded = RE_ENTITY
            .replace_all(&text, |captures: &regex::Captures<'_>| decode_entity(&captures[1]))
            .into_owned();
        if decoded == text {
            return text;
        }
        text = decoded;
    }
}

fn decode_entity(name: &str) -> String {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => number.parse::<u32>().ok(),
        };
        return code
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default();
    }
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, replacement)| replacement.to_string())
        .unwrap_or_default()
}

/// Fragments that are never prose: empty text, the "Read more" toggle, or a stray rating label.
pub(crate) fn is_noise(text: &str) -> bool {
    if text.is_empty() || RE_BARE_DECIMAL.is_match(text) {
        return true;
    }
    text.trim_end_matches(['.', '\u{2026}'])
        .trim_end()
        .eq_ignore_ascii_case(READ_MORE)
}

pub(crate) fn join_content<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let joined = fragments.into_iter().collect::<Vec<_>>().join(" ");
    let trimmed = joined.trim_end();
    let without_ellipsis = trimmed
        .strip_suffix("...")
        .or_else(|| trimmed.strip_suffix('\u{2026}'))
        .unwrap_or(trimmed);
    without_ellipsis.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Brisbane";

    #[test]
    fn role_and_location_are_read_from_phrase() {
        let (role, location) =
            match_role_location("Seller of house in Toowong, 3 months ago", FALLBACK)
                .expect("phrase matches");
        assert_eq!(role, ReviewerRole::Seller);
        assert_eq!(location, "Toowong");

        let (role, location) =
            match_role_location("Buyer of house  in  New Farm", FALLBACK).expect("phrase matches");
        assert_eq!(role, ReviewerRole::Buyer);
        assert_eq!(location, "New Farm");
    }

    #[test]
    fn location_connective_must_be_a_whole_word() {
        let (_, location) = match_role_location("Seller of house in Kelvin Grove", FALLBACK)
            .expect("phrase matches");
        assert_eq!(location, "Kelvin Grove");

        let (_, location) =
            match_role_location("Buyer of house in Paddington, sold in 2023", FALLBACK)
                .expect("phrase matches");
        assert_eq!(location, "Paddington");
    }

    #[test]
    fn blank_location_uses_fallback() {
        let (role, location) =
            match_role_location("Seller of house in \u{a0}, 2 years ago", FALLBACK)
                .expect("phrase matches");
        assert_eq!(role, ReviewerRole::Seller);
        assert_eq!(location, FALLBACK);
    }

    #[test]
    fn phrase_without_role_or_location_does_not_match() {
        assert!(match_role_location("Landlord of house in Toowong", FALLBACK).is_none());
        assert!(match_role_location("Seller of unit in Toowong", FALLBACK).is_none());
        assert!(match_role_location("Seller of house", FALLBACK).is_none());
        assert!(match_role_location("seller of house in Toowong", FALLBACK).is_none());
    }

    #[test]
    fn time_ago_handles_singular_plural_and_zero() {
        assert_eq!(match_time_ago("3 months ago").as_deref(), Some("3 months ago"));
        assert_eq!(match_time_ago("posted 1 year ago").as_deref(), Some("1 year ago"));
        assert_eq!(match_time_ago("0 days ago, Toowong").as_deref(), Some("0 days ago"));
        assert_eq!(match_time_ago("in 2 weeks ago"), None);
        assert_eq!(match_time_ago("a month ago"), None);
        assert_eq!(match_time_ago("3 months"), None);
    }

    #[test]
    fn angle_brackets_are_dropped_without_losing_words() {
        assert_eq!(clean_paragraph("a <b> c"), "a b c");
        assert_eq!(
            clean_paragraph("Sold for < asking and > expectations."),
            "Sold for asking and expectations."
        );
        assert_eq!(clean_paragraph("a &lt;b&gt; c"), "a b c");
        assert_eq!(
            clean_paragraph("  Great agent&nbsp;and\u{a0}team  "),
            "Great agent and team"
        );
    }

    #[test]
    fn double_escaped_entities_are_fully_decoded() {
        assert_eq!(clean_paragraph("Tom &amp;amp; Jerry &amp;nbsp;"), "Tom & Jerry");
        assert_eq!(
            clean_paragraph("Caf&amp;eacute; &amp;mdash; great"),
            "Caf\u{e9} \u{2014} great"
        );
        assert_eq!(
            clean_paragraph("Great&amp;amp;amp;amp;amp;nbsp;team"),
            "Great team"
        );
        assert_eq!(clean_paragraph("We&amp;#8217;re thrilled"), "We\u{2019}re thrilled");
        assert_eq!(clean_paragraph("Tick &amp;#x2713; done"), "Tick \u{2713} done");
    }

    #[test]
    fn unknown_or_invalid_references_are_removed() {
        let cleaned = clean_paragraph("Odd &amp;zwnj; and &amp;#1114112; refs");
        assert_eq!(cleaned, "Odd and refs");
        assert!(!cleaned.contains('&'));
        assert_eq!(clean_paragraph("Fish & chips; cheap"), "Fish & chips; cheap");
    }

    #[test]
    fn noise_fragments_are_recognised() {
        assert!(is_noise(""));
        assert!(is_noise("Read more"));
        assert!(is_noise("Read more..."));
        assert!(is_noise("4.8"));
        assert!(is_noise("5.0"));
        assert!(!is_noise("5 stars from us"));
        assert!(!is_noise("Read more reviews like this one? Absolutely."));
    }

    #[test]
    fn content_join_strips_trailing_ellipsis() {
        let content = join_content(vec![
            "Sold above reserve.".to_string(),
            "Would recommend...".to_string(),
        ]);
        assert_eq!(content, "Sold above reserve. Would recommend");
        assert_eq!(join_content(vec!["Brilliant\u{2026}".to_string()]), "Brilliant");
        assert_eq!(join_content(Vec::<String>::new()), "");
    }
}
