use super::card::{CardDraft, RejectionReason};
use super::fields;
use super::markup::CompiledMarkup;
use scraper::{ElementRef, Html};

pub(crate) type CardOutcome = Result<CardDraft, RejectionReason>;

/// Reads every top-level review card in document order.
pub(crate) fn card_outcomes(
    html: &str,
    markup: &CompiledMarkup,
    fallback_location: &str,
) -> Vec<CardOutcome> {
    let document = Html::parse_document(html);
    document
        .select(&markup.card)
        .filter(|card| !is_nested_card(card, markup))
        .map(|card| read_card(card, markup, fallback_location))
        .collect()
}

// A card inside another card would otherwise have its text read twice.
fn is_nested_card(card: &ElementRef<'_>, markup: &CompiledMarkup) -> bool {
    card.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| markup.card.matches(&ancestor))
}

fn read_card(card: ElementRef<'_>, markup: &CompiledMarkup, fallback_location: &str) -> CardOutcome {
    if card.select(&markup.filled_star).next().is_none() {
        return Err(RejectionReason::MissingFilledStar);
    }

    let (role, location) = card
        .text()
        .find_map(|run| fields::match_role_location(run, fallback_location))
        .ok_or(RejectionReason::MissingRolePhrase)?;

    let time = card.text().find_map(fields::match_time_ago).unwrap_or_default();

    let fragments = card
        .select(&markup.body)
        .map(|paragraph| fields::clean_paragraph(&paragraph.text().collect::<String>()))
        .filter(|text| !fields::is_noise(text));
    let content = fields::join_content(fragments);
    if content.is_empty() {
        return Err(RejectionReason::EmptyContent);
    }

    Ok(CardDraft {
        role,
        location,
        content,
        time,
    })
}
