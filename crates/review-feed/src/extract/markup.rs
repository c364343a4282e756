use super::ExtractError;
use scraper::Selector;

/// Structural markers identifying the parts of a saved review page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewMarkup {
    /// CSS selector for a single review card container.
    pub card_selector: String,
    /// CSS selector for the star icon rendered on five-star reviews.
    pub filled_star_selector: String,
    /// Fragment of the `class` attribute carried by review body paragraphs.
    pub body_class: String,
}

impl Default for ReviewMarkup {
    fn default() -> Self {
        Self {
            card_selector: r#"[data-testid="review-card"]"#.to_string(),
            filled_star_selector: r#"[data-testid="filled-star"]"#.to_string(),
            body_class: "xYFng".to_string(),
        }
    }
}

impl ReviewMarkup {
    pub(crate) fn compile(&self) -> Result<CompiledMarkup, ExtractError> {
        let body = format!(r#"p[class*="{}"]"#, self.body_class.replace('"', ""));
        Ok(CompiledMarkup {
            card: parse_selector(&self.card_selector)?,
            filled_star: parse_selector(&self.filled_star_selector)?,
            body: parse_selector(&body)?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledMarkup {
    pub(crate) card: Selector,
    pub(crate) filled_star: Selector,
    pub(crate) body: Selector,
}

fn parse_selector(raw: &str) -> Result<Selector, ExtractError> {
    Selector::parse(raw).map_err(|err| ExtractError::Selector(format!("'{raw}': {err}")))
}
