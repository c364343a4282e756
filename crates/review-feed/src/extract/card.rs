use serde::{Deserialize, Serialize};
use std::fmt;

/// Only five-star cards make it into the feed, so every record carries this rating.
pub const FIVE_STAR_RATING: u8 = 5;

/// Which side of the sale the reviewer was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewerRole {
    Seller,
    Buyer,
}

impl ReviewerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewerRole::Seller => "Seller",
            ReviewerRole::Buyer => "Buyer",
        }
    }

    pub(crate) fn from_token(token: &str) -> Option<Self> {
        match token {
            "Seller" => Some(Self::Seller),
            "Buyer" => Some(Self::Buyer),
            _ => None,
        }
    }
}

impl fmt::Display for ReviewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One accepted review in the shape the website's content feed consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCard {
    pub id: u32,
    pub rating: u8,
    #[serde(rename = "type")]
    pub role: ReviewerRole,
    pub location: String,
    pub content: String,
    pub time: String,
}

/// Fields pulled from a card that passed every check, before it is numbered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CardDraft {
    pub(crate) role: ReviewerRole,
    pub(crate) location: String,
    pub(crate) content: String,
    pub(crate) time: String,
}

impl CardDraft {
    pub(crate) fn into_review(self, id: u32) -> ReviewCard {
        ReviewCard {
            id,
            rating: FIVE_STAR_RATING,
            role: self.role,
            location: self.location,
            content: self.content,
            time: self.time,
        }
    }
}

/// Why a review card was left out of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    MissingFilledStar,
    MissingRolePhrase,
    EmptyContent,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RejectionReason::MissingFilledStar => "no filled-star rating marker",
            RejectionReason::MissingRolePhrase => "no \"Seller/Buyer of house ... in <suburb>\" phrase",
            RejectionReason::EmptyContent => "no review text after cleaning",
        };
        f.write_str(label)
    }
}

/// A skipped card, identified by its 1-based position among all cards in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardRejection {
    pub position: usize,
    pub reason: RejectionReason,
}
