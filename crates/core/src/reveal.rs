//! Personal/blog cards and their one-shot scroll reveal.

use serde::Serialize;

/// Entrance animation applied to a card when it is revealed.
pub const ENTRANCE_ANIMATION: &str = "fadeIn 0.6s ease forwards";

// Observers report ratios rounded to the thresholds they were given.
const RATIO_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Personal,
    Blog,
}

impl CardKind {
    /// Selector of the card container in the page markup.
    pub fn selector(self) -> &'static str {
        match self {
            CardKind::Personal => ".personal-card",
            CardKind::Blog => ".blog-card",
        }
    }

    /// Selector of the card's action button.
    pub fn action_selector(self) -> &'static str {
        match self {
            CardKind::Personal => ".card-btn",
            CardKind::Blog => ".read-more",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub title: String,
    pub revealed: bool,
}

/// One observation of a card against the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSample {
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Tracks which cards have been revealed. Reveals never revert.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    cards: Vec<Card>,
    threshold: f64,
}

impl RevealTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            cards: Vec::new(),
            threshold,
        }
    }

    /// Registers the page's cards, in document order, as unrevealed.
    pub fn observe_entrance(&mut self, cards: impl IntoIterator<Item = (CardKind, String)>) {
        for (kind, title) in cards {
            let id = CardId(self.cards.len());
            self.cards.push(Card {
                id,
                kind,
                title,
                revealed: false,
            });
        }
    }

    /// Applies one sample. Returns true only on the sample that reveals the card.
    pub fn observe(&mut self, id: CardId, sample: IntersectionSample) -> bool {
        let threshold = self.threshold;
        let Some(card) = self.cards.get_mut(id.0) else {
            return false;
        };
        if card.revealed {
            return false;
        }
        if sample.is_intersecting && sample.ratio + RATIO_EPSILON >= threshold {
            card.revealed = true;
            return true;
        }
        false
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RevealTracker {
        let mut t = RevealTracker::new(0.1);
        t.observe_entrance([
            (CardKind::Personal, "Meditation Tracker".to_string()),
            (CardKind::Blog, "Morning Flow".to_string()),
        ]);
        t
    }

    #[test]
    fn reveal_flips_once() {
        let mut t = tracker();
        let faint = IntersectionSample { is_intersecting: true, ratio: 0.05 };
        let enough = IntersectionSample { is_intersecting: true, ratio: 0.1 };
        let gone = IntersectionSample { is_intersecting: false, ratio: 0.0 };

        assert!(!t.observe(CardId(0), faint));
        assert!(!t.card(CardId(0)).unwrap().revealed);
        assert!(t.observe(CardId(0), enough));
        assert!(!t.observe(CardId(0), enough));
        assert!(!t.observe(CardId(0), gone));
        assert!(t.card(CardId(0)).unwrap().revealed);
        assert!(!t.card(CardId(1)).unwrap().revealed);
    }

    #[test]
    fn unknown_card_is_ignored() {
        let mut t = tracker();
        assert!(!t.observe(CardId(9), IntersectionSample { is_intersecting: true, ratio: 1.0 }));
    }

    #[test]
    fn selectors_match_markup_contract() {
        assert_eq!(CardKind::Personal.selector(), ".personal-card");
        assert_eq!(CardKind::Blog.action_selector(), ".read-more");
    }
}
