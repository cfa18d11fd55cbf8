//! The document contract and its translation into a [`PageLayout`].
//!
//! Kept out of the wasm-only `web` module so the parsing rules can be
//! unit-tested on the host.

use serenity::controller::PageLayout;
use serenity::nav::{Navigator, SectionId};
use serenity::reveal::CardKind;

pub const NAV_BUTTON_SELECTOR: &str = ".nav-btn";
pub const NAV_TARGET_ATTR: &str = "data-section";
pub const SECTION_SELECTOR: &str = ".section";
pub const NAV_SELECTOR: &str = ".nav";
pub const STATUS_SELECTOR: &str = ".status";
pub const CARD_TITLE_SELECTOR: &str = "h3";
pub const MESSAGE_INPUT_ID: &str = "messageInput";
pub const SEND_BUTTON_ID: &str = "sendBtn";
pub const CHAT_LOG_ID: &str = "chatMessages";
pub const CONFIG_SCRIPT_ID: &str = "serenity-config";
pub const ACTIVE_CLASS: &str = "active";
pub const REVEALED_CLASS: &str = "revealed";
/// Attribute stamped on observed cards so observer entries map back to a card.
pub const CARD_INDEX_ATTR: &str = "data-card-index";

/// What discovery read from the document, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawPage {
    /// Section element ids and whether they carry the `active` class.
    pub sections: Vec<(String, bool)>,
    /// `data-section` of each navigation button, in document order.
    pub nav_targets: Vec<Option<String>>,
    /// Card kind and title text, in document order.
    pub cards: Vec<(CardKind, String)>,
    pub status_text: String,
}

/// A validated page plus the mapping from DOM button index to the
/// controller's button index.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub layout: PageLayout,
    pub button_slots: Vec<Option<usize>>,
    pub skipped: Vec<String>,
}

impl PageModel {
    pub fn from_raw(raw: RawPage) -> Self {
        let mut skipped = Vec::new();

        let mut sections = Vec::with_capacity(raw.sections.len());
        for (id, active) in raw.sections {
            match id.parse::<SectionId>() {
                Ok(s) => sections.push((s, active)),
                Err(e) => skipped.push(format!("section: {e}")),
            }
        }

        let mut nav_buttons = Vec::new();
        let mut button_slots = Vec::with_capacity(raw.nav_targets.len());
        for (i, target) in raw.nav_targets.into_iter().enumerate() {
            let parsed = match target {
                Some(t) => t.parse::<SectionId>().map_err(|e| e.to_string()),
                None => Err(format!("missing {NAV_TARGET_ATTR}")),
            };
            match parsed {
                Ok(s) => {
                    button_slots.push(Some(nav_buttons.len()));
                    nav_buttons.push(s);
                }
                Err(e) => {
                    skipped.push(format!("nav button {i}: {e}"));
                    button_slots.push(None);
                }
            }
        }

        Self {
            layout: PageLayout {
                sections,
                nav_buttons,
                cards: raw.cards,
                status_text: raw.status_text,
            },
            button_slots,
            skipped,
        }
    }
}

/// `active` flag of every discovered `.section` element once `target` is
/// active. Only the first element whose id parses to `target` is set; every
/// other element is cleared, including ones with unknown ids.
pub fn section_states(ids: &[Option<SectionId>], target: SectionId) -> Vec<bool> {
    let first = ids.iter().position(|id| *id == Some(target));
    (0..ids.len()).map(|i| Some(i) == first).collect()
}

/// `active` flag of every discovered nav button, read from the navigator
/// through the button's slot. Buttons without a slot are always cleared.
pub fn button_states(slots: &[Option<usize>], nav: &Navigator) -> Vec<bool> {
    slots
        .iter()
        .map(|slot| slot.is_some_and(|i| nav.is_button_active(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_targets_are_skipped_but_keep_dom_order() {
        let model = PageModel::from_raw(RawPage {
            sections: vec![
                ("home".to_string(), true),
                ("pricing".to_string(), false),
                ("blog".to_string(), false),
            ],
            nav_targets: vec![
                Some("home".to_string()),
                None,
                Some("pricing".to_string()),
                Some("blog".to_string()),
            ],
            cards: vec![(CardKind::Blog, "Morning Flow".to_string())],
            status_text: "Online".to_string(),
        });

        assert_eq!(
            model.layout.sections,
            vec![(SectionId::Home, true), (SectionId::Blog, false)]
        );
        assert_eq!(model.layout.nav_buttons, vec![SectionId::Home, SectionId::Blog]);
        assert_eq!(model.button_slots, vec![Some(0), None, None, Some(1)]);
        assert_eq!(model.skipped.len(), 3);
    }

    #[test]
    fn mixed_case_targets_still_light_their_button() {
        let model = PageModel::from_raw(RawPage {
            sections: vec![("home".to_string(), true), ("blog".to_string(), false)],
            nav_targets: vec![Some("home".to_string()), Some(" Blog ".to_string())],
            ..RawPage::default()
        });
        let mut nav = Navigator::new(&model.layout.sections, model.layout.nav_buttons.clone());
        nav.activate(SectionId::Blog).unwrap();

        assert_eq!(button_states(&model.button_slots, &nav), vec![false, true]);
    }

    #[test]
    fn unparsed_buttons_are_never_active() {
        let nav = Navigator::new(&[(SectionId::Home, true)], vec![SectionId::Home]);
        assert_eq!(button_states(&[None, Some(0)], &nav), vec![false, true]);
    }

    #[test]
    fn unknown_sections_are_cleared_on_activation() {
        let ids = [
            Some(SectionId::Home),
            None,
            Some(SectionId::Blog),
            Some(SectionId::Blog),
        ];
        assert_eq!(
            section_states(&ids, SectionId::Blog),
            vec![false, false, true, false]
        );
        assert_eq!(section_states(&ids, SectionId::Guru), vec![false; 4]);
    }

    #[test]
    fn selectors_follow_markup_contract() {
        assert_eq!(NAV_BUTTON_SELECTOR, ".nav-btn");
        assert_eq!(MESSAGE_INPUT_ID, "messageInput");
        assert_eq!(CHAT_LOG_ID, "chatMessages");
    }
}
