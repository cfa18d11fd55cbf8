use serenity::nav::SectionId;
use serenity::reveal::CardKind;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

use crate::page_model::{
    RawPage, ACTIVE_CLASS, CARD_INDEX_ATTR, CARD_TITLE_SELECTOR, CHAT_LOG_ID, CONFIG_SCRIPT_ID,
    MESSAGE_INPUT_ID, NAV_BUTTON_SELECTOR, NAV_SELECTOR, NAV_TARGET_ATTR, SECTION_SELECTOR,
    SEND_BUTTON_ID, STATUS_SELECTOR,
};

pub(super) struct CardHandle {
    pub(super) root: Element,
    pub(super) action: Element,
}

/// Every element the page controller reads or writes. Missing required
/// elements are a markup defect and fail discovery.
pub(super) struct DomHandles {
    pub(super) window: Window,
    pub(super) document: Document,
    pub(super) body: HtmlElement,
    pub(super) nav: Element,
    pub(super) nav_buttons: Vec<Element>,
    /// Every `.section` element in document order, with its parsed id.
    pub(super) sections: Vec<(Option<SectionId>, Element)>,
    pub(super) input: HtmlInputElement,
    pub(super) send: Element,
    pub(super) chat_log: Element,
    pub(super) status: Element,
    pub(super) cards: Vec<CardHandle>,
}

impl DomHandles {
    pub(super) fn discover() -> Result<(Self, RawPage), String> {
        let window = web_sys::window().ok_or("no window".to_string())?;
        let document = window.document().ok_or("no document".to_string())?;
        let body = document.body().ok_or("document has no body".to_string())?;

        let nav = query_one(&document, NAV_SELECTOR)?;
        let status = query_one(&document, STATUS_SELECTOR)?;
        let input = by_id(&document, MESSAGE_INPUT_ID)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| format!("#{MESSAGE_INPUT_ID} is not an input"))?;
        let send = by_id(&document, SEND_BUTTON_ID)?;
        let chat_log = by_id(&document, CHAT_LOG_ID)?;

        let mut raw = RawPage {
            status_text: status.inner_html(),
            ..RawPage::default()
        };

        let mut sections = Vec::new();
        for el in query_all(&document, SECTION_SELECTOR)? {
            let id = el.id();
            raw.sections.push((id.clone(), el.class_list().contains(ACTIVE_CLASS)));
            sections.push((id.parse::<SectionId>().ok(), el));
        }

        let nav_buttons = query_all(&document, NAV_BUTTON_SELECTOR)?;
        raw.nav_targets = nav_buttons
            .iter()
            .map(|b| b.get_attribute(NAV_TARGET_ATTR))
            .collect();

        let mut cards = Vec::new();
        for kind in [CardKind::Personal, CardKind::Blog] {
            for root in query_all(&document, kind.selector())? {
                let title = child(&root, CARD_TITLE_SELECTOR)?
                    .text_content()
                    .unwrap_or_default();
                let action = child(&root, kind.action_selector())?;
                let _ = root.set_attribute(CARD_INDEX_ATTR, &cards.len().to_string());
                raw.cards.push((kind, title));
                cards.push(CardHandle { root, action });
            }
        }

        Ok((
            Self {
                window,
                document,
                body,
                nav,
                nav_buttons,
                sections,
                input,
                send,
                chat_log,
                status,
                cards,
            },
            raw,
        ))
    }

    /// First section element with this id.
    pub(super) fn section(&self, id: SectionId) -> Option<&Element> {
        self.sections
            .iter()
            .find(|(parsed, _)| *parsed == Some(id))
            .map(|(_, el)| el)
    }

    pub(super) fn section_ids(&self) -> Vec<Option<SectionId>> {
        self.sections.iter().map(|(id, _)| *id).collect()
    }

    /// Raw JSON from `<script type="application/json" id="serenity-config">`.
    pub(super) fn config_json(&self) -> Option<String> {
        self.document
            .get_element_by_id(CONFIG_SCRIPT_ID)
            .and_then(|el| el.text_content())
            .filter(|s| !s.trim().is_empty())
    }

    pub(super) fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}

fn by_id(document: &Document, id: &str) -> Result<Element, String> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("missing #{id}"))
}

fn query_one(document: &Document, selector: &str) -> Result<Element, String> {
    document
        .query_selector(selector)
        .map_err(|_| format!("bad selector {selector}"))?
        .ok_or_else(|| format!("missing {selector}"))
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, String> {
    let list = document
        .query_selector_all(selector)
        .map_err(|_| format!("bad selector {selector}"))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect())
}

fn child(root: &Element, selector: &str) -> Result<Element, String> {
    root.query_selector(selector)
        .map_err(|_| format!("bad selector {selector}"))?
        .ok_or_else(|| format!("card is missing {selector}"))
}
