use serenity::chat::ChatMessage;
use serenity::layout::{COMPACT_NAV_CLASS, DARK_THEME_CLASS};
use serenity::reveal::ENTRANCE_ANIMATION;
use serenity::toast::{
    Notification, NOTIFICATION_ICON_CLASS, NOTIFICATION_KEYFRAMES, NOTIFICATION_STYLE,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::dom::DomHandles;
use crate::page_model::{ACTIVE_CLASS, REVEALED_CLASS};

fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

pub(super) fn inject_styles(document: &Document) -> Result<(), JsValue> {
    let head = document.head().ok_or("document has no head")?;
    let style = document.create_element("style")?;
    style.set_text_content(Some(NOTIFICATION_KEYFRAMES));
    head.append_child(&style)?;
    Ok(())
}

/// Sets `active` on sections and nav buttons from precomputed flags, one per
/// discovered element.
pub(super) fn activate_section(
    dom: &DomHandles,
    sections: &[bool],
    buttons: &[bool],
) -> Result<(), JsValue> {
    for ((_, el), on) in dom.sections.iter().zip(sections) {
        el.class_list().toggle_with_force(ACTIVE_CLASS, *on)?;
    }
    for (button, on) in dom.nav_buttons.iter().zip(buttons) {
        button.class_list().toggle_with_force(ACTIVE_CLASS, *on)?;
    }
    Ok(())
}

// Text goes in through text_content so user input is never parsed as markup.
pub(super) fn append_message(dom: &DomHandles, msg: &ChatMessage) -> Result<(), JsValue> {
    let doc = &dom.document;
    let row = element(doc, "div", &format!("message {}", msg.author.css_class()))?;

    let avatar = element(doc, "div", "message-avatar")?;
    let icon = element(doc, "i", &format!("fas {}", msg.author.icon_class()))?;
    avatar.append_child(&icon)?;

    let content = element(doc, "div", "message-content")?;
    let text = element(doc, "p", "")?;
    text.set_text_content(Some(&msg.text));
    let time = element(doc, "span", "message-time")?;
    time.set_text_content(Some(&msg.timestamp_label()));
    content.append_child(&text)?;
    content.append_child(&time)?;

    row.append_child(&avatar)?;
    row.append_child(&content)?;
    dom.chat_log.append_child(&row)?;
    Ok(())
}

pub(super) fn scroll_chat_to_end(dom: &DomHandles) {
    dom.chat_log.set_scroll_top(dom.chat_log.scroll_height());
}

pub(super) fn show_notification(dom: &DomHandles, n: &Notification) -> Result<Element, JsValue> {
    let doc = &dom.document;
    let el = element(doc, "div", "notification")?;
    el.set_attribute("style", NOTIFICATION_STYLE)?;
    let icon = element(doc, "i", NOTIFICATION_ICON_CLASS)?;
    let text = element(doc, "span", "")?;
    text.set_text_content(Some(&n.display_text()));
    el.append_child(&icon)?;
    el.append_child(&text)?;
    dom.body.append_child(&el)?;
    Ok(el)
}

pub(super) fn reveal_card(card: &Element) -> Result<(), JsValue> {
    card.class_list().add_1(REVEALED_CLASS)?;
    if let Some(h) = card.dyn_ref::<HtmlElement>() {
        h.style().set_property("animation", ENTRANCE_ANIMATION)?;
    }
    Ok(())
}

pub(super) fn set_compact_nav(dom: &DomHandles, compact: bool) -> Result<(), JsValue> {
    dom.nav.class_list().toggle_with_force(COMPACT_NAV_CLASS, compact)?;
    Ok(())
}

pub(super) fn set_dark_theme(dom: &DomHandles, dark: bool) -> Result<(), JsValue> {
    dom.body.class_list().toggle_with_force(DARK_THEME_CLASS, dark)?;
    Ok(())
}

pub(super) fn scroll_into_view(el: &Element) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}
