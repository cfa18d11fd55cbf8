use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hashbrown::HashMap;
use serenity::prelude::*;
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent,
};

use crate::page_model::{self, PageModel, CARD_INDEX_ATTR};

mod clock;
mod dom;
mod logging;
mod render;
mod timers;

use clock::BrowserClock;
use dom::DomHandles;

thread_local! {
    static BOOTED: Cell<bool> = const { Cell::new(false) };
    static PAGE: RefCell<Option<Rc<PageHost>>> = const { RefCell::new(None) };
}

/// Wires the page once the document is ready. Safe to call more than once.
#[wasm_bindgen(start)]
pub fn start() {
    if BOOTED.with(|b| b.replace(true)) {
        return;
    }

    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();
    logging::init();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        error!("no document; page not wired");
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(boot);
        if document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .is_err()
        {
            error!("failed to wait for DOMContentLoaded");
        }
    } else {
        boot();
    }
}

fn boot() {
    match PageHost::mount() {
        Ok(host) => PAGE.with(|p| *p.borrow_mut() = Some(host)),
        Err(e) => error!(error = %e, "page not wired"),
    }
}

struct PageHost {
    controller: RefCell<PageController>,
    dom: DomHandles,
    button_slots: Vec<Option<usize>>,
    timers: RefCell<HashMap<TaskId, i32>>,
    notifications: RefCell<HashMap<NotificationId, Element>>,
    observer: RefCell<Option<IntersectionObserver>>,
}

impl PageHost {
    fn mount() -> Result<Rc<Self>, String> {
        let (dom, raw) = DomHandles::discover()?;
        let model = PageModel::from_raw(raw);
        for s in &model.skipped {
            warn!("skipped {s}");
        }

        let config = match dom.config_json() {
            Some(raw) => PageConfig::from_json(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring page config");
                PageConfig::default()
            }),
            None => PageConfig::default(),
        };

        let controller = PageController::new(config, model.layout, Box::new(BrowserClock::new()))
            .map_err(|e| e.to_string())?;

        let host = Rc::new(Self {
            controller: RefCell::new(controller),
            dom,
            button_slots: model.button_slots,
            timers: RefCell::new(HashMap::new()),
            notifications: RefCell::new(HashMap::new()),
            observer: RefCell::new(None),
        });

        if let Err(e) = render::inject_styles(&host.dom.document) {
            warn!(error = ?e, "notification styles not injected");
        }
        host.wire_navigation()?;
        host.wire_chat()?;
        host.wire_cards()?;
        host.wire_resize()?;
        host.observe_entrance()?;

        let width = host.dom.viewport_width();
        let fx = host.controller.borrow_mut().start(width);
        host.apply(fx);
        info!("page wired");
        Ok(host)
    }

    fn listen<E: JsCast + 'static>(
        self: &Rc<Self>,
        target: &web_sys::EventTarget,
        event: &str,
        mut handler: impl FnMut(&Rc<Self>, E) + 'static,
    ) -> Result<(), String> {
        let host = Rc::clone(self);
        let cb = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(&host, ev);
            }
        });
        target
            .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            .map_err(|_| format!("failed to listen for {event}"))?;
        // Listeners live as long as the page.
        cb.forget();
        Ok(())
    }

    fn wire_navigation(self: &Rc<Self>) -> Result<(), String> {
        for (button, slot) in self.dom.nav_buttons.iter().zip(&self.button_slots) {
            let Some(index) = *slot else {
                continue;
            };
            self.listen(button, "click", move |host, _: web_sys::Event| {
                let fx = host.controller.borrow_mut().nav_clicked(index);
                host.apply(fx);
            })?;
        }
        Ok(())
    }

    fn wire_chat(self: &Rc<Self>) -> Result<(), String> {
        self.listen(&self.dom.send, "click", |host, _: web_sys::Event| {
            let value = host.dom.input.value();
            let fx = {
                let mut ctl = host.controller.borrow_mut();
                ctl.set_input(&value);
                ctl.send_message()
            };
            host.apply(fx);
        })?;

        self.listen(&self.dom.input, "keypress", |host, ev: KeyboardEvent| {
            let value = host.dom.input.value();
            let fx = {
                let mut ctl = host.controller.borrow_mut();
                ctl.set_input(&value);
                ctl.key_pressed(&ev.key())
            };
            host.apply(fx);
        })?;

        self.listen(&self.dom.input, "input", |host, _: web_sys::Event| {
            let value = host.dom.input.value();
            let fx = host.controller.borrow_mut().input_changed(&value);
            host.apply(fx);
        })
    }

    fn wire_cards(self: &Rc<Self>) -> Result<(), String> {
        for (i, card) in self.dom.cards.iter().enumerate() {
            self.listen(&card.action, "click", move |host, _: web_sys::Event| {
                let res = host.controller.borrow_mut().card_action(CardId(i));
                match res {
                    Ok(fx) => host.apply(fx),
                    Err(e) => warn!(error = %e, "card click ignored"),
                }
            })?;
        }
        Ok(())
    }

    fn wire_resize(self: &Rc<Self>) -> Result<(), String> {
        self.listen(&self.dom.window, "resize", |host, _: web_sys::Event| {
            let width = host.dom.viewport_width();
            let fx = host.controller.borrow_mut().handle_resize(width);
            host.apply(fx);
        })
    }

    fn observe_entrance(self: &Rc<Self>) -> Result<(), String> {
        let (threshold, margin) = {
            let ctl = self.controller.borrow();
            (ctl.config().reveal_threshold, ctl.config().reveal_root_margin())
        };

        let host = Rc::clone(self);
        let cb = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let Some(index) = entry
                    .target()
                    .get_attribute(CARD_INDEX_ATTR)
                    .and_then(|v| v.parse::<usize>().ok())
                else {
                    continue;
                };
                let sample = IntersectionSample {
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                };
                let fx = host.controller.borrow_mut().intersection(CardId(index), sample);
                host.apply(fx);
            }
        });

        let opts = IntersectionObserverInit::new();
        opts.set_threshold(&JsValue::from_f64(threshold));
        opts.set_root_margin(&margin);
        let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &opts)
            .map_err(|_| "IntersectionObserver unavailable".to_string())?;
        cb.forget();

        for card in &self.dom.cards {
            observer.observe(&card.root);
        }
        *self.observer.borrow_mut() = Some(observer);
        Ok(())
    }

    fn on_timer(self: &Rc<Self>, task: TaskId) {
        self.timers.borrow_mut().remove(&task);
        let fx = self.controller.borrow_mut().fire(task);
        self.apply(fx);
    }

    /// Applies controller effects to the document. Must be called with no
    /// controller borrow held, since timers re-enter the controller.
    fn apply(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            let res = match effect {
                Effect::ActivateSection(id) => {
                    let sections = page_model::section_states(&self.dom.section_ids(), id);
                    let buttons = page_model::button_states(
                        &self.button_slots,
                        self.controller.borrow().navigator(),
                    );
                    render::activate_section(&self.dom, &sections, &buttons)
                }
                Effect::AppendMessage(msg) => render::append_message(&self.dom, &msg),
                Effect::ClearInput => {
                    self.dom.input.set_value("");
                    Ok(())
                }
                Effect::ScrollChatToEnd => {
                    render::scroll_chat_to_end(&self.dom);
                    Ok(())
                }
                Effect::SetStatus(text) => {
                    self.dom.status.set_inner_html(&text);
                    Ok(())
                }
                Effect::ShowNotification(n) => render::show_notification(&self.dom, &n).map(|el| {
                    self.notifications.borrow_mut().insert(n.id, el);
                }),
                Effect::RemoveNotification(id) => {
                    if let Some(el) = self.notifications.borrow_mut().remove(&id) {
                        el.remove();
                    }
                    Ok(())
                }
                Effect::RevealCard(id) => match self.dom.cards.get(id.0) {
                    Some(card) => {
                        if let Some(obs) = self.observer.borrow().as_ref() {
                            obs.unobserve(&card.root);
                        }
                        render::reveal_card(&card.root)
                    }
                    None => Ok(()),
                },
                Effect::SetCompactNav(compact) => render::set_compact_nav(&self.dom, compact),
                Effect::SetDarkTheme(dark) => render::set_dark_theme(&self.dom, dark),
                Effect::ScrollIntoView(id) => {
                    if let Some(el) = self.dom.section(id) {
                        render::scroll_into_view(el);
                    }
                    Ok(())
                }
                Effect::ScheduleTimer { task, delay_ms } => {
                    let host = Rc::clone(self);
                    match timers::set_timeout(delay_ms, move || host.on_timer(task)) {
                        Ok(handle) => {
                            self.timers.borrow_mut().insert(task, handle);
                        }
                        Err(e) => warn!(error = %e, ?task, "timer not scheduled"),
                    }
                    Ok(())
                }
                Effect::CancelTimer(task) => {
                    if let Some(handle) = self.timers.borrow_mut().remove(&task) {
                        timers::clear_timeout(handle);
                    }
                    Ok(())
                }
            };
            if let Err(e) = res {
                warn!(error = ?e, "effect not applied");
            }
        }
    }

    fn teardown(self: &Rc<Self>) {
        let fx = self.controller.borrow_mut().teardown();
        self.apply(fx);
        if let Some(obs) = self.observer.borrow_mut().take() {
            obs.disconnect();
        }
    }
}

/// JavaScript handle on the wired page, for embedding and debugging.
///
/// ```javascript
/// const page = SerenityPage.current();
/// page.toggle_theme();
/// page.scroll_to("blog");
/// console.log(JSON.parse(page.snapshot_json()));
/// ```
#[wasm_bindgen]
pub struct SerenityPage {
    host: Rc<PageHost>,
}

#[wasm_bindgen]
impl SerenityPage {
    /// The page wired by `start`, once the document is ready.
    pub fn current() -> Option<SerenityPage> {
        PAGE.with(|p| p.borrow().clone()).map(|host| SerenityPage { host })
    }

    pub fn notify(&self, message: &str) {
        let fx = self.host.controller.borrow_mut().show_notification(message);
        self.host.apply(fx);
    }

    pub fn toggle_theme(&self) {
        let fx = self.host.controller.borrow_mut().toggle_theme();
        self.host.apply(fx);
    }

    pub fn scroll_to(&self, section: &str) -> Result<(), JsValue> {
        let id: SectionId = section
            .parse()
            .map_err(|e: PageError| JsValue::from_str(&e.to_string()))?;
        let fx = self
            .host
            .controller
            .borrow_mut()
            .scroll_to_section(id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.host.apply(fx);
        Ok(())
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let snap = self.host.controller.borrow().snapshot();
        serde_json::to_string(&snap).map_err(|e| JsValue::from_str(&format!("snapshot: {e}")))
    }

    /// Cancels pending replies and toasts and stops reacting to the page.
    pub fn teardown(&self) {
        self.host.teardown();
        PAGE.with(|p| p.borrow_mut().take());
    }
}
