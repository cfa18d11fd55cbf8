//! The page controller: one instance per page, owning every piece of page
//! state. Hosts forward user gestures and timer expiries to it and apply the
//! [`Effect`]s it returns to the document.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chat::{pick_response, Author, ChatLog, ChatMessage};
use crate::config::PageConfig;
use crate::error::{PageError, Result};
use crate::layout::{ResponsiveLayout, Theme};
use crate::nav::{Navigator, SectionId};
use crate::prng::Prng;
use crate::reveal::{Card, CardId, CardKind, IntersectionSample, RevealTracker};
use crate::scheduler::{Scheduler, TaskId};
use crate::time::Clock;
use crate::toast::{
    self, Notification, NotificationId, NotificationSlot, ARTICLE_GLYPH, FEATURE_GLYPH,
    WELCOME_GLYPH,
};

/// What the host found in the document at startup.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// Sections in document order with their markup `active` marker.
    pub sections: Vec<(SectionId, bool)>,
    /// Target of each navigation button, in document order.
    pub nav_buttons: Vec<SectionId>,
    /// Personal and blog cards in document order with their titles.
    pub cards: Vec<(CardKind, String)>,
    /// Initial text of the guru status indicator.
    pub status_text: String,
}

/// A change the host must make to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Mark this section and the buttons targeting it active; clear all others.
    ActivateSection(SectionId),
    AppendMessage(ChatMessage),
    ClearInput,
    ScrollChatToEnd,
    SetStatus(String),
    ShowNotification(Notification),
    RemoveNotification(NotificationId),
    RevealCard(CardId),
    SetCompactNav(bool),
    SetDarkTheme(bool),
    ScrollIntoView(SectionId),
    /// Call [`PageController::fire`] with `task` after `delay_ms`.
    ScheduleTimer { task: TaskId, delay_ms: u32 },
    /// Drop the host timer for `task`; it will not be fired.
    CancelTimer(TaskId),
}

#[derive(Debug, Clone)]
enum Task {
    AssistantReply,
    ExpireNotification(NotificationId),
    Welcome,
    ResetStatus,
}

#[derive(Debug, Clone)]
struct StatusIndicator {
    original: String,
    typing: bool,
    reset: Option<TaskId>,
}

/// Serializable view of the whole page, for embedding hosts and debugging.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub active_section: Option<SectionId>,
    pub active_buttons: Vec<usize>,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub notification: Option<Notification>,
    pub cards: Vec<Card>,
    pub compact_nav: bool,
    pub theme: Theme,
    pub status: String,
    pub pending_tasks: usize,
    pub torn_down: bool,
}

pub struct PageController {
    config: PageConfig,
    clock: Box<dyn Clock>,
    rng: Prng,
    scheduler: Scheduler<Task>,
    nav: Navigator,
    chat: ChatLog,
    toasts: NotificationSlot,
    reveal: RevealTracker,
    layout: ResponsiveLayout,
    theme: Theme,
    status: StatusIndicator,
    torn_down: bool,
}

impl PageController {
    pub fn new(config: PageConfig, page: PageLayout, clock: Box<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let rng = match config.rng_seed {
            Some(seed) => Prng::new(seed),
            None => Prng::from_entropy(),
        };
        let mut reveal = RevealTracker::new(config.reveal_threshold);
        reveal.observe_entrance(page.cards);

        Ok(Self {
            rng,
            scheduler: Scheduler::new(),
            nav: Navigator::new(&page.sections, page.nav_buttons),
            chat: ChatLog::new(),
            toasts: NotificationSlot::new(),
            reveal,
            layout: ResponsiveLayout::new(config.compact_breakpoint_px),
            theme: Theme::default(),
            status: StatusIndicator {
                original: page.status_text,
                typing: false,
                reset: None,
            },
            torn_down: false,
            clock,
            config,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Initial pass once the document is ready: syncs the active section and
    /// the navigation layout, and queues the welcome toast.
    pub fn start(&mut self, viewport_width: f64) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        let mut fx = Vec::new();
        if let Some(active) = self.nav.active() {
            fx.push(Effect::ActivateSection(active));
        }
        fx.extend(self.handle_resize(viewport_width));
        self.schedule(self.config.welcome_delay_ms, Task::Welcome, &mut fx);
        info!(
            sections = self.nav.sections().len(),
            cards = self.reveal.cards().len(),
            "page controller started"
        );
        fx
    }

    // ---- navigation -------------------------------------------------------

    pub fn activate_section(&mut self, target: SectionId) -> Result<Vec<Effect>> {
        if self.torn_down {
            return Ok(Vec::new());
        }
        self.nav.activate(target)?;
        debug!(section = %target, "section activated");
        Ok(vec![Effect::ActivateSection(target)])
    }

    /// Click on the navigation button at `index` (document order).
    pub fn nav_clicked(&mut self, index: usize) -> Vec<Effect> {
        let Some(target) = self.nav.button_target(index) else {
            warn!(index, "click on unregistered nav button");
            return Vec::new();
        };
        match self.activate_section(target) {
            Ok(fx) => fx,
            Err(e) => {
                warn!(error = %e, "navigation ignored");
                Vec::new()
            }
        }
    }

    pub fn scroll_to_section(&mut self, target: SectionId) -> Result<Vec<Effect>> {
        if self.torn_down {
            return Ok(Vec::new());
        }
        if !self.nav.sections().contains(&target) {
            return Err(PageError::MissingSection(target));
        }
        Ok(vec![Effect::ScrollIntoView(target)])
    }

    // ---- chat -------------------------------------------------------------

    /// Mirrors the input field without side effects.
    pub fn set_input(&mut self, text: &str) {
        self.chat.set_input(text);
    }

    /// The user edited the input: mirror it and, when a typing status is
    /// configured, show it until the input has been idle for `typing_idle_ms`.
    pub fn input_changed(&mut self, text: &str) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        self.chat.set_input(text);
        let Some(typing) = self.config.typing_status.clone() else {
            return Vec::new();
        };

        let mut fx = Vec::new();
        if let Some(prev) = self.status.reset.take() {
            self.cancel(prev, &mut fx);
        }
        if !self.status.typing {
            self.status.typing = true;
            fx.push(Effect::SetStatus(typing));
        }
        let reset = self.schedule(self.config.typing_idle_ms, Task::ResetStatus, &mut fx);
        self.status.reset = Some(reset);
        fx
    }

    pub fn key_pressed(&mut self, key: &str) -> Vec<Effect> {
        if key == "Enter" {
            self.send_message()
        } else {
            Vec::new()
        }
    }

    /// Sends the current input. Blank input is left untouched and nothing is
    /// sent.
    pub fn send_message(&mut self) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        let Some(text) = self.chat.take_input() else {
            return Vec::new();
        };

        let mut fx = Vec::new();
        let msg = ChatMessage {
            text,
            author: Author::User,
            timestamp: self.clock.local_time(),
        };
        fx.push(Effect::AppendMessage(self.chat.push(msg).clone()));
        fx.push(Effect::ClearInput);
        fx.push(Effect::ScrollChatToEnd);

        let delay = self
            .rng
            .gen_range_u32(self.config.reply_delay_min_ms, self.config.reply_delay_max_ms);
        let task = self.schedule(delay, Task::AssistantReply, &mut fx);
        debug!(?task, delay_ms = delay, "assistant reply scheduled");
        fx
    }

    fn land_reply(&mut self) -> Vec<Effect> {
        let msg = ChatMessage {
            text: pick_response(&mut self.rng).to_string(),
            author: Author::Assistant,
            timestamp: self.clock.local_time(),
        };
        vec![
            Effect::AppendMessage(self.chat.push(msg).clone()),
            Effect::ScrollChatToEnd,
        ]
    }

    // ---- notifications ----------------------------------------------------

    pub fn show_notification(&mut self, message: &str) -> Vec<Effect> {
        self.notify(message.to_string(), None)
    }

    fn notify(&mut self, message: String, glyph: Option<&'static str>) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        let mut fx = Vec::new();
        if let Some((old, expiry)) = self.toasts.clear() {
            self.cancel(expiry, &mut fx);
            fx.push(Effect::RemoveNotification(old.id));
        }

        let n = self.toasts.make(message, glyph);
        fx.push(Effect::ShowNotification(n.clone()));
        let expiry = self.schedule(
            self.config.notification_ms,
            Task::ExpireNotification(n.id),
            &mut fx,
        );
        debug!(id = n.id.0, message = %n.message, "notification shown");
        self.toasts.install(n, expiry);
        fx
    }

    /// Click on a card's action button.
    pub fn card_action(&mut self, id: CardId) -> Result<Vec<Effect>> {
        let card = self.reveal.card(id).ok_or(PageError::UnknownCard(id.0))?;
        let (message, glyph) = match card.kind {
            CardKind::Personal => (toast::feature_coming_soon(&card.title), FEATURE_GLYPH),
            CardKind::Blog => (toast::opening_article(&card.title), ARTICLE_GLYPH),
        };
        Ok(self.notify(message, Some(glyph)))
    }

    // ---- scroll & resize --------------------------------------------------

    pub fn intersection(&mut self, id: CardId, sample: IntersectionSample) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        if self.reveal.observe(id, sample) {
            debug!(card = id.0, ratio = sample.ratio, "card revealed");
            vec![Effect::RevealCard(id)]
        } else {
            Vec::new()
        }
    }

    pub fn handle_resize(&mut self, width: f64) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        match self.layout.apply(width) {
            Some(compact) => {
                debug!(width, compact, "navigation layout changed");
                vec![Effect::SetCompactNav(compact)]
            }
            None => Vec::new(),
        }
    }

    pub fn toggle_theme(&mut self) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        self.theme = self.theme.toggle();
        vec![Effect::SetDarkTheme(self.theme.is_dark())]
    }

    // ---- timers -----------------------------------------------------------

    /// The host timer for `task` expired. Cancelled or already-fired tasks
    /// are ignored.
    pub fn fire(&mut self, task: TaskId) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        match self.scheduler.take(task) {
            Some(t) => self.dispatch(task, t),
            None => {
                debug!(?task, "stale timer ignored");
                Vec::new()
            }
        }
    }

    /// Fires every task due by the controller's clock, earliest first.
    pub fn run_due(&mut self) -> Vec<Effect> {
        let mut fx = Vec::new();
        while !self.torn_down {
            let now = self.clock.now_ms();
            let Some((id, task)) = self.scheduler.pop_due(now) else {
                break;
            };
            fx.extend(self.dispatch(id, task));
        }
        fx
    }

    fn dispatch(&mut self, id: TaskId, task: Task) -> Vec<Effect> {
        match task {
            Task::AssistantReply => self.land_reply(),
            Task::ExpireNotification(nid) => match self.toasts.expire(nid) {
                Some(n) => {
                    debug!(id = n.id.0, "notification expired");
                    vec![Effect::RemoveNotification(n.id)]
                }
                None => Vec::new(),
            },
            Task::Welcome => self.notify(self.config.welcome_message.clone(), Some(WELCOME_GLYPH)),
            Task::ResetStatus => {
                if self.status.reset != Some(id) {
                    return Vec::new();
                }
                self.status.reset = None;
                self.status.typing = false;
                vec![Effect::SetStatus(self.status.original.clone())]
            }
        }
    }

    fn schedule(&mut self, delay_ms: u32, task: Task, fx: &mut Vec<Effect>) -> TaskId {
        let id = self.scheduler.schedule(self.clock.now_ms(), delay_ms, task);
        fx.push(Effect::ScheduleTimer { task: id, delay_ms });
        id
    }

    fn cancel(&mut self, id: TaskId, fx: &mut Vec<Effect>) {
        if self.scheduler.cancel(id) {
            fx.push(Effect::CancelTimer(id));
        }
    }

    // ---- lifecycle --------------------------------------------------------

    /// Cancels all pending work and removes the live notification. Every
    /// later call is a no-op.
    pub fn teardown(&mut self) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        let mut fx: Vec<Effect> = self
            .scheduler
            .drain_ids()
            .into_iter()
            .map(Effect::CancelTimer)
            .collect();
        if let Some((n, _)) = self.toasts.clear() {
            fx.push(Effect::RemoveNotification(n.id));
        }
        self.status.reset = None;
        if std::mem::take(&mut self.status.typing) {
            fx.push(Effect::SetStatus(self.status.original.clone()));
        }
        self.torn_down = true;
        info!(cancelled = fx.len(), "page controller torn down");
        fx
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ---- queries ----------------------------------------------------------

    pub fn active_section(&self) -> Option<SectionId> {
        self.nav.active()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.chat.messages()
    }

    pub fn input(&self) -> &str {
        self.chat.input()
    }

    pub fn current_notification(&self) -> Option<&Notification> {
        self.toasts.current()
    }

    pub fn cards(&self) -> &[Card] {
        self.reveal.cards()
    }

    pub fn is_compact(&self) -> bool {
        self.layout.is_compact()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status_text(&self) -> &str {
        match &self.config.typing_status {
            Some(typing) if self.status.typing => typing,
            _ => &self.status.original,
        }
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            active_section: self.nav.active(),
            active_buttons: self.nav.active_buttons(),
            messages: self.chat.messages().to_vec(),
            input: self.chat.input().to_string(),
            notification: self.toasts.current().cloned(),
            cards: self.reveal.cards().to_vec(),
            compact_nav: self.layout.is_compact(),
            theme: self.theme,
            status: self.status_text().to_string(),
            pending_tasks: self.scheduler.len(),
            torn_down: self.torn_down,
        }
    }
}
