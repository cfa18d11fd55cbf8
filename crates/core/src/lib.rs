//! # serenity
//!
//! Page controller for the Serenity Yoga Center site: section navigation, a
//! scripted guru chat, single-slot toast notifications, scroll reveal of
//! cards and the responsive navigation flag.
//!
//! The crate has no DOM dependency. A host (the `serenity_web` crate in the
//! browser, plain tests on the native target) forwards gestures and timer
//! expiries to a [`controller::PageController`] and applies the
//! [`controller::Effect`]s it returns.
//!
//! ## Quick Start
//!
//! ```
//! use serenity::prelude::*;
//!
//! let clock = ManualClock::new(ClockTime::new(9, 0));
//! let page = PageLayout {
//!     sections: vec![(SectionId::Home, true), (SectionId::Guru, false)],
//!     nav_buttons: vec![SectionId::Home, SectionId::Guru],
//!     ..PageLayout::default()
//! };
//! let mut ctl = PageController::new(PageConfig::default().with_seed(1), page, Box::new(clock.clone()))
//!     .unwrap();
//! ctl.start(1280.0);
//!
//! ctl.nav_clicked(1);
//! assert_eq!(ctl.active_section(), Some(SectionId::Guru));
//!
//! ctl.set_input("hello");
//! ctl.send_message();
//! clock.advance(3_000);
//! ctl.run_due();
//! assert_eq!(ctl.messages().len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`controller`]: the page controller and its effects
//! - [`nav`]: sections and the single-active switch
//! - [`chat`]: message log and canned replies
//! - [`toast`]: the notification slot
//! - [`reveal`]: cards and scroll reveal
//! - [`layout`]: responsive navigation and theme
//! - [`scheduler`]: cancellable deferred tasks

pub mod chat;
pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod nav;
pub mod prng;
pub mod reveal;
pub mod scheduler;
pub mod time;
pub mod toast;

/// Prelude module for convenient imports.
///
/// ```
/// use serenity::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chat::{Author, ChatMessage, CANNED_RESPONSES};
    pub use crate::config::PageConfig;
    pub use crate::controller::{Effect, PageController, PageLayout, PageSnapshot};
    pub use crate::error::PageError;
    pub use crate::layout::Theme;
    pub use crate::nav::SectionId;
    pub use crate::reveal::{CardId, CardKind, IntersectionSample};
    pub use crate::scheduler::TaskId;
    pub use crate::time::{Clock, ClockTime, ManualClock};
    pub use crate::toast::{Notification, NotificationId};
}
