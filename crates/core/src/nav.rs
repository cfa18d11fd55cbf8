use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PageError, Result};

/// The content panels the page knows about. Navigation targets are parsed
/// into this closed set when the page is discovered, so activation can only
/// ever name one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    Guru,
    Personal,
    Blog,
}

impl SectionId {
    /// Value of the button's `data-section` attribute and the section's `id`.
    pub fn as_attr(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::Guru => "guru",
            SectionId::Personal => "personal",
            SectionId::Blog => "blog",
        }
    }

    pub fn all() -> &'static [SectionId] {
        &[
            SectionId::Home,
            SectionId::Guru,
            SectionId::Personal,
            SectionId::Blog,
        ]
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

impl FromStr for SectionId {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self> {
        let v = s.trim();
        SectionId::all()
            .iter()
            .copied()
            .find(|id| id.as_attr().eq_ignore_ascii_case(v))
            .ok_or_else(|| PageError::UnknownSection(v.to_string()))
    }
}

/// Single-active-of-N switch over the page's sections and the buttons that
/// target them. A button is active exactly when its target section is.
#[derive(Debug, Clone)]
pub struct Navigator {
    sections: Vec<SectionId>,
    buttons: Vec<SectionId>,
    active: Option<SectionId>,
}

impl Navigator {
    /// `sections` is in document order with each section's initial `active`
    /// marker. The first marked section wins; if none is marked, the first
    /// section is active.
    pub fn new(sections: &[(SectionId, bool)], buttons: Vec<SectionId>) -> Self {
        let mut ordered: Vec<SectionId> = Vec::with_capacity(sections.len());
        for (id, _) in sections {
            if !ordered.contains(id) {
                ordered.push(*id);
            }
        }
        let active = sections
            .iter()
            .find(|(_, marked)| *marked)
            .map(|(id, _)| *id)
            .or_else(|| ordered.first().copied());

        Self {
            sections: ordered,
            buttons,
            active,
        }
    }

    /// Makes `target` the only active section. A target that is not on the
    /// page leaves every section and button as it was.
    pub fn activate(&mut self, target: SectionId) -> Result<()> {
        if !self.sections.contains(&target) {
            return Err(PageError::MissingSection(target));
        }
        self.active = Some(target);
        Ok(())
    }

    pub fn active(&self) -> Option<SectionId> {
        self.active
    }

    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn is_section_active(&self, id: SectionId) -> bool {
        self.active == Some(id)
    }

    pub fn button_target(&self, index: usize) -> Option<SectionId> {
        self.buttons.get(index).copied()
    }

    pub fn is_button_active(&self, index: usize) -> bool {
        self.button_target(index)
            .is_some_and(|t| self.is_section_active(t))
    }

    /// Indices of buttons currently carrying the active state.
    pub fn active_buttons(&self) -> Vec<usize> {
        (0..self.buttons.len())
            .filter(|&i| self.is_button_active(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn page() -> Navigator {
        Navigator::new(
            &[
                (SectionId::Home, false),
                (SectionId::Guru, true),
                (SectionId::Personal, false),
                (SectionId::Blog, false),
            ],
            vec![
                SectionId::Home,
                SectionId::Guru,
                SectionId::Personal,
                SectionId::Blog,
            ],
        )
    }

    #[test]
    fn section_inventory_is_stable() {
        let all = SectionId::all();
        assert_eq!(all.len(), 4);
        for id in all {
            assert_eq!(id.as_attr().parse::<SectionId>().unwrap(), *id);
        }
    }

    #[test]
    fn unknown_attr_is_rejected() {
        assert!(matches!(
            "pricing".parse::<SectionId>(),
            Err(PageError::UnknownSection(s)) if s == "pricing"
        ));
    }

    #[test]
    fn markup_active_section_is_default() {
        let nav = page();
        assert_eq!(nav.active(), Some(SectionId::Guru));
        assert_eq!(nav.active_buttons(), vec![1]);
    }

    #[test]
    fn first_section_is_default_when_none_marked() {
        let nav = Navigator::new(
            &[(SectionId::Blog, false), (SectionId::Home, false)],
            vec![],
        );
        assert_eq!(nav.active(), Some(SectionId::Blog));
    }

    #[test]
    fn activating_blog_deactivates_previous() {
        let mut nav = page();
        nav.activate(SectionId::Blog).unwrap();
        assert!(nav.is_section_active(SectionId::Blog));
        assert!(!nav.is_section_active(SectionId::Guru));
        assert_eq!(nav.active_buttons(), vec![3]);
    }

    #[test]
    fn missing_section_changes_nothing() {
        let mut nav = Navigator::new(
            &[(SectionId::Home, true), (SectionId::Blog, false)],
            vec![SectionId::Home, SectionId::Blog],
        );
        assert!(matches!(
            nav.activate(SectionId::Personal),
            Err(PageError::MissingSection(SectionId::Personal))
        ));
        assert_eq!(nav.active(), Some(SectionId::Home));
        assert_eq!(nav.active_buttons(), vec![0]);
    }

    proptest! {
        #[test]
        fn exactly_one_section_and_button_active(clicks in prop::collection::vec(0usize..4, 0..40)) {
            let mut nav = page();
            for i in clicks {
                let target = nav.button_target(i).unwrap();
                nav.activate(target).unwrap();
                let active: Vec<_> = nav
                    .sections()
                    .iter()
                    .filter(|s| nav.is_section_active(**s))
                    .collect();
                prop_assert_eq!(active.len(), 1);
                prop_assert_eq!(*active[0], target);
                prop_assert_eq!(nav.active_buttons(), vec![i]);
            }
        }
    }
}
