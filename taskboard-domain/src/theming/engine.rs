//! Live projection of themes onto a [`StyleTarget`].
//!
//! The engine never touches the store: it applies whatever theme it is
//! handed (persisted or draft), captures and restores snapshots of the
//! surface for preview rollback, and broadcasts committed theme changes.

use std::collections::BTreeMap;

use tokio::sync::broadcast;
use tracing::{debug, trace};

use super::events::ThemeChangedEvent;
use super::style::{contract_variable_names, style_variables, PageProperty, StyleTarget};
use super::tokens::{ColorRole, TokenPath};
use super::types::Theme;

/// Values present on the style surface at capture time.
///
/// `None` records that a variable or property was unset, so restoring
/// removes it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSnapshot {
    variables: BTreeMap<String, Option<String>>,
    page: BTreeMap<PageProperty, Option<String>>,
}

impl StyleSnapshot {
    /// Captured value of `name`; the outer `None` means it was not captured.
    pub fn variable(&self, name: &str) -> Option<Option<&str>> {
        self.variables.get(name).map(Option::as_deref)
    }

    pub fn page_property(&self, property: PageProperty) -> Option<Option<&str>> {
        self.page.get(&property).map(Option::as_deref)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Projects themes onto an injected style surface.
pub struct LiveStyleEngine {
    target: Box<dyn StyleTarget>,
    event_sender: broadcast::Sender<ThemeChangedEvent>,
}

impl std::fmt::Debug for LiveStyleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveStyleEngine")
            .field("subscribers", &self.event_sender.receiver_count())
            .finish_non_exhaustive()
    }
}

impl LiveStyleEngine {
    pub fn new(target: Box<dyn StyleTarget>, event_capacity: usize) -> Self {
        let (event_sender, _) = broadcast::channel(event_capacity.max(1));
        Self { target, event_sender }
    }

    pub fn target(&self) -> &dyn StyleTarget {
        self.target.as_ref()
    }

    fn write_variable(&mut self, name: &str, value: &str) -> bool {
        if self.target.variable(name).as_deref() == Some(value) {
            return false;
        }
        self.target.set_variable(name, value);
        true
    }

    fn write_page(&mut self, property: PageProperty, value: &str) {
        if self.target.page_property(property).as_deref() != Some(value) {
            self.target.set_page_property(property, value);
        }
    }

    /// Writes every token of `theme` and mirrors background, text and font
    /// family onto the page. Values already in place are left untouched.
    pub fn apply(&mut self, theme: &Theme) {
        let mut written = 0usize;
        for (name, value) in style_variables(theme) {
            if self.write_variable(&name, &value) {
                written += 1;
            }
        }
        self.write_page(PageProperty::Background, theme.colors.get(ColorRole::Background));
        self.write_page(PageProperty::TextColor, theme.colors.get(ColorRole::Text));
        self.write_page(PageProperty::FontFamily, &theme.typography.font_family);
        debug!(theme_id = %theme.id, written, "Applied theme to style surface");
    }

    /// Writes a single token, plus its page-level mirror if it has one.
    pub fn apply_token(&mut self, path: TokenPath, value: &str) {
        let name = path.variable_name();
        self.write_variable(&name, value);
        if let Some(property) = PageProperty::mirrored_from(path) {
            self.write_page(property, value);
        }
        trace!(variable = %name, value, "Applied token");
    }

    /// Captures every contract variable and page property.
    pub fn snapshot(&self) -> StyleSnapshot {
        let variables = contract_variable_names()
            .into_iter()
            .map(|name| {
                let value = self.target.variable(&name);
                (name, value)
            })
            .collect();
        let page = PageProperty::ALL
            .iter()
            .map(|p| (*p, self.target.page_property(*p)))
            .collect();
        StyleSnapshot { variables, page }
    }

    /// Puts back exactly the captured values, removing entries that were unset.
    pub fn restore(&mut self, snapshot: &StyleSnapshot) {
        for (name, value) in &snapshot.variables {
            match value {
                Some(value) => {
                    self.write_variable(name, value);
                }
                None => self.target.remove_variable(name),
            }
        }
        for (property, value) in &snapshot.page {
            match value {
                Some(value) => self.write_page(*property, value),
                None => self.target.remove_page_property(*property),
            }
        }
        debug!(variables = snapshot.len(), "Restored style snapshot");
    }

    /// Broadcasts `theme` as the newly committed theme. Having no
    /// subscribers is not an error.
    pub fn notify_changed(&self, theme: &Theme) {
        let event = ThemeChangedEvent::new(theme.clone());
        match self.event_sender.send(event) {
            Ok(receivers) => debug!(theme_id = %theme.id, receivers, "Broadcast theme change"),
            Err(_) => debug!(theme_id = %theme.id, "No subscribers for theme change"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChangedEvent> {
        self.event_sender.subscribe()
    }
}
