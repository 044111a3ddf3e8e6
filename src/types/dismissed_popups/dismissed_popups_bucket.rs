use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::types::popup::{Popup, PopupLogic};

/// Stored as a bare JSON object so records written by the legacy page
/// script (`{"<id>": "<ISO-8601>"}`) keep working.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DismissedPopupsBucket {
    /// the key is the popup id while the value is the time at which it was
    /// last closed.
    pub items: HashMap<String, DateTime<Utc>>,
}

impl DismissedPopupsBucket {
    pub fn new(items: HashMap<String, DateTime<Utc>>) -> Self {
        Self { items }
    }
    pub fn dismiss(&mut self, id: &str, now: DateTime<Utc>) {
        self.items.insert(id.to_owned(), now);
    }
    /// Whether the popup may open by itself on this page load. Calendar days
    /// are compared in the visitor's `timezone`.
    pub fn should_show(&self, popup: &Popup, now: DateTime<Utc>, timezone: &FixedOffset) -> bool {
        match popup.popup_logic {
            PopupLogic::ShowOnce => !self.items.contains_key(&popup.id),
            PopupLogic::OnedayShowOnce => match self.items.get(&popup.id) {
                Some(dismissed_at) => {
                    dismissed_at.with_timezone(timezone).date_naive()
                        != now.with_timezone(timezone).date_naive()
                }
                None => true,
            },
            PopupLogic::Always | PopupLogic::Other(_) => true,
        }
    }
    /// Sorted ids, for reporting.
    pub fn ids(&self) -> Vec<String> {
        let mut ids = self.items.keys().cloned().collect::<Vec<_>>();
        ids.sort();
        ids
    }
}
