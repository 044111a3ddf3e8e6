use crate::models::ctx::update_dismissed_popups;
use crate::runtime::msg::Msg;
use crate::runtime::{Effects, Env, Update};
use crate::types::dismissed_popups::DismissedPopupsBucket;
use crate::types::page::PageContext;
use serde::Serialize;

/// State shared by every widget of the page.
#[derive(Default, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Ctx {
    pub page: PageContext,
    pub dismissed_popups: DismissedPopupsBucket,
}

impl Ctx {
    pub fn new(page: PageContext, dismissed_popups: DismissedPopupsBucket) -> Self {
        Self {
            page,
            dismissed_popups,
        }
    }
}

impl<E: Env + 'static> Update<E> for Ctx {
    fn update(&mut self, msg: &Msg) -> Effects {
        update_dismissed_popups::<E>(&mut self.dismissed_popups, msg)
    }
}
