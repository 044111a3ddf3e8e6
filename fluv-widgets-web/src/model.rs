use gloo_utils::format::JsValueSerdeExt;
use serde::Serialize;
use wasm_bindgen::JsValue;

use fluv_widgets::{
    models::{ctx::Ctx, event_banner::EventBanner, event_list::EventList, popup::PromoPopup},
    runtime::msg::{Action, ActionLoad},
    types::{dismissed_popups::DismissedPopupsBucket, page::PageContext},
    view::{render_event_banner, render_event_list, render_popup, Mount},
    Model,
};

use crate::env::WebEnv;

#[derive(Model, Clone, Serialize)]
#[model(WebEnv)]
pub struct WebModel {
    pub ctx: Ctx,
    pub event_banner: EventBanner,
    pub event_list: EventList,
    pub popup: PromoPopup,
}

impl WebModel {
    pub fn new(page: PageContext, dismissed_popups: DismissedPopupsBucket) -> Self {
        WebModel {
            ctx: Ctx::new(page, dismissed_popups),
            event_banner: Default::default(),
            event_list: Default::default(),
            popup: Default::default(),
        }
    }
    /// Actions dispatched once the runtime is up, one per widget.
    pub fn load_actions() -> [Action; 3] {
        [
            Action::Load(ActionLoad::EventBanner),
            Action::Load(ActionLoad::EventList),
            Action::Load(ActionLoad::Popup),
        ]
    }
    pub fn get_state(&self, field: &WebModelField) -> Result<JsValue, serde_json::Error> {
        match field {
            WebModelField::Ctx => <JsValue as JsValueSerdeExt>::from_serde(&self.ctx),
            WebModelField::EventBanner => <JsValue as JsValueSerdeExt>::from_serde(&self.event_banner),
            WebModelField::EventList => <JsValue as JsValueSerdeExt>::from_serde(&self.event_list),
            WebModelField::Popup => <JsValue as JsValueSerdeExt>::from_serde(&self.popup),
        }
    }
    pub fn render(&self, field: &WebModelField, viewport_width: u32) -> Vec<Mount> {
        match field {
            WebModelField::Ctx => vec![],
            WebModelField::EventBanner => render_event_banner(&self.event_banner),
            WebModelField::EventList => {
                render_event_list(&self.event_list, &self.ctx.page.timezone(), viewport_width)
            }
            WebModelField::Popup => render_popup(&self.popup),
        }
    }
}
