use lazy_static::lazy_static;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use std::time::Duration;
use url::Url;

pub const DISMISSED_POPUPS_STORAGE_KEY: &str = "fluv_popup_closed";
pub const TEST_MODE_QUERY_PARAM: &str = "test";
pub const EVENTS_LIMIT: usize = 100;
pub const CAROUSEL_AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(5);
pub const POPUP_SUCCESS_HIDE_DELAY: Duration = Duration::from_secs(3);
pub const EVENT_LIST_MOBILE_MAX_WIDTH: u32 = 768;
pub const EVENT_LIST_MENU_ITEM_ID: &str = "menu-item-11090";

pub const DEFAULT_EVENT_LABEL: &str = "優惠活動";
pub const EVENT_LIST_EMPTY_MESSAGE: &str = "目前沒有進行中的活動";
pub const EVENT_LIST_TIME_LABEL: &str = "活動時間：";
pub const EVENT_CARD_CALL_TO_ACTION: &str = "立即預約";
pub const DEFAULT_SUBMIT_BUTTON_TEXT: &str = "訂閱";
pub const SUBMITTING_BUTTON_TEXT: &str = "送出中...";
pub const SUBMIT_EMAIL_FAILED_MESSAGE: &str = "送出失敗，請稍後再試";
pub const EMAIL_INPUT_PLACEHOLDER: &str = "請輸入您的 Email";
pub const FALLBACK_LINK: &str = "#";

pub const URI_COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

lazy_static! {
    pub static ref API_URL: Url =
        Url::parse("https://api-prod.fluv.com").expect("API_URL parse failed");
    pub static ref POPUP_DECORATION_IMAGE_URL: Url =
        Url::parse("https://edm.fluv.com/wp-content/uploads/sites/3/2025/06/cat-2.png")
            .expect("POPUP_DECORATION_IMAGE_URL parse failed");
    pub static ref DEFAULT_REOPEN_IMAGE_URL: Url =
        Url::parse("https://edm.fluv.com/wp-content/uploads/sites/3/2025/06/gift.gif")
            .expect("DEFAULT_REOPEN_IMAGE_URL parse failed");
}
