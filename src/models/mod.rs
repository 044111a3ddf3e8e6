pub mod common;
pub mod ctx;

pub mod carousel;
pub mod event_banner;
pub mod event_list;
pub mod popup;
