pub use env::*;

mod event_list;
mod popup;
mod serde;

use crate::types::event::Event;
use crate::types::page::PageContext;
use crate::types::Timestamp;

pub const TAIPEI_UTC_OFFSET: i32 = 8 * 3600;

pub fn event(id: &str, region: u8, start_time: &str, end_time: &str) -> Event {
    Event {
        id: id.to_owned(),
        region: Some(region),
        start_time: Some(start_time.parse::<Timestamp>().unwrap()),
        end_time: Some(end_time.parse::<Timestamp>().unwrap()),
        title: Some(format!("title {id}")),
        ..Default::default()
    }
}

pub fn page(path: &str, query: &str) -> PageContext {
    PageContext {
        path: path.to_owned(),
        query: query.to_owned(),
        hostname: "www.fluv.com".to_owned(),
        utc_offset: TAIPEI_UTC_OFFSET,
    }
}
