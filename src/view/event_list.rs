use chrono::FixedOffset;

use crate::constants::{
    DEFAULT_EVENT_LABEL, EVENT_CARD_CALL_TO_ACTION, EVENT_LIST_EMPTY_MESSAGE,
    EVENT_LIST_MOBILE_MAX_WIDTH, EVENT_LIST_TIME_LABEL, FALLBACK_LINK,
};
use crate::models::event_list::EventList;
use crate::types::event::Event;
use crate::types::Timestamp;
use crate::view::{event_label, Element, Mount, Node};

pub const EVENT_LIST_SELECTOR: &str = "#event-list";
pub const OLD_EVENT_LIST_SELECTOR: &str = "#old-event-list";
pub const EVENT_MENU_SUBMENU_SELECTOR: &str = "#menu-item-11090 .sub-menu";

const EVENT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

pub fn format_event_time(time: Option<Timestamp>, timezone: &FixedOffset) -> String {
    time.and_then(|time| time.resolve(timezone))
        .map(|time| time.with_timezone(timezone).format(EVENT_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// One card per row on narrow viewports, three otherwise.
pub fn card_flex(viewport_width: u32) -> &'static str {
    if viewport_width <= EVENT_LIST_MOBILE_MAX_WIDTH {
        "0 0 100%"
    } else {
        "0 0 calc(33.333% - 14px)"
    }
}

pub fn render_event_list(
    event_list: &EventList,
    timezone: &FixedOffset,
    viewport_width: u32,
) -> Vec<Mount> {
    let mut mounts = vec![];
    if event_list.hide_legacy_list {
        mounts.push(Mount::display(OLD_EVENT_LIST_SELECTOR, "none"));
    }
    let events = match &event_list.events {
        Some(events) => events,
        None => return mounts,
    };
    if events.is_empty() {
        mounts.push(Mount::replace(
            EVENT_LIST_SELECTOR,
            None,
            vec![Element::new("p")
                .styles(&[("text-align", "center"), ("padding", "40px")])
                .text(EVENT_LIST_EMPTY_MESSAGE)
                .into()],
        ));
        return mounts;
    }
    mounts.push(Mount::replace(
        EVENT_MENU_SUBMENU_SELECTOR,
        None,
        events.iter().map(submenu_item).collect(),
    ));
    let flex = card_flex(viewport_width);
    mounts.push(Mount::replace(
        EVENT_LIST_SELECTOR,
        None,
        vec![Element::new("div")
            .styles(&[
                ("display", "flex"),
                ("flex-wrap", "wrap"),
                ("gap", "20px"),
                ("padding", "20px 0"),
            ])
            .children(
                events
                    .iter()
                    .map(|event| event_card(CardProps::new(event, timezone), flex)),
            )
            .into()],
    ));
    mounts
}

fn submenu_item(event: &Event) -> Node {
    let href = event
        .bar_utm_link
        .as_deref()
        .or(event.event_page_utm_link.as_deref())
        .unwrap_or(FALLBACK_LINK);
    Element::new("li")
        .class("menu-item menu-item-type-custom menu-item-object-custom")
        .child(
            Element::new("a")
                .attr("href", href)
                .attr("itemprop", "url")
                .attr("target", "_blank")
                .attr("rel", "noopener")
                .child(Element::new("span").class("avia-bullet"))
                .child(
                    Element::new("span")
                        .class("avia-menu-text")
                        .text(event_label(event)),
                ),
        )
        .into()
}

struct CardProps<'a> {
    image: &'a str,
    title: &'a str,
    description: &'a str,
    time_window: String,
    href: &'a str,
}

impl<'a> CardProps<'a> {
    fn new(event: &'a Event, timezone: &FixedOffset) -> Self {
        Self {
            image: event.mobile_image_link.as_deref().unwrap_or_default(),
            title: event.title.as_deref().unwrap_or(DEFAULT_EVENT_LABEL),
            description: event.description.as_deref().unwrap_or_default(),
            time_window: format!(
                "{} ~ {}",
                format_event_time(event.start_time, timezone),
                format_event_time(event.end_time, timezone)
            ),
            href: event.event_page_utm_link.as_deref().unwrap_or(FALLBACK_LINK),
        }
    }
}

fn event_card(props: CardProps, flex: &'static str) -> Node {
    let text_block = Element::new("div")
        .class("avia_textblock")
        .attr("itemprop", "text")
        .child(
            Element::new("p").child(
                Element::new("img")
                    .class("alignnone size-large")
                    .attr("src", props.image)
                    .attr("alt", props.title)
                    .styles(&[("width", "100%"), ("height", "auto")]),
            ),
        )
        .child(Element::new("h2").text(props.title))
        .child(Element::new("p").text(props.description))
        .child(
            Element::new("p")
                .styles(&[
                    ("font-size", "0.9em"),
                    ("color", "#666"),
                    ("margin-top", "10px"),
                ])
                .child(Element::new("strong").text(EVENT_LIST_TIME_LABEL))
                .child(Element::new("br"))
                .text(props.time_window),
        );
    let button = Element::new("div")
        .class("avia-button-wrap avia-button-right")
        .child(
            Element::new("a")
                .class("avia-button avia-icon_select-yes-left-icon avia-size-medium avia-position-right avia-color-theme-color")
                .attr("href", props.href)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .child(
                    Element::new("span")
                        .class("avia_button_icon avia_button_icon_left")
                        .attr("aria-hidden", "true"),
                )
                .child(
                    Element::new("span")
                        .class("avia_iconbox_title")
                        .text(EVENT_CARD_CALL_TO_ACTION),
                ),
        );
    Element::new("div")
        .class("flex_column av_one_third flex_column_div")
        .style("flex", flex)
        .styles(&[
            ("box-sizing", "border-box"),
            ("border", "2px solid #59A7AE"),
            ("border-radius", "30px"),
            ("padding", "20px"),
            ("background", "#fff"),
        ])
        .child(
            Element::new("section")
                .class("av_textblock_section")
                .child(text_block),
        )
        .child(button)
        .into()
}
