use crate::constants::{DEFAULT_EVENT_LABEL, FALLBACK_LINK};
use crate::models::carousel::Carousel;
use crate::models::event_banner::EventBanner;
use crate::runtime::msg::{Action, ActionCarousel};
use crate::types::event::Event;
use crate::view::{Element, Handler, Mount, Node};

pub const EVENT_BANNER_SELECTOR: &str = "#event-banner";
pub const EVENTS_DROPDOWN_SELECTOR: &str = "#events-dropdown";
pub const EVENTS_DROPDOWN_LIST_SELECTOR: &str = "#events-dropdown-list";

/// `tabName`, then `title`, then the generic label.
pub fn event_label(event: &Event) -> &str {
    event
        .tab_name
        .as_deref()
        .or(event.title.as_deref())
        .unwrap_or(DEFAULT_EVENT_LABEL)
}

/// Banner and navbar dropdown. Nothing is touched until the events arrived.
pub fn render_event_banner(event_banner: &EventBanner) -> Vec<Mount> {
    let events = match &event_banner.events {
        Some(events) => events,
        None => return vec![],
    };
    if event_banner.is_hidden() {
        return vec![
            Mount::display(EVENT_BANNER_SELECTOR, "none"),
            Mount::display(EVENTS_DROPDOWN_LIST_SELECTOR, "none"),
            Mount::display(EVENTS_DROPDOWN_SELECTOR, "none"),
        ];
    }
    let banner = event_banner
        .carousel
        .as_ref()
        .map(|carousel| Mount::replace(EVENT_BANNER_SELECTOR, Some("block"), vec![carousel_node(carousel)]));
    banner
        .into_iter()
        .chain([
            Mount::replace(
                EVENTS_DROPDOWN_LIST_SELECTOR,
                None,
                events.iter().map(dropdown_link).collect(),
            ),
            Mount::display(EVENTS_DROPDOWN_SELECTOR, ""),
        ])
        .collect()
}

struct SlideProps<'a> {
    href: &'a str,
    mobile_image: &'a str,
    desktop_image: &'a str,
    alt: &'a str,
}

impl<'a> From<&'a Event> for SlideProps<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            href: event.home_banner_utm_link.as_deref().unwrap_or(FALLBACK_LINK),
            mobile_image: event.mobile_image_link.as_deref().unwrap_or_default(),
            desktop_image: event.desktop_image_link.as_deref().unwrap_or_default(),
            alt: event.title.as_deref().unwrap_or_default(),
        }
    }
}

fn carousel_node(carousel: &Carousel) -> Node {
    let track = Element::new("div")
        .id("carousel-track")
        .styles(&[("display", "flex"), ("width", "100%")])
        .style(
            "transition",
            if carousel.animated {
                "transform 0.5s ease-in-out"
            } else {
                "none"
            },
        )
        .style(
            "transform",
            format!("translateX(-{}%)", carousel.translate_percent()),
        )
        .on(Handler::TransitionEnd(Action::Carousel(
            ActionCarousel::TransitionEnd,
        )))
        .children(
            carousel
                .slides
                .iter()
                .map(|slide| slide_node(SlideProps::from(&slide.event))),
        );
    let root = Element::new("div")
        .styles(&[
            ("position", "relative"),
            ("width", "100%"),
            ("overflow", "hidden"),
        ])
        .child(track);
    if !carousel.has_controls() {
        return root.into();
    }
    let active_dot = carousel.active_dot();
    let dots = Element::new("div")
        .id("carousel-dots")
        .styles(&[
            ("position", "absolute"),
            ("bottom", "10px"),
            ("left", "50%"),
            ("transform", "translateX(-50%)"),
            ("z-index", "10"),
            ("display", "flex"),
            ("gap", "8px"),
        ])
        .children((0..carousel.len()).map(|dot| {
            Element::new("button")
                .styles(&[
                    ("width", "10px"),
                    ("height", "10px"),
                    ("border-radius", "50%"),
                    ("border", "2px solid white"),
                    ("cursor", "pointer"),
                    ("padding", "0"),
                    ("transition", "background 0.3s"),
                ])
                .style(
                    "background",
                    if active_dot == Some(dot) {
                        "white"
                    } else {
                        "transparent"
                    },
                )
                .on(Handler::Click(Action::Carousel(ActionCarousel::SelectSlide(dot))))
                .into()
        }));
    root.child(arrow_button("carousel-prev", "left", "\u{2039}", ActionCarousel::Prev))
        .child(arrow_button("carousel-next", "right", "\u{203a}", ActionCarousel::Next))
        .child(dots)
        .into()
}

fn arrow_button(
    id: &'static str,
    side: &'static str,
    label: &'static str,
    action: ActionCarousel,
) -> Element {
    Element::new("button")
        .id(id)
        .style(side, "10px")
        .styles(&[
            ("position", "absolute"),
            ("top", "50%"),
            ("transform", "translateY(-50%)"),
            ("z-index", "10"),
            ("background", "rgba(0,0,0,0.2)"),
            ("color", "white"),
            ("border", "none"),
            ("border-radius", "50%"),
            ("width", "40px"),
            ("height", "40px"),
            ("cursor", "pointer"),
            ("font-size", "20px"),
        ])
        .text(label)
        .on(Handler::Click(Action::Carousel(action)))
}

fn slide_node(props: SlideProps) -> Node {
    Element::new("div")
        .styles(&[
            ("min-width", "100%"),
            ("width", "100%"),
            ("flex-shrink", "0"),
        ])
        .child(
            Element::new("a")
                .attr("href", props.href)
                .attr("target", "_blank")
                .attr("rel", "noopener")
                .styles(&[("display", "block"), ("width", "100%")])
                .child(
                    Element::new("picture")
                        .child(
                            Element::new("source")
                                .attr("media", "(max-width: 767px)")
                                .attr("srcset", props.mobile_image),
                        )
                        .child(
                            Element::new("img")
                                .attr("src", props.desktop_image)
                                .attr("alt", props.alt)
                                .attr("loading", "eager")
                                .styles(&[
                                    ("width", "100%"),
                                    ("height", "auto"),
                                    ("display", "block"),
                                ]),
                        ),
                ),
        )
        .into()
}

fn dropdown_link(event: &Event) -> Node {
    Element::new("a")
        .class("dropdown-link-home w-dropdown-link")
        .attr("href", event.bar_utm_link.as_deref().unwrap_or(FALLBACK_LINK))
        .attr("target", "_blank")
        .attr("rel", "noopener")
        .attr("tabindex", "0")
        .text(event_label(event))
        .into()
}
