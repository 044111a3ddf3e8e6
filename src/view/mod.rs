//! Declarative templates turning widget state into node trees. The web
//! bridge materialises them in the page.

mod node;
pub use node::*;

mod event_banner;
pub use event_banner::*;

mod event_list;
pub use event_list::*;

mod popup;
pub use popup::*;
