pub mod api;
pub mod dismissed_popups;
pub mod event;
pub mod page;
pub mod popup;

mod serde_ext;
pub use serde_ext::*;

mod timestamp;
pub use timestamp::*;
