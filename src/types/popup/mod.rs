mod popup;
pub use popup::*;
