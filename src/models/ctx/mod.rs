mod ctx;
pub use ctx::*;

mod error;
pub use error::*;

mod update_dismissed_popups;
use update_dismissed_popups::*;
