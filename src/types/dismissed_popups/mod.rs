mod dismissed_popups_bucket;
pub use dismissed_popups_bucket::*;
