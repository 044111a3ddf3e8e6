mod page_context;
pub use page_context::*;

mod region;
pub use region::*;
