//! Data windowing and gesture interpretation for list pages.

pub use infinite_scroll::*;
pub use pagination::*;
pub use pull_to_refresh::*;
pub use viewport::*;

mod infinite_scroll;
mod pagination;
mod pull_to_refresh;
mod viewport;
