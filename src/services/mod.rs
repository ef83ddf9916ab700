pub use boundary::*;
pub use cache::*;
pub use session::*;
pub use traffic::*;

mod boundary;
mod cache;
mod session;
mod traffic;
