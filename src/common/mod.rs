pub use errors::*;
pub use html::*;

mod errors;
mod html;
mod macros;
