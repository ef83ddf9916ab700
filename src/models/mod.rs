pub use blog_post::*;
pub use course::*;
pub use course_level::*;
pub use variant::*;

mod blog_post;
mod course;
mod course_level;
mod variant;
