pub use blog_posts::*;
pub use courses::*;
pub use db::*;
pub use variants::*;

mod blog_posts;
mod courses;
mod db;
mod variants;
