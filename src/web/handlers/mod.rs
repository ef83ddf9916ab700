pub mod blog;
pub mod courses;
pub mod session;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    courses::configure(cfg);
    blog::configure(cfg);
    ab_tests::configure(cfg);
    session::configure(cfg);
}
