use actix_web::{post, web, HttpRequest, HttpResponse, Responder};

use careerpress::services::{SessionFlag, SessionFlags};

use crate::web::helpers::CookieFlagStore;

#[post("/session/dismiss/{flag}")]
pub async fn dismiss_flag(
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let flag: SessionFlag = match path.into_inner().parse() {
        Ok(f) => f,
        Err(e) => return HttpResponse::BadRequest().body(e),
    };

    let mut store = CookieFlagStore::from_request(&req);
    let mut flags = SessionFlags::load(&store);
    flags.dismiss(flag, &mut store);

    let mut resp = HttpResponse::NoContent();
    for cookie in store.into_cookies() {
        resp.cookie(cookie);
    }
    resp.finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dismiss_flag);
}
