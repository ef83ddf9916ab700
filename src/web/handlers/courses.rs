use actix_web::{get, web, HttpRequest, HttpResponse, Responder};

use careerpress::db;
use careerpress::services::{SessionFlag, SessionFlags};
use careerpress::windowing::{InfiniteScroll, Paginator};

use crate::web::forms::{FeedQuery, PageQuery};
use crate::web::helpers::{render, CookieFlagStore, PageNav};
use crate::web::state::AppState;
use crate::web::templates::{CourseFeedTemplate, CoursesTemplate};

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::SeeOther()
        .insert_header(("Location", "/courses"))
        .finish()
}

#[get("/courses")]
pub async fn courses_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let courses = match db::list_published_courses(&state.pool).await {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load courses: {}", e);
            Vec::new()
        }
    };

    let per_page = state.settings.scroll.items_per_page;
    let mut pager = match Paginator::new(&courses, per_page) {
        Ok(p) => p,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    pager.go_to_page(query.page.unwrap_or(1));

    let feed = match InfiniteScroll::new(courses.clone(), state.settings.scroll) {
        Ok(f) => f,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    let flags = SessionFlags::load(&CookieFlagStore::from_request(&req));

    render(CoursesTemplate {
        nav: PageNav::new("/courses", &pager),
        courses: pager.current_items().to_vec(),
        feed_courses: feed.displayed_items().to_vec(),
        feed_next: feed.has_more().then(|| feed.page_count()),
        show_exit_intent: flags.should_show(SessionFlag::ExitIntentShown),
        pull: state.settings.pull,
    })
}

/// Next page of the mobile feed. The client reports how many pages it
/// already shows; the response carries one more page and, if anything is
/// left, a fresh sentinel.
#[get("/courses/feed")]
pub async fn courses_feed(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> impl Responder {
    let courses = match db::list_published_courses(&state.pool).await {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load courses for feed: {}", e);
            return HttpResponse::InternalServerError().body("Could not load courses");
        }
    };

    let shown = query.pages.unwrap_or(1);
    let mut feed = match InfiniteScroll::resume(courses, state.settings.scroll, shown) {
        Ok(f) => f,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };

    if !feed.load_more().await {
        log::debug!("Feed exhausted at {} pages", feed.page_count());
        return HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body("");
    }

    render(CourseFeedTemplate {
        feed_courses: feed.last_page_items().to_vec(),
        feed_next: feed.has_more().then(|| feed.page_count()),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(courses_page)
        .service(courses_feed);
}
