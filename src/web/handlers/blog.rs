use actix_web::{get, web, HttpRequest, HttpResponse, Responder};

use careerpress::db;
use careerpress::windowing::Paginator;

use crate::web::forms::PageQuery;
use crate::web::helpers::{render, render_not_found, PageNav};
use crate::web::state::AppState;
use crate::web::templates::{BlogListTemplate, BlogPostTemplate};

const POSTS_PER_PAGE: usize = 9;

#[get("/blog")]
pub async fn blog_list(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let posts = db::list_published_posts(&state.pool)
        .await
        .unwrap_or_default();

    let mut pager = match Paginator::new(&posts, POSTS_PER_PAGE) {
        Ok(p) => p,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    pager.go_to_page(query.page.unwrap_or(1));

    render(BlogListTemplate {
        nav: PageNav::new("/blog", &pager),
        posts: pager.current_items().to_vec(),
    })
}

#[get("/blog/{slug}")]
pub async fn blog_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let slug = path.into_inner();

    match db::get_published_post_by_slug(&state.pool, &slug).await {
        Ok(Some(post)) => render(BlogPostTemplate { post }),
        Ok(None) => render_not_found(&req),
        Err(e) => {
            log::error!("Failed to load post {:?}: {}", slug, e);
            HttpResponse::InternalServerError().body("Could not load post")
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(blog_list).service(blog_post);
}
