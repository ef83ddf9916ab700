use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use askama::Template;
use uuid::Uuid;

use careerpress::services::{ErrorBoundary, FlagStore, SessionFlag};
use careerpress::windowing::Paginator;

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

pub fn current_user_id(req: &HttpRequest) -> Option<Uuid> {
    // Priority: cookie -> request header -> env var.
    let cookie_val = req
        .cookie("cp_uid")
        .map(|c| c.value().trim().to_string())
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(&s).ok());

    if cookie_val.is_some() {
        return cookie_val;
    }

    let header_val = req
        .headers()
        .get("X-Careerpress-User-Id")
        .or_else(|| req.headers().get("X-User-Id"))
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok());

    header_val.or_else(|| {
        std::env::var("CAREERPRESS_ADMIN_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .and_then(|s| Uuid::parse_str(&s).ok())
    })
}

pub fn require_user(req: &HttpRequest) -> Result<Uuid, HttpResponse> {
    match current_user_id(req) {
        Some(uid) => Ok(uid),
        None => {
            log::warn!("Unauthenticated request to {}", req.path());
            if is_htmx(req) {
                Err(HttpResponse::Unauthorized()
                    .insert_header(("HX-Redirect", "/"))
                    .finish())
            } else {
                Err(HttpResponse::Unauthorized()
                    .content_type("text/plain; charset=utf-8")
                    .body("Sign in to access the admin area"))
            }
        }
    }
}

/// Renders through an [`ErrorBoundary`] so a template failure still yields a
/// readable page instead of an empty response.
pub fn render<T: Template>(t: T) -> HttpResponse {
    render_with_status(t, StatusCode::OK)
}

pub fn render_with_status<T: Template>(t: T, status: StatusCode) -> HttpResponse {
    let mut boundary = ErrorBoundary::new();
    let body = boundary.render(|| t.render());

    let status = if boundary.has_failed() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        status
    };

    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn render_not_found(req: &HttpRequest) -> HttpResponse {
    log::debug!("Not found: {}", req.path());
    HttpResponse::NotFound()
        .content_type("text/plain; charset=utf-8")
        .body("Not found")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub is_current: bool,
}

/// Everything the pagination controls need, detached from the borrowed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNav {
    pub total_pages: usize,
    pub total_items: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub links: Vec<PageLink>,
}

impl PageNav {
    pub fn new<T>(base_path: &str, pager: &Paginator<'_, T>) -> Self {
        let current = pager.current_page();
        let href = |page: usize| format!("{base_path}?page={page}");

        Self {
            total_pages: pager.total_pages(),
            total_items: pager.total_items(),
            start_index: pager.start_index(),
            end_index: pager.end_index(),
            previous_href: pager.can_go_previous().then(|| href(current - 1)),
            next_href: pager.can_go_next().then(|| href(current + 1)),
            links: pager
                .page_numbers()
                .into_iter()
                .map(|number| PageLink {
                    number,
                    href: href(number),
                    is_current: number == current,
                })
                .collect(),
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }
}

/// Session flags backed by long-lived cookies. Writes are collected and
/// attached to the response by the caller.
pub struct CookieFlagStore<'r> {
    req: &'r HttpRequest,
    pending: Vec<Cookie<'static>>,
}

impl<'r> CookieFlagStore<'r> {
    pub fn from_request(req: &'r HttpRequest) -> Self {
        Self {
            req,
            pending: Vec::new(),
        }
    }

    fn cookie_name(flag: SessionFlag) -> String {
        format!("cp_{}", flag.as_str())
    }

    pub fn into_cookies(self) -> Vec<Cookie<'static>> {
        self.pending
    }
}

impl FlagStore for CookieFlagStore<'_> {
    fn read(&self, flag: SessionFlag) -> bool {
        self.req
            .cookie(&Self::cookie_name(flag))
            .is_some_and(|c| c.value() == "1")
    }

    fn write(&mut self, flag: SessionFlag) {
        let cookie = Cookie::build(Self::cookie_name(flag), "1")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(actix_web::cookie::time::Duration::days(30))
            .finish();
        self.pending.push(cookie);
    }
}
