use askama::Template;

use careerpress::feedback::Toast;
use careerpress::models::{BlogPost, Course, TestSummary, VariantPerformance};
use careerpress::services::VariantWeight;
use careerpress::windowing::PullConfig;

use crate::web::helpers::PageNav;

#[derive(Template)]
#[template(path = "public/courses.html")]
pub struct CoursesTemplate {
    pub nav: PageNav,
    pub courses: Vec<Course>,
    pub feed_courses: Vec<Course>,
    pub feed_next: Option<usize>,
    pub show_exit_intent: bool,
    pub pull: PullConfig,
}

/// Infinite-scroll fragment; shares field names with [`CoursesTemplate`]
/// which includes the same markup for the first page.
#[derive(Template)]
#[template(path = "public/course_feed.html")]
pub struct CourseFeedTemplate {
    pub feed_courses: Vec<Course>,
    pub feed_next: Option<usize>,
}

#[derive(Template)]
#[template(path = "public/blog_list.html")]
pub struct BlogListTemplate {
    pub nav: PageNav,
    pub posts: Vec<BlogPost>,
}

#[derive(Template)]
#[template(path = "public/blog_post.html")]
pub struct BlogPostTemplate {
    pub post: BlogPost,
}

#[derive(Template)]
#[template(path = "admin/ab_tests.html")]
pub struct AbTestsTemplate {
    pub tests: Vec<TestSummary>,
}

#[derive(Template)]
#[template(path = "admin/ab_test.html")]
pub struct AbTestTemplate {
    pub test_name: String,
    pub variants: Vec<VariantWeight>,
    pub total: u32,
    pub is_valid: bool,
    pub paused: bool,
    pub performance: Vec<VariantPerformance>,
    pub toasts: Vec<Toast>,
    pub error: Option<String>,
}

/// Just the control panel, swapped in place by htmx after a POST.
#[derive(Template)]
#[template(path = "admin/ab_test_panel.html")]
pub struct AbTestPanelTemplate {
    pub test_name: String,
    pub variants: Vec<VariantWeight>,
    pub total: u32,
    pub is_valid: bool,
    pub paused: bool,
    pub performance: Vec<VariantPerformance>,
    pub toasts: Vec<Toast>,
    pub error: Option<String>,
}
