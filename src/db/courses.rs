use sqlx::PgPool;

use crate::models::{Course, CourseCreate};

/// Full published catalogue, newest first. The site windows this list
/// locally, so no paging parameters are sent to the database.
pub async fn list_published_courses(
    pool: &PgPool,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT *
        FROM courses
        WHERE published = true
        ORDER BY created_at DESC, title ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_course_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT *
        FROM courses
        WHERE slug = $1 AND published = true
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

pub async fn create_course(
    pool: &PgPool,
    data: &CourseCreate,
) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (title, slug, summary, level, duration_weeks, price_cents, published)
        VALUES ($1, $2, $3, $4, $5, $6, true)
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.summary)
    .bind(data.level.as_str())
    .bind(data.duration_weeks)
    .bind(data.price_cents)
    .fetch_one(pool)
    .await
}
