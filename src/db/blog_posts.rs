use sqlx::PgPool;

use crate::models::{BlogPost, BlogPostCreate};

pub async fn list_published_posts(
    pool: &PgPool,
) -> Result<Vec<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(
        r#"
        SELECT *
        FROM blog_posts
        WHERE published_at IS NOT NULL
        ORDER BY published_at DESC, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_published_post_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(
        r#"
        SELECT *
        FROM blog_posts
        WHERE slug = $1 AND published_at IS NOT NULL
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

/// Inserts and publishes immediately.
pub async fn create_post(
    pool: &PgPool,
    data: &BlogPostCreate,
) -> Result<BlogPost, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>(
        r#"
        INSERT INTO blog_posts (title, slug, excerpt, body_html, author, published_at)
        VALUES ($1, $2, $3, $4, $5, now())
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.excerpt)
    .bind(&data.body_html)
    .bind(&data.author)
    .fetch_one(pool)
    .await
}
