#![cfg(feature = "db-tests")]

mod common;

#[cfg(test)]
pub mod db_tests {
    use sqlx::PgPool;
    use uuid::Uuid;

    use careerpress::db::*;
    use careerpress::models::*;
    use careerpress::services::{PerformanceCache, TrafficController, VariantStore};

    async fn insert_variant(
        pool: &PgPool,
        label: &str,
        weight: i32,
    ) -> Uuid {
        let row: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO email_variants (test_name, label, subject, traffic_weight, auto_selection_paused)
            VALUES ('welcome-series', $1, 'Welcome', $2, true)
            RETURNING id
            "#,
        )
        .bind(label)
        .bind(weight)
        .fetch_one(pool)
        .await
        .expect("Failed to seed variant");
        row.0
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_from_pool(pool: PgPool) {
        let db = Database::from_pool(pool.clone());

        let row: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&db.pool)
            .await
            .expect("Failed to query database");

        assert_eq!(row.0, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_published_courses_only(pool: PgPool) {
        let created = create_course(
            &pool,
            &CourseCreate {
                title: "UX Design".into(),
                slug: "ux-design".into(),
                summary: "Research to prototype".into(),
                level: CourseLevel::Intermediate,
                duration_weeks: 16,
                price_cents: 349_900,
            },
        )
        .await
        .expect("Failed to create course");

        sqlx::query("INSERT INTO courses (title, slug) VALUES ('Draft', 'draft')")
            .execute(&pool)
            .await
            .unwrap();

        let courses = list_published_courses(&pool).await.unwrap();
        assert_eq!(courses, vec![created.clone()]);

        let by_slug = get_course_by_slug(&pool, "ux-design").await.unwrap();
        assert_eq!(by_slug, Some(created));
        assert!(get_course_by_slug(&pool, "draft").await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_blog_posts_by_slug(pool: PgPool) {
        let post = create_post(
            &pool,
            &BlogPostCreate {
                title: "Switching careers at 35".into(),
                slug: "switching-careers".into(),
                excerpt: "It is never too late".into(),
                body_html: "<p>Story</p>".into(),
                author: "Admissions team".into(),
            },
        )
        .await
        .unwrap();

        assert!(post.is_published());
        let posts = list_published_posts(&pool).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(
            get_published_post_by_slug(&pool, "switching-careers")
                .await
                .unwrap()
                .map(|p| p.id),
            Some(post.id)
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_variant_query_sorting(pool: PgPool) {
        insert_variant(&pool, "B", 40).await;
        insert_variant(&pool, "A", 60).await;

        let query = VariantQuery {
            sort_by: vec![(VariantSort::Label, true)],
            ..VariantQuery::for_test("welcome-series")
        };
        let labels: Vec<String> = list_variants(&pool, &query)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.label)
            .collect();
        assert_eq!(labels, vec!["A", "B"]);

        let summaries = list_test_summaries(&pool).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].variant_count, 2);
        assert!(summaries[0].auto_selection_paused);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_weights_is_all_or_nothing(pool: PgPool) {
        let a = insert_variant(&pool, "A", 50).await;
        let b = insert_variant(&pool, "B", 50).await;
        let store = PgVariantStore::new(pool.clone());

        let result = store
            .update_weights(&[(a, 70), (Uuid::new_v4(), 30)])
            .await;
        assert!(result.is_err());

        let weights: Vec<i32> = list_variants(&pool, &VariantQuery::for_test("welcome-series"))
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.traffic_weight)
            .collect();
        assert_eq!(weights, vec![50, 50]);

        store.update_weights(&[(a, 70), (b, 30)]).await.unwrap();
        let weights: Vec<i32> = list_variants(&pool, &VariantQuery::for_test("welcome-series"))
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.traffic_weight)
            .collect();
        assert_eq!(weights, vec![70, 30]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_controller_against_postgres(pool: PgPool) {
        let a = insert_variant(&pool, "A", 50).await;
        let b = insert_variant(&pool, "B", 50).await;
        let cache = PerformanceCache::new();

        let mut controller = TrafficController::load(
            PgVariantStore::new(pool.clone()),
            &cache,
            "welcome-series",
        )
        .await
        .unwrap();

        controller.set_weight(a, 25).unwrap();
        controller.set_weight(b, 75).unwrap();
        controller.save().await.unwrap();

        assert_eq!(controller.toggle_pause().await.unwrap(), false);
        let running = list_variants(
            &pool,
            &VariantQuery {
                auto_selection_paused: Some(false),
                ..VariantQuery::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(running.len(), 2);
        assert_eq!(running[0].traffic_weight, 25);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_pause_toggle_rolls_back_when_a_variant_is_gone(pool: PgPool) {
        insert_variant(&pool, "A", 50).await;
        let b = insert_variant(&pool, "B", 50).await;
        let cache = PerformanceCache::new();

        let mut controller = TrafficController::load(
            PgVariantStore::new(pool.clone()),
            &cache,
            "welcome-series",
        )
        .await
        .unwrap();
        assert!(controller.auto_selection_paused());

        sqlx::query("DELETE FROM email_variants WHERE id = $1")
            .bind(b)
            .execute(&pool)
            .await
            .unwrap();

        assert!(controller.toggle_pause().await.is_err());
        assert!(controller.auto_selection_paused());

        let variants = list_variants(&pool, &VariantQuery::for_test("welcome-series"))
            .await
            .unwrap();
        assert_eq!(variants.len(), 1);
        assert!(variants[0].auto_selection_paused);
    }
}
