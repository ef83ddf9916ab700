/// Record a failure both in the process log and in the `error_logs` table.
///
/// The insert runs on a spawned task and its own failure is ignored, so the
/// caller never waits on (or fails because of) the bookkeeping.
#[macro_export]
macro_rules! log_err {
    // Usage: log_err!(&self.pool, "what failed", params);
    ($pool:expr, $what:expr, $params:expr) => {{
        let pool_clone = $pool.clone();
        let location = format!("{}:{}", file!(), line!());
        let message = ($what).to_string();

        let params_json = ::serde_json::to_value($params)
            .unwrap_or(::serde_json::Value::Null);

        ::log::error!("{} at {}: {}", message, location, params_json);

        ::tokio::spawn(async move {
            let _ = ::sqlx::query(
                r#"
                    INSERT INTO error_logs (location, message, parameters)
                    VALUES ($1, $2, $3)
                    "#,
            )
            .bind(location)
            .bind(message)
            .bind(params_json)
            .execute(&pool_clone)
            .await;
        });
    }};
}
