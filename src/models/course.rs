use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::CourseLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub level: CourseLevel,
    pub duration_weeks: i32,
    pub price_cents: i64,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

impl Course {
    /// Price formatted for display, e.g. `$1,499` or `$1,499.50`.
    pub fn display_price(&self) -> String {
        let dollars = self.price_cents / 100;
        let cents = self.price_cents % 100;

        let digits = dollars.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        if cents == 0 {
            format!("${grouped}")
        } else {
            format!("${grouped}.{cents:02}")
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCreate {
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub level: CourseLevel,
    pub duration_weeks: i32,
    pub price_cents: i64,
}
