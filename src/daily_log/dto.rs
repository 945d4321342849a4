use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{LogEntryRow, MacroTotals};

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    pub user: Option<String>,
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Deserialize)]
pub struct DailyLogRequest {
    pub user: String,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl DailyLogRequest {
    pub fn macros(&self) -> MacroTotals {
        MacroTotals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DailyFoodItem {
    pub id: Uuid,
    pub name: String,
    /// UTC day the entry counts toward.
    pub date: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl From<LogEntryRow> for DailyFoodItem {
    fn from(r: LogEntryRow) -> Self {
        Self {
            id: r.id,
            name: r.food_name,
            date: r.log_date.to_string(),
            calories: r.calories,
            protein: r.protein,
            carbs: r.carbs,
            fat: r.fat,
            timestamp: r.logged_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DailyLogResponse {
    pub user: String,
    pub date: String,
    pub meals: Vec<DailyFoodItem>,
    pub totals: MacroTotals,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub scope: String,
    pub deleted: u64,
}
