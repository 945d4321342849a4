use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime, UtcOffset};
use uuid::Uuid;

use crate::foods::MacroFacts;

/// Calories plus the three macros, in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, FromRow)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl From<MacroFacts> for MacroTotals {
    fn from(m: MacroFacts) -> Self {
        Self {
            calories: m.kcal,
            protein: m.protein,
            carbs: m.carbs,
            fat: m.fat,
        }
    }
}

impl std::ops::AddAssign for MacroTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fat += rhs.fat;
    }
}

/// Row in `daily_logs`. `log_date` is the UTC date of `logged_at`.
#[derive(Debug, Clone, FromRow)]
pub struct LogEntryRow {
    pub id: Uuid,
    pub user_name: String,
    pub log_date: Date,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub logged_at: OffsetDateTime,
}

pub struct NewLogEntry<'a> {
    pub user: &'a str,
    pub food_name: &'a str,
    pub macros: MacroTotals,
    pub logged_at: OffsetDateTime,
}

impl NewLogEntry<'_> {
    /// UTC calendar date of `logged_at`.
    pub fn log_date(&self) -> Date {
        self.logged_at.to_offset(UtcOffset::UTC).date()
    }
}
