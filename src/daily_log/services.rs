use anyhow::Context;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};

use super::dto::{DailyFoodItem, DailyLogRequest, DailyLogResponse};
use super::repo;
use super::repo_types::MacroTotals;
use crate::{error::AppError, profiles::services::is_valid_name};

/// Calendar day used to group entries.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn normalize_user(user: &str) -> Result<String, AppError> {
    let user = user.trim();
    if !is_valid_name(user) {
        return Err(AppError::bad_request("invalid user"));
    }
    Ok(user.to_string())
}

pub fn validate_entry(req: &mut DailyLogRequest) -> Result<(), AppError> {
    req.user = normalize_user(&req.user)?;
    req.food_name = req.food_name.trim().to_string();
    if req.food_name.is_empty() {
        return Err(AppError::bad_request("food_name is required"));
    }
    let m = req.macros();
    if [m.calories, m.protein, m.carbs, m.fat]
        .iter()
        .any(|v| !v.is_finite() || *v < 0.0)
    {
        return Err(AppError::bad_request(
            "macro values must be finite and non-negative",
        ));
    }
    Ok(())
}

pub fn sum(items: &[DailyFoodItem]) -> MacroTotals {
    let mut totals = MacroTotals::default();
    for i in items {
        totals += MacroTotals {
            calories: i.calories,
            protein: i.protein,
            carbs: i.carbs,
            fat: i.fat,
        };
    }
    totals
}

pub async fn day_log(db: &PgPool, user: String, day: Date) -> anyhow::Result<DailyLogResponse> {
    let meals: Vec<DailyFoodItem> = repo::list_for_day(db, &user, day)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let totals = sum(&meals);
    Ok(DailyLogResponse {
        user,
        date: day.to_string(),
        meals,
        totals,
    })
}

pub enum ResetScope {
    User(String),
    All,
}

/// Deletes rows for the scope in one transaction. Dropping the transaction on
/// error rolls it back.
pub async fn reset(db: &PgPool, scope: &ResetScope) -> anyhow::Result<u64> {
    let mut tx = db.begin().await.context("begin tx")?;
    let deleted = match scope {
        ResetScope::User(user) => repo::delete_for_user_tx(&mut tx, user).await?,
        ResetScope::All => repo::delete_all_tx(&mut tx).await?,
    };
    tx.commit().await.context("commit tx")?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily_log::repo_types::NewLogEntry;
    use time::macros::datetime;
    use uuid::Uuid;

    fn request(user: &str, food: &str, kcal: f64) -> DailyLogRequest {
        DailyLogRequest {
            user: user.into(),
            food_name: food.into(),
            calories: kcal,
            protein: 1.0,
            carbs: 2.0,
            fat: 3.0,
        }
    }

    #[test]
    fn entry_validation() {
        let mut ok = request(" ana ", " pizza ", 285.0);
        validate_entry(&mut ok).unwrap();
        assert_eq!(ok.user, "ana");
        assert_eq!(ok.food_name, "pizza");

        assert!(validate_entry(&mut request("ana", "  ", 1.0)).is_err());
        assert!(validate_entry(&mut request("", "pizza", 1.0)).is_err());
        assert!(validate_entry(&mut request("ana", "pizza", -1.0)).is_err());
        assert!(validate_entry(&mut request("ana", "pizza", f64::INFINITY)).is_err());
    }

    #[test]
    fn sums_items() {
        let item = |kcal: f64| DailyFoodItem {
            id: Uuid::new_v4(),
            name: "x".into(),
            date: "2026-01-02".into(),
            calories: kcal,
            protein: 1.5,
            carbs: 2.0,
            fat: 0.5,
            timestamp: datetime!(2026-01-02 10:00 UTC),
        };
        let totals = sum(&[item(100.0), item(250.0)]);
        assert_eq!(
            totals,
            MacroTotals {
                calories: 350.0,
                protein: 3.0,
                carbs: 4.0,
                fat: 1.0,
            }
        );
        assert_eq!(sum(&[]), MacroTotals::default());
    }

    #[test]
    fn entry_day_is_utc_date_of_timestamp() {
        let entry = NewLogEntry {
            user: "ana",
            food_name: "apple",
            macros: MacroTotals::default(),
            logged_at: datetime!(2026-03-01 23:30 -05:00),
        };
        assert_eq!(entry.log_date().to_string(), "2026-03-02");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn reset_counts_only_the_scoped_rows(pool: PgPool) {
        let at = OffsetDateTime::now_utc();
        for (user, food) in [("ana", "pizza"), ("ana", "apple"), ("ben", "banana")] {
            repo::insert_entry(
                &pool,
                &NewLogEntry {
                    user,
                    food_name: food,
                    macros: MacroTotals::default(),
                    logged_at: at,
                },
            )
            .await
            .unwrap();
        }

        assert_eq!(reset(&pool, &ResetScope::User("ana".into())).await.unwrap(), 2);
        assert_eq!(reset(&pool, &ResetScope::User("ana".into())).await.unwrap(), 0);

        let log = day_log(&pool, "ben".into(), today()).await.unwrap();
        assert_eq!(log.meals.len(), 1);
        assert_eq!(log.meals[0].name, "banana");

        assert_eq!(reset(&pool, &ResetScope::All).await.unwrap(), 1);
    }
}
