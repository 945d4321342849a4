use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};
use time::Date;

use super::repo_types::{LogEntryRow, MacroTotals, NewLogEntry};

/// Insert one log entry within a transaction.
pub async fn insert_entry_tx(
    tx: &mut Transaction<'_, Postgres>,
    entry: &NewLogEntry<'_>,
) -> anyhow::Result<LogEntryRow> {
    let row = sqlx::query_as::<_, LogEntryRow>(
        r#"
        INSERT INTO daily_logs
            (user_name, log_date, food_name, calories, protein, carbs, fat, logged_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_name, log_date, food_name, calories, protein, carbs, fat, logged_at
        "#,
    )
    .bind(entry.user)
    .bind(entry.log_date())
    .bind(entry.food_name)
    .bind(entry.macros.calories)
    .bind(entry.macros.protein)
    .bind(entry.macros.carbs)
    .bind(entry.macros.fat)
    .bind(entry.logged_at)
    .fetch_one(&mut **tx)
    .await
    .context("insert daily log entry")?;

    Ok(row)
}

pub async fn insert_entry(db: &PgPool, entry: &NewLogEntry<'_>) -> anyhow::Result<LogEntryRow> {
    let mut tx = db.begin().await.context("begin tx")?;
    let row = insert_entry_tx(&mut tx, entry).await?;
    tx.commit().await.context("commit tx")?;
    Ok(row)
}

// ---- Queries ----

pub async fn list_for_day(db: &PgPool, user: &str, day: Date) -> anyhow::Result<Vec<LogEntryRow>> {
    let rows = sqlx::query_as::<_, LogEntryRow>(
        r#"
        SELECT id, user_name, log_date, food_name, calories, protein, carbs, fat, logged_at
          FROM daily_logs
         WHERE user_name = $1 AND log_date = $2
         ORDER BY logged_at ASC
        "#,
    )
    .bind(user)
    .bind(day)
    .fetch_all(db)
    .await
    .context("list daily log entries")?;

    Ok(rows)
}

pub async fn totals_for_day(db: &PgPool, user: &str, day: Date) -> anyhow::Result<MacroTotals> {
    let totals = sqlx::query_as::<_, MacroTotals>(
        r#"
        SELECT COALESCE(SUM(calories), 0)::float8 AS calories,
               COALESCE(SUM(protein), 0)::float8  AS protein,
               COALESCE(SUM(carbs), 0)::float8    AS carbs,
               COALESCE(SUM(fat), 0)::float8      AS fat
          FROM daily_logs
         WHERE user_name = $1 AND log_date = $2
        "#,
    )
    .bind(user)
    .bind(day)
    .fetch_one(db)
    .await
    .context("sum daily log entries")?;

    Ok(totals)
}

// ---- Reset ----

pub async fn delete_for_user_tx(
    tx: &mut Transaction<'_, Postgres>,
    user: &str,
) -> anyhow::Result<u64> {
    let done = sqlx::query("DELETE FROM daily_logs WHERE user_name = $1")
        .bind(user)
        .execute(&mut **tx)
        .await
        .context("delete user log entries")?;
    Ok(done.rows_affected())
}

pub async fn delete_all_tx(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<u64> {
    let done = sqlx::query("DELETE FROM daily_logs")
        .execute(&mut **tx)
        .await
        .context("delete all log entries")?;
    Ok(done.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use time::OffsetDateTime;

    fn entry<'a>(user: &'a str, food: &'a str, kcal: f64, at: OffsetDateTime) -> NewLogEntry<'a> {
        NewLogEntry {
            user,
            food_name: food,
            macros: MacroTotals {
                calories: kcal,
                protein: 1.0,
                carbs: 2.0,
                fat: 0.5,
            },
            logged_at: at,
        }
    }

    async fn seed(pool: &PgPool, entries: &[NewLogEntry<'_>]) {
        for e in entries {
            insert_entry(pool, e).await.unwrap();
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn day_queries_filter_by_user_and_utc_date(pool: PgPool) {
        seed(
            &pool,
            &[
                entry("ana", "pizza", 285.0, datetime!(2026-03-02 08:00 UTC)),
                // 04:30 UTC on the 2nd
                entry("ana", "apple", 52.0, datetime!(2026-03-01 23:30 -05:00)),
                entry("ana", "cake", 257.0, datetime!(2026-03-01 12:00 UTC)),
                entry("ben", "banana", 89.0, datetime!(2026-03-02 09:00 UTC)),
            ],
        )
        .await;

        let day = date!(2026 - 03 - 02);
        let rows = list_for_day(&pool, "ana", day).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.food_name.as_str()).collect();
        assert_eq!(names, vec!["apple", "pizza"]);
        assert!(rows.iter().all(|r| r.log_date == day));

        let totals = totals_for_day(&pool, "ana", day).await.unwrap();
        assert_eq!(
            totals,
            MacroTotals {
                calories: 337.0,
                protein: 2.0,
                carbs: 4.0,
                fat: 1.0,
            }
        );

        let previous = totals_for_day(&pool, "ana", date!(2026 - 03 - 01)).await.unwrap();
        assert_eq!(previous.calories, 257.0);
        assert_eq!(
            totals_for_day(&pool, "nobody", day).await.unwrap(),
            MacroTotals::default()
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn user_delete_leaves_other_users(pool: PgPool) {
        let at = datetime!(2026-03-02 08:00 UTC);
        seed(
            &pool,
            &[
                entry("ana", "pizza", 285.0, at),
                entry("ana", "apple", 52.0, at),
                entry("ben", "banana", 89.0, at),
            ],
        )
        .await;

        let mut tx = pool.begin().await.unwrap();
        assert_eq!(delete_for_user_tx(&mut tx, "ana").await.unwrap(), 2);
        tx.commit().await.unwrap();

        let day = date!(2026 - 03 - 02);
        assert!(list_for_day(&pool, "ana", day).await.unwrap().is_empty());
        assert_eq!(list_for_day(&pool, "ben", day).await.unwrap().len(), 1);

        let mut tx = pool.begin().await.unwrap();
        assert_eq!(delete_all_tx(&mut tx).await.unwrap(), 1);
        tx.commit().await.unwrap();
        assert!(list_for_day(&pool, "ben", day).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn uncommitted_delete_rolls_back(pool: PgPool) {
        let at = datetime!(2026-03-02 08:00 UTC);
        seed(&pool, &[entry("ana", "pizza", 285.0, at)]).await;

        let mut tx = pool.begin().await.unwrap();
        assert_eq!(delete_all_tx(&mut tx).await.unwrap(), 1);
        drop(tx);

        let rows = list_for_day(&pool, "ana", date!(2026 - 03 - 02)).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
