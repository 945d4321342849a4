use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{ActivityLevel, ProfileRow, Sex};
use super::requirements::Requirements;

// Stored targets are a write-side snapshot; reads recompute them.
const PROFILE_COLUMNS: &str = r#"
    id, name, age, sex, weight_kg, height_cm, activity_level, created_at, updated_at
"#;

pub struct NewProfile<'a> {
    pub name: &'a str,
    pub age: i32,
    pub sex: Sex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: ActivityLevel,
    pub targets: Requirements,
}

/// Insert or overwrite the profile keyed by `name` in one statement.
pub async fn upsert(db: &PgPool, p: &NewProfile<'_>) -> anyhow::Result<ProfileRow> {
    let sql = format!(
        r#"
        INSERT INTO user_profiles
            (name, age, sex, weight_kg, height_cm, activity_level,
             target_calories, target_protein, target_fat, target_carbs)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (name) DO UPDATE SET
            age = EXCLUDED.age,
            sex = EXCLUDED.sex,
            weight_kg = EXCLUDED.weight_kg,
            height_cm = EXCLUDED.height_cm,
            activity_level = EXCLUDED.activity_level,
            target_calories = EXCLUDED.target_calories,
            target_protein = EXCLUDED.target_protein,
            target_fat = EXCLUDED.target_fat,
            target_carbs = EXCLUDED.target_carbs,
            updated_at = now()
        RETURNING {PROFILE_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(p.name)
        .bind(p.age)
        .bind(p.sex.as_str())
        .bind(p.weight_kg)
        .bind(p.height_cm)
        .bind(p.activity.as_str())
        .bind(p.targets.calories)
        .bind(p.targets.protein)
        .bind(p.targets.fat)
        .bind(p.targets.carbs)
        .fetch_one(db)
        .await
        .context("upsert profile")?;
    Ok(row)
}

pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<ProfileRow>> {
    let sql = format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE name = $1");
    let row = sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(name)
        .fetch_optional(db)
        .await
        .context("find profile by name")?;
    Ok(row)
}
