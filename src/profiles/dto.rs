use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{ActivityLevel, ProfileRow, Sex};
use super::requirements::Requirements;

/// Body of `POST /profile/`. Targets are never accepted from the client.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    pub age: i32,
    #[serde(alias = "gender")]
    pub sex: Sex,
    pub weight: f64,
    pub height: f64,
    pub activity_level: ActivityLevel,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub sex: Sex,
    pub weight: f64,
    pub height: f64,
    pub activity_level: ActivityLevel,
    pub requirements: Requirements,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ProfileRow> for ProfileResponse {
    fn from(row: ProfileRow) -> Self {
        let requirements = row.requirements();
        Self {
            id: row.id,
            sex: row.sex(),
            activity_level: row.activity(),
            name: row.name,
            age: row.age,
            weight: row.weight_kg,
            height: row.height_cm,
            requirements,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
