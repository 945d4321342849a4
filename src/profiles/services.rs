use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;

use super::dto::ProfileRequest;
use super::repo::{self, NewProfile};
use super::repo_types::ProfileRow;
use super::requirements::compute_requirements;
use crate::error::AppError;

pub const AGE_RANGE: std::ops::RangeInclusive<i32> = 0..=120;
pub const WEIGHT_RANGE_KG: std::ops::RangeInclusive<f64> = 20.0..=300.0;
pub const HEIGHT_RANGE_CM: std::ops::RangeInclusive<f64> = 50.0..=250.0;

pub(crate) fn is_valid_name(name: &str) -> bool {
    lazy_static! {
        static ref NAME_RE: Regex = Regex::new(r"^[\p{L}\p{N} ._-]{1,64}$").unwrap();
    }
    NAME_RE.is_match(name)
}

/// Trims the name and range-checks the physical inputs.
pub fn validate(req: &mut ProfileRequest) -> Result<(), AppError> {
    req.name = req.name.trim().to_string();
    if !is_valid_name(&req.name) {
        return Err(AppError::bad_request("invalid name"));
    }
    if !AGE_RANGE.contains(&req.age) {
        return Err(AppError::bad_request("age must be between 0 and 120"));
    }
    if !WEIGHT_RANGE_KG.contains(&req.weight) {
        return Err(AppError::bad_request("weight must be between 20 and 300 kg"));
    }
    if !HEIGHT_RANGE_CM.contains(&req.height) {
        return Err(AppError::bad_request("height must be between 50 and 250 cm"));
    }
    Ok(())
}

/// Recomputes targets from the request and writes the profile for its name.
pub async fn save_profile(db: &PgPool, req: &ProfileRequest) -> anyhow::Result<ProfileRow> {
    let targets = compute_requirements(req.age, req.sex, req.weight, req.height, req.activity_level);
    repo::upsert(
        db,
        &NewProfile {
            name: &req.name,
            age: req.age,
            sex: req.sex,
            weight_kg: req.weight,
            height_cm: req.height,
            activity: req.activity_level,
            targets,
        },
    )
    .await
}
