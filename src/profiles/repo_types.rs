use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use super::requirements::{compute_requirements, Requirements};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Anything other than `male` takes the female BMR offset.
    pub fn from_db(s: &str) -> Self {
        if s == "male" {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Active => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Unrecognized tiers fall back to sedentary.
    pub fn from_db(s: &str) -> Self {
        match s {
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            "sedentary" => ActivityLevel::Sedentary,
            other => {
                warn!(activity_level = %other, "unknown activity tier, using sedentary");
                ActivityLevel::Sedentary
            }
        }
    }
}

/// Row in `user_profiles`, without the stored target snapshot.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub sex: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ProfileRow {
    pub fn sex(&self) -> Sex {
        Sex::from_db(&self.sex)
    }

    pub fn activity(&self) -> ActivityLevel {
        ActivityLevel::from_db(&self.activity_level)
    }

    /// Always recomputed from the physical inputs.
    pub fn requirements(&self) -> Requirements {
        compute_requirements(
            self.age,
            self.sex(),
            self.weight_kg,
            self.height_cm,
            self.activity(),
        )
    }
}
