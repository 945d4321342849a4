//! Daily calorie and macro targets from Mifflin-St Jeor BMR times an
//! activity multiplier.

use serde::Serialize;

use super::repo_types::{ActivityLevel, Sex};

const PROTEIN_G_PER_KG: f64 = 1.8;
const FAT_SHARE_OF_CALORIES: f64 = 0.25;

pub const KCAL_PER_G_PROTEIN: i32 = 4;
pub const KCAL_PER_G_CARBS: i32 = 4;
pub const KCAL_PER_G_FAT: i32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Requirements {
    pub calories: i32,
    pub protein: i32,
    pub fat: i32,
    pub carbs: i32,
}

pub fn basal_metabolic_rate(age: i32, sex: Sex, weight_kg: f64, height_cm: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Carbs are whatever calories remain after protein and fat and are not
/// clamped, so extreme inputs can yield a negative value.
pub fn compute_requirements(
    age: i32,
    sex: Sex,
    weight_kg: f64,
    height_cm: f64,
    activity: ActivityLevel,
) -> Requirements {
    let bmr = basal_metabolic_rate(age, sex, weight_kg, height_cm);
    let calories = (bmr * activity.multiplier()).floor() as i32;
    let protein = (weight_kg * PROTEIN_G_PER_KG).floor() as i32;
    let fat = (FAT_SHARE_OF_CALORIES * f64::from(calories) / f64::from(KCAL_PER_G_FAT)).floor() as i32;
    let remainder = calories - (protein * KCAL_PER_G_PROTEIN + fat * KCAL_PER_G_FAT);
    let carbs = (f64::from(remainder) / f64::from(KCAL_PER_G_CARBS)).floor() as i32;

    Requirements {
        calories,
        protein,
        fat,
        carbs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_male_sedentary() {
        let r = compute_requirements(25, Sex::Male, 70.0, 175.0, ActivityLevel::Sedentary);
        assert_eq!(
            r,
            Requirements {
                calories: 2008,
                protein: 126,
                fat: 55,
                carbs: 252,
            }
        );
    }

    #[test]
    fn female_offset_is_166_below_male() {
        let m = basal_metabolic_rate(30, Sex::Male, 60.0, 165.0);
        let f = basal_metabolic_rate(30, Sex::Female, 60.0, 165.0);
        assert_eq!(m - f, 166.0);
    }

    #[test]
    fn activity_tiers_scale_calories() {
        let sed = compute_requirements(40, Sex::Female, 65.0, 168.0, ActivityLevel::Sedentary);
        let act = compute_requirements(40, Sex::Female, 65.0, 168.0, ActivityLevel::Active);
        let very = compute_requirements(40, Sex::Female, 65.0, 168.0, ActivityLevel::VeryActive);
        // bmr = 650 + 1050 - 200 - 161 = 1339
        assert_eq!(sed.calories, (1339.0_f64 * 1.2).floor() as i32);
        assert_eq!(act.calories, (1339.0_f64 * 1.55).floor() as i32);
        assert_eq!(very.calories, (1339.0_f64 * 1.725).floor() as i32);
        assert_eq!(sed.protein, act.protein);
    }

    #[test]
    fn carbs_are_not_clamped() {
        // bmr = 3000 + 6.25 - 2500 - 161 = 345.25 -> calories 414
        // protein 540g alone is 2160 kcal
        let r = compute_requirements(500, Sex::Female, 300.0, 1.0, ActivityLevel::Sedentary);
        assert_eq!(r.calories, 414);
        assert_eq!(r.protein, 540);
        assert_eq!(r.fat, 11);
        // (414 - 2259) / 4 = -461.25
        assert_eq!(r.carbs, -462);
    }
}
