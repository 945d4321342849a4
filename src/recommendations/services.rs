//! Deficit-coverage scoring over a candidate list, then a random pick from
//! the best scorers. Output differs between calls for the same input.

use rand::{seq::SliceRandom, Rng};
use serde::Serialize;

use super::catalog::CandidateFood;
use crate::daily_log::repo_types::MacroTotals;
use crate::profiles::requirements::Requirements;

pub const POOL_SIZE: usize = 6;
pub const PICK: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Protein,
    Carbs,
    Fat,
    Calories,
}

impl Nutrient {
    /// Scoring order, which is also the order reasons are listed in.
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fat,
        Nutrient::Calories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
            Nutrient::Calories => "calories",
        }
    }

    fn of(self, m: &MacroTotals) -> f64 {
        match self {
            Nutrient::Protein => m.protein,
            Nutrient::Carbs => m.carbs,
            Nutrient::Fat => m.fat,
            Nutrient::Calories => m.calories,
        }
    }

    fn target(self, r: &Requirements) -> f64 {
        f64::from(match self {
            Nutrient::Protein => r.protein,
            Nutrient::Carbs => r.carbs,
            Nutrient::Fat => r.fat,
            Nutrient::Calories => r.calories,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub description: String,
    pub macros: MacroTotals,
    pub reason: String,
    pub score: f64,
}

/// `max(target - consumed, 0)` per nutrient.
pub fn deficits(targets: &Requirements, consumed: &MacroTotals) -> MacroTotals {
    let gap = |n: Nutrient| (n.target(targets) - n.of(consumed)).max(0.0);
    MacroTotals {
        calories: gap(Nutrient::Calories),
        protein: gap(Nutrient::Protein),
        carbs: gap(Nutrient::Carbs),
        fat: gap(Nutrient::Fat),
    }
}

/// Scores every candidate, drops zero scores and returns the rest best first.
pub fn rank(
    targets: &Requirements,
    consumed: &MacroTotals,
    candidates: &[CandidateFood],
) -> Vec<Suggestion> {
    let deficit = deficits(targets, consumed);
    let open: Vec<Nutrient> = Nutrient::ALL
        .into_iter()
        .filter(|n| n.of(&deficit) > 0.0)
        .collect();
    if open.is_empty() {
        return Vec::new();
    }

    let reason = format!(
        "Good source of {}",
        open.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(", ")
    );

    let mut scored: Vec<Suggestion> = candidates
        .iter()
        .filter_map(|food| {
            let score: f64 = open
                .iter()
                .map(|n| n.of(&food.macros) / n.target(targets).max(1.0))
                .sum();
            (score > 0.0).then(|| Suggestion {
                name: food.name.to_string(),
                description: food.description.to_string(),
                macros: food.macros,
                reason: reason.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Up to [`PICK`] suggestions sampled without replacement from the top
/// [`POOL_SIZE`].
pub fn recommend<R: Rng + ?Sized>(
    targets: &Requirements,
    consumed: &MacroTotals,
    candidates: &[CandidateFood],
    rng: &mut R,
) -> Vec<Suggestion> {
    let mut ranked = rank(targets, consumed, candidates);
    ranked.truncate(POOL_SIZE);
    ranked.choose_multiple(rng, PICK).cloned().collect()
}
