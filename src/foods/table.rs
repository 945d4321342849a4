use serde::Serialize;

/// Macronutrients for one serving of a food.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroFacts {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub kcal: f64,
}

impl MacroFacts {
    /// Returned for names missing from the table.
    pub const ZERO: MacroFacts = MacroFacts::new(0.0, 0.0, 0.0, 0.0);

    const fn new(protein: f64, carbs: f64, fat: f64, kcal: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
            kcal,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FoodEntry {
    pub name: &'static str,
    #[serde(flatten)]
    pub macros: MacroFacts,
}

// Per-serving values (Nutritionix). Only the first eight can come out of the
// detector; the rest are reachable by name.
static FOOD_MACROS: [FoodEntry; 13] = [
    food("apple", 0.5, 25.0, 0.3, 95.0),
    food("pizza", 12.0, 36.0, 10.0, 285.0),
    food("cake", 3.6, 46.0, 15.0, 330.0),
    food("hot dog", 10.0, 23.0, 16.0, 290.0),
    food("donut", 4.0, 40.0, 18.0, 320.0),
    food("sandwich", 12.0, 30.0, 10.0, 290.0),
    food("broccoli", 2.5, 6.0, 0.3, 31.0),
    food("banana", 1.3, 27.0, 0.3, 105.0),
    food("orange", 1.2, 15.4, 0.2, 62.0),
    food("carrot", 0.6, 6.0, 0.1, 25.0),
    food("boiled egg", 6.3, 0.6, 5.3, 78.0),
    food("white rice", 4.3, 45.0, 0.4, 205.0),
    food("chicken breast", 31.0, 0.0, 3.6, 165.0),
];

const fn food(name: &'static str, protein: f64, carbs: f64, fat: f64, kcal: f64) -> FoodEntry {
    FoodEntry {
        name,
        macros: MacroFacts::new(protein, carbs, fat, kcal),
    }
}

pub fn all() -> &'static [FoodEntry] {
    &FOOD_MACROS
}

/// Case-insensitive exact match.
pub fn find(name: &str) -> Option<&'static FoodEntry> {
    FOOD_MACROS
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(name))
}

pub fn lookup(name: &str) -> MacroFacts {
    find(name).map(|f| f.macros).unwrap_or(MacroFacts::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("Pizza"), lookup("pizza"));
        assert_eq!(lookup("HOT DOG"), lookup("hot dog"));
        assert_eq!(lookup("pizza").kcal, 285.0);
    }

    #[test]
    fn unknown_food_is_zero() {
        assert_eq!(lookup("dragonfruit"), MacroFacts::ZERO);
        assert!(find("dragonfruit").is_none());
    }

    #[test]
    fn match_is_exact_not_prefix() {
        assert!(find("piz").is_none());
        assert!(find(" pizza").is_none());
    }

    #[test]
    fn table_has_unique_lowercase_names() {
        let names: std::collections::HashSet<_> = all().iter().map(|f| f.name).collect();
        assert_eq!(names.len(), all().len());
        assert!(all().iter().all(|f| f.name == f.name.to_lowercase()));
    }
}
