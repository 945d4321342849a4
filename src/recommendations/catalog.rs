use serde::Serialize;

use crate::daily_log::repo_types::MacroTotals;

#[derive(Debug, Clone, Serialize)]
pub struct CandidateFood {
    pub name: &'static str,
    pub description: &'static str,
    pub macros: MacroTotals,
}

const fn dish(
    name: &'static str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    description: &'static str,
) -> CandidateFood {
    CandidateFood {
        name,
        description,
        macros: MacroTotals {
            calories,
            protein,
            carbs,
            fat,
        },
    }
}

/// Traditional Bolivian dishes offered as suggestions.
pub static BOLIVIAN_FOODS: [CandidateFood; 10] = [
    dish("Quinoa", 120.0, 4.4, 21.3, 1.9, "Andean grain rich in protein and fiber"),
    dish("Charque", 150.0, 30.0, 0.0, 3.5, "Dried meat, high in protein"),
    dish("Chuño", 160.0, 1.9, 38.0, 0.2, "Traditional freeze-dried potato, rich in carbohydrates"),
    dish("Camote", 86.0, 1.6, 20.1, 0.1, "Sweet potato high in vitamin A"),
    dish("Tarwi", 150.0, 15.5, 9.6, 7.2, "Andean legume with high protein value"),
    dish("Arroz con Queso", 190.0, 6.0, 25.0, 7.0, "Balanced rice and cheese dish"),
    dish("Locro", 250.0, 12.0, 28.0, 10.0, "Thick traditional soup with meat and corn"),
    dish("Falso Conejo", 300.0, 18.0, 30.0, 12.0, "Breaded beef served with rice"),
    dish("Majadito", 220.0, 10.0, 35.0, 6.0, "Rice with charque from eastern Bolivia"),
    dish("Sopa de Maní", 280.0, 9.0, 15.0, 20.0, "Traditional peanut and meat soup"),
];
