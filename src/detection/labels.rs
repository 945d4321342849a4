/// COCO class ids the detector can report that we have macro data for.
static FOOD_CLASSES: [(i64, &str); 8] = [
    (52, "banana"),
    (53, "apple"),
    (54, "sandwich"),
    (56, "broccoli"),
    (58, "hot dog"),
    (59, "pizza"),
    (60, "donut"),
    (61, "cake"),
];

pub const UNKNOWN: &str = "Unknown";

pub fn label_for(class_id: i64) -> Option<&'static str> {
    FOOD_CLASSES
        .iter()
        .find(|(id, _)| *id == class_id)
        .map(|(_, name)| *name)
}

pub fn label_or_unknown(class_id: i64) -> &'static str {
    label_for(class_id).unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foods::table;

    #[test]
    fn maps_known_ids() {
        assert_eq!(label_for(59), Some("pizza"));
        assert_eq!(label_for(58), Some("hot dog"));
        assert_eq!(label_for(55), None);
        assert_eq!(label_or_unknown(1), UNKNOWN);
    }

    #[test]
    fn every_label_has_macro_data() {
        for (_, name) in FOOD_CLASSES.iter() {
            assert!(table::find(name).is_some(), "{} missing from macro table", name);
        }
    }
}
