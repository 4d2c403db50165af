//! The fixed belt catalog.
//!
//! Ten grades across five belt colors, each color split into two kyu levels.
//! The catalog is built once and never mutated; students copy the entry they
//! register on, so nothing here can change an existing record.

use once_cell::sync::Lazy;
use shared::BeltLevel;

/// Fallback chart color for unknown color tags
pub const DEFAULT_CHART_COLOR: &str = "#8884d8";

const CATALOG: [(&str, &str, &str, f64, &str); 10] = [
    ("white-10", "White", "10th kyu", 170.0, "bg-white text-black border-gray-300"),
    ("white-9", "White", "9th kyu", 170.0, "bg-white text-black border-gray-300"),
    ("blue-8", "Blue", "8th kyu", 170.0, "bg-blue-500 text-white"),
    ("blue-7", "Blue", "7th kyu", 200.0, "bg-blue-600 text-white"),
    ("yellow-6", "Yellow", "6th kyu", 200.0, "bg-yellow-400 text-black"),
    ("yellow-5", "Yellow", "5th kyu", 230.0, "bg-yellow-500 text-black"),
    ("green-4", "Green", "4th kyu", 230.0, "bg-green-500 text-white"),
    ("green-3", "Green", "3rd kyu", 260.0, "bg-green-600 text-white"),
    ("brown-2", "Brown", "2nd kyu", 300.0, "bg-amber-700 text-white"),
    ("brown-1", "Brown", "1st kyu", 300.0, "bg-amber-800 text-white"),
];

static BELT_LEVELS: Lazy<Vec<BeltLevel>> = Lazy::new(|| {
    CATALOG
        .iter()
        .map(|(id, name, kyu, fee, color)| BeltLevel {
            id: id.to_string(),
            name: name.to_string(),
            kyu: kyu.to_string(),
            fee: *fee,
            color: color.to_string(),
        })
        .collect()
});

/// All belt levels in grading order, lowest first
pub fn list() -> &'static [BeltLevel] {
    &BELT_LEVELS
}

/// Find a belt level by id
pub fn lookup(id: &str) -> Option<&'static BeltLevel> {
    BELT_LEVELS.iter().find(|belt| belt.id == id)
}

/// Exam fee to pre-fill when `id` is selected
pub fn exam_fee_for(id: &str) -> Option<f64> {
    lookup(id).map(|belt| belt.fee)
}

/// Hex color for charting a belt with the given color tag
pub fn chart_color(color_tag: &str) -> &'static str {
    match color_tag {
        "bg-white text-black border-gray-300" => "#eeeeee",
        "bg-blue-500 text-white" => "#3b82f6",
        "bg-blue-600 text-white" => "#2563eb",
        "bg-yellow-400 text-black" => "#facc15",
        "bg-yellow-500 text-black" => "#eab308",
        "bg-green-500 text-white" => "#22c55e",
        "bg-green-600 text-white" => "#16a34a",
        "bg-amber-700 text-white" => "#b45309",
        "bg-amber-800 text-white" => "#92400e",
        _ => DEFAULT_CHART_COLOR,
    }
}

/// Badge style tag for a belt color name
pub fn badge_class(belt_name: &str) -> &'static str {
    match belt_name {
        "Blue" => "bg-blue-100 text-blue-800 border-blue-300",
        "Yellow" => "bg-yellow-100 text-yellow-800 border-yellow-300",
        "Green" => "bg-green-100 text-green-800 border-green-300",
        "Brown" => "bg-amber-100 text-amber-800 border-amber-300",
        _ => "bg-gray-100 text-gray-800 border-gray-300",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_ten_unique_entries() {
        let ids: HashSet<&str> = list().iter().map(|belt| belt.id.as_str()).collect();
        assert_eq!(list().len(), 10);
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_catalog_spans_five_colors_with_two_kyu_each() {
        for color in ["White", "Blue", "Yellow", "Green", "Brown"] {
            let count = list().iter().filter(|belt| belt.name == color).count();
            assert_eq!(count, 2, "expected two kyu levels for {}", color);
        }
    }

    #[test]
    fn test_fees_stay_within_schedule() {
        assert!(list().iter().all(|belt| (170.0..=300.0).contains(&belt.fee)));
        assert_eq!(list().first().unwrap().id, "white-10");
        assert_eq!(list().last().unwrap().id, "brown-1");
    }

    #[test]
    fn test_lookup() {
        let belt = lookup("blue-7").expect("blue-7 should exist");
        assert_eq!(belt.name, "Blue");
        assert_eq!(belt.kyu, "7th kyu");
        assert_eq!(belt.fee, 200.0);

        assert!(lookup("black-1").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_exam_fee_for() {
        assert_eq!(exam_fee_for("white-10"), Some(170.0));
        assert_eq!(exam_fee_for("green-3"), Some(260.0));
        assert_eq!(exam_fee_for("nope"), None);
    }

    #[test]
    fn test_chart_colors() {
        assert_eq!(chart_color("bg-blue-500 text-white"), "#3b82f6");
        assert_eq!(chart_color("something else"), DEFAULT_CHART_COLOR);
        assert!(list().iter().all(|belt| chart_color(&belt.color) != DEFAULT_CHART_COLOR));
    }

    #[test]
    fn test_badge_class_defaults_to_gray() {
        assert_eq!(badge_class("Green"), "bg-green-100 text-green-800 border-green-300");
        assert_eq!(badge_class("White"), "bg-gray-100 text-gray-800 border-gray-300");
        assert_eq!(badge_class("Purple"), "bg-gray-100 text-gray-800 border-gray-300");
    }
}
