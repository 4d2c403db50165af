//! Fee table display formatting.
//!
//! Turns students into table rows with every amount rendered the way the
//! portal shows money: rounded to a whole number, grouped in the Indian
//! numbering system and prefixed with the rupee sign. A rice charge that was
//! never recorded renders as a dash instead of a zero amount.

use serde::{Deserialize, Serialize};
use shared::{FormattedStudentRow, Student};

use super::aggregation;
use super::belt_catalog;

/// Display configuration for fee tables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeTableConfig {
    pub currency_symbol: String,
    /// Shown in place of an amount that was never recorded
    pub absent_marker: String,
}

impl Default for FeeTableConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            absent_marker: "—".to_string(),
        }
    }
}

#[derive(Clone, Default)]
pub struct FeeTableService {
    config: FeeTableConfig,
}

impl FeeTableService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FeeTableConfig) -> Self {
        Self { config }
    }

    /// Whole-number amount with Indian digit grouping, e.g. "₹1,23,457"
    pub fn format_currency(&self, amount: f64) -> String {
        let rounded = amount.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        format!(
            "{}{}{}",
            sign,
            self.config.currency_symbol,
            group_indian(rounded.abs() as u64)
        )
    }

    /// Like [`Self::format_currency`], but an absent amount shows the absent marker
    pub fn format_optional(&self, amount: Option<f64>) -> String {
        match amount {
            Some(value) => self.format_currency(value),
            None => self.config.absent_marker.clone(),
        }
    }

    pub fn format_row(&self, student: &Student) -> FormattedStudentRow {
        let total = aggregation::total(student);
        FormattedStudentRow {
            id: student.id.clone(),
            sl_no: student.sl_no,
            serial_label: format!("#{}", student.sl_no),
            student_name: student.student_name.clone(),
            belt_label: student.belt_level.label(),
            badge_class: belt_catalog::badge_class(&student.belt_level.name).to_string(),
            exam_fees: self.format_currency(student.exam_fees),
            food_fees: self.format_currency(student.food_fees),
            rice: self.format_optional(student.rice),
            garment_fees: self.format_currency(student.garment_fees),
            total: self.format_currency(total),
            raw_total: total,
        }
    }

    pub fn format_rows(&self, students: &[Student]) -> Vec<FormattedStudentRow> {
        students.iter().map(|student| self.format_row(student)).collect()
    }
}

/// Group digits as lakh/crore: last three digits, then pairs
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
