use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rank tier in the grading system, as listed in the belt catalog.
///
/// Students carry a copy of this struct taken at registration time, so the
/// fee and labels recorded for a student never follow later catalog edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeltLevel {
    /// Catalog identifier, e.g. "white-10"
    pub id: String,
    /// Belt color name, e.g. "White"
    pub name: String,
    /// Rank label, e.g. "10th kyu"
    pub kyu: String,
    /// Exam fee charged for this belt
    pub fee: f64,
    /// Display color tag
    pub color: String,
}

impl BeltLevel {
    /// Human readable label such as "Blue 7th kyu"
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.kyu)
    }
}

/// A registered student together with the fees recorded at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// UUID v4 string
    pub id: String,
    /// Serial number, assigned as (number of existing records + 1)
    pub sl_no: u32,
    pub student_name: String,
    /// Snapshot of the catalog entry selected at registration
    pub belt_level: BeltLevel,
    pub exam_fees: f64,
    #[serde(default)]
    pub food_fees: f64,
    /// Miscellaneous rice charge; `None` means "not yet recorded", which is not the same as zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rice: Option<f64>,
    #[serde(default, alias = "gargentFees")]
    pub garment_fees: f64,
    pub created_at: DateTime<Utc>,
}

/// Raw registration form input. Every field is the unparsed string the user typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentFormData {
    pub student_name: String,
    /// Selected belt id, empty when nothing is selected
    pub belt_level: String,
    pub exam_fees: String,
    pub food_fees: String,
    pub rice: Option<String>,
    #[serde(alias = "gargentFees")]
    pub garment_fees: String,
}

impl StudentFormData {
    /// Whether the form satisfies the submit preconditions: a non-blank name and a selected belt.
    pub fn can_submit(&self) -> bool {
        !self.student_name.trim().is_empty() && !self.belt_level.is_empty()
    }
}

/// Fee totals over a set of students, as shown on the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub total_students: usize,
    pub total_exam_fees: f64,
    pub total_food_fees: f64,
    pub total_rice: f64,
    pub total_garment_fees: f64,
    pub grand_total: f64,
}

/// Per-belt aggregate of every fee component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeltRollup {
    pub belt: BeltLevel,
    /// Hex color used when charting this belt
    pub chart_color: String,
    /// Number of students on this belt
    pub students: usize,
    pub exam_fees: f64,
    pub food_fees: f64,
    pub rice: f64,
    pub garment_fees: f64,
    pub total_fees: f64,
    /// Everything except the exam fee
    pub others_fees: f64,
    /// Average total per student, 0 when the belt has no students
    pub average_total: f64,
}

/// Number of students holding a given belt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeltCount {
    pub belt: BeltLevel,
    pub count: usize,
}

/// Headline statistics for the student directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub total_students: usize,
    pub total_fees: f64,
    /// Average total fee rounded to a whole amount
    pub average_fees: f64,
    /// Number of belts with at least one student
    pub active_belts: usize,
    pub belt_distribution: Vec<BeltCount>,
}

/// Restricts a student list to one belt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum BeltFilter {
    #[default]
    All,
    Belt(String),
}

impl BeltFilter {
    /// Parse a filter parameter; "all" or an empty value selects every belt.
    pub fn from_param(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            BeltFilter::All
        } else {
            BeltFilter::Belt(value.to_string())
        }
    }
}

/// High/low split of students by total fee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeTier {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "high-fees")]
    High,
    #[serde(rename = "low-fees")]
    Low,
}

impl FeeTier {
    /// Parse a tier parameter, ignoring ASCII case. Unknown values select every student.
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high-fees" | "high" => FeeTier::High,
            "low-fees" | "low" => FeeTier::Low,
            _ => FeeTier::All,
        }
    }
}

/// Fixed total-fee bands used by the student directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeRange {
    #[default]
    All,
    /// Below 500
    Low,
    /// 500 up to (not including) 1000
    Medium,
    /// 1000 and above
    High,
}

impl FeeRange {
    /// Parse a range parameter, ignoring ASCII case. Unknown values select every student.
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => FeeRange::Low,
            "medium" => FeeRange::Medium,
            "high" => FeeRange::High,
            _ => FeeRange::All,
        }
    }
}

/// Query string accepted by the student list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentListRequest {
    /// Matched against name, serial number, belt name and kyu label
    pub search: Option<String>,
    /// Belt id or "all"
    pub belt: Option<String>,
    /// "all", "high-fees" or "low-fees"
    pub tier: Option<String>,
    /// "all", "low", "medium" or "high"
    pub range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListResponse {
    /// Matching students, most recently registered first
    pub students: Vec<Student>,
    /// Number of students shown after filtering
    pub shown: usize,
    /// Number of registered students
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStudentResponse {
    pub student: Student,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeltListResponse {
    pub belts: Vec<BeltLevel>,
}

/// Belt-wise analytics with grand totals across the surfaced belts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeltAnalyticsResponse {
    /// Only belts that have at least one student, in catalog order
    pub belts: Vec<BeltRollup>,
    pub total_students: usize,
    pub total_revenue: f64,
    pub others_fees: f64,
    pub exam_fees: f64,
}

/// Query string for the summary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryRequest {
    pub belt: Option<String>,
}

/// A student row with every amount already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedStudentRow {
    pub id: String,
    pub sl_no: u32,
    /// e.g. "#12"
    pub serial_label: String,
    pub student_name: String,
    pub belt_label: String,
    pub badge_class: String,
    pub exam_fees: String,
    pub food_fees: String,
    /// "—" when no rice charge was recorded
    pub rice: String,
    pub garment_fees: String,
    pub total: String,
    pub raw_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentTableResponse {
    pub rows: Vec<FormattedStudentRow>,
    pub shown: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_belt() -> BeltLevel {
        BeltLevel {
            id: "white-10".to_string(),
            name: "White".to_string(),
            kyu: "10th kyu".to_string(),
            fee: 170.0,
            color: "bg-white text-black border-gray-300".to_string(),
        }
    }

    #[test]
    fn test_belt_label() {
        assert_eq!(white_belt().label(), "White 10th kyu");
    }

    #[test]
    fn test_student_uses_camel_case_and_omits_absent_rice() {
        let student = Student {
            id: "abc".to_string(),
            sl_no: 1,
            student_name: "Asha".to_string(),
            belt_level: white_belt(),
            exam_fees: 170.0,
            food_fees: 50.0,
            rice: None,
            garment_fees: 20.0,
            created_at: "2025-01-02T03:04:05Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["slNo"], 1);
        assert_eq!(json["studentName"], "Asha");
        assert_eq!(json["beltLevel"]["kyu"], "10th kyu");
        assert_eq!(json["garmentFees"], 20.0);
        assert!(json.get("rice").is_none());
    }

    #[test]
    fn test_student_accepts_legacy_garment_field_name() {
        let json = r#"{
            "id": "abc",
            "slNo": 3,
            "studentName": "Ravi",
            "beltLevel": {"id": "blue-8", "name": "Blue", "kyu": "8th kyu", "fee": 170, "color": "bg-blue-500 text-white"},
            "examFees": 170,
            "foodFees": 0,
            "rice": 0,
            "gargentFees": 45,
            "createdAt": "2025-01-02T03:04:05.000Z"
        }"#;

        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.garment_fees, 45.0);
        assert_eq!(student.rice, Some(0.0));
    }

    #[test]
    fn test_student_missing_optional_fees_default_to_zero() {
        let json = r#"{
            "id": "abc",
            "slNo": 1,
            "studentName": "Mina",
            "beltLevel": {"id": "green-3", "name": "Green", "kyu": "3rd kyu", "fee": 260, "color": "bg-green-600 text-white"},
            "examFees": 260,
            "createdAt": "2025-01-02T03:04:05Z"
        }"#;

        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.food_fees, 0.0);
        assert_eq!(student.garment_fees, 0.0);
        assert_eq!(student.rice, None);
    }

    #[test]
    fn test_form_can_submit() {
        let mut form = StudentFormData {
            student_name: "Asha".to_string(),
            belt_level: "white-10".to_string(),
            ..Default::default()
        };
        assert!(form.can_submit());

        form.student_name = "   ".to_string();
        assert!(!form.can_submit());

        form.student_name = "Asha".to_string();
        form.belt_level = String::new();
        assert!(!form.can_submit());
    }

    #[test]
    fn test_filter_params() {
        assert_eq!(BeltFilter::from_param("all"), BeltFilter::All);
        assert_eq!(BeltFilter::from_param(""), BeltFilter::All);
        assert_eq!(BeltFilter::from_param("blue-7"), BeltFilter::Belt("blue-7".to_string()));

        assert_eq!(FeeTier::from_param("high-fees"), FeeTier::High);
        assert_eq!(FeeTier::from_param("low-fees"), FeeTier::Low);
        assert_eq!(FeeTier::from_param("bogus"), FeeTier::All);

        assert_eq!(FeeRange::from_param("medium"), FeeRange::Medium);
        assert_eq!(FeeRange::from_param("unknown"), FeeRange::All);
    }

    #[test]
    fn test_filter_params_ignore_case() {
        assert_eq!(BeltFilter::from_param("ALL"), BeltFilter::All);
        assert_eq!(FeeTier::from_param("HIGH"), FeeTier::High);
        assert_eq!(FeeTier::from_param(" Low-Fees "), FeeTier::Low);
        assert_eq!(FeeRange::from_param("HIGH"), FeeRange::High);
        assert_eq!(FeeRange::from_param("Medium"), FeeRange::Medium);
    }
}
