//! Aggregation engine over the student working set.
//!
//! Everything in here is a pure function of its input slice: filters, search,
//! ordering, and the per-belt and whole-set rollups the reporting views show.
//! Sums are returned exactly as computed; rounding is a display concern.

use shared::{
    BeltCount, BeltFilter, BeltRollup, FeeRange, FeeTier, Student, StudentListRequest,
    StudentStats, StudentSummary,
};

use super::belt_catalog;

/// Threshold separating high and low fee students under the fixed policy
pub const DEFAULT_HIGH_FEE_THRESHOLD: f64 = 1000.0;

/// Lower bound of the medium fee range
pub const MEDIUM_RANGE_START: f64 = 500.0;

/// Lower bound of the high fee range
pub const HIGH_RANGE_START: f64 = 1000.0;

/// How the high/low fee tier threshold is chosen.
///
/// A student is "high" when their total is strictly above the threshold and
/// "low" otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeeTierPolicy {
    /// A constant threshold
    Fixed(f64),
    /// The mean total of the set being filtered, recomputed on every call
    MeanOfSet,
}

impl Default for FeeTierPolicy {
    fn default() -> Self {
        FeeTierPolicy::Fixed(DEFAULT_HIGH_FEE_THRESHOLD)
    }
}

impl FeeTierPolicy {
    /// Parse "mean", "fixed" or "fixed:<amount>"
    pub fn from_setting(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("mean") {
            return Some(FeeTierPolicy::MeanOfSet);
        }
        if value.eq_ignore_ascii_case("fixed") {
            return Some(FeeTierPolicy::default());
        }
        let amount = value.strip_prefix("fixed:")?.trim().parse::<f64>().ok()?;
        if amount.is_finite() && amount >= 0.0 {
            Some(FeeTierPolicy::Fixed(amount))
        } else {
            None
        }
    }

    /// Threshold to use for `students`
    pub fn threshold(&self, students: &[Student]) -> f64 {
        match self {
            FeeTierPolicy::Fixed(threshold) => *threshold,
            FeeTierPolicy::MeanOfSet => mean_total(students),
        }
    }
}

/// Filters applied to the student directory, parsed from a list request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentQuery {
    pub search: String,
    pub belt: BeltFilter,
    pub tier: FeeTier,
    pub range: FeeRange,
}

impl StudentQuery {
    pub fn from_request(request: &StudentListRequest) -> Self {
        Self {
            search: request.search.clone().unwrap_or_default(),
            belt: request
                .belt
                .as_deref()
                .map(BeltFilter::from_param)
                .unwrap_or_default(),
            tier: request
                .tier
                .as_deref()
                .map(FeeTier::from_param)
                .unwrap_or_default(),
            range: request
                .range
                .as_deref()
                .map(FeeRange::from_param)
                .unwrap_or_default(),
        }
    }
}

/// Total of a student's four fee components; an absent rice charge counts as zero
pub fn total(student: &Student) -> f64 {
    student.exam_fees + student.food_fees + student.rice.unwrap_or(0.0) + student.garment_fees
}

/// Mean total across `students`, 0 for an empty set
pub fn mean_total(students: &[Student]) -> f64 {
    if students.is_empty() {
        return 0.0;
    }
    students.iter().map(total).sum::<f64>() / students.len() as f64
}

/// Whether `student` matches a free-text directory search.
///
/// Matches on name, serial number digits, belt name or kyu label. Case is
/// ignored and an empty query matches everyone.
pub fn matches_search(student: &Student, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    student.student_name.to_lowercase().contains(&needle)
        || student.sl_no.to_string().contains(query)
        || student.belt_level.name.to_lowercase().contains(&needle)
        || student.belt_level.kyu.to_lowercase().contains(&needle)
}

pub fn search(students: &[Student], query: &str) -> Vec<Student> {
    students
        .iter()
        .filter(|student| matches_search(student, query))
        .cloned()
        .collect()
}

pub fn filter_by_belt(students: &[Student], filter: &BeltFilter) -> Vec<Student> {
    match filter {
        BeltFilter::All => students.to_vec(),
        BeltFilter::Belt(belt_id) => students
            .iter()
            .filter(|student| &student.belt_level.id == belt_id)
            .cloned()
            .collect(),
    }
}

pub fn filter_by_fee_tier(students: &[Student], tier: FeeTier, policy: FeeTierPolicy) -> Vec<Student> {
    if tier == FeeTier::All {
        return students.to_vec();
    }

    let threshold = policy.threshold(students);
    students
        .iter()
        .filter(|student| {
            let is_high = total(student) > threshold;
            match tier {
                FeeTier::High => is_high,
                FeeTier::Low => !is_high,
                FeeTier::All => true,
            }
        })
        .cloned()
        .collect()
}

/// Whether a total falls inside a fixed fee range
pub fn in_fee_range(total_fees: f64, range: FeeRange) -> bool {
    match range {
        FeeRange::All => true,
        FeeRange::Low => total_fees < MEDIUM_RANGE_START,
        FeeRange::Medium => (MEDIUM_RANGE_START..HIGH_RANGE_START).contains(&total_fees),
        FeeRange::High => total_fees >= HIGH_RANGE_START,
    }
}

pub fn filter_by_fee_range(students: &[Student], range: FeeRange) -> Vec<Student> {
    students
        .iter()
        .filter(|student| in_fee_range(total(student), range))
        .cloned()
        .collect()
}

/// Most recently registered first
pub fn sort_by_serial_desc(mut students: Vec<Student>) -> Vec<Student> {
    students.sort_by(|a, b| b.sl_no.cmp(&a.sl_no));
    students
}

/// Apply a directory query: search, fee tier, fee range, then belt, newest first
pub fn apply_query(students: &[Student], query: &StudentQuery, policy: FeeTierPolicy) -> Vec<Student> {
    let matched = search(students, &query.search);
    let tiered = filter_by_fee_tier(&matched, query.tier, policy);
    let ranged = filter_by_fee_range(&tiered, query.range);
    let belted = filter_by_belt(&ranged, &query.belt);
    sort_by_serial_desc(belted)
}

/// Per-belt rollups in catalog order, skipping belts nobody holds
pub fn belt_rollups(students: &[Student]) -> Vec<BeltRollup> {
    belt_catalog::list()
        .iter()
        .filter_map(|belt| {
            let on_belt: Vec<&Student> = students
                .iter()
                .filter(|student| student.belt_level.id == belt.id)
                .collect();
            if on_belt.is_empty() {
                return None;
            }

            let exam_fees: f64 = on_belt.iter().map(|s| s.exam_fees).sum();
            let food_fees: f64 = on_belt.iter().map(|s| s.food_fees).sum();
            let rice: f64 = on_belt.iter().map(|s| s.rice.unwrap_or(0.0)).sum();
            let garment_fees: f64 = on_belt.iter().map(|s| s.garment_fees).sum();
            let total_fees = exam_fees + food_fees + rice + garment_fees;

            Some(BeltRollup {
                belt: belt.clone(),
                chart_color: belt_catalog::chart_color(&belt.color).to_string(),
                students: on_belt.len(),
                exam_fees,
                food_fees,
                rice,
                garment_fees,
                total_fees,
                others_fees: total_fees - exam_fees,
                average_total: total_fees / on_belt.len() as f64,
            })
        })
        .collect()
}

/// Whole-set fee totals
pub fn summarize(students: &[Student]) -> StudentSummary {
    students.iter().fold(StudentSummary::default(), |mut acc, student| {
        acc.total_students += 1;
        acc.total_exam_fees += student.exam_fees;
        acc.total_food_fees += student.food_fees;
        acc.total_rice += student.rice.unwrap_or(0.0);
        acc.total_garment_fees += student.garment_fees;
        acc.grand_total += total(student);
        acc
    })
}

/// Directory headline numbers and the belt distribution
pub fn student_stats(students: &[Student]) -> StudentStats {
    let total_fees: f64 = students.iter().map(total).sum();
    let average_fees = if students.is_empty() {
        0.0
    } else {
        (total_fees / students.len() as f64).round()
    };

    let belt_distribution: Vec<BeltCount> = belt_catalog::list()
        .iter()
        .map(|belt| BeltCount {
            belt: belt.clone(),
            count: students.iter().filter(|s| s.belt_level.id == belt.id).count(),
        })
        .filter(|entry| entry.count > 0)
        .collect();

    StudentStats {
        total_students: students.len(),
        total_fees,
        average_fees,
        active_belts: belt_distribution.len(),
        belt_distribution,
    }
}
