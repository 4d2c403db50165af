use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::belt_catalog;
use super::record_store::StudentStore;
use shared::{Student, StudentFormData};

/// Reasons a registration form is not accepted. The store is left untouched.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Student name cannot be empty")]
    EmptyName,
    #[error("A belt level must be selected")]
    NoBeltSelected,
    #[error("Unknown belt level: {0}")]
    UnknownBelt(String),
}

/// Coerce a fee input to a number. Blank, unparseable, negative or
/// non-finite input becomes 0.
pub fn parse_fee(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Like [`parse_fee`], except that a blank or missing input stays absent
pub fn parse_optional_fee(input: Option<&str>) -> Option<f64> {
    match input.map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(parse_fee(value)),
    }
}

/// A blank form with `belt_id` selected and its exam fee filled in
pub fn form_for_belt(belt_id: &str) -> Option<StudentFormData> {
    let fee = belt_catalog::exam_fee_for(belt_id)?;
    Some(StudentFormData {
        belt_level: belt_id.to_string(),
        exam_fees: fee.to_string(),
        ..Default::default()
    })
}

/// Build a student from form input.
///
/// The serial number is left at 0; the store assigns it on append.
pub fn build_student(form: &StudentFormData, created_at: DateTime<Utc>) -> Result<Student, RegistrationError> {
    let name = form.student_name.trim();
    if !form.can_submit() {
        return Err(if name.is_empty() {
            RegistrationError::EmptyName
        } else {
            RegistrationError::NoBeltSelected
        });
    }
    let belt = belt_catalog::lookup(&form.belt_level)
        .ok_or_else(|| RegistrationError::UnknownBelt(form.belt_level.clone()))?;

    Ok(Student {
        id: uuid::Uuid::new_v4().to_string(),
        sl_no: 0,
        student_name: name.to_string(),
        belt_level: belt.clone(),
        exam_fees: parse_fee(&form.exam_fees),
        food_fees: parse_fee(&form.food_fees),
        rice: parse_optional_fee(form.rice.as_deref()),
        garment_fees: parse_fee(&form.garment_fees),
        created_at,
    })
}

/// Turns submitted forms into stored students
#[derive(Clone)]
pub struct RegistrationService {
    store: StudentStore,
}

impl RegistrationService {
    pub fn new(store: StudentStore) -> Self {
        Self { store }
    }

    /// Register a student from form input.
    ///
    /// Rejected forms surface as a [`RegistrationError`] inside the returned
    /// error and never reach the store.
    pub async fn register(&self, form: StudentFormData) -> Result<Student> {
        info!("Registering student: name={:?}, belt={:?}", form.student_name, form.belt_level);

        let student = match build_student(&form, Utc::now()) {
            Ok(student) => student,
            Err(e) => {
                warn!("Registration rejected: {}", e);
                return Err(e.into());
            }
        };

        let stored = self.store.append(student).await?;

        info!(
            "Registered {} ({}) as #{}",
            stored.student_name,
            stored.belt_level.label(),
            stored.sl_no
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use crate::domain::aggregation;
    use crate::domain::record_store::DEFAULT_STORAGE_KEY;

    async fn setup_test() -> (StudentStore, RegistrationService) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let store = StudentStore::open(db, DEFAULT_STORAGE_KEY).await.expect("Failed to open store");
        let service = RegistrationService::new(store.clone());
        (store, service)
    }

    fn form(name: &str, belt_id: &str) -> StudentFormData {
        StudentFormData {
            student_name: name.to_string(),
            ..form_for_belt(belt_id).unwrap_or_default()
        }
    }

    #[test]
    fn test_parse_fee() {
        assert_eq!(parse_fee("50"), 50.0);
        assert_eq!(parse_fee(" 12.75 "), 12.75);
        assert_eq!(parse_fee(""), 0.0);
        assert_eq!(parse_fee("abc"), 0.0);
        assert_eq!(parse_fee("NaN"), 0.0);
        assert_eq!(parse_fee("inf"), 0.0);
        assert_eq!(parse_fee("-20"), 0.0);
    }

    #[test]
    fn test_parse_optional_fee_keeps_absent_distinct_from_zero() {
        assert_eq!(parse_optional_fee(None), None);
        assert_eq!(parse_optional_fee(Some("")), None);
        assert_eq!(parse_optional_fee(Some("   ")), None);
        assert_eq!(parse_optional_fee(Some("0")), Some(0.0));
        assert_eq!(parse_optional_fee(Some("30")), Some(30.0));
        assert_eq!(parse_optional_fee(Some("rice")), Some(0.0));
    }

    #[test]
    fn test_form_for_belt_prefills_exam_fee() {
        let form = form_for_belt("yellow-5").expect("belt exists");
        assert_eq!(form.belt_level, "yellow-5");
        assert_eq!(form.exam_fees, "230");
        assert!(form_for_belt("purple-1").is_none());
    }

    #[test]
    fn test_build_student_rejections() {
        let now = Utc::now();

        let blank = form("  ", "white-10");
        assert_eq!(build_student(&blank, now), Err(RegistrationError::EmptyName));

        let mut no_belt = form("Asha", "white-10");
        no_belt.belt_level.clear();
        assert_eq!(build_student(&no_belt, now), Err(RegistrationError::NoBeltSelected));

        let mut nothing = form(" ", "white-10");
        nothing.belt_level.clear();
        assert!(!nothing.can_submit());
        assert_eq!(build_student(&nothing, now), Err(RegistrationError::EmptyName));

        let mut unknown = form("Asha", "white-10");
        unknown.belt_level = "black-1".to_string();
        assert!(unknown.can_submit());
        assert_eq!(
            build_student(&unknown, now),
            Err(RegistrationError::UnknownBelt("black-1".to_string()))
        );
    }

    #[test]
    fn test_negative_fee_inputs_become_zero() {
        let mut input = form("Asha", "white-10");
        input.food_fees = "-20".to_string();
        input.garment_fees = "-0.5".to_string();
        input.rice = Some("-5".to_string());

        let student = build_student(&input, Utc::now()).unwrap();
        assert_eq!(student.food_fees, 0.0);
        assert_eq!(student.garment_fees, 0.0);
        assert_eq!(student.rice, Some(0.0));
        assert_eq!(aggregation::total(&student), 170.0);
    }

    #[test]
    fn test_exam_fee_is_editable_after_prefill() {
        let mut input = form("Asha", "brown-2");
        input.exam_fees = "250".to_string();

        let student = build_student(&input, Utc::now()).unwrap();
        assert_eq!(student.exam_fees, 250.0);
        assert_eq!(student.belt_level.fee, 300.0);
    }

    #[tokio::test]
    async fn test_register_asha_scenario() {
        let (store, service) = setup_test().await;
        service.register(form("Priya", "green-3")).await.unwrap();

        let mut input = form("Asha", "white-10");
        input.food_fees = "50".to_string();
        input.rice = Some(String::new());
        input.garment_fees = "20".to_string();

        let asha = service.register(input).await.expect("registration succeeds");

        assert_eq!(asha.sl_no, 2);
        assert_eq!(asha.exam_fees, 170.0);
        assert_eq!(asha.rice, None);
        assert_eq!(aggregation::total(&asha), 240.0);

        let newest_first = aggregation::sort_by_serial_desc(store.snapshot().await);
        assert_eq!(newest_first[0].student_name, "Asha");
    }

    #[tokio::test]
    async fn test_rejected_registration_leaves_store_unchanged() {
        let (store, service) = setup_test().await;
        service.register(form("Asha", "white-10")).await.unwrap();
        let before = store.load().await.unwrap();

        let err = service.register(form("", "white-10")).await.unwrap_err();
        assert_eq!(err.downcast_ref::<RegistrationError>(), Some(&RegistrationError::EmptyName));

        let mut no_belt = form("Ravi", "white-10");
        no_belt.belt_level.clear();
        assert!(service.register(no_belt).await.is_err());

        assert_eq!(store.load().await.unwrap(), before);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_serials_increase_by_one_from_one() {
        let (_store, service) = setup_test().await;

        let mut serials = Vec::new();
        for (name, belt) in [("A", "white-10"), ("B", "white-9"), ("C", "blue-8"), ("D", "green-4")] {
            serials.push(service.register(form(name, belt)).await.unwrap().sl_no);
        }

        assert_eq!(serials, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_belt_snapshot_is_a_copy() {
        let (store, service) = setup_test().await;
        service.register(form("Asha", "blue-7")).await.unwrap();

        let stored = store.snapshot().await;
        assert_eq!(&stored[0].belt_level, belt_catalog::lookup("blue-7").unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_get_unique_serials() {
        let (store, service) = setup_test().await;
        let count = 20;

        let handles: Vec<_> = (0..count)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move { service.register(form(&format!("Student {}", i), "white-10")).await })
            })
            .collect();

        let mut serials = Vec::new();
        for handle in handles {
            serials.push(handle.await.expect("task panicked").expect("registration succeeds").sl_no);
        }
        serials.sort_unstable();

        assert_eq!(serials, (1..=count as u32).collect::<Vec<_>>());

        let persisted = store.load().await.unwrap();
        assert_eq!(persisted.len(), count);
        let mut persisted_serials: Vec<u32> = persisted.iter().map(|s| s.sl_no).collect();
        persisted_serials.sort_unstable();
        assert_eq!(persisted_serials, serials);
    }
}
