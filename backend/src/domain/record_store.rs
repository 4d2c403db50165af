//! The student record store.
//!
//! Students live in memory as a single working set mirrored from one snapshot
//! stored under a fixed key. The snapshot is read once when the store is
//! opened and rewritten in full after every mutation. Last writer wins.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::db::DbConnection;
use shared::Student;

/// Key the student snapshot is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "students";

#[derive(Clone)]
pub struct StudentStore {
    db: DbConnection,
    key: String,
    students: Arc<RwLock<Vec<Student>>>,
}

impl StudentStore {
    /// Open the store and rehydrate the working set from the persisted snapshot
    pub async fn open(db: DbConnection, key: impl Into<String>) -> Result<Self> {
        let store = Self {
            db,
            key: key.into(),
            students: Arc::new(RwLock::new(Vec::new())),
        };

        let loaded = store.load().await?;
        info!("Loaded {} students from snapshot '{}'", loaded.len(), store.key);
        *store.students.write().await = loaded;

        Ok(store)
    }

    /// Read the persisted snapshot.
    ///
    /// A missing snapshot or one that no longer parses yields an empty set.
    pub async fn load(&self) -> Result<Vec<Student>> {
        match self.db.get_value(&self.key).await? {
            Some(payload) => Ok(decode_snapshot(&payload)),
            None => {
                info!("No snapshot stored under '{}', starting empty", self.key);
                Ok(Vec::new())
            }
        }
    }

    /// Add a student, assigning the next serial number, and persist the full set.
    ///
    /// Whatever serial number `student` carries is replaced.
    pub async fn append(&self, mut student: Student) -> Result<Student> {
        let mut students = self.students.write().await;

        student.sl_no = students.len() as u32 + 1;
        students.push(student.clone());

        if let Err(e) = self.write_snapshot(&students).await {
            students.pop();
            return Err(e);
        }

        info!("Appended student #{} ({})", student.sl_no, student.student_name);
        Ok(student)
    }

    /// Overwrite the stored snapshot (and the working set) with `students`
    pub async fn persist(&self, students: Vec<Student>) -> Result<()> {
        let mut current = self.students.write().await;
        self.write_snapshot(&students).await?;
        *current = students;
        Ok(())
    }

    /// Copy of the current working set, in insertion order
    pub async fn snapshot(&self) -> Vec<Student> {
        self.students.read().await.clone()
    }

    /// Number of registered students
    pub async fn len(&self) -> usize {
        self.students.read().await.len()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    async fn write_snapshot(&self, students: &[Student]) -> Result<()> {
        let payload = serde_json::to_string(students)?;
        self.db.put_value(&self.key, &payload).await
    }
}

/// Parse a stored snapshot, treating anything unreadable as an empty set
pub fn decode_snapshot(payload: &str) -> Vec<Student> {
    match serde_json::from_str::<Vec<Student>>(payload) {
        Ok(students) => students,
        Err(e) => {
            warn!("Discarding unreadable student snapshot: {}", e);
            Vec::new()
        }
    }
}
