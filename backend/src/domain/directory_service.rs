use tracing::info;

use super::aggregation::{self, FeeTierPolicy, StudentQuery};
use super::fee_table::FeeTableService;
use super::record_store::StudentStore;
use shared::{
    BeltAnalyticsResponse, BeltFilter, StudentListRequest, StudentListResponse, StudentStats,
    StudentSummary, StudentTableResponse,
};

/// Read-side service behind every reporting view.
///
/// Each call works on a fresh copy of the store's working set, so all views
/// see the same persisted data.
#[derive(Clone)]
pub struct DirectoryService {
    store: StudentStore,
    policy: FeeTierPolicy,
    fee_table: FeeTableService,
}

impl DirectoryService {
    pub fn new(store: StudentStore, policy: FeeTierPolicy) -> Self {
        Self {
            store,
            policy,
            fee_table: FeeTableService::new(),
        }
    }

    pub fn with_fee_table(mut self, fee_table: FeeTableService) -> Self {
        self.fee_table = fee_table;
        self
    }

    pub fn policy(&self) -> FeeTierPolicy {
        self.policy
    }

    /// Filtered directory listing, most recently registered first
    pub async fn list_students(&self, request: &StudentListRequest) -> StudentListResponse {
        let students = self.store.snapshot().await;
        let query = StudentQuery::from_request(request);
        let matched = aggregation::apply_query(&students, &query, self.policy);

        info!("Directory query {:?} matched {} of {} students", query, matched.len(), students.len());

        StudentListResponse {
            shown: matched.len(),
            total: students.len(),
            students: matched,
        }
    }

    /// Same listing as [`Self::list_students`], formatted for display
    pub async fn student_table(&self, request: &StudentListRequest) -> StudentTableResponse {
        let listing = self.list_students(request).await;
        StudentTableResponse {
            rows: self.fee_table.format_rows(&listing.students),
            shown: listing.shown,
            total: listing.total,
        }
    }

    /// Dashboard totals, optionally narrowed to one belt
    pub async fn summary(&self, belt: &BeltFilter) -> StudentSummary {
        let students = self.store.snapshot().await;
        aggregation::summarize(&aggregation::filter_by_belt(&students, belt))
    }

    pub async fn student_stats(&self) -> StudentStats {
        aggregation::student_stats(&self.store.snapshot().await)
    }

    /// Belt-wise rollups plus grand totals over the surfaced belts
    pub async fn belt_analytics(&self) -> BeltAnalyticsResponse {
        let students = self.store.snapshot().await;
        let belts = aggregation::belt_rollups(&students);

        BeltAnalyticsResponse {
            total_students: belts.iter().map(|b| b.students).sum(),
            total_revenue: belts.iter().map(|b| b.total_fees).sum(),
            others_fees: belts.iter().map(|b| b.others_fees).sum(),
            exam_fees: belts.iter().map(|b| b.exam_fees).sum(),
            belts,
        }
    }
}
