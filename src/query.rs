//! Filtered, paginated record queries.
//!
//! A [`RecordQuery`] is built once from a validated [`MedicalRecordFilter`]
//! and then either rendered to a SeaORM [`Condition`] or evaluated against
//! records in memory. Both paths share the same predicate.

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, Condition};

use crate::entities::medical_records::{self, Column};
use crate::models::MedicalRecordFilter;
use crate::validation::ValidationErrors;

/// Date range applied to `start_date` / `end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// Starts on/after `start` and, if closed, ends on/before `end`.
    Between { start: NaiveDate, end: NaiveDate },
    /// Starts on/after the date.
    From(NaiveDate),
    /// Has an end date on/before the date. Open-ended records never match.
    Until(NaiveDate),
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self::Between { start, end }),
            (Some(start), None) => Some(Self::From(start)),
            (None, Some(end)) => Some(Self::Until(end)),
            (None, None) => None,
        }
    }

    fn contains(&self, record: &medical_records::Model) -> bool {
        match *self {
            Self::Between { start, end } => {
                record.start_date >= start && record.end_date.is_none_or(|e| e <= end)
            }
            Self::From(start) => record.start_date >= start,
            Self::Until(end) => record.end_date.is_some_and(|e| e <= end),
        }
    }

    fn condition(&self) -> Condition {
        match *self {
            Self::Between { start, end } => Condition::all().add(Column::StartDate.gte(start)).add(
                Condition::any()
                    .add(Column::EndDate.is_null())
                    .add(Column::EndDate.lte(end)),
            ),
            Self::From(start) => Condition::all().add(Column::StartDate.gte(start)),
            Self::Until(end) => Condition::all().add(Column::EndDate.lte(end)),
        }
    }
}

/// Predicate plus page window over medical records, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub status_id: Option<i32>,
    pub window: Option<DateWindow>,
    pub record_type_id: Option<i32>,
    /// 1-based. A page of 0 reads as page 1.
    pub page: u64,
    pub page_size: u64,
}

impl RecordQuery {
    /// Rows to skip before the requested page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.page_size
    }

    /// Maximum rows in the page.
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// Whether a record satisfies the predicate (pagination aside).
    pub fn matches(&self, record: &medical_records::Model) -> bool {
        self.status_id.is_none_or(|id| record.status_id == id)
            && self.window.is_none_or(|w| w.contains(record))
            && self.record_type_id.is_none_or(|id| record.medical_record_type_id == id)
    }

    /// The predicate as a SQL condition.
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(status_id) = self.status_id {
            condition = condition.add(Column::StatusId.eq(status_id));
        }
        if let Some(window) = &self.window {
            condition = condition.add(window.condition());
        }
        if let Some(type_id) = self.record_type_id {
            condition = condition.add(Column::MedicalRecordTypeId.eq(type_id));
        }
        condition
    }
}

impl TryFrom<&MedicalRecordFilter> for RecordQuery {
    type Error = ValidationErrors;

    fn try_from(filter: &MedicalRecordFilter) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let page = filter.page.and_then(|p| u64::try_from(p).ok()).filter(|p| *p >= 1);
        let page_size = filter.page_size.and_then(|s| u64::try_from(s).ok()).filter(|s| *s >= 1);
        if page.is_none() {
            errors.push("page", "page must be at least 1");
        }
        if page_size.is_none() {
            errors.push("pageSize", "pageSize must be higher than 0");
        }
        match (page, page_size) {
            (Some(page), Some(page_size)) => Ok(Self {
                status_id: filter.status_id,
                window: DateWindow::new(filter.start_date, filter.end_date),
                record_type_id: filter.medical_record_type_id,
                page,
                page_size,
            }),
            _ => Err(errors),
        }
    }
}
