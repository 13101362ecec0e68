//! Approval lifecycle for user-generated content and the review lifecycle for
//! user reports.
//!
//! Content: `Pending -> Approved` or `Pending -> Removed`; both targets are
//! terminal. Reports: `Pending -> {Reviewed, Resolved, Dismissed}`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{ModeratedContent, Report, ReportStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModerationError {
    #[error("{0} is already approved")]
    AlreadyApproved(&'static str),
    #[error("{0} has been removed")]
    AlreadyRemoved(&'static str),
    #[error("report status cannot be set back to pending")]
    ReportBackToPending,
}

impl From<ModerationError> for AppError {
    fn from(err: ModerationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// The moderated tables. Each stores `user_id`, a target foreign key,
/// `content`, `is_approved` and a soft-delete marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ContentKind {
    #[serde(rename = "reviews")]
    Review,
    #[serde(rename = "review-comments")]
    ReviewComment,
    #[serde(rename = "job-comments")]
    JobComment,
}

impl ContentKind {
    pub fn table(&self) -> &'static str {
        match self {
            ContentKind::Review => "company_reviews",
            ContentKind::ReviewComment => "review_comments",
            ContentKind::JobComment => "job_comments",
        }
    }

    pub fn target_column(&self) -> &'static str {
        match self {
            ContentKind::Review => "company_id",
            ContentKind::ReviewComment => "review_id",
            ContentKind::JobComment => "job_post_id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Review => "Review",
            ContentKind::ReviewComment | ContentKind::JobComment => "Comment",
        }
    }

    pub fn resource_type(&self) -> &'static str {
        match self {
            ContentKind::Review => "review",
            ContentKind::ReviewComment => "review_comment",
            ContentKind::JobComment => "job_comment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentState {
    Pending,
    Approved,
    Removed,
}

impl ContentState {
    /// State of a row that is still live (not soft-deleted).
    pub fn of(content: &ModeratedContent) -> Self {
        if content.is_approved {
            ContentState::Approved
        } else {
            ContentState::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentAction {
    Approve,
    Remove,
}

/// Next state for `action`, or `None` when the action is a no-op.
pub fn transition(
    kind: ContentKind,
    from: ContentState,
    action: ContentAction,
) -> Result<Option<ContentState>, ModerationError> {
    match (from, action) {
        (ContentState::Pending, ContentAction::Approve) => Ok(Some(ContentState::Approved)),
        (ContentState::Pending, ContentAction::Remove) => Ok(Some(ContentState::Removed)),
        (ContentState::Approved, ContentAction::Approve) => Ok(None),
        (ContentState::Approved, ContentAction::Remove) => {
            Err(ModerationError::AlreadyApproved(kind.label()))
        }
        (ContentState::Removed, _) => Err(ModerationError::AlreadyRemoved(kind.label())),
    }
}

/// Apply an admin's status decision to a loaded report.
///
/// Stamps the reviewer and time on every call, including repeat calls on a
/// report that has already left `Pending`; those overwrite the earlier stamp.
// TODO: reject repeat transitions once report history is stored separately.
pub fn review_report(
    report: &Report,
    status: ReportStatus,
    admin_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Report, ModerationError> {
    if status == ReportStatus::Pending {
        return Err(ModerationError::ReportBackToPending);
    }

    Ok(Report {
        status,
        reviewed_by: Some(admin_id),
        reviewed_at: Some(now),
        updated_at: now,
        ..report.clone()
    })
}
