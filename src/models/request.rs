//! Acquisition requests, help requests and volunteer models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{AcquisitionStatus, HelpStatus, VolunteerStatus};

// ---------------------------------------------------------------------------
// Acquisition requests
// ---------------------------------------------------------------------------

/// Acquisition request record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AcquisitionRequest {
    #[sqlx(rename = "RequestID")]
    pub request_id: i64,
    #[sqlx(rename = "Title")]
    pub title: String,
    #[sqlx(rename = "AuthorCreator")]
    pub author_creator: Option<String>,
    #[sqlx(rename = "PublicationType")]
    pub publication_type: String,
    #[sqlx(rename = "RequestDate")]
    pub request_date: NaiveDate,
    #[sqlx(rename = "Status")]
    pub status: AcquisitionStatus,
    #[sqlx(rename = "MemberID")]
    pub member_id: Option<i64>,
    #[sqlx(rename = "StaffID")]
    pub staff_id: Option<i64>,
    #[sqlx(rename = "Notes")]
    pub notes: Option<String>,
}

/// Member request for a new title
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAcquisitionRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub author_creator: Option<String>,
    #[validate(length(min = 1))]
    pub publication_type: String,
    pub notes: Option<String>,
}

/// Staff decision on a pending acquisition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessAcquisitionRequest {
    /// Approved or Rejected; Pending is not a valid decision
    pub status: AcquisitionStatus,
    /// Appended to the existing notes, never overwriting them
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Help requests
// ---------------------------------------------------------------------------

/// Help request record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct HelpRequest {
    #[sqlx(rename = "RequestID")]
    pub request_id: i64,
    #[sqlx(rename = "MemberID")]
    pub member_id: i64,
    #[sqlx(rename = "StaffID")]
    pub staff_id: Option<i64>,
    #[sqlx(rename = "RequestDate")]
    pub request_date: NaiveDate,
    #[sqlx(rename = "Description")]
    pub description: String,
    #[sqlx(rename = "Status")]
    pub status: HelpStatus,
    #[sqlx(rename = "Resolution")]
    pub resolution: Option<String>,
    #[sqlx(rename = "ClosedDate")]
    pub closed_date: Option<NaiveDate>,
}

/// Member assistance ticket
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHelpRequest {
    #[validate(length(min = 1))]
    pub description: String,
}

/// Staff resolution of a help request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResolveHelpRequest {
    #[validate(length(min = 1))]
    pub resolution: String,
}

/// Staff direct status change on a help request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetHelpStatus {
    pub status: HelpStatus,
}

// ---------------------------------------------------------------------------
// Volunteers
// ---------------------------------------------------------------------------

/// Volunteer record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Volunteer {
    #[sqlx(rename = "VolunteerID")]
    pub volunteer_id: i64,
    #[sqlx(rename = "MemberID")]
    pub member_id: i64,
    #[sqlx(rename = "SkillsInterests")]
    pub skills_interests: Option<String>,
    #[sqlx(rename = "AvailabilityHours")]
    pub availability_hours: Option<String>,
    #[sqlx(rename = "StartDate")]
    pub start_date: NaiveDate,
    #[sqlx(rename = "Status")]
    pub status: VolunteerStatus,
}

/// Volunteer enrollment / profile update
#[derive(Debug, Deserialize, ToSchema)]
pub struct VolunteerProfile {
    pub skills_interests: Option<String>,
    pub availability_hours: Option<String>,
}

/// Volunteer status toggle
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetVolunteerStatus {
    pub status: VolunteerStatus,
}
