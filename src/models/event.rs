//! Event, room and attendance models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{AttendanceStatus, EventType, RoomStatus};

/// Event record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Event {
    #[sqlx(rename = "EventID")]
    pub event_id: i64,
    #[sqlx(rename = "Title")]
    pub title: String,
    #[sqlx(rename = "Description")]
    pub description: Option<String>,
    #[sqlx(rename = "EventDate")]
    pub event_date: NaiveDate,
    /// HH:MM, lexicographically ordered by the EndTime > StartTime check
    #[sqlx(rename = "StartTime")]
    pub start_time: String,
    #[sqlx(rename = "EndTime")]
    pub end_time: String,
    #[sqlx(rename = "MaxAttendees")]
    pub max_attendees: i64,
    #[sqlx(rename = "EventType")]
    pub event_type: Option<EventType>,
    #[sqlx(rename = "TargetAudience")]
    pub target_audience: Option<String>,
    #[sqlx(rename = "StaffID")]
    pub staff_id: Option<i64>,
    #[sqlx(rename = "RoomID")]
    pub room_id: Option<i64>,
}

/// Event with live registration count and room name, for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EventDetails {
    pub event_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub max_attendees: i64,
    pub event_type: Option<EventType>,
    pub target_audience: Option<String>,
    pub room_name: Option<String>,
    /// Count of non-Cancelled registrations
    pub registered_count: i64,
}

/// Create event request (staff only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    /// HH:MM
    pub start_time: String,
    /// HH:MM, must be after start_time
    pub end_time: String,
    #[validate(range(min = 1))]
    pub max_attendees: i64,
    pub event_type: EventType,
    pub target_audience: Option<String>,
    pub room_id: Option<i64>,
}

/// Query parameters for event search
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EventQuery {
    /// Case-insensitive title substring
    pub title: Option<String>,
    /// Exact event type
    pub event_type: Option<EventType>,
    /// Inclusive lower bound on the event date
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper bound on the event date
    pub to_date: Option<NaiveDate>,
    /// Include events that already happened (default false)
    pub include_past: Option<bool>,
    /// Row cap (default 50)
    pub limit: Option<i64>,
}

/// Attendance record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EventAttendance {
    #[sqlx(rename = "AttendanceID")]
    pub attendance_id: i64,
    #[sqlx(rename = "EventID")]
    pub event_id: i64,
    #[sqlx(rename = "MemberID")]
    pub member_id: i64,
    #[sqlx(rename = "RegistrationDate")]
    pub registration_date: NaiveDate,
    #[sqlx(rename = "AttendanceStatus")]
    pub attendance_status: AttendanceStatus,
}

/// Attendance joined with the member, for staff rosters
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendeeEntry {
    pub attendance_id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub registration_date: NaiveDate,
    pub attendance_status: AttendanceStatus,
}

/// Staff request to set an attendance status directly
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAttendanceStatus {
    pub status: AttendanceStatus,
}

/// Room record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Room {
    #[sqlx(rename = "RoomID")]
    pub room_id: i64,
    #[sqlx(rename = "RoomName")]
    pub room_name: String,
    #[sqlx(rename = "Capacity")]
    pub capacity: i64,
    #[sqlx(rename = "Location")]
    pub location: String,
    #[sqlx(rename = "Facilities")]
    pub facilities: Option<String>,
    #[sqlx(rename = "AvailabilityStatus")]
    pub availability_status: Option<RoomStatus>,
}
