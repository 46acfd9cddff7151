//! Shared domain enums
//!
//! Every variant name matches the value domain of the corresponding CHECK
//! constraint in the schema exactly, so these types bind and decode as TEXT
//! without any mapping layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Library items
// ---------------------------------------------------------------------------

/// Circulation status of a library item. Mutated only by the borrowing
/// triggers, never written directly by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum ItemStatus {
    Available,
    Borrowed,
    Reserved,
    Maintenance,
}

/// Subtype discriminator of a library item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum ItemType {
    Book,
    Ebook,
    Magazine,
    Journal,
    Media,
}

/// Physical format of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum BookFormat {
    Hardcover,
    Paperback,
    Other,
}

/// Carrier of a media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum MediaKind {
    CD,
    DVD,
    Record,
    Other,
}

// ---------------------------------------------------------------------------
// Circulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum FineStatus {
    Paid,
    Unpaid,
}

// ---------------------------------------------------------------------------
// Events & rooms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum EventType {
    BookClub,
    ArtShow,
    Screening,
    Workshop,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum AttendanceStatus {
    Registered,
    Attended,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum RoomStatus {
    Available,
    Booked,
    Maintenance,
}

// ---------------------------------------------------------------------------
// Member services
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum AcquisitionStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum HelpStatus {
    Open,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum VolunteerStatus {
    Active,
    Inactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_json_values_match_check_constraints() {
        assert_eq!(serde_json::to_string(&ItemStatus::Available).unwrap(), "\"Available\"");
        assert_eq!(serde_json::to_string(&ItemType::Ebook).unwrap(), "\"Ebook\"");
        assert_eq!(serde_json::to_string(&EventType::BookClub).unwrap(), "\"BookClub\"");
        assert_eq!(serde_json::to_string(&HelpStatus::InProgress).unwrap(), "\"InProgress\"");
        assert_eq!(serde_json::to_string(&MediaKind::CD).unwrap(), "\"CD\"");
    }
}
