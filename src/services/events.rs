//! Event operations: listings, creation and registration.

use chrono::{NaiveTime, Utc};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::enums::{AttendanceStatus, RoomStatus};
use crate::models::event::{
    AttendeeEntry, CreateEvent, Event, EventAttendance, EventDetails, EventQuery, Room,
};
use crate::repository::Repository;

const MAX_SEARCH_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct EventsService {
    repository: Repository,
}

impl EventsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn search(&self, query: &EventQuery) -> AppResult<Vec<EventDetails>> {
        if let Some(limit) = query.limit {
            if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
                return Err(AppError::Validation(format!(
                    "limit must be between 1 and {}",
                    MAX_SEARCH_LIMIT
                )));
            }
        }
        let today = Utc::now().date_naive();
        self.repository.events.search(query, today).await
    }

    pub async fn get_event(&self, event_id: i64) -> AppResult<EventDetails> {
        self.repository.events.get_details(event_id).await
    }

    /// Create an event. Times must be well-formed HH:MM with the end after
    /// the start, the date must not be in the past, and the room (when
    /// given) must exist and be available.
    pub async fn create(&self, data: &CreateEvent, staff_id: i64) -> AppResult<Event> {
        data.validate()?;

        let start = parse_time(&data.start_time)?;
        let end = parse_time(&data.end_time)?;
        if end <= start {
            return Err(AppError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }

        let today = Utc::now().date_naive();
        if data.event_date < today {
            return Err(AppError::Validation(
                "event_date must not be in the past".to_string(),
            ));
        }

        if let Some(room_id) = data.room_id {
            let room = self.repository.events.get_room(room_id).await?;
            if room.availability_status != Some(RoomStatus::Available) {
                return Err(AppError::BusinessRule(format!(
                    "Room {} is not available",
                    room_id
                )));
            }
        }

        self.repository.events.create(data, staff_id).await
    }

    pub async fn register(&self, event_id: i64, member_id: i64) -> AppResult<EventAttendance> {
        let today = Utc::now().date_naive();
        self.repository.events.register(event_id, member_id, today).await
    }

    pub async fn cancel_registration(
        &self,
        event_id: i64,
        member_id: i64,
    ) -> AppResult<EventAttendance> {
        self.repository.events.cancel_registration(event_id, member_id).await
    }

    pub async fn set_attendance_status(
        &self,
        attendance_id: i64,
        status: AttendanceStatus,
    ) -> AppResult<EventAttendance> {
        self.repository.events.set_attendance_status(attendance_id, status).await
    }

    pub async fn attendees(&self, event_id: i64) -> AppResult<Vec<AttendeeEntry>> {
        self.repository.events.get_by_id(event_id).await?;
        self.repository.events.attendees(event_id).await
    }

    pub async fn upcoming_for_member(&self, member_id: i64) -> AppResult<Vec<EventDetails>> {
        self.repository.members.get_by_id(member_id).await?;
        let today = Utc::now().date_naive();
        self.repository.events.upcoming_for_member(member_id, today).await
    }

    pub async fn available_rooms(&self) -> AppResult<Vec<Room>> {
        self.repository.events.available_rooms().await
    }
}

fn parse_time(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("invalid time '{}', expected HH:MM", value)))
}
