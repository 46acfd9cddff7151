//! Events repository: event listings, registration and rosters.
//!
//! Capacity is rechecked by triggers on insert and on reactivation, so the
//! reads here are a fast path, not the authority.

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::enums::AttendanceStatus;
use crate::models::event::{
    AttendeeEntry, CreateEvent, Event, EventAttendance, EventDetails, EventQuery, Room,
};

const DEFAULT_SEARCH_LIMIT: i64 = 50;

const EVENT_DETAILS_SELECT: &str = "
    SELECT e.EventID AS event_id,
           e.Title AS title,
           e.Description AS description,
           e.EventDate AS event_date,
           e.StartTime AS start_time,
           e.EndTime AS end_time,
           e.MaxAttendees AS max_attendees,
           e.EventType AS event_type,
           e.TargetAudience AS target_audience,
           r.RoomName AS room_name,
           (SELECT COUNT(*) FROM EventAttendance a
             WHERE a.EventID = e.EventID AND a.AttendanceStatus != 'Cancelled') AS registered_count
    FROM Event e
    LEFT JOIN Room r ON e.RoomID = r.RoomID";

#[derive(Clone)]
pub struct EventsRepository {
    pool: Pool<Sqlite>,
}

impl EventsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Search events. Past events are excluded unless the query opts in or
    /// sets an explicit date range.
    pub async fn search(&self, query: &EventQuery, today: NaiveDate) -> AppResult<Vec<EventDetails>> {
        let mut conditions: Vec<&str> = Vec::new();

        if query.title.is_some() {
            conditions.push("e.Title LIKE ?");
        }
        if query.event_type.is_some() {
            conditions.push("e.EventType = ?");
        }
        if query.from_date.is_some() {
            conditions.push("e.EventDate >= ?");
        }
        if query.to_date.is_some() {
            conditions.push("e.EventDate <= ?");
        }
        let hide_past =
            !query.include_past.unwrap_or(false) && query.from_date.is_none() && query.to_date.is_none();
        if hide_past {
            conditions.push("e.EventDate >= ?");
        }

        let mut sql = EVENT_DETAILS_SELECT.to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY e.EventDate ASC, e.StartTime ASC LIMIT ?");

        let mut q = sqlx::query_as::<_, EventDetails>(&sql);
        if let Some(title) = &query.title {
            q = q.bind(format!("%{}%", title));
        }
        if let Some(event_type) = query.event_type {
            q = q.bind(event_type);
        }
        if let Some(from_date) = query.from_date {
            q = q.bind(from_date);
        }
        if let Some(to_date) = query.to_date {
            q = q.bind(to_date);
        }
        if hide_past {
            q = q.bind(today);
        }
        q = q.bind(query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT));

        let events = q.fetch_all(&self.pool).await?;
        Ok(events)
    }

    pub async fn get_by_id(&self, event_id: i64) -> AppResult<Event> {
        sqlx::query_as::<_, Event>("SELECT * FROM Event WHERE EventID = ?")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))
    }

    pub async fn get_details(&self, event_id: i64) -> AppResult<EventDetails> {
        let sql = format!("{} WHERE e.EventID = ?", EVENT_DETAILS_SELECT);
        sqlx::query_as::<_, EventDetails>(&sql)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))
    }

    pub async fn create(&self, data: &CreateEvent, staff_id: i64) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            "INSERT INTO Event (Title, Description, EventDate, StartTime, EndTime,
                                MaxAttendees, EventType, TargetAudience, StaffID, RoomID)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.event_date)
        .bind(&data.start_time)
        .bind(&data.end_time)
        .bind(data.max_attendees)
        .bind(data.event_type)
        .bind(&data.target_audience)
        .bind(staff_id)
        .bind(data.room_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    pub async fn get_room(&self, room_id: i64) -> AppResult<Room> {
        sqlx::query_as::<_, Room>("SELECT * FROM Room WHERE RoomID = ?")
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))
    }

    pub async fn available_rooms(&self) -> AppResult<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM Room WHERE AvailabilityStatus = 'Available' ORDER BY RoomName ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rooms)
    }

    /// Register a member for an event. A cancelled registration is
    /// reactivated in place so the uniqueness of (event, member) holds.
    pub async fn register(
        &self,
        event_id: i64,
        member_id: i64,
        today: NaiveDate,
    ) -> AppResult<EventAttendance> {
        let mut tx = self.pool.begin().await?;

        let event: Option<(NaiveDate, i64)> =
            sqlx::query_as("SELECT EventDate, MaxAttendees FROM Event WHERE EventID = ?")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (event_date, max_attendees) =
            event.ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;
        if event_date < today {
            return Err(AppError::BusinessRule(format!(
                "Event {} has already taken place",
                event_id
            )));
        }

        let member_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM Member WHERE MemberID = ?)")
                .bind(member_id)
                .fetch_one(&mut *tx)
                .await?;
        if !member_exists {
            return Err(AppError::NotFound(format!("Member {} not found", member_id)));
        }

        let registered: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM EventAttendance
             WHERE EventID = ? AND AttendanceStatus != 'Cancelled'",
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;
        if registered >= max_attendees {
            return Err(AppError::BusinessRule(format!(
                "Event {} has reached its maximum capacity of {}",
                event_id, max_attendees
            )));
        }

        let existing: Option<EventAttendance> = sqlx::query_as(
            "SELECT * FROM EventAttendance WHERE EventID = ? AND MemberID = ?",
        )
        .bind(event_id)
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?;

        let attendance = match existing {
            Some(a) if a.attendance_status != AttendanceStatus::Cancelled => {
                return Err(AppError::Conflict(format!(
                    "Member {} is already registered for event {}",
                    member_id, event_id
                )));
            }
            Some(a) => {
                sqlx::query_as::<_, EventAttendance>(
                    "UPDATE EventAttendance
                     SET AttendanceStatus = 'Registered', RegistrationDate = ?
                     WHERE AttendanceID = ?
                     RETURNING *",
                )
                .bind(today)
                .bind(a.attendance_id)
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as::<_, EventAttendance>(
                    "INSERT INTO EventAttendance (EventID, MemberID, RegistrationDate, AttendanceStatus)
                     VALUES (?, ?, ?, 'Registered')
                     RETURNING *",
                )
                .bind(event_id)
                .bind(member_id)
                .bind(today)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        Ok(attendance)
    }

    /// Cancel a member's registration. The row is kept with a Cancelled
    /// status so the capacity count frees a slot.
    pub async fn cancel_registration(
        &self,
        event_id: i64,
        member_id: i64,
    ) -> AppResult<EventAttendance> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<EventAttendance> = sqlx::query_as(
            "SELECT * FROM EventAttendance WHERE EventID = ? AND MemberID = ?",
        )
        .bind(event_id)
        .bind(member_id)
        .fetch_optional(&mut *tx)
        .await?;
        let existing = existing.ok_or_else(|| {
            AppError::NotFound(format!(
                "Member {} has no registration for event {}",
                member_id, event_id
            ))
        })?;
        if existing.attendance_status == AttendanceStatus::Cancelled {
            return Err(AppError::BusinessRule(format!(
                "Registration for event {} is already cancelled",
                event_id
            )));
        }

        let cancelled: EventAttendance = sqlx::query_as(
            "UPDATE EventAttendance SET AttendanceStatus = 'Cancelled'
             WHERE AttendanceID = ?
             RETURNING *",
        )
        .bind(existing.attendance_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(cancelled)
    }

    /// Set an attendance status directly. Reactivating a cancelled row is
    /// capacity checked like a fresh registration.
    pub async fn set_attendance_status(
        &self,
        attendance_id: i64,
        status: AttendanceStatus,
    ) -> AppResult<EventAttendance> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<EventAttendance> =
            sqlx::query_as("SELECT * FROM EventAttendance WHERE AttendanceID = ?")
                .bind(attendance_id)
                .fetch_optional(&mut *tx)
                .await?;
        let existing = existing.ok_or_else(|| {
            AppError::NotFound(format!("Attendance record {} not found", attendance_id))
        })?;

        if existing.attendance_status == AttendanceStatus::Cancelled
            && status != AttendanceStatus::Cancelled
        {
            let (registered, max_attendees): (i64, i64) = sqlx::query_as(
                "SELECT (SELECT COUNT(*) FROM EventAttendance
                          WHERE EventID = e.EventID AND AttendanceStatus != 'Cancelled'),
                        e.MaxAttendees
                 FROM Event e WHERE e.EventID = ?",
            )
            .bind(existing.event_id)
            .fetch_one(&mut *tx)
            .await?;
            if registered >= max_attendees {
                return Err(AppError::BusinessRule(format!(
                    "Event {} has reached its maximum capacity of {}",
                    existing.event_id, max_attendees
                )));
            }
        }

        let updated: EventAttendance = sqlx::query_as(
            "UPDATE EventAttendance SET AttendanceStatus = ? WHERE AttendanceID = ? RETURNING *",
        )
        .bind(status)
        .bind(attendance_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Roster of an event, registration order.
    pub async fn attendees(&self, event_id: i64) -> AppResult<Vec<AttendeeEntry>> {
        let rows = sqlx::query_as::<_, AttendeeEntry>(
            "SELECT a.AttendanceID AS attendance_id,
                    a.MemberID AS member_id,
                    m.FirstName || ' ' || m.LastName AS member_name,
                    a.RegistrationDate AS registration_date,
                    a.AttendanceStatus AS attendance_status
             FROM EventAttendance a
             JOIN Member m ON a.MemberID = m.MemberID
             WHERE a.EventID = ?
             ORDER BY a.RegistrationDate ASC, a.AttendanceID ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Upcoming events a member holds an active registration for.
    pub async fn upcoming_for_member(
        &self,
        member_id: i64,
        today: NaiveDate,
    ) -> AppResult<Vec<EventDetails>> {
        let sql = format!(
            "{} JOIN EventAttendance my ON my.EventID = e.EventID
             WHERE my.MemberID = ? AND my.AttendanceStatus != 'Cancelled' AND e.EventDate >= ?
             ORDER BY e.EventDate ASC, e.StartTime ASC",
            EVENT_DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, EventDetails>(&sql)
            .bind(member_id)
            .bind(today)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
