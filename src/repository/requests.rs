//! Member services repository: acquisition requests, help requests and
//! volunteer records.

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::enums::{AcquisitionStatus, HelpStatus, VolunteerStatus};
use crate::models::request::{
    AcquisitionRequest, CreateAcquisitionRequest, CreateHelpRequest, HelpRequest, Volunteer,
    VolunteerProfile,
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Sqlite>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    // -----------------------------------------------------------------------
    // Acquisition requests
    // -----------------------------------------------------------------------

    pub async fn create_acquisition(
        &self,
        member_id: i64,
        data: &CreateAcquisitionRequest,
        today: NaiveDate,
    ) -> AppResult<AcquisitionRequest> {
        let request = sqlx::query_as::<_, AcquisitionRequest>(
            "INSERT INTO AcquisitionRequest (Title, AuthorCreator, PublicationType, RequestDate, Status, MemberID, Notes)
             VALUES (?, ?, ?, ?, 'Pending', ?, ?)
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.author_creator)
        .bind(&data.publication_type)
        .bind(today)
        .bind(member_id)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    pub async fn get_acquisition(&self, request_id: i64) -> AppResult<AcquisitionRequest> {
        sqlx::query_as::<_, AcquisitionRequest>(
            "SELECT * FROM AcquisitionRequest WHERE RequestID = ?",
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Acquisition request {} not found", request_id)))
    }

    pub async fn list_acquisitions(
        &self,
        status: Option<AcquisitionStatus>,
    ) -> AppResult<Vec<AcquisitionRequest>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, AcquisitionRequest>(
                    "SELECT * FROM AcquisitionRequest WHERE Status = ?
                     ORDER BY RequestDate ASC, RequestID ASC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AcquisitionRequest>(
                    "SELECT * FROM AcquisitionRequest ORDER BY RequestDate ASC, RequestID ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn acquisitions_for_member(
        &self,
        member_id: i64,
    ) -> AppResult<Vec<AcquisitionRequest>> {
        let rows = sqlx::query_as::<_, AcquisitionRequest>(
            "SELECT * FROM AcquisitionRequest WHERE MemberID = ?
             ORDER BY RequestDate DESC, RequestID DESC",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Approve or reject a pending request. New notes are appended to the
    /// existing ones, never overwriting them.
    pub async fn process_acquisition(
        &self,
        request_id: i64,
        staff_id: i64,
        status: AcquisitionStatus,
        notes: Option<&str>,
    ) -> AppResult<AcquisitionRequest> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<AcquisitionRequest> =
            sqlx::query_as("SELECT * FROM AcquisitionRequest WHERE RequestID = ?")
                .bind(request_id)
                .fetch_optional(&mut *tx)
                .await?;
        let existing = existing.ok_or_else(|| {
            AppError::NotFound(format!("Acquisition request {} not found", request_id))
        })?;
        if existing.status != AcquisitionStatus::Pending {
            return Err(AppError::BusinessRule(format!(
                "Acquisition request {} has already been processed",
                request_id
            )));
        }

        let combined_notes = match (existing.notes.as_deref(), notes) {
            (Some(old), Some(new)) => Some(format!("{}\n{}", old, new)),
            (None, Some(new)) => Some(new.to_string()),
            (old, None) => old.map(str::to_string),
        };

        let updated: AcquisitionRequest = sqlx::query_as(
            "UPDATE AcquisitionRequest SET Status = ?, StaffID = ?, Notes = ?
             WHERE RequestID = ?
             RETURNING *",
        )
        .bind(status)
        .bind(staff_id)
        .bind(combined_notes)
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Help requests
    // -----------------------------------------------------------------------

    pub async fn create_help(
        &self,
        member_id: i64,
        data: &CreateHelpRequest,
        today: NaiveDate,
    ) -> AppResult<HelpRequest> {
        let request = sqlx::query_as::<_, HelpRequest>(
            "INSERT INTO HelpRequest (MemberID, RequestDate, Description, Status)
             VALUES (?, ?, ?, 'Open')
             RETURNING *",
        )
        .bind(member_id)
        .bind(today)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(request)
    }

    pub async fn get_help(&self, request_id: i64) -> AppResult<HelpRequest> {
        sqlx::query_as::<_, HelpRequest>("SELECT * FROM HelpRequest WHERE RequestID = ?")
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Help request {} not found", request_id)))
    }

    pub async fn list_help(
        &self,
        status: Option<HelpStatus>,
        assigned_to: Option<i64>,
    ) -> AppResult<Vec<HelpRequest>> {
        let mut conditions: Vec<&str> = Vec::new();
        if status.is_some() {
            conditions.push("Status = ?");
        }
        if assigned_to.is_some() {
            conditions.push("StaffID = ?");
        }

        let mut sql = "SELECT * FROM HelpRequest".to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY RequestDate ASC, RequestID ASC");

        let mut q = sqlx::query_as::<_, HelpRequest>(&sql);
        if let Some(status) = status {
            q = q.bind(status);
        }
        if let Some(staff_id) = assigned_to {
            q = q.bind(staff_id);
        }

        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Unresolved help requests for a member, newest first.
    pub async fn help_for_member(&self, member_id: i64) -> AppResult<Vec<HelpRequest>> {
        let rows = sqlx::query_as::<_, HelpRequest>(
            "SELECT * FROM HelpRequest WHERE MemberID = ? AND Status != 'Resolved'
             ORDER BY RequestDate DESC, RequestID DESC",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Assign a staff member to an open request, moving it to InProgress.
    pub async fn assign_help(&self, request_id: i64, staff_id: i64) -> AppResult<HelpRequest> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<HelpRequest> =
            sqlx::query_as("SELECT * FROM HelpRequest WHERE RequestID = ?")
                .bind(request_id)
                .fetch_optional(&mut *tx)
                .await?;
        let existing = existing
            .ok_or_else(|| AppError::NotFound(format!("Help request {} not found", request_id)))?;
        if existing.status == HelpStatus::Resolved {
            return Err(AppError::BusinessRule(format!(
                "Help request {} has already been resolved",
                request_id
            )));
        }

        let updated: HelpRequest = sqlx::query_as(
            "UPDATE HelpRequest SET StaffID = ?, Status = 'InProgress'
             WHERE RequestID = ?
             RETURNING *",
        )
        .bind(staff_id)
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Resolve a request. Resolution text is mandatory at the service layer.
    pub async fn resolve_help(
        &self,
        request_id: i64,
        staff_id: i64,
        resolution: &str,
        today: NaiveDate,
    ) -> AppResult<HelpRequest> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<HelpRequest> =
            sqlx::query_as("SELECT * FROM HelpRequest WHERE RequestID = ?")
                .bind(request_id)
                .fetch_optional(&mut *tx)
                .await?;
        let existing = existing
            .ok_or_else(|| AppError::NotFound(format!("Help request {} not found", request_id)))?;
        if existing.status == HelpStatus::Resolved {
            return Err(AppError::BusinessRule(format!(
                "Help request {} has already been resolved",
                request_id
            )));
        }

        let updated: HelpRequest = sqlx::query_as(
            "UPDATE HelpRequest
             SET Status = 'Resolved', Resolution = ?, ClosedDate = ?, StaffID = ?
             WHERE RequestID = ?
             RETURNING *",
        )
        .bind(resolution)
        .bind(today)
        .bind(staff_id)
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Move a request back to Open or InProgress. Resolving goes through
    /// `resolve_help` so a resolution is always recorded.
    pub async fn set_help_status(
        &self,
        request_id: i64,
        status: HelpStatus,
    ) -> AppResult<HelpRequest> {
        let mut tx = self.pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM HelpRequest WHERE RequestID = ?)")
                .bind(request_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Help request {} not found",
                request_id
            )));
        }

        let updated: HelpRequest = sqlx::query_as(
            "UPDATE HelpRequest SET Status = ?, Resolution = NULL, ClosedDate = NULL
             WHERE RequestID = ?
             RETURNING *",
        )
        .bind(status)
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Volunteers
    // -----------------------------------------------------------------------

    pub async fn volunteer_for_member(&self, member_id: i64) -> AppResult<Option<Volunteer>> {
        let volunteer =
            sqlx::query_as::<_, Volunteer>("SELECT * FROM Volunteer WHERE MemberID = ?")
                .bind(member_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(volunteer)
    }

    /// Enroll a member as a volunteer, or refresh the profile of an existing
    /// enrollment. The profile is editable in either status; Active/Inactive
    /// is only changed through the explicit status toggle.
    pub async fn enroll_volunteer(
        &self,
        member_id: i64,
        profile: &VolunteerProfile,
        today: NaiveDate,
    ) -> AppResult<Volunteer> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<Volunteer> =
            sqlx::query_as("SELECT * FROM Volunteer WHERE MemberID = ?")
                .bind(member_id)
                .fetch_optional(&mut *tx)
                .await?;

        let volunteer = match existing {
            Some(v) => {
                sqlx::query_as::<_, Volunteer>(
                    "UPDATE Volunteer
                     SET SkillsInterests = ?, AvailabilityHours = ?
                     WHERE VolunteerID = ?
                     RETURNING *",
                )
                .bind(&profile.skills_interests)
                .bind(&profile.availability_hours)
                .bind(v.volunteer_id)
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as::<_, Volunteer>(
                    "INSERT INTO Volunteer (MemberID, SkillsInterests, AvailabilityHours, StartDate, Status)
                     VALUES (?, ?, ?, ?, 'Active')
                     RETURNING *",
                )
                .bind(member_id)
                .bind(&profile.skills_interests)
                .bind(&profile.availability_hours)
                .bind(today)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        Ok(volunteer)
    }

    pub async fn set_volunteer_status(
        &self,
        member_id: i64,
        status: VolunteerStatus,
    ) -> AppResult<Volunteer> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<Volunteer> =
            sqlx::query_as("SELECT * FROM Volunteer WHERE MemberID = ?")
                .bind(member_id)
                .fetch_optional(&mut *tx)
                .await?;
        let existing = existing.ok_or_else(|| {
            AppError::NotFound(format!("Member {} is not enrolled as a volunteer", member_id))
        })?;

        let updated: Volunteer = sqlx::query_as(
            "UPDATE Volunteer SET Status = ? WHERE VolunteerID = ? RETURNING *",
        )
        .bind(status)
        .bind(existing.volunteer_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn list_volunteers(&self, status: Option<VolunteerStatus>) -> AppResult<Vec<Volunteer>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, Volunteer>(
                    "SELECT * FROM Volunteer WHERE Status = ? ORDER BY StartDate ASC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Volunteer>("SELECT * FROM Volunteer ORDER BY StartDate ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }
}
