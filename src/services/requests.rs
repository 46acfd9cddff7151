//! Member services: acquisition requests, help requests and volunteering.

use chrono::Utc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::enums::{AcquisitionStatus, HelpStatus, VolunteerStatus};
use crate::models::request::{
    AcquisitionRequest, CreateAcquisitionRequest, CreateHelpRequest, HelpRequest,
    ResolveHelpRequest, Volunteer, VolunteerProfile,
};
use crate::repository::Repository;

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // -----------------------------------------------------------------------
    // Acquisition requests
    // -----------------------------------------------------------------------

    pub async fn create_acquisition(
        &self,
        member_id: i64,
        data: &CreateAcquisitionRequest,
    ) -> AppResult<AcquisitionRequest> {
        data.validate()?;
        self.repository.members.get_by_id(member_id).await?;
        let today = Utc::now().date_naive();
        self.repository.requests.create_acquisition(member_id, data, today).await
    }

    pub async fn list_acquisitions(
        &self,
        status: Option<AcquisitionStatus>,
    ) -> AppResult<Vec<AcquisitionRequest>> {
        self.repository.requests.list_acquisitions(status).await
    }

    pub async fn acquisitions_for_member(
        &self,
        member_id: i64,
    ) -> AppResult<Vec<AcquisitionRequest>> {
        self.repository.members.get_by_id(member_id).await?;
        self.repository.requests.acquisitions_for_member(member_id).await
    }

    /// Approve or reject a pending request. Pending is not a decision.
    pub async fn process_acquisition(
        &self,
        request_id: i64,
        staff_id: i64,
        status: AcquisitionStatus,
        notes: Option<&str>,
    ) -> AppResult<AcquisitionRequest> {
        if status == AcquisitionStatus::Pending {
            return Err(AppError::Validation(
                "status must be Approved or Rejected".to_string(),
            ));
        }
        self.repository
            .requests
            .process_acquisition(request_id, staff_id, status, notes)
            .await
    }

    // -----------------------------------------------------------------------
    // Help requests
    // -----------------------------------------------------------------------

    pub async fn create_help(
        &self,
        member_id: i64,
        data: &CreateHelpRequest,
    ) -> AppResult<HelpRequest> {
        data.validate()?;
        self.repository.members.get_by_id(member_id).await?;
        let today = Utc::now().date_naive();
        self.repository.requests.create_help(member_id, data, today).await
    }

    pub async fn get_help(&self, request_id: i64) -> AppResult<HelpRequest> {
        self.repository.requests.get_help(request_id).await
    }

    pub async fn list_help(
        &self,
        status: Option<HelpStatus>,
        assigned_to: Option<i64>,
    ) -> AppResult<Vec<HelpRequest>> {
        self.repository.requests.list_help(status, assigned_to).await
    }

    pub async fn help_for_member(&self, member_id: i64) -> AppResult<Vec<HelpRequest>> {
        self.repository.members.get_by_id(member_id).await?;
        self.repository.requests.help_for_member(member_id).await
    }

    pub async fn assign_help(&self, request_id: i64, staff_id: i64) -> AppResult<HelpRequest> {
        self.repository.requests.assign_help(request_id, staff_id).await
    }

    /// Resolve a help request. Resolution text is mandatory.
    pub async fn resolve_help(
        &self,
        request_id: i64,
        staff_id: i64,
        data: &ResolveHelpRequest,
    ) -> AppResult<HelpRequest> {
        data.validate()?;
        let today = Utc::now().date_naive();
        self.repository
            .requests
            .resolve_help(request_id, staff_id, &data.resolution, today)
            .await
    }

    /// Reopen a request or move it back to InProgress. Resolving goes
    /// through `resolve_help`.
    pub async fn set_help_status(
        &self,
        request_id: i64,
        status: HelpStatus,
    ) -> AppResult<HelpRequest> {
        if status == HelpStatus::Resolved {
            return Err(AppError::Validation(
                "use the resolve operation to close a help request".to_string(),
            ));
        }
        self.repository.requests.set_help_status(request_id, status).await
    }

    // -----------------------------------------------------------------------
    // Volunteers
    // -----------------------------------------------------------------------

    pub async fn volunteer_profile(&self, member_id: i64) -> AppResult<Volunteer> {
        self.repository.members.get_by_id(member_id).await?;
        self.repository
            .requests
            .volunteer_for_member(member_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Member {} is not enrolled as a volunteer",
                    member_id
                ))
            })
    }

    pub async fn enroll_volunteer(
        &self,
        member_id: i64,
        profile: &VolunteerProfile,
    ) -> AppResult<Volunteer> {
        self.repository.members.get_by_id(member_id).await?;
        let today = Utc::now().date_naive();
        self.repository.requests.enroll_volunteer(member_id, profile, today).await
    }

    pub async fn set_volunteer_status(
        &self,
        member_id: i64,
        status: VolunteerStatus,
    ) -> AppResult<Volunteer> {
        self.repository.requests.set_volunteer_status(member_id, status).await
    }

    pub async fn list_volunteers(
        &self,
        status: Option<VolunteerStatus>,
    ) -> AppResult<Vec<Volunteer>> {
        self.repository.requests.list_volunteers(status).await
    }
}
