//! OpenAPI documentation

use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::{auth, borrowings, events, health, items, members, requests};
use crate::models::{
    borrowing::{
        Borrowing, BorrowingDetails, CreateBorrowing, Fine, FineDetails, FineLedger,
        FineLedgerEntry,
    },
    enums::{
        AcquisitionStatus, AttendanceStatus, BookFormat, EventType, FineStatus, HelpStatus,
        ItemStatus, ItemType, MediaKind, RoomStatus, VolunteerStatus,
    },
    event::{
        AttendeeEntry, CreateEvent, Event, EventAttendance, EventDetails, Room,
        SetAttendanceStatus,
    },
    item::{DonateItem, ItemDetails, ItemSummary, LibraryItem},
    member::{CreateMember, Member},
    request::{
        AcquisitionRequest, CreateAcquisitionRequest, CreateHelpRequest, HelpRequest,
        ProcessAcquisitionRequest, ResolveHelpRequest, SetHelpStatus, SetVolunteerStatus,
        Volunteer, VolunteerProfile,
    },
    session::{LoginRequest, LoginResponse, Role},
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblos API",
        version = "1.0.0",
        description = "Community library circulation REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&BearerAuth),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::me,
        // Members
        members::create_member,
        members::get_member,
        members::get_open_borrowings,
        members::get_borrowing_history,
        members::get_unpaid_fines,
        members::get_upcoming_events,
        members::get_acquisition_requests,
        members::get_help_requests,
        // Items
        items::search_items,
        items::get_item,
        items::donate_item,
        // Borrowings
        borrowings::create_borrowing,
        borrowings::return_borrowing,
        borrowings::list_fines,
        borrowings::pay_fine,
        // Events
        events::search_events,
        events::get_event,
        events::create_event,
        events::register_for_event,
        events::cancel_registration,
        events::get_attendees,
        events::set_attendance_status,
        events::get_available_rooms,
        // Requests
        requests::create_acquisition_request,
        requests::list_acquisition_requests,
        requests::process_acquisition_request,
        requests::create_help_request,
        requests::list_help_requests,
        requests::assign_help_request,
        requests::resolve_help_request,
        requests::set_help_request_status,
        requests::enroll_volunteer,
        requests::get_volunteer_profile,
        requests::set_volunteer_status,
        requests::list_volunteers,
    ),
    components(
        schemas(
            health::HealthResponse,
            auth::SessionInfo,
            LoginRequest,
            LoginResponse,
            Role,
            Member,
            CreateMember,
            LibraryItem,
            ItemSummary,
            ItemDetails,
            DonateItem,
            Borrowing,
            BorrowingDetails,
            CreateBorrowing,
            borrowings::ReturnResponse,
            Fine,
            FineDetails,
            FineLedger,
            FineLedgerEntry,
            Event,
            EventDetails,
            CreateEvent,
            EventAttendance,
            AttendeeEntry,
            SetAttendanceStatus,
            events::RegistrationRequest,
            Room,
            AcquisitionRequest,
            CreateAcquisitionRequest,
            ProcessAcquisitionRequest,
            HelpRequest,
            CreateHelpRequest,
            ResolveHelpRequest,
            SetHelpStatus,
            Volunteer,
            VolunteerProfile,
            SetVolunteerStatus,
            ItemStatus,
            ItemType,
            BookFormat,
            MediaKind,
            FineStatus,
            EventType,
            AttendanceStatus,
            RoomStatus,
            AcquisitionStatus,
            HelpStatus,
            VolunteerStatus,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Authentication"),
        (name = "members", description = "Member accounts"),
        (name = "items", description = "Catalog"),
        (name = "borrowings", description = "Circulation"),
        (name = "events", description = "Events and rooms"),
        (name = "requests", description = "Member services")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as plain JSON
pub fn create_openapi_router() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
