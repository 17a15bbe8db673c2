//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, mentor_handler, notification_handler, request_handler,
};
use crate::domain::{
    AccountType, ApplicationStatus, ApplicationView, MenteeProfile, MentorApplication,
    MentorListing, MentorProfile, MentorProfileSummary, MentorRequest, MentorWithProfile,
    Notification, NotificationKind, RequestStatus, RequestView, Role, SentRequestView, Tags,
    UserResponse, UserSummary,
};
use crate::services::{AuthResponse, UserProfileResponse};
use crate::types::{ApplicationDecisionResponse, MessageResponse, RequestDecisionResponse};

/// OpenAPI documentation for the Diaspora Bridge API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Diaspora Bridge API",
        version = "0.1.0",
        description = "Mentor matching between diaspora professionals and mentees",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        auth_handler::claim_admin,
        // Admin endpoints
        admin_handler::list_applications,
        admin_handler::approve_application,
        admin_handler::reject_application,
        // Mentor directory
        mentor_handler::list_mentors,
        // Mentorship requests
        request_handler::create_request,
        request_handler::list_requests,
        request_handler::accept_request,
        request_handler::reject_request,
        request_handler::list_sent_requests,
        // Notifications
        notification_handler::list_notifications,
        notification_handler::unread_count,
        notification_handler::mark_read,
        notification_handler::mark_all_read,
    ),
    components(
        schemas(
            // Domain types
            Role,
            AccountType,
            Tags,
            ApplicationStatus,
            RequestStatus,
            NotificationKind,
            UserResponse,
            UserSummary,
            MentorProfile,
            MenteeProfile,
            MentorProfileSummary,
            MentorListing,
            MentorApplication,
            ApplicationView,
            MentorRequest,
            MentorWithProfile,
            RequestView,
            SentRequestView,
            Notification,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::ClaimAdminRequest,
            AuthResponse,
            UserProfileResponse,
            // Handler types
            request_handler::CreateRequestRequest,
            request_handler::RespondRequest,
            notification_handler::UnreadCountResponse,
            notification_handler::MarkAllReadResponse,
            // Shared responses
            MessageResponse,
            ApplicationDecisionResponse,
            RequestDecisionResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and admin claim"),
        (name = "Admin", description = "Mentor application review"),
        (name = "Mentors", description = "Approved mentor directory"),
        (name = "Mentor Requests", description = "Mentorship requests between mentees and mentors"),
        (name = "Notifications", description = "In-app notification inbox")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
