//! Mentor application workflow: submit, admin review, admin listing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::guard::authorize;
use crate::config::DEFAULT_APPLICATION_MESSAGE;
use crate::domain::{
    Action, ApplicationEvent, ApplicationStatus, ApplicationView, MentorApplication,
    MentorProfile, MentorProfileInput, NewNotification, Role, StateMachine, Transition,
    UserSummary,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{TransactionContext, UnitOfWork};

const ADMIN_REQUIRED: &str = "Admin access required";

#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Create the mentor profile and a PENDING application for a mentor
    /// who has not applied yet.
    async fn submit(
        &self,
        user_id: Uuid,
        profile: MentorProfileInput,
        message: Option<String>,
    ) -> AppResult<MentorApplication>;

    async fn approve(
        &self,
        application_id: Uuid,
        admin_id: Uuid,
    ) -> AppResult<Transition<MentorApplication>>;

    async fn reject(
        &self,
        application_id: Uuid,
        admin_id: Uuid,
    ) -> AppResult<Transition<MentorApplication>>;

    /// Newest first, joined with the applicant.
    async fn list(
        &self,
        admin_id: Uuid,
        status: Option<ApplicationStatus>,
    ) -> AppResult<Vec<ApplicationView>>;
}

/// Message stored on an application: the given one, else the bio, else a
/// stock sentence.
pub(crate) fn application_message(message: Option<String>, bio: &str) -> String {
    message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .or_else(|| Some(bio.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| DEFAULT_APPLICATION_MESSAGE.to_string())
}

/// Submission steps, run inside the caller's transaction so registration
/// and standalone submission share them.
pub(crate) async fn submit_within(
    ctx: &TransactionContext<'_>,
    user_id: Uuid,
    profile: MentorProfileInput,
    message: String,
) -> AppResult<(MentorProfile, MentorApplication)> {
    if ctx.applications().find_by_user(user_id).await?.is_some() {
        return Err(AppError::conflict("Application already submitted"));
    }

    let profile = ctx.profiles().create_mentor(user_id, profile).await?;
    let application = ctx.applications().create(user_id, message).await?;
    Ok((profile, application))
}

pub struct ApplicationWorkflow<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ApplicationWorkflow<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn review(
        &self,
        application_id: Uuid,
        admin_id: Uuid,
        event: ApplicationEvent,
    ) -> AppResult<Transition<MentorApplication>> {
        authorize(&*self.uow, admin_id, Action::ReviewApplications, ADMIN_REQUIRED).await?;

        let transition = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let application = ctx
                        .applications()
                        .find_by_id(application_id)
                        .await?
                        .ok_or_not_found("Application")?;
                    let next = application.status.next(event)?;

                    ctx.applications()
                        .transition(application_id, application.status, next)
                        .await?;

                    let applicant = application.user_id;
                    let notification = match event {
                        ApplicationEvent::Approve => {
                            ctx.users().set_role(applicant, Role::Mentor).await?;
                            ctx.profiles().mark_approved(applicant).await?;
                            NewNotification::mentor_approved(applicant)
                        }
                        ApplicationEvent::Reject => NewNotification::mentor_rejected(applicant),
                    };
                    let delivery = ctx.notifications().emit(notification).await;

                    let record = ctx
                        .applications()
                        .find_by_id(application_id)
                        .await?
                        .ok_or_not_found("Application")?;

                    Ok(Transition {
                        record,
                        notification: delivery,
                    })
                })
            })
            .await?;

        tracing::info!(
            %application_id,
            %admin_id,
            event = ApplicationStatus::event_name(event),
            status = %transition.record.status,
            delivered = transition.notification.is_delivered(),
            "Mentor application reviewed"
        );

        Ok(transition)
    }
}

#[async_trait]
impl<U: UnitOfWork> ApplicationService for ApplicationWorkflow<U> {
    async fn submit(
        &self,
        user_id: Uuid,
        profile: MentorProfileInput,
        message: Option<String>,
    ) -> AppResult<MentorApplication> {
        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")?;
        if user.role != Role::Mentor {
            return Err(AppError::forbidden("Only mentors can apply"));
        }

        let message = application_message(message, &profile.bio);
        let (_, application) = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move { submit_within(&ctx, user_id, profile, message).await })
            })
            .await?;

        tracing::info!(application_id = %application.id, %user_id, "Mentor application submitted");
        Ok(application)
    }

    async fn approve(
        &self,
        application_id: Uuid,
        admin_id: Uuid,
    ) -> AppResult<Transition<MentorApplication>> {
        self.review(application_id, admin_id, ApplicationEvent::Approve)
            .await
    }

    async fn reject(
        &self,
        application_id: Uuid,
        admin_id: Uuid,
    ) -> AppResult<Transition<MentorApplication>> {
        self.review(application_id, admin_id, ApplicationEvent::Reject)
            .await
    }

    async fn list(
        &self,
        admin_id: Uuid,
        status: Option<ApplicationStatus>,
    ) -> AppResult<Vec<ApplicationView>> {
        authorize(&*self.uow, admin_id, Action::ReviewApplications, ADMIN_REQUIRED).await?;

        let applications = self.uow.applications().list(status).await?;
        let applicant_ids = applications.iter().map(|a| a.user_id).collect();
        let applicants: HashMap<Uuid, UserSummary> = self
            .uow
            .users()
            .find_many(applicant_ids)
            .await?
            .iter()
            .map(|u| (u.id, UserSummary::from(u)))
            .collect();

        Ok(applications
            .into_iter()
            .map(|application| ApplicationView {
                user: applicants.get(&application.user_id).cloned(),
                application,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_message_fallbacks() {
        assert_eq!(
            application_message(Some("  Let me help  ".into()), "bio"),
            "Let me help"
        );
        assert_eq!(application_message(Some("   ".into()), " My bio "), "My bio");
        assert_eq!(application_message(None, ""), DEFAULT_APPLICATION_MESSAGE);
    }
}
