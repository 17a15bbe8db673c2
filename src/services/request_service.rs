//! Mentorship request workflow.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::guard::{authorize, load_actor};
use crate::config::{DEFAULT_ACCEPT_RESPONSE, DEFAULT_REJECT_RESPONSE};
use crate::domain::{
    Action, MentorProfileSummary, MentorRequest, MentorWithProfile, NewNotification,
    RequestEvent, RequestStatus, RequestView, SentRequestView, StateMachine, Transition,
    UserSummary,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait RequestService: Send + Sync {
    /// Mentee asks an approved mentor for mentorship.
    async fn create(
        &self,
        mentee_id: Uuid,
        mentor_id: Uuid,
        message: String,
    ) -> AppResult<Transition<MentorRequest>>;

    async fn accept(
        &self,
        request_id: Uuid,
        mentor_id: Uuid,
        response: Option<String>,
    ) -> AppResult<Transition<MentorRequest>>;

    async fn reject(
        &self,
        request_id: Uuid,
        mentor_id: Uuid,
        response: Option<String>,
    ) -> AppResult<Transition<MentorRequest>>;

    /// Mentors get requests addressed to them, mentees the ones they sent.
    async fn list_for_actor(&self, actor_id: Uuid) -> AppResult<Vec<RequestView>>;

    /// Mentee dashboard: sent requests with the mentor's profile summary.
    async fn list_for_mentee(&self, mentee_id: Uuid) -> AppResult<Vec<SentRequestView>>;
}

pub struct RequestWorkflow<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RequestWorkflow<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn respond(
        &self,
        request_id: Uuid,
        mentor_id: Uuid,
        event: RequestEvent,
        response: Option<String>,
    ) -> AppResult<Transition<MentorRequest>> {
        let mentor = authorize(
            &*self.uow,
            mentor_id,
            Action::RespondToRequest,
            "Only mentors can respond to requests",
        )
        .await?;

        let response = response
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| {
                match event {
                    RequestEvent::Accept => DEFAULT_ACCEPT_RESPONSE,
                    RequestEvent::Reject => DEFAULT_REJECT_RESPONSE,
                }
                .to_string()
            });
        let mentor_name = mentor.display_name();

        let transition = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let request = ctx
                        .requests()
                        .find_by_id(request_id)
                        .await?
                        .ok_or_not_found("Request")?;
                    if request.mentor_id != mentor_id {
                        return Err(AppError::forbidden(
                            "You can only respond to your own requests",
                        ));
                    }
                    let next = request.status.next(event)?;

                    ctx.requests()
                        .transition(request_id, request.status, next, response)
                        .await?;

                    let notification = match event {
                        RequestEvent::Accept => {
                            NewNotification::request_accepted(request.mentee_id, &mentor_name)
                        }
                        RequestEvent::Reject => {
                            NewNotification::request_rejected(request.mentee_id, &mentor_name)
                        }
                    };
                    let delivery = ctx.notifications().emit(notification).await;

                    let record = ctx
                        .requests()
                        .find_by_id(request_id)
                        .await?
                        .ok_or_not_found("Request")?;

                    Ok(Transition {
                        record,
                        notification: delivery,
                    })
                })
            })
            .await?;

        tracing::info!(
            %request_id,
            %mentor_id,
            event = RequestStatus::event_name(event),
            status = %transition.record.status,
            delivered = transition.notification.is_delivered(),
            "Mentorship request answered"
        );

        Ok(transition)
    }

    async fn summaries(&self, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, UserSummary>> {
        Ok(self
            .uow
            .users()
            .find_many(ids)
            .await?
            .iter()
            .map(|u| (u.id, UserSummary::from(u)))
            .collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> RequestService for RequestWorkflow<U> {
    async fn create(
        &self,
        mentee_id: Uuid,
        mentor_id: Uuid,
        message: String,
    ) -> AppResult<Transition<MentorRequest>> {
        let mentee = authorize(
            &*self.uow,
            mentee_id,
            Action::SendRequest,
            "Only mentees can send requests",
        )
        .await?;

        let message = message.trim().to_string();
        if message.is_empty() {
            return Err(AppError::validation("Message is required"));
        }
        let mentee_name = mentee.display_name();

        let transition = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let reachable = match ctx.users().find_by_id(mentor_id).await? {
                        Some(mentor) => mentor.is_reachable_mentor(),
                        None => false,
                    };
                    if !reachable
                        || ctx.profiles().find_approved_mentor(mentor_id).await?.is_none()
                    {
                        return Err(AppError::NotFound(
                            "Mentor not found or not approved".to_string(),
                        ));
                    }
                    if ctx
                        .requests()
                        .find_by_pair(mentee_id, mentor_id)
                        .await?
                        .is_some()
                    {
                        return Err(AppError::conflict("Request already sent to this mentor"));
                    }

                    let record = ctx.requests().create(mentee_id, mentor_id, message).await?;
                    let notification = ctx
                        .notifications()
                        .emit(NewNotification::request_created(mentor_id, &mentee_name))
                        .await;

                    Ok(Transition {
                        record,
                        notification,
                    })
                })
            })
            .await?;

        tracing::info!(
            request_id = %transition.record.id,
            %mentee_id,
            %mentor_id,
            delivered = transition.notification.is_delivered(),
            "Mentorship request sent"
        );

        Ok(transition)
    }

    async fn accept(
        &self,
        request_id: Uuid,
        mentor_id: Uuid,
        response: Option<String>,
    ) -> AppResult<Transition<MentorRequest>> {
        self.respond(request_id, mentor_id, RequestEvent::Accept, response)
            .await
    }

    async fn reject(
        &self,
        request_id: Uuid,
        mentor_id: Uuid,
        response: Option<String>,
    ) -> AppResult<Transition<MentorRequest>> {
        self.respond(request_id, mentor_id, RequestEvent::Reject, response)
            .await
    }

    async fn list_for_actor(&self, actor_id: Uuid) -> AppResult<Vec<RequestView>> {
        let actor = load_actor(&*self.uow, actor_id).await?;

        if actor.can(Action::ListReceivedRequests) {
            let requests = self.uow.requests().list_for_mentor(actor_id).await?;
            let mentees = self
                .summaries(requests.iter().map(|r| r.mentee_id).collect())
                .await?;

            Ok(requests
                .into_iter()
                .map(|request| RequestView {
                    mentee: mentees.get(&request.mentee_id).cloned(),
                    mentor: None,
                    request,
                })
                .collect())
        } else if actor.can(Action::ListSentRequests) {
            let requests = self.uow.requests().list_for_mentee(actor_id).await?;
            let mentors = self
                .summaries(requests.iter().map(|r| r.mentor_id).collect())
                .await?;

            Ok(requests
                .into_iter()
                .map(|request| RequestView {
                    mentee: None,
                    mentor: mentors.get(&request.mentor_id).cloned(),
                    request,
                })
                .collect())
        } else {
            Err(AppError::validation("Invalid role"))
        }
    }

    async fn list_for_mentee(&self, mentee_id: Uuid) -> AppResult<Vec<SentRequestView>> {
        authorize(
            &*self.uow,
            mentee_id,
            Action::ListSentRequests,
            "Mentee access required",
        )
        .await?;

        let requests = self.uow.requests().list_for_mentee(mentee_id).await?;
        let mentor_ids: Vec<Uuid> = requests.iter().map(|r| r.mentor_id).collect();

        let mentors = self.summaries(mentor_ids.clone()).await?;
        let profiles: HashMap<Uuid, MentorProfileSummary> = self
            .uow
            .mentor_profiles()
            .find_many_by_users(mentor_ids)
            .await?
            .iter()
            .map(|p| (p.user_id, MentorProfileSummary::from(p)))
            .collect();

        Ok(requests
            .into_iter()
            .map(|request| {
                let mentor = mentors.get(&request.mentor_id).map(|user| MentorWithProfile {
                    user: user.clone(),
                    mentor_profile: profiles.get(&request.mentor_id).cloned(),
                });
                SentRequestView { request, mentor }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::fixtures;
    use crate::domain::Role;
    use crate::infra::{
        ApplicationRepository, MenteeProfileRepository, MentorProfileRepository,
        MockRequestRepository, MockUserRepository, NotificationRepository, RequestRepository,
        TransactionContext, UserRepository,
    };

    /// Just enough Unit of Work for the read paths.
    struct ReadOnlyUnitOfWork {
        users: Arc<MockUserRepository>,
        requests: Arc<MockRequestRepository>,
    }

    #[async_trait]
    impl UnitOfWork for ReadOnlyUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn mentor_profiles(&self) -> Arc<dyn MentorProfileRepository> {
            unimplemented!("not used by these tests")
        }

        fn mentee_profiles(&self) -> Arc<dyn MenteeProfileRepository> {
            unimplemented!("not used by these tests")
        }

        fn applications(&self) -> Arc<dyn ApplicationRepository> {
            unimplemented!("not used by these tests")
        }

        fn requests(&self) -> Arc<dyn RequestRepository> {
            self.requests.clone()
        }

        fn notifications(&self) -> Arc<dyn NotificationRepository> {
            unimplemented!("not used by these tests")
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            unimplemented!("not used by these tests")
        }

        async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            unimplemented!("not used by these tests")
        }
    }

    fn workflow(
        actor: crate::domain::User,
        requests: MockRequestRepository,
    ) -> RequestWorkflow<ReadOnlyUnitOfWork> {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(actor.clone())));
        users.expect_find_many().returning(|_| Ok(Vec::new()));

        RequestWorkflow::new(Arc::new(ReadOnlyUnitOfWork {
            users: Arc::new(users),
            requests: Arc::new(requests),
        }))
    }

    #[tokio::test]
    async fn test_admin_listing_is_invalid_role() {
        let admin = fixtures::user(Role::Admin);
        let id = admin.id;

        let err = workflow(admin, MockRequestRepository::new())
            .list_for_actor(id)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(msg) if msg == "Invalid role"));
    }

    #[tokio::test]
    async fn test_mentor_listing_reads_received_requests() {
        let mentor = fixtures::user(Role::Mentor);
        let id = mentor.id;
        let mut requests = MockRequestRepository::new();
        requests
            .expect_list_for_mentor()
            .withf(move |mentor_id| *mentor_id == id)
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let views = workflow(mentor, requests).list_for_actor(id).await.unwrap();
        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn test_mentee_dashboard_forbidden_for_mentors() {
        let mentor = fixtures::user(Role::Mentor);
        let id = mentor.id;

        let err = workflow(mentor, MockRequestRepository::new())
            .list_for_mentee(id)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_inactive_actor_is_unauthorized() {
        let mut mentee = fixtures::user(Role::Mentee);
        mentee.is_active = false;
        let id = mentee.id;

        let err = workflow(mentee, MockRequestRepository::new())
            .list_for_actor(id)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }
}
