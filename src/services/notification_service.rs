//! Per-user notification log.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::guard::authorize;
use crate::domain::{Action, NewNotification, Notification};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

const NOT_ALLOWED: &str = "Notifications are not available for this account";

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Append a notification outside of any workflow transition.
    async fn emit(&self, notification: NewNotification) -> AppResult<Notification>;

    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64>;

    /// NotFound when the notification is missing or belongs to someone else.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// Returns how many notifications were unread before the call.
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;
}

pub struct NotificationCenter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NotificationCenter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NotificationService for NotificationCenter<U> {
    async fn emit(&self, notification: NewNotification) -> AppResult<Notification> {
        let notification = self.uow.notifications().create(notification).await?;
        tracing::debug!(id = %notification.id, user_id = %notification.user_id, kind = %notification.kind, "Notification emitted");
        Ok(notification)
    }

    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        authorize(&*self.uow, user_id, Action::ReadNotifications, NOT_ALLOWED).await?;
        self.uow.notifications().list_for_user(user_id).await
    }

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64> {
        authorize(&*self.uow, user_id, Action::ReadNotifications, NOT_ALLOWED).await?;
        self.uow.notifications().count_unread(user_id).await
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        authorize(&*self.uow, user_id, Action::ReadNotifications, NOT_ALLOWED).await?;

        let notifications = self.uow.notifications();
        notifications
            .find_for_user(id, user_id)
            .await?
            .ok_or_not_found("Notification")?;
        notifications.mark_read(id, user_id).await?;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        authorize(&*self.uow, user_id, Action::ReadNotifications, NOT_ALLOWED).await?;

        let updated = self.uow.notifications().mark_all_read(user_id).await?;
        tracing::debug!(%user_id, updated, "Notifications marked read");
        Ok(updated)
    }
}
