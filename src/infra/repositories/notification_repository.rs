//! Notification repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::entities::notification::{self, Entity as NotificationEntity};
use crate::domain::{Delivery, NewNotification, Notification};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append one notification outside of any workflow transaction
    async fn create(&self, notification: NewNotification) -> AppResult<Notification>;

    /// Newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;

    /// Lookup scoped to the owner; someone else's notification is `None`
    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Notification>>;

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<u64>;

    /// Returns the number of rows that changed
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    async fn count_unread(&self, user_id: Uuid) -> AppResult<u64>;
}

async fn insert<C: ConnectionTrait>(conn: &C, new: NewNotification) -> AppResult<Notification> {
    let model = notification::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(new.user_id),
        title: Set(new.title),
        message: Set(new.message),
        kind: Set(new.kind.as_str().to_string()),
        is_read: Set(false),
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await?;

    Notification::try_from(model)
}

pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        insert(&self.db, notification).await
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        NotificationEntity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .order_by_desc(notification::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Notification::try_from)
            .collect()
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Notification>> {
        NotificationEntity::find_by_id(id)
            .filter(notification::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .map(Notification::try_from)
            .transpose()
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<u64> {
        let result = NotificationEntity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::Id.eq(id))
            .filter(notification::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = NotificationEntity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<u64> {
        let count = NotificationEntity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}

/// Notification writes that ride along with a workflow transition.
pub struct TxNotificationRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxNotificationRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Write the notification inside a savepoint of the surrounding
    /// transaction.
    ///
    /// A failed insert only rolls back the savepoint; the transition it
    /// accompanies still commits and the caller learns the outcome through
    /// the returned [`Delivery`].
    pub async fn emit(&self, new: NewNotification) -> Delivery {
        let user_id = new.user_id;
        let kind = new.kind;

        let savepoint = match self.txn.begin().await {
            Ok(savepoint) => savepoint,
            Err(e) => {
                tracing::warn!(%user_id, %kind, "Could not open notification savepoint: {}", e);
                return Delivery::Failed;
            }
        };

        match insert(&savepoint, new).await {
            Ok(notification) => match savepoint.commit().await {
                Ok(()) => {
                    tracing::debug!(id = %notification.id, %user_id, %kind, "Notification emitted");
                    Delivery::Delivered
                }
                Err(e) => {
                    tracing::warn!(%user_id, %kind, "Notification savepoint release failed: {}", e);
                    Delivery::Failed
                }
            },
            Err(e) => {
                tracing::warn!(%user_id, %kind, "Notification not delivered: {:?}", e);
                if let Err(rollback_err) = savepoint.rollback().await {
                    tracing::error!("Notification savepoint rollback failed: {}", rollback_err);
                }
                Delivery::Failed
            }
        }
    }
}
