//! Mentor application repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::mentor_application::{self, Entity as ApplicationEntity};
use crate::domain::{ApplicationStatus, MentorApplication, StateMachine};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MentorApplication>>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<MentorApplication>>;

    /// Newest first, optionally restricted to one status
    async fn list(&self, status: Option<ApplicationStatus>) -> AppResult<Vec<MentorApplication>>;
}

async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<MentorApplication>> {
    ApplicationEntity::find_by_id(id)
        .one(conn)
        .await?
        .map(MentorApplication::try_from)
        .transpose()
}

async fn find_by_user<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> AppResult<Option<MentorApplication>> {
    ApplicationEntity::find()
        .filter(mentor_application::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .map(MentorApplication::try_from)
        .transpose()
}

pub struct ApplicationStore {
    db: DatabaseConnection,
}

impl ApplicationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MentorApplication>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<MentorApplication>> {
        find_by_user(&self.db, user_id).await
    }

    async fn list(&self, status: Option<ApplicationStatus>) -> AppResult<Vec<MentorApplication>> {
        let mut query = ApplicationEntity::find();
        if let Some(status) = status {
            query = query.filter(mentor_application::Column::Status.eq(status.as_str()));
        }

        query
            .order_by_desc(mentor_application::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(MentorApplication::try_from)
            .collect()
    }
}

/// Transaction-aware application writes.
pub struct TxApplicationRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxApplicationRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MentorApplication>> {
        find_by_id(self.txn, id).await
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<MentorApplication>> {
        find_by_user(self.txn, user_id).await
    }

    /// Insert a PENDING application.
    pub async fn create(&self, user_id: Uuid, message: String) -> AppResult<MentorApplication> {
        let now = Utc::now();
        let model = mentor_application::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            status: Set(ApplicationStatus::Pending.as_str().to_string()),
            message: Set(message),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.txn)
        .await
        .map_err(|e| AppError::from_write(e, "Application already submitted"))?;

        MentorApplication::try_from(model)
    }

    /// Move `id` from `from` to `to`, only if the row is still in `from`.
    ///
    /// Zero affected rows means a concurrent writer got there first.
    pub async fn transition(
        &self,
        id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> AppResult<()> {
        let result = ApplicationEntity::update_many()
            .col_expr(mentor_application::Column::Status, Expr::value(to.as_str()))
            .col_expr(mentor_application::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(mentor_application::Column::Id.eq(id))
            .filter(mentor_application::Column::Status.eq(from.as_str()))
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::conflict(format!(
                "{} already processed",
                ApplicationStatus::SUBJECT
            )));
        }
        Ok(())
    }
}
