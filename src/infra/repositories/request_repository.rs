//! Mentorship request repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::mentor_request::{self, Entity as RequestEntity};
use crate::domain::{MentorRequest, RequestStatus, StateMachine};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const DUPLICATE_REQUEST: &str = "Request already sent to this mentor";

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MentorRequest>>;

    /// Requests addressed to a mentor, newest first
    async fn list_for_mentor(&self, mentor_id: Uuid) -> AppResult<Vec<MentorRequest>>;

    /// Requests sent by a mentee, newest first
    async fn list_for_mentee(&self, mentee_id: Uuid) -> AppResult<Vec<MentorRequest>>;
}

async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<MentorRequest>> {
    RequestEntity::find_by_id(id)
        .one(conn)
        .await?
        .map(MentorRequest::try_from)
        .transpose()
}

pub struct RequestStore {
    db: DatabaseConnection,
}

impl RequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_by(&self, column: mentor_request::Column, user_id: Uuid) -> AppResult<Vec<MentorRequest>> {
        RequestEntity::find()
            .filter(column.eq(user_id))
            .order_by_desc(mentor_request::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(MentorRequest::try_from)
            .collect()
    }
}

#[async_trait]
impl RequestRepository for RequestStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MentorRequest>> {
        find_by_id(&self.db, id).await
    }

    async fn list_for_mentor(&self, mentor_id: Uuid) -> AppResult<Vec<MentorRequest>> {
        self.list_by(mentor_request::Column::MentorId, mentor_id).await
    }

    async fn list_for_mentee(&self, mentee_id: Uuid) -> AppResult<Vec<MentorRequest>> {
        self.list_by(mentor_request::Column::MenteeId, mentee_id).await
    }
}

/// Transaction-aware request writes.
pub struct TxRequestRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxRequestRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MentorRequest>> {
        find_by_id(self.txn, id).await
    }

    pub async fn find_by_pair(
        &self,
        mentee_id: Uuid,
        mentor_id: Uuid,
    ) -> AppResult<Option<MentorRequest>> {
        RequestEntity::find()
            .filter(mentor_request::Column::MenteeId.eq(mentee_id))
            .filter(mentor_request::Column::MentorId.eq(mentor_id))
            .one(self.txn)
            .await?
            .map(MentorRequest::try_from)
            .transpose()
    }

    /// Insert a PENDING request. The unique pair index backs up the
    /// caller's existence check.
    pub async fn create(
        &self,
        mentee_id: Uuid,
        mentor_id: Uuid,
        message: String,
    ) -> AppResult<MentorRequest> {
        let now = Utc::now();
        let model = mentor_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            mentee_id: Set(mentee_id),
            mentor_id: Set(mentor_id),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            message: Set(message),
            response: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.txn)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_REQUEST))?;

        MentorRequest::try_from(model)
    }

    /// Conditional status write that also stores the mentor's response.
    pub async fn transition(
        &self,
        id: Uuid,
        from: RequestStatus,
        to: RequestStatus,
        response: String,
    ) -> AppResult<()> {
        let result = RequestEntity::update_many()
            .col_expr(mentor_request::Column::Status, Expr::value(to.as_str()))
            .col_expr(mentor_request::Column::Response, Expr::value(response))
            .col_expr(mentor_request::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(mentor_request::Column::Id.eq(id))
            .filter(mentor_request::Column::Status.eq(from.as_str()))
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::conflict(format!(
                "{} already processed",
                RequestStatus::SUBJECT
            )));
        }
        Ok(())
    }
}
