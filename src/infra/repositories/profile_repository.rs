//! Mentor and mentee profile repositories.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{mentee_profile, mentor_profile};
use crate::domain::{MenteeProfile, MenteeProfileInput, MentorProfile, MentorProfileInput};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MentorProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<MentorProfile>>;

    /// Approved profiles only, newest first
    async fn list_approved(&self) -> AppResult<Vec<MentorProfile>>;

    async fn find_many_by_users(&self, user_ids: Vec<Uuid>) -> AppResult<Vec<MentorProfile>>;
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MenteeProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<MenteeProfile>>;
}

pub struct MentorProfileStore {
    db: DatabaseConnection,
}

impl MentorProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MentorProfileRepository for MentorProfileStore {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<MentorProfile>> {
        let result = mentor_profile::Entity::find()
            .filter(mentor_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(result.map(MentorProfile::from))
    }

    async fn list_approved(&self) -> AppResult<Vec<MentorProfile>> {
        let models = mentor_profile::Entity::find()
            .filter(mentor_profile::Column::IsApproved.eq(true))
            .order_by_desc(mentor_profile::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(MentorProfile::from).collect())
    }

    async fn find_many_by_users(&self, user_ids: Vec<Uuid>) -> AppResult<Vec<MentorProfile>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = mentor_profile::Entity::find()
            .filter(mentor_profile::Column::UserId.is_in(user_ids))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(MentorProfile::from).collect())
    }
}

pub struct MenteeProfileStore {
    db: DatabaseConnection,
}

impl MenteeProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MenteeProfileRepository for MenteeProfileStore {
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<MenteeProfile>> {
        let result = mentee_profile::Entity::find()
            .filter(mentee_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(result.map(MenteeProfile::from))
    }
}

/// Transaction-aware profile writes.
pub struct TxProfileRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxProfileRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Mentor profiles start unapproved.
    pub async fn create_mentor(
        &self,
        user_id: Uuid,
        input: MentorProfileInput,
    ) -> AppResult<MentorProfile> {
        let now = Utc::now();
        let model = mentor_profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            bio: Set(input.bio),
            expertise: Set(input.expertise.to_stored()),
            languages: Set(input.languages.to_stored()),
            availability: Set(input.availability),
            experience: Set(input.experience),
            education: Set(input.education),
            location: Set(input.location),
            is_approved: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.txn)
        .await
        .map_err(|e| AppError::from_write(e, "Mentor profile already exists"))?;

        Ok(MentorProfile::from(model))
    }

    pub async fn create_mentee(
        &self,
        user_id: Uuid,
        input: MenteeProfileInput,
    ) -> AppResult<MenteeProfile> {
        let model = mentee_profile::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            bio: Set(input.bio),
            goals: Set(input.goals.to_stored()),
            interests: Set(input.interests.to_stored()),
            location: Set(input.location),
            education: Set(input.education),
            created_at: Set(Utc::now()),
        }
        .insert(self.txn)
        .await
        .map_err(|e| AppError::from_write(e, "Mentee profile already exists"))?;

        Ok(MenteeProfile::from(model))
    }

    pub async fn find_approved_mentor(&self, user_id: Uuid) -> AppResult<Option<MentorProfile>> {
        let result = mentor_profile::Entity::find()
            .filter(mentor_profile::Column::UserId.eq(user_id))
            .filter(mentor_profile::Column::IsApproved.eq(true))
            .one(self.txn)
            .await?;

        Ok(result.map(MentorProfile::from))
    }

    /// Make the mentor discoverable.
    pub async fn mark_approved(&self, user_id: Uuid) -> AppResult<()> {
        let result = mentor_profile::Entity::update_many()
            .col_expr(mentor_profile::Column::IsApproved, Expr::value(true))
            .col_expr(mentor_profile::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(mentor_profile::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Mentor profile"));
        }
        Ok(())
    }
}
