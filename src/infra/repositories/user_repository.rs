//! User repository: lookups on the pool plus transaction-scoped writes.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, Role, User};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by (already normalized) email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Batch lookup used to join counterpart identities into listings
    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;

    /// The admin account, if one was ever claimed
    async fn find_admin(&self) -> AppResult<Option<User>>;
}

async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<User>> {
    UserEntity::find_by_id(id)
        .one(conn)
        .await?
        .map(User::try_from)
        .transpose()
}

async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> AppResult<Option<User>> {
    UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .one(conn)
        .await?
        .map(User::try_from)
        .transpose()
}

async fn find_admin<C: ConnectionTrait>(conn: &C) -> AppResult<Option<User>> {
    UserEntity::find()
        .filter(user::Column::IsAdmin.eq(true))
        .one(conn)
        .await?
        .map(User::try_from)
        .transpose()
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        find_by_email(&self.db, email).await
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn find_admin(&self) -> AppResult<Option<User>> {
        find_admin(&self.db).await
    }
}

/// Transaction-aware user repository.
///
/// Executes all operations within the provided transaction.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        find_by_id(self.txn, id).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        find_by_email(self.txn, email).await
    }

    pub async fn find_admin(&self) -> AppResult<Option<User>> {
        find_admin(self.txn).await
    }

    /// Insert a user. A duplicate email is reported as Conflict.
    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            role: Set(new_user.role.as_str().to_string()),
            is_admin: Set(new_user.is_admin),
            is_active: Set(true),
            admin_verified_at: Set(new_user.is_admin.then_some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(|e| AppError::from_write(e, "User already exists"))?;

        User::try_from(model)
    }

    pub async fn set_role(&self, id: Uuid, role: Role) -> AppResult<User> {
        let mut active: ActiveModel = self.load(id).await?.into();
        active.role = Set(role.as_str().to_string());
        active.updated_at = Set(Utc::now());

        User::try_from(active.update(self.txn).await?)
    }

    /// Promote to administrator and stamp the verification time.
    pub async fn grant_admin(&self, id: Uuid) -> AppResult<User> {
        let now = Utc::now();
        let mut active: ActiveModel = self.load(id).await?.into();
        active.role = Set(Role::Admin.as_str().to_string());
        active.is_admin = Set(true);
        active.admin_verified_at = Set(Some(now));
        active.updated_at = Set(now);

        User::try_from(active.update(self.txn).await?)
    }

    async fn load(&self, id: Uuid) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or_not_found("User")
    }
}
