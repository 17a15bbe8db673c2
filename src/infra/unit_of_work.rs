//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and runs multi-row writes (registration,
//! approval, request transitions, admin claim) inside one database
//! transaction.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    ApplicationRepository, ApplicationStore, MenteeProfileRepository, MenteeProfileStore,
    MentorProfileRepository, MentorProfileStore, NotificationRepository, NotificationStore,
    RequestRepository, RequestStore, TxApplicationRepository, TxNotificationRepository,
    TxProfileRepository, TxRequestRepository, TxUserRepository, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Not mockable directly because of the generic transaction methods; tests
/// implement it over the mocked repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn mentor_profiles(&self) -> Arc<dyn MentorProfileRepository>;

    fn mentee_profiles(&self) -> Arc<dyn MenteeProfileRepository>;

    fn applications(&self) -> Arc<dyn ApplicationRepository>;

    fn requests(&self) -> Arc<dyn RequestRepository>;

    fn notifications(&self) -> Arc<dyn NotificationRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    /// Uses ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }

    pub fn profiles(&self) -> TxProfileRepository<'_> {
        TxProfileRepository::new(self.txn)
    }

    pub fn applications(&self) -> TxApplicationRepository<'_> {
        TxApplicationRepository::new(self.txn)
    }

    pub fn requests(&self) -> TxRequestRepository<'_> {
        TxRequestRepository::new(self.txn)
    }

    pub fn notifications(&self) -> TxNotificationRepository<'_> {
        TxNotificationRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    mentor_profile_repo: Arc<MentorProfileStore>,
    mentee_profile_repo: Arc<MenteeProfileStore>,
    application_repo: Arc<ApplicationStore>,
    request_repo: Arc<RequestStore>,
    notification_repo: Arc<NotificationStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            mentor_profile_repo: Arc::new(MentorProfileStore::new(db.clone())),
            mentee_profile_repo: Arc::new(MenteeProfileStore::new(db.clone())),
            application_repo: Arc::new(ApplicationStore::new(db.clone())),
            request_repo: Arc::new(RequestStore::new(db.clone())),
            notification_repo: Arc::new(NotificationStore::new(db.clone())),
            db,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn mentor_profiles(&self) -> Arc<dyn MentorProfileRepository> {
        self.mentor_profile_repo.clone()
    }

    fn mentee_profiles(&self) -> Arc<dyn MenteeProfileRepository> {
        self.mentee_profile_repo.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        self.application_repo.clone()
    }

    fn requests(&self) -> Arc<dyn RequestRepository> {
        self.request_repo.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

