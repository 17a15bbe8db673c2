//! Directory of approved mentors.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::guard::authorize;
use crate::domain::{Action, MentorListing, UserSummary};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Optional case-insensitive substring filters.
#[derive(Debug, Clone, Default)]
pub struct MentorFilter {
    /// Matched against first name, last name and bio
    pub search: Option<String>,
    /// Matched against expertise tags
    pub expertise: Option<String>,
}

#[async_trait]
pub trait MentorService: Send + Sync {
    /// Approved mentors, newest first.
    async fn list(&self, actor_id: Uuid, filter: MentorFilter) -> AppResult<Vec<MentorListing>>;
}

pub struct MentorDirectory<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MentorDirectory<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> MentorService for MentorDirectory<U> {
    async fn list(&self, actor_id: Uuid, filter: MentorFilter) -> AppResult<Vec<MentorListing>> {
        authorize(
            &*self.uow,
            actor_id,
            Action::BrowseMentors,
            "Mentor directory is not available for this account",
        )
        .await?;

        let profiles = self.uow.mentor_profiles().list_approved().await?;
        let users: HashMap<Uuid, UserSummary> = self
            .uow
            .users()
            .find_many(profiles.iter().map(|p| p.user_id).collect())
            .await?
            .iter()
            .filter(|u| u.is_reachable_mentor())
            .map(|u| (u.id, UserSummary::from(u)))
            .collect();

        Ok(profiles
            .into_iter()
            .filter_map(|profile| {
                let user = users.get(&profile.user_id)?.clone();
                Some(MentorListing { profile, user })
            })
            .filter(|listing| {
                listing.matches(filter.search.as_deref(), filter.expertise.as_deref())
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::fixtures;
    use crate::domain::{MentorProfile, Role, Tags};
    use crate::infra::{
        ApplicationRepository, MenteeProfileRepository, MentorProfileRepository,
        MockMentorProfileRepository, MockUserRepository, NotificationRepository,
        RequestRepository, TransactionContext, UserRepository,
    };
    use crate::errors::AppError;

    struct DirectoryUnitOfWork {
        users: Arc<MockUserRepository>,
        profiles: Arc<MockMentorProfileRepository>,
    }

    #[async_trait]
    impl UnitOfWork for DirectoryUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn mentor_profiles(&self) -> Arc<dyn MentorProfileRepository> {
            self.profiles.clone()
        }

        fn mentee_profiles(&self) -> Arc<dyn MenteeProfileRepository> {
            unimplemented!("not used by these tests")
        }

        fn applications(&self) -> Arc<dyn ApplicationRepository> {
            unimplemented!("not used by these tests")
        }

        fn requests(&self) -> Arc<dyn RequestRepository> {
            unimplemented!("not used by these tests")
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
            Err(AppError::internal("transactions are not mocked"))
        }

        async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("transactions are not mocked"))
        }
    }

    fn profile_for(user_id: Uuid, bio: &str, expertise: &[&str]) -> MentorProfile {
        let now = chrono::Utc::now();
        MentorProfile {
            id: Uuid::new_v4(),
            user_id,
            bio: bio.to_string(),
            expertise: Tags::new(expertise.iter()),
            languages: Tags::default(),
            availability: String::new(),
            experience: String::new(),
            education: String::new(),
            location: String::new(),
            is_approved: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_filters_and_skips_inactive_mentors() {
        let mentee = fixtures::user(Role::Mentee);
        let mentee_id = mentee.id;

        let finance = fixtures::user(Role::Mentor);
        let medicine = fixtures::user(Role::Mentor);
        let mut retired = fixtures::user(Role::Mentor);
        retired.is_active = false;

        let profiles = vec![
            profile_for(finance.id, "Banker", &["Finance"]),
            profile_for(medicine.id, "Surgeon", &["Medicine"]),
            profile_for(retired.id, "Retired banker", &["Finance"]),
        ];
        let mentors = vec![finance.clone(), medicine, retired];

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(mentee.clone())));
        users
            .expect_find_many()
            .returning(move |_| Ok(mentors.clone()));

        let mut mentor_profiles = MockMentorProfileRepository::new();
        mentor_profiles
            .expect_list_approved()
            .returning(move || Ok(profiles.clone()));

        let directory = MentorDirectory::new(Arc::new(DirectoryUnitOfWork {
            users: Arc::new(users),
            profiles: Arc::new(mentor_profiles),
        }));

        let all = directory.list(mentee_id, MentorFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let filtered = directory
            .list(
                mentee_id,
                MentorFilter {
                    search: None,
                    expertise: Some("fin".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].user.id, finance.id);
    }
}
