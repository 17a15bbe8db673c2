//! Actor lookup and capability checks shared by the workflow services.

use uuid::Uuid;

use crate::domain::{Action, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Load the calling user. A token whose user is gone or deactivated no
/// longer authenticates anyone.
pub(crate) async fn load_actor<U: UnitOfWork>(uow: &U, actor_id: Uuid) -> AppResult<User> {
    match uow.users().find_by_id(actor_id).await? {
        Some(user) if user.is_active => Ok(user),
        _ => {
            tracing::debug!(%actor_id, "Actor missing or inactive");
            Err(AppError::Unauthorized)
        }
    }
}

/// Load the calling user and require `action`, failing with Forbidden(`denied`).
pub(crate) async fn authorize<U: UnitOfWork>(
    uow: &U,
    actor_id: Uuid,
    action: Action,
    denied: &str,
) -> AppResult<User> {
    let actor = load_actor(uow, actor_id).await?;
    if !actor.can(action) {
        tracing::debug!(%actor_id, role = %actor.role, ?action, "Capability denied");
        return Err(AppError::forbidden(denied));
    }
    Ok(actor)
}
