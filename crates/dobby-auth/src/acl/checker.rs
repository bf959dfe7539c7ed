//! Access checks over [`Shareable`] entities.

use tracing::warn;
use uuid::Uuid;

use dobby_core::error::AppError;
use dobby_core::result::AppResult;
use dobby_entity::access::Shareable;

/// Whether `caller` may read `entity`: the owner or anyone on its share list.
pub fn can_view<T: Shareable>(entity: &T, caller: Uuid) -> bool {
    entity.is_owned_by(caller) || entity.is_shared_with(caller)
}

/// Whether `caller` may change `entity`. Sharing never grants this.
pub fn can_mutate<T: Shareable>(entity: &T, caller: Uuid) -> bool {
    entity.is_owned_by(caller)
}

/// Unwrap a lookup, treating absence as not found.
pub fn require_found<T>(entity: Option<T>, not_found: &str) -> AppResult<T> {
    entity.ok_or_else(|| AppError::not_found(not_found))
}

/// Unwrap a lookup, treating absence or soft deletion as not found.
pub fn require_active<T: Shareable>(entity: Option<T>, not_found: &str) -> AppResult<T> {
    match entity {
        Some(e) if e.is_active() => Ok(e),
        _ => Err(AppError::not_found(not_found)),
    }
}

/// Fail with forbidden unless `caller` may view `entity`.
pub fn require_view<T: Shareable>(entity: &T, caller: Uuid) -> AppResult<()> {
    if can_view(entity, caller) {
        Ok(())
    } else {
        warn!(user_id = %caller, owner_id = %entity.owner_id(), "View denied");
        Err(AppError::forbidden("No access"))
    }
}

/// Fail with forbidden unless `caller` owns `entity`.
pub fn require_mutate<T: Shareable>(entity: &T, caller: Uuid) -> AppResult<()> {
    if can_mutate(entity, caller) {
        Ok(())
    } else {
        warn!(user_id = %caller, owner_id = %entity.owner_id(), "Mutation denied");
        Err(AppError::forbidden("Owner only"))
    }
}
