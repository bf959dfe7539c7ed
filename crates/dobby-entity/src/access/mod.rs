//! Ownership and sharing shared by folders and images.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An entity with an owner, a view-only share list, and a soft-delete
/// marker.
pub trait Shareable {
    /// The owning user.
    fn owner_id(&self) -> Uuid;

    /// Users granted view access.
    fn shared_with(&self) -> &[Uuid];

    /// Soft-delete timestamp.
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Whether the entity has not been soft-deleted.
    fn is_active(&self) -> bool {
        self.deleted_at().is_none()
    }

    /// Whether `user_id` owns the entity.
    fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id() == user_id
    }

    /// Whether the entity is shared with `user_id`.
    fn is_shared_with(&self, user_id: Uuid) -> bool {
        self.shared_with().contains(&user_id)
    }
}
