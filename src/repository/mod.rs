//! Data access for the catalogue.
//!
//! [`Repository`] implements the soft-delete CRUD contract for any entity that
//! implements [`SoftDeleteEntity`]. [`VideoGameRepository`] implements the same
//! contract for video games, eager-loading their relationships, and adds the
//! relationship-aware create/update operations.

mod error;
mod generic;
mod video_game;

use async_trait::async_trait;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    Select,
};

pub use error::{Link, RepositoryError, ValidationError};
pub use generic::Repository;
pub use video_game::{VideoGameDetails, VideoGameDraft, VideoGameRepository};

/// Capability set shared by every soft-deletable entity: an integer id, an
/// `is_deleted` flag and a `deleted_at` timestamp.
///
/// `is_deleted == false` holds exactly when `deleted_at` is `None`.
pub trait SoftDeleteEntity: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self>
        + ActiveModelBehavior
        + From<Self::Model>
        + Send
        + 'static;

    /// Entity name used in diagnostics.
    const NAME: &'static str;

    fn id_column() -> Self::Column;
    fn is_deleted_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;

    fn id_of(model: &Self::Model) -> i32;
    fn is_deleted(model: &Self::Model) -> bool;
    fn deleted_at(model: &Self::Model) -> Option<DateTimeWithTimeZone>;
}

/// Base query for `E`, ordered by id.
///
/// Soft-deleted rows are excluded unless `include_deleted` is set.
#[must_use]
pub fn select<E: SoftDeleteEntity>(include_deleted: bool) -> Select<E> {
    let query = E::find().order_by_asc(E::id_column());
    if include_deleted {
        query
    } else {
        query.filter(E::is_deleted_column().eq(false))
    }
}

/// Uniform CRUD + soft-delete contract, one implementation per entity type.
///
/// `Create` is what `add` consumes, `Update` what `update` consumes, `Record`
/// what reads return and `Tracked` an editable row that can be handed back to
/// the repository for saving.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    type Create: Send + 'static;
    type Update: Send + 'static;
    type Record: Send;
    type Tracked: Send;

    /// Rows that are not soft-deleted.
    async fn list_active(&self) -> Result<Vec<Self::Record>, RepositoryError>;

    /// Every row, regardless of delete state.
    async fn list_including_deleted(&self) -> Result<Vec<Self::Record>, RepositoryError>;

    /// Same filter as [`list_active`](Self::list_active), returned as editable rows.
    async fn list_active_tracked(&self) -> Result<Vec<Self::Tracked>, RepositoryError>;

    /// Persist edits made to a row obtained from
    /// [`list_active_tracked`](Self::list_active_tracked). Edits to the
    /// delete-state columns are discarded; the stored state is kept.
    async fn save_tracked(&self, tracked: Self::Tracked) -> Result<Self::Record, RepositoryError>;

    /// The row with `id`, only if it is not soft-deleted.
    async fn get_by_id(&self, id: i32) -> Result<Option<Self::Record>, RepositoryError>;

    /// The row with `id` in any delete state.
    async fn get_by_id_including_deleted(
        &self,
        id: i32,
    ) -> Result<Option<Self::Record>, RepositoryError>;

    /// Insert a new row; the store assigns the id.
    async fn add(&self, entity: Self::Create) -> Result<Self::Record, RepositoryError>;

    /// Full-replacement update of every column except the delete state, which
    /// is kept from the stored row. Returns `false` when `id` does not exist.
    async fn update(&self, entity: Self::Update) -> Result<bool, RepositoryError>;

    /// Flag the row deleted. Idempotent: a second call keeps the first
    /// `deleted_at`. Returns `false` only when `id` does not exist.
    async fn soft_delete(&self, id: i32) -> Result<bool, RepositoryError>;

    /// Clear the delete flag. Returns `false` when `id` does not exist or is
    /// not currently deleted.
    async fn restore(&self, id: i32) -> Result<bool, RepositoryError>;

    /// Remove the row permanently, whatever its delete state. Join rows
    /// cascade. Returns `false` when `id` does not exist.
    async fn hard_delete(&self, id: i32) -> Result<bool, RepositoryError>;
}
