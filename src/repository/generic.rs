use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IdenStatic, IntoActiveModel,
    Iterable, ModelTrait, QueryFilter, Value,
};

use super::{EntityRepository, RepositoryError, SoftDeleteEntity, select};

/// Soft-delete repository for a single entity type.
///
/// Cloning is cheap: the connection is a shared pool handle.
#[derive(Debug)]
pub struct Repository<E> {
    db: DatabaseConnection,
    entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            entity: PhantomData,
        }
    }
}

impl<E: SoftDeleteEntity> Repository<E> {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Look up `id` in any delete state.
    async fn find_any(&self, id: i32) -> Result<Option<E::Model>, RepositoryError> {
        select::<E>(true)
            .filter(E::id_column().eq(id))
            .one(&self.db)
            .await
            .map_err(|source| RepositoryError::data_integrity::<E>(Some(id), source))
    }

    async fn load(&self, include_deleted: bool) -> Result<Vec<E::Model>, RepositoryError> {
        select::<E>(include_deleted)
            .all(&self.db)
            .await
            .map_err(|source| RepositoryError::data_integrity::<E>(None, source))
    }
}

/// The id and delete-state columns are never copied from caller input.
fn is_protected<E: SoftDeleteEntity>(column: E::Column) -> bool {
    let name = column.as_str();
    name == E::id_column().as_str()
        || name == E::is_deleted_column().as_str()
        || name == E::deleted_at_column().as_str()
}

/// `deleted_at` consistent with the model's `is_deleted` flag.
fn consistent_deleted_at<E: SoftDeleteEntity>(model: &E::Model) -> Option<DateTimeWithTimeZone> {
    if E::is_deleted(model) {
        E::deleted_at(model).or_else(|| Some(Utc::now().into()))
    } else {
        None
    }
}

#[async_trait]
impl<E> EntityRepository for Repository<E>
where
    E: SoftDeleteEntity + Send + Sync,
    E::Model: IntoActiveModel<E::Active> + Send + Sync,
{
    type Create = E::Model;
    type Update = E::Model;
    type Record = E::Model;
    type Tracked = E::Active;

    async fn list_active(&self) -> Result<Vec<E::Model>, RepositoryError> {
        self.load(false).await
    }

    async fn list_including_deleted(&self) -> Result<Vec<E::Model>, RepositoryError> {
        self.load(true).await
    }

    async fn list_active_tracked(&self) -> Result<Vec<E::Active>, RepositoryError> {
        let rows = self.load(false).await?;
        Ok(rows.into_iter().map(E::Active::from).collect())
    }

    async fn save_tracked(&self, mut tracked: E::Active) -> Result<E::Model, RepositoryError> {
        // Delete state only moves through soft_delete / restore.
        tracked.not_set(E::is_deleted_column());
        tracked.not_set(E::deleted_at_column());

        let model = tracked.update(&self.db).await?;
        tracing::info!(entity = E::NAME, id = E::id_of(&model), "tracked changes saved");
        Ok(model)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<E::Model>, RepositoryError> {
        select::<E>(false)
            .filter(E::id_column().eq(id))
            .one(&self.db)
            .await
            .map_err(|source| RepositoryError::data_integrity::<E>(Some(id), source))
    }

    async fn get_by_id_including_deleted(
        &self,
        id: i32,
    ) -> Result<Option<E::Model>, RepositoryError> {
        self.find_any(id).await
    }

    async fn add(&self, entity: E::Model) -> Result<E::Model, RepositoryError> {
        let mut active = <E::Active as ActiveModelTrait>::default();
        for column in E::Column::iter() {
            if column.as_str() != E::id_column().as_str() {
                active.set(column, entity.get(column));
            }
        }
        active.set(
            E::deleted_at_column(),
            Value::from(consistent_deleted_at::<E>(&entity)),
        );

        let model = active.insert(&self.db).await?;
        tracing::info!(entity = E::NAME, id = E::id_of(&model), "added");
        Ok(model)
    }

    async fn update(&self, entity: E::Model) -> Result<bool, RepositoryError> {
        let id = E::id_of(&entity);
        let Some(existing) = self.find_any(id).await? else {
            tracing::debug!(entity = E::NAME, id, "update target not found");
            return Ok(false);
        };

        let mut active = E::Active::from(existing);
        for column in E::Column::iter().filter(|column| !is_protected::<E>(*column)) {
            active.set(column, entity.get(column));
        }
        active.update(&self.db).await?;

        tracing::info!(entity = E::NAME, id, "updated");
        Ok(true)
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let result = E::update_many()
            .col_expr(E::is_deleted_column(), Expr::value(true))
            .col_expr(E::deleted_at_column(), Expr::value(now))
            .filter(E::id_column().eq(id))
            .filter(E::is_deleted_column().eq(false))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(entity = E::NAME, id, "soft-deleted");
            return Ok(true);
        }

        // Nothing flipped: either already deleted (keep the original timestamp) or absent.
        Ok(self.find_any(id).await?.is_some())
    }

    async fn restore(&self, id: i32) -> Result<bool, RepositoryError> {
        let result = E::update_many()
            .col_expr(E::is_deleted_column(), Expr::value(false))
            .col_expr(
                E::deleted_at_column(),
                Expr::value(Option::<DateTimeWithTimeZone>::None),
            )
            .filter(E::id_column().eq(id))
            .filter(E::is_deleted_column().eq(true))
            .exec(&self.db)
            .await?;

        let restored = result.rows_affected > 0;
        if restored {
            tracing::info!(entity = E::NAME, id, "restored");
        }
        Ok(restored)
    }

    async fn hard_delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let result = E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(&self.db)
            .await?;

        let removed = result.rows_affected > 0;
        if removed {
            tracing::info!(entity = E::NAME, id, "permanently deleted");
        }
        Ok(removed)
    }
}
