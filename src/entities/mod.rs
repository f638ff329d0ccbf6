//! `SeaORM` entities for the catalogue tables.
//!
//! Every top-level entity shares the soft-delete shape (`id`, `is_deleted`,
//! `deleted_at`) and is registered with the generic repository through
//! [`SoftDeleteEntity`]. The `video_game_*` join entities are owned by the
//! video game relationship manager and carry no delete state of their own.

pub mod company;
pub mod genre;
pub mod platform;
pub mod video_game;
pub mod video_game_genre;
pub mod video_game_platform;

use sea_orm::entity::prelude::DateTimeWithTimeZone;

use crate::repository::SoftDeleteEntity;

macro_rules! soft_delete_entity {
    ($module:ident, $name:literal) => {
        impl SoftDeleteEntity for $module::Entity {
            type Active = $module::ActiveModel;

            const NAME: &'static str = $name;

            fn id_column() -> Self::Column {
                $module::Column::Id
            }

            fn is_deleted_column() -> Self::Column {
                $module::Column::IsDeleted
            }

            fn deleted_at_column() -> Self::Column {
                $module::Column::DeletedAt
            }

            fn id_of(model: &Self::Model) -> i32 {
                model.id
            }

            fn is_deleted(model: &Self::Model) -> bool {
                model.is_deleted
            }

            fn deleted_at(model: &Self::Model) -> Option<DateTimeWithTimeZone> {
                model.deleted_at
            }
        }
    };
}

soft_delete_entity!(genre, "Genre");
soft_delete_entity!(platform, "Platform");
soft_delete_entity!(company, "Company");
soft_delete_entity!(video_game, "VideoGame");
