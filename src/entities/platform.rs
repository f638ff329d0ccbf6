use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "platform")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::video_game_platform::Entity")]
    VideoGamePlatform,
}

impl Related<super::video_game_platform::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoGamePlatform.def()
    }
}

impl Related<super::video_game::Entity> for Entity {
    fn to() -> RelationDef {
        super::video_game_platform::Relation::VideoGame.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::video_game_platform::Relation::Platform.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
