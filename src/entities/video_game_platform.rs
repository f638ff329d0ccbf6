use sea_orm::entity::prelude::*;

/// Join row linking a video game to one of its platforms.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "video_game_platform")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub video_game_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub platform_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::video_game::Entity",
        from = "Column::VideoGameId",
        to = "super::video_game::Column::Id",
        on_delete = "Cascade"
    )]
    VideoGame,
    #[sea_orm(
        belongs_to = "super::platform::Entity",
        from = "Column::PlatformId",
        to = "super::platform::Column::Id",
        on_delete = "Cascade"
    )]
    Platform,
}

impl Related<super::video_game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoGame.def()
    }
}

impl Related<super::platform::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Platform.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
