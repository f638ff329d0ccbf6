use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video_game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub synopsis: String,
    pub release_date: Date,
    pub user_score: i32,
    pub publisher_id: Option<i32>,
    pub developer_id: Option<i32>,
    #[serde(skip)]
    pub cover_image: Option<Vec<u8>>,
    pub cover_image_content_type: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::PublisherId",
        to = "super::company::Column::Id",
        on_delete = "SetNull"
    )]
    Publisher,
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::DeveloperId",
        to = "super::company::Column::Id",
        on_delete = "SetNull"
    )]
    Developer,
    #[sea_orm(has_many = "super::video_game_genre::Entity")]
    VideoGameGenre,
    #[sea_orm(has_many = "super::video_game_platform::Entity")]
    VideoGamePlatform,
}

impl Related<super::video_game_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoGameGenre.def()
    }
}

impl Related<super::video_game_platform::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoGamePlatform.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::video_game_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::video_game_genre::Relation::VideoGame.def().rev())
    }
}

impl Related<super::platform::Entity> for Entity {
    fn to() -> RelationDef {
        super::video_game_platform::Relation::Platform.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::video_game_platform::Relation::VideoGame.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
