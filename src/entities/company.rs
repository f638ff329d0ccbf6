use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

/// A company is referenced twice by `video_game`, once per role, so there is
/// no single `Related<video_game::Entity>` impl; each role is its own relation.
#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    PublishedGames,
    DevelopedGames,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::PublishedGames => super::video_game::Relation::Publisher.def().rev(),
            Self::DevelopedGames => super::video_game::Relation::Developer.def().rev(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
