use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VideoGameGenre::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoGameGenre::VideoGameId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VideoGameGenre::GenreId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(VideoGameGenre::VideoGameId)
                            .col(VideoGameGenre::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_game_genre_video_game_id")
                            .from(VideoGameGenre::Table, VideoGameGenre::VideoGameId)
                            .to(VideoGame::Table, VideoGame::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_game_genre_genre_id")
                            .from(VideoGameGenre::Table, VideoGameGenre::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookup: games by genre
        manager
            .create_index(
                Index::create()
                    .name("idx_video_game_genre_genre_id")
                    .table(VideoGameGenre::Table)
                    .col(VideoGameGenre::GenreId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoGameGenre::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VideoGameGenre {
    Table,
    VideoGameId,
    GenreId,
}

#[derive(DeriveIden)]
enum VideoGame {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
}
