use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VideoGamePlatform::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoGamePlatform::VideoGameId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VideoGamePlatform::PlatformId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(VideoGamePlatform::VideoGameId)
                            .col(VideoGamePlatform::PlatformId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_game_platform_video_game_id")
                            .from(VideoGamePlatform::Table, VideoGamePlatform::VideoGameId)
                            .to(VideoGame::Table, VideoGame::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_game_platform_platform_id")
                            .from(VideoGamePlatform::Table, VideoGamePlatform::PlatformId)
                            .to(Platform::Table, Platform::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookup: games by platform
        manager
            .create_index(
                Index::create()
                    .name("idx_video_game_platform_platform_id")
                    .table(VideoGamePlatform::Table)
                    .col(VideoGamePlatform::PlatformId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoGamePlatform::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VideoGamePlatform {
    Table,
    VideoGameId,
    PlatformId,
}

#[derive(DeriveIden)]
enum VideoGame {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Platform {
    Table,
    Id,
}
