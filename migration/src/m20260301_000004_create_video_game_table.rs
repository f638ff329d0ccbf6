use sea_orm_migration::prelude::*;

/// Creates the `video_game` table with its two company references.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum VideoGame {
    Table,
    Id,
    Title,
    Synopsis,
    ReleaseDate,
    UserScore,
    PublisherId,
    DeveloperId,
    CoverImage,
    CoverImageContentType,
    IsDeleted,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Company {
    Table,
    Id,
}

#[async_trait::async_trait]
#[allow(clippy::too_many_lines)]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VideoGame::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoGame::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VideoGame::Title).string_len(200).not_null())
                    .col(
                        ColumnDef::new(VideoGame::Synopsis)
                            .string_len(1000)
                            .not_null(),
                    )
                    .col(ColumnDef::new(VideoGame::ReleaseDate).date().not_null())
                    .col(
                        ColumnDef::new(VideoGame::UserScore)
                            .integer()
                            .not_null()
                            .check(Expr::col(VideoGame::UserScore).between(0, 100)),
                    )
                    .col(ColumnDef::new(VideoGame::PublisherId).integer())
                    .col(ColumnDef::new(VideoGame::DeveloperId).integer())
                    .col(ColumnDef::new(VideoGame::CoverImage).binary())
                    .col(ColumnDef::new(VideoGame::CoverImageContentType).string_len(100))
                    .col(
                        ColumnDef::new(VideoGame::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(VideoGame::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_game_publisher_id")
                            .from(VideoGame::Table, VideoGame::PublisherId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_game_developer_id")
                            .from(VideoGame::Table, VideoGame::DeveloperId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_video_game_is_deleted")
                    .table(VideoGame::Table)
                    .col(VideoGame::IsDeleted)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_video_game_publisher_id")
                    .table(VideoGame::Table)
                    .col(VideoGame::PublisherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_video_game_developer_id")
                    .table(VideoGame::Table)
                    .col(VideoGame::DeveloperId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoGame::Table).to_owned())
            .await
    }
}
