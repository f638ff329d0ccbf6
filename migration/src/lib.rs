pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_genre_table;
mod m20260301_000002_create_platform_table;
mod m20260301_000003_create_company_table;
mod m20260301_000004_create_video_game_table;
mod m20260301_000005_create_video_game_genre_table;
mod m20260301_000006_create_video_game_platform_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_genre_table::Migration),
            Box::new(m20260301_000002_create_platform_table::Migration),
            Box::new(m20260301_000003_create_company_table::Migration),
            Box::new(m20260301_000004_create_video_game_table::Migration),
            Box::new(m20260301_000005_create_video_game_genre_table::Migration),
            Box::new(m20260301_000006_create_video_game_platform_table::Migration),
        ]
    }
}
