//! Service layer: thin pass-throughs over the repositories, one per entity type.

use sea_orm::DatabaseConnection;

use crate::entities::{company, genre, platform};
use crate::repository::{
    EntityRepository, Repository, RepositoryError, VideoGameDetails, VideoGameDraft,
    VideoGameRepository,
};

/// Forwards every operation to the wrapped repository.
#[derive(Debug, Clone)]
pub struct EntityService<R> {
    repository: R,
}

pub type GenreService = EntityService<Repository<genre::Entity>>;
pub type PlatformService = EntityService<Repository<platform::Entity>>;
pub type CompanyService = EntityService<Repository<company::Entity>>;
pub type VideoGameService = EntityService<VideoGameRepository>;

impl<R: EntityRepository> EntityService<R> {
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn list_active(&self) -> Result<Vec<R::Record>, RepositoryError> {
        self.repository.list_active().await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn list_including_deleted(&self) -> Result<Vec<R::Record>, RepositoryError> {
        self.repository.list_including_deleted().await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn list_active_tracked(&self) -> Result<Vec<R::Tracked>, RepositoryError> {
        self.repository.list_active_tracked().await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn save_tracked(&self, tracked: R::Tracked) -> Result<R::Record, RepositoryError> {
        self.repository.save_tracked(tracked).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<R::Record>, RepositoryError> {
        self.repository.get_by_id(id).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn get_by_id_including_deleted(
        &self,
        id: i32,
    ) -> Result<Option<R::Record>, RepositoryError> {
        self.repository.get_by_id_including_deleted(id).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn add(&self, entity: R::Create) -> Result<R::Record, RepositoryError> {
        self.repository.add(entity).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn update(&self, entity: R::Update) -> Result<bool, RepositoryError> {
        self.repository.update(entity).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn soft_delete(&self, id: i32) -> Result<bool, RepositoryError> {
        self.repository.soft_delete(id).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn restore(&self, id: i32) -> Result<bool, RepositoryError> {
        self.repository.restore(id).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn hard_delete(&self, id: i32) -> Result<bool, RepositoryError> {
        self.repository.hard_delete(id).await
    }
}

impl EntityService<VideoGameRepository> {
    /// See [`VideoGameRepository::add_with_relationships`].
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn add_with_relationships(
        &self,
        draft: VideoGameDraft,
    ) -> Result<VideoGameDetails, RepositoryError> {
        self.repository.add_with_relationships(draft).await
    }

    /// See [`VideoGameRepository::update_with_relationships`].
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the repository.
    pub async fn update_with_relationships(
        &self,
        draft: VideoGameDraft,
        overwrite_cover_image: bool,
    ) -> Result<Option<VideoGameDetails>, RepositoryError> {
        self.repository
            .update_with_relationships(draft, overwrite_cover_image)
            .await
    }
}

/// Every catalogue service, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct CatalogueServices {
    pub genres: GenreService,
    pub platforms: PlatformService,
    pub companies: CompanyService,
    pub video_games: VideoGameService,
}

impl CatalogueServices {
    #[must_use]
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            genres: EntityService::new(Repository::new(db.clone())),
            platforms: EntityService::new(Repository::new(db.clone())),
            companies: EntityService::new(Repository::new(db.clone())),
            video_games: EntityService::new(VideoGameRepository::new(db.clone())),
        }
    }
}
