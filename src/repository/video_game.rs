use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, TransactionTrait,
};

use super::{
    EntityRepository, Link, Repository, RepositoryError, SoftDeleteEntity, ValidationError, select,
};
use crate::entities::{company, genre, platform, video_game, video_game_genre, video_game_platform};

/// A video game with its relationships loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoGameDetails {
    pub game: video_game::Model,
    pub genres: Vec<genre::Model>,
    pub platforms: Vec<platform::Model>,
    pub publisher: Option<company::Model>,
    pub developer: Option<company::Model>,
}

/// Input for the relationship-aware create and update operations.
///
/// On create `game.id` is ignored; on update it selects the row to change.
/// The publisher, developer and cover fields below take precedence over the
/// matching fields on `game`.
#[derive(Debug, Clone)]
pub struct VideoGameDraft {
    pub game: video_game::Model,
    pub genre_ids: Vec<i32>,
    pub platform_ids: Vec<i32>,
    pub publisher_id: Option<i32>,
    pub developer_id: Option<i32>,
    pub cover_image: Option<Vec<u8>>,
    pub cover_image_content_type: Option<String>,
}

/// Genre and platform rows an incoming draft resolved to.
struct ResolvedLinks {
    genre_ids: Vec<i32>,
    platform_ids: Vec<i32>,
}

/// Repository for the video game aggregate.
///
/// Reads eager-load genres, platforms, publisher and developer. Writes that
/// touch relationships validate every referenced id first and then persist the
/// game and its join rows in a single transaction.
#[derive(Debug, Clone)]
pub struct VideoGameRepository {
    games: Repository<video_game::Entity>,
}

impl VideoGameRepository {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            games: Repository::new(db),
        }
    }

    const fn db(&self) -> &DatabaseConnection {
        self.games.connection()
    }

    /// Create a video game together with its genre/platform links and
    /// optional publisher, developer and cover image.
    ///
    /// The returned aggregate is reloaded regardless of delete state, so a game
    /// created already flagged deleted is still returned.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Validation`] when the genre or platform set is empty
    /// or any referenced id does not exist; nothing is written in that case.
    pub async fn add_with_relationships(
        &self,
        draft: VideoGameDraft,
    ) -> Result<VideoGameDetails, RepositoryError> {
        let txn = self.db().begin().await?;
        let links = resolve_links(&txn, &draft).await?;

        let VideoGameDraft {
            game,
            publisher_id,
            developer_id,
            cover_image,
            cover_image_content_type,
            ..
        } = draft;

        let deleted_at = if game.is_deleted {
            game.deleted_at.or_else(|| Some(Utc::now().into()))
        } else {
            None
        };

        let row = video_game::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(game.title),
            synopsis: ActiveValue::Set(game.synopsis),
            release_date: ActiveValue::Set(game.release_date),
            user_score: ActiveValue::Set(game.user_score),
            publisher_id: ActiveValue::Set(publisher_id),
            developer_id: ActiveValue::Set(developer_id),
            cover_image: ActiveValue::Set(cover_image),
            cover_image_content_type: ActiveValue::Set(cover_image_content_type),
            is_deleted: ActiveValue::Set(game.is_deleted),
            deleted_at: ActiveValue::Set(deleted_at),
        }
        .insert(&txn)
        .await?;

        link_rows(&txn, row.id, &links).await?;
        txn.commit().await?;

        tracing::info!(
            id = row.id,
            genres = ?links.genre_ids,
            platforms = ?links.platform_ids,
            "video game added"
        );

        self.load_one(row.id, true).await?.ok_or_else(|| {
            RepositoryError::data_integrity::<video_game::Entity>(
                Some(row.id),
                DbErr::RecordNotFound("video game missing right after insert".to_string()),
            )
        })
    }

    /// Replace a video game's fields and relationships.
    ///
    /// Scalars and the publisher/developer references are always overwritten.
    /// The cover image is only replaced when `overwrite_cover_image` is set, so
    /// metadata can change without resending the image. Genre and platform
    /// links are replaced as a whole. Soft-deleted games can be updated too.
    ///
    /// Returns `Ok(None)` when no video game has `draft.game.id`; the incoming
    /// relationship ids are not checked in that case.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Validation`] when the genre or platform set is empty
    /// or any referenced id does not exist; the stored game is left untouched.
    pub async fn update_with_relationships(
        &self,
        draft: VideoGameDraft,
        overwrite_cover_image: bool,
    ) -> Result<Option<VideoGameDetails>, RepositoryError> {
        let id = draft.game.id;
        let txn = self.db().begin().await?;

        let existing = video_game::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|source| {
                RepositoryError::data_integrity::<video_game::Entity>(Some(id), source)
            })?;
        let Some(existing) = existing else {
            tracing::debug!(id, "video game to update not found");
            return Ok(None);
        };

        let links = resolve_links(&txn, &draft).await?;

        let mut active: video_game::ActiveModel = existing.into();
        active.title = ActiveValue::Set(draft.game.title);
        active.synopsis = ActiveValue::Set(draft.game.synopsis);
        active.release_date = ActiveValue::Set(draft.game.release_date);
        active.user_score = ActiveValue::Set(draft.game.user_score);
        active.publisher_id = ActiveValue::Set(draft.publisher_id);
        active.developer_id = ActiveValue::Set(draft.developer_id);
        if overwrite_cover_image {
            active.cover_image = ActiveValue::Set(draft.cover_image);
            active.cover_image_content_type = ActiveValue::Set(draft.cover_image_content_type);
        }
        active.update(&txn).await?;

        video_game_genre::Entity::delete_many()
            .filter(video_game_genre::Column::VideoGameId.eq(id))
            .exec(&txn)
            .await?;
        video_game_platform::Entity::delete_many()
            .filter(video_game_platform::Column::VideoGameId.eq(id))
            .exec(&txn)
            .await?;
        link_rows(&txn, id, &links).await?;

        txn.commit().await?;

        tracing::info!(
            id,
            genres = ?links.genre_ids,
            platforms = ?links.platform_ids,
            overwrite_cover_image,
            "video game updated"
        );

        self.load_one(id, true).await
    }

    async fn load_one(
        &self,
        id: i32,
        include_deleted: bool,
    ) -> Result<Option<VideoGameDetails>, RepositoryError> {
        let game = select::<video_game::Entity>(include_deleted)
            .filter(video_game::Column::Id.eq(id))
            .one(self.db())
            .await
            .map_err(|source| {
                RepositoryError::data_integrity::<video_game::Entity>(Some(id), source)
            })?;

        let Some(game) = game else {
            return Ok(None);
        };

        let mut details = attach_relationships(self.db(), vec![game])
            .await
            .map_err(|source| {
                RepositoryError::data_integrity::<video_game::Entity>(Some(id), source)
            })?;
        Ok(details.pop())
    }

    async fn load_many(&self, include_deleted: bool) -> Result<Vec<VideoGameDetails>, RepositoryError> {
        let wrap = |source| RepositoryError::data_integrity::<video_game::Entity>(None, source);

        let games = select::<video_game::Entity>(include_deleted)
            .all(self.db())
            .await
            .map_err(wrap)?;

        attach_relationships(self.db(), games).await.map_err(wrap)
    }
}

#[async_trait]
impl EntityRepository for VideoGameRepository {
    type Create = VideoGameDraft;
    type Update = video_game::Model;
    type Record = VideoGameDetails;
    type Tracked = video_game::ActiveModel;

    async fn list_active(&self) -> Result<Vec<VideoGameDetails>, RepositoryError> {
        self.load_many(false).await
    }

    async fn list_including_deleted(&self) -> Result<Vec<VideoGameDetails>, RepositoryError> {
        self.load_many(true).await
    }

    async fn list_active_tracked(&self) -> Result<Vec<video_game::ActiveModel>, RepositoryError> {
        self.games.list_active_tracked().await
    }

    async fn save_tracked(
        &self,
        tracked: video_game::ActiveModel,
    ) -> Result<VideoGameDetails, RepositoryError> {
        let game = self.games.save_tracked(tracked).await?;
        let id = game.id;
        let mut details = attach_relationships(self.db(), vec![game])
            .await
            .map_err(|source| {
                RepositoryError::data_integrity::<video_game::Entity>(Some(id), source)
            })?;
        details.pop().ok_or_else(|| {
            RepositoryError::data_integrity::<video_game::Entity>(
                Some(id),
                DbErr::RecordNotFound("video game missing right after save".to_string()),
            )
        })
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<VideoGameDetails>, RepositoryError> {
        self.load_one(id, false).await
    }

    async fn get_by_id_including_deleted(
        &self,
        id: i32,
    ) -> Result<Option<VideoGameDetails>, RepositoryError> {
        self.load_one(id, true).await
    }

    async fn add(&self, draft: VideoGameDraft) -> Result<VideoGameDetails, RepositoryError> {
        self.add_with_relationships(draft).await
    }

    /// Scalar-only update; genre and platform links are left as they are.
    async fn update(&self, entity: video_game::Model) -> Result<bool, RepositoryError> {
        self.games.update(entity).await
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, RepositoryError> {
        self.games.soft_delete(id).await
    }

    async fn restore(&self, id: i32) -> Result<bool, RepositoryError> {
        self.games.restore(id).await
    }

    async fn hard_delete(&self, id: i32) -> Result<bool, RepositoryError> {
        self.games.hard_delete(id).await
    }
}

/// Sorted, de-duplicated ids; an empty result is a validation failure.
fn distinct_ids(link: Link, ids: &[i32]) -> Result<Vec<i32>, ValidationError> {
    let ids: Vec<i32> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    if ids.is_empty() {
        return Err(ValidationError::Empty(link));
    }
    Ok(ids)
}

/// Fetch the rows for `ids`, failing with every id that has no row.
///
/// Existence ignores the delete flag: a soft-deleted genre can still be linked.
async fn resolve<E, C>(conn: &C, link: Link, ids: &[i32]) -> Result<Vec<E::Model>, RepositoryError>
where
    E: SoftDeleteEntity,
    C: ConnectionTrait,
{
    let found = select::<E>(true)
        .filter(E::id_column().is_in(ids.iter().copied()))
        .all(conn)
        .await
        .map_err(|source| RepositoryError::data_integrity::<E>(None, source))?;

    let known: HashSet<i32> = found.iter().map(E::id_of).collect();
    let missing: Vec<i32> = ids.iter().copied().filter(|id| !known.contains(id)).collect();
    if !missing.is_empty() {
        tracing::warn!(%link, ?missing, "rejected unknown ids");
        return Err(ValidationError::Missing { link, ids: missing }.into());
    }

    Ok(found)
}

async fn resolve_links<C: ConnectionTrait>(
    conn: &C,
    draft: &VideoGameDraft,
) -> Result<ResolvedLinks, RepositoryError> {
    let genre_ids = distinct_ids(Link::Genre, &draft.genre_ids)?;
    let genres = resolve::<genre::Entity, _>(conn, Link::Genre, &genre_ids).await?;

    let platform_ids = distinct_ids(Link::Platform, &draft.platform_ids)?;
    let platforms = resolve::<platform::Entity, _>(conn, Link::Platform, &platform_ids).await?;

    for (link, id) in [
        (Link::Publisher, draft.publisher_id),
        (Link::Developer, draft.developer_id),
    ] {
        if let Some(id) = id {
            resolve::<company::Entity, _>(conn, link, &[id]).await?;
        }
    }

    // Link the ids of the fetched rows rather than the raw input.
    Ok(ResolvedLinks {
        genre_ids: genres.iter().map(|genre| genre.id).collect(),
        platform_ids: platforms.iter().map(|platform| platform.id).collect(),
    })
}

async fn link_rows<C: ConnectionTrait>(
    conn: &C,
    video_game_id: i32,
    links: &ResolvedLinks,
) -> Result<(), DbErr> {
    video_game_genre::Entity::insert_many(links.genre_ids.iter().map(|&genre_id| {
        video_game_genre::ActiveModel {
            video_game_id: ActiveValue::Set(video_game_id),
            genre_id: ActiveValue::Set(genre_id),
        }
    }))
    .exec_without_returning(conn)
    .await?;

    video_game_platform::Entity::insert_many(links.platform_ids.iter().map(|&platform_id| {
        video_game_platform::ActiveModel {
            video_game_id: ActiveValue::Set(video_game_id),
            platform_id: ActiveValue::Set(platform_id),
        }
    }))
    .exec_without_returning(conn)
    .await?;

    Ok(())
}

/// Group `(owner, target)` pairs by owner.
fn group_links(pairs: impl Iterator<Item = (i32, i32)>) -> HashMap<i32, Vec<i32>> {
    let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
    for (owner, target) in pairs {
        grouped.entry(owner).or_default().push(target);
    }
    for targets in grouped.values_mut() {
        targets.sort_unstable();
    }
    grouped
}

fn pick<M: Clone>(rows: &HashMap<i32, M>, ids: Option<&Vec<i32>>) -> Vec<M> {
    ids.map(|ids| ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
        .unwrap_or_default()
}

/// Batch-load relationships for `games`, one query per related table.
///
/// Related rows are loaded whatever their own delete state.
async fn attach_relationships<C: ConnectionTrait>(
    conn: &C,
    games: Vec<video_game::Model>,
) -> Result<Vec<VideoGameDetails>, DbErr> {
    if games.is_empty() {
        return Ok(Vec::new());
    }

    let game_ids: Vec<i32> = games.iter().map(|game| game.id).collect();

    let genre_links = video_game_genre::Entity::find()
        .filter(video_game_genre::Column::VideoGameId.is_in(game_ids.clone()))
        .all(conn)
        .await?;
    let platform_links = video_game_platform::Entity::find()
        .filter(video_game_platform::Column::VideoGameId.is_in(game_ids))
        .all(conn)
        .await?;

    let genres: HashMap<i32, genre::Model> = genre::Entity::find()
        .filter(genre::Column::Id.is_in(genre_links.iter().map(|link| link.genre_id)))
        .all(conn)
        .await?
        .into_iter()
        .map(|genre| (genre.id, genre))
        .collect();
    let platforms: HashMap<i32, platform::Model> = platform::Entity::find()
        .filter(platform::Column::Id.is_in(platform_links.iter().map(|link| link.platform_id)))
        .all(conn)
        .await?
        .into_iter()
        .map(|platform| (platform.id, platform))
        .collect();

    let company_ids: BTreeSet<i32> = games
        .iter()
        .flat_map(|game| [game.publisher_id, game.developer_id])
        .flatten()
        .collect();
    let companies: HashMap<i32, company::Model> = if company_ids.is_empty() {
        HashMap::new()
    } else {
        company::Entity::find()
            .filter(company::Column::Id.is_in(company_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|company| (company.id, company))
            .collect()
    };

    let genre_ids_by_game = group_links(
        genre_links
            .iter()
            .map(|link| (link.video_game_id, link.genre_id)),
    );
    let platform_ids_by_game = group_links(
        platform_links
            .iter()
            .map(|link| (link.video_game_id, link.platform_id)),
    );

    Ok(games
        .into_iter()
        .map(|game| VideoGameDetails {
            genres: pick(&genres, genre_ids_by_game.get(&game.id)),
            platforms: pick(&platforms, platform_ids_by_game.get(&game.id)),
            publisher: game.publisher_id.and_then(|id| companies.get(&id).cloned()),
            developer: game.developer_id.and_then(|id| companies.get(&id).cloned()),
            game,
        })
        .collect())
}
