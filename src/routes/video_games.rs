use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::video_game;
use crate::error::AppError;
use crate::repository::{VideoGameDetails, VideoGameDraft};
use crate::routes::named::{Companies, Genres, ListResponse, NamedResource, NamedResponse, Platforms};
use crate::state::AppState;

const TITLE_MAX: usize = 200;
const SYNOPSIS_MAX: usize = 1000;
const CONTENT_TYPE_MAX: usize = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Build the video game route group: `/video-games/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_games).post(create_game))
        .route("/all-including-deleted", get(list_all_games))
        .route(
            "/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        .route("/restore/{id}", put(restore_game))
        .route("/full-delete/{id}", delete(purge_game))
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoGameRequest {
    title: String,
    synopsis: String,
    release_date: NaiveDate,
    user_score: i32,
    #[serde(default)]
    genre_ids: Vec<i32>,
    #[serde(default)]
    platform_ids: Vec<i32>,
    publisher_id: Option<i32>,
    developer_id: Option<i32>,
    cover_image_base64: Option<String>,
    cover_image_content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateVideoGameRequest {
    id: i32,
    #[serde(default)]
    overwrite_cover_image: bool,
    #[serde(flatten)]
    game: VideoGameRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoGameResponse {
    id: i32,
    title: String,
    synopsis: String,
    release_date: NaiveDate,
    user_score: i32,
    genres: Vec<NamedResponse>,
    platforms: Vec<NamedResponse>,
    publisher: Option<NamedResponse>,
    developer: Option<NamedResponse>,
    cover_image_base64: Option<String>,
    cover_image_content_type: Option<String>,
    is_deleted: bool,
    deleted_at: Option<String>,
}

impl From<VideoGameDetails> for VideoGameResponse {
    fn from(details: VideoGameDetails) -> Self {
        let VideoGameDetails {
            game,
            genres,
            platforms,
            publisher,
            developer,
        } = details;

        Self {
            id: game.id,
            title: game.title,
            synopsis: game.synopsis,
            release_date: game.release_date,
            user_score: game.user_score,
            genres: genres.iter().map(<Genres as NamedResource>::view).collect(),
            platforms: platforms
                .iter()
                .map(<Platforms as NamedResource>::view)
                .collect(),
            publisher: publisher.as_ref().map(<Companies as NamedResource>::view),
            developer: developer.as_ref().map(<Companies as NamedResource>::view),
            cover_image_base64: game.cover_image.map(|bytes| BASE64.encode(bytes)),
            cover_image_content_type: game.cover_image_content_type,
            is_deleted: game.is_deleted,
            deleted_at: game.deleted_at.map(|at| at.to_rfc3339()),
        }
    }
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(AppError::UnprocessableEntity(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

impl VideoGameRequest {
    /// Validate the payload and convert it into a repository draft for `id`.
    fn into_draft(self, id: i32) -> Result<VideoGameDraft, AppError> {
        check_text("title", &self.title, TITLE_MAX)?;
        check_text("synopsis", &self.synopsis, SYNOPSIS_MAX)?;
        if !(0..=100).contains(&self.user_score) {
            return Err(AppError::UnprocessableEntity(
                "userScore must be between 0 and 100".to_string(),
            ));
        }
        if let Some(content_type) = &self.cover_image_content_type {
            check_text("coverImageContentType", content_type, CONTENT_TYPE_MAX)?;
        }

        let cover_image = self
            .cover_image_base64
            .as_deref()
            .map(|encoded| BASE64.decode(encoded.trim()))
            .transpose()
            .map_err(|_| AppError::BadRequest("coverImageBase64 is not valid base64".to_string()))?;

        Ok(VideoGameDraft {
            game: video_game::Model {
                id,
                title: self.title.trim().to_string(),
                synopsis: self.synopsis.trim().to_string(),
                release_date: self.release_date,
                user_score: self.user_score,
                publisher_id: self.publisher_id,
                developer_id: self.developer_id,
                cover_image: None,
                cover_image_content_type: None,
                is_deleted: false,
                deleted_at: None,
            },
            genre_ids: self.genre_ids,
            platform_ids: self.platform_ids,
            publisher_id: self.publisher_id,
            developer_id: self.developer_id,
            cover_image,
            cover_image_content_type: self.cover_image_content_type,
        })
    }
}

fn response_list(rows: Vec<VideoGameDetails>) -> ListResponse<VideoGameResponse> {
    ListResponse {
        items: rows.into_iter().map(VideoGameResponse::from).collect(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /video-games`: Active games with their relationships.
async fn list_games(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.services.video_games.list_active().await?;
    Ok(Json(response_list(rows)))
}

/// `GET /video-games/all-including-deleted`
async fn list_all_games(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.services.video_games.list_including_deleted().await?;
    Ok(Json(response_list(rows)))
}

/// `GET /video-games/{id}`
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let details = state
        .services
        .video_games
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Video game", id))?;
    Ok(Json(VideoGameResponse::from(details)))
}

/// `POST /video-games`: Create a game with its genre/platform links.
async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<VideoGameRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = req.into_draft(0)?;
    let details = state
        .services
        .video_games
        .add_with_relationships(draft)
        .await?;
    Ok((StatusCode::CREATED, Json(VideoGameResponse::from(details))))
}

/// `PUT /video-games/{id}`: Replace fields and relationships.
async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateVideoGameRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.id != id {
        return Err(AppError::BadRequest(format!(
            "Route id {id} does not match payload id {}",
            req.id
        )));
    }

    let draft = req.game.into_draft(id)?;
    let details = state
        .services
        .video_games
        .update_with_relationships(draft, req.overwrite_cover_image)
        .await?
        .ok_or_else(|| AppError::not_found("Video game", id))?;
    Ok(Json(VideoGameResponse::from(details)))
}

/// `DELETE /video-games/{id}`: Soft delete.
async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if state.services.video_games.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Video game", id))
    }
}

/// `PUT /video-games/restore/{id}`
async fn restore_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if state.services.video_games.restore(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("No deleted video game with id {id}")))
    }
}

/// `DELETE /video-games/full-delete/{id}`: Permanent delete; join rows cascade.
async fn purge_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if state.services.video_games.hard_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Video game", id))
    }
}
