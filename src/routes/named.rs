//! Routes shared by the name-only lookup resources: genres, platforms and companies.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::entities::{company, genre, platform};
use crate::error::AppError;
use crate::repository::{EntityRepository, Repository};
use crate::services::EntityService;
use crate::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

/// A catalogue resource identified by a unique name.
pub trait NamedResource: Send + Sync + 'static {
    type Model: Send + Sync + 'static;
    type Repo: EntityRepository<Create = Self::Model, Update = Self::Model, Record = Self::Model>
        + 'static;

    /// Singular label used in error messages.
    const LABEL: &'static str;
    const MAX_NAME_LEN: usize;

    fn service(state: &AppState) -> &EntityService<Self::Repo>;
    fn model(id: i32, name: String) -> Self::Model;
    fn view(model: &Self::Model) -> NamedResponse;
}

pub struct Genres;
pub struct Platforms;
pub struct Companies;

macro_rules! named_resource {
    ($resource:ident, $module:ident, $field:ident, $label:literal, $max:literal) => {
        impl NamedResource for $resource {
            type Model = $module::Model;
            type Repo = Repository<$module::Entity>;

            const LABEL: &'static str = $label;
            const MAX_NAME_LEN: usize = $max;

            fn service(state: &AppState) -> &EntityService<Self::Repo> {
                &state.services.$field
            }

            fn model(id: i32, name: String) -> Self::Model {
                $module::Model {
                    id,
                    name,
                    is_deleted: false,
                    deleted_at: None,
                }
            }

            fn view(model: &Self::Model) -> NamedResponse {
                NamedResponse {
                    id: model.id,
                    name: model.name.clone(),
                    is_deleted: model.is_deleted,
                    deleted_at: model.deleted_at.map(|at| at.to_rfc3339()),
                }
            }
        }
    };
}

named_resource!(Genres, genre, genres, "Genre", 100);
named_resource!(Platforms, platform, platforms, "Platform", 100);
named_resource!(Companies, company, companies, "Company", 200);

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Build the route group for one named resource.
pub fn router<R: NamedResource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route("/all-including-deleted", get(list_including_deleted::<R>))
        .route(
            "/{id}",
            get(get_one::<R>).put(update::<R>).delete(soft_delete::<R>),
        )
        .route("/restore/{id}", put(restore::<R>))
        .route("/full-delete/{id}", delete(hard_delete::<R>))
}

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedResponse {
    pub id: i32,
    pub name: String,
    pub is_deleted: bool,
    pub deleted_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct NameRequest {
    name: String,
}

/// Trimmed name, or a validation error when blank or longer than `max` characters.
fn validated_name(label: &str, name: &str, max: usize) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "{label} name is required"
        )));
    }
    if name.chars().count() > max {
        return Err(AppError::UnprocessableEntity(format!(
            "{label} name must be at most {max} characters"
        )));
    }
    Ok(name.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

async fn list<R: NamedResource>(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = R::service(&state).list_active().await?;
    Ok(Json(ListResponse {
        items: rows.iter().map(R::view).collect(),
    }))
}

async fn list_including_deleted<R: NamedResource>(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = R::service(&state).list_including_deleted().await?;
    Ok(Json(ListResponse {
        items: rows.iter().map(R::view).collect(),
    }))
}

async fn get_one<R: NamedResource>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let row = R::service(&state)
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(R::LABEL, id))?;
    Ok(Json(R::view(&row)))
}

async fn create<R: NamedResource>(
    State(state): State<AppState>,
    Json(req): Json<NameRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = validated_name(R::LABEL, &req.name, R::MAX_NAME_LEN)?;
    let row = R::service(&state).add(R::model(0, name)).await?;
    Ok((StatusCode::CREATED, Json(R::view(&row))))
}

async fn update<R: NamedResource>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<NameRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = validated_name(R::LABEL, &req.name, R::MAX_NAME_LEN)?;
    if R::service(&state).update(R::model(id, name)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(R::LABEL, id))
    }
}

async fn soft_delete<R: NamedResource>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if R::service(&state).soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(R::LABEL, id))
    }
}

async fn restore<R: NamedResource>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if R::service(&state).restore(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No deleted {} with id {id}",
            R::LABEL.to_lowercase()
        )))
    }
}

async fn hard_delete<R: NamedResource>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if R::service(&state).hard_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(R::LABEL, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        assert!(matches!(
            validated_name("Genre", "  RPG ", 100),
            Ok(name) if name == "RPG"
        ));
    }

    #[test]
    fn blank_and_overlong_names_are_rejected() {
        assert!(validated_name("Genre", "   ", 100).is_err());
        assert!(validated_name("Genre", &"x".repeat(101), 100).is_err());
        assert!(validated_name("Company", &"x".repeat(200), 200).is_ok());
    }
}
