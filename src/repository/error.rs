use std::fmt;

use sea_orm::{ColumnTrait, DbErr, IdenStatic, Iterable};

use super::SoftDeleteEntity;

/// Relationship slot on a video game that an id was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Genre,
    Platform,
    Publisher,
    Developer,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Genre => "genre",
            Self::Platform => "platform",
            Self::Publisher => "publisher",
            Self::Developer => "developer",
        };
        f.write_str(name)
    }
}

/// Rejected relationship input. Raised before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one {0} id is required")]
    Empty(Link),
    #[error("unknown {link} id(s): {ids:?}")]
    Missing { link: Link, ids: Vec<i32> },
}

/// Errors surfaced by the repositories.
///
/// Missing rows are not errors: id-keyed operations report them as `false` or
/// `None` so callers check rather than catch.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A read failed, usually because stored data no longer matches the entity
    /// definition (e.g. a null in a non-nullable column). `required` lists the
    /// non-nullable properties of `entity`. Not retryable.
    #[error(
        "error loading {entity}{}: {source}; check required properties for nulls or \
         malformed values: {}",
        id_suffix(.id),
        .required.join(", ")
    )]
    DataIntegrity {
        entity: &'static str,
        id: Option<i32>,
        required: Vec<&'static str>,
        #[source]
        source: DbErr,
    },

    /// A write was rejected by the store (constraint violation, lost connection, ...).
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl RepositoryError {
    /// Wrap a failed read of `E` with the id it was loading and the
    /// properties `E` requires.
    pub(crate) fn data_integrity<E: SoftDeleteEntity>(id: Option<i32>, source: DbErr) -> Self {
        let required = required_properties::<E>();
        tracing::error!(
            entity = E::NAME,
            id,
            ?required,
            error = %source,
            "query failed; a column may hold a value the entity definition does not allow"
        );
        Self::DataIntegrity {
            entity: E::NAME,
            id,
            required,
            source,
        }
    }

    /// The validation failure carried by this error, if any.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Column names of `E` declared non-nullable.
fn required_properties<E: SoftDeleteEntity>() -> Vec<&'static str> {
    E::Column::iter()
        .filter(|column| !column.def().is_null())
        .map(|column| column.as_str())
        .collect()
}

#[allow(clippy::ref_option)]
fn id_suffix(id: &Option<i32>) -> String {
    id.map(|id| format!(" with id {id}")).unwrap_or_default()
}
