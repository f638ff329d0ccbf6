#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use sea_orm::{ActiveValue, ConnectionTrait};

use videogame_catalogue::entities::{company, genre};
use videogame_catalogue::repository::{EntityRepository, Repository, RepositoryError};

// ─────────────────────────────────────────────────────────────────────────────
// Test Infrastructure
// ─────────────────────────────────────────────────────────────────────────────

async fn genres() -> Repository<genre::Entity> {
    Repository::new(common::test_db().await)
}

fn new_genre(name: &str) -> genre::Model {
    genre::Model {
        id: 0,
        name: name.to_string(),
        is_deleted: false,
        deleted_at: None,
    }
}

async fn seed(repo: &Repository<genre::Entity>, names: &[&str]) -> Vec<i32> {
    let mut ids = Vec::new();
    for name in names {
        ids.push(repo.add(new_genre(name)).await.unwrap().id);
    }
    ids
}

fn names(rows: &[genre::Model]) -> Vec<&str> {
    rows.iter().map(|row| row.name.as_str()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Reads
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_assigns_id_and_starts_active() {
    let repo = genres().await;

    let added = repo.add(new_genre("RPG")).await.unwrap();

    assert!(added.id > 0);
    assert!(!added.is_deleted);
    assert!(added.deleted_at.is_none());
    assert_eq!(repo.get_by_id(added.id).await.unwrap(), Some(added));
}

#[tokio::test]
async fn add_flagged_deleted_gets_a_timestamp() {
    let repo = genres().await;

    let mut draft = new_genre("Legacy");
    draft.is_deleted = true;
    let added = repo.add(draft).await.unwrap();

    assert!(added.is_deleted);
    assert!(added.deleted_at.is_some());
    assert!(repo.get_by_id(added.id).await.unwrap().is_none());
}

#[tokio::test]
async fn listings_split_on_delete_state_in_id_order() {
    let repo = genres().await;
    let ids = seed(&repo, &["Action", "Puzzle", "Racing"]).await;

    assert!(repo.soft_delete(ids[1]).await.unwrap());

    let active = repo.list_active().await.unwrap();
    assert_eq!(names(&active), ["Action", "Racing"]);

    let all = repo.list_including_deleted().await.unwrap();
    assert_eq!(names(&all), ["Action", "Puzzle", "Racing"]);
    assert!(all[1].is_deleted);
}

#[tokio::test]
async fn get_by_id_hides_soft_deleted_and_unknown_rows() {
    let repo = genres().await;
    let ids = seed(&repo, &["Horror"]).await;

    assert!(repo.get_by_id(999).await.unwrap().is_none());

    repo.soft_delete(ids[0]).await.unwrap();
    assert!(repo.get_by_id(ids[0]).await.unwrap().is_none());
}

#[tokio::test]
async fn tracked_rows_persist_edits() {
    let repo = genres().await;
    let ids = seed(&repo, &["Shmup", "Platformer"]).await;
    repo.soft_delete(ids[1]).await.unwrap();

    let tracked = repo.list_active_tracked().await.unwrap();
    assert_eq!(tracked.len(), 1);

    let mut row = tracked.into_iter().next().unwrap();
    row.name = ActiveValue::Set("Shoot 'em up".to_string());
    let saved = repo.save_tracked(row).await.unwrap();

    assert_eq!(saved.id, ids[0]);
    assert_eq!(
        repo.get_by_id(ids[0]).await.unwrap().unwrap().name,
        "Shoot 'em up"
    );
}

#[tokio::test]
async fn tracked_save_discards_delete_flag_edits() {
    let repo = genres().await;
    let ids = seed(&repo, &["Action"]).await;

    let mut row = repo.list_active_tracked().await.unwrap().remove(0);
    row.name = ActiveValue::Set("Action-Adventure".to_string());
    row.is_deleted = ActiveValue::Set(true);
    let saved = repo.save_tracked(row).await.unwrap();

    assert_eq!(saved.name, "Action-Adventure");
    assert!(!saved.is_deleted);
    assert!(saved.deleted_at.is_none());

    let stored = repo.list_including_deleted().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, ids[0]);
    assert!(!stored[0].is_deleted);
    assert!(stored[0].deleted_at.is_none());
}

#[tokio::test]
async fn tracked_save_keeps_stored_deletion() {
    let repo = genres().await;
    let ids = seed(&repo, &["Arcade"]).await;
    repo.soft_delete(ids[0]).await.unwrap();
    let deleted = repo.list_including_deleted().await.unwrap().remove(0);

    let mut row = genre::ActiveModel::from(deleted.clone());
    row.name = ActiveValue::Set("Arcade Classics".to_string());
    row.is_deleted = ActiveValue::Set(false);
    row.deleted_at = ActiveValue::Set(None);
    repo.save_tracked(row).await.unwrap();

    let stored = repo.list_including_deleted().await.unwrap().remove(0);
    assert_eq!(stored.name, "Arcade Classics");
    assert!(stored.is_deleted);
    assert_eq!(stored.deleted_at, deleted.deleted_at);
}

#[tokio::test]
async fn get_by_id_including_deleted_sees_every_row() {
    let repo = genres().await;
    let ids = seed(&repo, &["Visual Novel"]).await;
    repo.soft_delete(ids[0]).await.unwrap();

    let found = repo.get_by_id_including_deleted(ids[0]).await.unwrap().unwrap();
    assert!(found.is_deleted);
    assert!(repo.get_by_id_including_deleted(999).await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_stored_value_surfaces_as_data_integrity() {
    let repo = genres().await;
    seed(&repo, &["Strategy"]).await;
    repo.connection()
        .execute_unprepared("UPDATE genre SET is_deleted = 1, deleted_at = 'not a timestamp'")
        .await
        .unwrap();

    let err = repo.list_including_deleted().await.unwrap_err();

    assert!(
        matches!(
            &err,
            RepositoryError::DataIntegrity { entity: "Genre", id: None, required, .. }
                if required == &["id", "name", "is_deleted"]
        ),
        "{err:?}"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Writes
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_fields_but_keeps_delete_state() {
    let repo = genres().await;
    let ids = seed(&repo, &["Sim"]).await;
    repo.soft_delete(ids[0]).await.unwrap();
    let before = repo.list_including_deleted().await.unwrap().remove(0);

    let mut change = new_genre("Simulation");
    change.id = ids[0];
    assert!(repo.update(change).await.unwrap());

    let after = repo.list_including_deleted().await.unwrap().remove(0);
    assert_eq!(after.name, "Simulation");
    assert!(after.is_deleted);
    assert_eq!(after.deleted_at, before.deleted_at);
}

#[tokio::test]
async fn update_unknown_id_returns_false() {
    let repo = genres().await;
    let mut change = new_genre("Nothing");
    change.id = 42;

    assert!(!repo.update(change).await.unwrap());
    assert!(repo.list_including_deleted().await.unwrap().is_empty());
}

#[tokio::test]
async fn soft_delete_is_idempotent_and_keeps_first_timestamp() {
    let repo = genres().await;
    let ids = seed(&repo, &["Fighting"]).await;

    assert!(repo.soft_delete(ids[0]).await.unwrap());
    let first = repo.list_including_deleted().await.unwrap()[0].deleted_at;
    assert!(first.is_some());

    assert!(repo.soft_delete(ids[0]).await.unwrap());
    let second = repo.list_including_deleted().await.unwrap()[0].deleted_at;
    assert_eq!(first, second);
}

#[tokio::test]
async fn soft_delete_unknown_id_returns_false() {
    let repo = genres().await;
    assert!(!repo.soft_delete(7).await.unwrap());
}

#[tokio::test]
async fn restore_only_succeeds_for_deleted_rows() {
    let repo = genres().await;
    let ids = seed(&repo, &["Stealth"]).await;

    assert!(!repo.restore(ids[0]).await.unwrap(), "active row");
    assert!(!repo.restore(999).await.unwrap(), "unknown row");

    repo.soft_delete(ids[0]).await.unwrap();
    assert!(repo.restore(ids[0]).await.unwrap());

    let restored = repo.get_by_id(ids[0]).await.unwrap().unwrap();
    assert!(!restored.is_deleted);
    assert!(restored.deleted_at.is_none());

    assert!(!repo.restore(ids[0]).await.unwrap(), "already restored");
}

#[tokio::test]
async fn hard_delete_removes_rows_in_any_state() {
    let repo = genres().await;
    let ids = seed(&repo, &["Sports", "Music"]).await;
    repo.soft_delete(ids[1]).await.unwrap();

    assert!(repo.hard_delete(ids[0]).await.unwrap());
    assert!(repo.hard_delete(ids[1]).await.unwrap());
    assert!(!repo.hard_delete(ids[1]).await.unwrap());

    assert!(repo.list_including_deleted().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_names_are_rejected_by_the_store() {
    let repo: Repository<company::Entity> = Repository::new(common::test_db().await);
    let company = company::Model {
        id: 0,
        name: "Nintendo".to_string(),
        is_deleted: false,
        deleted_at: None,
    };

    repo.add(company.clone()).await.unwrap();
    let err = repo.add(company).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Database(_)), "{err:?}");
}
