mod common;

use axum::Router;
use axum::http::StatusCode;
use serde_json::json;

async fn create(app: &Router, resource: &str, name: &str) -> i64 {
    let (status, body) =
        common::post_json(app, &format!("/api/v1/{resource}"), &json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    common::json(&body)["id"].as_i64().unwrap_or_default()
}

#[tokio::test]
async fn genre_lifecycle_over_http() {
    let app = common::test_app().await;
    let id = create(&app, "genres", "Roguelike").await;

    let (status, body) = common::get(&app, &format!("/api/v1/genres/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let genre = common::json(&body);
    assert_eq!(genre["name"], "Roguelike");
    assert_eq!(genre["isDeleted"], false);
    assert!(genre["deletedAt"].is_null());

    let (status, _) = common::delete(&app, &format!("/api/v1/genres/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::get(&app, &format!("/api/v1/genres/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = common::get(&app, "/api/v1/genres").await;
    assert_eq!(common::json(&body)["items"], json!([]));

    let (_, body) = common::get(&app, "/api/v1/genres/all-including-deleted").await;
    let items = common::json(&body)["items"].clone();
    assert_eq!(items[0]["isDeleted"], true);
    assert!(items[0]["deletedAt"].is_string());

    let (status, _) = common::put(&app, &format!("/api/v1/genres/restore/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = common::put(&app, &format!("/api/v1/genres/restore/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::delete(&app, &format!("/api/v1/genres/full-delete/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = common::delete(&app, &format!("/api/v1/genres/full-delete/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn platform_rename_and_missing_targets() {
    let app = common::test_app().await;
    let id = create(&app, "platforms", "Switch").await;

    let (status, _) = common::put_json(
        &app,
        &format!("/api/v1/platforms/{id}"),
        &json!({ "name": "Nintendo Switch" }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = common::get(&app, &format!("/api/v1/platforms/{id}")).await;
    assert_eq!(common::json(&body)["name"], "Nintendo Switch");

    let (status, body) =
        common::put_json(&app, "/api/v1/platforms/999", &json!({ "name": "Ghost" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(common::json(&body)["error"]["code"], "NOT_FOUND");

    let (status, _) = common::delete(&app, "/api/v1/platforms/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_company_name_conflicts() {
    let app = common::test_app().await;
    create(&app, "companies", "Capcom").await;

    let (status, body) =
        common::post_json(&app, "/api/v1/companies", &json!({ "name": "Capcom" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(common::json(&body)["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn invalid_names_are_rejected() {
    let app = common::test_app().await;

    let (status, body) =
        common::post_json(&app, "/api/v1/genres", &json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(common::json(&body)["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = common::post_json(
        &app,
        "/api/v1/platforms",
        &json!({ "name": "x".repeat(101) }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = common::post_json(
        &app,
        "/api/v1/companies",
        &json!({ "name": "x".repeat(150) }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
