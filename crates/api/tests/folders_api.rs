//! HTTP-level integration tests for `/api/folders`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_named, create_note, delete_auth, get_auth, post_json_auth, put_json_auth,
    signup,
};
use serde_json::json;

#[tokio::test]
async fn create_returns_201_with_location() {
    let app = common::build_test_app();
    let token = signup(&app, "alice").await;

    let response = post_json_auth(&app, "/api/folders", json!({ "name": "Work" }), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()["location"].to_str().unwrap().to_string();
    let folder = body_json(response).await;
    assert_eq!(folder["name"], "Work");
    assert_eq!(location, format!("/api/folders/{}", folder["id"].as_str().unwrap()));
    assert!(folder["createdAt"].is_string());
    assert!(folder["updatedAt"].is_string());
}

#[tokio::test]
async fn list_is_sorted_by_name() {
    let app = common::build_test_app();
    let token = signup(&app, "alice").await;
    for name in ["Recipes", "Archive", "Ideas"] {
        create_named(&app, "folders", name, &token).await;
    }

    let response = get_auth(&app, "/api/folders", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let names: Vec<String> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Archive", "Ideas", "Recipes"]);
}

#[tokio::test]
async fn missing_or_blank_name_is_400() {
    let app = common::build_test_app();
    let token = signup(&app, "alice").await;

    for body in [json!({}), json!({ "name": "" }), json!({ "name": "   " })] {
        let response = post_json_auth(&app, "/api/folders", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "Missing `name` in request body");
    }
}

#[tokio::test]
async fn duplicate_name_is_per_user() {
    let app = common::build_test_app();
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;

    create_named(&app, "folders", "X", &alice).await;
    let response = post_json_auth(&app, "/api/folders", json!({ "name": "X" }), &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_NAME");
    assert_eq!(json["message"], "The folder name already exists");

    create_named(&app, "folders", "X", &bob).await;
}

#[tokio::test]
async fn get_by_id_and_errors() {
    let app = common::build_test_app();
    let token = signup(&app, "alice").await;
    let folder = create_named(&app, "folders", "Work", &token).await;
    let id = folder["id"].as_str().unwrap();

    let response = get_auth(&app, &format!("/api/folders/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, folder);

    let response = get_auth(&app, "/api/folders/not-an-id", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_ID");

    let missing = "0190a000-0000-7000-8000-000000000000";
    let response = get_auth(&app, &format!("/api/folders/{missing}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_users_folders_are_invisible() {
    let app = common::build_test_app();
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;
    let folder = create_named(&app, "folders", "Private", &alice).await;
    let uri = format!("/api/folders/{}", folder["id"].as_str().unwrap());

    let response = get_auth(&app, "/api/folders", &bob).await;
    assert_eq!(body_json(response).await, json!([]));

    let response = get_auth(&app, &uri, &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(&app, &uri, json!({ "name": "Mine now" }), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Reported as success, but nothing is deleted.
    let response = delete_auth(&app, &uri, &bob).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(&app, &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn rename_updates_name_and_rejects_duplicates() {
    let app = common::build_test_app();
    let token = signup(&app, "alice").await;
    let a = create_named(&app, "folders", "a", &token).await;
    create_named(&app, "folders", "b", &token).await;
    let uri = format!("/api/folders/{}", a["id"].as_str().unwrap());

    let response = put_json_auth(&app, &uri, json!({ "name": "c" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "c");

    let response = put_json_auth(&app, &uri, json!({ "name": "b" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_NAME");

    let response = put_json_auth(&app, &uri, json!({ "name": "" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_folder_leaves_notes_pointing_at_it() {
    let app = common::build_test_app();
    let token = signup(&app, "alice").await;
    let folder = create_named(&app, "folders", "Work", &token).await;
    let folder_id = folder["id"].as_str().unwrap();
    let note = create_note(&app, json!({ "title": "T", "folderId": folder_id }), &token).await;

    let response = delete_auth(&app, &format!("/api/folders/{folder_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let uri = format!("/api/notes/{}", note["id"].as_str().unwrap());
    let note = body_json(get_auth(&app, &uri, &token).await).await;
    assert_eq!(note["folderId"], folder_id);
}
