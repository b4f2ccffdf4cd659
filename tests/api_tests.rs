// tests/api_tests.rs

use backend::{config::Config, routes, state::AppState, utils::jwt::sign_jwt};
use sqlx::sqlite::SqlitePoolOptions;

const TEST_JWT_SECRET: &str = "test_secret_for_integration_tests";

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        rust_log: "error".to_string(),
    };

    let state = AppState { pool, config };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn sync_user(
    client: &reqwest::Client,
    address: &str,
    id: &str,
    first_name: &str,
    last_name: &str,
    role: &str,
) {
    let response = client
        .post(format!("{}/api/users/sync", address))
        .json(&serde_json::json!({
            "id": id,
            "firstName": first_name,
            "lastName": last_name,
            "email": format!("{}@example.com", id),
            "role": role
        }))
        .send()
        .await
        .expect("Failed to sync user");
    assert_eq!(response.status().as_u16(), 200);
}

async fn add_note(
    client: &reqwest::Client,
    address: &str,
    user_id: &str,
    title: &str,
    is_public: bool,
) -> i64 {
    let response = client
        .post(format!("{}/api/notes/add", address))
        .json(&serde_json::json!({
            "title": title,
            "content": format!("Content of {}", title),
            "user_id": user_id,
            "isPublic": is_public
        }))
        .send()
        .await
        .expect("Failed to add note");
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    body["notes"]["id"].as_i64().expect("note id missing")
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn notes_visibility_filtering() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let user = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    add_note(&client, &address, &user, "Public note", true).await;
    add_note(&client, &address, &user, "Private note", false).await;

    let mine: Vec<serde_json::Value> = client
        .get(format!("{}/api/notes?user_id={}", address, user))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);

    let public: Vec<serde_json::Value> = client
        .get(format!("{}/api/notes/public", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let mine_public: Vec<&serde_json::Value> = public
        .iter()
        .filter(|n| n["user_id"].as_str() == Some(user.as_str()))
        .collect();
    assert_eq!(mine_public.len(), 1);
    assert_eq!(mine_public[0]["title"], "Public note");
    assert_eq!(mine_public[0]["isPublic"], 1);

    // Listing without a user id is rejected before touching the store.
    let response = client
        .get(format!("{}/api/notes", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn note_validation_rejects_empty_title() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/notes/add", address))
        .json(&serde_json::json!({
            "title": "",
            "content": "body",
            "user_id": "u_validation"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn note_content_is_sanitized() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let user = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    let response = client
        .post(format!("{}/api/notes/add", address))
        .json(&serde_json::json!({
            "title": "XSS attempt",
            "content": "hello <script>alert(1)</script> world",
            "user_id": user,
            "isPublic": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let notes: Vec<serde_json::Value> = client
        .get(format!("{}/api/notes?user_id={}", address, user))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let content = notes[0]["content"].as_str().unwrap();
    assert!(!content.contains("<script>"));
    assert!(content.contains("hello"));
}

#[tokio::test]
async fn note_counters_increment() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let user = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let note_id = add_note(&client, &address, &user, "Counted note", true).await;

    for expected in 1..=2 {
        let body: serde_json::Value = client
            .post(format!("{}/api/notes/{}/view", address, note_id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["view_count"].as_i64().unwrap(), expected);
    }

    let body: serde_json::Value = client
        .post(format!("{}/api/notes/{}/download", address, note_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["download_count"].as_i64().unwrap(), 1);

    let body: serde_json::Value = client
        .post(format!("{}/api/notes/public/{}/view", address, note_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["other_user_view_count"].as_i64().unwrap(), 1);

    let body: serde_json::Value = client
        .post(format!("{}/api/notes/public/{}/download", address, note_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["other_user_download_count"].as_i64().unwrap(), 1);

    // Counters on a missing note are a 404, not a silent create.
    let response = client
        .post(format!("{}/api/notes/99999/view", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn note_update_and_soft_delete() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let user = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let note_id = add_note(&client, &address, &user, "Original title", false).await;

    let response = client
        .post(format!("{}/api/notes/update-note", address))
        .json(&serde_json::json!({
            "id": note_id,
            "title": "Updated title",
            "content": "Updated content",
            "isPublic": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let notes: Vec<serde_json::Value> = client
        .get(format!("{}/api/notes?user_id={}", address, user))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notes[0]["title"], "Updated title");
    assert_eq!(notes[0]["isPublic"], 1);

    // Updating a note that never existed is a 404.
    let response = client
        .post(format!("{}/api/notes/update-note", address))
        .json(&serde_json::json!({
            "id": 99999,
            "title": "x",
            "content": "y",
            "isPublic": false
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    // Soft delete hides the note from listings.
    let response = client
        .delete(format!("{}/api/notes/{}", address, note_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let notes: Vec<serde_json::Value> = client
        .get(format!("{}/api/notes?user_id={}", address, user))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(notes.is_empty());

    let response = client
        .delete(format!("{}/api/notes/99999", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn links_lifecycle() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let user = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    // A malformed URL is rejected.
    let response = client
        .post(format!("{}/api/links/addLink", address))
        .json(&serde_json::json!({
            "linktitle": "Broken",
            "url": "not a url",
            "linkcontent": "desc",
            "user_id": user,
            "isPublic": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(format!("{}/api/links/addLink", address))
        .json(&serde_json::json!({
            "linktitle": "Rust book",
            "url": "https://doc.rust-lang.org/book/",
            "linkcontent": "The book",
            "user_id": user,
            "isPublic": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let link_id = body["link"]["id"].as_i64().unwrap();

    let links: Vec<serde_json::Value> = client
        .get(format!("{}/api/links?user_id={}", address, user))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["linktitle"], "Rust book");

    let body: serde_json::Value = client
        .post(format!("{}/api/links/{}/view", address, link_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["view_count"].as_i64().unwrap(), 1);

    let response = client
        .delete(format!("{}/api/links/delete/{}", address, link_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let links: Vec<serde_json::Value> = client
        .get(format!("{}/api/links?user_id={}", address, user))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(links.is_empty());
}

#[tokio::test]
async fn user_sync_upserts() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    sync_user(&client, &address, &id, "Grace", "Hopper", "user").await;

    let user: serde_json::Value = client
        .get(format!("{}/api/users/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(user["firstName"], "Grace");
    assert_eq!(user["role"], "user");

    // A second sync updates in place instead of failing on the key.
    sync_user(&client, &address, &id, "Grace", "Hopper", "admin").await;

    let user: serde_json::Value = client
        .get(format!("{}/api/users/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(user["role"], "admin");

    let response = client
        .get(format!("{}/api/users/nobody_here", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn admin_notes_listing_joins_author() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = format!("a_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let user = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    sync_user(&client, &address, &admin, "Alan", "Turing", "admin").await;
    sync_user(&client, &address, &user, "Regular", "Person", "user").await;

    add_note(&client, &address, &admin, "Admin shared", true).await;
    add_note(&client, &address, &admin, "Admin private", false).await;
    add_note(&client, &address, &user, "User shared", true).await;

    let notes: Vec<serde_json::Value> = client
        .get(format!("{}/api/admin-notes/public", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Admin shared");
    assert_eq!(notes[0]["firstName"], "Alan");
    assert_eq!(notes[0]["lastName"], "Turing");
}

#[tokio::test]
async fn authoring_routes_require_admin_role() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let quiz_body = serde_json::json!({
        "title": "Gated quiz",
        "description": "Should require admin",
        "noOfQue": 1
    });

    // No token
    let response = client
        .post(format!("{}/addQuiz", address))
        .json(&quiz_body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // Authenticated but not admin
    let user_token = sign_jwt("plain_user", "user", TEST_JWT_SECRET, 600).unwrap();
    let response = client
        .post(format!("{}/addQuiz", address))
        .bearer_auth(&user_token)
        .json(&quiz_body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    // Admin passes
    let admin_token = sign_jwt("admin_user", "admin", TEST_JWT_SECRET, 600).unwrap();
    let response = client
        .post(format!("{}/addQuiz", address))
        .bearer_auth(&admin_token)
        .json(&quiz_body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}
