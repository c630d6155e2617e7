//! Client tests against an in-process fake backend.
//! Each test starts its own server on an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use prom_api::{ApiClient, ApiError, ClientConfig, DeleteError, delete_account, load_summary};
use prom_core::{
    AdvanceError, AuthContext, DeckController, DeckStatus, DeletionGuard, Gender, Grade, Picture,
    ProfileWizard, Session, SwipeIntent, WizardError, WizardPhase,
};
use serde_json::{Value, json};

#[derive(Default)]
struct Backend {
    swipes: Vec<Value>,
    profiles: Vec<Value>,
    deletions: Vec<(String, Option<String>)>,
}

type Shared = Arc<Mutex<Backend>>;

fn profile(name: &str) -> Value {
    json!({
        "name": name,
        "bio": "Likes long walks to the vending machine.",
        "gender": "female",
        "grade": "senior",
        "hobbies": ["chess", "track"],
        "socials": {"instagram": "@someone"},
        "profile_pic_url": "",
        "personality": "x",
        "question_answers": {}
    })
}

fn candidate(user_id: &str, name: &str) -> Value {
    json!({
        "user_id": user_id,
        "profile": profile(name),
        "similarity_score": 0.835,
        "compatibility_percentage": 83.5
    })
}

async fn check(Path(id): Path<String>) -> Json<Value> {
    Json(json!({"exists": id == "known"}))
}

async fn matches(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({
        "matches": [{
            "match_id": "m1",
            "users": ["me", "t-match"],
            "created_at": "2026-04-01T18:00:00",
            "is_super_match": true,
            "other_user": profile("Avery")
        }, {
            "match_id": "m2",
            "users": ["me", "t-plain"],
            "is_super_match": null,
            "other_user": {
                "name": "Blake",
                "gender": "male",
                "grade": "junior",
                "bio": null,
                "hobbies": null,
                "socials": null
            }
        }]
    }))
}

async fn stats(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == "broken" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "stats unavailable"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"total_matches": 1, "super_matches": 1, "regular_matches": 0})),
    )
}

async fn recommendations(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({
        "recommendations": [
            candidate("t-match", "Avery"),
            candidate("t-plain", "Blake"),
            candidate("t-fail", "Casey"),
        ]
    }))
}

async fn swipe(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let target = body["target_user_id"].as_str().unwrap_or_default().to_string();
    state.lock().unwrap().swipes.push(body);
    match target.as_str() {
        "t-fail" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "db down"})),
        ),
        "t-match" => (
            StatusCode::OK,
            Json(json!({"match_created": true, "is_super_match": false})),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({"match_created": false, "is_super_match": false})),
        ),
    }
}

async fn create_profile(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let accepted = body["name"] != "Reject";
    state.lock().unwrap().profiles.push(body);
    Json(json!({"success": accepted}))
}

async fn delete_user(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let allowed = id != "locked" && auth.as_deref() == Some(format!("Bearer {id}").as_str());
    state.lock().unwrap().deletions.push((id, auth));
    if allowed {
        (StatusCode::OK, Json(json!({"message": "Account deleted"})))
    } else {
        (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "Not authorized to delete this account"})),
        )
    }
}

async fn spawn_backend() -> (String, Shared) {
    let state = Shared::default();
    let app = Router::new()
        .route("/users/profile/check/{id}", get(check))
        .route("/matches/{id}", get(matches))
        .route("/stats/{id}", get(stats))
        .route("/recommendations/{id}", get(recommendations))
        .route("/swipe", post(swipe))
        .route("/users/profile", post(create_profile))
        .route("/users/account/{id}", delete(delete_user))
        .with_state(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), state)
}

fn client_for(base: &str) -> ApiClient {
    let config = ClientConfig {
        api_base_url: base.to_string(),
        timeout_secs: 5,
        ..ClientConfig::default()
    };
    ApiClient::new(&config).unwrap()
}

/// A base URL nothing is listening on.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn swipe_right_on_first_of_three_shows_match() {
    let (base, backend) = spawn_backend().await;
    let client = client_for(&base);
    let auth = AuthContext::new("me");

    let candidates = client.recommendations(auth.user_id()).await.unwrap();
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0].compatibility_percentage, 83.5);

    let mut deck = DeckController::new(auth, &client, candidates);
    let result = deck.advance(SwipeIntent::Like).await.unwrap();

    assert!(result.match_created);
    assert!(!result.is_super_match);
    assert_eq!(deck.deck().cursor(), 1);
    assert_eq!(deck.overlay().profile().unwrap().name, "Avery");

    let swipes = &backend.lock().unwrap().swipes;
    assert_eq!(
        swipes[0],
        json!({"user_id": "me", "target_user_id": "t-match", "action": "yes"})
    );
}

#[tokio::test]
async fn server_error_on_swipe_still_advances() {
    let (base, backend) = spawn_backend().await;
    let client = client_for(&base);
    let candidates = client.recommendations("me").await.unwrap();
    let mut deck = DeckController::new(AuthContext::new("me"), &client, candidates);

    deck.advance(SwipeIntent::Pass).await.unwrap();
    deck.advance(SwipeIntent::SuperLike).await.unwrap();
    let err = deck.advance(SwipeIntent::Like).await.unwrap_err();

    assert!(matches!(err, AdvanceError::Submission(_)));
    assert!(err.to_string().contains("db down"));
    assert_eq!(deck.status(), DeckStatus::Exhausted);

    let swipes = &backend.lock().unwrap().swipes;
    let actions: Vec<_> = swipes.iter().map(|s| s["action"].clone()).collect();
    assert_eq!(actions, vec![json!("no"), json!("super"), json!("yes")]);
}

#[tokio::test]
async fn unreachable_backend_still_advances() {
    let client = client_for(&dead_url().await);
    let (base, _backend) = spawn_backend().await;
    let candidates = client_for(&base).recommendations("me").await.unwrap();

    let mut deck = DeckController::new(AuthContext::new("me"), &client, candidates);
    let err = deck.advance(SwipeIntent::Like).await.unwrap_err();

    assert!(matches!(err, AdvanceError::Submission(_)));
    assert_eq!(deck.deck().cursor(), 1);
    assert!(!deck.overlay().is_visible());
}

#[tokio::test]
async fn transport_errors_are_classified() {
    let client = client_for(&dead_url().await);
    let err = client.check_profile("me").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn profile_check() {
    let (base, _backend) = spawn_backend().await;
    let client = client_for(&base);
    assert!(client.check_profile("known").await.unwrap());
    assert!(!client.check_profile("newcomer").await.unwrap());
}

#[tokio::test]
async fn summary_joins_matches_and_stats() {
    let (base, _backend) = spawn_backend().await;
    let client = client_for(&base);

    let summary = load_summary(&client, &AuthContext::new("me")).await.unwrap();

    assert_eq!(summary.stats.total_matches, 1);
    assert_eq!(summary.matches.len(), 2);
    let other = summary.matches[0].other_user.as_ref().unwrap();
    assert_eq!(other.grade, Grade::Senior);
    assert_eq!(summary.super_matches().count(), 1);

    let sparse = summary.matches[1].other_user.as_ref().unwrap();
    assert!(sparse.hobbies.is_empty());
    assert!(sparse.socials.links().is_empty());
}

#[tokio::test]
async fn summary_fails_when_either_call_fails() {
    let (base, _backend) = spawn_backend().await;
    let client = client_for(&base);

    let err = load_summary(&client, &AuthContext::new("broken"))
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail.as_deref(), Some("stats unavailable"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn lowercase_confirmation_sends_nothing() {
    let (base, backend) = spawn_backend().await;
    let client = client_for(&base);
    let mut session = Session::new();
    session.sign_in("me");
    let mut guard = DeletionGuard::new();
    guard.type_text("delete");

    let err = delete_account(&client, &guard, &mut session)
        .await
        .unwrap_err();

    assert!(matches!(err, DeleteError::Unconfirmed(_)));
    assert_eq!(err.notice(), "Please type \"DELETE\" to confirm");
    assert!(backend.lock().unwrap().deletions.is_empty());
    assert!(session.is_signed_in());
}

#[tokio::test]
async fn confirmed_deletion_sends_bearer_and_signs_out() {
    let (base, backend) = spawn_backend().await;
    let client = client_for(&base);
    let mut session = Session::new();
    session.sign_in("me");
    let mut guard = DeletionGuard::new();
    guard.type_text("DELETE");

    let deleted = delete_account(&client, &guard, &mut session).await.unwrap();

    assert_eq!(deleted.user_id(), "me");
    assert!(!session.is_signed_in());
    assert_eq!(
        backend.lock().unwrap().deletions,
        vec![("me".to_string(), Some("Bearer me".to_string()))]
    );
}

#[tokio::test]
async fn deletion_failure_surfaces_detail() {
    let (base, _backend) = spawn_backend().await;
    let client = client_for(&base);
    let mut session = Session::new();
    session.sign_in("locked");
    let mut guard = DeletionGuard::new();
    guard.type_text("DELETE");

    let err = delete_account(&client, &guard, &mut session)
        .await
        .unwrap_err();

    assert_eq!(err.notice(), "Not authorized to delete this account");
    assert!(session.is_signed_in());

    let bare = ApiError::Status {
        status: 500,
        detail: None,
    };
    assert_eq!(DeleteError::Api(bare).notice(), "Failed to delete account");
}

fn filled_wizard(name: &str) -> ProfileWizard {
    let mut wizard = ProfileWizard::new();
    let draft = wizard.draft_mut();
    draft.name = name.to_string();
    draft.set_bio("Photographer for the yearbook.").unwrap();
    draft.gender = Some(Gender::Other);
    draft.grade = Some(Grade::Junior);
    draft.toggle_looking_for(Gender::Female);
    draft.toggle_looking_for(Gender::NonBinary);
    draft.add_hobby("photography");
    draft.add_hobby("climbing");
    draft.personality = "Curious about everything, especially other people's playlists.".to_string();
    draft
        .set_picture(Picture {
            mime: "image/png".to_string(),
            bytes: vec![137, 80, 78, 71],
        })
        .unwrap();
    for _ in 0..3 {
        wizard.next_step().unwrap();
    }
    wizard
}

#[tokio::test]
async fn wizard_submits_full_draft() {
    let (base, backend) = spawn_backend().await;
    let client = client_for(&base);
    let mut wizard = filled_wizard("Morgan");

    wizard
        .submit(&AuthContext::new("me"), &client)
        .await
        .unwrap();

    assert_eq!(wizard.phase(), WizardPhase::Completed);
    let profiles = &backend.lock().unwrap().profiles;
    let body = &profiles[0];
    assert_eq!(body["user_id"], "me");
    assert_eq!(body["looking_for"], json!(["female", "non-binary"]));
    assert_eq!(body["profile_pic_url"], "data:image/png;base64,iVBORw==");
    assert_eq!(body["question_answers"].as_object().unwrap().len(), 5);
}

#[tokio::test]
async fn wizard_keeps_draft_when_rejected_or_unreachable() {
    let (base, _backend) = spawn_backend().await;
    let mut wizard = filled_wizard("Reject");

    let err = wizard
        .submit(&AuthContext::new("me"), &client_for(&base))
        .await
        .unwrap_err();
    assert!(matches!(err, WizardError::Rejected));

    let err = wizard
        .submit(&AuthContext::new("me"), &client_for(&dead_url().await))
        .await
        .unwrap_err();
    assert!(matches!(err, WizardError::Submission(_)));
    assert_eq!(wizard.draft().name, "Reject");
    assert!(wizard.can_submit());
}
