use catalog_admin::announcements::{AnnouncementFilter, AnnouncementKind};
use catalog_admin::chatbot::ConfidenceBand;
use catalog_admin::forms::{AnnouncementDraft, QaPairDraft, SuggestionDraft};
use catalog_admin::prelude::*;
use catalog_admin::suggestions::{SuggestionQuery, SuggestionStatus};
use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sign_in_session_cookie_travels_with_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .and(body_json(json!({"username": "admin", "password": "hunter2"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=abc123; Path=/; HttpOnly")
                .set_body_json(json!({"message": "Signed in"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .and(header("cookie", "sid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let session = dashboard.auth().sign_in("admin", "hunter2").await.unwrap();
    assert_eq!(session.username, "admin");
    assert!(dashboard.auth().is_signed_in());

    dashboard.categories().load().await.unwrap();

    dashboard.auth().sign_out().await.unwrap();
    assert_eq!(dashboard.auth().session(), None);
}

#[tokio::test]
async fn failed_sign_in_shows_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let err = dashboard.auth().sign_in("admin", "wrong").await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(!dashboard.auth().is_signed_in());
}

#[tokio::test]
async fn upload_image_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/upload"))
        .and(body_string_contains("name=\"image\""))
        .and(body_string_contains("filename=\"logo.png\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"url": "https://cdn.example.com/logo.png"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let uploaded = dashboard
        .uploads()
        .upload_image(b"PNG image data".to_vec(), "logo.png", "image/png")
        .await
        .unwrap();

    assert_eq!(uploaded.url, "https://cdn.example.com/logo.png");
}

#[tokio::test]
async fn chatbot_test_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/test"))
        .and(body_json(json!({"message": "When do you open?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
            "message": "We open at 9",
            "confidence": 0.42,
            "analysis": {"intents": ["hours"], "keyPhrases": ["open"], "entities": {}},
            "matches": [{"question": "Opening hours?", "answer": "9 to 5", "score": 0.42}]
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let chatbot = dashboard.chatbot();

    assert!(chatbot.test("   ").await.unwrap_err().is_validation());

    let result = chatbot.test("When do you open?").await.unwrap();
    assert_eq!(result.band(), ConfidenceBand::Low);
    assert!(result.band().needs_tips());
    assert_eq!(result.matches[0].answer, "9 to 5");
}

#[tokio::test]
async fn manual_qa_entry_imports_single_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/import"))
        .and(body_json(json!([{
            "question": "Do you deliver?",
            "answer": "Yes, within 5 km",
            "category": "general",
            "keywords": ["delivery", "shipping"],
            "language": "en"
        }])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": [{
            "_id": "q1",
            "question": "Do you deliver?",
            "answer": "Yes, within 5 km"
        }]})))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let mut form: Form<QaPairDraft> = Form::create();
    form.update(|draft| QaPairDraft {
        question: "Do you deliver?".to_string(),
        answer: "Yes, within 5 km".to_string(),
        keywords: "delivery, shipping,".to_string(),
        ..draft
    });

    let notification = form.submit_to(&dashboard.chatbot()).await;
    assert_eq!(notification, Notification::success("QA pair added successfully"));
    assert_eq!(form.draft(), &QaPairDraft::default());
}

#[tokio::test]
async fn import_failure_uses_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/import"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let pairs =
        catalog_admin::chatbot::parse_import_file(r#"[{"question": "q", "answer": "a"}]"#).unwrap();
    let err = dashboard.chatbot().import(&pairs).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to import QA pairs");
}

fn announcement(id: &str, title: &str, kind: &str, expiry: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "type": kind,
        "content": "text",
        "expiryDate": expiry
    })
}

fn announcements_body() -> serde_json::Value {
    json!({"data": [
        announcement("a1", "Old", "info", "2020-01-01T00:00:00Z"),
        announcement("a2", "Sale", "success", "2099-01-01T00:00:00Z"),
        announcement("a3", "Outage", "alert", "2099-01-01T00:00:00Z")
    ]})
}

#[tokio::test]
async fn announcement_filters_and_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/announcements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(announcements_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/announcements/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            announcement("a2", "Sale", "success", "2099-01-01T00:00:00Z")
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let announcements = dashboard.announcements();
    announcements.load().await.unwrap();
    assert_eq!(announcements.visible_announcements().len(), 3);

    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let expired: Vec<String> = announcements
        .expired_at(now)
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(expired, vec!["a1"]);

    announcements.set_filter(AnnouncementFilter::Active).await.unwrap();
    assert_eq!(announcements.visible_announcements().len(), 1);

    announcements
        .set_filter(AnnouncementFilter::Kind(AnnouncementKind::Alert))
        .await
        .unwrap();
    let titles: Vec<String> = announcements
        .visible_announcements()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, vec!["Outage"]);

    // switching type only is local
    announcements
        .set_filter(AnnouncementFilter::Kind(AnnouncementKind::Info))
        .await
        .unwrap();
    assert_eq!(announcements.visible_announcements()[0].id, "a1");
}

#[tokio::test]
async fn purge_expired_requires_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/announcements/expired"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"deletedCount": 1}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/announcements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(announcements_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let announcements = dashboard.announcements();

    assert!(!announcements.purge_expired(Confirmation::Declined).await.unwrap());
    assert!(announcements.purge_expired(Confirmation::Confirmed).await.unwrap());
    assert_eq!(announcements.entities().len(), 3);
}

#[tokio::test]
async fn announcement_edit_is_seeded_from_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/announcements/a3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
            "_id": "a3", "title": "Outage", "type": "alert", "content": "z",
            "expiryDate": "2099-01-01T08:30:00Z"
        }})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/announcements/a3"))
        .and(body_json(json!({
            "title": "Outage resolved",
            "type": "success",
            "content": "z",
            "expiryDate": "2099-01-01T08:30:00Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
            "_id": "a3", "title": "Outage resolved", "type": "success", "content": "z",
            "expiryDate": "2099-01-01T08:30:00Z"
        }})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/announcements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let announcements = dashboard.announcements();

    let mut form = Form::<AnnouncementDraft>::fetch_edit(announcements.resource(), "a3")
        .await
        .unwrap();
    assert_eq!(form.draft().expiry, "2099-01-01T08:30");

    form.update(|draft| AnnouncementDraft {
        title: "Outage resolved".to_string(),
        kind: AnnouncementKind::Success,
        ..draft
    });
    let notification = form.submit(&announcements).await;
    assert_eq!(notification, Notification::success("Announcement updated successfully"));
}

#[tokio::test]
async fn suggestions_filter_and_edit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/suggestions"))
        .and(query_param("status", "under-review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{
            "_id": "s1",
            "title": "Dark mode",
            "description": "Please",
            "status": "under-review",
            "priority": "medium",
            "category": "feature",
            "comments": [{"text": "+1"}],
            "upvotes": ["u1", "u2"]
        }]})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/suggestions/s1"))
        .and(body_json(json!({
            "title": "Dark mode",
            "description": "Please",
            "status": "approved",
            "priority": "medium",
            "category": "feature"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
            "_id": "s1", "title": "Dark mode", "status": "approved"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let suggestions = dashboard.suggestions();
    suggestions
        .filter_by(SuggestionQuery {
            status: Some(SuggestionStatus::UnderReview),
            ..Default::default()
        })
        .await
        .unwrap();

    let loaded = &suggestions.entities()[0];
    assert_eq!((loaded.comment_count(), loaded.upvote_count()), (1, 2));

    let mut form: Form<SuggestionDraft> = Form::open_edit(&suggestions, "s1").unwrap();
    form.update(|draft| SuggestionDraft {
        status: SuggestionStatus::Approved,
        ..draft
    });
    let notification = form.submit(&suggestions).await;
    assert_eq!(notification, Notification::success("Suggestion updated successfully"));
}

#[tokio::test]
async fn suggestions_cannot_be_created() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dashboard = Dashboard::new(&server.uri()).unwrap();
    let suggestions = dashboard.suggestions();

    let mut form: Form<SuggestionDraft> = Form::create();
    form.update(|draft| SuggestionDraft {
        title: "New".to_string(),
        description: "Idea".to_string(),
        ..draft
    });
    let notification = form.submit(&suggestions).await;
    assert_eq!(notification, Notification::error("Failed to create suggestion"));
}
