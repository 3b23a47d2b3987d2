//! Integration tests for the public viewer route.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use uuid::Uuid;

async fn create_card(app: axum::Router) -> String {
    let (content_type, body) = common::multipart_body(&common::full_card_fields(), None);
    let response = common::post_multipart(app, "/api/v1/cards", &content_type, body).await;
    let json = common::body_json(response).await;
    json["data"]["card"]["id"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn existing_card_renders_the_closed_letter_shell(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);
    let id = create_card(app.clone()).await;

    let response = common::get(app, &format!("/card/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = common::body_text(response).await;
    assert!(html.contains("To Mina"));
    assert!(html.contains("closed-letter"));
    assert!(html.contains(&format!("data-card-id=\"{id}\"")));
    assert!(html.contains("data-style=\"birthday\""));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recipient_name_is_html_escaped(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);

    let fields = [
        ("recipient_name", "<script>alert(1)</script>"),
        ("message", "Happy Day"),
        ("sender_name", "Lee"),
        ("card_date", "2024-06-20"),
    ];
    let (content_type, body) = common::multipart_body(&fields, None);
    let response =
        common::post_multipart(app.clone(), "/api/v1/cards", &content_type, body).await;
    let json = common::body_json(response).await;
    let id = json["data"]["card"]["id"].as_str().unwrap().to_string();

    let response = common::get(app, &format!("/card/{id}")).await;
    let html = common::body_text(response).await;
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_card_redirects_home_without_rendering(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);

    let response = common::get(app, &format!("/card/{}", Uuid::new_v4())).await;
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get("location").unwrap().to_str().unwrap(),
        "/"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_card_id_redirects_home(pool: PgPool) {
    let (app, _) = common::build_test_app(pool);

    let response = common::get(app, "/card/not-a-uuid").await;
    assert!(response.status().is_redirection());
    assert_eq!(
        response.headers().get("location").unwrap().to_str().unwrap(),
        "/"
    );
}
