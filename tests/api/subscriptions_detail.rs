use wiremock::matchers::path;
use wiremock::{Mock, ResponseTemplate};

use crate::helper::{TestApp, spawn_app, valid_subscription};

const SUCCESS_MESSAGE: &str = "Inscrição realizada com sucesso!";

async fn subscribe(app: &TestApp) {
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;
    app.post_subscription(&valid_subscription()).await;
}

#[tokio::test]
async fn detail_shows_the_subscription() {
    let app = spawn_app().await;
    subscribe(&app).await;

    let response = app.get("/inscricao/1/").await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    for (_, value) in valid_subscription() {
        assert!(html.contains(value), "detail page is missing {value}");
    }
}

#[tokio::test]
async fn success_message_is_shown_only_once() {
    let app = spawn_app().await;
    subscribe(&app).await;

    let first = app.get_html("/inscricao/1/").await;
    let second = app.get_html("/inscricao/1/").await;

    assert!(first.contains(SUCCESS_MESSAGE));
    assert!(!second.contains(SUCCESS_MESSAGE));
}

#[tokio::test]
async fn success_message_is_not_shown_without_a_submission() {
    let app = spawn_app().await;
    subscribe(&app).await;

    // a fresh client has no acknowledgement cookie
    let html = reqwest::get(format!("{}/inscricao/1/", app.address))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(!html.contains(SUCCESS_MESSAGE));
}

#[tokio::test]
async fn unknown_subscription_returns_404() {
    let app = spawn_app().await;

    let response = app.get("/inscricao/99/").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn non_numeric_id_returns_404() {
    let app = spawn_app().await;

    let response = app.get("/inscricao/abc/").await;

    assert_eq!(response.status().as_u16(), 404);
}
