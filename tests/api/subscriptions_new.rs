use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use std::sync::Arc;

use crate::helper::{
    FailingRepository, assert_is_redirect_to, csrf_token, spawn_app,
    spawn_app_with_repository, valid_subscription,
};

#[tokio::test]
async fn subscription_form_returns_200() {
    let app = spawn_app().await;

    let response = app.get("/inscricao/").await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn subscription_form_has_the_expected_inputs() {
    let app = spawn_app().await;

    let html = app.get_html("/inscricao/").await;

    for (text, count) in [
        ("<form", 1),
        ("<input", 6),
        (r#"type="hidden""#, 1),
        (r#"type="text""#, 3),
        (r#"type="email""#, 1),
        (r#"type="submit""#, 1),
    ] {
        assert_eq!(html.matches(text).count(), count, "count of {text}");
    }
}

#[tokio::test]
async fn valid_subscription_redirects_to_its_detail_page() {
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let response = app.post_subscription(&valid_subscription()).await;

    assert_is_redirect_to(&response, "/inscricao/1/");
}

#[tokio::test]
async fn valid_subscription_sends_one_confirmation_email() {
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_subscription(&valid_subscription()).await;

    let emails = app.sent_emails().await;
    let email = &emails[0];
    assert_eq!(email["Subject"], "Confirmação de Inscrição");
    assert_eq!(email["From"], "contato@eventex.com.br");
    assert_eq!(email["To"], "contato@eventex.com.br, bmatheus91@gmail.com");

    let body = email["TextBody"].as_str().unwrap();
    for (_, value) in valid_subscription() {
        assert!(body.contains(value), "email body is missing {value}");
    }
}

#[tokio::test]
async fn subsequent_subscriptions_get_new_ids() {
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let first = app.post_subscription(&valid_subscription()).await;
    let second = app.post_subscription(&valid_subscription()).await;

    assert_is_redirect_to(&first, "/inscricao/1/");
    assert_is_redirect_to(&second, "/inscricao/2/");
}

#[tokio::test]
async fn invalid_subscription_is_rendered_with_errors() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = [
        (vec![], "empty form"),
        (
            vec![("name", "Matheus de Sousa Barros"), ("cpf", "02824886340")],
            "missing email and phone",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_subscription(&body).await;

        assert_eq!(
            response.status().as_u16(),
            200,
            "The form was not re-rendered for {description}"
        );
        let html = response.text().await.unwrap();
        assert!(html.contains("<form"), "{description}");
        assert!(html.contains(r#"class="errorlist nonfield""#), "{description}");
        assert!(
            html.contains("Preencha todos os campos obrigatórios."),
            "{description}"
        );
    }
}

#[tokio::test]
async fn invalid_values_are_reported_per_field() {
    let app = spawn_app().await;

    let response = app
        .post_subscription(&[
            ("name", "Matheus de Sousa Barros"),
            ("cpf", "abc"),
            ("email", "not-an-email"),
            ("phone", "98982858442"),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("CPF deve conter apenas números."));
    assert!(html.contains("Informe um endereço de email válido."));
    assert!(html.contains(r#"value="Matheus de Sousa Barros""#));
}

#[tokio::test]
async fn invalid_subscription_is_not_stored() {
    let app = spawn_app().await;

    for _ in 0..3 {
        app.post_subscription(&[("name", "Matheus")]).await;
    }

    let response = app.get("/inscricao/1/").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn failing_email_api_returns_500_but_keeps_the_subscription() {
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_subscription(&valid_subscription()).await;

    assert_eq!(response.status().as_u16(), 500);
    let response = app.get("/inscricao/1/").await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn subscription_form_carries_a_csrf_token() {
    let app = spawn_app().await;

    let html = app.get_html("/inscricao/").await;

    assert!(html.contains("csrfmiddlewaretoken"));
    assert!(!csrf_token(&html).is_empty());
}

#[tokio::test]
async fn submission_without_a_csrf_token_is_forbidden() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app
        .api_client
        .post(format!("{}/inscricao/", app.address))
        .header("Origin", "https://evil.example")
        .form(&valid_subscription())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(app.get("/inscricao/1/").await.status().as_u16(), 404);
}

#[tokio::test]
async fn submission_with_a_forged_csrf_token_is_forbidden() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_subscription_with_token(&valid_subscription(), "forged")
        .await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn csrf_token_cannot_be_reused() {
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;
    let token = csrf_token(&app.get_html("/inscricao/").await);

    let first = app
        .post_subscription_with_token(&valid_subscription(), &token)
        .await;
    let second = app
        .post_subscription_with_token(&valid_subscription(), &token)
        .await;

    assert_is_redirect_to(&first, "/inscricao/1/");
    assert_eq!(second.status().as_u16(), 403);
}

#[tokio::test]
async fn re_rendered_form_carries_a_fresh_token() {
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let response = app.post_subscription(&[("name", "Matheus")]).await;
    let token = csrf_token(&response.text().await.unwrap());
    let response = app
        .post_subscription_with_token(&valid_subscription(), &token)
        .await;

    assert_is_redirect_to(&response, "/inscricao/1/");
}

#[tokio::test]
async fn malformed_body_re_renders_the_form() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_raw_subscription(
            "name=a&name=b&cpf=02824886340&email=bmatheus91%40gmail.com\
            &phone=98982858442"
                .to_string(),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"class="errorlist nonfield""#));
    assert!(html.contains("Não foi possível ler o formulário."));
    assert!(html.contains("csrfmiddlewaretoken"));
}

#[tokio::test]
async fn storage_failure_returns_500_and_sends_no_email() {
    let app = spawn_app_with_repository(Arc::new(FailingRepository)).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_subscription(&valid_subscription()).await;

    assert_eq!(response.status().as_u16(), 500);
    assert!(app.sent_emails().await.is_empty());
}
