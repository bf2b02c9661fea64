use crate::helper::spawn_app;

#[tokio::test]
async fn home_page_returns_200() {
    let app = spawn_app().await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn home_page_links_to_subscription_and_speakers() {
    let app = spawn_app().await;

    let html = app.get_html("/").await;

    assert!(html.contains(r#"href="/inscricao/""#));
    assert!(html.contains(r#"href="/#speakers""#));
    for expected in [
        "Grace Hopper",
        "http://hbn.link/hopper-pic",
        "Alan Turing",
        "http://hbn.link/turing-pic",
    ] {
        assert!(html.contains(expected), "missing {expected}");
    }
}
