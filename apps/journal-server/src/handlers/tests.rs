use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};

use journal_core::ports::PostRepository;
use journal_infra::{InMemoryPostRepository, LocalImageStore};

use super::configure_routes;
use crate::state::AppState;

const BOUNDARY: &str = "journal-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn post_form(parts: &[Part<'_>]) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart(parts))
}

fn state(dir: &tempfile::TempDir, repo: Arc<InMemoryPostRepository>, max: usize) -> AppState {
    AppState::new(repo, Arc::new(LocalImageStore::new(dir.path())), max)
}

#[actix_web::test]
async fn test_create_redirects_and_lists_entry() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(&dir, repo.clone(), 1024)))
            .configure(configure_routes),
    )
    .await;

    let req = post_form(&[
        Part::Text("_intent", "create"),
        Part::Text("userName", "Ann"),
        Part::Text("title", "Morning <notes>"),
        Part::Text("content", "Coffee first."),
        Part::File("image", "cup.png", b"png-bytes"),
    ])
    .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");

    let posts = repo.fetch_posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    let url = posts[0].post.image_url.clone().unwrap();
    assert!(url.ends_with("-cup.png"));

    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(html.contains("Morning &lt;notes&gt;"));
    assert!(html.contains("by Ann at"));
    assert!(html.contains(&url));
}

#[actix_web::test]
async fn test_empty_file_part_is_not_stored() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(&dir, repo.clone(), 1024)))
            .configure(configure_routes),
    )
    .await;

    let req = post_form(&[
        Part::Text("_intent", "create"),
        Part::Text("title", "No picture"),
        Part::File("image", "", b""),
    ])
    .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let posts = repo.fetch_posts().await.unwrap();
    assert_eq!(posts[0].post.image_url, None);
    assert_eq!(posts[0].user.name, "Anonymous");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[actix_web::test]
async fn test_oversized_part_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(&dir, repo.clone(), 8)))
            .configure(configure_routes),
    )
    .await;

    let req = post_form(&[
        Part::Text("_intent", "create"),
        Part::Text("title", "Big"),
        Part::File("image", "big.bin", &[0u8; 64]),
    ])
    .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(repo.fetch_posts().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_delete_of_unknown_post_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(InMemoryPostRepository::new());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(&dir, repo, 1024)))
            .configure(configure_routes),
    )
    .await;

    let req = post_form(&[Part::Text("_intent", "delete"), Part::Text("id", "42")]).to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_editing_query_renders_edit_form() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(InMemoryPostRepository::new());
    let post = repo
        .create_post(journal_core::domain::PostInput::new("Draft", None, "Ann"))
        .await
        .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(&dir, repo, 1024)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/?editing={}", post.id))
        .to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert!(html.contains("value=\"update\""));

    // Non-numeric ids fall back to the plain listing
    let req = test::TestRequest::get().uri("/?editing=abc").to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert!(!html.contains("value=\"update\""));
}

#[actix_web::test]
async fn test_api_posts_filters_by_user() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(InMemoryPostRepository::new());
    for (title, user) in [("One", "Ann"), ("Two", "Bob"), ("Three", "Ann")] {
        repo.create_post(journal_core::domain::PostInput::new(title, None, user))
            .await
            .unwrap();
    }
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(&dir, repo, 1024)))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/posts?user=Ann").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Three", "One"]);
    assert_eq!(body["data"][0]["user"]["name"], "Ann");
}

#[actix_web::test]
async fn test_health_without_database() {
    let dir = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state(
                &dir,
                Arc::new(InMemoryPostRepository::new()),
                1024,
            )))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "not configured");
}
