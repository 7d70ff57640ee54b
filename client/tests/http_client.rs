use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};
use youth_council_client::{ApiClient, ApiError, ClientConfig, PublicSite, Session};
use youth_council_shared::{
    listing::{CategoryFilter, ReportQuery},
    Category, Lenient, Member,
};

fn client_for(server: &MockServer, session: Session) -> ApiClient {
    let config = ClientConfig::new(&server.uri()).expect("config");
    ApiClient::new(config, session).expect("client")
}

#[tokio::test]
async fn bearer_header_follows_session_per_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let session = Session::in_memory();
    let client = client_for(&server, session.clone());

    let _: Vec<Member> = client.list().await.expect("anonymous list");
    session.login("token-123").expect("login");
    let _: Vec<Member> = client.list().await.expect("authenticated list");
    session.logout().expect("logout");
    let _: Vec<Member> = client.list().await.expect("anonymous again");

    let requests = server.received_requests().await.expect("recording enabled");
    let auth: Vec<Option<String>> = requests
        .iter()
        .map(|request| {
            request
                .headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
        .collect();
    assert_eq!(auth, [None, Some("Bearer token-123".to_string()), None]);
}

#[tokio::test]
async fn non_success_status_carries_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/members/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Member not found" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Session::in_memory());
    let err = client
        .remove::<Member>(99)
        .await
        .expect_err("missing member");
    match err {
        ApiError::Status {
            status,
            message,
        } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Member not found");
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, Session::in_memory());
    let err = client.list::<Member>().await.expect_err("not json");
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let config = ClientConfig::new("http://127.0.0.1:9").expect("config");
    let client = ApiClient::new(config, Session::in_memory()).expect("client");
    let err = client.list::<Member>().await.expect_err("nothing listens");
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn login_stores_token_for_later_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "username": "admin", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "jwt-abc", "token_type": "bearer" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/members"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::in_memory();
    let client = client_for(&server, session.clone());
    let response = client.login("admin", "secret").await.expect("login");
    assert_eq!(response.token_type, "bearer");
    assert_eq!(session.token().as_deref(), Some("jwt-abc"));

    let members: Vec<Member> = client.list().await.expect("list");
    assert!(members.is_empty());
}

#[tokio::test]
async fn login_rejection_reports_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let session = Session::in_memory();
    let client = client_for(&server, session.clone());
    let err = client.login("admin", "wrong").await.expect_err("rejected");
    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("Invalid credentials"));
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn public_views_work_without_a_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ana", "position": "SK Chairperson", "photo_url": "ana.jpg" },
            { "id": 2, "name": "Ben", "position": "SK Treasurer" },
            { "id": 3, "name": "Cara", "position": "SK Councilor", "committee": "health" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "Checkup", "description": "d", "status": "Completed",
              "budget": "PHP 1", "date": "2024-01-01", "category": "health" },
            { "id": 2, "title": "Tutoring", "description": "d", "status": "Ongoing",
              "budget": "PHP 2", "date": "2024-02-01", "category": "education" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "Q1 Financial Report", "uploaded_at": "2024-03-15T10:30:00",
              "file_path": "uploads/q1.pdf" },
            { "id": 2, "title": "Minutes", "uploaded_at": "2024-04-01T08:00:00Z",
              "file_path": "uploads/minutes.docx" }
        ])))
        .mount(&server)
        .await;

    let site = PublicSite::new(client_for(&server, Session::in_memory()));

    let roster = site.roster().await.expect("roster");
    assert_eq!(roster.chairpersons.len(), 1);
    assert_eq!(roster.secretary_treasurer.len(), 1);
    assert_eq!(roster.councilors[0].committee, Some(Lenient::Known(Category::Health)));
    assert!(site
        .asset_url("ana.jpg")
        .ends_with("/uploads/ana.jpg"));

    let health = site
        .showcase(CategoryFilter::Only(Category::Health))
        .await
        .expect("showcase");
    assert_eq!(health.len(), 1);
    assert_eq!(health[0].title, "Checkup");

    let grouped = site.showcase_by_category().await.expect("grouped");
    assert_eq!(grouped.len(), 2);

    let page = site
        .reports(&ReportQuery {
            search: "report".to_string(),
            ..ReportQuery::default()
        })
        .await
        .expect("reports");
    assert_eq!(page.total_matches, 1);
    assert_eq!(page.reports[0].title, "Q1 Financial Report");

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests
        .iter()
        .all(|request| !request.headers.contains_key("authorization")));
}

#[tokio::test]
async fn rows_with_unrecognised_values_still_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ana", "position": "SK Councilor", "committee": "health" },
            { "id": 2, "name": "Ben", "position": "SK Councilor", "committee": "Sports" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "Checkup", "description": "d", "status": "Completed",
              "budget": "PHP 1", "date": "2024-01-01", "category": "health" },
            { "id": 2, "title": "League", "description": "d", "status": "Planned",
              "budget": "PHP 2", "date": "June 2024", "category": "sports" }
        ])))
        .mount(&server)
        .await;

    let site = PublicSite::new(client_for(&server, Session::in_memory()));

    let roster = site.roster().await.expect("roster");
    assert_eq!(roster.councilors.len(), 2);
    assert_eq!(
        roster.councilors[1].committee,
        Some(Lenient::Unknown("Sports".to_string()))
    );

    let all = site.showcase(CategoryFilter::All).await.expect("showcase");
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].date, Lenient::Unknown("June 2024".to_string()));

    let health = site
        .showcase(CategoryFilter::Only(Category::Health))
        .await
        .expect("health");
    assert_eq!(health.len(), 1);
}
