use axum::http::{header::SET_COOKIE, StatusCode};
use members_portal::SessionRepository;

mod utils;

use utils::*;

#[tokio::test]
async fn test_signup_grants_access_to_members() {
    let app = TestAppBuilder::new().build();

    let response = app.signup("Alice", "alice@x.com", "pass1").await;
    assert_redirect(&response, "/members");
    let cookie = session_cookie(&response).expect("signup sets a session cookie");

    let members = app.get("/members", Some(&cookie)).await;
    assert_eq!(members.status(), StatusCode::OK);

    let body = body_text(members).await;
    assert!(body.contains("Hello, Alice"));
    assert!(["cat1.jpg", "cat2.jpg", "cat3.jpg"]
        .iter()
        .any(|image| body.contains(image)));
}

#[tokio::test]
async fn test_home_page_reflects_session() {
    let app = TestAppBuilder::new().build();

    let anonymous = body_text(app.get("/", None).await).await;
    assert!(anonymous.contains("Welcome to the Home Page"));

    let response = app.signup("Alice", "alice@x.com", "pass1").await;
    let cookie = session_cookie(&response).unwrap();

    let signed_in = body_text(app.get("/", Some(&cookie)).await).await;
    assert!(signed_in.contains("Hello, Alice"));
    assert!(signed_in.contains("/logout"));
}

#[tokio::test]
async fn test_members_without_session_redirects_home() {
    let app = TestAppBuilder::new().build();

    assert_redirect(&app.get("/members", None).await, "/");
    assert_redirect(&app.get("/members", Some("sid=garbage")).await, "/");
}

#[tokio::test]
async fn test_login_with_correct_password() {
    let app = TestAppBuilder::new().build();
    app.signup("Alice", "alice@x.com", "pass1").await;

    let response = app.login("alice@x.com", "pass1", None).await;
    assert_redirect(&response, "/members");

    let cookie = session_cookie(&response).unwrap();
    let body = body_text(app.get("/members", Some(&cookie)).await).await;
    assert!(body.contains("Hello, Alice"));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let app = TestAppBuilder::new().build();
    app.signup("Alice", "alice@x.com", "pass1").await;

    let response = app.login("alice@x.com", "wrong", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());

    let body = body_text(response).await;
    assert!(body.contains("Invalid email or password"));
    assert!(body.contains("href=\"/login\""));
}

#[tokio::test]
async fn test_login_with_unknown_email_is_rejected() {
    let app = TestAppBuilder::new().build();

    let response = app.login("bob@nowhere.com", "whatever", None).await;
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(body_text(response)
        .await
        .contains("Invalid email or password"));
}

#[tokio::test]
async fn test_login_rotates_session() {
    let app = TestAppBuilder::new().build();

    let signup = app.signup("Alice", "alice@x.com", "pass1").await;
    let first_cookie = session_cookie(&signup).unwrap();

    let login = app.login("alice@x.com", "pass1", Some(&first_cookie)).await;
    let second_cookie = session_cookie(&login).unwrap();
    assert_ne!(first_cookie, second_cookie);

    // The session presented at login is retired
    assert_redirect(&app.get("/members", Some(&first_cookie)).await, "/");
    assert_eq!(
        app.get("/members", Some(&second_cookie)).await.status(),
        StatusCode::OK
    );
    assert_eq!(app.sessions.session_count(), 1);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestAppBuilder::new().build();
    let response = app.signup("Alice", "alice@x.com", "pass1").await;
    let cookie = session_cookie(&response).unwrap();

    let logout = app.get("/logout", Some(&cookie)).await;
    assert_redirect(&logout, "/");
    assert!(logout
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    // Replaying the old cookie no longer works
    assert_redirect(&app.get("/members", Some(&cookie)).await, "/");
    assert_eq!(app.sessions.session_count(), 0);
    assert_eq!(app.users.user_count(), 1);

    // Logging out again is harmless
    assert_redirect(&app.get("/logout", Some(&cookie)).await, "/");
}

#[tokio::test]
async fn test_expired_session_is_unauthenticated() {
    let app = TestAppBuilder::new().with_session_ttl_seconds(1).build();
    let response = app.signup("Alice", "alice@x.com", "pass1").await;
    let cookie = session_cookie(&response).unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    assert_redirect(&app.get("/members", Some(&cookie)).await, "/");
    // Expiry is passive; the record is still stored until purged
    assert_eq!(app.sessions.session_count(), 1);
    assert_eq!(app.sessions.cleanup_expired_sessions().await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected() {
    let app = TestAppBuilder::new().build();
    app.signup("Alice", "alice@x.com", "pass1").await;

    let response = app.signup("Mallory", "alice@x.com", "other1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(body_text(response).await.contains("already exists"));

    // The original password still works
    assert_redirect(&app.login("alice@x.com", "pass1", None).await, "/members");
}

#[tokio::test]
async fn test_signup_validation_writes_nothing() {
    let app = TestAppBuilder::new().build();

    let response = app.signup("Alice", "alice@x.com", "abc").await;
    assert!(body_text(response)
        .await
        .contains("&quot;password&quot; length must be at least 5 characters long"));

    assert_eq!(app.users.user_count(), 0);
    assert_eq!(app.sessions.session_count(), 0);
}

#[tokio::test]
async fn test_static_files_and_404() {
    let app = TestAppBuilder::new().build();

    let robots = app.get("/robots.txt", None).await;
    assert_eq!(robots.status(), StatusCode::OK);
    assert!(body_text(robots).await.contains("User-agent"));

    let missing = app.get("/nope", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert!(body_text(missing).await.contains("404 Page Not Found"));
}

#[tokio::test]
async fn test_form_values_with_reserved_characters() {
    let app = TestAppBuilder::new().build();
    let password = "p&ss=w0rd+%é";

    let response = app.signup("Tom & <Jerry>", "tom+jerry@x.com", password).await;
    assert_redirect(&response, "/members");
    let cookie = session_cookie(&response).unwrap();

    let body = body_text(app.get("/members", Some(&cookie)).await).await;
    assert!(body.contains("Hello, Tom &amp; &lt;Jerry&gt;"));

    assert_redirect(&app.login("tom+jerry@x.com", password, None).await, "/members");
    let wrong = app.login("tom+jerry@x.com", "p&ss=w0rd+%e", None).await;
    assert!(wrong.headers().get(SET_COOKIE).is_none());
}
