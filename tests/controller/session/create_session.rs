use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Form};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Duration, Utc};
use turnstile::{
    model::session::FlashKind,
    server::{
        controller::session::{create_session, SignInParams},
        data::user::UserRepository,
        mailer::MemoryMailer,
        model::{
            app::AppState,
            db::UserModel,
            session::{flash::SessionFlash, return_to::SessionReturnTo, user::SessionUserId},
        },
        service::auth::remember::REMEMBER_TOKEN_COOKIE,
    },
};
use turnstile_test_utils::prelude::*;

use crate::util::{json_body, location, set_cookie, test_state};

fn params(email: &str, password: &str, return_to: Option<&str>) -> Form<SignInParams> {
    Form(SignInParams {
        email: email.to_string(),
        password: password.to_string(),
        return_to: return_to.map(str::to_string),
    })
}

#[tokio::test]
/// Expect 403 with the confirmation email resent for an unconfirmed user
async fn resends_confirmation_for_unconfirmed_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_user_tables().build().await?;
    test.user().insert_unconfirmed_user(TEST_EMAIL).await?;
    let (state, mailer) = test_state(&test);

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, None),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(location(&resp).is_none());
    assert!(set_cookie(&resp, REMEMBER_TOKEN_COOKIE).is_none());

    let flash = SessionFlash::get(&test.session).await.unwrap().unwrap();
    assert_eq!(flash.kind, FlashKind::Failure);
    assert!(flash.message.to_lowercase().contains("has not confirmed"));

    let deliveries = mailer.deliveries().unwrap();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].to, TEST_EMAIL);
    assert!(deliveries[0]
        .subject
        .to_lowercase()
        .contains("account confirmation"));

    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
/// Expect 303 with the stored remember token reused and a one year expiry
async fn signs_in_confirmed_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_user_tables().build().await?;
    let user_model = test
        .user()
        .insert_user(TEST_EMAIL, TEST_PASSWORD, true, Some("old-token"))
        .await?;
    let (state, mailer) = test_state(&test);

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, None),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/"));

    let cookie = set_cookie(&resp, REMEMBER_TOKEN_COOKIE).expect("remember cookie should be set");
    assert_eq!(cookie.value(), "old-token");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    let expires = cookie.expires_datetime().expect("cookie should expire");
    let one_year = (Utc::now() + Duration::days(365)).timestamp();
    assert!((expires.unix_timestamp() - one_year).abs() <= 2 * 24 * 60 * 60);

    let stored = UserRepository::new(&test.db)
        .get(user_model.id)
        .await?
        .unwrap();
    assert_eq!(stored.remember_token.as_deref(), Some("old-token"));

    assert_eq!(
        SessionUserId::get(&test.session).await.unwrap(),
        Some(user_model.id)
    );
    let flash = SessionFlash::get(&test.session).await.unwrap().unwrap();
    assert_eq!(flash.kind, FlashKind::Success);
    assert!(mailer.deliveries().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
/// Expect the configured expiry strategy to set the cookie expiration
async fn applies_remember_expiry_strategy() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_user_tables().build().await?;
    test.user()
        .insert_user(TEST_EMAIL, TEST_PASSWORD, true, Some("old-token"))
        .await?;
    let (state, _) = test_state(&test);
    let state = state.with_remember_expiry(|_user: &UserModel, _default: DateTime<Utc>| {
        Some(Utc::now() + Duration::days(5))
    });

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, None),
    )
    .await
    .unwrap();

    let cookie = set_cookie(&resp, REMEMBER_TOKEN_COOKIE).expect("remember cookie should be set");
    let expires = cookie.expires_datetime().expect("cookie should expire");
    let five_days = (Utc::now() + Duration::days(5)).timestamp();
    assert!((expires.unix_timestamp() - five_days).abs() <= 60);

    Ok(())
}

#[tokio::test]
/// Expect a session cookie when the expiry strategy returns None
async fn issues_session_cookie_without_expiry() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_user_tables().build().await?;
    test.user()
        .insert_user(TEST_EMAIL, TEST_PASSWORD, true, Some("old-token"))
        .await?;
    let (state, _) = test_state(&test);
    let session_only = |_user: &UserModel, _default: DateTime<Utc>| -> Option<DateTime<Utc>> {
        None
    };
    let state = state.with_remember_expiry(session_only);

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, None),
    )
    .await
    .unwrap();

    let cookie = set_cookie(&resp, REMEMBER_TOKEN_COOKIE).expect("remember cookie should be set");
    assert_eq!(cookie.value(), "old-token");
    assert!(cookie.expires().is_none());

    Ok(())
}

#[tokio::test]
/// Expect a redirect to the return URL stored in the session
async fn redirects_to_stored_return_to() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_confirmed_user(TEST_EMAIL)
        .build()
        .await?;
    let (state, _) = test_state(&test);
    SessionReturnTo::insert(&test.session, "/url_in_the_session")
        .await
        .unwrap();

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, None),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/url_in_the_session"));
    assert!(SessionReturnTo::get(&test.session).await.unwrap().is_none());

    Ok(())
}

#[tokio::test]
/// Expect a redirect to the return URL given with the request
async fn redirects_to_requested_return_to() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_confirmed_user(TEST_EMAIL)
        .build()
        .await?;
    let (state, _) = test_state(&test);

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, Some("/url_in_the_params")),
    )
    .await
    .unwrap();

    assert_eq!(location(&resp).as_deref(), Some("/url_in_the_params"));

    Ok(())
}

#[tokio::test]
/// Expect the request return URL to win over the one stored in the session
async fn prefers_requested_over_stored_return_to() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_confirmed_user(TEST_EMAIL)
        .build()
        .await?;
    let (state, _) = test_state(&test);
    SessionReturnTo::insert(&test.session, "/url_in_the_session")
        .await
        .unwrap();

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, Some("/url_in_the_params")),
    )
    .await
    .unwrap();

    assert_eq!(location(&resp).as_deref(), Some("/url_in_the_params"));

    Ok(())
}

#[tokio::test]
/// Expect an external return URL to be ignored
async fn ignores_external_return_to() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_confirmed_user(TEST_EMAIL)
        .build()
        .await?;
    let (state, _) = test_state(&test);

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, Some("https://evil.example.com/")),
    )
    .await
    .unwrap();

    assert_eq!(location(&resp).as_deref(), Some("/"));

    Ok(())
}

#[tokio::test]
/// Expect return URLs that browsers would rewrite into another host to be ignored
async fn ignores_return_to_with_control_characters() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_confirmed_user(TEST_EMAIL)
        .build()
        .await?;
    let (state, _) = test_state(&test);

    for return_to in ["/\t/evil.example.com", "/a\r\nb"] {
        let resp = create_session(
            State(state.clone()),
            test.session.clone(),
            CookieJar::new(),
            params(TEST_EMAIL, TEST_PASSWORD, Some(return_to)),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp).as_deref(), Some("/"));
    }

    Ok(())
}

#[tokio::test]
/// Expect 401 with the form re-rendered and no cookie for bad credentials
async fn rejects_bad_credentials() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_confirmed_user(TEST_EMAIL)
        .build()
        .await?;
    let (state, mailer) = test_state(&test);

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params("bad.email@example.com", "bad value", Some("/url_in_the_params")),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&resp, REMEMBER_TOKEN_COOKIE).is_none());
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    let flash = SessionFlash::get(&test.session).await.unwrap().unwrap();
    assert_eq!(flash.kind, FlashKind::Failure);
    assert!(flash.message.to_lowercase().contains("bad"));
    assert!(mailer.deliveries().unwrap().is_empty());

    let body = json_body(resp).await;
    assert_eq!(body["action"], "/api/session");
    assert_eq!(body["return_to"], "/url_in_the_params");

    Ok(())
}

#[tokio::test]
/// Expect 401 for a known email with the wrong password
async fn rejects_wrong_password() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_confirmed_user(TEST_EMAIL)
        .build()
        .await?;
    let (state, _) = test_state(&test);

    let resp = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, "bad value", None),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&resp, REMEMBER_TOKEN_COOKIE).is_none());

    Ok(())
}

#[tokio::test]
/// Expect 500 when required database tables are not present
async fn fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let (state, _) = test_state(&test);

    let result = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, None),
    )
    .await;

    assert!(result.is_err());
    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}

#[tokio::test]
/// Expect 500 when the confirmation email cannot be delivered
async fn fails_when_confirmation_delivery_fails() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_unconfirmed_user(TEST_EMAIL)
        .build()
        .await?;
    let state = AppState::new(test.db.clone(), Arc::new(MemoryMailer::rejecting()));

    let result = create_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        params(TEST_EMAIL, TEST_PASSWORD, None),
    )
    .await;

    let resp = result.unwrap_err().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}
