use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use axum_extra::extract::CookieJar;
use turnstile::{
    model::session::FlashKind,
    server::{
        controller::{
            session::{destroy_session, logout, ReturnToParams},
            util::current_user::current_user,
        },
        data::user::UserRepository,
        model::session::{flash::SessionFlash, return_to::SessionReturnTo, user::SessionUserId},
        service::auth::remember::REMEMBER_TOKEN_COOKIE,
    },
};
use turnstile_test_utils::prelude::*;

use crate::util::{location, remember_jar, set_cookie, test_state};

#[tokio::test]
/// Expect 303 to the default target without error when nobody is signed in
async fn signs_out_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let (state, _) = test_state(&test);

    let resp = destroy_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        Query(ReturnToParams::default()),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/api/session/new"));

    let flash = SessionFlash::get(&test.session).await.unwrap().unwrap();
    assert_eq!(flash.kind, FlashKind::Notice);
    assert!(flash.message.to_lowercase().contains("signed out"));

    Ok(())
}

#[tokio::test]
/// Expect the remember token to be rotated and the cookie removed
async fn signs_out_remembered_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_user_tables().build().await?;
    let user_model = test
        .user()
        .insert_user(TEST_EMAIL, TEST_PASSWORD, true, Some("old-token"))
        .await?;
    let (state, _) = test_state(&test);

    let resp = destroy_session(
        State(state.clone()),
        test.session.clone(),
        remember_jar("old-token"),
        Query(ReturnToParams::default()),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let removal = set_cookie(&resp, REMEMBER_TOKEN_COOKIE).expect("removal cookie should be set");
    assert_eq!(removal.value(), "");

    let flash = SessionFlash::get(&test.session).await.unwrap().unwrap();
    assert!(flash.message.to_lowercase().contains("signed out"));

    let stored = UserRepository::new(&test.db)
        .get(user_model.id)
        .await?
        .unwrap();
    assert!(stored.remember_token.is_some());
    assert_ne!(stored.remember_token.as_deref(), Some("old-token"));

    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());
    let after = current_user(&state, &test.session, &remember_jar("old-token"))
        .await
        .unwrap();
    assert!(after.is_none());

    Ok(())
}

#[tokio::test]
/// Expect the session principal to be removed and their token rotated
async fn signs_out_session_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_user_tables().build().await?;
    let user_model = test
        .user()
        .insert_user(TEST_EMAIL, TEST_PASSWORD, true, Some("old-token"))
        .await?;
    let (state, _) = test_state(&test);
    SessionUserId::insert(&test.session, user_model.id)
        .await
        .unwrap();

    let resp = destroy_session(
        State(state.clone()),
        test.session.clone(),
        CookieJar::new(),
        Query(ReturnToParams::default()),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());
    let stored = UserRepository::new(&test.db)
        .get(user_model.id)
        .await?
        .unwrap();
    assert_ne!(stored.remember_token.as_deref(), Some("old-token"));
    let after = current_user(&state, &test.session, &CookieJar::new())
        .await
        .unwrap();
    assert!(after.is_none());

    Ok(())
}

#[tokio::test]
/// Expect a redirect to the return URL given with the request
async fn redirects_to_requested_return_to() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let (state, _) = test_state(&test);

    let resp = destroy_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        Query(ReturnToParams {
            return_to: Some("/url_in_the_params".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(location(&resp).as_deref(), Some("/url_in_the_params"));

    Ok(())
}

#[tokio::test]
/// Expect a return URL with a line break to fall back to the default redirect
async fn ignores_return_to_with_line_break() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let (state, _) = test_state(&test);

    let resp = destroy_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        Query(ReturnToParams {
            return_to: Some("/a\r\nSet-Cookie: x=1".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/api/session/new"));

    Ok(())
}

#[tokio::test]
/// Expect the request return URL to win over the one stored in the session
async fn prefers_requested_over_stored_return_to() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let (state, _) = test_state(&test);
    SessionReturnTo::insert(&test.session, "/url_in_the_session")
        .await
        .unwrap();

    let resp = destroy_session(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        Query(ReturnToParams {
            return_to: Some("/url_in_the_params".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(location(&resp).as_deref(), Some("/url_in_the_params"));

    Ok(())
}

#[tokio::test]
/// Expect the logout alias to sign out the same way
async fn logout_alias_signs_out() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let (state, _) = test_state(&test);
    SessionReturnTo::insert(&test.session, "/url_in_the_session")
        .await
        .unwrap();

    let resp = logout(
        State(state),
        test.session.clone(),
        CookieJar::new(),
        Query(ReturnToParams::default()),
    )
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/url_in_the_session"));

    Ok(())
}
