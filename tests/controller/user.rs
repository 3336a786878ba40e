use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension};
use turnstile::server::controller::{user::get_user, util::require_user::CurrentUser};
use turnstile_test_utils::prelude::*;

use crate::util::{json_body, test_state};

#[tokio::test]
/// Expect 200 with the signed in user's information
async fn returns_current_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_user_tables().build().await?;
    let user_model = test.user().insert_confirmed_user(TEST_EMAIL).await?;
    let (state, _) = test_state(&test);

    let result = get_user(State(state), Extension(CurrentUser(user_model.clone()))).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["id"], user_model.id);
    assert_eq!(body["email"], TEST_EMAIL);

    Ok(())
}

#[tokio::test]
/// Expect 404 when the user was deleted after the middleware resolved them
async fn returns_not_found_for_deleted_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let (state, _) = test_state(&test);

    let current = CurrentUser(mock_user_model(1, TEST_EMAIL));

    let result = get_user(State(state), Extension(current)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect 500 when required database tables are not present
async fn error_when_required_tables_dont_exist() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let (state, _) = test_state(&test);

    let current = CurrentUser(mock_user_model(1, TEST_EMAIL));

    let result = get_user(State(state), Extension(current)).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
