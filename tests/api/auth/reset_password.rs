use campus_admin::{routes::auth::LoginResponse, ErrorResponse};
use test_context::test_context;

use crate::helpers::{
    create_user, get_random_email, login_as_admin, TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_replace_password_and_clear_reset_flag(app: &mut TestApp) {
    login_as_admin(app).await;

    let email = get_random_email();
    let created = create_user(
        app,
        &serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "role": "STUDENT"
        }),
    )
    .await;
    let temporary_password =
        created["temporaryPassword"].as_str().unwrap().to_owned();

    let response = app
        .post_reset_password(&serde_json::json!({
            "email": email,
            "newPassword": "brand-new-pass"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // The one-time credential must no longer authenticate.
    let response = app
        .post_login(&serde_json::json!({
            "email": email,
            "password": temporary_password
        }))
        .await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .post_login(&serde_json::json!({
            "email": email,
            "password": "brand-new-pass"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response
        .json::<LoginResponse>()
        .await
        .expect("Could not deserialize response body to LoginResponse");
    assert!(
        !body.password_reset_required,
        "Reset flag should be cleared after the user sets a password"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_generic_400_if_email_unknown(app: &mut TestApp) {
    let response = app
        .post_reset_password(&serde_json::json!({
            "email": get_random_email(),
            "newPassword": "brand-new-pass"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "Invalid request".to_owned(),
        "Unknown emails must not be identifiable from the error"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_missing_or_invalid_input(app: &mut TestApp) {
    let test_cases = [
        serde_json::json!({
            "newPassword": "brand-new-pass"
        }),
        serde_json::json!({
            "email": get_random_email()
        }),
        serde_json::json!({
            "email": get_random_email(),
            "newPassword": "2short"
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_reset_password(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_input(app: &mut TestApp) {
    let test_cases = [
        serde_json::json!({
            "email": true,
            "newPassword": "brand-new-pass"
        }),
        serde_json::json!({
            "email": get_random_email(),
            "newPassword": "brand-new-pass",
            "extra": 1
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_reset_password(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}
