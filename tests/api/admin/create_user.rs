use campus_admin::domain::Email;
use secrecy::{ExposeSecret, Secret};
use test_context::test_context;

use crate::helpers::{
    create_user, get_random_email, login_as_admin, TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn created_student_can_log_in_with_temporary_password(
    app: &mut TestApp,
) {
    login_as_admin(app).await;

    let email = get_random_email();
    let created = create_user(
        app,
        &serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "role": "STUDENT",
            "batch": 2025
        }),
    )
    .await;

    assert_eq!(created["email"].as_str().unwrap(), email);
    let temporary_password = created["temporaryPassword"]
        .as_str()
        .expect("No temporary password in creation response");

    // The stored credential is a hash, never the plaintext itself.
    let parsed_email =
        Email::parse(Secret::new(email.clone())).expect("valid email");
    let stored = app
        .user_store
        .read()
        .await
        .get_user(&parsed_email)
        .await
        .expect("created user should be in the store");
    assert!(stored.password_reset_required);
    assert_ne!(
        stored.hash.as_ref().expose_secret(),
        temporary_password,
        "Plaintext temporary password must never be persisted"
    );
    assert_eq!(
        stored.profile.batch.as_ref().map(|b| b.as_ref().as_str()),
        Some("2025")
    );

    let response = app
        .post_login(&serde_json::json!({
            "email": email,
            "password": temporary_password
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = crate::helpers::get_json_response_body(response).await;
    assert_eq!(body["passwordResetRequired"], true);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_if_email_already_exists(app: &mut TestApp) {
    login_as_admin(app).await;

    let email = get_random_email();
    let body = serde_json::json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "role": "STUDENT"
    });

    create_user(app, &body).await;

    // A different profile with the same email must still be rejected.
    let response = app
        .post_create_user(&serde_json::json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": email,
            "role": "TEACHER"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    login_as_admin(app).await;

    let email = get_random_email();
    let test_cases = [
        // missing required fields
        serde_json::json!({
            "lastName": "Lovelace",
            "email": email,
            "role": "STUDENT"
        }),
        serde_json::json!({
            "firstName": "Ada",
            "email": email,
            "role": "STUDENT"
        }),
        serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "role": "STUDENT"
        }),
        serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email
        }),
        // invalid values
        serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "role": "SUPERUSER"
        }),
        serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "not-an-email",
            "role": "STUDENT"
        }),
        serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "role": "STUDENT",
            "batch": 1899
        }),
        serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "role": "STUDENT",
            "dateOfBirth": "15-01-1990"
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_create_user(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            test_case
        );
    }

    // None of the rejected requests may have created an account.
    let users = crate::helpers::get_json_response_body(app.get_users().await)
        .await;
    let emails: Vec<&str> = users["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert!(!emails.contains(&email.as_str()));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_input(app: &mut TestApp) {
    login_as_admin(app).await;

    let test_cases = [
        serde_json::json!({
            "firstName": true,
            "lastName": "Lovelace",
            "email": get_random_email(),
            "role": "STUDENT"
        }),
        serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": get_random_email(),
            "role": "STUDENT",
            "batch": "2025"
        }),
        serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": get_random_email(),
            "role": "STUDENT",
            "unknownField": "value"
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_create_user(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {:?}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_callers_without_an_admin_session(app: &mut TestApp) {
    let body = serde_json::json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": get_random_email(),
        "role": "STUDENT"
    });

    // No session at all.
    let response = app.post_create_user(&body).await;
    assert_eq!(response.status().as_u16(), 400);

    // A valid session with a non-admin role.
    login_as_admin(app).await;
    let email = get_random_email();
    let created = create_user(
        app,
        &serde_json::json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": email,
            "role": "TEACHER"
        }),
    )
    .await;

    let response = app
        .post_login(&serde_json::json!({
            "email": email,
            "password": created["temporaryPassword"].as_str().unwrap()
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post_create_user(&body).await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "Non-admin roles must not reach admin operations"
    );
}
