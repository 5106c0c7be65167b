use campus_admin::routes::admin::UserListResponse;
use test_context::test_context;

use crate::helpers::{
    create_user, get_json_response_body, get_random_email, login_as_admin,
    TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_created_users_with_their_fields(app: &mut TestApp) {
    let admin_email = login_as_admin(app).await;

    let email = get_random_email();
    create_user(
        app,
        &serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "role": "STUDENT",
            "batch": 2025,
            "studentId": "S-1815",
            "phoneNumber": "9999999999",
            "dateOfBirth": "1815-12-10"
        }),
    )
    .await;

    let response = app.get_users().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = response
        .json::<UserListResponse>()
        .await
        .expect("Could not deserialize response body to UserListResponse");

    let emails: Vec<&str> =
        body.users.iter().map(|u| u.email.as_str()).collect();
    assert!(emails.contains(&admin_email.as_str()));
    assert!(emails.contains(&email.as_str()));

    let student = body
        .users
        .iter()
        .find(|u| u.email == email)
        .expect("Created student should be listed");
    assert_eq!(student.first_name, "Ada");
    assert_eq!(student.last_name, "Lovelace");
    assert_eq!(student.role.as_str(), "STUDENT");
    assert_eq!(student.batch.as_deref(), Some("2025"));
    assert_eq!(student.student_id.as_deref(), Some("S-1815"));
    assert_eq!(student.phone_number.as_deref(), Some("9999999999"));
    assert_eq!(student.date_of_birth.as_deref(), Some("1815-12-10"));
    assert!(student.password_reset_required);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_never_include_password_hashes(app: &mut TestApp) {
    login_as_admin(app).await;

    create_user(
        app,
        &serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": get_random_email(),
            "role": "STUDENT"
        }),
    )
    .await;

    let body = get_json_response_body(app.get_users().await).await;

    for user in body["users"].as_array().expect("users should be an array") {
        let keys: Vec<&str> =
            user.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert!(
            !keys.iter().any(|k| k.to_lowercase().contains("password")
                && *k != "passwordResetRequired"),
            "Response leaked a credential field: {:?}",
            keys
        );
        assert!(
            !keys.iter().any(|k| k.to_lowercase().contains("hash")),
            "Response leaked a credential field: {:?}",
            keys
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_callers_without_an_admin_session(app: &mut TestApp) {
    let response = app.get_users().await;
    assert_eq!(response.status().as_u16(), 400);
}
