use test_context::test_context;
use uuid::Uuid;

use crate::helpers::{
    create_user, get_json_response_body, get_random_email, login_as_admin,
    TestApp,
};

async fn create_student(app: &TestApp, email: &str) -> String {
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
    created["userId"].as_str().unwrap().to_owned()
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_change_only_the_supplied_fields(app: &mut TestApp) {
    login_as_admin(app).await;

    let email = get_random_email();
    let id = create_student(app, &email).await;

    let response = app
        .put_update_user(
            &id,
            &serde_json::json!({
                "firstName": "Grace",
                "role": "TEACHER"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let user = &body["user"];
    assert_eq!(user["firstName"].as_str().unwrap(), "Grace");
    assert_eq!(user["role"].as_str().unwrap(), "TEACHER");
    // Untouched fields keep their prior values.
    assert_eq!(user["lastName"].as_str().unwrap(), "Lovelace");
    assert_eq!(user["email"].as_str().unwrap(), email);
    assert_eq!(user["id"].as_str().unwrap(), id);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_and_not_mutate_if_role_invalid(
    app: &mut TestApp,
) {
    login_as_admin(app).await;

    let email = get_random_email();
    let id = create_student(app, &email).await;

    let response = app
        .put_update_user(
            &id,
            &serde_json::json!({
                "firstName": "Grace",
                "role": "INVALID"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let users = get_json_response_body(app.get_users().await).await;
    let user = users["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"].as_str() == Some(id.as_str()))
        .expect("user should still exist");
    assert_eq!(
        user["firstName"].as_str().unwrap(),
        "Ada",
        "Rejected updates must not mutate the row"
    );
    assert_eq!(user["role"].as_str().unwrap(), "STUDENT");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_no_fields_supplied(app: &mut TestApp) {
    login_as_admin(app).await;

    let id = create_student(app, &get_random_email()).await;

    let response = app.put_update_user(&id, &serde_json::json!({})).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_id_not_a_uuid(app: &mut TestApp) {
    login_as_admin(app).await;

    let response = app
        .put_update_user(
            "not-a-uuid",
            &serde_json::json!({"firstName": "Grace"}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_if_id_unknown(app: &mut TestApp) {
    login_as_admin(app).await;

    let response = app
        .put_update_user(
            &Uuid::new_v4().to_string(),
            &serde_json::json!({"firstName": "Grace"}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_if_new_email_collides(app: &mut TestApp) {
    login_as_admin(app).await;

    let first_email = get_random_email();
    create_student(app, &first_email).await;
    let second_id = create_student(app, &get_random_email()).await;

    let response = app
        .put_update_user(
            &second_id,
            &serde_json::json!({"email": first_email}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_unknown_field_supplied(app: &mut TestApp) {
    login_as_admin(app).await;

    let id = create_student(app, &get_random_email()).await;

    let response = app
        .put_update_user(
            &id,
            &serde_json::json!({"firstName": "Grace", "batch": 2025}),
        )
        .await;
    assert_eq!(
        response.status().as_u16(),
        422,
        "Fields outside the editable set must be rejected"
    );
}
