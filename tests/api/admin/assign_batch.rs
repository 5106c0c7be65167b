use test_context::test_context;
use uuid::Uuid;

use crate::helpers::{
    create_user, get_json_response_body, get_random_email, login_as_admin,
    TestApp,
};

async fn create_student(app: &TestApp) -> String {
    let created = create_user(
        app,
        &serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": get_random_email(),
            "role": "STUDENT"
        }),
    )
    .await;
    created["userId"].as_str().unwrap().to_owned()
}

async fn batch_of(app: &TestApp, id: &str) -> Option<String> {
    let users = get_json_response_body(app.get_users().await).await;
    users["users"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"].as_str() == Some(id))
        .expect("user should be listed")["batch"]
        .as_str()
        .map(str::to_owned)
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_assign_the_label_to_every_listed_account(app: &mut TestApp) {
    login_as_admin(app).await;

    let first = create_student(app).await;
    let second = create_student(app).await;

    let response = app
        .post_assign_batch(&serde_json::json!({
            "batchName": "2025A",
            "userIds": [first, second]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(batch_of(app, &first).await.as_deref(), Some("2025A"));
    assert_eq!(batch_of(app, &second).await.as_deref(), Some("2025A"));
}

#[test_context(TestApp)]
#[tokio::test]
async fn unknown_id_in_the_list_assigns_nothing(app: &mut TestApp) {
    login_as_admin(app).await;

    let known = create_student(app).await;

    let response = app
        .post_assign_batch(&serde_json::json!({
            "batchName": "2025A",
            "userIds": [known, Uuid::new_v4().to_string()]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    assert_eq!(
        batch_of(app, &known).await,
        None,
        "A failed batch assignment must leave every account untouched"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    login_as_admin(app).await;

    let id = create_student(app).await;

    let test_cases = [
        serde_json::json!({
            "batchName": "",
            "userIds": [id]
        }),
        serde_json::json!({
            "batchName": "2025A",
            "userIds": []
        }),
        serde_json::json!({
            "userIds": [id]
        }),
        serde_json::json!({
            "batchName": "2025A"
        }),
        serde_json::json!({
            "batchName": "2025A",
            "userIds": ["not-a-uuid"]
        }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_assign_batch(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            test_case
        );
    }

    assert_eq!(
        batch_of(app, &id).await,
        None,
        "Rejected requests must not touch storage"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_callers_without_an_admin_session(app: &mut TestApp) {
    let response = app
        .post_assign_batch(&serde_json::json!({
            "batchName": "2025A",
            "userIds": [Uuid::new_v4().to_string()]
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
