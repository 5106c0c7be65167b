use campus_admin::{
    app_state::{AppState, UserStoreType},
    domain::{
        Email, Password, PersonName, Role, User, UserPasswordHash,
        UserProfile, UserStoreError,
    },
    get_postgres_pool, get_redis_client,
    services::data_stores::{
        PostgresCourseStore, PostgresUserStore, RedisBannedTokenStore,
    },
    utils::{
        constants::{
            prod, ADMIN_EMAIL, ADMIN_PASSWORD, DATABASE_URL, REDIS_HOST_NAME,
        },
        tracing::init_tracing,
    },
    Application,
};
use secrecy::Secret;
use sqlx::PgPool;
use std::{error::Error, sync::Arc};
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;
    init_tracing()?;

    let pg_pool = configure_postgresql().await?;
    let user_store: UserStoreType =
        Arc::new(RwLock::new(PostgresUserStore::new(pg_pool.clone())));
    let course_store =
        Arc::new(RwLock::new(PostgresCourseStore::new(pg_pool)));

    let redis_client = get_redis_client(REDIS_HOST_NAME.to_owned())?;
    let redis_conn = Arc::new(RwLock::new(redis_client.get_connection()?));
    let banned_token_store =
        Arc::new(RwLock::new(RedisBannedTokenStore::new(redis_conn)));

    seed_admin_account(&user_store).await?;

    let app_state =
        AppState::new(user_store, banned_token_store, course_store);
    let app = Application::build(app_state, prod::APP_ADDRESS).await?;
    app.run().await?;

    Ok(())
}

async fn configure_postgresql() -> Result<PgPool, Box<dyn Error>> {
    let pg_pool = get_postgres_pool(&DATABASE_URL).await?;
    sqlx::migrate!().run(&pg_pool).await?;
    Ok(pg_pool)
}

// Bootstrap an initial ADMIN account when the environment provides one,
// so a fresh deployment has someone who can create the rest.
async fn seed_admin_account(
    user_store: &UserStoreType,
) -> Result<(), Box<dyn Error>> {
    let (Some(email), Some(password)) =
        (ADMIN_EMAIL.as_ref(), ADMIN_PASSWORD.as_ref())
    else {
        return Ok(());
    };

    let email = Email::parse(Secret::new(email.to_owned()))?;
    let password = Password::parse(password.to_owned())?;
    let hash = UserPasswordHash::from_password(password).await?;

    let user = User::new(
        email,
        hash,
        Role::Admin,
        PersonName::parse("Admin".to_string())?,
        PersonName::parse("User".to_string())?,
        UserProfile::default(),
        false,
    );

    match user_store.write().await.add_user(user).await {
        Ok(()) => tracing::info!("seeded initial admin account"),
        Err(UserStoreError::UserAlreadyExists) => {
            tracing::info!("admin account already present, skipping seed")
        }
        Err(e) => return Err(Box::new(e)),
    }

    Ok(())
}
