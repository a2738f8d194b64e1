use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, ProfileUpdate, User};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn create_user(engine: &Engine, username: &str) -> User {
    engine
        .create_user(username, "password", ProfileUpdate::default())
        .await
        .unwrap()
}

/// Overwrite a stored amount, bypassing validation.
pub async fn corrupt_amount(db: &DatabaseConnection, table: &str, id: uuid::Uuid, raw: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        format!("UPDATE {table} SET amount = ? WHERE id = ?"),
        vec![raw.into(), id.into()],
    ))
    .await
    .unwrap();
}
