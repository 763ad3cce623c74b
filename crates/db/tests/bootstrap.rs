use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify the schema exists.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    reelhouse_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "user_sessions",
        "films",
        "purchases",
        "distribution_tokens",
        "distributor_applications",
    ];

    for table in tables {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM information_schema.tables
                 WHERE table_schema = 'public' AND table_name = $1
             )",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists.0, "table {table} should exist after migrations");
    }
}

/// The updated_at trigger must bump the timestamp on UPDATE.
#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let user = reelhouse_db::repositories::UserRepo::create(
        &pool,
        &reelhouse_db::models::user::CreateUser {
            email: "trigger@example.com".into(),
            password_hash: "$argon2id$fake".into(),
            role: "viewer".into(),
        },
    )
    .await
    .unwrap();

    sqlx::query("UPDATE users SET role = 'filmmaker' WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let updated = reelhouse_db::repositories::UserRepo::find_by_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(
        updated.updated_at >= updated.created_at,
        "updated_at should move forward on UPDATE"
    );
    assert_eq!(updated.role, "filmmaker");
}
