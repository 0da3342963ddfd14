use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::User;

pub async fn find_by_id<'e, E>(executor: E, user_id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, email, topics, quizzes
            FROM users
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, email, topics, quizzes
            FROM users
            WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
}

pub async fn insert<'e, E>(executor: E, user: &User) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO users (id, email, topics, quizzes)
            VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.topics)
    .bind(&user.quizzes)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn add_topic<'e, E>(
    executor: E,
    user_id: Uuid,
    topic_id: Uuid,
) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET topics = CASE WHEN $2 = ANY(topics) THEN topics ELSE array_append(topics, $2) END
            WHERE id = $1
            RETURNING id, email, topics, quizzes
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .fetch_optional(executor)
    .await
}

pub async fn pull_topic<'e, E>(
    executor: E,
    user_id: Uuid,
    topic_id: Uuid,
) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET topics = array_remove(topics, $2)
            WHERE id = $1
            RETURNING id, email, topics, quizzes
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .fetch_optional(executor)
    .await
}

pub async fn add_quiz<'e, E>(
    executor: E,
    user_id: Uuid,
    quiz_id: Uuid,
) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET quizzes = CASE WHEN $2 = ANY(quizzes) THEN quizzes ELSE array_append(quizzes, $2) END
            WHERE id = $1
            RETURNING id, email, topics, quizzes
        "#,
    )
    .bind(user_id)
    .bind(quiz_id)
    .fetch_optional(executor)
    .await
}

pub async fn pull_quiz<'e, E>(
    executor: E,
    user_id: Uuid,
    quiz_id: Uuid,
) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET quizzes = array_remove(quizzes, $2)
            WHERE id = $1
            RETURNING id, email, topics, quizzes
        "#,
    )
    .bind(user_id)
    .bind(quiz_id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, user_id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, email, topics, quizzes
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}
