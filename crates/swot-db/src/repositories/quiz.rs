use sqlx::{Executor, Postgres, types::Json};
use swot_question::Question;
use uuid::Uuid;

use crate::models::Quiz;

pub async fn find_by_id<'e, E>(executor: E, quiz_id: Uuid) -> Result<Option<Quiz>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, topic, created_by, questions, date_created
            FROM quizzes
            WHERE id = $1
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_topic<'e, E>(executor: E, topic_id: Uuid) -> Result<Vec<Quiz>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, topic, created_by, questions, date_created
            FROM quizzes
            WHERE topic = $1
            ORDER BY seq
        "#,
    )
    .bind(topic_id)
    .fetch_all(executor)
    .await
}

pub async fn insert<'e, E>(executor: E, quiz: &Quiz) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO quizzes (id, name, topic, created_by, questions, date_created)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(quiz.id)
    .bind(&quiz.name)
    .bind(quiz.topic)
    .bind(quiz.created_by)
    .bind(Json(&quiz.questions))
    .bind(quiz.date_created)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn replace<'e, E>(
    executor: E,
    quiz_id: Uuid,
    name: &str,
    questions: &[Question],
) -> Result<Option<Quiz>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE quizzes
            SET name = $2, questions = $3
            WHERE id = $1
            RETURNING id, name, topic, created_by, questions, date_created
        "#,
    )
    .bind(quiz_id)
    .bind(name)
    .bind(Json(questions))
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, quiz_id: Uuid) -> Result<Option<Quiz>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            DELETE FROM quizzes
            WHERE id = $1
            RETURNING id, name, topic, created_by, questions, date_created
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(executor)
    .await
}
