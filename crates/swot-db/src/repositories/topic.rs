use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::Topic;

pub async fn find_by_id<'e, E>(executor: E, topic_id: Uuid) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, created_by, parent, subtopics, date_created
            FROM topics
            WHERE id = $1
        "#,
    )
    .bind(topic_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_parent<'e, E>(executor: E, parent_id: Uuid) -> Result<Vec<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, created_by, parent, subtopics, date_created
            FROM topics
            WHERE parent = $1
            ORDER BY seq
        "#,
    )
    .bind(parent_id)
    .fetch_all(executor)
    .await
}

pub async fn insert<'e, E>(executor: E, topic: &Topic) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO topics (id, name, created_by, parent, subtopics, date_created)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(topic.id)
    .bind(&topic.name)
    .bind(topic.created_by)
    .bind(topic.parent)
    .bind(&topic.subtopics)
    .bind(topic.date_created)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn rename<'e, E>(
    executor: E,
    topic_id: Uuid,
    name: &str,
) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE topics
            SET name = $2
            WHERE id = $1
            RETURNING id, name, created_by, parent, subtopics, date_created
        "#,
    )
    .bind(topic_id)
    .bind(name)
    .fetch_optional(executor)
    .await
}

pub async fn add_subtopic<'e, E>(
    executor: E,
    topic_id: Uuid,
    subtopic_id: Uuid,
) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE topics
            SET subtopics = CASE
                WHEN $2 = ANY(subtopics) THEN subtopics
                ELSE array_append(subtopics, $2)
            END
            WHERE id = $1
            RETURNING id, name, created_by, parent, subtopics, date_created
        "#,
    )
    .bind(topic_id)
    .bind(subtopic_id)
    .fetch_optional(executor)
    .await
}

pub async fn pull_subtopic<'e, E>(
    executor: E,
    topic_id: Uuid,
    subtopic_id: Uuid,
) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE topics
            SET subtopics = array_remove(subtopics, $2)
            WHERE id = $1
            RETURNING id, name, created_by, parent, subtopics, date_created
        "#,
    )
    .bind(topic_id)
    .bind(subtopic_id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, topic_id: Uuid) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            DELETE FROM topics
            WHERE id = $1
            RETURNING id, name, created_by, parent, subtopics, date_created
        "#,
    )
    .bind(topic_id)
    .fetch_optional(executor)
    .await
}
