//! Read side of the hierarchy.
//!
//! Every function takes the store as a `&dyn DocumentStore` and returns owned
//! [`HierarchyNode`]s, so the traversal runs the same against Postgres and the
//! in-memory store. Sibling lookups fan out concurrently; result order always
//! follows the stored id lists.

use futures::future::{BoxFuture, FutureExt, try_join_all};
use swot_db::{
    DocumentStore, StoreError,
    models::{Topic, User},
};
use uuid::Uuid;

use super::model::{HierarchyNode, QuizSummary};

/// Load every root topic of `user`, in `user.topics` order, with its full subtree.
///
/// Ids listed in `user.topics` that no longer exist are logged and skipped.
pub async fn load_user_hierarchy(
    store: &dyn DocumentStore,
    user: &User,
) -> Result<Vec<HierarchyNode>, StoreError> {
    let roots = find_listed(store, &user.topics, |missing| {
        tracing::warn!(
            topic_id = %missing,
            user_id = %user.id,
            user_email = %user.email,
            "Topic exists in user.topics but could not be found in topics collection"
        );
        metrics::counter!("hierarchy_dangling_references_total", "list" => "user.topics")
            .increment(1);
    })
    .await?;

    try_join_all(roots.into_iter().map(|topic| load_subtree(store, topic))).await
}

/// Attach quizzes and (recursively) subtopics to `topic`.
pub fn load_subtree(
    store: &dyn DocumentStore,
    topic: Topic,
) -> BoxFuture<'_, Result<HierarchyNode, StoreError>> {
    async move {
        let (quizzes, children) = futures::try_join!(
            store.find_quizzes_by_topic(topic.id),
            find_listed(store, &topic.subtopics, |missing| {
                tracing::warn!(
                    topic_id = %missing,
                    parent_id = %topic.id,
                    "Topic exists in subtopics of its parent but could not be found in topics collection"
                );
                metrics::counter!("hierarchy_dangling_references_total", "list" => "topic.subtopics")
                    .increment(1);
            }),
        )?;

        let subtopics =
            try_join_all(children.into_iter().map(|child| load_subtree(store, child))).await?;
        let quizzes = quizzes.into_iter().map(QuizSummary::from).collect();

        Ok(HierarchyNode::new(topic, quizzes, subtopics))
    }
    .boxed()
}

/// Fetch the topics named by `ids`, keeping their order and dropping missing ones.
async fn find_listed(
    store: &dyn DocumentStore,
    ids: &[Uuid],
    on_missing: impl Fn(Uuid),
) -> Result<Vec<Topic>, StoreError> {
    let found = try_join_all(ids.iter().map(|id| store.find_topic(*id))).await?;

    Ok(ids
        .iter()
        .zip(found)
        .filter_map(|(id, topic)| {
            if topic.is_none() {
                on_missing(*id);
            }
            topic
        })
        .collect())
}
