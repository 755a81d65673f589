//! Directory bucket tags live in S3 Control, addressed by ARN.
//!
//! S3 Control can only add tags or remove keys, so replacing the tag set takes two calls.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use super::{absent_on, ResourceManager};
use crate::metrics::ApiVerb;
use crate::resources::bucket_configurations::{Tag, Tagging};
use crate::Result;

const NO_SUCH_TAG_SET: &str = "NoSuchTagSet";

async fn current_tags(
    manager: &ResourceManager,
    account_id: &str,
    arn: &str,
) -> Result<Vec<Tag>> {
    let tags = manager
        .call(
            ApiVerb::ReadMany,
            "ListTagsForResource",
            manager.control.list_tags_for_resource(account_id, arn),
        )
        .await;
    Ok(absent_on(tags, &[NO_SUCH_TAG_SET])?.unwrap_or_default())
}

async fn untag(
    manager: &ResourceManager,
    account_id: &str,
    arn: &str,
    keys: Vec<String>,
) -> Result<()> {
    if keys.is_empty() {
        return Ok(());
    }
    debug!("Removing tags {:?}", keys);
    manager
        .call(
            ApiVerb::Delete,
            "UntagResource",
            manager.control.untag_resource(account_id, arn, &keys),
        )
        .await?;
    Ok(())
}

/// The tags of a directory bucket. `None` when S3 Control reports no tag set.
#[instrument(skip(manager))]
pub async fn get_resource_tags(
    manager: &ResourceManager,
    account_id: &str,
    arn: &str,
) -> Result<Option<Tagging>> {
    let tags = manager
        .call(
            ApiVerb::ReadMany,
            "ListTagsForResource",
            manager.control.list_tags_for_resource(account_id, arn),
        )
        .await;
    Ok(absent_on(tags, &[NO_SUCH_TAG_SET])?.map(|tags| Tagging {
        tag_set: (!tags.is_empty()).then_some(tags),
    }))
}

/// Makes the tags of a directory bucket exactly `desired`
#[instrument(skip(manager, desired))]
pub async fn put_resource_tags(
    manager: &ResourceManager,
    account_id: &str,
    arn: &str,
    desired: &[Tag],
) -> Result<()> {
    let desired_keys: BTreeSet<&str> = desired.iter().filter_map(|t| t.key.as_deref()).collect();
    let stale: Vec<String> = current_tags(manager, account_id, arn)
        .await?
        .into_iter()
        .filter_map(|t| t.key)
        .filter(|k| !desired_keys.contains(k.as_str()))
        .collect();
    untag(manager, account_id, arn, stale).await?;

    if !desired.is_empty() {
        debug!("Tagging resource with {} tags", desired.len());
        manager
            .call(
                ApiVerb::Update,
                "TagResource",
                manager.control.tag_resource(account_id, arn, desired),
            )
            .await?;
    }
    Ok(())
}

/// Removes every tag from a directory bucket
#[instrument(skip(manager))]
pub async fn delete_resource_tags(
    manager: &ResourceManager,
    account_id: &str,
    arn: &str,
) -> Result<()> {
    let keys = current_tags(manager, account_id, arn)
        .await?
        .into_iter()
        .filter_map(|t| t.key)
        .collect();
    untag(manager, account_id, arn, keys).await
}

#[instrument(skip(manager, desired))]
pub async fn sync_resource_tags(
    manager: &ResourceManager,
    account_id: &str,
    arn: &str,
    desired: Option<&Tagging>,
) -> Result<()> {
    match desired.and_then(|t| t.tag_set.as_deref()) {
        Some(tags) => put_resource_tags(manager, account_id, arn, tags).await,
        None => delete_resource_tags(manager, account_id, arn).await,
    }
}
