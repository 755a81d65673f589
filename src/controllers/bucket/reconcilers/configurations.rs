//! Analytics, intelligent-tiering, inventory and metrics configurations.
//!
//! A bucket holds a list of each, keyed by ID. Elements are put or deleted one at a time.

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::{debug, instrument, trace, warn};

use super::ResourceManager;
use crate::aws::{ApiError, S3Api};
use crate::metrics::ApiVerb;
use crate::resources::bucket_configurations::*;
use crate::Result;

#[async_trait]
pub trait NamedConfiguration: Clone + Debug + PartialEq + Send + Sync + 'static {
    const KIND: &'static str;
    const LIST_OPERATION: &'static str;
    const PUT_OPERATION: &'static str;
    const DELETE_OPERATION: &'static str;

    fn id(&self) -> &str;

    async fn list(s3: &dyn S3Api, bucket: &str) -> Result<Vec<Self>, ApiError>;
    async fn put(s3: &dyn S3Api, bucket: &str, config: &Self) -> Result<(), ApiError>;
    async fn delete(s3: &dyn S3Api, bucket: &str, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl NamedConfiguration for AnalyticsConfiguration {
    const KIND: &'static str = "analytics";
    const LIST_OPERATION: &'static str = "ListBucketAnalyticsConfigurations";
    const PUT_OPERATION: &'static str = "PutBucketAnalyticsConfiguration";
    const DELETE_OPERATION: &'static str = "DeleteBucketAnalyticsConfiguration";

    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    async fn list(s3: &dyn S3Api, bucket: &str) -> Result<Vec<Self>, ApiError> {
        s3.list_bucket_analytics_configurations(bucket).await
    }

    async fn put(s3: &dyn S3Api, bucket: &str, config: &Self) -> Result<(), ApiError> {
        s3.put_bucket_analytics_configuration(bucket, config).await
    }

    async fn delete(s3: &dyn S3Api, bucket: &str, id: &str) -> Result<(), ApiError> {
        s3.delete_bucket_analytics_configuration(bucket, id).await
    }
}

#[async_trait]
impl NamedConfiguration for IntelligentTieringConfiguration {
    const KIND: &'static str = "intelligent-tiering";
    const LIST_OPERATION: &'static str = "ListBucketIntelligentTieringConfigurations";
    const PUT_OPERATION: &'static str = "PutBucketIntelligentTieringConfiguration";
    const DELETE_OPERATION: &'static str = "DeleteBucketIntelligentTieringConfiguration";

    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    async fn list(s3: &dyn S3Api, bucket: &str) -> Result<Vec<Self>, ApiError> {
        s3.list_bucket_intelligent_tiering_configurations(bucket).await
    }

    async fn put(s3: &dyn S3Api, bucket: &str, config: &Self) -> Result<(), ApiError> {
        s3.put_bucket_intelligent_tiering_configuration(bucket, config)
            .await
    }

    async fn delete(s3: &dyn S3Api, bucket: &str, id: &str) -> Result<(), ApiError> {
        s3.delete_bucket_intelligent_tiering_configuration(bucket, id)
            .await
    }
}

#[async_trait]
impl NamedConfiguration for InventoryConfiguration {
    const KIND: &'static str = "inventory";
    const LIST_OPERATION: &'static str = "ListBucketInventoryConfigurations";
    const PUT_OPERATION: &'static str = "PutBucketInventoryConfiguration";
    const DELETE_OPERATION: &'static str = "DeleteBucketInventoryConfiguration";

    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    async fn list(s3: &dyn S3Api, bucket: &str) -> Result<Vec<Self>, ApiError> {
        s3.list_bucket_inventory_configurations(bucket).await
    }

    async fn put(s3: &dyn S3Api, bucket: &str, config: &Self) -> Result<(), ApiError> {
        s3.put_bucket_inventory_configuration(bucket, config).await
    }

    async fn delete(s3: &dyn S3Api, bucket: &str, id: &str) -> Result<(), ApiError> {
        s3.delete_bucket_inventory_configuration(bucket, id).await
    }
}

#[async_trait]
impl NamedConfiguration for MetricsConfiguration {
    const KIND: &'static str = "metrics";
    const LIST_OPERATION: &'static str = "ListBucketMetricsConfigurations";
    const PUT_OPERATION: &'static str = "PutBucketMetricsConfiguration";
    const DELETE_OPERATION: &'static str = "DeleteBucketMetricsConfiguration";

    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    async fn list(s3: &dyn S3Api, bucket: &str) -> Result<Vec<Self>, ApiError> {
        s3.list_bucket_metrics_configurations(bucket).await
    }

    async fn put(s3: &dyn S3Api, bucket: &str, config: &Self) -> Result<(), ApiError> {
        s3.put_bucket_metrics_configuration(bucket, config).await
    }

    async fn delete(s3: &dyn S3Api, bucket: &str, id: &str) -> Result<(), ApiError> {
        s3.delete_bucket_metrics_configuration(bucket, id).await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigurationAction {
    None,
    Put,
    Update,
    Delete,
}

/// Decides what to do with every configuration, by ID.
///
/// Desired configurations come first, in order, followed by the deletions. When an ID repeats,
/// the first configuration carrying it wins and the others are ignored.
pub fn plan<'a, C: NamedConfiguration>(
    desired: &'a [C],
    latest: Option<&'a [C]>,
) -> Vec<(ConfigurationAction, &'a C)> {
    let latest = latest.unwrap_or_default();
    let mut actions = Vec::with_capacity(desired.len() + latest.len());

    for (i, config) in desired.iter().enumerate() {
        if desired[..i].iter().any(|c| c.id() == config.id()) {
            warn!(
                "Ignoring {} configuration with duplicate ID {}",
                C::KIND,
                config.id()
            );
            continue;
        }
        let action = match latest.iter().find(|l| l.id() == config.id()) {
            None => ConfigurationAction::Put,
            Some(existing) if existing != config => ConfigurationAction::Update,
            Some(_) => ConfigurationAction::None,
        };
        actions.push((action, config));
    }

    for config in latest {
        if !desired.iter().any(|d| d.id() == config.id()) {
            actions.push((ConfigurationAction::Delete, config));
        }
    }
    actions
}

/// Puts every new or changed desired configuration, then deletes the observed ones no longer
/// desired. Without `latest` nothing is deleted.
///
/// Returns whether any configuration was put or deleted.
#[instrument(skip(manager, desired, latest), fields(kind = C::KIND))]
pub async fn sync_configurations<C: NamedConfiguration>(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&[C]>,
    latest: Option<&[C]>,
) -> Result<bool> {
    let mut mutated = false;
    for (action, config) in plan(desired.unwrap_or_default(), latest) {
        match action {
            ConfigurationAction::None => {
                trace!("{} configuration {} is up to date", C::KIND, config.id());
            }
            ConfigurationAction::Put | ConfigurationAction::Update => {
                debug!("Putting {} configuration {}", C::KIND, config.id());
                manager
                    .call(
                        ApiVerb::Update,
                        C::PUT_OPERATION,
                        C::put(manager.s3.as_ref(), bucket, config),
                    )
                    .await?;
                mutated = true;
            }
            ConfigurationAction::Delete => {
                debug!("Deleting {} configuration {}", C::KIND, config.id());
                manager
                    .call(
                        ApiVerb::Delete,
                        C::DELETE_OPERATION,
                        C::delete(manager.s3.as_ref(), bucket, config.id()),
                    )
                    .await?;
                mutated = true;
            }
        }
    }
    Ok(mutated)
}

#[instrument(skip(manager), fields(kind = C::KIND))]
pub async fn list_configurations<C: NamedConfiguration>(
    manager: &ResourceManager,
    bucket: &str,
) -> Result<Vec<C>> {
    Ok(manager
        .call(
            ApiVerb::ReadMany,
            C::LIST_OPERATION,
            C::list(manager.s3.as_ref(), bucket),
        )
        .await?)
}
