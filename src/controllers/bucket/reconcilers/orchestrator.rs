//! Drives a bucket towards its desired state: find it, create it when missing, otherwise
//! compare it with the desired state and sync every sub-resource that drifted.
//!
//! Replication needs a versioned bucket, and a public policy may be rejected until the public
//! access block allows it. Sub-resources are therefore synced in a fixed order.

use tracing::{debug, info, instrument};

use super::configurations::sync_configurations;
use super::delta::Delta;
use super::directory::{self, is_directory_bucket_name};
use super::{acl, hydrate, is_configured, precompare, singletons, tagging, ResourceManager};
use crate::aws::{AclGrants, CreateBucketInput};
use crate::metrics::ApiVerb;
use crate::resources::buckets::{AdoptionPolicy, BucketSpec};
use crate::{Error, Result};

const NO_SUCH_BUCKET: &str = "NoSuchBucket";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The bucket did not exist and was created
    Created,
    /// The listed properties drifted and were synced
    Updated(Vec<&'static str>),
    InSync,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synced {
    pub outcome: SyncOutcome,
    pub arn: String,
    /// Only known when the bucket was created in this pass
    pub location: Option<String>,
}

/// One reconciliation pass for a bucket
#[instrument(skip(manager, desired), fields(bucket = %desired.name))]
pub async fn sync(
    manager: &ResourceManager,
    desired: &BucketSpec,
    adoption: AdoptionPolicy,
) -> Result<Synced> {
    directory::validate(desired)?;
    let arn = directory::bucket_arn(&desired.name, manager.region(), manager.account_id())?;

    let Some(mut observed) = find(manager, desired).await? else {
        if adoption == AdoptionPolicy::Adopt {
            return Err(Error::Terminal(format!(
                "bucket {} does not exist and the adoption policy does not allow creating it",
                desired.name
            )));
        }
        let location = create(manager, desired).await?;
        return Ok(Synced {
            outcome: SyncOutcome::Created,
            arn,
            location,
        });
    };

    let mut desired = desired.clone();
    precompare::normalize(&mut desired, &mut observed);
    let delta = Delta::new(&desired, &observed)?;
    if delta.is_empty() {
        debug!("Bucket is in sync");
        return Ok(Synced {
            outcome: SyncOutcome::InSync,
            arn,
            location: None,
        });
    }

    debug!("Bucket differs at {:?}", delta.paths().collect::<Vec<_>>());
    let changed = update(manager, &desired, &observed, &delta).await?;
    let outcome = if changed.is_empty() {
        SyncOutcome::InSync
    } else {
        SyncOutcome::Updated(changed)
    };
    Ok(Synced {
        outcome,
        arn,
        location: None,
    })
}

/// Returns the observed state of the bucket, or `None` when the caller owns no such bucket.
///
/// S3 has no call that answers "does this bucket exist and is it mine", so existence comes
/// from listing the caller's buckets.
#[instrument(skip(manager, desired), fields(bucket = %desired.name))]
pub async fn find(manager: &ResourceManager, desired: &BucketSpec) -> Result<Option<BucketSpec>> {
    let listed = if is_directory_bucket_name(&desired.name) {
        manager
            .call(
                ApiVerb::ReadMany,
                "ListDirectoryBuckets",
                manager.s3.list_directory_buckets(),
            )
            .await
    } else {
        manager
            .call(ApiVerb::ReadMany, "ListBuckets", manager.s3.list_buckets())
            .await
    };
    let names = match listed {
        Ok(names) => names,
        Err(e) if e.has_code(&[NO_SUCH_BUCKET]) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if !names.iter().any(|n| *n == desired.name) {
        debug!("Bucket not found");
        return Ok(None);
    }

    match hydrate::read_observed(manager, desired).await {
        Ok(observed) => Ok(Some(observed)),
        Err(Error::ApiError(e)) if e.has_code(&[NO_SUCH_BUCKET]) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Creates the bucket from its creation-time fields, then puts every other populated
/// sub-resource. Returns the bucket location.
#[instrument(skip(manager, desired), fields(bucket = %desired.name))]
pub async fn create(manager: &ResourceManager, desired: &BucketSpec) -> Result<Option<String>> {
    let input = CreateBucketInput {
        bucket: desired.name.clone(),
        grants: AclGrants {
            acl: non_blank(&desired.acl),
            grant_full_control: non_blank(&desired.grant_full_control),
            grant_read: non_blank(&desired.grant_read),
            grant_read_acp: non_blank(&desired.grant_read_acp),
            grant_write: non_blank(&desired.grant_write),
            grant_write_acp: non_blank(&desired.grant_write_acp),
        },
        create_bucket_configuration: desired.create_bucket_configuration.clone(),
        object_lock_enabled_for_bucket: desired.object_lock_enabled_for_bucket,
    };
    let location = manager
        .call(ApiVerb::Create, "CreateBucket", manager.s3.create_bucket(&input))
        .await?;
    info!("Created bucket at {:?}", location);

    put_fields(manager, desired).await?;
    Ok(location)
}

async fn put_fields(manager: &ResourceManager, desired: &BucketSpec) -> Result<()> {
    let bucket = desired.name.as_str();

    if is_directory_bucket_name(bucket) {
        if let Some(encryption) = &desired.encryption {
            singletons::sync_encryption(manager, bucket, Some(encryption))
                .await
                .map_err(Error::sync_property("Encryption"))?;
        }
        if let Some(lifecycle) = &desired.lifecycle {
            singletons::sync_lifecycle(manager, bucket, Some(lifecycle))
                .await
                .map_err(Error::sync_property("Lifecycle"))?;
        }
        if let Some(policy) = &desired.policy {
            singletons::sync_policy(manager, bucket, Some(policy), true)
                .await
                .map_err(Error::sync_property("Policy"))?;
        }
        if desired.tagging.is_some() {
            sync_tagging(manager, desired)
                .await
                .map_err(Error::sync_property("Tagging"))?;
        }
        return Ok(());
    }

    // Replication can only be configured on a versioned bucket
    if let Some(versioning) = &desired.versioning {
        singletons::sync_versioning(manager, bucket, Some(versioning))
            .await
            .map_err(Error::sync_property("Versioning"))?;
    }
    if let Some(accelerate) = &desired.accelerate {
        singletons::sync_accelerate(manager, bucket, Some(accelerate))
            .await
            .map_err(Error::sync_property("Accelerate"))?;
    }
    if let Some(analytics) = non_empty(&desired.analytics) {
        sync_configurations(manager, bucket, Some(analytics), None)
            .await
            .map_err(Error::sync_property("Analytics"))?;
    }
    if let Some(cors) = &desired.cors {
        singletons::sync_cors(manager, bucket, Some(cors))
            .await
            .map_err(Error::sync_property("CORS"))?;
    }
    if let Some(encryption) = &desired.encryption {
        singletons::sync_encryption(manager, bucket, Some(encryption))
            .await
            .map_err(Error::sync_property("Encryption"))?;
    }
    if let Some(tiering) = non_empty(&desired.intelligent_tiering) {
        sync_configurations(manager, bucket, Some(tiering), None)
            .await
            .map_err(Error::sync_property("IntelligentTiering"))?;
    }
    if let Some(inventory) = non_empty(&desired.inventory) {
        sync_configurations(manager, bucket, Some(inventory), None)
            .await
            .map_err(Error::sync_property("Inventory"))?;
    }
    if let Some(lifecycle) = &desired.lifecycle {
        singletons::sync_lifecycle(manager, bucket, Some(lifecycle))
            .await
            .map_err(Error::sync_property("Lifecycle"))?;
    }
    if let Some(logging) = &desired.logging {
        singletons::sync_logging(manager, bucket, Some(logging))
            .await
            .map_err(Error::sync_property("Logging"))?;
    }
    if let Some(metrics) = non_empty(&desired.metrics) {
        sync_configurations(manager, bucket, Some(metrics), None)
            .await
            .map_err(Error::sync_property("Metrics"))?;
    }
    if let Some(notification) = &desired.notification {
        singletons::sync_notification(manager, bucket, Some(notification))
            .await
            .map_err(Error::sync_property("Notification"))?;
    }
    if let Some(controls) = &desired.ownership_controls {
        singletons::sync_ownership_controls(manager, bucket, Some(controls))
            .await
            .map_err(Error::sync_property("OwnershipControls"))?;
    }
    // A public policy is rejected while the public access block forbids it
    if let Some(block) = &desired.public_access_block {
        singletons::sync_public_access_block(manager, bucket, Some(block))
            .await
            .map_err(Error::sync_property("PublicAccessBlock"))?;
    }
    if let Some(policy) = &desired.policy {
        singletons::sync_policy(manager, bucket, Some(policy), false)
            .await
            .map_err(Error::sync_property("Policy"))?;
    }
    if let Some(replication) = &desired.replication {
        singletons::sync_replication(manager, bucket, Some(replication))
            .await
            .map_err(Error::sync_property("Replication"))?;
    }
    if let Some(payment) = &desired.request_payment {
        singletons::sync_request_payment(manager, bucket, Some(payment))
            .await
            .map_err(Error::sync_property("RequestPayment"))?;
    }
    if desired.tagging.is_some() {
        sync_tagging(manager, desired)
            .await
            .map_err(Error::sync_property("Tagging"))?;
    }
    if let Some(website) = &desired.website {
        singletons::sync_website(manager, bucket, Some(website))
            .await
            .map_err(Error::sync_property("Website"))?;
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|l| !l.is_empty())
}

async fn sync_tagging(manager: &ResourceManager, desired: &BucketSpec) -> Result<()> {
    if !is_directory_bucket_name(&desired.name) {
        return singletons::sync_tagging(manager, &desired.name, desired.tagging.as_ref()).await;
    }
    let account_id = manager
        .account_id()
        .ok_or_else(|| Error::MissingAccountId(desired.name.clone()))?;
    let arn = directory::bucket_arn(&desired.name, manager.region(), Some(account_id))?;
    tagging::sync_resource_tags(manager, account_id, &arn, desired.tagging.as_ref()).await
}

/// Syncs every sub-resource `delta` reports as changed. Returns the names of the synced
/// properties, in the order they were synced.
#[instrument(skip_all, fields(bucket = %desired.name))]
pub async fn update(
    manager: &ResourceManager,
    desired: &BucketSpec,
    observed: &BucketSpec,
    delta: &Delta,
) -> Result<Vec<&'static str>> {
    let bucket = desired.name.as_str();
    let general = !is_directory_bucket_name(bucket);
    let changed = |path: &str| delta.different_at(path);
    let mut synced = Vec::new();

    if general && changed("spec.accelerate") {
        singletons::sync_accelerate(manager, bucket, desired.accelerate.as_ref())
            .await
            .map_err(Error::sync_property("Accelerate"))?;
        synced.push("Accelerate");
    }
    if general && changed("spec.analytics") {
        let mutated = sync_configurations(
            manager,
            bucket,
            desired.analytics.as_deref(),
            observed.analytics.as_deref(),
        )
        .await
        .map_err(Error::sync_property("Analytics"))?;
        if mutated {
            synced.push("Analytics");
        }
    }
    let acl_changed = [
        "spec.acl",
        "spec.grantFullControl",
        "spec.grantRead",
        "spec.grantReadACP",
        "spec.grantWrite",
        "spec.grantWriteACP",
    ]
    .into_iter()
    .any(changed);
    if general && acl_changed {
        acl::sync_acl(manager, desired)
            .await
            .map_err(Error::sync_property("ACLs or Grant Headers"))?;
        synced.push("ACLs or Grant Headers");
    }
    if general && changed("spec.cors") {
        singletons::sync_cors(manager, bucket, desired.cors.as_ref())
            .await
            .map_err(Error::sync_property("CORS"))?;
        synced.push("CORS");
    }
    if changed("spec.encryption") {
        singletons::sync_encryption(manager, bucket, desired.encryption.as_ref())
            .await
            .map_err(Error::sync_property("Encryption"))?;
        synced.push("Encryption");
    }
    if general && changed("spec.intelligentTiering") {
        let mutated = sync_configurations(
            manager,
            bucket,
            desired.intelligent_tiering.as_deref(),
            observed.intelligent_tiering.as_deref(),
        )
        .await
        .map_err(Error::sync_property("IntelligentTiering"))?;
        if mutated {
            synced.push("IntelligentTiering");
        }
    }
    if general && changed("spec.inventory") {
        let mutated = sync_configurations(
            manager,
            bucket,
            desired.inventory.as_deref(),
            observed.inventory.as_deref(),
        )
        .await
        .map_err(Error::sync_property("Inventory"))?;
        if mutated {
            synced.push("Inventory");
        }
    }
    if changed("spec.lifecycle") {
        singletons::sync_lifecycle(manager, bucket, desired.lifecycle.as_ref())
            .await
            .map_err(Error::sync_property("Lifecycle"))?;
        synced.push("Lifecycle");
    }
    if general && changed("spec.logging") {
        singletons::sync_logging(manager, bucket, desired.logging.as_ref())
            .await
            .map_err(Error::sync_property("Logging"))?;
        synced.push("Logging");
    }
    if general && changed("spec.metrics") {
        let mutated = sync_configurations(
            manager,
            bucket,
            desired.metrics.as_deref(),
            observed.metrics.as_deref(),
        )
        .await
        .map_err(Error::sync_property("Metrics"))?;
        if mutated {
            synced.push("Metrics");
        }
    }
    if general && changed("spec.notification") {
        singletons::sync_notification(manager, bucket, desired.notification.as_ref())
            .await
            .map_err(Error::sync_property("Notification"))?;
        synced.push("Notification");
    }
    if general && changed("spec.ownershipControls") {
        singletons::sync_ownership_controls(manager, bucket, desired.ownership_controls.as_ref())
            .await
            .map_err(Error::sync_property("OwnershipControls"))?;
        synced.push("OwnershipControls");
    }
    if general && changed("spec.publicAccessBlock") {
        singletons::sync_public_access_block(manager, bucket, desired.public_access_block.as_ref())
            .await
            .map_err(Error::sync_property("PublicAccessBlock"))?;
        synced.push("PublicAccessBlock");
    }
    if changed("spec.policy") {
        singletons::sync_policy(manager, bucket, desired.policy.as_deref(), !general)
            .await
            .map_err(Error::sync_property("Policy"))?;
        synced.push("Policy");
    }
    if general && changed("spec.requestPayment") {
        singletons::sync_request_payment(manager, bucket, desired.request_payment.as_ref())
            .await
            .map_err(Error::sync_property("RequestPayment"))?;
        synced.push("RequestPayment");
    }
    if changed("spec.tagging") {
        sync_tagging(manager, desired)
            .await
            .map_err(Error::sync_property("Tagging"))?;
        synced.push("Tagging");
    }
    if general && changed("spec.website") {
        singletons::sync_website(manager, bucket, desired.website.as_ref())
            .await
            .map_err(Error::sync_property("Website"))?;
        synced.push("Website");
    }

    // Replication is removed before versioning is suspended, and versioning enabled before
    // replication is added
    if general && (changed("spec.replication") || changed("spec.versioning")) {
        let removing_replication = desired
            .replication
            .as_ref()
            .map_or(true, |r| !is_configured(&r.rules));
        if removing_replication {
            sync_replication(manager, desired).await?;
            sync_versioning(manager, desired).await?;
            synced.extend(["Replication", "Versioning"]);
        } else {
            sync_versioning(manager, desired).await?;
            sync_replication(manager, desired).await?;
            synced.extend(["Versioning", "Replication"]);
        }
    }

    if general && changed("spec.objectLockEnabledForBucket") {
        singletons::sync_object_lock(manager, bucket, desired.object_lock_enabled_for_bucket)
            .await
            .map_err(Error::sync_property("ObjectLock"))?;
        synced.push("ObjectLock");
    }
    Ok(synced)
}

async fn sync_replication(manager: &ResourceManager, desired: &BucketSpec) -> Result<()> {
    singletons::sync_replication(manager, &desired.name, desired.replication.as_ref())
        .await
        .map_err(Error::sync_property("Replication"))
}

async fn sync_versioning(manager: &ResourceManager, desired: &BucketSpec) -> Result<()> {
    singletons::sync_versioning(manager, &desired.name, desired.versioning.as_ref())
        .await
        .map_err(Error::sync_property("Versioning"))
}

/// Deletes the bucket. A bucket that is already gone counts as deleted.
#[instrument(skip(manager))]
pub async fn delete(manager: &ResourceManager, bucket: &str) -> Result<()> {
    let result = manager
        .call(ApiVerb::Delete, "DeleteBucket", manager.s3.delete_bucket(bucket))
        .await;
    match result {
        Ok(()) => {
            info!("Deleted bucket");
            Ok(())
        }
        Err(e) if e.has_code(&[NO_SUCH_BUCKET]) => {
            debug!("Bucket was already deleted");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use prometheus::core::Collector;

    use super::super::test_support::{manager, ACCOUNT_ID};
    use super::*;
    use crate::aws::fake::{private_acl, FakeBucket, FakeS3};
    use crate::resources::bucket_configurations::*;

    fn versioning(status: &str) -> VersioningConfiguration {
        VersioningConfiguration {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    fn replication() -> ReplicationConfiguration {
        ReplicationConfiguration {
            role: Some("arn:aws:iam::111122223333:role/replication".into()),
            rules: Some(vec![ReplicationRule {
                id: Some("all".into()),
                status: Some("Enabled".into()),
                destination: Some(ReplicationDestination {
                    bucket: Some("arn:aws:s3:::replica".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }]),
        }
    }

    fn tags() -> Tagging {
        Tagging {
            tag_set: Some(vec![Tag {
                key: Some("team".into()),
                value: Some("storage".into()),
            }]),
        }
    }

    fn full_spec(name: &str) -> BucketSpec {
        BucketSpec {
            name: name.into(),
            versioning: Some(versioning("Enabled")),
            replication: Some(replication()),
            policy: Some(r#"{"Version":"2012-10-17","Statement":[]}"#.into()),
            public_access_block: Some(PublicAccessBlockConfiguration {
                block_public_acls: Some(true),
                block_public_policy: Some(false),
                ignore_public_acls: Some(true),
                restrict_public_buckets: Some(false),
            }),
            cors: Some(CorsConfiguration {
                cors_rules: Some(vec![CorsRule {
                    allowed_methods: Some(vec!["GET".into()]),
                    allowed_origins: Some(vec!["*".into()]),
                    ..Default::default()
                }]),
            }),
            analytics: Some(vec![AnalyticsConfiguration {
                id: Some("a".into()),
                ..Default::default()
            }]),
            tagging: Some(tags()),
            ..Default::default()
        }
    }

    fn existing(bucket: FakeBucket) -> FakeBucket {
        FakeBucket {
            acl: private_acl(),
            request_payment: RequestPaymentConfiguration {
                payer: Some("BucketOwner".into()),
            },
            ..bucket
        }
    }

    #[tokio::test]
    async fn create_puts_sub_resources_in_dependency_order() {
        let fake = Arc::new(FakeS3::default());
        let manager = manager(&fake);

        let synced = sync(&manager, &full_spec("b"), AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();

        assert_eq!(synced.outcome, SyncOutcome::Created);
        assert_eq!(synced.arn, "arn:aws:s3:::b");
        assert_eq!(synced.location.as_deref(), Some("/b"));
        assert_eq!(
            fake.mutations(),
            vec![
                "CreateBucket",
                "PutBucketVersioning",
                "PutBucketAnalyticsConfiguration:a",
                "PutBucketCors",
                "PutPublicAccessBlock",
                "PutBucketPolicy",
                "PutBucketReplication",
                "PutBucketTagging",
            ]
        );
        assert_eq!(
            fake.bucket("b").unwrap().policy_confirm_remove_self_access,
            Some(false)
        );
    }

    #[tokio::test]
    async fn created_bucket_is_in_sync_on_the_next_pass() {
        let fake = Arc::new(FakeS3::default());
        let manager = manager(&fake);
        let spec = full_spec("b");

        sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        fake.clear_calls();

        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(synced.outcome, SyncOutcome::InSync);
        assert!(fake.mutations().is_empty(), "{:?}", fake.mutations());
    }

    #[tokio::test]
    async fn empty_resource_adopts_default_bucket_without_changes() {
        let fake = Arc::new(FakeS3::with_bucket("b", existing(FakeBucket::default())));
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b".into(),
            ..Default::default()
        };

        let synced = sync(&manager, &spec, AdoptionPolicy::Adopt).await.unwrap();
        assert_eq!(synced.outcome, SyncOutcome::InSync);
        assert!(fake.mutations().is_empty());
    }

    #[tokio::test]
    async fn removing_replication_precedes_suspending_versioning() {
        let fake = Arc::new(FakeS3::with_bucket(
            "b",
            existing(FakeBucket {
                versioning: versioning("Enabled"),
                replication: Some(replication()),
                ..Default::default()
            }),
        ));
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b".into(),
            versioning: Some(versioning("Suspended")),
            ..Default::default()
        };

        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();

        assert_eq!(
            synced.outcome,
            SyncOutcome::Updated(vec!["Replication", "Versioning"])
        );
        assert_eq!(
            fake.mutations(),
            vec!["DeleteBucketReplication", "PutBucketVersioning"]
        );
    }

    #[tokio::test]
    async fn enabling_versioning_precedes_adding_replication() {
        let fake = Arc::new(FakeS3::with_bucket("b", existing(FakeBucket::default())));
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b".into(),
            versioning: Some(versioning("Enabled")),
            replication: Some(replication()),
            ..Default::default()
        };

        sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(
            fake.mutations(),
            vec!["PutBucketVersioning", "PutBucketReplication"]
        );
    }

    #[tokio::test]
    async fn canned_acl_change_puts_acl() {
        let fake = Arc::new(FakeS3::with_bucket("b", existing(FakeBucket::default())));
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b".into(),
            acl: Some("public-read".into()),
            ..Default::default()
        };

        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(
            synced.outcome,
            SyncOutcome::Updated(vec!["ACLs or Grant Headers"])
        );
        assert_eq!(
            fake.bucket("b").unwrap().last_acl_put.unwrap().acl.as_deref(),
            Some("public-read")
        );
    }

    #[tokio::test]
    async fn list_configurations_are_diffed_by_id() {
        let mut bucket = existing(FakeBucket::default());
        for id in ["keep", "stale"] {
            bucket.inventory.insert(
                id.into(),
                InventoryConfiguration {
                    id: Some(id.into()),
                    ..Default::default()
                },
            );
        }
        let fake = Arc::new(FakeS3::with_bucket("b", bucket));
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b".into(),
            inventory: Some(vec![
                InventoryConfiguration {
                    id: Some("keep".into()),
                    ..Default::default()
                },
                InventoryConfiguration {
                    id: Some("new".into()),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(
            fake.mutations(),
            vec![
                "PutBucketInventoryConfiguration:new",
                "DeleteBucketInventoryConfiguration:stale",
            ]
        );
    }

    #[tokio::test]
    async fn list_and_tag_order_settles_after_one_pass() {
        let fake = Arc::new(FakeS3::with_bucket("b", existing(FakeBucket::default())));
        let manager = manager(&fake);
        let analytics = |id: &str| AnalyticsConfiguration {
            id: Some(id.into()),
            ..Default::default()
        };
        let spec = BucketSpec {
            name: "b".into(),
            analytics: Some(vec![analytics("z"), analytics("a")]),
            tagging: Some(Tagging {
                tag_set: Some(vec![
                    Tag {
                        key: Some("team".into()),
                        value: Some("storage".into()),
                    },
                    Tag {
                        key: Some("env".into()),
                        value: Some("prod".into()),
                    },
                ]),
            }),
            ..Default::default()
        };

        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(
            synced.outcome,
            SyncOutcome::Updated(vec!["Analytics", "Tagging"])
        );
        assert_eq!(
            fake.mutations(),
            vec![
                "PutBucketAnalyticsConfiguration:a",
                "PutBucketAnalyticsConfiguration:z",
                "PutBucketTagging",
            ]
        );

        for _ in 0..2 {
            fake.clear_calls();
            let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
                .await
                .unwrap();
            assert_eq!(synced.outcome, SyncOutcome::InSync);
            assert!(fake.mutations().is_empty(), "{:?}", fake.mutations());
        }
    }

    #[tokio::test]
    async fn tags_stored_in_another_order_are_in_sync() {
        let tag = |key: &str| Tag {
            key: Some(key.into()),
            value: Some("v".into()),
        };
        let fake = Arc::new(FakeS3::with_bucket(
            "b",
            existing(FakeBucket {
                tagging: Some(Tagging {
                    tag_set: Some(vec![tag("team"), tag("env")]),
                }),
                ..Default::default()
            }),
        ));
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b".into(),
            tagging: Some(Tagging {
                tag_set: Some(vec![tag("env"), tag("team")]),
            }),
            ..Default::default()
        };

        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(synced.outcome, SyncOutcome::InSync);
        assert!(fake.mutations().is_empty());
    }

    #[tokio::test]
    async fn empty_lists_delete_configured_sub_resources() {
        let fake = Arc::new(FakeS3::with_bucket(
            "b",
            existing(FakeBucket {
                cors: full_spec("b").cors,
                lifecycle: Some(BucketLifecycleConfiguration {
                    rules: Some(vec![LifecycleRule {
                        id: Some("expire".into()),
                        status: Some("Enabled".into()),
                        ..Default::default()
                    }]),
                }),
                tagging: Some(tags()),
                ..Default::default()
            }),
        ));
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b".into(),
            cors: Some(CorsConfiguration {
                cors_rules: Some(vec![]),
            }),
            lifecycle: Some(BucketLifecycleConfiguration { rules: Some(vec![]) }),
            tagging: Some(Tagging {
                tag_set: Some(vec![]),
            }),
            ..Default::default()
        };

        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(
            synced.outcome,
            SyncOutcome::Updated(vec!["CORS", "Lifecycle", "Tagging"])
        );
        assert_eq!(
            fake.mutations(),
            vec![
                "DeleteBucketCors",
                "DeleteBucketLifecycle",
                "DeleteBucketTagging",
            ]
        );

        fake.clear_calls();
        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(synced.outcome, SyncOutcome::InSync);
        assert!(fake.mutations().is_empty());
    }

    #[tokio::test]
    async fn object_lock_is_enabled_on_an_existing_bucket() {
        let fake = Arc::new(FakeS3::with_bucket("b", existing(FakeBucket::default())));
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b".into(),
            object_lock_enabled_for_bucket: Some(true),
            ..Default::default()
        };

        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(synced.outcome, SyncOutcome::Updated(vec!["ObjectLock"]));
        assert_eq!(fake.mutations(), vec!["PutObjectLockConfiguration"]);
        assert!(fake.bucket("b").unwrap().object_lock);
    }

    #[tokio::test]
    async fn object_lock_without_an_opinion_is_left_alone() {
        let fake = Arc::new(FakeS3::with_bucket(
            "b",
            existing(FakeBucket {
                object_lock: true,
                ..Default::default()
            }),
        ));
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b".into(),
            ..Default::default()
        };

        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(synced.outcome, SyncOutcome::InSync);
        assert!(fake.calls().contains(&"GetObjectLockConfiguration".to_string()));
        assert!(fake.mutations().is_empty());
        assert!(fake.bucket("b").unwrap().object_lock);
    }

    #[tokio::test]
    async fn sub_resource_failures_name_the_property() {
        let fake = Arc::new(FakeS3::default());
        fake.fail("PutBucketCors", "MalformedXML");
        let manager = manager(&fake);

        let err = sync(&manager, &full_spec("b"), AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Error syncing property 'CORS'"));
        assert!(err.is_terminal(&["MalformedXML".to_string()]));
    }

    #[tokio::test]
    async fn adopt_policy_never_creates() {
        let fake = Arc::new(FakeS3::default());
        let manager = manager(&fake);

        let err = sync(&manager, &full_spec("b"), AdoptionPolicy::Adopt)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Terminal(_)));
        assert!(fake.mutations().is_empty());
    }

    #[tokio::test]
    async fn directory_bucket_creation_routes_tags_through_s3_control() {
        let name = "b--usw2-az1--x-s3";
        let fake = Arc::new(FakeS3::default());
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: name.into(),
            policy: Some("{}".into()),
            tagging: Some(tags()),
            ..Default::default()
        };

        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();

        let arn = format!("arn:aws:s3express:us-west-2:{ACCOUNT_ID}:bucket/{name}");
        assert_eq!(synced.arn, arn);
        assert_eq!(
            fake.calls(),
            vec![
                "ListDirectoryBuckets",
                "CreateBucket",
                "PutBucketPolicy",
                "ListTagsForResource",
                "TagResource",
            ]
        );
        assert_eq!(fake.resource_tags(&arn), tags().tag_set.unwrap());
        assert_eq!(fake.bucket(name).unwrap().policy_confirm_remove_self_access, None);

        fake.clear_calls();
        let synced = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        assert_eq!(synced.outcome, SyncOutcome::InSync);
    }

    #[tokio::test]
    async fn directory_bucket_with_unsupported_fields_is_rejected_before_any_call() {
        let fake = Arc::new(FakeS3::default());
        let manager = manager(&fake);
        let spec = BucketSpec {
            name: "b--usw2-az1--x-s3".into(),
            versioning: Some(versioning("Enabled")),
            ..Default::default()
        };

        let err = sync(&manager, &spec, AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap_err();
        assert!(err.is_terminal(&[]));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_tolerates_missing_bucket() {
        let fake = Arc::new(FakeS3::with_bucket("b", FakeBucket::default()));
        let manager = manager(&fake);

        delete(&manager, "b").await.unwrap();
        delete(&manager, "b").await.unwrap();
        assert_eq!(fake.calls(), vec!["DeleteBucket", "DeleteBucket"]);
        assert!(fake.bucket("b").is_none());
    }

    #[tokio::test]
    async fn every_api_call_is_counted_once() {
        let fake = Arc::new(FakeS3::default());
        let manager = manager(&fake);

        sync(&manager, &full_spec("b"), AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();
        sync(&manager, &full_spec("b"), AdoptionPolicy::AdoptOrCreate)
            .await
            .unwrap();

        let counted: f64 = manager
            .metrics
            .api_calls
            .collect()
            .iter()
            .flat_map(|family| family.get_metric())
            .map(|m| m.get_counter().get_value())
            .sum();
        assert_eq!(counted as usize, fake.calls().len());
    }
}
