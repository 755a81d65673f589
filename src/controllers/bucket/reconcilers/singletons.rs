//! Sync functions for the sub-resources that hold a single configuration per bucket.
//!
//! Sub-resources with a Delete operation are deleted when the desired configuration is absent.
//! The others can only be reset, by putting an empty configuration with the S3 default filled in.

use tracing::{debug, instrument};

use super::{
    is_configured, ResourceManager, DEFAULT_ACCELERATE_STATUS, DEFAULT_PUBLIC_ACCESS_BLOCK,
    DEFAULT_REQUEST_PAYER, DEFAULT_VERSIONING_STATUS,
};
use crate::metrics::ApiVerb;
use crate::resources::bucket_configurations::*;
use crate::Result;

#[instrument(skip(manager, desired))]
pub async fn sync_accelerate(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&AccelerateConfiguration>,
) -> Result<()> {
    let mut config = desired.cloned().unwrap_or_default();
    config
        .status
        .get_or_insert_with(|| DEFAULT_ACCELERATE_STATUS.to_string());
    debug!("Putting accelerate configuration {:?}", config);
    manager
        .call(
            ApiVerb::Update,
            "PutBucketAccelerateConfiguration",
            manager.s3.put_bucket_accelerate_configuration(bucket, &config),
        )
        .await?;
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_cors(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&CorsConfiguration>,
) -> Result<()> {
    match desired {
        Some(config) if is_configured(&config.cors_rules) => {
            debug!("Putting CORS configuration");
            manager
                .call(
                    ApiVerb::Update,
                    "PutBucketCors",
                    manager.s3.put_bucket_cors(bucket, config),
                )
                .await?
        }
        _ => {
            debug!("Deleting CORS configuration");
            manager
                .call(
                    ApiVerb::Delete,
                    "DeleteBucketCors",
                    manager.s3.delete_bucket_cors(bucket),
                )
                .await?
        }
    }
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_encryption(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&ServerSideEncryptionConfiguration>,
) -> Result<()> {
    match desired {
        Some(config) if is_configured(&config.rules) => {
            debug!("Putting encryption configuration");
            manager
                .call(
                    ApiVerb::Update,
                    "PutBucketEncryption",
                    manager.s3.put_bucket_encryption(bucket, config),
                )
                .await?
        }
        _ => {
            debug!("Deleting encryption configuration");
            manager
                .call(
                    ApiVerb::Delete,
                    "DeleteBucketEncryption",
                    manager.s3.delete_bucket_encryption(bucket),
                )
                .await?
        }
    }
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_lifecycle(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&BucketLifecycleConfiguration>,
) -> Result<()> {
    match desired {
        Some(config) if is_configured(&config.rules) => {
            debug!("Putting lifecycle configuration");
            manager
                .call(
                    ApiVerb::Update,
                    "PutBucketLifecycleConfiguration",
                    manager.s3.put_bucket_lifecycle_configuration(bucket, config),
                )
                .await?
        }
        _ => {
            debug!("Deleting lifecycle configuration");
            manager
                .call(
                    ApiVerb::Delete,
                    "DeleteBucketLifecycle",
                    manager.s3.delete_bucket_lifecycle(bucket),
                )
                .await?
        }
    }
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_logging(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&BucketLoggingStatus>,
) -> Result<()> {
    let config = desired.cloned().unwrap_or_default();
    debug!("Putting logging status {:?}", config);
    manager
        .call(
            ApiVerb::Update,
            "PutBucketLogging",
            manager.s3.put_bucket_logging(bucket, &config),
        )
        .await?;
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_notification(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&NotificationConfiguration>,
) -> Result<()> {
    let config = desired.cloned().unwrap_or_default();
    debug!("Putting notification configuration");
    manager
        .call(
            ApiVerb::Update,
            "PutBucketNotificationConfiguration",
            manager.s3.put_bucket_notification_configuration(bucket, &config),
        )
        .await?;
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_ownership_controls(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&OwnershipControls>,
) -> Result<()> {
    match desired {
        Some(config) if is_configured(&config.rules) => {
            debug!("Putting ownership controls");
            manager
                .call(
                    ApiVerb::Update,
                    "PutBucketOwnershipControls",
                    manager.s3.put_bucket_ownership_controls(bucket, config),
                )
                .await?
        }
        _ => {
            debug!("Deleting ownership controls");
            manager
                .call(
                    ApiVerb::Delete,
                    "DeleteBucketOwnershipControls",
                    manager.s3.delete_bucket_ownership_controls(bucket),
                )
                .await?
        }
    }
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_public_access_block(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&PublicAccessBlockConfiguration>,
) -> Result<()> {
    match desired {
        Some(config) if *config != DEFAULT_PUBLIC_ACCESS_BLOCK => {
            debug!("Putting public access block {:?}", config);
            manager
                .call(
                    ApiVerb::Update,
                    "PutPublicAccessBlock",
                    manager.s3.put_public_access_block(bucket, config),
                )
                .await?
        }
        _ => {
            debug!("Deleting public access block");
            manager
                .call(
                    ApiVerb::Delete,
                    "DeletePublicAccessBlock",
                    manager.s3.delete_public_access_block(bucket),
                )
                .await?
        }
    }
    Ok(())
}

/// `ConfirmRemoveSelfBucketAccess` is sent as `false` except to directory buckets, which reject it
#[instrument(skip(manager, desired))]
pub async fn sync_policy(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&str>,
    directory: bool,
) -> Result<()> {
    match desired {
        Some(policy) => {
            debug!("Putting bucket policy");
            let confirm_remove_self_bucket_access = (!directory).then_some(false);
            manager
                .call(
                    ApiVerb::Update,
                    "PutBucketPolicy",
                    manager
                        .s3
                        .put_bucket_policy(bucket, policy, confirm_remove_self_bucket_access),
                )
                .await?
        }
        None => {
            debug!("Deleting bucket policy");
            manager
                .call(
                    ApiVerb::Delete,
                    "DeleteBucketPolicy",
                    manager.s3.delete_bucket_policy(bucket),
                )
                .await?
        }
    }
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_replication(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&ReplicationConfiguration>,
) -> Result<()> {
    match desired {
        Some(config) if is_configured(&config.rules) => {
            debug!("Putting replication configuration");
            manager
                .call(
                    ApiVerb::Update,
                    "PutBucketReplication",
                    manager.s3.put_bucket_replication(bucket, config),
                )
                .await?
        }
        _ => {
            debug!("Deleting replication configuration");
            manager
                .call(
                    ApiVerb::Delete,
                    "DeleteBucketReplication",
                    manager.s3.delete_bucket_replication(bucket),
                )
                .await?
        }
    }
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_request_payment(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&RequestPaymentConfiguration>,
) -> Result<()> {
    let mut config = desired.cloned().unwrap_or_default();
    config
        .payer
        .get_or_insert_with(|| DEFAULT_REQUEST_PAYER.to_string());
    debug!("Putting request payment configuration {:?}", config);
    manager
        .call(
            ApiVerb::Update,
            "PutBucketRequestPayment",
            manager.s3.put_bucket_request_payment(bucket, &config),
        )
        .await?;
    Ok(())
}

/// Tagging of general purpose buckets. Directory buckets are tagged through S3 Control, see
/// [`super::tagging`].
#[instrument(skip(manager, desired))]
pub async fn sync_tagging(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&Tagging>,
) -> Result<()> {
    match desired {
        Some(config) if is_configured(&config.tag_set) => {
            debug!("Putting bucket tags");
            manager
                .call(
                    ApiVerb::Update,
                    "PutBucketTagging",
                    manager.s3.put_bucket_tagging(bucket, config),
                )
                .await?
        }
        _ => {
            debug!("Deleting bucket tags");
            manager
                .call(
                    ApiVerb::Delete,
                    "DeleteBucketTagging",
                    manager.s3.delete_bucket_tagging(bucket),
                )
                .await?
        }
    }
    Ok(())
}

#[instrument(skip(manager, desired))]
pub async fn sync_versioning(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&VersioningConfiguration>,
) -> Result<()> {
    let mut config = desired.cloned().unwrap_or_default();
    config
        .status
        .get_or_insert_with(|| DEFAULT_VERSIONING_STATUS.to_string());
    debug!("Putting versioning configuration {:?}", config);
    manager
        .call(
            ApiVerb::Update,
            "PutBucketVersioning",
            manager.s3.put_bucket_versioning(bucket, &config),
        )
        .await?;
    Ok(())
}

/// A website configuration without an index document cannot be put, so it is deleted instead
#[instrument(skip(manager, desired))]
pub async fn sync_website(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<&WebsiteConfiguration>,
) -> Result<()> {
    match desired {
        Some(config) if config.index_document.is_some() => {
            debug!("Putting website configuration");
            manager
                .call(
                    ApiVerb::Update,
                    "PutBucketWebsite",
                    manager.s3.put_bucket_website(bucket, config),
                )
                .await?
        }
        _ => {
            debug!("Deleting website configuration");
            manager
                .call(
                    ApiVerb::Delete,
                    "DeleteBucketWebsite",
                    manager.s3.delete_bucket_website(bucket),
                )
                .await?
        }
    }
    Ok(())
}

#[instrument(skip(manager))]
pub async fn sync_object_lock(
    manager: &ResourceManager,
    bucket: &str,
    desired: Option<bool>,
) -> Result<()> {
    let enabled = desired.unwrap_or_default();
    debug!("Putting object lock configuration, enabled: {}", enabled);
    manager
        .call(
            ApiVerb::Update,
            "PutObjectLockConfiguration",
            manager.s3.put_object_lock_configuration(bucket, enabled),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::test_support::manager;
    use super::*;
    use crate::aws::fake::{FakeBucket, FakeS3};

    const BUCKET: &str = "my-bucket";

    fn fake() -> Arc<FakeS3> {
        Arc::new(FakeS3::with_bucket(BUCKET, FakeBucket::default()))
    }

    #[tokio::test]
    async fn absent_configurations_reset_to_defaults() {
        let fake = fake();
        let manager = manager(&fake);

        sync_accelerate(&manager, BUCKET, None).await.unwrap();
        sync_request_payment(&manager, BUCKET, None).await.unwrap();
        sync_versioning(&manager, BUCKET, None).await.unwrap();
        sync_logging(&manager, BUCKET, None).await.unwrap();

        let bucket = fake.bucket(BUCKET).unwrap();
        assert_eq!(bucket.accelerate.unwrap().status.as_deref(), Some("Suspended"));
        assert_eq!(bucket.request_payment.payer.as_deref(), Some("BucketOwner"));
        assert_eq!(bucket.versioning.status.as_deref(), Some("Suspended"));
        assert_eq!(bucket.logging, BucketLoggingStatus::default());
    }

    #[tokio::test]
    async fn absent_configurations_with_delete_operations_are_deleted() {
        let fake = fake();
        let manager = manager(&fake);

        sync_cors(&manager, BUCKET, None).await.unwrap();
        sync_cors(&manager, BUCKET, Some(&CorsConfiguration::default()))
            .await
            .unwrap();
        sync_encryption(&manager, BUCKET, None).await.unwrap();
        sync_lifecycle(&manager, BUCKET, None).await.unwrap();
        sync_ownership_controls(&manager, BUCKET, None).await.unwrap();
        sync_policy(&manager, BUCKET, None, false).await.unwrap();
        sync_replication(&manager, BUCKET, None).await.unwrap();
        sync_tagging(&manager, BUCKET, None).await.unwrap();

        assert_eq!(
            fake.mutations(),
            vec![
                "DeleteBucketCors",
                "DeleteBucketCors",
                "DeleteBucketEncryption",
                "DeleteBucketLifecycle",
                "DeleteBucketOwnershipControls",
                "DeleteBucketPolicy",
                "DeleteBucketReplication",
                "DeleteBucketTagging",
            ]
        );
    }

    #[tokio::test]
    async fn website_without_index_document_is_deleted() {
        let fake = fake();
        let manager = manager(&fake);

        let without_index = WebsiteConfiguration {
            error_document: Some(ErrorDocument {
                key: Some("error.html".into()),
            }),
            ..Default::default()
        };
        sync_website(&manager, BUCKET, Some(&without_index))
            .await
            .unwrap();

        let with_index = WebsiteConfiguration {
            index_document: Some(IndexDocument {
                suffix: Some("index.html".into()),
            }),
            ..Default::default()
        };
        sync_website(&manager, BUCKET, Some(&with_index)).await.unwrap();

        assert_eq!(fake.mutations(), vec!["DeleteBucketWebsite", "PutBucketWebsite"]);
        assert_eq!(fake.bucket(BUCKET).unwrap().website, Some(with_index));
    }

    #[tokio::test]
    async fn default_public_access_block_is_deleted() {
        let fake = fake();
        let manager = manager(&fake);

        sync_public_access_block(&manager, BUCKET, Some(&DEFAULT_PUBLIC_ACCESS_BLOCK))
            .await
            .unwrap();
        let blocking = PublicAccessBlockConfiguration {
            block_public_acls: Some(true),
            ..DEFAULT_PUBLIC_ACCESS_BLOCK
        };
        sync_public_access_block(&manager, BUCKET, Some(&blocking))
            .await
            .unwrap();

        assert_eq!(
            fake.mutations(),
            vec!["DeletePublicAccessBlock", "PutPublicAccessBlock"]
        );
    }

    #[tokio::test]
    async fn api_failures_propagate() {
        let fake = fake();
        let manager = manager(&fake);
        fake.fail("PutBucketCors", "AccessDenied");

        let config = CorsConfiguration {
            cors_rules: Some(vec![CorsRule {
                allowed_methods: Some(vec!["GET".into()]),
                allowed_origins: Some(vec!["*".into()]),
                ..Default::default()
            }]),
        };
        let err = sync_cors(&manager, BUCKET, Some(&config)).await.unwrap_err();
        assert!(matches!(err, crate::Error::ApiError(e) if e.has_code(&["AccessDenied"])));
    }

    #[tokio::test]
    async fn empty_rule_lists_are_deleted() {
        let fake = fake();
        let manager = manager(&fake);

        let cors = CorsConfiguration {
            cors_rules: Some(vec![]),
        };
        let lifecycle = BucketLifecycleConfiguration { rules: Some(vec![]) };
        let tagging = Tagging {
            tag_set: Some(vec![]),
        };
        sync_cors(&manager, BUCKET, Some(&cors)).await.unwrap();
        sync_lifecycle(&manager, BUCKET, Some(&lifecycle)).await.unwrap();
        sync_tagging(&manager, BUCKET, Some(&tagging)).await.unwrap();

        assert_eq!(
            fake.mutations(),
            vec![
                "DeleteBucketCors",
                "DeleteBucketLifecycle",
                "DeleteBucketTagging",
            ]
        );
    }

    #[tokio::test]
    async fn policy_confirms_self_access_only_for_general_buckets() {
        let fake = fake();
        let manager = manager(&fake);
        let policy = r#"{"Version":"2012-10-17","Statement":[]}"#;

        sync_policy(&manager, BUCKET, Some(policy), false)
            .await
            .unwrap();
        let bucket = fake.bucket(BUCKET).unwrap();
        assert_eq!(bucket.policy.as_deref(), Some(policy));
        assert_eq!(bucket.policy_confirm_remove_self_access, Some(false));

        sync_policy(&manager, BUCKET, Some(policy), true).await.unwrap();
        let bucket = fake.bucket(BUCKET).unwrap();
        assert_eq!(bucket.policy_confirm_remove_self_access, None);
    }
}
