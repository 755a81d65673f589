//! Reads the live configuration of a bucket into a [`BucketSpec`] so it can be compared with the
//! desired one.
//!
//! Sub-resources that S3 reports as "not configured" read as `None`. Sub-resources that always
//! exist read as their current value, even when that is the S3 default.

use tracing::{debug, instrument};

use super::configurations::list_configurations;
use super::directory::is_directory_bucket_name;
use super::{absent_on, acl, tagging, ResourceManager};
use crate::metrics::ApiVerb;
use crate::resources::buckets::BucketSpec;
use crate::{Error, Result};

/// Accelerate configuration is not available in every region
const ACCELERATE_UNSUPPORTED: &[&str] = &["MethodNotAllowed", "UnsupportedArgument"];

/// Reads every sub-resource the bucket type supports.
///
/// Creation-time fields cannot be read back and are carried over from `desired`.
#[instrument(skip(manager, desired), fields(bucket = %desired.name))]
pub async fn read_observed(manager: &ResourceManager, desired: &BucketSpec) -> Result<BucketSpec> {
    let mut observed = BucketSpec {
        name: desired.name.clone(),
        create_bucket_configuration: desired.create_bucket_configuration.clone(),
        ..Default::default()
    };
    if is_directory_bucket_name(&desired.name) {
        read_directory_bucket(manager, &mut observed).await?;
    } else {
        read_general_purpose_bucket(manager, &mut observed).await?;
    }
    debug!("Read observed state of bucket");
    Ok(observed)
}

/// Only encryption, lifecycle, policy and tags exist on a directory bucket. Every other field
/// stays `None` without calling its Get operation.
async fn read_directory_bucket(manager: &ResourceManager, spec: &mut BucketSpec) -> Result<()> {
    let bucket = spec.name.clone();
    let s3 = manager.s3.as_ref();

    spec.encryption = absent_on(
        manager
            .call(ApiVerb::ReadOne, "GetBucketEncryption", s3.get_bucket_encryption(&bucket))
            .await,
        &["ServerSideEncryptionConfigurationNotFoundError"],
    )?;
    spec.lifecycle = absent_on(
        manager
            .call(
                ApiVerb::ReadOne,
                "GetBucketLifecycleConfiguration",
                s3.get_bucket_lifecycle_configuration(&bucket),
            )
            .await,
        &["NoSuchLifecycleConfiguration"],
    )?;
    spec.policy = absent_on(
        manager
            .call(ApiVerb::ReadOne, "GetBucketPolicy", s3.get_bucket_policy(&bucket))
            .await,
        &["NoSuchBucketPolicy"],
    )?
    .flatten();

    let account_id = manager
        .account_id()
        .ok_or_else(|| Error::MissingAccountId(bucket.clone()))?;
    let arn = super::directory::bucket_arn(&bucket, manager.region(), Some(account_id))?;
    spec.tagging = tagging::get_resource_tags(manager, account_id, &arn).await?;
    Ok(())
}

async fn read_general_purpose_bucket(
    manager: &ResourceManager,
    spec: &mut BucketSpec,
) -> Result<()> {
    let bucket = spec.name.clone();
    let s3 = manager.s3.as_ref();

    spec.accelerate = Some(
        absent_on(
            manager
                .call(
                    ApiVerb::ReadOne,
                    "GetBucketAccelerateConfiguration",
                    s3.get_bucket_accelerate_configuration(&bucket),
                )
                .await,
            ACCELERATE_UNSUPPORTED,
        )?
        .unwrap_or_default(),
    );

    spec.analytics = Some(list_configurations(manager, &bucket).await?);

    let policy = acl::get_acl(manager, &bucket).await?;
    acl::apply_observed(spec, &policy);

    spec.cors = absent_on(
        manager
            .call(ApiVerb::ReadOne, "GetBucketCors", s3.get_bucket_cors(&bucket))
            .await,
        &["NoSuchCORSConfiguration"],
    )?;
    spec.encryption = absent_on(
        manager
            .call(ApiVerb::ReadOne, "GetBucketEncryption", s3.get_bucket_encryption(&bucket))
            .await,
        &["ServerSideEncryptionConfigurationNotFoundError"],
    )?;
    spec.intelligent_tiering = Some(list_configurations(manager, &bucket).await?);
    spec.inventory = Some(list_configurations(manager, &bucket).await?);
    spec.lifecycle = absent_on(
        manager
            .call(
                ApiVerb::ReadOne,
                "GetBucketLifecycleConfiguration",
                s3.get_bucket_lifecycle_configuration(&bucket),
            )
            .await,
        &["NoSuchLifecycleConfiguration"],
    )?;
    spec.logging = Some(
        manager
            .call(ApiVerb::ReadOne, "GetBucketLogging", s3.get_bucket_logging(&bucket))
            .await?,
    );
    spec.metrics = Some(list_configurations(manager, &bucket).await?);
    spec.notification = Some(
        manager
            .call(
                ApiVerb::ReadOne,
                "GetBucketNotificationConfiguration",
                s3.get_bucket_notification_configuration(&bucket),
            )
            .await?,
    );
    spec.ownership_controls = absent_on(
        manager
            .call(
                ApiVerb::ReadOne,
                "GetBucketOwnershipControls",
                s3.get_bucket_ownership_controls(&bucket),
            )
            .await,
        &["OwnershipControlsNotFoundError"],
    )?
    .flatten();
    spec.policy = absent_on(
        manager
            .call(ApiVerb::ReadOne, "GetBucketPolicy", s3.get_bucket_policy(&bucket))
            .await,
        &["NoSuchBucketPolicy"],
    )?
    .flatten();
    spec.public_access_block = absent_on(
        manager
            .call(
                ApiVerb::ReadOne,
                "GetPublicAccessBlock",
                s3.get_public_access_block(&bucket),
            )
            .await,
        &["NoSuchPublicAccessBlockConfiguration"],
    )?
    .flatten();
    spec.replication = absent_on(
        manager
            .call(ApiVerb::ReadOne, "GetBucketReplication", s3.get_bucket_replication(&bucket))
            .await,
        &["ReplicationConfigurationNotFoundError"],
    )?
    .flatten();
    spec.request_payment = Some(
        manager
            .call(
                ApiVerb::ReadOne,
                "GetBucketRequestPayment",
                s3.get_bucket_request_payment(&bucket),
            )
            .await?,
    );
    spec.tagging = absent_on(
        manager
            .call(ApiVerb::ReadOne, "GetBucketTagging", s3.get_bucket_tagging(&bucket))
            .await,
        &["NoSuchTagSet"],
    )?;
    spec.versioning = Some(
        manager
            .call(ApiVerb::ReadOne, "GetBucketVersioning", s3.get_bucket_versioning(&bucket))
            .await?,
    );
    spec.website = absent_on(
        manager
            .call(ApiVerb::ReadOne, "GetBucketWebsite", s3.get_bucket_website(&bucket))
            .await,
        &["NoSuchWebsiteConfiguration"],
    )?;
    spec.object_lock_enabled_for_bucket = Some(
        absent_on(
            manager
                .call(
                    ApiVerb::ReadOne,
                    "GetObjectLockConfiguration",
                    s3.get_object_lock_configuration(&bucket),
                )
                .await,
            &["ObjectLockConfigurationNotFoundError"],
        )?
        .unwrap_or_default(),
    );
    Ok(())
}
