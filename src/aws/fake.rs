//! In-memory S3 and S3 Control used by the reconciler tests.
//!
//! Sub-resources behave like the real service: reading one that was never configured fails
//! with the same error code S3 returns, and every call is appended to a log the tests assert on.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AccessControlPolicy, AclGrants, ApiError, CreateBucketInput, S3Api, S3ControlApi};
use crate::resources::bucket_configurations::*;

pub const OWNER_ID: &str = "79a59df900b949e55d96a1e698fbacedfd6e09d98eacf8f8d5218e7cd47ef2be";

#[derive(Clone, Debug, Default)]
pub struct FakeBucket {
    pub location: Option<String>,
    pub acl: AccessControlPolicy,
    pub last_acl_put: Option<AclGrants>,
    pub object_lock: bool,
    pub accelerate: Option<AccelerateConfiguration>,
    pub analytics: BTreeMap<String, AnalyticsConfiguration>,
    pub cors: Option<CorsConfiguration>,
    pub encryption: Option<ServerSideEncryptionConfiguration>,
    pub intelligent_tiering: BTreeMap<String, IntelligentTieringConfiguration>,
    pub inventory: BTreeMap<String, InventoryConfiguration>,
    pub lifecycle: Option<BucketLifecycleConfiguration>,
    pub logging: BucketLoggingStatus,
    pub metrics: BTreeMap<String, MetricsConfiguration>,
    pub notification: NotificationConfiguration,
    pub ownership_controls: Option<OwnershipControls>,
    pub policy: Option<String>,
    /// `ConfirmRemoveSelfBucketAccess` as sent with the last PutBucketPolicy
    pub policy_confirm_remove_self_access: Option<bool>,
    pub public_access_block: Option<PublicAccessBlockConfiguration>,
    pub replication: Option<ReplicationConfiguration>,
    pub request_payment: RequestPaymentConfiguration,
    pub tagging: Option<Tagging>,
    pub versioning: VersioningConfiguration,
    pub website: Option<WebsiteConfiguration>,
}

/// The ACL S3 attaches to a new bucket: the owner holds FULL_CONTROL
pub fn private_acl() -> AccessControlPolicy {
    AccessControlPolicy {
        owner: Some(Owner {
            display_name: None,
            id: Some(OWNER_ID.to_string()),
        }),
        grants: vec![Grant {
            grantee: Some(Grantee {
                id: Some(OWNER_ID.to_string()),
                r#type: Some("CanonicalUser".into()),
                ..Default::default()
            }),
            permission: Some("FULL_CONTROL".into()),
        }],
    }
}

#[derive(Default)]
struct FakeState {
    buckets: BTreeMap<String, FakeBucket>,
    resource_tags: HashMap<String, Vec<Tag>>,
    calls: Vec<String>,
    failures: HashMap<String, String>,
}

#[derive(Default)]
pub struct FakeS3 {
    state: Mutex<FakeState>,
}

impl FakeS3 {
    pub fn with_bucket(name: &str, bucket: FakeBucket) -> Self {
        let fake = Self::default();
        fake.insert_bucket(name, bucket);
        fake
    }

    pub fn insert_bucket(&self, name: &str, bucket: FakeBucket) {
        self.state.lock().unwrap().buckets.insert(name.to_string(), bucket);
    }

    pub fn bucket(&self, name: &str) -> Option<FakeBucket> {
        self.state.lock().unwrap().buckets.get(name).cloned()
    }

    pub fn set_resource_tags(&self, arn: &str, tags: Vec<Tag>) {
        self.state.lock().unwrap().resource_tags.insert(arn.to_string(), tags);
    }

    pub fn resource_tags(&self, arn: &str) -> Vec<Tag> {
        self.state
            .lock()
            .unwrap()
            .resource_tags
            .get(arn)
            .cloned()
            .unwrap_or_default()
    }

    /// Makes every later call to `operation` fail with `code`
    pub fn fail(&self, operation: &str, code: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(operation.to_string(), code.to_string());
    }

    /// Operation names in call order. Calls addressing a configuration ID render as `Operation:id`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// The calls that change state, leaving out every Get and List
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("Get") && !c.starts_with("List"))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn record(
        &self,
        state: &mut FakeState,
        operation: &'static str,
        id: Option<&str>,
    ) -> Result<(), ApiError> {
        state.calls.push(match id {
            Some(id) => format!("{operation}:{id}"),
            None => operation.to_string(),
        });
        match state.failures.get(operation) {
            Some(code) => Err(ApiError::new(operation, Some(code), "injected failure")),
            None => Ok(()),
        }
    }

    fn with_bucket_state<T>(
        &self,
        operation: &'static str,
        bucket: &str,
        id: Option<&str>,
        f: impl FnOnce(&mut FakeBucket) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut state = self.state.lock().unwrap();
        self.record(&mut state, operation, id)?;
        match state.buckets.get_mut(bucket) {
            Some(b) => f(b),
            None => Err(ApiError::new(
                operation,
                Some("NoSuchBucket"),
                "The specified bucket does not exist",
            )),
        }
    }
}

fn not_found(operation: &'static str, code: &str) -> ApiError {
    ApiError::new(operation, Some(code), "not found")
}

fn config_id(id: &Option<String>) -> String {
    id.clone().unwrap_or_default()
}

#[async_trait]
impl S3Api for FakeS3 {
    async fn create_bucket(&self, input: &CreateBucketInput) -> Result<Option<String>, ApiError> {
        let mut state = self.state.lock().unwrap();
        self.record(&mut state, "CreateBucket", None)?;
        if state.buckets.contains_key(&input.bucket) {
            return Err(ApiError::new(
                "CreateBucket",
                Some("BucketAlreadyOwnedByYou"),
                "bucket exists",
            ));
        }
        let location = format!("/{}", input.bucket);
        state.buckets.insert(
            input.bucket.clone(),
            FakeBucket {
                location: Some(location.clone()),
                acl: private_acl(),
                last_acl_put: Some(input.grants.clone()),
                object_lock: input.object_lock_enabled_for_bucket.unwrap_or_default(),
                request_payment: RequestPaymentConfiguration {
                    payer: Some("BucketOwner".into()),
                },
                ..Default::default()
            },
        );
        Ok(Some(location))
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        self.record(&mut state, "DeleteBucket", None)?;
        state
            .buckets
            .remove(bucket)
            .map(|_| ())
            .ok_or_else(|| not_found("DeleteBucket", "NoSuchBucket"))
    }

    async fn list_buckets(&self) -> Result<Vec<String>, ApiError> {
        let mut state = self.state.lock().unwrap();
        self.record(&mut state, "ListBuckets", None)?;
        Ok(state
            .buckets
            .keys()
            .filter(|name| !name.ends_with("--x-s3"))
            .cloned()
            .collect())
    }

    async fn list_directory_buckets(&self) -> Result<Vec<String>, ApiError> {
        let mut state = self.state.lock().unwrap();
        self.record(&mut state, "ListDirectoryBuckets", None)?;
        Ok(state
            .buckets
            .keys()
            .filter(|name| name.ends_with("--x-s3"))
            .cloned()
            .collect())
    }

    async fn get_bucket_accelerate_configuration(
        &self,
        bucket: &str,
    ) -> Result<AccelerateConfiguration, ApiError> {
        self.with_bucket_state("GetBucketAccelerateConfiguration", bucket, None, |b| {
            Ok(b.accelerate.clone().unwrap_or_default())
        })
    }

    async fn put_bucket_accelerate_configuration(
        &self,
        bucket: &str,
        config: &AccelerateConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketAccelerateConfiguration", bucket, None, |b| {
            b.accelerate = Some(config.clone());
            Ok(())
        })
    }

    async fn get_bucket_acl(&self, bucket: &str) -> Result<AccessControlPolicy, ApiError> {
        self.with_bucket_state("GetBucketAcl", bucket, None, |b| Ok(b.acl.clone()))
    }

    async fn put_bucket_acl(&self, bucket: &str, grants: &AclGrants) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketAcl", bucket, None, |b| {
            b.last_acl_put = Some(grants.clone());
            Ok(())
        })
    }

    async fn list_bucket_analytics_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<AnalyticsConfiguration>, ApiError> {
        self.with_bucket_state("ListBucketAnalyticsConfigurations", bucket, None, |b| {
            Ok(b.analytics.values().cloned().collect())
        })
    }

    async fn put_bucket_analytics_configuration(
        &self,
        bucket: &str,
        config: &AnalyticsConfiguration,
    ) -> Result<(), ApiError> {
        let id = config_id(&config.id);
        self.with_bucket_state("PutBucketAnalyticsConfiguration", bucket, Some(&id), |b| {
            b.analytics.insert(id.clone(), config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_analytics_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketAnalyticsConfiguration", bucket, Some(id), |b| {
            b.analytics.remove(id);
            Ok(())
        })
    }

    async fn get_bucket_cors(&self, bucket: &str) -> Result<CorsConfiguration, ApiError> {
        self.with_bucket_state("GetBucketCors", bucket, None, |b| {
            b.cors
                .clone()
                .ok_or_else(|| not_found("GetBucketCors", "NoSuchCORSConfiguration"))
        })
    }

    async fn put_bucket_cors(
        &self,
        bucket: &str,
        config: &CorsConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketCors", bucket, None, |b| {
            b.cors = Some(config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_cors(&self, bucket: &str) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketCors", bucket, None, |b| {
            b.cors = None;
            Ok(())
        })
    }

    async fn get_bucket_encryption(
        &self,
        bucket: &str,
    ) -> Result<ServerSideEncryptionConfiguration, ApiError> {
        self.with_bucket_state("GetBucketEncryption", bucket, None, |b| {
            b.encryption.clone().ok_or_else(|| {
                not_found(
                    "GetBucketEncryption",
                    "ServerSideEncryptionConfigurationNotFoundError",
                )
            })
        })
    }

    async fn put_bucket_encryption(
        &self,
        bucket: &str,
        config: &ServerSideEncryptionConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketEncryption", bucket, None, |b| {
            b.encryption = Some(config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_encryption(&self, bucket: &str) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketEncryption", bucket, None, |b| {
            b.encryption = None;
            Ok(())
        })
    }

    async fn list_bucket_intelligent_tiering_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<IntelligentTieringConfiguration>, ApiError> {
        self.with_bucket_state("ListBucketIntelligentTieringConfigurations", bucket, None, |b| {
            Ok(b.intelligent_tiering.values().cloned().collect())
        })
    }

    async fn put_bucket_intelligent_tiering_configuration(
        &self,
        bucket: &str,
        config: &IntelligentTieringConfiguration,
    ) -> Result<(), ApiError> {
        let id = config_id(&config.id);
        self.with_bucket_state(
            "PutBucketIntelligentTieringConfiguration",
            bucket,
            Some(&id),
            |b| {
                b.intelligent_tiering.insert(id.clone(), config.clone());
                Ok(())
            },
        )
    }

    async fn delete_bucket_intelligent_tiering_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError> {
        self.with_bucket_state(
            "DeleteBucketIntelligentTieringConfiguration",
            bucket,
            Some(id),
            |b| {
                b.intelligent_tiering.remove(id);
                Ok(())
            },
        )
    }

    async fn list_bucket_inventory_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<InventoryConfiguration>, ApiError> {
        self.with_bucket_state("ListBucketInventoryConfigurations", bucket, None, |b| {
            Ok(b.inventory.values().cloned().collect())
        })
    }

    async fn put_bucket_inventory_configuration(
        &self,
        bucket: &str,
        config: &InventoryConfiguration,
    ) -> Result<(), ApiError> {
        let id = config_id(&config.id);
        self.with_bucket_state("PutBucketInventoryConfiguration", bucket, Some(&id), |b| {
            b.inventory.insert(id.clone(), config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_inventory_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketInventoryConfiguration", bucket, Some(id), |b| {
            b.inventory.remove(id);
            Ok(())
        })
    }

    async fn get_bucket_lifecycle_configuration(
        &self,
        bucket: &str,
    ) -> Result<BucketLifecycleConfiguration, ApiError> {
        self.with_bucket_state("GetBucketLifecycleConfiguration", bucket, None, |b| {
            b.lifecycle.clone().ok_or_else(|| {
                not_found("GetBucketLifecycleConfiguration", "NoSuchLifecycleConfiguration")
            })
        })
    }

    async fn put_bucket_lifecycle_configuration(
        &self,
        bucket: &str,
        config: &BucketLifecycleConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketLifecycleConfiguration", bucket, None, |b| {
            b.lifecycle = Some(config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_lifecycle(&self, bucket: &str) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketLifecycle", bucket, None, |b| {
            b.lifecycle = None;
            Ok(())
        })
    }

    async fn get_bucket_logging(&self, bucket: &str) -> Result<BucketLoggingStatus, ApiError> {
        self.with_bucket_state("GetBucketLogging", bucket, None, |b| Ok(b.logging.clone()))
    }

    async fn put_bucket_logging(
        &self,
        bucket: &str,
        config: &BucketLoggingStatus,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketLogging", bucket, None, |b| {
            b.logging = config.clone();
            Ok(())
        })
    }

    async fn list_bucket_metrics_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<MetricsConfiguration>, ApiError> {
        self.with_bucket_state("ListBucketMetricsConfigurations", bucket, None, |b| {
            Ok(b.metrics.values().cloned().collect())
        })
    }

    async fn put_bucket_metrics_configuration(
        &self,
        bucket: &str,
        config: &MetricsConfiguration,
    ) -> Result<(), ApiError> {
        let id = config_id(&config.id);
        self.with_bucket_state("PutBucketMetricsConfiguration", bucket, Some(&id), |b| {
            b.metrics.insert(id.clone(), config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_metrics_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketMetricsConfiguration", bucket, Some(id), |b| {
            b.metrics.remove(id);
            Ok(())
        })
    }

    async fn get_bucket_notification_configuration(
        &self,
        bucket: &str,
    ) -> Result<NotificationConfiguration, ApiError> {
        self.with_bucket_state("GetBucketNotificationConfiguration", bucket, None, |b| {
            Ok(b.notification.clone())
        })
    }

    async fn put_bucket_notification_configuration(
        &self,
        bucket: &str,
        config: &NotificationConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketNotificationConfiguration", bucket, None, |b| {
            b.notification = config.clone();
            Ok(())
        })
    }

    async fn get_bucket_ownership_controls(
        &self,
        bucket: &str,
    ) -> Result<Option<OwnershipControls>, ApiError> {
        self.with_bucket_state("GetBucketOwnershipControls", bucket, None, |b| {
            match &b.ownership_controls {
                Some(controls) => Ok(Some(controls.clone())),
                None => Err(not_found(
                    "GetBucketOwnershipControls",
                    "OwnershipControlsNotFoundError",
                )),
            }
        })
    }

    async fn put_bucket_ownership_controls(
        &self,
        bucket: &str,
        config: &OwnershipControls,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketOwnershipControls", bucket, None, |b| {
            b.ownership_controls = Some(config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_ownership_controls(&self, bucket: &str) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketOwnershipControls", bucket, None, |b| {
            b.ownership_controls = None;
            Ok(())
        })
    }

    async fn get_bucket_policy(&self, bucket: &str) -> Result<Option<String>, ApiError> {
        self.with_bucket_state("GetBucketPolicy", bucket, None, |b| match &b.policy {
            Some(policy) => Ok(Some(policy.clone())),
            None => Err(not_found("GetBucketPolicy", "NoSuchBucketPolicy")),
        })
    }

    async fn put_bucket_policy(
        &self,
        bucket: &str,
        policy: &str,
        confirm_remove_self_bucket_access: Option<bool>,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketPolicy", bucket, None, |b| {
            b.policy = Some(policy.to_string());
            b.policy_confirm_remove_self_access = confirm_remove_self_bucket_access;
            Ok(())
        })
    }

    async fn delete_bucket_policy(&self, bucket: &str) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketPolicy", bucket, None, |b| {
            b.policy = None;
            Ok(())
        })
    }

    async fn get_public_access_block(
        &self,
        bucket: &str,
    ) -> Result<Option<PublicAccessBlockConfiguration>, ApiError> {
        self.with_bucket_state("GetPublicAccessBlock", bucket, None, |b| {
            match &b.public_access_block {
                Some(config) => Ok(Some(config.clone())),
                None => Err(not_found(
                    "GetPublicAccessBlock",
                    "NoSuchPublicAccessBlockConfiguration",
                )),
            }
        })
    }

    async fn put_public_access_block(
        &self,
        bucket: &str,
        config: &PublicAccessBlockConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutPublicAccessBlock", bucket, None, |b| {
            b.public_access_block = Some(config.clone());
            Ok(())
        })
    }

    async fn delete_public_access_block(&self, bucket: &str) -> Result<(), ApiError> {
        self.with_bucket_state("DeletePublicAccessBlock", bucket, None, |b| {
            b.public_access_block = None;
            Ok(())
        })
    }

    async fn get_bucket_replication(
        &self,
        bucket: &str,
    ) -> Result<Option<ReplicationConfiguration>, ApiError> {
        self.with_bucket_state("GetBucketReplication", bucket, None, |b| match &b.replication {
            Some(config) => Ok(Some(config.clone())),
            None => Err(not_found(
                "GetBucketReplication",
                "ReplicationConfigurationNotFoundError",
            )),
        })
    }

    async fn put_bucket_replication(
        &self,
        bucket: &str,
        config: &ReplicationConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketReplication", bucket, None, |b| {
            b.replication = Some(config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_replication(&self, bucket: &str) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketReplication", bucket, None, |b| {
            b.replication = None;
            Ok(())
        })
    }

    async fn get_bucket_request_payment(
        &self,
        bucket: &str,
    ) -> Result<RequestPaymentConfiguration, ApiError> {
        self.with_bucket_state("GetBucketRequestPayment", bucket, None, |b| {
            Ok(b.request_payment.clone())
        })
    }

    async fn put_bucket_request_payment(
        &self,
        bucket: &str,
        config: &RequestPaymentConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketRequestPayment", bucket, None, |b| {
            b.request_payment = config.clone();
            Ok(())
        })
    }

    async fn get_bucket_tagging(&self, bucket: &str) -> Result<Tagging, ApiError> {
        self.with_bucket_state("GetBucketTagging", bucket, None, |b| {
            b.tagging
                .clone()
                .ok_or_else(|| not_found("GetBucketTagging", "NoSuchTagSet"))
        })
    }

    async fn put_bucket_tagging(&self, bucket: &str, config: &Tagging) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketTagging", bucket, None, |b| {
            b.tagging = Some(config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_tagging(&self, bucket: &str) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketTagging", bucket, None, |b| {
            b.tagging = None;
            Ok(())
        })
    }

    async fn get_bucket_versioning(
        &self,
        bucket: &str,
    ) -> Result<VersioningConfiguration, ApiError> {
        self.with_bucket_state("GetBucketVersioning", bucket, None, |b| Ok(b.versioning.clone()))
    }

    async fn put_bucket_versioning(
        &self,
        bucket: &str,
        config: &VersioningConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketVersioning", bucket, None, |b| {
            b.versioning = config.clone();
            Ok(())
        })
    }

    async fn get_bucket_website(&self, bucket: &str) -> Result<WebsiteConfiguration, ApiError> {
        self.with_bucket_state("GetBucketWebsite", bucket, None, |b| {
            b.website
                .clone()
                .ok_or_else(|| not_found("GetBucketWebsite", "NoSuchWebsiteConfiguration"))
        })
    }

    async fn put_bucket_website(
        &self,
        bucket: &str,
        config: &WebsiteConfiguration,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutBucketWebsite", bucket, None, |b| {
            b.website = Some(config.clone());
            Ok(())
        })
    }

    async fn delete_bucket_website(&self, bucket: &str) -> Result<(), ApiError> {
        self.with_bucket_state("DeleteBucketWebsite", bucket, None, |b| {
            b.website = None;
            Ok(())
        })
    }

    async fn get_object_lock_configuration(&self, bucket: &str) -> Result<bool, ApiError> {
        self.with_bucket_state("GetObjectLockConfiguration", bucket, None, |b| {
            if b.object_lock {
                Ok(true)
            } else {
                Err(not_found(
                    "GetObjectLockConfiguration",
                    "ObjectLockConfigurationNotFoundError",
                ))
            }
        })
    }

    async fn put_object_lock_configuration(
        &self,
        bucket: &str,
        enabled: bool,
    ) -> Result<(), ApiError> {
        self.with_bucket_state("PutObjectLockConfiguration", bucket, None, |b| {
            b.object_lock = enabled;
            Ok(())
        })
    }
}

#[async_trait]
impl S3ControlApi for FakeS3 {
    async fn list_tags_for_resource(
        &self,
        _account_id: &str,
        resource_arn: &str,
    ) -> Result<Vec<Tag>, ApiError> {
        let mut state = self.state.lock().unwrap();
        self.record(&mut state, "ListTagsForResource", None)?;
        Ok(state.resource_tags.get(resource_arn).cloned().unwrap_or_default())
    }

    async fn tag_resource(
        &self,
        _account_id: &str,
        resource_arn: &str,
        tags: &[Tag],
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        self.record(&mut state, "TagResource", None)?;
        let existing = state.resource_tags.entry(resource_arn.to_string()).or_default();
        for tag in tags {
            existing.retain(|t| t.key != tag.key);
            existing.push(tag.clone());
        }
        Ok(())
    }

    async fn untag_resource(
        &self,
        _account_id: &str,
        resource_arn: &str,
        tag_keys: &[String],
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        self.record(&mut state, "UntagResource", None)?;
        if let Some(existing) = state.resource_tags.get_mut(resource_arn) {
            existing.retain(|t| !t.key.as_ref().is_some_and(|k| tag_keys.contains(k)));
        }
        Ok(())
    }
}
