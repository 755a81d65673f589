use async_trait::async_trait;
use thiserror::Error;

use crate::resources::bucket_configurations::*;

mod convert;
mod sdk;

#[cfg(test)]
pub mod fake;

pub use sdk::{SdkS3, SdkS3Control};

/// A failed S3 or S3 Control call, carrying the AWS error code when the service returned one
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed ({}): {message}", .code.as_deref().unwrap_or("Unknown"))]
pub struct ApiError {
    pub operation: &'static str,
    pub code: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn new(operation: &'static str, code: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            operation,
            code: code.map(str::to_string),
            message: message.into(),
        }
    }

    /// True if the error code is one of `codes`
    pub fn has_code(&self, codes: &[&str]) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| codes.contains(&code))
    }
}

/// Canned ACL and grant headers as sent with CreateBucket and PutBucketAcl
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AclGrants {
    pub acl: Option<String>,
    pub grant_full_control: Option<String>,
    pub grant_read: Option<String>,
    pub grant_read_acp: Option<String>,
    pub grant_write: Option<String>,
    pub grant_write_acp: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateBucketInput {
    pub bucket: String,
    pub grants: AclGrants,
    pub create_bucket_configuration: Option<CreateBucketConfiguration>,
    pub object_lock_enabled_for_bucket: Option<bool>,
}

/// Output of GetBucketAcl
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessControlPolicy {
    pub owner: Option<Owner>,
    pub grants: Vec<Grant>,
}

/// The S3 control-plane operations the bucket reconciler depends on.
///
/// Every method is a single request; implementations never retry beyond what the transport does.
#[async_trait]
pub trait S3Api: Send + Sync {
    /// Returns the bucket location
    async fn create_bucket(&self, input: &CreateBucketInput) -> Result<Option<String>, ApiError>;
    async fn delete_bucket(&self, bucket: &str) -> Result<(), ApiError>;
    /// Names of every general purpose bucket owned by the caller
    async fn list_buckets(&self) -> Result<Vec<String>, ApiError>;
    /// Names of every directory bucket owned by the caller
    async fn list_directory_buckets(&self) -> Result<Vec<String>, ApiError>;

    async fn get_bucket_accelerate_configuration(
        &self,
        bucket: &str,
    ) -> Result<AccelerateConfiguration, ApiError>;
    async fn put_bucket_accelerate_configuration(
        &self,
        bucket: &str,
        config: &AccelerateConfiguration,
    ) -> Result<(), ApiError>;

    async fn get_bucket_acl(&self, bucket: &str) -> Result<AccessControlPolicy, ApiError>;
    async fn put_bucket_acl(&self, bucket: &str, grants: &AclGrants) -> Result<(), ApiError>;

    async fn list_bucket_analytics_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<AnalyticsConfiguration>, ApiError>;
    async fn put_bucket_analytics_configuration(
        &self,
        bucket: &str,
        config: &AnalyticsConfiguration,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_analytics_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError>;

    async fn get_bucket_cors(&self, bucket: &str) -> Result<CorsConfiguration, ApiError>;
    async fn put_bucket_cors(&self, bucket: &str, config: &CorsConfiguration)
        -> Result<(), ApiError>;
    async fn delete_bucket_cors(&self, bucket: &str) -> Result<(), ApiError>;

    async fn get_bucket_encryption(
        &self,
        bucket: &str,
    ) -> Result<ServerSideEncryptionConfiguration, ApiError>;
    async fn put_bucket_encryption(
        &self,
        bucket: &str,
        config: &ServerSideEncryptionConfiguration,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_encryption(&self, bucket: &str) -> Result<(), ApiError>;

    async fn list_bucket_intelligent_tiering_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<IntelligentTieringConfiguration>, ApiError>;
    async fn put_bucket_intelligent_tiering_configuration(
        &self,
        bucket: &str,
        config: &IntelligentTieringConfiguration,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_intelligent_tiering_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError>;

    async fn list_bucket_inventory_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<InventoryConfiguration>, ApiError>;
    async fn put_bucket_inventory_configuration(
        &self,
        bucket: &str,
        config: &InventoryConfiguration,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_inventory_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError>;

    async fn get_bucket_lifecycle_configuration(
        &self,
        bucket: &str,
    ) -> Result<BucketLifecycleConfiguration, ApiError>;
    async fn put_bucket_lifecycle_configuration(
        &self,
        bucket: &str,
        config: &BucketLifecycleConfiguration,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_lifecycle(&self, bucket: &str) -> Result<(), ApiError>;

    async fn get_bucket_logging(&self, bucket: &str) -> Result<BucketLoggingStatus, ApiError>;
    async fn put_bucket_logging(
        &self,
        bucket: &str,
        config: &BucketLoggingStatus,
    ) -> Result<(), ApiError>;

    async fn list_bucket_metrics_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<MetricsConfiguration>, ApiError>;
    async fn put_bucket_metrics_configuration(
        &self,
        bucket: &str,
        config: &MetricsConfiguration,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_metrics_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError>;

    async fn get_bucket_notification_configuration(
        &self,
        bucket: &str,
    ) -> Result<NotificationConfiguration, ApiError>;
    async fn put_bucket_notification_configuration(
        &self,
        bucket: &str,
        config: &NotificationConfiguration,
    ) -> Result<(), ApiError>;

    /// `Ok(None)` when the response carried no ownership controls
    async fn get_bucket_ownership_controls(
        &self,
        bucket: &str,
    ) -> Result<Option<OwnershipControls>, ApiError>;
    async fn put_bucket_ownership_controls(
        &self,
        bucket: &str,
        config: &OwnershipControls,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_ownership_controls(&self, bucket: &str) -> Result<(), ApiError>;

    async fn get_bucket_policy(&self, bucket: &str) -> Result<Option<String>, ApiError>;
    /// `confirm_remove_self_bucket_access` is omitted from the request when `None`
    async fn put_bucket_policy(
        &self,
        bucket: &str,
        policy: &str,
        confirm_remove_self_bucket_access: Option<bool>,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_policy(&self, bucket: &str) -> Result<(), ApiError>;

    /// `Ok(None)` when the response carried no configuration
    async fn get_public_access_block(
        &self,
        bucket: &str,
    ) -> Result<Option<PublicAccessBlockConfiguration>, ApiError>;
    async fn put_public_access_block(
        &self,
        bucket: &str,
        config: &PublicAccessBlockConfiguration,
    ) -> Result<(), ApiError>;
    async fn delete_public_access_block(&self, bucket: &str) -> Result<(), ApiError>;

    /// `Ok(None)` when the response carried no configuration
    async fn get_bucket_replication(
        &self,
        bucket: &str,
    ) -> Result<Option<ReplicationConfiguration>, ApiError>;
    async fn put_bucket_replication(
        &self,
        bucket: &str,
        config: &ReplicationConfiguration,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_replication(&self, bucket: &str) -> Result<(), ApiError>;

    async fn get_bucket_request_payment(
        &self,
        bucket: &str,
    ) -> Result<RequestPaymentConfiguration, ApiError>;
    async fn put_bucket_request_payment(
        &self,
        bucket: &str,
        config: &RequestPaymentConfiguration,
    ) -> Result<(), ApiError>;

    async fn get_bucket_tagging(&self, bucket: &str) -> Result<Tagging, ApiError>;
    async fn put_bucket_tagging(&self, bucket: &str, config: &Tagging) -> Result<(), ApiError>;
    async fn delete_bucket_tagging(&self, bucket: &str) -> Result<(), ApiError>;

    async fn get_bucket_versioning(&self, bucket: &str)
        -> Result<VersioningConfiguration, ApiError>;
    async fn put_bucket_versioning(
        &self,
        bucket: &str,
        config: &VersioningConfiguration,
    ) -> Result<(), ApiError>;

    async fn get_bucket_website(&self, bucket: &str) -> Result<WebsiteConfiguration, ApiError>;
    async fn put_bucket_website(
        &self,
        bucket: &str,
        config: &WebsiteConfiguration,
    ) -> Result<(), ApiError>;
    async fn delete_bucket_website(&self, bucket: &str) -> Result<(), ApiError>;

    /// Whether Object Lock is enabled on the bucket
    async fn get_object_lock_configuration(&self, bucket: &str) -> Result<bool, ApiError>;
    /// Enables Object Lock when `enabled`, otherwise sends the request without a configuration
    async fn put_object_lock_configuration(&self, bucket: &str, enabled: bool)
        -> Result<(), ApiError>;
}

/// S3 Control tagging, which addresses directory buckets by ARN
#[async_trait]
pub trait S3ControlApi: Send + Sync {
    async fn list_tags_for_resource(
        &self,
        account_id: &str,
        resource_arn: &str,
    ) -> Result<Vec<Tag>, ApiError>;
    async fn tag_resource(
        &self,
        account_id: &str,
        resource_arn: &str,
        tags: &[Tag],
    ) -> Result<(), ApiError>;
    async fn untag_resource(
        &self,
        account_id: &str,
        resource_arn: &str,
        tag_keys: &[String],
    ) -> Result<(), ApiError>;
}
