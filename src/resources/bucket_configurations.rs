//! Bucket sub-configuration shapes.
//!
//! These mirror the S3 API structures field for field. Enumerated values are kept as
//! strings so that values unknown to this operator round-trip unchanged.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub key: Option<String>,
    pub value: Option<String>,
}

/// Transfer acceleration state. One of `Enabled`, `Suspended`.
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccelerateConfiguration {
    pub status: Option<String>,
}

/// Conjunction of a prefix and a set of tags
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AndOperator {
    pub prefix: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

/// Object scope of an analytics, intelligent-tiering or replication configuration.
/// At most one of `and`, `prefix`, `tag` may be set.
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationFilter {
    pub and: Option<AndOperator>,
    pub prefix: Option<String>,
    pub tag: Option<Tag>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfiguration {
    /// The ID that identifies the analytics configuration. Must be unique within the bucket.
    pub id: Option<String>,
    pub filter: Option<ConfigurationFilter>,
    pub storage_class_analysis: Option<StorageClassAnalysis>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageClassAnalysis {
    pub data_export: Option<StorageClassAnalysisDataExport>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageClassAnalysisDataExport {
    pub destination: Option<AnalyticsExportDestination>,
    /// Only `V_1` is currently accepted by S3
    pub output_schema_version: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsExportDestination {
    pub s3_bucket_destination: Option<AnalyticsS3BucketDestination>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsS3BucketDestination {
    pub bucket: Option<String>,
    pub bucket_account_id: Option<String>,
    pub format: Option<String>,
    pub prefix: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfiguration {
    pub cors_rules: Option<Vec<CorsRule>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorsRule {
    pub allowed_headers: Option<Vec<String>>,
    pub allowed_methods: Option<Vec<String>>,
    pub allowed_origins: Option<Vec<String>>,
    pub expose_headers: Option<Vec<String>>,
    pub id: Option<String>,
    pub max_age_seconds: Option<i32>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerSideEncryptionConfiguration {
    pub rules: Option<Vec<ServerSideEncryptionRule>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerSideEncryptionRule {
    pub apply_server_side_encryption_by_default: Option<ServerSideEncryptionByDefault>,
    pub bucket_key_enabled: Option<bool>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerSideEncryptionByDefault {
    pub kms_master_key_id: Option<String>,
    /// One of `AES256`, `aws:kms`, `aws:kms:dsse`
    pub sse_algorithm: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntelligentTieringConfiguration {
    /// The ID that identifies the configuration. Must be unique within the bucket.
    pub id: Option<String>,
    pub filter: Option<ConfigurationFilter>,
    /// One of `Enabled`, `Disabled`
    pub status: Option<String>,
    pub tierings: Option<Vec<Tiering>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tiering {
    /// One of `ARCHIVE_ACCESS`, `DEEP_ARCHIVE_ACCESS`
    pub access_tier: Option<String>,
    pub days: Option<i32>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryConfiguration {
    /// The ID that identifies the inventory configuration. Must be unique within the bucket.
    pub id: Option<String>,
    pub destination: Option<InventoryDestination>,
    pub filter: Option<InventoryFilter>,
    /// One of `All`, `Current`
    pub included_object_versions: Option<String>,
    pub is_enabled: Option<bool>,
    pub optional_fields: Option<Vec<String>>,
    pub schedule: Option<InventorySchedule>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDestination {
    pub s3_bucket_destination: Option<InventoryS3BucketDestination>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryS3BucketDestination {
    pub account_id: Option<String>,
    pub bucket: Option<String>,
    pub encryption: Option<InventoryEncryption>,
    /// One of `CSV`, `ORC`, `Parquet`
    pub format: Option<String>,
    pub prefix: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEncryption {
    pub sse_kms: Option<SseKms>,
    pub sse_s3: Option<SseS3>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SseKms {
    pub key_id: Option<String>,
}

/// Marker for S3-managed key encryption; carries no fields.
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
pub struct SseS3 {}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    pub prefix: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySchedule {
    /// One of `Daily`, `Weekly`
    pub frequency: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketLifecycleConfiguration {
    pub rules: Option<Vec<LifecycleRule>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRule {
    pub abort_incomplete_multipart_upload: Option<AbortIncompleteMultipartUpload>,
    pub expiration: Option<LifecycleExpiration>,
    pub filter: Option<LifecycleRuleFilter>,
    pub id: Option<String>,
    pub noncurrent_version_expiration: Option<NoncurrentVersionExpiration>,
    pub noncurrent_version_transitions: Option<Vec<NoncurrentVersionTransition>>,
    /// Deprecated in favour of `filter.prefix`
    pub prefix: Option<String>,
    /// One of `Enabled`, `Disabled`
    pub status: Option<String>,
    pub transitions: Option<Vec<Transition>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbortIncompleteMultipartUpload {
    pub days_after_initiation: Option<i32>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleExpiration {
    pub date: Option<DateTime<Utc>>,
    pub days: Option<i32>,
    pub expired_object_delete_marker: Option<bool>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRuleFilter {
    pub and: Option<LifecycleRuleAndOperator>,
    pub object_size_greater_than: Option<i64>,
    pub object_size_less_than: Option<i64>,
    pub prefix: Option<String>,
    pub tag: Option<Tag>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRuleAndOperator {
    pub object_size_greater_than: Option<i64>,
    pub object_size_less_than: Option<i64>,
    pub prefix: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoncurrentVersionExpiration {
    pub newer_noncurrent_versions: Option<i32>,
    pub noncurrent_days: Option<i32>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoncurrentVersionTransition {
    pub newer_noncurrent_versions: Option<i32>,
    pub noncurrent_days: Option<i32>,
    pub storage_class: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub date: Option<DateTime<Utc>>,
    pub days: Option<i32>,
    pub storage_class: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketLoggingStatus {
    pub logging_enabled: Option<LoggingEnabled>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoggingEnabled {
    pub target_bucket: Option<String>,
    pub target_grants: Option<Vec<TargetGrant>>,
    pub target_prefix: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetGrant {
    pub grantee: Option<Grantee>,
    /// One of `FULL_CONTROL`, `READ`, `WRITE`
    pub permission: Option<String>,
}

/// The principal a grant applies to
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Grantee {
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    pub id: Option<String>,
    /// One of `CanonicalUser`, `AmazonCustomerByEmail`, `Group`
    pub r#type: Option<String>,
    pub uri: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsConfiguration {
    /// The ID that identifies the metrics configuration. Must be unique within the bucket.
    pub id: Option<String>,
    pub filter: Option<MetricsFilter>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsFilter {
    pub access_point_arn: Option<String>,
    pub and: Option<MetricsAndOperator>,
    pub prefix: Option<String>,
    pub tag: Option<Tag>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsAndOperator {
    pub access_point_arn: Option<String>,
    pub prefix: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfiguration {
    pub event_bridge_configuration: Option<EventBridgeConfiguration>,
    pub lambda_function_configurations: Option<Vec<LambdaFunctionConfiguration>>,
    pub queue_configurations: Option<Vec<QueueConfiguration>>,
    pub topic_configurations: Option<Vec<TopicConfiguration>>,
}

/// Presence enables delivery of all bucket events to Amazon EventBridge
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
pub struct EventBridgeConfiguration {}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LambdaFunctionConfiguration {
    pub events: Option<Vec<String>>,
    pub filter: Option<NotificationConfigurationFilter>,
    pub id: Option<String>,
    pub lambda_function_arn: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueConfiguration {
    pub events: Option<Vec<String>>,
    pub filter: Option<NotificationConfigurationFilter>,
    pub id: Option<String>,
    pub queue_arn: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicConfiguration {
    pub events: Option<Vec<String>>,
    pub filter: Option<NotificationConfigurationFilter>,
    pub id: Option<String>,
    pub topic_arn: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfigurationFilter {
    pub key: Option<KeyFilter>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyFilter {
    pub filter_rules: Option<Vec<FilterRule>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    /// One of `prefix`, `suffix`
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipControls {
    pub rules: Option<Vec<OwnershipControlsRule>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipControlsRule {
    /// One of `BucketOwnerPreferred`, `ObjectWriter`, `BucketOwnerEnforced`
    pub object_ownership: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccessBlockConfiguration {
    pub block_public_acls: Option<bool>,
    pub block_public_policy: Option<bool>,
    pub ignore_public_acls: Option<bool>,
    pub restrict_public_buckets: Option<bool>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationConfiguration {
    /// ARN of the IAM role S3 assumes when replicating objects
    pub role: Option<String>,
    pub rules: Option<Vec<ReplicationRule>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationRule {
    pub delete_marker_replication: Option<StatusConfiguration>,
    pub destination: Option<ReplicationDestination>,
    pub existing_object_replication: Option<StatusConfiguration>,
    pub filter: Option<ConfigurationFilter>,
    pub id: Option<String>,
    pub prefix: Option<String>,
    pub priority: Option<i32>,
    pub source_selection_criteria: Option<SourceSelectionCriteria>,
    /// One of `Enabled`, `Disabled`
    pub status: Option<String>,
}

/// A configuration block that only carries an `Enabled`/`Disabled` status
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusConfiguration {
    pub status: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationDestination {
    pub access_control_translation: Option<AccessControlTranslation>,
    pub account: Option<String>,
    /// ARN of the destination bucket
    pub bucket: Option<String>,
    pub encryption_configuration: Option<EncryptionConfiguration>,
    pub metrics: Option<ReplicationMetrics>,
    pub replication_time: Option<ReplicationTime>,
    pub storage_class: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessControlTranslation {
    /// Only `Destination` is accepted by S3
    pub owner: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionConfiguration {
    pub replica_kms_key_id: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationMetrics {
    pub event_threshold: Option<ReplicationTimeValue>,
    pub status: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationTime {
    pub status: Option<String>,
    pub time: Option<ReplicationTimeValue>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationTimeValue {
    pub minutes: Option<i32>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceSelectionCriteria {
    pub replica_modifications: Option<StatusConfiguration>,
    pub sse_kms_encrypted_objects: Option<StatusConfiguration>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestPaymentConfiguration {
    /// One of `BucketOwner`, `Requester`
    pub payer: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tagging {
    pub tag_set: Option<Vec<Tag>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersioningConfiguration {
    /// One of `Enabled`, `Disabled`
    pub mfa_delete: Option<String>,
    /// One of `Enabled`, `Suspended`
    pub status: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteConfiguration {
    pub error_document: Option<ErrorDocument>,
    pub index_document: Option<IndexDocument>,
    pub redirect_all_requests_to: Option<RedirectAllRequestsTo>,
    pub routing_rules: Option<Vec<RoutingRule>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDocument {
    pub key: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    pub suffix: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedirectAllRequestsTo {
    pub host_name: Option<String>,
    pub protocol: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRule {
    pub condition: Option<RoutingRuleCondition>,
    pub redirect: Option<Redirect>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRuleCondition {
    pub http_error_code_returned_equals: Option<String>,
    pub key_prefix_equals: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub host_name: Option<String>,
    pub http_redirect_code: Option<String>,
    pub protocol: Option<String>,
    pub replace_key_prefix_with: Option<String>,
    pub replace_key_with: Option<String>,
}

/// Creation-time placement of the bucket
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucketConfiguration {
    /// Directory buckets only: data redundancy and bucket type
    pub bucket: Option<BucketInfo>,
    /// Directory buckets only: the Availability Zone or Local Zone to create the bucket in
    pub location: Option<LocationInfo>,
    /// The region to create a general purpose bucket in. Omitted for `us-east-1`.
    pub location_constraint: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketInfo {
    /// One of `SingleAvailabilityZone`, `SingleLocalZone`
    pub data_redundancy: Option<String>,
    /// Only `Directory` is accepted by S3
    pub r#type: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    /// The zone ID, eg `usw2-az1`
    pub name: Option<String>,
    /// One of `AvailabilityZone`, `LocalZone`
    pub r#type: Option<String>,
}

/// Bucket owner as reported by GetBucketAcl
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub display_name: Option<String>,
    pub id: Option<String>,
}

/// A single (grantee, permission) entry of a bucket access control list
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub grantee: Option<Grantee>,
    /// One of `FULL_CONTROL`, `READ`, `WRITE`, `READ_ACP`, `WRITE_ACP`
    pub permission: Option<String>,
}
