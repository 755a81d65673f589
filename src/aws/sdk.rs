use std::fmt::Debug;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types as s3;

use super::convert::*;
use super::{AccessControlPolicy, AclGrants, ApiError, CreateBucketInput, S3Api, S3ControlApi};
use crate::resources::bucket_configurations::*;

/// Client-side validation failures surface with this code so they classify like a rejected request
const INVALID_REQUEST: &str = "InvalidRequest";

fn api_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    let code = err.code().map(str::to_string);
    ApiError {
        operation,
        code,
        message: DisplayErrorContext(&err).to_string(),
    }
}

fn build_error(operation: &'static str, err: impl std::error::Error) -> ApiError {
    ApiError::new(operation, Some(INVALID_REQUEST), err.to_string())
}

/// [`S3Api`] backed by the AWS SDK
#[derive(Clone)]
pub struct SdkS3 {
    client: aws_sdk_s3::Client,
}

impl SdkS3 {
    /// `force_path_style` is needed by most S3-compatible endpoints
    pub fn new(config: &SdkConfig, force_path_style: bool) -> Self {
        let config = aws_sdk_s3::config::Builder::from(config)
            .force_path_style(force_path_style)
            .build();
        Self {
            client: aws_sdk_s3::Client::from_conf(config),
        }
    }
}

#[async_trait]
impl S3Api for SdkS3 {
    async fn create_bucket(&self, input: &CreateBucketInput) -> Result<Option<String>, ApiError> {
        let output = self
            .client
            .create_bucket()
            .bucket(&input.bucket)
            .set_acl(canned_acl_to_sdk(&input.grants.acl))
            .set_grant_full_control(input.grants.grant_full_control.clone())
            .set_grant_read(input.grants.grant_read.clone())
            .set_grant_read_acp(input.grants.grant_read_acp.clone())
            .set_grant_write(input.grants.grant_write.clone())
            .set_grant_write_acp(input.grants.grant_write_acp.clone())
            .set_create_bucket_configuration(
                input
                    .create_bucket_configuration
                    .as_ref()
                    .map(create_bucket_configuration_to_sdk),
            )
            .set_object_lock_enabled_for_bucket(input.object_lock_enabled_for_bucket)
            .send()
            .await
            .map_err(|e| api_error("CreateBucket", e))?;
        Ok(output.location)
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucket", e))?;
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<String>, ApiError> {
        let mut names = Vec::new();
        let mut token = None;
        loop {
            let output = self
                .client
                .list_buckets()
                .set_continuation_token(token)
                .send()
                .await
                .map_err(|e| api_error("ListBuckets", e))?;
            names.extend(output.buckets.unwrap_or_default().into_iter().filter_map(|b| b.name));
            token = output.continuation_token;
            if token.is_none() {
                return Ok(names);
            }
        }
    }

    async fn list_directory_buckets(&self) -> Result<Vec<String>, ApiError> {
        let mut names = Vec::new();
        let mut token = None;
        loop {
            let output = self
                .client
                .list_directory_buckets()
                .set_continuation_token(token)
                .send()
                .await
                .map_err(|e| api_error("ListDirectoryBuckets", e))?;
            names.extend(output.buckets.unwrap_or_default().into_iter().filter_map(|b| b.name));
            token = output.continuation_token;
            if token.is_none() {
                return Ok(names);
            }
        }
    }

    async fn get_bucket_accelerate_configuration(
        &self,
        bucket: &str,
    ) -> Result<AccelerateConfiguration, ApiError> {
        let output = self
            .client
            .get_bucket_accelerate_configuration()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketAccelerateConfiguration", e))?;
        Ok(accelerate_from_sdk(&output.status))
    }

    async fn put_bucket_accelerate_configuration(
        &self,
        bucket: &str,
        config: &AccelerateConfiguration,
    ) -> Result<(), ApiError> {
        self.client
            .put_bucket_accelerate_configuration()
            .bucket(bucket)
            .accelerate_configuration(accelerate_to_sdk(config))
            .send()
            .await
            .map_err(|e| api_error("PutBucketAccelerateConfiguration", e))?;
        Ok(())
    }

    async fn get_bucket_acl(&self, bucket: &str) -> Result<AccessControlPolicy, ApiError> {
        let output = self
            .client
            .get_bucket_acl()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketAcl", e))?;
        Ok(AccessControlPolicy {
            owner: output.owner.as_ref().map(Into::into),
            grants: output
                .grants
                .unwrap_or_default()
                .iter()
                .map(Into::into)
                .collect(),
        })
    }

    async fn put_bucket_acl(&self, bucket: &str, grants: &AclGrants) -> Result<(), ApiError> {
        self.client
            .put_bucket_acl()
            .bucket(bucket)
            .set_acl(canned_acl_to_sdk(&grants.acl))
            .set_grant_full_control(grants.grant_full_control.clone())
            .set_grant_read(grants.grant_read.clone())
            .set_grant_read_acp(grants.grant_read_acp.clone())
            .set_grant_write(grants.grant_write.clone())
            .set_grant_write_acp(grants.grant_write_acp.clone())
            .send()
            .await
            .map_err(|e| api_error("PutBucketAcl", e))?;
        Ok(())
    }

    async fn list_bucket_analytics_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<AnalyticsConfiguration>, ApiError> {
        let mut configs = Vec::new();
        let mut token = None;
        loop {
            let output = self
                .client
                .list_bucket_analytics_configurations()
                .bucket(bucket)
                .set_continuation_token(token)
                .send()
                .await
                .map_err(|e| api_error("ListBucketAnalyticsConfigurations", e))?;
            configs.extend(
                output
                    .analytics_configuration_list
                    .unwrap_or_default()
                    .iter()
                    .map(AnalyticsConfiguration::from),
            );
            token = output.next_continuation_token;
            if !output.is_truncated.unwrap_or_default() || token.is_none() {
                return Ok(configs);
            }
        }
    }

    async fn put_bucket_analytics_configuration(
        &self,
        bucket: &str,
        config: &AnalyticsConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketAnalyticsConfiguration";
        let sdk_config =
            s3::AnalyticsConfiguration::try_from(config).map_err(|e| build_error(OP, e))?;
        self.client
            .put_bucket_analytics_configuration()
            .bucket(bucket)
            .id(sdk_config.id.clone())
            .analytics_configuration(sdk_config)
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_analytics_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete_bucket_analytics_configuration()
            .bucket(bucket)
            .id(id)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketAnalyticsConfiguration", e))?;
        Ok(())
    }

    async fn get_bucket_cors(&self, bucket: &str) -> Result<CorsConfiguration, ApiError> {
        let output = self
            .client
            .get_bucket_cors()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketCors", e))?;
        Ok(cors_from_sdk(&output.cors_rules))
    }

    async fn put_bucket_cors(
        &self,
        bucket: &str,
        config: &CorsConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketCors";
        self.client
            .put_bucket_cors()
            .bucket(bucket)
            .cors_configuration(
                s3::CorsConfiguration::try_from(config).map_err(|e| build_error(OP, e))?,
            )
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_cors(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_bucket_cors()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketCors", e))?;
        Ok(())
    }

    async fn get_bucket_encryption(
        &self,
        bucket: &str,
    ) -> Result<ServerSideEncryptionConfiguration, ApiError> {
        let output = self
            .client
            .get_bucket_encryption()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketEncryption", e))?;
        Ok(encryption_from_sdk(&output.server_side_encryption_configuration))
    }

    async fn put_bucket_encryption(
        &self,
        bucket: &str,
        config: &ServerSideEncryptionConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketEncryption";
        self.client
            .put_bucket_encryption()
            .bucket(bucket)
            .server_side_encryption_configuration(
                s3::ServerSideEncryptionConfiguration::try_from(config)
                    .map_err(|e| build_error(OP, e))?,
            )
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_encryption(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_bucket_encryption()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketEncryption", e))?;
        Ok(())
    }

    async fn list_bucket_intelligent_tiering_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<IntelligentTieringConfiguration>, ApiError> {
        let mut configs = Vec::new();
        let mut token = None;
        loop {
            let output = self
                .client
                .list_bucket_intelligent_tiering_configurations()
                .bucket(bucket)
                .set_continuation_token(token)
                .send()
                .await
                .map_err(|e| api_error("ListBucketIntelligentTieringConfigurations", e))?;
            configs.extend(
                output
                    .intelligent_tiering_configuration_list
                    .unwrap_or_default()
                    .iter()
                    .map(IntelligentTieringConfiguration::from),
            );
            token = output.next_continuation_token;
            if !output.is_truncated.unwrap_or_default() || token.is_none() {
                return Ok(configs);
            }
        }
    }

    async fn put_bucket_intelligent_tiering_configuration(
        &self,
        bucket: &str,
        config: &IntelligentTieringConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketIntelligentTieringConfiguration";
        let sdk_config =
            s3::IntelligentTieringConfiguration::try_from(config).map_err(|e| build_error(OP, e))?;
        self.client
            .put_bucket_intelligent_tiering_configuration()
            .bucket(bucket)
            .id(sdk_config.id.clone())
            .intelligent_tiering_configuration(sdk_config)
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_intelligent_tiering_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete_bucket_intelligent_tiering_configuration()
            .bucket(bucket)
            .id(id)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketIntelligentTieringConfiguration", e))?;
        Ok(())
    }

    async fn list_bucket_inventory_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<InventoryConfiguration>, ApiError> {
        let mut configs = Vec::new();
        let mut token = None;
        loop {
            let output = self
                .client
                .list_bucket_inventory_configurations()
                .bucket(bucket)
                .set_continuation_token(token)
                .send()
                .await
                .map_err(|e| api_error("ListBucketInventoryConfigurations", e))?;
            configs.extend(
                output
                    .inventory_configuration_list
                    .unwrap_or_default()
                    .iter()
                    .map(InventoryConfiguration::from),
            );
            token = output.next_continuation_token;
            if !output.is_truncated.unwrap_or_default() || token.is_none() {
                return Ok(configs);
            }
        }
    }

    async fn put_bucket_inventory_configuration(
        &self,
        bucket: &str,
        config: &InventoryConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketInventoryConfiguration";
        let sdk_config =
            s3::InventoryConfiguration::try_from(config).map_err(|e| build_error(OP, e))?;
        self.client
            .put_bucket_inventory_configuration()
            .bucket(bucket)
            .id(sdk_config.id.clone())
            .inventory_configuration(sdk_config)
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_inventory_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete_bucket_inventory_configuration()
            .bucket(bucket)
            .id(id)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketInventoryConfiguration", e))?;
        Ok(())
    }

    async fn get_bucket_lifecycle_configuration(
        &self,
        bucket: &str,
    ) -> Result<BucketLifecycleConfiguration, ApiError> {
        let output = self
            .client
            .get_bucket_lifecycle_configuration()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketLifecycleConfiguration", e))?;
        Ok(lifecycle_from_sdk(&output.rules))
    }

    async fn put_bucket_lifecycle_configuration(
        &self,
        bucket: &str,
        config: &BucketLifecycleConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketLifecycleConfiguration";
        self.client
            .put_bucket_lifecycle_configuration()
            .bucket(bucket)
            .lifecycle_configuration(
                s3::BucketLifecycleConfiguration::try_from(config).map_err(|e| build_error(OP, e))?,
            )
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_lifecycle(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_bucket_lifecycle()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketLifecycle", e))?;
        Ok(())
    }

    async fn get_bucket_logging(&self, bucket: &str) -> Result<BucketLoggingStatus, ApiError> {
        let output = self
            .client
            .get_bucket_logging()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketLogging", e))?;
        Ok(logging_from_sdk(&output.logging_enabled))
    }

    async fn put_bucket_logging(
        &self,
        bucket: &str,
        config: &BucketLoggingStatus,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketLogging";
        self.client
            .put_bucket_logging()
            .bucket(bucket)
            .bucket_logging_status(
                s3::BucketLoggingStatus::try_from(config).map_err(|e| build_error(OP, e))?,
            )
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn list_bucket_metrics_configurations(
        &self,
        bucket: &str,
    ) -> Result<Vec<MetricsConfiguration>, ApiError> {
        let mut configs = Vec::new();
        let mut token = None;
        loop {
            let output = self
                .client
                .list_bucket_metrics_configurations()
                .bucket(bucket)
                .set_continuation_token(token)
                .send()
                .await
                .map_err(|e| api_error("ListBucketMetricsConfigurations", e))?;
            configs.extend(
                output
                    .metrics_configuration_list
                    .unwrap_or_default()
                    .iter()
                    .map(MetricsConfiguration::from),
            );
            token = output.next_continuation_token;
            if !output.is_truncated.unwrap_or_default() || token.is_none() {
                return Ok(configs);
            }
        }
    }

    async fn put_bucket_metrics_configuration(
        &self,
        bucket: &str,
        config: &MetricsConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketMetricsConfiguration";
        let sdk_config =
            s3::MetricsConfiguration::try_from(config).map_err(|e| build_error(OP, e))?;
        self.client
            .put_bucket_metrics_configuration()
            .bucket(bucket)
            .id(sdk_config.id.clone())
            .metrics_configuration(sdk_config)
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_metrics_configuration(
        &self,
        bucket: &str,
        id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete_bucket_metrics_configuration()
            .bucket(bucket)
            .id(id)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketMetricsConfiguration", e))?;
        Ok(())
    }

    async fn get_bucket_notification_configuration(
        &self,
        bucket: &str,
    ) -> Result<NotificationConfiguration, ApiError> {
        let output = self
            .client
            .get_bucket_notification_configuration()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketNotificationConfiguration", e))?;
        Ok(notification_from_sdk(&output))
    }

    async fn put_bucket_notification_configuration(
        &self,
        bucket: &str,
        config: &NotificationConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketNotificationConfiguration";
        self.client
            .put_bucket_notification_configuration()
            .bucket(bucket)
            .notification_configuration(
                s3::NotificationConfiguration::try_from(config).map_err(|e| build_error(OP, e))?,
            )
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn get_bucket_ownership_controls(
        &self,
        bucket: &str,
    ) -> Result<Option<OwnershipControls>, ApiError> {
        let output = self
            .client
            .get_bucket_ownership_controls()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketOwnershipControls", e))?;
        Ok(output.ownership_controls.as_ref().map(Into::into))
    }

    async fn put_bucket_ownership_controls(
        &self,
        bucket: &str,
        config: &OwnershipControls,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketOwnershipControls";
        self.client
            .put_bucket_ownership_controls()
            .bucket(bucket)
            .ownership_controls(
                s3::OwnershipControls::try_from(config).map_err(|e| build_error(OP, e))?,
            )
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_ownership_controls(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_bucket_ownership_controls()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketOwnershipControls", e))?;
        Ok(())
    }

    async fn get_bucket_policy(&self, bucket: &str) -> Result<Option<String>, ApiError> {
        let output = self
            .client
            .get_bucket_policy()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketPolicy", e))?;
        Ok(output.policy)
    }

    async fn put_bucket_policy(
        &self,
        bucket: &str,
        policy: &str,
        confirm_remove_self_bucket_access: Option<bool>,
    ) -> Result<(), ApiError> {
        self.client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .set_confirm_remove_self_bucket_access(confirm_remove_self_bucket_access)
            .send()
            .await
            .map_err(|e| api_error("PutBucketPolicy", e))?;
        Ok(())
    }

    async fn delete_bucket_policy(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_bucket_policy()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketPolicy", e))?;
        Ok(())
    }

    async fn get_public_access_block(
        &self,
        bucket: &str,
    ) -> Result<Option<PublicAccessBlockConfiguration>, ApiError> {
        let output = self
            .client
            .get_public_access_block()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetPublicAccessBlock", e))?;
        Ok(output.public_access_block_configuration.as_ref().map(Into::into))
    }

    async fn put_public_access_block(
        &self,
        bucket: &str,
        config: &PublicAccessBlockConfiguration,
    ) -> Result<(), ApiError> {
        self.client
            .put_public_access_block()
            .bucket(bucket)
            .public_access_block_configuration(config.into())
            .send()
            .await
            .map_err(|e| api_error("PutPublicAccessBlock", e))?;
        Ok(())
    }

    async fn delete_public_access_block(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_public_access_block()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeletePublicAccessBlock", e))?;
        Ok(())
    }

    async fn get_bucket_replication(
        &self,
        bucket: &str,
    ) -> Result<Option<ReplicationConfiguration>, ApiError> {
        let output = self
            .client
            .get_bucket_replication()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketReplication", e))?;
        Ok(output.replication_configuration.as_ref().map(Into::into))
    }

    async fn put_bucket_replication(
        &self,
        bucket: &str,
        config: &ReplicationConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketReplication";
        self.client
            .put_bucket_replication()
            .bucket(bucket)
            .replication_configuration(
                s3::ReplicationConfiguration::try_from(config).map_err(|e| build_error(OP, e))?,
            )
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_replication(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_bucket_replication()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketReplication", e))?;
        Ok(())
    }

    async fn get_bucket_request_payment(
        &self,
        bucket: &str,
    ) -> Result<RequestPaymentConfiguration, ApiError> {
        let output = self
            .client
            .get_bucket_request_payment()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketRequestPayment", e))?;
        Ok(request_payment_from_sdk(&output.payer))
    }

    async fn put_bucket_request_payment(
        &self,
        bucket: &str,
        config: &RequestPaymentConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketRequestPayment";
        self.client
            .put_bucket_request_payment()
            .bucket(bucket)
            .request_payment_configuration(
                s3::RequestPaymentConfiguration::try_from(config).map_err(|e| build_error(OP, e))?,
            )
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn get_bucket_tagging(&self, bucket: &str) -> Result<Tagging, ApiError> {
        let output = self
            .client
            .get_bucket_tagging()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketTagging", e))?;
        Ok(tagging_from_sdk(&output.tag_set))
    }

    async fn put_bucket_tagging(&self, bucket: &str, config: &Tagging) -> Result<(), ApiError> {
        const OP: &str = "PutBucketTagging";
        self.client
            .put_bucket_tagging()
            .bucket(bucket)
            .tagging(tagging_to_sdk(config).map_err(|e| build_error(OP, e))?)
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_tagging(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_bucket_tagging()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketTagging", e))?;
        Ok(())
    }

    async fn get_bucket_versioning(
        &self,
        bucket: &str,
    ) -> Result<VersioningConfiguration, ApiError> {
        let output = self
            .client
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketVersioning", e))?;
        Ok(versioning_from_sdk(&output.status, &output.mfa_delete))
    }

    async fn put_bucket_versioning(
        &self,
        bucket: &str,
        config: &VersioningConfiguration,
    ) -> Result<(), ApiError> {
        self.client
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(versioning_to_sdk(config))
            .send()
            .await
            .map_err(|e| api_error("PutBucketVersioning", e))?;
        Ok(())
    }

    async fn get_bucket_website(&self, bucket: &str) -> Result<WebsiteConfiguration, ApiError> {
        let output = self
            .client
            .get_bucket_website()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetBucketWebsite", e))?;
        Ok(website_from_sdk(&output))
    }

    async fn put_bucket_website(
        &self,
        bucket: &str,
        config: &WebsiteConfiguration,
    ) -> Result<(), ApiError> {
        const OP: &str = "PutBucketWebsite";
        self.client
            .put_bucket_website()
            .bucket(bucket)
            .website_configuration(
                s3::WebsiteConfiguration::try_from(config).map_err(|e| build_error(OP, e))?,
            )
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn delete_bucket_website(&self, bucket: &str) -> Result<(), ApiError> {
        self.client
            .delete_bucket_website()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("DeleteBucketWebsite", e))?;
        Ok(())
    }

    async fn get_object_lock_configuration(&self, bucket: &str) -> Result<bool, ApiError> {
        let output = self
            .client
            .get_object_lock_configuration()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| api_error("GetObjectLockConfiguration", e))?;
        Ok(output
            .object_lock_configuration
            .and_then(|c| c.object_lock_enabled)
            .is_some_and(|e| e == s3::ObjectLockEnabled::Enabled))
    }

    async fn put_object_lock_configuration(
        &self,
        bucket: &str,
        enabled: bool,
    ) -> Result<(), ApiError> {
        let config = enabled.then(|| {
            s3::ObjectLockConfiguration::builder()
                .object_lock_enabled(s3::ObjectLockEnabled::Enabled)
                .build()
        });
        self.client
            .put_object_lock_configuration()
            .bucket(bucket)
            .set_object_lock_configuration(config)
            .send()
            .await
            .map_err(|e| api_error("PutObjectLockConfiguration", e))?;
        Ok(())
    }
}

/// [`S3ControlApi`] backed by the AWS SDK
#[derive(Clone)]
pub struct SdkS3Control {
    client: aws_sdk_s3control::Client,
}

impl SdkS3Control {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3control::Client::new(config),
        }
    }
}

#[async_trait]
impl S3ControlApi for SdkS3Control {
    async fn list_tags_for_resource(
        &self,
        account_id: &str,
        resource_arn: &str,
    ) -> Result<Vec<Tag>, ApiError> {
        let output = self
            .client
            .list_tags_for_resource()
            .account_id(account_id)
            .resource_arn(resource_arn)
            .send()
            .await
            .map_err(|e| api_error("ListTagsForResource", e))?;
        Ok(output.tags.unwrap_or_default().iter().map(Into::into).collect())
    }

    async fn tag_resource(
        &self,
        account_id: &str,
        resource_arn: &str,
        tags: &[Tag],
    ) -> Result<(), ApiError> {
        const OP: &str = "TagResource";
        let tags = tags
            .iter()
            .map(aws_sdk_s3control::types::Tag::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| build_error(OP, e))?;
        self.client
            .tag_resource()
            .account_id(account_id)
            .resource_arn(resource_arn)
            .set_tags(Some(tags))
            .send()
            .await
            .map_err(|e| api_error(OP, e))?;
        Ok(())
    }

    async fn untag_resource(
        &self,
        account_id: &str,
        resource_arn: &str,
        tag_keys: &[String],
    ) -> Result<(), ApiError> {
        self.client
            .untag_resource()
            .account_id(account_id)
            .resource_arn(resource_arn)
            .set_tag_keys(Some(tag_keys.to_vec()))
            .send()
            .await
            .map_err(|e| api_error("UntagResource", e))?;
        Ok(())
    }
}
