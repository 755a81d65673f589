use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::bucket_configurations::*;

pub static BUCKET_FINALIZER: &str = "finalizers.s3.services.k8s.aws/Bucket";

/// Annotation selecting whether the S3 bucket is deleted along with the resource
pub static DELETION_POLICY_ANNOTATION: &str = "services.k8s.aws/deletion-policy";
/// Namespace-level fallback for [`DELETION_POLICY_ANNOTATION`]
pub static NAMESPACE_DELETION_POLICY_ANNOTATION: &str = "s3.services.k8s.aws/deletion-policy";
/// Annotation selecting whether an existing bucket may be adopted, and whether a missing one may
/// be created
pub static ADOPTION_POLICY_ANNOTATION: &str = "services.k8s.aws/adoption-policy";

/// Represents an S3 bucket and every sub-configuration attached to it.
///
/// Every optional field expresses "no opinion" when absent: the operator leaves AWS's value alone,
/// or resets it to the S3 default where the API has no notion of "unset". A populated field must
/// match the live configuration exactly.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[kube(
    kind = "Bucket",
    group = "s3.services.k8s.aws",
    version = "v1alpha1",
    namespaced,
    printcolumn = r#"{"name":"ARN", "priority": 1, "type":"string", "jsonPath":".status.ackResourceMetadata.arn"}"#,
    printcolumn = r#"{"name":"Synced", "type":"string", "jsonPath":".status.conditions[?(@.type==\"ACK.ResourceSynced\")].status"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[kube(status = "BucketStatus", shortname = "bucket")]
#[serde(rename_all = "camelCase")]
pub struct BucketSpec {
    /// The name of the bucket. Directory bucket names end with `--<zone-id>--x-s3`.
    /// This field is immutable.
    pub name: String,

    /// The canned ACL to apply to the bucket, eg `private`, `public-read`.
    /// Takes precedence over the grant fields.
    pub acl: Option<String>,
    /// Allows grantee the read, write, read ACP, and write ACP permissions on the bucket.
    /// Comma separated `id=<canonical user id>` or `uri=<group uri>` tokens.
    pub grant_full_control: Option<String>,
    /// Allows grantee to list the objects in the bucket.
    pub grant_read: Option<String>,
    /// Allows grantee to read the bucket ACL.
    #[serde(rename = "grantReadACP")]
    pub grant_read_acp: Option<String>,
    /// Allows grantee to create new objects in the bucket.
    pub grant_write: Option<String>,
    /// Allows grantee to write the ACL for the applicable bucket.
    #[serde(rename = "grantWriteACP")]
    pub grant_write_acp: Option<String>,

    /// Placement of the bucket. Only used at creation.
    pub create_bucket_configuration: Option<CreateBucketConfiguration>,
    /// Whether S3 Object Lock is enabled for the bucket.
    /// Object Lock cannot be disabled once enabled.
    pub object_lock_enabled_for_bucket: Option<bool>,

    pub accelerate: Option<AccelerateConfiguration>,
    pub analytics: Option<Vec<AnalyticsConfiguration>>,
    pub cors: Option<CorsConfiguration>,
    pub encryption: Option<ServerSideEncryptionConfiguration>,
    pub intelligent_tiering: Option<Vec<IntelligentTieringConfiguration>>,
    pub inventory: Option<Vec<InventoryConfiguration>>,
    pub lifecycle: Option<BucketLifecycleConfiguration>,
    pub logging: Option<BucketLoggingStatus>,
    pub metrics: Option<Vec<MetricsConfiguration>>,
    pub notification: Option<NotificationConfiguration>,
    pub ownership_controls: Option<OwnershipControls>,
    /// The bucket policy as a JSON document
    pub policy: Option<String>,
    pub public_access_block: Option<PublicAccessBlockConfiguration>,
    pub replication: Option<ReplicationConfiguration>,
    pub request_payment: Option<RequestPaymentConfiguration>,
    pub tagging: Option<Tagging>,
    pub versioning: Option<VersioningConfiguration>,
    pub website: Option<WebsiteConfiguration>,
}

/// Status of the Bucket.
/// This is set and managed automatically.
/// Read-only.
/// More info: https://git.k8s.io/community/contributors/devel/sig-architecture/api-conventions.md#spec-and-status
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketStatus {
    pub ack_resource_metadata: Option<ResourceMetadata>,
    /// The location returned by CreateBucket
    pub location: Option<String>,
    pub conditions: Option<Vec<BucketCondition>>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    pub arn: Option<String>,
    #[serde(rename = "ownerAccountID")]
    pub owner_account_id: Option<String>,
    pub region: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketCondition {
    /// Last time the condition transitioned from one status to another.
    pub last_transition_time: Option<k8s_openapi::apimachinery::pkg::apis::meta::v1::Time>,

    /// Human-readable message indicating details about last transition.
    pub message: Option<String>,

    /// Unique, one-word, CamelCase reason for the condition's last transition.
    pub reason: Option<String>,

    /// Status is the status of the condition. Can be True, False, Unknown.
    pub status: String,

    /// Type of the condition, known values are
    /// (`ACK.ResourceSynced`, `ACK.Terminal`, `ACK.Recoverable`).
    pub r#type: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletionPolicy {
    Delete,
    Retain,
}

impl DeletionPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "delete" => Some(DeletionPolicy::Delete),
            "retain" => Some(DeletionPolicy::Retain),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AdoptionPolicy {
    /// The bucket must already exist; it is never created
    Adopt,
    /// Adopt the bucket when it exists, otherwise create it
    #[default]
    AdoptOrCreate,
}

impl AdoptionPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "adopt" => Some(AdoptionPolicy::Adopt),
            "adopt-or-create" => Some(AdoptionPolicy::AdoptOrCreate),
            _ => None,
        }
    }
}

impl Bucket {
    pub fn deletion_policy(&self) -> Option<DeletionPolicy> {
        self.metadata
            .annotations
            .as_ref()
            .and_then(|a| a.get(DELETION_POLICY_ANNOTATION))
            .and_then(|v| DeletionPolicy::parse(v))
    }

    pub fn adoption_policy(&self) -> AdoptionPolicy {
        self.metadata
            .annotations
            .as_ref()
            .and_then(|a| a.get(ADOPTION_POLICY_ANNOTATION))
            .and_then(|v| AdoptionPolicy::parse(v))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_include;
    use kube::core::ObjectMeta;
    use serde_json::json;

    #[test]
    fn spec_serializes_with_camel_case_fields() {
        let spec = BucketSpec {
            name: "my-bucket".into(),
            grant_read_acp: Some("id=123".into()),
            public_access_block: Some(PublicAccessBlockConfiguration {
                block_public_acls: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_json_include!(
            actual: serde_json::to_value(&spec).unwrap(),
            expected: json!({
                "name": "my-bucket",
                "grantReadACP": "id=123",
                "publicAccessBlock": { "blockPublicAcls": true }
            })
        );
    }

    #[test]
    fn annotations_select_policies() {
        let mut bucket = Bucket::new("b", BucketSpec::default());
        assert_eq!(bucket.deletion_policy(), None);
        assert_eq!(bucket.adoption_policy(), AdoptionPolicy::AdoptOrCreate);

        bucket.metadata = ObjectMeta {
            annotations: Some(
                [
                    (DELETION_POLICY_ANNOTATION.to_string(), "Retain".to_string()),
                    (ADOPTION_POLICY_ANNOTATION.to_string(), "adopt".to_string()),
                ]
                .into_iter()
                .collect(),
            ),
            ..Default::default()
        };
        assert_eq!(bucket.deletion_policy(), Some(DeletionPolicy::Retain));
        assert_eq!(bucket.adoption_policy(), AdoptionPolicy::Adopt);
    }
}
