use std::future::Future;
use std::sync::Arc;

use crate::aws::{ApiError, S3Api, S3ControlApi};
use crate::metrics::ApiVerb;
use crate::resources::bucket_configurations::PublicAccessBlockConfiguration;
use crate::Metrics;

pub mod acl;
pub mod configurations;
pub mod delta;
pub mod directory;
pub mod hydrate;
pub mod orchestrator;
pub mod precompare;
pub mod singletons;
pub mod tagging;

pub const DEFAULT_ACCELERATE_STATUS: &str = "Suspended";
pub const DEFAULT_REQUEST_PAYER: &str = "BucketOwner";
pub const DEFAULT_VERSIONING_STATUS: &str = "Suspended";
pub const DEFAULT_ACL: &str = acl::CANNED_ACL_PRIVATE;

/// The public access block S3 reports for a bucket that never had one configured
pub const DEFAULT_PUBLIC_ACCESS_BLOCK: PublicAccessBlockConfiguration =
    PublicAccessBlockConfiguration {
        block_public_acls: Some(false),
        block_public_policy: Some(false),
        ignore_public_acls: Some(false),
        restrict_public_buckets: Some(false),
    };

/// Holds the S3 clients and everything needed to address a bucket.
///
/// Every call to AWS goes through [`ResourceManager::call`] so that it is counted exactly once.
pub struct ResourceManager {
    pub(crate) s3: Arc<dyn S3Api>,
    pub(crate) control: Arc<dyn S3ControlApi>,
    metrics: Metrics,
    account_id: Option<String>,
    region: String,
}

impl ResourceManager {
    pub fn new(
        s3: Arc<dyn S3Api>,
        control: Arc<dyn S3ControlApi>,
        metrics: Metrics,
        account_id: Option<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            s3,
            control,
            metrics,
            account_id,
            region: region.into(),
        }
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub(crate) async fn call<T>(
        &self,
        verb: ApiVerb,
        operation: &'static str,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        let result = request.await;
        self.metrics
            .record_api_call(verb, operation, result.as_ref().err());
        result
    }
}

/// A list-valued configuration counts as configured only when it holds at least one element
pub(crate) fn is_configured<T>(list: &Option<Vec<T>>) -> bool {
    list.as_ref().is_some_and(|l| !l.is_empty())
}

/// Maps the "not configured" error codes of a Get operation to `Ok(None)`
pub(crate) fn absent_on<T>(
    result: Result<T, ApiError>,
    codes: &[&str],
) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.has_code(codes) => Ok(None),
        Err(e) => Err(e),
    }
}
