//! Directory buckets (S3 Express One Zone) support a reduced set of sub-resources and are
//! addressed by a region and account qualified ARN.

use crate::resources::buckets::BucketSpec;
use crate::{Error, Result};

pub const DIRECTORY_BUCKET_SUFFIX: &str = "--x-s3";

pub fn is_directory_bucket_name(name: &str) -> bool {
    name.ends_with(DIRECTORY_BUCKET_SUFFIX)
}

pub fn bucket_arn(name: &str, region: &str, account_id: Option<&str>) -> Result<String> {
    if !is_directory_bucket_name(name) {
        return Ok(format!("arn:aws:s3:::{name}"));
    }
    let account_id = account_id.ok_or_else(|| Error::MissingAccountId(name.to_string()))?;
    Ok(format!("arn:aws:s3express:{region}:{account_id}:bucket/{name}"))
}

/// Fields of a resource, by their name on the resource, that a directory bucket cannot carry
pub fn unsupported_fields(spec: &BucketSpec) -> Vec<&'static str> {
    let populated = [
        ("acl", spec.acl.is_some()),
        ("grantFullControl", spec.grant_full_control.is_some()),
        ("grantRead", spec.grant_read.is_some()),
        ("grantReadACP", spec.grant_read_acp.is_some()),
        ("grantWrite", spec.grant_write.is_some()),
        ("grantWriteACP", spec.grant_write_acp.is_some()),
        ("objectLockEnabledForBucket", spec.object_lock_enabled_for_bucket.is_some()),
        ("accelerate", spec.accelerate.is_some()),
        ("analytics", spec.analytics.is_some()),
        ("cors", spec.cors.is_some()),
        ("intelligentTiering", spec.intelligent_tiering.is_some()),
        ("inventory", spec.inventory.is_some()),
        ("logging", spec.logging.is_some()),
        ("metrics", spec.metrics.is_some()),
        ("notification", spec.notification.is_some()),
        ("ownershipControls", spec.ownership_controls.is_some()),
        ("publicAccessBlock", spec.public_access_block.is_some()),
        ("replication", spec.replication.is_some()),
        ("requestPayment", spec.request_payment.is_some()),
        ("versioning", spec.versioning.is_some()),
        ("website", spec.website.is_some()),
    ];
    populated
        .into_iter()
        .filter_map(|(field, set)| set.then_some(field))
        .collect()
}

/// Rejects a directory bucket resource that populates any field directory buckets do not
/// support, naming every such field. General purpose buckets always pass.
pub fn validate(spec: &BucketSpec) -> Result<()> {
    if !is_directory_bucket_name(&spec.name) {
        return Ok(());
    }
    let unsupported = unsupported_fields(spec);
    if unsupported.is_empty() {
        return Ok(());
    }
    Err(Error::Terminal(format!(
        "directory bucket {} does not support the following fields: {}",
        spec.name,
        unsupported.join(", ")
    )))
}
