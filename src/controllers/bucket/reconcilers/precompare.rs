//! Normalization applied to desired and observed state before they are compared.
//!
//! S3 reports a value for several sub-resources even when nobody configured them. A resource
//! without an opinion on such a sub-resource must compare equal to the S3 default, otherwise it
//! would be reported as drifted forever.

use super::acl::CannedAclPossibilities;
use super::configurations::NamedConfiguration;
use super::{
    is_configured, DEFAULT_ACCELERATE_STATUS, DEFAULT_PUBLIC_ACCESS_BLOCK, DEFAULT_REQUEST_PAYER,
    DEFAULT_VERSIONING_STATUS,
};
use crate::resources::bucket_configurations::*;
use crate::resources::buckets::BucketSpec;

pub fn normalize(desired: &mut BucketSpec, observed: &mut BucketSpec) {
    normalize_acl(desired, observed);

    if desired.accelerate.is_none() {
        if let Some(accelerate) = &observed.accelerate {
            desired.accelerate = Some(AccelerateConfiguration {
                status: keep_default(&accelerate.status, DEFAULT_ACCELERATE_STATUS),
            });
        }
    }
    if desired.versioning.is_none() {
        if let Some(versioning) = &observed.versioning {
            desired.versioning = Some(VersioningConfiguration {
                status: keep_default(&versioning.status, DEFAULT_VERSIONING_STATUS),
                ..Default::default()
            });
        }
    }
    if desired.request_payment.is_none() && observed.request_payment.is_some() {
        desired.request_payment = Some(RequestPaymentConfiguration {
            payer: Some(DEFAULT_REQUEST_PAYER.to_string()),
        });
    }
    if desired.public_access_block.is_none() && observed.public_access_block.is_some() {
        desired.public_access_block = Some(DEFAULT_PUBLIC_ACCESS_BLOCK);
    }

    empty_when_observed(&mut desired.analytics, &observed.analytics);
    empty_when_observed(&mut desired.intelligent_tiering, &observed.intelligent_tiering);
    empty_when_observed(&mut desired.inventory, &observed.inventory);
    empty_when_observed(&mut desired.metrics, &observed.metrics);
    empty_when_observed(&mut desired.cors, &observed.cors);
    empty_when_observed(&mut desired.encryption, &observed.encryption);
    empty_when_observed(&mut desired.lifecycle, &observed.lifecycle);
    empty_when_observed(&mut desired.logging, &observed.logging);
    empty_when_observed(&mut desired.notification, &observed.notification);
    empty_when_observed(&mut desired.ownership_controls, &observed.ownership_controls);
    empty_when_observed(&mut desired.replication, &observed.replication);
    empty_when_observed(&mut desired.tagging, &observed.tagging);
    empty_when_observed(&mut desired.website, &observed.website);

    // A desired configuration that is deleted on sync matches a sub-resource S3 reports as
    // not configured.
    unset_when_absent(&desired.cors, &mut observed.cors, |c| !is_configured(&c.cors_rules));
    unset_when_absent(&desired.encryption, &mut observed.encryption, |c| {
        !is_configured(&c.rules)
    });
    unset_when_absent(&desired.lifecycle, &mut observed.lifecycle, |c| {
        !is_configured(&c.rules)
    });
    unset_when_absent(&desired.ownership_controls, &mut observed.ownership_controls, |c| {
        !is_configured(&c.rules)
    });
    unset_when_absent(&desired.replication, &mut observed.replication, |c| {
        !is_configured(&c.rules)
    });
    unset_when_absent(&desired.tagging, &mut observed.tagging, |c| !is_configured(&c.tag_set));
    unset_when_absent(&desired.website, &mut observed.website, |c| c.index_document.is_none());
    unset_when_absent(&desired.public_access_block, &mut observed.public_access_block, |c| {
        *c == DEFAULT_PUBLIC_ACCESS_BLOCK
    });

    // List configurations are identified by ID and tags by key, so order carries no meaning
    for spec in [&mut *desired, &mut *observed] {
        by_id(&mut spec.analytics);
        by_id(&mut spec.intelligent_tiering);
        by_id(&mut spec.inventory);
        by_id(&mut spec.metrics);
        if let Some(tags) = spec.tagging.as_mut().and_then(|t| t.tag_set.as_mut()) {
            tags.sort_by(|a, b| a.key.cmp(&b.key));
        }
    }

    // Object Lock cannot be turned off, so no opinion means no comparison
    if desired.object_lock_enabled_for_bucket.is_none() {
        observed.object_lock_enabled_for_bucket = None;
    }
}

fn keep_default(observed: &Option<String>, default: &str) -> Option<String> {
    observed
        .as_deref()
        .filter(|status| *status == default)
        .map(str::to_string)
}

fn empty_when_observed<T: Default>(desired: &mut Option<T>, observed: &Option<T>) {
    if desired.is_none() && observed.is_some() {
        *desired = Some(T::default());
    }
}

/// Sorts by ID, keeping only the first configuration of every ID
fn by_id<C: NamedConfiguration>(configs: &mut Option<Vec<C>>) {
    if let Some(configs) = configs {
        configs.sort_by(|a, b| a.id().cmp(b.id()));
        configs.dedup_by(|later, first| later.id() == first.id());
    }
}

fn unset_when_absent<T: Clone>(
    desired: &Option<T>,
    observed: &mut Option<T>,
    unset: impl Fn(&T) -> bool,
) {
    if observed.is_some() {
        return;
    }
    if let Some(config) = desired.as_ref().filter(|c| unset(c)) {
        *observed = Some(config.clone());
    }
}

fn normalize_acl(desired: &mut BucketSpec, observed: &mut BucketSpec) {
    if let Some(acl) = desired.acl.clone() {
        // A canned ACL and the grant fields describe the same thing
        for spec in [&mut *desired, &mut *observed] {
            spec.grant_full_control = None;
            spec.grant_read = None;
            spec.grant_read_acp = None;
            spec.grant_write = None;
            spec.grant_write_acp = None;
        }
        if let Some(possibilities) = &observed.acl {
            let chosen = CannedAclPossibilities::parse(&acl)
                .first()
                .map(str::to_string)
                .unwrap_or_default();
            observed.acl = CannedAclPossibilities::parse(possibilities).matching(&chosen);
            desired.acl = Some(chosen);
        }
        return;
    }

    if observed
        .acl
        .as_deref()
        .is_some_and(|p| CannedAclPossibilities::parse(p).is_default())
    {
        observed.acl = None;
    }

    let no_grants = desired.grant_full_control.is_none()
        && desired.grant_read.is_none()
        && desired.grant_read_acp.is_none()
        && desired.grant_write.is_none()
        && desired.grant_write_acp.is_none();
    if no_grants {
        observed.grant_full_control = None;
        observed.grant_read = None;
        observed.grant_read_acp = None;
        observed.grant_write = None;
        observed.grant_write_acp = None;
        return;
    }

    // The owner always holds FULL_CONTROL, whether or not it was asked for
    if desired.grant_full_control.is_none() && observed.grant_full_control.is_some() {
        desired.grant_full_control = Some(String::new());
        observed.grant_full_control = Some(String::new());
    }
    for (desired, observed) in [
        (&mut desired.grant_read, &observed.grant_read),
        (&mut desired.grant_read_acp, &observed.grant_read_acp),
        (&mut desired.grant_write, &observed.grant_write),
        (&mut desired.grant_write_acp, &observed.grant_write_acp),
    ] {
        if desired.is_none() && observed.is_some() {
            *desired = Some(String::new());
        }
    }
}
