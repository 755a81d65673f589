//! Canned ACL inference.
//!
//! GetBucketAcl only returns raw grants, never the canned ACL a bucket was created with. Several
//! canned ACLs produce identical grant lists, so inference yields every canned ACL consistent
//! with the grants. The grants themselves are also rendered back into the `x-amz-grant-*` header
//! format so that resources specifying raw grants can be compared.

use std::fmt;

use tracing::{debug, instrument};

use super::ResourceManager;
use crate::aws::{AccessControlPolicy, AclGrants};
use crate::metrics::ApiVerb;
use crate::resources::bucket_configurations::{Grant, Owner};
use crate::resources::buckets::BucketSpec;
use crate::Result;

pub const CANNED_ACL_PRIVATE: &str = "private";
pub const CANNED_ACL_PUBLIC_READ: &str = "public-read";
pub const CANNED_ACL_PUBLIC_READ_WRITE: &str = "public-read-write";
pub const CANNED_ACL_AWS_EXEC_READ: &str = "aws-exec-read";
pub const CANNED_ACL_AUTHENTICATED_READ: &str = "authenticated-read";
pub const CANNED_ACL_BUCKET_OWNER_READ: &str = "bucket-owner-read";
pub const CANNED_ACL_BUCKET_OWNER_FULL_CONTROL: &str = "bucket-owner-full-control";
pub const CANNED_ACL_LOG_DELIVERY_WRITE: &str = "log-delivery-write";

/// Canonical user granted READ by `aws-exec-read`
pub const EXEC_READ_GRANTEE_ID: &str =
    "6aa5a366c34c1cbe25dc49211496e913e0351eb0e8c37aa3477e40942ec6b97c";
pub const GROUP_ALL_USERS: &str = "http://acs.amazonaws.com/groups/global/AllUsers";
pub const GROUP_AUTHENTICATED_USERS: &str =
    "http://acs.amazonaws.com/groups/global/AuthenticatedUsers";
pub const GROUP_LOG_DELIVERY: &str = "http://acs.amazonaws.com/groups/s3/LogDelivery";

const PERMISSION_FULL_CONTROL: &str = "FULL_CONTROL";
const PERMISSION_READ: &str = "READ";
const PERMISSION_READ_ACP: &str = "READ_ACP";
const PERMISSION_WRITE: &str = "WRITE";
const PERMISSION_WRITE_ACP: &str = "WRITE_ACP";

const GRANTEE_CANONICAL_USER: &str = "CanonicalUser";
const GRANTEE_GROUP: &str = "Group";

/// Joins the possibilities when they are stored in the `acl` field of the resource
const POSSIBILITIES_DELIMITER: char = '|';

/// The canned ACLs a grant list is consistent with, in a fixed order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CannedAclPossibilities(Vec<String>);

impl CannedAclPossibilities {
    /// Infers the canned ACLs from the owner and the grants of a bucket ACL.
    /// The result does not depend on the order of `grants`.
    pub fn from_grants(owner: Option<&Owner>, grants: &[Grant]) -> Self {
        let Some(owner_id) = owner.and_then(|o| o.id.as_deref()) else {
            return Self::default();
        };
        let Some(owner_position) = grants.iter().position(|g| {
            grantee_id(g) == Some(owner_id) && permission(g) == Some(PERMISSION_FULL_CONTROL)
        }) else {
            return Self::default();
        };
        let others: Vec<&Grant> = grants
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != owner_position)
            .map(|(_, g)| g)
            .collect();

        let names: &[&str] = match others.as_slice() {
            [] => &[
                CANNED_ACL_PRIVATE,
                CANNED_ACL_BUCKET_OWNER_READ,
                CANNED_ACL_BUCKET_OWNER_FULL_CONTROL,
            ],
            [other] if permission(other) == Some(PERMISSION_READ) => {
                if is_canonical_user(other, EXEC_READ_GRANTEE_ID) {
                    &[CANNED_ACL_AWS_EXEC_READ]
                } else if is_group(other, GROUP_ALL_USERS) {
                    &[CANNED_ACL_PUBLIC_READ]
                } else if is_group(other, GROUP_AUTHENTICATED_USERS) {
                    &[CANNED_ACL_AUTHENTICATED_READ]
                } else {
                    &[]
                }
            }
            [a, b] => {
                if group_holds(a, b, GROUP_LOG_DELIVERY, PERMISSION_WRITE, PERMISSION_READ_ACP) {
                    &[CANNED_ACL_LOG_DELIVERY_WRITE]
                } else if group_holds(a, b, GROUP_ALL_USERS, PERMISSION_READ, PERMISSION_WRITE) {
                    &[CANNED_ACL_PUBLIC_READ_WRITE]
                } else {
                    &[]
                }
            }
            _ => &[],
        };
        Self(names.iter().map(|n| n.to_string()).collect())
    }

    /// Splits a value previously rendered with [`fmt::Display`]
    pub fn parse(joined: &str) -> Self {
        Self(
            joined
                .split(POSSIBILITIES_DELIMITER)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The grants are what S3 attaches to a bucket created without any ACL
    pub fn is_default(&self) -> bool {
        self.0.iter().any(|p| p == CANNED_ACL_PRIVATE)
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns an owned copy of the possibility equal to `acl`
    pub fn matching(&self, acl: &str) -> Option<String> {
        self.0.iter().find(|p| *p == acl).cloned()
    }
}

impl fmt::Display for CannedAclPossibilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{POSSIBILITIES_DELIMITER}")?;
            }
            f.write_str(p)?;
        }
        Ok(())
    }
}

fn permission(grant: &Grant) -> Option<&str> {
    grant.permission.as_deref()
}

fn grantee_id(grant: &Grant) -> Option<&str> {
    grant.grantee.as_ref().and_then(|g| g.id.as_deref())
}

fn grantee_uri(grant: &Grant) -> Option<&str> {
    grant.grantee.as_ref().and_then(|g| g.uri.as_deref())
}

fn grantee_type(grant: &Grant) -> Option<&str> {
    grant.grantee.as_ref().and_then(|g| g.r#type.as_deref())
}

fn is_canonical_user(grant: &Grant, id: &str) -> bool {
    grantee_type(grant).map_or(true, |t| t == GRANTEE_CANONICAL_USER)
        && grantee_id(grant) == Some(id)
}

fn is_group(grant: &Grant, uri: &str) -> bool {
    grantee_type(grant).map_or(true, |t| t == GRANTEE_GROUP) && grantee_uri(grant) == Some(uri)
}

/// Both grants go to `group`, one with each of the two permissions
fn group_holds(a: &Grant, b: &Grant, group: &str, first: &str, second: &str) -> bool {
    if !is_group(a, group) || !is_group(b, group) {
        return false;
    }
    matches!(
        (permission(a), permission(b)),
        (Some(x), Some(y)) if (x == first && y == second) || (x == second && y == first)
    )
}

/// Grants rendered in the `x-amz-grant-*` header format, one field per permission.
/// A permission nobody holds is `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrantHeaders {
    pub full_control: Option<String>,
    pub read: Option<String>,
    pub read_acp: Option<String>,
    pub write: Option<String>,
    pub write_acp: Option<String>,
}

impl GrantHeaders {
    pub fn from_grants(grants: &[Grant]) -> Self {
        Self {
            full_control: header_for(grants, PERMISSION_FULL_CONTROL),
            read: header_for(grants, PERMISSION_READ),
            read_acp: header_for(grants, PERMISSION_READ_ACP),
            write: header_for(grants, PERMISSION_WRITE),
            write_acp: header_for(grants, PERMISSION_WRITE_ACP),
        }
    }
}

fn header_for(grants: &[Grant], wanted: &str) -> Option<String> {
    let tokens: Vec<String> = grants
        .iter()
        .filter(|g| permission(g) == Some(wanted))
        .filter_map(|g| {
            let grantee = g.grantee.as_ref()?;
            match grantee.r#type.as_deref() {
                Some(GRANTEE_GROUP) => grantee.uri.as_ref().map(|uri| format!("uri={uri}")),
                Some(GRANTEE_CANONICAL_USER) => grantee.id.as_ref().map(|id| format!("id={id}")),
                _ => grantee
                    .id
                    .as_ref()
                    .map(|id| format!("id={id}"))
                    .or_else(|| grantee.uri.as_ref().map(|uri| format!("uri={uri}"))),
            }
        })
        .collect();
    (!tokens.is_empty()).then(|| tokens.join(","))
}

/// Writes the observed ACL into a spec mirror: the possibilities into `acl`, the grants into the
/// five grant fields
pub fn apply_observed(spec: &mut BucketSpec, policy: &AccessControlPolicy) {
    let possibilities = CannedAclPossibilities::from_grants(policy.owner.as_ref(), &policy.grants);
    let headers = GrantHeaders::from_grants(&policy.grants);
    spec.acl = (!possibilities.is_empty()).then(|| possibilities.to_string());
    spec.grant_full_control = headers.full_control;
    spec.grant_read = headers.read;
    spec.grant_read_acp = headers.read_acp;
    spec.grant_write = headers.write;
    spec.grant_write_acp = headers.write_acp;
}

/// The canned ACL wins over grants. Without either the bucket is reset to `private`.
pub fn put_payload(spec: &BucketSpec) -> AclGrants {
    if let Some(acl) = &spec.acl {
        return AclGrants {
            acl: Some(acl.clone()),
            ..Default::default()
        };
    }
    // Empty grant fields are placeholders left by normalization, not headers to send
    let header = |grant: &Option<String>| grant.clone().filter(|g| !g.is_empty());
    let grants = AclGrants {
        acl: None,
        grant_full_control: header(&spec.grant_full_control),
        grant_read: header(&spec.grant_read),
        grant_read_acp: header(&spec.grant_read_acp),
        grant_write: header(&spec.grant_write),
        grant_write_acp: header(&spec.grant_write_acp),
    };
    if grants == AclGrants::default() {
        AclGrants {
            acl: Some(super::DEFAULT_ACL.to_string()),
            ..Default::default()
        }
    } else {
        grants
    }
}

#[instrument(skip(manager, desired), fields(bucket = %desired.name))]
pub async fn sync_acl(manager: &ResourceManager, desired: &BucketSpec) -> Result<()> {
    let payload = put_payload(desired);
    debug!("Putting bucket ACL {:?}", payload);
    manager
        .call(
            ApiVerb::Update,
            "PutBucketAcl",
            manager.s3.put_bucket_acl(&desired.name, &payload),
        )
        .await?;
    Ok(())
}

#[instrument(skip(manager))]
pub async fn get_acl(manager: &ResourceManager, bucket: &str) -> Result<AccessControlPolicy> {
    Ok(manager
        .call(ApiVerb::ReadOne, "GetBucketAcl", manager.s3.get_bucket_acl(bucket))
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::bucket_configurations::Grantee;

    const OWNER: &str = "123456789";

    fn owner() -> Owner {
        Owner {
            display_name: Some("owner".into()),
            id: Some(OWNER.into()),
        }
    }

    fn user_grant(id: &str, permission: &str) -> Grant {
        Grant {
            grantee: Some(Grantee {
                id: Some(id.into()),
                r#type: Some(GRANTEE_CANONICAL_USER.into()),
                ..Default::default()
            }),
            permission: Some(permission.into()),
        }
    }

    fn group_grant(uri: &str, permission: &str) -> Grant {
        Grant {
            grantee: Some(Grantee {
                uri: Some(uri.into()),
                r#type: Some(GRANTEE_GROUP.into()),
                ..Default::default()
            }),
            permission: Some(permission.into()),
        }
    }

    fn owner_full_control() -> Grant {
        user_grant(OWNER, PERMISSION_FULL_CONTROL)
    }

    /// The grants S3 attaches to a bucket created with each canned ACL
    fn canonical_grants(acl: &str) -> Vec<Grant> {
        let mut grants = vec![owner_full_control()];
        match acl {
            CANNED_ACL_PUBLIC_READ => grants.push(group_grant(GROUP_ALL_USERS, PERMISSION_READ)),
            CANNED_ACL_PUBLIC_READ_WRITE => {
                grants.push(group_grant(GROUP_ALL_USERS, PERMISSION_READ));
                grants.push(group_grant(GROUP_ALL_USERS, PERMISSION_WRITE));
            }
            CANNED_ACL_AWS_EXEC_READ => {
                grants.push(user_grant(EXEC_READ_GRANTEE_ID, PERMISSION_READ))
            }
            CANNED_ACL_AUTHENTICATED_READ => {
                grants.push(group_grant(GROUP_AUTHENTICATED_USERS, PERMISSION_READ))
            }
            CANNED_ACL_LOG_DELIVERY_WRITE => {
                grants.push(group_grant(GROUP_LOG_DELIVERY, PERMISSION_WRITE));
                grants.push(group_grant(GROUP_LOG_DELIVERY, PERMISSION_READ_ACP));
            }
            _ => {}
        }
        grants
    }

    #[test]
    fn every_canned_acl_is_recognised_from_its_grants() {
        for acl in [
            CANNED_ACL_PRIVATE,
            CANNED_ACL_PUBLIC_READ,
            CANNED_ACL_PUBLIC_READ_WRITE,
            CANNED_ACL_AWS_EXEC_READ,
            CANNED_ACL_AUTHENTICATED_READ,
            CANNED_ACL_BUCKET_OWNER_READ,
            CANNED_ACL_BUCKET_OWNER_FULL_CONTROL,
            CANNED_ACL_LOG_DELIVERY_WRITE,
        ] {
            let possibilities =
                CannedAclPossibilities::from_grants(Some(&owner()), &canonical_grants(acl));
            assert!(
                possibilities.matching(acl).is_some(),
                "{acl} not in {possibilities}"
            );
        }
    }

    #[test]
    fn classification_ignores_grant_order() {
        for acl in [
            CANNED_ACL_PUBLIC_READ_WRITE,
            CANNED_ACL_LOG_DELIVERY_WRITE,
            CANNED_ACL_PUBLIC_READ,
        ] {
            let grants = canonical_grants(acl);
            let expected = CannedAclPossibilities::from_grants(Some(&owner()), &grants);
            let mut rotated = grants.clone();
            for _ in 0..grants.len() {
                rotated.rotate_left(1);
                assert_eq!(
                    CannedAclPossibilities::from_grants(Some(&owner()), &rotated),
                    expected
                );
                let mut reversed = rotated.clone();
                reversed.reverse();
                assert_eq!(
                    CannedAclPossibilities::from_grants(Some(&owner()), &reversed),
                    expected
                );
            }
        }
    }

    #[test]
    fn log_delivery_write() {
        let grants = vec![
            owner_full_control(),
            group_grant(GROUP_LOG_DELIVERY, PERMISSION_WRITE),
            group_grant(GROUP_LOG_DELIVERY, PERMISSION_READ_ACP),
        ];
        let possibilities = CannedAclPossibilities::from_grants(Some(&owner()), &grants);
        assert_eq!(possibilities.to_string(), CANNED_ACL_LOG_DELIVERY_WRITE);
    }

    #[test]
    fn public_read_write() {
        let grants = vec![
            owner_full_control(),
            group_grant(GROUP_ALL_USERS, PERMISSION_WRITE),
            group_grant(GROUP_ALL_USERS, PERMISSION_READ),
        ];
        let possibilities = CannedAclPossibilities::from_grants(Some(&owner()), &grants);
        assert_eq!(possibilities.to_string(), CANNED_ACL_PUBLIC_READ_WRITE);
    }

    #[test]
    fn owner_without_full_control_has_no_canned_acl() {
        let grants = vec![
            user_grant(OWNER, PERMISSION_READ),
            group_grant(GROUP_ALL_USERS, PERMISSION_READ),
        ];
        assert!(CannedAclPossibilities::from_grants(Some(&owner()), &grants).is_empty());
        assert!(CannedAclPossibilities::from_grants(None, &canonical_grants("private")).is_empty());

        let foreign = vec![user_grant("someone-else", PERMISSION_FULL_CONTROL)];
        assert!(CannedAclPossibilities::from_grants(Some(&owner()), &foreign).is_empty());
    }

    #[test]
    fn possibilities_round_trip_through_their_stored_form() {
        let possibilities =
            CannedAclPossibilities::from_grants(Some(&owner()), &[owner_full_control()]);
        assert_eq!(
            possibilities.to_string(),
            "private|bucket-owner-read|bucket-owner-full-control"
        );
        assert_eq!(
            CannedAclPossibilities::parse(&possibilities.to_string()),
            possibilities
        );
        assert!(possibilities.is_default());
        assert_eq!(possibilities.first(), Some(CANNED_ACL_PRIVATE));
        assert!(!CannedAclPossibilities::parse(CANNED_ACL_PUBLIC_READ).is_default());
    }

    #[test]
    fn owner_full_control_header() {
        let headers = GrantHeaders::from_grants(&[owner_full_control()]);
        assert_eq!(
            headers,
            GrantHeaders {
                full_control: Some("id=123456789".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn headers_aggregate_every_grantee_of_a_permission() {
        let grants = vec![
            owner_full_control(),
            group_grant(
                "http://my-random-grantee.example.com/lol",
                PERMISSION_FULL_CONTROL,
            ),
        ];
        let headers = GrantHeaders::from_grants(&grants);
        assert_eq!(
            headers.full_control.as_deref(),
            Some("id=123456789,uri=http://my-random-grantee.example.com/lol")
        );
        assert_eq!(headers.read, None);
        assert_eq!(headers.read_acp, None);
        assert_eq!(headers.write, None);
        assert_eq!(headers.write_acp, None);
    }

    #[test]
    fn put_payload_prefers_canned_acl_then_grants_then_private() {
        let mut spec = BucketSpec {
            name: "b".into(),
            acl: Some(CANNED_ACL_PUBLIC_READ.into()),
            grant_read: Some("id=1".into()),
            ..Default::default()
        };
        assert_eq!(
            put_payload(&spec),
            AclGrants {
                acl: Some(CANNED_ACL_PUBLIC_READ.into()),
                ..Default::default()
            }
        );

        spec.acl = None;
        assert_eq!(
            put_payload(&spec),
            AclGrants {
                grant_read: Some("id=1".into()),
                ..Default::default()
            }
        );

        spec.grant_read = None;
        assert_eq!(put_payload(&spec).acl.as_deref(), Some(CANNED_ACL_PRIVATE));
    }
}
