//! Conversions between the bucket sub-configuration shapes and the AWS SDK types.
//!
//! Decoding (`From<&sdk>`) is total. Encoding (`TryFrom<&model>`) fails with a [`BuildError`]
//! when a member S3 requires is missing.

use aws_sdk_s3::error::BuildError;
use aws_sdk_s3::operation::get_bucket_notification_configuration as get_notification;
use aws_sdk_s3::primitives::DateTime as SdkDateTime;
use aws_sdk_s3::types as s3;
use chrono::{DateTime, TimeZone, Utc};

use crate::resources::bucket_configurations::*;

type BuildResult<T> = Result<T, BuildError>;

fn enum_string<E: AsRef<str>>(value: &E) -> String {
    value.as_ref().to_owned()
}

fn sdk_enum<E: for<'a> From<&'a str>>(value: &Option<String>) -> Option<E> {
    value.as_deref().map(E::from)
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Decodes an optional SDK list, mapping an empty list to `None`
fn decode_list<S, M>(items: &Option<Vec<S>>) -> Option<Vec<M>>
where
    for<'a> M: From<&'a S>,
{
    items
        .as_ref()
        .and_then(|items| non_empty(items.iter().map(M::from).collect()))
}

fn encode_list<M, S>(items: &Option<Vec<M>>) -> BuildResult<Option<Vec<S>>>
where
    for<'a> S: TryFrom<&'a M, Error = BuildError>,
{
    items
        .as_ref()
        .map(|items| items.iter().map(S::try_from).collect())
        .transpose()
}

fn encode_option<M, S>(item: &Option<M>) -> BuildResult<Option<S>>
where
    for<'a> S: TryFrom<&'a M, Error = BuildError>,
{
    item.as_ref().map(S::try_from).transpose()
}

fn sdk_date(date: &Option<DateTime<Utc>>) -> Option<SdkDateTime> {
    date.map(|d| SdkDateTime::from_secs(d.timestamp()))
}

fn model_date(date: &Option<SdkDateTime>) -> Option<DateTime<Utc>> {
    date.and_then(|d| Utc.timestamp_opt(d.secs(), 0).single())
}

impl TryFrom<&Tag> for s3::Tag {
    type Error = BuildError;
    fn try_from(tag: &Tag) -> BuildResult<Self> {
        s3::Tag::builder()
            .set_key(tag.key.clone())
            .set_value(tag.value.clone())
            .build()
    }
}

impl From<&s3::Tag> for Tag {
    fn from(tag: &s3::Tag) -> Self {
        Tag {
            key: Some(tag.key.clone()),
            value: Some(tag.value.clone()),
        }
    }
}

impl TryFrom<&Tag> for aws_sdk_s3control::types::Tag {
    type Error = aws_sdk_s3control::error::BuildError;
    fn try_from(tag: &Tag) -> Result<Self, Self::Error> {
        aws_sdk_s3control::types::Tag::builder()
            .set_key(tag.key.clone())
            .set_value(tag.value.clone())
            .build()
    }
}

impl From<&aws_sdk_s3control::types::Tag> for Tag {
    fn from(tag: &aws_sdk_s3control::types::Tag) -> Self {
        Tag {
            key: Some(tag.key.clone()),
            value: Some(tag.value.clone()),
        }
    }
}

pub(super) fn accelerate_to_sdk(config: &AccelerateConfiguration) -> s3::AccelerateConfiguration {
    s3::AccelerateConfiguration::builder()
        .set_status(sdk_enum(&config.status))
        .build()
}

pub(super) fn accelerate_from_sdk(
    status: &Option<s3::BucketAccelerateStatus>,
) -> AccelerateConfiguration {
    AccelerateConfiguration {
        status: status.as_ref().map(enum_string),
    }
}

// analytics

impl TryFrom<&AnalyticsConfiguration> for s3::AnalyticsConfiguration {
    type Error = BuildError;
    fn try_from(config: &AnalyticsConfiguration) -> BuildResult<Self> {
        let filter = match &config.filter {
            Some(filter) => analytics_filter_to_sdk(filter)?,
            None => None,
        };
        let storage_class_analysis = match &config.storage_class_analysis {
            Some(analysis) => {
                let data_export = match &analysis.data_export {
                    Some(export) => Some(
                        s3::StorageClassAnalysisDataExport::builder()
                            .set_output_schema_version(sdk_enum(&export.output_schema_version))
                            .set_destination(encode_option(&export.destination)?)
                            .build()?,
                    ),
                    None => None,
                };
                Some(
                    s3::StorageClassAnalysis::builder()
                        .set_data_export(data_export)
                        .build(),
                )
            }
            None => None,
        };
        s3::AnalyticsConfiguration::builder()
            .set_id(config.id.clone())
            .set_filter(filter)
            .set_storage_class_analysis(storage_class_analysis)
            .build()
    }
}

impl TryFrom<&AnalyticsExportDestination> for s3::AnalyticsExportDestination {
    type Error = BuildError;
    fn try_from(destination: &AnalyticsExportDestination) -> BuildResult<Self> {
        let bucket_destination = match &destination.s3_bucket_destination {
            Some(d) => Some(
                s3::AnalyticsS3BucketDestination::builder()
                    .set_bucket(d.bucket.clone())
                    .set_bucket_account_id(d.bucket_account_id.clone())
                    .set_format(sdk_enum(&d.format))
                    .set_prefix(d.prefix.clone())
                    .build()?,
            ),
            None => None,
        };
        Ok(s3::AnalyticsExportDestination::builder()
            .set_s3_bucket_destination(bucket_destination)
            .build())
    }
}

fn analytics_filter_to_sdk(
    filter: &ConfigurationFilter,
) -> BuildResult<Option<s3::AnalyticsFilter>> {
    Ok(if let Some(and) = &filter.and {
        Some(s3::AnalyticsFilter::And(
            s3::AnalyticsAndOperator::builder()
                .set_prefix(and.prefix.clone())
                .set_tags(encode_list(&and.tags)?)
                .build(),
        ))
    } else if let Some(prefix) = &filter.prefix {
        Some(s3::AnalyticsFilter::Prefix(prefix.clone()))
    } else if let Some(tag) = &filter.tag {
        Some(s3::AnalyticsFilter::Tag(s3::Tag::try_from(tag)?))
    } else {
        None
    })
}

impl From<&s3::AnalyticsConfiguration> for AnalyticsConfiguration {
    fn from(config: &s3::AnalyticsConfiguration) -> Self {
        let filter = config.filter.as_ref().map(|filter| match filter {
            s3::AnalyticsFilter::And(and) => ConfigurationFilter {
                and: Some(AndOperator {
                    prefix: and.prefix.clone(),
                    tags: decode_list(&and.tags),
                }),
                ..Default::default()
            },
            s3::AnalyticsFilter::Prefix(prefix) => ConfigurationFilter {
                prefix: Some(prefix.clone()),
                ..Default::default()
            },
            s3::AnalyticsFilter::Tag(tag) => ConfigurationFilter {
                tag: Some(tag.into()),
                ..Default::default()
            },
            _ => ConfigurationFilter::default(),
        });
        let storage_class_analysis =
            config
                .storage_class_analysis
                .as_ref()
                .map(|analysis| StorageClassAnalysis {
                    data_export: analysis.data_export.as_ref().map(|export| {
                        StorageClassAnalysisDataExport {
                            output_schema_version: Some(enum_string(&export.output_schema_version)),
                            destination: export.destination.as_ref().map(|destination| {
                                AnalyticsExportDestination {
                                    s3_bucket_destination: destination
                                        .s3_bucket_destination
                                        .as_ref()
                                        .map(|d| AnalyticsS3BucketDestination {
                                            bucket: Some(d.bucket.clone()),
                                            bucket_account_id: d.bucket_account_id.clone(),
                                            format: Some(enum_string(&d.format)),
                                            prefix: d.prefix.clone(),
                                        }),
                                }
                            }),
                        }
                    }),
                });
        AnalyticsConfiguration {
            id: Some(config.id.clone()),
            filter,
            storage_class_analysis,
        }
    }
}

// cors

impl TryFrom<&CorsConfiguration> for s3::CorsConfiguration {
    type Error = BuildError;
    fn try_from(config: &CorsConfiguration) -> BuildResult<Self> {
        s3::CorsConfiguration::builder()
            .set_cors_rules(Some(encode_list(&config.cors_rules)?.unwrap_or_default()))
            .build()
    }
}

impl TryFrom<&CorsRule> for s3::CorsRule {
    type Error = BuildError;
    fn try_from(rule: &CorsRule) -> BuildResult<Self> {
        s3::CorsRule::builder()
            .set_id(rule.id.clone())
            .set_allowed_headers(rule.allowed_headers.clone())
            .set_allowed_methods(rule.allowed_methods.clone())
            .set_allowed_origins(rule.allowed_origins.clone())
            .set_expose_headers(rule.expose_headers.clone())
            .set_max_age_seconds(rule.max_age_seconds)
            .build()
    }
}

impl From<&s3::CorsRule> for CorsRule {
    fn from(rule: &s3::CorsRule) -> Self {
        CorsRule {
            allowed_headers: rule.allowed_headers.clone().and_then(non_empty),
            allowed_methods: non_empty(rule.allowed_methods.clone()),
            allowed_origins: non_empty(rule.allowed_origins.clone()),
            expose_headers: rule.expose_headers.clone().and_then(non_empty),
            id: rule.id.clone(),
            max_age_seconds: rule.max_age_seconds,
        }
    }
}

pub(super) fn cors_from_sdk(rules: &Option<Vec<s3::CorsRule>>) -> CorsConfiguration {
    CorsConfiguration {
        cors_rules: decode_list(rules),
    }
}

// encryption

impl TryFrom<&ServerSideEncryptionConfiguration> for s3::ServerSideEncryptionConfiguration {
    type Error = BuildError;
    fn try_from(config: &ServerSideEncryptionConfiguration) -> BuildResult<Self> {
        s3::ServerSideEncryptionConfiguration::builder()
            .set_rules(Some(encode_list(&config.rules)?.unwrap_or_default()))
            .build()
    }
}

impl TryFrom<&ServerSideEncryptionRule> for s3::ServerSideEncryptionRule {
    type Error = BuildError;
    fn try_from(rule: &ServerSideEncryptionRule) -> BuildResult<Self> {
        let by_default = match &rule.apply_server_side_encryption_by_default {
            Some(d) => Some(
                s3::ServerSideEncryptionByDefault::builder()
                    .set_sse_algorithm(sdk_enum(&d.sse_algorithm))
                    .set_kms_master_key_id(d.kms_master_key_id.clone())
                    .build()?,
            ),
            None => None,
        };
        Ok(s3::ServerSideEncryptionRule::builder()
            .set_apply_server_side_encryption_by_default(by_default)
            .set_bucket_key_enabled(rule.bucket_key_enabled)
            .build())
    }
}

impl From<&s3::ServerSideEncryptionRule> for ServerSideEncryptionRule {
    fn from(rule: &s3::ServerSideEncryptionRule) -> Self {
        ServerSideEncryptionRule {
            apply_server_side_encryption_by_default: rule
                .apply_server_side_encryption_by_default
                .as_ref()
                .map(|d| ServerSideEncryptionByDefault {
                    kms_master_key_id: d.kms_master_key_id.clone(),
                    sse_algorithm: Some(enum_string(&d.sse_algorithm)),
                }),
            bucket_key_enabled: rule.bucket_key_enabled,
        }
    }
}

pub(super) fn encryption_from_sdk(
    config: &Option<s3::ServerSideEncryptionConfiguration>,
) -> ServerSideEncryptionConfiguration {
    ServerSideEncryptionConfiguration {
        rules: config
            .as_ref()
            .and_then(|c| non_empty(c.rules.iter().map(Into::into).collect())),
    }
}

// intelligent tiering

impl TryFrom<&IntelligentTieringConfiguration> for s3::IntelligentTieringConfiguration {
    type Error = BuildError;
    fn try_from(config: &IntelligentTieringConfiguration) -> BuildResult<Self> {
        let filter = match &config.filter {
            Some(filter) => {
                let and = match &filter.and {
                    Some(and) => Some(
                        s3::IntelligentTieringAndOperator::builder()
                            .set_prefix(and.prefix.clone())
                            .set_tags(encode_list(&and.tags)?)
                            .build(),
                    ),
                    None => None,
                };
                Some(
                    s3::IntelligentTieringFilter::builder()
                        .set_and(and)
                        .set_prefix(filter.prefix.clone())
                        .set_tag(encode_option(&filter.tag)?)
                        .build(),
                )
            }
            None => None,
        };
        s3::IntelligentTieringConfiguration::builder()
            .set_id(config.id.clone())
            .set_filter(filter)
            .set_status(sdk_enum(&config.status))
            .set_tierings(Some(encode_list(&config.tierings)?.unwrap_or_default()))
            .build()
    }
}

impl TryFrom<&Tiering> for s3::Tiering {
    type Error = BuildError;
    fn try_from(tiering: &Tiering) -> BuildResult<Self> {
        s3::Tiering::builder()
            .set_days(tiering.days)
            .set_access_tier(sdk_enum(&tiering.access_tier))
            .build()
    }
}

impl From<&s3::Tiering> for Tiering {
    fn from(tiering: &s3::Tiering) -> Self {
        Tiering {
            access_tier: Some(enum_string(&tiering.access_tier)),
            days: Some(tiering.days),
        }
    }
}

impl From<&s3::IntelligentTieringConfiguration> for IntelligentTieringConfiguration {
    fn from(config: &s3::IntelligentTieringConfiguration) -> Self {
        IntelligentTieringConfiguration {
            id: Some(config.id.clone()),
            filter: config.filter.as_ref().map(|filter| ConfigurationFilter {
                and: filter.and.as_ref().map(|and| AndOperator {
                    prefix: and.prefix.clone(),
                    tags: decode_list(&and.tags),
                }),
                prefix: filter.prefix.clone(),
                tag: filter.tag.as_ref().map(Into::into),
            }),
            status: Some(enum_string(&config.status)),
            tierings: non_empty(config.tierings.iter().map(Into::into).collect()),
        }
    }
}

// inventory

impl TryFrom<&InventoryConfiguration> for s3::InventoryConfiguration {
    type Error = BuildError;
    fn try_from(config: &InventoryConfiguration) -> BuildResult<Self> {
        let destination = match config
            .destination
            .as_ref()
            .and_then(|d| d.s3_bucket_destination.as_ref())
        {
            Some(d) => {
                let encryption = match &d.encryption {
                    Some(encryption) => {
                        let ssekms = match &encryption.sse_kms {
                            Some(kms) => Some(
                                s3::Ssekms::builder()
                                    .set_key_id(kms.key_id.clone())
                                    .build()?,
                            ),
                            None => None,
                        };
                        Some(
                            s3::InventoryEncryption::builder()
                                .set_ssekms(ssekms)
                                .set_sses3(
                                    encryption
                                        .sse_s3
                                        .as_ref()
                                        .map(|_| s3::Sses3::builder().build()),
                                )
                                .build(),
                        )
                    }
                    None => None,
                };
                Some(
                    s3::InventoryDestination::builder()
                        .set_s3_bucket_destination(Some(
                            s3::InventoryS3BucketDestination::builder()
                                .set_account_id(d.account_id.clone())
                                .set_bucket(d.bucket.clone())
                                .set_format(sdk_enum(&d.format))
                                .set_prefix(d.prefix.clone())
                                .set_encryption(encryption)
                                .build()?,
                        ))
                        .build(),
                )
            }
            None => None,
        };
        let filter = match &config.filter {
            Some(filter) => Some(
                s3::InventoryFilter::builder()
                    .set_prefix(filter.prefix.clone())
                    .build()?,
            ),
            None => None,
        };
        let schedule = match &config.schedule {
            Some(schedule) => Some(
                s3::InventorySchedule::builder()
                    .set_frequency(sdk_enum(&schedule.frequency))
                    .build()?,
            ),
            None => None,
        };
        s3::InventoryConfiguration::builder()
            .set_id(config.id.clone())
            .set_destination(destination)
            .set_filter(filter)
            .set_included_object_versions(sdk_enum(&config.included_object_versions))
            .set_is_enabled(config.is_enabled)
            .set_optional_fields(
                config
                    .optional_fields
                    .as_ref()
                    .map(|fields| fields.iter().map(|f| f.as_str().into()).collect()),
            )
            .set_schedule(schedule)
            .build()
    }
}

impl From<&s3::InventoryConfiguration> for InventoryConfiguration {
    fn from(config: &s3::InventoryConfiguration) -> Self {
        InventoryConfiguration {
            id: Some(config.id.clone()),
            destination: config.destination.as_ref().map(|d| InventoryDestination {
                s3_bucket_destination: d.s3_bucket_destination.as_ref().map(|d| {
                    InventoryS3BucketDestination {
                        account_id: d.account_id.clone(),
                        bucket: Some(d.bucket.clone()),
                        encryption: d.encryption.as_ref().map(|e| InventoryEncryption {
                            sse_kms: e.ssekms.as_ref().map(|kms| SseKms {
                                key_id: Some(kms.key_id.clone()),
                            }),
                            sse_s3: e.sses3.as_ref().map(|_| SseS3 {}),
                        }),
                        format: Some(enum_string(&d.format)),
                        prefix: d.prefix.clone(),
                    }
                }),
            }),
            filter: config.filter.as_ref().map(|f| InventoryFilter {
                prefix: Some(f.prefix.clone()),
            }),
            included_object_versions: Some(enum_string(&config.included_object_versions)),
            is_enabled: Some(config.is_enabled),
            optional_fields: config
                .optional_fields
                .as_ref()
                .and_then(|fields| non_empty(fields.iter().map(enum_string).collect())),
            schedule: config.schedule.as_ref().map(|s| InventorySchedule {
                frequency: Some(enum_string(&s.frequency)),
            }),
        }
    }
}

// lifecycle

impl TryFrom<&BucketLifecycleConfiguration> for s3::BucketLifecycleConfiguration {
    type Error = BuildError;
    fn try_from(config: &BucketLifecycleConfiguration) -> BuildResult<Self> {
        s3::BucketLifecycleConfiguration::builder()
            .set_rules(Some(encode_list(&config.rules)?.unwrap_or_default()))
            .build()
    }
}

impl TryFrom<&LifecycleRule> for s3::LifecycleRule {
    type Error = BuildError;
    fn try_from(rule: &LifecycleRule) -> BuildResult<Self> {
        let filter = match &rule.filter {
            Some(filter) => {
                let and = match &filter.and {
                    Some(and) => Some(
                        s3::LifecycleRuleAndOperator::builder()
                            .set_prefix(and.prefix.clone())
                            .set_tags(encode_list(&and.tags)?)
                            .set_object_size_greater_than(and.object_size_greater_than)
                            .set_object_size_less_than(and.object_size_less_than)
                            .build(),
                    ),
                    None => None,
                };
                Some(
                    s3::LifecycleRuleFilter::builder()
                        .set_and(and)
                        .set_prefix(filter.prefix.clone())
                        .set_tag(encode_option(&filter.tag)?)
                        .set_object_size_greater_than(filter.object_size_greater_than)
                        .set_object_size_less_than(filter.object_size_less_than)
                        .build(),
                )
            }
            None => None,
        };
        s3::LifecycleRule::builder()
            .set_id(rule.id.clone())
            .set_prefix(rule.prefix.clone())
            .set_status(sdk_enum(&rule.status))
            .set_filter(filter)
            .set_abort_incomplete_multipart_upload(
                rule.abort_incomplete_multipart_upload.as_ref().map(|a| {
                    s3::AbortIncompleteMultipartUpload::builder()
                        .set_days_after_initiation(a.days_after_initiation)
                        .build()
                }),
            )
            .set_expiration(rule.expiration.as_ref().map(|e| {
                s3::LifecycleExpiration::builder()
                    .set_date(sdk_date(&e.date))
                    .set_days(e.days)
                    .set_expired_object_delete_marker(e.expired_object_delete_marker)
                    .build()
            }))
            .set_noncurrent_version_expiration(rule.noncurrent_version_expiration.as_ref().map(|e| {
                s3::NoncurrentVersionExpiration::builder()
                    .set_newer_noncurrent_versions(e.newer_noncurrent_versions)
                    .set_noncurrent_days(e.noncurrent_days)
                    .build()
            }))
            .set_noncurrent_version_transitions(rule.noncurrent_version_transitions.as_ref().map(
                |transitions| {
                    transitions
                        .iter()
                        .map(|t| {
                            s3::NoncurrentVersionTransition::builder()
                                .set_newer_noncurrent_versions(t.newer_noncurrent_versions)
                                .set_noncurrent_days(t.noncurrent_days)
                                .set_storage_class(sdk_enum(&t.storage_class))
                                .build()
                        })
                        .collect()
                },
            ))
            .set_transitions(rule.transitions.as_ref().map(|transitions| {
                transitions
                    .iter()
                    .map(|t| {
                        s3::Transition::builder()
                            .set_date(sdk_date(&t.date))
                            .set_days(t.days)
                            .set_storage_class(sdk_enum(&t.storage_class))
                            .build()
                    })
                    .collect()
            }))
            .build()
    }
}

impl From<&s3::LifecycleRule> for LifecycleRule {
    fn from(rule: &s3::LifecycleRule) -> Self {
        LifecycleRule {
            abort_incomplete_multipart_upload: rule.abort_incomplete_multipart_upload.as_ref().map(
                |a| AbortIncompleteMultipartUpload {
                    days_after_initiation: a.days_after_initiation,
                },
            ),
            expiration: rule.expiration.as_ref().map(|e| LifecycleExpiration {
                date: model_date(&e.date),
                days: e.days,
                expired_object_delete_marker: e.expired_object_delete_marker,
            }),
            filter: rule.filter.as_ref().map(|f| LifecycleRuleFilter {
                and: f.and.as_ref().map(|and| LifecycleRuleAndOperator {
                    object_size_greater_than: and.object_size_greater_than,
                    object_size_less_than: and.object_size_less_than,
                    prefix: and.prefix.clone(),
                    tags: decode_list(&and.tags),
                }),
                object_size_greater_than: f.object_size_greater_than,
                object_size_less_than: f.object_size_less_than,
                prefix: f.prefix.clone(),
                tag: f.tag.as_ref().map(Into::into),
            }),
            id: rule.id.clone(),
            noncurrent_version_expiration: rule.noncurrent_version_expiration.as_ref().map(|e| {
                NoncurrentVersionExpiration {
                    newer_noncurrent_versions: e.newer_noncurrent_versions,
                    noncurrent_days: e.noncurrent_days,
                }
            }),
            noncurrent_version_transitions: rule.noncurrent_version_transitions.as_ref().and_then(
                |transitions| {
                    non_empty(
                        transitions
                            .iter()
                            .map(|t| NoncurrentVersionTransition {
                                newer_noncurrent_versions: t.newer_noncurrent_versions,
                                noncurrent_days: t.noncurrent_days,
                                storage_class: t.storage_class.as_ref().map(enum_string),
                            })
                            .collect(),
                    )
                },
            ),
            prefix: rule.prefix.clone(),
            status: Some(enum_string(&rule.status)),
            transitions: rule.transitions.as_ref().and_then(|transitions| {
                non_empty(
                    transitions
                        .iter()
                        .map(|t| Transition {
                            date: model_date(&t.date),
                            days: t.days,
                            storage_class: t.storage_class.as_ref().map(enum_string),
                        })
                        .collect(),
                )
            }),
        }
    }
}

// logging

impl TryFrom<&BucketLoggingStatus> for s3::BucketLoggingStatus {
    type Error = BuildError;
    fn try_from(status: &BucketLoggingStatus) -> BuildResult<Self> {
        let logging_enabled = match &status.logging_enabled {
            Some(enabled) => Some(
                s3::LoggingEnabled::builder()
                    .set_target_bucket(enabled.target_bucket.clone())
                    .set_target_prefix(enabled.target_prefix.clone())
                    .set_target_grants(encode_list(&enabled.target_grants)?)
                    .build()?,
            ),
            None => None,
        };
        Ok(s3::BucketLoggingStatus::builder()
            .set_logging_enabled(logging_enabled)
            .build())
    }
}

impl TryFrom<&TargetGrant> for s3::TargetGrant {
    type Error = BuildError;
    fn try_from(grant: &TargetGrant) -> BuildResult<Self> {
        Ok(s3::TargetGrant::builder()
            .set_grantee(encode_option(&grant.grantee)?)
            .set_permission(sdk_enum(&grant.permission))
            .build())
    }
}

impl TryFrom<&Grantee> for s3::Grantee {
    type Error = BuildError;
    fn try_from(grantee: &Grantee) -> BuildResult<Self> {
        s3::Grantee::builder()
            .set_display_name(grantee.display_name.clone())
            .set_email_address(grantee.email_address.clone())
            .set_id(grantee.id.clone())
            .set_type(sdk_enum(&grantee.r#type))
            .set_uri(grantee.uri.clone())
            .build()
    }
}

impl From<&s3::Grantee> for Grantee {
    fn from(grantee: &s3::Grantee) -> Self {
        Grantee {
            display_name: grantee.display_name.clone(),
            email_address: grantee.email_address.clone(),
            id: grantee.id.clone(),
            r#type: Some(enum_string(&grantee.r#type)),
            uri: grantee.uri.clone(),
        }
    }
}

pub(super) fn logging_from_sdk(enabled: &Option<s3::LoggingEnabled>) -> BucketLoggingStatus {
    BucketLoggingStatus {
        logging_enabled: enabled.as_ref().map(|e| LoggingEnabled {
            target_bucket: Some(e.target_bucket.clone()),
            target_grants: e.target_grants.as_ref().and_then(|grants| {
                non_empty(
                    grants
                        .iter()
                        .map(|g| TargetGrant {
                            grantee: g.grantee.as_ref().map(Into::into),
                            permission: g.permission.as_ref().map(enum_string),
                        })
                        .collect(),
                )
            }),
            target_prefix: Some(e.target_prefix.clone()),
        }),
    }
}

// metrics

impl TryFrom<&MetricsConfiguration> for s3::MetricsConfiguration {
    type Error = BuildError;
    fn try_from(config: &MetricsConfiguration) -> BuildResult<Self> {
        let filter = match &config.filter {
            Some(filter) => {
                if let Some(and) = &filter.and {
                    Some(s3::MetricsFilter::And(
                        s3::MetricsAndOperator::builder()
                            .set_access_point_arn(and.access_point_arn.clone())
                            .set_prefix(and.prefix.clone())
                            .set_tags(encode_list(&and.tags)?)
                            .build(),
                    ))
                } else if let Some(arn) = &filter.access_point_arn {
                    Some(s3::MetricsFilter::AccessPointArn(arn.clone()))
                } else if let Some(prefix) = &filter.prefix {
                    Some(s3::MetricsFilter::Prefix(prefix.clone()))
                } else if let Some(tag) = &filter.tag {
                    Some(s3::MetricsFilter::Tag(s3::Tag::try_from(tag)?))
                } else {
                    None
                }
            }
            None => None,
        };
        s3::MetricsConfiguration::builder()
            .set_id(config.id.clone())
            .set_filter(filter)
            .build()
    }
}

impl From<&s3::MetricsConfiguration> for MetricsConfiguration {
    fn from(config: &s3::MetricsConfiguration) -> Self {
        MetricsConfiguration {
            id: Some(config.id.clone()),
            filter: config.filter.as_ref().map(|filter| match filter {
                s3::MetricsFilter::And(and) => MetricsFilter {
                    and: Some(MetricsAndOperator {
                        access_point_arn: and.access_point_arn.clone(),
                        prefix: and.prefix.clone(),
                        tags: decode_list(&and.tags),
                    }),
                    ..Default::default()
                },
                s3::MetricsFilter::AccessPointArn(arn) => MetricsFilter {
                    access_point_arn: Some(arn.clone()),
                    ..Default::default()
                },
                s3::MetricsFilter::Prefix(prefix) => MetricsFilter {
                    prefix: Some(prefix.clone()),
                    ..Default::default()
                },
                s3::MetricsFilter::Tag(tag) => MetricsFilter {
                    tag: Some(tag.into()),
                    ..Default::default()
                },
                _ => MetricsFilter::default(),
            }),
        }
    }
}

// notification

fn notification_filter_to_sdk(
    filter: &Option<NotificationConfigurationFilter>,
) -> Option<s3::NotificationConfigurationFilter> {
    filter.as_ref().map(|filter| {
        s3::NotificationConfigurationFilter::builder()
            .set_key(filter.key.as_ref().map(|key| {
                s3::S3KeyFilter::builder()
                    .set_filter_rules(key.filter_rules.as_ref().map(|rules| {
                        rules
                            .iter()
                            .map(|rule| {
                                s3::FilterRule::builder()
                                    .set_name(sdk_enum(&rule.name))
                                    .set_value(rule.value.clone())
                                    .build()
                            })
                            .collect()
                    }))
                    .build()
            }))
            .build()
    })
}

fn notification_filter_from_sdk(
    filter: &Option<s3::NotificationConfigurationFilter>,
) -> Option<NotificationConfigurationFilter> {
    filter.as_ref().map(|filter| NotificationConfigurationFilter {
        key: filter.key.as_ref().map(|key| KeyFilter {
            filter_rules: key.filter_rules.as_ref().and_then(|rules| {
                non_empty(
                    rules
                        .iter()
                        .map(|rule| FilterRule {
                            name: rule.name.as_ref().map(enum_string),
                            value: rule.value.clone(),
                        })
                        .collect(),
                )
            }),
        }),
    })
}

fn events_to_sdk(events: &Option<Vec<String>>) -> Option<Vec<s3::Event>> {
    events
        .as_ref()
        .map(|events| events.iter().map(|e| e.as_str().into()).collect())
}

fn events_from_sdk(events: &[s3::Event]) -> Option<Vec<String>> {
    non_empty(events.iter().map(enum_string).collect())
}

impl TryFrom<&NotificationConfiguration> for s3::NotificationConfiguration {
    type Error = BuildError;
    fn try_from(config: &NotificationConfiguration) -> BuildResult<Self> {
        let topics = config
            .topic_configurations
            .as_ref()
            .map(|topics| {
                topics
                    .iter()
                    .map(|t| {
                        s3::TopicConfiguration::builder()
                            .set_id(t.id.clone())
                            .set_topic_arn(t.topic_arn.clone())
                            .set_events(events_to_sdk(&t.events))
                            .set_filter(notification_filter_to_sdk(&t.filter))
                            .build()
                    })
                    .collect::<BuildResult<Vec<_>>>()
            })
            .transpose()?;
        let queues = config
            .queue_configurations
            .as_ref()
            .map(|queues| {
                queues
                    .iter()
                    .map(|q| {
                        s3::QueueConfiguration::builder()
                            .set_id(q.id.clone())
                            .set_queue_arn(q.queue_arn.clone())
                            .set_events(events_to_sdk(&q.events))
                            .set_filter(notification_filter_to_sdk(&q.filter))
                            .build()
                    })
                    .collect::<BuildResult<Vec<_>>>()
            })
            .transpose()?;
        let lambdas = config
            .lambda_function_configurations
            .as_ref()
            .map(|lambdas| {
                lambdas
                    .iter()
                    .map(|l| {
                        s3::LambdaFunctionConfiguration::builder()
                            .set_id(l.id.clone())
                            .set_lambda_function_arn(l.lambda_function_arn.clone())
                            .set_events(events_to_sdk(&l.events))
                            .set_filter(notification_filter_to_sdk(&l.filter))
                            .build()
                    })
                    .collect::<BuildResult<Vec<_>>>()
            })
            .transpose()?;
        Ok(s3::NotificationConfiguration::builder()
            .set_topic_configurations(topics)
            .set_queue_configurations(queues)
            .set_lambda_function_configurations(lambdas)
            .set_event_bridge_configuration(
                config
                    .event_bridge_configuration
                    .as_ref()
                    .map(|_| s3::EventBridgeConfiguration::builder().build()),
            )
            .build())
    }
}

pub(super) fn notification_from_sdk(
    output: &get_notification::GetBucketNotificationConfigurationOutput,
) -> NotificationConfiguration {
    NotificationConfiguration {
        event_bridge_configuration: output
            .event_bridge_configuration
            .as_ref()
            .map(|_| EventBridgeConfiguration {}),
        lambda_function_configurations: output.lambda_function_configurations.as_ref().and_then(
            |lambdas| {
                non_empty(
                    lambdas
                        .iter()
                        .map(|l| LambdaFunctionConfiguration {
                            events: events_from_sdk(&l.events),
                            filter: notification_filter_from_sdk(&l.filter),
                            id: l.id.clone(),
                            lambda_function_arn: Some(l.lambda_function_arn.clone()),
                        })
                        .collect(),
                )
            },
        ),
        queue_configurations: output.queue_configurations.as_ref().and_then(|queues| {
            non_empty(
                queues
                    .iter()
                    .map(|q| QueueConfiguration {
                        events: events_from_sdk(&q.events),
                        filter: notification_filter_from_sdk(&q.filter),
                        id: q.id.clone(),
                        queue_arn: Some(q.queue_arn.clone()),
                    })
                    .collect(),
            )
        }),
        topic_configurations: output.topic_configurations.as_ref().and_then(|topics| {
            non_empty(
                topics
                    .iter()
                    .map(|t| TopicConfiguration {
                        events: events_from_sdk(&t.events),
                        filter: notification_filter_from_sdk(&t.filter),
                        id: t.id.clone(),
                        topic_arn: Some(t.topic_arn.clone()),
                    })
                    .collect(),
            )
        }),
    }
}

// ownership controls

impl TryFrom<&OwnershipControls> for s3::OwnershipControls {
    type Error = BuildError;
    fn try_from(controls: &OwnershipControls) -> BuildResult<Self> {
        let rules = controls
            .rules
            .iter()
            .flatten()
            .map(|rule| {
                s3::OwnershipControlsRule::builder()
                    .set_object_ownership(sdk_enum(&rule.object_ownership))
                    .build()
            })
            .collect::<BuildResult<Vec<_>>>()?;
        s3::OwnershipControls::builder().set_rules(Some(rules)).build()
    }
}

impl From<&s3::OwnershipControls> for OwnershipControls {
    fn from(controls: &s3::OwnershipControls) -> Self {
        OwnershipControls {
            rules: non_empty(
                controls
                    .rules
                    .iter()
                    .map(|rule| OwnershipControlsRule {
                        object_ownership: Some(enum_string(&rule.object_ownership)),
                    })
                    .collect(),
            ),
        }
    }
}

// public access block

impl From<&PublicAccessBlockConfiguration> for s3::PublicAccessBlockConfiguration {
    fn from(config: &PublicAccessBlockConfiguration) -> Self {
        s3::PublicAccessBlockConfiguration::builder()
            .set_block_public_acls(config.block_public_acls)
            .set_block_public_policy(config.block_public_policy)
            .set_ignore_public_acls(config.ignore_public_acls)
            .set_restrict_public_buckets(config.restrict_public_buckets)
            .build()
    }
}

impl From<&s3::PublicAccessBlockConfiguration> for PublicAccessBlockConfiguration {
    fn from(config: &s3::PublicAccessBlockConfiguration) -> Self {
        PublicAccessBlockConfiguration {
            block_public_acls: config.block_public_acls,
            block_public_policy: config.block_public_policy,
            ignore_public_acls: config.ignore_public_acls,
            restrict_public_buckets: config.restrict_public_buckets,
        }
    }
}

// replication

fn status_to_sdk<B, S, E>(
    config: &Option<StatusConfiguration>,
    build: impl Fn(Option<S>) -> Result<B, E>,
) -> Result<Option<B>, E>
where
    S: for<'a> From<&'a str>,
{
    config
        .as_ref()
        .map(|c| build(sdk_enum(&c.status)))
        .transpose()
}

impl TryFrom<&ReplicationConfiguration> for s3::ReplicationConfiguration {
    type Error = BuildError;
    fn try_from(config: &ReplicationConfiguration) -> BuildResult<Self> {
        s3::ReplicationConfiguration::builder()
            .set_role(config.role.clone())
            .set_rules(Some(encode_list(&config.rules)?.unwrap_or_default()))
            .build()
    }
}

impl TryFrom<&ReplicationRule> for s3::ReplicationRule {
    type Error = BuildError;
    fn try_from(rule: &ReplicationRule) -> BuildResult<Self> {
        let filter = match &rule.filter {
            Some(filter) => {
                let and = match &filter.and {
                    Some(and) => Some(
                        s3::ReplicationRuleAndOperator::builder()
                            .set_prefix(and.prefix.clone())
                            .set_tags(encode_list(&and.tags)?)
                            .build(),
                    ),
                    None => None,
                };
                Some(
                    s3::ReplicationRuleFilter::builder()
                        .set_and(and)
                        .set_prefix(filter.prefix.clone())
                        .set_tag(encode_option(&filter.tag)?)
                        .build(),
                )
            }
            None => None,
        };
        let source_selection_criteria = match &rule.source_selection_criteria {
            Some(criteria) => Some(
                s3::SourceSelectionCriteria::builder()
                    .set_replica_modifications(status_to_sdk(
                        &criteria.replica_modifications,
                        |status| s3::ReplicaModifications::builder().set_status(status).build(),
                    )?)
                    .set_sse_kms_encrypted_objects(status_to_sdk(
                        &criteria.sse_kms_encrypted_objects,
                        |status| s3::SseKmsEncryptedObjects::builder().set_status(status).build(),
                    )?)
                    .build(),
            ),
            None => None,
        };
        s3::ReplicationRule::builder()
            .set_id(rule.id.clone())
            .set_priority(rule.priority)
            .set_prefix(rule.prefix.clone())
            .set_filter(filter)
            .set_status(sdk_enum(&rule.status))
            .set_source_selection_criteria(source_selection_criteria)
            .set_existing_object_replication(status_to_sdk(
                &rule.existing_object_replication,
                |status| s3::ExistingObjectReplication::builder().set_status(status).build(),
            )?)
            .set_delete_marker_replication(
                status_to_sdk(&rule.delete_marker_replication, |status| {
                    Ok::<_, BuildError>(
                        s3::DeleteMarkerReplication::builder()
                            .set_status(status)
                            .build(),
                    )
                })?,
            )
            .set_destination(encode_option(&rule.destination)?)
            .build()
    }
}

impl TryFrom<&ReplicationDestination> for s3::Destination {
    type Error = BuildError;
    fn try_from(destination: &ReplicationDestination) -> BuildResult<Self> {
        let access_control_translation = match &destination.access_control_translation {
            Some(translation) => Some(
                s3::AccessControlTranslation::builder()
                    .set_owner(sdk_enum(&translation.owner))
                    .build()?,
            ),
            None => None,
        };
        let metrics = match &destination.metrics {
            Some(metrics) => Some(
                s3::Metrics::builder()
                    .set_status(sdk_enum(&metrics.status))
                    .set_event_threshold(metrics.event_threshold.as_ref().map(time_value_to_sdk))
                    .build()?,
            ),
            None => None,
        };
        let replication_time = match &destination.replication_time {
            Some(time) => Some(
                s3::ReplicationTime::builder()
                    .set_status(sdk_enum(&time.status))
                    .set_time(time.time.as_ref().map(time_value_to_sdk))
                    .build()?,
            ),
            None => None,
        };
        s3::Destination::builder()
            .set_bucket(destination.bucket.clone())
            .set_account(destination.account.clone())
            .set_storage_class(sdk_enum(&destination.storage_class))
            .set_access_control_translation(access_control_translation)
            .set_encryption_configuration(destination.encryption_configuration.as_ref().map(|e| {
                s3::EncryptionConfiguration::builder()
                    .set_replica_kms_key_id(e.replica_kms_key_id.clone())
                    .build()
            }))
            .set_metrics(metrics)
            .set_replication_time(replication_time)
            .build()
    }
}

fn time_value_to_sdk(value: &ReplicationTimeValue) -> s3::ReplicationTimeValue {
    s3::ReplicationTimeValue::builder()
        .set_minutes(value.minutes)
        .build()
}

fn time_value_from_sdk(value: &s3::ReplicationTimeValue) -> ReplicationTimeValue {
    ReplicationTimeValue {
        minutes: value.minutes,
    }
}

fn status_from_sdk<S: AsRef<str>>(status: &S) -> StatusConfiguration {
    StatusConfiguration {
        status: Some(enum_string(status)),
    }
}

impl From<&s3::ReplicationRule> for ReplicationRule {
    fn from(rule: &s3::ReplicationRule) -> Self {
        ReplicationRule {
            delete_marker_replication: rule.delete_marker_replication.as_ref().map(|d| {
                StatusConfiguration {
                    status: d.status.as_ref().map(enum_string),
                }
            }),
            destination: rule.destination.as_ref().map(|d| ReplicationDestination {
                access_control_translation: d.access_control_translation.as_ref().map(|t| {
                    AccessControlTranslation {
                        owner: Some(enum_string(&t.owner)),
                    }
                }),
                account: d.account.clone(),
                bucket: Some(d.bucket.clone()),
                encryption_configuration: d.encryption_configuration.as_ref().map(|e| {
                    EncryptionConfiguration {
                        replica_kms_key_id: e.replica_kms_key_id.clone(),
                    }
                }),
                metrics: d.metrics.as_ref().map(|m| ReplicationMetrics {
                    event_threshold: m.event_threshold.as_ref().map(time_value_from_sdk),
                    status: Some(enum_string(&m.status)),
                }),
                replication_time: d.replication_time.as_ref().map(|t| ReplicationTime {
                    status: Some(enum_string(&t.status)),
                    time: t.time.as_ref().map(time_value_from_sdk),
                }),
                storage_class: d.storage_class.as_ref().map(enum_string),
            }),
            existing_object_replication: rule
                .existing_object_replication
                .as_ref()
                .map(|e| status_from_sdk(&e.status)),
            filter: rule.filter.as_ref().map(|f| ConfigurationFilter {
                and: f.and.as_ref().map(|and| AndOperator {
                    prefix: and.prefix.clone(),
                    tags: decode_list(&and.tags),
                }),
                prefix: f.prefix.clone(),
                tag: f.tag.as_ref().map(Into::into),
            }),
            id: rule.id.clone(),
            prefix: rule.prefix.clone(),
            priority: rule.priority,
            source_selection_criteria: rule.source_selection_criteria.as_ref().map(|c| {
                SourceSelectionCriteria {
                    replica_modifications: c
                        .replica_modifications
                        .as_ref()
                        .map(|r| status_from_sdk(&r.status)),
                    sse_kms_encrypted_objects: c
                        .sse_kms_encrypted_objects
                        .as_ref()
                        .map(|s| status_from_sdk(&s.status)),
                }
            }),
            status: Some(enum_string(&rule.status)),
        }
    }
}

impl From<&s3::ReplicationConfiguration> for ReplicationConfiguration {
    fn from(config: &s3::ReplicationConfiguration) -> Self {
        ReplicationConfiguration {
            role: Some(config.role.clone()),
            rules: non_empty(config.rules.iter().map(Into::into).collect()),
        }
    }
}

// request payment, versioning

impl TryFrom<&RequestPaymentConfiguration> for s3::RequestPaymentConfiguration {
    type Error = BuildError;
    fn try_from(config: &RequestPaymentConfiguration) -> BuildResult<Self> {
        s3::RequestPaymentConfiguration::builder()
            .set_payer(sdk_enum(&config.payer))
            .build()
    }
}

pub(super) fn versioning_to_sdk(config: &VersioningConfiguration) -> s3::VersioningConfiguration {
    s3::VersioningConfiguration::builder()
        .set_mfa_delete(sdk_enum(&config.mfa_delete))
        .set_status(sdk_enum(&config.status))
        .build()
}

// tagging

pub(super) fn tagging_to_sdk(tagging: &Tagging) -> BuildResult<s3::Tagging> {
    s3::Tagging::builder()
        .set_tag_set(Some(encode_list(&tagging.tag_set)?.unwrap_or_default()))
        .build()
}

// website

impl TryFrom<&WebsiteConfiguration> for s3::WebsiteConfiguration {
    type Error = BuildError;
    fn try_from(config: &WebsiteConfiguration) -> BuildResult<Self> {
        let error_document = match &config.error_document {
            Some(d) => Some(s3::ErrorDocument::builder().set_key(d.key.clone()).build()?),
            None => None,
        };
        let index_document = match &config.index_document {
            Some(d) => Some(
                s3::IndexDocument::builder()
                    .set_suffix(d.suffix.clone())
                    .build()?,
            ),
            None => None,
        };
        let redirect_all_requests_to = match &config.redirect_all_requests_to {
            Some(r) => Some(
                s3::RedirectAllRequestsTo::builder()
                    .set_host_name(r.host_name.clone())
                    .set_protocol(sdk_enum(&r.protocol))
                    .build()?,
            ),
            None => None,
        };
        Ok(s3::WebsiteConfiguration::builder()
            .set_error_document(error_document)
            .set_index_document(index_document)
            .set_redirect_all_requests_to(redirect_all_requests_to)
            .set_routing_rules(config.routing_rules.as_ref().map(|rules| {
                rules
                    .iter()
                    .map(|rule| {
                        s3::RoutingRule::builder()
                            .set_condition(rule.condition.as_ref().map(|c| {
                                s3::Condition::builder()
                                    .set_http_error_code_returned_equals(
                                        c.http_error_code_returned_equals.clone(),
                                    )
                                    .set_key_prefix_equals(c.key_prefix_equals.clone())
                                    .build()
                            }))
                            .set_redirect(rule.redirect.as_ref().map(|r| {
                                s3::Redirect::builder()
                                    .set_host_name(r.host_name.clone())
                                    .set_http_redirect_code(r.http_redirect_code.clone())
                                    .set_protocol(sdk_enum(&r.protocol))
                                    .set_replace_key_prefix_with(r.replace_key_prefix_with.clone())
                                    .set_replace_key_with(r.replace_key_with.clone())
                                    .build()
                            }))
                            .build()
                    })
                    .collect()
            }))
            .build())
    }
}

pub(super) fn website_from_sdk(
    output: &aws_sdk_s3::operation::get_bucket_website::GetBucketWebsiteOutput,
) -> WebsiteConfiguration {
    WebsiteConfiguration {
        error_document: output.error_document.as_ref().map(|d| ErrorDocument {
            key: Some(d.key.clone()),
        }),
        index_document: output.index_document.as_ref().map(|d| IndexDocument {
            suffix: Some(d.suffix.clone()),
        }),
        redirect_all_requests_to: output.redirect_all_requests_to.as_ref().map(|r| {
            RedirectAllRequestsTo {
                host_name: Some(r.host_name.clone()),
                protocol: r.protocol.as_ref().map(enum_string),
            }
        }),
        routing_rules: output.routing_rules.as_ref().and_then(|rules| {
            non_empty(
                rules
                    .iter()
                    .map(|rule| RoutingRule {
                        condition: rule.condition.as_ref().map(|c| RoutingRuleCondition {
                            http_error_code_returned_equals: c
                                .http_error_code_returned_equals
                                .clone(),
                            key_prefix_equals: c.key_prefix_equals.clone(),
                        }),
                        redirect: rule.redirect.as_ref().map(|r| Redirect {
                            host_name: r.host_name.clone(),
                            http_redirect_code: r.http_redirect_code.clone(),
                            protocol: r.protocol.as_ref().map(enum_string),
                            replace_key_prefix_with: r.replace_key_prefix_with.clone(),
                            replace_key_with: r.replace_key_with.clone(),
                        }),
                    })
                    .collect(),
            )
        }),
    }
}

pub(super) fn lifecycle_from_sdk(
    rules: &Option<Vec<s3::LifecycleRule>>,
) -> BucketLifecycleConfiguration {
    BucketLifecycleConfiguration {
        rules: decode_list(rules),
    }
}

pub(super) fn request_payment_from_sdk(payer: &Option<s3::Payer>) -> RequestPaymentConfiguration {
    RequestPaymentConfiguration {
        payer: payer.as_ref().map(enum_string),
    }
}

pub(super) fn versioning_from_sdk(
    status: &Option<s3::BucketVersioningStatus>,
    mfa_delete: &Option<s3::MfaDeleteStatus>,
) -> VersioningConfiguration {
    VersioningConfiguration {
        mfa_delete: mfa_delete.as_ref().map(enum_string),
        status: status.as_ref().map(enum_string),
    }
}

pub(super) fn tagging_from_sdk(tag_set: &[s3::Tag]) -> Tagging {
    Tagging {
        tag_set: non_empty(tag_set.iter().map(Into::into).collect()),
    }
}

// bucket creation and ACLs

pub(super) fn create_bucket_configuration_to_sdk(
    config: &CreateBucketConfiguration,
) -> s3::CreateBucketConfiguration {
    s3::CreateBucketConfiguration::builder()
        .set_location_constraint(sdk_enum(&config.location_constraint))
        .set_location(config.location.as_ref().map(|l| {
            s3::LocationInfo::builder()
                .set_name(l.name.clone())
                .set_type(sdk_enum(&l.r#type))
                .build()
        }))
        .set_bucket(config.bucket.as_ref().map(|b| {
            s3::BucketInfo::builder()
                .set_data_redundancy(sdk_enum(&b.data_redundancy))
                .set_type(sdk_enum(&b.r#type))
                .build()
        }))
        .build()
}

pub(super) fn canned_acl_to_sdk(acl: &Option<String>) -> Option<s3::BucketCannedAcl> {
    sdk_enum(acl)
}

impl From<&s3::Owner> for Owner {
    fn from(owner: &s3::Owner) -> Self {
        Owner {
            display_name: owner.display_name.clone(),
            id: owner.id.clone(),
        }
    }
}

impl From<&s3::Grant> for Grant {
    fn from(grant: &s3::Grant) -> Self {
        Grant {
            grantee: grant.grantee.as_ref().map(Into::into),
            permission: grant.permission.as_ref().map(enum_string),
        }
    }
}
