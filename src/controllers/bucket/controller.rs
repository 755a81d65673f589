use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::runtime::events::Recorder;
use kube::runtime::{reflector, watcher, WatchStreamExt};
use kube::{
    api::{Api, ListParams, Patch, PatchParams, ResourceExt},
    client::Client,
    runtime::{
        controller::{Action, Controller},
        events::{Event, EventType},
        finalizer::{finalizer, Event as Finalizer},
        watcher::Config,
    },
    Resource,
};
use serde_json::json;
use tokio::{sync::RwLock, time::Duration};
use tracing::*;

use crate::controllers::{Diagnostics, State};
use crate::resources::buckets::{
    Bucket, BucketCondition, BucketStatus, DeletionPolicy, ResourceMetadata, BUCKET_FINALIZER,
    NAMESPACE_DELETION_POLICY_ANNOTATION,
};
use crate::{telemetry, Error, Metrics, Result};

use super::reconcilers::orchestrator::{self, SyncOutcome, Synced};
use super::reconcilers::ResourceManager;

pub const CONDITION_RESOURCE_SYNCED: &str = "ACK.ResourceSynced";
pub const CONDITION_TERMINAL: &str = "ACK.Terminal";
pub const CONDITION_RECOVERABLE: &str = "ACK.Recoverable";

/// How long to wait before checking that changes just applied have settled
const VERIFY_AFTER: Duration = Duration::from_secs(10);
const RETRY_AFTER: Duration = Duration::from_secs(30);

/// Operator-wide settings for the bucket controller
#[derive(Clone, Debug)]
pub struct Settings {
    /// Applies when neither the resource nor its namespace is annotated
    pub deletion_policy: DeletionPolicy,
    /// How often an in-sync bucket is compared with AWS again
    pub resync_period: Duration,
    /// AWS error codes that retrying cannot fix
    pub terminal_error_codes: Vec<String>,
    /// Only watch buckets in this namespace
    pub watch_namespace: Option<String>,
}

// Context for our reconciler
#[derive(Clone)]
pub(super) struct Context {
    /// Kubernetes client
    pub client: Client,
    /// Kubernetes event recorder
    pub recorder: Recorder,
    /// Diagnostics read by the web server
    pub diagnostics: Arc<RwLock<Diagnostics>>,
    /// Prometheus metrics
    pub metrics: Metrics,
    /// S3 clients and the account and region buckets live in
    pub manager: Arc<ResourceManager>,
    pub settings: Settings,
}

impl Context {
    pub fn new(
        client: Client,
        metrics: Metrics,
        state: State,
        settings: Settings,
        manager: ResourceManager,
    ) -> Arc<Context> {
        Arc::new(Context {
            client: client.clone(),
            recorder: Recorder::new(client, "s3-bucket-operator".into()),
            diagnostics: state.diagnostics.clone(),
            metrics,
            manager: Arc::new(manager),
            settings,
        })
    }
}

#[instrument(skip(ctx, bucket), fields(trace_id))]
async fn reconcile(bucket: Arc<Bucket>, ctx: Arc<Context>) -> Result<Action> {
    if let Some(trace_id) = telemetry::get_trace_id() {
        Span::current().record("trace_id", field::display(&trace_id));
    }
    let _timer = ctx.metrics.count_and_measure::<Bucket>();
    ctx.diagnostics.write().await.last_event = Utc::now();

    let namespace = match bucket.metadata.namespace.as_deref() {
        Some("") | None => "default",
        Some(ns) => ns,
    };
    let buckets: Api<Bucket> = Api::namespaced(ctx.client.clone(), namespace);

    info!(
        "Reconciling Bucket {} in namespace {namespace}",
        bucket.name_any()
    );
    match finalizer(&buckets, BUCKET_FINALIZER, bucket.clone(), |event| async {
        match event {
            Finalizer::Apply(bucket) => bucket.reconcile_status(ctx.clone(), namespace).await,
            Finalizer::Cleanup(bucket) => bucket.cleanup(ctx.clone(), namespace).await,
        }
    })
    .await
    {
        Ok(action) => Ok(action),
        Err(err) => {
            warn!("reconcile failed: {:?}", err);

            ctx.recorder
                .publish(
                    &Event {
                        type_: EventType::Warning,
                        reason: "FailedReconcile".into(),
                        note: Some(err.to_string()),
                        action: "Reconcile".into(),
                        secondary: None,
                    },
                    &bucket.object_ref(&()),
                )
                .await?;

            let err = Error::FinalizerError(Box::new(err));
            ctx.metrics.reconcile_failure(bucket.as_ref(), &err);
            Err(err)
        }
    }
}

/// Terminal errors wait for the resource to change, or for the next resync
fn error_policy(_bucket: Arc<Bucket>, error: &Error, ctx: Arc<Context>) -> Action {
    if error.is_terminal(&ctx.settings.terminal_error_codes) {
        Action::requeue(ctx.settings.resync_period)
    } else {
        Action::requeue(RETRY_AFTER)
    }
}

impl Bucket {
    async fn reconcile_status(&self, ctx: Arc<Context>, namespace: &str) -> Result<Action> {
        let buckets: Api<Bucket> = Api::namespaced(ctx.client.clone(), namespace);
        let name = self.name_any();

        let result = orchestrator::sync(&ctx.manager, &self.spec, self.adoption_policy()).await;

        match &result {
            Ok(Synced {
                outcome: SyncOutcome::Created,
                ..
            }) => {
                self.publish(&ctx, "Created", format!("Created bucket {}", self.spec.name))
                    .await?
            }
            Ok(Synced {
                outcome: SyncOutcome::Updated(properties),
                ..
            }) => {
                self.publish(&ctx, "Updated", format!("Synced {}", properties.join(", ")))
                    .await?
            }
            _ => {}
        }

        let status = self.next_status(
            &result,
            &ctx.manager,
            &ctx.settings.terminal_error_codes,
            Time(Utc::now()),
        );

        debug!("Updating status of Bucket {name} in namespace {namespace}");

        // always overwrite status object with what we saw
        let new_status = Patch::Apply(json!({
            "apiVersion": Bucket::api_version(&()),
            "kind": Bucket::kind(&()),
            "status": status,
        }));
        let ps = PatchParams::apply("s3-bucket-operator").force();
        let _o = buckets.patch_status(&name, &ps, &new_status).await?;

        match result {
            Ok(Synced {
                outcome: SyncOutcome::InSync,
                ..
            }) => Ok(Action::requeue(ctx.settings.resync_period)),
            Ok(_) => Ok(Action::requeue(VERIFY_AFTER)),
            Err(err) => Err(err),
        }
    }

    fn next_status(
        &self,
        result: &Result<Synced>,
        manager: &ResourceManager,
        terminal_error_codes: &[String],
        now: Time,
    ) -> BucketStatus {
        let previous = self.status.clone().unwrap_or_default();
        let existing = previous.conditions.unwrap_or_default();
        let condition = |r#type: &str, status: &str, reason: &str, message: String| {
            transition(&existing, &now, r#type, status, reason, message)
        };

        match result {
            Ok(synced) => {
                let conditions = match &synced.outcome {
                    SyncOutcome::InSync => vec![condition(
                        CONDITION_RESOURCE_SYNCED,
                        "True",
                        "Synced",
                        "Resource synced successfully".into(),
                    )],
                    SyncOutcome::Created => vec![condition(
                        CONDITION_RESOURCE_SYNCED,
                        "False",
                        "Created",
                        "Bucket was created, verifying its configuration".into(),
                    )],
                    SyncOutcome::Updated(properties) => vec![condition(
                        CONDITION_RESOURCE_SYNCED,
                        "False",
                        "Updated",
                        format!("Synced {}, verifying", properties.join(", ")),
                    )],
                };
                BucketStatus {
                    ack_resource_metadata: Some(ResourceMetadata {
                        arn: Some(synced.arn.clone()),
                        owner_account_id: manager.account_id().map(str::to_string),
                        region: Some(manager.region().to_string()),
                    }),
                    location: synced.location.clone().or(previous.location),
                    conditions: Some(conditions),
                }
            }
            Err(err) => {
                let message = err.to_string();
                let conditions = if err.is_terminal(terminal_error_codes) {
                    vec![
                        condition(CONDITION_RESOURCE_SYNCED, "False", "Terminal", message.clone()),
                        condition(CONDITION_TERMINAL, "True", "Terminal", message),
                    ]
                } else {
                    vec![
                        condition(
                            CONDITION_RESOURCE_SYNCED,
                            "Unknown",
                            "FailedReconcile",
                            message.clone(),
                        ),
                        condition(CONDITION_RECOVERABLE, "True", "FailedReconcile", message),
                    ]
                };
                BucketStatus {
                    conditions: Some(conditions),
                    ..previous
                }
            }
        }
    }

    async fn publish(&self, ctx: &Context, reason: &str, note: String) -> Result<()> {
        ctx.recorder
            .publish(
                &Event {
                    type_: EventType::Normal,
                    reason: reason.into(),
                    note: Some(note),
                    action: "Reconcile".into(),
                    secondary: None,
                },
                &self.object_ref(&()),
            )
            .await?;
        Ok(())
    }

    // Finalizer cleanup (the object was deleted, delete the bucket unless it is retained)
    async fn cleanup(&self, ctx: Arc<Context>, namespace: &str) -> Result<Action> {
        ctx.recorder
            .publish(
                &Event {
                    type_: EventType::Normal,
                    reason: "DeleteRequested".into(),
                    note: Some(format!("Delete `{}`", self.name_any())),
                    action: "Deleting".into(),
                    secondary: None,
                },
                &self.object_ref(&()),
            )
            .await?;

        let policy = match self.deletion_policy() {
            Some(policy) => policy,
            None => {
                let nss: Api<Namespace> = Api::all(ctx.client.clone());
                let ns = nss.get_metadata_opt(namespace).await?;
                resolve_deletion_policy(
                    None,
                    ns.as_ref().and_then(|ns| ns.metadata.annotations.as_ref()),
                    ctx.settings.deletion_policy,
                )
            }
        };

        match policy {
            DeletionPolicy::Delete => orchestrator::delete(&ctx.manager, &self.spec.name).await?,
            DeletionPolicy::Retain => info!("Retaining bucket {}", self.spec.name),
        }
        Ok(Action::await_change())
    }
}

/// The resource annotation wins over the namespace annotation, which wins over the default
fn resolve_deletion_policy(
    resource: Option<DeletionPolicy>,
    namespace_annotations: Option<&BTreeMap<String, String>>,
    default: DeletionPolicy,
) -> DeletionPolicy {
    resource
        .or_else(|| {
            namespace_annotations
                .and_then(|a| a.get(NAMESPACE_DELETION_POLICY_ANNOTATION))
                .and_then(|v| DeletionPolicy::parse(v))
        })
        .unwrap_or(default)
}

/// Builds a condition, keeping the previous transition time unless the status changed
fn transition(
    existing: &[BucketCondition],
    now: &Time,
    r#type: &str,
    status: &str,
    reason: &str,
    message: String,
) -> BucketCondition {
    let previous = existing.iter().find(|c| c.r#type == r#type);
    let last_transition_time = match previous {
        Some(p) if p.status == status => p.last_transition_time.clone(),
        _ => None,
    };
    BucketCondition {
        last_transition_time: Some(last_transition_time.unwrap_or_else(|| now.clone())),
        message: Some(message),
        reason: Some(reason.into()),
        status: status.into(),
        r#type: r#type.into(),
    }
}

// Initialize the controller and shared state (given the crd is installed)
pub async fn run(
    client: Client,
    metrics: Metrics,
    state: State,
    settings: Settings,
    manager: ResourceManager,
) {
    let buckets: Api<Bucket> = match &settings.watch_namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    };

    if let Err(e) = buckets.list(&ListParams::default().limit(1)).await {
        error!("Bucket is not queryable; {e:?}. Is the CRD installed?");
        std::process::exit(1);
    }

    // status patches must not trigger another reconcile
    let (store, writer) = reflector::store();
    let bucket_reflector = reflector(writer, watcher(buckets, Config::default()))
        .touched_objects()
        .default_backoff()
        .predicate_filter(changed_predicate);

    Controller::for_stream(bucket_reflector, store)
        .shutdown_on_signal()
        .run(
            reconcile,
            error_policy,
            Context::new(client, metrics, state, settings, manager),
        )
        .filter_map(|x| async move { Result::ok(x) })
        .for_each(|_| futures::future::ready(()))
        .await;
}

fn changed_predicate<K: Resource>(obj: &K) -> Option<u64> {
    let mut hasher = DefaultHasher::new();
    if let Some(g) = obj.meta().generation {
        // covers spec but not metadata or status
        g.hash(&mut hasher)
    }
    // the deletion and adoption policies are annotations
    obj.annotations().hash(&mut hasher);
    Some(hasher.finish())
}
