use crate::aws::ApiError;
use crate::Error;
use kube::ResourceExt;
use prometheus::{histogram_opts, opts, HistogramVec, IntCounter, IntCounterVec, Registry};
use tokio::time::Instant;

#[derive(Clone)]
pub struct Metrics {
    pub reconciliations: IntCounter,
    pub failures: IntCounterVec,
    pub reconcile_duration: HistogramVec,
    pub api_calls: IntCounterVec,
}

impl Default for Metrics {
    fn default() -> Self {
        let reconcile_duration = HistogramVec::new(
            histogram_opts!(
                "s3_bucket_operator_reconcile_duration_seconds",
                "The duration of reconcile to complete in seconds"
            )
            .buckets(vec![0.01, 0.1, 0.25, 0.5, 1., 5., 15., 60.]),
            &["kind"],
        )
        .unwrap();
        let failures = IntCounterVec::new(
            opts!(
                "s3_bucket_operator_reconciliation_errors_total",
                "reconciliation errors",
            ),
            &["kind", "instance", "error"],
        )
        .unwrap();
        let reconciliations =
            IntCounter::new("s3_bucket_operator_reconciliations_total", "reconciliations").unwrap();
        let api_calls = IntCounterVec::new(
            opts!(
                "s3_bucket_operator_api_calls_total",
                "calls made to the S3 and S3 Control APIs",
            ),
            &["verb", "operation", "outcome"],
        )
        .unwrap();
        Metrics {
            reconciliations,
            failures,
            reconcile_duration,
            api_calls,
        }
    }
}

/// The kind of API call, as recorded on the api calls counter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiVerb {
    Create,
    ReadOne,
    ReadMany,
    Update,
    Delete,
}

impl ApiVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVerb::Create => "CREATE",
            ApiVerb::ReadOne => "READ_ONE",
            ApiVerb::ReadMany => "READ_MANY",
            ApiVerb::Update => "UPDATE",
            ApiVerb::Delete => "DELETE",
        }
    }
}

impl Metrics {
    /// Register API metrics to start tracking them.
    pub fn register(self, registry: &Registry) -> Result<Self, prometheus::Error> {
        registry.register(Box::new(self.reconcile_duration.clone()))?;
        registry.register(Box::new(self.failures.clone()))?;
        registry.register(Box::new(self.reconciliations.clone()))?;
        registry.register(Box::new(self.api_calls.clone()))?;
        Ok(self)
    }

    pub fn reconcile_failure<T: kube::Resource<DynamicType = ()>>(&self, rc: &T, e: &Error) {
        self.failures
            .with_label_values(&[
                T::kind(&()).as_ref(),
                rc.name_any().as_ref(),
                e.metric_label(),
            ])
            .inc()
    }

    /// Records one S3 or S3 Control call. The outcome is `ok` or the AWS error code.
    pub fn record_api_call(&self, verb: ApiVerb, operation: &str, error: Option<&ApiError>) {
        let outcome = match error {
            None => "ok",
            Some(e) => e.code.as_deref().unwrap_or("Unknown"),
        };
        self.api_calls
            .with_label_values(&[verb.as_str(), operation, outcome])
            .inc()
    }

    pub fn count_and_measure<T: kube::Resource<DynamicType = ()>>(&self) -> ReconcileMeasurer<T> {
        self.reconciliations.inc();
        ReconcileMeasurer {
            start: Instant::now(),
            metric: self.reconcile_duration.clone(),
            _resource_type: std::marker::PhantomData,
        }
    }
}

/// Smart function duration measurer
///
/// Relies on Drop to calculate duration and register the observation in the histogram
pub struct ReconcileMeasurer<T: kube::Resource<DynamicType = ()>> {
    start: Instant,
    metric: HistogramVec,
    _resource_type: std::marker::PhantomData<T>,
}

impl<T: kube::Resource<DynamicType = ()>> Drop for ReconcileMeasurer<T> {
    fn drop(&mut self) {
        #[allow(clippy::cast_precision_loss)]
        let duration = self.start.elapsed().as_millis() as f64 / 1000.0;
        self.metric
            .with_label_values(&[T::kind(&()).as_ref()])
            .observe(duration);
    }
}
