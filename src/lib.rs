use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SerializationError: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Kube Error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Finalizer Error: {0}")]
    // NB: awkward type because finalizer::Error embeds the reconciler error (which is this)
    // so boxing this error to break cycles
    FinalizerError(#[from] Box<kube::runtime::finalizer::Error<Error>>),

    #[error(transparent)]
    ApiError(#[from] aws::ApiError),

    #[error("Error syncing property '{property}': {source}")]
    SyncPropertyError {
        property: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("{0}")]
    Terminal(String),

    #[error("An AWS account ID is required to address directory bucket {0}; set --aws-account-id")]
    MissingAccountId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// AWS error codes that mean the resource itself must change before a retry can succeed
pub const DEFAULT_TERMINAL_ERROR_CODES: &[&str] = &[
    "InvalidBucketName",
    "BucketAlreadyExists",
    "InvalidLocationConstraint",
    "IllegalLocationConstraintException",
    "MalformedPolicy",
    "MalformedXML",
    "InvalidArgument",
    "InvalidRequest",
];

impl Error {
    pub fn metric_label(&self) -> &'static str {
        match self {
            Error::SerializationError(_) => "SerializationError",
            Error::KubeError(_) => "KubeError",
            Error::FinalizerError(_) => "FinalizerError",
            Error::ApiError(_) => "ApiError",
            Error::SyncPropertyError { .. } => "SyncPropertyError",
            Error::Terminal(_) => "Terminal",
            Error::MissingAccountId(_) => "MissingAccountId",
        }
    }

    /// Wraps a sub-resource sync failure with the name of the property being synced
    pub fn sync_property(property: &'static str) -> impl FnOnce(Error) -> Error {
        move |source| Error::SyncPropertyError {
            property,
            source: Box::new(source),
        }
    }

    /// Terminal errors cannot be resolved by retrying; the resource must change first.
    /// `terminal_codes` lists the AWS error codes treated as terminal.
    pub fn is_terminal(&self, terminal_codes: &[String]) -> bool {
        use kube::runtime::finalizer::Error as FinalizerError;

        match self {
            Error::Terminal(_) | Error::MissingAccountId(_) => true,
            Error::ApiError(e) => e
                .code
                .as_deref()
                .is_some_and(|code| terminal_codes.iter().any(|c| c == code)),
            Error::SyncPropertyError { source, .. } => source.is_terminal(terminal_codes),
            Error::FinalizerError(e) => match e.as_ref() {
                FinalizerError::ApplyFailed(e) | FinalizerError::CleanupFailed(e) => {
                    e.is_terminal(terminal_codes)
                }
                _ => false,
            },
            Error::SerializationError(_) | Error::KubeError(_) => false,
        }
    }
}

/// The S3 and S3 Control API boundary
pub mod aws;

pub mod controllers;
pub use controllers::State;

/// Log and trace integrations
pub mod telemetry;

/// Metrics
mod metrics;

pub use metrics::Metrics;

/// Bucket CRD and sub-configuration shapes
pub mod resources;
