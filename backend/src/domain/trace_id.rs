//! Request-scoped trace identifier for correlation across logs and errors.
//!
//! `TraceId` follows a request through the system. It uses task-local storage
//! so the current identifier is available without explicit parameter
//! threading.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`TraceId::scope`] when spawning new tasks to carry the identifier along.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    /// Task-local storage for the current trace identifier.
    pub(crate) static TRACE_ID: TraceId;
}

/// Per-request trace identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use backend::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         tracing::info!(trace_id = %id, "handling request");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(pub(crate) Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    #[rustfmt::skip]
    pub(crate) fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Construct a trace identifier from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the current trace identifier if one is in scope.
    #[must_use]
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { TRACE_ID.try_with(|id| *id).ok() }

    /// Execute the provided future with the supplied trace identifier in scope.
    ///
    /// # Examples
    /// ```
    /// use backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }

    /// Run a synchronous closure with the identifier in scope.
    pub fn sync_scope<F, R>(trace_id: Self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        TRACE_ID.sync_scope(trace_id, f)
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
