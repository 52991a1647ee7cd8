//! Correlation identifier carried through a request.
//!
//! The current identifier lives in Tokio task-local storage so errors and
//! log lines can pick it up without threading it through every call. Task
//! locals do not follow `tokio::spawn` or `spawn_blocking`; wrap such work in
//! [`TraceId::scope`] to keep the identifier visible.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    pub(crate) static TRACE_ID: TraceId;
}

/// Request trace identifier (UUID v4).
///
/// # Examples
/// ```
/// use order_service::TraceId;
///
/// async fn handler() -> String {
///     TraceId::current()
///         .map(|id| id.to_string())
///         .unwrap_or_default()
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Reuse a caller-supplied identifier when it parses as a UUID, otherwise
    /// generate a new one.
    ///
    /// # Examples
    /// ```
    /// use order_service::TraceId;
    ///
    /// let supplied = "6f1b1c1e-7a4c-4b8e-9a43-6f0c3d2b9e10";
    /// assert_eq!(TraceId::parse_or_generate(Some(supplied)).to_string(), supplied);
    /// assert_ne!(TraceId::parse_or_generate(Some("nope")).to_string(), "nope");
    /// ```
    #[must_use]
    pub fn parse_or_generate(candidate: Option<&str>) -> Self {
        candidate
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// The identifier in scope for the running task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Borrow the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scope_exposes_identifier_to_nested_futures() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async {
            async { TraceId::current() }.await
        })
        .await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn current_is_none_outside_a_scope() {
        assert!(TraceId::current().is_none());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("not-a-uuid"))]
    fn parse_or_generate_falls_back_to_fresh_ids(#[case] candidate: Option<&str>) {
        let first = TraceId::parse_or_generate(candidate);
        let second = TraceId::parse_or_generate(candidate);
        assert_ne!(first, second);
    }

    #[rstest]
    fn parse_or_generate_trims_and_reuses_valid_ids() {
        let uuid = Uuid::new_v4();
        let padded = format!("  {uuid} ");
        let trace_id = TraceId::parse_or_generate(Some(padded.as_str()));
        assert_eq!(trace_id.as_uuid(), &uuid);
    }

    #[rstest]
    fn display_and_from_str_agree() {
        let trace_id: TraceId = Uuid::nil().to_string().parse().expect("nil uuid parses");
        assert_eq!(trace_id.to_string(), Uuid::nil().to_string());
        assert_eq!(TraceId::from_uuid(Uuid::nil()), trace_id);
    }
}
