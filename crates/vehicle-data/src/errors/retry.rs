/// Classification for the adapters' retry policy.
///
/// | Class | Retried by the HTTP client? |
/// |-------|-----------------------------|
/// | `Never` | No |
/// | `WithBackoff` | Yes, up to the attempt limit, with linear backoff |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - missing vehicle, bad request or unreadable payload.
    Never,

    /// Transient failure (timeout, 429, 5xx). Retry after a delay that grows
    /// linearly with the attempt number.
    WithBackoff,
}
