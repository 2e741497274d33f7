//! Synthesis configuration.
//!
//! [`SynthConfig`] carries the conventions both synthesizers share: which
//! type identifiers mark the call context and the error result, and how
//! exchange types are named. It is built once per run (usually from CLI
//! flags) and passed by reference; there is no global state.

/// Default marker type for a leading call-context argument.
pub const DEFAULT_CONTEXT_TYPE: &str = "context.Context";

/// Default marker type for a trailing error result.
pub const DEFAULT_ERROR_TYPE: &str = "error";

/// Default suffix for request exchange types.
pub const DEFAULT_REQUEST_SUFFIX: &str = "Request";

/// Default suffix for response exchange types.
pub const DEFAULT_RESPONSE_SUFFIX: &str = "Response";

/// Conventions and switches for one synthesis run.
///
/// ## Examples
///
/// ```
/// use ifacegen_gen::config::SynthConfig;
///
/// let config = SynthConfig::default();
/// assert_eq!(config.request_name("GetUser"), "GetUserRequest");
/// assert_eq!(config.response_name("GetUser"), "GetUserResponse");
///
/// let custom = SynthConfig {
///     request_suffix: "Args".to_string(),
///     response_suffix: "Reply".to_string(),
///     ..SynthConfig::default()
/// };
/// assert_eq!(custom.request_name("GetUser"), "GetUserArgs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthConfig {
    /// Type identifier of a call-scoped context argument.
    pub context_type: String,
    /// Type identifier of a fallible-result indicator.
    pub error_type: String,
    /// Suffix appended to method names for request types.
    pub request_suffix: String,
    /// Suffix appended to method names for response types.
    pub response_suffix: String,
    /// Also register schemas for the request/response exchange types.
    pub exchange_schemas: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            context_type: DEFAULT_CONTEXT_TYPE.to_string(),
            error_type: DEFAULT_ERROR_TYPE.to_string(),
            request_suffix: DEFAULT_REQUEST_SUFFIX.to_string(),
            response_suffix: DEFAULT_RESPONSE_SUFFIX.to_string(),
            exchange_schemas: true,
        }
    }
}

impl SynthConfig {
    /// Name of the request exchange type for `method`.
    pub fn request_name(&self, method: &str) -> String {
        format!("{}{}", method, self.request_suffix)
    }

    /// Name of the response exchange type for `method`.
    pub fn response_name(&self, method: &str) -> String {
        format!("{}{}", method, self.response_suffix)
    }
}
