//! Sign-out notification contract.
//!
//! A data-carrying collaborator interface for callers that relay response
//! bodies while tearing down authentication sessions: the host announces
//! which authentication types are being signed out, and handlers acknowledge
//! each one with a set of descriptive properties.
//!
//! This trait has no interaction with the copy primitive; it is consumed
//! only by callers.

use std::collections::HashMap;

/// Context for a sign-out operation spanning one or more authentication
/// types.
///
/// Implemented by hosts; consumed by authentication handlers. Carries data
/// only, with no behavior of its own beyond recording acknowledgments.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use copyrs::SignOutContext;
///
/// struct Recorded {
///     types: Vec<String>,
///     acks: Vec<(String, HashMap<String, String>)>,
/// }
///
/// impl SignOutContext for Recorded {
///     fn authentication_types(&self) -> &[String] {
///         &self.types
///     }
///
///     fn ack(&mut self, authentication_type: &str, description: HashMap<String, String>) {
///         self.acks.push((authentication_type.to_owned(), description));
///     }
/// }
/// ```
pub trait SignOutContext {
    /// The authentication types this sign-out applies to.
    fn authentication_types(&self) -> &[String];

    /// Acknowledges that `authentication_type` was handled, with descriptive
    /// key/value properties about the handler.
    fn ack(&mut self, authentication_type: &str, description: HashMap<String, String>);
}
