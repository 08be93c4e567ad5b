//! Request/response protocol shared by interactive methods.
//!
//! An interactive method alternates between the solver and a decision
//! maker (DM). The method hands out a request describing the current
//! state; the DM answers by setting a response on it; the answered request
//! goes back to the method, which produces the next request.
//!
//! Responses are validated when they are set, so a malformed answer is
//! reported to the DM before the method touches its state.

use crate::error::Result;

/// What kind of information a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestType {
    /// Preference information relative to a reference point.
    ReferencePointPreference,
    /// Information to be shown; no answer expected.
    Print,
}

/// Whether the DM must answer a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionType {
    Required,
    NoInteraction,
}

/// Common view of every request.
pub trait Request {
    fn request_type(&self) -> RequestType;

    fn interaction_type(&self) -> InteractionType;

    /// Instructions for the DM.
    fn message(&self) -> &str;
}

/// An interactive multiobjective optimization method.
pub trait InteractiveMethod {
    /// The requests this method exchanges with the DM.
    type Request;

    /// Returns the first request.
    fn start(&mut self) -> Self::Request;

    /// Consumes an answered request and returns the next one.
    fn iterate(&mut self, request: Self::Request) -> Result<Self::Request>;
}
