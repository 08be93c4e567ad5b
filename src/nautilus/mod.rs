//! NAUTILUS: interactive navigation from the nadir point.
//!
//! The DM never trades off between Pareto optimal solutions. Instead the
//! iteration point starts at the nadir point and every objective improves
//! at each step, guided by preference information given as ranks or
//! percentages. At each step the DM may continue, change preferences,
//! step back, take a shorter step or change the number of iterations.
//!
//! # Key Types
//!
//! - [`Nautilus`]: the method; drive it through
//!   [`InteractiveMethod`](crate::interactive::InteractiveMethod)
//! - [`NautilusRequest`]: initial, intermediate and final requests
//! - [`InitialResponse`], [`IterationResponse`], [`Preference`]: the DM's answers

mod config;
mod method;
mod preference;
mod request;

pub use config::NautilusConfig;
pub use method::{calculate_distance, iteration_point, Nautilus};
pub use preference::{validate_n_iterations, InitialResponse, IterationResponse, Preference};
pub use request::{
    InitialContent, IterationContent, NautilusInitialRequest, NautilusIterationRequest,
    NautilusRequest, NautilusStopRequest, StopContent,
};
