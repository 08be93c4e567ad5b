//! NAUTILUS requests exchanged with the DM.

use super::preference::{InitialResponse, IterationResponse};
use crate::error::Result;
use crate::interactive::{InteractionType, Request, RequestType};

const INITIAL_MESSAGE: &str = "Please specify the number of iterations to be carried out.\n\
Please specify your preference information either as\n\
1. ranks of the objectives in increasing order of the importance of improving their value, or\n\
2. percentages reflecting how much you would like to improve each of the current objective values.";

const ITERATION_MESSAGE: &str = "To change the number of remaining iterations, specify the new number.\n\
To return to the previous iteration point, take a step back.\n\
When stepping back you may take a shorter step with the previous preference information.\n\
To keep the preference information of the previous iteration, use the previous preference.\n\
Otherwise specify new preference information either as ranks or as percentages.";

const STOP_MESSAGE: &str = "Final solution found.";

/// Content of the initial request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialContent {
    pub message: String,
    pub ideal: Vec<f64>,
    pub nadir: Vec<f64>,
    pub objective_names: Vec<String>,
}

/// Asks for the number of iterations and the first preferences.
#[derive(Debug, Clone)]
pub struct NautilusInitialRequest {
    content: InitialContent,
    response: Option<InitialResponse>,
}

impl NautilusInitialRequest {
    pub(crate) fn new(ideal: Vec<f64>, nadir: Vec<f64>, objective_names: Vec<String>) -> Self {
        Self {
            content: InitialContent {
                message: INITIAL_MESSAGE.to_string(),
                ideal,
                nadir,
                objective_names,
            },
            response: None,
        }
    }

    pub fn content(&self) -> &InitialContent {
        &self.content
    }

    pub fn response(&self) -> Option<&InitialResponse> {
        self.response.as_ref()
    }

    /// Validates and stores the DM's answer.
    pub fn set_response(&mut self, response: InitialResponse) -> Result<()> {
        response.validate(self.content.ideal.len())?;
        self.response = Some(response);
        Ok(())
    }
}

impl Request for NautilusInitialRequest {
    fn request_type(&self) -> RequestType {
        RequestType::ReferencePointPreference
    }

    fn interaction_type(&self) -> InteractionType {
        InteractionType::Required
    }

    fn message(&self) -> &str {
        &self.content.message
    }
}

/// Content of an intermediate request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationContent {
    pub message: String,
    pub ideal: Vec<f64>,
    pub nadir: Vec<f64>,
    pub objective_names: Vec<String>,
    /// Total number of iterations currently planned.
    pub n_iterations: usize,
    /// Iterations left, the current one included.
    pub n_iterations_left: usize,
    /// Lower bounds of the objective values still reachable.
    pub lower_bounds: Vec<f64>,
    /// Upper bounds of the objective values still reachable (the current
    /// iteration point).
    pub upper_bounds: Vec<f64>,
    /// Distance of the iteration point to the Pareto optimal set, in
    /// percent: 0 at the nadir point, 100 on the Pareto optimal set.
    pub distance: f64,
}

/// Shows the current iteration and asks how to proceed.
#[derive(Debug, Clone)]
pub struct NautilusIterationRequest {
    content: IterationContent,
    response: Option<IterationResponse>,
}

impl NautilusIterationRequest {
    pub(crate) fn new(content: IterationContent) -> Self {
        Self {
            content: IterationContent {
                message: ITERATION_MESSAGE.to_string(),
                ..content
            },
            response: None,
        }
    }

    pub fn content(&self) -> &IterationContent {
        &self.content
    }

    pub fn response(&self) -> Option<&IterationResponse> {
        self.response.as_ref()
    }

    /// Validates and stores the DM's answer.
    pub fn set_response(&mut self, response: IterationResponse) -> Result<()> {
        response.validate(self.content.ideal.len())?;
        self.response = Some(response);
        Ok(())
    }
}

impl Request for NautilusIterationRequest {
    fn request_type(&self) -> RequestType {
        RequestType::ReferencePointPreference
    }

    fn interaction_type(&self) -> InteractionType {
        InteractionType::Required
    }

    fn message(&self) -> &str {
        &self.content.message
    }
}

/// Content of the final request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopContent {
    pub message: String,
    /// Final decision vector.
    pub solution: Vec<f64>,
    /// Objective values of `solution`.
    pub objective_vector: Vec<f64>,
}

/// Reports the final solution; needs no answer.
#[derive(Debug, Clone)]
pub struct NautilusStopRequest {
    content: StopContent,
}

impl NautilusStopRequest {
    pub(crate) fn new(solution: Vec<f64>, objective_vector: Vec<f64>) -> Self {
        Self {
            content: StopContent {
                message: STOP_MESSAGE.to_string(),
                solution,
                objective_vector,
            },
        }
    }

    pub fn content(&self) -> &StopContent {
        &self.content
    }
}

impl Request for NautilusStopRequest {
    fn request_type(&self) -> RequestType {
        RequestType::Print
    }

    fn interaction_type(&self) -> InteractionType {
        InteractionType::NoInteraction
    }

    fn message(&self) -> &str {
        &self.content.message
    }
}

/// Any request produced by [`Nautilus`](super::Nautilus).
#[derive(Debug, Clone)]
pub enum NautilusRequest {
    Initial(NautilusInitialRequest),
    Iteration(NautilusIterationRequest),
    Stop(NautilusStopRequest),
}

impl NautilusRequest {
    pub fn is_stop(&self) -> bool {
        matches!(self, NautilusRequest::Stop(_))
    }

    pub fn as_initial_mut(&mut self) -> Option<&mut NautilusInitialRequest> {
        match self {
            NautilusRequest::Initial(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_iteration(&self) -> Option<&NautilusIterationRequest> {
        match self {
            NautilusRequest::Iteration(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_iteration_mut(&mut self) -> Option<&mut NautilusIterationRequest> {
        match self {
            NautilusRequest::Iteration(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_stop(&self) -> Option<&NautilusStopRequest> {
        match self {
            NautilusRequest::Stop(r) => Some(r),
            _ => None,
        }
    }
}

impl Request for NautilusRequest {
    fn request_type(&self) -> RequestType {
        match self {
            NautilusRequest::Initial(r) => r.request_type(),
            NautilusRequest::Iteration(r) => r.request_type(),
            NautilusRequest::Stop(r) => r.request_type(),
        }
    }

    fn interaction_type(&self) -> InteractionType {
        match self {
            NautilusRequest::Initial(r) => r.interaction_type(),
            NautilusRequest::Iteration(r) => r.interaction_type(),
            NautilusRequest::Stop(r) => r.interaction_type(),
        }
    }

    fn message(&self) -> &str {
        match self {
            NautilusRequest::Initial(r) => r.message(),
            NautilusRequest::Iteration(r) => r.message(),
            NautilusRequest::Stop(r) => r.message(),
        }
    }
}
