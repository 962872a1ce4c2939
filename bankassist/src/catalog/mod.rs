//! Static catalog data: stage definitions, canned outputs and the
//! placeholder case profile used to synthesize results.
//!
//! Nothing in here is computed. The simulation looks values up by stage
//! identifier and interpolates them into templates.

mod outputs;
mod profile;
mod stages;

pub use outputs::{CannedOutputs, GENERIC_OUTPUT};
pub use profile::{AgentScore, BusinessImpact, CaseProfile};
pub use stages::{StageCatalog, StageDefinition};
