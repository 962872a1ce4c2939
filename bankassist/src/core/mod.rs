//! Core domain model types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Stage state and icon enums
//! - The stage record itself
//! - Pipeline events emitted while a run advances

mod event;
mod icon;
mod stage;
mod state;

pub use event::PipelineEvent;
pub use icon::StageIcon;
pub use stage::Stage;
pub use state::StageState;
