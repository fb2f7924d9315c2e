//! Assignment domain models.
//!
//! Provides the data handed to the engine and the result it returns.
//! Responders and deployments are validated at construction; the engine
//! never mutates them.
//!
//! # Domain Mappings
//!
//! | u-roster | Event medical service | Stewarding | Fire brigade |
//! |----------|----------------------|------------|--------------|
//! | Responder | Paramedic volunteer | Steward | Firefighter |
//! | Deployment | Aid post shift | Gate shift | Standby watch |
//! | Need | "2 × PSE1" | "1 × supervisor" | "1 × breathing apparatus" |
//! | Assignment | Shift roster | Gate plan | Watch list |

mod assignment;
mod deployment;
mod responder;

pub use assignment::{Assignment, AssignmentEntry};
pub use deployment::{Deployment, Need};
pub use responder::Responder;
