//! # User Feedback Components
//!
//! Headless UI state for the portal. The concrete rendering shell (modal
//! chrome, tab sliders, CSS) is an external collaborator; this module owns
//! only the state it presents.

pub mod notifications;
