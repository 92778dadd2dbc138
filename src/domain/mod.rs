//! Domain layer - pure decision logic with no I/O.
//!
//! This layer contains the core concepts of the crate:
//! - Form field kinds and trimmed values
//! - Field validation rules
//! - Throttle and debounce window policies
//! - Navigation, reveal and grid decision models
//!
//! Time enters only as explicit `Instant` arguments, so every type here is
//! deterministic and easily testable.

pub mod field;
pub mod policy;
pub mod site;
pub mod validation;
