//! Vehicle listing auto-fill workflow.

pub mod autofill_model;
pub mod autofill_service;
pub mod autofill_traits;
pub mod extraction;
pub mod validation;


pub use autofill_model::*;
pub use autofill_service::AutofillService;
pub use autofill_traits::AutofillServiceTrait;
pub use validation::validate_request;
