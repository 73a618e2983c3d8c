//! Per-call instrumentation and sustained-failure alerting.
//!
//! Every resolved provider call goes through a [`CallMeter`], which:
//! - appends a [`CallRecord`] (status, latency, cost) to the call log,
//! - tracks consecutive failures per provider key,
//! - raises one critical alert when a provider reaches the failure threshold.

mod alerts;
mod call_meter;
mod call_record_model;

pub use alerts::*;
pub use call_meter::*;
pub use call_record_model::*;
