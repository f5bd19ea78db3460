//! Application layer: fetches pull-request data through a gateway and
//! drives the parse + evaluate + aggregate + decide + render pipeline.

mod gateway;
mod review;

pub use gateway::{GatewayError, PrId, PrSnapshot, VcsGateway};
pub use review::{review_pr, run_review, ReviewOutcome, RunError};
