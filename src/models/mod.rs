//! Request/response types

pub mod requests;
pub mod responses;

pub use requests::PredictRequest;
pub use responses::{ModelStatusResponse, PredictResponse};
