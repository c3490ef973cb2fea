pub mod credentials;
pub mod models;

pub use credentials::{ServiceAccountKey, TokenErrorResponse, TokenRequest, TokenResponse};
pub use models::{Analysis, InsertRequest, ModelList, PredictRequest, Prediction, TrainedModel};
