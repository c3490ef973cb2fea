pub const PREDICTION_API_ROOT: &'static str = "https://www.googleapis.com/prediction/v1.6";

pub const PREDICTION_SCOPE: &'static str = "https://www.googleapis.com/auth/prediction";
pub const STORAGE_READ_SCOPE: &'static str = "https://www.googleapis.com/auth/devstorage.read_only";
pub const SCOPES: [&'static str; 2] = [PREDICTION_SCOPE, STORAGE_READ_SCOPE];

pub const TOKEN_LIFETIME_SECONDS: i64 = 3600;
pub const TOKEN_EXPIRY_SKEW_SECONDS: i64 = 60;

pub const LIST_MAX_RESULTS: u32 = 10;
pub const SAMPLE_TEXTS: [&'static str; 2] = ["mucho bueno", "bonjour, mon cher ami"];

pub const REVOKED_MESSAGE: &'static str =
  "The credentials have been revoked or expired, please re-run the application to re-authorize.";
