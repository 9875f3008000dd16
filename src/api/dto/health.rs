//! Health check payloads.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,
    pub message: String,
}
