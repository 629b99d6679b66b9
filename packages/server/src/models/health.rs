use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: &'static str,
    #[schema(example = "Ball Knowledge API is running")]
    pub message: &'static str,
    #[schema(example = "1.0.0")]
    pub version: &'static str,
}
