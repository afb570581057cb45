use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{Page, Recommendation};
use crate::models::interest::Interest;

/// Checkbox state of one interest on the selection page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestOption {
    pub interest: Interest,
    pub label: String,
    pub selected: bool,
}

/// Display category with its interests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryView {
    pub name: String,
    pub interests: Vec<InterestOption>,
}

/// Rendered page content, one variant per flow page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum PageView {
    Welcome {
        title: String,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    SelectInterests {
        categories: Vec<CategoryView>,
        selected_count: usize,
        min_required: usize,
    },
    Results {
        recommendation: Recommendation,
    },
}

impl PageView {
    pub fn page(&self) -> Page {
        match self {
            PageView::Welcome { .. } => Page::Welcome,
            PageView::SelectInterests { .. } => Page::SelectInterests,
            PageView::Results { .. } => Page::Results,
        }
    }
}

/// Response carrying a session id and its current view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    pub view: PageView,
}

/// Catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub categories: Vec<CategoryView>,
}

/// Summary of the loaded model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    pub trees: usize,
    pub features: usize,
    pub courses: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub model: ModelSummary,
    #[serde(rename = "activeSessions")]
    pub active_sessions: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
