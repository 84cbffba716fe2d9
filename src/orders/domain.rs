use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::concierge::ConciergeMessage;
use crate::fitting::confidence::FitConfidence;
use crate::fitting::domain::{BodyProfile, MeasurementSet};
use crate::production::domain::{OrderStatus, TimelineStep};
use crate::production::progress::{ProgressUpdate, ShareKey};
use crate::production::timeline::ProductionTimeline;

/// Identifier wrapper for placed orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

/// Gown silhouettes offered by the configurator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Silhouette {
    ALine,
    BallGown,
    Mermaid,
    Sheath,
    Empire,
}

impl Silhouette {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ALine => "A-Line",
            Self::BallGown => "Ball Gown",
            Self::Mermaid => "Mermaid",
            Self::Sheath => "Sheath",
            Self::Empire => "Empire",
        }
    }
}

/// The configurator's output: what the client asked the atelier to make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GownSelection {
    pub silhouette: Silhouette,
    pub fabric: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neckline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeves: Option<String>,
    #[serde(default)]
    pub embellishments: Vec<String>,
}

/// Intake payload assembled by the client portal at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub client_name: String,
    pub contact_email: String,
    pub gown: GownSelection,
    #[serde(default)]
    pub measurements: MeasurementSet,
    #[serde(default)]
    pub body: BodyProfile,
    #[serde(default)]
    pub requested_delivery: Option<NaiveDate>,
}

/// Repository record: the full state of one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub client_name: String,
    pub contact_email: String,
    pub gown: GownSelection,
    pub measurements: MeasurementSet,
    pub body: BodyProfile,
    /// Guidance snapshot taken at intake; recomputed client-side thereafter.
    pub fit: FitConfidence,
    pub status: OrderStatus,
    pub stage: String,
    pub eta: Option<NaiveDate>,
    pub timeline: ProductionTimeline,
    pub updates: Vec<ProgressUpdate>,
    pub messages: Vec<ConciergeMessage>,
    pub share_key: Option<ShareKey>,
    pub placed_at: DateTime<Utc>,
}

impl OrderRecord {
    pub fn status_view(&self) -> OrderStatusView {
        OrderStatusView {
            id: self.id.clone(),
            client_name: self.client_name.clone(),
            status: self.status.label(),
            stage: self.stage.clone(),
            eta: self.eta,
            fit: self.fit,
            progress_percentage: self.timeline.progress_percentage(),
            timeline: self.timeline.steps().to_vec(),
            share_key: self.share_key.clone(),
        }
    }

    /// Public page behind the share key: progress only, no contact details,
    /// and only the updates the atelier chose to publish.
    pub fn shared_view(&self) -> SharedProgressView {
        SharedProgressView {
            reference: self.id.0.clone(),
            status: self.status.label(),
            stage: self.stage.clone(),
            eta: self.eta,
            progress_percentage: self.timeline.progress_percentage(),
            timeline: self.timeline.steps().to_vec(),
            updates: self
                .updates
                .iter()
                .filter(|update| update.published)
                .cloned()
                .collect(),
        }
    }
}

/// Client- and admin-facing order summary.
#[derive(Debug, Clone, Serialize)]
pub struct OrderStatusView {
    pub id: OrderId,
    pub client_name: String,
    pub status: &'static str,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<NaiveDate>,
    pub fit: FitConfidence,
    pub progress_percentage: u8,
    pub timeline: Vec<TimelineStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_key: Option<ShareKey>,
}

/// Read-only view rendered on the shareable progress page.
#[derive(Debug, Clone, Serialize)]
pub struct SharedProgressView {
    pub reference: String,
    pub status: &'static str,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<NaiveDate>,
    pub progress_percentage: u8,
    pub timeline: Vec<TimelineStep>,
    pub updates: Vec<ProgressUpdate>,
}

/// Administrative overwrite of an order's production state: the full
/// timeline array plus status, stage, and an optional ETA.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductionUpdate {
    pub timeline: Vec<TimelineStep>,
    pub status: OrderStatus,
    pub stage: String,
    #[serde(default)]
    pub eta: Option<NaiveDate>,
}

/// A progress note to record against an order; `publish` also provisions
/// the shareable link the first time it is set.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressUpdateRequest {
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub step_label: Option<String>,
    #[serde(default)]
    pub publish: bool,
}
