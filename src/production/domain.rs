use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical catalog of atelier milestones. Every order's timeline is
/// instantiated from this fixed, ordered set; the English labels double as
/// the stable join keys the toggle operation matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStep {
    PatternDrafting,
    ToileFitting,
    FabricCutting,
    Sewing,
    HandEmbellishment,
    QualityCheck,
    PackagingAndDispatch,
}

impl ProductionStep {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::PatternDrafting,
            Self::ToileFitting,
            Self::FabricCutting,
            Self::Sewing,
            Self::HandEmbellishment,
            Self::QualityCheck,
            Self::PackagingAndDispatch,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PatternDrafting => "Pattern Drafting",
            Self::ToileFitting => "Toile Fitting",
            Self::FabricCutting => "Fabric Cutting",
            Self::Sewing => "Sewing",
            Self::HandEmbellishment => "Hand Embellishment",
            Self::QualityCheck => "Quality Check",
            Self::PackagingAndDispatch => "Packaging & Dispatch",
        }
    }
}

/// One milestone on an order's timeline. A completed step carries the
/// timestamp of its first completion; un-completing clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub label: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TimelineStep {
    pub fn pending(step: ProductionStep) -> Self {
        Self {
            label: step.label().to_string(),
            completed: false,
            completed_at: None,
        }
    }
}

/// High level status tracked per order, alongside the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    InProduction,
    QualityControl,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::InProduction => "in_production",
            Self::QualityControl => "quality_control",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }
}
