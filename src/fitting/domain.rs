use serde::{Deserialize, Serialize};

/// The seven core body measurements used for garment fitting, in the order
/// the intake form presents them. All values are centimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementSet {
    pub bust: Option<f32>,
    pub underbust: Option<f32>,
    pub waist: Option<f32>,
    pub hips: Option<f32>,
    pub hollow_to_floor: Option<f32>,
    pub height: Option<f32>,
    pub preferred_heel: Option<f32>,
}

impl MeasurementSet {
    pub fn value(&self, field: MeasurementField) -> Option<f32> {
        match field {
            MeasurementField::Bust => self.bust,
            MeasurementField::Underbust => self.underbust,
            MeasurementField::Waist => self.waist,
            MeasurementField::Hips => self.hips,
            MeasurementField::HollowToFloor => self.hollow_to_floor,
            MeasurementField::Height => self.height,
            MeasurementField::PreferredHeel => self.preferred_heel,
        }
    }

    pub fn set(&mut self, field: MeasurementField, value: Option<f32>) {
        match field {
            MeasurementField::Bust => self.bust = value,
            MeasurementField::Underbust => self.underbust = value,
            MeasurementField::Waist => self.waist = value,
            MeasurementField::Hips => self.hips = value,
            MeasurementField::HollowToFloor => self.hollow_to_floor = value,
            MeasurementField::Height => self.height = value,
            MeasurementField::PreferredHeel => self.preferred_heel = value,
        }
    }

    /// Count of fields carrying a strictly positive value. Zero and negative
    /// entries count as "not provided", never as errors.
    pub fn provided_count(&self) -> usize {
        MeasurementField::ordered()
            .iter()
            .filter(|field| self.value(**field).map(|value| value > 0.0).unwrap_or(false))
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementField {
    Bust,
    Underbust,
    Waist,
    Hips,
    HollowToFloor,
    Height,
    PreferredHeel,
}

impl MeasurementField {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Bust,
            Self::Underbust,
            Self::Waist,
            Self::Hips,
            Self::HollowToFloor,
            Self::Height,
            Self::PreferredHeel,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bust => "Bust",
            Self::Underbust => "Underbust",
            Self::Waist => "Waist",
            Self::Hips => "Hips",
            Self::HollowToFloor => "Hollow to Floor",
            Self::Height => "Height",
            Self::PreferredHeel => "Preferred Heel Height",
        }
    }
}

/// Bra cup letter codes accepted on the body profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BraCup {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl BraCup {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
        }
    }
}

/// Supplementary body attributes. Used only to refine fit confidence, never
/// for pattern construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyProfile {
    /// Height in centimeters.
    pub height: Option<f32>,
    /// Weight in kilograms.
    pub weight: Option<f32>,
    /// Numeric band size, e.g. 32.
    pub bra_band: Option<u8>,
    pub bra_cup: Option<BraCup>,
}

impl BodyProfile {
    /// Both height and weight present with positive values.
    pub fn has_build_measurements(&self) -> bool {
        let positive = |value: Option<f32>| value.map(|v| v > 0.0).unwrap_or(false);
        positive(self.height) && positive(self.weight)
    }
}
