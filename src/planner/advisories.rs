//! Informational advisories selected from pace and weather thresholds.
//!
//! Advisories never change computed costs.

use serde::{Serialize, Serializer};

use crate::weather::{WeatherLookup, WeatherObservation};

/// Temperature at or above which the heat advisory fires
pub const HEAT_THRESHOLD_CELSIUS: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    PackedSchedule,
    RelaxedPace,
    Rain,
    Heat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

impl Severity {
    /// Wire name, also used as the CSS class on the plan page
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub severity: Severity,
    pub message: &'static str,
}

const PACKED_SCHEDULE: Advisory = Advisory {
    kind: AdvisoryKind::PackedSchedule,
    severity: Severity::Warning,
    message: "Packed itinerary selected. Expect higher fatigue and tighter schedules.",
};

const RELAXED_PACE: Advisory = Advisory {
    kind: AdvisoryKind::RelaxedPace,
    severity: Severity::Info,
    message: "Relaxed pace selected. Ideal for leisure-focused travel.",
};

const RAIN: Advisory = Advisory {
    kind: AdvisoryKind::Rain,
    severity: Severity::Warning,
    message: "Rain expected. Indoor attractions and buffer time recommended.",
};

const HEAT: Advisory = Advisory {
    kind: AdvisoryKind::Heat,
    severity: Severity::Warning,
    message: "High temperature. Plan outdoor activities early morning or evening.",
};

/// Pace 4 and up warns about a packed schedule, 2 and below notes a
/// relaxed pace, 3 says nothing.
pub fn pace_advisory(pace: u8) -> Option<Advisory> {
    match pace {
        p if p >= 4 => Some(PACKED_SCHEDULE),
        p if p <= 2 => Some(RELAXED_PACE),
        _ => None,
    }
}

/// Rain takes precedence over heat. No observation, no advisory.
pub fn weather_advisory(lookup: &WeatherLookup) -> Option<Advisory> {
    lookup.observation().and_then(observation_advisory)
}

fn observation_advisory(observation: &WeatherObservation) -> Option<Advisory> {
    if observation.description.to_lowercase().contains("rain") {
        Some(RAIN)
    } else if observation.temperature_celsius >= HEAT_THRESHOLD_CELSIUS {
        Some(HEAT)
    } else {
        None
    }
}
