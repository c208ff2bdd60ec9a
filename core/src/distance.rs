use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::SessionRecord;

pub const DEFAULT_RUN_SPEED_KMH: f64 = 12.0; // 200 m/min
pub const DEFAULT_WALK_SPEED_M_PER_MIN: f64 = 100.0; // 6 km/h

// Fallbacks når tempo mangler / er 0
pub const FALLBACK_RUN_SPEED_KMH: f64 = 8.0; // 7'30'' per km
pub const FALLBACK_WALK_SPEED_M_PER_MIN: f64 = 90.0; // ca 5.4 km/h

// Dashboardets standardtempo
pub const DEFAULT_RUN_PACE: f64 = 7.5; // min/km

pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

#[inline]
pub fn kmh_to_m_per_min(kmh: f64) -> f64 {
    kmh * 1000.0 / 60.0
}

/// Hastighetsmodell for løpedelen.
///
/// `FatigueBands4Tier` (analyseskriptet) og `FatigueBands5Tier` (dashboardet)
/// beskriver samme fenomen med ulike terskler; begge beholdes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceModel {
    #[default]
    ConstantSpeed,
    #[serde(rename = "fatigue_bands_4_tier")]
    FatigueBands4Tier,
    #[serde(rename = "fatigue_bands_5_tier")]
    FatigueBands5Tier,
}

impl DistanceModel {
    /// Reduksjonsfaktor som funksjon av *ett* løpeintervall (ikke total løpetid).
    pub fn reduction_factor(&self, interval_run_minutes: f64) -> f64 {
        let m = interval_run_minutes;
        match self {
            DistanceModel::ConstantSpeed => 1.0,
            DistanceModel::FatigueBands4Tier => match m {
                m if m <= 1.0 => 1.0,
                m if m <= 2.5 => 0.9,
                m if m <= 4.0 => 0.81,  // 0.9²
                _ => 0.729,             // 0.9³
            },
            DistanceModel::FatigueBands5Tier => match m {
                m if m <= 1.0 => 1.0,
                m if m <= 2.5 => 0.9,
                m if m <= 5.0 => 0.8,
                m if m <= 10.0 => 0.75,
                _ => 0.7,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceModel::ConstantSpeed => "constant_speed",
            DistanceModel::FatigueBands4Tier => "fatigue_bands_4_tier",
            DistanceModel::FatigueBands5Tier => "fatigue_bands_5_tier",
        }
    }
}

impl std::str::FromStr for DistanceModel {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "constant" | "constant_speed" => Ok(DistanceModel::ConstantSpeed),
            "fatigue4" | "4tier" | "fatigue_bands_4_tier" => Ok(DistanceModel::FatigueBands4Tier),
            "fatigue5" | "5tier" | "fatigue_bands_5_tier" => Ok(DistanceModel::FatigueBands5Tier),
            other => Err(PlanError::invalid("distance_model", format!("unknown model '{other}'"))),
        }
    }
}

/// Fart-innstillinger (fra tempo-kalkulatoren eller standard 12 km/t / 100 m/min).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceSettings {
    pub run_speed_kmh: f64,
    pub walk_speed_m_per_min: f64,
    /// Fast tempo: ingen tretthetsjustering uansett modell.
    #[serde(default)]
    pub fixed_pace: bool,
}

impl Default for PaceSettings {
    fn default() -> Self {
        Self {
            run_speed_kmh: DEFAULT_RUN_SPEED_KMH,
            walk_speed_m_per_min: DEFAULT_WALK_SPEED_M_PER_MIN,
            fixed_pace: false,
        }
    }
}

impl PaceSettings {
    /// Fra tempo-kalkulatoren (min/km). Tempo som ikke er oppgitt beholder
    /// standardfarten, så gåfarten er 100 m/min med mindre gåtempo er satt.
    pub fn from_paces(run_pace: Option<f64>, walk_pace: Option<f64>, fixed_pace: bool) -> Self {
        Self {
            run_speed_kmh: run_pace.map_or(DEFAULT_RUN_SPEED_KMH, pace_to_speed_kmh),
            walk_speed_m_per_min: walk_pace.map_or(DEFAULT_WALK_SPEED_M_PER_MIN, walk_pace_to_m_per_min),
            fixed_pace,
        }
    }

    /// Dashboardets standard: 7'30'' løp, 100 m/min gange, fast tempo på.
    pub fn dashboard_default() -> Self {
        Self::from_paces(Some(DEFAULT_RUN_PACE), None, true)
    }
}

/// min/km → km/t. Tempo ≤ 0 (eller NaN) gir 8 km/t.
pub fn pace_to_speed_kmh(pace_min_per_km: f64) -> f64 {
    if pace_min_per_km.is_finite() && pace_min_per_km > 0.0 {
        60.0 / pace_min_per_km
    } else {
        FALLBACK_RUN_SPEED_KMH
    }
}

/// Gåtempo min/km → m/min. Tempo ≤ 0 gir 90 m/min.
pub fn walk_pace_to_m_per_min(pace_min_per_km: f64) -> f64 {
    if pace_min_per_km.is_finite() && pace_min_per_km > 0.0 {
        kmh_to_m_per_min(60.0 / pace_min_per_km)
    } else {
        FALLBACK_WALK_SPEED_M_PER_MIN
    }
}

/// km/t → min/km. None når farten er 0.
pub fn speed_kmh_to_pace(speed_kmh: f64) -> Option<f64> {
    if speed_kmh.is_finite() && speed_kmh > 0.0 {
        Some(60.0 / speed_kmh)
    } else {
        None
    }
}

/// Rundetid på 400 m bane, (min, sek).
pub fn lap_time_400m(pace_min_per_km: f64) -> (u32, u32) {
    let pace = if pace_min_per_km.is_finite() { pace_min_per_km.max(0.0) } else { 0.0 };
    let secs = (pace * 0.4 * 60.0).round() as u32;
    (secs / 60, secs % 60)
}

/// Tolker "6:30" (min:sek) eller "6.5" som min/km.
pub fn parse_pace(input: &str) -> Result<f64> {
    let s = input.trim().trim_end_matches("/km").trim();
    let s = s.replace('\'', ":").replace("::", ":");
    let s = s.trim_end_matches(':');
    let bad = || PlanError::invalid("pace", format!("'{}' is not a pace (use M:SS or decimal minutes)", input.trim()));

    let pace = match s.split_once(':') {
        Some((m, sec)) => {
            let m: u32 = m.trim().parse().map_err(|_| bad())?;
            let sec: u32 = sec.trim().parse().map_err(|_| bad())?;
            if sec >= 60 {
                return Err(bad());
            }
            m as f64 + sec as f64 / 60.0
        }
        None => s.parse::<f64>().map_err(|_| bad())?,
    };

    if !pace.is_finite() || pace <= 0.0 {
        return Err(bad());
    }
    Ok(pace)
}

/// Distanse for én økt under en gitt modell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionDistance {
    pub session_index: u32,
    pub adjusted_speed_kmh: f64,
    pub adjusted_speed_m_per_min: f64,
    pub run_distance_m: f64,
    pub walk_distance_m: f64,
    pub total_distance_m: f64,
}

impl SessionDistance {
    pub fn run_distance_km(&self) -> f64 {
        self.run_distance_m / 1000.0
    }

    pub fn walk_distance_km(&self) -> f64 {
        self.walk_distance_m / 1000.0
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_m / 1000.0
    }
}

pub fn adjusted_speed_kmh(model: DistanceModel, settings: &PaceSettings, interval_run_minutes: f64) -> f64 {
    let factor = if settings.fixed_pace {
        1.0
    } else {
        model.reduction_factor(interval_run_minutes)
    };
    settings.run_speed_kmh * factor
}

pub fn session_distance(
    record: &SessionRecord,
    model: DistanceModel,
    settings: &PaceSettings,
) -> SessionDistance {
    let speed_kmh = adjusted_speed_kmh(model, settings, record.run_minutes);
    let speed_m_per_min = kmh_to_m_per_min(speed_kmh);

    let run_distance_m = record.total_run_time * speed_m_per_min;
    let walk_distance_m = record.total_walk_time() * settings.walk_speed_m_per_min;

    SessionDistance {
        session_index: record.session_index,
        adjusted_speed_kmh: speed_kmh,
        adjusted_speed_m_per_min: speed_m_per_min,
        run_distance_m,
        walk_distance_m,
        total_distance_m: run_distance_m + walk_distance_m,
    }
}

pub fn compute_distances(
    sessions: &[SessionRecord],
    model: DistanceModel,
    settings: &PaceSettings,
) -> Vec<SessionDistance> {
    sessions
        .iter()
        .map(|s| session_distance(s, model, settings))
        .collect()
}
