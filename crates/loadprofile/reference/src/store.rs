//! Snapshot store — immutable reference data with atomic swap-on-reload.

use crate::error::ReferenceError;
use crate::model::{
    CalculationConstant, ContributorRule, IndustryProfile, SizeTierBand, SubIndustryMultiplier,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Read-only lookup interface over reference data.
///
/// Every lookup returns `Option` when data is absent, pushing the
/// fail-vs-default decision to the calculator.
pub trait ReferenceStore {
    fn industry_profile(&self, industry: &str) -> Option<&IndustryProfile>;

    fn sub_industry_multiplier(
        &self,
        industry: &str,
        sub_industry: &str,
    ) -> Option<&SubIndustryMultiplier>;

    /// The band containing `value`, if any. Gap handling is the resolver's
    /// job; see [`ReferenceStore::tier_bands`].
    fn size_tier(&self, industry: &str, value: f64) -> Option<&SizeTierBand> {
        self.tier_bands(industry).iter().find(|b| b.contains(value))
    }

    /// All bands for the industry, sorted ascending by `min_value`.
    fn tier_bands(&self, industry: &str) -> &[SizeTierBand];

    fn constant(&self, key: &str) -> Option<f64>;

    fn contributor_rules(&self, industry: &str) -> &[ContributorRule];
}

/// Wire shape of a full reference data set, as authored upstream.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub industry_profiles: Vec<IndustryProfile>,
    #[serde(default)]
    pub sub_industry_multipliers: Vec<SubIndustryMultiplier>,
    #[serde(default)]
    pub size_tier_bands: Vec<SizeTierBand>,
    #[serde(default)]
    pub constants: Vec<CalculationConstant>,
    /// Per-industry declarative contributor rules
    #[serde(default)]
    pub contributor_rules: BTreeMap<String, Vec<ContributorRule>>,
}

/// An immutable, indexed snapshot of the full reference data set.
///
/// Shared by `Arc` across concurrent calculations; no calculation mutates it.
#[derive(Debug, Default)]
pub struct ReferenceSnapshot {
    profiles: BTreeMap<String, IndustryProfile>,
    multipliers: BTreeMap<(String, String), SubIndustryMultiplier>,
    bands: BTreeMap<String, Vec<SizeTierBand>>,
    constants: BTreeMap<String, f64>,
    rules: BTreeMap<String, Vec<ContributorRule>>,
}

impl ReferenceSnapshot {
    /// Index and validate a reference data set.
    ///
    /// Overlapping tier bands and non-positive multipliers are configuration
    /// defects and fail the load. Gaps between bands are tolerated (the
    /// resolver bridges them per request) but logged.
    pub fn from_data(data: ReferenceData) -> Result<Self, ReferenceError> {
        let mut bands: BTreeMap<String, Vec<SizeTierBand>> = BTreeMap::new();
        for band in data.size_tier_bands {
            bands.entry(band.industry.clone()).or_default().push(band);
        }
        for (industry, industry_bands) in &mut bands {
            industry_bands.sort_by(|a, b| a.min_value.total_cmp(&b.min_value));
            Self::verify_bands(industry, industry_bands)?;
        }

        let mut multipliers = BTreeMap::new();
        for m in data.sub_industry_multipliers {
            if m.load_multiplier <= 0.0 || m.backup_multiplier <= 0.0 {
                return Err(ReferenceError::InvalidMultiplier {
                    industry: m.industry,
                    sub_industry: m.sub_industry,
                    message: "multipliers must be positive".into(),
                });
            }
            multipliers.insert((m.industry.clone(), m.sub_industry.clone()), m);
        }

        Ok(Self {
            profiles: data
                .industry_profiles
                .into_iter()
                .map(|p| (p.industry.clone(), p))
                .collect(),
            multipliers,
            bands,
            constants: data
                .constants
                .into_iter()
                .map(|c| (c.key, c.numeric_value))
                .collect(),
            rules: data.contributor_rules,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        let data: ReferenceData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Bands must not overlap; malformed min/max is equally fatal.
    fn verify_bands(industry: &str, bands: &[SizeTierBand]) -> Result<(), ReferenceError> {
        for band in bands {
            if band.max_value < band.min_value {
                return Err(ReferenceError::MalformedTierBands {
                    industry: industry.to_string(),
                    message: format!(
                        "band {} has max {} below min {}",
                        band.tier, band.max_value, band.min_value
                    ),
                });
            }
        }
        for pair in bands.windows(2) {
            if pair[1].min_value <= pair[0].max_value {
                return Err(ReferenceError::MalformedTierBands {
                    industry: industry.to_string(),
                    message: format!(
                        "bands {} and {} overlap around {}",
                        pair[0].tier, pair[1].tier, pair[1].min_value
                    ),
                });
            }
            // A gap is survivable: the resolver selects the nearest band and
            // emits a tier_range_gap event.
            if pair[1].min_value - pair[0].max_value > 1.0 {
                tracing::warn!(
                    industry,
                    below = %pair[0].tier,
                    above = %pair[1].tier,
                    "gap between size tier bands"
                );
            }
        }
        Ok(())
    }
}

impl ReferenceStore for ReferenceSnapshot {
    fn industry_profile(&self, industry: &str) -> Option<&IndustryProfile> {
        self.profiles.get(industry)
    }

    fn sub_industry_multiplier(
        &self,
        industry: &str,
        sub_industry: &str,
    ) -> Option<&SubIndustryMultiplier> {
        self.multipliers
            .get(&(industry.to_string(), sub_industry.to_string()))
    }

    fn tier_bands(&self, industry: &str) -> &[SizeTierBand] {
        self.bands.get(industry).map(Vec::as_slice).unwrap_or(&[])
    }

    fn constant(&self, key: &str) -> Option<f64> {
        self.constants.get(key).copied()
    }

    fn contributor_rules(&self, industry: &str) -> &[ContributorRule] {
        self.rules.get(industry).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Process-wide holder for the current snapshot.
///
/// Readers clone the `Arc` under a short read lock and keep using their
/// snapshot for the whole calculation; `reload` swaps the `Arc` atomically,
/// never mutating entries in place.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<ReferenceSnapshot>>,
}

impl SnapshotStore {
    pub fn new(snapshot: ReferenceSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn current(&self) -> Result<Arc<ReferenceSnapshot>, ReferenceError> {
        let guard = self.current.read().map_err(|_| ReferenceError::Lock)?;
        Ok(Arc::clone(&guard))
    }

    pub fn reload(&self, snapshot: ReferenceSnapshot) -> Result<(), ReferenceError> {
        let mut guard = self.current.write().map_err(|_| ReferenceError::Lock)?;
        *guard = Arc::new(snapshot);
        tracing::debug!("reference snapshot reloaded");
        Ok(())
    }
}
