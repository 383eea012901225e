//! Biome and relief rule databases.
//!
//! Rules are authored externally (RON) and resolved by priority: among all rules
//! whose inclusive ranges contain the sampled values, the highest priority wins
//! and ties keep the rule declared first.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("failed to read rule file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse rules: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("duplicate biome id {0}")]
    DuplicateBiomeId(u32),
    #[error("duplicate relief id {0}")]
    DuplicateReliefId(u32),
    #[error("rule `{rule}` has inverted {field} range {min}..={max}")]
    InvertedRange {
        rule: String,
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("biome database is empty")]
    EmptyBiomeDatabase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiomeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReliefId(pub u32);

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "biome#{}", self.0)
    }
}

impl fmt::Display for ReliefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relief#{}", self.0)
    }
}

/// Inclusive `[min, max]` interval over a normalized value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const FULL: ValueRange = ValueRange { min: 0.0, max: 1.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, rule: &str, field: &'static str) -> Result<(), RuleError> {
        if self.min > self.max || self.min.is_nan() || self.max.is_nan() {
            return Err(RuleError::InvertedRange {
                rule: rule.to_string(),
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::FULL
    }
}

fn default_true() -> bool {
    true
}

/// Terrain type painted on a cell, selected by temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeRule {
    pub id: BiomeId,
    pub name: String,
    #[serde(default)]
    pub is_water: bool,
    #[serde(default = "default_true")]
    pub is_passable: bool,
    #[serde(default)]
    pub elevation: ValueRange,
    #[serde(default)]
    pub temperature: ValueRange,
    #[serde(default)]
    pub priority: i32,
}

/// Terrain feature selected by height and temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliefRule {
    pub id: ReliefId,
    pub name: String,
    #[serde(default)]
    pub is_water: bool,
    /// Whether a biome may still be painted under this relief
    #[serde(default)]
    pub allows_biome: bool,
    /// Under override composition, relief replaces biome painting
    #[serde(default = "default_true")]
    pub overrides_biome: bool,
    #[serde(default)]
    pub height: ValueRange,
    #[serde(default)]
    pub temperature: ValueRange,
    #[serde(default)]
    pub priority: i32,
}

impl BiomeRule {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: BiomeId(id),
            name: name.into(),
            is_water: false,
            is_passable: true,
            elevation: ValueRange::FULL,
            temperature: ValueRange::FULL,
            priority: 0,
        }
    }

    pub fn water(mut self) -> Self {
        self.is_water = true;
        self.is_passable = false;
        self
    }

    pub fn with_temperature(mut self, min: f64, max: f64) -> Self {
        self.temperature = ValueRange::new(min, max);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ReliefRule {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ReliefId(id),
            name: name.into(),
            is_water: false,
            allows_biome: false,
            overrides_biome: true,
            height: ValueRange::FULL,
            temperature: ValueRange::FULL,
            priority: 0,
        }
    }

    pub fn water(mut self) -> Self {
        self.is_water = true;
        self
    }

    pub fn allowing_biome(mut self) -> Self {
        self.allows_biome = true;
        self.overrides_biome = false;
        self
    }

    pub fn with_height(mut self, min: f64, max: f64) -> Self {
        self.height = ValueRange::new(min, max);
        self
    }

    pub fn with_temperature(mut self, min: f64, max: f64) -> Self {
        self.temperature = ValueRange::new(min, max);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

pub trait PriorityRule {
    fn priority(&self) -> i32;
}

impl PriorityRule for BiomeRule {
    fn priority(&self) -> i32 {
        self.priority
    }
}

impl PriorityRule for ReliefRule {
    fn priority(&self) -> i32 {
        self.priority
    }
}

/// Highest-priority rule accepted by `matches`; ties keep the earliest rule
pub fn resolve_rule<'a, R, I, F>(rules: I, matches: F) -> Option<&'a R>
where
    R: PriorityRule + 'a,
    I: IntoIterator<Item = &'a R>,
    F: Fn(&R) -> bool,
{
    let mut chosen: Option<&'a R> = None;
    for rule in rules {
        if !matches(rule) {
            continue;
        }
        match chosen {
            Some(best) if best.priority() >= rule.priority() => {}
            _ => chosen = Some(rule),
        }
    }
    chosen
}

#[derive(Debug, Clone, Default)]
pub struct BiomeDatabase {
    biomes: Vec<BiomeRule>,
    lookup: HashMap<BiomeId, usize>,
    water: Option<usize>,
    land: Vec<usize>,
}

impl BiomeDatabase {
    pub fn new(biomes: Vec<BiomeRule>) -> Result<Self, RuleError> {
        if biomes.is_empty() {
            return Err(RuleError::EmptyBiomeDatabase);
        }

        let mut lookup = HashMap::with_capacity(biomes.len());
        let mut water = None;
        let mut land = Vec::new();

        for (index, biome) in biomes.iter().enumerate() {
            biome.elevation.check(&biome.name, "elevation")?;
            biome.temperature.check(&biome.name, "temperature")?;

            if lookup.insert(biome.id, index).is_some() {
                return Err(RuleError::DuplicateBiomeId(biome.id.0));
            }

            if biome.is_water {
                if water.is_none() {
                    water = Some(index);
                }
            } else {
                land.push(index);
            }
        }

        Ok(Self {
            biomes,
            lookup,
            water,
            land,
        })
    }

    pub fn get(&self, id: BiomeId) -> Option<&BiomeRule> {
        self.lookup.get(&id).map(|&index| &self.biomes[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BiomeRule> {
        self.biomes.iter()
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    /// First water biome in declaration order
    pub fn water_biome(&self) -> Option<&BiomeRule> {
        self.water.map(|index| &self.biomes[index])
    }

    pub fn land_biomes(&self) -> impl Iterator<Item = &BiomeRule> {
        self.land.iter().map(|&index| &self.biomes[index])
    }

    pub fn random_land_biome<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&BiomeRule> {
        if self.land.is_empty() {
            return None;
        }
        let index = self.land[rng.random_range(0..self.land.len())];
        Some(&self.biomes[index])
    }

    /// Base biome for a cell: land biomes only, matched on temperature
    pub fn select_base_biome(&self, temperature: f64) -> Option<&BiomeRule> {
        resolve_rule(self.land_biomes(), |biome| {
            biome.temperature.contains(temperature)
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReliefDatabase {
    reliefs: Vec<ReliefRule>,
    lookup: HashMap<ReliefId, usize>,
}

impl ReliefDatabase {
    pub fn new(reliefs: Vec<ReliefRule>) -> Result<Self, RuleError> {
        let mut lookup = HashMap::with_capacity(reliefs.len());
        for (index, relief) in reliefs.iter().enumerate() {
            relief.height.check(&relief.name, "height")?;
            relief.temperature.check(&relief.name, "temperature")?;

            if lookup.insert(relief.id, index).is_some() {
                return Err(RuleError::DuplicateReliefId(relief.id.0));
            }
        }
        Ok(Self { reliefs, lookup })
    }

    pub fn get(&self, id: ReliefId) -> Option<&ReliefRule> {
        self.lookup.get(&id).map(|&index| &self.reliefs[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReliefRule> {
        self.reliefs.iter()
    }

    pub fn len(&self) -> usize {
        self.reliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reliefs.is_empty()
    }

    /// Relief for a cell; water reliefs take part
    pub fn select(&self, height: f64, temperature: f64) -> Option<&ReliefRule> {
        resolve_rule(&self.reliefs, |relief| {
            relief.height.contains(height) && relief.temperature.contains(temperature)
        })
    }
}

/// On-disk layout of a rule file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleManifest {
    biomes: Vec<BiomeRule>,
    #[serde(default)]
    reliefs: Vec<ReliefRule>,
}

/// Both rule databases, resolved and ready for generation
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub biomes: BiomeDatabase,
    pub reliefs: ReliefDatabase,
}

const BUILTIN_RULES: &str = include_str!("../../assets/rules/default.ron");

impl RuleSet {
    pub fn new(biomes: Vec<BiomeRule>, reliefs: Vec<ReliefRule>) -> Result<Self, RuleError> {
        Ok(Self {
            biomes: BiomeDatabase::new(biomes)?,
            reliefs: ReliefDatabase::new(reliefs)?,
        })
    }

    pub fn from_ron_str(ron_str: &str) -> Result<Self, RuleError> {
        let manifest: RuleManifest = ron::from_str(ron_str)?;
        Self::new(manifest.biomes, manifest.reliefs)
    }

    pub fn from_path(path: &Path) -> Result<Self, RuleError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Rules shipped with the crate
    pub fn builtin() -> Result<Self, RuleError> {
        Self::from_ron_str(BUILTIN_RULES)
    }

    pub fn biome_name(&self, id: Option<BiomeId>) -> &str {
        id.and_then(|id| self.biomes.get(id))
            .map_or("None", |biome| biome.name.as_str())
    }

    pub fn relief_name(&self, id: Option<ReliefId>) -> &str {
        id.and_then(|id| self.reliefs.get(id))
            .map_or("None", |relief| relief.name.as_str())
    }
}
