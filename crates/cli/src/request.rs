//! Request and configuration files.

use std::path::Path;

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use u_palletize_core::{FluteKind, PalletSpec, ProductSpec, SearchConfig, SearchConstraints};

fn default_min_qty() -> u32 {
    10
}

fn default_max_qty() -> u32 {
    100
}

fn default_pallet() -> [u32; 3] {
    let p = PalletSpec::standard();
    [p.length, p.width, p.load_height]
}

fn default_rotation() -> bool {
    true
}

/// One search request, as read from a file or assembled from flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Product length, width and height in mm.
    pub dims: [u32; 3],

    /// Unit weight in grams.
    #[serde(default)]
    pub unit_weight_g: f64,

    /// Box weight ceiling in grams; 0 means unlimited.
    #[serde(default)]
    pub max_box_weight_g: f64,

    /// Corrugated board grade.
    #[serde(default)]
    pub material: FluteKind,

    /// Box margin in mm; the material's conventional margin when absent.
    #[serde(default)]
    pub margin: Option<u32>,

    /// Fewest units a box may hold.
    #[serde(default = "default_min_qty")]
    pub min_qty: u32,

    /// Most units a box may hold.
    #[serde(default = "default_max_qty")]
    pub max_qty: u32,

    /// Pallet length, width and load height in mm.
    #[serde(default = "default_pallet")]
    pub pallet: [u32; 3],

    /// Try every axis-permutation of the product, not just the entered one.
    #[serde(default = "default_rotation")]
    pub allow_rotation: bool,
}

impl SearchRequest {
    /// Creates a request with default limits for a product.
    pub fn new(dims: [u32; 3], unit_weight_g: f64) -> Self {
        Self {
            dims,
            unit_weight_g,
            max_box_weight_g: 0.0,
            material: FluteKind::default(),
            margin: None,
            min_qty: default_min_qty(),
            max_qty: default_max_qty(),
            pallet: default_pallet(),
            allow_rotation: default_rotation(),
        }
    }

    /// Reads a request from a TOML or JSON file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        read_by_extension(path).with_context(|| format!("invalid request file {}", path.display()))
    }

    /// The product to pack.
    pub fn product(&self) -> ProductSpec {
        let [l, w, h] = self.dims;
        ProductSpec::new(l, w, h, self.unit_weight_g)
    }

    /// The target pallet.
    pub fn pallet(&self) -> PalletSpec {
        let [l, w, h] = self.pallet;
        PalletSpec::new(l, w, h)
    }

    /// Search constraints; an absent margin falls back to the material's.
    pub fn constraints(&self) -> SearchConstraints {
        let constraints = SearchConstraints::new(self.material)
            .with_quantity_range(self.min_qty, self.max_qty)
            .with_max_box_weight(self.max_box_weight_g)
            .with_rotation(self.allow_rotation);
        match self.margin {
            Some(margin) => constraints.with_margin(margin),
            None => constraints,
        }
    }
}

/// Reads heuristic overrides; absent keys keep their defaults.
pub fn load_config(path: &Path) -> anyhow::Result<SearchConfig> {
    let config: SearchConfig =
        read_by_extension(path).with_context(|| format!("invalid config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn read_by_extension<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("toml") => Ok(toml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => bail!("unsupported file type, expected .toml or .json"),
    }
}
