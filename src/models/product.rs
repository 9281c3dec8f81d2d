//! Retrieval product and layout definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoeffError;

/// A physical quantity estimated by a statistical retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    /// Liquid water path.
    Lwp,
    /// Integrated water vapour.
    Iwv,
    /// Temperature profile from zenith observations.
    Tpt,
    /// Temperature profile from boundary-layer elevation scans.
    Tpb,
    /// Absolute humidity profile from zenith observations.
    Hpt,
}

/// How the stored networks of a product are arranged into output arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalLayout {
    /// One single-output network per elevation angle, stacked along a
    /// trailing configuration axis.
    ElevationStack,
    /// One multi-output network observing at a single elevation angle.
    ZenithProfile,
    /// One multi-output network fed by every angle of an elevation scan.
    ScanProfile,
}

impl Product {
    /// All supported products, in catalog order.
    pub const ALL: [Product; 5] = [
        Product::Lwp,
        Product::Iwv,
        Product::Tpt,
        Product::Tpb,
        Product::Hpt,
    ];

    /// The product key used in site configuration and by callers.
    pub fn key(&self) -> &'static str {
        match self {
            Product::Lwp => "lwp",
            Product::Iwv => "iwv",
            Product::Tpt => "tpt",
            Product::Tpb => "tpb",
            Product::Hpt => "hpt",
        }
    }

    /// The layout the product's coefficient files are stacked into.
    pub fn layout(&self) -> RetrievalLayout {
        match self {
            Product::Lwp | Product::Iwv => RetrievalLayout::ElevationStack,
            Product::Tpt | Product::Hpt => RetrievalLayout::ZenithProfile,
            Product::Tpb => RetrievalLayout::ScanProfile,
        }
    }
}

impl RetrievalLayout {
    /// Whether the networks retrieve a vertical profile on an `AL` height grid.
    pub fn is_profile(&self) -> bool {
        !matches!(self, RetrievalLayout::ElevationStack)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Product {
    type Err = CoeffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Product::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| CoeffError::UnknownProduct {
                product: s.to_string(),
            })
    }
}
