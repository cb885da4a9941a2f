//! Zones and the request payload that carries them.

use std::collections::HashSet;

use crate::error::{DetectError, Result};
use crate::region::Region;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named rectangle to evaluate independently.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Zone {
    pub name: String,
    pub region: Region,
    /// Per-zone override of the minimum contour area.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub min_area: Option<f64>,
}

impl Zone {
    pub fn new(name: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            region,
            min_area: None,
        }
    }

    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = Some(min_area);
        self
    }
}

/// One inspection request: a reference region, optional request-level
/// minimum area, and the ordered zone list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectRequest {
    #[cfg_attr(feature = "serde", serde(rename = "ref", alias = "reference"))]
    pub reference: Region,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub min_area: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zones: Vec<Zone>,
}

impl DetectRequest {
    pub fn new(reference: Region) -> Self {
        Self {
            reference,
            min_area: None,
            zones: Vec::new(),
        }
    }

    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = Some(min_area);
        self
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    /// Check names and areas. Regions are checked later against the image.
    pub fn validate(&self) -> Result<()> {
        if let Some(v) = self.min_area {
            check_min_area("request", v)?;
        }
        let mut seen = HashSet::with_capacity(self.zones.len());
        for (index, zone) in self.zones.iter().enumerate() {
            if zone.name.is_empty() {
                return Err(DetectError::EmptyZoneName { index });
            }
            if !seen.insert(zone.name.as_str()) {
                return Err(DetectError::DuplicateZoneName {
                    name: zone.name.clone(),
                });
            }
            if let Some(v) = zone.min_area {
                check_min_area(&format!("zone '{}'", zone.name), v)?;
            }
        }
        Ok(())
    }
}

fn check_min_area(scope: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DetectError::InvalidMinArea {
            scope: scope.to_string(),
            value,
        })
    }
}

/// Effective minimum area: zone value, else request value, else `default`.
#[inline]
pub fn resolve_min_area(zone: Option<f64>, request: Option<f64>, default: f64) -> f64 {
    zone.or(request).unwrap_or(default)
}
