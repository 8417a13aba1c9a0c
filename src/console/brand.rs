//! Brands to audit

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};
use crate::utils::is_slug_shaped;

/// A brand as shown in the console dropdown, plus the slug used in its
/// public storefront host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandTarget {
    pub name: String,
    pub slug: String,
}

impl BrandTarget {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> AuditResult<Self> {
        let target = Self {
            name: name.into().trim().to_string(),
            slug: slug.into().trim().to_string(),
        };
        target.validate()?;
        Ok(target)
    }

    fn validate(&self) -> AuditResult<()> {
        if self.name.is_empty() {
            return Err(AuditError::Config("brand name must not be empty".to_string()));
        }
        if !is_slug_shaped(&self.slug) {
            return Err(AuditError::Config(format!(
                "brand slug '{}' must be lowercase letters, digits and hyphens",
                self.slug
            )));
        }
        Ok(())
    }
}

/// Parses `NAME=SLUG`. The slug is taken after the last `=`.
impl FromStr for BrandTarget {
    type Err = AuditError;

    fn from_str(s: &str) -> AuditResult<Self> {
        let (name, slug) = s.rsplit_once('=').ok_or_else(|| {
            AuditError::Config(format!("brand '{s}' must be written as NAME=SLUG"))
        })?;
        Self::new(name, slug)
    }
}

/// Load a JSON array of `{ "name": ..., "slug": ... }` objects.
pub async fn load_brands(path: impl AsRef<Path>) -> AuditResult<Vec<BrandTarget>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AuditError::Config(format!("cannot read brands file {}: {e}", path.display()))
    })?;
    let brands: Vec<BrandTarget> = serde_json::from_str(&raw)?;
    brands
        .into_iter()
        .map(|brand| BrandTarget::new(brand.name, brand.slug))
        .collect()
}
