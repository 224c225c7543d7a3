//! Static service/tier/price catalog.
//!
//! The catalog is hand-authored, embedded data: a declaration-ordered list of
//! services, each with its pricing tiers and bundle-discount partners. Lookup
//! is case-insensitive on the service name. Declaration order is significant:
//! tier-based rules pick the first qualifying tier, and switch suggestions fan
//! out across services in the order they were declared.
//!
//! # Example
//!
//! ```rust,ignore
//! use subtrack::catalog::ServiceCatalog;
//!
//! let catalog = ServiceCatalog::builder()
//!     .service("Netflix")
//!         .tier("Mobile", 99.0, Some("480p"), Some(1))
//!         .tier("Premium", 299.0, Some("4K"), Some(4))
//!         .done()
//!     .build();
//!
//! let entry = catalog.get("netflix").unwrap();
//! assert_eq!(entry.tiers.len(), 2);
//! ```

pub mod directory;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tier resolution string that satisfies the heavy-viewing requirement.
pub const FULL_HD: &str = "1080p";

/// Name of the top tier the upgrade rule targets.
pub const PREMIUM_TIER: &str = "Premium";

/// A named pricing/feature level within a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTier {
    pub name: String,
    /// Monthly price in the local currency.
    pub price: f64,
    /// Maximum playback resolution, where the service defines one.
    pub resolution: Option<String>,
    /// Simultaneous screens allowed. Tiers without a screen count never
    /// qualify as downgrade candidates.
    pub max_screens: Option<u32>,
}

/// Percentage discount offered when the user also subscribes to a partner
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleDiscount {
    /// Case-folded key of the partner service.
    pub partner: String,
    /// Discount as a percentage (0–100).
    pub percent: f64,
}

/// Catalog entry for a single service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Display name of the service.
    pub name: String,
    /// Pricing tiers in declaration order, one entry per tier name.
    pub tiers: Vec<PlanTier>,
    pub bundle_discounts: Vec<BundleDiscount>,
}

impl ServiceEntry {
    /// Look up a tier by exact name.
    #[must_use]
    pub fn tier(&self, name: &str) -> Option<&PlanTier> {
        self.tiers.iter().find(|t| t.name == name)
    }

    /// The cheapest tier (first declared wins a price tie).
    #[must_use]
    pub fn cheapest_tier(&self) -> Option<&PlanTier> {
        self.tiers
            .iter()
            .fold(None::<&PlanTier>, |best, t| match best {
                Some(b) if b.price <= t.price => Some(b),
                _ => Some(t),
            })
    }
}

/// Declaration-ordered collection of service entries with case-insensitive
/// lookup.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    entries: Vec<ServiceEntry>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> ServiceCatalogBuilder {
        ServiceCatalogBuilder::new()
    }

    /// Normalized lookup key for a service name.
    #[must_use]
    pub fn key_for(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Get a service entry by name, case-insensitively.
    #[must_use]
    pub fn get(&self, service_name: &str) -> Option<&ServiceEntry> {
        self.index
            .get(&Self::key_for(service_name))
            .map(|&i| &self.entries[i])
    }

    /// Check whether a service is in the catalog.
    #[must_use]
    pub fn contains(&self, service_name: &str) -> bool {
        self.index.contains_key(&Self::key_for(service_name))
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry, replacing any existing entry with the same key.
    pub fn add(&mut self, entry: ServiceEntry) {
        let key = Self::key_for(&entry.name);
        match self.index.get(&key) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// The built-in catalog: South African streaming, music, and video
    /// services with Rand pricing.
    #[must_use]
    pub fn default_za() -> Self {
        Self::builder()
            .service("Netflix")
            .tier("Mobile", 99.0, Some("480p"), Some(1))
            .tier("Basic", 139.0, Some("720p"), Some(1))
            .tier("Standard", 199.0, Some(FULL_HD), Some(2))
            .tier("Premium", 299.0, Some("4K"), Some(4))
            .done()
            .service("Showmax")
            .tier("Mobile", 39.0, Some("480p"), Some(1))
            .tier("Standard", 99.0, Some(FULL_HD), Some(2))
            .bundle("DStv", 20.0)
            .done()
            .service("DStv")
            .tier("Access", 120.0, Some(FULL_HD), Some(1))
            .tier("Compact", 449.0, Some(FULL_HD), Some(1))
            .tier("Premium", 929.0, Some(FULL_HD), Some(2))
            .bundle("Showmax", 15.0)
            .done()
            .service("Amazon Prime Video")
            .tier("Standard", 79.0, Some(FULL_HD), Some(3))
            .done()
            .service("Disney+")
            .tier("Mobile", 59.0, Some("720p"), Some(1))
            .tier("Standard", 119.0, Some(FULL_HD), Some(2))
            .done()
            .service("Spotify")
            .tier("Individual", 64.99, None, None)
            .tier("Duo", 84.99, None, None)
            .tier("Family", 109.99, None, None)
            .done()
            .service("YouTube Premium")
            .tier("Individual", 71.99, None, None)
            .tier("Family", 109.99, None, None)
            .done()
            .build()
    }
}

/// Builder for a [`ServiceCatalog`].
#[derive(Debug, Default)]
#[must_use = "builder does nothing until you call build()"]
pub struct ServiceCatalogBuilder {
    catalog: ServiceCatalog,
}

impl ServiceCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring a new service.
    pub fn service(self, name: &str) -> ServiceEntryBuilder {
        ServiceEntryBuilder {
            parent: self,
            entry: ServiceEntry {
                name: name.to_string(),
                tiers: Vec::new(),
                bundle_discounts: Vec::new(),
            },
        }
    }

    pub fn build(self) -> ServiceCatalog {
        self.catalog
    }
}

/// Builder for a single [`ServiceEntry`].
#[derive(Debug)]
#[must_use = "call done() to add the service to the catalog"]
pub struct ServiceEntryBuilder {
    parent: ServiceCatalogBuilder,
    entry: ServiceEntry,
}

impl ServiceEntryBuilder {
    /// Declare a tier. Declaration order matters for rule evaluation.
    pub fn tier(
        mut self,
        name: &str,
        price: f64,
        resolution: Option<&str>,
        max_screens: Option<u32>,
    ) -> Self {
        self.entry.tiers.push(PlanTier {
            name: name.to_string(),
            price,
            resolution: resolution.map(str::to_string),
            max_screens,
        });
        self
    }

    /// Declare a bundle discount keyed to a partner service.
    pub fn bundle(mut self, partner: &str, percent: f64) -> Self {
        self.entry.bundle_discounts.push(BundleDiscount {
            partner: ServiceCatalog::key_for(partner),
            percent,
        });
        self
    }

    /// Finish this service and return to the catalog builder.
    pub fn done(self) -> ServiceCatalogBuilder {
        let mut parent = self.parent;
        parent.catalog.add(self.entry);
        parent
    }
}
