// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sellable goods and services.

use crate::error::DomainError;
use crate::money::Money;
use crate::relevance::ValidityWindow;
use crate::validation::{require_positive, require_text};
use std::str::FromStr;
use time::Date;

/// Whether a catalog entry is a physical good or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Goods,
    Service,
}

impl CatalogKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Goods => "goods",
            Self::Service => "service",
        }
    }

    /// Name of the request field that lists items of this kind.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Goods => "goods",
            Self::Service => "services",
        }
    }
}

impl FromStr for CatalogKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goods" => Ok(Self::Goods),
            "service" => Ok(Self::Service),
            _ => Err(DomainError::InvalidChoice {
                field: "kind",
                value: s.to_string(),
            }),
        }
    }
}

/// A priced catalog entry offered during its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: Option<i64>,
    pub kind: CatalogKind,
    pub name: String,
    pub price: Money,
    pub window: ValidityWindow,
}

impl CatalogItem {
    /// # Errors
    ///
    /// Returns an error if the name is blank or the price is not positive.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)?;
        require_positive("price", self.price)
    }

    #[must_use]
    pub fn is_relevant(&self, today: Date) -> bool {
        self.window.is_relevant(today)
    }
}

/// Price statistics over one catalog kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStatistics {
    pub total: u64,
    pub relevant: u64,
    pub total_price: Money,
    /// Mean price rounded half-up to a minor unit; `None` for an empty catalog.
    pub average_price: Option<Money>,
    pub max_price: Option<Money>,
    pub min_price: Option<Money>,
}

/// Computes price statistics for a set of items.
#[must_use]
pub fn catalog_statistics(items: &[CatalogItem], today: Date) -> CatalogStatistics {
    let total: u64 = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let total_price: Money = items.iter().map(|i| i.price).sum();
    let average_price: Option<Money> = i64::try_from(items.len())
        .ok()
        .filter(|count| *count > 0)
        .map(|count| {
            let minor: i64 = total_price.minor();
            Money::from_minor((minor * 2 + count) / (count * 2))
        });

    CatalogStatistics {
        total,
        relevant: u64::try_from(items.iter().filter(|i| i.is_relevant(today)).count())
            .unwrap_or(u64::MAX),
        total_price,
        average_price,
        max_price: items.iter().map(|i| i.price).max(),
        min_price: items.iter().map(|i| i.price).min(),
    }
}
