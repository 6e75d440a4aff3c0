//! Transmission schemes and the name registry that resolves them

use super::line_coding::LineCoding;
use crate::error::{PhyError, Result};
use crate::modulation::Modulation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Either a baseband line code or a carrier modulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Scheme {
    Line(LineCoding),
    Carrier(Modulation),
}

impl Scheme {
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Line(coding) => coding.name(),
            Scheme::Carrier(modulation) => modulation.name(),
        }
    }

    pub fn is_baseband(&self) -> bool {
        matches!(self, Scheme::Line(_))
    }

    /// Every built-in scheme, line codes first.
    pub fn all() -> impl Iterator<Item = Scheme> {
        LineCoding::ALL
            .into_iter()
            .map(Scheme::Line)
            .chain(Modulation::ALL.into_iter().map(Scheme::Carrier))
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Scheme> for String {
    fn from(scheme: Scheme) -> Self {
        scheme.name().to_string()
    }
}

impl TryFrom<String> for Scheme {
    type Error = PhyError;

    fn try_from(name: String) -> Result<Self> {
        SchemeRegistry::builtin().resolve(&name)
    }
}

impl std::str::FromStr for Scheme {
    type Err = PhyError;

    fn from_str(name: &str) -> Result<Self> {
        SchemeRegistry::builtin().resolve(name)
    }
}

/// Name -> scheme table, owned by whoever needs to resolve names.
///
/// Lookups are case-insensitive and treat `-` and `_` alike.
#[derive(Clone, Debug)]
pub struct SchemeRegistry {
    entries: BTreeMap<String, Scheme>,
}

impl SchemeRegistry {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry with every built-in scheme under its canonical name plus
    /// a few common aliases.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for scheme in Scheme::all() {
            registry.register(scheme.name(), scheme);
        }
        registry.register("nrz", Scheme::Line(LineCoding::NrzPolar));
        registry.register("ami", Scheme::Line(LineCoding::Bipolar));
        registry.register("qam16", Scheme::Carrier(Modulation::Qam16));
        registry
    }

    pub fn register(&mut self, name: &str, scheme: Scheme) {
        self.entries.insert(normalize_name(name), scheme);
    }

    pub fn resolve(&self, name: &str) -> Result<Scheme> {
        self.entries
            .get(&normalize_name(name))
            .copied()
            .ok_or_else(|| PhyError::UnknownScheme(name.to_string()))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}
