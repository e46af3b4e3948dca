//! Propellant records and the fixed catalog they are selected from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier for a catalog propellant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropellantId {
    Methalox,
    Hydrolox,
    Kerolox,
    Solid,
    Hypergolic,
}

/// Immutable propellant properties. Copied by value into engine configurations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propellant {
    pub id: PropellantId,
    pub name: &'static str,
    pub density_kg_m3: f64,
    pub ideal_temp_k: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropellantError {
    #[error("propellant '{0}' not found in catalog")]
    Unknown(String),
}

impl PropellantId {
    /// Every catalog entry, in display order.
    pub const ALL: [PropellantId; 5] = [
        PropellantId::Methalox,
        PropellantId::Hydrolox,
        PropellantId::Kerolox,
        PropellantId::Solid,
        PropellantId::Hypergolic,
    ];

    /// Full catalog record for this identifier.
    pub const fn propellant(self) -> Propellant {
        match self {
            PropellantId::Methalox => Propellant {
                id: self,
                name: "Liquid Methane/LOX",
                density_kg_m3: 422.0,
                ideal_temp_k: 111.0,
            },
            PropellantId::Hydrolox => Propellant {
                id: self,
                name: "Liquid Hydrogen/LOX",
                density_kg_m3: 70.0,
                ideal_temp_k: 20.0,
            },
            PropellantId::Kerolox => Propellant {
                id: self,
                name: "Kerosene (RP-1)/LOX",
                density_kg_m3: 820.0,
                ideal_temp_k: 298.0,
            },
            PropellantId::Solid => Propellant {
                id: self,
                name: "Solid Propellant",
                density_kg_m3: 1700.0,
                ideal_temp_k: 298.0,
            },
            PropellantId::Hypergolic => Propellant {
                id: self,
                name: "Hypergolic",
                density_kg_m3: 1200.0,
                ideal_temp_k: 298.0,
            },
        }
    }

    /// Key used in catalog files and on the command line.
    pub const fn key(self) -> &'static str {
        match self {
            PropellantId::Methalox => "methalox",
            PropellantId::Hydrolox => "hydrolox",
            PropellantId::Kerolox => "kerolox",
            PropellantId::Solid => "solid",
            PropellantId::Hypergolic => "hypergolic",
        }
    }
}

impl fmt::Display for PropellantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepts either the catalog key or the display name, case-insensitively.
impl FromStr for PropellantId {
    type Err = PropellantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PropellantId::ALL
            .into_iter()
            .find(|id| {
                id.key().eq_ignore_ascii_case(wanted)
                    || id.propellant().name.eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| PropellantError::Unknown(s.to_string()))
    }
}

impl Default for Propellant {
    fn default() -> Self {
        PropellantId::Kerolox.propellant()
    }
}

impl From<PropellantId> for Propellant {
    fn from(id: PropellantId) -> Self {
        id.propellant()
    }
}

/// Iterate over the full catalog.
pub fn catalog() -> impl Iterator<Item = Propellant> {
    PropellantId::ALL.into_iter().map(PropellantId::propellant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_carry_their_own_id() {
        for id in PropellantId::ALL {
            assert_eq!(id.propellant().id, id);
        }
    }

    #[test]
    fn parse_accepts_key_and_label() {
        assert_eq!("HYDROLOX".parse::<PropellantId>(), Ok(PropellantId::Hydrolox));
        assert_eq!(
            "kerosene (rp-1)/lox".parse::<PropellantId>(),
            Ok(PropellantId::Kerolox)
        );
        assert!("monoprop".parse::<PropellantId>().is_err());
    }
}
