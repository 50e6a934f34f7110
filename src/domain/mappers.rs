// src/domain/mappers.rs

use std::collections::HashSet;
use thiserror::Error;

/// Hidden column carrying the remote identifier of a search definition.
pub const ID_COLUMN: &str = "_id";

/// A fixed two-way mapping between `left` and `right` values.
///
/// Both directions are only meaningful when the table is injective, which
/// `validate` checks once at startup.
#[derive(Debug)]
pub struct LookupTable {
    name: &'static str,
    pairs: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Error, PartialEq)]
pub enum MappingError {
    #[error("lookup table '{table}' maps several entries to '{value}'")]
    NotInjective { table: &'static str, value: &'static str },
}

impl LookupTable {
    pub const fn new(name: &'static str, pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, pairs }
    }

    pub fn validate(&self) -> Result<(), MappingError> {
        let mut lefts = HashSet::new();
        let mut rights = HashSet::new();

        for (left, right) in self.pairs {
            if !lefts.insert(*left) {
                return Err(MappingError::NotInjective {
                    table: self.name,
                    value: *left,
                });
            }
            if !rights.insert(*right) {
                return Err(MappingError::NotInjective {
                    table: self.name,
                    value: *right,
                });
            }
        }

        Ok(())
    }

    pub fn to_right(&self, left: &str) -> Option<&'static str> {
        self.pairs.iter().find(|(l, _)| *l == left).map(|(_, r)| *r)
    }

    pub fn to_left(&self, right: &str) -> Option<&'static str> {
        self.pairs.iter().find(|(_, r)| *r == right).map(|(l, _)| *l)
    }

    /// Entries in their declared order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.pairs.iter().copied()
    }
}

pub const NAME_FIELD: &str = "name";
pub const CREATION_DATE_FIELD: &str = "creation_date";
pub const BRAND_FIELD: &str = "brand_ids";
pub const STATUS_FIELD: &str = "status_ids";
pub const STATE_FIELD: &str = "state";

/// Remote field name -> column header shown in the editor.
/// These are also the fields a new search can be filled with.
pub static REQUEST_COLUMNS: LookupTable = LookupTable::new(
    "request_columns",
    &[
        (NAME_FIELD, "Nom de la recherche"),
        (CREATION_DATE_FIELD, "Date de création"),
        ("per_page", "Nb d'articles à chercher"),
        ("search_text", "Mots clés"),
        (BRAND_FIELD, "Marque"),
        ("price_from", "Prix minimum"),
        ("price_to", "Prix maximum"),
        (STATE_FIELD, "Etat de la recherche"),
    ],
);

/// Condition column -> condition code. The declared order is the order codes
/// are written back into `status_ids`.
pub static STATUS_COLUMNS: LookupTable = LookupTable::new(
    "status_columns",
    &[
        ("Neuf avec étiquette", "6"),
        ("Neuf sans étiquette", "1"),
        ("Très bon état", "2"),
        ("Bon état", "3"),
        ("Satisfaisant", "4"),
    ],
);

/// Brand name -> marketplace brand id.
pub static BRANDS: LookupTable = LookupTable::new(
    "brands",
    &[
        ("Adidas", "14"),
        ("Carhartt", "362"),
        ("H&M", "7"),
        ("Lacoste", "304"),
        ("Levi's", "10"),
        ("Nike", "53"),
        ("Patagonia", "13"),
        ("Ralph Lauren", "88"),
        ("The North Face", "2319"),
        ("Tommy Hilfiger", "94"),
        ("Zara", "12"),
    ],
);

pub fn display_column(field: &str) -> &'static str {
    REQUEST_COLUMNS.to_right(field).unwrap_or("")
}

pub fn validate_tables() -> Result<(), MappingError> {
    REQUEST_COLUMNS.validate()?;
    STATUS_COLUMNS.validate()?;
    BRANDS.validate()
}

/// "6,3" -> one flag per known condition, in enumeration order.
pub fn expand_status(status_ids: &str) -> Vec<(&'static str, bool)> {
    let codes: HashSet<&str> = status_ids
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();

    STATUS_COLUMNS
        .pairs()
        .map(|(label, code)| (label, codes.contains(code)))
        .collect()
}

/// Inverse of `expand_status`: codes of the checked conditions, comma-joined
/// in enumeration order whatever the order of `flags`.
pub fn collapse_status<'a>(flags: impl IntoIterator<Item = (&'a str, bool)>) -> String {
    let checked: HashSet<&str> = flags
        .into_iter()
        .filter(|(_, on)| *on)
        .map(|(label, _)| label)
        .collect();

    STATUS_COLUMNS
        .pairs()
        .filter(|(label, _)| checked.contains(label))
        .map(|(_, code)| code)
        .collect::<Vec<_>>()
        .join(",")
}
