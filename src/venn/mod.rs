pub mod computer;
pub mod selection;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CoverageEntry;

pub use computer::SetRegionComputer;
pub use selection::{Comparison, Selection, SelectionError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    A,
    B,
    C,
}

impl Member {
    pub const ALL: [Member; 3] = [Member::A, Member::B, Member::C];

    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RegionKey {
    UniqueA,
    UniqueB,
    UniqueC,
    OverlapAb,
    OverlapAc,
    OverlapBc,
    OverlapAll,
}

impl RegionKey {
    pub const ALL: [RegionKey; 7] = [
        RegionKey::UniqueA,
        RegionKey::UniqueB,
        RegionKey::UniqueC,
        RegionKey::OverlapAb,
        RegionKey::OverlapAc,
        RegionKey::OverlapBc,
        RegionKey::OverlapAll,
    ];

    pub fn members(self) -> &'static [Member] {
        match self {
            Self::UniqueA => &[Member::A],
            Self::UniqueB => &[Member::B],
            Self::UniqueC => &[Member::C],
            Self::OverlapAb => &[Member::A, Member::B],
            Self::OverlapAc => &[Member::A, Member::C],
            Self::OverlapBc => &[Member::B, Member::C],
            Self::OverlapAll => &[Member::A, Member::B, Member::C],
        }
    }

    pub fn for_membership(in_a: bool, in_b: bool, in_c: bool) -> Option<Self> {
        match (in_a, in_b, in_c) {
            (true, false, false) => Some(Self::UniqueA),
            (false, true, false) => Some(Self::UniqueB),
            (false, false, true) => Some(Self::UniqueC),
            (true, true, false) => Some(Self::OverlapAb),
            (true, false, true) => Some(Self::OverlapAc),
            (false, true, true) => Some(Self::OverlapBc),
            (true, true, true) => Some(Self::OverlapAll),
            (false, false, false) => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::UniqueA => 0,
            Self::UniqueB => 1,
            Self::UniqueC => 2,
            Self::OverlapAb => 3,
            Self::OverlapAc => 4,
            Self::OverlapBc => 5,
            Self::OverlapAll => 6,
        }
    }

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::UniqueA => "unique_a",
            Self::UniqueB => "unique_b",
            Self::UniqueC => "unique_c",
            Self::OverlapAb => "overlap_ab",
            Self::OverlapAc => "overlap_ac",
            Self::OverlapBc => "overlap_bc",
            Self::OverlapAll => "overlap_all",
        }
    }
}

impl Display for RegionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::UniqueA => "Only A",
            Self::UniqueB => "Only B",
            Self::UniqueC => "Only C",
            Self::OverlapAb => "A & B",
            Self::OverlapAc => "A & C",
            Self::OverlapBc => "B & C",
            Self::OverlapAll => "A & B & C",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Error)]
#[error("unknown region: {0}")]
pub struct RegionKeyParseError(pub String);

impl FromStr for RegionKey {
    type Err = RegionKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "unique_a" | "a" => Ok(Self::UniqueA),
            "unique_b" | "b" => Ok(Self::UniqueB),
            "unique_c" | "c" => Ok(Self::UniqueC),
            "overlap_ab" | "ab" => Ok(Self::OverlapAb),
            "overlap_ac" | "ac" => Ok(Self::OverlapAc),
            "overlap_bc" | "bc" => Ok(Self::OverlapBc),
            "overlap_all" | "abc" | "all" => Ok(Self::OverlapAll),
            _ => Err(RegionKeyParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<CoverageEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<CoverageEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<CoverageEntry>,
}

impl RegionEntry {
    pub fn get(&self, member: Member) -> Option<&CoverageEntry> {
        match member {
            Member::A => self.a.as_ref(),
            Member::B => self.b.as_ref(),
            Member::C => self.c.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionItem {
    pub subcategory: String,
    pub coverage: RegionEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub key: RegionKey,
    pub items: Vec<RegionItem>,
}

impl Region {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subcategories(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.subcategory.as_str())
    }

    pub fn get(&self, subcategory: &str) -> Option<&RegionEntry> {
        self.items
            .iter()
            .find(|i| i.subcategory == subcategory)
            .map(|i| &i.coverage)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VennRegions {
    pub three_way: bool,
    pub regions: Vec<Region>,
}

impl VennRegions {
    pub fn region(&self, key: RegionKey) -> &Region {
        &self.regions[key.index()]
    }

    pub fn counts(&self) -> Vec<(RegionKey, usize)> {
        self.regions.iter().map(|r| (r.key, r.len())).collect()
    }

    pub fn total(&self) -> usize {
        self.regions.iter().map(Region::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_keys_parse_from_slugs_and_short_forms() {
        for key in RegionKey::ALL {
            assert_eq!(key.as_slug().parse::<RegionKey>().unwrap(), key);
        }
        assert_eq!("AB".parse::<RegionKey>().unwrap(), RegionKey::OverlapAb);
        assert_eq!("overlap-all".parse::<RegionKey>().unwrap(), RegionKey::OverlapAll);
        assert!("abcd".parse::<RegionKey>().is_err());
    }

    #[test]
    fn membership_maps_back_to_region_members() {
        for key in RegionKey::ALL {
            let members = key.members();
            let found = RegionKey::for_membership(
                members.contains(&Member::A),
                members.contains(&Member::B),
                members.contains(&Member::C),
            );
            assert_eq!(found, Some(key));
        }
        assert_eq!(RegionKey::for_membership(false, false, false), None);
    }
}
