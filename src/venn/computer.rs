use std::collections::BTreeSet;

use crate::taxonomy::Taxonomy;
use crate::types::EntityCoverageMap;
use crate::venn::{Region, RegionEntry, RegionItem, RegionKey, VennRegions};

pub struct SetRegionComputer<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> SetRegionComputer<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Every key of `a`, `b` and `c` lands in exactly one region. With `c`
    /// absent, `unique_c`, `overlap_ac`, `overlap_bc` and `overlap_all` stay empty.
    pub fn compute_regions(
        &self,
        a: &EntityCoverageMap,
        b: &EntityCoverageMap,
        c: Option<&EntityCoverageMap>,
    ) -> VennRegions {
        let mut regions: Vec<Region> = RegionKey::ALL
            .iter()
            .map(|&key| Region {
                key,
                items: Vec::new(),
            })
            .collect();

        let mut keys: BTreeSet<&str> = BTreeSet::new();
        keys.extend(a.keys().map(String::as_str));
        keys.extend(b.keys().map(String::as_str));
        if let Some(c) = c {
            keys.extend(c.keys().map(String::as_str));
        }

        for subcategory in keys {
            let coverage = RegionEntry {
                a: a.get(subcategory).cloned(),
                b: b.get(subcategory).cloned(),
                c: c.and_then(|c| c.get(subcategory)).cloned(),
            };
            let Some(key) = RegionKey::for_membership(
                coverage.a.is_some(),
                coverage.b.is_some(),
                coverage.c.is_some(),
            ) else {
                continue;
            };
            regions[key.index()].items.push(RegionItem {
                subcategory: subcategory.to_string(),
                coverage,
            });
        }

        for region in &mut regions {
            region
                .items
                .sort_by_cached_key(|item| self.order_key(&item.subcategory));
        }

        VennRegions {
            three_way: c.is_some(),
            regions,
        }
    }

    fn order_key(&self, subcategory: &str) -> (usize, String) {
        let position = self
            .taxonomy
            .subcategory_position(subcategory)
            .unwrap_or(usize::MAX);
        (position, subcategory.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::taxonomy::DepthLevel;
    use crate::types::CoverageEntry;
    use crate::venn::Member;

    const UNIVERSE: [&str; 4] = ["w", "x", "y", "z"];

    fn map(keys: &[&str], depth: DepthLevel, why: &str) -> EntityCoverageMap {
        keys.iter()
            .map(|k| (k.to_string(), CoverageEntry::new(depth, why)))
            .collect()
    }

    fn keyset(region: &Region) -> BTreeSet<String> {
        region.subcategories().map(str::to_string).collect()
    }

    fn subset(mask: u32) -> Vec<&'static str> {
        UNIVERSE
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, k)| *k)
            .collect()
    }

    #[test]
    fn two_entities_split_into_unique_and_overlap() {
        let tax = Taxonomy::curriculum();
        let a = map(&["x", "y"], DepthLevel::Primary, "a");
        let b = map(&["y", "z"], DepthLevel::Minor, "b");
        let regions = SetRegionComputer::new(&tax).compute_regions(&a, &b, None);

        assert!(!regions.three_way);
        assert_eq!(keyset(regions.region(RegionKey::UniqueA)), BTreeSet::from(["x".to_string()]));
        assert_eq!(keyset(regions.region(RegionKey::UniqueB)), BTreeSet::from(["z".to_string()]));
        assert_eq!(keyset(regions.region(RegionKey::OverlapAb)), BTreeSet::from(["y".to_string()]));
        for key in [RegionKey::UniqueC, RegionKey::OverlapAc, RegionKey::OverlapBc, RegionKey::OverlapAll] {
            assert!(regions.region(key).is_empty());
        }

        let shared = regions.region(RegionKey::OverlapAb).get("y").unwrap();
        assert_eq!(shared.get(Member::A).unwrap().justification, "a");
        assert_eq!(shared.get(Member::B).unwrap().depth, DepthLevel::Minor);
        assert!(shared.get(Member::C).is_none());
    }

    #[test]
    fn triple_overlap_absorbs_pairwise_overlaps() {
        let tax = Taxonomy::curriculum();
        let a = map(&["x", "y"], DepthLevel::Primary, "a");
        let b = map(&["y", "z"], DepthLevel::Primary, "b");
        let c = map(&["y"], DepthLevel::Primary, "c");
        let regions = SetRegionComputer::new(&tax).compute_regions(&a, &b, Some(&c));

        assert!(regions.three_way);
        assert_eq!(keyset(regions.region(RegionKey::OverlapAll)), BTreeSet::from(["y".to_string()]));
        assert_eq!(keyset(regions.region(RegionKey::UniqueA)), BTreeSet::from(["x".to_string()]));
        assert_eq!(keyset(regions.region(RegionKey::UniqueB)), BTreeSet::from(["z".to_string()]));
        assert!(regions.region(RegionKey::UniqueC).is_empty());
        assert!(regions.region(RegionKey::OverlapAb).is_empty());
        assert!(regions.region(RegionKey::OverlapAc).is_empty());
        assert!(regions.region(RegionKey::OverlapBc).is_empty());

        let all = regions.region(RegionKey::OverlapAll).get("y").unwrap();
        assert!(Member::ALL.iter().all(|m| all.get(*m).is_some()));
    }

    #[test]
    fn regions_are_disjoint_and_cover_the_union() {
        let tax = Taxonomy::curriculum();
        let computer = SetRegionComputer::new(&tax);
        for ma in 0..16 {
            for mb in 0..16 {
                for mc in 0..17 {
                    let a = map(&subset(ma), DepthLevel::Primary, "a");
                    let b = map(&subset(mb), DepthLevel::Significant, "b");
                    let c = (mc < 16).then(|| map(&subset(mc), DepthLevel::Minor, "c"));
                    let regions = computer.compute_regions(&a, &b, c.as_ref());

                    let mut union: BTreeSet<String> = a.keys().cloned().collect();
                    union.extend(b.keys().cloned());
                    if let Some(c) = &c {
                        union.extend(c.keys().cloned());
                    }

                    let mut seen = BTreeSet::new();
                    for region in &regions.regions {
                        for key in region.subcategories() {
                            assert!(seen.insert(key.to_string()), "{key} in two regions");
                        }
                        for item in &region.items {
                            for member in Member::ALL {
                                let is_member = region.key.members().contains(&member);
                                assert_eq!(item.coverage.get(member).is_some(), is_member);
                            }
                        }
                    }
                    assert_eq!(seen, union);
                    assert_eq!(regions.total(), union.len());
                }
            }
        }
    }

    #[test]
    fn region_items_follow_taxonomy_order() {
        let tax = Taxonomy::curriculum();
        let a = map(
            &["zz-unknown", "4.10 Agriculture & Food", "4.2 Financial Services & Insurance", "1.1 Linear & Nonlinear Optimization"],
            DepthLevel::Primary,
            "a",
        );
        let b = EntityCoverageMap::new();
        let regions = SetRegionComputer::new(&tax).compute_regions(&a, &b, None);
        let order: Vec<_> = regions.region(RegionKey::UniqueA).subcategories().collect();
        assert_eq!(
            order,
            vec![
                "1.1 Linear & Nonlinear Optimization",
                "4.2 Financial Services & Insurance",
                "4.10 Agriculture & Food",
                "zz-unknown",
            ]
        );
    }
}
