use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::coverage::{CoverageBuild, CoverageIndex, EntityProfile};
use crate::ingest::RowSearch;
use crate::taxonomy::{DepthLevel, Leaf, Taxonomy};
use crate::venn::{Comparison, Member, RegionKey};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn leaf_header(taxonomy: &Taxonomy) -> Vec<String> {
    let mut header = vec![
        "Area".to_string(),
        "Category".to_string(),
        "Subcategory".to_string(),
    ];
    for depth in DepthLevel::ALL {
        header.push(format!(
            "{}\n{}",
            taxonomy.depth_heading(depth),
            taxonomy.depth_band(depth)
        ));
    }
    header
}

fn leaf_labels<'t>(previous: Option<&Leaf<'t>>, leaf: &Leaf<'t>) -> (String, String) {
    let new_area = previous.map(|p| p.area != leaf.area).unwrap_or(true);
    let new_category = new_area || previous.map(|p| p.category != leaf.category).unwrap_or(true);
    (
        if new_area { leaf.area.to_string() } else { String::new() },
        if new_category {
            leaf.category.to_string()
        } else {
            String::new()
        },
    )
}

pub fn render_heatmap_table(
    index: &CoverageIndex,
    taxonomy: &Taxonomy,
    crowded_threshold: usize,
) -> String {
    let mut table = new_table();
    table.set_header(leaf_header(taxonomy));

    let mut previous: Option<Leaf<'_>> = None;
    for leaf in taxonomy.leaves() {
        let (area, category) = leaf_labels(previous.as_ref(), &leaf);
        let mut cells = vec![
            Cell::new(area),
            Cell::new(category),
            Cell::new(leaf.subcategory),
        ];
        for depth in DepthLevel::ALL {
            let count = index
                .entities_at(leaf.area, leaf.category, leaf.subcategory, depth)
                .map(<[String]>::len)
                .unwrap_or(0);
            let cell = if count == 0 {
                Cell::new("✗").fg(Color::Red)
            } else if crowded_threshold > 0 && count >= crowded_threshold {
                Cell::new(format!("✓ {count}"))
                    .fg(Color::Green)
                    .bg(Color::DarkGrey)
            } else {
                Cell::new(format!("✓ {count}")).fg(Color::Green)
            };
            cells.push(cell);
        }
        table.add_row(Row::from(cells));
        previous = Some(leaf);
    }

    let mut out = table.to_string();
    out.push_str(&format!(
        "\n✓ n: n entities (shaded at {crowded_threshold} or more)   ✗: none   empty cells: {} of {}",
        index.empty_cells(),
        index.len()
    ));
    out
}

pub fn render_entities_table(build: &CoverageBuild) -> String {
    let mut table = new_table();
    table.set_header(vec!["#", "Entity", "Subcategories covered"]);
    for (idx, entity) in build.entities.iter().enumerate() {
        let covered = build.coverage_of(entity).map(|m| m.len()).unwrap_or(0);
        let covered_cell = if covered == 0 {
            Cell::new("-").fg(Color::Red)
        } else {
            Cell::new(covered.to_string())
        };
        table.add_row(Row::from(vec![
            Cell::new((idx + 1).to_string()),
            Cell::new(entity),
            covered_cell,
        ]));
    }
    let mut out = table.to_string();
    out.push_str(&format!(
        "\nRows indexed: {} of {} ({} skipped)",
        build.stats.rows_indexed, build.stats.rows_seen, build.stats.rows_skipped
    ));
    out
}

pub fn render_profile_table(profile: &EntityProfile, taxonomy: &Taxonomy) -> String {
    let mut table = new_table();
    table.set_header(leaf_header(taxonomy));

    let mut previous: Option<Leaf<'_>> = None;
    for leaf in taxonomy.leaves() {
        let (area, category) = leaf_labels(previous.as_ref(), &leaf);
        let mut cells = vec![
            Cell::new(area),
            Cell::new(category),
            Cell::new(leaf.subcategory),
        ];
        for depth in DepthLevel::ALL {
            let cell = match profile.justification_at(
                leaf.area,
                leaf.category,
                leaf.subcategory,
                depth,
            ) {
                Some(justification) => Cell::new(justification).fg(Color::Green),
                None => Cell::new("✗").fg(Color::Red),
            };
            cells.push(cell);
        }
        table.add_row(Row::from(cells));
        previous = Some(leaf);
    }

    let tags = if profile.tags.is_empty() {
        "No tags".to_string()
    } else {
        profile.tags.join(", ")
    };
    format!("{}\nTags: {}\n{}", profile.entity_id, tags, table)
}

pub fn render_comparison_table(
    comparison: &Comparison,
    taxonomy: &Taxonomy,
    only: Option<RegionKey>,
) -> String {
    let members: &[Member] = if comparison.regions.three_way {
        &Member::ALL
    } else {
        &Member::ALL[..2]
    };

    let mut table = new_table();
    let mut header = vec!["Region".to_string(), "Subcategory".to_string()];
    for member in members {
        header.push(comparison.entity(*member).unwrap_or("-").to_string());
    }
    table.set_header(header);

    for region in &comparison.regions.regions {
        if only.is_some_and(|key| key != region.key) {
            continue;
        }
        for item in &region.items {
            let mut cells = vec![
                Cell::new(region_label(region.key, comparison)),
                Cell::new(&item.subcategory),
            ];
            for member in members {
                let cell = match item.coverage.get(*member) {
                    Some(entry) => Cell::new(format!(
                        "{}: {}",
                        taxonomy.depth_heading(entry.depth),
                        entry.justification
                    )),
                    None => Cell::new("-"),
                };
                cells.push(cell);
            }
            table.add_row(Row::from(cells));
        }
    }

    let counts = comparison
        .regions
        .counts()
        .into_iter()
        .filter(|(key, _)| comparison.regions.three_way || key_is_pairwise(*key))
        .map(|(key, count)| format!("{}: {count}", region_label(key, comparison)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = table.to_string();
    out.push_str(&format!("\nRegion sizes: {counts}"));
    out
}

pub fn render_rows_table(headers: &[String], search: &RowSearch<'_>) -> String {
    let mut table = new_table();
    table.set_header(headers.to_vec());
    for row in &search.rows {
        table.add_row(
            row.values()
                .map(|v| if v.is_empty() { "-" } else { v })
                .collect::<Vec<_>>(),
        );
    }
    format!(
        "{}\nShowing {} of {} rows",
        table,
        search.rows.len(),
        search.total
    )
}

pub fn render_taxonomy_table(taxonomy: &Taxonomy) -> String {
    let mut table = new_table();
    table.set_header(vec!["Area", "Category", "Subcategory"]);
    let mut previous: Option<Leaf<'_>> = None;
    for leaf in taxonomy.leaves() {
        let (area, category) = leaf_labels(previous.as_ref(), &leaf);
        table.add_row(vec![area, category, leaf.subcategory.to_string()]);
        previous = Some(leaf);
    }
    let depths = taxonomy.depth_levels_in_order().join(" / ");
    format!("{table}\nDepth levels: {depths}")
}

fn key_is_pairwise(key: RegionKey) -> bool {
    matches!(
        key,
        RegionKey::UniqueA | RegionKey::UniqueB | RegionKey::OverlapAb
    )
}

fn region_label(key: RegionKey, comparison: &Comparison) -> String {
    let names = key
        .members()
        .iter()
        .map(|m| comparison.entity(*m).unwrap_or("-"))
        .collect::<Vec<_>>();
    match names.as_slice() {
        [only] => format!("{only} only"),
        _ => names.join(" & "),
    }
}
