use anyhow::Result;

use crate::coverage::{CoverageIndex, EntityProfile};
use crate::ingest::RowSearch;
use crate::taxonomy::Taxonomy;
use crate::venn::{Comparison, Member, RegionKey};

pub fn index_to_csv(index: &CoverageIndex, taxonomy: &Taxonomy) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "area",
        "category",
        "subcategory",
        "depth",
        "count",
        "entities",
    ])?;
    for cell in index.cells() {
        writer.write_record([
            cell.key.area.as_str(),
            cell.key.category.as_str(),
            cell.key.subcategory.as_str(),
            taxonomy.depth_label(cell.key.depth),
            cell.value.len().to_string().as_str(),
            cell.value.join("; ").as_str(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn entities_to_csv(entities: &[String]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["entity"])?;
    for entity in entities {
        writer.write_record([entity])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn profile_to_csv(profile: &EntityProfile, taxonomy: &Taxonomy) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "entity",
        "area",
        "category",
        "subcategory",
        "depth",
        "justification",
    ])?;
    for cell in profile.covered() {
        writer.write_record([
            profile.entity_id.as_str(),
            cell.key.area.as_str(),
            cell.key.category.as_str(),
            cell.key.subcategory.as_str(),
            taxonomy.depth_label(cell.key.depth),
            cell.value.as_deref().unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn comparison_to_csv(
    comparison: &Comparison,
    taxonomy: &Taxonomy,
    only: Option<RegionKey>,
) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "region",
        "subcategory",
        "entity",
        "depth",
        "justification",
    ])?;
    for region in &comparison.regions.regions {
        if only.is_some_and(|key| key != region.key) {
            continue;
        }
        for item in &region.items {
            for member in Member::ALL {
                let Some(entry) = item.coverage.get(member) else {
                    continue;
                };
                writer.write_record([
                    region.key.as_slug(),
                    item.subcategory.as_str(),
                    comparison.entity(member).unwrap_or_default(),
                    taxonomy.depth_label(entry.depth),
                    entry.justification.as_str(),
                ])?;
            }
        }
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn rows_to_csv(headers: &[String], search: &RowSearch<'_>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(headers)?;
    for row in &search.rows {
        writer.write_record(row.values())?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::CoverageAggregator;
    use crate::ingest::{parse, Dataset, RecordParser};
    use crate::taxonomy::DEPTH_LABELS;
    use crate::venn::{Selection, SetRegionComputer};

    fn sample() -> String {
        let depth = DEPTH_LABELS[1];
        format!(
            "Number - Name,Area,Category,Subcategory,Depth of Coverage,Justification\n\
             A,Foundational,2. AI & ML Methods,2.2 Deep Learning,{depth},\"CNNs, RNNs\"\n\
             B,Foundational,2. AI & ML Methods,2.2 Deep Learning,{depth},transformers\n"
        )
    }

    #[test]
    fn index_csv_has_one_line_per_cell() {
        let tax = Taxonomy::curriculum();
        let build = CoverageAggregator::new(&tax).build_index(&parse(&sample()));
        let out = index_to_csv(&build.index, &tax).unwrap();
        assert_eq!(out.lines().count(), build.index.len() + 1);
        assert!(out.contains("2.2 Deep Learning,Level 2 (Significant | 10-40%),2,A; B"));
    }

    #[test]
    fn comparison_csv_lists_each_contribution() {
        let tax = Taxonomy::curriculum();
        let build = CoverageAggregator::new(&tax).build_index(&parse(&sample()));
        let comparison = Selection::resolve(&build, &["A", "B"])
            .unwrap()
            .compare(&SetRegionComputer::new(&tax));
        let out = comparison_to_csv(&comparison, &tax, None).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("overlap_ab,2.2 Deep Learning,A,"));
        assert!(lines[1].ends_with("\"CNNs, RNNs\""));

        let narrowed = comparison_to_csv(&comparison, &tax, Some(RegionKey::UniqueA)).unwrap();
        assert_eq!(narrowed.lines().count(), 1);
    }

    #[test]
    fn rows_csv_requotes_fields() {
        let dataset = Dataset::from_text(&sample(), &RecordParser::default()).unwrap();
        let out = rows_to_csv(&dataset.headers, &dataset.search("cnn")).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("\"CNNs, RNNs\""));
    }
}
