//! The embedded AI curriculum taxonomy. Existing coverage files reference these
//! strings verbatim, so they must not be edited.

use crate::taxonomy::schema::{Area, Category, Taxonomy};

pub const DEPTH_LABELS: [&str; 3] = [
    "Level 1 (Primary | >40%)",
    "Level 2 (Significant | 10-40%)",
    "Level 3 (Minor | < 10%)",
];

const TREE: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Foundational",
        &[
            (
                "1. Operations Research & Mathematical Foundations",
                &[
                    "1.1 Linear & Nonlinear Optimization",
                    "1.2 Combinatorial & Robust Optimization",
                    "1.3 Stochastic Processes & Probability",
                    "1.4 Simulation & Queueing",
                    "1.5 Game Theory & Dynamic Programming",
                ],
            ),
            (
                "2. AI & ML Methods",
                &[
                    "2.1 Classical Machine Learning",
                    "2.2 Deep Learning",
                    "2.3 Reinforcement Learning",
                    "2.4 Generative AI & NLP",
                    "2.5 Explainable & Ethical AI",
                ],
            ),
        ],
    ),
    (
        "Subject Matter",
        &[
            (
                "3. Functional AI Applications",
                &[
                    "3.1 AI in Finance (the corporate function)",
                    "3.2 AI in Marketing & Sales Insights",
                    "3.3 AI in Operations & Supply Chain",
                    "3.4 AI in HR & Organizational Management",
                ],
            ),
            (
                "4. Domain-based AI Applications",
                &[
                    "4.1 Healthcare & Life Sciences",
                    "4.2 Financial Services & Insurance",
                    "4.3 Government, Education, & Public Sector",
                    "4.4 Media & Entertainment",
                    "4.5 Retail & Consumer Goods",
                    "4.6 Manufacturing & Industrial",
                    "4.7 Energy & Utilities",
                    "4.8 Travel, Transportation & Hospitality",
                    "4.9 Technology & Telecom",
                    "4.10 Agriculture & Food",
                ],
            ),
        ],
    ),
    (
        "Applications & Upskilling",
        &[
            (
                "5. Strategic, Managerial, Societal, & Implementation Implications",
                &[
                    "5.1 AI Strategy & Business Models",
                    "5.2 AI Product Development & Implementation",
                    "5.3 Economics & Policy of AI",
                    "5.4 Ethics & Responsible AI",
                    "5.5 Leadership & Organizational Transformation",
                ],
            ),
            (
                "6. Gen AI Tool Usage",
                &[
                    "6.1 Prompt Engineering",
                    "6.2 Other Modalities - Image, Sound, and Video Generators",
                    "6.3 LLM Privacy and Safety",
                    "6.4 AI Agents",
                    "6.5 Efficiency Tools, Custom GPTs, Prototyping",
                ],
            ),
        ],
    ),
];

impl Taxonomy {
    pub fn curriculum() -> Self {
        Taxonomy::from_trusted_parts(curriculum_areas(), curriculum_depths())
    }
}

fn curriculum_areas() -> Vec<Area> {
    TREE.iter()
        .map(|(area, categories)| {
            Area::new(
                *area,
                categories
                    .iter()
                    .map(|(category, subs)| Category::new(*category, subs.to_vec()))
                    .collect(),
            )
        })
        .collect()
}

fn curriculum_depths() -> [String; 3] {
    DEPTH_LABELS.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::DepthLevel;

    #[test]
    fn curriculum_passes_full_validation() {
        let checked = Taxonomy::new(curriculum_areas(), curriculum_depths())
            .expect("embedded curriculum must validate");
        assert_eq!(checked, Taxonomy::curriculum());
    }

    #[test]
    fn curriculum_shape_matches_published_tree() {
        let tax = Taxonomy::curriculum();
        assert_eq!(tax.areas().len(), 3);
        assert!(tax.areas().iter().all(|a| a.categories.len() == 2));
        assert_eq!(tax.leaf_count(), 34);
        assert_eq!(
            tax.areas_in_order(),
            vec!["Foundational", "Subject Matter", "Applications & Upskilling"]
        );
        assert_eq!(tax.subcategories_of("4. Domain-based AI Applications").len(), 10);
        assert_eq!(
            tax.depth_level("Level 3 (Minor | < 10%)"),
            Some(DepthLevel::Minor)
        );
        assert_eq!(tax.depth_heading(DepthLevel::Significant), "Level 2");
    }
}
