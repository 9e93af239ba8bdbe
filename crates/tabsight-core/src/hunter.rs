//! Detection of literal category values mentioned in a question

use tracing::trace;

use crate::dataset::Dataset;
use crate::profiler::{ColumnProfile, SemanticType};

/// A category value found in the question text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMention {
    pub column: String,
    pub value: String,
}

/// Return the first `(column, value)` whose value appears in `text`.
///
/// Categorical and binary columns are scanned in profile order and their
/// distinct values in first-seen order. The first hit wins; a short value
/// that happens to be part of a longer word still counts.
pub fn find_category_mention(
    text: &str,
    dataset: &Dataset,
    profile: &ColumnProfile,
) -> Option<CategoryMention> {
    let haystack = text.to_lowercase();
    for name in profile.columns_of(&[SemanticType::Categorical, SemanticType::Binary]) {
        let Some(column) = dataset.column(name) else {
            continue;
        };
        for value in column.distinct_values() {
            let literal = value.to_string();
            if haystack.contains(&literal.to_lowercase()) {
                trace!(column = name, value = %literal, "category value mentioned");
                return Some(CategoryMention {
                    column: name.to_string(),
                    value: literal,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use crate::profiler::ColumnProfiler;

    fn dataset() -> (Dataset, ColumnProfile) {
        let dataset = Dataset::from_columns(vec![
            ("notes", vec!["east side".into(), "b".into(), "c".into()]),
            ("region", vec!["East".into(), "West".into(), "East".into()]),
            ("segment", vec!["Retail".into(), "Wholesale".into(), "Online".into()]),
            ("sales", vec![Value::from(1), Value::from(2), Value::from(3)]),
        ])
        .unwrap();
        let mut profile = ColumnProfiler::new().profile(&dataset);
        profile.insert("notes", SemanticType::Text);
        (dataset, profile)
    }

    #[test]
    fn finds_value_case_insensitively() {
        let (dataset, profile) = dataset();
        let hit = find_category_mention("How many are EAST", &dataset, &profile).unwrap();
        assert_eq!(hit.column, "region");
        assert_eq!(hit.value, "East");
    }

    #[test]
    fn first_column_in_profile_order_wins() {
        let (dataset, profile) = dataset();
        let hit = find_category_mention("west online orders", &dataset, &profile).unwrap();
        assert_eq!(hit.column, "region");
        assert_eq!(hit.value, "West");
    }

    #[test]
    fn ignores_text_and_numeric_columns() {
        let (dataset, profile) = dataset();
        assert_eq!(find_category_mention("b c 2", &dataset, &profile), None);
    }

    #[test]
    fn substring_of_longer_word_matches() {
        let (dataset, profile) = dataset();
        let hit = find_category_mention("northeastern", &dataset, &profile).unwrap();
        assert_eq!(hit.value, "East");
    }
}
