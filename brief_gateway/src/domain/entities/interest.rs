use serde::{Deserialize, Serialize};

/// Reserved category whose subcategory ids are literal keywords instead of catalog ids
pub const CUSTOM_CATEGORY_ID: &str = "custom";

/// One entry of a user's interests: a catalog category and some of its subcategories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InterestSelection {
    pub category_id: String,
    #[serde(default)]
    pub subcategory_ids: Vec<String>,
}

impl InterestSelection {
    pub fn new<I, S>(category_id: impl Into<String>, subcategory_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category_id: category_id.into(),
            subcategory_ids: subcategory_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.category_id == CUSTOM_CATEGORY_ID
    }
}

/// Enforces the invariants of an interest list before it is stored.
///
/// - blank category or subcategory ids are dropped, other ids are kept verbatim
/// - subcategory ids are unique within an entry (first occurrence kept)
/// - category ids are unique within the list: a later entry replaces an earlier one,
///   at the position of the first occurrence
pub fn normalize_selections(selections: Vec<InterestSelection>) -> Vec<InterestSelection> {
    let mut normalized: Vec<InterestSelection> = Vec::with_capacity(selections.len());

    for selection in selections {
        let category_id = selection.category_id;
        if category_id.trim().is_empty() {
            continue;
        }

        let mut subcategory_ids: Vec<String> = Vec::with_capacity(selection.subcategory_ids.len());
        for subcategory_id in selection.subcategory_ids {
            if !subcategory_id.trim().is_empty() && !subcategory_ids.contains(&subcategory_id) {
                subcategory_ids.push(subcategory_id);
            }
        }

        let entry = InterestSelection {
            category_id,
            subcategory_ids,
        };

        match normalized
            .iter_mut()
            .find(|existing| existing.category_id == entry.category_id)
        {
            Some(existing) => *existing = entry,
            None => normalized.push(entry),
        }
    }

    normalized
}
