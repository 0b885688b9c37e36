//! Static synonym table backing the auto-mapper.
//!
//! Keys are normalized canonical names; values are single-word tokens known
//! to indicate that canonical concept in vendor exports. A synonym hit
//! floors a category's confidence at a fixed level instead of blending with
//! the string-similarity score.

use std::collections::BTreeMap;

use crate::score::normalize;

/// Canonical name → known synonym tokens.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl SynonymTable {
    /// An empty table (synonym matching becomes a no-op).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds or extends an entry. Key and synonyms are normalized.
    pub fn insert(&mut self, canonical: &str, synonyms: &[&str]) {
        let entry = self.entries.entry(normalize(canonical)).or_default();
        for synonym in synonyms {
            let token = normalize(synonym);
            if !token.is_empty() && !entry.contains(&token) {
                entry.push(token);
            }
        }
    }

    /// True when a synonym-table entry ties `label` to `category_name`.
    ///
    /// An entry applies to the category whose normalized name equals its
    /// key; keys are the canonical names themselves. Within that entry, the
    /// label matches when any of its tokens is a listed synonym, or a token
    /// and the key are substrings of each other. The linkage is exact on
    /// purpose: a loose `tcc` entry must not vouch for `tcc_p90` and defeat
    /// the percentile guard.
    #[must_use]
    pub fn label_matches_category(&self, category_name: &str, label: &str) -> bool {
        let category_key = normalize(category_name);
        if category_key.is_empty() {
            return false;
        }
        let Some(synonyms) = self.entries.get(&category_key) else {
            return false;
        };
        let tokens = tokenize(label);
        tokens.iter().any(|token| {
            synonyms.contains(token)
                || category_key.contains(token.as_str())
                || token.contains(category_key.as_str())
        })
    }
}

impl Default for SynonymTable {
    /// The built-in table covering the specialties, regions, provider types,
    /// and metric columns seen across MGMA, SullivanCotter, Gallagher, ECG,
    /// and AMGA exports.
    fn default() -> Self {
        let mut table = Self::empty();

        // Specialties
        table.insert("cardiology", &["heart", "cardiac", "cardiovascular"]);
        table.insert(
            "orthopedic surgery",
            &["ortho", "orthopedics", "orthopaedic", "musculoskeletal"],
        );
        table.insert(
            "obstetrics and gynecology",
            &["obgyn", "obstetrics", "gynecology", "gyn"],
        );
        table.insert("family medicine", &["fp", "gp", "generalist"]);
        table.insert("internal medicine", &["im", "internist"]);
        table.insert("pediatrics", &["peds", "pediatric", "paediatrics", "children"]);
        table.insert("emergency medicine", &["em", "emergency", "er"]);
        table.insert("anesthesiology", &["anesthesia", "anesthesiologist"]);
        table.insert("radiology", &["imaging", "radiologist"]);
        table.insert("psychiatry", &["psych", "behavioral", "mental"]);
        table.insert("hospitalist", &["nocturnist"]);
        table.insert("general surgery", &["surgeon", "surgical"]);
        table.insert("neurology", &["neuro", "neurologist"]);
        table.insert("oncology", &["cancer", "hematology", "hemonc"]);
        table.insert("dermatology", &["derm", "skin"]);

        // Regions
        table.insert("midwest", &["central", "northcentral"]);
        table.insert("northeast", &["east", "eastern", "newengland"]);
        table.insert("south", &["southern", "southeast"]);
        table.insert("west", &["western", "pacific", "mountain"]);
        table.insert("national", &["overall", "combined", "allregions"]);

        // Provider types
        table.insert("physician", &["md", "do", "doctor"]);
        table.insert("advanced practice provider", &["app", "apc", "midlevel"]);
        table.insert("nurse practitioner", &["np"]);
        table.insert("physician assistant", &["pa"]);
        table.insert("crna", &["nurseanesthetist"]);

        // Metric columns
        table.insert("tcc", &["totalcash", "totalcomp", "compensation", "salary"]);
        table.insert("wrvu", &["workrvu", "rvu", "rvus", "productivity"]);
        table.insert("cf", &["conversionfactor", "compperrvu", "tccperwrvu"]);

        table
    }
}

/// Splits a label into lowercase alphanumeric tokens.
pub(crate) fn tokenize(label: &str) -> Vec<String> {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonym_token_matches() {
        let table = SynonymTable::default();
        assert!(table.label_matches_category("Cardiology", "Cardiovascular Disease"));
        assert!(table.label_matches_category("Cardiology", "Heart Center Physicians"));
        assert!(!table.label_matches_category("Cardiology", "Orthopedic Surgery"));
    }

    #[test]
    fn key_substring_matches() {
        let table = SynonymTable::default();
        // "cardiology" token is a substring match against the key itself.
        assert!(table.label_matches_category("Cardiology", "Cardiology - Invasive"));
    }

    #[test]
    fn empty_table_never_matches() {
        let table = SynonymTable::empty();
        assert!(!table.label_matches_category("Cardiology", "Cardiovascular Disease"));
    }

    #[test]
    fn custom_entries_extend_table() {
        let mut table = SynonymTable::empty();
        table.insert("Urgent Care", &["walkin", "expresscare"]);
        assert!(table.label_matches_category("Urgent Care", "ExpressCare Clinic"));
    }
}
