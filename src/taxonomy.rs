use core::ops::Deref;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaxonomyError {
    #[error("the list of {list} must not be empty")]
    Empty { list: &'static str },
    #[error("the list of {list} contains `{label}` more than once")]
    Duplicate { list: &'static str, label: String },
}

/// An ordered list of unique labels with at least one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelList(Vec<String>);

impl LabelList {
    pub fn new(
        list: &'static str,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, TaxonomyError> {
        let labels = labels.into_iter().map(Into::into).collect::<Vec<String>>();

        if labels.is_empty() {
            return Err(TaxonomyError::Empty { list });
        }

        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(TaxonomyError::Duplicate {
                    list,
                    label: label.clone(),
                });
            }
        }

        Ok(Self(labels))
    }

    /// Returns the length of the longest label in characters.
    #[must_use]
    pub fn longest(&self) -> usize {
        self.0
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or_default()
    }
}

impl Deref for LabelList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawTaxonomy {
    categories: Vec<String>,
    durations: Vec<String>,
    time_blocks: Vec<String>,
}

/// The rows and column groups printed on every sheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawTaxonomy")]
pub struct Taxonomy {
    categories: LabelList,
    durations: LabelList,
    time_blocks: LabelList,
}

impl Taxonomy {
    pub fn new(
        categories: impl IntoIterator<Item = impl Into<String>>,
        durations: impl IntoIterator<Item = impl Into<String>>,
        time_blocks: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, TaxonomyError> {
        Ok(Self {
            categories: LabelList::new("categories", categories)?,
            durations: LabelList::new("durations", durations)?,
            time_blocks: LabelList::new("time blocks", time_blocks)?,
        })
    }

    /// The interaction types, one body row (day sheet) or column group (week sheet) each.
    #[must_use]
    pub fn categories(&self) -> &LabelList {
        &self.categories
    }

    /// Sub-buckets nested under every time block (day sheet) or category (week sheet).
    #[must_use]
    pub fn durations(&self) -> &LabelList {
        &self.durations
    }

    #[must_use]
    pub fn time_blocks(&self) -> &LabelList {
        &self.time_blocks
    }
}

impl TryFrom<RawTaxonomy> for Taxonomy {
    type Error = TaxonomyError;

    fn try_from(raw: RawTaxonomy) -> Result<Self, Self::Error> {
        Self::new(raw.categories, raw.durations, raw.time_blocks)
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            categories: LabelList(to_strings(&[
                "3d services",
                "video games",
                "crafts",
                "sewing machines",
                "vinyl cutter",
                "podcasting",
                "general library",
                "other",
            ])),
            // a single blank bucket, so every time block is one tick column wide
            durations: LabelList(to_strings(&[" "])),
            time_blocks: LabelList(to_strings(&[
                "8a-10a", "10a-12p", "12p-2p", "2p-4p", "4p-6p", "6p-8p",
            ])),
        }
    }
}

fn to_strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}
