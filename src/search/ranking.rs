//! Field weights and relevance scoring
//!
//! Every indexed field that matches contributes its match score raised to the
//! field's normalized weight; the document score is the product. Lower is
//! closer, so more matching fields and heavier fields both pull a document
//! toward the top. Field length plays no part.

use crate::corpus::Document;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;

/// Indexed document fields, heaviest default weight first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    ProgramId,
    ProgramTitle,
    Content,
    InstrumentMode,
    Investigators,
    TypeCode,
    Cycle,
}

impl SearchField {
    pub const ALL: [SearchField; 7] = [
        SearchField::ProgramId,
        SearchField::ProgramTitle,
        SearchField::Content,
        SearchField::InstrumentMode,
        SearchField::Investigators,
        SearchField::TypeCode,
        SearchField::Cycle,
    ];

    /// Metadata key the field is read from
    pub fn key(&self) -> &'static str {
        match self {
            SearchField::ProgramId => "metadata.id",
            SearchField::ProgramTitle => "metadata.program_title",
            SearchField::Content => "content",
            SearchField::InstrumentMode => "metadata.instrument_mode",
            SearchField::Investigators => "metadata.pi_and_co_pis",
            SearchField::TypeCode => "metadata.type",
            SearchField::Cycle => "metadata.cycle",
        }
    }

    /// Field text of a document, `None` when the field is absent
    pub fn extract<'a>(&self, doc: &'a Document) -> Option<Cow<'a, str>> {
        let metadata = &doc.metadata;
        match self {
            SearchField::ProgramId => metadata.id_text().map(Cow::Owned),
            SearchField::ProgramTitle => metadata.program_title.as_deref().map(Cow::Borrowed),
            SearchField::Content => Some(Cow::Borrowed(doc.content.as_str())),
            SearchField::InstrumentMode => metadata.instrument_mode.as_deref().map(Cow::Borrowed),
            SearchField::Investigators => metadata.pi_and_co_pis.as_deref().map(Cow::Borrowed),
            SearchField::TypeCode => metadata.kind.as_deref().map(Cow::Borrowed),
            SearchField::Cycle => metadata.cycle.as_deref().map(Cow::Borrowed),
        }
    }
}

/// Relative importance of each indexed field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub id: f64,
    pub program_title: f64,
    pub content: f64,
    pub instrument_mode: f64,
    pub pi_and_co_pis: f64,
    #[serde(rename = "type")]
    pub type_code: f64,
    pub cycle: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            id: 1.0,
            program_title: 0.9,
            content: 0.7,
            instrument_mode: 0.6,
            pi_and_co_pis: 0.5,
            type_code: 0.4,
            cycle: 0.3,
        }
    }
}

impl FieldWeights {
    pub fn weight(&self, field: SearchField) -> f64 {
        match field {
            SearchField::ProgramId => self.id,
            SearchField::ProgramTitle => self.program_title,
            SearchField::Content => self.content,
            SearchField::InstrumentMode => self.instrument_mode,
            SearchField::Investigators => self.pi_and_co_pis,
            SearchField::TypeCode => self.type_code,
            SearchField::Cycle => self.cycle,
        }
    }

    pub fn total(&self) -> f64 {
        SearchField::ALL.iter().map(|&f| self.weight(f)).sum()
    }

    /// Weight divided by the sum of all weights
    pub fn normalized(&self, field: SearchField) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.weight(field) / total
        } else {
            0.0
        }
    }

    /// Name of the first weight that is not a finite positive number
    pub fn invalid_field(&self) -> Option<&'static str> {
        SearchField::ALL
            .iter()
            .find(|&&f| {
                let w = self.weight(f);
                !w.is_finite() || w <= 0.0
            })
            .map(|f| f.key())
    }
}

/// Aggregated document score; lower is closer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchScore {
    pub value: f64,
}

impl MatchScore {
    /// Combine per-field `(match score, normalized weight)` pairs.
    ///
    /// A perfect field match counts as `f64::EPSILON` so it still
    /// differentiates by weight instead of collapsing the product to zero.
    pub fn combine<I>(field_scores: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let value = field_scores
            .into_iter()
            .fold(1.0, |total, (score, weight)| {
                let base = if score == 0.0 { f64::EPSILON } else { score };
                total * base.powf(weight)
            });
        Self { value }
    }

    /// 0.0 for the weakest possible match, approaching 1.0 for the closest
    pub fn relevance(&self) -> f64 {
        (1.0 - self.value).clamp(0.0, 1.0)
    }

    /// Ordering that puts the closer score first
    pub fn closer_first(a: &MatchScore, b: &MatchScore) -> Ordering {
        a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal)
    }
}
