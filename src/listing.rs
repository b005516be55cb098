//! Tabular metadata listing: column filters, stable sort and pagination

use crate::corpus::ProposalMetadata;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Columns of the metadata table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataColumn {
    Id,
    ProgramTitle,
    #[serde(rename = "type")]
    TypeCode,
    Cycle,
    InstrumentMode,
    ExclusiveAccessPeriodMonths,
    PiAndCoPis,
    PrimeParallelTimeHours,
}

impl MetadataColumn {
    pub const ALL: [MetadataColumn; 8] = [
        MetadataColumn::Id,
        MetadataColumn::ProgramTitle,
        MetadataColumn::TypeCode,
        MetadataColumn::Cycle,
        MetadataColumn::InstrumentMode,
        MetadataColumn::ExclusiveAccessPeriodMonths,
        MetadataColumn::PiAndCoPis,
        MetadataColumn::PrimeParallelTimeHours,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetadataColumn::Id => "id",
            MetadataColumn::ProgramTitle => "program_title",
            MetadataColumn::TypeCode => "type",
            MetadataColumn::Cycle => "cycle",
            MetadataColumn::InstrumentMode => "instrument_mode",
            MetadataColumn::ExclusiveAccessPeriodMonths => "exclusive_access_period_months",
            MetadataColumn::PiAndCoPis => "pi_and_co_pis",
            MetadataColumn::PrimeParallelTimeHours => "prime_parallel_time_hours",
        }
    }

    /// Cell text as shown in the table, `None` for a missing value
    pub fn render(&self, metadata: &ProposalMetadata) -> Option<String> {
        match self {
            MetadataColumn::Id => metadata.id_text(),
            MetadataColumn::ProgramTitle => metadata.program_title.clone(),
            MetadataColumn::TypeCode => metadata.kind.clone(),
            MetadataColumn::Cycle => metadata.cycle.clone(),
            MetadataColumn::InstrumentMode => metadata.instrument_mode.clone(),
            MetadataColumn::ExclusiveAccessPeriodMonths => {
                metadata.exclusive_access_period_months.map(|m| m.to_string())
            }
            MetadataColumn::PiAndCoPis => metadata.pi_and_co_pis.clone(),
            MetadataColumn::PrimeParallelTimeHours => metadata.prime_parallel_time_hours.clone(),
        }
    }

    fn sort_key(&self, metadata: &ProposalMetadata) -> SortKey {
        match self {
            MetadataColumn::Id => metadata.id.map_or(SortKey::Missing, |id| SortKey::Number(id as f64)),
            MetadataColumn::ExclusiveAccessPeriodMonths => metadata
                .exclusive_access_period_months
                .map_or(SortKey::Missing, |m| SortKey::Number(m as f64)),
            MetadataColumn::PrimeParallelTimeHours => match &metadata.prime_parallel_time_hours {
                None => SortKey::Missing,
                Some(text) => match text.trim().parse::<f64>() {
                    Ok(n) if n.is_finite() => SortKey::Number(n),
                    _ => SortKey::Text(text.to_lowercase()),
                },
            },
            _ => self
                .render(metadata)
                .map_or(SortKey::Missing, |text| SortKey::Text(text.to_lowercase())),
        }
    }
}

impl FromStr for MetadataColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MetadataColumn::ALL
            .iter()
            .copied()
            .find(|column| column.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::InvalidInput(format!("unknown metadata column: {}", s)))
    }
}

/// Missing values first, then numbers, then text
#[derive(Debug, PartialEq)]
enum SortKey {
    Missing,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Less,
            (_, SortKey::Missing) => Ordering::Greater,
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: MetadataColumn,
    pub value: String,
}

impl FromStr for ColumnFilter {
    type Err = AppError;

    /// Parse `column=value`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, value) = s.split_once('=').ok_or_else(|| {
            AppError::InvalidInput(format!("filter must look like column=value, got {:?}", s))
        })?;
        Ok(Self {
            column: column.parse()?,
            value: value.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingQuery {
    pub filters: Vec<ColumnFilter>,
    pub sort: Option<(MetadataColumn, SortDirection)>,
    /// 1-based page number, clamped into range
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of the filtered, sorted table
#[derive(Debug, Clone, Serialize)]
pub struct MetadataPage<'a> {
    pub rows: Vec<&'a ProposalMetadata>,
    pub page: usize,
    pub total_pages: usize,
    /// Rows remaining after filtering
    pub total: usize,
    /// 1-based index of the first row shown, 0 when the page is empty
    pub start_index: usize,
    pub end_index: usize,
}

fn passes(metadata: &ProposalMetadata, filters: &[ColumnFilter]) -> bool {
    filters.iter().all(|filter| {
        let wanted = filter.value.to_lowercase();
        if wanted.is_empty() {
            return true;
        }
        filter
            .column
            .render(metadata)
            .is_some_and(|cell| cell.to_lowercase().contains(&wanted))
    })
}

/// Filter, sort and paginate metadata rows
pub fn list_metadata<'a>(rows: &[&'a ProposalMetadata], query: &ListingQuery) -> MetadataPage<'a> {
    let mut filtered: Vec<&'a ProposalMetadata> = rows
        .iter()
        .copied()
        .filter(|m| passes(m, &query.filters))
        .collect();

    if let Some((column, direction)) = query.sort {
        let mut keyed: Vec<(SortKey, &'a ProposalMetadata)> =
            filtered.into_iter().map(|m| (column.sort_key(m), m)).collect();
        keyed.sort_by(|a, b| a.0.compare(&b.0));
        if direction == SortDirection::Descending {
            keyed.reverse();
        }
        filtered = keyed.into_iter().map(|(_, m)| m).collect();
    }

    let total = filtered.len();
    let page_size = query.page_size.max(1);
    let total_pages = total.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let from = (page - 1) * page_size;
    let to = (from + page_size).min(total);
    let rows: Vec<&'a ProposalMetadata> = filtered.get(from..to).map(<[_]>::to_vec).unwrap_or_default();

    let (start_index, end_index) = if rows.is_empty() { (0, 0) } else { (from + 1, to) };

    MetadataPage {
        rows,
        page,
        total_pages,
        total,
        start_index,
        end_index,
    }
}
