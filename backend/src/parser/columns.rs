//! Column headers of the evidence spreadsheet.
//!
//! Every column accepts its English header and the Portuguese header of
//! the published data files. Headers are compared after trimming.

use crate::error::{LoadError, LoadResult};

/// A known spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Year,
    Country,
    Population,
    AdverseEffect,
    InterventionGroup,
    Intervention,
    OrderedIntervention,
    OutcomeGroup,
    Outcome,
    EffectResult,
    ConfidenceLevel,
}

impl Column {
    /// Columns whose absence is a fatal load error.
    pub const REQUIRED: [Column; 11] = [
        Column::Title,
        Column::Country,
        Column::Population,
        Column::AdverseEffect,
        Column::InterventionGroup,
        Column::OrderedIntervention,
        Column::OutcomeGroup,
        Column::Outcome,
        Column::EffectResult,
        Column::Year,
        Column::ConfidenceLevel,
    ];

    /// Canonical (English) header.
    pub fn header(&self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted header spellings, canonical first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::Title => &["Title", "Título"],
            Column::Year => &["Year", "Ano"],
            Column::Country => &["Country", "País"],
            Column::Population => &["Population", "População"],
            Column::AdverseEffect => &["Adverse Effect", "Efeito Adverso"],
            Column::InterventionGroup => &["Intervention Group", "Grupo de Intervenção"],
            Column::Intervention => &["Intervention", "Intervenção"],
            Column::OrderedIntervention => &["Intervention (Ordered)", "Intervenção Ordenada"],
            Column::OutcomeGroup => &["Outcome Group", "Grupo de Desfecho"],
            Column::Outcome => &["Outcome", "Desfecho"],
            Column::EffectResult => &["Effect Result", "Resultado (Efeito)"],
            Column::ConfidenceLevel => &["Confidence Level", "Nível de Confiança"],
        }
    }

    fn matches(&self, header: &str) -> bool {
        let header = header.trim();
        self.aliases().iter().any(|alias| *alias == header)
    }
}

/// Header position of every known column.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    title: usize,
    year: usize,
    country: usize,
    population: usize,
    adverse_effect: usize,
    intervention_group: usize,
    intervention: Option<usize>,
    ordered_intervention: usize,
    outcome_group: usize,
    outcome: usize,
    effect_result: usize,
    confidence: usize,
}

impl ColumnMap {
    /// Resolve column positions from a header row.
    ///
    /// Fails on the first required column that is missing.
    pub fn resolve(headers: &[String]) -> LoadResult<Self> {
        let find = |column: Column| headers.iter().position(|h| column.matches(h));
        let require = |column: Column| {
            find(column).ok_or_else(|| LoadError::MissingColumn(column.header().to_string()))
        };

        // Report missing columns in a stable order.
        for column in Column::REQUIRED {
            require(column)?;
        }

        Ok(Self {
            title: require(Column::Title)?,
            year: require(Column::Year)?,
            country: require(Column::Country)?,
            population: require(Column::Population)?,
            adverse_effect: require(Column::AdverseEffect)?,
            intervention_group: require(Column::InterventionGroup)?,
            intervention: find(Column::Intervention),
            ordered_intervention: require(Column::OrderedIntervention)?,
            outcome_group: require(Column::OutcomeGroup)?,
            outcome: require(Column::Outcome)?,
            effect_result: require(Column::EffectResult)?,
            confidence: require(Column::ConfidenceLevel)?,
        })
    }

    /// Position of a column in the header row.
    pub fn index(&self, column: Column) -> Option<usize> {
        match column {
            Column::Title => Some(self.title),
            Column::Year => Some(self.year),
            Column::Country => Some(self.country),
            Column::Population => Some(self.population),
            Column::AdverseEffect => Some(self.adverse_effect),
            Column::InterventionGroup => Some(self.intervention_group),
            Column::Intervention => self.intervention,
            Column::OrderedIntervention => Some(self.ordered_intervention),
            Column::OutcomeGroup => Some(self.outcome_group),
            Column::Outcome => Some(self.outcome),
            Column::EffectResult => Some(self.effect_result),
            Column::ConfidenceLevel => Some(self.confidence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    const ENGLISH: [&str; 11] = [
        "Title",
        "Year",
        "Country",
        "Population",
        "Adverse Effect",
        "Intervention Group",
        "Intervention (Ordered)",
        "Outcome Group",
        "Outcome",
        "Effect Result",
        "Confidence Level",
    ];

    #[test]
    fn test_resolve_english_headers() {
        let map = ColumnMap::resolve(&headers(&ENGLISH)).unwrap();
        assert_eq!(map.index(Column::Title), Some(0));
        assert_eq!(map.index(Column::ConfidenceLevel), Some(10));
        assert_eq!(map.index(Column::Intervention), None);
    }

    #[test]
    fn test_resolve_portuguese_headers_with_padding() {
        let map = ColumnMap::resolve(&headers(&[
            " Título ",
            "Ano",
            "País",
            "População",
            "Efeito Adverso",
            "Grupo de Intervenção",
            "Intervenção",
            "Intervenção Ordenada",
            "Grupo de Desfecho",
            "Desfecho",
            "Resultado (Efeito)",
            "Nível de Confiança",
        ]))
        .unwrap();
        assert_eq!(map.index(Column::Title), Some(0));
        assert_eq!(map.index(Column::Intervention), Some(6));
        assert_eq!(map.index(Column::OrderedIntervention), Some(7));
    }

    #[test]
    fn test_missing_required_column() {
        let mut names = ENGLISH.to_vec();
        names.retain(|h| *h != "Outcome Group");
        let err = ColumnMap::resolve(&headers(&names)).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Outcome Group"));
    }
}
