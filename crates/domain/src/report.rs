// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report and visualization definitions.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Operators available to report filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Value equals the operand.
    Equals,
    /// Text contains the operand, or a list has it as a member.
    Contains,
    /// Numeric value is strictly greater than the operand.
    Greater,
    /// Numeric value is strictly less than the operand.
    Less,
    /// Numeric value lies within the inclusive bounds.
    Between,
}

impl FilterOperator {
    /// Returns the string representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::Greater => "greater",
            Self::Less => "less",
            Self::Between => "between",
        }
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The operand of a report filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperand {
    /// A single comparison value.
    Value(Value),
    /// Inclusive lower and upper bounds for `between`.
    Range(Value, Value),
}

/// One declarative filter condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// The field whose value is tested.
    pub field_id: String,
    /// The comparison operator.
    pub operator: FilterOperator,
    /// The comparison operand.
    pub operand: FilterOperand,
}

impl ReportFilter {
    /// Creates a single-operand filter.
    #[must_use]
    pub fn new(field_id: &str, operator: FilterOperator, value: Value) -> Self {
        Self {
            field_id: field_id.to_string(),
            operator,
            operand: FilterOperand::Value(value),
        }
    }

    /// Creates an inclusive `between` filter.
    #[must_use]
    pub fn between(field_id: &str, low: Value, high: Value) -> Self {
        Self {
            field_id: field_id.to_string(),
            operator: FilterOperator::Between,
            operand: FilterOperand::Range(low, high),
        }
    }
}

/// Chart type a visualization is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Bar chart.
    Bar,
    /// Line chart.
    Line,
    /// Pie chart.
    Pie,
    /// Plain table.
    #[default]
    Table,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Which field to sort rows by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// The field sorted on.
    pub field_id: String,
    /// The sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort spec.
    #[must_use]
    pub fn new(field_id: &str, direction: SortDirection) -> Self {
        Self {
            field_id: field_id.to_string(),
            direction,
        }
    }
}

/// One chart or table definition over a report's source forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportVisualization {
    /// The visualization identifier.
    pub id: String,
    /// How the rows are charted.
    #[serde(default)]
    pub chart_kind: ChartKind,
    /// The chart title.
    pub title: String,
    /// Forms whose responses feed this visualization.
    pub source_form_ids: Vec<String>,
    /// Fields projected into each output row.
    pub selected_fields: Vec<String>,
    /// Filters, all of which must hold.
    #[serde(default)]
    pub filters: Vec<ReportFilter>,
    /// Fields to group by; empty or missing means no grouping.
    #[serde(default)]
    pub group_by_fields: Option<Vec<String>>,
    /// Optional ordering of the output rows.
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

impl ReportVisualization {
    /// Returns the group-by fields, or an empty slice when ungrouped.
    #[must_use]
    pub fn group_by(&self) -> &[String] {
        self.group_by_fields.as_deref().unwrap_or_default()
    }

    /// Returns true if the visualization reads responses of the given form.
    #[must_use]
    pub fn reads_form(&self, form_id: &str) -> bool {
        self.source_form_ids.iter().any(|id| id == form_id)
    }
}

/// A named collection of visualizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The report identifier.
    pub id: String,
    /// The report title.
    pub title: String,
    /// Visualizations owned by this report, in display order.
    pub visualizations: Vec<ReportVisualization>,
    /// The author's user id.
    pub created_by: String,
    /// The academic year the report belongs to.
    pub academic_year_id: String,
    /// Whether the report is visible beyond its author.
    #[serde(default)]
    pub is_public: bool,
}

impl Report {
    /// Looks up a visualization by id.
    #[must_use]
    pub fn visualization(&self, visualization_id: &str) -> Option<&ReportVisualization> {
        self.visualizations
            .iter()
            .find(|visualization| visualization.id == visualization_id)
    }

    /// Returns every distinct source form id across visualizations, in first
    /// appearance order.
    #[must_use]
    pub fn source_form_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for form_id in self
            .visualizations
            .iter()
            .flat_map(|visualization| visualization.source_form_ids.iter())
        {
            if !ids.contains(&form_id.as_str()) {
                ids.push(form_id.as_str());
            }
        }
        ids
    }
}
