//! クエリ結果モデル

use crate::query::Variable;
use dlconsult_rdf::Term;
use std::collections::BTreeMap;

/// One solution: variable → bound term. Unbound variables are absent.
pub type BindingRow = BTreeMap<Variable, Term>;

/// クエリ結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Select { variables: Vec<Variable>, rows: Vec<BindingRow> },
    Ask { result: bool },
}

impl QueryResult {
    pub fn select(variables: Vec<Variable>, rows: Vec<BindingRow>) -> Self {
        QueryResult::Select { variables, rows }
    }

    pub fn ask(result: bool) -> Self {
        QueryResult::Ask { result }
    }

    /// Number of solutions; an ASK result has one solution when true
    pub fn size(&self) -> usize {
        match self {
            QueryResult::Select { rows, .. } => rows.len(),
            QueryResult::Ask { result } => usize::from(*result),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn variables(&self) -> &[Variable] {
        match self {
            QueryResult::Select { variables, .. } => variables,
            QueryResult::Ask { .. } => &[],
        }
    }

    pub fn rows(&self) -> &[BindingRow] {
        match self {
            QueryResult::Select { rows, .. } => rows,
            QueryResult::Ask { .. } => &[],
        }
    }

    pub fn boolean(&self) -> Option<bool> {
        match self {
            QueryResult::Ask { result } => Some(*result),
            QueryResult::Select { .. } => None,
        }
    }
}
