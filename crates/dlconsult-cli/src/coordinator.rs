//! クエリ実行の調整 (構文解析 → 評価)

use crate::error::ConsultError;
use dlconsult_owl::OwlReasoner;
use dlconsult_query::{
    DefaultSparqlDlEvaluator, DefaultSparqlDlParser, EvaluationOptions, QueryResult, SparqlDlEvaluator,
    SparqlDlParser, SparqlDlQuery,
};
use tracing::{debug, info_span};

pub struct QueryCoordinator {
    parser: Box<dyn SparqlDlParser>,
    evaluator: Box<dyn SparqlDlEvaluator>,
}

impl QueryCoordinator {
    pub fn new(max_bindings: usize) -> Self {
        Self {
            parser: Box::new(DefaultSparqlDlParser),
            evaluator: Box::new(DefaultSparqlDlEvaluator::new(EvaluationOptions { max_bindings })),
        }
    }

    /// Syntax check only; the knowledge base is not consulted
    pub fn parse(&self, text: &str) -> Result<SparqlDlQuery, ConsultError> {
        self.parser
            .parse(text)
            .map_err(|e| ConsultError::QueryParse(e.to_string()))
    }

    pub fn evaluate(&self, query: &SparqlDlQuery, kb: &dyn OwlReasoner) -> Result<QueryResult, ConsultError> {
        let span = info_span!("evaluate", groups = query.groups.len());
        let _guard = span.enter();

        let result = self
            .evaluator
            .evaluate(query, kb)
            .map_err(|e| ConsultError::QueryExecution(e.to_string()))?;
        debug!(size = result.size(), "query evaluated");
        Ok(result)
    }

    pub fn execute(&self, text: &str, kb: &dyn OwlReasoner) -> Result<QueryResult, ConsultError> {
        let query = self.parse(text)?;
        self.evaluate(&query, kb)
    }
}

impl Default for QueryCoordinator {
    fn default() -> Self {
        Self::new(EvaluationOptions::default().max_bindings)
    }
}
