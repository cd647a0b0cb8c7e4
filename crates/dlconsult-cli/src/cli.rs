//! コマンドライン引数

use clap::Parser;

/// One-shot SPARQL-DL consultation of an OWL knowledge base
#[derive(Parser, Debug)]
#[command(name = "dlconsult", version, about)]
pub struct Cli {
    /// Input OWL ontology (RDF/XML, Turtle or N-Triples)
    pub input: Option<String>,

    /// Output document; one `queryresults:` record is appended per run
    pub output: Option<String>,

    /// SPARQL-DL query string
    #[arg(allow_hyphen_values = true)]
    pub query: Option<String>,

    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

impl Cli {
    /// Positional arguments in order, as handed to the driver
    pub fn arguments(&self) -> Vec<String> {
        [&self.input, &self.output, &self.query]
            .into_iter()
            .flatten()
            .cloned()
            .chain(self.rest.iter().cloned())
            .collect()
    }
}
