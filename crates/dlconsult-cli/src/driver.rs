//! 相談処理のドライバー
//!
//! 引数の検証、知識ベースの構築、クエリの実行、結果の出力を順に行い、
//! 各失敗カテゴリをメッセージと終了ステータスに変換する

use crate::bootstrap::{BackendFactory, Bootstrapper, DefaultBackendFactory, DefaultDocumentLoader, DocumentLoader};
use crate::config::{ConsultConfig, ExitCodePolicy};
use crate::coordinator::QueryCoordinator;
use crate::error::ConsultError;
use crate::sink::{ConsoleSink, OutputSink};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, info_span};

pub struct Driver {
    config: ConsultConfig,
    loader: Box<dyn DocumentLoader>,
    backend: Box<dyn BackendFactory>,
}

impl Driver {
    pub fn new(config: ConsultConfig) -> Self {
        Self {
            config,
            loader: Box::new(DefaultDocumentLoader),
            backend: Box::new(DefaultBackendFactory),
        }
    }

    pub fn with_loader(mut self, loader: Box<dyn DocumentLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_backend(mut self, backend: Box<dyn BackendFactory>) -> Self {
        self.backend = backend;
        self
    }

    pub fn config(&self) -> &ConsultConfig {
        &self.config
    }

    /// Runs one consultation and returns the process exit status.
    ///
    /// `args` are the positional arguments without the program name:
    /// input document, output document, query text. Anything after the
    /// third argument is ignored.
    pub fn run<S: AsRef<str>>(&self, args: &[S], stdout: &mut dyn Write) -> i32 {
        let span = info_span!("consult");
        let _guard = span.enter();

        let mut console = ConsoleSink::new(stdout);
        let outcome = self.consult(args, &mut console);

        let status = match outcome {
            Ok(()) => 0,
            Err(e) => {
                // write failures are already reported between the JSON and the summary
                if !matches!(e, ConsultError::OutputWrite(_)) {
                    console.line(&e.to_string());
                }
                error!(error = ?e, "consultation failed");
                match self.config.exit_codes {
                    ExitCodePolicy::Parity => 0,
                    ExitCodePolicy::Strict => e.exit_code(),
                }
            }
        };
        console.flush();
        status
    }

    fn consult<S: AsRef<str>>(&self, args: &[S], console: &mut ConsoleSink<'_>) -> Result<(), ConsultError> {
        let [input, output, query_text, ..] = args else {
            return Err(ConsultError::Usage);
        };
        let input = Path::new(input.as_ref());
        let output = Path::new(output.as_ref());
        let query_text = query_text.as_ref();

        File::open(input).map_err(|e| ConsultError::Load(format!("{}: {}", input.display(), e)))?;
        let mut sink = OutputSink::open(output)?;

        let kb = Bootstrapper::new(self.loader.as_ref(), self.backend.as_ref())
            .with_precompute(self.config.precompute)
            .load(input)?;

        let coordinator = QueryCoordinator::new(self.config.max_bindings);
        let query = coordinator.parse(query_text)?;
        let started = Instant::now();

        console.query(query_text);
        let result = coordinator.evaluate(&query, kb.as_ref())?;

        console.xml(&result);
        console.json(&result);
        let written = sink.append(&result);
        if let Err(e) = &written {
            console.line(&e.to_string());
        }
        let elapsed = started.elapsed();
        console.summary(result.size(), elapsed);

        info!(
            size = result.size(),
            elapsed_ms = elapsed.as_millis() as u64,
            output = %sink.path().display(),
            "consultation finished"
        );
        written
    }
}
