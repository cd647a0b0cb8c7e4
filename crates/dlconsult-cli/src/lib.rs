//! # dlconsult CLI Library
//!
//! OWL 知識ベースに対する一回限りの SPARQL-DL 問い合わせ
//! 文書を読み込み、推論を事前計算し、クエリ結果をコンソールと出力ファイルへ書き出す

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod driver;
pub mod error;
pub mod sink;

pub use bootstrap::{
    BackendFactory, Bootstrapper, DefaultBackendFactory, DefaultDocumentLoader, DocumentLoader, PRECOMPUTED_INFERENCES,
};
pub use cli::Cli;
pub use config::{ConsultConfig, ExitCodePolicy};
pub use coordinator::QueryCoordinator;
pub use driver::Driver;
pub use error::ConsultError;
pub use sink::{ConsoleSink, OutputSink};
