use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, ValueEnum};
use tracing::error;

use pagetext::config::{EngineKind, IndentUnit, Options, PipelineConfig, ReadingOrder};
use pagetext::diagnostics;
use pagetext::export::StreamingSink;
use pagetext::ocr::engine_for;
use pagetext::pipeline::run;
use pagetext::source::PopplerTools;

#[derive(Parser, Debug)]
#[command(name = "pagetext")]
#[command(version, about = "Recognize text in images and PDFs, keeping paragraphs and indentation", long_about = None)]
struct Cli {
    /// Insert a page-break marker (form feed) between PDF pages
    #[arg(short = 'p', long = "page-breaks")]
    page_breaks: bool,

    /// Report INFO and ERROR messages on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Indentation unit, or `no` to disable indentation
    #[arg(short = 'i', long = "indent", value_enum, default_value_t = IndentArg::Spaces)]
    indent: IndentArg,

    /// Recognition engine
    #[arg(long, value_enum, default_value_t = EngineArg::Tesseract)]
    engine: EngineArg,

    /// Recognition languages, e.g. `eng+deu`
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Rendering DPI for PDF pages
    #[arg(long, default_value_t = 200)]
    dpi: u32,

    /// Helper script for the bridge engine
    #[arg(long, value_name = "SCRIPT")]
    bridge: Option<PathBuf>,

    /// Path to the `pdfinfo` binary
    #[arg(long, value_name = "PATH", default_value = "pdfinfo")]
    pdfinfo: PathBuf,

    /// Path to the `pdftoppm` binary
    #[arg(long, value_name = "PATH", default_value = "pdftoppm")]
    pdftoppm: PathBuf,

    /// Order fragments as the engine reports them, or top-to-bottom by position
    #[arg(long, value_enum, default_value_t = OrderArg::Engine)]
    order: OrderArg,

    /// Image or PDF files
    files: Vec<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum IndentArg {
    No,
    Tab,
    Spaces,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum EngineArg {
    Tesseract,
    Bridge,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum OrderArg {
    Engine,
    Geometric,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            indent_enabled: self.indent != IndentArg::No,
            indent_unit: match self.indent {
                IndentArg::Tab => IndentUnit::Tab,
                IndentArg::No | IndentArg::Spaces => IndentUnit::FourSpaces,
            },
            page_break: self.page_breaks,
            verbose: self.verbose,
            reading_order: match self.order {
                OrderArg::Engine => ReadingOrder::Engine,
                OrderArg::Geometric => ReadingOrder::Geometric,
            },
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        let engine = match self.engine {
            EngineArg::Tesseract => EngineKind::Tesseract,
            EngineArg::Bridge => EngineKind::Bridge,
        };
        PipelineConfig::new(self.options())
            .with_engine(engine)
            .with_lang(self.lang.clone())
            .with_dpi(self.dpi)
            .with_bridge_script(self.bridge.clone())
            .with_poppler(PopplerTools {
                pdfinfo: self.pdfinfo.clone(),
                pdftoppm: self.pdftoppm.clone(),
            })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::from(1);
    }

    let config = cli.pipeline_config();
    let subscriber = diagnostics::stderr_subscriber(&config.options);
    tracing::subscriber::with_default(subscriber, || execute(&cli.files, &config))
}

fn execute(files: &[PathBuf], config: &PipelineConfig) -> ExitCode {
    let engine = engine_for(config);
    let mut sink = StreamingSink::new(io::stdout().lock());

    let summary = match run(files, config, engine.as_ref(), &mut sink) {
        Ok(summary) => summary,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(1);
        }
    };

    if let Err(err) = sink.into_inner().flush() {
        error!("cannot write output: {err}");
        return ExitCode::from(1);
    }

    ExitCode::from(summary.exit_code())
}
