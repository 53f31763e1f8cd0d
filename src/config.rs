use std::path::PathBuf;

use crate::source::PopplerTools;

/// What one indentation step looks like in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentUnit {
    #[default]
    FourSpaces,
    Tab,
}

impl IndentUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentUnit::FourSpaces => "    ",
            IndentUnit::Tab => "\t",
        }
    }
}

/// Whether fragments are reconstructed in the order the engine reported them
/// or re-sorted by position first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingOrder {
    #[default]
    Engine,
    Geometric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    #[default]
    Tesseract,
    Bridge,
}

/// Read-only formatting and diagnostic switches for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub indent_enabled: bool,
    pub indent_unit: IndentUnit,
    pub page_break: bool,
    pub verbose: bool,
    pub reading_order: ReadingOrder,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent_enabled: true,
            indent_unit: IndentUnit::FourSpaces,
            page_break: false,
            verbose: false,
            reading_order: ReadingOrder::Engine,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub options: Options,
    pub engine: EngineKind,
    pub lang: String,
    pub dpi: u32,
    pub bridge_script: Option<PathBuf>,
    pub poppler: PopplerTools,
}

impl PipelineConfig {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            engine: EngineKind::Tesseract,
            lang: "eng".to_string(),
            dpi: 200,
            bridge_script: None,
            poppler: PopplerTools::default(),
        }
    }

    pub fn with_engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_bridge_script(mut self, script: Option<PathBuf>) -> Self {
        self.bridge_script = script;
        self
    }

    pub fn with_poppler(mut self, poppler: PopplerTools) -> Self {
        self.poppler = poppler;
        self
    }
}
