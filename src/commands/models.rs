use crate::parser::IoLevel;
use crate::translator::IoMode;
use std::path::PathBuf;

/// Arguments for the profile command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ProfileArgs {
    /// Tracer log to analyze
    pub log_file: PathBuf,

    /// Restrict statistics to a single level (None = all levels)
    pub level: Option<IoLevel>,

    /// Output path for the JSON profile (optional)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for ProfileArgs {
    fn default() -> Self {
        Self {
            log_file: PathBuf::new(),
            level: None,
            output_json: Some(PathBuf::from("profile.json")),
            print_summary: true,
        }
    }
}

/// Arguments for the translate command
#[derive(Debug, Clone)]
pub struct TranslateArgs {
    /// Tracer log holding the file accesses
    pub log_file: PathBuf,

    /// JSON extent table of the traced file
    pub extent_file: PathBuf,

    /// Direct or buffered I/O
    pub mode: IoMode,
}

impl Default for TranslateArgs {
    fn default() -> Self {
        Self {
            log_file: PathBuf::new(),
            extent_file: PathBuf::new(),
            mode: IoMode::Buffered,
        }
    }
}

/// Arguments for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Tracer log to check
    pub log_file: PathBuf,

    /// TOML description of the expected workload
    pub expectation_file: PathBuf,

    /// The workload used direct I/O
    pub direct_io: bool,

    /// Output path for the JSON check report (optional)
    pub output_json: Option<PathBuf>,
}
