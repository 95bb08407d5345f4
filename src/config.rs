//! Configuration management for sort operations

use crate::error::{SortError, SortResult};
use crate::key::{self, KeyInterpreter};

/// How a line is cut into fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSplit {
    /// Split on maximal runs of whitespace, dropping empty tokens
    Whitespace,
    /// Split on every literal occurrence of a non-empty byte string
    Separator(Vec<u8>),
}

impl FieldSplit {
    /// Build a separator rule; an empty separator means whitespace runs.
    pub fn separator(sep: &str) -> Self {
        if sep.is_empty() {
            FieldSplit::Whitespace
        } else {
            FieldSplit::Separator(sep.as_bytes().to_vec())
        }
    }
}

impl Default for FieldSplit {
    fn default() -> Self {
        FieldSplit::Separator(b"\t".to_vec())
    }
}

/// Main configuration structure for sort operations
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Active key comparison mode
    pub mode: SortMode,
    /// Field used as the sort key (1-based)
    pub field: usize,
    /// Splitting rule for field extraction
    pub split: FieldSplit,
    /// Sort order (normal or reverse)
    pub reverse: bool,
    /// Strip trailing spaces and tabs before splitting
    pub trim_trailing: bool,
    /// Drop adjacent duplicate lines after sorting
    pub unique: bool,
    /// Check if input is already sorted
    pub check: bool,
    /// File to read from (if not specified, use stdin)
    pub input_file: Option<String>,
}

/// Sort mode enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Standard lexicographic sorting
    Lexicographic,
    /// Numeric sorting (floating point)
    Numeric,
    /// Human-readable numeric sorting (with suffixes like K, M, GiB)
    HumanNumeric,
    /// Month name sorting
    Month,
}

impl SortMode {
    /// Modes in the order they win when more than one is requested.
    pub const PRECEDENCE: [SortMode; 4] = [
        SortMode::HumanNumeric,
        SortMode::Numeric,
        SortMode::Month,
        SortMode::Lexicographic,
    ];

    /// Pick the highest-precedence mode among the requested ones.
    pub fn resolve(requested: &[SortMode]) -> SortMode {
        Self::PRECEDENCE
            .into_iter()
            .find(|mode| requested.contains(mode))
            .unwrap_or(SortMode::Lexicographic)
    }

    /// The key interpreter implementing this mode
    pub fn interpreter(self) -> &'static dyn KeyInterpreter {
        match self {
            SortMode::Lexicographic => &key::LEXICOGRAPHIC,
            SortMode::Numeric => &key::NUMERIC,
            SortMode::HumanNumeric => &key::HUMAN_SIZE,
            SortMode::Month => &key::MONTH,
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            mode: SortMode::Lexicographic,
            field: 1,
            split: FieldSplit::default(),
            reverse: false,
            trim_trailing: false,
            unique: false,
            check: false,
            input_file: None,
        }
    }
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sort mode
    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the key field
    pub fn with_field(mut self, field: usize) -> Self {
        self.field = field;
        self
    }

    /// Set the splitting rule
    pub fn with_split(mut self, split: FieldSplit) -> Self {
        self.split = split;
        self
    }

    /// Enable reverse sorting
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Enable trailing blank trimming
    pub fn with_trim_trailing(mut self, trim_trailing: bool) -> Self {
        self.trim_trailing = trim_trailing;
        self
    }

    /// Enable unique output
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Enable check mode
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Set input file
    pub fn with_input_file(mut self, input_file: Option<String>) -> Self {
        self.input_file = input_file;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if self.field == 0 {
            return Err(SortError::invalid_field_spec(
                "0 (field numbers start at 1)",
            ));
        }

        if let FieldSplit::Separator(sep) = &self.split {
            if sep.is_empty() {
                return Err(SortError::invalid_field_separator(
                    "empty separator (use whitespace splitting instead)",
                ));
            }
        }

        Ok(())
    }

    /// Check if reading from stdin
    pub fn reading_from_stdin(&self) -> bool {
        matches!(self.input_file.as_deref(), None | Some("-"))
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortMode::Lexicographic => "lexicographic",
            SortMode::Numeric => "numeric",
            SortMode::HumanNumeric => "human-numeric",
            SortMode::Month => "month",
        };
        write!(f, "{name}")
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
    requested: Vec<SortMode>,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
            requested: Vec::new(),
        }
    }

    /// Request a sort mode; conflicting requests are settled by precedence
    pub fn mode(mut self, mode: SortMode) -> Self {
        self.requested.push(mode);
        self
    }

    /// Set the key field
    pub fn field(mut self, field: usize) -> Self {
        self.config.field = field;
        self
    }

    /// Split on a literal separator
    pub fn separator(mut self, sep: &str) -> Self {
        self.config.split = FieldSplit::separator(sep);
        self
    }

    /// Split on whitespace runs
    pub fn whitespace(mut self) -> Self {
        self.config.split = FieldSplit::Whitespace;
        self
    }

    /// Enable reverse sorting
    pub fn reverse(mut self) -> Self {
        self.config.reverse = true;
        self
    }

    /// Strip trailing blanks before splitting
    pub fn trim_trailing(mut self) -> Self {
        self.config.trim_trailing = true;
        self
    }

    /// Enable unique output
    pub fn unique(mut self) -> Self {
        self.config.unique = true;
        self
    }

    /// Enable check mode
    pub fn check(mut self) -> Self {
        self.config.check = true;
        self
    }

    /// Set input file
    pub fn input_file(mut self, file: String) -> Self {
        self.config.input_file = Some(file);
        self
    }

    /// Build the final configuration
    pub fn build(mut self) -> SortResult<SortConfig> {
        self.config.mode = SortMode::resolve(&self.requested);
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
