use crate::{
    constants::{defaults, sizes::GIB},
    error_handling::{ScanError, ScanResult},
};

/// Immutable scan and report settings, passed explicitly down to the workers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub threads: usize,
    /// Nodes whose size does not exceed this are left out of the report
    pub min_report_bytes: u64,
    /// Collapse chains of single-child directories into one line
    pub elide: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threads: defaults::THREADS,
            min_report_bytes: defaults::MIN_REPORT_GIB * GIB,
            elide: true,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct OptionsBuilder {
    pub threads: Option<usize>,
    pub min_report_gib: Option<u64>,
    pub elide: Option<bool>,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threads(mut self, v: usize) -> Self {
        self.threads = Some(v);
        self
    }
    /// Minimum reportable size in whole GiB.
    pub fn min_report_gib(mut self, v: u64) -> Self {
        self.min_report_gib = Some(v);
        self
    }
    pub fn elide(mut self, v: bool) -> Self {
        self.elide = Some(v);
        self
    }
    /// Fill unset fields from another builder (e.g. a config file).
    pub fn or(mut self, fallback: OptionsBuilder) -> Self {
        self.threads = self.threads.or(fallback.threads);
        self.min_report_gib = self.min_report_gib.or(fallback.min_report_gib);
        self.elide = self.elide.or(fallback.elide);
        self
    }

    pub fn build(self) -> ScanResult<Options> {
        let mut opt = Options::default();
        if let Some(v) = self.threads {
            if v == 0 {
                return Err(ScanError::BadOption {
                    option: "threads",
                    reason: "must be at least 1".into(),
                });
            }
            opt.threads = v;
        }
        if let Some(v) = self.min_report_gib {
            opt.min_report_bytes = v.checked_mul(GIB).ok_or_else(|| ScanError::BadOption {
                option: "size",
                reason: format!("{v} GiB does not fit in 64 bits of bytes"),
            })?;
        }
        if let Some(v) = self.elide {
            opt.elide = v;
        }
        Ok(opt)
    }
}
