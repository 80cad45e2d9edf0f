//! Operation outcome summaries

/// What a `build` run produced
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Image tags created, in build order
    pub tags: Vec<String>,
    /// Component ids skipped for a missing build file or platform policy
    pub skipped: Vec<String>,
}

/// What an `up` run applied
#[derive(Debug, Clone, Default)]
pub struct UpReport {
    /// Component ids applied successfully, in order
    pub applied: Vec<String>,
    /// Component ids whose apply failed but was tolerated
    pub failed: Vec<String>,
}

impl UpReport {
    /// True when nothing failed, not even tolerated failures
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_clean() {
        assert!(UpReport::default().is_clean());
    }

    #[test]
    fn tolerated_failure_is_not_clean() {
        let report = UpReport {
            applied: vec!["shop-database-db".to_string()],
            failed: vec!["shop-application-web".to_string()],
        };
        assert!(!report.is_clean());
    }
}
