//! Operation flags

/// Flags for the `up` operation
#[derive(Debug, Clone, Copy, Default)]
pub struct UpOptions {
    /// Keep applying remaining components after a per-component failure
    pub ignore: bool,
    /// Build and push images before applying
    pub build: bool,
    /// Tear the stack down first
    pub restart: bool,
}

/// Flags for the `build` operation
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// Push built tags where platform policy allows it
    pub push: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { push: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_defaults_are_conservative() {
        let options = UpOptions::default();
        assert!(!options.ignore);
        assert!(!options.build);
        assert!(!options.restart);
    }

    #[test]
    fn build_defaults_to_push() {
        assert!(BuildOptions::default().push);
    }
}
