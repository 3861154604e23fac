use super::types::{ParamSet, SearchSpace};
use crate::error::Result;

/// Grid search generator
#[derive(Debug, Clone)]
pub struct GridSearch {
    space: SearchSpace,
}

impl GridSearch {
    pub fn new(space: SearchSpace) -> Self {
        Self { space }
    }

    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Generate all grid configurations
    ///
    /// The first dimension varies slowest and the last fastest. A space without
    /// dimensions yields a single empty configuration.
    ///
    /// **Errors** if any dimension has no candidates
    pub fn configurations(&self) -> Result<Vec<ParamSet>> {
        self.space.validate()?;

        let mut configs = vec![ParamSet::new()];
        for (name, values) in self.space.iter() {
            configs = configs
                .iter()
                .flat_map(|prefix| {
                    values.iter().map(move |&v| {
                        let mut config = prefix.clone();
                        config.insert(name, v);
                        config
                    })
                })
                .collect();
        }

        Ok(configs)
    }
}
