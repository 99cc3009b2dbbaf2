use std::sync::Arc;

use crate::filter::version::{VersionFilter, VersionFilterFactory};
use crate::model::error::{InvalidInputError, ensure_not_empty};

/// Accepts a candidate only when every underlying filter does
#[derive(Clone)]
pub struct CompositeVersionFilterFactory {
    factories: Vec<Arc<dyn VersionFilterFactory>>,
}

impl CompositeVersionFilterFactory {
    pub fn new(factories: Vec<Arc<dyn VersionFilterFactory>>) -> Result<Self, InvalidInputError> {
        if factories.is_empty() {
            return Err(InvalidInputError::Empty("factories"));
        }
        Ok(Self { factories })
    }

    /// Composite of `first` followed by `rest`
    pub fn from_parts(
        first: Arc<dyn VersionFilterFactory>,
        rest: impl IntoIterator<Item = Arc<dyn VersionFilterFactory>>,
    ) -> Self {
        let mut factories = vec![first];
        factories.extend(rest);
        Self { factories }
    }
}

impl VersionFilterFactory for CompositeVersionFilterFactory {
    fn create(&self, declared_version: &str) -> Result<Box<dyn VersionFilter>, InvalidInputError> {
        ensure_not_empty("declaredVersion", declared_version)?;
        let filters = self
            .factories
            .iter()
            .map(|factory| factory.create(declared_version))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Box::new(CompositeVersionFilter { filters }))
    }
}

struct CompositeVersionFilter {
    filters: Vec<Box<dyn VersionFilter>>,
}

impl VersionFilter for CompositeVersionFilter {
    fn accept(&self, version: &str) -> Result<bool, InvalidInputError> {
        ensure_not_empty("version", version)?;
        for filter in &self.filters {
            if !filter.accept(version)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
