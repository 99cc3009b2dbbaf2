//! Built-in version filter factories

pub mod composite;
pub mod qualifier;
pub mod release;

pub use composite::CompositeVersionFilterFactory;
pub use qualifier::QualifierVersionFilterFactory;
pub use release::ReleaseVersionFilterFactory;
