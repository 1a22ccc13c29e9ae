//! Descriptor model for target interfaces.
//!
//! Scanning a target interface once produces a [`DataObjectDescriptor`]: the
//! ordered list of [`ValueDescriptor`] property mappings plus the annotation
//! markers the generated implementation should inherit. The
//! [`DescriptorFactory`] owns the scan (validation, accessor-name derivation,
//! depth-first super-interface walk with first-wins shadowing) and memoizes the
//! resulting snapshots.

#[allow(clippy::module_inception)]
mod descriptor;
mod factory;

pub use descriptor::{DataObjectDescriptor, ValueDescriptor};
pub use factory::DescriptorFactory;
