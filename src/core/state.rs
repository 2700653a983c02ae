//! Named states.
//!
//! A state is an immutable, named overlay of attribute values. States are
//! defined once when a template is built and never change afterwards.

use super::attributes::AttributeSet;
use serde::{Deserialize, Serialize};

/// A named bundle of attribute values.
///
/// # Example
///
/// ```rust
/// use blendstate::attributes;
/// use blendstate::core::NamedState;
///
/// let present = NamedState::new("present", attributes! { "opacity" => 1.0 });
/// assert_eq!(present.id(), "present");
/// assert!(present.attributes().contains("opacity"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedState {
    id: String,
    attributes: AttributeSet,
}

impl NamedState {
    pub fn new(id: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }
}
