//! Writing resolved attributes onto host elements.

use crate::core::{AttributeSet, AttributeValue};
use crate::engine::StateMachineDelegate;
use std::collections::BTreeSet;
use tracing::warn;

/// A host UI element whose properties can be driven by name.
pub trait Element {
    /// Write `value` to the property called `name`.
    ///
    /// Returns `false` when the element has no such property.
    fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> bool;
}

/// Delegate that forwards every resolved attribute to an [`Element`].
///
/// Names the element does not recognise are skipped; each one is logged the
/// first time it shows up.
#[derive(Debug)]
pub struct ElementDelegate<E> {
    element: E,
    ignored: BTreeSet<String>,
}

impl<E: Element> ElementDelegate<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            ignored: BTreeSet::new(),
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub fn into_element(self) -> E {
        self.element
    }

    /// Attribute names the element has rejected so far.
    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }
}

impl<E: Element> StateMachineDelegate for ElementDelegate<E> {
    fn apply(&mut self, attributes: &AttributeSet) {
        for (name, value) in attributes {
            if !self.element.set_attribute(name, value) && self.ignored.insert(name.clone()) {
                warn!(attribute = %name, "element has no such attribute; ignoring");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Label {
        opacity: f64,
        writes: usize,
    }

    impl Element for Label {
        fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> bool {
            match (name, value.scalar()) {
                ("opacity", Some(opacity)) => {
                    self.opacity = opacity;
                    self.writes += 1;
                    true
                }
                _ => false,
            }
        }
    }

    #[test]
    fn known_attributes_reach_element() {
        let mut delegate = ElementDelegate::new(Label::default());
        delegate.apply(&AttributeSet::new().with("opacity", 0.75));

        assert_eq!(delegate.element().opacity, 0.75);
        assert_eq!(delegate.ignored().count(), 0);
    }

    #[test]
    fn unknown_attributes_are_remembered_once() {
        let mut delegate = ElementDelegate::new(Label::default());
        let attributes = AttributeSet::new()
            .with("opacity", 1.0)
            .with("rotation", 90.0);

        delegate.apply(&attributes);
        delegate.apply(&attributes);

        assert_eq!(delegate.ignored().collect::<Vec<_>>(), vec!["rotation"]);
        assert_eq!(delegate.into_element().writes, 2);
    }
}
