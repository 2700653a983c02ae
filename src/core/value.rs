//! Interpolation values.
//!
//! Every attribute value is a sequence of weighted numeric components. The
//! engine only ever scales and concatenates these sequences; turning them back
//! into a concrete quantity (an opacity, a color, an offset) is left to the
//! delegate, which reads the per-basis sums via [`AttributeValue::resolve`].

use serde::{Deserialize, Serialize};

/// Identifier of the underlying quantity a component contributes to.
///
/// Scalars use [`Basis::SCALAR`]; multi-channel values number their channels
/// from zero (`r, g, b, a` for colors, `x, y` for offsets).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Basis(pub u16);

impl Basis {
    pub const SCALAR: Basis = Basis(0);
}

/// A single weighted contribution to a basis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub coefficient: f64,
    pub basis: Basis,
}

impl Component {
    pub fn new(coefficient: f64, basis: Basis) -> Self {
        Self { coefficient, basis }
    }

    /// Copy of this component with its coefficient multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            coefficient: self.coefficient * factor,
            basis: self.basis,
        }
    }
}

/// Ordered sequence of components describing one attribute.
///
/// Order is significant: resolution sums coefficients front to back, so two
/// values holding the same components in a different order may resolve to
/// slightly different floats.
///
/// # Example
///
/// ```rust
/// use blendstate::core::{AttributeValue, Basis};
///
/// let color = AttributeValue::channels(&[1.0, 0.5, 0.0, 1.0]);
/// assert_eq!(color.channel(Basis(1)), Some(0.5));
///
/// let opacity = AttributeValue::number(0.25);
/// assert_eq!(opacity.scalar(), Some(0.25));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeValue {
    components: Vec<Component>,
}

impl AttributeValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_components(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// A single-component value on [`Basis::SCALAR`].
    pub fn number(value: f64) -> Self {
        Self {
            components: vec![Component::new(value, Basis::SCALAR)],
        }
    }

    /// One component per channel, channel `i` on `Basis(i)`.
    pub fn channels(values: &[f64]) -> Self {
        Self {
            components: values
                .iter()
                .enumerate()
                .map(|(i, v)| Component::new(*v, Basis(i as u16)))
                .collect(),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn push(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Append every component of `other` after this value's components.
    pub fn extend_from(&mut self, other: &AttributeValue) {
        self.components.extend_from_slice(&other.components);
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            components: self.components.iter().map(|c| c.scaled(factor)).collect(),
        }
    }

    /// Sum coefficients per basis, in component order.
    ///
    /// Bases are reported in order of first appearance.
    pub fn resolve(&self) -> Vec<(Basis, f64)> {
        let mut sums: Vec<(Basis, f64)> = Vec::new();
        for component in &self.components {
            match sums.iter_mut().find(|(basis, _)| *basis == component.basis) {
                Some((_, sum)) => *sum += component.coefficient,
                None => sums.push((component.basis, component.coefficient)),
            }
        }
        sums
    }

    /// Resolved sum for a single basis, or `None` if no component targets it.
    pub fn channel(&self, basis: Basis) -> Option<f64> {
        self.resolve()
            .into_iter()
            .find_map(|(b, sum)| (b == basis).then_some(sum))
    }

    pub fn scalar(&self) -> Option<f64> {
        self.channel(Basis::SCALAR)
    }

    /// Replace the component list with one component per resolved basis.
    ///
    /// Resolving the collapsed value yields exactly the same sums as
    /// resolving `self`.
    pub fn collapse(&self) -> Self {
        Self {
            components: self
                .resolve()
                .into_iter()
                .map(|(basis, sum)| Component::new(sum, basis))
                .collect(),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl<const N: usize> From<[f64; N]> for AttributeValue {
    fn from(values: [f64; N]) -> Self {
        Self::channels(&values)
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(values: Vec<f64>) -> Self {
        Self::channels(&values)
    }
}

impl From<Vec<Component>> for AttributeValue {
    fn from(components: Vec<Component>) -> Self {
        Self::from_components(components)
    }
}
