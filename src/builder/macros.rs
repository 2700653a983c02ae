//! Macros for ergonomic state construction.

/// Build an [`AttributeSet`](crate::core::AttributeSet) from `name => value`
/// pairs.
///
/// Values can be anything convertible into an
/// [`AttributeValue`](crate::core::AttributeValue): an `f64`, an array of
/// channels, or a ready-made value.
///
/// # Example
///
/// ```
/// use blendstate::attributes;
/// use blendstate::core::Basis;
///
/// let highlighted = attributes! {
///     "opacity" => 1.0,
///     "tint" => [1.0, 0.8, 0.2, 1.0],
/// };
///
/// assert_eq!(highlighted.len(), 2);
/// assert_eq!(
///     highlighted.get("tint").and_then(|v| v.channel(Basis(1))),
///     Some(0.8)
/// );
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::core::AttributeSet::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut set = $crate::core::AttributeSet::new();
        $(
            set.insert($name, $crate::core::AttributeValue::from($value));
        )+
        set
    }};
}
