//! Capabilities that decide which values a rule can inspect.
//!
//! Rules are generic over these traits rather than over concrete types, so
//! the same `max` tag works on an integer, a string or a `Vec`.

use std::collections::{BTreeMap, HashMap};

/// Whether a value counts as present for the `required` rule.
///
/// Zero values are missing: empty strings, empty collections, `None`,
/// numeric zero and `false`.
pub trait Presence {
    fn is_present(&self) -> bool;
}

/// The quantity compared by `min`, `max` and `range`.
///
/// Numbers measure by value, strings by character count and collections by
/// length. `None` means "nothing to measure" and the rule is skipped.
pub trait Measure {
    fn measure(&self) -> Option<f64>;
}

/// Length of a string (in characters) or collection, for `length`.
pub trait Length {
    fn length(&self) -> Option<usize>;
}

/// Textual view of a value for `email`, `url` and `regex`.
pub trait Text {
    fn text(&self) -> Option<&str>;
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

impl Presence for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for [T] {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, S> Presence for HashMap<K, V, S> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Presence for BTreeMap<K, V> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl<T: Presence + ?Sized> Presence for Box<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl Length for str {
    fn length(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Length for String {
    fn length(&self) -> Option<usize> {
        self.as_str().length()
    }
}

impl<T> Length for Vec<T> {
    fn length(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> Length for [T] {
    fn length(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<K, V, S> Length for HashMap<K, V, S> {
    fn length(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<K, V> Length for BTreeMap<K, V> {
    fn length(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Length> Length for Option<T> {
    fn length(&self) -> Option<usize> {
        self.as_ref().and_then(Length::length)
    }
}

impl<T: Length + ?Sized> Length for &T {
    fn length(&self) -> Option<usize> {
        (**self).length()
    }
}

impl<T: Length + ?Sized> Length for Box<T> {
    fn length(&self) -> Option<usize> {
        (**self).length()
    }
}

macro_rules! numeric {
    ($($ty:ty),*) => {
        $(
            impl Presence for $ty {
                #[allow(clippy::float_cmp)]
                fn is_present(&self) -> bool {
                    *self != (0 as $ty)
                }
            }

            impl Measure for $ty {
                fn measure(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

macro_rules! measured_by_length {
    ($($ty:ty => [$($gen:tt)*]),* $(,)?) => {
        $(
            impl<$($gen)*> Measure for $ty {
                fn measure(&self) -> Option<f64> {
                    self.length().map(|len| len as f64)
                }
            }
        )*
    };
}

measured_by_length!(
    String => [],
    Vec<T> => [T],
    HashMap<K, V, S> => [K, V, S],
    BTreeMap<K, V> => [K, V],
);

impl Measure for str {
    fn measure(&self) -> Option<f64> {
        self.length().map(|len| len as f64)
    }
}

impl<T> Measure for [T] {
    fn measure(&self) -> Option<f64> {
        Some(self.len() as f64)
    }
}

impl<T: Measure> Measure for Option<T> {
    fn measure(&self) -> Option<f64> {
        self.as_ref().and_then(Measure::measure)
    }
}

impl<T: Measure + ?Sized> Measure for &T {
    fn measure(&self) -> Option<f64> {
        (**self).measure()
    }
}

impl<T: Measure + ?Sized> Measure for Box<T> {
    fn measure(&self) -> Option<f64> {
        (**self).measure()
    }
}

impl Text for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl Text for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: Text> Text for Option<T> {
    fn text(&self) -> Option<&str> {
        self.as_ref().and_then(Text::text)
    }
}

impl<T: Text + ?Sized> Text for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

impl<T: Text + ?Sized> Text for Box<T> {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_are_missing() {
        assert!(!"".is_present());
        assert!(!0_i32.is_present());
        assert!(!0.0_f64.is_present());
        assert!(!false.is_present());
        assert!(!None::<String>.is_present());
        assert!(!Vec::<u8>::new().is_present());
    }

    #[test]
    fn non_zero_values_are_present() {
        assert!("a".is_present());
        assert!("   ".is_present());
        assert!(7_u8.is_present());
        assert!(true.is_present());
        assert!(Some(String::new()).is_present());
        assert!(vec![1].is_present());
    }

    #[test]
    fn measure_by_value_or_length() {
        assert_eq!(3_i64.measure(), Some(3.0));
        assert_eq!("héllo".to_string().measure(), Some(5.0));
        assert_eq!(vec![1, 2].measure(), Some(2.0));
        assert_eq!(None::<u32>.measure(), None);
        assert_eq!(Some(4_u32).measure(), Some(4.0));
    }

    #[test]
    fn text_skips_none() {
        assert_eq!(Some("a".to_string()).text(), Some("a"));
        assert_eq!(None::<String>.text(), None);
    }
}
