use std::fmt;

use num_traits::{NumCast, PrimInt, Unsigned};

/// Unsigned primitive capable of holding one ring element.
///
/// The engine widens to `u128` for digit decomposition, so the trait carries
/// the two lossless conversions alongside the `num-traits` arithmetic bounds.
pub trait Word: PrimInt + Unsigned + fmt::Debug + fmt::Display {
    fn to_wide(self) -> u128;

    /// Narrow from the working width; `None` when the value does not fit.
    fn from_wide(value: u128) -> Option<Self>;
}

impl<T> Word for T
where
    T: PrimInt + Unsigned + fmt::Debug + fmt::Display,
{
    fn to_wide(self) -> u128 {
        self.to_u128().expect("unsigned words widen losslessly")
    }

    fn from_wide(value: u128) -> Option<Self> {
        <Self as NumCast>::from(value)
    }
}
