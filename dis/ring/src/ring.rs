use thiserror::Error;

use crate::word::Word;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base must be at least 2, got {0}")]
    BaseTooSmall(u32),
    #[error("digit count must be at least 1")]
    NoDigits,
    #[error("{base}^{digits} exceeds the engine's working range")]
    ModulusTooLarge { base: u32, digits: u32 },
    #[error("word type cannot hold {base}^{digits} - 1")]
    WordTooNarrow { base: u32, digits: u32 },
}

/// Arithmetic over Z/(B^N) with base-B digit operations.
///
/// Construction validates the configuration once; after that every operation
/// is total over ring elements. `END = B^N` may exceed `T::MAX` by one (for
/// exact-width configurations such as base 2, eight digits, over `u8`), so
/// `END` is reported as `u128` and the modular operations use the
/// non-overflowing branch form `x - (END - y)` instead of ever forming
/// `x + y` when it would not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring<T: Word> {
    base: u32,
    digits: u32,
    end: u128,
    max: T,
}

impl<T: Word> Ring<T> {
    pub fn new(base: u32, digits: u32) -> Result<Self> {
        if base < 2 {
            return Err(ConfigError::BaseTooSmall(base));
        }
        if digits == 0 {
            return Err(ConfigError::NoDigits);
        }
        let end = (base as u128)
            .checked_pow(digits)
            .ok_or(ConfigError::ModulusTooLarge { base, digits })?;
        let max = T::from_wide(end - 1).ok_or(ConfigError::WordTooNarrow { base, digits })?;
        Ok(Self {
            base,
            digits,
            end,
            max,
        })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// The ring modulus `B^N`.
    pub fn end(&self) -> u128 {
        self.end
    }

    /// The largest ring element, `END - 1`.
    pub fn max(&self) -> T {
        self.max
    }

    pub fn contains(&self, x: T) -> bool {
        x <= self.max
    }

    /// Reduce an arbitrary wide value into the ring.
    pub fn wrap(&self, value: u128) -> T {
        self.narrow(value % self.end)
    }

    pub fn successor(&self, x: T) -> T {
        if x == self.max {
            T::zero()
        } else {
            x + T::one()
        }
    }

    pub fn predecessor(&self, x: T) -> T {
        if x == T::zero() {
            self.max
        } else {
            x - T::one()
        }
    }

    /// `x + y mod END` without ever forming a sum that could overflow `T`.
    pub fn add(&self, x: T, y: T) -> T {
        if x <= self.max - y {
            x + y
        } else {
            x - (self.max - y) - T::one()
        }
    }

    /// `x - y mod END`, symmetric to [`Ring::add`].
    pub fn sub(&self, x: T, y: T) -> T {
        if x >= y {
            x - y
        } else {
            x + (self.max - y) + T::one()
        }
    }

    /// Cyclic rotation of the base-B digit string by one position: the least
    /// significant digit becomes the most significant, the rest shift down.
    pub fn rotate_right(&self, x: T) -> T {
        let wide = x.to_wide();
        let base = self.base as u128;
        let low = wide % base;
        self.narrow(wide / base + low * (self.end / base))
    }

    /// Per-digit `(B + d_i(x) - d_i(y)) mod B`, with no borrow carried
    /// between digit positions. Both inputs zero short-circuits the
    /// decomposition.
    pub fn digit_subtract(&self, x: T, y: T) -> T {
        let base = self.base as u128;
        let mut x = x.to_wide();
        let mut y = y.to_wide();
        let mut acc = 0u128;
        let mut weight = 1u128;
        while x > 0 || y > 0 {
            acc += ((base + x % base - y % base) % base) * weight;
            x /= base;
            y /= base;
            weight *= base;
        }
        self.narrow(acc)
    }

    fn narrow(&self, value: u128) -> T {
        debug_assert!(value < self.end);
        T::from_wide(value).expect("reduced values fit the configured word")
    }
}
