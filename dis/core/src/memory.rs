use dis_ring::{Ring, Word};

use crate::{CoreError, Result};

/// Unified code/data memory: exactly `END` ring elements, indexed by ring
/// elements. Addresses are always in range because they are themselves ring
/// elements; there is no separate code address space.
#[derive(Debug, Clone)]
pub struct MemoryImage<T: Word> {
    words: Vec<T>,
}

impl<T: Word> MemoryImage<T> {
    pub fn new(ring: &Ring<T>) -> Result<Self> {
        let len = usize::try_from(ring.end())
            .map_err(|_| CoreError::MemoryTooLarge { end: ring.end() })?;
        Ok(Self {
            words: vec![T::zero(); len],
        })
    }

    pub fn load(&self, addr: T) -> T {
        self.words[Self::index(addr)]
    }

    pub fn store(&mut self, addr: T, value: T) {
        self.words[Self::index(addr)] = value;
    }

    /// Install an initial image. Words beyond the supplied length stay zero;
    /// oversized images and non-ring-element words are rejected.
    pub fn load_words(&mut self, image: &[T], ring: &Ring<T>) -> Result<()> {
        if image.len() > self.words.len() {
            return Err(CoreError::ImageTooLarge {
                len: image.len(),
                capacity: self.words.len(),
            });
        }
        for (index, &word) in image.iter().enumerate() {
            if !ring.contains(word) {
                return Err(CoreError::WordOutOfRange {
                    index,
                    value: word.to_wide(),
                });
            }
        }
        self.words[..image.len()].copy_from_slice(image);
        for slot in self.words[image.len()..].iter_mut() {
            *slot = T::zero();
        }
        Ok(())
    }

    /// Byte-oriented variant of [`MemoryImage::load_words`], for loaders that
    /// hand over program text verbatim.
    pub fn load_bytes(&mut self, image: &[u8], ring: &Ring<T>) -> Result<()> {
        if image.len() > self.words.len() {
            return Err(CoreError::ImageTooLarge {
                len: image.len(),
                capacity: self.words.len(),
            });
        }
        for (index, &byte) in image.iter().enumerate() {
            let Some(word) = T::from_wide(byte as u128) else {
                return Err(CoreError::WordOutOfRange {
                    index,
                    value: byte as u128,
                });
            };
            if !ring.contains(word) {
                return Err(CoreError::WordOutOfRange {
                    index,
                    value: byte as u128,
                });
            }
            self.words[index] = word;
        }
        for slot in self.words[image.len()..].iter_mut() {
            *slot = T::zero();
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[T] {
        &self.words
    }

    fn index(addr: T) -> usize {
        // Ring elements fit usize: construction rejected larger moduli.
        addr.to_wide() as usize
    }
}
