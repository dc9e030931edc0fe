//! Index stream decoding (`.idx`)
//!
//! Only the first three words are meaningful: width, height and depth.

use crate::{Error, Result};

/// Number of words the index stream must hold
pub const INDEX_WORDS: usize = 3;

/// Map dimensions read from the index stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

impl Dimensions {
    /// Decode dimensions from index words, ignoring anything past the third
    pub fn decode(words: &[i32]) -> Result<Self> {
        let [width, height, depth] = match words {
            [w, h, d, ..] => [*w, *h, *d],
            _ => {
                return Err(Error::MalformedIndex(format!(
                    "expected at least {} words, got {}",
                    INDEX_WORDS,
                    words.len()
                )))
            }
        };

        if width < 0 || height < 0 {
            return Err(Error::MalformedIndex(format!(
                "negative dimensions {}x{}",
                width, height
            )));
        }

        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Number of tiles in one layer (`width * height`)
    pub fn cell_count(&self) -> Result<usize> {
        let overflow = || Error::DimensionsOverflow {
            width: self.width,
            height: self.height,
        };
        let width = usize::try_from(self.width).map_err(|_| overflow())?;
        let height = usize::try_from(self.height).map_err(|_| overflow())?;
        width.checked_mul(height).ok_or_else(overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_dimensions() {
        let dims = Dimensions::decode(&[10, 8, 1]).unwrap();
        assert_eq!(
            dims,
            Dimensions {
                width: 10,
                height: 8,
                depth: 1
            }
        );
        assert_eq!(dims.cell_count().unwrap(), 80);
    }

    #[test]
    fn test_decode_ignores_trailing_words() {
        let dims = Dimensions::decode(&[64, 32, 2, 99, -7]).unwrap();
        assert_eq!((dims.width, dims.height, dims.depth), (64, 32, 2));
    }

    #[test]
    fn test_decode_too_short() {
        for words in [&[][..], &[10][..], &[10, 8][..]] {
            let err = Dimensions::decode(words).unwrap_err();
            assert!(matches!(err, Error::MalformedIndex(_)), "{err}");
        }
    }

    #[test]
    fn test_decode_negative() {
        assert!(matches!(
            Dimensions::decode(&[-1, 8, 1]),
            Err(Error::MalformedIndex(_))
        ));
        assert!(matches!(
            Dimensions::decode(&[10, -8, 1]),
            Err(Error::MalformedIndex(_))
        ));
    }

    #[test]
    fn test_zero_sized_map() {
        let dims = Dimensions::decode(&[0, 50, 1]).unwrap();
        assert_eq!(dims.cell_count().unwrap(), 0);
    }
}
