//! Big-endian reads and bit-field extraction.

use crate::error::DecodeError;

/// Unsigned integers that can be read from network byte order.
pub trait BigEndian: Sized + Copy {
    /// Number of bytes occupied on the wire.
    const WIDTH: usize;

    /// Build the value from exactly `WIDTH` bytes.
    fn from_be_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_big_endian {
    ($($ty:ty),*) => {
        $(
            impl BigEndian for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn from_be_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_be_bytes(raw)
                }
            }
        )*
    };
}

impl_big_endian!(u8, u16, u32);

/// Check that `width` bytes starting at `offset` lie inside `buffer`.
#[inline]
fn check_bounds(buffer: &[u8], offset: usize, width: usize) -> Result<(), DecodeError> {
    match offset.checked_add(width) {
        Some(end) if end <= buffer.len() => Ok(()),
        _ => Err(DecodeError::OutOfBounds {
            offset,
            width,
            len: buffer.len(),
        }),
    }
}

/// Read a 1, 2 or 4 byte unsigned big-endian integer at `offset`.
///
/// # Example
///
/// ```
/// use framedecode::codec::read_be;
///
/// let data = [0x08, 0x00, 0x45];
/// assert_eq!(read_be::<u16>(&data, 0).unwrap(), 0x0800);
/// assert_eq!(read_be::<u8>(&data, 2).unwrap(), 0x45);
/// assert!(read_be::<u32>(&data, 0).is_err());
/// ```
#[inline]
pub fn read_be<T: BigEndian>(buffer: &[u8], offset: usize) -> Result<T, DecodeError> {
    check_bounds(buffer, offset, T::WIDTH)?;
    Ok(T::from_be_slice(&buffer[offset..offset + T::WIDTH]))
}

/// Copy a fixed-size byte group (e.g. an address) out of `buffer`.
#[inline]
pub fn read_array<const N: usize>(buffer: &[u8], offset: usize) -> Result<[u8; N], DecodeError> {
    check_bounds(buffer, offset, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&buffer[offset..offset + N]);
    Ok(out)
}

/// Extract the inclusive bit range `high..=low` of `value`, bit 0 being the
/// least significant bit. The result is shifted down to bit 0.
///
/// # Example
///
/// ```
/// use framedecode::codec::extract_bits;
///
/// // 0x45: version 4 in the high nibble, IHL 5 in the low nibble
/// assert_eq!(extract_bits(0x45, 7, 4), 4);
/// assert_eq!(extract_bits(0x45, 3, 0), 5);
/// ```
#[inline]
pub const fn extract_bits(value: u32, high: u32, low: u32) -> u32 {
    debug_assert!(high >= low && high < 32);
    let width = high - low + 1;
    let mask = ((1u64 << width) - 1) as u32;
    (value >> low) & mask
}
