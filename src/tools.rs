//!
//! Contains the vint codec and the numeric helpers used when working with EBML encoded data.
//!
//! Element ids and element sizes share the same variable width integer ("vint") encoding: the position of the first set bit of the leading byte gives the total width, and the remaining bits hold the value in big endian order.
//!

use std::convert::{TryFrom, TryInto};

use super::element::EbmlSize;
use super::errors::tool::ToolError;

///
/// The reserved 8 byte size field meaning "unknown / undetermined size".
///
pub const UNKNOWN_SIZE: [u8; 8] = [0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

///
/// Largest value a vint can hold (56 value bits).
///
pub const MAX_VINT_VALUE: u64 = (1 << 56) - 1;

///
/// Trait to enable easy serialization to a vint.
///
/// This is only available for types that can be cast as `u64`.
///
pub trait Vint: Into<u64> + Copy {
    ///
    /// Returns a representation of the current value as a vint array, using the smallest width that can hold it.
    ///
    /// # Errors
    ///
    /// This can return an error if the value is too large to be representable as a vint.
    ///
    fn as_vint(&self) -> Result<Vec<u8>, ToolError> {
        let val: u64 = (*self).into();
        check_size_u64(val, 8)?;
        let mut length = 1;
        while length < 8 {
            if val < (1 << (7 * length)) {
                break;
            }
            length += 1;
        }

        Ok(as_vint_no_check_u64(val, length))
    }

    ///
    /// Returns a representation of the current value as a vint array with a specified length.
    ///
    /// # Errors
    ///
    /// This can return an error if the value is too large to be representable as a vint of that length, or if the length is not between 1 and 8.
    ///
    fn as_vint_with_length(&self, length: usize) -> Result<Vec<u8>, ToolError> {
        let val: u64 = (*self).into();
        if length == 0 || length > 8 {
            return Err(ToolError::ValueTooLarge(val));
        }
        check_size_u64(val, length)?;
        Ok(as_vint_no_check_u64(val, length))
    }
}

impl Vint for u64 { }
impl Vint for u32 { }
impl Vint for u16 { }
impl Vint for u8 { }

#[inline]
fn check_size_u64(val: u64, max_length: usize) -> Result<(), ToolError> {
    if val >= (1 << (max_length * 7)) {
        Err(ToolError::ValueTooLarge(val))
    } else {
        Ok(())
    }
}

#[inline]
fn as_vint_no_check_u64(val: u64, length: usize) -> Vec<u8> {
    let bytes: [u8; 8] = val.to_be_bytes();
    let mut result: Vec<u8> = Vec::from(&bytes[(8-length)..]);
    result[0] |= 1 << (8 - length);
    result
}

///
/// Returns the total width (1-8) of a vint given its leading byte.
///
/// # Errors
///
/// Returns [`ToolError::MalformedVint`] if no bit is set in `first_byte`.
///
/// ## Example
///
/// ```
/// # use zero_webm::tools::vint_width;
/// assert_eq!(1, vint_width(0x81).unwrap());
/// assert_eq!(4, vint_width(0x1a).unwrap());
/// assert!(vint_width(0x00).is_err());
/// ```
///
pub fn vint_width(first_byte: u8) -> Result<usize, ToolError> {
    if first_byte == 0 {
        Err(ToolError::MalformedVint)
    } else {
        Ok(first_byte.leading_zeros() as usize + 1)
    }
}

///
/// Decodes a complete vint.  The slice must hold exactly the number of bytes announced by its leading byte.
///
/// Every bit pattern decodes to a number here, including the reserved "unknown size" pattern; use [`decode_size`] when reading a size field.
///
/// # Errors
///
/// Returns [`ToolError::MalformedVint`] if the leading byte is zero or the slice length does not match the encoded width.
///
pub fn decode_vint_value(bytes: &[u8]) -> Result<u64, ToolError> {
    let first = *bytes.first().ok_or(ToolError::MalformedVint)?;
    let length = vint_width(first)?;
    if length != bytes.len() {
        return Err(ToolError::MalformedVint);
    }

    let mut value = (first as u64) ^ (1 << (8 - length));
    for item in bytes.iter().skip(1) {
        value = (value << 8) | *item as u64;
    }
    Ok(value)
}

///
/// Decodes a complete size field.  The reserved pattern [`UNKNOWN_SIZE`] yields [`EbmlSize::Unknown`]; anything else is a known byte count.
///
/// # Errors
///
/// Returns an error if the bytes are not a well formed vint.
///
pub fn decode_size(bytes: &[u8]) -> Result<EbmlSize, ToolError> {
    if bytes == UNKNOWN_SIZE {
        return Ok(EbmlSize::Unknown);
    }

    let value = decode_vint_value(bytes)?;
    usize::try_from(value)
        .map(EbmlSize::Known)
        .map_err(|_| ToolError::ValueTooLarge(value))
}

///
/// Encodes a size field.  [`EbmlSize::Unknown`] is always written as [`UNKNOWN_SIZE`]; known sizes use the minimal vint width.
///
/// # Errors
///
/// Returns [`ToolError::ValueTooLarge`] if the size cannot be written as a vint, including the single value ([`MAX_VINT_VALUE`]) whose encoding is reserved for unknown sizes.
///
pub fn encode_size(size: EbmlSize) -> Result<Vec<u8>, ToolError> {
    match size {
        EbmlSize::Unknown => Ok(UNKNOWN_SIZE.to_vec()),
        EbmlSize::Known(len) => {
            let len = len as u64;
            if len == MAX_VINT_VALUE {
                return Err(ToolError::ValueTooLarge(len));
            }
            len.as_vint()
        }
    }
}

///
/// Reads a vint from the beginning of the input array slice.
///
/// This method returns an option with the `None` variant used to indicate there was not enough data in the buffer to completely read a vint.
///
/// The returned tuple contains the value of the vint (`u64`) and the length of the vint (`usize`).  The length will be less than or equal to the length of the input slice.
///
/// # Errors
///
/// This method can return a `ToolError` if the input array cannot be read as a vint.
///
pub fn read_vint(buffer: &[u8]) -> Result<Option<(u64, usize)>, ToolError> {
    if buffer.is_empty() {
        return Ok(None);
    }

    let length = vint_width(buffer[0])?;

    if length > buffer.len() {
        // Not enough data in the buffer to read out the vint value
        return Ok(None);
    }

    decode_vint_value(&buffer[..length]).map(|value| Some((value, length)))
}

///
/// Returns the big endian bytes of `val` with leading zero bytes removed.  Zero is written as a single `0x00` byte.
///
/// ## Example
///
/// ```
/// # use zero_webm::tools::as_minimal_be_bytes;
/// assert_eq!(vec![0x00], as_minimal_be_bytes(0));
/// assert_eq!(vec![0x05, 0x00], as_minimal_be_bytes(1280));
/// assert_eq!(vec![0x0f, 0x42, 0x40], as_minimal_be_bytes(1_000_000));
/// ```
///
pub fn as_minimal_be_bytes(val: u64) -> Vec<u8> {
    let bytes = val.to_be_bytes();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(7);
    bytes[start..].to_vec()
}

///
/// Returns the two's complement big endian bytes of `val` using the fewest bytes that preserve its sign.
///
pub fn as_minimal_be_bytes_signed(val: i64) -> Vec<u8> {
    let bytes = val.to_be_bytes();
    let mut start = 0;
    while start < 7 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

///
/// Reads a `u64` value from any length array slice.
///
/// Rather than forcing the input to be a `[u8; 8]` like standard library methods, this can interpret a `u64` from a slice of any length <= 8.  Bytes are big endian - i.e. an array of `[4, 0]` would return a value of `1024`.  An empty slice reads as `0`.
///
/// # Errors
///
/// This method will return an error if the input slice has a length > 8.
///
/// ## Example
///
/// ```
/// # use zero_webm::tools::arr_to_u64;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = arr_to_u64(&[16,0])?;
/// assert_eq!(result, 4096);
/// # Ok(())
/// # }
/// ```
///
pub fn arr_to_u64(arr: &[u8]) -> Result<u64, ToolError> {
    if arr.len() > 8 {
        return Err(ToolError::ReadU64Overflow(Vec::from(arr)));
    }

    let mut val = 0u64;
    for byte in arr {
        val = (val << 8) | *byte as u64;
    }
    Ok(val)
}

///
/// Reads an `i64` value from any length array slice, interpreting it as two's complement.
///
/// ## Example
///
/// ```
/// # use zero_webm::tools::arr_to_i64;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(1024, arr_to_i64(&[4,0])?);
/// assert_eq!(-1, arr_to_i64(&[0xff])?);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// This method will return an error if the input slice has a length > 8.
///
pub fn arr_to_i64(arr: &[u8]) -> Result<i64, ToolError> {
    if arr.len() > 8 {
        return Err(ToolError::ReadI64Overflow(Vec::from(arr)));
    }

    let fill = match arr.first() {
        Some(first) if *first > 127 => 0xFF,
        _ => 0x00,
    };
    let mut bytes = [fill; 8];
    bytes[(8 - arr.len())..].copy_from_slice(arr);
    Ok(i64::from_be_bytes(bytes))
}

///
/// Reads an `f64` value from an array slice of length 0, 4 or 8.
///
/// This method wraps `f32` and `f64` conversions from big endian byte arrays and casts the result as an `f64`.  An empty slice reads as `0.0`.
///
/// # Errors
///
/// This method will return an error if the input slice length is not 0, 4 or 8.
///
pub fn arr_to_f64(arr: &[u8]) -> Result<f64, ToolError> {
    match arr.len() {
        0 => Ok(0.0),
        4 => {
            let bytes: [u8; 4] = arr.try_into().map_err(|_| ToolError::ReadF64Mismatch(Vec::from(arr)))?;
            Ok(f32::from_be_bytes(bytes) as f64)
        },
        8 => {
            let bytes: [u8; 8] = arr.try_into().map_err(|_| ToolError::ReadF64Mismatch(Vec::from(arr)))?;
            Ok(f64::from_be_bytes(bytes))
        },
        _ => Err(ToolError::ReadF64Mismatch(Vec::from(arr))),
    }
}
