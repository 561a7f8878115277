//! Byte-level codecs: substring search, big-endian integer conversion, and
//! schema-driven field extraction/insertion.

use crate::tag::FieldTag;

/// Find the first occurrence of `needle` in `haystack`.
///
/// Returns `None` if `needle` is longer than `haystack` or does not occur.
/// Equivalent to the original `memstr`, reimplemented with safe slice
/// comparison instead of raw pointer arithmetic.
#[must_use]
pub fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// A primitive unsigned integer that can be read from and written to a
/// truncated big-endian byte string, matching the original
/// `convertFromCString`/`convertToCString` templates.
pub trait IntCodec: Copy + Default {
    /// Size in bytes of the full-width representation.
    const SIZE: usize;

    /// Interpret `bytes[0]` as the most significant byte, shifting in
    /// subsequent bytes, stopping after `min(Self::SIZE, bytes.len())`
    /// bytes. Returns the default (zero) value if `bytes` is empty.
    fn from_be_bytes_truncated(bytes: &[u8]) -> Self;

    /// Write the big-endian representation into `buf`, writing at most
    /// `buf.len()` bytes (dropping the least-significant trailing bytes if
    /// `buf` is shorter than `Self::SIZE`). Returns the number of bytes
    /// written.
    fn write_be_bytes(self, buf: &mut [u8]) -> usize;
}

macro_rules! impl_int_codec {
    ($($t:ty),+ $(,)?) => {
        $(
            impl IntCodec for $t {
                const SIZE: usize = core::mem::size_of::<$t>();

                fn from_be_bytes_truncated(bytes: &[u8]) -> Self {
                    if bytes.is_empty() {
                        return 0;
                    }
                    let take = Self::SIZE.min(bytes.len());
                    let mut val: Self = <$t>::from(bytes[0]);
                    for &b in &bytes[1..take] {
                        val = (val << 8) | <$t>::from(b);
                    }
                    val
                }

                fn write_be_bytes(self, buf: &mut [u8]) -> usize {
                    let be = self.to_be_bytes();
                    let take = be.len().min(buf.len());
                    buf[..take].copy_from_slice(&be[..take]);
                    take
                }
            }
        )+
    };
}

impl_int_codec!(u8, u16, u32, u64);

/// Walk `schema` in order, appending `src[i]` to `dst` for every position
/// `i` tagged `field` with `i < src.len()`, stopping once `dst` is full.
///
/// Returns the number of bytes written to `dst`. A field tag absent from
/// `schema` yields zero bytes written (the caller must not overwrite any
/// prior value in that case).
pub fn extract_field(src: &[u8], schema: &[FieldTag], field: FieldTag, dst: &mut [u8]) -> usize {
    let mut written = 0;
    for (i, &tag) in schema.iter().enumerate() {
        if written >= dst.len() {
            break;
        }
        if tag == field && i < src.len() {
            dst[written] = src[i];
            written += 1;
        }
    }
    written
}

/// Walk `schema` in order, writing the next unused byte of `src` into `dst[i]`
/// for every position `i` tagged `field` with `i < dst.len()`, stopping once
/// `src` is exhausted.
pub fn insert_field(dst: &mut [u8], schema: &[FieldTag], field: FieldTag, src: &[u8]) {
    let mut next = 0;
    for (i, &tag) in schema.iter().enumerate() {
        if next >= src.len() {
            break;
        }
        if tag == field && i < dst.len() {
            dst[i] = src[next];
            next += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn find_subslice_basic() {
        assert_eq!(find_subslice(b"hello world", b"world"), Some(6));
        assert_eq!(find_subslice(b"hello world", b"xyz"), None);
        assert_eq!(find_subslice(b"ab", b"abc"), None);
        assert_eq!(find_subslice(b"", b"a"), None);
    }

    #[test]
    fn int_codec_truncates_from_short_input() {
        assert_eq!(u32::from_be_bytes_truncated(&[]), 0);
        assert_eq!(u32::from_be_bytes_truncated(&[0x01]), 0x01);
        assert_eq!(u32::from_be_bytes_truncated(&[0x01, 0x02]), 0x0102);
        assert_eq!(u32::from_be_bytes_truncated(&[0x01, 0x02, 0x03, 0x04, 0x05]), 0x0102_0304);
    }

    #[test]
    fn int_codec_write_drops_trailing_bytes_when_capped() {
        let mut buf = [0u8; 2];
        let written = 0x0102_0304u32.write_be_bytes(&mut buf);
        assert_eq!(written, 2);
        assert_eq!(buf, [0x01, 0x02]);
    }

    #[test]
    fn extract_then_insert_round_trips() {
        use crate::tag::BuiltinField;
        let schema = [
            FieldTag::SYNC,
            FieldTag::User(1),
            FieldTag::User(2),
            FieldTag::Builtin(BuiltinField::Term),
            FieldTag::User(1),
        ];
        let src = [b'A', b'x', b'y', 0, b'z'];
        let mut dst = [0u8; 8];
        let n = extract_field(&src, &schema, FieldTag::User(1), &mut dst);
        assert_eq!(n, 2);
        assert_eq!(&dst[..2], b"xz");

        let mut packed = [0u8; 5];
        insert_field(&mut packed, &schema, FieldTag::User(1), &dst[..2]);
        assert_eq!(packed[1], b'x');
        assert_eq!(packed[4], b'z');
    }

    #[test]
    fn extract_absent_field_returns_zero() {
        let schema = [FieldTag::SYNC, FieldTag::User(1)];
        let src = [b'A', b'x'];
        let mut dst = [0u8; 8];
        assert_eq!(extract_field(&src, &schema, FieldTag::User(99), &mut dst), 0);
    }

    proptest! {
        #[test]
        fn int_round_trip_u32(val in any::<u32>()) {
            let mut buf = [0u8; 4];
            let written = val.write_be_bytes(&mut buf);
            prop_assert_eq!(written, 4);
            prop_assert_eq!(u32::from_be_bytes_truncated(&buf), val);
        }

        #[test]
        fn extract_never_writes_past_schema_or_dst(
            src in prop::collection::vec(any::<u8>(), 0..16),
            dst_cap in 0usize..8,
        ) {
            let schema = [FieldTag::User(1); 4];
            let mut dst = vec![0u8; dst_cap];
            let n = extract_field(&src, &schema, FieldTag::User(1), &mut dst);
            prop_assert!(n <= dst_cap);
            prop_assert!(n <= schema.len());
        }
    }
}
