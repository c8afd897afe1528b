use scroll::Endian;

/// Returns the byte order of the machine this code runs on.
///
/// Values on the wire are always decoded with an explicit byte order. This query is only needed
/// where a value is inspected through its in-memory representation, such as when walking the
/// octets of a hardware address.
///
/// ```
/// use devicecat_common::host_byte_order;
///
/// let order = host_byte_order();
/// assert_eq!(order.is_little(), cfg!(target_endian = "little"));
/// ```
#[inline]
pub fn host_byte_order() -> Endian {
    scroll::NATIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_native_layout() {
        let probe = 0x0102_0304_0506_0708u64.to_ne_bytes();
        let expected = if probe[0] == 0x08 {
            Endian::Little
        } else {
            Endian::Big
        };
        assert_eq!(host_byte_order(), expected);
    }
}
