use std::fmt;

use devicecat_common::{host_byte_order, Endian};

use crate::raw::MAC_MASK;

/// A 48-bit hardware address of a device.
///
/// The address is held as an integer. [`Display`](fmt::Display) prints it as six lowercase hex
/// octets separated by colons, most significant octet first:
///
/// ```
/// use devicecat_format::MacAddress;
///
/// let mac = MacAddress::from_packed(0xaabb_ccdd_eeff);
/// assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress(u64);

impl MacAddress {
    /// Creates an address from the low 48 bits of `value`.
    pub fn from_packed(value: u64) -> Self {
        MacAddress(value & MAC_MASK)
    }

    /// Returns the address as an integer.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the six octets in network order.
    pub fn octets(&self) -> [u8; 6] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }

    /// Renders the address as it would be printed on a host with the given byte order.
    ///
    /// The octets are walked through the in-memory representation of the integer on such a host,
    /// so the traversal direction depends on `host`. The printed text is the same for both.
    pub fn render(&self, host: Endian) -> String {
        let (memory, order) = match host {
            Endian::Little => (self.0.to_le_bytes(), [5, 4, 3, 2, 1, 0]),
            Endian::Big => (self.0.to_be_bytes(), [2, 3, 4, 5, 6, 7]),
        };

        let mut out = String::with_capacity(17);
        for (i, index) in order.iter().enumerate() {
            if i > 0 {
                out.push(':');
            }
            out.push_str(&format!("{:02x}", memory[*index]));
        }
        out
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(host_byte_order()))
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MacAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
