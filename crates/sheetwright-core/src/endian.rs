//! Byte order helpers for binary payloads
//!
//! Network order is big-endian. On little-endian hosts the conversions swap bytes, on
//! big-endian hosts they are the identity; the choice is made at compile time.

/// Host to network order, 16-bit
#[inline]
pub const fn u16_to_network(n: u16) -> u16 {
    n.to_be()
}

/// Network to host order, 16-bit
#[inline]
pub const fn u16_to_host(n: u16) -> u16 {
    u16::from_be(n)
}

/// Host to network order, 32-bit
#[inline]
pub const fn u32_to_network(n: u32) -> u32 {
    n.to_be()
}

/// Network to host order, 32-bit
#[inline]
pub const fn u32_to_host(n: u32) -> u32 {
    u32::from_be(n)
}

/// Append `n` in network order
pub fn put_u16_network(buf: &mut Vec<u8>, n: u16) {
    buf.extend_from_slice(&n.to_be_bytes());
}

/// Append `n` in network order
pub fn put_u32_network(buf: &mut Vec<u8>, n: u32) {
    buf.extend_from_slice(&n.to_be_bytes());
}

/// Read a network-order `u16` at `offset`, or `None` if the data is too short
pub fn read_u16_network(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// Read a network-order `u32` at `offset`, or `None` if the data is too short
pub fn read_u32_network(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
