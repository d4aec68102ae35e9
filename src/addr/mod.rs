//! Address families and endpoint encoding.
//!
//! This module defines the two address families supported:
//! - `Ipv4` — Internet Protocol version 4
//! - `Unix` — Unix domain sockets (filesystem or abstract names)
//!
//! All byte-order conversion for ports happens here, inside `to_raw` and
//! `from_raw`. Everything outside this module sees host-order ports.

mod ipv4;
mod unix;
pub use self::ipv4::{Ipv4, SocketAddrV4};
pub use self::unix::{Unix, UnixAddr, MAX_PATH_LEN};

/// Trait for address family markers.
///
/// Each type implementing this trait represents an address family
/// that can be passed to the `socket()` syscall.
pub trait Domain {
	/// Address type used by sockets of this family.
	type Addr: ToSockAddr + FromSockAddr + Into<Endpoint> + Clone + std::fmt::Display;

	/// Returns the libc constant for this address family.
	fn raw() -> libc::c_int;

	/// Short family name used in log messages.
	fn label() -> &'static str;
}

/// Trait for address types that can be converted to raw sockaddr for syscalls.
///
/// Addresses are validated when they are built, so encoding cannot fail here.
pub trait ToSockAddr {
	/// Calls the provided closure with a pointer to the raw sockaddr and its size.
	///
	/// The sockaddr lives on this stack frame, so the pointer is only valid
	/// for the duration of the closure.
	fn with_raw<F, R>(&self, f: F) -> R
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R;
}

/// Trait for address types that can be created from raw sockaddr.
pub trait FromSockAddr: Sized {
	/// Creates address from raw sockaddr storage.
	///
	/// # Safety
	/// `addr` must point to at least `len` initialized bytes.
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self>;
}

impl FromSockAddr for SocketAddrV4 {
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self> {
		if len < std::mem::size_of::<libc::sockaddr_in>() as libc::socklen_t {
			return None;
		}
		let raw = unsafe { &*(addr as *const libc::sockaddr_in) };
		if raw.sin_family != libc::AF_INET as libc::sa_family_t {
			return None;
		}
		Some(Self::from_raw(raw))
	}
}

impl FromSockAddr for UnixAddr {
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self> {
		if len < std::mem::size_of::<libc::sa_family_t>() as libc::socklen_t {
			return None;
		}
		let raw = unsafe { &*(addr as *const libc::sockaddr_un) };
		if raw.sun_family != libc::AF_UNIX as libc::sa_family_t {
			return None;
		}
		Some(Self::from_raw(raw, len))
	}
}

/// A peer or local endpoint of any supported family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
	V4(SocketAddrV4),
	Local(UnixAddr),
}

impl Endpoint {
	/// Encodes a dotted-quad IPv4 literal and a host-order port.
	pub fn ipv4(address: &str, port: u16) -> crate::Result<Self> {
		SocketAddrV4::parse(address, port).map(Endpoint::V4)
	}

	/// Encodes a local socket name, see [`UnixAddr::from_name`].
	pub fn local(name: &str) -> crate::Result<Self> {
		UnixAddr::from_name(name).map(Endpoint::Local)
	}
}

impl From<SocketAddrV4> for Endpoint {
	fn from(addr: SocketAddrV4) -> Self {
		Endpoint::V4(addr)
	}
}

impl From<UnixAddr> for Endpoint {
	fn from(addr: UnixAddr) -> Self {
		Endpoint::Local(addr)
	}
}

impl std::fmt::Display for Endpoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Endpoint::V4(addr) => addr.fmt(f),
			Endpoint::Local(addr) => addr.fmt(f),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ipv4_round_trips_through_sockaddr() {
		let addr = SocketAddrV4::new([10, 1, 2, 3], 4242);
		let back = addr.with_raw(|ptr, len| unsafe { SocketAddrV4::from_sockaddr(ptr, len) });
		assert_eq!(back, Some(addr));
	}

	#[test]
	fn ipv4_port_is_network_order_on_the_wire() {
		let raw = SocketAddrV4::new([127, 0, 0, 1], 0x1234).to_raw();
		assert_eq!(raw.sin_port.to_ne_bytes(), [0x12, 0x34]);
		assert_eq!(raw.sin_addr.s_addr.to_ne_bytes(), [127, 0, 0, 1]);
	}

	#[test]
	fn abstract_name_keeps_exact_length() {
		let addr = UnixAddr::from_name("echo").unwrap();
		addr.with_raw(|ptr, len| {
			let back = unsafe { UnixAddr::from_sockaddr(ptr, len) }.unwrap();
			assert_eq!(back, addr);
		});
		let expected = std::mem::offset_of!(libc::sockaddr_un, sun_path) + 1 + 4;
		addr.with_raw(|_, len| assert_eq!(len as usize, expected));
	}

	#[test]
	fn rejects_wrong_family() {
		let addr = UnixAddr::from_name("/tmp/x.sock").unwrap();
		let v4 = addr.with_raw(|ptr, _| unsafe {
			SocketAddrV4::from_sockaddr(ptr, std::mem::size_of::<libc::sockaddr_in>() as libc::socklen_t)
		});
		assert_eq!(v4, None);
	}

	#[test]
	fn endpoint_display() {
		assert_eq!(Endpoint::ipv4("192.168.0.7", 80).unwrap().to_string(), "192.168.0.7:80");
		assert_eq!(Endpoint::local("/tmp/e.sock").unwrap().to_string(), "/tmp/e.sock");
		assert_eq!(Endpoint::local("echo").unwrap().to_string(), "@echo");
	}
}
