use crate::addr::{Domain, ToSockAddr};
use crate::error::{Result, SocketError};

/// IPv4 address family marker.
///
/// Sockets with this domain use 32-bit addresses (e.g., 192.168.1.1).
pub struct Ipv4;

impl Domain for Ipv4 {
	type Addr = SocketAddrV4;

	#[inline]
	fn raw() -> libc::c_int {
		libc::AF_INET
	}

	fn label() -> &'static str {
		"IPv4"
	}
}

/// IPv4 socket address (IP + port), both kept in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketAddrV4 {
	ip: [u8; 4],
	port: u16,
}

impl SocketAddrV4 {
	/// Creates a new IPv4 address.
	pub fn new(ip: [u8; 4], port: u16) -> Self {
		Self { ip, port }
	}

	/// The wildcard address (`INADDR_ANY`) with the given port.
	///
	/// Port 0 asks the kernel to pick an ephemeral port at bind time.
	pub fn any(port: u16) -> Self {
		Self { ip: [0, 0, 0, 0], port }
	}

	/// Parses a dotted-quad literal such as `127.0.0.1`.
	///
	/// Fails with a naming error before any syscall is attempted.
	pub fn parse(address: &str, port: u16) -> Result<Self> {
		let ip: std::net::Ipv4Addr = address
			.trim()
			.parse()
			.map_err(|_| SocketError::Naming { reason: "invalid IPv4 address" })?;
		Ok(Self { ip: ip.octets(), port })
	}

	/// Returns the IP bytes.
	pub fn ip(&self) -> [u8; 4] {
		self.ip
	}

	/// Returns the address as a host-order 32-bit value.
	pub fn address(&self) -> u32 {
		u32::from_be_bytes(self.ip)
	}

	/// Returns the port.
	pub fn port(&self) -> u16 {
		self.port
	}

	/// Creates from raw sockaddr_in.
	pub(crate) fn from_raw(raw: &libc::sockaddr_in) -> Self {
		Self {
			ip: raw.sin_addr.s_addr.to_ne_bytes(),
			port: u16::from_be(raw.sin_port),
		}
	}

	/// Converts to the raw sockaddr_in for syscalls.
	pub(crate) fn to_raw(&self) -> libc::sockaddr_in {
		let mut raw: libc::sockaddr_in = unsafe { std::mem::zeroed() };
		raw.sin_family = libc::AF_INET as libc::sa_family_t;
		raw.sin_port = self.port.to_be();
		raw.sin_addr = libc::in_addr {
			s_addr: u32::from_ne_bytes(self.ip),
		};
		raw
	}
}

impl std::fmt::Display for SocketAddrV4 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let [a, b, c, d] = self.ip;
		write!(f, "{a}.{b}.{c}.{d}:{}", self.port)
	}
}

impl ToSockAddr for SocketAddrV4 {
	fn with_raw<F, R>(&self, f: F) -> R
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R,
	{
		let raw = self.to_raw();  // sockaddr_in lives on THIS stack frame
		let ptr = &raw as *const _ as *const libc::sockaddr;
		let len = std::mem::size_of::<libc::sockaddr_in>() as libc::socklen_t;
		f(ptr, len)
	}
}
