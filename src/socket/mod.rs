mod listener;
mod raw;
mod stream;
mod datagram;
mod bound;

pub use self::listener::Listener;
pub use self::raw::RawSocket;
pub use self::stream::ConnectedStream;
pub use self::bound::BoundSocket;
pub use self::datagram::{BoundDatagram, DatagramIo};

use std::os::fd::{IntoRawFd, OwnedFd, RawFd};
use crate::addr::FromSockAddr;
use crate::error::{Result, SocketError, errno};

/// Trait for socket type markers.
///
/// Each type implementing this trait represents a socket type
/// that can be passed to the `socket()` syscall.
///
/// - `Stream` — reliable, ordered byte stream (TCP-like)
/// - `Datagram` — unreliable, unordered packets (UDP-like)
pub trait SockType {
	/// Returns the libc constant for this socket type.
	fn raw() -> libc::c_int;

	/// Short type name used in log messages.
	fn label() -> &'static str;
}

/// Stream socket marker.
///
/// Used for TCP (with Ipv4) or Unix stream sockets.
pub struct Stream;

/// Datagram socket marker.
///
/// Used for UDP (with Ipv4) or Unix datagram sockets.
pub struct Datagram;

impl SockType for Stream {
	#[inline]
	fn raw() -> libc::c_int {
		libc::SOCK_STREAM
	}

	fn label() -> &'static str {
		"stream"
	}
}

impl SockType for Datagram {
	#[inline]
	fn raw() -> libc::c_int {
		libc::SOCK_DGRAM
	}

	fn label() -> &'static str {
		"datagram"
	}
}

/// Releases a descriptor and reports the close(2) outcome.
///
/// Ownership is taken out of `OwnedFd` first, so the descriptor is closed
/// exactly once whether or not the call fails.
pub(crate) fn close_fd(fd: OwnedFd) -> Result<()> {
	let raw = fd.into_raw_fd();
	let result = unsafe { libc::close(raw) };
	if result == -1 {
		let errno = errno();
		tracing::debug!(fd = raw, errno, "close() failed");
		return Err(SocketError::Close { errno });
	}
	tracing::trace!(fd = raw, "descriptor closed");
	Ok(())
}

/// Queries the address a descriptor is bound to (getsockname).
pub(crate) fn local_addr_of<A: FromSockAddr>(fd: RawFd) -> Result<A> {
	let mut storage: libc::sockaddr_storage = unsafe { std::mem::zeroed() };
	let mut len = std::mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;

	let result = unsafe {
		libc::getsockname(
			fd,
			&mut storage as *mut _ as *mut libc::sockaddr,
			&mut len,
		)
	};

	if result == -1 {
		return Err(SocketError::LocalAddr { errno: errno() });
	}

	unsafe {
		A::from_sockaddr(&storage as *const _ as *const libc::sockaddr, len)
			.ok_or(SocketError::Naming { reason: "invalid local address" })
	}
}
