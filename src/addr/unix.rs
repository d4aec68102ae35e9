use crate::addr::{Domain, ToSockAddr};
use crate::error::{Result, SocketError};

/// Unix domain socket marker.
///
/// Sockets with this domain use filesystem paths (e.g., /tmp/app.sock)
/// or names in the Linux abstract namespace. Only works on the same machine.
pub struct Unix;

impl Domain for Unix {
	type Addr = UnixAddr;

	#[inline]
	fn raw() -> libc::c_int {
		libc::AF_UNIX
	}

	fn label() -> &'static str {
		"local UNIX"
	}
}

const PATH_OFFSET: usize = std::mem::offset_of!(libc::sockaddr_un, sun_path);

/// Capacity of `sun_path` on this platform.
pub const MAX_PATH_LEN: usize = std::mem::size_of::<libc::sockaddr_un>() - PATH_OFFSET;

/// Unix domain socket address (file path or abstract name).
///
/// Constructors check the path against `sun_path` capacity, so an address
/// that exists always fits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnixAddr {
	path: Vec<u8>,
	/// True if this is an abstract socket (Linux-only, no filesystem entry).
	is_abstract: bool,
}

impl UnixAddr {
	/// Encodes a local socket name.
	///
	/// A name starting with `/` is a filesystem path; anything else lives
	/// in the abstract namespace and costs one extra leading zero byte.
	pub fn from_name(name: &str) -> Result<Self> {
		if name.starts_with('/') {
			Self::new(name)
		} else {
			Self::abstract_socket(name)
		}
	}

	/// Creates a filesystem socket address.
	pub fn new<P: AsRef<[u8]>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		if path.is_empty() {
			return Err(SocketError::Naming { reason: "name is empty" });
		}
		if path.contains(&0) {
			return Err(SocketError::Naming { reason: "name contains a zero byte" });
		}
		if path.len() > MAX_PATH_LEN {
			return Err(SocketError::Naming { reason: "name is too big" });
		}
		Ok(Self { path: path.to_vec(), is_abstract: false })
	}

	/// Creates an abstract socket address (Linux-only).
	///
	/// Abstract sockets exist only in memory — no filesystem entry.
	/// Auto-removed when all references close. No permission issues.
	pub fn abstract_socket<P: AsRef<[u8]>>(name: P) -> Result<Self> {
		let name = name.as_ref();
		if name.is_empty() {
			return Err(SocketError::Naming { reason: "name is empty" });
		}
		if name.len() + 1 > MAX_PATH_LEN {
			return Err(SocketError::Naming { reason: "name is too big" });
		}
		Ok(Self { path: name.to_vec(), is_abstract: true })
	}

	/// Returns true if this is an abstract socket.
	pub fn is_abstract(&self) -> bool {
		self.is_abstract
	}

	/// Returns true for the address of an unbound peer.
	pub fn is_unnamed(&self) -> bool {
		self.path.is_empty()
	}

	/// Returns the path bytes, without the leading zero of abstract names.
	pub fn path(&self) -> &[u8] {
		&self.path
	}

	/// Returns the filesystem path, `None` for abstract and unnamed addresses.
	pub fn fs_path(&self) -> Option<&std::path::Path> {
		use std::os::unix::ffi::OsStrExt;
		if self.is_abstract || self.path.is_empty() {
			return None;
		}
		Some(std::path::Path::new(std::ffi::OsStr::from_bytes(&self.path)))
	}

	/// Converts to the raw sockaddr_un and the exact length to pass with it.
	///
	/// Filesystem paths are NUL-terminated when there is room; abstract
	/// names are passed with their exact length, no padding.
	pub(crate) fn to_raw(&self) -> (libc::sockaddr_un, libc::socklen_t) {
		let mut addr: libc::sockaddr_un = unsafe { std::mem::zeroed() };
		addr.sun_family = libc::AF_UNIX as libc::sa_family_t;

		let start = usize::from(self.is_abstract);
		for (i, &byte) in self.path.iter().enumerate() {
			addr.sun_path[start + i] = byte as libc::c_char;
		}

		let mut used = start + self.path.len();
		if !self.is_abstract && used < MAX_PATH_LEN {
			used += 1;
		}
		(addr, (PATH_OFFSET + used) as libc::socklen_t)
	}

	/// Creates from raw sockaddr_un, honoring the kernel-reported length.
	pub(crate) fn from_raw(raw: &libc::sockaddr_un, len: libc::socklen_t) -> Self {
		let used = (len as usize).saturating_sub(PATH_OFFSET).min(MAX_PATH_LEN);
		if used == 0 {
			return Self { path: Vec::new(), is_abstract: false };
		}

		let bytes: Vec<u8> = raw.sun_path[..used].iter().map(|&c| c as u8).collect();
		if bytes[0] == 0 {
			Self { path: bytes[1..].to_vec(), is_abstract: true }
		} else {
			let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
			Self { path: bytes[..end].to_vec(), is_abstract: false }
		}
	}
}

impl std::fmt::Display for UnixAddr {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let text = String::from_utf8_lossy(&self.path);
		if self.is_abstract {
			write!(f, "@{text}")
		} else if self.path.is_empty() {
			f.write_str("(unnamed)")
		} else {
			f.write_str(&text)
		}
	}
}

impl ToSockAddr for UnixAddr {
	fn with_raw<F, R>(&self, f: F) -> R
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R,
	{
		let (raw, len) = self.to_raw();
		let ptr = &raw as *const _ as *const libc::sockaddr;
		f(ptr, len)
	}
}
