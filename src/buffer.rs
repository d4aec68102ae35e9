use std::borrow::Cow;

/// Capacity of every transfer buffer.
pub const MAX_BUFFER_SIZE: usize = 80;

/// Fixed-capacity transfer buffer.
///
/// Stream receives fill at most `MAX_BUFFER_SIZE - 1` bytes, leaving the last
/// byte for a terminator. A datagram may use the whole capacity.
#[derive(Clone, Copy)]
pub struct Buffer {
	bytes: [u8; MAX_BUFFER_SIZE],
	len: usize,
}

impl Buffer {
	pub const fn new() -> Self {
		Self { bytes: [0; MAX_BUFFER_SIZE], len: 0 }
	}

	/// Largest payload a single stream receive will store.
	pub const fn usable() -> usize {
		MAX_BUFFER_SIZE - 1
	}

	/// The received bytes.
	pub fn filled(&self) -> &[u8] {
		&self.bytes[..self.len]
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Contents as text for log lines; invalid UTF-8 is replaced, not rejected.
	pub fn render(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(self.filled())
	}

	/// Writable region for the next receive, reset to empty.
	pub(crate) fn recv_slot(&mut self) -> &mut [u8] {
		self.len = 0;
		&mut self.bytes[..Self::usable()]
	}

	/// Full-capacity region for the next datagram, reset to empty.
	pub(crate) fn datagram_slot(&mut self) -> &mut [u8] {
		self.len = 0;
		&mut self.bytes[..]
	}

	/// Records `len` received bytes, terminating them when there is room.
	pub(crate) fn set_len(&mut self, len: usize) {
		debug_assert!(len <= MAX_BUFFER_SIZE);
		self.len = len.min(MAX_BUFFER_SIZE);
		if let Some(end) = self.bytes.get_mut(self.len) {
			*end = 0;
		}
	}
}

impl Default for Buffer {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Buffer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Buffer")
			.field("len", &self.len)
			.field("text", &self.render())
			.finish()
	}
}

/// Result of one send or receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOutcome {
	pub byte_count: usize,
	pub peer_closed: bool,
}

impl TransferOutcome {
	/// A zero-length transfer means the peer is gone.
	pub fn from_count(byte_count: usize) -> Self {
		Self { byte_count, peer_closed: byte_count == 0 }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn receive_slot_leaves_room_for_terminator() {
		let mut buf = Buffer::new();
		assert_eq!(buf.recv_slot().len(), Buffer::usable());
		buf.recv_slot()[..3].copy_from_slice(b"abc");
		buf.set_len(3);
		assert_eq!(buf.filled(), b"abc");
		assert_eq!(buf.render(), "abc");
	}

	#[test]
	fn datagram_slot_uses_full_capacity() {
		let mut buf = Buffer::new();
		let slot = buf.datagram_slot();
		assert_eq!(slot.len(), MAX_BUFFER_SIZE);
		for (i, byte) in slot.iter_mut().enumerate() {
			*byte = i as u8;
		}
		buf.set_len(MAX_BUFFER_SIZE);
		assert_eq!(buf.len(), MAX_BUFFER_SIZE);
		assert_eq!(buf.filled()[79], 79);
	}

	#[test]
	fn recv_slot_resets_length() {
		let mut buf = Buffer::new();
		buf.set_len(5);
		let _ = buf.recv_slot();
		assert!(buf.is_empty());
	}

	#[test]
	fn zero_count_is_peer_closed() {
		assert!(TransferOutcome::from_count(0).peer_closed);
		assert!(!TransferOutcome::from_count(1).peer_closed);
	}

	#[test]
	fn render_tolerates_binary() {
		let mut buf = Buffer::new();
		buf.recv_slot()[..2].copy_from_slice(&[0xff, b'a']);
		buf.set_len(2);
		assert_eq!(buf.render(), "\u{fffd}a");
	}
}
