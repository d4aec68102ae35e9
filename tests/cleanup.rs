//! Runs alone in its own binary so the descriptor count is not disturbed by
//! other tests opening sockets concurrently.

use std::sync::Arc;

use echolane::{ErrorKind, LocalEchoServer, MemoryLogger, SharedLogger};

fn open_fds() -> usize {
	std::fs::read_dir("/proc/self/fd").unwrap().count()
}

#[test]
fn failed_local_bind_closes_socket_and_keeps_existing_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("taken.sock");
	std::fs::write(&path, b"occupied").unwrap();
	let name = path.to_str().unwrap().to_owned();

	let memory = Arc::new(MemoryLogger::new());
	let log: SharedLogger = memory.clone();

	let before = open_fds();
	let err = match LocalEchoServer::bind(log, &name) {
		Ok(_) => panic!("bind over an existing file succeeded"),
		Err(err) => err,
	};
	let after = open_fds();

	assert_eq!(err.kind(), ErrorKind::SystemCall);
	assert_eq!(err.errno(), Some(libc::EADDRINUSE));
	assert_eq!(before, after);
	assert_eq!(std::fs::read(&path).unwrap(), b"occupied");
	assert!(memory.contains("Binding local socket to name"));
}
