use echolane::{Endpoint, ErrorKind, MAX_PATH_LEN, SocketAddrV4, SocketError, UnixAddr};

#[test]
fn parses_dotted_quad() {
	let addr = SocketAddrV4::parse("192.168.1.20", 8080).unwrap();
	assert_eq!(addr.ip(), [192, 168, 1, 20]);
	assert_eq!(addr.port(), 8080);
	assert_eq!(addr.address(), 0xC0A8_0114);
	assert_eq!(addr.to_string(), "192.168.1.20:8080");
}

#[test]
fn rejects_malformed_ipv4() {
	for bad in ["", "256.0.0.1", "1.2.3", "1.2.3.4.5", "localhost", "::1"] {
		let err = SocketAddrV4::parse(bad, 80).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Naming, "{bad:?}");
		assert_eq!(err, SocketError::Naming { reason: "invalid IPv4 address" });
	}
}

#[test]
fn wildcard_address() {
	let any = SocketAddrV4::any(0);
	assert_eq!(any.ip(), [0, 0, 0, 0]);
	assert_eq!(any.port(), 0);
}

#[test]
fn name_without_slash_is_abstract() {
	let addr = UnixAddr::from_name("echo-service").unwrap();
	assert!(addr.is_abstract());
	assert_eq!(addr.path(), b"echo-service");
	assert!(addr.fs_path().is_none());
}

#[test]
fn name_with_slash_is_filesystem() {
	let addr = UnixAddr::from_name("/tmp/echo.sock").unwrap();
	assert!(!addr.is_abstract());
	assert_eq!(addr.fs_path(), Some(std::path::Path::new("/tmp/echo.sock")));
}

#[test]
fn abstract_name_counts_leading_zero() {
	let fits = "a".repeat(MAX_PATH_LEN - 1);
	assert!(UnixAddr::from_name(&fits).is_ok());

	let too_big = "a".repeat(MAX_PATH_LEN);
	let err = UnixAddr::from_name(&too_big).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Naming);
	assert_eq!(err.to_string(), "name is too big");
}

#[test]
fn filesystem_path_uses_full_capacity() {
	let fits = format!("/{}", "p".repeat(MAX_PATH_LEN - 1));
	assert!(UnixAddr::from_name(&fits).is_ok());

	let too_big = format!("/{}", "p".repeat(MAX_PATH_LEN));
	assert_eq!(UnixAddr::from_name(&too_big).unwrap_err().kind(), ErrorKind::Naming);
}

#[test]
fn empty_name_is_rejected() {
	assert_eq!(UnixAddr::from_name("").unwrap_err().kind(), ErrorKind::Naming);
}

#[test]
fn endpoint_variants() {
	assert!(matches!(Endpoint::ipv4("10.0.0.1", 1).unwrap(), Endpoint::V4(_)));
	assert!(matches!(Endpoint::local("/run/x").unwrap(), Endpoint::Local(_)));
	assert_eq!(Endpoint::local("x").unwrap().to_string(), "@x");
}
