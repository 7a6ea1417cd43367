/// An error that can occur on a serial connection.
#[derive(Debug)]
pub enum ConnectionError {
	/// The configured serial mode is not valid.
	InvalidMode(InvalidMode),

	/// The underlying serial device reported an error.
	Io(std::io::Error),

	/// No data arrived before the armed read deadline expired.
	Timeout,

	/// The connection is not open.
	NotOpen,
}

/// The configured serial mode is not valid.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InvalidMode {
	InvalidStopBits(InvalidStopBits),
	InvalidParity(InvalidParity),
}

/// The configured stop bit count is not supported.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidStopBits {
	pub value: u8,
}

/// The configured parity mode is not recognized.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidParity {
	pub value: String,
}

impl ConnectionError {
	/// Check if the error indicates an expired read deadline.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout)
	}
}

impl std::error::Error for ConnectionError {}
impl std::error::Error for InvalidMode {}
impl std::error::Error for InvalidStopBits {}
impl std::error::Error for InvalidParity {}

impl From<std::io::Error> for ConnectionError {
	fn from(other: std::io::Error) -> Self {
		Self::Io(other)
	}
}

impl From<std::io::ErrorKind> for ConnectionError {
	fn from(other: std::io::ErrorKind) -> Self {
		Self::Io(other.into())
	}
}

impl From<InvalidMode> for ConnectionError {
	fn from(other: InvalidMode) -> Self {
		Self::InvalidMode(other)
	}
}

impl From<InvalidStopBits> for ConnectionError {
	fn from(other: InvalidStopBits) -> Self {
		Self::InvalidMode(other.into())
	}
}

impl From<InvalidParity> for ConnectionError {
	fn from(other: InvalidParity) -> Self {
		Self::InvalidMode(other.into())
	}
}

impl From<InvalidStopBits> for InvalidMode {
	fn from(other: InvalidStopBits) -> Self {
		Self::InvalidStopBits(other)
	}
}

impl From<InvalidParity> for InvalidMode {
	fn from(other: InvalidParity) -> Self {
		Self::InvalidParity(other)
	}
}

impl std::fmt::Display for ConnectionError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::InvalidMode(e) => write!(f, "{}", e),
			Self::Io(e) => write!(f, "{}", e),
			Self::Timeout => write!(f, "i/o timeout"),
			Self::NotOpen => write!(f, "connection is not open"),
		}
	}
}

impl std::fmt::Display for InvalidMode {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::InvalidStopBits(e) => write!(f, "{}", e),
			Self::InvalidParity(e) => write!(f, "{}", e),
		}
	}
}

impl std::fmt::Display for InvalidStopBits {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "invalid stop bit count, expected 1 or 2, got {}", self.value)
	}
}

impl std::fmt::Display for InvalidParity {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"invalid parity mode, expected NONE, ODD, EVEN, MARK or SPACE, got {:?}",
			self.value
		)
	}
}
