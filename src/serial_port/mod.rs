//! [`SerialPort`] trait to support different serial device drivers.

use std::time::Duration;

use crate::{InvalidMode, InvalidParity, InvalidStopBits};

#[cfg(feature = "serial2")]
pub mod serial2;

/// [`SerialPort`]s are the device drivers used by a [`SerialConnection`][crate::SerialConnection] to reach the hardware.
///
/// The trait exposes the raw capability surface of a serial device:
/// opening it by port name, applying a [`Mode`], arming a single relative read timeout,
/// and transferring bytes.
pub trait SerialPort: Sized {
	/// Open the serial device with the given port name or path.
	///
	/// The device is opened with whatever line settings it currently has.
	/// Use [`Self::set_mode`] to configure it.
	fn open(name: &str) -> std::io::Result<Self>;

	/// Apply the given line parameters to the device.
	fn set_mode(&mut self, mode: &Mode) -> std::io::Result<()>;

	/// Arm the read timeout of the device.
	///
	/// The timeout is relative driver state:
	/// it stays armed until changed and bounds every read issued after it.
	/// `None` removes the bound, so reads wait indefinitely for data.
	fn set_read_timeout(&mut self, timeout: Option<Duration>) -> std::io::Result<()>;

	/// Read available bytes into `buffer`, blocking until data arrives or the armed timeout elapses.
	///
	/// Returning `Ok(0)` is the driver convention for an elapsed timeout without data.
	fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize>;

	/// Write the bytes in `buffer` to the device, returning the number of bytes accepted.
	fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize>;

	/// Release the device.
	///
	/// After a successful close the handle must not be used again.
	/// Implementations may leave reclaiming the OS handle to drop.
	fn close(&mut self) -> std::io::Result<()>;
}

/// Validated line parameters for a serial device.
///
/// A `Mode` can only be constructed from parameters that pass validation,
/// so holding one proves the configuration is well formed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Mode {
	/// The baud rate in bits per second.
	pub baud_rate: u32,

	/// The number of data bits per character.
	///
	/// Not validated here: drivers reject character sizes they do not support.
	pub data_bits: u8,

	/// The number of stop bits.
	pub stop_bits: StopBits,

	/// The parity mode.
	pub parity: Parity,
}

impl Mode {
	/// Validate raw line parameters into a mode.
	///
	/// The stop bit count must be 1 or 2,
	/// and the parity mode must name one of the known modes, ignoring case.
	pub fn new(baud_rate: u32, data_bits: u8, stop_bits: u8, parity: &str) -> Result<Self, InvalidMode> {
		Ok(Self {
			baud_rate,
			data_bits,
			stop_bits: stop_bits.try_into()?,
			parity: parity.parse()?,
		})
	}
}

/// The number of stop bits on a serial line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StopBits {
	One,
	Two,
}

impl StopBits {
	/// Get the stop bit count as a number.
	pub fn count(self) -> u8 {
		match self {
			Self::One => 1,
			Self::Two => 2,
		}
	}
}

impl TryFrom<u8> for StopBits {
	type Error = InvalidStopBits;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(Self::One),
			2 => Ok(Self::Two),
			value => Err(InvalidStopBits { value }),
		}
	}
}

impl std::fmt::Display for StopBits {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.count())
	}
}

/// The parity mode of a serial line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Parity {
	None,
	Odd,
	Even,
	Mark,
	Space,
}

impl Parity {
	/// Get the canonical upper-case name of the parity mode.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "NONE",
			Self::Odd => "ODD",
			Self::Even => "EVEN",
			Self::Mark => "MARK",
			Self::Space => "SPACE",
		}
	}
}

impl std::str::FromStr for Parity {
	type Err = InvalidParity;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		if value.eq_ignore_ascii_case("NONE") {
			Ok(Self::None)
		} else if value.eq_ignore_ascii_case("ODD") {
			Ok(Self::Odd)
		} else if value.eq_ignore_ascii_case("EVEN") {
			Ok(Self::Even)
		} else if value.eq_ignore_ascii_case("MARK") {
			Ok(Self::Mark)
		} else if value.eq_ignore_ascii_case("SPACE") {
			Ok(Self::Space)
		} else {
			Err(InvalidParity { value: value.into() })
		}
	}
}

impl std::fmt::Display for Parity {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
