//! Serial ports as generic point-to-point connections.
//!
//! The [`Connection`] trait is the contract protocol clients talk over:
//! endpoint addressed ends, absolute I/O deadlines and an explicit open/close lifecycle.
//! [`SerialConnection`] implements it on top of any [`SerialPort`] device driver,
//! translating each armed read deadline into the single relative read timeout a serial device offers.
//! A driver implementation for the [`serial2`] crate is provided behind the `serial2` feature, which is enabled by default.

#[macro_use]
mod log;

pub mod serial_port;

mod connection;
mod endpoint;
mod error;
mod serial;

pub use connection::Connection;
pub use endpoint::Endpoint;
pub use endpoint::SerialEndpoint;
pub use endpoint::Transport;
pub use error::ConnectionError;
pub use error::InvalidMode;
pub use error::InvalidParity;
pub use error::InvalidStopBits;
pub use serial::SerialConnection;
pub use serial_port::Mode;
pub use serial_port::Parity;
pub use serial_port::SerialPort;
pub use serial_port::StopBits;
