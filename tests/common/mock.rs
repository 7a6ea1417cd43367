//! Scripted mock serial devices to exercise connections without hardware.
//!
//! Mock devices live in a process wide registry keyed by port name, mirroring the OS port namespace.
//! A test installs a [`ScriptedPort`] under a fresh name and hands that name to the connection,
//! which reaches the same shared state through [`SerialPort::open`].

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::Duration;

use serial_conn::{Mode, SerialPort};

fn registry() -> &'static Mutex<HashMap<String, Arc<Mutex<PortState>>>> {
	static REGISTRY: OnceLock<Mutex<HashMap<String, Arc<Mutex<PortState>>>>> = OnceLock::new();
	REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

#[derive(Default)]
struct PortState {
	open_count: usize,
	device_open: bool,
	mode: Option<Mode>,
	read_timeout: Option<Option<Duration>>,
	read_chunks: VecDeque<Vec<u8>>,
	written: Vec<u8>,
	fail_open: Option<std::io::ErrorKind>,
	fail_set_mode: Option<std::io::ErrorKind>,
	fail_read: Option<std::io::ErrorKind>,
	fail_write: Option<std::io::ErrorKind>,
	fail_close: Option<std::io::ErrorKind>,
}

/// Test side handle to a scripted serial device.
///
/// The device is removed from the registry again when the handle is dropped.
pub struct ScriptedPort {
	name: String,
	state: Arc<Mutex<PortState>>,
}

impl ScriptedPort {
	/// Register a fresh scripted device under the given port name.
	///
	/// The registry is process wide and tests run in parallel, so every test must use a unique name.
	pub fn install(name: &str) -> Self {
		let state = Arc::new(Mutex::new(PortState::default()));
		let previous = registry().lock().unwrap().insert(name.to_owned(), state.clone());
		assert!(previous.is_none(), "a mock port named {:?} is already installed", name);
		Self {
			name: name.to_owned(),
			state,
		}
	}

	/// The port name the device is installed under.
	pub fn name(&self) -> &str {
		&self.name
	}

	fn state(&self) -> MutexGuard<'_, PortState> {
		self.state.lock().unwrap()
	}

	/// Queue bytes for the connection to read.
	pub fn push_read(&self, data: &[u8]) {
		self.state().read_chunks.push_back(data.to_vec());
	}

	/// All bytes written by the connection so far.
	pub fn written(&self) -> Vec<u8> {
		self.state().written.clone()
	}

	/// The number of times the device was opened.
	pub fn open_count(&self) -> usize {
		self.state().open_count
	}

	/// Check if a device handle is currently held.
	pub fn is_device_open(&self) -> bool {
		self.state().device_open
	}

	/// The mode applied by the last successful [`SerialPort::set_mode`] call.
	pub fn applied_mode(&self) -> Option<Mode> {
		self.state().mode
	}

	/// The most recently armed read timeout.
	///
	/// `None` if no timeout was ever armed, `Some(None)` for an unbounded wait.
	pub fn read_timeout(&self) -> Option<Option<Duration>> {
		self.state().read_timeout
	}

	pub fn fail_next_open(&self, kind: std::io::ErrorKind) {
		self.state().fail_open = Some(kind);
	}

	pub fn fail_next_set_mode(&self, kind: std::io::ErrorKind) {
		self.state().fail_set_mode = Some(kind);
	}

	pub fn fail_next_read(&self, kind: std::io::ErrorKind) {
		self.state().fail_read = Some(kind);
	}

	pub fn fail_next_write(&self, kind: std::io::ErrorKind) {
		self.state().fail_write = Some(kind);
	}

	pub fn fail_next_close(&self, kind: std::io::ErrorKind) {
		self.state().fail_close = Some(kind);
	}
}

impl Drop for ScriptedPort {
	fn drop(&mut self) {
		registry().lock().unwrap().remove(&self.name);
	}
}

/// The device handle as held by the connection under test.
pub struct MockPort {
	state: Arc<Mutex<PortState>>,
}

impl MockPort {
	fn state(&self) -> MutexGuard<'_, PortState> {
		self.state.lock().unwrap()
	}
}

impl SerialPort for MockPort {
	fn open(name: &str) -> std::io::Result<Self> {
		let state = registry()
			.lock()
			.unwrap()
			.get(name)
			.cloned()
			.ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, format!("no such port: {}", name)))?;
		{
			let mut state = state.lock().unwrap();
			if let Some(kind) = state.fail_open.take() {
				return Err(kind.into());
			}
			state.open_count += 1;
			state.device_open = true;
		}
		Ok(Self { state })
	}

	fn set_mode(&mut self, mode: &Mode) -> std::io::Result<()> {
		let mut state = self.state();
		if let Some(kind) = state.fail_set_mode.take() {
			return Err(kind.into());
		}
		state.mode = Some(*mode);
		Ok(())
	}

	fn set_read_timeout(&mut self, timeout: Option<Duration>) -> std::io::Result<()> {
		self.state().read_timeout = Some(timeout);
		Ok(())
	}

	fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
		let mut state = self.state();
		if let Some(kind) = state.fail_read.take() {
			return Err(kind.into());
		}
		let Some(mut chunk) = state.read_chunks.pop_front() else {
			// Nothing scripted: report the elapsed timeout convention if the wait is bounded.
			// An unbounded wait with no data would block the test forever, so fail loudly instead.
			match state.read_timeout {
				Some(Some(_)) => return Ok(0),
				_ => panic!("mock read would block forever: no data queued and no bounded timeout armed"),
			}
		};
		let count = chunk.len().min(buffer.len());
		buffer[..count].copy_from_slice(&chunk[..count]);
		if count < chunk.len() {
			let rest = chunk.split_off(count);
			state.read_chunks.push_front(rest);
		}
		Ok(count)
	}

	fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
		let mut state = self.state();
		if let Some(kind) = state.fail_write.take() {
			return Err(kind.into());
		}
		state.written.extend_from_slice(buffer);
		Ok(buffer.len())
	}

	fn close(&mut self) -> std::io::Result<()> {
		let mut state = self.state();
		if let Some(kind) = state.fail_close.take() {
			return Err(kind.into());
		}
		state.device_open = false;
		Ok(())
	}
}

impl Drop for MockPort {
	fn drop(&mut self) {
		// A dropped handle releases the device whether or not close was called.
		self.state().device_open = false;
	}
}
