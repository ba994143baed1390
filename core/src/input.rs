//! Input subsystem boundary.
//!
//! The host's input drivers connect devices (advertising their capability
//! bitmaps) and report raw events; handlers register an id table naming
//! the device classes they care about. An event is delivered to a handler
//! only if the source device satisfies one of the handler's match rules,
//! so a handler interested in touchscreens never sees trackball traffic.

use slingshot_abi::{InputDeviceCaps, InputDeviceId, RawInputEvent, RegisterError};
use slingshot_lib::IrqMutex;

/// Maximum number of registered input handlers.
pub const MAX_INPUT_HANDLERS: usize = 4;

/// Maximum number of simultaneously connected input devices.
pub const MAX_INPUT_DEVICES: usize = 8;

/// Event callback invoked for every event on a matched device.
pub type InputEventFn = fn(&RawInputEvent);

/// A registered input handler: a name for diagnostics, the device classes
/// it matches, and its event callback.
pub struct InputHandlerDesc {
    pub name: &'static str,
    pub id_table: &'static [InputDeviceId],
    pub event: InputEventFn,
}

impl InputHandlerDesc {
    fn matches(&self, caps: &InputDeviceCaps) -> bool {
        self.id_table.iter().any(|id| id.matches(caps))
    }
}

static HANDLERS: IrqMutex<[Option<&'static InputHandlerDesc>; MAX_INPUT_HANDLERS]> =
    IrqMutex::new([None; MAX_INPUT_HANDLERS]);

static DEVICES: IrqMutex<[Option<InputDeviceCaps>; MAX_INPUT_DEVICES]> =
    IrqMutex::new([None; MAX_INPUT_DEVICES]);

/// Scoped registration of an input handler; dropping unregisters.
pub struct InputHandlerHandle {
    slot: usize,
}

impl Drop for InputHandlerHandle {
    fn drop(&mut self) {
        let mut slots = HANDLERS.lock();
        slots[self.slot] = None;
    }
}

/// Register an input handler.
pub fn register_input_handler(
    desc: &'static InputHandlerDesc,
) -> Result<InputHandlerHandle, RegisterError> {
    let mut slots = HANDLERS.lock();
    for (i, slot) in slots.iter_mut().enumerate() {
        if slot.is_none() {
            *slot = Some(desc);
            return Ok(InputHandlerHandle { slot: i });
        }
    }
    Err(RegisterError::TableFull)
}

/// Connect a device; returns its device index for event reporting.
pub fn connect_device(caps: InputDeviceCaps) -> Result<usize, RegisterError> {
    let mut devices = DEVICES.lock();
    for (i, slot) in devices.iter_mut().enumerate() {
        if slot.is_none() {
            *slot = Some(caps);
            return Ok(i);
        }
    }
    Err(RegisterError::TableFull)
}

/// Disconnect a previously connected device.
pub fn disconnect_device(device: usize) {
    if device < MAX_INPUT_DEVICES {
        let mut devices = DEVICES.lock();
        devices[device] = None;
    }
}

/// Deliver a raw event from `device` to every matching handler.
///
/// Handlers run outside the registry locks against a snapshot, so an event
/// callback may register or unregister without deadlocking.
pub fn report_event(device: usize, event: &RawInputEvent) {
    if device >= MAX_INPUT_DEVICES {
        return;
    }
    let Some(caps) = ({
        let devices = DEVICES.lock();
        devices[device]
    }) else {
        return;
    };

    let handlers = *HANDLERS.lock();
    for handler in handlers.iter().flatten() {
        if handler.matches(&caps) {
            (handler.event)(event);
        }
    }
}

/// Disconnect every device. Teardown/test hook.
pub fn reset_devices() {
    let mut devices = DEVICES.lock();
    *devices = [None; MAX_INPUT_DEVICES];
}
