//! Display power notifier chain.
//!
//! The host's panel driver announces blank-state transitions here; clients
//! (the boost coordinator among them) register a callback with a priority.
//! Delivery runs outside the table lock in descending priority order, so
//! the boost client — registered at maximum priority — observes the
//! transition before anyone else reacts to it.

use slingshot_abi::{BlankEvent, RegisterError};
use slingshot_lib::IrqMutex;

/// Maximum number of blank-notifier clients.
pub const MAX_BLANK_CLIENTS: usize = 8;

/// A blank-notifier callback.
pub type BlankNotifyFn = fn(&BlankEvent);

#[derive(Clone, Copy)]
struct ClientSlot {
    func: BlankNotifyFn,
    priority: i32,
}

static CLIENTS: IrqMutex<[Option<ClientSlot>; MAX_BLANK_CLIENTS]> =
    IrqMutex::new([None; MAX_BLANK_CLIENTS]);

/// Scoped registration of a blank-notifier client; dropping unregisters.
pub struct BlankClientHandle {
    slot: usize,
}

impl Drop for BlankClientHandle {
    fn drop(&mut self) {
        let mut slots = CLIENTS.lock();
        slots[self.slot] = None;
    }
}

/// Add a client to the blank notifier chain.
pub fn register_blank_client(
    func: BlankNotifyFn,
    priority: i32,
) -> Result<BlankClientHandle, RegisterError> {
    let mut slots = CLIENTS.lock();
    for (i, slot) in slots.iter_mut().enumerate() {
        if slot.is_none() {
            *slot = Some(ClientSlot { func, priority });
            return Ok(BlankClientHandle { slot: i });
        }
    }
    Err(RegisterError::TableFull)
}

/// Deliver a blank event to every client, highest priority first.
pub fn notify_blank(event: BlankEvent) {
    let mut local = *CLIENTS.lock();

    let mut i = 0;
    while i < MAX_BLANK_CLIENTS {
        let mut best = i;
        let mut j = i + 1;
        while j < MAX_BLANK_CLIENTS {
            if local[j].map(|s| s.priority) > local[best].map(|s| s.priority) {
                best = j;
            }
            j += 1;
        }
        local.swap(i, best);
        i += 1;
    }

    for slot in local.iter().flatten() {
        (slot.func)(&event);
    }
}
