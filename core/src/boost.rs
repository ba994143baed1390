//! The boost coordinator.
//!
//! Wires the lock-free state, the unboost timers, and the three event
//! sources together behind a process-wide registry with explicit
//! [`boost_init`]/[`boost_teardown`]. The kick entry points are callable
//! from any context, never block, and are silent no-ops until init has
//! completed — collaborators may race against bring-up freely.
//!
//! Kicks do not run the boost machinery inline. They latch a per-class
//! pending bit (idempotent by construction: at most one start task per
//! class can be outstanding) and the host's poll context drains the latch
//! in [`boost_poll`]. Within one class the start task always runs before
//! the unboost it schedules, because the unboost is armed only after the
//! start task's bit-set step; across classes nothing is ordered.

use core::sync::atomic::{AtomicU32, Ordering};

use slingshot_abi::{
    AbsBits, BlankEvent, BlankPhase, BlankState, BoostClass, BoostFlags, BoostInitError, EventBits,
    InputDeviceId, KeyBits, MatchFlags, NOTIFY_PRIORITY_DEFAULT, NOTIFY_PRIORITY_MAX, PolicyBounds,
    RawInputEvent,
};
use slingshot_lib::{StateFlag, clock, klog_error, klog_info};
use spin::Mutex;

use crate::state::BoostState;
use crate::timer::UnboostTimers;
use crate::{config, cpufreq, display, input, policy};

static STATE: BoostState = BoostState::new();
static TIMERS: UnboostTimers = UnboostTimers::new();

/// Pending start-task latch, one bit per [`BoostClass`].
static PENDING_KICKS: AtomicU32 = AtomicU32::new(0);

static ENABLED: StateFlag = StateFlag::new();

#[inline]
const fn kick_bit(class: BoostClass) -> u32 {
    1 << class as u32
}

#[inline]
fn latch_kick(class: BoostClass) {
    PENDING_KICKS.fetch_or(kick_bit(class), Ordering::AcqRel);
}

// ---------------------------------------------------------------------------
// Input device interest
// ---------------------------------------------------------------------------

static BOOST_INPUT_IDS: [InputDeviceId; 3] = [
    // Multi-touch touchscreen
    InputDeviceId {
        flags: MatchFlags::EVBIT.union(MatchFlags::ABSBIT),
        evbits: EventBits::ABS,
        absbits: AbsBits::MT_POSITION_X.union(AbsBits::MT_POSITION_Y),
        keybits: KeyBits::empty(),
    },
    // Touchpad
    InputDeviceId {
        flags: MatchFlags::KEYBIT.union(MatchFlags::ABSBIT),
        evbits: EventBits::empty(),
        absbits: AbsBits::X.union(AbsBits::Y),
        keybits: KeyBits::BTN_TOUCH,
    },
    // Keypad
    InputDeviceId {
        flags: MatchFlags::EVBIT,
        evbits: EventBits::KEY,
        absbits: AbsBits::empty(),
        keybits: KeyBits::empty(),
    },
];

static BOOST_INPUT_HANDLER: input::InputHandlerDesc = input::InputHandlerDesc {
    name: "cpu_boost_input",
    id_table: &BOOST_INPUT_IDS,
    event: input_event_cb,
};

// ---------------------------------------------------------------------------
// Collaborator callbacks
// ---------------------------------------------------------------------------

fn policy_adjust_cb(bounds: &mut PolicyBounds) {
    let tun = config::tunables();
    policy::adjust(bounds, STATE.read(), &tun);
}

fn input_event_cb(_event: &RawInputEvent) {
    // Input only boosts while the screen is awake; the explicit kick API
    // below has no such gate.
    if !STATE.read().contains(BoostFlags::SCREEN_AWAKE) {
        return;
    }
    latch_kick(BoostClass::Input);
}

fn blank_event_cb(event: &BlankEvent) {
    // Act on blank transitions as soon as they are announced.
    if event.phase != BlankPhase::Early {
        return;
    }

    // Boost when the screen turns on and unboost when it turns off.
    match event.state {
        BlankState::Unblank => {
            STATE.set_bits(BoostFlags::SCREEN_AWAKE);
            kick_max_internal(config::tunables().wake_boost_duration_ms);
        }
        BlankState::Blank => {
            STATE.clear_bits(BoostFlags::SCREEN_AWAKE);
            unboost_all();
        }
    }
}

// ---------------------------------------------------------------------------
// Kick API
// ---------------------------------------------------------------------------

/// Trigger the ordinary input boost as if input activity had occurred.
///
/// Unlike real input events, an explicit kick does not require the screen
/// to be awake. No-op until [`boost_init`] has completed.
pub fn boost_kick() {
    if !ENABLED.is_active() {
        return;
    }
    latch_kick(BoostClass::Input);
}

/// Request a max boost for `duration_ms`.
///
/// Merged longest-deadline-wins with any max boost already in flight: a
/// request that would expire before the current one is a no-op.
pub fn boost_kick_max(duration_ms: u32) {
    if !ENABLED.is_active() {
        return;
    }
    kick_max_internal(duration_ms);
}

/// Request a general-purpose boost for `duration_ms`; same merge rule as
/// [`boost_kick_max`].
pub fn boost_kick_general(duration_ms: u32) {
    if !ENABLED.is_active() {
        return;
    }
    if let Some(cell) = STATE.deadline(BoostClass::General) {
        if cell.extend(clock::monotonic_ms(), duration_ms) {
            latch_kick(BoostClass::General);
        }
    }
}

fn kick_max_internal(duration_ms: u32) {
    if let Some(cell) = STATE.deadline(BoostClass::Max) {
        if cell.extend(clock::monotonic_ms(), duration_ms) {
            latch_kick(BoostClass::Max);
        }
    }
}

// ---------------------------------------------------------------------------
// Poll context
// ---------------------------------------------------------------------------

/// Drain pending start tasks, then fire expired unboosts.
///
/// The host calls this from its periodic tick or idle path. Start tasks
/// run first: a kick that lands in the same poll as its class's expiry
/// re-arms the timer instead of letting the boost flap down and up.
pub fn boost_poll() {
    if !ENABLED.is_active() {
        return;
    }

    let pending = PENDING_KICKS.swap(0, Ordering::AcqRel);
    if pending != 0 {
        for class in [BoostClass::Input, BoostClass::Max, BoostClass::General] {
            if pending & kick_bit(class) != 0 {
                run_boost_start(class);
            }
        }
    }

    let fired = TIMERS.advance_to(clock::monotonic_ms());
    for class in fired.iter() {
        run_unboost(class);
    }
}

fn run_boost_start(class: BoostClass) {
    let now = clock::monotonic_ms();
    let duration_ms = match STATE.deadline(class) {
        Some(cell) => cell.duration_ms() as u64,
        None => config::tunables().input_boost_duration_ms as u64,
    };

    // A pending unboost means the bit is already set: cancel and re-arm
    // without touching policy. Only a fresh boost recomputes bounds.
    if !TIMERS.cancel(class) {
        STATE.set_bits(class.boost_bit());
        cpufreq::update_online_policies();
    }

    TIMERS.schedule(class, now + duration_ms);
}

fn run_unboost(class: BoostClass) {
    STATE.clear_bits(class.unboost_bits());
    cpufreq::update_online_policies();
}

/// The display-off reset: cancel the input and max unboosts and clear
/// every boost bit. Idempotent; a no-op when nothing was pending.
fn unboost_all() {
    let input_pending = TIMERS.cancel(BoostClass::Input);
    let max_pending = TIMERS.cancel(BoostClass::Max);
    if !input_pending && !max_pending {
        return;
    }

    STATE.clear_bits(BoostFlags::ALL_BOOSTS);
    cpufreq::update_online_policies();
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Snapshot of the coordinator state word.
pub fn boost_state() -> BoostFlags {
    STATE.read()
}

/// Is a deferred unboost pending for this class?
pub fn unboost_pending(class: BoostClass) -> bool {
    TIMERS.is_pending(class)
}

/// Deadline of the class's pending unboost, if any.
pub fn unboost_deadline_ms(class: BoostClass) -> Option<u64> {
    TIMERS.deadline_ms(class)
}

// ---------------------------------------------------------------------------
// Init / teardown
// ---------------------------------------------------------------------------

struct Registrations {
    // Field order is drop order: display, input, cpufreq — the reverse of
    // acquisition in boost_init.
    _display: display::BlankClientHandle,
    _input: input::InputHandlerHandle,
    _cpufreq: cpufreq::PolicyAdjustHandle,
}

static REGISTRATIONS: Mutex<Option<Registrations>> = Mutex::new(None);

/// Bring the coordinator up.
///
/// Registers with the frequency-policy engine, the input subsystem, and
/// the display notifier, in that order; any failure releases the
/// registrations already acquired (handles drop in reverse order) and
/// leaves the coordinator absent — the kick APIs stay no-ops and the rest
/// of the system is unaffected.
pub fn boost_init() -> Result<(), BoostInitError> {
    if ENABLED.is_active() {
        return Err(BoostInitError::AlreadyInitialized);
    }

    STATE.reset();
    TIMERS.reset();
    PENDING_KICKS.store(0, Ordering::Release);
    STATE.set_bits(BoostFlags::SCREEN_AWAKE);

    let cpufreq_reg =
        match cpufreq::register_policy_adjust(policy_adjust_cb, NOTIFY_PRIORITY_DEFAULT) {
            Ok(handle) => handle,
            Err(err) => {
                klog_error!("cpu_boost: failed to register policy notifier: {:?}", err);
                return Err(BoostInitError::Cpufreq(err));
            }
        };

    let input_reg = match input::register_input_handler(&BOOST_INPUT_HANDLER) {
        Ok(handle) => handle,
        Err(err) => {
            klog_error!("cpu_boost: failed to register input handler: {:?}", err);
            return Err(BoostInitError::Input(err));
        }
    };

    let display_reg = match display::register_blank_client(blank_event_cb, NOTIFY_PRIORITY_MAX) {
        Ok(handle) => handle,
        Err(err) => {
            klog_error!("cpu_boost: failed to register blank notifier: {:?}", err);
            return Err(BoostInitError::Display(err));
        }
    };

    *REGISTRATIONS.lock() = Some(Registrations {
        _display: display_reg,
        _input: input_reg,
        _cpufreq: cpufreq_reg,
    });
    ENABLED.set_active();
    klog_info!("cpu_boost: coordinator ready");
    Ok(())
}

/// Tear the coordinator down: unregister from every collaborator (reverse
/// of acquisition), drop all state, and let the engine recompute unboosted
/// bounds. Safe to call when not initialized.
pub fn boost_teardown() {
    if !ENABLED.is_active() {
        return;
    }
    ENABLED.set_inactive();

    // Dropping the handles unregisters the blank client, the input
    // handler, and the policy notifier, in that order.
    *REGISTRATIONS.lock() = None;

    TIMERS.reset();
    STATE.reset();
    PENDING_KICKS.store(0, Ordering::Release);
    cpufreq::update_online_policies();
    klog_info!("cpu_boost: coordinator stopped");
}
