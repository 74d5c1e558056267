//! The interrupt indicators shared between the IRQ pin's handler and the driver.

use core::sync::atomic::{AtomicBool, Ordering};

/// A pair of indicators that signal the chip's IRQ pin to the transceive engine.
///
/// The interrupt handler attached to the chip's IRQ pin is the only writer of the
/// pending indicator (via [`IrqFlags::signal()`]). The driver observes and clears
/// it atomically while polling, so an interrupt cannot be lost between reading the
/// indicator and resetting it.
///
/// Only one transceive call may be in flight per instance, so there should be one
/// instance per chip. It is typically a `static`:
/// ```
/// use trf797x::IrqFlags;
///
/// static IRQ: IrqFlags = IrqFlags::new();
///
/// // in the IRQ pin's (rising edge) interrupt handler
/// fn on_irq_pin() {
///     IRQ.signal();
/// }
/// # on_irq_pin();
/// # assert!(IRQ.is_pending());
/// ```
#[derive(Debug, Default)]
pub struct IrqFlags {
    pending: AtomicBool,
    rx_end: AtomicBool,
}

impl IrqFlags {
    /// Instantiate a pair of cleared indicators.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            rx_end: AtomicBool::new(false),
        }
    }

    /// Mark an interrupt as pending.
    ///
    /// This is meant to be called from the IRQ pin's interrupt handler.
    pub fn signal(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Is an interrupt pending (not yet observed by the driver)?
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Has the driver observed the end of a reception since it last cleared the indicators?
    pub fn is_rx_end(&self) -> bool {
        self.rx_end.load(Ordering::Acquire)
    }

    /// Reset both indicators.
    pub fn clear(&self) {
        self.pending.store(false, Ordering::Release);
        self.rx_end.store(false, Ordering::Release);
    }

    /// Observe and clear the pending indicator in one step.
    pub(crate) fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn set_rx_end(&self) {
        self.rx_end.store(true, Ordering::Release);
    }

    /// Observe and clear the end-of-reception indicator in one step.
    pub(crate) fn take_rx_end(&self) -> bool {
        self.rx_end.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod test {
    use super::IrqFlags;

    #[test]
    fn signal_then_take() {
        let irq = IrqFlags::new();
        assert!(!irq.is_pending());
        irq.signal();
        assert!(irq.is_pending());
        assert!(irq.take_pending());
        // observing clears the indicator
        assert!(!irq.is_pending());
        assert!(!irq.take_pending());
    }

    #[test]
    fn rx_end_is_taken_once() {
        let irq = IrqFlags::default();
        irq.set_rx_end();
        assert!(irq.is_rx_end());
        assert!(irq.take_rx_end());
        assert!(!irq.take_rx_end());
    }

    #[test]
    fn clear_both() {
        let irq = IrqFlags::new();
        irq.signal();
        irq.set_rx_end();
        irq.clear();
        assert!(!irq.is_pending());
        assert!(!irq.is_rx_end());
    }
}
