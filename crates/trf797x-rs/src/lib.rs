#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`Trf797x::new()`](fn@crate::radio::Trf797x::new)
//! - [`Trf797x::init()`](radio/struct.Trf797x.html#method.init)
//! - [`Trf797x::transceive_bits()`](radio/struct.Trf797x.html#method.transceive_bits)
//! - [`Trf797x::transceive_bytes()`](radio/struct.Trf797x.html#method.transceive_bytes)
//! - [`Trf797x::rf_on()`](radio/struct.Trf797x.html#method.rf_on)
//! - [`Trf797x::rf_off()`](radio/struct.Trf797x.html#method.rf_off)
//! - [`IrqFlags::signal()`](fn@crate::IrqFlags::signal)
//!
//! ## Advanced API
//!
//! - [`Trf797x::enter_direct_mode0()`](fn@crate::radio::Trf797x::enter_direct_mode0)
//! - [`Trf797x::enter_direct_mode1()`](fn@crate::radio::Trf797x::enter_direct_mode1)
//! - [`DirectModeSession::exit()`](fn@crate::radio::DirectModeSession::exit)
//! - [`Trf797x::configure_direct_modes()`](fn@crate::radio::Trf797x::configure_direct_modes)
//! - [`Trf797x::direct_mode_state()`](fn@crate::radio::Trf797x::direct_mode_state)
//! - [`Trf797x::write_iso_control()`](fn@crate::radio::Trf797x::write_iso_control)
//! - [`Trf797x::reset_fifo()`](radio/struct.Trf797x.html#method.reset_fifo)
//! - [`Trf797x::get_fifo_status()`](radio/struct.Trf797x.html#method.get_fifo_status)
//! - [`Trf797x::last_fifo_status()`](radio/struct.Trf797x.html#method.last_fifo_status)
//! - [`Trf797x::read_irq_status()`](radio/struct.Trf797x.html#method.read_irq_status)
//! - [`Trf797x::reset_irq_status()`](radio/struct.Trf797x.html#method.reset_irq_status)
//! - [`Trf797x::enable_slot_counter()`](radio/struct.Trf797x.html#method.enable_slot_counter)
//! - [`Trf797x::disable_slot_counter()`](radio/struct.Trf797x.html#method.disable_slot_counter)
//! - [`Trf797x::run_decoders()`](radio/struct.Trf797x.html#method.run_decoders)
//! - [`Trf797x::stop_decoders()`](radio/struct.Trf797x.html#method.stop_decoders)
//! - [`Trf797x::transmit_next_slot()`](radio/struct.Trf797x.html#method.transmit_next_slot)
//! - [`Trf797x::print_details()`](radio/struct.Trf797x.html#method.print_details)
//!
//! ## Configuration API
//!
//! - [`Trf797x::with_config()`](radio/struct.Trf797x.html#method.with_config)
//! - [`ReaderConfig`](struct@crate::radio::ReaderConfig)
//!
#![no_std]

mod types;
pub use types::{DirectMode, DirectModeState, FifoStatus, IrqStatus};
mod irq;
pub use irq::IrqFlags;
pub mod radio;

#[cfg(test)]
mod test {
    extern crate std;
    use crate::{radio::Trf797x, IrqFlags};
    use embedded_hal::{
        delay::DelayNs,
        spi::{ErrorKind, ErrorType, SpiBus},
    };
    use embedded_hal_mock::eh1::{
        digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
    };
    use std::{cell::Cell, vec, vec::Vec};

    /// Takes an indefinite repetition of a tuple of 2 vectors: `(written_data, read_data)`
    /// and generates a `Vec` of `SpiTransaction`s (one chip select window per tuple).
    ///
    /// NOTE: This macro is only used to generate code in unit tests (for this crate only).
    #[macro_export]
    macro_rules! spi_test_expects {
        ($( ($written:expr , $read:expr $(,)? ) , ) + ) => {
            {
                let mut expectations = std::vec::Vec::new();
                $(
                    expectations.extend($crate::test::select_window($written, $read));
                )*
                expectations
            }
        }
    }

    /// Generates the chip select pin's expectations for a number of
    /// complete (select, then deselect) windows.
    ///
    /// NOTE: This macro is only used to generate code in unit tests (for this crate only).
    #[macro_export]
    macro_rules! cs_test_expects {
        ($windows:expr) => {
            $crate::test::cs_windows($windows)
        };
    }

    pub fn select_window(written: Vec<u8>, read: Vec<u8>) -> Vec<SpiTransaction<u8>> {
        let mut window = vec![SpiTransaction::write_vec(written)];
        if !read.is_empty() {
            window.push(SpiTransaction::read_vec(read));
        }
        window.push(SpiTransaction::flush());
        window
    }

    pub fn cs_windows(windows: usize) -> Vec<PinTransaction> {
        let mut expectations = Vec::with_capacity(windows * 2);
        for _ in 0..windows {
            expectations.push(PinTransaction::set(PinState::Low));
            expectations.push(PinTransaction::set(PinState::High));
        }
        expectations
    }

    /// A delay that counts the poll slices (calls to `delay_us()`) and emulates the
    /// chip's IRQ pin by signaling the [`IrqFlags`] at the end of scripted slices.
    pub struct ScriptedDelay<'a> {
        irq: &'a IrqFlags,
        slices: &'a Cell<u32>,
        millis: &'a Cell<u32>,
        slice_us: &'a Cell<u32>,
        signal_after: Vec<u32>,
    }

    impl<'a> ScriptedDelay<'a> {
        pub fn new(
            irq: &'a IrqFlags,
            counters: &'a DelayCounters,
            signal_after: &[u32],
        ) -> Self {
            Self {
                irq,
                slices: &counters.slices,
                millis: &counters.millis,
                slice_us: &counters.slice_us,
                signal_after: signal_after.to_vec(),
            }
        }
    }

    impl DelayNs for ScriptedDelay<'_> {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_us(&mut self, us: u32) {
            let slice = self.slices.get() + 1;
            self.slices.set(slice);
            self.slice_us.set(us);
            if self.signal_after.contains(&slice) {
                self.irq.signal();
            }
        }

        fn delay_ms(&mut self, ms: u32) {
            self.millis.set(self.millis.get() + ms);
        }
    }

    /// What a [`ScriptedDelay`] observed.
    #[derive(Default)]
    pub struct DelayCounters {
        /// number of `delay_us()` calls
        pub slices: Cell<u32>,
        /// sum of all `delay_ms()` calls
        pub millis: Cell<u32>,
        /// the value of the last `delay_us()` call
        pub slice_us: Cell<u32>,
    }

    /// A tuple struct to encapsulate objects used to mock [`Trf797x`],
    pub struct MockReader<'a, D>(
        pub Trf797x<'a, SpiMock<u8>, PinMock, D>,
        pub SpiMock<u8>,
        pub PinMock,
    );

    /// Create a mock objects using the given expectations.
    pub fn mk_reader<'a, D: DelayNs>(
        irq: &'a IrqFlags,
        delay_impl: D,
        spi_expectations: &[SpiTransaction<u8>],
        cs_expectations: &[PinTransaction],
    ) -> MockReader<'a, D> {
        let spi = SpiMock::new(spi_expectations);
        let cs_pin = PinMock::new(cs_expectations);
        let reader = Trf797x::new(spi.clone(), cs_pin.clone(), delay_impl, irq);
        MockReader(reader, spi, cs_pin)
    }

    /// A bus that fails its `fail_at`-th operation (counting from 1).
    ///
    /// Every other operation succeeds and reads zeros.
    pub struct FaultyBus {
        calls: u32,
        fail_at: u32,
    }

    impl FaultyBus {
        pub fn new(fail_at: u32) -> Self {
            Self { calls: 0, fail_at }
        }

        fn step(&mut self) -> Result<(), ErrorKind> {
            self.calls += 1;
            if self.calls == self.fail_at {
                return Err(ErrorKind::Other);
            }
            Ok(())
        }
    }

    impl ErrorType for FaultyBus {
        type Error = ErrorKind;
    }

    impl SpiBus for FaultyBus {
        fn read(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
            self.step()?;
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), ErrorKind> {
            self.step()
        }

        fn transfer(&mut self, read: &mut [u8], _write: &[u8]) -> Result<(), ErrorKind> {
            self.step()?;
            read.fill(0);
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
            self.step()?;
            words.fill(0);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ErrorKind> {
            self.step()
        }
    }

    /// Create a [`Trf797x`] on a [`FaultyBus`] and return it with its chip select pin mock.
    pub fn mk_faulty_reader<'a, D: DelayNs>(
        irq: &'a IrqFlags,
        delay_impl: D,
        fail_at: u32,
        cs_expectations: &[PinTransaction],
    ) -> (Trf797x<'a, FaultyBus, PinMock, D>, PinMock) {
        let cs_pin = PinMock::new(cs_expectations);
        let reader = Trf797x::new(FaultyBus::new(fail_at), cs_pin.clone(), delay_impl, irq);
        (reader, cs_pin)
    }
}
