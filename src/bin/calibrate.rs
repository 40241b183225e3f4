#![no_main]
#![no_std]
// macros from defmt trigger this lint, but are out of our control
#![allow(clippy::ignored_unit_patterns)]
// temporarily ignore missing docs
#![allow(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

use tiltmorse_app as _; // global logger + panicking-behavior + memory layout

// Samples the motion sensor on every press of button A and dumps the values
// over the serial link, to pick tilt thresholds from.
#[rtic::app(
    device = microbit_pac,
    dispatchers = [SWI0_EGU0]
)]
mod app {
    use core::mem::MaybeUninit;
    use microbit::{
        hal::{gpiote::Gpiote, timer::Timer, uarte::Pins},
        pac::{self as microbit_pac, TWIM0, UARTE0},
        Board,
    };
    use rtic_monotonics::systick::prelude::*;
    use rtic_sync::channel::{self, Channel, TrySendError};
    use tiltmorse_app::{
        device::{
            accel::Lsm303Sensor,
            button::{ButtonDriver, ButtonResources, Started},
            errata::clear_int_i2c_interrupt_line,
            serial::{init as init_serial, LineWriter, Resources as SerialResources},
        },
        time::{Mono, SYSCLK_HZ},
        BUILD_DATE, VERSION,
    };
    use tiltmorse_engine::{
        calibration::{csv_record, hint, CSV_HEADER},
        config::{BUTTON_MAILBOX_CAPACITY, CALIBRATION_DEBOUNCE_WINDOW, TILT_THRESHOLDS},
        ports::{SerialTx, TiltSensor},
        ButtonEvent, InputCaptor, TiltCell,
    };

    const INSTRUCTIONS: &str = "# Hold the board still, press button A to take a sample.\n";

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        button_driver: ButtonDriver<'static, Started>,
        presses: channel::Receiver<'static, ButtonEvent, BUTTON_MAILBOX_CAPACITY>,
        sensor: Option<Lsm303Sensor<TWIM0>>,
        uplink: LineWriter<UARTE0>,
    }

    #[init(local = [
        // Never published to, the latched tilt is of no interest here.
        tilt: TiltCell = TiltCell::new(),
        button_channel: Channel<ButtonEvent, BUTTON_MAILBOX_CAPACITY> = Channel::new(),
        serial_resources_mem: MaybeUninit<SerialResources> = MaybeUninit::uninit(),
    ])]
    fn init(cx: init::Context) -> (Shared, Local) {
        defmt::trace!("calibrate::init()");
        defmt::info!("tiltmorse calibration {} (built {}).", VERSION, BUILD_DATE);

        let board = Board::new(cx.device, cx.core);
        Mono::start(board.SYST, SYSCLK_HZ);

        let mut delay = Timer::new(board.TIMER1);
        let ((twim0, i2c_pins), cleared) =
            clear_int_i2c_interrupt_line(board.TWIM0, board.i2c_internal, &mut delay);
        if let Err(e) = cleared {
            defmt::warn!(
                "Failed to clear the internal I2C interrupt line: {}",
                defmt::Debug2Format(&e)
            );
        }

        let sensor = Lsm303Sensor::new(twim0, i2c_pins, &mut delay)
            .inspect_err(|e| defmt::error!("Failed to initialize the LSM303AGR: {}", e))
            .ok();

        let serial_resources = cx
            .local
            .serial_resources_mem
            .write(SerialResources::default());
        let (uplink, _, _) = init_serial(board.UARTE0, Pins::from(board.uart), serial_resources)
            .expect("Could not initialize the serial link");

        let (press_tx, press_rx) = cx.local.button_channel.split();
        let buttons = ButtonResources::new(
            Gpiote::new(board.GPIOTE),
            board.buttons.button_a,
            board.buttons.button_b,
        );
        let button_driver = ButtonDriver::new(
            buttons,
            InputCaptor::with_window(cx.local.tilt, CALIBRATION_DEBOUNCE_WINDOW),
            press_tx,
        )
        .start();

        capture::spawn().expect("Failed to spawn the capture task");

        (
            Shared {},
            Local {
                button_driver,
                presses: press_rx,
                sensor,
                uplink,
            },
        )
    }

    #[task(binds = GPIOTE, priority = 2, local = [ button_driver ])]
    fn handle_gpio_events(cx: handle_gpio_events::Context) {
        match cx.local.button_driver.handle_button_event(Mono::now()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => defmt::warn!("Dropping a press, still capturing."),
            Err(TrySendError::NoReceiver(_)) => unreachable!(),
        }
    }

    #[task(priority = 1, local = [ presses, sensor, uplink, sample_count: u32 = 0 ])]
    async fn capture(cx: capture::Context) {
        defmt::trace!("calibrate::capture()");
        let uplink = cx.local.uplink;

        let Some(sensor) = cx.local.sensor.as_mut() else {
            if let Err(e) = uplink.write_line("# ERROR: Motion sensor unavailable\n").await {
                defmt::error!("Failed to write to the serial link: {}", e);
            }
            return;
        };

        for line in [CSV_HEADER, INSTRUCTIONS] {
            if let Err(e) = uplink.write_line(line).await {
                defmt::error!("Failed to write to the serial link: {}", e);
            }
        }

        while let Ok(event) = cx.local.presses.recv().await {
            if event == ButtonEvent::Finalize {
                continue;
            }

            let sample = match sensor.read() {
                Ok(sample) => sample,
                Err(e) => {
                    defmt::error!("Failed to read the motion sensor: {}", e);
                    if let Err(e) = uplink.write_line("# ERROR: Failed to read IMU data\n").await {
                        defmt::error!("Failed to write to the serial link: {}", e);
                    }
                    continue;
                }
            };

            *cx.local.sample_count += 1;
            let record = csv_record(Mono::now().ticks(), &sample);
            let hint_line = hint(*cx.local.sample_count, &sample, &TILT_THRESHOLDS);

            for line in [record, hint_line] {
                let Ok(line) = line else {
                    defmt::warn!("Dropping a sample line that does not fit the buffer.");
                    continue;
                };
                if let Err(e) = uplink.write_line(&line).await {
                    defmt::error!("Failed to write to the serial link: {}", e);
                }
            }
        }
    }
}
