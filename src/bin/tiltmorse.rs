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

#[rtic::app(
    device = microbit_pac,
    dispatchers = [SWI0_EGU0, SWI1_EGU1, SWI2_EGU2]
)]
mod app {
    use core::mem::MaybeUninit;
    use microbit::{
        display::nonblocking::{Display, Frame, MicrobitFrame},
        hal::{gpio::Level, gpiote::Gpiote, timer::Timer, uarte::Pins},
        pac::{self as microbit_pac, PWM0, TIMER0 as DisplayDriver, TWIM0, UARTE0},
        Board,
    };
    use rtic_monotonics::systick::prelude::*;
    use rtic_sync::channel::{self, Channel, TrySendError};
    use tiltmorse_app::{
        device::{
            accel::Lsm303Sensor,
            button::{ButtonDriver, ButtonResources, Started},
            display::TextRenderer,
            errata::clear_int_i2c_interrupt_line,
            serial::{
                init as init_serial, ByteReader, LineWriter, Resources as SerialResources, RxDriver,
            },
            speaker::Speaker,
        },
        time::{Mono, MonoDelay, SYSCLK_HZ},
        BUILD_DATE, VERSION,
    };
    use tiltmorse_engine::{
        config::{BUTTON_MAILBOX_CAPACITY, CLASSIFIER_PERIOD, RECEIVER_PERIOD},
        ports::DisplayPort,
        ButtonEvent, InboundMessage, InputCaptor, OutboundMessage, ReceiveOutcome, Receiver,
        RecordOutcome, Recorder, Renderer, SendError, Sender as Transmitter, StateCell, TiltCell,
        TiltClassifier,
    };

    /// A finalized message is only ever handed over once the previous one is
    /// gone, the same holds for received lines.
    const HANDOVER_CAPACITY: usize = 1;

    const BOOT_TEXT: &str = "-.-.-";

    /// Forwards text to the LED matrix by way of [`show_frame`].
    struct LedMatrix;

    impl LedMatrix {
        fn show(text: &[u8]) {
            let mut frame = MicrobitFrame::default();
            frame.set(&TextRenderer::new(text));
            if show_frame::spawn(frame).is_err() {
                defmt::warn!("Dropping a display update to allow for hardware to catch up");
            }
        }
    }

    impl DisplayPort for LedMatrix {
        fn clear(&mut self) {
            Self::show(&[]);
        }

        fn write_text(&mut self, text: &[u8]) {
            Self::show(text);
        }
    }

    // Shared resources go here
    #[shared]
    struct Shared {
        display: Display<DisplayDriver>,
    }

    // Local resources go here
    #[local]
    struct Local {
        button_driver: ButtonDriver<'static, Started>,
        classifier: Option<TiltClassifier<'static, Lsm303Sensor<TWIM0>>>,
        recorder: Recorder<'static>,
        button_events: channel::Receiver<'static, ButtonEvent, BUTTON_MAILBOX_CAPACITY>,
        outbound_tx: channel::Sender<'static, OutboundMessage, HANDOVER_CAPACITY>,
        outbound_rx: channel::Receiver<'static, OutboundMessage, HANDOVER_CAPACITY>,
        transmitter: Transmitter<'static, LineWriter<UARTE0>, LedMatrix>,
        receiver: Receiver<'static>,
        serial_rx_driver: RxDriver<UARTE0>,
        serial_rx: ByteReader,
        inbound_tx: channel::Sender<'static, InboundMessage, HANDOVER_CAPACITY>,
        inbound_rx: channel::Receiver<'static, InboundMessage, HANDOVER_CAPACITY>,
        renderer: Renderer<'static, LedMatrix, Speaker<PWM0>, MonoDelay>,
    }

    #[init(local = [
        state: StateCell = StateCell::new(),
        tilt: TiltCell = TiltCell::new(),
        button_channel: Channel<ButtonEvent, BUTTON_MAILBOX_CAPACITY> = Channel::new(),
        outbound_channel: Channel<OutboundMessage, HANDOVER_CAPACITY> = Channel::new(),
        inbound_channel: Channel<InboundMessage, HANDOVER_CAPACITY> = Channel::new(),
        serial_resources_mem: MaybeUninit<SerialResources> = MaybeUninit::uninit(),
    ])]
    fn init(cx: init::Context) -> (Shared, Local) {
        defmt::trace!("tiltmorse::init()");
        defmt::info!("Welcome to tiltmorse {} (built {}).", VERSION, BUILD_DATE);

        let board = Board::new(cx.device, cx.core);
        Mono::start(board.SYST, SYSCLK_HZ);

        let state: &'static StateCell = cx.local.state;
        let tilt: &'static TiltCell = cx.local.tilt;

        defmt::info!(
            "Taking care of known third-party errata. \
            This will take some time, please be patient."
        );
        let mut delay = Timer::new(board.TIMER1);
        let ((twim0, i2c_pins), cleared) =
            clear_int_i2c_interrupt_line(board.TWIM0, board.i2c_internal, &mut delay);
        match cleared {
            Ok(()) => defmt::info!("Done taking care of errata."),
            Err(e) => defmt::warn!(
                "Failed to clear the internal I2C interrupt line: {}",
                defmt::Debug2Format(&e)
            ),
        }

        // A missing sensor only costs the tilt input, everything else keeps going.
        let classifier = match Lsm303Sensor::new(twim0, i2c_pins, &mut delay) {
            Ok(sensor) => {
                defmt::info!("LSM303AGR initialized successfully.");
                Some(TiltClassifier::new(sensor, state, tilt))
            }
            Err(e) => {
                defmt::error!("Failed to initialize the LSM303AGR: {}", e);
                None
            }
        };

        let serial_resources = cx
            .local
            .serial_resources_mem
            .write(SerialResources::default());
        let (line_writer, mut serial_rx_driver, byte_reader) =
            init_serial(board.UARTE0, Pins::from(board.uart), serial_resources)
                .expect("Could not initialize the serial link");
        serial_rx_driver
            .start()
            .expect("Could not start receiving on the serial link");

        let speaker_pin = board.speaker_pin.into_push_pull_output(Level::Low).degrade();
        let speaker = Speaker::new(board.PWM0, speaker_pin);

        let (event_tx, event_rx) = cx.local.button_channel.split();
        let (outbound_tx, outbound_rx) = cx.local.outbound_channel.split();
        let (inbound_tx, inbound_rx) = cx.local.inbound_channel.split();

        let buttons = ButtonResources::new(
            Gpiote::new(board.GPIOTE),
            board.buttons.button_a,
            board.buttons.button_b,
        );
        let button_driver = ButtonDriver::new(buttons, InputCaptor::new(tilt), event_tx).start();

        classify_tilt::spawn().expect("Failed to spawn the tilt classifier task");
        record::spawn().expect("Failed to spawn the recorder task");
        transmit::spawn().expect("Failed to spawn the sender task");
        receive::spawn().expect("Failed to spawn the receiver task");
        render::spawn().expect("Failed to spawn the renderer task");

        let mut display = Display::new(board.TIMER0, board.display_pins);
        let mut boot_frame = MicrobitFrame::default();
        boot_frame.set(&TextRenderer::new(BOOT_TEXT.as_bytes()));
        display.show_frame(&boot_frame);

        defmt::info!("Ready, press button A to start recording.");

        (
            Shared { display },
            Local {
                button_driver,
                classifier,
                recorder: Recorder::new(state),
                button_events: event_rx,
                outbound_tx,
                outbound_rx,
                transmitter: Transmitter::new(state, line_writer, LedMatrix),
                receiver: Receiver::new(state),
                serial_rx_driver,
                serial_rx: byte_reader,
                inbound_tx,
                inbound_rx,
                renderer: Renderer::new(state, LedMatrix, speaker, MonoDelay),
            },
        )
    }

    // Optional idle, can be removed if not needed.
    #[idle]
    fn idle(_: idle::Context) -> ! {
        defmt::trace!("tiltmorse::idle()");

        #[allow(clippy::empty_loop)]
        loop {}
    }

    #[task(binds = TIMER0, priority = 4, shared = [ display ])]
    fn drive_display_low_level(mut cx: drive_display_low_level::Context) {
        cx.shared.display.lock(|display| {
            display.handle_display_event();
        });
    }

    #[task(priority = 2, shared = [ display ])]
    async fn show_frame(mut cx: show_frame::Context, frame: MicrobitFrame) {
        defmt::trace!("tiltmorse::show_frame()");
        cx.shared.display.lock(|display| display.show_frame(&frame));
    }

    #[task(binds = GPIOTE, priority = 4, local = [ button_driver ])]
    fn handle_gpio_events(cx: handle_gpio_events::Context) {
        defmt::trace!("tiltmorse::handle_gpio_events()");
        match cx.local.button_driver.handle_button_event(Mono::now()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                defmt::warn!("Dropping a button press to allow the recorder to catch up.");
            }
            Err(TrySendError::NoReceiver(_)) => unreachable!(),
        }
    }

    #[task(binds = UARTE0_UART0, priority = 4, local = [ serial_rx_driver ])]
    fn handle_serial_rx(cx: handle_serial_rx::Context) {
        if let Err(e) = cx.local.serial_rx_driver.handle_rx_event() {
            defmt::warn!("Dropping a received byte: {}", e);
        }
    }

    #[task(priority = 3, local = [ classifier ])]
    async fn classify_tilt(cx: classify_tilt::Context) {
        defmt::trace!("tiltmorse::classify_tilt()");
        let Some(classifier) = cx.local.classifier.as_mut() else {
            defmt::error!("No tilt sensor available, tilt stays unknown for good.");
            return;
        };

        loop {
            match classifier.step() {
                Ok(Some(class)) => defmt::trace!("Tilt classified as {}.", class),
                Ok(None) => {}
                Err(e) => defmt::error!("Failed to read the tilt sensor: {}", e),
            }
            Mono::delay(CLASSIFIER_PERIOD).await;
        }
    }

    #[task(priority = 2, local = [ recorder, button_events, outbound_tx ])]
    async fn record(cx: record::Context) {
        defmt::trace!("tiltmorse::record()");
        while let Ok(event) = cx.local.button_events.recv().await {
            match cx.local.recorder.handle(event) {
                RecordOutcome::Started => defmt::info!("Recording started."),
                RecordOutcome::Appended { symbol, started } => {
                    if started {
                        defmt::info!("Recording started.");
                    }
                    defmt::debug!("Appended {:?}.", symbol);
                }
                RecordOutcome::Unclassified => {
                    defmt::debug!("Ignoring symbol press, the tilt is still unknown.");
                }
                RecordOutcome::Full => defmt::debug!("Ignoring press, the message is full."),
                RecordOutcome::NothingToSend => {
                    defmt::debug!("Ignoring finalize press on an empty recording.");
                }
                RecordOutcome::Ignored(state) => {
                    defmt::debug!("Ignoring {} while {}.", event, state);
                }
                RecordOutcome::Finalized(message) => {
                    defmt::info!("Recording finalized, sending {} bytes.", message.len());
                    if cx.local.outbound_tx.send(message).await.is_err() {
                        defmt::error!("Sender task is gone, no more recordings.");
                        return;
                    }
                }
            }
        }
        defmt::error!("Button interrupt is gone, no more recordings.");
    }

    #[task(priority = 1, local = [ transmitter, outbound_rx ])]
    async fn transmit(cx: transmit::Context) {
        defmt::trace!("tiltmorse::transmit()");
        while let Ok(mut message) = cx.local.outbound_rx.recv().await {
            match cx.local.transmitter.transmit(&mut message).await {
                Ok(()) => defmt::info!("Message sent."),
                Err(SendError::Link(e)) => defmt::error!("Failed to send the message: {}", e),
                Err(SendError::UnexpectedState(state)) => {
                    defmt::error!("Dropping a message handed over while {}.", state);
                }
            }
        }
    }

    #[task(priority = 1, local = [ receiver, serial_rx, inbound_tx ])]
    async fn receive(cx: receive::Context) {
        defmt::trace!("tiltmorse::receive()");
        loop {
            match cx.local.receiver.poll(cx.local.serial_rx) {
                ReceiveOutcome::Nothing => {}
                ReceiveOutcome::Stored(byte) => defmt::trace!("Received {=u8:#x}.", byte),
                ReceiveOutcome::Overflow(byte) => {
                    defmt::debug!("Inbound message is full, dropping {=u8:#x}.", byte);
                }
                ReceiveOutcome::Busy(state, _) => {
                    defmt::trace!("Dropping a byte while {}.", state);
                }
                ReceiveOutcome::Completed(message) => {
                    defmt::info!("Received a {} byte message.", message.len());
                    if cx.local.inbound_tx.send(message).await.is_err() {
                        defmt::error!("Renderer task is gone, no more receiving.");
                        return;
                    }
                }
            }
            Mono::delay(RECEIVER_PERIOD).await;
        }
    }

    #[task(priority = 1, local = [ renderer, inbound_rx ])]
    async fn render(cx: render::Context) {
        defmt::trace!("tiltmorse::render()");
        while let Ok(mut message) = cx.local.inbound_rx.recv().await {
            if let Err(e) = cx.local.renderer.render(&mut message).await {
                defmt::error!("Failed to render a message: {}", e);
            }
        }
    }
}
