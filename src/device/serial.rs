//! Both halves of the serial link on UARTE0.
//!
//! Reception is interrupt driven. Every ENDRX moves the received byte into a
//! queue and re-arms the one byte transfer right away, the receiver task
//! drains the queue at its own pace.

use crate::util::{nb_async, nb_poll};
use core::fmt::Write;
use heapless::spsc::{Consumer, Producer, Queue};
use microbit::hal::{
    prelude::{_embedded_hal_serial_Read, _embedded_hal_serial_Write},
    uarte::{Baudrate, Error as UarteError, Instance, Parity, Pins, Uarte, UarteRx, UarteTx},
};
use tiltmorse_engine::ports::SerialTx;

const TX_BUFFER_SIZE: usize = 255;

/// Slots of the receive queue, one of them always stays empty.
pub const RX_QUEUE_CAPACITY: usize = 256;

/// Receiving end of the queue filled by [`RxDriver`].
pub type ByteReader = Consumer<'static, u8, RX_QUEUE_CAPACITY>;

/// DMA buffers of the UARTE and the receive queue, they have to live in RAM
/// for good.
pub struct Resources {
    peripheral_tx_buf: [u8; TX_BUFFER_SIZE],
    peripheral_rx_buf: [u8; 1],
    rx_queue: Queue<u8, RX_QUEUE_CAPACITY>,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            peripheral_tx_buf: [0; TX_BUFFER_SIZE],
            peripheral_rx_buf: [0; 1],
            rx_queue: Queue::new(),
        }
    }
}

#[derive(Debug, defmt::Format)]
pub enum LinkError {
    FormatError,
    UarteError(#[defmt(Debug2Format)] UarteError),
}

#[derive(Debug, defmt::Format)]
pub enum RxError {
    /// The receiver task fell behind and the queue is full.
    Overrun(u8),
    UarteError(#[defmt(Debug2Format)] UarteError),
}

/// Splits the UARTE running at 115200 baud, 8N1.
///
/// Reception only starts once [`RxDriver::start`] got called.
pub fn init<T>(
    uarte: T,
    pins: Pins,
    res: &'static mut Resources,
) -> Result<(LineWriter<T>, RxDriver<T>, ByteReader), UarteError>
where
    T: Instance,
{
    uarte.intenset.write(|w| w.endrx().set_bit());
    let uarte = Uarte::<T>::new(uarte, pins, Parity::EXCLUDED, Baudrate::BAUD115200);

    let Resources {
        peripheral_tx_buf,
        peripheral_rx_buf,
        rx_queue,
    } = res;
    let (tx, rx) = uarte.split(peripheral_tx_buf, peripheral_rx_buf)?;
    let (producer, consumer) = rx_queue.split();

    Ok((
        LineWriter { tx },
        RxDriver {
            rx,
            queue: producer,
        },
        consumer,
    ))
}

pub struct LineWriter<T>
where
    T: Instance,
{
    tx: UarteTx<T>,
}

impl<T> SerialTx for LineWriter<T>
where
    T: Instance,
{
    type Error = LinkError;

    async fn write_line(&mut self, line: &str) -> Result<(), LinkError> {
        self.tx
            .write_str(line)
            .map_err(|_| LinkError::FormatError)?;
        nb_async(|| self.tx.flush())
            .await
            .map_err(LinkError::UarteError)
    }
}

/// Interrupt side of the receiving half.
pub struct RxDriver<T>
where
    T: Instance,
{
    rx: UarteRx<T>,
    queue: Producer<'static, u8, RX_QUEUE_CAPACITY>,
}

impl<T> RxDriver<T>
where
    T: Instance,
{
    /// Arms the first transfer.
    pub fn start(&mut self) -> Result<(), UarteError> {
        self.arm()
    }

    /// Handles a pending ENDRX interrupt.
    ///
    /// The next transfer is armed before the byte is queued. A byte that finds
    /// the queue full is lost.
    pub fn handle_rx_event(&mut self) -> Result<(), RxError> {
        let received = nb_poll(self.rx.read());
        self.arm().map_err(RxError::UarteError)?;

        match received {
            Ok(Some(byte)) => self.queue.enqueue(byte).map_err(RxError::Overrun),
            Ok(None) => Ok(()),
            Err(e) => Err(RxError::UarteError(e)),
        }
    }

    fn arm(&mut self) -> Result<(), UarteError> {
        // with no transfer in flight, reading starts one and reports `WouldBlock`
        nb_poll(self.rx.read()).map(|_| ())
    }
}
