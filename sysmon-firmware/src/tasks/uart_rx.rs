//! Host UART receive task
//!
//! Moves bytes from the UART into the receive queue. Framing happens in
//! the control task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::with_rx_queue;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// UART RX task - enqueues everything the host sends
#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: BufferedUartRx) {
    info!("UART RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                let accepted = with_rx_queue(|queue| queue.extend(&buf[..n]));
                trace!("RX: {} bytes, {} queued", n, accepted);
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
