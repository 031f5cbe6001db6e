//! Embassy async tasks
//!
//! The receive task feeds bytes into the shared queue; the control task
//! owns the display and keypad and does everything else.

pub mod control;
pub mod uart_rx;

pub use control::{control_task, Keypad, Lcd};
pub use uart_rx::uart_rx_task;
