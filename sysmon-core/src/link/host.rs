//! Host link session
//!
//! Owns the frame reader, the dispatcher and the page the user last
//! selected. All side effects go through the display, queue and
//! transmitter passed into each call.

use sysmon_hal::UartTx;
use sysmon_protocol::{Button, ByteSource, DeviceMessage, FrameReader, ProtocolError};

use crate::config::PanelConfig;
use crate::dispatch::{CommandDispatcher, Dispatch};
use crate::traits::CharacterDisplay;

/// Failure of one of the link's collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<D, T> {
    /// The display rejected a write
    Display(D),
    /// A report could not be sent to the host
    Transport(T),
}

/// State of the conversation with the host
#[derive(Debug, Clone)]
pub struct HostLink {
    dispatcher: CommandDispatcher,
    reader: FrameReader,
    page: Button,
}

impl HostLink {
    pub const fn new(panel: PanelConfig) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(panel),
            reader: FrameReader::new(),
            page: Button::None,
        }
    }

    /// Button whose page the host was last asked for
    pub fn page(&self) -> Button {
        self.page
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Frames dropped since the last call
    pub fn take_dropped(&mut self) -> u32 {
        self.dispatcher.take_dropped()
    }

    /// React to a change of the stable button
    ///
    /// A press selects a new page: queued bytes and any partial frame are
    /// discarded, the display is cleared and the host gets a button
    /// report. A release does nothing. Returns true if the page changed.
    pub fn button_changed<D, Q, T>(
        &mut self,
        button: Button,
        display: &mut D,
        queue: &mut Q,
        tx: &mut T,
    ) -> Result<bool, LinkError<D::Error, T::Error>>
    where
        D: CharacterDisplay + ?Sized,
        Q: ByteSource + ?Sized,
        T: UartTx + ?Sized,
    {
        if !button.is_pressed() {
            return Ok(false);
        }

        self.page = button;
        queue.discard_all();
        self.reader.reset();

        display.clear().map_err(LinkError::Display)?;
        send(tx, DeviceMessage::Button(button)).map_err(LinkError::Transport)?;
        Ok(true)
    }

    /// Take at most one frame from `queue` and act on it
    ///
    /// `Ok(None)` means no complete frame is queued yet. A handshake is
    /// answered with a ready report and, once a page is selected, the
    /// button report for that page.
    pub fn poll<D, Q, T>(
        &mut self,
        display: &mut D,
        queue: &mut Q,
        tx: &mut T,
    ) -> Result<Option<Dispatch>, LinkError<D::Error, T::Error>>
    where
        D: CharacterDisplay + ?Sized,
        Q: ByteSource + ?Sized,
        T: UartTx + ?Sized,
    {
        let frame = match self.reader.poll(queue) {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(None),
            // Oversized length; its header is already gone
            Err(_) => {
                return Ok(Some(
                    self.dispatcher.drop_frame(ProtocolError::MalformedFrame),
                ))
            }
        };

        let outcome = self
            .dispatcher
            .dispatch(display, &frame)
            .map_err(LinkError::Display)?;

        if outcome == Dispatch::Ready {
            send(tx, DeviceMessage::Ready).map_err(LinkError::Transport)?;
            if self.page.is_pressed() {
                send(tx, DeviceMessage::Button(self.page)).map_err(LinkError::Transport)?;
            }
        }

        Ok(Some(outcome))
    }
}

fn send<T: UartTx + ?Sized>(tx: &mut T, message: DeviceMessage) -> Result<(), T::Error> {
    let Some(frame) = message.to_frame() else {
        return Ok(());
    };
    // Reports carry at most one payload byte, so encoding cannot overflow
    if let Ok(bytes) = frame.encode_to_vec() {
        tx.write_blocking(&bytes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    use sysmon_protocol::messages::{CMD_BUTTON, CMD_READY};
    use sysmon_protocol::{CommandKind, HostCommand, RxQueue};

    use crate::dispatch::testing::GridDisplay;

    /// Transmitter that keeps everything written to it
    #[derive(Default)]
    struct Wire {
        sent: Vec<u8>,
    }

    impl UartTx for Wire {
        type Error = Infallible;

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.sent.extend_from_slice(data);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct Rig {
        link: HostLink,
        display: GridDisplay,
        queue: RxQueue,
        wire: Wire,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                link: HostLink::new(PanelConfig::default()),
                display: GridDisplay::new(16, 2),
                queue: RxQueue::new(),
                wire: Wire::default(),
            }
        }

        fn press(&mut self, button: Button) -> bool {
            self.link
                .button_changed(button, &mut self.display, &mut self.queue, &mut self.wire)
                .unwrap()
        }

        fn poll(&mut self) -> Option<Dispatch> {
            self.link
                .poll(&mut self.display, &mut self.queue, &mut self.wire)
                .unwrap()
        }

        fn receive(&mut self, command: HostCommand) {
            let bytes = command.to_frame().unwrap().encode_to_vec().unwrap();
            self.queue.extend(&bytes);
        }
    }

    const READY_REPORT: [u8; 3] = [CMD_READY, 0x00, 0x00];

    fn button_report(index: u8) -> [u8; 4] {
        [CMD_BUTTON, 0x01, index, CMD_BUTTON ^ 0x01 ^ index]
    }

    #[test]
    fn test_press_sends_report_and_clears() {
        let mut rig = Rig::new();
        rig.receive(HostCommand::CpuTemp(45));
        rig.poll();

        assert!(rig.press(Button::Up));

        assert_eq!(rig.link.page(), Button::Up);
        assert_eq!(rig.display.clears, 1);
        assert_eq!(rig.display.row(0), b"                ");
        assert_eq!(rig.wire.sent, button_report(1));
    }

    #[test]
    fn test_press_discards_partial_frame() {
        let mut rig = Rig::new();
        // CPU temp header with its payload and checksum still in flight
        rig.queue.extend(&[0x04, 0x01]);
        assert_eq!(rig.poll(), None);

        rig.press(Button::Right);
        assert!(rig.queue.is_empty());

        rig.receive(HostCommand::GpuTemp(61));
        assert_eq!(rig.poll(), Some(Dispatch::Rendered(CommandKind::GpuTemp)));
        assert_eq!(rig.display.cells_at(1, 1, 4), b"61C ");
        assert_eq!(rig.link.dispatcher().dropped(), 0);
    }

    #[test]
    fn test_release_leaves_display_alone() {
        let mut rig = Rig::new();
        rig.receive(HostCommand::CpuUsage(12));
        rig.poll();
        let operations = rig.display.operations;

        assert!(!rig.press(Button::None));

        assert_eq!(rig.display.clears, 0);
        assert_eq!(rig.display.operations, operations);
        assert!(rig.wire.sent.is_empty());
        assert_eq!(rig.link.page(), Button::None);
    }

    #[test]
    fn test_ready_before_any_press() {
        let mut rig = Rig::new();
        rig.receive(HostCommand::Ready);

        assert_eq!(rig.poll(), Some(Dispatch::Ready));
        assert_eq!(rig.wire.sent, READY_REPORT);
    }

    #[test]
    fn test_ready_repeats_current_page() {
        let mut rig = Rig::new();
        rig.press(Button::Select);
        rig.wire.sent.clear();

        rig.receive(HostCommand::Ready);
        rig.poll();

        let mut expected = READY_REPORT.to_vec();
        expected.extend_from_slice(&button_report(4));
        assert_eq!(rig.wire.sent, expected);
    }

    #[test]
    fn test_oversized_frame_is_dropped() {
        let mut rig = Rig::new();
        rig.queue.extend(&[0x0B, 0xFF]);

        assert_eq!(
            rig.poll(),
            Some(Dispatch::Dropped(ProtocolError::MalformedFrame))
        );
        assert_eq!(rig.link.take_dropped(), 1);
        assert_eq!(rig.display.operations, 0);
    }

    #[test]
    fn test_frames_are_taken_one_at_a_time() {
        let mut rig = Rig::new();
        rig.receive(HostCommand::CpuTemp(40));
        rig.receive(HostCommand::GpuTemp(50));

        assert_eq!(rig.poll(), Some(Dispatch::Rendered(CommandKind::CpuTemp)));
        assert_eq!(rig.poll(), Some(Dispatch::Rendered(CommandKind::GpuTemp)));
        assert_eq!(rig.poll(), None);
    }
}
