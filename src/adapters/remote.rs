//! IR remote adapter — implements [`RemotePort`] over the NEC receiver.

use crate::app::ports::RemotePort;
use crate::drivers::ir_receiver::IrReceiver;

/// Adapter that surfaces decoded IR frames to the poll loop.
pub struct IrRemoteAdapter {
    receiver: IrReceiver,
}

impl IrRemoteAdapter {
    pub fn new(receiver: IrReceiver) -> Self {
        Self { receiver }
    }
}

impl RemotePort for IrRemoteAdapter {
    fn has_pending_command(&mut self) -> bool {
        self.receiver.poll();
        self.receiver.pending().is_some()
    }

    fn is_repeat(&self) -> bool {
        self.receiver.pending().is_some_and(|frame| frame.repeat)
    }

    fn read_command(&mut self) -> (u16, u16) {
        self.receiver
            .take()
            .map_or((0, 0), |frame| (frame.address, frame.command))
    }
}
