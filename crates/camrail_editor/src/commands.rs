// SPDX-License-Identifier: MIT OR Apache-2.0
//! Commands sent to the viewport from outside it.
//!
//! A point list panel does not own the rail; it holds a [`CommandSender`]
//! and asks the viewport to delete, select or reorder points. The viewport
//! drains the queue on the event loop before it handles pointer input.

use crate::state::EditorMode;
use camrail_rail::PointId;
use tokio::sync::mpsc;

/// Requests the viewport applies on its next turn
#[derive(Debug, Clone, PartialEq)]
pub enum RailCommand {
    /// Delete a point
    DeletePoint(PointId),
    /// Select a point
    SelectPoint(PointId),
    /// Clear the selection
    ClearSelection,
    /// Move a point to another index in rail order
    ReorderPoint {
        /// Point to move
        id: PointId,
        /// Target index (clamped)
        index: usize,
    },
    /// Switch editor mode
    SetMode(EditorMode),
}

/// Cloneable handle for issuing [`RailCommand`]s
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<RailCommand>,
}

impl CommandSender {
    /// Queue a command. Returns `false` once the viewport is gone.
    pub fn send(&self, command: RailCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    /// Request deletion of a point
    pub fn delete_point(&self, id: PointId) -> bool {
        self.send(RailCommand::DeletePoint(id))
    }

    /// Request selection of a point
    pub fn select_point(&self, id: PointId) -> bool {
        self.send(RailCommand::SelectPoint(id))
    }
}

/// Receiving end owned by the viewport
#[derive(Debug)]
pub struct CommandQueue {
    tx: mpsc::UnboundedSender<RailCommand>,
    rx: mpsc::UnboundedReceiver<RailCommand>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// New sender for this queue
    pub fn sender(&self) -> CommandSender {
        CommandSender { tx: self.tx.clone() }
    }

    /// Take every queued command, in send order
    pub fn drain(&mut self) -> Vec<RailCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.rx.try_recv() {
            commands.push(command);
        }
        commands
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = CommandQueue::new();
        let sender = queue.sender();
        let other = sender.clone();

        assert!(sender.delete_point(PointId::from("a")));
        assert!(other.select_point(PointId::from("b")));
        assert!(sender.send(RailCommand::ClearSelection));

        assert_eq!(
            queue.drain(),
            vec![
                RailCommand::DeletePoint(PointId::from("a")),
                RailCommand::SelectPoint(PointId::from("b")),
                RailCommand::ClearSelection,
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_send_after_queue_dropped() {
        let queue = CommandQueue::new();
        let sender = queue.sender();
        drop(queue);
        assert!(!sender.delete_point(PointId::from("a")));
    }
}
