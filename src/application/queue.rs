use crate::application::SessionCommand;
use std::collections::VecDeque;

/// Bounded synchronous command queue (no async, works in any runtime)
#[derive(Debug)]
pub struct CommandQueue {
    queue: VecDeque<SessionCommand>,
    max_size: usize,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QueueError {
    #[error("Queue is full (max size: {max})")]
    Full { max: usize },
}

impl CommandQueue {
    pub fn new(max_size: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Push a command (returns error if full)
    pub fn push(&mut self, cmd: SessionCommand) -> Result<(), QueueError> {
        if self.queue.len() >= self.max_size {
            return Err(QueueError::Full { max: self.max_size });
        }
        self.queue.push_back(cmd);
        Ok(())
    }

    /// Pop the next command (FIFO)
    pub fn pop(&mut self) -> Option<SessionCommand> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_push_pop() {
        let mut queue = CommandQueue::new(10);

        let cmd = SessionCommand::End {
            activity: Uuid::new_v4(),
        };

        queue.push(cmd.clone()).unwrap();
        assert_eq!(queue.len(), 1);

        let popped = queue.pop().unwrap();
        assert_eq!(popped, cmd);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_full() {
        let mut queue = CommandQueue::new(2);
        let activity = Uuid::new_v4();

        queue.push(SessionCommand::Begin { activity }).unwrap();
        queue.push(SessionCommand::End { activity }).unwrap();

        let result = queue.push(SessionCommand::FinishTransitionOut { activity });

        assert_eq!(result, Err(QueueError::Full { max: 2 }));
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = CommandQueue::new(10);

        let players: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let activity = Uuid::new_v4();

        for player_id in &players {
            queue
                .push(SessionCommand::InputFired {
                    activity,
                    player_id: *player_id,
                })
                .unwrap();
        }

        for player_id in &players {
            match queue.pop().unwrap() {
                SessionCommand::InputFired { player_id: got, .. } => {
                    assert_eq!(got, *player_id);
                }
                other => panic!("Expected InputFired, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_default_capacity() {
        let queue = CommandQueue::default();
        assert_eq!(queue.capacity(), 256);
        assert!(queue.is_empty());
    }
}
