use crate::frame::Frame;

/// Commands recorded between MULTI and EXEC.
///
/// Each command is kept as the frame it arrived as and is only parsed when EXEC replays it, so
/// argument errors surface as that command's reply inside the EXEC result. Existence and arity
/// are checked at queue time; a failure there latches the whole transaction as failed.
#[derive(Debug, Default, PartialEq)]
pub struct Transaction {
    queue: Vec<Frame>,
    failed: bool,
}

impl Transaction {
    pub fn push(&mut self, frame: Frame) {
        self.queue.push(frame);
    }

    pub fn fail(&mut self) {
        self.failed = true;
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn into_queue(self) -> Vec<Frame> {
        self.queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_is_latched() {
        let mut tx = Transaction::default();
        tx.push(Frame::Simple("PING".to_string()));
        assert!(!tx.is_failed());

        tx.fail();
        tx.push(Frame::Simple("PING".to_string()));
        assert!(tx.is_failed());
        assert_eq!(tx.len(), 2);
        assert_eq!(tx.into_queue().len(), 2);
    }
}
