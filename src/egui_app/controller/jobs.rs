//! Background job plumbing for prediction requests.
//!
//! One mpsc channel carries worker results back to the UI thread; a
//! monotonically increasing request sequence identifies the active submission
//! so late results from superseded requests can be discarded.

use std::collections::BTreeMap;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::estimator::api::{self, PredictError, PredictionResponse};
use crate::estimator::inputs::InputMap;

pub(crate) enum JobMessage {
    PredictionFinished(PredictionJobResult),
}

/// Everything a worker needs, captured at submit time.
pub(crate) struct PredictionJob {
    pub(crate) request_id: u64,
    pub(crate) endpoint: String,
    pub(crate) inputs: BTreeMap<String, String>,
    pub(crate) snapshot: InputMap,
}

pub(crate) struct PredictionJobResult {
    pub(crate) request_id: u64,
    pub(crate) snapshot: InputMap,
    pub(crate) result: Result<PredictionResponse, PredictError>,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    next_request_id: u64,
    active_request: Option<u64>,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel();
        Self {
            message_tx,
            message_rx,
            next_request_id: 1,
            active_request: None,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    #[cfg(test)]
    pub(super) fn message_sender(&self) -> Sender<JobMessage> {
        self.message_tx.clone()
    }

    pub(super) fn next_request_id(&mut self) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1).max(1);
        request_id
    }

    pub(super) fn active_request(&self) -> Option<u64> {
        self.active_request
    }

    pub(super) fn set_active_request(&mut self, request_id: u64) {
        self.active_request = Some(request_id);
    }

    pub(super) fn clear_active_request(&mut self) {
        self.active_request = None;
    }

    /// Spawn a worker for one blocking prediction call.
    ///
    /// The worker owns its snapshot; the result travels back over the message
    /// channel tagged with the request sequence.
    pub(super) fn begin_prediction(&self, job: PredictionJob) {
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api::request_predictions(&job.endpoint, &job.inputs);
            let _ = tx.send(JobMessage::PredictionFinished(PredictionJobResult {
                request_id: job.request_id,
                snapshot: job.snapshot,
                result,
            }));
        });
    }
}
