//! Mock actions for testing.

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

use crate::actions::Action;
use crate::core::{Config, Dataset, Describe, IssueKind};

/// An action that records every value it is run on and changes nothing.
///
/// Clones share the record, so a clone can be handed to a pipe and the
/// original inspected afterwards.
#[derive(Debug, Clone)]
pub struct RecordingAction {
    kind: IssueKind,
    seen: Arc<Mutex<Vec<Option<Value>>>>,
}

impl RecordingAction {
    /// Creates a recording validation.
    #[must_use]
    pub fn validation() -> Self {
        Self::with_kind(IssueKind::Validation)
    }

    /// Creates a recording transformation.
    #[must_use]
    pub fn transformation() -> Self {
        Self::with_kind(IssueKind::Transformation)
    }

    fn with_kind(kind: IssueKind) -> Self {
        Self {
            kind,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the number of runs.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.seen.lock().len()
    }

    /// Returns the values seen, in run order.
    #[must_use]
    pub fn seen(&self) -> Vec<Option<Value>> {
        self.seen.lock().clone()
    }
}

impl Describe for RecordingAction {
    fn kind(&self) -> IssueKind {
        self.kind
    }

    fn type_name(&self) -> &'static str {
        "recording"
    }
}

impl Action for RecordingAction {
    fn run(&self, dataset: &mut Dataset, _config: &Config) {
        self.seen.lock().push(dataset.value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::min_length;
    use crate::pipe::pipe;
    use crate::schemas::{string, Schema};
    use serde_json::json;

    #[test]
    fn test_recording_sees_each_run() {
        let recorder = RecordingAction::validation();
        let schema = pipe(string()).action(recorder.clone());

        for input in [json!("a"), json!("b")] {
            let mut dataset = Dataset::from_value(input);
            schema.run(&mut dataset, &Config::new());
        }
        assert_eq!(recorder.seen(), vec![Some(json!("a")), Some(json!("b"))]);
    }

    #[test]
    fn test_pipe_gates_recorded_actions() {
        let validation = RecordingAction::validation();
        let transformation = RecordingAction::transformation();
        let schema = pipe(string())
            .action(min_length(3))
            .action(validation.clone())
            .action(transformation.clone());

        let mut dataset = Dataset::from_value(json!("ab"));
        schema.run(&mut dataset, &Config::new().with_abort_pipe_early(true));
        assert_eq!(validation.call_count(), 0);
        assert_eq!(transformation.call_count(), 0);

        let mut dataset = Dataset::from_value(json!("ab"));
        schema.run(&mut dataset, &Config::new());
        assert_eq!(validation.call_count(), 1);
        assert_eq!(transformation.call_count(), 0);
        assert!(!dataset.typed);
    }
}
