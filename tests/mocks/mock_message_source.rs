use contact_manager::server::MessageSource;
use std::sync::{Arc, Mutex};

/// Message source that echoes the code and arguments and records lookups.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingMessageSource {
    lookups: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

#[allow(dead_code)]
impl RecordingMessageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(code, args)` of every lookup, in call order.
    pub fn lookups(&self) -> Vec<(String, Vec<String>)> {
        self.lookups.lock().unwrap().clone()
    }
}

impl MessageSource for RecordingMessageSource {
    fn message(&self, code: &str, args: &[&str]) -> String {
        self.lookups.lock().unwrap().push((
            code.to_string(),
            args.iter().map(|arg| arg.to_string()).collect(),
        ));
        format!("{}:{}", code, args.join(","))
    }
}
