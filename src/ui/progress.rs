use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct ProgressManager {
    mp: MultiProgress,
    bars: Arc<Mutex<HashMap<String, ProgressBar>>>,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            mp: MultiProgress::new(),
            bars: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a bar and return a handle to it
    /// - `id`: unique key
    /// - `total`: length of the bar
    /// - `template`: one of [`templates`]
    pub fn create_bar(
        &self,
        id: &str,
        total: u64,
        template: &str,
        message: &str,
    ) -> Result<ProgressBar, String> {
        let mut bars = self
            .bars
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;

        if bars.contains_key(id) {
            return Err(format!("Progress bar '{}' already exists", id));
        }

        let style = ProgressStyle::default_bar()
            .template(template)
            .map_err(|e| format!("Bad template: {}", e))?
            .progress_chars("█▉▊▋▌▍▎▏ ");
        let pb = self
            .mp
            .add(ProgressBar::new(total));
        pb.set_style(style);
        pb.set_message(message.to_string());

        bars.insert(id.to_string(), pb.clone());
        Ok(pb)
    }

    pub fn finish(&self, id: &str, message: &str) -> Result<(), String> {
        let bars = self
            .bars
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;
        match bars.get(id) {
            Some(pb) => {
                pb.finish_with_message(message.to_string());
                Ok(())
            }
            None => Err(format!("Progress bar '{}' not found", id)),
        }
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

pub mod templates {
    pub const SWEEP: &str =
        "SWEEP [{bar:30.cyan}] {percent}% ({pos}/{len} noise levels) {msg}";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ids_rejected() {
        let manager = ProgressManager::new();
        let pb = manager
            .create_bar("sweep", 3, templates::SWEEP, "")
            .unwrap();
        pb.inc(1);
        assert_eq!(pb.position(), 1);
        assert!(manager.create_bar("sweep", 3, templates::SWEEP, "").is_err());
        assert!(manager.finish("sweep", "done").is_ok());
        assert!(pb.is_finished());
        assert!(manager.finish("missing", "done").is_err());
    }
}
