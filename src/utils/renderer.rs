use burn::train::renderer::{MetricState, MetricsRenderer, TrainingProgress};
use derive_new::new;
use log::{debug, info};

/// A Simple renderer for TUI-disabled modes, reporting progress through the logger
#[derive(new)]
pub struct Simple {}

impl Simple {
    fn render(&self, phase: &str, item: &TrainingProgress) {
        let done = item.progress.items_processed >= item.progress.items_total;

        if done {
            info!(
                "[{phase}] epoch {}/{} complete ({} items)",
                item.epoch, item.epoch_total, item.progress.items_total
            );
        } else {
            debug!(
                "[{phase}] epoch {}/{} iteration {} ({}/{} items)",
                item.epoch,
                item.epoch_total,
                item.iteration,
                item.progress.items_processed,
                item.progress.items_total
            );
        }
    }
}

impl MetricsRenderer for Simple {
    fn update_train(&mut self, _state: MetricState) {}

    fn update_valid(&mut self, _state: MetricState) {}

    fn render_train(&mut self, item: TrainingProgress) {
        self.render("train", &item);
    }

    fn render_valid(&mut self, item: TrainingProgress) {
        self.render("valid", &item);
    }
}
