use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::labels::Label;

/// Precision, recall and F1 for one class (or an average over classes)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Fraction of predictions of this class that were correct
    pub precision: f64,

    /// Fraction of examples of this class that were found
    pub recall: f64,

    /// Harmonic mean of precision and recall
    pub f1: f64,

    /// Number of examples of this class
    pub support: usize,
}

/// Held-out evaluation results
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Per-class metrics, ordered by class id
    pub classes: Vec<(Label, ClassMetrics)>,

    /// Fraction of correct predictions
    pub accuracy: f64,

    /// Unweighted mean over classes
    pub macro_avg: ClassMetrics,

    /// Support-weighted mean over classes
    pub weighted_avg: ClassMetrics,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl ClassificationReport {
    /// Compare predicted labels against the true labels, position by position
    pub fn new(actual: &[Label], predicted: &[Label]) -> Self {
        let pairs = actual.iter().zip(predicted.iter());
        let total = actual.len().min(predicted.len());

        let correct = pairs.clone().filter(|(a, p)| a == p).count();

        let classes = Label::ALL
            .iter()
            .map(|class| {
                let true_positive = pairs.clone().filter(|(a, p)| *a == class && *p == class).count();
                let predicted_count = pairs.clone().filter(|(_, p)| *p == class).count();
                let support = pairs.clone().filter(|(a, _)| *a == class).count();

                let precision = ratio(true_positive, predicted_count);
                let recall = ratio(true_positive, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                (
                    *class,
                    ClassMetrics {
                        precision,
                        recall,
                        f1,
                        support,
                    },
                )
            })
            .collect::<Vec<_>>();

        let n_classes = classes.len() as f64;
        let average = |weight: &dyn Fn(&ClassMetrics) -> f64, norm: f64| ClassMetrics {
            precision: classes.iter().map(|(_, m)| weight(m) * m.precision).sum::<f64>() / norm,
            recall: classes.iter().map(|(_, m)| weight(m) * m.recall).sum::<f64>() / norm,
            f1: classes.iter().map(|(_, m)| weight(m) * m.f1).sum::<f64>() / norm,
            support: total,
        };

        let macro_avg = average(&|_| 1.0, n_classes);
        let weighted_avg = if total > 0 {
            average(&|m| m.support as f64, total as f64)
        } else {
            average(&|_| 0.0, 1.0)
        };

        Self {
            classes,
            accuracy: ratio(correct, total),
            macro_avg,
            weighted_avg,
        }
    }

    /// Total number of evaluated examples
    pub fn support(&self) -> usize {
        self.macro_avg.support
    }
}

impl Display for ClassificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row = |f: &mut std::fmt::Formatter<'_>, name: &str, m: &ClassMetrics| {
            writeln!(
                f,
                "{name:>12} {:>9.4} {:>9.4} {:>9.4} {:>9}",
                m.precision, m.recall, m.f1, m.support
            )
        };

        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (label, metrics) in &self.classes {
            row(f, label.as_str(), metrics)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9.4} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        row(f, "macro avg", &self.macro_avg)?;
        row(f, "weighted avg", &self.weighted_avg)
    }
}
