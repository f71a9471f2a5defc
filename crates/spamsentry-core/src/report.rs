//! Static performance report shown on the insights page.
//!
//! These numbers are constants describing the demo model. They are not
//! recomputed from the loaded artifacts.

/// Counts from a binary evaluation, spam as the positive class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_ham: u32,
    pub false_spam: u32,
    pub false_ham: u32,
    pub true_spam: u32,
}

impl ConfusionMatrix {
    pub fn total(&self) -> u32 {
        self.true_ham + self.false_spam + self.false_ham + self.true_spam
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_ham + self.true_spam, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_spam, self.true_spam + self.false_spam)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_spam, self.true_spam + self.false_ham)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }

    /// `(label, count)` pairs in display order.
    pub fn cells(&self) -> [(&'static str, u32); 4] {
        [
            ("Ham kept", self.true_ham),
            ("Ham flagged", self.false_spam),
            ("Spam missed", self.false_ham),
            ("Spam caught", self.true_spam),
        ]
    }
}

fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        f64::from(num) / f64::from(den)
    }
}

/// Description of the model behind the demo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelReport {
    pub model_name: &'static str,
    pub confusion: ConfusionMatrix,
}

impl ModelReport {
    /// The hard-coded report bundled with the demo.
    pub const DEMO: ModelReport = ModelReport {
        model_name: "Multinomial Naive Bayes",
        confusion: ConfusionMatrix {
            true_ham: 950,
            false_spam: 15,
            false_ham: 41,
            true_spam: 109,
        },
    };

    /// `(label, score)` pairs in display order, scores in `[0, 1]`.
    pub fn scores(&self) -> [(&'static str, f64); 4] {
        [
            ("Accuracy", self.confusion.accuracy()),
            ("Precision", self.confusion.precision()),
            ("Recall", self.confusion.recall()),
            ("F1", self.confusion.f1()),
        ]
    }

    /// Accuracy rounded to a whole percentage.
    pub fn accuracy_percent(&self) -> u32 {
        (self.confusion.accuracy() * 100.0).round() as u32
    }
}
