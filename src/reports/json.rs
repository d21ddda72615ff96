//! JSON reporter.

use super::{RatingSection, ReportError, ReportFormat, ReportGenerator};
use crate::model::Product;
use crate::score::{classify, ScoreClass};
use crate::workflow::ScanReport;
use serde::Serialize;

/// Product plus its computed classification.
#[derive(Serialize)]
struct ClassifiedProduct<'a> {
    #[serde(flatten)]
    product: &'a Product,
    classification: ScoreClass,
    verdict: &'static str,
}

impl<'a> ClassifiedProduct<'a> {
    fn new(product: &'a Product) -> Self {
        let classification = classify(product.score);
        Self {
            product,
            classification,
            verdict: classification.tier.verdict(),
        }
    }
}

/// JSON reporter
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Emit single-line JSON.
    #[must_use]
    pub const fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ReportError> {
        let mut out = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        out.push('\n');
        Ok(out)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn scan_report(&self, report: &ScanReport) -> Result<String, ReportError> {
        #[derive(Serialize)]
        struct ScanJson<'a> {
            #[serde(flatten)]
            report: &'a ScanReport,
            #[serde(skip_serializing_if = "Option::is_none")]
            classification: Option<ScoreClass>,
        }
        self.render(&ScanJson {
            report,
            classification: report.product.as_ref().map(|p| classify(p.score)),
        })
    }

    fn product_report(&self, product: &Product) -> Result<String, ReportError> {
        self.render(&ClassifiedProduct::new(product))
    }

    fn history_report(&self, products: &[&Product]) -> Result<String, ReportError> {
        let items: Vec<_> = products.iter().map(|p| ClassifiedProduct::new(p)).collect();
        self.render(&items)
    }

    fn rating_report(&self, sections: &[RatingSection<'_>]) -> Result<String, ReportError> {
        self.render(sections)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
