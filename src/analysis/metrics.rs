// file: src/analysis/metrics.rs
// description: aggregation over metric values tagged at corpus load
// reference: untagged numbers in prose are never re-derived

use crate::models::{MetricUnit, MetricValue};
use crate::store::Corpus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedMetric {
    pub citation: String,
    #[serde(flatten)]
    pub metric: MetricValue,
}

/// Quantifiable impact rollup. Only values tagged during corpus load are
/// eligible, which keeps spurious numbers in free text out of the totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactReport {
    pub total_usd: f64,
    pub usd: Vec<TaggedMetric>,
    pub percent: Vec<TaggedMetric>,
    pub count: Vec<TaggedMetric>,
}

impl ImpactReport {
    pub fn is_empty(&self) -> bool {
        self.usd.is_empty() && self.percent.is_empty() && self.count.is_empty()
    }

    pub fn format(&self) -> String {
        let mut output = format!("Total quantified impact: ${:.0}\n", self.total_usd);

        for metric in self.usd.iter().chain(&self.percent).chain(&self.count) {
            let rendered = match metric.metric.unit {
                MetricUnit::Usd => format!("${:.0}", metric.metric.value),
                MetricUnit::Percent => format!("{}%", metric.metric.value),
                MetricUnit::Count => format!("{:.0}", metric.metric.value),
            };
            output.push_str(&format!(
                "• {}: {} [{}]\n",
                metric.metric.label, rendered, metric.citation
            ));
        }

        output
    }
}

/// Collect every tagged metric in corpus order and sum the USD values.
pub fn aggregate_impact(corpus: &Corpus) -> ImpactReport {
    let mut usd = Vec::new();
    let mut percent = Vec::new();
    let mut count = Vec::new();

    for entry in corpus.iter() {
        for metric in &entry.metrics {
            let tagged = TaggedMetric {
                citation: entry.id.clone(),
                metric: metric.clone(),
            };
            match metric.unit {
                MetricUnit::Usd => usd.push(tagged),
                MetricUnit::Percent => percent.push(tagged),
                MetricUnit::Count => count.push(tagged),
            }
        }
    }

    let total_usd = usd.iter().map(|m| m.metric.value).sum();

    ImpactReport {
        total_usd,
        usd,
        percent,
        count,
    }
}
