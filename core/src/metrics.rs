use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Tellere for datakvalitetsarbeidet i prosessoren.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub laps_processed_total: IntCounter,
    pub hr_readings_decoded_total: IntCounter,
    pub hr_readings_repaired_total: IntCounter,
    pub hr_outliers_suppressed_total: IntCounter,
    pub hr_points_emitted_total: IntCounter,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("training_analytics".into()), None)?;

        let laps_processed_total =
            IntCounter::new("laps_processed_total", "Laps turned into a heart-rate series")?;
        let hr_readings_decoded_total =
            IntCounter::new("hr_readings_decoded_total", "Raw heart-rate tokens decoded")?;
        let hr_readings_repaired_total = IntCounter::new(
            "hr_readings_repaired_total",
            "Missing heart-rate readings filled from the previous value",
        )?;
        let hr_outliers_suppressed_total = IntCounter::new(
            "hr_outliers_suppressed_total",
            "Heart-rate readings replaced because of a jump above the threshold",
        )?;
        let hr_points_emitted_total =
            IntCounter::new("hr_points_emitted_total", "Interpolated 1 Hz points emitted")?;

        registry.register(Box::new(laps_processed_total.clone()))?;
        registry.register(Box::new(hr_readings_decoded_total.clone()))?;
        registry.register(Box::new(hr_readings_repaired_total.clone()))?;
        registry.register(Box::new(hr_outliers_suppressed_total.clone()))?;
        registry.register(Box::new(hr_points_emitted_total.clone()))?;

        Ok(Self {
            registry,
            laps_processed_total,
            hr_readings_decoded_total,
            hr_readings_repaired_total,
            hr_outliers_suppressed_total,
            hr_points_emitted_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Prometheus tekstformat.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&self.registry.gather(), &mut buf) {
            log::warn!("kunne ikke enkode metrics: {e}");
            return String::new();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

static GLOBAL: Lazy<Metrics> =
    Lazy::new(|| Metrics::new().expect("static metric definitions are valid"));

/// Prosess-global registry (brukes av Python-bindingene, som ikke eier noen).
pub fn global() -> &'static Metrics {
    &GLOBAL
}
