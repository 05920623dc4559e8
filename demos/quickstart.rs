//! Quickstart example demonstrating basic usage of precip-forecast.
//!
//! Run with: cargo run --example quickstart

use precip_forecast::core::{MonthName, Observation, ObservationStore, PredictionResponse};
use precip_forecast::ingest::parse_csv;
use precip_forecast::models::{contrast, Predictor};
use precip_forecast::series::recent_history;

fn main() {
    println!("=== precip-forecast Quickstart ===\n");

    // 1. Load a small export (semicolon separated, decimal commas)
    let mut csv = String::from("Mes;Anho;Precipitacion;Ubicacion;Departamento\n");
    for year in 2012..2021 {
        for month in MonthName::ALL {
            let base = 100.0 + 70.0 * (2.0 * std::f64::consts::PI * month.index() as f64 / 12.0).cos();
            let value = base + ((year * 31 + month.number() as i32 * 7) % 23) as f64;
            csv.push_str(&format!(
                "{};{};{};Pilar;Ñeembucú\n",
                month.name(),
                year,
                format!("{:.1}", value).replace('.', ",")
            ));
        }
    }
    let batch = parse_csv(&csv);

    let mut store = ObservationStore::new();
    let summary = store.import(&batch);
    println!(
        "Imported {} records ({} updated, {} skipped)",
        summary.inserted, summary.updated, summary.skipped
    );

    // 2. Predict January 2020 and contrast against the record
    println!("\n--- Prediction ---");
    let observations = store.observations_for("Pilar");
    let predictor = Predictor::default();
    let forecast = predictor.predict(&observations, "Enero", 2020, "Pilar");
    let result = contrast(&observations, "Enero", 2020, "Pilar", forecast.estimate);

    let response = PredictionResponse::new(&forecast, &result);
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("serialization failed: {}", e),
    }

    // 3. Inspect how the estimate was reached
    if let Some(diagnostics) = &forecast.diagnostics {
        println!("\n--- Diagnostics ---");
        println!("Window: {:?} ({} readings)", diagnostics.window, diagnostics.observations);
        println!("Historical estimate: {:.2} mm", diagnostics.historical_estimate);
        if let Some(seasonal) = &diagnostics.seasonal {
            println!(
                "Seasonal estimate: {:.2} mm (weight {:.2}, {} components)",
                seasonal.estimate, seasonal.weight, seasonal.components
            );
        }
    }

    // 4. Predict every month of the following year
    println!("\n--- Whole year 2021 ---");
    for month in MonthName::ALL {
        let forecast = predictor.predict(store.observations(), month, 2021, "Pilar");
        println!(
            "  {:<10} {:>8} mm  {:>6.2}%  {}",
            month.name(),
            forecast
                .estimate
                .map(|e| format!("{:.1}", e))
                .unwrap_or_else(|| "N/A".to_string()),
            forecast.probability,
            forecast.emoji()
        );
    }

    // 5. Recent history for charting
    println!("\n--- Last two years ---");
    for point in recent_history(store.observations(), "Pilar", 2) {
        println!("  {}: {:?}", point.label, point.value);
    }

    // Raw observations can be used without a store as well
    let ad_hoc = vec![Observation::new("Marzo", 2019, Some(80.0), "Villarrica")];
    let forecast = predictor.predict(&ad_hoc, 3, 2020, "Villarrica");
    println!("\nVillarrica, Marzo 2020: {}", forecast.intensity_label());
}
