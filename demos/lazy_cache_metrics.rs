use lazycache::builder::LazyCacheBuilder;
use lazycache::metrics::exporter::PrometheusTextExporter;
use lazycache::metrics::traits::MetricsExporter;

fn main() {
    let mut cache = LazyCacheBuilder::new()
        .minimum_capacity(16)
        .build(|n: &u64| n * n);

    for round in 0..4u64 {
        for n in 0..8u64 {
            cache.get(&n);
        }
        cache.get(&(100 + round));
    }

    let snapshot = cache.metrics_snapshot();
    println!("{}", snapshot);

    let exporter = PrometheusTextExporter::new("squares", std::io::stdout());
    exporter.export(&snapshot);
}
