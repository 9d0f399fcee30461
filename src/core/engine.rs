use crate::domain::model::BatchRow;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct RecommendEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> RecommendEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        let (output_path, _) = self.run_with_rows().await?;
        Ok(output_path)
    }

    /// Same as [`run`](Self::run) but also hands back the processed rows.
    pub async fn run_with_rows(&self) -> Result<(String, Vec<BatchRow>)> {
        tracing::info!("🚀 Starting batch recommendation");
        self.monitor.log_stats("Start");

        let titles = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} titles", titles.len());
        self.monitor.log_stats("Extract");

        let report = self.pipeline.transform(titles).await?;
        tracing::info!("🔎 Recommended titles for {} rows", report.rows.len());
        self.monitor.log_stats("Transform");

        let rows = report.rows.clone();
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("📦 Bundle written to {}", output_path);
        self.monitor.log_final_stats();

        Ok((output_path, rows))
    }
}
