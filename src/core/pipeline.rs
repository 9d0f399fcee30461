use crate::core::batch::BatchOrchestrator;
use crate::core::spreadsheet;
use crate::domain::model::{BatchReport, BatchRow};
use crate::domain::ports::{ConfigProvider, Pipeline, Recommender, Storage};
use crate::utils::error::{RecommendError, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const CSV_HEADERS: [&str; 3] = ["도매처_상품명", "대표키워드", "추천 상품명"];
pub const CSV_FILE_NAME: &str = "recommendations.csv";
pub const JSON_FILE_NAME: &str = "recommendations.json";

const UTF8_BOM: &str = "\u{feff}";

/// Title file formats accepted by the batch run, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Tsv,
    Xlsx,
}

impl InputFormat {
    pub fn from_path(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("xlsx") => InputFormat::Xlsx,
            Some("tsv") => InputFormat::Tsv,
            _ => InputFormat::Csv,
        }
    }
}

pub fn bundle_file_name(date: NaiveDate) -> String {
    format!("추천상품명_{}.zip", date.format("%Y%m%d"))
}

/// Reads a title file, recommends per row, and writes a zip bundle.
pub struct RecommendationPipeline<S: Storage, C: ConfigProvider, R: Recommender> {
    storage: S,
    config: C,
    orchestrator: BatchOrchestrator<R>,
}

impl<S: Storage, C: ConfigProvider, R: Recommender> RecommendationPipeline<S, C, R> {
    pub fn new(storage: S, config: C, orchestrator: BatchOrchestrator<R>) -> Self {
        Self {
            storage,
            config,
            orchestrator,
        }
    }
}

/// First column of every data row; the header row is skipped.
pub fn parse_titles(data: &[u8], delimiter: u8) -> Result<Vec<String>> {
    let data = data.strip_prefix(UTF8_BOM.as_bytes()).unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(data);

    let mut titles = Vec::new();
    for record in reader.records() {
        let record = record?;
        titles.push(record.get(0).unwrap_or_default().trim().to_string());
    }
    Ok(titles)
}

pub fn render_csv(rows: &[BatchRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for row in rows {
        writer.write_record([
            row.original_title.as_str(),
            row.seed.as_str(),
            row.joined_titles().as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RecommendError::ProcessingError {
            message: format!("Failed to flush CSV output: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| RecommendError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: Recommender> Pipeline for RecommendationPipeline<S, C, R> {
    async fn extract(&self) -> Result<Vec<String>> {
        let input = self.config.input_file();
        tracing::debug!("Reading titles from: {}", input);

        let data = self.storage.read_file(input).await?;
        let titles = match InputFormat::from_path(input) {
            InputFormat::Xlsx => spreadsheet::read_first_column(&data)?,
            InputFormat::Tsv => parse_titles(&data, b'\t')?,
            InputFormat::Csv => parse_titles(&data, b',')?,
        };

        if titles.is_empty() {
            tracing::warn!("⚠️ No titles found in {}", input);
        }
        Ok(titles)
    }

    async fn transform(&self, titles: Vec<String>) -> Result<BatchReport> {
        let rows = self.orchestrator.process(&titles).await;
        let csv_output = render_csv(&rows)?;
        let json_output = serde_json::to_string_pretty(&rows)?;

        Ok(BatchReport {
            rows,
            csv_output,
            json_output,
        })
    }

    async fn load(&self, report: BatchReport) -> Result<String> {
        let file_name = bundle_file_name(chrono::Local::now().date_naive());
        let output_path = Path::new(self.config.output_path())
            .join(&file_name)
            .to_string_lossy()
            .into_owned();

        // 建立 ZIP 檔案
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            // Excel 需要 BOM 才能正確顯示韓文
            zip.start_file(CSV_FILE_NAME, SimpleFileOptions::default())?;
            zip.write_all(UTF8_BOM.as_bytes())?;
            zip.write_all(report.csv_output.as_bytes())?;

            zip.start_file(JSON_FILE_NAME, SimpleFileOptions::default())?;
            zip.write_all(report.json_output.as_bytes())?;

            zip.finish()?.into_inner()
        };

        tracing::debug!("Writing bundle ({} bytes) to {}", zip_data.len(), output_path);
        self.storage.write_file(&output_path, &zip_data).await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{default_catalog, CatalogRecommender};
    use crate::core::seed::SeedExtractor;
    use crate::core::spreadsheet::tests::workbook;
    use std::collections::HashMap;
    use std::io::Read;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn insert(&self, path: &str, data: impl AsRef<[u8]>) {
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.as_ref().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.lock().await.get(path).cloned().ok_or_else(|| {
                RecommendError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .await
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_file: String,
        output_path: String,
    }

    impl ConfigProvider for MockConfig {
        fn input_file(&self) -> &str {
            &self.input_file
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    fn pipeline(
        storage: MockStorage,
        input_file: &str,
    ) -> RecommendationPipeline<MockStorage, MockConfig, CatalogRecommender> {
        let orchestrator = BatchOrchestrator::new(
            SeedExtractor::new(["손풍기", "보냉백"]),
            CatalogRecommender::new(default_catalog(), 45, 2, "없음"),
        );
        RecommendationPipeline::new(
            storage,
            MockConfig {
                input_file: input_file.to_string(),
                output_path: "out".to_string(),
            },
            orchestrator,
        )
    }

    #[test]
    fn test_parse_titles_skips_header_and_bom() {
        let data = "\u{feff}상품명,비고\n무선 손풍기 미니,x\n  피크닉 보냉백  \n";
        let titles = parse_titles(data.as_bytes(), b',').unwrap();
        assert_eq!(titles, vec!["무선 손풍기 미니", "피크닉 보냉백"]);
    }

    #[test]
    fn test_render_csv_quotes_joined_titles() {
        let rows = vec![BatchRow {
            original_title: "무선 손풍기, 미니".to_string(),
            seed: "손풍기".to_string(),
            titles: vec!["a".to_string(), "b".to_string()],
        }];
        let csv = render_csv(&rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "도매처_상품명,대표키워드,추천 상품명");
        assert_eq!(lines[1], "\"무선 손풍기, 미니\",손풍기,a; b");
    }

    #[test]
    fn test_bundle_file_name_uses_date_stamp() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        assert_eq!(bundle_file_name(date), "추천상품명_20260701.zip");
    }

    #[tokio::test]
    async fn test_extract_reads_tsv_input() {
        let storage = MockStorage::default();
        storage
            .insert("titles.tsv", "상품명\t가격\n탁상용 손풍기\t9900\n")
            .await;

        let titles = pipeline(storage, "titles.tsv").extract().await.unwrap();
        assert_eq!(titles, vec!["탁상용 손풍기"]);
    }

    #[tokio::test]
    async fn test_extract_reads_xlsx_first_column() {
        let storage = MockStorage::default();
        storage
            .insert(
                "도매처.xlsx",
                workbook(&["상품명", "무선 손풍기 미니", "피크닉 보냉백"], true),
            )
            .await;

        let titles = pipeline(storage, "도매처.xlsx").extract().await.unwrap();
        assert_eq!(titles, vec!["무선 손풍기 미니", "피크닉 보냉백"]);
    }

    #[test]
    fn test_input_format_from_extension() {
        assert_eq!(InputFormat::from_path("a/titles.XLSX"), InputFormat::Xlsx);
        assert_eq!(InputFormat::from_path("titles.tsv"), InputFormat::Tsv);
        assert_eq!(InputFormat::from_path("titles.csv"), InputFormat::Csv);
    }

    #[tokio::test]
    async fn test_extract_missing_file_fails() {
        let result = pipeline(MockStorage::default(), "missing.csv").extract().await;
        assert!(matches!(result, Err(RecommendError::IoError(_))));
    }

    #[tokio::test]
    async fn test_transform_and_load_write_bundle() {
        let storage = MockStorage::default();
        let pipeline = pipeline(storage.clone(), "titles.csv");

        let report = pipeline
            .transform(vec!["무선 손풍기 미니".to_string(), "알수없는상품".to_string()])
            .await
            .unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(
            report.rows[0].joined_titles(),
            "무선 손풍기 저소음 사무실용 손풍기; 무선 손풍기 저소음 캠핑용 손풍기"
        );
        assert_eq!(report.rows[1].seed, "알수없는상품");
        assert_eq!(report.rows[1].joined_titles(), "키워드 DB 없음");

        let output_path = pipeline.load(report).await.unwrap();
        assert!(output_path.starts_with("out"));
        assert!(output_path.ends_with(".zip"));

        let zip_bytes = storage.get_file(&output_path).await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut csv_content = String::new();
        archive
            .by_name(CSV_FILE_NAME)
            .unwrap()
            .read_to_string(&mut csv_content)
            .unwrap();
        assert!(csv_content.starts_with(UTF8_BOM));
        assert!(csv_content.contains("알수없는상품,알수없는상품,키워드 DB 없음"));

        let mut json_content = String::new();
        archive
            .by_name(JSON_FILE_NAME)
            .unwrap()
            .read_to_string(&mut json_content)
            .unwrap();
        let rows: Vec<BatchRow> = serde_json::from_str(&json_content).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
