pub mod column_classifier;
pub mod csv_reader;
pub mod student_metrics;
pub mod subject_stats;

pub use column_classifier::ColumnClassifier;
pub use csv_reader::parse_csv;
pub use student_metrics::{format_rank, StudentMetricsCalculator};
pub use subject_stats::SubjectStatsBuilder;
