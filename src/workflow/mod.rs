pub mod class_ctx;
pub mod class_flow;
pub mod grade_pipeline;
pub mod report_builder;

pub use class_ctx::ClassCtx;
pub use class_flow::ClassFlow;
pub use grade_pipeline::GradePipeline;
pub use report_builder::build_class_report;
