/// Batch entry point.
///
/// Runs the built-in Malaysian rainfall cleanup job, or the job described
/// by a `climagg.toml` in the working directory when one exists. Prints a
/// summary and a preview of the output on success; on failure prints a
/// descriptive message and exits nonzero without writing output.

use std::path::Path;
use std::process;

use climagg::config::{JobConfig, JOB_FILE_NAME};
use climagg::export;
use climagg::logging::{self, LogLevel};
use climagg::model::PipelineError;
use climagg::pipeline;

fn load_job() -> Result<JobConfig, PipelineError> {
    let job_file = Path::new(JOB_FILE_NAME);
    if job_file.exists() {
        JobConfig::from_toml_path(job_file)
    } else {
        Ok(JobConfig::default_job())
    }
}

fn main() {
    let config = match load_job() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    };

    logging::init_logger(
        LogLevel::Info,
        config.log_file.as_deref().and_then(|p| p.to_str()),
    );

    match pipeline::run(&config) {
        Ok(report) => {
            println!(
                "✅ Success! Processed data saved to {}",
                config.output_path.display()
            );
            for hit in &report.rule_hits {
                println!("   {}: {} rows reassigned", hit.label, hit.matched);
            }
            println!(
                "\nHere's a preview of the processed data ({} rows total):",
                report.rows_written
            );
            for line in export::preview_lines(
                &config.region_column,
                &config.measurements,
                &report.sample,
                report.sample.len(),
            ) {
                println!("   {}", line);
            }
        }
        Err(e @ (PipelineError::InputNotFound(_)
        | PipelineError::MissingColumn(_)
        | PipelineError::InvalidConfig(_))) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("An unexpected error occurred: {}", e);
            process::exit(1);
        }
    }
}
