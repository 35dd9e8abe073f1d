//! Validation results and the console report

use std::path::PathBuf;

/// Errors found in one document, in check order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Results for every document of a directory, in file name order
#[derive(Debug, Clone, Default)]
pub struct DirectoryReport {
    pub results: Vec<(PathBuf, ValidationReport)>,
}

impl DirectoryReport {
    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    pub fn valid_files(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_valid()).count()
    }

    pub fn invalid_files(&self) -> usize {
        self.total_files() - self.valid_files()
    }

    pub fn all_valid(&self) -> bool {
        self.invalid_files() == 0
    }

    /// Prints the report to stdout
    pub fn print(&self) {
        let rule = "=".repeat(60);

        println!("\n{}", rule);
        println!("VALIDATION REPORT");
        println!("{}", rule);

        println!("\nTotal files checked: {}", self.total_files());
        println!("✅ Valid files: {}", self.valid_files());
        if self.invalid_files() > 0 {
            println!("❌ Invalid files: {}", self.invalid_files());
        }

        println!("\nFile Details:");
        println!("{}", "-".repeat(60));

        for (path, report) in &self.results {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            if report.is_valid() {
                println!("✅ {}: VALID", name);
            } else {
                println!("❌ {}: INVALID", name);
                for error in &report.errors {
                    println!("  - {}", error);
                }
            }
        }

        println!("{}", rule);
    }
}
