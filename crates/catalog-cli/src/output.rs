use anyhow::Result;
use catalog_core::{ApplyReport, Category, OptionsDiff, Tag, Variant};
use colored::Colorize;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

/// Entities that render as one table row.
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

impl TableRow for Category {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Parent", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.parent_id.clone().unwrap_or_else(|| "-".to_string()),
            self.description.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableRow for Tag {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone()]
    }
}

impl TableRow for Variant {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Options"]
    }

    fn row(&self) -> Vec<String> {
        let options: Vec<&str> = self.options.iter().map(|o| o.value.as_str()).collect();
        vec![self.id.clone(), self.name.clone(), options.join(", ")]
    }
}

pub fn render_table<T: TableRow>(items: &[T]) -> String {
    let mut builder = Builder::default();
    builder.push_record(T::headers().iter().copied());
    for item in items {
        builder.push_record(item.row());
    }
    builder.build().with(Style::rounded()).to_string()
}

pub fn print_list<T: Serialize + TableRow>(items: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No entries found.");
            } else {
                println!("{}", render_table(items));
                println!("Total: {}", items.len());
            }
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize + TableRow>(item: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        OutputFormat::Table => println!("{}", render_table(std::slice::from_ref(item))),
    }
    Ok(())
}

/// One line per pending option call, additions first.
pub fn diff_lines(diff: &OptionsDiff) -> Vec<String> {
    let added = diff.to_add.iter().map(|o| format!("+ {}", o.value));
    let removed = diff.to_remove.iter().map(|o| match &o.id {
        Some(id) => format!("- {} ({id})", o.value),
        None => format!("- {}", o.value),
    });
    added.chain(removed).collect()
}

pub fn print_diff(diff: &OptionsDiff) {
    if diff.is_empty() {
        println!("No option changes.");
        return;
    }
    for line in diff_lines(diff) {
        if line.starts_with('+') {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
}

pub fn report_summary(report: &ApplyReport) -> String {
    format!(
        "{} option(s) added, {} removed",
        report.added.len(),
        report.removed.len()
    )
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

#[cfg(test)]
mod tests {
    use catalog_core::VariantOption;

    use super::*;

    #[test]
    fn test_variant_row_joins_options() {
        let variant = Variant {
            id: "v1".to_string(),
            name: "Size".to_string(),
            options: vec![
                VariantOption::persisted("1", "S"),
                VariantOption::persisted("2", "M"),
            ],
        };
        assert_eq!(variant.row(), vec!["v1", "Size", "S, M"]);
    }

    #[test]
    fn test_table_has_headers() {
        let tags = vec![Tag {
            id: "t1".to_string(),
            name: "Sale".to_string(),
        }];
        let table = render_table(&tags);
        assert!(table.contains("Name"));
        assert!(table.contains("Sale"));
    }

    #[test]
    fn test_diff_lines() {
        let diff = OptionsDiff {
            to_add: vec![VariantOption::new("Green")],
            to_remove: vec![VariantOption::persisted("2", "Blue")],
        };
        assert_eq!(diff_lines(&diff), vec!["+ Green", "- Blue (2)"]);
    }
}
