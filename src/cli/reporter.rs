use colored::Colorize;

use super::driver::RunResult;

/// Renders a run summary, optionally with ANSI colors.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, result: &RunResult) -> String {
        let mut out = String::new();
        for changed in &result.changed {
            let recipes = changed.recipes.join(", ");
            out.push_str(&format!(
                "{} {} ({})\n",
                self.paint_marker("changed"),
                changed.source_path,
                self.paint_dim(&recipes)
            ));
            if let Some(written) = &changed.written {
                out.push_str(&format!("  -> {}\n", written.display()));
            }
            if let Some(rendered) = &changed.rendered {
                out.push('\n');
                out.push_str(rendered);
                if !rendered.ends_with('\n') {
                    out.push('\n');
                }
                out.push('\n');
            }
        }
        let summary = format!(
            "{} of {} file(s) changed by {} recipe(s)",
            result.changed.len(),
            result.files_read,
            result.recipes.len()
        );
        if self.color {
            out.push_str(&summary.bold().to_string());
        } else {
            out.push_str(&summary);
        }
        out.push('\n');
        out
    }

    fn paint_marker(&self, text: &str) -> String {
        if self.color {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
