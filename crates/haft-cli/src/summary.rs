//! Human-readable rendering of a publish/package summary.

use haft_registry::Summary;

/// Render a summary the way it is printed after a batch run.
pub fn render(preamble: &str, summary: &Summary) -> String {
    let mut out = format!("*** haft summary ***\n\n{preamble}");

    if summary.built.is_empty() {
        out.push_str("No bundles built\n");
    } else {
        out.push_str(&format!("Bundles built: {}\n", summary.built.len()));
        for name in &summary.built {
            out.push_str(&format!("    * {name}\n"));
        }
    }

    if !summary.errored.is_empty() {
        out.push_str(&format!("Build errors: {}\n", summary.errored.len()));
        for name in &summary.errored {
            out.push_str(&format!("    * {name}\n"));
        }
    }

    if !summary.skipped.is_empty() {
        out.push_str(&format!("Directories skipped: {}\n", summary.skipped.len()));
        for name in &summary.skipped {
            out.push_str(&format!("    * {name}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn render___empty_summary___reports_nothing_built() {
        let rendered = render("Output directory: /tmp\n", &Summary::default());

        assert!(rendered.contains("No bundles built"));
        assert!(!rendered.contains("Build errors"));
        assert!(!rendered.contains("Directories skipped"));
    }

    #[test]
    fn render___lists_every_bucket() {
        let summary = Summary {
            built: vec!["a".to_string()],
            skipped: vec!["b".to_string()],
            errored: vec!["c".to_string(), "d".to_string()],
        };

        let rendered = render("", &summary);

        assert!(rendered.contains("Bundles built: 1"));
        assert!(rendered.contains("    * a"));
        assert!(rendered.contains("Directories skipped: 1"));
        assert!(rendered.contains("Build errors: 2"));
        assert!(rendered.contains("    * d"));
    }
}
