//! Project documentation, `README.md`.

use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::templates::{readme, readme_section, README_SECTIONS};
use crate::repair::{Issue, IssueKind, RepairPolicy, Rule};

/// Documentation file name, relative to the root.
pub const README_FILE: &str = "README.md";

/// Checks that `README.md` carries every required section header.
pub struct DocumentationRule;

impl Rule for DocumentationRule {
    fn name(&self) -> &'static str {
        "documentation"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Merge
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        let Ok(text) = ctx.fs.read_to_string(&root.join(README_FILE)) else {
            return vec![self.issue(
                IssueKind::MissingReadme,
                format!("Missing or unreadable {README_FILE} file"),
            )];
        };
        let sections = missing_sections(&text);
        if sections.is_empty() {
            return Vec::new();
        }
        let names = sections.join(", ");
        let message = format!("{README_FILE} is missing sections: {names}");
        let kind = IssueKind::MissingReadmeSections { sections };
        vec![self.issue(kind, message)]
    }
}

fn missing_sections(text: &str) -> Vec<String> {
    README_SECTIONS
        .iter()
        .filter(|header| !text.lines().any(|line| line.trim().eq_ignore_ascii_case(header)))
        .map(|header| (*header).to_string())
        .collect()
}

/// Creates a default `README.md`, or appends the missing sections.
///
/// Sections are separated by a blank line; a blank README gets no leading
/// separator.
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn repair_readme(ctx: &ServiceContext, root: &ProjectRoot) -> Result<(), String> {
    let path = root.join(README_FILE);
    let pm = ctx.settings.package_manager;
    let text = match ctx.fs.read_to_string(&path) {
        Ok(mut text) => {
            let missing = missing_sections(&text);
            if missing.is_empty() {
                return Ok(());
            }
            if text.trim().is_empty() {
                text.clear();
            } else if !text.ends_with('\n') {
                text.push('\n');
            }
            for header in missing {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&readme_section(&header, pm));
            }
            text
        }
        Err(_) => readme(&root.package_name(), pm),
    };
    ctx.fs
        .write(&path, &text)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn header_match_ignores_case_and_padding() {
        let dir = tempfile::tempdir().unwrap();
        let text = "# x\n  ## getting started\n## SCRIPTS\n";
        std::fs::write(dir.path().join(README_FILE), text).unwrap();
        let ctx = ServiceContext::live(Settings::default());
        let issues = DocumentationRule.check(&ctx, &ProjectRoot::new(dir.path()));
        assert!(issues.is_empty());
    }

    #[test]
    fn appends_missing_section_and_keeps_prose() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(README_FILE);
        let original = "# shop\n\nOur storefront.\n\n## Getting Started\n\nRun it.";
        std::fs::write(&path, original).unwrap();
        let ctx = ServiceContext::live(Settings::default());
        let root = ProjectRoot::new(dir.path());

        let issues = DocumentationRule.check(&ctx, &root);
        assert_eq!(
            issues[0].kind,
            IssueKind::MissingReadmeSections {
                sections: vec!["## Scripts".into()]
            }
        );

        repair_readme(&ctx, &root).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(&format!("{original}\n\n## Scripts\n")));
        assert!(text.contains("npm run build"));
        assert!(DocumentationRule.check(&ctx, &root).is_empty());
    }

    #[test]
    fn creates_default_readme_named_after_root() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Pet Shop");
        std::fs::create_dir(&project).unwrap();
        let ctx = ServiceContext::live(Settings::default());
        let root = ProjectRoot::new(&project);

        let issues = DocumentationRule.check(&ctx, &root);
        assert_eq!(issues[0].kind, IssueKind::MissingReadme);
        repair_readme(&ctx, &root).unwrap();
        let text = std::fs::read_to_string(project.join(README_FILE)).unwrap();
        assert!(text.starts_with("# pet-shop\n"));
        assert!(DocumentationRule.check(&ctx, &root).is_empty());
    }

    #[test]
    fn blank_readme_gets_sections_without_leading_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(README_FILE);
        let ctx = ServiceContext::live(Settings::default());
        let root = ProjectRoot::new(dir.path());

        for blank in ["", "\n\n  \n"] {
            std::fs::write(&path, blank).unwrap();
            repair_readme(&ctx, &root).unwrap();
            let text = std::fs::read_to_string(&path).unwrap();
            assert!(text.starts_with("## Getting Started\n"), "{text:?}");
            assert!(text.contains("\n\n## Scripts\n"));
            assert!(DocumentationRule.check(&ctx, &root).is_empty());
        }
    }
}
