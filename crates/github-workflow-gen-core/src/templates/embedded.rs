//! Compile-time embedded workflow templates.
//!
//! Each constant loads a template file from `templates/workflows/` via
//! [`include_str!`]. The paths are relative to this source file
//! (`crates/github-workflow-gen-core/src/templates/embedded.rs`).
//!
//! All three templates switch to `<% %>` delimiters on their first line so the
//! GitHub Actions `${{ ... }}` expressions in the YAML pass through untouched.

// -------------------------------------------------------
// Workflow templates
// -------------------------------------------------------

pub const BUILD_WORKFLOW: &str = include_str!("../../../../templates/workflows/build.yml");
pub const RELEASE_WORKFLOW: &str = include_str!("../../../../templates/workflows/release.yml");
pub const RELEASELIB_WORKFLOW: &str =
    include_str!("../../../../templates/workflows/releaselib.yml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::renderer::Template;

    #[test]
    fn test_embedded_templates_parse() {
        for source in [BUILD_WORKFLOW, RELEASE_WORKFLOW, RELEASELIB_WORKFLOW] {
            assert!(source.starts_with("{{=<% %>=}}"));
            Template::parse(source).unwrap();
        }
    }
}
