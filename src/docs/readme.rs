//! README template sections.
//!
//! Each section is a pure function of its inputs; [`render_readme`] joins
//! them in document order.

use crate::core::{RepoData, StructureSummary, TechStack};
use chrono::NaiveDateTime;
use std::fmt::Write;

pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NO_PREREQUISITES: &str = "No specific prerequisites required.";
pub const GENERIC_USAGE: &str =
    "Please refer to the project's documentation for specific usage instructions.";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const CONTRIBUTING: &str =
    "Contributions are welcome! Please feel free to submit a Pull Request.";
const LICENSE: &str =
    "This project is licensed under the MIT License - see the LICENSE file for details.";

const PYTHON_INSTALL: &[&str] = &[
    "# Create and activate virtual environment",
    "python -m venv venv",
    "source venv/bin/activate  # On Windows: venv\\Scripts\\activate",
    "",
    "# Install dependencies",
    "pip install -r requirements.txt",
];
const NODE_INSTALL: &[&str] = &["# Install dependencies", "npm install"];

const PYTHON_USAGE: &str = "```bash\n# Run the application\npython main.py\n```";
const NODE_USAGE: &str = "```bash\n# Start the development server\nnpm start\n```";

/// Prerequisite line per technology, in output order.
const PREREQUISITES: &[(&str, &str)] = &[
    ("Python", "- Python 3.8 or higher"),
    ("Node.js", "- Node.js 14 or higher"),
    ("Java", "- Java Development Kit (JDK) 11 or higher"),
];

pub fn format_tech_stack(tech_stack: &TechStack) -> String {
    tech_stack
        .iter()
        .map(|tech| format!("- {}", tech))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_project_structure(summary: &StructureSummary) -> String {
    let mut output = format!("Total Files: {}\n\n", summary.total_files);

    output.push_str("Main Directories:\n");
    for directory in &summary.directories {
        let _ = writeln!(output, "- {}/", directory);
    }

    output.push_str("\nFile Types:\n");
    for (ext, count) in &summary.file_types {
        let _ = writeln!(output, "- {}: {} files", ext, count);
    }

    output
}

pub fn prerequisites(tech_stack: &TechStack) -> String {
    let lines: Vec<&str> = PREREQUISITES
        .iter()
        .filter(|(tech, _)| tech_stack.contains(tech))
        .map(|(_, line)| *line)
        .collect();

    if lines.is_empty() {
        NO_PREREQUISITES.to_string()
    } else {
        lines.join("\n")
    }
}

/// Dependency installation commands; Python takes priority over Node.js.
pub fn installation_steps(tech_stack: &TechStack) -> String {
    let steps = if tech_stack.contains("Python") {
        PYTHON_INSTALL
    } else if tech_stack.contains("Node.js") {
        NODE_INSTALL
    } else {
        &[]
    };
    steps.join("\n")
}

/// Run instructions; Python takes priority over Node.js.
pub fn usage_instructions(tech_stack: &TechStack) -> &'static str {
    if tech_stack.contains("Python") {
        PYTHON_USAGE
    } else if tech_stack.contains("Node.js") {
        NODE_USAGE
    } else {
        GENERIC_USAGE
    }
}

fn clone_commands(repo: &RepoData) -> String {
    let mut commands = String::new();
    if !repo.owner.is_empty() {
        let _ = write!(
            commands,
            "# Clone the repository\ngit clone https://github.com/{}/{}.git\n\n",
            repo.owner, repo.name
        );
    }
    let _ = write!(
        commands,
        "# Navigate to the project directory\ncd {}",
        repo.name
    );
    commands
}

pub fn render_readme(
    repo: &RepoData,
    tech_stack: &TechStack,
    summary: &StructureSummary,
    project_summary: &str,
    generated_at: NaiveDateTime,
) -> String {
    let description = repo
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);

    format!(
        "# {name}

{description}

## Project Overview

{project_summary}

## Technology Stack

The project uses the following technologies:

{tech_stack}

## Project Structure

{structure}

## Getting Started

### Prerequisites

{prerequisites}

### Installation

```bash
{clone}

{install}
```

## Usage

{usage}

## Contributing

{CONTRIBUTING}

## License

{LICENSE}

---
*This documentation was automatically generated on {timestamp}*
",
        name = repo.name,
        description = description,
        project_summary = project_summary,
        tech_stack = format_tech_stack(tech_stack),
        structure = format_project_structure(summary),
        prerequisites = prerequisites(tech_stack),
        clone = clone_commands(repo),
        install = installation_steps(tech_stack),
        usage = usage_instructions(tech_stack),
        timestamp = generated_at.format(TIMESTAMP_FORMAT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::structure::analyze;
    use crate::core::FileEntry;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn stack(labels: &[&str]) -> TechStack {
        labels.iter().copied().collect()
    }

    #[test]
    fn test_prerequisites_in_fixed_order() {
        assert_eq!(
            prerequisites(&stack(&["Java", "Python"])),
            "- Python 3.8 or higher\n- Java Development Kit (JDK) 11 or higher"
        );
        assert_eq!(prerequisites(&stack(&["Ruby"])), NO_PREREQUISITES);
    }

    #[test]
    fn test_python_wins_installation_and_usage() {
        let both = stack(&["Python", "Node.js"]);
        let install = installation_steps(&both);
        assert!(install.contains("python -m venv venv"));
        assert!(install.contains("pip install -r requirements.txt"));
        assert!(!install.contains("npm install"));
        assert!(usage_instructions(&both).contains("python main.py"));
    }

    #[test]
    fn test_node_branch_and_fallback() {
        let node = stack(&["Node.js"]);
        assert_eq!(installation_steps(&node), "# Install dependencies\nnpm install");
        assert!(usage_instructions(&node).contains("npm start"));

        let other = stack(&["Ruby"]);
        assert_eq!(installation_steps(&other), "");
        assert_eq!(usage_instructions(&other), GENERIC_USAGE);
    }

    #[test]
    fn test_project_structure_section() {
        let summary = analyze(&[
            FileEntry::file("src/b.js", 1),
            FileEntry::file("docs/a.md", 1),
            FileEntry::file("Makefile", 1),
        ]);

        assert_eq!(
            format_project_structure(&summary),
            indoc! {"
                Total Files: 3

                Main Directories:
                - docs/
                - src/

                File Types:
                - js: 1 files
                - md: 1 files
                - no_extension: 1 files
            "}
        );
    }

    #[test]
    fn test_tech_stack_bullets_sorted() {
        assert_eq!(
            format_tech_stack(&stack(&["Python", "Flask", "JavaScript"])),
            "- Flask\n- JavaScript\n- Python"
        );
    }

    #[test]
    fn test_clone_commands_without_owner() {
        let repo = RepoData {
            name: "local".into(),
            ..RepoData::default()
        };
        assert_eq!(
            clone_commands(&repo),
            "# Navigate to the project directory\ncd local"
        );
    }
}
