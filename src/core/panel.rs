//! Panel rendering - the class roster and course panels.
//!
//! Both panels are derived from the roster alone and returned as structured
//! data; the bot layer turns them into embeds and publishes them in place.

use super::catalog::CourseCatalog;
use crate::entities::Roster;

/// Member lines per class panel block.
pub const CLASS_PANEL_LINES_PER_BLOCK: usize = 25;
/// Maximum number of blocks in the class panel.
pub const CLASS_PANEL_MAX_BLOCKS: usize = 8;
/// Maximum number of students listed per course.
pub const COURSE_PANEL_MAX_STUDENTS: usize = 25;

/// Rendered class panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPanel {
    /// Title naming the current class, or a placeholder
    pub title: String,
    /// Open/closed status line
    pub status_line: String,
    /// Member count line
    pub count_line: String,
    /// Bulleted member lists, at most [`CLASS_PANEL_MAX_BLOCKS`]
    pub blocks: Vec<String>,
    /// Notice for members that did not fit
    pub truncation_notice: Option<String>,
}

/// One course of the course panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseBlock {
    /// Course display name
    pub course: String,
    /// Labels of active students, sorted, at most [`COURSE_PANEL_MAX_STUDENTS`]
    pub students: Vec<String>,
}

/// Renders the class panel for the current class.
#[must_use]
pub fn render_class_panel(roster: &Roster) -> ClassPanel {
    let Some(name) = roster.current_class.as_deref() else {
        return ClassPanel {
            title: "📚 Nenhuma turma".to_string(),
            status_line: "Use `/turma abrir` para abrir uma turma.".to_string(),
            count_line: "👥 0 alunos".to_string(),
            blocks: Vec::new(),
            truncation_notice: None,
        };
    };

    let lines: Vec<String> = roster
        .classes
        .get(name)
        .map(|class| {
            class
                .members
                .iter()
                .map(|id| {
                    let label = roster
                        .students
                        .get(id)
                        .map_or_else(|| format!("<@{id}>"), |s| s.label(id));
                    format!("• {label}")
                })
                .collect()
        })
        .unwrap_or_default();

    let status_line = if roster.is_open {
        "🟢 Aberta".to_string()
    } else {
        "🔒 Fechada".to_string()
    };

    let mut blocks: Vec<String> = lines
        .chunks(CLASS_PANEL_LINES_PER_BLOCK)
        .map(|chunk| chunk.join("\n"))
        .collect();

    let truncation_notice = if blocks.len() > CLASS_PANEL_MAX_BLOCKS {
        blocks.truncate(CLASS_PANEL_MAX_BLOCKS);
        let hidden = lines.len() - CLASS_PANEL_MAX_BLOCKS * CLASS_PANEL_LINES_PER_BLOCK;
        Some(format!("… e mais {hidden} alunos não exibidos."))
    } else {
        None
    };

    ClassPanel {
        title: format!("📚 Turma: {name}"),
        status_line,
        count_line: format!("👥 {} alunos", lines.len()),
        blocks,
        truncation_notice,
    }
}

/// Renders one block per catalog course, in catalog order.
#[must_use]
pub fn render_course_panel(roster: &Roster, catalog: &CourseCatalog) -> Vec<CourseBlock> {
    catalog
        .courses()
        .iter()
        .map(|course| {
            let mut students: Vec<String> = roster
                .students
                .iter()
                .filter(|(_, student)| student.is_course_active(&course.name))
                .map(|(id, student)| student.label(id))
                .collect();
            students.sort_by_key(|label| label.to_lowercase());
            students.truncate(COURSE_PANEL_MAX_STUDENTS);

            CourseBlock {
                course: course.name.clone(),
                students,
            }
        })
        .collect()
}
