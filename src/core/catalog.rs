//! Course catalog - the static mapping between course names and roles.

use crate::errors::{Error, Result};
use std::collections::HashSet;

/// A course and the role that represents it on the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Display name, also the key used in course events
    pub name: String,
    /// Role id granted for this course
    pub role_id: u64,
}

/// Ordered list of courses with unique names and role ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    /// Builds a catalog, trimming names and rejecting blanks and duplicates.
    pub fn new(courses: Vec<Course>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut roles = HashSet::new();
        let mut checked = Vec::with_capacity(courses.len());

        for course in courses {
            let name = course.name.trim().to_string();
            if name.is_empty() {
                return Err(Error::Config {
                    message: format!("Course with role {} has an empty name", course.role_id),
                });
            }
            if !names.insert(name.to_lowercase()) {
                return Err(Error::Config {
                    message: format!("Course '{name}' is listed twice"),
                });
            }
            if course.role_id == 0 {
                return Err(Error::Config {
                    message: format!("Course '{name}' has role id 0"),
                });
            }
            if !roles.insert(course.role_id) {
                return Err(Error::Config {
                    message: format!("Role {} is mapped to more than one course", course.role_id),
                });
            }
            checked.push(Course {
                name,
                role_id: course.role_id,
            });
        }

        Ok(Self { courses: checked })
    }

    /// Courses in configuration order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Looks a course up by name: exact match first, then case-insensitive.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Course> {
        let name = name.trim();
        self.courses
            .iter()
            .find(|course| course.name == name)
            .or_else(|| {
                self.courses
                    .iter()
                    .find(|course| course.name.eq_ignore_ascii_case(name))
            })
    }

    /// The course granted by `role_id`, if any.
    #[must_use]
    pub fn course_for_role(&self, role_id: u64) -> Option<&Course> {
        self.courses.iter().find(|course| course.role_id == role_id)
    }
}
