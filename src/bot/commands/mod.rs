//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Student commands (`/aluno`)
pub mod aluno;

/// Course commands (`/curso`)
pub mod curso;

/// General utility commands
pub mod general;

/// Class commands (`/turma`)
pub mod turma;

/// Reply and lookup helpers shared by the commands
pub mod utils;

// Export commands
pub use aluno::*;
pub use curso::*;
pub use general::*;
pub use turma::*;
