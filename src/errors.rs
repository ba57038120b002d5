//! Unified error type for the roster bot.
//!
//! Validation failures caused by user input are marked as user-facing so the
//! bot layer can answer them with an ephemeral reply instead of logging them
//! as failures.

use thiserror::Error;

/// All errors produced by configuration, the roster core and the bot layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is absent from the environment
    #[error("Missing configuration: {name}")]
    MissingConfiguration {
        /// Name of the missing environment variable
        name: String,
    },

    /// A setting is present but could not be used
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A command argument failed validation
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What went wrong
        message: String,
    },

    /// The course name is not part of the course catalog
    #[error("Course not found: {name}")]
    CourseNotFound {
        /// Course name as typed by the user
        name: String,
    },

    /// No class has been opened yet
    #[error("No current class")]
    NoCurrentClass,

    /// The current class exists but is closed for new students
    #[error("Class is closed: {name}")]
    ClassClosed {
        /// Name of the closed class
        name: String,
    },

    /// The referenced class has no record in the roster
    #[error("Class not found: {name}")]
    ClassNotFound {
        /// Name of the missing class
        name: String,
    },

    /// The target user is not a member of the guild
    #[error("Member not resolvable: {user_id}")]
    MemberNotResolvable {
        /// Discord user id
        user_id: String,
    },

    /// A call to the chat platform failed (role grant, panel edit, ...)
    #[error("External call failed ({action}): {message}")]
    ExternalCall {
        /// What was attempted
        action: String,
        /// Error reported by the platform
        message: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Roster document (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Returns true for errors caused by user input, which are answered with an
    /// ephemeral reply rather than logged as failures.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::CourseNotFound { .. }
                | Self::NoCurrentClass
                | Self::ClassClosed { .. }
                | Self::ClassNotFound { .. }
                | Self::MemberNotResolvable { .. }
        )
    }

    /// Message shown to the guild member who triggered the error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => format!("❌ {message}"),
            Self::CourseNotFound { name } => {
                format!("❌ Curso **{name}** não existe. Use `/curso listar` para ver os cursos.")
            }
            Self::NoCurrentClass => "❌ Não tem turma atual. Use `/turma abrir`.".to_string(),
            Self::ClassClosed { name } => {
                format!("❌ Turma **{name}** está fechada. Use `/turma abrir`.")
            }
            Self::ClassNotFound { name } => format!("❌ Turma **{name}** não encontrada."),
            Self::MemberNotResolvable { user_id } => {
                format!("❌ <@{user_id}> não é membro do servidor.")
            }
            _ => "❌ Ocorreu um erro ao executar o comando.".to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_user_facing() {
        assert!(Error::NoCurrentClass.is_user_facing());
        assert!(
            Error::CourseNotFound {
                name: "x".to_string()
            }
            .is_user_facing()
        );
        assert!(
            !Error::ExternalCall {
                action: "add role".to_string(),
                message: "403".to_string()
            }
            .is_user_facing()
        );
        assert!(
            !Error::MissingConfiguration {
                name: "GUILD_ID".to_string()
            }
            .is_user_facing()
        );
    }

    #[test]
    fn test_user_message_names_the_course() {
        let message = Error::CourseNotFound {
            name: "Tiro".to_string(),
        }
        .user_message();
        assert!(message.contains("**Tiro**"));
    }

    #[test]
    fn test_internal_errors_get_generic_message() {
        let message = Error::Config {
            message: "secret detail".to_string(),
        }
        .user_message();
        assert!(!message.contains("secret detail"));
    }
}
