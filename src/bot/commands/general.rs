//! General Discord commands - ping and help.
//! These commands don't touch the roster.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils},
        errors::{Error, Result},
    };

    /// Liveness probe.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        utils::reply(ctx, "pong ✅", true).await
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Bot de Turmas - Ajuda**\n\n\
        **Turma**\n\
        • `/turma abrir <nome>` - Abre (ou reabre) uma turma.\n\
        • `/turma fechar` - Fecha a turma atual.\n\
        • `/turma status` - Mostra a turma atual.\n\
        • `/turma listar` - Lista os alunos da turma atual.\n\n\
        **Alunos**\n\
        • `/aluno adicionar <membro>` - Adiciona um aluno na turma atual.\n\
        • `/aluno remover <membro>` - Remove um aluno da turma atual.\n\
        • `/aluno ver <membro>` - Mostra a ficha do aluno.\n\n\
        **Cursos**\n\
        • `/curso listar` - Lista os cursos disponíveis.\n\
        • `/curso adicionar <membro> <curso>` - Registra um curso para o aluno.\n\
        • `/curso remover <membro> <curso>` - Remove um curso do aluno.\n\n\
        • `/ping` - Verifica se o bot está online.";

        utils::reply(ctx, help_text, true).await
    }
}

// Re-export all commands
pub use inner::*;
