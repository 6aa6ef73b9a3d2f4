use clap::Subcommand;
use std::path::PathBuf;

use crate::cli::files::{load_answers, load_schema};
use crate::cli::utils::emit_change;
use crate::cli::OutputFormat;
use crate::form::types::Answers;
use crate::services::DynamicFormService;

#[derive(Subcommand)]
pub enum QuestionsCommands {
    #[command(about = "Clone the questions an add-questions button lists")]
    Add {
        #[arg(help = "Schema JSON file")]
        schema: PathBuf,
        #[arg(help = "Question set id")]
        question_set_id: String,
        #[arg(help = "Add-questions button question id")]
        button_question_id: String,
        #[arg(long, help = "Five character suffix to use instead of a random one")]
        suffix: Option<String>,
        #[arg(long, short, help = "Write the resulting schema here")]
        output: Option<PathBuf>,
    },

    #[command(about = "Remove a cloned question group and delete its answers")]
    Remove {
        #[arg(help = "Schema JSON file")]
        schema: PathBuf,
        #[arg(help = "Question set id")]
        question_set_id: String,
        #[arg(help = "Remove-questions button question id")]
        button_question_id: String,
        #[arg(long, help = "Answers or application JSON file")]
        answers: Option<PathBuf>,
        #[arg(long, short, help = "Write the resulting schema here")]
        output: Option<PathBuf>,
        #[arg(long, help = "Write the resulting answers here")]
        answers_output: Option<PathBuf>,
    },
}

pub fn handle(cmd: QuestionsCommands, service: &DynamicFormService, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        QuestionsCommands::Add { schema, question_set_id, button_question_id, suffix, output } => {
            let parsed = load_schema(&schema)?;
            let change = match suffix {
                Some(suffix) => service.add_repeatable_questions_with_suffix(
                    &parsed,
                    &question_set_id,
                    &button_question_id,
                    &suffix,
                )?,
                None => service.add_repeatable_questions(&parsed, &question_set_id, &button_question_id)?,
            };
            emit_change(&output_format, &change, output.as_deref(), None)
        }
        QuestionsCommands::Remove {
            schema,
            question_set_id,
            button_question_id,
            answers,
            output,
            answers_output,
        } => {
            let parsed = load_schema(&schema)?;
            let answers = match answers {
                Some(path) => load_answers(&path)?,
                None => Answers::new(),
            };
            let change =
                service.remove_repeatable_questions(&parsed, &answers, &question_set_id, &button_question_id)?;
            emit_change(&output_format, &change, output.as_deref(), answers_output.as_deref())
        }
    }
}
