//! Interactive `.env` writer for the bot token and channel ids.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;

/// Variables prompted for, in file order.
const PROMPTS: [(&str, &str); 5] = [
    ("DISCORD_TOKEN", "Enter your Discord bot token"),
    ("BESTSELLERS_CHANNEL_ID", "Enter the channel ID for #bestsellers"),
    ("SALE_CHANNEL_ID", "Enter the channel ID for #sale"),
    ("EXCLUSIVE_CHANNEL_ID", "Enter the channel ID for #exclusive"),
    ("NEW_ARRIVALS_CHANNEL_ID", "Enter the channel ID for #new-arrivals"),
];

/// Answers collected from the prompts, in [`PROMPTS`] order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct EnvAnswers {
    pub token: String,
    pub bestsellers: String,
    pub sale: String,
    pub exclusive: String,
    pub new_arrivals: String,
}

/// Renders the `.env` file body.
pub(crate) fn render_env_file(answers: &EnvAnswers) -> String {
    format!(
        "# Discord Bot Token\n\
         DISCORD_TOKEN={}\n\
         \n\
         # Channel IDs\n\
         BESTSELLERS_CHANNEL_ID={}\n\
         SALE_CHANNEL_ID={}\n\
         EXCLUSIVE_CHANNEL_ID={}\n\
         NEW_ARRIVALS_CHANNEL_ID={}\n",
        answers.token, answers.bestsellers, answers.sale, answers.exclusive, answers.new_arrivals
    )
}

/// Prompts for the bot token and channel ids and writes them to `path`.
///
/// An existing file is only replaced with `force` or after the user answers
/// `y`. Returns `false` when the user declined to overwrite.
///
/// # Errors
///
/// Returns an error if the prompts cannot be read or written, or the file
/// cannot be written.
pub(crate) fn run_init_env<R: BufRead, W: Write>(
    path: &Path,
    force: bool,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<bool> {
    if path.exists() && !force {
        writeln!(output, "An .env file already exists at {}.", path.display())?;
        let answer = ask(input, output, "Do you want to overwrite it? (y/n)")?;
        if !answer.eq_ignore_ascii_case("y") {
            writeln!(output, "Operation cancelled. Existing .env file preserved.")?;
            return Ok(false);
        }
    }

    writeln!(output, "\n=== brickwatch environment setup ===\n")?;
    writeln!(output, "Press Enter to skip a value and set it later.\n")?;

    let mut values = Vec::with_capacity(PROMPTS.len());
    for (var, question) in PROMPTS {
        let value = ask(input, output, question)?;
        if value.is_empty() {
            writeln!(
                output,
                "No value provided for {var}. You'll need to set this manually later."
            )?;
        }
        values.push(value);
    }

    let mut values = values.into_iter();
    let mut next = || values.next().unwrap_or_default();
    let answers = EnvAnswers {
        token: next(),
        bestsellers: next(),
        sale: next(),
        exclusive: next(),
        new_arrivals: next(),
    };

    std::fs::write(path, render_env_file(&answers))
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote env file");

    writeln!(output, "\n.env file created at {}", path.display())?;
    writeln!(output, "Next: review the file, then try `brickwatch check --dry-run`.")?;
    Ok(true)
}

/// Prints `question` and reads one trimmed line. End of input reads as empty.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> anyhow::Result<String> {
    write!(output, "{question}: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
