use anyhow::Result;
use owo_colors::OwoColorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AgentBox;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::SlashCommand;
use crate::domain::services::Conversation;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /help (/h) - Provides this help menu.
- /quit /exit (/q) - Exit Exa Chat.

HOTKEYS:
- CTRL+C - Exit Exa Chat.
- CTRL+D - Exit Exa Chat.
    "#;

    return text.trim().to_string();
}

fn render_new_messages(conversation: &Conversation, printed: usize) -> usize {
    for message in &conversation.messages[printed..] {
        // The prompt already echoed the user's own line.
        if message.author == Author::User {
            continue;
        }

        let prefix = message.author.to_string();
        match message.message_type() {
            MessageType::Error => {
                println!("{}", format!("{prefix}: {text}", text = message.text).red());
            }
            MessageType::Normal => {
                println!("{}: {}", prefix.cyan(), message.text);
            }
        }
    }

    return conversation.messages.len();
}

pub async fn start(agent: AgentBox) -> Result<()> {
    let mut conversation = Conversation::new();

    if let Err(err) = agent.health_check().await {
        conversation.add_message(Message::new_with_type(
            Author::Exa,
            MessageType::Error,
            &format!(
                "Hey, it looks like I can't reach the agent service at {url}. You should double check that before we start talking, otherwise every message will fail.\n\nError: {err}",
                url = Config::get(ConfigKey::AgentUrl)
            ),
        ));
    }

    println!("Exa Chat (agent: {})", Config::get(ConfigKey::AgentUrl));
    println!("Type /help for commands, /quit to exit.\n");

    let mut printed = render_new_messages(&conversation, 0);
    let mut editor = DefaultEditor::new()?;

    loop {
        let readline = editor.readline(&format!("{}: ", Author::User.to_string()));
        match readline {
            Ok(line) => {
                if let Some(command) = SlashCommand::parse(&line) {
                    if command.is_quit() {
                        break;
                    }
                    if command.is_help() {
                        println!("{}\n", help_text());
                        continue;
                    }
                }

                let _ = editor.add_history_entry(&line);
                conversation.submit(&agent, &line).await;
                printed = render_new_messages(&conversation, printed);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                return Err(err.into());
            }
        }
    }

    return Ok(());
}
