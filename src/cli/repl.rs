//! Interactive REPL implementation.

use crate::chat::{ChatController, Message};
use crate::cli::completion::{create_reedline, PropostaCompleter, PropostaPrompt};
use crate::cli::spinner::Spinner;
use crate::config::XdgDirs;
use crate::format::ReplyRenderer;
use crate::webhook::Attachment;
use reedline::{FileBackedHistory, Signal};
use tracing::debug;

use super::commands::{core, history};

/// REPL state.
pub struct Repl {
    controller: ChatController,
    renderer: ReplyRenderer,
}

impl Repl {
    /// Create a new REPL.
    pub fn new(controller: ChatController) -> Self {
        Self {
            controller,
            renderer: ReplyRenderer::default(),
        }
    }

    /// Run the REPL loop.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up completer
        let mut completer = PropostaCompleter::new();
        completer.set_titles(
            self.controller
                .history()
                .entries()
                .iter()
                .map(|entry| entry.title.clone())
                .collect(),
        );

        let mut line_editor = create_reedline(completer);
        // Load history
        let history_path = XdgDirs::new().state.join("history.txt");
        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(h) = FileBackedHistory::with_file(500, history_path.clone()) {
            line_editor = line_editor.with_history(Box::new(h));
        }

        self.print_greeting()?;

        loop {
            let prompt = PropostaPrompt::with_attachment(
                self.controller
                    .staged_attachment()
                    .map(|a| a.file_name.clone()),
            );

            match line_editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        // Bare Enter with a staged file submits it without text
                        if self.controller.staged_attachment().is_some() {
                            if let Err(e) = self.handle_prompt("").await {
                                println!("❌ Erro: {}", e);
                            }
                        }
                        continue;
                    }

                    match self.handle_input(&line).await {
                        Ok(true) => {
                            println!("👋 Até logo!");
                            break;
                        }
                        Ok(false) => {}
                        Err(e) => println!("❌ Erro: {}", e),
                    }
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(Signal::CtrlD) => {
                    println!("👋 Até logo!");
                    break;
                }
                Err(err) => {
                    println!("❌ Erro de leitura: {}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> anyhow::Result<bool> {
        if input.starts_with('/') {
            return self.handle_command(input).await;
        }
        self.handle_prompt(input).await?;
        Ok(false)
    }

    async fn handle_command(&mut self, input: &str) -> anyhow::Result<bool> {
        let (cmd, args) = parse_command(input);

        match cmd.as_str() {
            "help" | "h" | "?" => core::show_help(),
            "exit" | "quit" | "q" => return Ok(true),
            "clear" | "cls" => print!("\x1b[2J\x1b[1;1H"),
            "new" | "n" => {
                let archived = self.controller.new_conversation()?;
                core::cmd_new(archived.as_ref());
                self.print_greeting()?;
            }
            "attach" | "a" => self.cmd_attach(&args),
            "history" | "hist" => history::list(self.controller.history()),
            "open" | "load" => {
                if history::open(&mut self.controller, &args) {
                    self.replay_conversation()?;
                }
            }
            "delete" | "rm" => history::delete(&mut self.controller, &args),
            "export" => {
                let (default_name, contents) = self.controller.export();
                core::cmd_export(&default_name, &contents, &args);
            }
            "stats" => core::cmd_stats(&self.controller.stats()),
            "version" | "v" => core::cmd_version(),
            _ => {
                println!("❓ Comando desconhecido: /{}", cmd);
                println!("   Digite /help para ver os comandos");
            }
        }

        Ok(false)
    }

    /// Handle the /attach command - stage a file for the next send.
    fn cmd_attach(&mut self, args: &str) {
        if args.is_empty() {
            println!("❌ Informe um arquivo: /attach <arquivo>");
            return;
        }

        let path = std::path::PathBuf::from(shellexpand::tilde(args).as_ref());
        match Attachment::from_path(&path) {
            Ok(attachment) => {
                if !attachment.has_accepted_extension() {
                    println!("⚠️  Extensão incomum: esperado .pdf, .doc, .docx ou .txt");
                }
                println!(
                    "📎 Anexado: \x1b[1m{}\x1b[0m ({})",
                    attachment.file_name,
                    core::human_size(attachment.bytes.len() as u64)
                );
                println!("\x1b[2m   Envie uma mensagem (ou Enter vazio) para submeter o arquivo\x1b[0m");
                self.controller.stage_attachment(attachment);
            }
            Err(e) => println!("❌ Falha ao anexar {}: {}", path.display(), e),
        }
    }

    /// Handle a regular prompt: submit it and render the reply when it
    /// arrives. Public so single-prompt mode can reuse the exact send path.
    pub async fn handle_prompt(&mut self, prompt: &str) -> anyhow::Result<()> {
        debug!(prompt_len = prompt.len(), "handle_prompt started");

        let attachment_only = prompt.trim().is_empty();
        if !self.controller.send(prompt) {
            return Ok(());
        }

        if attachment_only {
            // Echo the synthesized message so the exchange reads naturally
            if let Some(last) = self.controller.conversation().messages().last() {
                println!("\x1b[2m> {}\x1b[0m", last.content);
            }
        }

        println!(); // Add spacing before spinner

        // Start spinner
        let spinner = Spinner::new();
        let spinner_handle = spinner.start("Gerando proposta...");

        let event = self.controller.next_event().await;
        spinner_handle.stop().await;

        let Some(event) = event else {
            anyhow::bail!("canal de eventos fechado");
        };
        let reply = self.controller.apply(event);

        self.renderer.render_text(&reply.content)?;
        println!();

        Ok(())
    }

    /// Render the fresh greeting after /new.
    fn print_greeting(&self) -> std::io::Result<()> {
        if let Some(first) = self.controller.conversation().messages().first() {
            println!();
            self.renderer.render_text(&first.content)?;
            println!();
        }
        Ok(())
    }

    /// Replay a loaded conversation on screen.
    fn replay_conversation(&self) -> std::io::Result<()> {
        println!();
        for message in self.controller.conversation().messages() {
            self.render_message(message)?;
        }
        Ok(())
    }

    fn render_message(&self, message: &Message) -> std::io::Result<()> {
        if message.is_user {
            println!("\x1b[1;33m{}\x1b[0m: {}", message.role(), message.content);
        } else {
            self.renderer.render_text(&message.content)?;
        }
        println!();
        Ok(())
    }
}

/// Split "/cmd args" into a lowercase command name and trimmed args.
fn parse_command(input: &str) -> (String, String) {
    let parts: Vec<&str> = input[1..].splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("").to_string();
    (cmd, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_without_args() {
        assert_eq!(parse_command("/help"), ("help".to_string(), String::new()));
        assert_eq!(parse_command("/HELP"), ("help".to_string(), String::new()));
    }

    #[test]
    fn test_parse_command_with_args() {
        assert_eq!(
            parse_command("/attach ~/docs/memorial.pdf"),
            ("attach".to_string(), "~/docs/memorial.pdf".to_string())
        );
        assert_eq!(
            parse_command("/open  Sistema de climatização "),
            ("open".to_string(), "Sistema de climatização".to_string())
        );
    }

    #[test]
    fn test_parse_command_keeps_arg_case() {
        let (cmd, args) = parse_command("/Open Sistema NOVO");
        assert_eq!(cmd, "open");
        assert_eq!(args, "Sistema NOVO");
    }

    #[test]
    fn test_parse_bare_slash() {
        assert_eq!(parse_command("/"), (String::new(), String::new()));
    }
}
